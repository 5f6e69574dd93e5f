//! Common test fixtures for raster sampling tests.
//!
//! This module provides pre-defined file names, points and band labels that
//! represent common scenarios when sampling stacks of timestamped rasters.

/// File names with and without embedded timestamps.
pub mod files {
    /// Timestamp token as `YYYYMMDDhhmm` between other tokens
    pub const WITH_TIMESTAMP: &str = "some_file_name_201201050842_with_timestamp.tif";

    /// No token parses as a timestamp
    pub const WITHOUT_TIMESTAMP: &str = "no_timestamp_here.tif";

    /// Three daily files, deliberately out of chronological order
    pub const DAILY_UNSORTED: [&str; 3] = [
        "ndvi_20120107.tif",
        "ndvi_20120105.tif",
        "ndvi_20120106.tif",
    ];

    /// Sentinel-2 style product name (first timestamp token is the sensing time)
    pub const SENTINEL2_L1C: &str =
        "S2A_MSIL1C_20170105T013442_N0204_R031_T53NMJ_20170105T013443.SAFE";

    /// Sentinel-2 level-2A product name
    pub const SENTINEL2_L2A: &str =
        "S2B_MSIL2A_20190312T104019_N0211_R008_T31UFU_20190312T134538.SAFE";
}

/// Point sets in world coordinates of [`GeoTiffSpec::band_stack`](crate::GeoTiffSpec::band_stack).
pub mod points {
    /// X coordinates of a three-point series
    pub const SERIES_X: [f64; 3] = [500_005.0, 500_015.0, 500_035.0];

    /// Y coordinates of a three-point series
    pub const SERIES_Y: [f64; 3] = [6_999_995.0, 6_999_985.0, 6_999_975.0];

    /// A point far outside any test raster
    pub const OUTSIDE: (f64, f64) = (-1.0e6, -1.0e6);
}

/// Band labels.
pub mod bands {
    /// Labels generated for a 3-band file without descriptions
    pub const GENERATED_3: [&str; 3] = ["band_0", "band_1", "band_2"];

    /// Descriptions of a typical RGB composite
    pub const RGB: [&str; 3] = ["red", "green", "blue"];
}
