//! GeoTIFF reader for point sampling.
//!
//! Wraps the pure-Rust `tiff` decoder with the GeoTIFF pieces a sampler
//! needs: the pixel-to-world transform (`ModelTransformationTag`, or
//! `ModelPixelScaleTag` + `ModelTiepointTag`), per-band descriptions from
//! the GDAL metadata tag, and the GDAL nodata value.
//!
//! # Limitations
//!
//! - Only the first image (IFD) is read; overviews are ignored.
//! - Multi-band images must use interleaved (chunky) sample layout.
//! - `PixelIsPoint` raster space is treated as `PixelIsArea`.

pub mod error;
pub mod metadata;
pub mod reader;
pub mod transform;

pub use error::{GeoTiffError, GeoTiffResult};
pub use metadata::GdalMetadata;
pub use reader::GeoTiffSource;
pub use transform::GeoTransform;
