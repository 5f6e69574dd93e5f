//! Error types for Sentinel-2 helpers.

use raster_sampler::SampleError;
use thiserror::Error;

/// Result type for Sentinel-2 helpers.
pub type SentinelResult<T> = Result<T, SentinelError>;

#[derive(Error, Debug)]
pub enum SentinelError {
    /// Image type name not in the band-combination table.
    #[error("unknown image type '{0}'")]
    UnknownImageType(String),

    /// Resolution other than 10m, 20m or 60m.
    #[error("invalid resolution '{0}', expected one of 10m, 20m, 60m")]
    InvalidResolution(String),

    /// No JPEG2000 file in the product matches a band label.
    #[error("no band file matching '{label}' in product {product}")]
    BandFileNotFound { product: String, label: String },

    /// Bands to be stacked differ in length.
    #[error("band {band} has {found} values, expected {expected}")]
    BandLengthMismatch {
        band: usize,
        expected: usize,
        found: usize,
    },

    /// Listing product files failed.
    #[error(transparent)]
    Discovery(#[from] SampleError),
}
