//! Error types for GeoTIFF reading operations.

use thiserror::Error;

/// Result type for GeoTIFF reader operations.
pub type GeoTiffResult<T> = Result<T, GeoTiffError>;

/// Error types for GeoTIFF reading.
#[derive(Error, Debug)]
pub enum GeoTiffError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TIFF structure or compression could not be decoded
    #[error("TIFF decode error: {0}")]
    Decode(#[from] tiff::TiffError),

    /// Well-formed TIFF with content we cannot interpret
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Layout the reader does not handle
    #[error("Unsupported layout: {0}")]
    Unsupported(String),

    /// GDAL metadata XML could not be parsed
    #[error("Invalid GDAL metadata: {0}")]
    Metadata(String),
}
