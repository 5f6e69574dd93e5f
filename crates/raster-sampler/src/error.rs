//! Error types for raster sampling.

use std::path::PathBuf;

use geo_common::CoordinateError;
use thiserror::Error;

/// Result type for sampling operations.
pub type SampleResult<T> = Result<T, SampleError>;

/// Errors that can occur while sampling and merging rasters.
#[derive(Error, Debug)]
pub enum SampleError {
    /// The file could not be opened as a raster.
    #[error("failed to open raster {path}: {reason}")]
    OpenFailure { path: PathBuf, reason: String },

    /// A file resolved to different band names than the rest of the batch.
    #[error("band names of {path} ({found:?}) differ from the batch ({expected:?})")]
    BandResolutionMismatch {
        path: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Explicit band names do not match the file's band count.
    #[error("{path} has {found} bands but {expected} band names were given")]
    BandCountMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    /// x and y coordinate sequences differ in length.
    #[error("x and y coordinate sequences differ in length ({x} vs {y})")]
    CoordinateMismatch { x: usize, y: usize },

    /// The raster failed while reading sample values.
    #[error("failed to sample {path}: {reason}")]
    Sampling { path: PathBuf, reason: String },

    /// A worker task panicked or was cancelled unexpectedly.
    #[error("worker failed: {0}")]
    Worker(String),

    /// Invalid sampler configuration.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<CoordinateError> for SampleError {
    fn from(err: CoordinateError) -> Self {
        match err {
            CoordinateError::LengthMismatch { x, y } => SampleError::CoordinateMismatch { x, y },
        }
    }
}

impl From<walkdir::Error> for SampleError {
    fn from(err: walkdir::Error) -> Self {
        match err.into_io_error() {
            Some(io) => SampleError::Io(io),
            None => SampleError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "filesystem loop while walking directory",
            )),
        }
    }
}
