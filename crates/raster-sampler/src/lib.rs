//! Concurrent point sampling of raster files.
//!
//! Given a list of raster files and a set of points, every band of every
//! file is sampled at every point. Each row is labelled with the timestamp
//! embedded in its file name, and all rows are merged into one
//! [`ResultTable`] ordered by `(timestamp, x, y)`.
//!
//! ```ignore
//! use raster_sampler::{GeoTiffOpener, SamplerConfig, SamplerPool};
//!
//! let pool = SamplerPool::new(GeoTiffOpener, SamplerConfig::default())?;
//! let table = pool
//!     .sample_files(&files, (vec![500_025.0], vec![6_999_975.0]), None)
//!     .await?;
//! ```
//!
//! Files are read through the [`RasterOpener`] / [`RasterSource`] traits;
//! [`GeoTiffOpener`] is the GeoTIFF implementation and [`memory`] holds an
//! in-memory one.

pub mod bands;
pub mod config;
pub mod discovery;
pub mod error;
pub mod memory;
pub mod orchestrator;
pub mod sampler;
pub mod source;
pub mod table;

pub use bands::resolve_band_names;
pub use config::SamplerConfig;
pub use discovery::{list_dirs, list_ext};
pub use error::{SampleError, SampleResult};
pub use orchestrator::SamplerPool;
pub use sampler::{sample_file, sample_points};
pub use source::{GeoTiffOpener, RasterOpener, RasterSource};
pub use table::{ResultTable, SampleRecord};
