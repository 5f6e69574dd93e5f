//! Raster source abstraction.
//!
//! The sampler only needs four things from a raster: its band count, optional
//! per-band labels, its extent, and values at points. Format-specific readers
//! plug in through [`RasterOpener`], which the orchestrator calls once per file
//! on a worker thread.

use std::path::Path;

use geo_common::{BoundingBox, SamplePoint};
use geotiff_reader::{GeoTiffError, GeoTiffSource};

/// An open raster handle, owned by a single worker.
///
/// The handle is released when it is dropped.
pub trait RasterSource {
    type Error: std::error::Error;

    /// Number of bands.
    fn band_count(&self) -> usize;

    /// One optional label per band, in band order.
    fn descriptions(&self) -> Vec<Option<String>>;

    /// Extent of the raster in its native coordinates.
    fn bounds(&self) -> BoundingBox;

    /// Values of every band at each point, in point order.
    fn sample(&mut self, points: &[SamplePoint]) -> Result<Vec<Vec<f64>>, Self::Error>;
}

/// Opens raster files by path.
pub trait RasterOpener: Send + Sync + 'static {
    type Source: RasterSource;

    fn open(&self, path: &Path) -> Result<Self::Source, <Self::Source as RasterSource>::Error>;
}

impl RasterSource for GeoTiffSource {
    type Error = GeoTiffError;

    fn band_count(&self) -> usize {
        GeoTiffSource::band_count(self)
    }

    fn descriptions(&self) -> Vec<Option<String>> {
        GeoTiffSource::descriptions(self).to_vec()
    }

    fn bounds(&self) -> BoundingBox {
        GeoTiffSource::bounds(self)
    }

    fn sample(&mut self, points: &[SamplePoint]) -> Result<Vec<Vec<f64>>, GeoTiffError> {
        GeoTiffSource::sample(self, points)
    }
}

/// Opens GeoTIFF files.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoTiffOpener;

impl RasterOpener for GeoTiffOpener {
    type Source = GeoTiffSource;

    fn open(&self, path: &Path) -> Result<GeoTiffSource, GeoTiffError> {
        GeoTiffSource::open(path)
    }
}
