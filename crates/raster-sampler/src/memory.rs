//! In-memory rasters.
//!
//! Used to drive the sampler without files on disk: each raster returns fixed
//! band values inside its extent and `NaN` outside. The opener counts how
//! many handles are open at once and can be told to fail for given paths.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use geo_common::{BoundingBox, SamplePoint};

use crate::source::{RasterOpener, RasterSource};

/// Error raised by in-memory rasters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct MemoryError(pub String);

/// A raster with constant band values over its extent.
#[derive(Debug, Clone)]
pub struct MemoryRaster {
    values: Vec<f64>,
    descriptions: Vec<Option<String>>,
    bounds: BoundingBox,
    sample_failure: Option<String>,
}

impl MemoryRaster {
    /// A raster covering the whole plane with one value per band.
    pub fn new(values: Vec<f64>) -> Self {
        let descriptions = vec![None; values.len()];
        Self {
            values,
            descriptions,
            bounds: BoundingBox::new(f64::MIN, f64::MIN, f64::MAX, f64::MAX),
            sample_failure: None,
        }
    }

    pub fn with_descriptions<S: Into<String>>(mut self, descriptions: Vec<Option<S>>) -> Self {
        self.descriptions = descriptions.into_iter().map(|d| d.map(Into::into)).collect();
        self
    }

    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = bounds;
        self
    }

    /// Make every `sample` call fail with `reason`.
    pub fn failing_sample(mut self, reason: impl Into<String>) -> Self {
        self.sample_failure = Some(reason.into());
        self
    }
}

#[derive(Debug, Clone)]
enum Entry {
    Raster(MemoryRaster),
    OpenFailure(String),
}

/// Opens [`MemoryRaster`]s registered under file paths.
#[derive(Debug, Default)]
pub struct MemoryOpener {
    entries: HashMap<PathBuf, Entry>,
    delay: Option<Duration>,
    opened: AtomicUsize,
    active: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl MemoryOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raster(mut self, path: impl Into<PathBuf>, raster: MemoryRaster) -> Self {
        self.entries.insert(path.into(), Entry::Raster(raster));
        self
    }

    /// Make opening `path` fail with `reason`.
    pub fn with_open_failure(mut self, path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        self.entries
            .insert(path.into(), Entry::OpenFailure(reason.into()));
        self
    }

    /// Hold each handle open for `delay` while sampling.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of successful and failed open attempts so far.
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Handles currently open.
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Largest number of handles that were open at the same time.
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl RasterOpener for MemoryOpener {
    type Source = MemorySource;

    fn open(&self, path: &Path) -> Result<MemorySource, MemoryError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        let raster = match self.entries.get(path) {
            Some(Entry::Raster(raster)) => raster.clone(),
            Some(Entry::OpenFailure(reason)) => return Err(MemoryError(reason.clone())),
            None => {
                return Err(MemoryError(format!(
                    "no raster registered for {}",
                    path.display()
                )))
            }
        };

        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        Ok(MemorySource {
            raster,
            delay: self.delay,
            active: Arc::clone(&self.active),
        })
    }
}

/// Open handle to a [`MemoryRaster`].
#[derive(Debug)]
pub struct MemorySource {
    raster: MemoryRaster,
    delay: Option<Duration>,
    active: Arc<AtomicUsize>,
}

impl RasterSource for MemorySource {
    type Error = MemoryError;

    fn band_count(&self) -> usize {
        self.raster.values.len()
    }

    fn descriptions(&self) -> Vec<Option<String>> {
        self.raster.descriptions.clone()
    }

    fn bounds(&self) -> BoundingBox {
        self.raster.bounds
    }

    fn sample(&mut self, points: &[SamplePoint]) -> Result<Vec<Vec<f64>>, MemoryError> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if let Some(reason) = &self.raster.sample_failure {
            return Err(MemoryError(reason.clone()));
        }
        Ok(points
            .iter()
            .map(|p| {
                if self.raster.bounds.contains_point(p.x, p.y) {
                    self.raster.values.clone()
                } else {
                    vec![f64::NAN; self.raster.values.len()]
                }
            })
            .collect())
    }
}

impl Drop for MemorySource {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}
