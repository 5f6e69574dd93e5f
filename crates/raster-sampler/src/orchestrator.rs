//! Concurrent fan-out over files and merge into one table.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use geo_common::{Coordinates, SamplePoint};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::SamplerConfig;
use crate::error::{SampleError, SampleResult};
use crate::sampler::sample_points;
use crate::source::RasterOpener;
use crate::table::ResultTable;

/// Per-file result tagged with the file's position in the input list.
type FileTable = (usize, PathBuf, ResultTable);

/// Samples many rasters concurrently with a bounded number of workers.
///
/// Each file is sampled on the blocking thread pool. At most
/// `config.workers` files are open at any time; the rest wait for a slot.
/// The first failure cancels files that have not started yet and is returned
/// to the caller; no partial table is produced.
pub struct SamplerPool<O: RasterOpener> {
    opener: Arc<O>,
    config: SamplerConfig,
}

impl<O: RasterOpener> SamplerPool<O> {
    /// Create a pool, validating the configuration.
    pub fn new(opener: O, config: SamplerConfig) -> SampleResult<Self> {
        Self::from_arc(Arc::new(opener), config)
    }

    /// Create a pool around an opener the caller keeps a handle to.
    pub fn from_arc(opener: Arc<O>, config: SamplerConfig) -> SampleResult<Self> {
        config.validate()?;
        Ok(Self { opener, config })
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Sample every file at the same coordinates and merge the results.
    ///
    /// Rows are sorted by `(timestamp, x, y)`. All files must resolve to the
    /// same band names. An empty file list gives an empty table whose bands
    /// are `bands` if given, otherwise none.
    pub async fn sample_files<P: AsRef<Path>>(
        &self,
        files: &[P],
        coordinates: impl Into<Coordinates>,
        bands: Option<&[String]>,
    ) -> SampleResult<ResultTable> {
        let points: Arc<[SamplePoint]> = coordinates.into().into_points()?.into();
        let bands: Option<Arc<[String]>> = bands.map(Arc::from);

        if files.is_empty() {
            debug!("No files to sample");
            let names = bands.map(|b| b.to_vec()).unwrap_or_default();
            return Ok(ResultTable::new(names));
        }

        let start = Instant::now();
        info!(
            files = files.len(),
            points = points.len(),
            workers = self.config.workers,
            "Sampling rasters"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.workers));
        let cancel = CancellationToken::new();
        let mut tasks = JoinSet::new();

        for (index, path) in files.iter().enumerate() {
            let path = path.as_ref().to_path_buf();
            let opener = Arc::clone(&self.opener);
            let points = Arc::clone(&points);
            let bands = bands.clone();
            let semaphore = Arc::clone(&semaphore);
            let cancel = cancel.clone();

            tasks.spawn(async move {
                let _permit = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return None,
                    permit = semaphore.acquire_owned() => match permit {
                        Ok(permit) => permit,
                        Err(_) => return None,
                    },
                };
                if cancel.is_cancelled() {
                    return None;
                }

                let display = path.display().to_string();
                let result = tokio::task::spawn_blocking(move || {
                    sample_points(&*opener, &path, &points, bands.as_deref())
                        .map(|table| (index, path, table))
                })
                .await
                .unwrap_or_else(|e| Err(SampleError::Worker(format!("{}: {}", display, e))));

                Some(result)
            });
        }

        let mut tables: Vec<FileTable> = Vec::with_capacity(files.len());
        while let Some(joined) = tasks.join_next().await {
            let result = match joined {
                Ok(Some(result)) => result,
                Ok(None) => continue,
                Err(e) => Err(SampleError::Worker(e.to_string())),
            };

            match result {
                Ok(table) => tables.push(table),
                Err(e) => {
                    warn!(error = %e, "Sampling failed, cancelling remaining files");
                    cancel.cancel();
                    tasks.shutdown().await;
                    return Err(e);
                }
            }
        }

        let merged = merge(tables)?;

        info!(
            files = files.len(),
            rows = merged.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Sampling complete"
        );

        Ok(merged)
    }

    /// Blocking form of [`sample_files`](Self::sample_files).
    ///
    /// Runs on a private runtime, so it must not be called from within an
    /// async context.
    pub fn sample_files_blocking<P: AsRef<Path>>(
        &self,
        files: &[P],
        coordinates: impl Into<Coordinates>,
        bands: Option<&[String]>,
    ) -> SampleResult<ResultTable> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.sample_files(files, coordinates, bands))
    }
}

/// Concatenate per-file tables in input order and sort by key.
fn merge(mut tables: Vec<FileTable>) -> SampleResult<ResultTable> {
    tables.sort_by_key(|(index, _, _)| *index);
    let mut tables = tables.into_iter();

    let Some((_, _, mut merged)) = tables.next() else {
        return Err(SampleError::Worker(
            "no file produced a result".to_string(),
        ));
    };

    for (_, path, table) in tables {
        if table.bands() != merged.bands() {
            return Err(SampleError::BandResolutionMismatch {
                path,
                expected: merged.bands().to_vec(),
                found: table.bands().to_vec(),
            });
        }
        merged.append(table);
    }

    merged.sort();
    Ok(merged)
}
