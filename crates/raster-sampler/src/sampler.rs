//! Per-file sampling.

use std::path::Path;

use geo_common::{timestamp_from_filename, Coordinates, SamplePoint};
use tracing::{debug, instrument};

use crate::bands::resolve_band_names;
use crate::error::{SampleError, SampleResult};
use crate::source::{RasterOpener, RasterSource};
use crate::table::{ResultTable, SampleRecord};

/// Sample one file at the given coordinates.
///
/// `coordinates` may be a single `(x, y)` pair or parallel x/y sequences.
/// See [`sample_points`] for the rest of the behaviour.
pub fn sample_file<O: RasterOpener + ?Sized>(
    opener: &O,
    path: &Path,
    coordinates: impl Into<Coordinates>,
    bands: Option<&[String]>,
) -> SampleResult<ResultTable> {
    let points = coordinates.into().into_points()?;
    sample_points(opener, path, &points, bands)
}

/// Sample every band of one file at each point.
///
/// Band names are taken from `bands` when given (their count must match the
/// file's band count), otherwise resolved from the file. Every row carries the
/// timestamp found in the file name, or none. Rows are in point order.
///
/// The raster handle is dropped before this returns, on success or error.
#[instrument(skip_all, fields(path = %path.display(), points = points.len()))]
pub fn sample_points<O: RasterOpener + ?Sized>(
    opener: &O,
    path: &Path,
    points: &[SamplePoint],
    bands: Option<&[String]>,
) -> SampleResult<ResultTable> {
    let mut source = opener.open(path).map_err(|e| SampleError::OpenFailure {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let values = source.sample(points).map_err(|e| SampleError::Sampling {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let band_count = source.band_count();
    let names = match bands {
        Some(names) if names.len() != band_count => {
            return Err(SampleError::BandCountMismatch {
                path: path.to_path_buf(),
                expected: names.len(),
                found: band_count,
            })
        }
        Some(names) => names.to_vec(),
        None => resolve_band_names(&source),
    };
    drop(source);

    if values.len() != points.len() {
        return Err(SampleError::Sampling {
            path: path.to_path_buf(),
            reason: format!(
                "source returned {} value rows for {} points",
                values.len(),
                points.len()
            ),
        });
    }

    let timestamp = timestamp_from_filename(path);

    debug!(
        bands = names.len(),
        timestamp = ?timestamp,
        "Sampled raster"
    );

    let records = points
        .iter()
        .zip(values)
        .map(|(p, values)| SampleRecord {
            timestamp,
            x: p.x,
            y: p.y,
            values,
        })
        .collect();

    Ok(ResultTable::with_records(names, records))
}
