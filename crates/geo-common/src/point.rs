//! Sample point types and coordinate coercion.

use serde::{Deserialize, Serialize};

/// A point in the raster's native coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
}

impl SamplePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for SamplePoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Caller-supplied coordinates: either one point or parallel x/y sequences.
///
/// Pair `i` of a series is `(x[i], y[i])`.
#[derive(Debug, Clone, PartialEq)]
pub enum Coordinates {
    Single { x: f64, y: f64 },
    Series { x: Vec<f64>, y: Vec<f64> },
}

impl Coordinates {
    /// Coerce into a list of points, treating a single pair as a one-element series.
    pub fn into_points(self) -> Result<Vec<SamplePoint>, CoordinateError> {
        match self {
            Coordinates::Single { x, y } => Ok(vec![SamplePoint::new(x, y)]),
            Coordinates::Series { x, y } => points_from_xy(&x, &y),
        }
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((x, y): (f64, f64)) -> Self {
        Coordinates::Single { x, y }
    }
}

impl From<(Vec<f64>, Vec<f64>)> for Coordinates {
    fn from((x, y): (Vec<f64>, Vec<f64>)) -> Self {
        Coordinates::Series { x, y }
    }
}

impl From<Vec<SamplePoint>> for Coordinates {
    fn from(points: Vec<SamplePoint>) -> Self {
        let (x, y) = points.iter().map(|p| (p.x, p.y)).unzip();
        Coordinates::Series { x, y }
    }
}

/// Zip parallel x and y sequences into points.
pub fn points_from_xy(x: &[f64], y: &[f64]) -> Result<Vec<SamplePoint>, CoordinateError> {
    if x.len() != y.len() {
        return Err(CoordinateError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    Ok(x.iter()
        .zip(y)
        .map(|(&x, &y)| SamplePoint::new(x, y))
        .collect())
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    #[error("x and y coordinate sequences differ in length ({x} vs {y})")]
    LengthMismatch { x: usize, y: usize },
}
