//! Band compositing math for RGB images.
//!
//! A typical true-colour composite is built as
//!
//! ```
//! use sentinel::composite::{normalize, stack_bands, true_color, DEFAULT_TRUE_COLOR_FACTOR};
//!
//! let red = vec![0.02, 0.10];
//! let green = vec![0.03, 0.08];
//! let blue = vec![0.04, 0.06];
//! let channels: Vec<Vec<f64>> = [red, green, blue]
//!     .iter()
//!     .map(|b| normalize(&true_color(b, DEFAULT_TRUE_COLOR_FACTOR), 0.0, 255.0))
//!     .collect();
//! let rgb = stack_bands(&channels).unwrap();
//! assert_eq!(rgb.len(), 6);
//! ```

use crate::error::{SentinelError, SentinelResult};

/// Gain applied to reflectances for a true-colour image.
pub const DEFAULT_TRUE_COLOR_FACTOR: f64 = 2.5;

/// Linearly rescale `values` so their range becomes `[lower, upper]`.
///
/// `NaN` values are ignored when finding the range and stay `NaN`. A
/// constant input maps every value to `lower`.
pub fn normalize(values: &[f64], lower: f64, upper: f64) -> Vec<f64> {
    let (min, max) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    let span = max - min;
    if !span.is_finite() || span == 0.0 {
        return values
            .iter()
            .map(|v| if v.is_nan() { f64::NAN } else { lower })
            .collect();
    }

    let scale = (upper - lower) / span;
    values.iter().map(|v| scale * (v - min) + lower).collect()
}

/// Multiply every value by `factor`.
pub fn true_color(values: &[f64], factor: f64) -> Vec<f64> {
    values.iter().map(|v| v * factor).collect()
}

/// Interleave equal-length bands into pixel-major order.
///
/// The result holds band 0, band 1, ... of pixel 0, then of pixel 1, and so
/// on.
pub fn stack_bands(bands: &[Vec<f64>]) -> SentinelResult<Vec<f64>> {
    let Some(first) = bands.first() else {
        return Ok(Vec::new());
    };
    let pixels = first.len();

    if let Some((band, b)) = bands.iter().enumerate().find(|(_, b)| b.len() != pixels) {
        return Err(SentinelError::BandLengthMismatch {
            band,
            expected: pixels,
            found: b.len(),
        });
    }

    let mut stacked = Vec::with_capacity(pixels * bands.len());
    for i in 0..pixels {
        stacked.extend(bands.iter().map(|b| b[i]));
    }
    Ok(stacked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_range() {
        assert_eq!(normalize(&[0.0, 5.0, 10.0], 0.0, 255.0), vec![0.0, 127.5, 255.0]);
        assert_eq!(normalize(&[-1.0, 1.0], 10.0, 20.0), vec![10.0, 20.0]);
    }

    #[test]
    fn test_normalize_constant_maps_to_lower() {
        assert_eq!(normalize(&[3.0, 3.0], 0.0, 255.0), vec![0.0, 0.0]);
    }

    #[test]
    fn test_normalize_keeps_nan() {
        let out = normalize(&[0.0, f64::NAN, 2.0], 0.0, 1.0);
        assert_eq!(out[0], 0.0);
        assert!(out[1].is_nan());
        assert_eq!(out[2], 1.0);
        assert!(normalize(&[f64::NAN], 0.0, 1.0)[0].is_nan());
    }

    #[test]
    fn test_true_color_gain() {
        assert_eq!(true_color(&[0.1, 0.4], DEFAULT_TRUE_COLOR_FACTOR), vec![0.25, 1.0]);
    }

    #[test]
    fn test_stack_bands_interleaves() {
        let stacked = stack_bands(&[vec![1.0, 2.0], vec![10.0, 20.0], vec![100.0, 200.0]]).unwrap();
        assert_eq!(stacked, vec![1.0, 10.0, 100.0, 2.0, 20.0, 200.0]);
        assert!(stack_bands(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_stack_bands_length_mismatch() {
        let err = stack_bands(&[vec![1.0, 2.0], vec![1.0]]).unwrap_err();
        assert!(matches!(
            err,
            SentinelError::BandLengthMismatch { band: 1, expected: 2, found: 1 }
        ));
    }
}
