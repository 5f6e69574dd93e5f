//! Affine pixel <-> world transform derived from GeoTIFF tags.

use crate::error::{GeoTiffError, GeoTiffResult};

/// Six-coefficient affine transform in GDAL order.
///
/// ```text
/// x = c[0] + col * c[1] + row * c[2]
/// y = c[3] + col * c[4] + row * c[5]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    pub coefficients: [f64; 6],
}

impl GeoTransform {
    /// Pixel grid used when a file carries no georeferencing: x = column, y = row.
    pub fn identity() -> Self {
        Self {
            coefficients: [0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        }
    }

    /// North-up transform with the given upper-left corner and pixel size.
    pub fn north_up(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            coefficients: [origin_x, pixel_width, 0.0, origin_y, 0.0, -pixel_height],
        }
    }

    /// Build from `ModelPixelScaleTag` (sx, sy, sz) and the first
    /// `ModelTiepointTag` entry (i, j, k, X, Y, Z).
    pub fn from_scale_and_tiepoint(scale: &[f64], tiepoint: &[f64]) -> GeoTiffResult<Self> {
        if scale.len() < 2 || tiepoint.len() < 6 {
            return Err(GeoTiffError::InvalidFormat(format!(
                "pixel scale needs 2+ values and tiepoint 6+, got {} and {}",
                scale.len(),
                tiepoint.len()
            )));
        }
        let (sx, sy) = (scale[0], scale[1]);
        let (i, j) = (tiepoint[0], tiepoint[1]);
        let (tx, ty) = (tiepoint[3], tiepoint[4]);

        Ok(Self {
            coefficients: [tx - i * sx, sx, 0.0, ty + j * sy, 0.0, -sy],
        })
    }

    /// Build from the 4x4 row-major `ModelTransformationTag` matrix.
    pub fn from_model_transformation(matrix: &[f64]) -> GeoTiffResult<Self> {
        if matrix.len() < 16 {
            return Err(GeoTiffError::InvalidFormat(format!(
                "model transformation needs 16 values, got {}",
                matrix.len()
            )));
        }
        Ok(Self {
            coefficients: [
                matrix[3], matrix[0], matrix[1], matrix[7], matrix[4], matrix[5],
            ],
        })
    }

    /// World coordinate of a (fractional) pixel position.
    pub fn pixel_to_world(&self, col: f64, row: f64) -> (f64, f64) {
        let c = &self.coefficients;
        (
            c[0] + col * c[1] + row * c[2],
            c[3] + col * c[4] + row * c[5],
        )
    }

    /// Fractional pixel position of a world coordinate.
    ///
    /// Returns `None` when the transform is degenerate.
    pub fn world_to_pixel(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let c = &self.coefficients;
        let det = c[1] * c[5] - c[2] * c[4];
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let dx = x - c[0];
        let dy = y - c[3];
        let col = (c[5] * dx - c[2] * dy) / det;
        let row = (c[1] * dy - c[4] * dx) / det;
        Some((col, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_and_tiepoint() {
        let gt = GeoTransform::from_scale_and_tiepoint(&[10.0, 10.0, 0.0], &[0.0, 0.0, 0.0, 500_000.0, 7_000_000.0, 0.0])
            .unwrap();
        assert_eq!(gt, GeoTransform::north_up(500_000.0, 7_000_000.0, 10.0, 10.0));

        let (col, row) = gt.world_to_pixel(500_015.0, 6_999_975.0).unwrap();
        assert!((col - 1.5).abs() < 1e-9);
        assert!((row - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_tiepoint_not_at_origin() {
        let gt = GeoTransform::from_scale_and_tiepoint(&[1.0, 1.0], &[2.0, 3.0, 0.0, 12.0, 47.0, 0.0])
            .unwrap();
        assert_eq!(gt.pixel_to_world(2.0, 3.0), (12.0, 47.0));
    }

    #[test]
    fn test_model_transformation_roundtrip() {
        let matrix = [
            0.5, 0.1, 0.0, 100.0, //
            0.2, -0.5, 0.0, 200.0, //
            0.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ];
        let gt = GeoTransform::from_model_transformation(&matrix).unwrap();
        let (x, y) = gt.pixel_to_world(4.0, 6.0);
        let (col, row) = gt.world_to_pixel(x, y).unwrap();
        assert!((col - 4.0).abs() < 1e-9);
        assert!((row - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_transform() {
        let gt = GeoTransform {
            coefficients: [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        };
        assert!(gt.world_to_pixel(1.0, 1.0).is_none());
    }
}
