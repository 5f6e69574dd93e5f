//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// A geographic or projected bounding box.
///
/// Coordinates are in the units of the raster's native CRS (degrees for
/// EPSG:4326, meters for UTM and most projected systems).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box enclosing all the given corners.
    ///
    /// Returns `None` for an empty iterator.
    pub fn from_corners<I>(corners: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        corners.into_iter().fold(None, |acc, (x, y)| {
            Some(match acc {
                None => BoundingBox::new(x, y, x, y),
                Some(b) => BoundingBox::new(
                    b.min_x.min(x),
                    b.min_y.min(y),
                    b.max_x.max(x),
                    b.max_y.max(y),
                ),
            })
        })
    }

    /// Check if a point is contained within this bbox (edges inclusive).
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_orders_extent() {
        let bbox =
            BoundingBox::from_corners([(10.0, 50.0), (20.0, 50.0), (10.0, 40.0), (20.0, 40.0)])
                .unwrap();
        assert_eq!(bbox, BoundingBox::new(10.0, 40.0, 20.0, 50.0));
        assert!(BoundingBox::from_corners(std::iter::empty()).is_none());
    }

    #[test]
    fn test_contains_point_edges_inclusive() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 5.0);
        assert!(bbox.contains_point(0.0, 5.0));
        assert!(bbox.contains_point(10.0, 0.0));
        assert!(!bbox.contains_point(10.1, 2.0));
    }
}
