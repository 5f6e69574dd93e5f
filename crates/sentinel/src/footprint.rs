//! GeoJSON footprints for search areas.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A GeoJSON `FeatureCollection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
    pub bbox: [f64; 4],
}

/// A GeoJSON `Feature` with a polygon geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: Map<String, Value>,
    pub geometry: Polygon,
    pub bbox: [f64; 4],
}

/// A GeoJSON `Polygon`: rings of `[lon, lat]` positions, each closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl Polygon {
    /// Well-known text, e.g. `POLYGON((170 45,175 45,175 46,170 46,170 45))`.
    pub fn to_wkt(&self) -> String {
        let rings: Vec<String> = self
            .coordinates
            .iter()
            .map(|ring| {
                let points: Vec<String> =
                    ring.iter().map(|[x, y]| format!("{} {}", x, y)).collect();
                format!("({})", points.join(","))
            })
            .collect();
        format!("POLYGON({})", rings.join(","))
    }
}

/// Rectangle between two corners as a one-feature `FeatureCollection`.
///
/// The ring runs counter-clockwise from the south-west corner and is closed
/// (five positions, first equal to last). Corners may be given in any order.
pub fn geojson_bbox(lon0: f64, lat0: f64, lon1: f64, lat1: f64) -> FeatureCollection {
    let (west, east) = (lon0.min(lon1), lon0.max(lon1));
    let (south, north) = (lat0.min(lat1), lat0.max(lat1));
    let bbox = [west, south, east, north];

    let ring = vec![
        [west, south],
        [east, south],
        [east, north],
        [west, north],
        [west, south],
    ];

    FeatureCollection {
        kind: "FeatureCollection".to_string(),
        features: vec![Feature {
            id: "0".to_string(),
            kind: "Feature".to_string(),
            properties: Map::new(),
            geometry: Polygon {
                kind: "Polygon".to_string(),
                coordinates: vec![ring],
            },
            bbox,
        }],
        bbox,
    }
}
