//! Sentinel-2 helpers.
//!
//! - [`image_types`]: the fixed table of RGB band combinations
//! - [`product`]: locating band files inside `.SAFE` products
//! - [`footprint`]: GeoJSON rectangles for search areas
//! - [`composite`]: normalisation, gain and band stacking

pub mod composite;
pub mod error;
pub mod footprint;
pub mod image_types;
pub mod product;

pub use error::{SentinelError, SentinelResult};
pub use footprint::geojson_bbox;
pub use image_types::{ImageType, Resolution, SENTINEL2_IMAGE_TYPES};
pub use product::{band_labels, product_band_files};
