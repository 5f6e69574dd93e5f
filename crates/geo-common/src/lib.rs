//! Common types and utilities shared across the geotoys crates.

pub mod bbox;
pub mod point;
pub mod time;

pub use bbox::BoundingBox;
pub use point::{points_from_xy, CoordinateError, Coordinates, SamplePoint};
pub use time::{
    parse_timestamp, parse_utc_timestamp, timestamp_from_filename, timestamp_from_string,
    utc_timestamp, IntoUtc, TimeParseError,
};
