//! Sentinel-2 image types and their band combinations.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::SentinelError;

/// A named RGB composite of three Sentinel-2 bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageType {
    TrueColor,
    FalseColorInfrared,
    FalseColorUrban,
    Agriculture,
    AtmosphericPenetration,
    HealthyVegetation,
    LandWater,
    TrueColorAtmosphericRemoval,
    ShortwaveInfrared,
    VegetationAnalysis,
}

/// Band codes (red, green, blue channel order) per image type.
const IMAGE_TYPE_BANDS: [(ImageType, [&str; 3]); 10] = [
    // 10m and coarser
    (ImageType::TrueColor, ["04", "03", "02"]),
    (ImageType::FalseColorInfrared, ["08", "04", "03"]),
    // 20m and coarser
    (ImageType::FalseColorUrban, ["12", "11", "04"]),
    (ImageType::Agriculture, ["11", "8A", "02"]),
    (ImageType::AtmosphericPenetration, ["12", "11", "8A"]),
    (ImageType::HealthyVegetation, ["8A", "11", "02"]),
    (ImageType::LandWater, ["8A", "11", "04"]),
    (ImageType::TrueColorAtmosphericRemoval, ["12", "8A", "03"]),
    (ImageType::ShortwaveInfrared, ["12", "8A", "04"]),
    (ImageType::VegetationAnalysis, ["11", "8A", "04"]),
];

/// Image type to band codes. Built once, never modified.
pub static SENTINEL2_IMAGE_TYPES: Lazy<HashMap<ImageType, [&'static str; 3]>> =
    Lazy::new(|| IMAGE_TYPE_BANDS.into_iter().collect());

impl ImageType {
    pub const ALL: [ImageType; 10] = [
        ImageType::TrueColor,
        ImageType::FalseColorInfrared,
        ImageType::FalseColorUrban,
        ImageType::Agriculture,
        ImageType::AtmosphericPenetration,
        ImageType::HealthyVegetation,
        ImageType::LandWater,
        ImageType::TrueColorAtmosphericRemoval,
        ImageType::ShortwaveInfrared,
        ImageType::VegetationAnalysis,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ImageType::TrueColor => "true_color",
            ImageType::FalseColorInfrared => "false_color_infrared",
            ImageType::FalseColorUrban => "false_color_urban",
            ImageType::Agriculture => "agriculture",
            ImageType::AtmosphericPenetration => "atmospheric_penetration",
            ImageType::HealthyVegetation => "healthy_vegetation",
            ImageType::LandWater => "land_water",
            ImageType::TrueColorAtmosphericRemoval => "true_color_atmospheric_removal",
            ImageType::ShortwaveInfrared => "shortwave_infrared",
            ImageType::VegetationAnalysis => "vegetation_analysis",
        }
    }

    /// Band codes composing this image, in channel order.
    pub fn bands(self) -> [&'static str; 3] {
        SENTINEL2_IMAGE_TYPES[&self]
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ImageType {
    type Err = SentinelError;

    /// Parse an image type name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SentinelError::UnknownImageType(s.to_string()))
    }
}

/// Sentinel-2 band resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "10m")]
    R10m,
    #[serde(rename = "20m")]
    R20m,
    #[serde(rename = "60m")]
    R60m,
}

impl Resolution {
    pub fn as_str(self) -> &'static str {
        match self {
            Resolution::R10m => "10m",
            Resolution::R20m => "20m",
            Resolution::R60m => "60m",
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::R10m
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = SentinelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "10m" => Ok(Resolution::R10m),
            "20m" => Ok(Resolution::R20m),
            "60m" => Ok(Resolution::R60m),
            other => Err(SentinelError::InvalidResolution(other.to_string())),
        }
    }
}
