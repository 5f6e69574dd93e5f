//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Output encoding of the result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "raster-sample")]
#[command(about = "Sample a stack of timestamped rasters at points and merge into one table")]
pub struct Args {
    /// Raster files to sample
    #[arg(long, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Directory searched recursively for rasters
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Extension of rasters found under --dir (default: tif)
    #[arg(long)]
    pub ext: Option<String>,

    /// X coordinates of the sample points
    #[arg(long, num_args = 1.., allow_negative_numbers = true)]
    pub x: Vec<f64>,

    /// Y coordinates of the sample points
    #[arg(long, num_args = 1.., allow_negative_numbers = true)]
    pub y: Vec<f64>,

    /// Explicit band names (must match the band count of every file)
    #[arg(long, num_args = 1..)]
    pub bands: Option<Vec<String>>,

    /// Files sampled concurrently (overrides SAMPLER_WORKERS)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (stdout when absent)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long, env = "SAMPLER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
