//! Raster stack sampler.
//!
//! Samples every band of a set of timestamped rasters at a list of points
//! and writes one table ordered by (timestamp, x, y) as CSV or JSON.

mod cli;
mod config;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use raster_sampler::{GeoTiffOpener, ResultTable, SamplerPool};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use cli::{Args, OutputFormat};
use config::JobConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr; stdout may carry the table
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(io::stderr)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = JobConfig::resolve(&args)?;
    let files = config.input_files()?;
    info!(
        files = files.len(),
        points = config.x.len(),
        workers = config.workers,
        format = ?config.format,
        "Loaded configuration"
    );

    let pool = SamplerPool::new(GeoTiffOpener, config.sampler_config())?;
    let table = pool
        .sample_files(
            &files,
            (config.x.clone(), config.y.clone()),
            config.bands.as_deref(),
        )
        .await
        .context("Sampling failed")?;

    write_table(&table, config.format, config.output.as_deref())?;

    info!(rows = table.len(), bands = ?table.bands(), "Done");
    Ok(())
}

/// Write the table to `output`, or stdout when `None`.
fn write_table(table: &ResultTable, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output file: {}", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match format {
        OutputFormat::Csv => table.write_csv(&mut writer)?,
        OutputFormat::Json => {
            table.write_json(&mut writer)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster_sampler::SampleRecord;

    fn table() -> ResultTable {
        ResultTable::with_records(
            vec!["red".to_string()],
            vec![SampleRecord {
                timestamp: None,
                x: 1.0,
                y: 2.0,
                values: vec![0.5],
            }],
        )
    }

    #[test]
    fn test_write_table_csv_file() {
        let dir = test_utils::temp_test_dir();
        let path = dir.path().join("out.csv");
        write_table(&table(), OutputFormat::Csv, Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "timestamp,x,y,red\n,1,2,0.5\n");
    }

    #[test]
    fn test_write_table_json_file() {
        let dir = test_utils::temp_test_dir();
        let path = dir.path().join("out.json");
        write_table(&table(), OutputFormat::Json, Some(&path)).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"red\": 0.5"));
        assert!(text.ends_with("]\n"));
    }
}
