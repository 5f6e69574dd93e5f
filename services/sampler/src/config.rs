//! Job configuration: YAML file merged with command-line arguments.
//!
//! Example file:
//!
//! ```yaml
//! dir: /data/ndvi
//! ext: tif
//! x: [500025.0, 500035.0]
//! y: [6999975.0, 6999965.0]
//! workers: 4
//! format: json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use raster_sampler::config::DEFAULT_WORKERS;
use raster_sampler::{list_ext, SamplerConfig};
use serde::{Deserialize, Serialize};

use crate::cli::{Args, OutputFormat};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    pub files: Vec<PathBuf>,
    pub dir: Option<PathBuf>,
    pub ext: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub bands: Option<Vec<String>>,
    pub workers: usize,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            dir: None,
            ext: "tif".to_string(),
            x: Vec::new(),
            y: Vec::new(),
            bands: None,
            workers: DEFAULT_WORKERS,
            format: OutputFormat::Csv,
            output: None,
        }
    }
}

impl JobConfig {
    /// Load a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Build the job from the optional config file, then the environment,
    /// then arguments on top.
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.workers = SamplerConfig::with_workers(config.workers)
            .with_env_overrides()
            .context("Invalid sampler environment")?
            .workers;
        config.apply_args(args);
        config.validate()?;
        Ok(config)
    }

    /// Override fields with every argument given on the command line.
    pub fn apply_args(&mut self, args: &Args) {
        if !args.files.is_empty() {
            self.files = args.files.clone();
        }
        if let Some(dir) = &args.dir {
            self.dir = Some(dir.clone());
        }
        if let Some(ext) = &args.ext {
            self.ext = ext.clone();
        }
        if !args.x.is_empty() {
            self.x = args.x.clone();
        }
        if !args.y.is_empty() {
            self.y = args.y.clone();
        }
        if let Some(bands) = &args.bands {
            self.bands = Some(bands.clone());
        }
        if let Some(workers) = args.workers {
            self.workers = workers;
        }
        if let Some(format) = args.format {
            self.format = format;
        }
        if let Some(output) = &args.output {
            self.output = Some(output.clone());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.files.is_empty() && self.dir.is_none() {
            bail!("no input: give --files or --dir");
        }
        if self.x.is_empty() || self.y.is_empty() {
            bail!("no sample points: give --x and --y");
        }
        self.sampler_config().validate()?;
        Ok(())
    }

    pub fn sampler_config(&self) -> SamplerConfig {
        SamplerConfig::with_workers(self.workers)
    }

    /// Explicit files followed by the sorted files found under `dir`.
    pub fn input_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = self.files.clone();
        if let Some(dir) = &self.dir {
            let found = list_ext(dir, &self.ext)
                .with_context(|| format!("Failed to list rasters in {}", dir.display()))?;
            files.extend(found);
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("raster-sample").chain(argv.iter().copied()))
    }

    fn write_config(dir: &tempfile::TempDir, yaml: &str) -> PathBuf {
        let path = dir.path().join("job.yaml");
        fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn test_args_only() {
        let config = JobConfig::resolve(&args(&[
            "--files", "a_20120105.tif", "b_20120106.tif", "--x", "1.5", "--y", "-2.5",
        ]))
        .unwrap();
        assert_eq!(config.files.len(), 2);
        assert_eq!(config.x, vec![1.5]);
        assert_eq!(config.y, vec![-2.5]);
        assert_eq!(config.format, OutputFormat::Csv);
        assert_eq!(config.ext, "tif");
    }

    #[test]
    fn test_command_line_overrides_yaml() {
        let dir = test_utils::temp_test_dir();
        let path = write_config(
            &dir,
            "dir: /data/ndvi\next: jp2\nx: [1.0]\ny: [2.0]\nworkers: 8\nformat: json\n",
        );
        let path = path.to_string_lossy().into_owned();

        let config =
            JobConfig::resolve(&args(&["--config", &path, "--workers", "2", "--x", "9.0"])).unwrap();

        assert_eq!(config.dir, Some(PathBuf::from("/data/ndvi")));
        assert_eq!(config.ext, "jp2");
        assert_eq!(config.x, vec![9.0]);
        assert_eq!(config.y, vec![2.0]);
        assert_eq!(config.workers, 2);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_missing_input_rejected() {
        assert!(JobConfig::resolve(&args(&["--x", "1", "--y", "2"])).is_err());
    }

    #[test]
    fn test_missing_points_rejected() {
        assert!(JobConfig::resolve(&args(&["--files", "a.tif"])).is_err());
    }

    #[test]
    fn test_workers_from_environment_between_yaml_and_args() {
        let dir = test_utils::temp_test_dir();
        let path = write_config(&dir, "files: [a.tif]\nx: [1.0]\ny: [2.0]\nworkers: 8\n");
        let path = path.to_string_lossy().into_owned();

        std::env::set_var("SAMPLER_WORKERS", "5");
        let from_env = JobConfig::resolve(&args(&["--config", &path])).unwrap();
        let from_args = JobConfig::resolve(&args(&["--config", &path, "--workers", "2"])).unwrap();
        std::env::remove_var("SAMPLER_WORKERS");

        assert_eq!(from_env.workers, 5);
        assert_eq!(from_args.workers, 2);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let argv = ["--files", "a.tif", "--x", "1", "--y", "2", "--workers", "0"];
        assert!(JobConfig::resolve(&args(&argv)).is_err());
    }

    #[test]
    fn test_bad_yaml_reports_path() {
        let dir = test_utils::temp_test_dir();
        let path = write_config(&dir, "workers: [not a number]\n");
        let err = JobConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("job.yaml"));
    }

    #[test]
    fn test_input_files_from_dir() {
        let dir = test_utils::temp_test_dir();
        fs::write(dir.path().join("b_20120106.tif"), b"").unwrap();
        fs::write(dir.path().join("a_20120105.tif"), b"").unwrap();
        fs::write(dir.path().join("readme.md"), b"").unwrap();

        let config = JobConfig {
            files: vec![PathBuf::from("extra.tif")],
            dir: Some(dir.path().to_path_buf()),
            ..JobConfig::default()
        };
        let files = config.input_files().unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("extra.tif"),
                dir.path().join("a_20120105.tif"),
                dir.path().join("b_20120106.tif"),
            ]
        );
    }
}
