//! Configuration for the sampler pool.

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

use crate::error::{SampleError, SampleResult};

/// Default number of files sampled concurrently.
pub const DEFAULT_WORKERS: usize = 3;

/// Environment variable overriding [`SamplerConfig::workers`].
pub const WORKERS_ENV: &str = "SAMPLER_WORKERS";

/// Configuration for [`SamplerPool`](crate::SamplerPool).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Upper bound on files sampled at the same time.
    pub workers: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
        }
    }
}

impl SamplerConfig {
    pub fn with_workers(workers: usize) -> Self {
        Self { workers }
    }

    /// Load configuration from environment variables on top of the defaults.
    pub fn from_env() -> SampleResult<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply `SAMPLER_WORKERS` when it is set.
    ///
    /// A value that is not a number is an error rather than being ignored.
    pub fn with_env_overrides(mut self) -> SampleResult<Self> {
        if let Ok(val) = std::env::var(WORKERS_ENV) {
            self.workers = val.trim().parse().map_err(|_| {
                SampleError::Config(format!(
                    "{} must be a positive integer, got '{}'",
                    WORKERS_ENV, val
                ))
            })?;
        }
        Ok(self)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> SampleResult<()> {
        if self.workers == 0 {
            return Err(SampleError::Config("workers must be > 0".to_string()));
        }
        if self.workers > Semaphore::MAX_PERMITS {
            return Err(SampleError::Config(format!(
                "workers must be at most {}, got {}",
                Semaphore::MAX_PERMITS,
                self.workers
            )));
        }
        Ok(())
    }
}
