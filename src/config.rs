//! Configuration loading: defaults, optional config file, and
//! `PAGEPROBE_*` environment overrides, layered with the `config` crate.

use std::path::{Path, PathBuf};
use std::time::Duration;

use action_retry::{Backoff, RetryPolicy};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub backoff_ms: u64,
    pub op_timeout_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_ms: 1000,
            op_timeout_ms: 10_000,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Directory screenshots are written into
    pub artifacts_dir: PathBuf,

    /// Seed for the data generator; omit for entropy seeding
    pub seed: Option<u64>,

    pub retry: RetrySettings,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            artifacts_dir: PathBuf::from("screenshots"),
            seed: None,
            retry: RetrySettings::default(),
        }
    }
}

impl ProbeConfig {
    /// Load configuration, layering an optional file under `PAGEPROBE_*`
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let raw = builder
            .add_source(Environment::with_prefix("PAGEPROBE").separator("__"))
            .build()
            .context("failed to assemble configuration sources")?;
        raw.try_deserialize()
            .context("failed to deserialize configuration")
    }

    /// Retry policy implied by the settings.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new()
            .attempts(self.retry.max_attempts)
            .backoff(Backoff::Constant(Duration::from_millis(
                self.retry.backoff_ms,
            )))
            .op_timeout(Duration::from_millis(self.retry.op_timeout_ms))
    }
}
