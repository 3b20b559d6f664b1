//! Run configuration.
//!
//! Defaults reproduce the reference run (1920x1080 image, 4 blur workers,
//! 2 counter workers, 100,000 increments each). A TOML file may override any
//! subset of fields; the CLI overrides the file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::counter::{DEFAULT_ITERATIONS, DEFAULT_WORKERS};
use crate::error::{Error, Result};

pub const DEFAULT_WIDTH: usize = 1920;
pub const DEFAULT_HEIGHT: usize = 1080;
pub const DEFAULT_BLUR_WORKERS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    pub width: usize,
    pub height: usize,
    pub blur_workers: usize,
    pub counter_workers: usize,
    pub iterations: u64,
    /// Seed for the test image; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            blur_workers: DEFAULT_BLUR_WORKERS,
            counter_workers: DEFAULT_WORKERS,
            iterations: DEFAULT_ITERATIONS,
            seed: None,
        }
    }
}

impl BenchConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < 3 || self.height < 3 {
            return Err(Error::invalid(format!(
                "image must be at least 3x3, got {}x{}",
                self.width, self.height
            )));
        }
        if self.blur_workers == 0 {
            return Err(Error::invalid("blur_workers must be positive"));
        }
        if self.counter_workers == 0 {
            return Err(Error::invalid("counter_workers must be positive"));
        }
        if self.iterations == 0 {
            return Err(Error::invalid("iterations must be positive"));
        }

        let cpus = num_cpus::get();
        if self.blur_workers > cpus {
            warn!(
                blur_workers = self.blur_workers,
                cpus, "more blur workers than logical CPUs"
            );
        }
        Ok(())
    }
}
