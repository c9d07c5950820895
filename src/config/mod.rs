//! Configuration management module
//!
//! Holds everything a benchmark sweep needs to know up front: where the
//! artifacts go, what the synthetic dataset looks like and how many times
//! each operation is repeated.

use crate::{
    ArrBenchError, Result, DEFAULT_DATA_DIR, DEFAULT_GZIP_LEVEL, DEFAULT_ITERATIONS, DEFAULT_KEYS,
    DEFAULT_SHAPE,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Benchmark configuration structure containing all sweep parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Directory the adapters write into; wiped between phases
    pub data_path: PathBuf,
    /// Rows and columns of every array in the dataset
    pub shape: [usize; 2],
    /// Dataset keys, one array per key
    pub keys: Vec<String>,
    /// Harness repetitions per measurement
    pub iterations: usize,
    /// Seed for the synthetic data; `None` draws from entropy
    pub seed: Option<u64>,
    /// gzip level used by the compressed per-key layout (0-9)
    pub gzip_level: u32,
    /// Draw a progress bar while measuring
    pub progress: bool,
    /// Reload and compare the dataset once after the first save of each format
    pub verify_round_trip: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_DIR),
            shape: DEFAULT_SHAPE,
            keys: DEFAULT_KEYS.chars().map(|c| c.to_string()).collect(),
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            gzip_level: DEFAULT_GZIP_LEVEL,
            progress: true,
            verify_round_trip: false,
        }
    }
}

impl BenchConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Small configuration for tests and quick local runs
    pub fn quick(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            shape: [64, 64],
            keys: vec!["a".to_string(), "b".to_string()],
            iterations: 2,
            seed: Some(0),
            progress: false,
            verify_round_trip: true,
            ..Self::default()
        }
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.data_path.as_os_str().is_empty() {
            return Err(ArrBenchError::ConfigError(
                "Data path must not be empty".to_string(),
            ));
        }

        if self.shape.iter().any(|&dim| dim == 0) {
            return Err(ArrBenchError::ConfigError(format!(
                "Array shape must be non-zero in both dimensions, got {}x{}",
                self.shape[0], self.shape[1]
            )));
        }

        if self.keys.is_empty() {
            return Err(ArrBenchError::ConfigError(
                "At least one dataset key is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for key in &self.keys {
            // Keys become file names for the per-key layouts
            if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
                return Err(ArrBenchError::ConfigError(format!(
                    "Invalid dataset key: {:?}",
                    key
                )));
            }
            if !seen.insert(key.as_str()) {
                return Err(ArrBenchError::ConfigError(format!(
                    "Duplicate dataset key: {:?}",
                    key
                )));
            }
        }

        if self.iterations == 0 {
            return Err(ArrBenchError::ConfigError(
                "Iterations must be greater than 0".to_string(),
            ));
        }

        if self.gzip_level > 9 {
            return Err(ArrBenchError::ConfigError(format!(
                "gzip level must be between 0 and 9, got {}",
                self.gzip_level
            )));
        }

        Ok(())
    }

    /// Set the artifact directory
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// Set the shape of every generated array
    pub fn with_shape(mut self, rows: usize, cols: usize) -> Self {
        self.shape = [rows, cols];
        self
    }

    /// Set the dataset keys
    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Set the number of harness iterations
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Fix the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_gzip_level(mut self, level: u32) -> Self {
        self.gzip_level = level;
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_verify_round_trip(mut self, verify: bool) -> Self {
        self.verify_round_trip = verify;
        self
    }

    /// Number of `f64` elements per array
    pub fn elements_per_key(&self) -> usize {
        self.shape[0] * self.shape[1]
    }

    /// Parse a configuration from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ArrBenchError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&content).map_err(|e| e.with_context(&path.display().to_string()))
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ArrBenchError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        fs::write(path, self.to_toml_string()?).map_err(|e| {
            ArrBenchError::ConfigError(format!(
                "Failed to write config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(())
    }
}
