//! arrbench - array serialization benchmark
//!
//! Measures save/load latency and on-disk footprint of several ways of
//! persisting named `f64` matrices (`.npy`, gzipped `.npy`, `.npz` with and
//! without compression, HDF5).

use std::fmt;

pub mod bench;
pub mod config;
pub mod io;
pub mod models;
pub mod sweep;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum ArrBenchError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Permission denied on the data directory or an artifact
    PermissionDenied(String),
    /// Codec, container or array layout error
    FormatError(String),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// Benchmark execution error
    BenchmarkError(String),
}

impl fmt::Display for ArrBenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrBenchError::IoError(err) => write!(f, "I/O error: {}", err),
            ArrBenchError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            ArrBenchError::FormatError(msg) => write!(f, "Format error: {}", msg),
            ArrBenchError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ArrBenchError::BenchmarkError(msg) => write!(f, "Benchmark error: {}", msg),
        }
    }
}

impl std::error::Error for ArrBenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArrBenchError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ArrBenchError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => {
                ArrBenchError::PermissionDenied(format!("Access denied: {}", err))
            }
            _ => ArrBenchError::IoError(err),
        }
    }
}

impl From<ndarray_npy::ReadNpyError> for ArrBenchError {
    fn from(err: ndarray_npy::ReadNpyError) -> Self {
        ArrBenchError::FormatError(format!("npy read error: {}", err))
    }
}

impl From<ndarray_npy::WriteNpyError> for ArrBenchError {
    fn from(err: ndarray_npy::WriteNpyError) -> Self {
        ArrBenchError::FormatError(format!("npy write error: {}", err))
    }
}

impl From<ndarray_npy::ReadNpzError> for ArrBenchError {
    fn from(err: ndarray_npy::ReadNpzError) -> Self {
        ArrBenchError::FormatError(format!("npz read error: {}", err))
    }
}

impl From<ndarray_npy::WriteNpzError> for ArrBenchError {
    fn from(err: ndarray_npy::WriteNpzError) -> Self {
        ArrBenchError::FormatError(format!("npz write error: {}", err))
    }
}

#[cfg(feature = "hdf5")]
impl From<hdf5::Error> for ArrBenchError {
    fn from(err: hdf5::Error) -> Self {
        ArrBenchError::FormatError(format!("HDF5 error: {}", err))
    }
}

impl From<ndarray::ShapeError> for ArrBenchError {
    fn from(err: ndarray::ShapeError) -> Self {
        ArrBenchError::FormatError(format!("Array shape error: {}", err))
    }
}

impl From<glob::PatternError> for ArrBenchError {
    fn from(err: glob::PatternError) -> Self {
        ArrBenchError::FormatError(format!("Invalid artifact pattern: {}", err))
    }
}

impl From<glob::GlobError> for ArrBenchError {
    fn from(err: glob::GlobError) -> Self {
        let path = err.path().display().to_string();
        ArrBenchError::from(err.into_error()).with_context(&path)
    }
}

impl From<toml::de::Error> for ArrBenchError {
    fn from(err: toml::de::Error) -> Self {
        ArrBenchError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for ArrBenchError {
    fn from(err: toml::ser::Error) -> Self {
        ArrBenchError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

impl ArrBenchError {
    /// Prefix the message with the path or item the error concerns
    pub fn with_context(self, context: &str) -> Self {
        match self {
            ArrBenchError::IoError(err) => {
                ArrBenchError::IoError(std::io::Error::new(err.kind(), format!("{}: {}", context, err)))
            }
            ArrBenchError::PermissionDenied(msg) => {
                ArrBenchError::PermissionDenied(format!("{}: {}", context, msg))
            }
            ArrBenchError::FormatError(msg) => {
                ArrBenchError::FormatError(format!("{}: {}", context, msg))
            }
            ArrBenchError::ConfigError(msg) => {
                ArrBenchError::ConfigError(format!("{}: {}", context, msg))
            }
            ArrBenchError::BenchmarkError(msg) => {
                ArrBenchError::BenchmarkError(format!("{}: {}", context, msg))
            }
        }
    }
}

/// Result type alias for arrbench operations
pub type Result<T> = std::result::Result<T, ArrBenchError>;

// Common types and constants
pub const APP_NAME: &str = "arrbench";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_KEYS: &str = "abcefghijk";
pub const DEFAULT_SHAPE: [usize; 2] = [4096, 4096];
pub const DEFAULT_ITERATIONS: usize = 10;
pub const DEFAULT_GZIP_LEVEL: u32 = 9;
/// Container file name shared by the bundled formats
pub const BUNDLE_STEM: &str = "data";
