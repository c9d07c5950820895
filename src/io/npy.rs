//! Per-key `.npy` layouts, plain and gzip-compressed

use crate::io::{fs::artifacts_with_suffix, ArrayFormat, PathContext};
use crate::models::{ArrayMap, Dataset};
use crate::{ArrBenchError, Result, DEFAULT_GZIP_LEVEL};
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use ndarray::Array2;
use ndarray_npy::{read_npy, write_npy, ReadNpyExt, WriteNpyExt};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const NPY_SUFFIX: &str = ".npy";
pub const NPY_GZ_SUFFIX: &str = ".npy.gz";

fn artifact_path(destination: &Path, key: &str, suffix: &str) -> PathBuf {
    destination.join(format!("{}{}", key, suffix))
}

/// One uncompressed `<key>.npy` file per array
#[derive(Debug, Default, Clone, Copy)]
pub struct NpyFormat;

impl ArrayFormat for NpyFormat {
    fn name(&self) -> &str {
        "npy"
    }

    fn save(&self, dataset: &Dataset, destination: &Path) -> Result<()> {
        for (key, array) in dataset.iter() {
            let path = artifact_path(destination, key, NPY_SUFFIX);
            write_npy(&path, array).at(&path)?;
        }
        Ok(())
    }

    fn load(&self, destination: &Path) -> Result<ArrayMap> {
        let mut arrays = ArrayMap::new();
        for (key, path) in artifacts_with_suffix(destination, NPY_SUFFIX)? {
            let array: Array2<f64> = read_npy(&path).at(&path)?;
            arrays.insert(key, array);
        }
        Ok(arrays)
    }
}

/// One gzip stream `<key>.npy.gz` per array, wrapping the `.npy` encoding
#[derive(Debug, Clone, Copy)]
pub struct NpyGzFormat {
    level: u32,
}

impl NpyGzFormat {
    /// `level` is the gzip level, 0 (store) to 9 (best)
    pub fn new(level: u32) -> Result<Self> {
        if level > 9 {
            return Err(ArrBenchError::ConfigError(format!(
                "gzip level must be between 0 and 9, got {}",
                level
            )));
        }
        Ok(Self { level })
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    fn write_one(&self, path: &Path, array: &Array2<f64>) -> Result<()> {
        let file = File::create(path)?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::new(self.level));
        array.write_npy(&mut encoder)?;
        encoder.finish()?.flush()?;
        Ok(())
    }

    fn read_one(path: &Path) -> Result<Array2<f64>> {
        let decoder = GzDecoder::new(BufReader::new(File::open(path)?));
        Ok(Array2::<f64>::read_npy(decoder)?)
    }
}

impl Default for NpyGzFormat {
    fn default() -> Self {
        Self {
            level: DEFAULT_GZIP_LEVEL,
        }
    }
}

impl ArrayFormat for NpyGzFormat {
    fn name(&self) -> &str {
        "npy_gz"
    }

    fn save(&self, dataset: &Dataset, destination: &Path) -> Result<()> {
        for (key, array) in dataset.iter() {
            let path = artifact_path(destination, key, NPY_GZ_SUFFIX);
            self.write_one(&path, array).at(&path)?;
        }
        Ok(())
    }

    fn load(&self, destination: &Path) -> Result<ArrayMap> {
        let mut arrays = ArrayMap::new();
        for (key, path) in artifacts_with_suffix(destination, NPY_GZ_SUFFIX)? {
            let array = Self::read_one(&path).at(&path)?;
            arrays.insert(key, array);
        }
        Ok(arrays)
    }
}
