//! Bundled `.npz` archive layouts

use crate::io::{ArrayFormat, PathContext};
use crate::models::{ArrayMap, Dataset};
use crate::{Result, BUNDLE_STEM};
use ndarray::Array2;
use ndarray_npy::{NpzReader, NpzWriter};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// All arrays in one `data.npz` zip archive, stored or deflated
#[derive(Debug, Clone, Copy)]
pub struct NpzFormat {
    compressed: bool,
}

impl NpzFormat {
    /// Entries stored without compression
    pub fn stored() -> Self {
        Self { compressed: false }
    }

    /// Entries deflated
    pub fn compressed() -> Self {
        Self { compressed: true }
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    pub fn archive_path(destination: &Path) -> PathBuf {
        destination.join(format!("{}.npz", BUNDLE_STEM))
    }

    fn write_archive(&self, dataset: &Dataset, path: &Path) -> Result<()> {
        let file = BufWriter::new(File::create(path)?);
        let mut npz = if self.compressed {
            NpzWriter::new_compressed(file)
        } else {
            NpzWriter::new(file)
        };
        for (key, array) in dataset.iter() {
            npz.add_array(key, array)?;
        }
        npz.finish()?.flush()?;
        Ok(())
    }

    fn read_archive(path: &Path) -> Result<ArrayMap> {
        let mut npz = NpzReader::new(BufReader::new(File::open(path)?))?;

        let mut arrays = ArrayMap::new();
        for name in npz.names()? {
            let array: Array2<f64> = npz.by_name(&name)?;
            let key = name.strip_suffix(".npy").unwrap_or(name.as_str()).to_string();
            arrays.insert(key, array);
        }
        Ok(arrays)
    }
}

impl ArrayFormat for NpzFormat {
    fn name(&self) -> &str {
        if self.compressed {
            "npz_compressed"
        } else {
            "npz"
        }
    }

    fn save(&self, dataset: &Dataset, destination: &Path) -> Result<()> {
        let path = Self::archive_path(destination);
        self.write_archive(dataset, &path).at(&path)
    }

    fn load(&self, destination: &Path) -> Result<ArrayMap> {
        let path = Self::archive_path(destination);
        Self::read_archive(&path).at(&path)
    }
}
