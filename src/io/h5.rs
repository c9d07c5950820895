//! HDF5 container layout

use crate::io::{ArrayFormat, PathContext};
use crate::models::{ArrayMap, Dataset};
use crate::{ArrBenchError, Result, BUNDLE_STEM};
use ndarray::Array2;
use std::path::{Path, PathBuf};

/// All arrays as root-level datasets of one `data.h5` file
#[derive(Debug, Default, Clone, Copy)]
pub struct Hdf5Format;

impl Hdf5Format {
    pub fn container_path(destination: &Path) -> PathBuf {
        destination.join(format!("{}.h5", BUNDLE_STEM))
    }

    fn write_container(dataset: &Dataset, path: &Path) -> Result<()> {
        let file = hdf5::File::create(path)?;
        for (key, array) in dataset.iter() {
            let contiguous = array.as_standard_layout();
            let values = contiguous.as_slice().ok_or_else(|| {
                ArrBenchError::FormatError(format!("array {:?} is not contiguous", key))
            })?;

            let (rows, cols) = array.dim();
            let ds = file.new_dataset::<f64>().shape((rows, cols)).create(key)?;
            ds.write_raw(values)?;
        }
        file.close()?;
        Ok(())
    }

    fn read_container(path: &Path) -> Result<ArrayMap> {
        let file = hdf5::File::open(path)?;

        let mut arrays = ArrayMap::new();
        for name in file.member_names()? {
            let ds = file.dataset(&name)?;
            let shape = ds.shape();
            if shape.len() != 2 {
                return Err(ArrBenchError::FormatError(format!(
                    "dataset {:?} has {} dimensions, expected 2",
                    name,
                    shape.len()
                )));
            }
            let values: Vec<f64> = ds.read_raw()?;
            arrays.insert(name, Array2::from_shape_vec((shape[0], shape[1]), values)?);
        }
        Ok(arrays)
    }
}

impl ArrayFormat for Hdf5Format {
    fn name(&self) -> &str {
        "hdf5"
    }

    fn save(&self, dataset: &Dataset, destination: &Path) -> Result<()> {
        let path = Self::container_path(destination);
        Self::write_container(dataset, &path).at(&path)
    }

    fn load(&self, destination: &Path) -> Result<ArrayMap> {
        let path = Self::container_path(destination);
        Self::read_container(&path).at(&path)
    }
}
