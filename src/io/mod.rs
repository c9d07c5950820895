//! Format adapter module
//!
//! Every on-disk layout implements [`ArrayFormat`]; the driver and the
//! harness only ever see the trait.

pub mod fs;
#[cfg(feature = "hdf5")]
pub mod h5;
pub mod npy;
pub mod npz;

use crate::config::BenchConfig;
use crate::models::{ArrayMap, Dataset};
use crate::{ArrBenchError, Result};
use std::path::Path;

#[cfg(feature = "hdf5")]
pub use h5::Hdf5Format;
pub use npy::{NpyFormat, NpyGzFormat};
pub use npz::NpzFormat;

/// One save/load policy for a whole dataset
pub trait ArrayFormat {
    /// Short name used in reports and labels
    fn name(&self) -> &str;

    /// Persist every array of `dataset` under `destination`.
    ///
    /// `destination` must exist. Artifacts of a previous save are replaced.
    fn save(&self, dataset: &Dataset, destination: &Path) -> Result<()>;

    /// Reconstruct every array persisted under `destination`, fully in memory
    fn load(&self, destination: &Path) -> Result<ArrayMap>;
}

/// Every available format, in report order
pub fn all_formats(config: &BenchConfig) -> Result<Vec<Box<dyn ArrayFormat>>> {
    #[allow(unused_mut)]
    let mut formats: Vec<Box<dyn ArrayFormat>> = vec![
        Box::new(NpyFormat),
        Box::new(NpyGzFormat::new(config.gzip_level)?),
        Box::new(NpzFormat::stored()),
        Box::new(NpzFormat::compressed()),
    ];
    #[cfg(feature = "hdf5")]
    formats.push(Box::new(Hdf5Format));
    Ok(formats)
}

/// Attach the artifact path to any error convertible into [`ArrBenchError`]
pub(crate) trait PathContext<T> {
    fn at(self, path: &Path) -> Result<T>;
}

impl<T, E: Into<ArrBenchError>> PathContext<T> for std::result::Result<T, E> {
    fn at(self, path: &Path) -> Result<T> {
        self.map_err(|err| err.into().with_context(&path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_all_formats_order_and_names() {
        let formats = all_formats(&BenchConfig::default()).unwrap();
        let names: Vec<&str> = formats.iter().map(|f| f.name()).collect();

        let mut expected = vec!["npy", "npy_gz", "npz", "npz_compressed"];
        if cfg!(feature = "hdf5") {
            expected.push("hdf5");
        }
        assert_eq!(names, expected);
    }

    #[test]
    fn test_all_formats_rejects_bad_gzip_level() {
        let config = BenchConfig::default().with_gzip_level(12);
        assert!(all_formats(&config).is_err());
    }

    #[test]
    fn test_every_format_round_trips() {
        let temp_dir = tempdir().unwrap();
        let config = BenchConfig::quick(temp_dir.path().join("data")).with_shape(32, 24);
        let dataset = Dataset::generate(&config).unwrap();

        for format in all_formats(&config).unwrap() {
            fs::reset(&config.data_path).unwrap();
            format.save(&dataset, &config.data_path).unwrap();
            let loaded = format.load(&config.data_path).unwrap();
            assert_eq!(
                dataset.first_mismatch(&loaded),
                None,
                "{} did not round-trip",
                format.name()
            );
        }
        fs::remove_quietly(&config.data_path);
    }

    #[test]
    fn test_path_context_prefixes_message() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = result.at(Path::new("data/a.npy")).unwrap_err();
        assert!(err.to_string().contains("data/a.npy"));
    }
}
