//! Benchmark sweep driver
//!
//! Runs the read phase (save once, report size, time loads) and then the
//! save phase (time saves, each into a freshly created destination) for
//! every format, reporting through a [`ReportSink`].

use crate::bench::{Harness, Measurement, ReportSink};
use crate::config::BenchConfig;
use crate::io::{fs, ArrayFormat};
use crate::models::{Dataset, RunRecord};
use crate::util::units::format_bytes;
use crate::{ArrBenchError, Result};
use std::path::Path;

/// Arguments shared by a measured operation and its hooks
#[derive(Debug, Clone, Copy)]
pub struct Workload<'a> {
    pub dataset: &'a Dataset,
    pub destination: &'a Path,
}

/// Everything a sweep measured, in format order
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    /// Bytes on disk after each format's first save
    pub sizes: Vec<(String, u64)>,
    pub loads: Vec<RunRecord>,
    pub saves: Vec<RunRecord>,
}

impl SweepReport {
    pub fn size_of(&self, format: &str) -> Option<u64> {
        self.sizes
            .iter()
            .find(|(name, _)| name == format)
            .map(|(_, bytes)| *bytes)
    }
}

/// Run both phases over `formats`
pub fn run_sweep(
    config: &BenchConfig,
    dataset: &Dataset,
    formats: &[Box<dyn ArrayFormat>],
    sink: &mut dyn ReportSink,
) -> Result<SweepReport> {
    config.validate()?;
    log::info!(
        "Benchmarking {} formats on {} arrays ({}) in {}",
        formats.len(),
        dataset.len(),
        format_bytes(dataset.total_bytes()),
        config.data_path.display()
    );

    let mut report = SweepReport::default();

    for format in formats {
        let (bytes, record) = read_benchmark(config, dataset, format.as_ref(), sink)?;
        report.sizes.push((format.name().to_string(), bytes));
        report.loads.push(record);
    }

    for format in formats {
        report
            .saves
            .push(save_benchmark(config, dataset, format.as_ref(), sink)?);
    }

    Ok(report)
}

/// Save once into a clean destination, report the footprint and time `load`
pub fn read_benchmark(
    config: &BenchConfig,
    dataset: &Dataset,
    format: &dyn ArrayFormat,
    sink: &mut dyn ReportSink,
) -> Result<(u64, RunRecord)> {
    let destination = config.data_path.as_path();
    log::info!("Read benchmark: {}", format.name());

    fs::reset(destination)?;
    format.save(dataset, destination)?;

    let bytes = fs::dir_size(destination)?;
    sink.saved_size(format.name(), bytes);

    if config.verify_round_trip {
        verify_round_trip(dataset, format, destination)?;
    }

    let workload = Workload {
        dataset,
        destination,
    };
    let record = Harness::new(sink)
        .with_progress(config.progress)
        .with_payload_bytes(dataset.total_bytes())
        .measure(
            Measurement::new(config.iterations).with_label(format!("{}_load", format.name())),
            &workload,
            |w: &Workload<'_>| format.load(w.destination),
        )?;

    fs::remove_quietly(destination);
    Ok((bytes, record))
}

/// Time `save`, recreating the destination before and deleting it after
/// every iteration
pub fn save_benchmark(
    config: &BenchConfig,
    dataset: &Dataset,
    format: &dyn ArrayFormat,
    sink: &mut dyn ReportSink,
) -> Result<RunRecord> {
    let destination = config.data_path.as_path();
    log::info!("Save benchmark: {}", format.name());

    fs::remove_quietly(destination);

    let workload = Workload {
        dataset,
        destination,
    };
    let measurement = Measurement::new(config.iterations)
        .with_label(format!("{}_save", format.name()))
        .with_setup(|w: &Workload<'_>| fs::prepare(w.destination))
        .with_teardown(|w: &Workload<'_>| {
            fs::remove_quietly(w.destination);
            Ok(())
        });

    Harness::new(sink)
        .with_progress(config.progress)
        .with_payload_bytes(dataset.total_bytes())
        .measure(measurement, &workload, |w: &Workload<'_>| {
            format.save(w.dataset, w.destination)
        })
}

fn verify_round_trip(dataset: &Dataset, format: &dyn ArrayFormat, destination: &Path) -> Result<()> {
    let loaded = format.load(destination)?;
    match dataset.first_mismatch(&loaded) {
        None => {
            log::debug!("{} round-trip verified", format.name());
            Ok(())
        }
        Some(key) => Err(ArrBenchError::BenchmarkError(format!(
            "{} did not round-trip array {:?}",
            format.name(),
            key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::MemorySink;
    use crate::io::{all_formats, NpyFormat};
    use crate::models::ArrayMap;
    use tempfile::tempdir;

    /// Loads nothing back, whatever was saved
    struct LossyFormat;

    impl ArrayFormat for LossyFormat {
        fn name(&self) -> &str {
            "lossy"
        }

        fn save(&self, _dataset: &Dataset, destination: &Path) -> Result<()> {
            std::fs::write(destination.join("blob"), b"12345")?;
            Ok(())
        }

        fn load(&self, _destination: &Path) -> Result<ArrayMap> {
            Ok(ArrayMap::new())
        }
    }

    #[test]
    fn test_read_benchmark_reports_size_and_cleans_up() {
        let temp_dir = tempdir().unwrap();
        let config = BenchConfig::quick(temp_dir.path().join("data")).with_iterations(3);
        let dataset = Dataset::generate(&config).unwrap();
        let mut sink = MemorySink::new();

        let (bytes, record) = read_benchmark(&config, &dataset, &NpyFormat, &mut sink).unwrap();

        assert!(bytes > dataset.total_bytes());
        assert_eq!(record.len(), 3);
        assert_eq!(record.label, "npy_load");
        assert_eq!(sink.lines.len(), 2);
        assert!(sink.lines[0].starts_with("npy save data as "));
        assert!(sink.lines[1].starts_with("npy_load took "));
        assert!(!config.data_path.exists());
    }

    #[test]
    fn test_save_benchmark_leaves_no_residue() {
        let temp_dir = tempdir().unwrap();
        let config = BenchConfig::quick(temp_dir.path().join("data")).with_iterations(2);
        let dataset = Dataset::generate(&config).unwrap();
        let mut sink = MemorySink::new();

        let record = save_benchmark(&config, &dataset, &NpyFormat, &mut sink).unwrap();

        assert_eq!(record.len(), 2);
        assert_eq!(sink.lines, vec![record.summary()]);
        assert!(!config.data_path.exists());
    }

    #[test]
    fn test_verification_catches_lossy_format() {
        let temp_dir = tempdir().unwrap();
        let config = BenchConfig::quick(temp_dir.path().join("data"));
        let dataset = Dataset::generate(&config).unwrap();
        let mut sink = MemorySink::new();

        let err = read_benchmark(&config, &dataset, &LossyFormat, &mut sink).unwrap_err();
        assert!(matches!(err, ArrBenchError::BenchmarkError(_)));

        let config = config.with_verify_round_trip(false);
        let (bytes, _) = read_benchmark(&config, &dataset, &LossyFormat, &mut sink).unwrap();
        assert_eq!(bytes, 5);
    }

    #[test]
    fn test_full_sweep() {
        let temp_dir = tempdir().unwrap();
        let config = BenchConfig::quick(temp_dir.path().join("data")).with_shape(32, 32);
        let dataset = Dataset::generate(&config).unwrap();
        let formats = all_formats(&config).unwrap();
        let mut sink = MemorySink::new();

        let report = run_sweep(&config, &dataset, &formats, &mut sink).unwrap();

        assert_eq!(report.sizes.len(), formats.len());
        assert_eq!(report.loads.len(), formats.len());
        assert_eq!(report.saves.len(), formats.len());
        // size + load mean per format, then one save mean per format
        assert_eq!(sink.lines.len(), formats.len() * 3);
        assert!(report.size_of("npy_gz").unwrap() <= report.size_of("npy").unwrap());
        assert!(report.size_of("missing").is_none());
        assert!(report
            .saves
            .iter()
            .all(|r| r.len() == config.iterations && r.label.ends_with("_save")));
        assert!(!config.data_path.exists());
    }
}
