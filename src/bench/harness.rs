//! Measurement harness
//!
//! Repeats an operation a fixed number of times. Each repetition may be
//! wrapped by a setup and a teardown hook; only the operation itself falls
//! inside the timed window. Durations are collected into a [`RunRecord`],
//! whose mean is emitted to a [`ReportSink`] once every repetition finished.

use crate::bench::report::ReportSink;
use crate::models::RunRecord;
use crate::util::units::{calculate_throughput_mbps, format_latency};
use crate::{ArrBenchError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

/// Untimed per-iteration hook receiving the same arguments as the operation
pub type Hook<'f, A> = Box<dyn FnMut(&A) -> Result<()> + 'f>;

/// Parameters of one harness invocation
pub struct Measurement<'f, A: ?Sized> {
    iterations: usize,
    label: Option<String>,
    setup: Option<Hook<'f, A>>,
    teardown: Option<Hook<'f, A>>,
}

impl<'f, A: ?Sized> Measurement<'f, A> {
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            label: None,
            setup: None,
            teardown: None,
        }
    }

    /// Report under `label` instead of the operation's name
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Run `setup` before every iteration, outside the timed window
    pub fn with_setup<F>(mut self, setup: F) -> Self
    where
        F: FnMut(&A) -> Result<()> + 'f,
    {
        self.setup = Some(Box::new(setup));
        self
    }

    /// Run `teardown` after every iteration, outside the timed window
    pub fn with_teardown<F>(mut self, teardown: F) -> Self
    where
        F: FnMut(&A) -> Result<()> + 'f,
    {
        self.teardown = Some(Box::new(teardown));
        self
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

/// Drives measurements and reports their means
pub struct Harness<'s> {
    sink: &'s mut dyn ReportSink,
    progress: bool,
    payload_bytes: Option<u64>,
}

impl<'s> Harness<'s> {
    pub fn new(sink: &'s mut dyn ReportSink) -> Self {
        Self {
            sink,
            progress: true,
            payload_bytes: None,
        }
    }

    /// Toggle the per-iteration progress bar
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Bytes moved by one operation call, used for throughput in debug logs
    pub fn with_payload_bytes(mut self, bytes: u64) -> Self {
        self.payload_bytes = Some(bytes);
        self
    }

    /// Time `operation` over `measurement.iterations()` repetitions.
    ///
    /// The first error from setup, operation or teardown aborts the run and is
    /// returned as is; no partial record is reported.
    pub fn measure<A, R, F>(
        &mut self,
        mut measurement: Measurement<'_, A>,
        args: &A,
        mut operation: F,
    ) -> Result<RunRecord>
    where
        A: ?Sized,
        F: FnMut(&A) -> Result<R>,
    {
        if measurement.iterations == 0 {
            return Err(ArrBenchError::ConfigError(
                "Iterations must be greater than 0".to_string(),
            ));
        }

        let label = measurement
            .label
            .take()
            .unwrap_or_else(operation_name::<F>);
        let pb = self.progress_bar(&label, measurement.iterations);

        let mut record = RunRecord::with_capacity(label.as_str(), measurement.iterations);
        for iteration in 0..measurement.iterations {
            if let Err(err) = self.iterate(&mut measurement, args, &mut operation, &mut record) {
                pb.abandon();
                log::debug!("{} aborted at iteration {}: {}", label, iteration + 1, err);
                return Err(err);
            }
            pb.inc(1);
        }
        pb.finish();

        self.sink.mean(&record);
        Ok(record)
    }

    fn iterate<A, R, F>(
        &self,
        measurement: &mut Measurement<'_, A>,
        args: &A,
        operation: &mut F,
        record: &mut RunRecord,
    ) -> Result<()>
    where
        A: ?Sized,
        F: FnMut(&A) -> Result<R>,
    {
        if let Some(setup) = measurement.setup.as_mut() {
            setup(args)?;
        }

        let start = Instant::now();
        let output = operation(args)?;
        let elapsed = start.elapsed();
        // Freeing a loaded dataset is not part of the load
        drop(output);
        record.push(elapsed);

        match self.payload_bytes {
            Some(bytes) => log::debug!(
                "{} iteration {}: {} ({:.1} MiB/s)",
                record.label,
                record.len(),
                format_latency(elapsed),
                calculate_throughput_mbps(bytes, elapsed)
            ),
            None => log::debug!(
                "{} iteration {}: {}",
                record.label,
                record.len(),
                format_latency(elapsed)
            ),
        }

        if let Some(teardown) = measurement.teardown.as_mut() {
            teardown(args)?;
        }
        Ok(())
    }

    fn progress_bar(&self, label: &str, iterations: usize) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(iterations as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{msg}: {percent:>3}%|{wide_bar}| {pos}/{len} [{elapsed_precise}<{eta_precise}]",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb.set_message(label.to_string());
        pb
    }
}

/// Identifying name of a callable type: the last path segment of its type
/// name, skipping generic arguments and closure markers.
pub fn operation_name<F: ?Sized>() -> String {
    let full = std::any::type_name::<F>();
    let mut path = full.split('<').next().unwrap_or(full);
    while let Some(stripped) = path.strip_suffix("::{{closure}}") {
        path = stripped;
    }
    path.rsplit("::").next().unwrap_or(path).to_string()
}
