//! Report sinks for size and mean lines

use crate::models::RunRecord;
use crate::util::units::bytes_to_mib;

/// Destination of the human-readable benchmark report
pub trait ReportSink {
    /// On-disk footprint of a format right after its first save
    fn saved_size(&mut self, format: &str, bytes: u64);

    /// Mean of a finished measurement
    fn mean(&mut self, record: &RunRecord);
}

/// Line printed after a format's first save
pub fn size_line(format: &str, bytes: u64) -> String {
    format!("{} save data as {} MB", format, bytes_to_mib(bytes))
}

/// Prints report lines to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ReportSink for ConsoleSink {
    fn saved_size(&mut self, format: &str, bytes: u64) {
        println!("{}", size_line(format, bytes));
    }

    fn mean(&mut self, record: &RunRecord) {
        println!("{}", record.summary());
    }
}

/// Keeps report lines in memory
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportSink for MemorySink {
    fn saved_size(&mut self, format: &str, bytes: u64) {
        self.lines.push(size_line(format, bytes));
    }

    fn mean(&mut self, record: &RunRecord) {
        self.lines.push(record.summary());
    }
}
