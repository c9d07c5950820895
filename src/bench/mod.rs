//! Benchmark engine module
//!
//! Contains the measurement harness and the sinks it reports to.

pub mod harness;
pub mod report;

// Re-export commonly used types
pub use harness::{operation_name, Harness, Measurement};
pub use report::{ConsoleSink, MemorySink, ReportSink};
