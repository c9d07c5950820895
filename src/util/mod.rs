//! Utility functions module
//!
//! Contains helpers for size and duration formatting.

pub mod units;

// Re-export commonly used functions
pub use units::{bytes_to_mib, calculate_throughput_mbps, format_bytes, format_latency};
