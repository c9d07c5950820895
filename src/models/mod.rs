//! Data models module
//!
//! Contains the synthetic dataset and the run records the harness produces.

pub mod dataset;
pub mod record;

// Re-export commonly used types
pub use dataset::{ArrayMap, Dataset};
pub use record::RunRecord;
