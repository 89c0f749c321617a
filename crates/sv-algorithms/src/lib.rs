//! Instrumented sorting algorithms for the sorting visualizer

pub mod benchmark;
pub mod catalog;
pub mod config;
pub mod input;
pub mod sorts;

use thiserror::Error;
use sv_core::Value;

// Re-exports
pub use benchmark::{compare_all, BenchmarkLine, BenchmarkReport};
pub use catalog::Algorithm;
pub use config::VisualizerConfig;

/// Errors that can occur while generating a trace
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    #[error("value range {min}..={max} is too wide to tabulate")]
    RangeTooLarge { min: Value, max: Value },
}
