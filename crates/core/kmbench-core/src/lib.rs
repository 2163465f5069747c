//! Core data handling for kmbench.
//!
//! Reduces benchmark runtimes to summary statistics, extracts runtimes from
//! the text benchmarked programs print, and loads the per-datafile speedup
//! tables the comparison chart is drawn from.

#![warn(missing_docs)]

/// Error type shared by all modules.
pub mod error;
/// Runtime extraction from program output.
pub mod runtime;
/// Per-datafile speedup tables.
pub mod speedup;
/// Runtime summary statistics.
pub mod stats;

pub use error::Error;
pub use runtime::RuntimeFormat;
pub use speedup::{SpeedupRecord, SpeedupTable, category_union};
pub use stats::RuntimeSummary;
