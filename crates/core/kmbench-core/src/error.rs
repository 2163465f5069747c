//! Error types for runtime parsing and speedup table loading.

use std::fmt;
use std::io;

/// Errors produced by `kmbench-core`.
#[derive(Debug)]
pub enum Error {
    /// I/O error reading an input file.
    Io(io::Error),
    /// Malformed CSV input.
    Csv(csv::Error),
    /// A required CSV column is absent from the header row.
    MissingColumn {
        /// Column name that was looked up.
        column: String,
        /// Columns present in the header row.
        available: Vec<String>,
    },
    /// A speedup cell could not be parsed as a number.
    InvalidSpeedup {
        /// 1-based line number in the CSV file (the header is line 1).
        line: u64,
        /// Raw cell contents.
        value: String,
    },
    /// A benchmarked program printed nothing on stdout.
    EmptyOutput,
    /// The configured runtime marker did not appear in the output.
    MarkerNotFound(String),
    /// The runtime text could not be parsed as a number.
    InvalidRuntime(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Csv(e) => write!(f, "CSV error: {e}"),
            Self::MissingColumn { column, available } => write!(
                f,
                "missing column '{column}' (available: {})",
                available.join(", ")
            ),
            Self::InvalidSpeedup { line, value } => {
                write!(f, "line {line}: speedup '{value}' is not a number")
            }
            Self::EmptyOutput => write!(f, "no runtime printed on stdout"),
            Self::MarkerNotFound(marker) => {
                write!(f, "runtime marker '{marker}' not found in output")
            }
            Self::InvalidRuntime(text) => write!(f, "runtime '{text}' is not a number"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}
