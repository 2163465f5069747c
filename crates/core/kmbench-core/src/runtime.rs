//! Extraction of a runtime value from a benchmarked program's stdout.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How a runtime is read from the text a program printed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum RuntimeFormat {
    /// The whole output is a single number of seconds, optionally surrounded
    /// by whitespace.
    #[default]
    Bare,
    /// The number follows `marker` on some line, e.g.
    /// `TOTAL EXECUTION TIME = 81234`. The parsed value is multiplied by
    /// `scale` to convert it to seconds.
    Marker {
        /// Text that precedes the runtime.
        marker: String,
        /// Factor converting the printed unit to seconds.
        scale: f64,
    },
}

impl RuntimeFormat {
    /// Parse a runtime in seconds out of `stdout`.
    pub fn parse(&self, stdout: &str) -> Result<f64, Error> {
        match self {
            Self::Bare => {
                let text = stdout.trim();
                if text.is_empty() {
                    return Err(Error::EmptyOutput);
                }
                parse_number(text)
            }
            Self::Marker { marker, scale } => {
                if stdout.trim().is_empty() {
                    return Err(Error::EmptyOutput);
                }
                let rest = stdout
                    .lines()
                    .find_map(|line| line.find(marker.as_str()).map(|i| &line[i + marker.len()..]))
                    .ok_or_else(|| Error::MarkerNotFound(marker.clone()))?;
                let token = rest.split_whitespace().next().unwrap_or("");
                Ok(parse_number(token)? * scale)
            }
        }
    }
}

fn parse_number(text: &str) -> Result<f64, Error> {
    text.parse::<f64>()
        .map_err(|_| Error::InvalidRuntime(text.to_string()))
}
