//! Error types for chart rendering.

use std::fmt;
use std::io;

/// Errors that can occur while rendering or saving a chart.
#[derive(Debug)]
pub enum ChartError {
    /// The chart has nothing to plot.
    NoData,
    /// PNG encoding or image file I/O failed.
    Image(image::ImageError),
    /// Preparing the output location failed.
    Io(io::Error),
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoData => write!(f, "chart has no data to plot"),
            Self::Image(e) => write!(f, "image error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for ChartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NoData => None,
            Self::Image(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for ChartError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}

impl From<io::Error> for ChartError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
