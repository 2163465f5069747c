//! Minimal chart rendering for kmbench.
//!
//! Draws bar and line charts onto an RGB canvas and writes them out as PNG.
//! Text is rendered from an embedded bitmap font, so no system fonts are
//! required.
//!
//! ```ignore
//! let chart = BarChart::new("Runtime Statistics", "Runtime", "Time (seconds)")
//!     .bar("Minimum", 1.0)
//!     .bar("Average", 2.0)
//!     .bar("Maximum", 3.0);
//! render_png(&chart, 640, 480, Path::new("runtime_stats.png"))?;
//! ```

#![warn(missing_docs)]

/// Axis ranges and tick placement.
pub mod axis;
/// Pixel canvas and drawing primitives.
pub mod canvas;
/// Chart models.
pub mod chart;
/// Error type.
pub mod error;
/// Embedded bitmap font.
pub mod font;

pub use canvas::{Canvas, Color};
pub use chart::{Bar, BarChart, Chart, LineChart, PALETTE, Series, render, render_png};
pub use error::ChartError;
