//! Bar and line charts and their layout on a [`Canvas`].

use std::path::Path;

use image::Rgb;

use crate::axis;
use crate::canvas::{BLACK, Canvas, Color, GREY, WHITE};
use crate::error::ChartError;

/// Series colours, assigned in order (the matplotlib "tab10" cycle).
pub const PALETTE: [Color; 10] = [
    Rgb([0x1f, 0x77, 0xb4]),
    Rgb([0xff, 0x7f, 0x0e]),
    Rgb([0x2c, 0xa0, 0x2c]),
    Rgb([0xd6, 0x27, 0x28]),
    Rgb([0x94, 0x67, 0xbd]),
    Rgb([0x8c, 0x56, 0x4b]),
    Rgb([0xe3, 0x77, 0xc2]),
    Rgb([0x7f, 0x7f, 0x7f]),
    Rgb([0xbc, 0xbd, 0x22]),
    Rgb([0x17, 0xbe, 0xcf]),
];

const TITLE_SCALE: u32 = 3;
const LABEL_SCALE: u32 = 2;
const TICK_SCALE: u32 = 2;
const TICK_LEN: i32 = 5;
const MARGIN: i32 = 12;
const Y_TICK_TARGET: usize = 6;

/// Something that can lay itself out on a canvas.
pub trait Chart {
    /// Draw the chart onto `canvas`.
    fn draw(&self, canvas: &mut Canvas) -> Result<(), ChartError>;
}

/// Render `chart` onto a fresh white canvas.
pub fn render(chart: &dyn Chart, width: u32, height: u32) -> Result<Canvas, ChartError> {
    let mut canvas = Canvas::new(width, height, WHITE);
    chart.draw(&mut canvas)?;
    Ok(canvas)
}

/// Render `chart` and write it to `path` as PNG, creating parent
/// directories as needed.
pub fn render_png(chart: &dyn Chart, width: u32, height: u32, path: &Path) -> Result<(), ChartError> {
    let canvas = render(chart, width, height)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    canvas.save_png(path)
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

/// One bar of a [`BarChart`].
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Category label drawn under the bar.
    pub label: String,
    /// Bar height in data units.
    pub value: f64,
}

/// A single-series categorical bar chart.
#[derive(Debug, Clone)]
pub struct BarChart {
    /// Title drawn above the plot.
    pub title: String,
    /// Label under the x axis.
    pub x_label: String,
    /// Label beside the y axis.
    pub y_label: String,
    /// Bars, left to right.
    pub bars: Vec<Bar>,
    /// Fill colour.
    pub color: Color,
}

impl BarChart {
    /// Create an empty bar chart.
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            bars: Vec::new(),
            color: PALETTE[0],
        }
    }

    /// Append a bar.
    pub fn bar(mut self, label: impl Into<String>, value: f64) -> Self {
        self.bars.push(Bar {
            label: label.into(),
            value,
        });
        self
    }
}

impl Chart for BarChart {
    fn draw(&self, canvas: &mut Canvas) -> Result<(), ChartError> {
        if self.bars.is_empty() {
            return Err(ChartError::NoData);
        }

        // Bars grow from zero, with 5% headroom over the tallest one.
        let max = self.bars.iter().map(|b| b.value).fold(0.0, f64::max);
        let min = self.bars.iter().map(|b| b.value).fold(0.0, f64::min);
        let hi = if max > 0.0 { max * 1.05 } else if min < 0.0 { 0.0 } else { 1.0 };
        let lo = min * 1.05;

        let ticks = tick_labels(lo, hi);
        let frame = Frame::layout(canvas, lo, hi, &ticks);

        let n = self.bars.len();
        let bar_width = (frame.slot_width(n) * 0.8).round().max(1.0) as i32;
        let zero = frame.y_px(0.0);
        for (i, bar) in self.bars.iter().enumerate() {
            let cx = frame.slot_center(i, n);
            let y = frame.y_px(bar.value);
            let height = (zero - y).abs().max(1);
            canvas.fill_rect(cx - bar_width / 2, zero.min(y), bar_width, height, self.color);
        }

        frame.draw_decorations(canvas, &self.title, &self.x_label, &self.y_label, &ticks);
        let labels: Vec<&str> = self.bars.iter().map(|b| b.label.as_str()).collect();
        frame.draw_x_labels(canvas, &labels);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Line chart
// ---------------------------------------------------------------------------

/// One polyline of a [`LineChart`].
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend label. Empty labels are left out of the legend.
    pub label: String,
    /// `(category, value)` points, connected in order.
    pub points: Vec<(String, f64)>,
}

/// A multi-series line chart over a categorical x axis.
#[derive(Debug, Clone)]
pub struct LineChart {
    /// Title drawn above the plot.
    pub title: String,
    /// Label under the x axis.
    pub x_label: String,
    /// Label beside the y axis.
    pub y_label: String,
    /// X axis categories, left to right.
    pub categories: Vec<String>,
    /// Plotted series.
    pub series: Vec<Series>,
}

impl LineChart {
    /// Create an empty line chart.
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            categories: Vec::new(),
            series: Vec::new(),
        }
    }

    /// Set the x axis categories, left to right.
    pub fn categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Add a series. Points whose category is not on the axis are not drawn.
    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }
}

impl Chart for LineChart {
    fn draw(&self, canvas: &mut Canvas) -> Result<(), ChartError> {
        let values: Vec<f64> = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|&(_, v)| v))
            .filter(|v| v.is_finite())
            .collect();
        // Without data the axes are still drawn, over the empty-range default.
        let (lo, hi) = if values.is_empty() {
            axis::padded_range(0.0, 0.0)
        } else {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            axis::padded_range(min, max)
        };

        let ticks = tick_labels(lo, hi);
        let frame = Frame::layout(canvas, lo, hi, &ticks);
        let n = self.categories.len();

        let mut legend = Vec::new();
        for (k, series) in self.series.iter().enumerate() {
            let color = PALETTE[k % PALETTE.len()];
            let points: Vec<(i32, i32)> = series
                .points
                .iter()
                .filter(|(_, v)| v.is_finite())
                .filter_map(|(category, v)| {
                    let i = self.categories.iter().position(|c| c == category)?;
                    Some((frame.slot_center(i, n), frame.y_px(*v)))
                })
                .collect();

            for pair in points.windows(2) {
                canvas.draw_line(pair[0], pair[1], 2, color);
            }
            if let &[(x, y)] = points.as_slice() {
                canvas.fill_rect(x - 2, y - 2, 5, 5, color);
            }

            if !series.label.is_empty() {
                legend.push((series.label.as_str(), color));
            }
        }

        frame.draw_decorations(canvas, &self.title, &self.x_label, &self.y_label, &ticks);
        let labels: Vec<&str> = self.categories.iter().map(String::as_str).collect();
        frame.draw_x_labels(canvas, &labels);
        frame.draw_legend(canvas, &legend);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

fn tick_labels(lo: f64, hi: f64) -> Vec<(f64, String)> {
    let (ticks, step) = axis::nice_ticks(lo, hi, Y_TICK_TARGET);
    ticks
        .into_iter()
        .map(|t| (t, axis::format_tick(t, step)))
        .collect()
}

/// Pixel bounds of the plot area and the y range it maps.
struct Frame {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
    lo: f64,
    hi: f64,
}

impl Frame {
    fn layout(canvas: &Canvas, lo: f64, hi: f64, ticks: &[(f64, String)]) -> Self {
        let label_h = Canvas::text_height(LABEL_SCALE) as i32;
        let tick_h = Canvas::text_height(TICK_SCALE) as i32;
        let tick_w = ticks
            .iter()
            .map(|(_, l)| Canvas::text_width(l, TICK_SCALE))
            .max()
            .unwrap_or(0) as i32;

        let left = MARGIN + label_h + MARGIN + tick_w + TICK_LEN + 4;
        let top = 2 * MARGIN + Canvas::text_height(TITLE_SCALE) as i32;
        let right = (canvas.width() as i32 - 2 * MARGIN).max(left + 1);
        let bottom = (canvas.height() as i32 - (2 * MARGIN + TICK_LEN + 4 + tick_h + label_h)).max(top + 1);

        Self {
            left,
            top,
            right,
            bottom,
            lo,
            hi,
        }
    }

    fn y_px(&self, v: f64) -> i32 {
        let frac = if self.hi > self.lo {
            (v - self.lo) / (self.hi - self.lo)
        } else {
            0.5
        };
        self.bottom - (frac * f64::from(self.bottom - self.top)).round() as i32
    }

    fn slot_width(&self, n: usize) -> f64 {
        f64::from(self.right - self.left) / n.max(1) as f64
    }

    fn slot_center(&self, i: usize, n: usize) -> i32 {
        self.left + ((i as f64 + 0.5) * self.slot_width(n)).round() as i32
    }

    fn draw_decorations(
        &self,
        canvas: &mut Canvas,
        title: &str,
        x_label: &str,
        y_label: &str,
        ticks: &[(f64, String)],
    ) {
        let title_w = Canvas::text_width(title, TITLE_SCALE) as i32;
        canvas.draw_text((self.left + self.right - title_w) / 2, MARGIN, title, TITLE_SCALE, BLACK);

        canvas.stroke_rect(
            self.left,
            self.top,
            self.right - self.left + 1,
            self.bottom - self.top + 1,
            BLACK,
        );

        let tick_h = Canvas::text_height(TICK_SCALE) as i32;
        for (value, label) in ticks {
            let y = self.y_px(*value);
            canvas.fill_rect(self.left - TICK_LEN, y, TICK_LEN, 1, BLACK);
            let w = Canvas::text_width(label, TICK_SCALE) as i32;
            canvas.draw_text(self.left - TICK_LEN - 4 - w, y - tick_h / 2, label, TICK_SCALE, BLACK);
        }

        let label_h = Canvas::text_height(LABEL_SCALE) as i32;
        let x_w = Canvas::text_width(x_label, LABEL_SCALE) as i32;
        canvas.draw_text(
            (self.left + self.right - x_w) / 2,
            canvas.height() as i32 - MARGIN - label_h,
            x_label,
            LABEL_SCALE,
            BLACK,
        );

        let y_w = Canvas::text_width(y_label, LABEL_SCALE) as i32;
        canvas.draw_text_vertical(MARGIN, (self.top + self.bottom + y_w) / 2, y_label, LABEL_SCALE, BLACK);
    }

    /// Tick and label each category slot, skipping labels that would
    /// overlap their neighbours.
    fn draw_x_labels(&self, canvas: &mut Canvas, labels: &[&str]) {
        let n = labels.len();
        let widest = labels
            .iter()
            .map(|l| Canvas::text_width(l, TICK_SCALE))
            .max()
            .unwrap_or(0);
        let stride = (f64::from(widest + 8) / self.slot_width(n)).ceil().max(1.0) as usize;

        for (i, label) in labels.iter().enumerate() {
            let cx = self.slot_center(i, n);
            canvas.fill_rect(cx, self.bottom + 1, 1, TICK_LEN, BLACK);
            if i % stride == 0 {
                let w = Canvas::text_width(label, TICK_SCALE) as i32;
                canvas.draw_text(cx - w / 2, self.bottom + TICK_LEN + 4, label, TICK_SCALE, BLACK);
            }
        }
    }

    /// Legend box in the upper-right corner of the plot area.
    fn draw_legend(&self, canvas: &mut Canvas, entries: &[(&str, Color)]) {
        if entries.is_empty() {
            return;
        }
        let row_h = Canvas::text_height(LABEL_SCALE) as i32 + 6;
        let swatch = 24;
        let text_w = entries
            .iter()
            .map(|(l, _)| Canvas::text_width(l, LABEL_SCALE))
            .max()
            .unwrap_or(0) as i32;

        let w = 8 + swatch + 6 + text_w + 8;
        let h = row_h * entries.len() as i32 + 8;
        let x = self.right - 8 - w;
        let y = self.top + 8;

        canvas.fill_rect(x, y, w, h, WHITE);
        canvas.stroke_rect(x, y, w, h, GREY);
        for (i, (label, color)) in entries.iter().enumerate() {
            let row_y = y + 4 + i as i32 * row_h;
            let cy = row_y + row_h / 2;
            canvas.draw_line((x + 8, cy), (x + 8 + swatch, cy), 2, *color);
            canvas.draw_text(x + 8 + swatch + 6, row_y + 3, label, LABEL_SCALE, BLACK);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_counts(canvas: &Canvas, color: Color) -> Vec<usize> {
        (0..canvas.width() as i32)
            .map(|x| {
                (0..canvas.height() as i32)
                    .filter(|&y| canvas.pixel(x, y) == Some(color))
                    .count()
            })
            .collect()
    }

    fn count(canvas: &Canvas, color: Color) -> usize {
        column_counts(canvas, color).iter().sum()
    }

    #[test]
    fn bars_scale_with_values() {
        let chart = BarChart::new("Runtime Statistics", "Runtime", "Time (seconds)")
            .bar("Minimum", 1.0)
            .bar("Average", 2.0)
            .bar("Maximum", 3.0);
        let canvas = render(&chart, 640, 480).unwrap();

        let counts = column_counts(&canvas, PALETTE[0]);
        let first = counts.iter().position(|&c| c > 0).unwrap();
        let last = counts.iter().rposition(|&c| c > 0).unwrap();
        assert!(counts[last] > 2 * counts[first]);
    }

    #[test]
    fn empty_bar_chart_has_no_data() {
        let chart = BarChart::new("t", "x", "y");
        assert!(matches!(render(&chart, 100, 100), Err(ChartError::NoData)));
    }

    #[test]
    fn points_off_the_axis_are_skipped() {
        let mut chart = LineChart::new("t", "x", "y").categories(vec!["a".into()]);
        chart.add_series(Series {
            label: String::new(),
            points: vec![("a".into(), 1.0), ("z".into(), 2.0)],
        });
        let canvas = render(&chart, 600, 400).unwrap();
        // Only the single-point marker for "a" remains.
        assert_eq!(count(&canvas, PALETTE[0]), 25);
    }

    #[test]
    fn line_chart_draws_each_series() {
        let mut chart = LineChart::new("Speedup Comparison", "Datafile", "Speedup")
            .categories(vec!["a".into(), "b".into(), "c".into()]);
        chart.add_series(Series {
            label: "Speedup to Serial".into(),
            points: vec![("a".into(), 2.0), ("b".into(), 3.5), ("c".into(), 4.0)],
        });
        chart.add_series(Series {
            label: "Speedup to Better-Serial".into(),
            points: vec![("a".into(), 1.5), ("b".into(), 2.0), ("c".into(), 2.2)],
        });
        let canvas = render(&chart, 1000, 600).unwrap();

        assert!(count(&canvas, PALETTE[0]) > 100);
        assert!(count(&canvas, PALETTE[1]) > 100);
        assert_eq!(count(&canvas, PALETTE[2]), 0);
    }

    #[test]
    fn line_chart_without_points_draws_axes_and_legend() {
        let mut chart = LineChart::new("Speedup Comparison", "Datafile", "Speedup");
        chart.add_series(Series {
            label: "Speedup to Serial".into(),
            points: Vec::new(),
        });
        chart.add_series(Series {
            label: "Speedup to Better-Serial".into(),
            points: Vec::new(),
        });
        let canvas = render(&chart, 1000, 600).unwrap();

        assert!(chart.categories.is_empty());
        assert!(count(&canvas, BLACK) > 0);
        // Legend swatches only.
        assert!(count(&canvas, PALETTE[0]) > 0);
        assert!(count(&canvas, PALETTE[1]) > 0);
    }

    #[test]
    fn single_point_series_is_visible() {
        let mut chart = LineChart::new("t", "x", "y").categories(vec!["only".into()]);
        chart.add_series(Series {
            label: String::new(),
            points: vec![("only".into(), 1.0)],
        });
        let canvas = render(&chart, 300, 200).unwrap();
        assert!(count(&canvas, PALETTE[0]) >= 25);
    }

    #[test]
    fn render_png_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/chart.png");
        let chart = BarChart::new("t", "x", "y").bar("a", 1.0);
        render_png(&chart, 200, 150, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
