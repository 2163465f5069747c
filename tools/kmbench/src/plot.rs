//! Chart generation for runtime statistics and speedup comparisons.

use anyhow::{Context, Result};
use kmbench_chart::{BarChart, LineChart, Series, render_png};
use kmbench_core::{RuntimeSummary, SpeedupTable, category_union};
use std::path::Path;

/// Bar-chart the minimum, average and maximum of `runtimes` into `output`.
///
/// An empty list prints a notice and writes nothing. Returns the summary that
/// was charted.
pub fn plot_runtimes(
    runtimes: &[f64],
    output: &Path,
    (width, height): (u32, u32),
) -> Result<Option<RuntimeSummary>> {
    let Some(summary) = RuntimeSummary::compute(runtimes) else {
        println!("No runtimes to plot.");
        return Ok(None);
    };

    let (min, avg, max) = summary.triple();
    let chart = BarChart::new("Runtime Statistics", "Runtime", "Time (seconds)")
        .bar("Minimum", min)
        .bar("Average", avg)
        .bar("Maximum", max);

    render_png(&chart, width, height, output)
        .with_context(|| format!("writing runtime chart to {}", output.display()))?;
    Ok(Some(summary))
}

/// Line-chart each table's speedups against datafile into `output`.
pub fn plot_speedups(tables: &[SpeedupTable], output: &Path, (width, height): (u32, u32)) -> Result<()> {
    render_png(&speedup_chart(tables), width, height, output)
        .with_context(|| format!("writing speedup chart to {}", output.display()))
}

/// One series per table over the union of their datafiles.
///
/// Each line connects only the datafiles its own table lists, in file order.
fn speedup_chart(tables: &[SpeedupTable]) -> LineChart {
    let mut chart =
        LineChart::new("Speedup Comparison", "Datafile", "Speedup").categories(category_union(tables));
    for table in tables {
        chart.add_series(Series {
            label: table.label.clone(),
            points: table
                .records
                .iter()
                .map(|r| (r.datafile.clone(), r.speedup))
                .collect(),
        });
    }
    chart
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

    #[test]
    fn empty_runtimes_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("runtime_stats.png");
        let summary = plot_runtimes(&[], &output, (640, 480)).unwrap();
        assert!(summary.is_none());
        assert!(!output.exists());
    }

    #[test]
    fn runtimes_are_charted() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("runtime_stats.png");
        let summary = plot_runtimes(&[1.0, 2.0, 3.0], &output, (640, 480))
            .unwrap()
            .unwrap();
        assert_eq!(summary.triple(), (1.0, 2.0, 3.0));
        assert!(std::fs::read(&output).unwrap().starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn speedups_are_charted() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("speedup_comparison.png");
        let serial = SpeedupTable::from_reader(
            "Datafile,Speedup\n100k.txt,3.1\n1M.txt,5.4\n".as_bytes(),
            "Speedup to Serial",
        )
        .unwrap();
        let better = SpeedupTable::from_reader(
            "Datafile,Speedup\n100k.txt,1.9\n1M.txt,2.6\n".as_bytes(),
            "Speedup to Better-Serial",
        )
        .unwrap();

        plot_speedups(&[serial, better], &output, (1000, 600)).unwrap();
        assert!(std::fs::read(&output).unwrap().starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn tables_share_one_datafile_axis() {
        let serial = SpeedupTable::from_reader(
            "Datafile,Speedup\n100k.txt,3.1\n1M.txt,5.4\n".as_bytes(),
            "Speedup to Serial",
        )
        .unwrap();
        let better = SpeedupTable::from_reader(
            "Datafile,Speedup\n10k.txt,1.2\n1M.txt,2.6\n".as_bytes(),
            "Speedup to Better-Serial",
        )
        .unwrap();

        let chart = speedup_chart(&[serial, better]);
        assert_eq!(chart.categories, vec!["100k.txt", "1M.txt", "10k.txt"]);
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[1].label, "Speedup to Better-Serial");
    }

    #[test]
    fn header_only_tables_still_write_chart() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("speedup_comparison.png");
        let serial = SpeedupTable::from_reader("Datafile,Speedup\n".as_bytes(), "Speedup to Serial").unwrap();
        let better =
            SpeedupTable::from_reader("Datafile,Speedup\n".as_bytes(), "Speedup to Better-Serial").unwrap();

        plot_speedups(&[serial, better], &output, (1000, 600)).unwrap();
        assert!(std::fs::read(&output).unwrap().starts_with(PNG_SIGNATURE));
    }
}
