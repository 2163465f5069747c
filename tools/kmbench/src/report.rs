//! Terminal reports and baseline files for benchmark runs.

use anyhow::{Context, Result};
use kmbench_core::RuntimeSummary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::runner::RunResults;

/// A baseline file containing per-executable runtimes.
#[derive(Debug, Serialize, Deserialize)]
pub struct Baseline {
    /// Dataset the baseline was measured on.
    pub dataset: String,
    /// Summary over all runtimes, if there were any.
    pub summary: Option<RuntimeSummary>,
    /// Runtime in seconds keyed by executable name.
    pub runtimes: BTreeMap<String, f64>,
}

impl Baseline {
    /// Build a baseline from a finished run.
    pub fn from_results(results: &RunResults) -> Self {
        Self {
            dataset: results.dataset.clone(),
            summary: RuntimeSummary::compute(&results.runtimes()),
            runtimes: results
                .runs
                .iter()
                .map(|r| (r.name.clone(), r.runtime))
                .collect(),
        }
    }
}

/// JSON report printed by `--format json`.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    results: &'a RunResults,
    summary: Option<RuntimeSummary>,
}

/// Print per-executable runtimes and their summary as a table.
pub fn print_run_table(results: &RunResults) {
    if results.runs.is_empty() {
        println!("  No runtimes recorded.");
        return;
    }

    let max_name = results
        .runs
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(10)
        .max(10);

    println!();
    println!("  {:<width$}  {:>12}", "Executable", "Runtime (s)", width = max_name);
    println!("  {:-<width$}  {:->12}", "", "", width = max_name);
    for run in &results.runs {
        println!("  {:<width$}  {:>12.6}", run.name, run.runtime, width = max_name);
    }

    if let Some(stats) = RuntimeSummary::compute(&results.runtimes()) {
        println!();
        println!(
            "  {:>12}  {:>12}  {:>12}  {:>12}  {:>12}  {:>8}",
            "Min (s)", "Mean (s)", "Median (s)", "Max (s)", "Stddev (s)", "Runs"
        );
        println!(
            "  {:->12}  {:->12}  {:->12}  {:->12}  {:->12}  {:->8}",
            "", "", "", "", "", ""
        );
        println!(
            "  {:>12.6}  {:>12.6}  {:>12.6}  {:>12.6}  {:>12.6}  {:>8}",
            stats.min, stats.mean, stats.median, stats.max, stats.stddev, stats.count
        );
    }

    if !results.rejected.is_empty() {
        println!();
        println!("  {} executable(s) excluded:", results.rejected.len());
        for rejection in &results.rejected {
            println!("    {}", rejection.name);
        }
    }
    println!();
}

/// Print the run as a JSON document.
pub fn print_run_json(results: &RunResults) -> Result<()> {
    let report = JsonReport {
        results,
        summary: RuntimeSummary::compute(&results.runtimes()),
    };
    let json = serde_json::to_string_pretty(&report).context("serializing report to JSON")?;
    println!("{json}");
    Ok(())
}

/// Save per-executable runtimes as a JSON baseline file.
pub fn save_baseline(results: &RunResults, path: &Path) -> Result<()> {
    let baseline = Baseline::from_results(results);
    let json = serde_json::to_string_pretty(&baseline).context("serializing baseline to JSON")?;
    std::fs::write(path, json).with_context(|| format!("writing baseline to {}", path.display()))?;
    Ok(())
}

/// Load a JSON baseline file.
pub fn load_baseline(path: &Path) -> Result<Baseline> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading baseline {}", path.display()))?;
    serde_json::from_str(&json).context("parsing baseline JSON")
}

/// Percentage change from `base` to `current`; positive means slower.
fn change_pct(base: f64, current: f64) -> f64 {
    if base > 0.0 {
        (current - base) / base * 100.0
    } else {
        0.0
    }
}

/// Compare a run against a baseline file and flag regressions.
///
/// An executable regresses when it got slower by more than `threshold_pct`
/// percent. Returns the number of regressions.
pub fn compare_baseline(results: &RunResults, path: &Path, threshold_pct: u32) -> Result<usize> {
    let baseline = load_baseline(path)?;
    let mut regressions = 0;

    println!("\n  Baseline comparison (threshold: {threshold_pct}%):");
    if baseline.dataset != results.dataset {
        println!(
            "  Note: baseline was measured on {}, this run on {}",
            baseline.dataset, results.dataset
        );
    }

    for run in &results.runs {
        let Some(&base) = baseline.runtimes.get(&run.name) else {
            println!("    {} : new (no baseline)", run.name);
            continue;
        };

        let pct = change_pct(base, run.runtime);
        let direction = if pct > 0.0 { "slower" } else { "faster" };
        let flag = if pct > f64::from(threshold_pct) {
            regressions += 1;
            " REGRESSION"
        } else {
            ""
        };
        println!(
            "    {} : {base:.6} -> {:.6} ({:.1}% {direction}){flag}",
            run.name,
            run.runtime,
            pct.abs()
        );
    }

    if regressions > 0 {
        println!("\n  {regressions} regression(s) detected!");
    } else {
        println!("\n  No regressions detected.");
    }

    Ok(regressions)
}
