//! Command-line interface definitions for kmbench.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Benchmark runner and chart generator for k-means executables.
#[derive(Parser)]
#[command(name = "kmbench", version, about)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: kmbench.toml in the working directory, if present).
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Suppress progress output; show only warnings and results.
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose output with commands, skipped files and timings.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Run every executable in the bin directory against a dataset and chart
    /// the minimum, average and maximum runtime.
    Run(RunArgs),
    /// Chart per-datafile speedups from CSV files.
    Speedup(SpeedupArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Parser)]
pub struct RunArgs {
    /// Dataset file passed to every executable (prompted for if omitted).
    #[arg(long, short = 'd')]
    pub dataset: Option<String>,

    /// Directory containing the executables to benchmark.
    #[arg(long)]
    pub bin_dir: Option<PathBuf>,

    /// Output path for the runtime chart.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Read the runtime from the token following this text instead of
    /// treating the whole output as the runtime.
    #[arg(long)]
    pub marker: Option<String>,

    /// Factor converting the value after --marker to seconds.
    #[arg(long, requires = "marker")]
    pub scale: Option<f64>,

    /// Output format for results: table or json.
    #[arg(long, default_value = "table")]
    pub format: String,

    /// Save per-executable runtimes as a baseline JSON file.
    #[arg(long)]
    pub save_baseline: Option<PathBuf>,

    /// Compare against a baseline JSON file and flag regressions.
    #[arg(long)]
    pub baseline: Option<PathBuf>,

    /// Regression threshold as a percentage (default: 5).
    #[arg(long, default_value = "5")]
    pub threshold: u32,

    /// Skip writing the runtime chart.
    #[arg(long)]
    pub no_plot: bool,
}

/// Arguments for the `speedup` subcommand.
#[derive(Parser)]
pub struct SpeedupArgs {
    /// CSV file to plot, optionally followed by `=LABEL`. Repeatable.
    /// Replaces the configured series when given.
    #[arg(long = "series", short = 's', value_name = "PATH[=LABEL]")]
    pub series: Vec<String>,

    /// Output path for the comparison chart.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}
