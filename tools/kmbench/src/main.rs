//! k-means benchmark driver.
//!
//! `kmbench run` executes every program in a bin directory against one
//! dataset, collects the runtime each prints, reports the statistics and
//! charts the minimum, average and maximum. `kmbench speedup` charts
//! per-datafile speedups from CSV tables.

mod cli;
mod config;
mod plot;
mod report;
mod runner;
mod verbose;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::Parser;
use kmbench_core::SpeedupTable;

use verbose::{dprintln, vprintln};

/// Text shown when asking for the dataset interactively.
const DATASET_PROMPT: &str = "Enter the dataset filename: ";

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    verbose::init(verbose::Verbosity::from_flags(cli.quiet, cli.verbose));

    let cwd = std::env::current_dir().context("determining working directory")?;
    let project = config::load(cli.config.as_deref(), &cwd)?;

    match cli.command {
        cli::Command::Run(ref args) => cmd_run(&project, args),
        cli::Command::Speedup(ref args) => cmd_speedup(&project, args),
    }
}

// ===========================================================================
// Commands
// ===========================================================================

/// Run the executables, report their runtimes and chart the summary.
fn cmd_run(project: &config::ProjectConfig, args: &cli::RunArgs) -> Result<()> {
    let settings = project.resolve_run(args)?;
    if !matches!(args.format.as_str(), "table" | "json") {
        bail!("unknown output format '{}' (expected table or json)", args.format);
    }

    let dataset = match &args.dataset {
        Some(dataset) => dataset.clone(),
        None => prompt_dataset(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    let results = runner::run_executables(&settings.bin_dir, &dataset, &settings.runtime)?;

    match args.format.as_str() {
        "json" => report::print_run_json(&results)?,
        _ => report::print_run_table(&results),
    }

    if let Some(ref path) = args.save_baseline {
        report::save_baseline(&results, path)?;
        dprintln!("Baseline saved to {}", path.display());
    }

    let regressions = match args.baseline {
        Some(ref path) => report::compare_baseline(&results, path, args.threshold)?,
        None => 0,
    };

    match settings.output {
        Some(ref output) => {
            let size = (settings.width, settings.height);
            if plot::plot_runtimes(&results.runtimes(), output, size)?.is_some() {
                println!("Chart saved to {}", output.display());
            }
        }
        None => vprintln!("Plotting disabled."),
    }

    if regressions > 0 {
        bail!("{regressions} runtime regression(s) above {}%", args.threshold);
    }
    Ok(())
}

/// Load the speedup tables and chart them against each other.
fn cmd_speedup(project: &config::ProjectConfig, args: &cli::SpeedupArgs) -> Result<()> {
    let settings = project.resolve_speedup(args)?;

    let mut tables = Vec::with_capacity(settings.series.len());
    for (path, label) in &settings.series {
        vprintln!("Loading {} as '{label}'...", path.display());
        let table = SpeedupTable::load(path, label.clone())
            .with_context(|| format!("loading speedup table {}", path.display()))?;
        dprintln!("  {}: {} datafile(s)", path.display(), table.records.len());
        tables.push(table);
    }

    plot::plot_speedups(&tables, &settings.output, (settings.width, settings.height))?;
    println!("Chart saved to {}", settings.output.display());
    Ok(())
}

// ===========================================================================
// Helpers
// ===========================================================================

/// Ask for the dataset filename on `output` and read one line from `input`.
fn prompt_dataset(input: &mut impl BufRead, output: &mut impl Write) -> Result<String> {
    write!(output, "{DATASET_PROMPT}")?;
    output.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("reading dataset filename")?;
    if read == 0 {
        bail!("no dataset filename given (end of input)");
    }
    let dataset = line.trim_end_matches(['\r', '\n']);
    if dataset.trim().is_empty() {
        bail!("no dataset filename given");
    }
    Ok(dataset.to_string())
}
