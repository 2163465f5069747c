//! Discovery and execution of benchmark executables.
//!
//! Every regular file directly inside the bin directory is run, one at a
//! time, as `<executable> <dataset>`. A run whose stderr is non-empty (or
//! whose exit status is non-zero) is reported and excluded; its siblings keep
//! running. A run that succeeds but prints something that is not a runtime
//! aborts the whole benchmark.

use anyhow::{Context, Result};
use kmbench_core::RuntimeFormat;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::verbose::{RunTimer, dprintln, vprintln};

/// Result of running one executable.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The executable reported this runtime, in seconds.
    Runtime(f64),
    /// The executable failed; the text explains why.
    Rejected(String),
}

/// A successful run.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    /// Executable file name.
    pub name: String,
    /// Reported runtime in seconds.
    pub runtime: f64,
}

/// An excluded run.
#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    /// Executable file name.
    pub name: String,
    /// Captured stderr, or a description of the failure.
    pub reason: String,
}

/// Everything a benchmark pass produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunResults {
    /// Dataset passed to every executable.
    pub dataset: String,
    /// Runs that reported a runtime, in execution order.
    pub runs: Vec<RunRecord>,
    /// Runs that were excluded.
    pub rejected: Vec<Rejection>,
}

impl RunResults {
    /// Runtimes of all successful runs, in execution order.
    pub fn runtimes(&self) -> Vec<f64> {
        self.runs.iter().map(|r| r.runtime).collect()
    }
}

/// List the executables in `dir`, sorted by file name.
///
/// Subdirectories are ignored. On Unix, files without any execute permission
/// bit are skipped.
pub fn discover_executables(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut executables = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("reading executables directory {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        let metadata = match std::fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                vprintln!("  Skipping {} (dangling link)", path.display());
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("reading metadata of {}", path.display()));
            }
        };
        if !metadata.is_file() {
            continue;
        }
        if !is_executable(&metadata) {
            vprintln!("  Skipping {} (not executable)", path.display());
            continue;
        }
        executables.push(path);
    }
    executables.sort();
    Ok(executables)
}

#[cfg(unix)]
fn is_executable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &std::fs::Metadata) -> bool {
    true
}

/// Run one executable against `dataset` and wait for it to finish.
pub fn run_executable(path: &Path, dataset: &str, format: &RuntimeFormat) -> Result<Outcome> {
    vprintln!("  $ {} {dataset}", path.display());
    let output = Command::new(path)
        .arg(dataset)
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("failed to run {}", path.display()))?;

    if !output.stderr.is_empty() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        return Ok(Outcome::Rejected(stderr));
    }
    if !output.status.success() {
        return Ok(Outcome::Rejected(format!("exited with {}", output.status)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let runtime = format
        .parse(&stdout)
        .with_context(|| format!("reading runtime printed by {}", path.display()))?;
    Ok(Outcome::Runtime(runtime))
}

/// Run every executable in `dir` against `dataset`, in name order.
pub fn run_executables(dir: &Path, dataset: &str, format: &RuntimeFormat) -> Result<RunResults> {
    let executables = discover_executables(dir)?;
    dprintln!(
        "Running {} executable(s) from {} on {dataset}...",
        executables.len(),
        dir.display()
    );

    let mut results = RunResults {
        dataset: dataset.to_string(),
        ..RunResults::default()
    };

    for path in &executables {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        dprintln!("  Running {name}...");
        let outcome = {
            let _timer = RunTimer::start(&name, dataset);
            run_executable(path, dataset, format)?
        };
        match outcome {
            Outcome::Runtime(runtime) => {
                vprintln!("  {name}: {runtime} s reported");
                results.runs.push(RunRecord { name, runtime });
            }
            Outcome::Rejected(reason) => {
                println!("Error running {name}: {reason}");
                results.rejected.push(Rejection { name, reason });
            }
        }
    }

    Ok(results)
}
