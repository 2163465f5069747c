//! Configuration loading and resolution for kmbench.
//!
//! Parses an optional `kmbench.toml`, then layers command-line flags over it.
//! Precedence is flag, then file, then built-in default.

use anyhow::{Context, Result, bail, ensure};
use kmbench_core::RuntimeFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::{RunArgs, SpeedupArgs};
use crate::verbose::vprintln;

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "kmbench.toml";

/// Top-level configuration loaded from `kmbench.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub run: RunConfig,
    pub speedup: SpeedupConfig,
}

/// `[run]` section.
#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RunConfig {
    pub bin_dir: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub runtime: Option<RuntimeConfig>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            bin_dir: PathBuf::from("bin"),
            output: PathBuf::from("runtime_stats.png"),
            width: 640,
            height: 480,
            runtime: None,
        }
    }
}

/// `[run.runtime]` section.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RuntimeConfig {
    pub marker: String,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_scale() -> f64 {
    1.0
}

/// `[speedup]` section.
#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SpeedupConfig {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub series: Vec<SeriesConfig>,
}

impl Default for SpeedupConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("speedup_comparison.png"),
            width: 1000,
            height: 600,
            series: vec![
                SeriesConfig {
                    path: PathBuf::from("speedup_to_s.csv"),
                    label: Some("Speedup to Serial".into()),
                },
                SeriesConfig {
                    path: PathBuf::from("speedup_to_bs.csv"),
                    label: Some("Speedup to Better-Serial".into()),
                },
            ],
        }
    }
}

/// `[[speedup.series]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesConfig {
    pub path: PathBuf,
    pub label: Option<String>,
}

/// Settings for `kmbench run` after merging file and flags.
#[derive(Debug)]
pub struct ResolvedRun {
    pub bin_dir: PathBuf,
    /// Chart path, or `None` when plotting is disabled.
    pub output: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    pub runtime: RuntimeFormat,
}

/// Settings for `kmbench speedup` after merging file and flags.
#[derive(Debug)]
pub struct ResolvedSpeedup {
    /// `(csv path, legend label)` pairs in plotting order.
    pub series: Vec<(PathBuf, String)>,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Load the project configuration.
///
/// An explicitly requested file must exist. Otherwise `kmbench.toml` in
/// `dir` is used if present, and built-in defaults if not.
pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<ProjectConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = dir.join(CONFIG_FILE);
            if !path.exists() {
                vprintln!("No {CONFIG_FILE} found, using defaults.");
                return Ok(ProjectConfig::default());
            }
            path
        }
    };

    vprintln!("Loading {}...", path.display());
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Parse configuration text.
pub fn parse(text: &str) -> Result<ProjectConfig> {
    let config: ProjectConfig = toml::from_str(text)?;
    Ok(config)
}

impl ProjectConfig {
    /// Merge `run` flags over the `[run]` section.
    pub fn resolve_run(&self, args: &RunArgs) -> Result<ResolvedRun> {
        let run = &self.run;
        ensure!(
            run.width > 0 && run.height > 0,
            "run chart size must be non-zero (got {}x{})",
            run.width,
            run.height
        );

        let runtime = match (&args.marker, &run.runtime) {
            (Some(marker), _) => RuntimeFormat::Marker {
                marker: marker.clone(),
                scale: args.scale.unwrap_or(1.0),
            },
            (None, Some(rt)) => RuntimeFormat::Marker {
                marker: rt.marker.clone(),
                scale: rt.scale,
            },
            (None, None) => RuntimeFormat::Bare,
        };
        if let RuntimeFormat::Marker { scale, .. } = &runtime {
            ensure!(scale.is_finite() && *scale > 0.0, "runtime scale must be positive (got {scale})");
        }

        let output = if args.no_plot {
            None
        } else {
            Some(args.output.clone().unwrap_or_else(|| run.output.clone()))
        };

        Ok(ResolvedRun {
            bin_dir: args.bin_dir.clone().unwrap_or_else(|| run.bin_dir.clone()),
            output,
            width: run.width,
            height: run.height,
            runtime,
        })
    }

    /// Merge `speedup` flags over the `[speedup]` section.
    pub fn resolve_speedup(&self, args: &SpeedupArgs) -> Result<ResolvedSpeedup> {
        let speedup = &self.speedup;
        ensure!(
            speedup.width > 0 && speedup.height > 0,
            "speedup chart size must be non-zero (got {}x{})",
            speedup.width,
            speedup.height
        );

        let series = if args.series.is_empty() {
            speedup
                .series
                .iter()
                .map(|s| {
                    let label = s.label.clone().unwrap_or_else(|| default_label(&s.path));
                    (s.path.clone(), label)
                })
                .collect()
        } else {
            args.series
                .iter()
                .map(|arg| parse_series(arg))
                .collect::<Result<Vec<_>>>()?
        };
        if series.is_empty() {
            bail!("no speedup series configured");
        }

        Ok(ResolvedSpeedup {
            series,
            output: args.output.clone().unwrap_or_else(|| speedup.output.clone()),
            width: speedup.width,
            height: speedup.height,
        })
    }
}

/// Parse a `PATH[=LABEL]` series argument.
fn parse_series(arg: &str) -> Result<(PathBuf, String)> {
    let (path, label) = match arg.split_once('=') {
        Some((path, label)) => (PathBuf::from(path), label.trim().to_string()),
        None => (PathBuf::from(arg), String::new()),
    };
    if path.as_os_str().is_empty() {
        bail!("empty path in series '{arg}'");
    }
    let label = if label.is_empty() { default_label(&path) } else { label };
    Ok((path, label))
}

/// Legend label derived from a CSV file name.
fn default_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
