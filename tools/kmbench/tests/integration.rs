//! Integration tests for the kmbench binary.
//!
//! These tests invoke kmbench as a subprocess inside a scratch directory
//! populated with shell-script "benchmarks" and CSV tables.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

fn kmbench() -> Command {
    Command::new(env!("CARGO_BIN_EXE_kmbench"))
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "kmbench failed (exit={:?}):\nstdout:\n{}\nstderr:\n{}",
        output.status.code(),
        stdout_of(output),
        String::from_utf8_lossy(&output.stderr),
    );
}

/// Write an executable shell script into `dir`.
#[cfg(unix)]
fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("failed to write script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("failed to mark script executable");
    path
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
#[cfg(unix)]
fn run_excludes_executables_writing_stderr() {
    let work = tempfile::tempdir().unwrap();
    let bin = work.path().join("bin");
    std::fs::create_dir(&bin).unwrap();
    script(&bin, "fast", "echo 1.5");
    script(&bin, "broken", "echo 0.1; echo 'cannot open dataset' >&2");
    script(&bin, "slow", "echo 4.5");

    let output = kmbench()
        .args(["run", "--dataset", "points.txt", "--save-baseline", "baseline.json"])
        .current_dir(work.path())
        .stdin(Stdio::null())
        .output()
        .expect("failed to execute kmbench run");
    assert_success(&output);

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Error running broken: cannot open dataset"), "{stdout}");

    let baseline: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(work.path().join("baseline.json")).unwrap())
            .unwrap();
    let runtimes = baseline["runtimes"].as_object().unwrap();
    let mut names: Vec<_> = runtimes.keys().cloned().collect();
    names.sort();
    assert_eq!(names, vec!["fast", "slow"]);
    assert_eq!(baseline["summary"]["min"], 1.5);
    assert_eq!(baseline["summary"]["max"], 4.5);
    assert_eq!(baseline["summary"]["mean"], 3.0);

    let chart = std::fs::read(work.path().join("runtime_stats.png")).unwrap();
    assert!(chart.starts_with(PNG_SIGNATURE));
}

#[test]
fn run_with_no_executables_skips_the_chart() {
    let work = tempfile::tempdir().unwrap();
    std::fs::create_dir(work.path().join("bin")).unwrap();

    let output = kmbench()
        .args(["run", "-d", "points.txt"])
        .current_dir(work.path())
        .stdin(Stdio::null())
        .output()
        .expect("failed to execute kmbench run");
    assert_success(&output);

    assert!(stdout_of(&output).contains("No runtimes to plot."));
    assert!(!work.path().join("runtime_stats.png").exists());
}

#[test]
#[cfg(unix)]
fn run_prompts_for_dataset() {
    let work = tempfile::tempdir().unwrap();
    let bin = work.path().join("bin");
    std::fs::create_dir(&bin).unwrap();
    script(&bin, "check-arg", r#"[ "$1" = "big.txt" ] && echo 2.0 || echo "got $1" >&2"#);

    let mut child = kmbench()
        .args(["run", "--format", "json", "--no-plot"])
        .current_dir(work.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn kmbench run");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"big.txt\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert_success(&output);

    let stdout = stdout_of(&output);
    assert!(stdout.starts_with("Enter the dataset filename: "), "{stdout}");
    let json = &stdout[stdout.find('{').unwrap()..];
    let report: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(report["dataset"], "big.txt");
    assert_eq!(report["runs"][0]["runtime"], 2.0);
    assert!(report["rejected"].as_array().unwrap().is_empty());
    assert!(!work.path().join("runtime_stats.png").exists());
}

#[test]
fn run_fails_without_bin_dir() {
    let work = tempfile::tempdir().unwrap();
    let output = kmbench()
        .args(["run", "-d", "points.txt", "--bin-dir", "missing"])
        .current_dir(work.path())
        .stdin(Stdio::null())
        .output()
        .expect("failed to execute kmbench run");
    assert!(!output.status.success());
}

#[test]
#[cfg(unix)]
fn run_reads_marker_runtimes_from_config() {
    let work = tempfile::tempdir().unwrap();
    let bin = work.path().join("programs");
    std::fs::create_dir(&bin).unwrap();
    script(&bin, "kmeans", "echo 'TOTAL EXECUTION TIME = 250000'");
    std::fs::write(
        work.path().join("kmbench.toml"),
        "[run]\nbin-dir = \"programs\"\n\n[run.runtime]\nmarker = \"TOTAL EXECUTION TIME =\"\nscale = 0.000001\n",
    )
    .unwrap();

    let output = kmbench()
        .args(["-q", "run", "-d", "x.txt", "--format", "json", "--no-plot"])
        .current_dir(work.path())
        .stdin(Stdio::null())
        .output()
        .expect("failed to execute kmbench run");
    assert_success(&output);

    let report: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    let runtime = report["runs"][0]["runtime"].as_f64().unwrap();
    assert!((runtime - 0.25).abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// speedup
// ---------------------------------------------------------------------------

#[test]
fn speedup_writes_comparison_chart() {
    let work = tempfile::tempdir().unwrap();
    std::fs::write(
        work.path().join("speedup_to_s.csv"),
        "Datafile,Speedup\n100k.txt,3.2\n1M.txt,5.9\n10M.txt,7.4\n",
    )
    .unwrap();
    std::fs::write(
        work.path().join("speedup_to_bs.csv"),
        "Datafile,Speedup\n100k.txt,1.8\n1M.txt,2.7\n10M.txt,3.1\n",
    )
    .unwrap();

    let output = kmbench()
        .arg("speedup")
        .current_dir(work.path())
        .output()
        .expect("failed to execute kmbench speedup");
    assert_success(&output);

    let chart = std::fs::read(work.path().join("speedup_comparison.png")).unwrap();
    assert!(chart.starts_with(PNG_SIGNATURE));
}

#[test]
fn speedup_reports_missing_column() {
    let work = tempfile::tempdir().unwrap();
    std::fs::write(work.path().join("a.csv"), "File,Speedup\nx,1.0\n").unwrap();

    let output = kmbench()
        .args(["speedup", "--series", "a.csv=A"])
        .current_dir(work.path())
        .output()
        .expect("failed to execute kmbench speedup");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Datafile"), "{stderr}");
    assert!(!work.path().join("speedup_comparison.png").exists());
}

#[test]
fn speedup_with_header_only_tables_writes_empty_chart() {
    let work = tempfile::tempdir().unwrap();
    std::fs::write(work.path().join("speedup_to_s.csv"), "Datafile,Speedup\n").unwrap();
    std::fs::write(work.path().join("speedup_to_bs.csv"), "Datafile,Speedup\n").unwrap();

    let output = kmbench()
        .arg("speedup")
        .current_dir(work.path())
        .output()
        .expect("failed to execute kmbench speedup");
    assert_success(&output);

    let chart = std::fs::read(work.path().join("speedup_comparison.png")).unwrap();
    assert!(chart.starts_with(PNG_SIGNATURE));
}
