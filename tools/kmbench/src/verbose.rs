//! Console output levels for kmbench.
//!
//! - **Quiet** (`-q`): rejected executables, reports and chart paths only
//! - **Default**: per-executable progress as well
//! - **Verbose** (`-v`): skipped files, spawned commands and wall-clock times

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Instant;

/// Output verbosity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Quiet = 0,
    Default = 1,
    Verbose = 2,
}

impl Verbosity {
    /// Level selected by the `-q` / `-v` flags. `-q` wins if both are set.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, true) => Self::Verbose,
            (false, false) => Self::Default,
        }
    }
}

static LEVEL: AtomicU8 = AtomicU8::new(Verbosity::Default as u8);

/// Set the process-wide level. Called once from `main`.
pub fn init(level: Verbosity) {
    LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    LEVEL.load(Ordering::Relaxed) == Verbosity::Verbose as u8
}

pub fn is_quiet() -> bool {
    LEVEL.load(Ordering::Relaxed) == Verbosity::Quiet as u8
}

/// `println!` in verbose mode only.
macro_rules! vprintln {
    ($($arg:tt)*) => {
        if $crate::verbose::is_verbose() {
            println!($($arg)*);
        }
    };
}

pub(crate) use vprintln;

/// `println!` unless quiet mode is on.
macro_rules! dprintln {
    ($($arg:tt)*) => {
        if !$crate::verbose::is_quiet() {
            println!($($arg)*);
        }
    };
}

pub(crate) use dprintln;

/// Wall-clock timer for one executable run, printed on drop in verbose mode.
///
/// The wall time includes process start-up and dataset loading, so it is
/// always at least the runtime the program reports.
pub struct RunTimer<'a> {
    executable: &'a str,
    dataset: &'a str,
    start: Instant,
}

impl<'a> RunTimer<'a> {
    pub fn start(executable: &'a str, dataset: &'a str) -> Self {
        Self {
            executable,
            dataset,
            start: Instant::now(),
        }
    }
}

impl Drop for RunTimer<'_> {
    fn drop(&mut self) {
        if is_verbose() {
            println!(
                "  {} on {}: {:.1?} wall",
                self.executable,
                self.dataset,
                self.start.elapsed()
            );
        }
    }
}
