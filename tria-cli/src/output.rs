//! User-facing terminal messages.
//!
//! Status lines go to stdout, errors to stderr. Log events are a
//! separate channel handled by `tracing`; both follow the same [`OutputLevel`].

use console::{Emoji, style};
use std::sync::atomic::{AtomicU8, Ordering};

static LEVEL: AtomicU8 = AtomicU8::new(OutputLevel::Normal as u8);

pub static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "OK ");
pub static ERROR: Emoji<'_, '_> = Emoji("❌ ", "ERR ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");

/// How much the CLI prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OutputLevel {
    /// Errors only
    Quiet = 0,
    Normal = 1,
    /// Adds per-step details and debug logs
    Verbose = 2,
}

impl OutputLevel {
    /// Pick the level from `--quiet` / `--verbose`. Quiet wins.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            OutputLevel::Quiet
        } else if verbose {
            OutputLevel::Verbose
        } else {
            OutputLevel::Normal
        }
    }

    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub fn log_directive(&self) -> &'static str {
        match self {
            OutputLevel::Quiet => "warn",
            OutputLevel::Normal => "info",
            OutputLevel::Verbose => "debug",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => OutputLevel::Quiet,
            2 => OutputLevel::Verbose,
            _ => OutputLevel::Normal,
        }
    }
}

pub fn set_level(level: OutputLevel) {
    LEVEL.store(level as u8, Ordering::SeqCst);
}

pub fn level() -> OutputLevel {
    OutputLevel::from_u8(LEVEL.load(Ordering::SeqCst))
}

pub fn is_quiet() -> bool {
    level() == OutputLevel::Quiet
}

pub fn is_verbose() -> bool {
    level() == OutputLevel::Verbose
}

/// Print a success message (suppressed in quiet mode).
pub fn success(msg: &str) {
    if !is_quiet() {
        println!("{} {}", SUCCESS, style(msg).green());
    }
}

/// Print an info message (suppressed in quiet mode).
pub fn info(msg: &str) {
    if !is_quiet() {
        println!("{} {}", INFO, style(msg).cyan());
    }
}

/// Print an error message (never suppressed).
pub fn error(msg: &str) {
    eprintln!("{} {}", ERROR, style(msg).red().bold());
}

/// Print a `label: value` detail line (verbose only).
pub fn detail(label: &str, value: impl std::fmt::Display) {
    if is_verbose() {
        println!("   {} {}", style(format!("{}:", label)).dim(), value);
    }
}
