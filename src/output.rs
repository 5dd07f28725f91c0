// src/output.rs

//! Console output styling
//!
//! List-mode output is human-oriented text on stdout; diagnostics go through
//! `tracing` on stderr. The color scheme is chosen once from the run
//! configuration and passed to the printing functions, there is no global
//! style state.

use crate::backup::BackupRecord;
use clap::ValueEnum;
use std::io::{self, IsTerminal, Write};

const NC: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const WARN_PREFIX: &str = "\x1b[1;33m::\x1b[0m";

/// When to emit ANSI colors
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorWhen {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

/// Resolved ANSI prefixes for the run
pub struct ColorScheme {
    pub pkg: &'static str,
    pub warn: &'static str,
    pub nc: &'static str,
}

impl ColorScheme {
    pub fn new(when: ColorWhen) -> Self {
        let colored = match when {
            ColorWhen::Always => true,
            ColorWhen::Never => false,
            ColorWhen::Auto => std::io::stdout().is_terminal(),
        };

        if colored {
            Self {
                pkg: BOLD,
                warn: WARN_PREFIX,
                nc: NC,
            }
        } else {
            Self {
                pkg: "",
                warn: "warning:",
                nc: "",
            }
        }
    }
}

/// Write one record's status block to `out`
///
/// `<package> <system path>` followed by either a not-tracked note or, when
/// the archived copy has diverged, a warning with both digests. Callers pass
/// a locked stdout; tests pass a buffer.
pub fn print_status<W: Write>(
    out: &mut W,
    record: &BackupRecord,
    colors: &ColorScheme,
) -> io::Result<()> {
    writeln!(
        out,
        "{}{}{} {}",
        colors.pkg,
        record.package,
        colors.nc,
        record.system.path.display()
    )?;

    match &record.local {
        None => writeln!(out, "  file not locally tracked")?,
        Some(local) if record.is_diverged() => {
            writeln!(out, "  {} hashes don't match!", colors.warn)?;
            writeln!(out, "     {}\n     {}", record.system.hash, local.hash)?;
        }
        Some(_) => {}
    }

    Ok(())
}
