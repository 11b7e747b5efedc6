//! Command-line interface for sulog
//!
//! Positions on the command line are 1-based `LINE:COLUMN`, the way editors
//! display them; they are converted to 0-based [`Position`]s here.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use sulog_core::{Position, Selection};

/// sulog - insert and remove styled console.log statements
#[derive(Parser, Debug)]
#[command(name = "sulog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// User settings file (default: <config dir>/sulog/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a greeting to the log
    Hello {
        /// Who to greet
        name: Option<String>,
    },

    /// Insert a logging statement below the cursor line
    Insert {
        /// Document to edit (without one, nothing happens)
        file: Option<PathBuf>,

        /// Cursor line (1-based)
        #[arg(short, long, default_value_t = 1, value_name = "LINE")]
        line: usize,

        /// Selection start
        #[arg(long, value_name = "LINE:COL", requires = "to")]
        from: Option<CliPosition>,

        /// Selection end; also the cursor
        #[arg(long, value_name = "LINE:COL", requires = "from")]
        to: Option<CliPosition>,

        /// Selected text, e.g. "a, b"
        #[arg(short, long, value_name = "TEXT")]
        selection: Option<String>,

        /// Print the new document instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove inserted logging statements
    Remove {
        /// Document to clean
        file: Option<PathBuf>,

        /// Clean every script file in a workspace folder (default: the git root)
        #[arg(short, long, value_name = "DIR", conflicts_with = "file")]
        workspace: Option<Option<PathBuf>>,

        /// Report what would be removed without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the resolved configuration
    Config {
        /// Print as JSON
        #[arg(long)]
        json: bool,

        /// Create the user settings file with defaults if missing
        #[arg(long)]
        init: bool,
    },

    /// Watch the settings files and report changes
    Watch {
        /// Quiet period before reloading, and the poll interval where native
        /// file watching is unavailable
        #[arg(long, default_value_t = 500, value_name = "MS")]
        interval_ms: u64,
    },
}

/// A 1-based `LINE:COL` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CliPosition(pub Position);

impl FromStr for CliPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (line, column) = s
            .split_once(':')
            .ok_or_else(|| format!("expected LINE:COL, got {s:?}"))?;
        let line = parse_one_based(line, "line")?;
        let column = parse_one_based(column, "column")?;
        Ok(Self(Position::new(line, column)))
    }
}

fn parse_one_based(value: &str, what: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(format!("{what} must be a number starting at 1, got {value:?}")),
        Ok(n) => Ok(n - 1),
    }
}

/// Selection described by the insert flags
///
/// `--from/--to` span a range with the cursor at `--to`; otherwise the
/// cursor sits at the start of `--line`.
pub fn selection_from_args(line: usize, from: Option<CliPosition>, to: Option<CliPosition>) -> Selection {
    match (from, to) {
        (Some(CliPosition(anchor)), Some(CliPosition(active))) => Selection::new(anchor, active),
        _ => Selection::caret(Position::new(line.saturating_sub(1), 0)),
    }
}
