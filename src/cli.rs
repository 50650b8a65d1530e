// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `fwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "fwatch",
    version,
    about = "Poll files for changes and run a command when they change.",
    long_about = None
)]
pub struct CliArgs {
    /// Command to run (via the shell) each time a watched path changes.
    #[arg(short = 'x', long = "exec", value_name = "COMMAND")]
    pub exec: Option<String>,

    /// Seconds to sleep between polling cycles.
    #[arg(
        short,
        long,
        value_name = "SECONDS",
        default_value_t = 1,
        allow_negative_numbers = true
    )]
    pub interval: i64,

    /// Compare access times (ignored when --md5 is enabled).
    #[arg(short, long)]
    pub atime: bool,

    /// Track an MD5 digest of file contents; disables access-time comparison.
    #[arg(short, long)]
    pub md5: bool,

    /// Also track the resource fork of each watched path.
    #[arg(short, long)]
    pub rsrc: bool,

    /// Ring the terminal bell at the end of any cycle that saw changes.
    #[arg(short, long)]
    pub beep: bool,

    /// Detailed reports: timestamps plus a long listing of changed paths.
    #[arg(short, long)]
    pub detailed: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Paths to watch.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
