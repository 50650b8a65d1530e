// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod report;
pub mod watch;

use anyhow::Result;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::WatchConfig;
use crate::engine::Poller;
use crate::exec::ShellRunner;
use crate::report::ConsoleReporter;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - CLI → config resolution
/// - the console reporter
/// - the shell command runner
/// - the polling loop
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = WatchConfig::try_from(args)?;

    info!(
        targets = cfg.targets.len(),
        interval_secs = cfg.interval.as_secs(),
        digest = cfg.digest,
        rsrc = cfg.rsrc,
        "starting watch"
    );

    let reporter = ConsoleReporter::new(cfg.detailed);
    let poller = Poller::new(cfg, ShellRunner::new(), reporter);

    // Runs until the process is interrupted or an I/O error aborts the loop.
    poller.run().await?;
    Ok(())
}
