// src/engine/poller.rs

use std::fmt;

use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::{WatchConfig, WatchTarget};
use crate::errors::Result;
use crate::exec::CommandRunner;
use crate::report::Reporter;
use crate::watch::{build_snapshot, detect_changes, Snapshot};

/// One watched target plus the most recent snapshot taken of it.
///
/// `last` is `None` only before [`Poller::init`] has run; afterwards every
/// entry always holds a snapshot (an `Absent` one if the path is missing),
/// and it is overwritten wholesale at the end of every cycle.
struct WatchEntry {
    target: WatchTarget,
    last: Option<Snapshot>,
}

/// Drives the snapshot/diff cycle over all configured targets.
///
/// The poller is the single owner of the watch state; nothing else reads or
/// writes the stored snapshots. Targets are checked sequentially in
/// configured order, and the configured command (if any) runs to completion
/// immediately after each changed target, before the next one is checked.
pub struct Poller<C: CommandRunner, R: Reporter> {
    config: WatchConfig,
    entries: Vec<WatchEntry>,
    runner: C,
    reporter: R,
}

impl<C: CommandRunner, R: Reporter> fmt::Debug for Poller<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poller")
            .field("config", &self.config)
            .field("targets", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<C: CommandRunner, R: Reporter> Poller<C, R> {
    pub fn new(config: WatchConfig, runner: C, reporter: R) -> Self {
        let entries = config
            .targets
            .iter()
            .cloned()
            .map(|target| WatchEntry { target, last: None })
            .collect();

        Self {
            config,
            entries,
            runner,
            reporter,
        }
    }

    /// Take the initial snapshot of every target and report its state.
    ///
    /// Missing targets are recorded as `Absent` entries; they stay in the
    /// watch set for the lifetime of the process.
    pub fn init(&mut self) -> Result<()> {
        let options = self.config.snapshot_options();

        for entry in &mut self.entries {
            let snapshot = build_snapshot(&entry.target.path, options)?;
            self.reporter.initial_state(&entry.target, &snapshot);
            entry.last = Some(snapshot);
        }

        Ok(())
    }

    /// One steady-state pass over all targets.
    ///
    /// Returns how many targets changed this cycle. The stored snapshot is
    /// replaced for every target, changed or not.
    pub async fn run_cycle(&mut self) -> Result<usize> {
        let snapshot_options = self.config.snapshot_options();
        let detect_options = self.config.detect_options();
        let mut changed = 0usize;

        for entry in &mut self.entries {
            let current = build_snapshot(&entry.target.path, snapshot_options)?;
            let report = detect_changes(entry.last.as_ref(), &current, detect_options);

            if report.is_changed() {
                info!(
                    path = %entry.target.path.display(),
                    reasons = ?report.kinds(),
                    "change detected"
                );
                self.reporter.change(&entry.target, &report, &current);

                if let Some(command) = &self.config.command {
                    self.runner.run(command).await?;
                }
                changed += 1;
            }

            entry.last = Some(current);
        }

        if changed > 0 && self.config.beep {
            self.reporter.alert();
        }

        debug!(changed, "cycle complete");
        Ok(changed)
    }

    /// Run forever: initial snapshots, then sleep/check cycles until the
    /// process is interrupted or an I/O error aborts the loop.
    pub async fn run(mut self) -> Result<()> {
        self.init()?;

        loop {
            sleep(self.config.interval).await;
            self.run_cycle().await?;
        }
    }
}
