// src/report/mod.rs

//! Report rendering.
//!
//! All user-facing report text is produced here; the change detector only
//! hands over enumerated tags. Reports go to stdout, diagnostics to the
//! tracing subscriber on stderr. The [`Reporter`] trait exists so the
//! polling loop can be driven against a recording implementation in tests.

use std::io::Write;
use std::process::Command;

use time::macros::format_description;
use time::OffsetDateTime;
use tracing::warn;

use crate::config::WatchTarget;
use crate::watch::{ChangeReport, Snapshot};

/// Sink for everything the polling loop wants to tell the user.
pub trait Reporter: Send {
    /// Initial observation of a target, before the steady-state loop starts.
    fn initial_state(&mut self, target: &WatchTarget, snapshot: &Snapshot);

    /// A non-empty change report for one target.
    fn change(&mut self, target: &WatchTarget, report: &ChangeReport, current: &Snapshot);

    /// End-of-cycle audible alert.
    fn alert(&mut self);
}

/// Writes reports to stdout.
///
/// In detailed mode every line is prefixed with a local timestamp and each
/// changed path that still exists gets an `ls -l` long listing.
pub struct ConsoleReporter {
    detailed: bool,
}

impl ConsoleReporter {
    pub fn new(detailed: bool) -> Self {
        Self { detailed }
    }

    fn prefix(&self) -> String {
        if self.detailed {
            format!("[{}] ", local_timestamp())
        } else {
            String::new()
        }
    }

    fn long_listing(&self, target: &WatchTarget) {
        // The path is a single argv element, never a shell token, so names
        // starting with whitespace or `-` list correctly.
        let status = Command::new("ls").arg("-l").arg(&target.path).status();
        if let Err(err) = status {
            warn!(path = %target.path.display(), error = %err, "long listing failed");
        }
    }
}

impl Reporter for ConsoleReporter {
    fn initial_state(&mut self, target: &WatchTarget, snapshot: &Snapshot) {
        let state = if snapshot.exists() {
            "stored info"
        } else {
            "non-existent"
        };
        println!("{}{}: {}", self.prefix(), target.path.display(), state);
    }

    fn change(&mut self, target: &WatchTarget, report: &ChangeReport, current: &Snapshot) {
        let reasons: Vec<&str> = report.kinds().iter().map(|kind| kind.as_tag()).collect();
        println!(
            "{}{}: {}",
            self.prefix(),
            target.path.display(),
            reasons.join(", ")
        );

        if self.detailed && current.exists() {
            self.long_listing(target);
        }
    }

    fn alert(&mut self) {
        print!("\x07");
        let _ = std::io::stdout().flush();
    }
}

fn local_timestamp() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))
    .unwrap_or_default()
}
