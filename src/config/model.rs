// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use crate::watch::{DetectOptions, SnapshotOptions};

/// One watched path, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    pub path: PathBuf,
}

/// Validated runtime configuration.
///
/// Construct via `WatchConfig::try_from(CliArgs)` so every instance has
/// already passed validation.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Shell command run after every detected per-target change.
    pub command: Option<String>,

    /// Suspension between polling cycles.
    pub interval: Duration,

    /// Compare access times. Always false when `digest` is set: digesting
    /// reads file contents and perturbs the access time itself.
    pub compare_atime: bool,

    /// Track an MD5 digest of each stream's content.
    pub digest: bool,

    /// Track the resource fork of each target as a secondary stream.
    pub rsrc: bool,

    /// Ring the terminal bell at the end of a cycle that saw changes.
    pub beep: bool,

    /// Timestamp prefixes + long listing in reports.
    pub detailed: bool,

    /// Watched paths, in command-line order.
    pub targets: Vec<WatchTarget>,
}

impl WatchConfig {
    /// Options handed to the snapshot builder each observation.
    pub fn snapshot_options(&self) -> SnapshotOptions {
        SnapshotOptions {
            digest: self.digest,
            rsrc: self.rsrc,
        }
    }

    /// Options handed to the change detector each comparison.
    pub fn detect_options(&self) -> DetectOptions {
        DetectOptions {
            digest: self.digest,
            atime: self.compare_atime,
        }
    }
}
