// src/watch/mod.rs

//! Snapshotting and change detection.
//!
//! This module is the change-detection core:
//! - [`snapshot`] observes a path's current state (metadata, optional
//!   content digest, optional resource fork).
//! - [`detect`] diffs two observations into an ordered list of change tags.
//! - [`digest`] computes content digests.
//!
//! It knows nothing about scheduling, reporting, or command execution; the
//! polling loop in `engine` drives it.

pub mod detect;
pub mod digest;
pub mod snapshot;

pub use detect::{detect_changes, ChangeKind, ChangeReport, DetectOptions};
pub use digest::{digest_file, DIRECTORY_DIGEST};
pub use snapshot::{
    build_snapshot, resource_fork_path, Snapshot, SnapshotOptions, StreamMeta,
};
