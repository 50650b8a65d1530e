// src/engine/mod.rs

//! Polling engine.
//!
//! [`Poller`] owns the watched targets and their most recent snapshots and
//! drives the snapshot → detect → report/execute cycle. Side effects go
//! through the [`CommandRunner`](crate::exec::CommandRunner) and
//! [`Reporter`](crate::report::Reporter) traits so tests can drive the loop
//! with recording fakes instead of real processes and terminals.

pub mod poller;

pub use poller::Poller;
