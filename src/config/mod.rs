// src/config/mod.rs

//! Configuration resolution.
//!
//! The command line is the only configuration source. [`validate`] turns the
//! parsed [`CliArgs`](crate::cli::CliArgs) into a checked [`WatchConfig`]
//! before the polling loop starts; flag interactions (e.g. `--md5`
//! suppressing access-time comparison) are resolved there, once.

pub mod model;
pub mod validate;

pub use model::{WatchConfig, WatchTarget};
