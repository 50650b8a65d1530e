// src/exec/mod.rs

//! Command execution layer.
//!
//! The polling loop talks to a [`CommandRunner`] instead of spawning
//! processes directly. This makes it easy to swap in a recording fake in
//! tests while keeping the production shell invocation in [`ShellRunner`].
//!
//! Execution is synchronous from the loop's point of view: the runner is
//! awaited to completion before the next target is checked. The command's
//! exit status is logged and otherwise ignored; triggering is
//! fire-and-forget.

use std::future::Future;
use std::pin::Pin;

use anyhow::Context;
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::Result;

/// Trait abstracting how the configured command is executed.
///
/// Production code uses [`ShellRunner`]; tests can provide their own
/// implementation that records invocations instead of spawning processes.
pub trait CommandRunner: Send {
    fn run(&mut self, command: &str) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Runs the configured command string via the platform shell.
///
/// The string is passed through verbatim; no arguments are substituted.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ShellRunner {
    fn run(&mut self, command: &str) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let command = command.to_string();

        Box::pin(async move {
            info!(cmd = %command, "running command");

            // Build a shell command appropriate for the platform.
            let mut cmd = if cfg!(windows) {
                let mut c = Command::new("cmd");
                c.arg("/C").arg(&command);
                c
            } else {
                let mut c = Command::new("sh");
                c.arg("-c").arg(&command);
                c
            };

            // Stdio is inherited: the command's output lands on the user's
            // terminal alongside the reports.
            let status = cmd
                .status()
                .await
                .with_context(|| format!("spawning command '{command}'"))?;

            // Exit status is deliberately not acted on.
            debug!(cmd = %command, exit_code = status.code(), "command exited");
            Ok(())
        })
    }
}
