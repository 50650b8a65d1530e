// src/config/validate.rs

use std::time::Duration;

use tracing::warn;

use crate::cli::CliArgs;
use crate::config::model::{WatchConfig, WatchTarget};
use crate::errors::{FwatchError, Result};

impl TryFrom<CliArgs> for WatchConfig {
    type Error = FwatchError;

    fn try_from(args: CliArgs) -> std::result::Result<Self, Self::Error> {
        validate_args(&args)?;

        let compare_atime = if args.atime && args.md5 {
            warn!("--md5 reads file contents and perturbs access times; ignoring --atime");
            false
        } else {
            args.atime
        };

        // An empty command string means "no command", same as omitting -x.
        let command = args.exec.filter(|cmd| !cmd.is_empty());

        let targets = args
            .paths
            .into_iter()
            .map(|path| WatchTarget { path })
            .collect();

        Ok(WatchConfig {
            command,
            interval: Duration::from_secs(args.interval as u64),
            compare_atime,
            digest: args.md5,
            rsrc: args.rsrc,
            beep: args.beep,
            detailed: args.detailed,
            targets,
        })
    }
}

fn validate_args(args: &CliArgs) -> Result<()> {
    if args.interval <= 0 {
        return Err(FwatchError::ConfigError(format!(
            "--interval must be a positive number of seconds (got {})",
            args.interval
        )));
    }

    if args.paths.is_empty() {
        return Err(FwatchError::ConfigError(
            "at least one path to watch must be given".to_string(),
        ));
    }

    if args.rsrc && !cfg!(target_os = "macos") {
        return Err(FwatchError::ConfigError(
            "--rsrc requires resource fork support and is only available on macOS".to_string(),
        ));
    }

    Ok(())
}
