//! dupe-remover - Duplicate File Remover
//!
//! Recursively scans a directory, reports files sharing a name and size as
//! duplicate groups, and optionally walks the user through deleting the
//! copies. Content is never compared.

pub mod actions;
pub mod cli;
pub mod config;
pub mod context;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod scanner;
pub mod signal;

use std::io::IsTerminal;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::actions::{ConsolePrompt, DeletionPrompt, Prompt, PromptError};
use crate::cli::Cli;
use crate::config::Config;
use crate::context::ScanContext;
use crate::error::ExitCode;
use crate::scanner::ScanError;
use crate::signal::ShutdownHandler;

/// Run the application with parsed CLI arguments on the real console.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the signal handler
/// cannot be installed, or the console cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    if cli.no_color || !std::io::stdout().is_terminal() {
        yansi::disable();
    }

    let config = Config::load(cli.config.as_deref())?.merge_cli(&cli);
    log::debug!("Resolved configuration: {:?}", config);

    let shutdown = signal::install_handler().context("Failed to set up Ctrl+C handling")?;

    run(&config, ConsolePrompt::stdio(), &shutdown)
}

/// Scan, group and review according to `config`, talking through `prompt`.
///
/// A failed scan prints a notice, waits `exit_delay_secs` and returns
/// [`ExitCode::ScanFailed`] without reporting any group.
///
/// # Errors
///
/// Returns an error if the console cannot be written.
pub fn run<P: Prompt>(
    config: &Config,
    mut prompt: P,
    shutdown: &ShutdownHandler,
) -> Result<ExitCode> {
    let mut context = ScanContext::from_config(config).with_shutdown_flag(shutdown.get_flag());

    match context.scan() {
        Ok(_) => {}
        Err(ScanError::Interrupted) => return Ok(ExitCode::Interrupted),
        Err(e) => {
            log::debug!("Scan of {} failed: {}", context.root().display(), e);
            prompt.write_line(&format!(
                "Can't read directory. App will close in {} seconds.",
                config.exit_delay_secs
            ))?;
            thread::sleep(Duration::from_secs(config.exit_delay_secs));
            return Ok(ExitCode::ScanFailed);
        }
    }

    let mut deletion = DeletionPrompt::new(prompt, context.delete_enabled())
        .with_shutdown_flag(shutdown.get_flag());

    match context.review_all(&mut deletion) {
        Ok(summary) => {
            deletion.into_prompt().write_line(&summary.summary())?;
            Ok(ExitCode::Success)
        }
        Err(PromptError::Interrupted) => Ok(ExitCode::Interrupted),
        Err(e) => Err(e.into()),
    }
}
