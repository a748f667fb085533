//! Signal handling for graceful shutdown.
//!
//! A Ctrl+C sets a shared `AtomicBool`. The walker stops at the next
//! directory entry, the prompt stops after the current answer and the run
//! ends with exit code 130. Prompts block on stdin, so a second Ctrl+C
//! terminates the process immediately.
//!
//! # Usage
//!
//! ```rust,no_run
//! use dupe_remover::signal::install_handler;
//!
//! let handler = install_handler().expect("Failed to install signal handler");
//!
//! // Pass the flag to the walker and the prompt
//! let shutdown_flag = handler.get_flag();
//! ```

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Exit code for SIGINT (Ctrl+C) interruption (128 + SIGINT).
pub const EXIT_CODE_INTERRUPTED: i32 = 130;

/// Shared shutdown flag.
#[derive(Debug, Clone)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a new shutdown handler with the flag initially set to `false`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Manually request a shutdown.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Get a clone of the shutdown flag.
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Reset the shutdown flag to `false`.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl Default for ShutdownHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Error type for signal handler installation.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// Failed to install the Ctrl+C handler.
    #[error("Failed to install signal handler: {0}")]
    InstallFailed(#[from] ctrlc::Error),
}

static GLOBAL_HANDLER: OnceLock<ShutdownHandler> = OnceLock::new();

/// Install a Ctrl+C handler that sets the shutdown flag on interrupt.
///
/// Calling it again returns the already installed handler with its flag
/// reset.
///
/// # Errors
///
/// Returns [`SignalError`] if the handler cannot be registered.
pub fn install_handler() -> Result<ShutdownHandler, SignalError> {
    if let Some(handler) = GLOBAL_HANDLER.get() {
        handler.reset();
        return Ok(handler.clone());
    }

    let handler = ShutdownHandler::new();
    let flag = handler.get_flag();

    ctrlc::set_handler(move || {
        if flag.swap(true, Ordering::SeqCst) {
            // Second interrupt: a prompt may be blocked on stdin
            let _ = writeln!(std::io::stderr(), "\nInterrupted again. Exiting.");
            std::process::exit(EXIT_CODE_INTERRUPTED);
        }

        let _ = writeln!(
            std::io::stderr(),
            "\nInterrupted. Finishing current step (Ctrl+C again to quit)..."
        );
        let _ = std::io::stderr().flush();

        log::info!("Shutdown signal received");
    })?;

    let _ = GLOBAL_HANDLER.set(handler.clone());
    Ok(handler)
}
