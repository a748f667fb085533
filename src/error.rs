//! Exit codes and error reporting at the process boundary.

use crate::actions::PromptError;
use crate::scanner::ScanError;

/// Exit codes for the dupe-remover application.
///
/// - 0: Success (every group was processed)
/// - 1: General error (unexpected failure)
/// - 2: Scan failed (the directory tree could not be read)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success: all groups were listed or reviewed.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// Scan failed: a directory or file could not be read.
    ScanFailed = 2,
    /// Interrupted: The run was interrupted by the user (Ctrl+C).
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DR000",
            Self::GeneralError => "DR001",
            Self::ScanFailed => "DR002",
            Self::Interrupted => "DR130",
        }
    }

    /// Exit code for an error that escaped the run.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        let interrupted = err
            .downcast_ref::<ScanError>()
            .is_some_and(|e| matches!(e, ScanError::Interrupted))
            || err
                .downcast_ref::<PromptError>()
                .is_some_and(|e| matches!(e, PromptError::Interrupted));

        if interrupted {
            Self::Interrupted
        } else if err.downcast_ref::<ScanError>().is_some() {
            Self::ScanFailed
        } else {
            Self::GeneralError
        }
    }
}
