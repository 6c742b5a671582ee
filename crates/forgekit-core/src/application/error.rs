//! Application layer errors.
//!
//! These errors represent failures during plan execution or port access,
//! not business logic. Planning failures are `DomainError` from
//! `crate::domain` and always precede any filesystem mutation; the variants
//! here can leave a partially materialized tree behind (no rollback — the
//! operator inspects and resumes manually).

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while executing a merged plan.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },

    /// Template rendering failed (unknown template, render error).
    #[error("Failed to render template '{template}': {reason}")]
    RenderFailed { template: String, reason: String },

    /// A post-installation command or package-manager invocation exited
    /// non-zero. Remaining commands are not run.
    #[error("Command '{command}' failed with exit code {code}")]
    CommandFailed { command: String, code: i32 },

    /// Dependency installation failed before an exit code was available
    /// (e.g. the package manager binary is missing).
    #[error("Dependency installation failed: {reason}")]
    InstallFailed { reason: String },

    /// The interactive prompt collaborator failed (terminal closed, etc.).
    #[error("Prompt failed: {reason}")]
    PromptFailed { reason: String },

    /// Target project directory already exists.
    #[error("Target already exists at {path}")]
    TargetExists { path: PathBuf },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
                "Already-written files are left in place for inspection".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("Command was: {}", command),
                "Fix the underlying tool and re-run the remaining steps manually".into(),
            ],
            Self::InstallFailed { .. } => vec![
                "Ensure npm is installed and on your PATH".into(),
                "Re-run with --no-install to scaffold without dependencies".into(),
            ],
            Self::TargetExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                format!("Or remove it: rm -rf {}", path.display()),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Filesystem { .. } | Self::RenderFailed { .. } => ErrorCategory::Io,
            Self::CommandFailed { .. } | Self::InstallFailed { .. } => ErrorCategory::Command,
            Self::PromptFailed { .. } => ErrorCategory::Internal,
            Self::TargetExists { .. } => ErrorCategory::Validation,
        }
    }
}
