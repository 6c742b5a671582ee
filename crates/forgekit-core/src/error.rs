//! Unified error handling for forgekit-core.
//!
//! This module provides a unified error type that wraps domain and
//! application errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for forgekit-core operations.
///
/// This enum wraps all possible errors that can occur when using the core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum ForgeError {
    /// Errors from the domain layer (planning-phase; nothing was written).
    #[error("Planning error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (execution-phase; a partial tree
    /// may remain).
    #[error("Execution error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl ForgeError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in forgekit".into(),
                "Please report it at: https://github.com/forgekit/forgekit/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Conflict => ErrorCategory::Conflict,
                crate::domain::ErrorCategory::PathEscape => ErrorCategory::PathEscape,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether the target tree is guaranteed untouched after this error.
    pub fn is_planning_failure(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    PathEscape,
    Io,
    Command,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type ForgeResult<T> = Result<T, ForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_are_planning_failures() {
        let err = ForgeError::Domain(DomainError::EmptyPath);
        assert!(err.is_planning_failure());
        assert_eq!(err.category(), ErrorCategory::PathEscape);
    }

    #[test]
    fn application_errors_are_not_planning_failures() {
        let err = ForgeError::Application(ApplicationError::CommandFailed {
            command: "npm run format".into(),
            code: 1,
        });
        assert!(!err.is_planning_failure());
        assert_eq!(err.category(), ErrorCategory::Command);
    }

    #[test]
    fn suggestions_are_never_empty() {
        let errors = [
            ForgeError::Domain(DomainError::EmptyPath),
            ForgeError::Configuration {
                message: "bad".into(),
            },
            ForgeError::Internal {
                message: "bug".into(),
            },
        ];
        for err in errors {
            assert!(!err.suggestions().is_empty());
        }
    }
}
