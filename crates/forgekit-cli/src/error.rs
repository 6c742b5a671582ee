//! Comprehensive error handling for the forgekit CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::{error::Error, fmt::Write as _};

use owo_colors::OwoColorize;
use thiserror::Error;

use forgekit_core::error::{ErrorCategory as CoreCategory, ForgeError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Comprehensive CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input (validation failed).
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Project name validation failed.
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `forgekit-core`.
    ///
    /// Wrapped here so that the CLI can attach suggestions drawn from the
    /// core error's category without touching core internals.
    #[error("Scaffolding failed: {0}")]
    Core(#[from] ForgeError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Operation cancelled by user.
    #[error("Operation cancelled")]
    Cancelled,

    /// Feature not available (e.g., interactive mode without feature flag).
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message } => vec![
                format!("Check your input: {}", message),
                "Use --help for usage information".into(),
            ],

            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "Use alphanumeric characters, hyphens, and underscores".into(),
                "Examples: my-module, token-tools, dice5e".into(),
            ],

            Self::ConfigError { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your config file path or remove it to use defaults".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Check available disk space".into(),
            ],

            Self::Cancelled => vec![
                "Operation was cancelled".into(),
                "No changes were made".into(),
            ],

            Self::FeatureNotAvailable { feature } => vec![
                format!("The '{}' feature is not available in this build", feature),
                "Reinstall with the feature enabled, or pass --defaults".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::InvalidProjectName { .. } | Self::Cancelled => {
                ErrorCategory::UserError
            }
            Self::ConfigError { .. } | Self::FeatureNotAvailable { .. } => {
                ErrorCategory::Configuration
            }
            Self::Core(core) => match core.category() {
                CoreCategory::Validation
                | CoreCategory::Conflict
                | CoreCategory::PathEscape => ErrorCategory::UserError,
                CoreCategory::Io | CoreCategory::Command | CoreCategory::Internal => {
                    ErrorCategory::Internal
                }
                CoreCategory::Configuration => ErrorCategory::Configuration,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        let _ = write!(output, "\n{} {}\n\n", "✗".red().bold(), "Error:".red().bold());
        let _ = writeln!(output, "  {}", self.to_string().red());

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                let _ = writeln!(output, "\n  {} {}", "→".dimmed(), err.to_string().dimmed());
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = writeln!(output, "\n{}", "Suggestions:".yellow().bold());
            for suggestion in suggestions {
                let _ = writeln!(output, "  {suggestion}");
            }
        }

        if !verbose {
            let _ = writeln!(
                output,
                "\n{} {}",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            );
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`] — no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\nError: {self}");

        if verbose {
            let mut src = std::error::Error::source(self);
            while let Some(err) = src {
                let _ = writeln!(out, "  Caused by: {err}");
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                let _ = writeln!(out, "  {s}");
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments, conflicts).
    UserError,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}
