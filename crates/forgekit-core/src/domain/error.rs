// ============================================================================
// domain/error.rs - PLANNING-PHASE ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Every variant is raised *before* any filesystem mutation: a run that fails
/// with a `DomainError` leaves the target directory untouched.
///
/// All errors are:
/// - Cloneable (plans are rebuilt freely)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Required selection '{id}' is missing")]
    MissingSelection { id: String },

    #[error("'{answer}' is not a valid choice for '{id}'")]
    InvalidSelection { id: String, answer: String },

    #[error("Invalid style kind: {0}")]
    InvalidStyleKind(String),

    // ========================================================================
    // Conflict Errors
    // ========================================================================
    #[error("presets '{first}' and '{second}' both contribute '{path}' with different content")]
    FileConflict {
        path: String,
        first: String,
        second: String,
    },

    #[error("preset '{preset}' shadows reserved template variable '{key}'")]
    ReservedVariable { key: String, preset: String },

    #[error(
        "package '{package}' is requested at conflicting versions: '{first}' vs '{second}'"
    )]
    DependencyVersionConflict {
        package: String,
        first: String,
        second: String,
    },

    // ========================================================================
    // Path Containment Errors
    // ========================================================================
    #[error("path '{path}' escapes the target directory")]
    PathEscape { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Empty paths not allowed")]
    EmptyPath,
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "Use alphanumeric characters, hyphens, and underscores".into(),
                "Examples: my-module, token-tools, dice5e".into(),
            ],
            Self::MissingSelection { id } => vec![
                format!("The '{}' prompt was not answered", id),
                "Re-run interactively, or pass --defaults for the preset defaults".into(),
            ],
            Self::FileConflict { path, first, second } => vec![
                format!("'{}' and '{}' disagree about '{}'", first, second, path),
                "Remove one of the conflicting presets from the run".into(),
            ],
            Self::DependencyVersionConflict { package, first, second } => vec![
                format!("'{}' is pinned to both '{}' and '{}'", package, first, second),
                "Align the preset dependency tables on a single version".into(),
            ],
            Self::PathEscape { path } | Self::AbsolutePathNotAllowed { path } => vec![
                format!("Contributed path: {}", path),
                "Preset file paths must stay relative to the target directory".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. }
            | Self::MissingSelection { .. }
            | Self::InvalidSelection { .. }
            | Self::InvalidStyleKind(_) => ErrorCategory::Validation,
            Self::FileConflict { .. }
            | Self::ReservedVariable { .. }
            | Self::DependencyVersionConflict { .. } => ErrorCategory::Conflict,
            Self::PathEscape { .. } | Self::AbsolutePathNotAllowed { .. } | Self::EmptyPath => {
                ErrorCategory::PathEscape
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    PathEscape,
}
