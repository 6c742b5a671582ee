//! Global scaffolding options.
//!
//! [`Options`] captures the operator's intent for one run: what the project
//! is called, where it goes, and whether to install dependencies and
//! initialise version control. It is constructed once per invocation and
//! shared by read-only reference with every preset — presets never mutate it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Immutable per-run scaffolding options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    name: String,
    target_directory: PathBuf,
    install_dependencies: bool,
    initialize_vcs: bool,
}

impl Options {
    /// Create validated options.
    ///
    /// The name must be non-empty and filesystem-safe: no path separators,
    /// no leading dot, no characters that are reserved on common platforms.
    pub fn new(
        name: impl Into<String>,
        target_directory: impl Into<PathBuf>,
        install_dependencies: bool,
        initialize_vcs: bool,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            target_directory: target_directory.into(),
            install_dependencies,
            initialize_vcs,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target_directory(&self) -> &Path {
        &self.target_directory
    }

    pub fn install_dependencies(&self) -> bool {
        self.install_dependencies
    }

    pub fn initialize_vcs(&self) -> bool {
        self.initialize_vcs
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidName {
        name: name.into(),
        reason: reason.into(),
    };

    if name.is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name.starts_with('.') {
        return Err(invalid("name cannot start with '.'"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid("name cannot contain path separators"));
    }
    if name
        .chars()
        .any(|c| matches!(c, ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control())
    {
        return Err(invalid("name contains characters unsafe for filesystems"));
    }
    Ok(())
}
