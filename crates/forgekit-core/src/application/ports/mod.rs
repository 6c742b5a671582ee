//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the materialization engine needs from external
//! collaborators. The `forgekit-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{PackageSpec, TemplatePath, TemplateVars};
use crate::error::ForgeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `forgekit_adapters::filesystem::LocalFilesystem` (production)
/// - `forgekit_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Operations either fully succeed or report a typed failure; no
/// partial-write recovery happens behind this port.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for template rendering.
///
/// Given a template path and a variable mapping, produce rendered text.
/// Missing optional variables must render as empty rather than failing;
/// only an unknown template or an I/O problem is an error.
///
/// Implemented by:
/// - `forgekit_adapters::renderer::EmbeddedRenderer` (built-in assets)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &TemplatePath, vars: &TemplateVars) -> ForgeResult<String>;
}

/// Port for package installation and post-install commands.
///
/// Implemented by:
/// - `forgekit_adapters::command::NpmPackageManager` (production)
/// - `forgekit_adapters::command::RecordingPackageManager` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait PackageManager: Send + Sync {
    /// Install the merged dependency lists into the project at `root`.
    fn install(
        &self,
        root: &Path,
        dependencies: &[PackageSpec],
        dev_dependencies: &[PackageSpec],
    ) -> ForgeResult<()>;

    /// Run one shell command inside `root`; non-zero exit is
    /// `ApplicationError::CommandFailed`.
    fn run(&self, root: &Path, command: &str) -> ForgeResult<()>;
}

// ── Prompting ─────────────────────────────────────────────────────────────────

/// One selectable choice in a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    /// Stable identifier the preset validates against.
    pub value: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Pre-selected in checkbox prompts.
    pub checked: bool,
}

impl Choice {
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self {
            value,
            label,
            checked: false,
        }
    }

    pub const fn checked(value: &'static str, label: &'static str) -> Self {
        Self {
            value,
            label,
            checked: true,
        }
    }
}

/// A checkbox (multi-select) prompt specification.
#[derive(Debug, Clone)]
pub struct MultiSelectPrompt {
    pub id: &'static str,
    pub message: &'static str,
    pub choices: Vec<Choice>,
}

/// A list (single-select) prompt specification.
#[derive(Debug, Clone)]
pub struct SelectPrompt {
    pub id: &'static str,
    pub message: &'static str,
    pub choices: Vec<Choice>,
}

/// Port for interactive selection.
///
/// Implementations return the *raw* answers; presets validate them against
/// the declared choice set before accepting them, so a misbehaving adapter
/// cannot smuggle in an unknown value.
///
/// Implemented by:
/// - `forgekit_adapters::prompter::TerminalPrompter` (dialoguer)
/// - `forgekit_adapters::prompter::ScriptedPrompter` (testing / automation)
#[cfg_attr(test, mockall::automock)]
pub trait Prompter: Send + Sync {
    /// Ask a checkbox question; returns the selected choice values.
    fn multi_select(&self, prompt: &MultiSelectPrompt) -> ForgeResult<Vec<String>>;

    /// Ask a list question; returns the selected choice value.
    fn select(&self, prompt: &SelectPrompt) -> ForgeResult<String>;
}
