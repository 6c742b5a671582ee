//! The preset contribution contract.
//!
//! A preset is a pluggable contributor of files, dependencies, and setup
//! steps for one project flavour. The materializer depends only on this
//! trait — adding a new flavour never touches the merge logic.

use std::collections::BTreeMap;

use tracing::instrument;

use crate::domain::{ContributionBundle, PackageSpec, TargetPath, TemplatePath, TemplateVars};
use crate::error::ForgeResult;

/// The contract every preset variant implements.
///
/// Absence is an empty mapping or list, never an error; `Err` is reserved
/// for genuine failures while producing a contribution. Contributions must
/// be pure functions of the preset's frozen construction-time state, so
/// calling a method twice yields equal results.
pub trait Preset: Send + Sync {
    /// Stable identifier, used in conflict reports and logs.
    fn id(&self) -> &'static str;

    /// Files to create with literal content.
    fn programmatic_files(&self) -> ForgeResult<BTreeMap<TargetPath, String>>;

    /// Files rendered from template assets.
    fn template_files(&self) -> ForgeResult<BTreeMap<TargetPath, TemplatePath>>;

    /// Variables for the global template context, in addition to the
    /// reserved options-derived keys.
    fn template_variables(&self) -> ForgeResult<TemplateVars>;

    /// Directories to create even when no file lands in them.
    fn additional_directories(&self) -> ForgeResult<Vec<TargetPath>>;

    /// Runtime dependencies to install.
    fn dependencies(&self) -> ForgeResult<Vec<PackageSpec>>;

    /// Development dependencies to install.
    fn dev_dependencies(&self) -> ForgeResult<Vec<PackageSpec>>;

    /// Shell commands to run after installation completes, in order.
    fn post_install_commands(&self) -> ForgeResult<Vec<String>>;
}

/// Snapshot a preset's contributions for one run.
///
/// The bundle is captured once and the preset is not consulted again, so a
/// plan can be re-derived or inspected without re-running preset logic.
#[instrument(skip_all, fields(preset = preset.id()))]
pub fn collect_bundle(preset: &dyn Preset) -> ForgeResult<ContributionBundle> {
    Ok(ContributionBundle {
        preset_id: preset.id().into(),
        programmatic_files: preset.programmatic_files()?,
        template_files: preset.template_files()?,
        template_variables: preset.template_variables()?,
        additional_directories: preset.additional_directories()?,
        dependencies: preset.dependencies()?,
        dev_dependencies: preset.dev_dependencies()?,
        post_install_commands: preset.post_install_commands()?,
    })
}
