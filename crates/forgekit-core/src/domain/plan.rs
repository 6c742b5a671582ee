//! Contribution bundles and the merged materialization plan.
//!
//! Planning is pure: [`MergedPlan::merge`] folds any number of
//! [`ContributionBundle`]s into a single conflict-checked plan without
//! touching the filesystem. Execution (the application layer) consumes the
//! plan through ports. Ordered collections (`BTreeMap`/`BTreeSet`) make
//! repeated planning structurally identical and execution deterministic.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::dependencies::{PackageSpec, merge_dependencies};
use super::error::DomainError;
use super::options::Options;
use super::paths::{TargetPath, TemplatePath};

/// Template-variable keys injected from [`Options`]; presets must not
/// shadow them.
pub const RESERVED_VARIABLES: &[&str] = &["name", "install_dependencies", "initialize_vcs"];

/// Name of the placeholder file written into otherwise-empty directories
/// when version-control initialisation is requested.
pub const PLACEHOLDER_FILE: &str = ".gitkeep";

// ── Template variables ────────────────────────────────────────────────────────

/// A template variable value.
///
/// Booleans render "truthy or empty" so that a substitution-only renderer
/// can treat an absent or disabled flag identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateValue {
    Bool(bool),
    Str(String),
}

impl TemplateValue {
    /// The text substituted into templates.
    pub fn render(&self) -> &str {
        match self {
            Self::Bool(true) => "true",
            Self::Bool(false) => "",
            Self::Str(s) => s,
        }
    }
}

impl From<bool> for TemplateValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for TemplateValue {
    fn from(s: &str) -> Self {
        Self::Str(s.into())
    }
}

impl From<String> for TemplateValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

/// The unified variable namespace handed to the template renderer.
pub type TemplateVars = BTreeMap<String, TemplateValue>;

// ── Planned files ─────────────────────────────────────────────────────────────

/// Where a planned file's content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Literal content, written verbatim.
    Literal(String),
    /// A template asset, rendered with the merged variable context.
    Template(TemplatePath),
}

/// One file in the merged plan, with the preset that contributed it
/// (kept for conflict reporting and dry-run display).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub source: FileSource,
    pub contributed_by: String,
}

// ── Contribution bundle ───────────────────────────────────────────────────────

/// The frozen snapshot of one preset's seven contract methods, captured once
/// per run. Pure data — the application layer builds it from a `Preset`.
#[derive(Debug, Clone, Default)]
pub struct ContributionBundle {
    pub preset_id: String,
    pub programmatic_files: BTreeMap<TargetPath, String>,
    pub template_files: BTreeMap<TargetPath, TemplatePath>,
    pub template_variables: TemplateVars,
    pub additional_directories: Vec<TargetPath>,
    pub dependencies: Vec<PackageSpec>,
    pub dev_dependencies: Vec<PackageSpec>,
    pub post_install_commands: Vec<String>,
}

impl ContributionBundle {
    pub fn named(preset_id: impl Into<String>) -> Self {
        Self {
            preset_id: preset_id.into(),
            ..Self::default()
        }
    }
}

// ── Merged plan ───────────────────────────────────────────────────────────────

/// The conflict-checked result of merging all contribution bundles,
/// ready for execution (or dry-run inspection).
#[derive(Debug, Clone, PartialEq)]
pub struct MergedPlan {
    files: BTreeMap<TargetPath, PlannedFile>,
    directories: BTreeSet<TargetPath>,
    dependencies: Vec<PackageSpec>,
    dev_dependencies: Vec<PackageSpec>,
    post_install_commands: Vec<String>,
    variables: TemplateVars,
}

impl MergedPlan {
    /// Merge contribution bundles, in preset registration order, against the
    /// run options.
    ///
    /// Fails without side effects on:
    /// - the same path contributed twice with different content
    ///   ([`DomainError::FileConflict`], naming both presets)
    /// - a preset shadowing a reserved variable
    ///   ([`DomainError::ReservedVariable`])
    /// - the same package at two versions
    ///   ([`DomainError::DependencyVersionConflict`])
    ///
    /// Byte-identical double contributions collapse silently; variable
    /// collisions between presets are last-writer-wins.
    pub fn merge(bundles: &[ContributionBundle], options: &Options) -> Result<Self, DomainError> {
        let mut files: BTreeMap<TargetPath, PlannedFile> = BTreeMap::new();
        let mut directories: BTreeSet<TargetPath> = BTreeSet::new();
        let mut post_install_commands: Vec<String> = Vec::new();
        let mut variables: TemplateVars = TemplateVars::new();

        for bundle in bundles {
            let literal = bundle.programmatic_files.iter().map(|(path, content)| {
                (path, FileSource::Literal(content.clone()))
            });
            let templated = bundle.template_files.iter().map(|(path, template)| {
                (path, FileSource::Template(template.clone()))
            });

            for (path, source) in literal.chain(templated) {
                let candidate = PlannedFile {
                    source,
                    contributed_by: bundle.preset_id.clone(),
                };
                match files.get(path) {
                    None => {
                        files.insert(path.clone(), candidate);
                    }
                    Some(existing) if existing.source == candidate.source => {}
                    Some(existing) => {
                        return Err(DomainError::FileConflict {
                            path: path.to_string(),
                            first: existing.contributed_by.clone(),
                            second: candidate.contributed_by,
                        });
                    }
                }
            }

            for (key, value) in &bundle.template_variables {
                if RESERVED_VARIABLES.contains(&key.as_str()) {
                    return Err(DomainError::ReservedVariable {
                        key: key.clone(),
                        preset: bundle.preset_id.clone(),
                    });
                }
                variables.insert(key.clone(), value.clone());
            }

            directories.extend(bundle.additional_directories.iter().cloned());
            post_install_commands.extend(bundle.post_install_commands.iter().cloned());
        }

        // Options fields enter the context last, under reserved keys, so no
        // preset can have overridden them.
        variables.insert("name".into(), TemplateValue::Str(options.name().into()));
        variables.insert(
            "install_dependencies".into(),
            TemplateValue::Bool(options.install_dependencies()),
        );
        variables.insert(
            "initialize_vcs".into(),
            TemplateValue::Bool(options.initialize_vcs()),
        );

        let dep_lists: Vec<&[PackageSpec]> =
            bundles.iter().map(|b| b.dependencies.as_slice()).collect();
        let dev_lists: Vec<&[PackageSpec]> = bundles
            .iter()
            .map(|b| b.dev_dependencies.as_slice())
            .collect();

        Ok(Self {
            files,
            directories,
            dependencies: merge_dependencies(&dep_lists)?,
            dev_dependencies: merge_dependencies(&dev_lists)?,
            post_install_commands,
            variables,
        })
    }

    pub fn files(&self) -> &BTreeMap<TargetPath, PlannedFile> {
        &self.files
    }

    pub fn directories(&self) -> &BTreeSet<TargetPath> {
        &self.directories
    }

    pub fn dependencies(&self) -> &[PackageSpec] {
        &self.dependencies
    }

    pub fn dev_dependencies(&self) -> &[PackageSpec] {
        &self.dev_dependencies
    }

    pub fn post_install_commands(&self) -> &[String] {
        &self.post_install_commands
    }

    pub fn variables(&self) -> &TemplateVars {
        &self.variables
    }

    /// Planned directories that no planned file lives under. These receive a
    /// placeholder marker during execution when VCS initialisation is on.
    pub fn empty_directories(&self) -> impl Iterator<Item = &TargetPath> {
        self.directories
            .iter()
            .filter(|dir| !self.files.keys().any(|file| dir.contains(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Options {
        Options::new("my-module", "/projects", true, true).unwrap()
    }

    fn bundle_with_literal(id: &str, path: &str, content: &str) -> ContributionBundle {
        let mut bundle = ContributionBundle::named(id);
        bundle
            .programmatic_files
            .insert(TargetPath::new(path), content.into());
        bundle
    }

    // ── File merging ──────────────────────────────────────────────────────

    #[test]
    fn disjoint_files_union() {
        let a = bundle_with_literal("alpha", "a.txt", "A");
        let b = bundle_with_literal("beta", "b.txt", "B");
        let plan = MergedPlan::merge(&[a, b], &options()).unwrap();
        assert_eq!(plan.files().len(), 2);
        assert!(plan.files().contains_key(&TargetPath::new("a.txt")));
        assert!(plan.files().contains_key(&TargetPath::new("b.txt")));
    }

    #[test]
    fn differing_content_is_a_conflict() {
        let a = bundle_with_literal("alpha", "shared.txt", "A");
        let b = bundle_with_literal("beta", "shared.txt", "B");
        let err = MergedPlan::merge(&[a, b], &options()).unwrap_err();
        assert_eq!(
            err,
            DomainError::FileConflict {
                path: "shared.txt".into(),
                first: "alpha".into(),
                second: "beta".into(),
            }
        );
    }

    #[test]
    fn identical_content_collapses() {
        let a = bundle_with_literal("alpha", "shared.txt", "same");
        let b = bundle_with_literal("beta", "shared.txt", "same");
        let plan = MergedPlan::merge(&[a, b], &options()).unwrap();
        assert_eq!(plan.files().len(), 1);
        // First contributor is retained for provenance.
        assert_eq!(
            plan.files()[&TargetPath::new("shared.txt")].contributed_by,
            "alpha"
        );
    }

    #[test]
    fn cross_kind_collision_is_a_conflict() {
        let a = bundle_with_literal("alpha", "gulpfile.js", "content");
        let mut b = ContributionBundle::named("beta");
        b.template_files.insert(
            TargetPath::new("gulpfile.js"),
            TemplatePath::new("gulp-rollup/gulpfile.js"),
        );
        assert!(matches!(
            MergedPlan::merge(&[a, b], &options()),
            Err(DomainError::FileConflict { .. })
        ));
    }

    // ── Variables ─────────────────────────────────────────────────────────

    #[test]
    fn variable_collisions_are_last_writer_wins() {
        let mut a = ContributionBundle::named("alpha");
        a.template_variables
            .insert("style_type".into(), "css".into());
        let mut b = ContributionBundle::named("beta");
        b.template_variables
            .insert("style_type".into(), "scss".into());

        let plan = MergedPlan::merge(&[a, b], &options()).unwrap();
        assert_eq!(
            plan.variables()["style_type"],
            TemplateValue::Str("scss".into())
        );
    }

    #[test]
    fn reserved_variable_shadowing_is_a_conflict() {
        let mut a = ContributionBundle::named("alpha");
        a.template_variables.insert("name".into(), "sneaky".into());
        let err = MergedPlan::merge(&[a], &options()).unwrap_err();
        assert_eq!(
            err,
            DomainError::ReservedVariable {
                key: "name".into(),
                preset: "alpha".into(),
            }
        );
    }

    #[test]
    fn options_fields_enter_under_reserved_keys() {
        let plan = MergedPlan::merge(&[], &options()).unwrap();
        assert_eq!(
            plan.variables()["name"],
            TemplateValue::Str("my-module".into())
        );
        assert_eq!(
            plan.variables()["install_dependencies"],
            TemplateValue::Bool(true)
        );
        assert_eq!(plan.variables()["initialize_vcs"], TemplateValue::Bool(true));
    }

    // ── Directories / commands ────────────────────────────────────────────

    #[test]
    fn directories_union_collapses_duplicates() {
        let mut a = ContributionBundle::named("alpha");
        a.additional_directories.push(TargetPath::new("src/lang"));
        let mut b = ContributionBundle::named("beta");
        b.additional_directories.push(TargetPath::new("src/lang"));
        b.additional_directories.push(TargetPath::new("src/packs"));

        let plan = MergedPlan::merge(&[a, b], &options()).unwrap();
        assert_eq!(plan.directories().len(), 2);
    }

    #[test]
    fn commands_concatenate_preserving_duplicates() {
        let mut a = ContributionBundle::named("alpha");
        a.post_install_commands.push("npm run format".into());
        a.post_install_commands.push("npm run format".into());
        let mut b = ContributionBundle::named("beta");
        b.post_install_commands.push("git add -A".into());

        let plan = MergedPlan::merge(&[a, b], &options()).unwrap();
        assert_eq!(
            plan.post_install_commands(),
            ["npm run format", "npm run format", "git add -A"]
        );
    }

    // ── Dependencies ──────────────────────────────────────────────────────

    #[test]
    fn dependencies_dedup_across_presets() {
        let mut a = ContributionBundle::named("alpha");
        a.dependencies = vec!["a".into(), "b".into()];
        let mut b = ContributionBundle::named("beta");
        b.dependencies = vec!["b".into(), "c".into()];

        let plan = MergedPlan::merge(&[a, b], &options()).unwrap();
        let names: Vec<&str> = plan.dependencies().iter().map(|d| d.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    // ── Determinism / empty dirs ──────────────────────────────────────────

    #[test]
    fn planning_is_idempotent() {
        let mut a = bundle_with_literal("alpha", "src/module/entry.js", "x");
        a.additional_directories.push(TargetPath::new("src/packs"));
        a.dev_dependencies = vec!["gulp".into(), "rollup".into()];
        let bundles = [a];

        let first = MergedPlan::merge(&bundles, &options()).unwrap();
        let second = MergedPlan::merge(&bundles, &options()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_directories_excludes_populated_ones() {
        let mut a = bundle_with_literal("alpha", "src/lang/en.json", "{}");
        a.additional_directories.push(TargetPath::new("src/lang"));
        a.additional_directories.push(TargetPath::new("src/packs"));

        let plan = MergedPlan::merge(&[a], &options()).unwrap();
        let empty: Vec<&TargetPath> = plan.empty_directories().collect();
        assert_eq!(empty, [&TargetPath::new("src/packs")]);
    }
}
