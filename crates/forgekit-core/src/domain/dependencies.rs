//! Package specifiers and the declarative dependency rule table.
//!
//! Dependency derivation is deliberately *data*, not control flow: each rule
//! pairs a predicate over the frozen feature flags with a fixed slice of
//! specifiers, and the table order is the manifest order. That makes the
//! derivation properties checkable by walking the table instead of tracing
//! branches.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::features::{GulpRollupFeatures, StyleKind};

// ── PackageSpec ───────────────────────────────────────────────────────────────

/// An npm-style package specifier.
///
/// Accepted shapes: `gulp`, `less@3`, `@scope/name`, `@scope/name@0.7.9`,
/// `name@github:owner/repo#sha`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageSpec(String);

impl PackageSpec {
    pub fn new(spec: impl Into<String>) -> Self {
        Self(spec.into())
    }

    /// The bare package name, with any version/source suffix stripped.
    ///
    /// The leading `@` of a scope is not a version separator, so only an
    /// `@` past the first character splits the specifier.
    pub fn name(&self) -> &str {
        match self.0.rfind('@') {
            Some(idx) if idx > 0 => &self.0[..idx],
            _ => &self.0,
        }
    }

    /// The version/source portion after the name, if pinned.
    pub fn version(&self) -> Option<&str> {
        match self.0.rfind('@') {
            Some(idx) if idx > 0 => Some(&self.0[idx + 1..]),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PackageSpec {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Dev-dependency rule table ─────────────────────────────────────────────────

/// One conditional-append rule: when the predicate holds for the frozen
/// feature snapshot, the packages are appended in slice order.
struct DependencyRule {
    when: fn(&GulpRollupFeatures) -> bool,
    packages: &'static [&'static str],
}

/// Ordered rule table for the Gulp+Rollup flavour's dev dependencies.
///
/// Table order *is* manifest order; reordering entries changes the emitted
/// manifest and breaks reproducibility for existing projects.
const DEV_DEPENDENCY_RULES: &[DependencyRule] = &[
    // Unconditional build tooling.
    DependencyRule {
        when: |_| true,
        packages: &[
            "@rollup/plugin-node-resolve",
            "chalk",
            "fs-extra",
            "gulp",
            "rollup",
            "semver",
            "yargs",
        ],
    },
    // TypeScript toolchain, including the pinned Foundry type definitions.
    DependencyRule {
        when: |f| f.use_typescript,
        packages: &[
            "foundry-vtt-types@github:League-of-Foundry-Developers/foundry-vtt-types#906f1cef577eac1fae22103b5875c13fbb08addf",
            "rollup-plugin-typescript2",
            "tslib",
            "typescript",
        ],
    },
    // Base lint/format stack.
    DependencyRule {
        when: |f| f.use_linting,
        packages: &[
            "eslint",
            "eslint-config-prettier",
            "eslint-plugin-prettier",
            "husky",
            "lint-staged",
            "prettier",
        ],
    },
    // Lint plugins branch on whether type-checking is in play.
    DependencyRule {
        when: |f| f.use_linting && f.use_typescript,
        packages: &["@typescript-eslint/eslint-plugin", "@typescript-eslint/parser"],
    },
    DependencyRule {
        when: |f| f.use_linting && !f.use_typescript,
        packages: &["@typhonjs-fvtt/eslint-config-foundry.js@0.7.9"],
    },
    DependencyRule {
        when: |f| f.use_linting && f.use_testing,
        packages: &["eslint-plugin-jest"],
    },
    // Test framework, with its TypeScript adapter when applicable.
    DependencyRule {
        when: |f| f.use_testing,
        packages: &["jest", "jest-junit"],
    },
    DependencyRule {
        when: |f| f.use_testing && f.use_typescript,
        packages: &["@types/jest", "ts-jest"],
    },
    // Style pre-processor tooling.
    DependencyRule {
        when: |f| f.style == StyleKind::Less,
        packages: &["gulp-less", "less@3"],
    },
    DependencyRule {
        when: |f| f.style == StyleKind::Scss,
        packages: &["gulp-sass", "sass"],
    },
];

/// Derive the dev-dependency list for a frozen feature snapshot.
pub fn dev_dependencies(features: &GulpRollupFeatures) -> Vec<PackageSpec> {
    DEV_DEPENDENCY_RULES
        .iter()
        .filter(|rule| (rule.when)(features))
        .flat_map(|rule| rule.packages.iter().map(|p| PackageSpec::new(*p)))
        .collect()
}

// ── Cross-preset merging ──────────────────────────────────────────────────────

/// Merge dependency lists from several presets, in registration order.
///
/// Identical specifiers deduplicate keeping the first occurrence. The same
/// package name at two *different* versions is a planning failure rather
/// than a silent first-wins: version drift between presets is a preset bug
/// the operator should see.
pub fn merge_dependencies(lists: &[&[PackageSpec]]) -> Result<Vec<PackageSpec>, DomainError> {
    let mut merged: Vec<PackageSpec> = Vec::new();
    for list in lists {
        for spec in *list {
            match merged.iter().find(|m| m.name() == spec.name()) {
                None => merged.push(spec.clone()),
                Some(existing) if existing == spec => {}
                Some(existing) => {
                    return Err(DomainError::DependencyVersionConflict {
                        package: spec.name().into(),
                        first: existing.as_str().into(),
                        second: spec.as_str().into(),
                    });
                }
            }
        }
    }
    Ok(merged)
}
