// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for forgekit.
//!
//! This module contains pure business logic with ZERO external dependencies.
//! All I/O, prompting, rendering, and subprocess concerns are handled via
//! ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror + serde
//! - **Immutable values**: Options and feature snapshots never mutate
//! - **Pure planning**: merging bundles into a plan has no side effects
//!
// Public API - what the world sees
pub mod dependencies;
pub mod error;
pub mod features;
pub mod options;
pub mod paths;
pub mod plan;

// Re-exports for convenience
pub use dependencies::{PackageSpec, dev_dependencies, merge_dependencies};
pub use error::{DomainError, ErrorCategory};
pub use features::{GulpRollupFeatures, StyleKind};
pub use options::Options;
pub use paths::{TargetPath, TemplatePath};
pub use plan::{
    ContributionBundle, FileSource, MergedPlan, PLACEHOLDER_FILE, PlannedFile,
    RESERVED_VARIABLES, TemplateValue, TemplateVars,
};
