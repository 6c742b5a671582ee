//! forgekit Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for forgekit,
//! a preset-driven scaffolding tool for Foundry VTT modules and systems.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          forgekit-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │            Materializer                 │
//! │  (collect bundles, merge, execute)      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, Renderer, Packages,        │
//! │  Prompter) + the Preset contract        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   forgekit-adapters (Infrastructure)    │
//! │ (LocalFilesystem, EmbeddedRenderer,     │
//! │  NpmPackageManager, TerminalPrompter)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Domain Layer (Pure Logic)         │
//! │ (Options, features, MergedPlan merge)   │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use forgekit_core::{
//!     application::{GulpRollupPreset, Materializer, Preset},
//!     domain::Options,
//! };
//!
//! // 1. Capture the run options
//! let options = Options::new("my-module", "./projects", true, true).unwrap();
//!
//! // 2. Construct presets (interactively or from defaults)
//! let preset: Box<dyn Preset> = Box::new(GulpRollupPreset::create_default(&options));
//!
//! // 3. Materialize (with injected adapters)
//! let materializer = Materializer::new(filesystem, renderer, packages);
//! materializer.materialize(&[preset], &options).unwrap();
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GulpRollupPreset, Materializer, Preset,
        ports::{Filesystem, PackageManager, Prompter, TemplateRenderer},
    };
    pub use crate::domain::{
        GulpRollupFeatures, MergedPlan, Options, PackageSpec, StyleKind, TargetPath,
        TemplatePath, TemplateValue, TemplateVars,
    };
    pub use crate::error::{ForgeError, ForgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
