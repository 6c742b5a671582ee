//! Infrastructure adapters for forgekit.
//!
//! This crate implements the ports defined in
//! `forgekit_core::application::ports` and ships the embedded template
//! assets for the generated build pipeline. It contains all external
//! dependencies and I/O operations.

pub mod command;
pub mod filesystem;
pub mod prompter;
pub mod renderer;

// Re-export commonly used adapters
pub use command::{NpmPackageManager, RecordingPackageManager};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use prompter::ScriptedPrompter;
#[cfg(feature = "interactive")]
pub use prompter::TerminalPrompter;
pub use renderer::EmbeddedRenderer;
