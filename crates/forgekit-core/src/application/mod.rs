//! Application layer: the preset contract, the driven ports, and the
//! materializer that orchestrates them.

pub mod error;
pub mod materializer;
pub mod ports;
pub mod preset;
pub mod presets;

pub use error::ApplicationError;
pub use materializer::Materializer;
pub use preset::{Preset, collect_bundle};
pub use presets::GulpRollupPreset;
