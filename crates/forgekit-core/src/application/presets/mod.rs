//! Preset variants, one module per supported project flavour.

pub mod gulp_rollup;

pub use gulp_rollup::GulpRollupPreset;
