//! Package-manager and subprocess adapters.

pub mod npm;
pub mod recording;

pub use npm::NpmPackageManager;
pub use recording::RecordingPackageManager;
