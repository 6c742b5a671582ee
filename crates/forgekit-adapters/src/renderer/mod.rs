//! Template rendering adapters.

pub mod embedded;

pub use embedded::EmbeddedRenderer;
