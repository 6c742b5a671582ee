//! Prompting adapters.

#[cfg(feature = "interactive")]
pub mod terminal;
#[cfg(feature = "interactive")]
pub use terminal::TerminalPrompter;

pub mod scripted;
pub use scripted::ScriptedPrompter;
