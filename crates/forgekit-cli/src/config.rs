//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Config file (TODO: implement file reading)
//! 3. Built-in defaults (always present)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Default preset when `--preset` is omitted.
    pub preset: Option<String>,
    /// Install dependencies unless `--no-install` is passed.
    pub install_dependencies: bool,
    /// Initialise git unless `--no-git` is passed.
    pub initialize_vcs: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults {
                preset: Some("gulp-rollup".into()),
                install_dependencies: true,
                initialize_vcs: true,
            },
            output: OutputConfig { no_color: false },
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// The `config_file` parameter is the path the user passed via
    /// `--config` (or `None` to use the default location).  File reading is
    /// not yet implemented; this always returns the built-in defaults.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        // TODO: read from a TOML file at config_path() and merge over defaults.
        let _config_file = config_file;
        Ok(Self::default())
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.forgekit.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "forgekit", "forgekit")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".forgekit.toml"))
    }
}
