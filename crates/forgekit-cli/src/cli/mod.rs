//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "forgekit",
    bin_name = "forgekit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{2692} Preset-driven scaffolding for Foundry VTT projects",
    long_about = "forgekit composes one or more presets into a ready-to-develop \
                  Foundry VTT module or system project, including its build \
                  pipeline and dependency manifest.",
    after_help = "EXAMPLES:\n\
        \x20 forgekit create my-module\n\
        \x20 forgekit create my-module --defaults --no-install\n\
        \x20 forgekit create ../modules/dice5e --preset gulp-rollup --dry-run\n\
        \x20 forgekit completions bash > /usr/share/bash-completion/completions/forgekit",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold a new project from one or more presets.
    #[command(
        visible_alias = "c",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 forgekit create my-module\n\
            \x20 forgekit create my-module --defaults --yes\n\
            \x20 forgekit create my-module --no-install --no-git --dry-run"
    )]
    Create(CreateArgs),

    /// List the available presets.
    #[command(visible_alias = "ls", about = "List available presets")]
    Presets(PresetsArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 forgekit completions bash > ~/.local/share/bash-completion/completions/forgekit\n\
            \x20 forgekit completions zsh  > ~/.zfunc/_forgekit\n\
            \x20 forgekit completions fish > ~/.config/fish/completions/forgekit.fish"
    )]
    Completions(CompletionsArgs),
}

// ── create ────────────────────────────────────────────────────────────────────

/// Arguments for `forgekit create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Project name or path.  A plain name creates `./name`; a path like
    /// `../foo` places the project one level up.
    #[arg(value_name = "NAME", help = "Project name or path")]
    pub name: String,

    /// Presets to compose, in registration order.
    #[arg(
        short = 'p',
        long = "preset",
        value_enum,
        value_name = "PRESET",
        default_values_t = [PresetKind::GulpRollup],
        help = "Preset(s) to apply"
    )]
    pub presets: Vec<PresetKind>,

    /// Skip feature prompts and use each preset's defaults.
    #[arg(long = "defaults", help = "Use preset default features, no prompts")]
    pub defaults: bool,

    /// Override the output directory (default: current directory, or the
    /// parent embedded in NAME).
    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        help = "Directory to create the project in"
    )]
    pub dir: Option<PathBuf>,

    /// Skip dependency installation and post-install commands.
    #[arg(long = "no-install", help = "Do not install dependencies")]
    pub no_install: bool,

    /// Skip version-control initialisation (and `.gitkeep` markers).
    #[arg(long = "no-git", help = "Do not initialise a git repository")]
    pub no_git: bool,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Preview the merged plan without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── presets ───────────────────────────────────────────────────────────────────

/// Arguments for `forgekit presets`.
#[derive(Debug, Args)]
pub struct PresetsArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `presets` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `forgekit completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Available preset flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum PresetKind {
    /// Gulp + Rollup build pipeline.
    GulpRollup,
}

impl PresetKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GulpRollup => "gulp-rollup",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::GulpRollup => {
                "Gulp + Rollup pipeline with optional TypeScript, linting, testing, and CSS pre-processing"
            }
        }
    }

    pub const fn all() -> &'static [PresetKind] {
        &[Self::GulpRollup]
    }
}

impl std::fmt::Display for PresetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
