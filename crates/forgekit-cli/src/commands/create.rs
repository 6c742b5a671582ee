//! Implementation of the `forgekit create` command.
//!
//! Responsibility: translate CLI arguments into core `Options`, construct
//! the requested presets, call the materializer, and display results. No
//! business logic lives here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use forgekit_adapters::{EmbeddedRenderer, LocalFilesystem, NpmPackageManager};
use forgekit_core::{
    application::{GulpRollupPreset, Materializer, Preset},
    domain::{DomainError, MergedPlan, Options},
};

use crate::{
    cli::{CreateArgs, PresetKind, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `forgekit create` command.
///
/// Dispatch sequence:
/// 1. Split the NAME argument into project name and output directory
/// 2. Build the immutable `Options` record
/// 3. Construct presets (prompting unless `--defaults`)
/// 4. Confirm with user unless `--yes` or `--quiet`
/// 5. Early-exit if `--dry-run` (plan preview, nothing written)
/// 6. Materialize via the core engine
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: CreateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Resolve project path
    let (project_name, output_dir) = resolve_project_path(&args.name, args.dir.as_deref());

    // 2. Build options (name validation lives in the domain)
    let options = Options::new(
        project_name.as_str(),
        &output_dir,
        !args.no_install && config.defaults.install_dependencies,
        !args.no_git && config.defaults.initialize_vcs,
    )
    .map_err(|e| match e {
        DomainError::InvalidName { name, reason } => CliError::InvalidProjectName { name, reason },
        other => CliError::Core(other.into()),
    })?;

    debug!(
        install = options.install_dependencies(),
        vcs = options.initialize_vcs(),
        dir = %output_dir.display(),
        "options resolved"
    );

    // 3. Construct presets in registration order
    let presets = build_presets(&args, &options)?;

    // 4. Show configuration and confirm
    if !global.quiet && !args.yes && !args.dry_run {
        show_configuration(&args.presets, &options, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    let materializer = Materializer::new(
        Box::new(LocalFilesystem::new()),
        Box::new(EmbeddedRenderer::new()),
        Box::new(NpmPackageManager::new()),
    );

    // 5. Dry run: plan, describe, and stop before any write.
    if args.dry_run {
        let plan = materializer.plan(&presets, &options)?;
        print_plan(&plan, &options, &output)?;
        return Ok(());
    }

    // 6. Materialize
    output.header(&format!("Creating '{project_name}'..."))?;
    info!(project = %project_name, "materialization started");

    let plan = materializer.materialize(&presets, &options)?;

    info!(project = %project_name, files = plan.files().len(), "materialization completed");

    // 7. Success + next steps
    output.success(&format!("Project '{project_name}' created!"))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", output_dir.join(&project_name).display()))?;
        if !options.install_dependencies() {
            output.print("  npm install")?;
        }
        output.print("  npm run build")?;
    }

    Ok(())
}

// ── Path resolution ───────────────────────────────────────────────────────────

/// Split the NAME argument into a project name and an output directory.
///
/// A plain name scaffolds into the current directory; a path argument
/// scaffolds into its parent. An explicit `--dir` always wins.
pub fn resolve_project_path(name: &str, dir: Option<&Path>) -> (String, PathBuf) {
    let path = Path::new(name);

    let project_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name)
        .to_string();

    let output_dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    (project_name, output_dir)
}

// ── Preset construction ───────────────────────────────────────────────────────

fn build_presets(args: &CreateArgs, options: &Options) -> CliResult<Vec<Box<dyn Preset>>> {
    args.presets
        .iter()
        .map(|kind| build_preset(*kind, args, options))
        .collect()
}

fn build_preset(
    kind: PresetKind,
    args: &CreateArgs,
    options: &Options,
) -> CliResult<Box<dyn Preset>> {
    match kind {
        PresetKind::GulpRollup => {
            if args.defaults {
                return Ok(Box::new(GulpRollupPreset::create_default(options)));
            }
            interactive_gulp_rollup(options)
        }
    }
}

#[cfg(feature = "interactive")]
fn interactive_gulp_rollup(options: &Options) -> CliResult<Box<dyn Preset>> {
    let prompter = forgekit_adapters::TerminalPrompter::new();
    let preset = GulpRollupPreset::create(options, &prompter).map_err(CliError::Core)?;
    Ok(Box::new(preset))
}

#[cfg(not(feature = "interactive"))]
fn interactive_gulp_rollup(_options: &Options) -> CliResult<Box<dyn Preset>> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    presets: &[PresetKind],
    options: &Options,
    out: &OutputManager,
) -> CliResult<()> {
    let preset_names: Vec<&str> = presets.iter().map(|p| p.as_str()).collect();

    out.header("Configuration")?;
    out.print(&format!("  Project:   {}", options.name()))?;
    out.print(&format!("  Presets:   {}", preset_names.join(", ")))?;
    out.print(&format!(
        "  Location:  {}",
        options.target_directory().join(options.name()).display()
    ))?;
    out.print(&format!(
        "  Install:   {}",
        if options.install_dependencies() { "yes" } else { "no" }
    ))?;
    out.print(&format!(
        "  Git init:  {}",
        if options.initialize_vcs() { "yes" } else { "no" }
    ))?;
    out.print("")?;
    Ok(())
}

fn print_plan(plan: &MergedPlan, options: &Options, out: &OutputManager) -> CliResult<()> {
    let root = options.target_directory().join(options.name());

    out.header(&format!("Dry run: would create {}", root.display()))?;
    out.print("")?;
    out.print("Files:")?;
    for (path, file) in plan.files() {
        out.print(&format!("  {}  ({})", path, file.contributed_by))?;
    }

    if !plan.directories().is_empty() {
        out.print("")?;
        out.print("Directories:")?;
        for dir in plan.directories() {
            out.print(&format!("  {dir}/"))?;
        }
    }

    if !plan.dev_dependencies().is_empty() || !plan.dependencies().is_empty() {
        out.print("")?;
        out.print(&format!(
            "Dependencies: {} runtime, {} dev",
            plan.dependencies().len(),
            plan.dev_dependencies().len()
        ))?;
    }

    if !plan.post_install_commands().is_empty() {
        out.print("")?;
        out.print("Post-install commands:")?;
        for command in plan.post_install_commands() {
            out.print(&format!("  $ {command}"))?;
        }
    }

    Ok(())
}

fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
