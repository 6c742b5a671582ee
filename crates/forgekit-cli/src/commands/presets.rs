//! Implementation of the `forgekit presets` command.

use crate::{
    cli::{ListFormat, PresetKind, PresetsArgs},
    error::CliResult,
    output::OutputManager,
};

/// List the available preset flavours.
pub fn execute(args: PresetsArgs, output: OutputManager) -> CliResult<()> {
    let presets = PresetKind::all();

    match args.format {
        ListFormat::Table => {
            output.header("Available presets")?;
            for preset in presets {
                output.print(&format!("  {:<14} {}", preset.as_str(), preset.description()))?;
            }
        }
        ListFormat::List => {
            for preset in presets {
                output.print(preset.as_str())?;
            }
        }
        ListFormat::Json => {
            let names: Vec<&str> = presets.iter().map(|p| p.as_str()).collect();
            output.print(&serde_json::to_string_pretty(&names).unwrap_or_default())?;
        }
    }

    Ok(())
}
