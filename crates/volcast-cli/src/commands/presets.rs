//! Presets command implementation

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use volcast_field::{FieldPreset, PRESET_NAMES};

/// Run the presets command
///
/// Lists built-in preset names, or with `json_output` dumps every preset's
/// full parameters as a JSON object keyed by name.
pub fn run(json_output: bool) -> Result<ExitCode> {
    if json_output {
        println!("{}", presets_json()?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Built-in presets:".cyan().bold());
    for name in PRESET_NAMES {
        let kind = match FieldPreset::named(name)? {
            FieldPreset::Fire(_) => "fire",
            FieldPreset::Cloud(_) => "cloud",
        };
        println!("  {} {}", name.bold(), format!("({kind})").dimmed());
    }
    Ok(ExitCode::SUCCESS)
}

/// Pretty JSON object mapping each preset name to its parameters.
pub fn presets_json() -> Result<String> {
    let mut map = serde_json::Map::new();
    for name in PRESET_NAMES {
        let preset = FieldPreset::named(name)?;
        map.insert(name.to_string(), serde_json::to_value(&preset)?);
    }
    Ok(serde_json::to_string_pretty(&serde_json::Value::Object(map))?)
}
