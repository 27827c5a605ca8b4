use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::codes::combine::{combine_source_dir, CombineReport};
use crate::codes::expand::expand_temperature_series;
use crate::codes::metadata::device_metadata;
use crate::codes::template::write_template;
use crate::codes::tree::{build_command_tree, tree_to_document};
use crate::codes::validate::validate_flat_mapping;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Template,
    Combine,
    Transform,
    ExpandFan,
    Validate,
}

pub const DEFAULT_SOURCE_DIR: &str = "source";
pub const DEFAULT_COMBINED_FILE: &str = "combined.json";
pub const DEFAULT_COMMANDS_FILE: &str = "commands.json";
pub const DEFAULT_CLIMATE_FILE: &str = "climate.json";
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";
pub const FAN_ONLY_BASE_FILE: &str = "fan_only.base.json";
pub const FAN_ONLY_EXPANDED_FILE: &str = "source/fan_only.expanded.json";

/// Resolve a default path under the data root. The root is
/// `IRCLIMATE_DATA_DIR` when set, else `<manifest dir>/data` when run via
/// cargo, else `./data`. Explicit positional paths bypass this entirely.
pub fn data_path(suffix: &str) -> PathBuf {
    if let Ok(data_dir) = env::var("IRCLIMATE_DATA_DIR") {
        return PathBuf::from(data_dir).join(suffix);
    }
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        return PathBuf::from(manifest_dir).join("data").join(suffix);
    }
    PathBuf::from("data").join(suffix)
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("template") => Some(Command::Template),
        Some("combine") => Some(Command::Combine),
        Some("transform") => Some(Command::Transform),
        Some("expand-fan") => Some(Command::ExpandFan),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Template) => handle_template(args),
        Some(Command::Combine) => handle_combine(args),
        Some(Command::Transform) => handle_transform(args),
        Some(Command::ExpandFan) => handle_expand_fan(),
        Some(Command::Validate) => handle_validate(args),
        None => {
            eprintln!("usage: irclimate <template|combine|transform|expand-fan|validate>");
            2
        }
    }
}

fn handle_template(args: &[String]) -> i32 {
    let (Some(operating_mode), Some(swing_mode), Some(fan_mode)) =
        (args.get(2), args.get(3), args.get(4))
    else {
        eprintln!("usage: irclimate template <operating_mode> <swing_mode> <fan_mode>");
        return 2;
    };

    let source_dir = data_path(DEFAULT_SOURCE_DIR);
    let template_dir = data_path(DEFAULT_TEMPLATES_DIR);
    match write_template(&source_dir, &template_dir, operating_mode, swing_mode, fan_mode) {
        Ok(output) => {
            println!(
                "wrote {} ({} keys) and {}",
                output.scaffold_path.display(),
                output.keys.len(),
                output.key_list_path.display()
            );
            0
        }
        Err(err) => {
            eprintln!("template failed: {err}");
            1
        }
    }
}

fn handle_combine(args: &[String]) -> i32 {
    let source_dir = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| data_path(DEFAULT_SOURCE_DIR));
    let output_path = args
        .get(3)
        .map(PathBuf::from)
        .unwrap_or_else(|| data_path(DEFAULT_COMBINED_FILE));

    let report = match combine_source_dir(&source_dir) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("combine failed: {err}");
            return 1;
        }
    };
    report_combine_diagnostics(&report);

    if let Err(err) = write_pretty_json(&output_path, &report.merged) {
        eprintln!("combine failed: {err}");
        return 1;
    }
    println!(
        "combined into {}: keys_read={}, unique={}, collisions={}",
        output_path.display(),
        report.keys_read,
        report.merged.len(),
        report.collisions.len()
    );
    0
}

fn handle_transform(args: &[String]) -> i32 {
    let full = args.iter().any(|arg| arg == "--full");
    let positionals: Vec<&String> = args.iter().skip(2).filter(|arg| *arg != "--full").collect();
    let input = positionals.first().map(|p| PathBuf::from(p.as_str()));
    let output_path = positionals
        .get(1)
        .map(|p| PathBuf::from(p.as_str()))
        .unwrap_or_else(|| {
            data_path(if full {
                DEFAULT_CLIMATE_FILE
            } else {
                DEFAULT_COMMANDS_FILE
            })
        });

    // With --full and no explicit input, combine the source directory on the
    // fly instead of requiring a prior combine run.
    let flat: Map<String, Value> = if full && input.is_none() {
        match combine_source_dir(&data_path(DEFAULT_SOURCE_DIR)) {
            Ok(report) => {
                report_combine_diagnostics(&report);
                report.merged
            }
            Err(err) => {
                eprintln!("transform failed: {err}");
                return 1;
            }
        }
    } else {
        let input_path = input.unwrap_or_else(|| data_path(DEFAULT_COMBINED_FILE));
        match read_flat_mapping(&input_path) {
            Ok(flat) => flat,
            Err(err) => {
                eprintln!("transform failed: {err}");
                return 1;
            }
        }
    };

    let report = build_command_tree(&flat);
    for skipped in &report.skipped_keys {
        eprintln!("skipping key: {}", skipped.reason);
    }

    let metadata = if full { Some(device_metadata()) } else { None };
    let document = match tree_to_document(&report.tree, metadata.as_ref()) {
        Ok(document) => document,
        Err(err) => {
            eprintln!("transform failed: failed to serialize metadata: {err}");
            return 1;
        }
    };

    if let Err(err) = write_pretty_json(&output_path, &document) {
        eprintln!("transform failed: {err}");
        return 1;
    }
    println!(
        "transformed {} keys into {} ({} skipped, metadata={})",
        flat.len(),
        output_path.display(),
        report.skipped_keys.len(),
        if full { "included" } else { "omitted" }
    );
    0
}

fn handle_expand_fan() -> i32 {
    let input_path = data_path(FAN_ONLY_BASE_FILE);
    let output_path = data_path(FAN_ONLY_EXPANDED_FILE);

    let base = match read_flat_mapping(&input_path) {
        Ok(base) => base,
        Err(err) => {
            eprintln!("expand-fan failed: {err}");
            return 1;
        }
    };

    let expanded = expand_temperature_series(&base);
    if let Err(err) = write_pretty_json(&output_path, &expanded) {
        eprintln!("expand-fan failed: {err}");
        return 1;
    }
    println!(
        "expanded {} base entries into {} keys at {}",
        base.len(),
        expanded.len(),
        output_path.display()
    );
    0
}

fn handle_validate(args: &[String]) -> i32 {
    let input_path = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| data_path(DEFAULT_COMBINED_FILE));

    let flat = match read_flat_mapping(&input_path) {
        Ok(flat) => flat,
        Err(err) => {
            eprintln!("validate failed: {err}");
            return 1;
        }
    };

    let report = validate_flat_mapping(&flat);
    for diag in &report.diagnostics {
        eprintln!("[{}] {}: {}", diag.severity, diag.context, diag.message);
    }
    if report.has_errors() {
        eprintln!(
            "validation failed: {} diagnostic(s) for {}",
            report.diagnostics.len(),
            input_path.display()
        );
        1
    } else {
        println!(
            "validation passed: {} ({} key(s), {} diagnostic(s))",
            input_path.display(),
            flat.len(),
            report.diagnostics.len()
        );
        0
    }
}

fn report_combine_diagnostics(report: &CombineReport) {
    for skipped in &report.skipped_sources {
        eprintln!("skipping source {}: {}", skipped.source, skipped.reason);
    }
    for collision in &report.collisions {
        eprintln!(
            "duplicate key '{}' overwritten by {}",
            collision.key, collision.source
        );
    }
}

fn read_flat_mapping(path: &Path) -> Result<Map<String, Value>, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("unable to read '{}': {err}", path.display()))?;
    serde_json::from_str(&raw)
        .map_err(|err| format!("unable to parse json '{}': {err}", path.display()))
}

fn write_pretty_json(path: &Path, payload: &Map<String, Value>) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| format!("unable to create '{}': {err}", parent.display()))?;
    }
    let serialized = serde_json::to_string_pretty(payload)
        .map_err(|err| format!("unable to serialize '{}': {err}", path.display()))?;
    fs::write(path, serialized)
        .map_err(|err| format!("unable to write '{}': {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_known_subcommands() {
        assert_eq!(
            parse_command(&args(&["irclimate", "template"])),
            Some(Command::Template)
        );
        assert_eq!(
            parse_command(&args(&["irclimate", "combine"])),
            Some(Command::Combine)
        );
        assert_eq!(
            parse_command(&args(&["irclimate", "transform"])),
            Some(Command::Transform)
        );
        assert_eq!(
            parse_command(&args(&["irclimate", "expand-fan"])),
            Some(Command::ExpandFan)
        );
        assert_eq!(
            parse_command(&args(&["irclimate", "validate"])),
            Some(Command::Validate)
        );
        assert_eq!(parse_command(&args(&["irclimate", "bogus"])), None);
        assert_eq!(parse_command(&args(&["irclimate"])), None);
    }

    #[test]
    fn unknown_subcommand_exits_with_usage() {
        assert_eq!(run_with_args(&args(&["irclimate", "bogus"])), 2);
    }

    #[test]
    fn template_without_three_modes_exits_with_usage() {
        assert_eq!(run_with_args(&args(&["irclimate", "template", "cool"])), 2);
        assert_eq!(
            run_with_args(&args(&["irclimate", "template", "cool", "on"])),
            2
        );
    }
}
