//! Library-level pipeline coverage: scaffold a source set, fill it in,
//! combine, expand the fan-only base, and reshape into the nested tree.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Map, Value};

use irclimate::codes::combine::combine_source_dir;
use irclimate::codes::expand::expand_temperature_series;
use irclimate::codes::template::{template_keys, write_template};
use irclimate::codes::tree::{build_command_tree, tree_to_document};

fn unique_temp_dir(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("irclimate-{name}-{stamp}"));
    fs::create_dir_all(&dir).expect("temp dir should be created");
    dir
}

fn read_mapping(path: &PathBuf) -> Map<String, Value> {
    let raw = fs::read_to_string(path).expect("mapping should be readable");
    serde_json::from_str(&raw).expect("mapping should be valid JSON")
}

#[test]
fn scaffold_fill_combine_transform_round_trip() {
    let root = unique_temp_dir("pipeline");
    let source_dir = root.join("source");
    let template_dir = root.join("templates");

    let output = write_template(&source_dir, &template_dir, "cool", "on", "auto")
        .expect("scaffold should be written");

    // Fill the scaffold the way a human would: one value per key.
    let mut filled = Map::new();
    for key in &output.keys {
        filled.insert(key.clone(), Value::String(format!("IR:{key}")));
    }
    fs::write(
        &output.scaffold_path,
        serde_json::to_string_pretty(&filled).unwrap(),
    )
    .expect("filled scaffold should be written");
    fs::write(source_dir.join("off.json"), r#"{"off":"IR:off"}"#)
        .expect("off source should be written");

    let report = combine_source_dir(&source_dir).expect("combine should succeed");
    assert_eq!(report.keys_read, 34);
    assert_eq!(report.merged.len(), 34);
    assert!(report.collisions.is_empty());
    assert!(report.skipped_sources.is_empty());

    let tree_report = build_command_tree(&report.merged);
    assert!(tree_report.skipped_keys.is_empty());
    assert_eq!(
        tree_report.tree.off,
        Some(Value::String("IR:off".to_string()))
    );
    assert_eq!(
        tree_report.tree.modes["cool"]["auto"]["on"]["16.5"],
        Value::String("IR:cool-on-auto-16.5".to_string())
    );
    assert_eq!(
        tree_report.tree.modes["cool"]["auto"]["on"]
            .as_object()
            .map(Map::len),
        Some(33)
    );

    let document = tree_to_document(&tree_report.tree, None).expect("document should assemble");
    assert_eq!(document.keys().next().map(String::as_str), Some("off"));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn expanded_fan_only_entries_reach_the_tree() {
    let root = unique_temp_dir("fan-pipeline");
    let source_dir = root.join("source");
    fs::create_dir_all(&source_dir).expect("source dir should be created");

    let mut base = Map::new();
    base.insert(
        "fan_only-on-auto".to_string(),
        Value::String("IR:fan-auto".to_string()),
    );
    base.insert(
        "fan_only-off-level2-quiet".to_string(),
        Value::String("IR:fan-l2q".to_string()),
    );

    let expanded = expand_temperature_series(&base);
    assert_eq!(expanded.len(), 66);
    fs::write(
        source_dir.join("fan_only.expanded.json"),
        serde_json::to_string_pretty(&expanded).unwrap(),
    )
    .expect("expanded mapping should be written");

    let report = combine_source_dir(&source_dir).expect("combine should succeed");
    let tree_report = build_command_tree(&report.merged);
    assert!(tree_report.skipped_keys.is_empty());

    for step in ["16", "16.5", "24", "32"] {
        assert_eq!(
            tree_report.tree.modes["fan_only"]["auto"]["on"][step],
            Value::String("IR:fan-auto".to_string())
        );
        assert_eq!(
            tree_report.tree.modes["fan_only"]["level2_quiet"]["off"][step],
            Value::String("IR:fan-l2q".to_string())
        );
    }

    let _ = fs::remove_dir_all(root);
}

#[test]
fn template_keys_match_scaffold_file_contents() {
    let root = unique_temp_dir("template-contents");
    let source_dir = root.join("source");
    let template_dir = root.join("templates");

    let output = write_template(&source_dir, &template_dir, "dry", "comfort", "level3")
        .expect("scaffold should be written");
    let scaffold = read_mapping(&output.scaffold_path);

    let keys: Vec<String> = scaffold.keys().cloned().collect();
    assert_eq!(keys, template_keys("dry", "comfort", "level3"));
    assert!(scaffold.values().all(|v| v == &Value::String(String::new())));

    let listing = fs::read_to_string(&output.key_list_path).expect("key list should be readable");
    for key in &keys {
        assert!(listing.contains(&format!("- {key}\n")));
    }

    let _ = fs::remove_dir_all(root);
}
