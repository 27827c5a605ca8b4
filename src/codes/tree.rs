//! Reshapes the flat command mapping into the nested lookup structure the
//! remote integration consumes: operating mode -> fan mode -> swing mode ->
//! temperature -> encoded command.

use serde_json::{Map, Value};

use crate::codes::key::{parse_command_key, OFF_KEY};
use crate::codes::metadata::DeviceMetadata;

/// The nested lookup plus the reserved power-off command. `off` is kept
/// outside the mode map because it has no mode/temperature structure and
/// must lead the emitted object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandTree {
    pub off: Option<Value>,
    pub modes: Map<String, Value>,
}

/// A flat key dropped from the tree build, with the parse failure that
/// caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedKey {
    pub key: String,
    pub reason: String,
}

/// Tree build outcome: partial results are allowed, so the skipped keys ride
/// alongside the tree instead of aborting it.
#[derive(Debug, Clone, Default)]
pub struct TreeReport {
    pub tree: CommandTree,
    pub skipped_keys: Vec<SkippedKey>,
}

/// Build the nested tree from a flat mapping. The literal `off` key becomes
/// the reserved field; every other key goes through the key parser, and a
/// key that fails to parse is recorded and skipped. Intermediate levels are
/// created on demand; two keys normalizing to the same path resolve
/// last-write-wins.
pub fn build_command_tree(flat: &Map<String, Value>) -> TreeReport {
    let mut report = TreeReport::default();

    for (raw_key, value) in flat {
        if raw_key == OFF_KEY {
            report.tree.off = Some(value.clone());
            continue;
        }

        let key = match parse_command_key(raw_key) {
            Ok(key) => key,
            Err(err) => {
                report.skipped_keys.push(SkippedKey {
                    key: raw_key.clone(),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let mode_level = report
            .tree
            .modes
            .entry(key.operating_mode)
            .or_insert_with(|| Value::Object(Map::new()));
        let fan_level = mode_level
            .as_object_mut()
            .expect("mode level is always an object")
            .entry(key.fan_mode)
            .or_insert_with(|| Value::Object(Map::new()));
        let swing_level = fan_level
            .as_object_mut()
            .expect("fan level is always an object")
            .entry(key.swing_mode)
            .or_insert_with(|| Value::Object(Map::new()));
        swing_level
            .as_object_mut()
            .expect("swing level is always an object")
            .insert(key.temperature, value.clone());
    }

    report
}

/// Assemble the emitted object: the reserved `off` command first, then the
/// metadata fields when requested, then the per-mode subtrees. The off-first
/// ordering is part of the documented output contract; metadata always
/// precedes the tree.
pub fn tree_to_document(
    tree: &CommandTree,
    metadata: Option<&DeviceMetadata>,
) -> Result<Map<String, Value>, serde_json::Error> {
    let mut document = Map::new();

    if let Some(off) = &tree.off {
        document.insert(OFF_KEY.to_string(), off.clone());
    }

    if let Some(metadata) = metadata {
        let value = serde_json::to_value(metadata)?;
        if let Value::Object(fields) = value {
            for (field, field_value) in fields {
                document.insert(field, field_value);
            }
        }
    }

    for (mode, subtree) in &tree.modes {
        document.insert(mode.clone(), subtree.clone());
    }

    Ok(document)
}
