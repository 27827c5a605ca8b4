//! Scaffolds the source files a human fills in with captured signals: the
//! full key list for one (operating, swing, fan) triple plus an empty flat
//! mapping keyed by those 33 keys.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::codes::temperature::temperature_steps;

/// Paths written by a successful generation, plus the key list itself.
#[derive(Debug, Clone)]
pub struct TemplateOutput {
    pub scaffold_path: PathBuf,
    pub key_list_path: PathBuf,
    pub keys: Vec<String>,
}

#[derive(Debug)]
pub enum TemplateError {
    /// A scaffold for this exact triple already exists. Refusing protects
    /// hand-entered command values from being wiped by a re-run.
    ScaffoldExists(PathBuf),
    Write(PathBuf, std::io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScaffoldExists(path) => write!(
                f,
                "scaffold already exists, refusing to overwrite: {}",
                path.display()
            ),
            Self::Write(path, err) => write!(f, "failed to write {}: {err}", path.display()),
            Self::Serialize(err) => write!(f, "failed to serialize scaffold: {err}"),
        }
    }
}

impl std::error::Error for TemplateError {}

/// The 33 ordered flat keys for one triple, one per temperature step.
pub fn template_keys(operating_mode: &str, swing_mode: &str, fan_mode: &str) -> Vec<String> {
    temperature_steps()
        .iter()
        .map(|step| format!("{operating_mode}-{swing_mode}-{fan_mode}-{step}"))
        .collect()
}

/// The matching flat mapping with every value left empty for population.
pub fn empty_scaffold(operating_mode: &str, swing_mode: &str, fan_mode: &str) -> Map<String, Value> {
    let mut scaffold = Map::new();
    for key in template_keys(operating_mode, swing_mode, fan_mode) {
        scaffold.insert(key, Value::String(String::new()));
    }
    scaffold
}

/// Write the scaffold `{op}.{swing}.{fan}.json` into `source_dir` and the
/// `- key` list `{op}.txt` into `template_dir`. Fails without touching
/// anything if the scaffold for this triple already exists; the key list is
/// derivative and rewritten freely.
pub fn write_template(
    source_dir: &Path,
    template_dir: &Path,
    operating_mode: &str,
    swing_mode: &str,
    fan_mode: &str,
) -> Result<TemplateOutput, TemplateError> {
    let scaffold_path =
        source_dir.join(format!("{operating_mode}.{swing_mode}.{fan_mode}.json"));
    if scaffold_path.exists() {
        return Err(TemplateError::ScaffoldExists(scaffold_path));
    }

    let keys = template_keys(operating_mode, swing_mode, fan_mode);
    let key_list_path = template_dir.join(format!("{operating_mode}.txt"));

    fs::create_dir_all(source_dir)
        .map_err(|err| TemplateError::Write(source_dir.to_path_buf(), err))?;
    fs::create_dir_all(template_dir)
        .map_err(|err| TemplateError::Write(template_dir.to_path_buf(), err))?;

    let scaffold = empty_scaffold(operating_mode, swing_mode, fan_mode);
    let serialized =
        serde_json::to_string_pretty(&scaffold).map_err(TemplateError::Serialize)?;
    fs::write(&scaffold_path, serialized)
        .map_err(|err| TemplateError::Write(scaffold_path.clone(), err))?;

    let mut listing = String::new();
    for key in &keys {
        listing.push_str("- ");
        listing.push_str(key);
        listing.push('\n');
    }
    fs::write(&key_list_path, listing)
        .map_err(|err| TemplateError::Write(key_list_path.clone(), err))?;

    Ok(TemplateOutput {
        scaffold_path,
        key_list_path,
        keys,
    })
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    #[test]
    fn generates_33_keys_in_temperature_order() {
        let keys = template_keys("cool", "on", "auto");
        assert_eq!(keys.len(), 33);
        assert_eq!(keys[0], "cool-on-auto-16");
        assert_eq!(keys[1], "cool-on-auto-16.5");
        assert_eq!(keys[32], "cool-on-auto-32");
    }

    #[test]
    fn scaffold_has_empty_values_for_every_key() {
        let scaffold = empty_scaffold("dry", "off", "night");
        assert_eq!(scaffold.len(), 33);
        assert_eq!(
            scaffold.get("dry-off-night-24.5"),
            Some(&Value::String(String::new()))
        );
        assert!(scaffold.values().all(|v| v == &Value::String(String::new())));
    }

    fn unique_temp_dir(name: &str) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("irclimate-{name}-{stamp}"))
    }

    #[test]
    fn second_generation_for_the_same_triple_is_refused() {
        let root = unique_temp_dir("template-guard");
        let source_dir = root.join("source");
        let template_dir = root.join("templates");

        let first = write_template(&source_dir, &template_dir, "cool", "on", "auto")
            .expect("first generation should succeed");
        assert!(first.scaffold_path.exists());
        assert!(first.key_list_path.exists());

        let second = write_template(&source_dir, &template_dir, "cool", "on", "auto");
        assert!(matches!(second, Err(TemplateError::ScaffoldExists(_))));

        // The guarded scaffold is untouched.
        let raw = fs::read_to_string(&first.scaffold_path).unwrap();
        let parsed: Map<String, Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.len(), 33);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn different_triples_share_a_key_list_file() {
        let root = unique_temp_dir("template-list");
        let source_dir = root.join("source");
        let template_dir = root.join("templates");

        write_template(&source_dir, &template_dir, "cool", "on", "auto")
            .expect("first triple should succeed");
        let out = write_template(&source_dir, &template_dir, "cool", "on", "night")
            .expect("second triple should succeed");

        let listing = fs::read_to_string(&out.key_list_path).unwrap();
        assert!(listing.starts_with("- cool-on-night-16\n"));
        assert_eq!(listing.lines().count(), 33);

        let _ = fs::remove_dir_all(root);
    }
}
