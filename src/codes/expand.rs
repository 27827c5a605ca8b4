//! Expands temperature-less base entries across the full temperature range.
//!
//! Fan-only commands do not drive the compressor, so one captured signal per
//! (swing, fan) pair is valid at every target temperature. The reduced base
//! file stores that one signal; this module fans it out to the 33 keys the
//! combiner and tree builder expect.

use serde_json::{Map, Value};

use crate::codes::temperature::temperature_steps;

/// Expand each `{base_key}: value` entry into `{base_key}-{t}: value` for
/// every temperature step, in base-key order. Values are cloned untouched;
/// output size is input size x 33.
pub fn expand_temperature_series(base: &Map<String, Value>) -> Map<String, Value> {
    let steps = temperature_steps();
    let mut expanded = Map::new();
    for (base_key, value) in base {
        for step in &steps {
            expanded.insert(format!("{base_key}-{step}"), value.clone());
        }
    }
    expanded
}
