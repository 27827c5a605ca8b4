//! Core transforms over the flat command database: key parsing, the
//! temperature grid, fan-only expansion, source-file combination, tree
//! assembly, scaffolding, and mapping validation.
//!
//! Everything here is a pure function of its inputs plus explicit
//! diagnostics in the returned report; file I/O stays at the edges
//! ([combine::combine_source_dir], [template::write_template]) so the
//! transforms are testable without capturing output streams.

pub mod combine;
pub mod expand;
pub mod key;
pub mod metadata;
pub mod template;
pub mod temperature;
pub mod tree;
pub mod validate;

pub use combine::{
    combine_mappings, combine_source_dir, CombineError, CombineReport, KeyCollision, SkippedSource,
};
pub use expand::expand_temperature_series;
pub use key::{parse_command_key, CommandKey, KeyFormatError, OFF_KEY};
pub use metadata::{device_metadata, DeviceMetadata};
pub use template::{empty_scaffold, template_keys, write_template, TemplateError, TemplateOutput};
pub use temperature::{
    is_valid_temperature, temperature_steps, MAX_TEMPERATURE, MIN_TEMPERATURE,
    TEMPERATURE_PRECISION,
};
pub use tree::{build_command_tree, tree_to_document, CommandTree, SkippedKey, TreeReport};
pub use validate::{
    validate_flat_mapping, ValidationDiagnostic, ValidationReport, ValidationSeverity,
};
