//! Flat command key parsing. Keys encode four fields joined with `-`:
//! `{operating_mode}-{swing_mode}-{fan_mode}-{temperature}`.

use std::fmt;

/// Reserved top-level key for the power-off command. Carried through the
/// pipeline unparsed and emitted first among the output's sibling keys.
pub const OFF_KEY: &str = "off";

/// A flat command key split into its four semantic fields.
///
/// Temperature stays in its original textual form (`"16"`, `"16.5"`), never a
/// numeric type, so re-serialization cannot drift (`16` vs `16.0`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandKey {
    pub operating_mode: String,
    pub swing_mode: String,
    pub fan_mode: String,
    pub temperature: String,
}

impl CommandKey {
    /// Re-join the fields into the flat form, expanding the fan mode's `_`
    /// separators back to `-`.
    ///
    /// Known limitation: a fan mode whose name legitimately contains a `-`
    /// is indistinguishable from a multi-segment one after parsing, so the
    /// round trip is only guaranteed for `_`-joined fan modes.
    pub fn flat_key(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.operating_mode,
            self.swing_mode,
            self.fan_mode.replace('_', "-"),
            self.temperature
        )
    }
}

/// A key that does not have enough `-`-delimited segments to carry all four
/// fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFormatError {
    pub key: String,
    pub segment_count: usize,
}

impl fmt::Display for KeyFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "key '{}' has {} segment(s), expected at least 4 (operating-swing-fan-temperature)",
            self.key, self.segment_count
        )
    }
}

impl std::error::Error for KeyFormatError {}

/// Split a flat key into its four fields.
///
/// The first segment is the operating mode, the second the swing mode, the
/// last the temperature; everything strictly in between is the fan mode,
/// re-joined with `_` (fan modes like `level1-quiet` arrive hyphenated in
/// the flat form and underscored in the parsed form). No whitelist check is
/// performed here; unknown mode names pass through unchanged.
pub fn parse_command_key(raw: &str) -> Result<CommandKey, KeyFormatError> {
    let segments: Vec<&str> = raw.split('-').collect();
    if segments.len() < 4 {
        return Err(KeyFormatError {
            key: raw.to_string(),
            segment_count: segments.len(),
        });
    }

    let last = segments.len() - 1;
    Ok(CommandKey {
        operating_mode: segments[0].to_string(),
        swing_mode: segments[1].to_string(),
        fan_mode: segments[2..last].join("_"),
        temperature: segments[last].to_string(),
    })
}
