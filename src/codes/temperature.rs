//! The target-temperature domain shared by the expander, the template
//! generator and the validator: 16 to 32 degrees in half-degree steps.

pub const MIN_TEMPERATURE: f64 = 16.0;
pub const MAX_TEMPERATURE: f64 = 32.0;
pub const TEMPERATURE_PRECISION: f64 = 0.5;

const MIN_HALF_DEGREES: i64 = 32;
const MAX_HALF_DEGREES: i64 = 64;

/// All 33 temperature steps as strings, ascending: `"16"`, `"16.5"`, ...,
/// `"32"`. Whole degrees render without a trailing `.0`.
///
/// Derived from an integer half-degree counter rather than repeated float
/// addition, so every caller formats the same set identically.
pub fn temperature_steps() -> Vec<String> {
    (MIN_HALF_DEGREES..=MAX_HALF_DEGREES)
        .map(format_half_degrees)
        .collect()
}

/// Whether `raw` is one of the textual temperature steps.
pub fn is_valid_temperature(raw: &str) -> bool {
    let Some(half_degrees) = parse_half_degrees(raw) else {
        return false;
    };
    (MIN_HALF_DEGREES..=MAX_HALF_DEGREES).contains(&half_degrees)
}

fn format_half_degrees(half_degrees: i64) -> String {
    if half_degrees % 2 == 0 {
        (half_degrees / 2).to_string()
    } else {
        format!("{}.5", half_degrees / 2)
    }
}

fn parse_half_degrees(raw: &str) -> Option<i64> {
    if let Some(whole) = raw.strip_suffix(".5") {
        return whole.parse::<i64>().ok().map(|w| w * 2 + 1);
    }
    raw.parse::<i64>().ok().map(|w| w * 2)
}
