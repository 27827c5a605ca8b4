//! Static descriptive metadata emitted ahead of the command tree in the
//! full output. Hand-authored; nothing here is cross-checked against the
//! keys actually present in the database.

use serde::{Deserialize, Serialize};

use crate::codes::temperature::{MAX_TEMPERATURE, MIN_TEMPERATURE, TEMPERATURE_PRECISION};

/// Device description block in the integration's expected field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceMetadata {
    pub manufacturer: String,
    pub supported_models: Vec<String>,
    pub supported_controller: String,
    pub commands_encoding: String,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub precision: f64,
    pub operation_modes: Vec<String>,
    pub fan_modes: Vec<String>,
    pub swing_modes: Vec<String>,
}

/// The metadata block for the unit this database was captured from.
pub fn device_metadata() -> DeviceMetadata {
    DeviceMetadata {
        manufacturer: "Electra".to_string(),
        supported_models: vec!["Classic 35".to_string(), "Platinum Plus".to_string()],
        supported_controller: "Broadlink".to_string(),
        commands_encoding: "Base64".to_string(),
        min_temperature: MIN_TEMPERATURE,
        max_temperature: MAX_TEMPERATURE,
        precision: TEMPERATURE_PRECISION,
        operation_modes: vec![
            "cool".to_string(),
            "dry".to_string(),
            "fan_only".to_string(),
        ],
        fan_modes: vec![
            "auto".to_string(),
            "auto_quiet".to_string(),
            "night".to_string(),
            "night_quiet".to_string(),
            "level1".to_string(),
            "level1_quiet".to_string(),
            "level2".to_string(),
            "level2_quiet".to_string(),
            "level3".to_string(),
            "level3_quiet".to_string(),
            "level4".to_string(),
            "level4_quiet".to_string(),
            "level5".to_string(),
            "level5_quiet".to_string(),
        ],
        swing_modes: vec![
            "on".to_string(),
            "off".to_string(),
            "comfort".to_string(),
            "on_power_save".to_string(),
            "off_power_save".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_field_names() {
        let value = serde_json::to_value(device_metadata()).expect("metadata should serialize");
        let object = value.as_object().expect("metadata should be an object");
        assert!(object.contains_key("supportedModels"));
        assert!(object.contains_key("commandsEncoding"));
        assert!(object.contains_key("minTemperature"));
        assert_eq!(object["precision"], serde_json::json!(0.5));
    }
}
