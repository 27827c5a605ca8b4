//! Checks a flat command mapping for problems that usually mean a source
//! file was mis-edited: malformed keys, temperatures off the supported grid,
//! scaffold slots never filled in.

use std::fmt;

use serde_json::{Map, Value};

use crate::codes::key::{parse_command_key, OFF_KEY};
use crate::codes::temperature::is_valid_temperature;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }
}

/// Validate every entry of a flat mapping. Key shape failures are errors;
/// off-grid temperatures and empty command values are warnings; a missing
/// `off` command is worth a note but nothing more.
pub fn validate_flat_mapping(flat: &Map<String, Value>) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut has_off = false;

    for (raw_key, value) in flat {
        let context = format!("key '{raw_key}'");

        if raw_key == OFF_KEY {
            has_off = true;
        } else {
            match parse_command_key(raw_key) {
                Ok(key) => {
                    if !is_valid_temperature(&key.temperature) {
                        report.push(
                            ValidationSeverity::Warning,
                            context.clone(),
                            format!(
                                "temperature '{}' is outside the supported 16-32 half-degree grid",
                                key.temperature
                            ),
                        );
                    }
                }
                Err(err) => {
                    report.push(ValidationSeverity::Error, context.clone(), err.to_string());
                    continue;
                }
            }
        }

        let is_empty_value = match value {
            Value::String(s) => s.is_empty(),
            _ => false,
        };
        if is_empty_value {
            report.push(
                ValidationSeverity::Warning,
                context,
                "command value is empty (scaffold slot not filled in)",
            );
        }
    }

    if !has_off {
        report.push(
            ValidationSeverity::Info,
            "mapping",
            "no 'off' command present",
        );
    }

    report
}
