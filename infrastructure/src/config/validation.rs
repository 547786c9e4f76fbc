//! Configuration issues reported by [`FileConfig::validate`](super::FileConfig::validate).
//!
//! Issues never abort startup; the caller logs them and continues with the
//! documented fallback value.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The setting cannot work at all and has been replaced.
    Error,
    /// The setting works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A string field did not parse into its enum.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A required string field is empty.
    EmptyValue { field: String },
    /// A numeric field is zero where zero makes no sense.
    ZeroValue { field: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn empty(field: &str, fallback: &str) -> Self {
        Self {
            severity: Severity::Warning,
            code: ConfigIssueCode::EmptyValue {
                field: field.to_string(),
            },
            message: format!("{}: empty value, falling back to '{}'", field, fallback),
        }
    }
}
