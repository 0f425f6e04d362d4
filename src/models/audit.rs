//! Audit and warning models.
//!
//! Calculations record the rule they applied as an [`AuditStep`], and
//! recoverable input problems surface to the caller as [`EntryWarning`]s.

use serde::{Deserialize, Serialize};

/// How one rule turned its input into an output.
///
/// The overtime engine emits one step per composed day, numbered by the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// Ordinal of the step; the day number for overtime steps.
    pub step_number: u32,
    /// Stable rule identifier, e.g. `overtime_banding`.
    pub rule_id: String,
    /// Display name of the rule.
    pub rule_name: String,
    /// Values the rule read.
    pub input: serde_json::Value,
    /// Values the rule produced.
    pub output: serde_json::Value,
    /// Why the band was chosen.
    pub reasoning: String,
}

/// A recoverable problem with the input for one day.
///
/// The day is still recorded using documented defaults; the warning tells
/// the user what was substituted.
///
/// # Example
///
/// ```
/// use attendance_engine::models::EntryWarning;
///
/// let warning = EntryWarning::invalid_time(4, "Invalid time '9h00': expected HH:MM");
/// assert_eq!(warning.code, "INVALID_TIME");
/// assert_eq!(warning.day, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryWarning {
    /// The day number the warning applies to.
    pub day: u32,
    /// Machine-readable warning kind.
    pub code: String,
    /// What was wrong and what was recorded instead.
    pub message: String,
}

impl EntryWarning {
    /// Warning for clock times that could not be parsed.
    pub fn invalid_time(day: u32, message: impl Into<String>) -> Self {
        Self {
            day,
            code: "INVALID_TIME".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "overtime_banding".to_string(),
            rule_name: "Banded Overtime".to_string(),
            input: serde_json::json!({"worked_hours": "8.75"}),
            output: serde_json::json!({"overtime_hours": "1"}),
            reasoning: "fraction 75 rounds up".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        let deserialized: AuditStep = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, step);
    }

    #[test]
    fn test_entry_warning_serialization() {
        let warning = EntryWarning::invalid_time(12, "bad check-out");
        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"INVALID_TIME\""));
        assert!(json.contains("\"day\":12"));
    }
}
