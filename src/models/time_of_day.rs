//! Clock time model.
//!
//! This module defines [`TimeOfDay`], the canonical representation of a
//! check-in or check-out time entered as `HH:MM` text.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock time with minute precision.
///
/// Parsed from `H:MM` or `HH:MM` text and always displayed zero-padded.
/// Serializes as its `HH:MM` string so stored records keep the text form.
///
/// # Example
///
/// ```
/// use attendance_engine::models::TimeOfDay;
///
/// let time: TimeOfDay = "9:05".parse().unwrap();
/// assert_eq!(time.hour(), 9);
/// assert_eq!(time.minute(), 5);
/// assert_eq!(time.to_string(), "09:05");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// 00:00, the placeholder time for days without clock times.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay::from_hm(0, 0);

    /// Builds a time from literal parts known to be in range.
    pub(crate) const fn from_hm(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// Creates a time, validating that hour is 0-23 and minute is 0-59.
    pub fn new(hour: u32, minute: u32) -> EngineResult<Self> {
        let invalid = |reason: &str| EngineError::InvalidTime {
            input: format!("{}:{:02}", hour, minute),
            reason: reason.to_string(),
        };
        if hour > 23 {
            return Err(invalid("hour must be between 0 and 23"));
        }
        if minute > 59 {
            return Err(invalid("minute must be between 0 and 59"));
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Parses `H:MM` or `HH:MM` text.
    ///
    /// Surrounding whitespace is ignored. Anything that does not split into
    /// exactly two unsigned integer parts on `:` is rejected, as is an
    /// out-of-range hour or minute.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::TimeOfDay;
    ///
    /// assert!(TimeOfDay::parse("18:30").is_ok());
    /// assert!(TimeOfDay::parse("9h00").is_err());
    /// assert!(TimeOfDay::parse("12:60").is_err());
    /// ```
    pub fn parse(input: &str) -> EngineResult<Self> {
        let invalid = |reason: &str| EngineError::InvalidTime {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = input.trim().split(':');
        let (hour, minute) = match (parts.next(), parts.next(), parts.next()) {
            (Some(hour), Some(minute), None) => (hour, minute),
            _ => return Err(invalid("expected HH:MM")),
        };

        let hour = parse_component(hour).ok_or_else(|| invalid("hour is not a number"))?;
        let minute = parse_component(minute).ok_or_else(|| invalid("minute is not a number"))?;

        if hour > 23 {
            return Err(invalid("hour must be between 0 and 23"));
        }
        if minute > 59 {
            return Err(invalid("minute must be between 0 and 59"));
        }

        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        u32::from(self.hour)
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        u32::from(self.minute)
    }

    /// Returns the number of minutes since midnight.
    pub fn minutes_from_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Returns the time as fractional hours since midnight.
    ///
    /// Minutes convert at full precision (`17:45` is `17.75`), not as
    /// `hour.minute` digits.
    pub fn as_hours(&self) -> Decimal {
        Decimal::from(self.hour()) + Decimal::from(self.minute()) / Decimal::from(60)
    }
}

fn parse_component(part: &str) -> Option<u32> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_padded_time() {
        let time = TimeOfDay::parse("09:00").unwrap();
        assert_eq!(time.hour(), 9);
        assert_eq!(time.minute(), 0);
    }

    #[test]
    fn test_parse_single_digit_hour() {
        let time = TimeOfDay::parse("9:30").unwrap();
        assert_eq!(time, TimeOfDay::new(9, 30).unwrap());
        assert_eq!(time.to_string(), "09:30");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(
            TimeOfDay::parse(" 18:00 ").unwrap(),
            TimeOfDay::new(18, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_boundaries() {
        assert_eq!(TimeOfDay::parse("00:00").unwrap(), TimeOfDay::MIDNIGHT);
        assert_eq!(
            TimeOfDay::parse("23:59").unwrap().minutes_from_midnight(),
            MINUTES_PER_DAY - 1
        );
    }

    #[test]
    fn test_parse_rejects_wrong_separator() {
        let err = TimeOfDay::parse("9h00").unwrap_err();
        match err {
            EngineError::InvalidTime { input, reason } => {
                assert_eq!(input, "9h00");
                assert_eq!(reason, "expected HH:MM");
            }
            other => panic!("Expected InvalidTime, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_extra_parts() {
        assert!(TimeOfDay::parse("09:00:00").is_err());
    }

    #[test]
    fn test_parse_rejects_non_numeric_parts() {
        assert!(TimeOfDay::parse("ab:00").is_err());
        assert!(TimeOfDay::parse("09:xx").is_err());
        assert!(TimeOfDay::parse(":30").is_err());
        assert!(TimeOfDay::parse("09:").is_err());
        assert!(TimeOfDay::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_signed_parts() {
        assert!(TimeOfDay::parse("-1:00").is_err());
        assert!(TimeOfDay::parse("+9:00").is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(TimeOfDay::parse("24:00").is_err());
        assert!(TimeOfDay::parse("12:60").is_err());
        assert!(TimeOfDay::parse("123:00").is_err());
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(TimeOfDay::new(24, 0).is_err());
        assert!(TimeOfDay::new(0, 60).is_err());
    }

    #[test]
    fn test_as_hours_uses_full_minute_precision() {
        assert_eq!(TimeOfDay::parse("17:45").unwrap().as_hours(), dec("17.75"));
        assert_eq!(TimeOfDay::parse("09:30").unwrap().as_hours(), dec("9.5"));
        assert_eq!(TimeOfDay::parse("00:00").unwrap().as_hours(), Decimal::ZERO);
    }

    #[test]
    fn test_ordering_follows_clock() {
        let early = TimeOfDay::parse("08:59").unwrap();
        let late = TimeOfDay::parse("20:00").unwrap();
        assert!(early < late);
    }

    #[test]
    fn test_serializes_as_text() {
        let time = TimeOfDay::parse("7:05").unwrap();
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"07:05\"");

        let parsed: TimeOfDay = serde_json::from_str("\"22:15\"").unwrap();
        assert_eq!(parsed, TimeOfDay::new(22, 15).unwrap());
    }

    #[test]
    fn test_deserialize_rejects_bad_text() {
        let result: Result<TimeOfDay, _> = serde_json::from_str("\"25:00\"");
        assert!(result.is_err());
    }
}
