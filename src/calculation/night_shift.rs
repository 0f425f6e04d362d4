//! Night-shift classification.

use crate::config::NightShiftPolicy;
use crate::error::EngineResult;
use crate::models::TimeOfDay;

use super::shift_duration::adjusted_check_out_minutes;

/// Returns true if a shift counts as a night shift.
///
/// The check-out is first moved to the next day when it is not after the
/// check-in. The shift is a night shift if the check-in is at or after
/// `policy.starts_at`, or the adjusted check-out is at or before
/// `policy.ends_by`.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::is_night_shift;
/// use attendance_engine::config::NightShiftPolicy;
/// use attendance_engine::models::TimeOfDay;
///
/// let policy = NightShiftPolicy::default();
/// let t = |s| TimeOfDay::parse(s).unwrap();
///
/// assert!(is_night_shift(t("22:00"), t("06:00"), &policy));
/// assert!(!is_night_shift(t("09:00"), t("18:00"), &policy));
/// ```
pub fn is_night_shift(check_in: TimeOfDay, check_out: TimeOfDay, policy: &NightShiftPolicy) -> bool {
    let adjusted_out = adjusted_check_out_minutes(check_in, check_out);
    check_in >= policy.starts_at || adjusted_out <= policy.ends_by.minutes_from_midnight()
}

/// Classifies a shift given as `HH:MM` text.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidTime`] if either time fails
/// to parse.
pub fn classify_night_shift(
    check_in: &str,
    check_out: &str,
    policy: &NightShiftPolicy,
) -> EngineResult<bool> {
    Ok(is_night_shift(
        TimeOfDay::parse(check_in)?,
        TimeOfDay::parse(check_out)?,
        policy,
    ))
}
