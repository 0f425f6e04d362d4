//! Banded overtime calculation.
//!
//! Overtime is the time worked beyond the base workday, quantized to half
//! hours. The fractional hour is not rounded to the nearest half: it is
//! bucketed into three bands measured in hundredths of an hour.
//!
//! | Hundredths | Overtime |
//! |---|---|
//! | 0-49 | whole hours only |
//! | 50-70 | whole hours + 0.5 |
//! | 71-99 | whole hours + 1 |

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::OvertimePolicy;
use crate::models::AuditStep;

/// Which band decided the overtime value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeBand {
    /// Worked hours did not exceed the base workday.
    NoOvertime,
    /// Fraction below the half band; rounded down to whole hours.
    RoundDown,
    /// Fraction inside the half band; half an hour added.
    HalfHour,
    /// Fraction above the half band; rounded up to the next hour.
    RoundUp,
}

/// The result of applying the overtime bands to a worked-hours figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeCalculation {
    /// The worked hours the calculation started from.
    pub worked_hours: Decimal,
    /// Worked hours minus the base workday, to two places (may be negative).
    pub raw_overtime: Decimal,
    /// Whole hours of overtime before banding.
    pub whole_hours: Decimal,
    /// The fractional overtime hour in hundredths (0-99).
    pub fraction_hundredths: u32,
    /// The band that applied.
    pub band: OvertimeBand,
    /// The overtime hours, a non-negative multiple of 0.5.
    pub overtime_hours: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies the overtime bands to worked hours.
///
/// # Arguments
///
/// * `worked_hours` - Hours worked in the shift
/// * `policy` - Base workday and band boundaries
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::{OvertimeBand, calculate_overtime};
/// use attendance_engine::config::OvertimePolicy;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let policy = OvertimePolicy::default();
///
/// let result = calculate_overtime(Decimal::from_str("8.75").unwrap(), &policy, 1);
/// assert_eq!(result.band, OvertimeBand::RoundUp);
/// assert_eq!(result.overtime_hours, Decimal::from_str("1").unwrap());
///
/// let result = calculate_overtime(Decimal::from_str("9.6").unwrap(), &policy, 1);
/// assert_eq!(result.overtime_hours, Decimal::from_str("1.5").unwrap());
///
/// let result = calculate_overtime(Decimal::from_str("7.5").unwrap(), &policy, 1);
/// assert_eq!(result.overtime_hours, Decimal::ZERO);
/// ```
pub fn calculate_overtime(
    worked_hours: Decimal,
    policy: &OvertimePolicy,
    step_number: u32,
) -> OvertimeCalculation {
    let raw_overtime = (worked_hours - policy.base_workday_hours)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let (whole_hours, fraction_hundredths, band, overtime_hours) = if raw_overtime <= Decimal::ZERO
    {
        (Decimal::ZERO, 0, OvertimeBand::NoOvertime, Decimal::ZERO)
    } else {
        let whole = raw_overtime.trunc();
        let hundredths = ((raw_overtime - whole) * Decimal::ONE_HUNDRED)
            .trunc()
            .to_u32()
            .unwrap_or(0);

        let (band, overtime) = if hundredths < policy.half_band_start {
            (OvertimeBand::RoundDown, whole)
        } else if hundredths <= policy.half_band_end {
            (OvertimeBand::HalfHour, whole + Decimal::new(5, 1))
        } else {
            (OvertimeBand::RoundUp, whole + Decimal::ONE)
        };
        (whole, hundredths, band, overtime)
    };

    let reasoning = match band {
        OvertimeBand::NoOvertime => format!(
            "{} hours worked does not exceed the {} hour workday, no overtime",
            worked_hours.normalize(),
            policy.base_workday_hours.normalize()
        ),
        OvertimeBand::RoundDown => format!(
            "{} hours over the workday; fraction .{:02} is below .{:02}, rounded down to {}",
            raw_overtime.normalize(),
            fraction_hundredths,
            policy.half_band_start,
            overtime_hours.normalize()
        ),
        OvertimeBand::HalfHour => format!(
            "{} hours over the workday; fraction .{:02} is within .{:02}-.{:02}, banded to {}",
            raw_overtime.normalize(),
            fraction_hundredths,
            policy.half_band_start,
            policy.half_band_end,
            overtime_hours.normalize()
        ),
        OvertimeBand::RoundUp => format!(
            "{} hours over the workday; fraction .{:02} is above .{:02}, rounded up to {}",
            raw_overtime.normalize(),
            fraction_hundredths,
            policy.half_band_end,
            overtime_hours.normalize()
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_banding".to_string(),
        rule_name: "Banded Overtime".to_string(),
        input: serde_json::json!({
            "worked_hours": worked_hours.normalize().to_string(),
            "base_workday_hours": policy.base_workday_hours.normalize().to_string(),
        }),
        output: serde_json::json!({
            "raw_overtime": raw_overtime.normalize().to_string(),
            "band": band,
            "overtime_hours": overtime_hours.normalize().to_string(),
        }),
        reasoning,
    };

    OvertimeCalculation {
        worked_hours,
        raw_overtime,
        whole_hours,
        fraction_hundredths,
        band,
        overtime_hours,
        audit_step,
    }
}
