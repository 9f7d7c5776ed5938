//! Metrics engine: weekly shifts in, headcount requirement and hiring
//! gap out. Pure functions, no state.

use crate::types::WeekSchedule;
use serde::{Deserialize, Serialize};

/// Derived figures for one role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingMetrics {
    pub total_shifts:   u64,
    pub staffing_needs: f64,
    pub hiring_needs:   f64,
}

/// Round to one decimal place, half away from zero.
///
/// Ties are judged after scaling by ten, so a value like 0.35 (stored
/// just below .35) rounds up here where `toFixed(1)` would round down.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Derive a role's metrics from its week of shifts.
///
/// - `divisor`: shifts one full-time occupant covers per week (> 0)
/// - `volume_multiplier`: traffic scale, 1.0 = baseline
///
/// The hiring gap is taken from the already-rounded staffing need.
pub fn derive_metrics(
    schedule: &WeekSchedule,
    on_hand: u32,
    divisor: f64,
    volume_multiplier: f64,
) -> StaffingMetrics {
    let total_shifts = schedule.total_shifts();
    let staffing_needs = round1(total_shifts as f64 / divisor * volume_multiplier);
    let hiring_needs = round1((staffing_needs - f64::from(on_hand)).max(0.0));
    StaffingMetrics {
        total_shifts,
        staffing_needs,
        hiring_needs,
    }
}
