//! Session state: one record per catalog role plus the volume setting.
//!
//! Derived fields on a `RoleRecord` are only ever written through
//! `AppState::recompute_role` / `recompute_all`, so they always match
//! the schedule, headcount, divisor and volume they were computed from.

use crate::{
    config::RoleCatalog,
    metrics::{derive_metrics, round1, StaffingMetrics},
    types::{
        lenient_count, Day, MealPeriod, RoleName, ShiftCount, WeekSchedule,
        DEFAULT_VOLUME_PERCENT,
    },
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecord {
    #[serde(rename = "shifts", default)]
    schedule: WeekSchedule,
    #[serde(default, deserialize_with = "lenient_count")]
    on_hand: u32,
    #[serde(default)]
    total_shifts: u64,
    #[serde(default)]
    staffing_needs: f64,
    #[serde(default)]
    hiring_needs: f64,
}

impl RoleRecord {
    pub fn schedule(&self) -> &WeekSchedule {
        &self.schedule
    }

    pub fn on_hand(&self) -> u32 {
        self.on_hand
    }

    pub fn total_shifts(&self) -> u64 {
        self.total_shifts
    }

    pub fn staffing_needs(&self) -> f64 {
        self.staffing_needs
    }

    pub fn hiring_needs(&self) -> f64 {
        self.hiring_needs
    }

    pub fn metrics(&self) -> StaffingMetrics {
        StaffingMetrics {
            total_shifts:   self.total_shifts,
            staffing_needs: self.staffing_needs,
            hiring_needs:   self.hiring_needs,
        }
    }

    fn apply(&mut self, metrics: StaffingMetrics) {
        self.total_shifts = metrics.total_shifts;
        self.staffing_needs = metrics.staffing_needs;
        self.hiring_needs = metrics.hiring_needs;
    }
}

/// Totals across every role, for the summary row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingTotals {
    pub total_needed:     f64,
    pub total_on_hand:    u64,
    pub total_hiring_gap: f64,
}

/// One bar pair of the current-vs-needed comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub role:    RoleName,
    pub current: u32,
    pub needed:  f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    roles:                     BTreeMap<RoleName, RoleRecord>,
    volume_multiplier_percent: u32,
}

impl AppState {
    /// Every catalog role zeroed, volume at 100%.
    pub fn initialize(catalog: &RoleCatalog) -> Self {
        Self {
            roles: catalog
                .names()
                .map(|name| (name.to_string(), RoleRecord::default()))
                .collect(),
            volume_multiplier_percent: DEFAULT_VOLUME_PERCENT,
        }
    }

    pub(crate) fn from_parts(roles: BTreeMap<RoleName, RoleRecord>, volume_percent: u32) -> Self {
        Self {
            roles,
            volume_multiplier_percent: volume_percent,
        }
    }

    pub fn role(&self, name: &str) -> Option<&RoleRecord> {
        self.roles.get(name)
    }

    /// Role records keyed by name (alphabetical; use the catalog for
    /// display order).
    pub fn roles(&self) -> &BTreeMap<RoleName, RoleRecord> {
        &self.roles
    }

    pub fn volume_multiplier_percent(&self) -> u32 {
        self.volume_multiplier_percent
    }

    pub fn volume_multiplier(&self) -> f64 {
        f64::from(self.volume_multiplier_percent) / 100.0
    }

    pub fn aggregate_totals(&self) -> StaffingTotals {
        let totals = self.roles.values().fold(StaffingTotals::default(), |acc, r| {
            StaffingTotals {
                total_needed:     acc.total_needed + r.staffing_needs,
                total_on_hand:    acc.total_on_hand + u64::from(r.on_hand),
                total_hiring_gap: acc.total_hiring_gap + r.hiring_needs,
            }
        });
        StaffingTotals {
            total_needed:     round1(totals.total_needed),
            total_hiring_gap: round1(totals.total_hiring_gap),
            ..totals
        }
    }

    pub fn chart_series(&self, catalog: &RoleCatalog) -> Vec<ChartPoint> {
        catalog
            .names()
            .filter_map(|name| {
                self.roles.get(name).map(|r| ChartPoint {
                    role:    name.to_string(),
                    current: r.on_hand,
                    needed:  r.staffing_needs,
                })
            })
            .collect()
    }

    // ── Mutation (planner only) ───────────────────────────────────
    // Each returns false when the role is unknown and nothing changed.

    pub(crate) fn set_shift_count(
        &mut self,
        role: &str,
        day: Day,
        period: MealPeriod,
        count: ShiftCount,
    ) -> bool {
        match self.roles.get_mut(role) {
            Some(record) => {
                record.schedule.set(day, period, count);
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_on_hand(&mut self, role: &str, on_hand: u32) -> bool {
        match self.roles.get_mut(role) {
            Some(record) => {
                record.on_hand = on_hand;
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_volume_percent(&mut self, percent: u32) {
        self.volume_multiplier_percent = percent;
    }

    pub(crate) fn recompute_role(&mut self, catalog: &RoleCatalog, role: &str) {
        let multiplier = self.volume_multiplier();
        let (Some(divisor), Some(record)) = (catalog.divisor(role), self.roles.get_mut(role)) else {
            return;
        };
        let metrics = derive_metrics(&record.schedule, record.on_hand, divisor, multiplier);
        record.apply(metrics);
    }

    pub(crate) fn recompute_all(&mut self, catalog: &RoleCatalog) {
        let multiplier = self.volume_multiplier();
        for (name, record) in self.roles.iter_mut() {
            if let Some(divisor) = catalog.divisor(name) {
                let metrics = derive_metrics(&record.schedule, record.on_hand, divisor, multiplier);
                record.apply(metrics);
            }
        }
    }
}
