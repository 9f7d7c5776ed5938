//! The staffing planner: owner of the session state.
//!
//! EVERY MUTATION RUNS THE SAME PIPELINE, IN THIS ORDER:
//!   1. validate the raw field text (invalid text is a silent no-op)
//!   2. write the raw input into the state
//!   3. recompute derived metrics (one role, or every role on volume)
//!   4. persist the whole state to the key-value store
//!
//! Persistence is best-effort: a failed save is logged and the
//! in-memory state stays authoritative for the session.

use crate::{
    config::{Location, PlannerConfig},
    error::{StaffingError, StaffingResult},
    export::{export_csv, export_file_name, write_export},
    input::{parse_count, parse_volume},
    snapshot::{LegacySnapshot, StateSnapshot, CURRENT_STATE_KEY, LEGACY_STATE_KEY},
    state::{AppState, ChartPoint, StaffingTotals},
    store::KeyValueStore,
    types::{Day, MealPeriod},
};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub struct StaffingPlanner<S: KeyValueStore> {
    config:   PlannerConfig,
    state:    AppState,
    location: usize,
    store:    S,
}

impl<S: KeyValueStore> StaffingPlanner<S> {
    /// Validate the config, then restore the saved session or start a
    /// fresh one.
    pub fn open(config: PlannerConfig, store: S) -> StaffingResult<Self> {
        config.validate()?;
        let mut planner = Self {
            state: AppState::initialize(&config.roles),
            config,
            location: 0,
            store,
        };
        if let Some(loaded) = planner.load() {
            planner.state = loaded;
        } else {
            log::info!("No saved session, starting from zero");
        }
        Ok(planner)
    }

    /// A fresh state for the configured catalog.
    pub fn initialize(&self) -> AppState {
        AppState::initialize(&self.config.roles)
    }

    /// Read the saved session, preferring the current layout over the
    /// legacy one. `None` when neither key yields a usable snapshot.
    pub fn load(&self) -> Option<AppState> {
        let snapshot = self
            .read_snapshot::<StateSnapshot>(CURRENT_STATE_KEY)
            .or_else(|| {
                self.read_snapshot::<LegacySnapshot>(LEGACY_STATE_KEY)
                    .map(StateSnapshot::from_legacy)
            })?;
        Some(snapshot.merge_into(&self.config.roles))
    }

    fn read_snapshot<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match self.store.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Cannot read saved state '{key}': {e}");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(snapshot) => {
                log::info!("Loaded saved state from '{key}'");
                Some(snapshot)
            }
            Err(e) => {
                log::warn!("Ignoring unreadable saved state '{key}': {e}");
                None
            }
        }
    }

    fn save(&mut self) {
        if let Err(e) = self.try_save() {
            log::warn!("Saving state failed, keeping in-memory session: {e}");
        }
    }

    fn try_save(&mut self) -> StaffingResult<()> {
        let json = serde_json::to_vec(&StateSnapshot::capture(&self.state))?;
        self.store.put(CURRENT_STATE_KEY, &json)
    }

    // ── Mutations ─────────────────────────────────────────────────

    pub fn set_shift_count(
        &mut self,
        role: &str,
        day: Day,
        period: MealPeriod,
        raw: &str,
    ) -> &AppState {
        let Some(count) = parse_count(raw) else {
            log::debug!("Ignoring shift count {raw:?} for {role} {day}");
            return &self.state;
        };
        if !self.state.set_shift_count(role, day, period, count) {
            log::debug!("Ignoring shift edit for unknown role '{role}'");
            return &self.state;
        }
        self.state.recompute_role(&self.config.roles, role);
        self.save();
        &self.state
    }

    pub fn set_on_hand(&mut self, role: &str, raw: &str) -> &AppState {
        let Some(on_hand) = parse_count(raw) else {
            log::debug!("Ignoring on-hand {raw:?} for {role}");
            return &self.state;
        };
        if !self.state.set_on_hand(role, on_hand) {
            log::debug!("Ignoring on-hand edit for unknown role '{role}'");
            return &self.state;
        }
        self.state.recompute_role(&self.config.roles, role);
        self.save();
        &self.state
    }

    /// Rescales every role's requirement.
    pub fn set_volume(&mut self, raw: &str) -> &AppState {
        let Some(percent) = parse_volume(raw) else {
            log::debug!("Ignoring volume {raw:?}");
            return &self.state;
        };
        self.state.set_volume_percent(percent);
        self.state.recompute_all(&self.config.roles);
        log::debug!("Volume set to {percent}%, recomputed {} roles", self.config.roles.len());
        self.save();
        &self.state
    }

    /// Discard the session and persist a zeroed state.
    pub fn reset(&mut self) -> &AppState {
        self.state = self.initialize();
        self.save();
        &self.state
    }

    // ── Reads ─────────────────────────────────────────────────────

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn aggregate_totals(&self) -> StaffingTotals {
        self.state.aggregate_totals()
    }

    pub fn chart_series(&self) -> Vec<ChartPoint> {
        self.state.chart_series(&self.config.roles)
    }

    // ── Location and export ───────────────────────────────────────

    pub fn location(&self) -> &Location {
        &self.config.locations[self.location]
    }

    pub fn select_location(&mut self, id: &str) -> StaffingResult<&Location> {
        let index = self
            .config
            .locations
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| StaffingError::UnknownLocation { id: id.to_string() })?;
        self.location = index;
        Ok(&self.config.locations[index])
    }

    pub fn export_csv(&self) -> String {
        export_csv(&self.state, &self.config.roles, self.location())
    }

    pub fn export_file_name(&self, date: NaiveDate) -> String {
        export_file_name(self.location(), date)
    }

    /// Write the CSV export for `date` into `dir`.
    pub fn export_to(&self, dir: &Path, date: NaiveDate) -> StaffingResult<PathBuf> {
        write_export(dir, &self.export_file_name(date), &self.export_csv())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
