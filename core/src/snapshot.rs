//! Snapshot serialization: session state to/from the persisted JSON.
//!
//! Two layouts exist under two keys:
//!   - legacy:  `{ "<role>": RoleRecord, ... }` (no volume)
//!   - current: `{ "staffing": { "<role>": RoleRecord, ... }, "volume": 100 }`
//! Only the current layout is written. Either may be read.

use crate::{
    config::RoleCatalog,
    state::{AppState, RoleRecord},
    types::{RoleName, DEFAULT_VOLUME_PERCENT, MAX_VOLUME_PERCENT, MIN_VOLUME_PERCENT},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const LEGACY_STATE_KEY: &str = "staffingData";
pub const CURRENT_STATE_KEY: &str = "staffingPlannerState";

pub type LegacySnapshot = BTreeMap<RoleName, RoleRecord>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub staffing: BTreeMap<RoleName, RoleRecord>,
    #[serde(default)]
    pub volume: Option<u32>,
}

impl StateSnapshot {
    pub fn capture(state: &AppState) -> Self {
        Self {
            staffing: state.roles().clone(),
            volume:   Some(state.volume_multiplier_percent()),
        }
    }

    pub fn from_legacy(roles: LegacySnapshot) -> Self {
        Self {
            staffing: roles,
            volume:   None,
        }
    }

    /// Overlay this snapshot onto a freshly initialized state.
    ///
    /// Catalog roles the snapshot lacks keep their zero defaults; snapshot
    /// roles the catalog lacks are dropped. Derived fields are recomputed
    /// from the loaded inputs.
    pub fn merge_into(self, catalog: &RoleCatalog) -> AppState {
        let mut roles = AppState::initialize(catalog).roles().clone();
        let mut carried = 0usize;
        for (name, record) in self.staffing {
            if catalog.contains(&name) {
                roles.insert(name, record);
                carried += 1;
            } else {
                log::warn!("Dropping saved role '{name}': not in the role catalog");
            }
        }

        let volume = match self.volume {
            None => DEFAULT_VOLUME_PERCENT,
            Some(v) if (MIN_VOLUME_PERCENT..=MAX_VOLUME_PERCENT).contains(&v) => v,
            Some(v) => {
                log::warn!("Saved volume {v}% out of range, using {DEFAULT_VOLUME_PERCENT}%");
                DEFAULT_VOLUME_PERCENT
            }
        };

        log::info!(
            "Merged snapshot: {carried} saved roles, {} defaulted, volume {volume}%",
            catalog.len().saturating_sub(carried)
        );

        let mut state = AppState::from_parts(roles, volume);
        state.recompute_all(catalog);
        state
    }
}
