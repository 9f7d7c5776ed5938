//! staffing-core: restaurant staffing calculator.
//!
//! Shift counts per role and day go in; weekly shift totals, staffing
//! needs and hiring gaps come out. The planner owns the one session
//! state and writes it through to a key-value store after every edit.

pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod metrics;
pub mod planner;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod types;
