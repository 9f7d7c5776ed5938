//! CSV export of the staffing plan.
//!
//! One row per (role, day), roles in catalog order, days Mon..Sun. The
//! total/on-hand/needs columns are role-level and repeat on each of the
//! role's seven rows. Values are written as plain text, unquoted.

use crate::{
    config::{Location, RoleCatalog},
    error::StaffingResult,
    state::AppState,
};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub const EXPORT_HEADER: &str =
    "Location,Role,Day,Lunch Shifts,Dinner Shifts,Total Shifts,Staff On Hand,Staffing Needs,Hiring Needs";

pub fn export_csv(state: &AppState, catalog: &RoleCatalog, location: &Location) -> String {
    let mut out = String::new();
    out.push_str(EXPORT_HEADER);
    out.push('\n');

    for role in catalog.names() {
        let Some(record) = state.role(role) else {
            continue;
        };
        for (day, shifts) in record.schedule().iter() {
            out.push_str(&format!(
                "{},{},{},{},{},{},{},{},{}\n",
                location.name,
                role,
                day,
                shifts.lunch,
                shifts.dinner,
                record.total_shifts(),
                record.on_hand(),
                record.staffing_needs(),
                record.hiring_needs(),
            ));
        }
    }
    out
}

/// `staffing-needs-<location id>-<YYYY-MM-DD>.csv`
pub fn export_file_name(location: &Location, date: NaiveDate) -> String {
    format!("staffing-needs-{}-{}.csv", location.id, date.format("%Y-%m-%d"))
}

/// Write an export document into `dir`, returning the file path.
pub fn write_export(dir: &Path, file_name: &str, content: &str) -> StaffingResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, content)?;
    log::info!("Exported {} bytes to {}", content.len(), path.display());
    Ok(path)
}
