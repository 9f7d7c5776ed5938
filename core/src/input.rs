//! Validation of raw text from the numeric fields.
//!
//! Empty text means zero. Anything that is not an integer, or is out of
//! the field's bounds, yields `None` and the caller drops the edit.

use crate::types::{ShiftCount, MAX_VOLUME_PERCENT, MIN_VOLUME_PERCENT};

fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed.parse::<i64>().ok()
}

/// Shift counts and on-hand headcount: integers >= 0.
pub fn parse_count(raw: &str) -> Option<ShiftCount> {
    parse_integer(raw).and_then(|n| ShiftCount::try_from(n).ok())
}

/// Volume percentage: integers in [25, 200].
pub fn parse_volume(raw: &str) -> Option<u32> {
    parse_integer(raw)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|p| (MIN_VOLUME_PERCENT..=MAX_VOLUME_PERCENT).contains(p))
}
