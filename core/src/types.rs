//! Shared primitive types used across the planner.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Name of a staff role, e.g. "Server". Keys the role catalog and state.
pub type RoleName = String;

/// Shifts worked in one meal period on one day.
pub type ShiftCount = u32;

pub const MIN_VOLUME_PERCENT: u32 = 25;
pub const MAX_VOLUME_PERCENT: u32 = 200;
pub const DEFAULT_VOLUME_PERCENT: u32 = 100;

/// Day of the planning week. Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Mon,
    Tues,
    Wed,
    Thurs,
    Fri,
    Sat,
    Sun,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tues,
        Day::Wed,
        Day::Thurs,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Day::Mon   => "Mon",
            Day::Tues  => "Tues",
            Day::Wed   => "Wed",
            Day::Thurs => "Thurs",
            Day::Fri   => "Fri",
            Day::Sat   => "Sat",
            Day::Sun   => "Sun",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Day {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown day: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealPeriod {
    Lunch,
    Dinner,
}

impl FromStr for MealPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lunch"  => Ok(MealPeriod::Lunch),
            "dinner" => Ok(MealPeriod::Dinner),
            _        => Err(format!("Unknown meal period: {s}")),
        }
    }
}

/// Read a saved count. Older sessions stored whatever the field held,
/// negatives included; those read back as zero.
pub(crate) fn lenient_count<'de, D>(deserializer: D) -> Result<ShiftCount, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    if raw < 0 {
        log::warn!("Saved count {raw} is negative, reading as 0");
    }
    Ok(ShiftCount::try_from(raw.max(0)).unwrap_or(ShiftCount::MAX))
}

/// Lunch and dinner shift counts for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    #[serde(default, deserialize_with = "lenient_count")]
    pub lunch: ShiftCount,
    #[serde(default, deserialize_with = "lenient_count")]
    pub dinner: ShiftCount,
}

impl DaySchedule {
    pub fn get(&self, period: MealPeriod) -> ShiftCount {
        match period {
            MealPeriod::Lunch  => self.lunch,
            MealPeriod::Dinner => self.dinner,
        }
    }

    pub fn set(&mut self, period: MealPeriod, count: ShiftCount) {
        match period {
            MealPeriod::Lunch  => self.lunch = count,
            MealPeriod::Dinner => self.dinner = count,
        }
    }

    pub fn total(&self) -> u64 {
        u64::from(self.lunch) + u64::from(self.dinner)
    }
}

/// A full week of shift counts. Every day is always present.
///
/// Serialized as a map keyed by day label; days missing from a stored
/// map come back as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Day, DaySchedule>",
    into = "BTreeMap<Day, DaySchedule>"
)]
pub struct WeekSchedule {
    days: [DaySchedule; 7],
}

impl WeekSchedule {
    pub fn day(&self, day: Day) -> DaySchedule {
        self.days[day.index()]
    }

    pub fn get(&self, day: Day, period: MealPeriod) -> ShiftCount {
        self.days[day.index()].get(period)
    }

    pub fn set(&mut self, day: Day, period: MealPeriod, count: ShiftCount) {
        self.days[day.index()].set(period, count);
    }

    /// Days in week order.
    pub fn iter(&self) -> impl Iterator<Item = (Day, DaySchedule)> + '_ {
        Day::ALL.into_iter().map(move |d| (d, self.day(d)))
    }

    pub fn total_shifts(&self) -> u64 {
        self.days.iter().map(DaySchedule::total).sum()
    }
}

impl From<BTreeMap<Day, DaySchedule>> for WeekSchedule {
    fn from(map: BTreeMap<Day, DaySchedule>) -> Self {
        let mut week = WeekSchedule::default();
        for (day, schedule) in map {
            week.days[day.index()] = schedule;
        }
        week
    }
}

impl From<WeekSchedule> for BTreeMap<Day, DaySchedule> {
    fn from(week: WeekSchedule) -> Self {
        week.iter().collect()
    }
}
