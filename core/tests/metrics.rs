//! Metrics engine tests.
//!
//! Covers the shift total, the rounded staffing need and the floored
//! hiring gap, including the volume multiplier.

use staffing_core::{
    metrics::{derive_metrics, round1},
    types::{Day, MealPeriod, WeekSchedule},
};

fn week_from(counts: [(u32, u32); 7]) -> WeekSchedule {
    let mut week = WeekSchedule::default();
    for (day, (lunch, dinner)) in Day::ALL.into_iter().zip(counts) {
        week.set(day, MealPeriod::Lunch, lunch);
        week.set(day, MealPeriod::Dinner, dinner);
    }
    week
}

#[test]
fn total_shifts_is_exact_sum_of_all_fourteen_cells() {
    let week = week_from([(1, 2), (3, 4), (5, 6), (7, 8), (9, 10), (11, 12), (13, 14)]);
    let m = derive_metrics(&week, 0, 4.0, 1.0);
    assert_eq!(m.total_shifts, (1..=14).sum::<u64>());
}

#[test]
fn bartender_monday_scenario() {
    let week = week_from([(2, 1), (0, 0), (0, 0), (0, 0), (0, 0), (0, 0), (0, 0)]);
    let m = derive_metrics(&week, 0, 4.0, 1.0);
    assert_eq!(m.total_shifts, 3);
    assert_eq!(m.staffing_needs, 0.8, "3 / 4.0 = 0.75 rounds to 0.8");
    assert_eq!(m.hiring_needs, 0.8);
}

#[test]
fn volume_multiplier_scales_staffing_need() {
    let week = week_from([(2, 1), (1, 1), (1, 1), (1, 0), (0, 1), (0, 0), (0, 0)]);
    assert_eq!(week.total_shifts(), 9);

    let busy = derive_metrics(&week, 0, 4.5, 1.5);
    assert_eq!(busy.staffing_needs, 3.0);

    let normal = derive_metrics(&week, 0, 4.5, 1.0);
    assert_eq!(normal.staffing_needs, 2.0);

    let slow = derive_metrics(&week, 0, 4.5, 0.25);
    assert_eq!(slow.staffing_needs, 0.5);
}

#[test]
fn hiring_need_is_zero_when_on_hand_covers_need() {
    let week = week_from([(4, 4), (4, 4), (0, 0), (0, 0), (0, 0), (0, 0), (0, 0)]);
    for on_hand in [4, 5, 20] {
        let m = derive_metrics(&week, on_hand, 4.0, 1.0);
        assert_eq!(m.staffing_needs, 4.0);
        assert_eq!(m.hiring_needs, 0.0, "on_hand={on_hand} should leave no gap");
    }
}

#[test]
fn needs_are_never_negative_and_match_round1() {
    let divisors = [4.0, 4.5, 3.25];
    let multipliers = [0.25, 0.5, 1.0, 1.37, 2.0];
    for total in 0..60u32 {
        let mut week = WeekSchedule::default();
        week.set(Day::Sat, MealPeriod::Dinner, total);
        for divisor in divisors {
            for multiplier in multipliers {
                for on_hand in [0u32, 1, 3, 10] {
                    let m = derive_metrics(&week, on_hand, divisor, multiplier);
                    let expected = round1(f64::from(total) / divisor * multiplier);
                    assert_eq!(m.staffing_needs, expected);
                    assert!(m.staffing_needs >= 0.0);
                    assert_eq!(
                        m.hiring_needs,
                        round1((expected - f64::from(on_hand)).max(0.0))
                    );
                    assert!(m.hiring_needs >= 0.0);
                }
            }
        }
    }
}
