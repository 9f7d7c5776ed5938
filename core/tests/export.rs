//! CSV export tests.

use chrono::NaiveDate;
use staffing_core::{
    config::PlannerConfig,
    export::EXPORT_HEADER,
    planner::StaffingPlanner,
    store::SqliteStore,
    types::{Day, MealPeriod},
};

fn build(config: PlannerConfig) -> StaffingPlanner<SqliteStore> {
    let store = SqliteStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    StaffingPlanner::open(config, store).expect("open planner")
}

#[test]
fn header_is_exact() {
    assert_eq!(
        EXPORT_HEADER,
        "Location,Role,Day,Lunch Shifts,Dinner Shifts,Total Shifts,Staff On Hand,Staffing Needs,Hiring Needs"
    );
    let csv = build(PlannerConfig::default()).export_csv();
    assert_eq!(csv.lines().next(), Some(EXPORT_HEADER));
}

#[test]
fn one_row_per_role_and_day() {
    for config in [PlannerConfig::default(), PlannerConfig::legacy()] {
        let roles = config.roles.len();
        let csv = build(config).export_csv();
        assert_eq!(csv.lines().count(), 1 + 7 * roles, "for {roles} roles");
    }
}

#[test]
fn rows_nest_days_inside_roles_in_catalog_order() {
    let planner = build(PlannerConfig::default());
    let csv = planner.export_csv();
    let rows: Vec<(&str, &str)> = csv
        .lines()
        .skip(1)
        .map(|line| {
            let cols: Vec<&str> = line.split(',').collect();
            (cols[1], cols[2])
        })
        .collect();

    let expected: Vec<(&str, &str)> = planner
        .config()
        .roles
        .names()
        .flat_map(|role| Day::ALL.into_iter().map(move |d| (role, d.label())))
        .collect();
    assert_eq!(rows, expected);
}

#[test]
fn role_level_columns_repeat_on_every_day_row() {
    let mut planner = build(PlannerConfig::default());
    planner.select_location("OM").unwrap();
    planner.set_shift_count("Bartender", Day::Mon, MealPeriod::Lunch, "2");
    planner.set_shift_count("Bartender", Day::Mon, MealPeriod::Dinner, "1");

    let csv = planner.export_csv();
    let bartender: Vec<&str> = csv
        .lines()
        .filter(|l| l.split(',').nth(1) == Some("Bartender"))
        .collect();

    assert_eq!(bartender.len(), 7);
    assert_eq!(bartender[0], "Oakland Mall,Bartender,Mon,2,1,3,0,0.8,0.8");
    assert_eq!(bartender[1], "Oakland Mall,Bartender,Tues,0,0,3,0,0.8,0.8");
    assert_eq!(bartender[6], "Oakland Mall,Bartender,Sun,0,0,3,0,0.8,0.8");
}

#[test]
fn whole_numbers_print_without_decimals() {
    let mut planner = build(PlannerConfig::default());
    planner.set_shift_count("Server", Day::Sat, MealPeriod::Dinner, "9");
    planner.set_on_hand("Server", "5");

    let csv = planner.export_csv();
    let first = csv.lines().nth(1).unwrap();
    assert_eq!(first, "Auburn Hills,Server,Mon,0,0,9,5,2,0");
}

#[test]
fn file_name_carries_location_and_date() {
    let mut planner = build(PlannerConfig::default());
    planner.select_location("FG").unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
    assert_eq!(planner.export_file_name(date), "staffing-needs-FG-2026-03-07.csv");
}

#[test]
fn export_writes_the_document_to_disk() {
    let mut planner = build(PlannerConfig::default());
    planner.set_shift_count("Host", Day::Wed, MealPeriod::Lunch, "3");

    let dir = std::env::temp_dir().join(format!("staffing-export-{}", std::process::id()));
    let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let path = planner.export_to(&dir, date).expect("export");

    assert_eq!(path.file_name().unwrap(), "staffing-needs-AH-2026-10-19.csv");
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, planner.export_csv());

    std::fs::remove_dir_all(&dir).ok();
}
