//! staffing-planner: headless front end for the staffing calculator.
//!
//! Usage:
//!   staffing-planner [--db staffing.db] [--data-dir ./data] show
//!   staffing-planner set-shift Server Mon lunch 3
//!   staffing-planner set-on-hand Server 2
//!   staffing-planner set-volume 150
//!   staffing-planner --location SH --out ./exports export
//!   staffing-planner reset
//!   staffing-planner --ipc-mode

use anyhow::Result;
use serde::Serialize;
use staffing_core::{
    config::PlannerConfig,
    planner::StaffingPlanner,
    state::{ChartPoint, StaffingTotals},
    store::SqliteStore,
    types::{Day, MealPeriod, WeekSchedule},
};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

type Planner = StaffingPlanner<SqliteStore>;

const VALUE_FLAGS: [&str; 4] = ["--db", "--data-dir", "--location", "--out"];

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    SetShift {
        role:   String,
        day:    Day,
        period: MealPeriod,
        value:  String,
    },
    SetOnHand {
        role:  String,
        value: String,
    },
    SetVolume {
        value: String,
    },
    SelectLocation {
        id: String,
    },
    Export {
        #[serde(default)]
        out: Option<String>,
    },
    Reset,
    Quit,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RoleView {
    role:           String,
    shifts:         WeekSchedule,
    on_hand:        u32,
    total_shifts:   u64,
    staffing_needs: f64,
    hiring_needs:   f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UiState {
    location:      String,
    location_code: String,
    volume:        u32,
    roles:         Vec<RoleView>,
    totals:        StaffingTotals,
    chart:         Vec<ChartPoint>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = flag_value(&args, "--db").unwrap_or("staffing.db");
    let out_dir = flag_value(&args, "--out").unwrap_or(".").to_string();

    let config = match flag_value(&args, "--data-dir") {
        Some(dir) => PlannerConfig::load(dir)?,
        None => PlannerConfig::default(),
    };

    let store = SqliteStore::open(db)?;
    store.migrate()?;
    let mut planner = StaffingPlanner::open(config, store)?;

    if let Some(id) = flag_value(&args, "--location") {
        planner.select_location(id)?;
    }

    if ipc_mode {
        return run_ipc_loop(&mut planner, &out_dir);
    }

    let words = positional(&args);
    match words.as_slice() {
        [] | ["show"] => {}
        ["set-shift", role, day, period, value] => {
            let day: Day = day.parse().map_err(anyhow::Error::msg)?;
            let period: MealPeriod = period.parse().map_err(anyhow::Error::msg)?;
            planner.set_shift_count(role, day, period, value);
        }
        ["set-on-hand", role, value] => {
            planner.set_on_hand(role, value);
        }
        ["set-volume", value] => {
            planner.set_volume(value);
        }
        ["export"] => {
            let path = planner.export_to(Path::new(&out_dir), today())?;
            println!("Exported {}", path.display());
            return Ok(());
        }
        ["reset"] => {
            planner.reset();
        }
        other => anyhow::bail!("Unknown command: {}", other.join(" ")),
    }

    print_summary(&planner);
    Ok(())
}

fn run_ipc_loop(planner: &mut Planner, out_dir: &str) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {}
            IpcCommand::SetShift { role, day, period, value } => {
                planner.set_shift_count(&role, day, period, &value);
            }
            IpcCommand::SetOnHand { role, value } => {
                planner.set_on_hand(&role, &value);
            }
            IpcCommand::SetVolume { value } => {
                planner.set_volume(&value);
            }
            IpcCommand::Reset => {
                planner.reset();
            }
            IpcCommand::SelectLocation { id } => {
                if let Err(e) = planner.select_location(&id) {
                    let err_json = serde_json::json!({ "error": e.to_string() });
                    writeln!(stdout, "{}", err_json)?;
                    stdout.flush()?;
                    continue;
                }
            }
            IpcCommand::Export { out } => {
                let dir = out.as_deref().unwrap_or(out_dir);
                let reply = match planner.export_to(Path::new(dir), today()) {
                    Ok(path) => serde_json::json!({ "exported": path.display().to_string() }),
                    Err(e) => serde_json::json!({ "error": e.to_string() }),
                };
                writeln!(stdout, "{}", reply)?;
                stdout.flush()?;
                continue;
            }
        }

        let state = build_ui_state(planner);
        writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn build_ui_state(planner: &Planner) -> UiState {
    let state = planner.state();
    let roles = planner
        .config()
        .roles
        .names()
        .filter_map(|name| {
            state.role(name).map(|r| RoleView {
                role:           name.to_string(),
                shifts:         *r.schedule(),
                on_hand:        r.on_hand(),
                total_shifts:   r.total_shifts(),
                staffing_needs: r.staffing_needs(),
                hiring_needs:   r.hiring_needs(),
            })
        })
        .collect();

    UiState {
        location:      planner.location().name.clone(),
        location_code: planner.location().code.clone(),
        volume:        state.volume_multiplier_percent(),
        roles,
        totals:        planner.aggregate_totals(),
        chart:         planner.chart_series(),
    }
}

fn print_summary(planner: &Planner) {
    let state = planner.state();
    let location = planner.location();

    println!("=== STAFFING PLAN ===");
    println!("  location:  {} - {}", location.name, location.code);
    println!("  volume:    {}%", state.volume_multiplier_percent());
    println!();
    println!("  {:<10} {:>7} {:>8} {:>7} {:>7}", "role", "shifts", "on hand", "needed", "hire");
    for name in planner.config().roles.names() {
        if let Some(r) = state.role(name) {
            println!(
                "  {:<10} {:>7} {:>8} {:>7.1} {:>7.1}",
                name,
                r.total_shifts(),
                r.on_hand(),
                r.staffing_needs(),
                r.hiring_needs()
            );
        }
    }

    let totals = planner.aggregate_totals();
    println!();
    println!("  needed:    {:.1}", totals.total_needed);
    println!("  on hand:   {}", totals.total_on_hand);
    println!("  hiring:    {:.1}", totals.total_hiring_gap);
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Arguments that are neither flags nor flag values.
fn positional(args: &[String]) -> Vec<&str> {
    let mut words = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
        } else if !arg.starts_with("--") {
            words.push(arg.as_str());
        }
    }
    words
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
