//! Operator CLI for the timetable engine.
//!
//! # Responsibility
//! - Load configuration, start logging and open the store.
//! - Expose seeding, generation, inspection and edit commands.
//! - Print action responses and read models as JSON.

use clap::{Parser, Subcommand};
use log::warn;
use rusqlite::Connection;
use serde::Serialize;
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use timetable_core::db::open_db;
use timetable_core::{
    init_logging_from_config, load_timetable_grid, seed_sample_data, ActionResponse,
    GenerationService, ScheduleEditor, ScheduleRepository, SqliteCatalogRepository,
    SqliteScheduleRepository, SqliteTimeSlotRepository, TimeSlotRepository, TimetableConfig,
};

#[derive(Parser)]
#[command(author, version, about = "Generate and edit weekly class timetables", long_about = None)]
struct Args {
    /// Configuration file path; defaults apply when it does not exist
    #[arg(short = 'c', long = "config", default_value = "timetable.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Insert the sample catalog into an empty store
    Seed,
    /// Regenerate every classroom's timetable
    Generate,
    /// Print one classroom's day x period grid
    Show { classroom_id: i64 },
    /// List every committed entry with display names
    Entries,
    /// List time slot ids in day and period order
    Slots,
    /// Move an entry to another time slot
    Move { entry_id: i64, timeslot_id: i64 },
    /// Exchange the time slots of two entries
    Swap { first_id: i64, second_id: i64 },
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = if args.config.exists() {
        TimetableConfig::load(&args.config)?
    } else {
        TimetableConfig::default()
    };
    init_logging_from_config(&config.logging)?;
    if !args.config.exists() {
        warn!(
            "event=config_load module=cli status=fallback path={}",
            args.config.display()
        );
    }

    let conn = open_db(&config.database_path)?;

    let success = run(&conn, &config, args.command, &mut std::io::stdout().lock())?;
    if !success {
        std::process::exit(1);
    }
    Ok(())
}

/// Executes one command; returns `false` when an action was refused.
fn run(
    conn: &Connection,
    config: &TimetableConfig,
    command: Command,
    out: &mut impl Write,
) -> Result<bool, Box<dyn Error>> {
    let catalog = SqliteCatalogRepository::try_new(conn)?;
    let timeslots = SqliteTimeSlotRepository::try_new(conn)?;
    let schedule = SqliteScheduleRepository::try_new(conn)?;

    match command {
        Command::Seed => {
            let response = if seed_sample_data(&catalog, &timeslots, config.periods_per_day)? {
                ActionResponse::success("Sample data inserted.")
            } else {
                ActionResponse::success("Catalog already populated; nothing inserted.")
            };
            print_action(out, &response)
        }
        Command::Generate => {
            let service =
                GenerationService::new(catalog, timeslots, schedule, config.periods_per_day);
            print_action(out, &service.run_generation(&mut config.rng()))
        }
        Command::Show { classroom_id } => {
            let grid = load_timetable_grid(&catalog, &timeslots, &schedule, classroom_id)?;
            print_json(out, &grid)?;
            Ok(true)
        }
        Command::Entries => {
            print_json(out, &schedule.list_entry_views(None)?)?;
            Ok(true)
        }
        Command::Slots => {
            print_json(out, &timeslots.list_timeslots()?)?;
            Ok(true)
        }
        Command::Move {
            entry_id,
            timeslot_id,
        } => {
            let editor = ScheduleEditor::new(schedule, timeslots);
            print_action(out, &editor.move_entry_response(entry_id, timeslot_id))
        }
        Command::Swap {
            first_id,
            second_id,
        } => {
            let editor = ScheduleEditor::new(schedule, timeslots);
            print_action(out, &editor.swap_entries_response(first_id, second_id))
        }
    }
}

fn print_action(out: &mut impl Write, response: &ActionResponse) -> Result<bool, Box<dyn Error>> {
    print_json(out, response)?;
    Ok(response.success)
}

fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<(), Box<dyn Error>> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{run, Command};
    use rusqlite::Connection;
    use serde_json::Value;
    use std::path::Path;
    use timetable_core::db::open_db;
    use timetable_core::TimetableConfig;

    fn config_at(path: &Path) -> TimetableConfig {
        TimetableConfig {
            random_seed: Some(17),
            database_path: path.to_path_buf(),
            ..TimetableConfig::default()
        }
    }

    fn run_json(conn: &Connection, config: &TimetableConfig, command: Command) -> (bool, Value) {
        let mut out = Vec::new();
        let success = run(conn, config, command, &mut out).unwrap();
        (success, serde_json::from_slice(&out).unwrap())
    }

    #[test]
    fn commands_share_state_through_the_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_at(&dir.path().join("timetable.db"));

        {
            let conn = open_db(&config.database_path).unwrap();
            assert!(run_json(&conn, &config, Command::Seed).0);
            let (success, response) = run_json(&conn, &config, Command::Generate);
            assert!(success);
            assert_eq!(response["message"], "Timetables generated successfully!");
        }

        let conn = open_db(&config.database_path).unwrap();
        let (_, entries) = run_json(&conn, &config, Command::Entries);
        assert_eq!(entries.as_array().unwrap().len(), 64);

        let (_, grid) = run_json(&conn, &config, Command::Show { classroom_id: 1 });
        assert_eq!(grid["classroom"]["name"], "CSE-A");
    }

    #[test]
    fn slots_lists_ids_usable_for_moves() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_at(&dir.path().join("timetable.db"));
        let conn = open_db(&config.database_path).unwrap();
        run_json(&conn, &config, Command::Seed);

        let (success, slots) = run_json(&conn, &config, Command::Slots);
        assert!(success);
        let slots = slots.as_array().unwrap();
        assert_eq!(slots.len(), 30);
        assert_eq!(slots[0]["day"], "Monday");
        assert_eq!(slots[0]["period_number"], 1);
        assert_eq!(slots[29]["day"], "Friday");
        assert_eq!(slots[29]["period_number"], 6);

        let (success, response) = run_json(
            &conn,
            &config,
            Command::Move {
                entry_id: 999,
                timeslot_id: slots[0]["id"].as_i64().unwrap(),
            },
        );
        assert!(!success);
        assert_eq!(response["message"], "Schedule entry 999 not found");
    }
}
