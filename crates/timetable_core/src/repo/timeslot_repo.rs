//! Time slot repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Slots are created once, as the weekday x period cross product, the
//!   first time they are requested.
//! - Listing order is day of week, then period number.

use super::catalog_repo::{RepoError, RepoResult};
use crate::model::timeslot::{TimeSlot, TimeSlotId, Weekday};
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const TIMESLOT_SELECT_SQL: &str = "SELECT id, day, period_number FROM timeslots";

/// Repository interface for the shared time slot reference set.
pub trait TimeSlotRepository {
    /// Returns the slot set, creating `5 x periods_per_day` slots when the
    /// store holds none yet.
    fn ensure_timeslots(&self, periods_per_day: u8) -> RepoResult<Vec<TimeSlot>>;
    fn list_timeslots(&self) -> RepoResult<Vec<TimeSlot>>;
    fn get_timeslot(&self, id: TimeSlotId) -> RepoResult<Option<TimeSlot>>;
}

/// SQLite-backed time slot repository.
pub struct SqliteTimeSlotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTimeSlotRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        super::ensure_connection_ready(
            conn,
            "timeslots",
            &["id", "day", "day_index", "period_number"],
        )?;
        Ok(Self { conn })
    }
}

impl TimeSlotRepository for SqliteTimeSlotRepository<'_> {
    fn ensure_timeslots(&self, periods_per_day: u8) -> RepoResult<Vec<TimeSlot>> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let existing: i64 = tx.query_row("SELECT COUNT(*) FROM timeslots;", [], |row| row.get(0))?;
        if existing == 0 {
            for day in Weekday::ALL {
                for period in 1..=periods_per_day {
                    tx.execute(
                        "INSERT INTO timeslots (day, day_index, period_number)
                         VALUES (?1, ?2, ?3);",
                        params![day.as_str(), day.index() as i64, i64::from(period)],
                    )?;
                }
            }
            info!(
                "event=timeslots_create module=repo status=ok days={} periods_per_day={periods_per_day}",
                Weekday::ALL.len()
            );
        }
        tx.commit()?;

        self.list_timeslots()
    }

    fn list_timeslots(&self) -> RepoResult<Vec<TimeSlot>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TIMESLOT_SELECT_SQL} ORDER BY day_index ASC, period_number ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut slots = Vec::new();
        while let Some(row) = rows.next()? {
            slots.push(parse_timeslot_row(row)?);
        }
        Ok(slots)
    }

    fn get_timeslot(&self, id: TimeSlotId) -> RepoResult<Option<TimeSlot>> {
        let slot = self
            .conn
            .query_row(
                &format!("{TIMESLOT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                |row| Ok(parse_timeslot_row(row)),
            )
            .optional()?;
        slot.transpose()
    }
}

pub(crate) fn parse_day(value: &str) -> RepoResult<Weekday> {
    Weekday::parse(value)
        .ok_or_else(|| RepoError::InvalidData(format!("invalid day `{value}` in timeslots.day")))
}

pub(crate) fn parse_period(value: i64) -> RepoResult<u8> {
    u8::try_from(value)
        .ok()
        .filter(|period| *period >= 1)
        .ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid period `{value}` in timeslots.period_number"
            ))
        })
}

fn parse_timeslot_row(row: &Row<'_>) -> RepoResult<TimeSlot> {
    let day_text: String = row.get("day")?;
    Ok(TimeSlot {
        id: row.get("id")?,
        day: parse_day(&day_text)?,
        period_number: parse_period(row.get("period_number")?)?,
    })
}
