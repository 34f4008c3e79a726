//! Schedule entry repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist committed schedule entries and expose joined read models.
//! - Provide the atomic write primitives used by generation and editing.
//!
//! # Invariants
//! - `replace_all` discards and rewrites the whole entry set in one
//!   transaction; a failure leaves the previous timetable untouched.
//! - `swap_entry_timeslots` updates both rows or neither.
//! - Conflict checks are the caller's job; this layer only persists.

use super::catalog_repo::{RepoError, RepoResult};
use super::timeslot_repo::{parse_day, parse_period};
use crate::model::catalog::ClassRoomId;
use crate::model::schedule::{NewScheduleEntry, ScheduleEntry, ScheduleEntryId, ScheduleEntryView};
use crate::model::timeslot::TimeSlotId;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const ENTRY_SELECT_SQL: &str = "SELECT id, classroom_id, subject_id, teacher_id, timeslot_id
FROM schedule_entries";

const ENTRY_VIEW_SELECT_SQL: &str = "SELECT
    e.id,
    e.classroom_id,
    e.subject_id,
    e.teacher_id,
    e.timeslot_id,
    c.name AS classroom_name,
    s.name AS subject_name,
    t.name AS teacher_name,
    ts.day,
    ts.period_number
FROM schedule_entries e
JOIN classrooms c ON c.id = e.classroom_id
JOIN subjects s ON s.id = e.subject_id
JOIN teachers t ON t.id = e.teacher_id
JOIN timeslots ts ON ts.id = e.timeslot_id";

/// Repository interface for committed schedule entries.
pub trait ScheduleRepository {
    fn list_entries(&self) -> RepoResult<Vec<ScheduleEntry>>;
    /// Lists joined entries, optionally restricted to one classroom, ordered
    /// by day, period and classroom.
    fn list_entry_views(&self, classroom_id: Option<ClassRoomId>)
        -> RepoResult<Vec<ScheduleEntryView>>;
    fn get_entry(&self, id: ScheduleEntryId) -> RepoResult<Option<ScheduleEntry>>;
    /// Replaces every committed entry with `entries`. Returns rows written.
    fn replace_all(&self, entries: &[NewScheduleEntry]) -> RepoResult<usize>;
    fn update_entry_timeslot(&self, id: ScheduleEntryId, timeslot_id: TimeSlotId)
        -> RepoResult<()>;
    /// Exchanges the time slots of two entries atomically.
    fn swap_entry_timeslots(&self, first: ScheduleEntryId, second: ScheduleEntryId)
        -> RepoResult<()>;
}

/// SQLite-backed schedule entry repository.
pub struct SqliteScheduleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteScheduleRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        super::ensure_connection_ready(
            conn,
            "schedule_entries",
            &["id", "classroom_id", "subject_id", "teacher_id", "timeslot_id"],
        )?;
        Ok(Self { conn })
    }
}

impl ScheduleRepository for SqliteScheduleRepository<'_> {
    fn list_entries(&self) -> RepoResult<Vec<ScheduleEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} ORDER BY id ASC;"))?;
        let entries = stmt
            .query_map([], parse_entry_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    fn list_entry_views(
        &self,
        classroom_id: Option<ClassRoomId>,
    ) -> RepoResult<Vec<ScheduleEntryView>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ENTRY_VIEW_SELECT_SQL}
             WHERE (?1 IS NULL OR e.classroom_id = ?1)
             ORDER BY ts.day_index ASC, ts.period_number ASC, e.classroom_id ASC, e.id ASC;"
        ))?;
        let mut rows = stmt.query([classroom_id])?;
        let mut views = Vec::new();
        while let Some(row) = rows.next()? {
            views.push(parse_entry_view_row(row)?);
        }
        Ok(views)
    }

    fn get_entry(&self, id: ScheduleEntryId) -> RepoResult<Option<ScheduleEntry>> {
        let entry = self
            .conn
            .query_row(
                &format!("{ENTRY_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_entry_row,
            )
            .optional()?;
        Ok(entry)
    }

    fn replace_all(&self, entries: &[NewScheduleEntry]) -> RepoResult<usize> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute("DELETE FROM schedule_entries;", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO schedule_entries (classroom_id, subject_id, teacher_id, timeslot_id)
                 VALUES (?1, ?2, ?3, ?4);",
            )?;
            for entry in entries {
                insert.execute(params![
                    entry.classroom_id,
                    entry.subject_id,
                    entry.teacher_id,
                    entry.timeslot_id,
                ])?;
            }
        }
        tx.commit()?;
        Ok(entries.len())
    }

    fn update_entry_timeslot(
        &self,
        id: ScheduleEntryId,
        timeslot_id: TimeSlotId,
    ) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE schedule_entries SET timeslot_id = ?2 WHERE id = ?1;",
            params![id, timeslot_id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "schedule entry",
                id,
            });
        }
        Ok(())
    }

    fn swap_entry_timeslots(
        &self,
        first: ScheduleEntryId,
        second: ScheduleEntryId,
    ) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let first_slot = load_timeslot_id(&tx, first)?;
        let second_slot = load_timeslot_id(&tx, second)?;

        tx.execute(
            "UPDATE schedule_entries SET timeslot_id = ?2 WHERE id = ?1;",
            params![first, second_slot],
        )?;
        tx.execute(
            "UPDATE schedule_entries SET timeslot_id = ?2 WHERE id = ?1;",
            params![second, first_slot],
        )?;

        tx.commit()?;
        Ok(())
    }
}

fn load_timeslot_id(conn: &Connection, id: ScheduleEntryId) -> RepoResult<TimeSlotId> {
    conn.query_row(
        "SELECT timeslot_id FROM schedule_entries WHERE id = ?1;",
        [id],
        |row| row.get(0),
    )
    .optional()?
    .ok_or(RepoError::NotFound {
        entity: "schedule entry",
        id,
    })
}

fn parse_entry_row(row: &Row<'_>) -> rusqlite::Result<ScheduleEntry> {
    Ok(ScheduleEntry {
        id: row.get("id")?,
        classroom_id: row.get("classroom_id")?,
        subject_id: row.get("subject_id")?,
        teacher_id: row.get("teacher_id")?,
        timeslot_id: row.get("timeslot_id")?,
    })
}

fn parse_entry_view_row(row: &Row<'_>) -> RepoResult<ScheduleEntryView> {
    let day_text: String = row.get("day")?;
    Ok(ScheduleEntryView {
        entry: parse_entry_row(row)?,
        classroom_name: row.get("classroom_name")?,
        subject_name: row.get("subject_name")?,
        teacher_name: row.get("teacher_name")?,
        day: parse_day(&day_text)?,
        period_number: parse_period(row.get("period_number")?)?,
    })
}
