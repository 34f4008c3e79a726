//! Post-generation timetable edits.
//!
//! # Responsibility
//! - Move one entry to another time slot.
//! - Swap the time slots of two entries.
//!
//! # Invariants
//! - Edits are validated against the committed entry set before any write.
//! - A rejected edit performs no write.
//! - A swap writes both entries in one transaction or neither.

use crate::engine::ScheduleBoard;
use crate::model::schedule::{ScheduleEntryId, ScheduleEntryView};
use crate::model::timeslot::TimeSlotId;
use crate::repo::catalog_repo::RepoError;
use crate::repo::schedule_repo::ScheduleRepository;
use crate::repo::timeslot_repo::TimeSlotRepository;
use crate::service::response::ActionResponse;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MOVE_SUCCESS_MESSAGE: &str = "Schedule updated successfully!";
pub const SWAP_SUCCESS_MESSAGE: &str = "Entries swapped successfully!";

/// Which edit produced a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOperation {
    Move,
    Swap,
}

impl EditOperation {
    fn as_str(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Swap => "swap",
        }
    }
}

/// Expected, non-fatal reasons an edit is refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditRejection {
    EntryNotFound(ScheduleEntryId),
    TimeSlotNotFound(TimeSlotId),
    /// The entry's classroom already has another entry in the target slot.
    SlotOccupied {
        classroom_name: String,
        timeslot_id: TimeSlotId,
    },
    /// The entry's teacher already teaches elsewhere in the target slot.
    TeacherClash {
        operation: EditOperation,
        teacher_name: String,
        subject_name: String,
        classroom_name: String,
    },
}

impl EditRejection {
    fn reason_code(&self) -> &'static str {
        match self {
            Self::EntryNotFound(_) => "entry_not_found",
            Self::TimeSlotNotFound(_) => "timeslot_not_found",
            Self::SlotOccupied { .. } => "slot_occupied",
            Self::TeacherClash { .. } => "teacher_clash",
        }
    }
}

impl Display for EditRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EntryNotFound(id) => write!(f, "Schedule entry {id} not found"),
            Self::TimeSlotNotFound(id) => write!(f, "Time slot {id} not found"),
            Self::SlotOccupied { .. } => write!(f, "This slot is already occupied!"),
            Self::TeacherClash {
                operation,
                teacher_name,
                subject_name,
                classroom_name,
            } => {
                let prefix = match operation {
                    EditOperation::Move => "Teacher clash!",
                    EditOperation::Swap => "Teacher clash detected during swap!",
                };
                write!(
                    f,
                    "{prefix} {teacher_name} is already teaching {subject_name} to {classroom_name} at this time."
                )
            }
        }
    }
}

#[derive(Debug)]
pub enum EditError {
    Rejected(EditRejection),
    Repo(RepoError),
}

impl Display for EditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(rejection) => write!(f, "{rejection}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EditError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rejected(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for EditError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<EditRejection> for EditError {
    fn from(value: EditRejection) -> Self {
        Self::Rejected(value)
    }
}

pub type EditResult<T> = Result<T, EditError>;

/// Schedule editing use-case service.
pub struct ScheduleEditor<S: ScheduleRepository, T: TimeSlotRepository> {
    schedule: S,
    timeslots: T,
}

impl<S: ScheduleRepository, T: TimeSlotRepository> ScheduleEditor<S, T> {
    pub fn new(schedule: S, timeslots: T) -> Self {
        Self {
            schedule,
            timeslots,
        }
    }

    /// Moves one entry to `new_timeslot_id`.
    ///
    /// # Contract
    /// - The entry itself is ignored when checking classroom and teacher
    ///   availability, so moving onto its own slot succeeds.
    /// - Classroom occupancy is reported before teacher clashes.
    pub fn move_entry(
        &self,
        entry_id: ScheduleEntryId,
        new_timeslot_id: TimeSlotId,
    ) -> EditResult<()> {
        let result = self.try_move(entry_id, new_timeslot_id);
        log_edit(EditOperation::Move, &result, entry_id, new_timeslot_id);
        result
    }

    /// Exchanges the time slots of two entries.
    ///
    /// # Contract
    /// - Both resulting placements are checked for classroom and teacher
    ///   availability, ignoring the two entries themselves.
    /// - Swapping an entry with itself is an accepted no-op.
    pub fn swap_entries(&self, first: ScheduleEntryId, second: ScheduleEntryId) -> EditResult<()> {
        let result = self.try_swap(first, second);
        log_edit(EditOperation::Swap, &result, first, second);
        result
    }

    /// `move_entry` wrapped in the presentation envelope.
    pub fn move_entry_response(
        &self,
        entry_id: ScheduleEntryId,
        new_timeslot_id: TimeSlotId,
    ) -> ActionResponse {
        to_response(self.move_entry(entry_id, new_timeslot_id), MOVE_SUCCESS_MESSAGE)
    }

    /// `swap_entries` wrapped in the presentation envelope.
    pub fn swap_entries_response(
        &self,
        first: ScheduleEntryId,
        second: ScheduleEntryId,
    ) -> ActionResponse {
        to_response(self.swap_entries(first, second), SWAP_SUCCESS_MESSAGE)
    }

    fn try_move(&self, entry_id: ScheduleEntryId, new_timeslot_id: TimeSlotId) -> EditResult<()> {
        let views = self.schedule.list_entry_views(None)?;
        let entry = find_view(&views, entry_id)?;
        if self.timeslots.get_timeslot(new_timeslot_id)?.is_none() {
            return Err(EditRejection::TimeSlotNotFound(new_timeslot_id).into());
        }

        let board = ScheduleBoard::from_entries(views.iter().map(|view| &view.entry));
        check_placement(
            &board,
            &views,
            EditOperation::Move,
            entry,
            new_timeslot_id,
            &[entry_id],
        )?;

        self.schedule
            .update_entry_timeslot(entry_id, new_timeslot_id)?;
        Ok(())
    }

    fn try_swap(&self, first: ScheduleEntryId, second: ScheduleEntryId) -> EditResult<()> {
        let views = self.schedule.list_entry_views(None)?;
        let first_view = find_view(&views, first)?;
        let second_view = find_view(&views, second)?;
        if first == second {
            return Ok(());
        }

        let board = ScheduleBoard::from_entries(views.iter().map(|view| &view.entry));
        let ignore = [first, second];
        check_placement(
            &board,
            &views,
            EditOperation::Swap,
            first_view,
            second_view.entry.timeslot_id,
            &ignore,
        )?;
        check_placement(
            &board,
            &views,
            EditOperation::Swap,
            second_view,
            first_view.entry.timeslot_id,
            &ignore,
        )?;

        self.schedule.swap_entry_timeslots(first, second)?;
        Ok(())
    }
}

fn find_view(views: &[ScheduleEntryView], id: ScheduleEntryId) -> EditResult<&ScheduleEntryView> {
    views
        .iter()
        .find(|view| view.entry.id == id)
        .ok_or(EditError::Rejected(EditRejection::EntryNotFound(id)))
}

/// Checks that `entry` may sit at `target` once the `ignore`d entries are
/// out of the way.
fn check_placement(
    board: &ScheduleBoard,
    views: &[ScheduleEntryView],
    operation: EditOperation,
    entry: &ScheduleEntryView,
    target: TimeSlotId,
    ignore: &[ScheduleEntryId],
) -> EditResult<()> {
    if board
        .classroom_conflict(entry.entry.classroom_id, target, ignore)
        .is_some()
    {
        return Err(EditRejection::SlotOccupied {
            classroom_name: entry.classroom_name.clone(),
            timeslot_id: target,
        }
        .into());
    }

    let clash = board
        .teacher_conflict(entry.entry.teacher_id, target, ignore)
        .and_then(|placement| placement.entry_id);
    if let Some(clash_id) = clash {
        let other = find_view(views, clash_id)?;
        return Err(EditRejection::TeacherClash {
            operation,
            teacher_name: entry.teacher_name.clone(),
            subject_name: other.subject_name.clone(),
            classroom_name: other.classroom_name.clone(),
        }
        .into());
    }

    Ok(())
}

fn log_edit(operation: EditOperation, result: &EditResult<()>, first: i64, second: i64) {
    match result {
        Ok(()) => info!(
            "event=schedule_edit module=service status=ok op={} first={first} second={second}",
            operation.as_str()
        ),
        Err(EditError::Rejected(rejection)) => info!(
            "event=schedule_edit module=service status=rejected op={} first={first} second={second} reason={}",
            operation.as_str(),
            rejection.reason_code()
        ),
        Err(EditError::Repo(err)) => error!(
            "event=schedule_edit module=service status=error op={} first={first} second={second} error={err}",
            operation.as_str()
        ),
    }
}

fn to_response(result: EditResult<()>, success_message: &str) -> ActionResponse {
    match result {
        Ok(()) => ActionResponse::success(success_message),
        Err(err) => ActionResponse::failure(err.to_string()),
    }
}
