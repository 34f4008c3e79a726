//! Constraint validation over a working set of placements.
//!
//! # Invariants
//! - A classroom holds at most one placement per time slot.
//! - A teacher holds at most one placement per time slot.
//! - Lookups see committed and staged placements alike.

use crate::model::catalog::{ClassRoomId, Subject, SubjectId, TeacherId};
use crate::model::schedule::{NewScheduleEntry, ScheduleEntry, ScheduleEntryId};
use crate::model::timeslot::{TimeSlot, TimeSlotId};
use std::collections::HashSet;

/// One assignment on the board. `entry_id` is set for committed entries
/// loaded from the store and `None` for staged ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub entry_id: Option<ScheduleEntryId>,
    pub classroom_id: ClassRoomId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub timeslot_id: TimeSlotId,
}

impl Placement {
    /// Staged placement; the teacher is taken from the subject.
    pub fn new(classroom_id: ClassRoomId, subject: &Subject, timeslot: &TimeSlot) -> Self {
        Self {
            entry_id: None,
            classroom_id,
            subject_id: subject.id,
            teacher_id: subject.teacher_id,
            timeslot_id: timeslot.id,
        }
    }

    pub fn to_new_entry(&self) -> NewScheduleEntry {
        NewScheduleEntry {
            classroom_id: self.classroom_id,
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            timeslot_id: self.timeslot_id,
        }
    }
}

impl From<&ScheduleEntry> for Placement {
    fn from(entry: &ScheduleEntry) -> Self {
        Self {
            entry_id: Some(entry.id),
            classroom_id: entry.classroom_id,
            subject_id: entry.subject_id,
            teacher_id: entry.teacher_id,
            timeslot_id: entry.timeslot_id,
        }
    }
}

/// Working assignment set shared by search, fallback and editor checks.
///
/// Staging is stack-like: `unstage_last` undoes the most recent `stage`.
#[derive(Debug, Clone, Default)]
pub struct ScheduleBoard {
    placements: Vec<Placement>,
    classroom_slots: HashSet<(ClassRoomId, TimeSlotId)>,
    teacher_slots: HashSet<(TeacherId, TimeSlotId)>,
}

impl ScheduleBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board holding already committed entries.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a ScheduleEntry>) -> Self {
        let mut board = Self::new();
        for entry in entries {
            board.stage(Placement::from(entry));
        }
        board
    }

    pub fn stage(&mut self, placement: Placement) {
        self.classroom_slots
            .insert((placement.classroom_id, placement.timeslot_id));
        self.teacher_slots
            .insert((placement.teacher_id, placement.timeslot_id));
        self.placements.push(placement);
    }

    pub fn unstage_last(&mut self) -> Option<Placement> {
        let placement = self.placements.pop()?;
        self.classroom_slots
            .remove(&(placement.classroom_id, placement.timeslot_id));
        self.teacher_slots
            .remove(&(placement.teacher_id, placement.timeslot_id));
        Some(placement)
    }

    pub fn is_classroom_free(&self, classroom_id: ClassRoomId, timeslot_id: TimeSlotId) -> bool {
        !self.classroom_slots.contains(&(classroom_id, timeslot_id))
    }

    pub fn is_teacher_free(&self, teacher_id: TeacherId, timeslot_id: TimeSlotId) -> bool {
        !self.teacher_slots.contains(&(teacher_id, timeslot_id))
    }

    /// First placement of `classroom_id` at `timeslot_id` whose entry is not
    /// in `ignore`.
    pub fn classroom_conflict(
        &self,
        classroom_id: ClassRoomId,
        timeslot_id: TimeSlotId,
        ignore: &[ScheduleEntryId],
    ) -> Option<&Placement> {
        self.find_conflict(timeslot_id, ignore, |placement| {
            placement.classroom_id == classroom_id
        })
    }

    /// First placement of `teacher_id` at `timeslot_id` whose entry is not in
    /// `ignore`.
    pub fn teacher_conflict(
        &self,
        teacher_id: TeacherId,
        timeslot_id: TimeSlotId,
        ignore: &[ScheduleEntryId],
    ) -> Option<&Placement> {
        self.find_conflict(timeslot_id, ignore, |placement| {
            placement.teacher_id == teacher_id
        })
    }

    fn find_conflict(
        &self,
        timeslot_id: TimeSlotId,
        ignore: &[ScheduleEntryId],
        matches: impl Fn(&Placement) -> bool,
    ) -> Option<&Placement> {
        self.placements.iter().find(|placement| {
            placement.timeslot_id == timeslot_id
                && matches(*placement)
                && !placement
                    .entry_id
                    .is_some_and(|entry_id| ignore.contains(&entry_id))
        })
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn to_new_entries(&self) -> Vec<NewScheduleEntry> {
        self.placements.iter().map(Placement::to_new_entry).collect()
    }
}

/// Returns whether `subject` may be taught to `classroom_id` at `timeslot`.
pub fn can_place(
    board: &ScheduleBoard,
    classroom_id: ClassRoomId,
    subject: &Subject,
    timeslot: &TimeSlot,
) -> bool {
    board.is_classroom_free(classroom_id, timeslot.id)
        && board.is_teacher_free(subject.teacher_id, timeslot.id)
}
