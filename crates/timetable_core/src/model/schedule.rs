//! Committed schedule entries and their read model.
//!
//! # Invariants
//! - No two entries share (classroom, timeslot).
//! - No two entries share (teacher, timeslot).
//! - `teacher_id` is copied from the subject when the entry is created.

use crate::model::catalog::{ClassRoomId, SubjectId, TeacherId};
use crate::model::timeslot::{TimeSlotId, Weekday};
use serde::{Deserialize, Serialize};

pub type ScheduleEntryId = i64;

/// One committed (classroom, subject, teacher, timeslot) assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: ScheduleEntryId,
    pub classroom_id: ClassRoomId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub timeslot_id: TimeSlotId,
}

/// Assignment waiting to be persisted; the store assigns the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewScheduleEntry {
    pub classroom_id: ClassRoomId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub timeslot_id: TimeSlotId,
}

/// Entry joined with display names for presentation and edit messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntryView {
    pub entry: ScheduleEntry,
    pub classroom_name: String,
    pub subject_name: String,
    pub teacher_name: String,
    pub day: Weekday,
    pub period_number: u8,
}
