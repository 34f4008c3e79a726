//! Catalog records owned by the CRUD collaborator.
//!
//! # Responsibility
//! - Define teachers, subjects, classrooms and per-classroom requirements.
//! - Validate field-level invariants before persistence.
//!
//! # Invariants
//! - Names are non-blank after trim.
//! - `periods_per_week` is strictly positive.
//! - At most one requirement exists per (classroom, subject) pair.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TeacherId = i64;
pub type SubjectId = i64;
pub type ClassRoomId = i64;
pub type RequirementId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
}

/// A taught subject. Owned by exactly one teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub teacher_id: TeacherId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRoom {
    pub id: ClassRoomId,
    pub name: String,
}

/// Weekly demand of one subject in one classroom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRequirement {
    pub id: RequirementId,
    pub classroom_id: ClassRoomId,
    pub subject_id: SubjectId,
    pub periods_per_week: u32,
}

/// Field-level validation failures for catalog writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty after trim. Carries the entity kind.
    BlankName(&'static str),
    /// Requirement asks for zero or negative periods.
    NonPositivePeriods(i64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName(kind) => write!(f, "{kind} name must not be blank"),
            Self::NonPositivePeriods(value) => {
                write!(f, "periods_per_week must be positive, got {value}")
            }
        }
    }
}

impl Error for ValidationError {}

/// Trims a display name and rejects blank input.
pub fn normalize_name(kind: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankName(kind));
    }
    Ok(trimmed.to_string())
}

/// Converts a raw period count into the stored positive form.
pub fn validate_periods(value: i64) -> Result<u32, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NonPositivePeriods(value));
    }
    u32::try_from(value).map_err(|_| ValidationError::NonPositivePeriods(value))
}
