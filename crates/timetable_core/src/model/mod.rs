//! Timetable domain model.
//!
//! # Responsibility
//! - Define the catalog records (teachers, subjects, classrooms,
//!   requirements) the engine reads.
//! - Define time slots and committed schedule entries the engine writes.
//!
//! # Invariants
//! - Every record is identified by a store-assigned integer key.
//! - A subject always references exactly one teacher.
//! - A schedule entry carries the teacher of its subject at creation time.

pub mod catalog;
pub mod schedule;
pub mod timeslot;
