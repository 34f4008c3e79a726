//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repositories and the scheduling engine into use cases.
//! - Keep presentation/CLI layers decoupled from storage details.

pub mod editor_service;
pub mod generation_service;
pub mod response;
pub mod seed;
pub mod timetable_view;
