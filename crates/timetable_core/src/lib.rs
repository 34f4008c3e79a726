//! Core domain logic for the timetable scheduler.
//! This crate is the single source of truth for scheduling invariants.

pub mod config;
pub mod db;
pub mod engine;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, LoggingConfig, TimetableConfig};
pub use engine::{ClassroomPlacement, PlacementStrategy, ScheduleBoard};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::catalog::{
    ClassRoom, ClassRoomId, RequirementId, Subject, SubjectId, SubjectRequirement, Teacher,
    TeacherId, ValidationError,
};
pub use model::schedule::{NewScheduleEntry, ScheduleEntry, ScheduleEntryId, ScheduleEntryView};
pub use model::timeslot::{TimeSlot, TimeSlotId, Weekday};
pub use repo::catalog_repo::{CatalogRepository, RepoError, RepoResult, SqliteCatalogRepository};
pub use repo::schedule_repo::{ScheduleRepository, SqliteScheduleRepository};
pub use repo::timeslot_repo::{SqliteTimeSlotRepository, TimeSlotRepository};
pub use service::editor_service::{
    EditError, EditOperation, EditRejection, EditResult, ScheduleEditor,
};
pub use service::generation_service::{
    ClassroomReport, GenerationError, GenerationReport, GenerationService,
};
pub use service::response::ActionResponse;
pub use service::seed::seed_sample_data;
pub use service::timetable_view::{load_timetable_grid, GridRow, TimetableGrid};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
