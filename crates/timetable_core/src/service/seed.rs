//! Sample catalog used for demos and end-to-end checks.
//!
//! Five teachers, eight subjects, three classrooms and fifteen requirements.
//! Seeding is skipped when any teacher already exists.

use crate::repo::catalog_repo::{CatalogRepository, RepoResult};
use crate::repo::timeslot_repo::TimeSlotRepository;
use log::info;

const TEACHERS: [&str; 5] = [
    "Dr. Smith",
    "Prof. Johnson",
    "Dr. Williams",
    "Prof. Brown",
    "Dr. Davis",
];

/// (subject name, index into `TEACHERS`)
const SUBJECTS: [(&str, usize); 8] = [
    ("Mathematics", 0),
    ("Physics", 1),
    ("Chemistry", 2),
    ("Computer Science", 3),
    ("English", 4),
    ("Data Structures", 3),
    ("Electronics", 1),
    ("Database Systems", 3),
];

const CLASSROOMS: [&str; 3] = ["CSE-A", "CSE-B", "ECE-A"];

/// (classroom index, subject index, periods per week)
const REQUIREMENTS: [(usize, usize, i64); 15] = [
    (0, 0, 5),
    (0, 1, 4),
    (0, 2, 3),
    (0, 3, 6),
    (0, 4, 2),
    (1, 0, 4),
    (1, 1, 5),
    (1, 3, 6),
    (1, 5, 4),
    (1, 4, 3),
    (2, 1, 6),
    (2, 2, 5),
    (2, 6, 6),
    (2, 0, 3),
    (2, 4, 2),
];

/// Ensures time slots exist and inserts the sample catalog into an empty
/// store. Returns whether catalog rows were written.
pub fn seed_sample_data(
    catalog: &impl CatalogRepository,
    timeslots: &impl TimeSlotRepository,
    periods_per_day: u8,
) -> RepoResult<bool> {
    timeslots.ensure_timeslots(periods_per_day)?;

    if !catalog.list_teachers()?.is_empty() {
        info!("event=seed module=service status=skipped reason=catalog_not_empty");
        return Ok(false);
    }

    let teachers = TEACHERS
        .iter()
        .map(|name| catalog.create_teacher(name))
        .collect::<RepoResult<Vec<_>>>()?;
    let subjects = SUBJECTS
        .iter()
        .map(|(name, teacher)| catalog.create_subject(name, teachers[*teacher].id))
        .collect::<RepoResult<Vec<_>>>()?;
    let classrooms = CLASSROOMS
        .iter()
        .map(|name| catalog.create_classroom(name))
        .collect::<RepoResult<Vec<_>>>()?;
    for (classroom, subject, periods) in REQUIREMENTS {
        catalog.upsert_requirement(classrooms[classroom].id, subjects[subject].id, periods)?;
    }

    info!(
        "event=seed module=service status=ok teachers={} subjects={} classrooms={} requirements={}",
        teachers.len(),
        subjects.len(),
        classrooms.len(),
        REQUIREMENTS.len()
    );
    Ok(true)
}
