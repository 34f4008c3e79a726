//! Full timetable generation.
//!
//! # Responsibility
//! - Rebuild every classroom's timetable from catalog requirements.
//! - Commit the result as one atomic replacement of the entry set.
//!
//! # Invariants
//! - Classrooms are processed sequentially in ascending id order; later
//!   classrooms treat earlier placements as fixed.
//! - Prior entries are not consulted; generation is a full regeneration.
//! - Any failure before the final commit leaves the previous timetable intact.

use crate::engine::{expand_requirements, place_classroom, ClassroomPlacement, ScheduleBoard};
use crate::model::catalog::{ClassRoomId, Subject, SubjectId};
use crate::repo::catalog_repo::{CatalogRepository, RepoError};
use crate::repo::schedule_repo::ScheduleRepository;
use crate::repo::timeslot_repo::TimeSlotRepository;
use crate::service::response::ActionResponse;
use log::{error, info, warn};
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub const GENERATION_SUCCESS_MESSAGE: &str = "Timetables generated successfully!";

#[derive(Debug)]
pub enum GenerationError {
    Repo(RepoError),
    /// A requirement points at a subject missing from the catalog.
    UnknownSubject {
        classroom_id: ClassRoomId,
        subject_id: SubjectId,
    },
}

impl Display for GenerationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::UnknownSubject {
                classroom_id,
                subject_id,
            } => write!(
                f,
                "classroom {classroom_id} requires unknown subject {subject_id}"
            ),
        }
    }
}

impl Error for GenerationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::UnknownSubject { .. } => None,
        }
    }
}

impl From<RepoError> for GenerationError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Per-classroom generation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassroomReport {
    pub classroom_id: ClassRoomId,
    pub classroom_name: String,
    pub placement: ClassroomPlacement,
}

/// Summary of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub classrooms: Vec<ClassroomReport>,
    pub timeslot_count: usize,
    pub entries_written: usize,
}

impl GenerationReport {
    /// Whether every classroom got all of its required periods.
    pub fn is_complete(&self) -> bool {
        self.classrooms
            .iter()
            .all(|report| report.placement.is_complete())
    }
}

/// Generation use-case service.
pub struct GenerationService<C, T, S>
where
    C: CatalogRepository,
    T: TimeSlotRepository,
    S: ScheduleRepository,
{
    catalog: C,
    timeslots: T,
    schedule: S,
    periods_per_day: u8,
}

impl<C, T, S> GenerationService<C, T, S>
where
    C: CatalogRepository,
    T: TimeSlotRepository,
    S: ScheduleRepository,
{
    pub fn new(catalog: C, timeslots: T, schedule: S, periods_per_day: u8) -> Self {
        Self {
            catalog,
            timeslots,
            schedule,
            periods_per_day,
        }
    }

    /// Discards every committed entry and regenerates all classrooms.
    ///
    /// # Contract
    /// - Ensures the time slot set exists before searching.
    /// - Uses backtracking per classroom and greedy placement when it fails;
    ///   an under-scheduled classroom is reported, not an error.
    /// - Writes the new entry set in a single transaction.
    pub fn generate_timetables<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<GenerationReport, GenerationError> {
        let started_at = Instant::now();
        info!("event=generate module=service status=start");

        let timeslots = self.timeslots.ensure_timeslots(self.periods_per_day)?;
        let subjects: HashMap<SubjectId, Subject> = self
            .catalog
            .list_subjects()?
            .into_iter()
            .map(|subject| (subject.id, subject))
            .collect();

        let mut board = ScheduleBoard::new();
        let mut reports = Vec::new();
        for classroom in self.catalog.list_classrooms()? {
            let requirements = self
                .catalog
                .list_requirements_for(classroom.id)?
                .into_iter()
                .map(|requirement| {
                    subjects
                        .get(&requirement.subject_id)
                        .map(|subject| (subject.clone(), requirement.periods_per_week))
                        .ok_or(GenerationError::UnknownSubject {
                            classroom_id: classroom.id,
                            subject_id: requirement.subject_id,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let occurrences = expand_requirements(&requirements, &mut *rng);
            let placement = place_classroom(&mut board, classroom.id, &occurrences, &timeslots);

            if placement.is_complete() {
                info!(
                    "event=generate_classroom module=service status=ok classroom_id={} strategy={} required={} placed={}",
                    classroom.id,
                    placement.strategy.as_str(),
                    placement.required,
                    placement.placed
                );
            } else {
                warn!(
                    "event=generate_classroom module=service status=partial classroom_id={} strategy={} required={} placed={}",
                    classroom.id,
                    placement.strategy.as_str(),
                    placement.required,
                    placement.placed
                );
            }

            reports.push(ClassroomReport {
                classroom_id: classroom.id,
                classroom_name: classroom.name,
                placement,
            });
        }

        let entries_written = self.schedule.replace_all(&board.to_new_entries())?;
        info!(
            "event=generate module=service status=ok classrooms={} entries={} duration_ms={}",
            reports.len(),
            entries_written,
            started_at.elapsed().as_millis()
        );

        Ok(GenerationReport {
            classrooms: reports,
            timeslot_count: timeslots.len(),
            entries_written,
        })
    }

    /// Generation trigger for presentation callers: faults become a failure
    /// response carrying the error text.
    pub fn run_generation<R: Rng + ?Sized>(&self, rng: &mut R) -> ActionResponse {
        match self.generate_timetables(rng) {
            Ok(_) => ActionResponse::success(GENERATION_SUCCESS_MESSAGE),
            Err(err) => {
                error!("event=generate module=service status=error error={err}");
                ActionResponse::failure(err.to_string())
            }
        }
    }
}
