//! Day x period grid read model for one classroom.

use crate::model::catalog::{ClassRoom, ClassRoomId};
use crate::model::schedule::ScheduleEntryView;
use crate::model::timeslot::{TimeSlot, Weekday};
use crate::repo::catalog_repo::{CatalogRepository, RepoError, RepoResult};
use crate::repo::schedule_repo::ScheduleRepository;
use crate::repo::timeslot_repo::TimeSlotRepository;
use serde::Serialize;

/// One weekday row; `cells[p - 1]` holds period `p`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
    pub day: Weekday,
    pub cells: Vec<Option<ScheduleEntryView>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimetableGrid {
    pub classroom: ClassRoom,
    pub periods_per_day: u8,
    pub rows: Vec<GridRow>,
}

impl TimetableGrid {
    /// Arranges `entries` of one classroom on the weekday x period grid
    /// spanned by `timeslots`.
    pub fn build(
        classroom: ClassRoom,
        timeslots: &[TimeSlot],
        entries: Vec<ScheduleEntryView>,
    ) -> Self {
        let periods_per_day = timeslots
            .iter()
            .map(|slot| slot.period_number)
            .max()
            .unwrap_or(0);
        let mut rows: Vec<GridRow> = Weekday::ALL
            .into_iter()
            .map(|day| GridRow {
                day,
                cells: vec![None; usize::from(periods_per_day)],
            })
            .collect();

        for view in entries {
            let period_index = usize::from(view.period_number).saturating_sub(1);
            if let Some(cell) = rows[view.day.index()].cells.get_mut(period_index) {
                *cell = Some(view);
            }
        }

        Self {
            classroom,
            periods_per_day,
            rows,
        }
    }

    pub fn cell(&self, day: Weekday, period_number: u8) -> Option<&ScheduleEntryView> {
        let index = usize::from(period_number).checked_sub(1)?;
        self.rows[day.index()].cells.get(index)?.as_ref()
    }

    pub fn filled_cells(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter(|cell| cell.is_some())
            .count()
    }
}

/// Loads the grid for `classroom_id`.
pub fn load_timetable_grid(
    catalog: &impl CatalogRepository,
    timeslots: &impl TimeSlotRepository,
    schedule: &impl ScheduleRepository,
    classroom_id: ClassRoomId,
) -> RepoResult<TimetableGrid> {
    let classroom = catalog
        .get_classroom(classroom_id)?
        .ok_or(RepoError::NotFound {
            entity: "classroom",
            id: classroom_id,
        })?;
    let slots = timeslots.list_timeslots()?;
    let entries = schedule.list_entry_views(Some(classroom_id))?;
    Ok(TimetableGrid::build(classroom, &slots, entries))
}
