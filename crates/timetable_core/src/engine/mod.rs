//! Timetable scheduling engine.
//!
//! # Responsibility
//! - Decide feasibility of placements against a working assignment set.
//! - Place one classroom's occurrences by exhaustive search, degrading to a
//!   greedy single pass when search cannot complete.
//!
//! # Invariants
//! - Every placement staged on a [`ScheduleBoard`] passed `can_place` first,
//!   so the board never holds a classroom or teacher clash.
//! - Nothing here touches storage; callers commit the board explicitly.

pub mod backtrack;
pub mod expander;
pub mod greedy;
pub mod validator;

pub use backtrack::schedule;
pub use expander::expand_requirements;
pub use greedy::schedule_greedy;
pub use validator::{can_place, Placement, ScheduleBoard};

use crate::model::catalog::{ClassRoomId, Subject};
use crate::model::timeslot::TimeSlot;
use serde::Serialize;

/// Which placement strategy produced a classroom's timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStrategy {
    Backtracking,
    Greedy,
}

impl PlacementStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Backtracking => "backtracking",
            Self::Greedy => "greedy",
        }
    }
}

/// Result of placing one classroom's occurrence list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassroomPlacement {
    pub strategy: PlacementStrategy,
    pub required: usize,
    pub placed: usize,
}

impl ClassroomPlacement {
    pub fn is_complete(&self) -> bool {
        self.placed == self.required
    }
}

/// Runs backtracking search and falls back to greedy placement on failure.
pub fn place_classroom(
    board: &mut ScheduleBoard,
    classroom_id: ClassRoomId,
    occurrences: &[&Subject],
    timeslots: &[TimeSlot],
) -> ClassroomPlacement {
    if schedule(board, classroom_id, occurrences, timeslots) {
        return ClassroomPlacement {
            strategy: PlacementStrategy::Backtracking,
            required: occurrences.len(),
            placed: occurrences.len(),
        };
    }

    let placed = schedule_greedy(board, classroom_id, occurrences, timeslots);
    ClassroomPlacement {
        strategy: PlacementStrategy::Greedy,
        required: occurrences.len(),
        placed,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::model::catalog::{Subject, SubjectId, TeacherId};
    use crate::model::timeslot::{TimeSlot, Weekday};

    pub fn subject(id: SubjectId, teacher_id: TeacherId) -> Subject {
        Subject {
            id,
            name: format!("subject-{id}"),
            teacher_id,
        }
    }

    /// Builds `days x periods` slots with ids starting at 1, in scheduling order.
    pub fn slots(days: usize, periods: u8) -> Vec<TimeSlot> {
        let mut slots = Vec::new();
        for day in Weekday::ALL.into_iter().take(days) {
            for period in 1..=periods {
                slots.push(TimeSlot {
                    id: slots.len() as i64 + 1,
                    day,
                    period_number: period,
                });
            }
        }
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{slots, subject};
    use super::{place_classroom, PlacementStrategy, Placement, ScheduleBoard};

    #[test]
    fn place_classroom_uses_backtracking_when_feasible() {
        let timeslots = slots(1, 3);
        let math = subject(1, 10);
        let english = subject(2, 20);
        let occurrences = vec![&math, &english, &math];

        let mut board = ScheduleBoard::new();
        let outcome = place_classroom(&mut board, 1, &occurrences, &timeslots);

        assert_eq!(outcome.strategy, PlacementStrategy::Backtracking);
        assert!(outcome.is_complete());
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn place_classroom_falls_back_to_greedy_when_overbooked() {
        let timeslots = slots(1, 2);
        let math = subject(1, 10);
        let occurrences = vec![&math, &math, &math];

        let mut board = ScheduleBoard::new();
        let outcome = place_classroom(&mut board, 1, &occurrences, &timeslots);

        assert_eq!(outcome.strategy, PlacementStrategy::Greedy);
        assert_eq!(outcome.required, 3);
        assert_eq!(outcome.placed, 2);
        assert!(!outcome.is_complete());
    }

    #[test]
    fn later_classrooms_see_earlier_placements_as_fixed() {
        let timeslots = slots(1, 2);
        let math = subject(1, 10);

        let mut board = ScheduleBoard::new();
        board.stage(Placement::new(1, &math, &timeslots[0]));

        let occurrences = vec![&math];
        let outcome = place_classroom(&mut board, 2, &occurrences, &timeslots);

        assert!(outcome.is_complete());
        let second = board
            .placements()
            .iter()
            .find(|placement| placement.classroom_id == 2)
            .unwrap();
        assert_eq!(second.timeslot_id, timeslots[1].id);
    }
}
