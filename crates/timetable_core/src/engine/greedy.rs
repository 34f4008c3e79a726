//! Single-pass best-effort placement used after search fails.

use super::validator::{can_place, Placement, ScheduleBoard};
use crate::model::catalog::{ClassRoomId, Subject};
use crate::model::timeslot::TimeSlot;
use log::debug;

/// Commits each occurrence to its first feasible slot, skipping occurrences
/// with none. Never backtracks and never stages a clash. Returns how many
/// occurrences were placed.
pub fn schedule_greedy(
    board: &mut ScheduleBoard,
    classroom_id: ClassRoomId,
    occurrences: &[&Subject],
    timeslots: &[TimeSlot],
) -> usize {
    let mut placed = 0;
    for subject in occurrences {
        match timeslots
            .iter()
            .find(|slot| can_place(board, classroom_id, subject, slot))
        {
            Some(slot) => {
                board.stage(Placement::new(classroom_id, subject, slot));
                placed += 1;
            }
            None => debug!(
                "event=greedy_skip module=engine classroom_id={classroom_id} subject_id={} teacher_id={}",
                subject.id, subject.teacher_id
            ),
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::schedule_greedy;
    use crate::engine::test_support::{slots, subject};
    use crate::engine::validator::{Placement, ScheduleBoard};
    use std::collections::HashSet;

    #[test]
    fn skips_occurrences_without_a_free_slot() {
        let timeslots = slots(1, 3);
        let math = subject(1, 10);
        let english = subject(2, 20);
        let mut board = ScheduleBoard::new();
        // Teacher 10 is busy everywhere except slot 3.
        board.stage(Placement::new(99, &math, &timeslots[0]));
        board.stage(Placement::new(98, &math, &timeslots[1]));

        let occurrences = vec![&math, &math, &english];
        let placed = schedule_greedy(&mut board, 1, &occurrences, &timeslots);

        assert_eq!(placed, 2);
        let ours: Vec<(i64, i64)> = board
            .placements()
            .iter()
            .filter(|p| p.classroom_id == 1)
            .map(|p| (p.subject_id, p.timeslot_id))
            .collect();
        assert_eq!(ours, vec![(1, 3), (2, 1)]);
    }

    #[test]
    fn never_produces_a_clash() {
        let timeslots = slots(1, 4);
        let subjects = [subject(1, 10), subject(2, 10), subject(3, 20)];
        let occurrences: Vec<_> = subjects.iter().cycle().take(9).collect();
        let mut board = ScheduleBoard::new();

        for classroom_id in 1..=3 {
            schedule_greedy(&mut board, classroom_id, &occurrences, &timeslots);
        }

        let mut classroom_slots = HashSet::new();
        let mut teacher_slots = HashSet::new();
        for placement in board.placements() {
            assert!(classroom_slots.insert((placement.classroom_id, placement.timeslot_id)));
            assert!(teacher_slots.insert((placement.teacher_id, placement.timeslot_id)));
        }
    }
}
