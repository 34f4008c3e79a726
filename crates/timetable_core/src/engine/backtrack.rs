//! Depth-first search over time slots for one classroom.
//!
//! One occurrence is decided per level, in occurrence order. Slots are tried
//! in their natural (day, period) order and pruned with [`can_place`] only;
//! there is no memoization or constraint propagation. The decision stack is
//! kept in a `Vec` so deep occurrence lists do not grow the call stack.

use super::validator::{can_place, Placement, ScheduleBoard};
use crate::model::catalog::{ClassRoomId, Subject};
use crate::model::timeslot::TimeSlot;
use log::trace;

/// Places every occurrence for `classroom_id` on `board`.
///
/// Returns `true` with all occurrences staged, or `false` with the board
/// restored to the state it had on entry.
pub fn schedule(
    board: &mut ScheduleBoard,
    classroom_id: ClassRoomId,
    occurrences: &[&Subject],
    timeslots: &[TimeSlot],
) -> bool {
    // chosen[level] is the slot index staged for occurrences[level].
    let mut chosen: Vec<usize> = Vec::with_capacity(occurrences.len());
    let mut resume_at = 0;
    let mut backtracks: u64 = 0;

    while let Some(subject) = occurrences.get(chosen.len()) {
        let next = timeslots
            .iter()
            .enumerate()
            .skip(resume_at)
            .find(|(_, slot)| can_place(board, classroom_id, subject, slot))
            .map(|(index, _)| index);

        match next {
            Some(index) => {
                board.stage(Placement::new(classroom_id, subject, &timeslots[index]));
                chosen.push(index);
                resume_at = 0;
            }
            None => {
                let Some(previous) = chosen.pop() else {
                    trace!(
                        "event=search_exhausted module=engine classroom_id={classroom_id} backtracks={backtracks}"
                    );
                    return false;
                };
                board.unstage_last();
                resume_at = previous + 1;
                backtracks += 1;
            }
        }
    }

    trace!(
        "event=search_complete module=engine classroom_id={classroom_id} placed={} backtracks={backtracks}",
        chosen.len()
    );
    true
}

#[cfg(test)]
mod tests {
    use super::schedule;
    use crate::engine::greedy::schedule_greedy;
    use crate::engine::test_support::{slots, subject};
    use crate::engine::validator::{Placement, ScheduleBoard};

    #[test]
    fn empty_occurrence_list_succeeds_immediately() {
        let timeslots = slots(1, 2);
        let mut board = ScheduleBoard::new();

        assert!(schedule(&mut board, 1, &[], &timeslots));
        assert!(board.is_empty());
    }

    #[test]
    fn fills_slots_in_natural_order() {
        let timeslots = slots(2, 2);
        let math = subject(1, 10);
        let english = subject(2, 20);
        let occurrences = vec![&math, &english, &math];
        let mut board = ScheduleBoard::new();

        assert!(schedule(&mut board, 1, &occurrences, &timeslots));

        let used: Vec<i64> = board.placements().iter().map(|p| p.timeslot_id).collect();
        assert_eq!(used, vec![1, 2, 3]);
    }

    #[test]
    fn backtracks_where_first_fit_would_strand_an_occurrence() {
        // Teacher 10 already teaches another classroom in slot 2, so the
        // first-fit choice of slot 1 for the teacher-20 subject must be undone.
        let timeslots = slots(1, 2);
        let math = subject(1, 10);
        let english = subject(2, 20);
        let mut board = ScheduleBoard::new();
        board.stage(Placement::new(99, &math, &timeslots[1]));

        let occurrences = vec![&english, &math];
        let mut greedy_board = board.clone();
        assert_eq!(schedule_greedy(&mut greedy_board, 1, &occurrences, &timeslots), 1);

        assert!(schedule(&mut board, 1, &occurrences, &timeslots));
        let ours: Vec<(i64, i64)> = board
            .placements()
            .iter()
            .filter(|p| p.classroom_id == 1)
            .map(|p| (p.subject_id, p.timeslot_id))
            .collect();
        assert_eq!(ours, vec![(2, 2), (1, 1)]);
    }

    #[test]
    fn failure_restores_board() {
        let timeslots = slots(1, 2);
        let math = subject(1, 10);
        let mut board = ScheduleBoard::new();
        board.stage(Placement::new(99, &math, &timeslots[0]));

        let occurrences = vec![&math, &math];
        assert!(!schedule(&mut board, 1, &occurrences, &timeslots));

        assert_eq!(board.len(), 1);
        assert_eq!(board.placements()[0].classroom_id, 99);
    }

    #[test]
    fn more_occurrences_than_slots_fails() {
        let timeslots = slots(1, 3);
        let math = subject(1, 10);
        let english = subject(2, 20);
        let occurrences = vec![&math, &english, &math, &english];
        let mut board = ScheduleBoard::new();

        assert!(!schedule(&mut board, 1, &occurrences, &timeslots));
        assert!(board.is_empty());
    }
}
