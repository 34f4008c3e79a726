use timetable_core::db::open_db_in_memory;
use timetable_core::{SqliteTimeSlotRepository, TimeSlotRepository, Weekday};

#[test]
fn timeslots_are_created_lazily_as_weekday_by_period_grid() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTimeSlotRepository::try_new(&conn).unwrap();
    assert!(repo.list_timeslots().unwrap().is_empty());

    let slots = repo.ensure_timeslots(6).unwrap();

    assert_eq!(slots.len(), 30);
    assert_eq!((slots[0].day, slots[0].period_number), (Weekday::Monday, 1));
    assert_eq!((slots[5].day, slots[5].period_number), (Weekday::Monday, 6));
    assert_eq!((slots[6].day, slots[6].period_number), (Weekday::Tuesday, 1));
    assert_eq!((slots[29].day, slots[29].period_number), (Weekday::Friday, 6));
}

#[test]
fn ensure_timeslots_never_recreates_existing_slots() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTimeSlotRepository::try_new(&conn).unwrap();

    let first = repo.ensure_timeslots(6).unwrap();
    let second = repo.ensure_timeslots(8).unwrap();

    assert_eq!(first, second);
    let slot = repo.get_timeslot(first[10].id).unwrap().unwrap();
    assert_eq!(slot, first[10]);
    assert!(repo.get_timeslot(first[29].id + 1).unwrap().is_none());
}
