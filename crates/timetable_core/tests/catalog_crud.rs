use timetable_core::db::open_db_in_memory;
use timetable_core::{
    CatalogRepository, NewScheduleEntry, RepoError, ScheduleRepository, SqliteCatalogRepository,
    SqliteScheduleRepository, SqliteTimeSlotRepository, TimeSlotRepository, ValidationError,
};

#[test]
fn create_and_list_catalog_records() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogRepository::try_new(&conn).unwrap();

    let smith = repo.create_teacher("  Dr. Smith ").unwrap();
    let math = repo.create_subject("Mathematics", smith.id).unwrap();
    let cse_a = repo.create_classroom("CSE-A").unwrap();

    assert_eq!(smith.name, "Dr. Smith");
    assert_eq!(repo.list_teachers().unwrap(), vec![smith.clone()]);
    assert_eq!(repo.list_subjects().unwrap(), vec![math.clone()]);
    assert_eq!(repo.list_classrooms().unwrap(), vec![cse_a.clone()]);
    assert_eq!(repo.get_subject(math.id).unwrap().unwrap().teacher_id, smith.id);
    assert!(repo.get_classroom(cse_a.id + 100).unwrap().is_none());
}

#[test]
fn blank_names_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogRepository::try_new(&conn).unwrap();

    let err = repo.create_teacher("   ").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::BlankName("teacher"))
    ));
    assert!(repo.create_classroom("").is_err());
    assert!(repo.list_teachers().unwrap().is_empty());
}

#[test]
fn subject_requires_existing_teacher() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogRepository::try_new(&conn).unwrap();

    let err = repo.create_subject("Physics", 42).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "teacher",
            id: 42
        }
    ));
}

#[test]
fn re_adding_requirement_updates_periods_instead_of_duplicating() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogRepository::try_new(&conn).unwrap();
    let teacher = repo.create_teacher("Dr. Smith").unwrap();
    let math = repo.create_subject("Mathematics", teacher.id).unwrap();
    let classroom = repo.create_classroom("CSE-A").unwrap();

    let first = repo.upsert_requirement(classroom.id, math.id, 5).unwrap();
    let second = repo.upsert_requirement(classroom.id, math.id, 3).unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.periods_per_week, 3);
    let requirements = repo.list_requirements_for(classroom.id).unwrap();
    assert_eq!(requirements.len(), 1);
    assert_eq!(requirements[0].periods_per_week, 3);
}

#[test]
fn non_positive_periods_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogRepository::try_new(&conn).unwrap();
    let teacher = repo.create_teacher("Dr. Smith").unwrap();
    let math = repo.create_subject("Mathematics", teacher.id).unwrap();
    let classroom = repo.create_classroom("CSE-A").unwrap();

    let err = repo.upsert_requirement(classroom.id, math.id, 0).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::NonPositivePeriods(0))
    ));
    assert!(repo.upsert_requirement(classroom.id, math.id, -2).is_err());
    assert!(repo.list_requirements().unwrap().is_empty());
}

#[test]
fn teacher_with_subjects_cannot_be_deleted() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogRepository::try_new(&conn).unwrap();
    let teacher = repo.create_teacher("Prof. Brown").unwrap();
    let subject = repo.create_subject("Computer Science", teacher.id).unwrap();

    let err = repo.delete_teacher(teacher.id).unwrap_err();
    assert!(matches!(
        err,
        RepoError::TeacherHasSubjects {
            subject_count: 1,
            ..
        }
    ));

    repo.delete_subject(subject.id).unwrap();
    repo.delete_teacher(teacher.id).unwrap();
    assert!(repo.get_teacher(teacher.id).unwrap().is_none());
}

#[test]
fn deleting_missing_records_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogRepository::try_new(&conn).unwrap();

    assert!(matches!(
        repo.delete_classroom(7).unwrap_err(),
        RepoError::NotFound {
            entity: "classroom",
            id: 7
        }
    ));
    assert!(matches!(
        repo.delete_requirement(8).unwrap_err(),
        RepoError::NotFound {
            entity: "requirement",
            id: 8
        }
    ));
}

#[test]
fn deleting_classroom_cascades_to_requirements_and_entries() {
    let conn = open_db_in_memory().unwrap();
    let catalog = SqliteCatalogRepository::try_new(&conn).unwrap();
    let timeslots = SqliteTimeSlotRepository::try_new(&conn).unwrap();
    let schedule = SqliteScheduleRepository::try_new(&conn).unwrap();

    let teacher = catalog.create_teacher("Dr. Davis").unwrap();
    let english = catalog.create_subject("English", teacher.id).unwrap();
    let classroom = catalog.create_classroom("ECE-A").unwrap();
    catalog.upsert_requirement(classroom.id, english.id, 2).unwrap();
    let slots = timeslots.ensure_timeslots(6).unwrap();
    schedule
        .replace_all(&[NewScheduleEntry {
            classroom_id: classroom.id,
            subject_id: english.id,
            teacher_id: teacher.id,
            timeslot_id: slots[0].id,
        }])
        .unwrap();

    catalog.delete_classroom(classroom.id).unwrap();

    assert!(catalog.list_requirements().unwrap().is_empty());
    assert!(schedule.list_entries().unwrap().is_empty());
    assert_eq!(timeslots.list_timeslots().unwrap().len(), 30);
}
