//! Catalog repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD for teachers, subjects, classrooms and requirements.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Names are trimmed and non-blank; period counts are positive.
//! - Re-adding a (classroom, subject) requirement updates it in place.
//! - A teacher that still owns subjects cannot be deleted.

use crate::db::DbError;
use crate::model::catalog::{
    normalize_name, validate_periods, ClassRoom, ClassRoomId, RequirementId, Subject, SubjectId,
    SubjectRequirement, Teacher, TeacherId, ValidationError,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for timetable persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound {
        entity: &'static str,
        id: i64,
    },
    /// Teacher still owns subjects and cannot be removed.
    TeacherHasSubjects {
        teacher_id: TeacherId,
        subject_count: i64,
    },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::TeacherHasSubjects {
                teacher_id,
                subject_count,
            } => write!(
                f,
                "teacher {teacher_id} still teaches {subject_count} subject(s)"
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "timetable repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "timetable repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "timetable repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted timetable data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for catalog CRUD.
pub trait CatalogRepository {
    fn create_teacher(&self, name: &str) -> RepoResult<Teacher>;
    fn get_teacher(&self, id: TeacherId) -> RepoResult<Option<Teacher>>;
    fn list_teachers(&self) -> RepoResult<Vec<Teacher>>;
    fn delete_teacher(&self, id: TeacherId) -> RepoResult<()>;

    fn create_subject(&self, name: &str, teacher_id: TeacherId) -> RepoResult<Subject>;
    fn get_subject(&self, id: SubjectId) -> RepoResult<Option<Subject>>;
    fn list_subjects(&self) -> RepoResult<Vec<Subject>>;
    fn delete_subject(&self, id: SubjectId) -> RepoResult<()>;

    fn create_classroom(&self, name: &str) -> RepoResult<ClassRoom>;
    fn get_classroom(&self, id: ClassRoomId) -> RepoResult<Option<ClassRoom>>;
    fn list_classrooms(&self) -> RepoResult<Vec<ClassRoom>>;
    fn delete_classroom(&self, id: ClassRoomId) -> RepoResult<()>;

    /// Inserts the requirement or updates `periods_per_week` of the existing
    /// (classroom, subject) pair.
    fn upsert_requirement(
        &self,
        classroom_id: ClassRoomId,
        subject_id: SubjectId,
        periods_per_week: i64,
    ) -> RepoResult<SubjectRequirement>;
    fn list_requirements(&self) -> RepoResult<Vec<SubjectRequirement>>;
    fn list_requirements_for(&self, classroom_id: ClassRoomId)
        -> RepoResult<Vec<SubjectRequirement>>;
    fn delete_requirement(&self, id: RequirementId) -> RepoResult<()>;
}

/// SQLite-backed catalog repository.
pub struct SqliteCatalogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCatalogRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        super::ensure_connection_ready(
            conn,
            "subject_requirements",
            &["id", "classroom_id", "subject_id", "periods_per_week"],
        )?;
        Ok(Self { conn })
    }

    fn delete_by_id(&self, table: &str, entity: &'static str, id: i64) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(&format!("DELETE FROM {table} WHERE id = ?1;"), [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity, id });
        }
        Ok(())
    }
}

impl CatalogRepository for SqliteCatalogRepository<'_> {
    fn create_teacher(&self, name: &str) -> RepoResult<Teacher> {
        let name = normalize_name("teacher", name)?;
        self.conn
            .execute("INSERT INTO teachers (name) VALUES (?1);", [name.as_str()])?;
        Ok(Teacher {
            id: self.conn.last_insert_rowid(),
            name,
        })
    }

    fn get_teacher(&self, id: TeacherId) -> RepoResult<Option<Teacher>> {
        let teacher = self
            .conn
            .query_row(
                "SELECT id, name FROM teachers WHERE id = ?1;",
                [id],
                parse_teacher_row,
            )
            .optional()?;
        Ok(teacher)
    }

    fn list_teachers(&self) -> RepoResult<Vec<Teacher>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM teachers ORDER BY id ASC;")?;
        let teachers = stmt
            .query_map([], parse_teacher_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(teachers)
    }

    fn delete_teacher(&self, id: TeacherId) -> RepoResult<()> {
        let subject_count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM subjects WHERE teacher_id = ?1;",
            [id],
            |row| row.get(0),
        )?;
        if subject_count > 0 {
            return Err(RepoError::TeacherHasSubjects {
                teacher_id: id,
                subject_count,
            });
        }
        self.delete_by_id("teachers", "teacher", id)
    }

    fn create_subject(&self, name: &str, teacher_id: TeacherId) -> RepoResult<Subject> {
        let name = normalize_name("subject", name)?;
        let found = self.get_teacher(teacher_id)?;
        require(found, "teacher", teacher_id)?;

        self.conn.execute(
            "INSERT INTO subjects (name, teacher_id) VALUES (?1, ?2);",
            params![name.as_str(), teacher_id],
        )?;
        Ok(Subject {
            id: self.conn.last_insert_rowid(),
            name,
            teacher_id,
        })
    }

    fn get_subject(&self, id: SubjectId) -> RepoResult<Option<Subject>> {
        let subject = self
            .conn
            .query_row(
                "SELECT id, name, teacher_id FROM subjects WHERE id = ?1;",
                [id],
                parse_subject_row,
            )
            .optional()?;
        Ok(subject)
    }

    fn list_subjects(&self) -> RepoResult<Vec<Subject>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, teacher_id FROM subjects ORDER BY id ASC;")?;
        let subjects = stmt
            .query_map([], parse_subject_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(subjects)
    }

    fn delete_subject(&self, id: SubjectId) -> RepoResult<()> {
        self.delete_by_id("subjects", "subject", id)
    }

    fn create_classroom(&self, name: &str) -> RepoResult<ClassRoom> {
        let name = normalize_name("classroom", name)?;
        self.conn
            .execute("INSERT INTO classrooms (name) VALUES (?1);", [name.as_str()])?;
        Ok(ClassRoom {
            id: self.conn.last_insert_rowid(),
            name,
        })
    }

    fn get_classroom(&self, id: ClassRoomId) -> RepoResult<Option<ClassRoom>> {
        let classroom = self
            .conn
            .query_row(
                "SELECT id, name FROM classrooms WHERE id = ?1;",
                [id],
                parse_classroom_row,
            )
            .optional()?;
        Ok(classroom)
    }

    fn list_classrooms(&self) -> RepoResult<Vec<ClassRoom>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM classrooms ORDER BY id ASC;")?;
        let classrooms = stmt
            .query_map([], parse_classroom_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(classrooms)
    }

    fn delete_classroom(&self, id: ClassRoomId) -> RepoResult<()> {
        self.delete_by_id("classrooms", "classroom", id)
    }

    fn upsert_requirement(
        &self,
        classroom_id: ClassRoomId,
        subject_id: SubjectId,
        periods_per_week: i64,
    ) -> RepoResult<SubjectRequirement> {
        let periods = validate_periods(periods_per_week)?;
        let classroom = self.get_classroom(classroom_id)?;
        require(classroom, "classroom", classroom_id)?;
        let subject = self.get_subject(subject_id)?;
        require(subject, "subject", subject_id)?;

        self.conn.execute(
            "INSERT INTO subject_requirements (classroom_id, subject_id, periods_per_week)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (classroom_id, subject_id)
             DO UPDATE SET periods_per_week = excluded.periods_per_week;",
            params![classroom_id, subject_id, i64::from(periods)],
        )?;

        let requirement = self.conn.query_row(
            "SELECT id, classroom_id, subject_id, periods_per_week
             FROM subject_requirements
             WHERE classroom_id = ?1 AND subject_id = ?2;",
            params![classroom_id, subject_id],
            |row| Ok(parse_requirement_row(row)),
        )??;
        Ok(requirement)
    }

    fn list_requirements(&self) -> RepoResult<Vec<SubjectRequirement>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, classroom_id, subject_id, periods_per_week
             FROM subject_requirements
             ORDER BY classroom_id ASC, id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut requirements = Vec::new();
        while let Some(row) = rows.next()? {
            requirements.push(parse_requirement_row(row)?);
        }
        Ok(requirements)
    }

    fn list_requirements_for(
        &self,
        classroom_id: ClassRoomId,
    ) -> RepoResult<Vec<SubjectRequirement>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, classroom_id, subject_id, periods_per_week
             FROM subject_requirements
             WHERE classroom_id = ?1
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([classroom_id])?;
        let mut requirements = Vec::new();
        while let Some(row) = rows.next()? {
            requirements.push(parse_requirement_row(row)?);
        }
        Ok(requirements)
    }

    fn delete_requirement(&self, id: RequirementId) -> RepoResult<()> {
        self.delete_by_id("subject_requirements", "requirement", id)
    }
}

fn require<T>(found: Option<T>, entity: &'static str, id: i64) -> RepoResult<T> {
    found.ok_or(RepoError::NotFound { entity, id })
}

fn parse_teacher_row(row: &Row<'_>) -> rusqlite::Result<Teacher> {
    Ok(Teacher {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}

fn parse_subject_row(row: &Row<'_>) -> rusqlite::Result<Subject> {
    Ok(Subject {
        id: row.get("id")?,
        name: row.get("name")?,
        teacher_id: row.get("teacher_id")?,
    })
}

fn parse_classroom_row(row: &Row<'_>) -> rusqlite::Result<ClassRoom> {
    Ok(ClassRoom {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}

fn parse_requirement_row(row: &Row<'_>) -> RepoResult<SubjectRequirement> {
    let raw_periods: i64 = row.get("periods_per_week")?;
    let periods_per_week = u32::try_from(raw_periods)
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid periods_per_week `{raw_periods}` in subject_requirements.periods_per_week"
            ))
        })?;

    Ok(SubjectRequirement {
        id: row.get("id")?,
        classroom_id: row.get("classroom_id")?,
        subject_id: row.get("subject_id")?,
        periods_per_week,
    })
}
