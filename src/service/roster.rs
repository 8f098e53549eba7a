//! Read-only roster queries backing the dashboards: class and student
//! listings for teachers, course/subject catalogues with enrollment
//! flags, and the per-day roster used when taking attendance.

use crate::model::student::StudentBrief;
use crate::model::subject::SubjectBrief;
use crate::service::attendance::require_subject_access;
use crate::service::error::ServiceError;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use std::collections::HashMap;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct CourseBrief {
    pub id: i64,
    pub name: String,
    pub code: String,
}

/// A course as seen from the teacher portal: only the subjects this
/// teacher teaches, plus the full student list.
#[derive(Serialize, ToSchema)]
pub struct TeacherClass {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub semester: String,
    pub subjects: Vec<SubjectBrief>,
    pub students: Vec<StudentBrief>,
}

#[derive(Serialize, ToSchema)]
pub struct RosterStudent {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub enrollment: String,
    pub course: CourseNameCode,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseNameCode {
    pub name: String,
    pub code: String,
}

#[derive(Serialize, ToSchema)]
pub struct CourseWithSubjects {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub semester: String,
    pub subjects: Vec<SubjectBrief>,
    pub enrolled: bool,
}

#[derive(Serialize, ToSchema)]
pub struct SubjectWithCourse {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub course: CourseBrief,
    pub enrolled: bool,
}

/// One roster line when taking attendance: the recorded mark for the
/// queried day, or false when no record exists.
#[derive(Debug, Serialize, ToSchema)]
pub struct RosterMark {
    pub id: i64,
    pub name: String,
    pub enrollment: String,
    pub status: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub enrollment: String,
    pub course: CourseNameCode,
}

#[derive(FromRow)]
struct CourseRow {
    id: i64,
    name: String,
    code: String,
    semester: String,
}

/// Courses that contain at least one subject taught by this teacher.
pub async fn teacher_classes(
    pool: &SqlitePool,
    teacher_id: i64,
) -> Result<Vec<TeacherClass>, ServiceError> {
    let courses = sqlx::query_as::<_, CourseRow>(
        r#"
        SELECT DISTINCT c.id, c.name, c.code, c.semester
        FROM courses c
        JOIN subjects s ON s.course_id = c.id
        JOIN teacher_subjects ts ON ts.subject_id = s.id
        WHERE ts.teacher_id = ?
        ORDER BY c.id
        "#,
    )
    .bind(teacher_id)
    .fetch_all(pool)
    .await?;

    let mut classes = Vec::with_capacity(courses.len());

    for course in courses {
        let subjects = sqlx::query_as::<_, SubjectBrief>(
            r#"
            SELECT s.id, s.name, s.code
            FROM subjects s
            JOIN teacher_subjects ts ON ts.subject_id = s.id
            WHERE ts.teacher_id = ? AND s.course_id = ?
            ORDER BY s.id
            "#,
        )
        .bind(teacher_id)
        .bind(course.id)
        .fetch_all(pool)
        .await?;

        let students = sqlx::query_as::<_, StudentBrief>(
            "SELECT id, name, enrollment FROM students WHERE course_id = ? ORDER BY name",
        )
        .bind(course.id)
        .fetch_all(pool)
        .await?;

        classes.push(TeacherClass {
            id: course.id,
            name: course.name,
            code: course.code,
            semester: course.semester,
            subjects,
            students,
        });
    }

    Ok(classes)
}

#[derive(FromRow)]
struct RosterStudentRow {
    id: i64,
    name: String,
    email: String,
    enrollment: String,
    course_name: String,
    course_code: String,
}

/// Students of every course in which this teacher teaches a subject.
pub async fn teacher_students(
    pool: &SqlitePool,
    teacher_id: i64,
) -> Result<Vec<RosterStudent>, ServiceError> {
    let rows = sqlx::query_as::<_, RosterStudentRow>(
        r#"
        SELECT st.id, st.name, st.email, st.enrollment,
               c.name AS course_name, c.code AS course_code
        FROM students st
        JOIN courses c ON c.id = st.course_id
        WHERE st.course_id IN (
            SELECT DISTINCT s.course_id
            FROM subjects s
            JOIN teacher_subjects ts ON ts.subject_id = s.id
            WHERE ts.teacher_id = ?
        )
        ORDER BY st.name
        "#,
    )
    .bind(teacher_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| RosterStudent {
            id: r.id,
            name: r.name,
            email: r.email,
            enrollment: r.enrollment,
            course: CourseNameCode {
                name: r.course_name,
                code: r.course_code,
            },
        })
        .collect())
}

/// Every course with its subjects and an `enrolled` flag relative to
/// the requesting student.
pub async fn list_courses(
    pool: &SqlitePool,
    student_id: i64,
) -> Result<Vec<CourseWithSubjects>, ServiceError> {
    let current: Option<i64> = sqlx::query_scalar("SELECT course_id FROM students WHERE id = ?")
        .bind(student_id)
        .fetch_optional(pool)
        .await?;

    let courses = sqlx::query_as::<_, CourseRow>(
        "SELECT id, name, code, semester FROM courses ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    let mut out = Vec::with_capacity(courses.len());

    for course in courses {
        let subjects = sqlx::query_as::<_, SubjectBrief>(
            "SELECT id, name, code FROM subjects WHERE course_id = ? ORDER BY id",
        )
        .bind(course.id)
        .fetch_all(pool)
        .await?;

        out.push(CourseWithSubjects {
            enrolled: current == Some(course.id),
            id: course.id,
            name: course.name,
            code: course.code,
            semester: course.semester,
            subjects,
        });
    }

    Ok(out)
}

#[derive(FromRow)]
struct SubjectWithCourseRow {
    id: i64,
    name: String,
    code: String,
    course_id: i64,
    course_name: String,
    course_code: String,
    enrolled: bool,
}

impl From<SubjectWithCourseRow> for SubjectWithCourse {
    fn from(r: SubjectWithCourseRow) -> Self {
        SubjectWithCourse {
            id: r.id,
            name: r.name,
            code: r.code,
            course: CourseBrief {
                id: r.course_id,
                name: r.course_name,
                code: r.course_code,
            },
            enrolled: r.enrolled,
        }
    }
}

/// Every subject with its course and an `enrolled` flag relative to
/// the requesting teacher.
pub async fn list_subjects(
    pool: &SqlitePool,
    teacher_id: i64,
) -> Result<Vec<SubjectWithCourse>, ServiceError> {
    let rows = sqlx::query_as::<_, SubjectWithCourseRow>(
        r#"
        SELECT s.id, s.name, s.code,
               c.id AS course_id, c.name AS course_name, c.code AS course_code,
               EXISTS(
                   SELECT 1 FROM teacher_subjects ts
                   WHERE ts.teacher_id = ? AND ts.subject_id = s.id
               ) AS enrolled
        FROM subjects s
        JOIN courses c ON c.id = s.course_id
        ORDER BY s.id
        "#,
    )
    .bind(teacher_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(SubjectWithCourse::from).collect())
}

/// Only the subjects this teacher is enrolled in.
pub async fn enrolled_subjects(
    pool: &SqlitePool,
    teacher_id: i64,
) -> Result<Vec<SubjectWithCourse>, ServiceError> {
    let rows = sqlx::query_as::<_, SubjectWithCourseRow>(
        r#"
        SELECT s.id, s.name, s.code,
               c.id AS course_id, c.name AS course_name, c.code AS course_code,
               1 AS enrolled
        FROM teacher_subjects ts
        JOIN subjects s ON s.id = ts.subject_id
        JOIN courses c ON c.id = s.course_id
        WHERE ts.teacher_id = ?
        ORDER BY s.id
        "#,
    )
    .bind(teacher_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(SubjectWithCourse::from).collect())
}

#[derive(FromRow)]
struct MarkRow {
    student_id: i64,
    status: bool,
}

/// The subject's full class roster with each student's mark for the
/// queried day. Students without a record default to false. The caller
/// must be enrolled in the subject.
pub async fn roster_with_marks(
    pool: &SqlitePool,
    teacher_id: i64,
    subject_id: i64,
    date: NaiveDate,
) -> Result<Vec<RosterMark>, ServiceError> {
    require_subject_access(pool, teacher_id, subject_id).await?;

    let students = sqlx::query_as::<_, StudentBrief>(
        r#"
        SELECT id, name, enrollment
        FROM students
        WHERE course_id = (SELECT course_id FROM subjects WHERE id = ?)
        ORDER BY name
        "#,
    )
    .bind(subject_id)
    .fetch_all(pool)
    .await?;

    let marks = sqlx::query_as::<_, MarkRow>(
        "SELECT student_id, status FROM attendance WHERE subject_id = ? AND date = ?",
    )
    .bind(subject_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    let mark_map: HashMap<i64, bool> = marks.into_iter().map(|m| (m.student_id, m.status)).collect();

    Ok(students
        .into_iter()
        .map(|s| RosterMark {
            status: mark_map.get(&s.id).copied().unwrap_or(false),
            id: s.id,
            name: s.name,
            enrollment: s.enrollment,
        })
        .collect())
}

#[derive(FromRow)]
struct StudentProfileRow {
    id: i64,
    name: String,
    email: String,
    enrollment: String,
    course_name: String,
    course_code: String,
}

/// The student's own record with their course. NotFound until the
/// student has enrolled for the first time.
pub async fn student_profile(
    pool: &SqlitePool,
    student_id: i64,
) -> Result<StudentProfile, ServiceError> {
    let row = sqlx::query_as::<_, StudentProfileRow>(
        r#"
        SELECT st.id, st.name, st.email, st.enrollment,
               c.name AS course_name, c.code AS course_code
        FROM students st
        JOIN courses c ON c.id = st.course_id
        WHERE st.id = ?
        "#,
    )
    .bind(student_id)
    .fetch_optional(pool)
    .await?
    .ok_or(ServiceError::NotFound("Student not found"))?;

    Ok(StudentProfile {
        id: row.id,
        name: row.name,
        email: row.email,
        enrollment: row.enrollment,
        course: CourseNameCode {
            name: row.course_name,
            code: row.course_code,
        },
    })
}
