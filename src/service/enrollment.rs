//! Enrollment state transitions: student↔course (single, mandatory) and
//! teacher↔subject (many-to-many toggle). Student and teacher rows are
//! created lazily from the auth user on the first enrollment action.

use crate::model::course::Course;
use crate::service::error::ServiceError;
use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollOutcome {
    pub enrolled: bool,
    pub message: &'static str,
    pub course: Course,
}

fn new_enrollment_number() -> String {
    // "ST" + 6 chars, unique enough for a roster
    let id = Uuid::new_v4().simple().to_string();
    format!("ST{}", id[..6].to_uppercase())
}

/// Creates the teacher row for this user if it does not exist yet.
pub async fn ensure_teacher(pool: &SqlitePool, user_id: i64) -> Result<(), ServiceError> {
    sqlx::query(
        r#"
        INSERT INTO teachers (id, name, email)
        SELECT id, name, email FROM users WHERE id = ?
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Binds the student to a course. A student always has exactly one course:
/// a missing row is created, a different course is switched to, and
/// re-enrolling into the current course is rejected (no unenroll).
pub async fn enroll_student(
    pool: &SqlitePool,
    user_id: i64,
    course_id: i64,
) -> Result<EnrollOutcome, ServiceError> {
    let course = sqlx::query_as::<_, Course>(
        "SELECT id, name, code, semester FROM courses WHERE id = ?",
    )
    .bind(course_id)
    .fetch_optional(pool)
    .await?
    .ok_or(ServiceError::NotFound("Course not found"))?;

    let current: Option<i64> = sqlx::query_scalar("SELECT course_id FROM students WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    match current {
        None => {
            let result = sqlx::query(
                r#"
                INSERT INTO students (id, name, email, enrollment, course_id)
                SELECT id, name, email, ?, ? FROM users WHERE id = ?
                "#,
            )
            .bind(new_enrollment_number())
            .bind(course_id)
            .bind(user_id)
            .execute(pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(ServiceError::NotFound("User not found"));
            }

            Ok(EnrollOutcome {
                enrolled: true,
                message: "Successfully created student and enrolled in course",
                course,
            })
        }
        Some(current_course) if current_course == course_id => Err(ServiceError::Validation(
            "Cannot unenroll. Students must be enrolled in a course.",
        )),
        Some(_) => {
            sqlx::query("UPDATE students SET course_id = ? WHERE id = ?")
                .bind(course_id)
                .bind(user_id)
                .execute(pool)
                .await?;

            Ok(EnrollOutcome {
                enrolled: true,
                message: "Successfully switched course",
                course,
            })
        }
    }
}

/// Toggles the teacher's enrollment in a subject. Returns the resulting
/// state: true when the toggle enrolled, false when it unenrolled.
pub async fn toggle_teacher_subject(
    pool: &SqlitePool,
    user_id: i64,
    subject_id: i64,
) -> Result<bool, ServiceError> {
    let subject_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM subjects WHERE id = ?)")
            .bind(subject_id)
            .fetch_one(pool)
            .await?;

    if !subject_exists {
        return Err(ServiceError::NotFound("Subject not found"));
    }

    ensure_teacher(pool, user_id).await?;

    let existing: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM teacher_subjects WHERE teacher_id = ? AND subject_id = ?",
    )
    .bind(user_id)
    .bind(subject_id)
    .fetch_optional(pool)
    .await?;

    match existing {
        Some(join_id) => {
            sqlx::query("DELETE FROM teacher_subjects WHERE id = ?")
                .bind(join_id)
                .execute(pool)
                .await?;
            Ok(false)
        }
        None => {
            sqlx::query("INSERT INTO teacher_subjects (teacher_id, subject_id) VALUES (?, ?)")
                .bind(user_id)
                .bind(subject_id)
                .execute(pool)
                .await?;
            Ok(true)
        }
    }
}
