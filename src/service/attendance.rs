//! Attendance recording and aggregation. Marks are keyed on
//! (calendar day, student, subject); recording is an all-or-nothing
//! batch upsert, aggregation groups a student's history per subject.

use crate::model::attendance::AttendanceMark;
use crate::model::subject::SubjectBrief;
use crate::service::error::ServiceError;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use std::collections::HashMap;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub student_id: i64,
    pub status: bool,
}

#[derive(Serialize, ToSchema)]
pub struct SubjectAttendanceSummary {
    pub subject: SubjectBrief,
    pub total: i64,
    pub present: i64,
    pub records: Vec<AttendanceMark>,
}

#[derive(Serialize, ToSchema)]
pub struct SubjectSummary {
    pub total: i64,
    pub present: i64,
    #[schema(example = 66.67)]
    pub percentage: f64,
    pub records: Vec<AttendanceMark>,
}

/// Truncates an incoming date to day granularity. Accepts a plain
/// `YYYY-MM-DD` or a full ISO-8601 timestamp.
pub fn normalize_day(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

fn percentage(present: i64, total: i64) -> f64 {
    if total > 0 {
        present as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

async fn teaches_subject(
    pool: &SqlitePool,
    teacher_id: i64,
    subject_id: i64,
) -> Result<bool, ServiceError> {
    let teaches: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM teacher_subjects WHERE teacher_id = ? AND subject_id = ?)",
    )
    .bind(teacher_id)
    .bind(subject_id)
    .fetch_one(pool)
    .await?;

    Ok(teaches)
}

/// Rejects callers who do not hold an enrollment for the subject.
pub async fn require_subject_access(
    pool: &SqlitePool,
    teacher_id: i64,
    subject_id: i64,
) -> Result<(), ServiceError> {
    if teaches_subject(pool, teacher_id, subject_id).await? {
        Ok(())
    } else {
        Err(ServiceError::Forbidden("Unauthorized access to subject"))
    }
}

/// Upserts one mark per entry on the (date, student, subject) key, all
/// inside a single transaction so a partial day is never committed.
/// Resubmission for the same day overwrites status.
pub async fn record_attendance(
    pool: &SqlitePool,
    teacher_id: i64,
    subject_id: i64,
    date: NaiveDate,
    entries: &[AttendanceEntry],
) -> Result<(), ServiceError> {
    require_subject_access(pool, teacher_id, subject_id).await?;

    let mut tx = pool.begin().await?;

    for entry in entries {
        sqlx::query(
            r#"
            INSERT INTO attendance (date, student_id, subject_id, status)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (date, student_id, subject_id)
            DO UPDATE SET status = excluded.status
            "#,
        )
        .bind(date)
        .bind(entry.student_id)
        .bind(subject_id)
        .bind(entry.status)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(())
}

#[derive(FromRow)]
struct AttendanceRow {
    subject_id: i64,
    subject_name: String,
    subject_code: String,
    date: NaiveDate,
    status: bool,
}

/// All of a student's marks grouped per subject, newest first within
/// each group. Groups appear in first-seen (most recent mark) order.
pub async fn student_summaries(
    pool: &SqlitePool,
    student_id: i64,
) -> Result<Vec<SubjectAttendanceSummary>, ServiceError> {
    let rows = sqlx::query_as::<_, AttendanceRow>(
        r#"
        SELECT a.subject_id, s.name AS subject_name, s.code AS subject_code, a.date, a.status
        FROM attendance a
        JOIN subjects s ON s.id = a.subject_id
        WHERE a.student_id = ?
        ORDER BY a.date DESC
        "#,
    )
    .bind(student_id)
    .fetch_all(pool)
    .await?;

    let mut summaries: Vec<SubjectAttendanceSummary> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let idx = *index.entry(row.subject_id).or_insert_with(|| {
            summaries.push(SubjectAttendanceSummary {
                subject: SubjectBrief {
                    id: row.subject_id,
                    name: row.subject_name.clone(),
                    code: row.subject_code.clone(),
                },
                total: 0,
                present: 0,
                records: Vec::new(),
            });
            summaries.len() - 1
        });

        let summary = &mut summaries[idx];
        summary.total += 1;
        if row.status {
            summary.present += 1;
        }
        summary.records.push(AttendanceMark {
            date: row.date,
            status: row.status,
        });
    }

    Ok(summaries)
}

/// A student's marks for one subject with the presence percentage.
/// Percentage is 0 when no marks exist.
pub async fn subject_summary(
    pool: &SqlitePool,
    student_id: i64,
    subject_id: i64,
) -> Result<SubjectSummary, ServiceError> {
    let records = sqlx::query_as::<_, AttendanceMark>(
        r#"
        SELECT date, status
        FROM attendance
        WHERE student_id = ? AND subject_id = ?
        ORDER BY date DESC
        "#,
    )
    .bind(student_id)
    .bind(subject_id)
    .fetch_all(pool)
    .await?;

    let total = records.len() as i64;
    let present = records.iter().filter(|r| r.status).count() as i64;

    Ok(SubjectSummary {
        total,
        present,
        percentage: percentage(present, total),
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_day_accepts_plain_date() {
        assert_eq!(
            normalize_day("2024-03-01"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn normalize_day_truncates_timestamps() {
        assert_eq!(
            normalize_day("2024-03-01T14:30:00Z"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(
            normalize_day("2024-03-01T23:59:59+05:30"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn normalize_day_rejects_garbage() {
        assert_eq!(normalize_day("yesterday"), None);
        assert_eq!(normalize_day("2024-13-01"), None);
    }

    #[test]
    fn percentage_handles_empty_history() {
        assert_eq!(percentage(0, 0), 0.0);
    }

    #[test]
    fn percentage_two_of_three() {
        let p = percentage(2, 3);
        assert!((p - 66.67).abs() < 0.01);
    }
}
