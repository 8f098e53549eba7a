use crate::auth::auth::AuthUser;
use crate::service::attendance::{self, AttendanceEntry, normalize_day};
use crate::service::error::ServiceError;
use crate::service::{enrollment, roster};
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollSubjectReq {
    #[schema(example = 1)]
    pub subject_id: i64,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordAttendanceReq {
    #[schema(example = 1)]
    pub subject_id: i64,
    #[schema(example = "2024-03-01", value_type = String)]
    pub date: String,
    pub attendance: Vec<AttendanceEntry>,
}

#[derive(Deserialize, ToSchema)]
pub struct DateQuery {
    /// ISO-8601 date; time components are truncated to the day.
    pub date: Option<String>,
}

/// Courses where this teacher teaches at least one subject, with the
/// taught subjects and the class roster.
#[utoipa::path(
    get,
    path = "/api/teacher/classes",
    responses(
        (status = 200, description = "Teacher's classes"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Teacher"
)]
pub async fn classes(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_teacher()?;

    let classes = roster::teacher_classes(pool.get_ref(), auth.user_id).await?;

    Ok(HttpResponse::Ok().json(classes))
}

/// Students of every course in which this teacher teaches.
#[utoipa::path(
    get,
    path = "/api/teacher/students",
    responses(
        (status = 200, description = "Students across the teacher's courses"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Teacher"
)]
pub async fn students(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_teacher()?;

    let students = roster::teacher_students(pool.get_ref(), auth.user_id).await?;

    Ok(HttpResponse::Ok().json(students))
}

/// All subjects with an `enrolled` flag for this teacher. Creates the
/// teacher row on first visit.
#[utoipa::path(
    get,
    path = "/api/teacher/subjects",
    responses(
        (status = 200, description = "Subject catalogue with enrollment flags"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Teacher"
)]
pub async fn subjects(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_teacher()?;

    enrollment::ensure_teacher(pool.get_ref(), auth.user_id).await?;
    let subjects = roster::list_subjects(pool.get_ref(), auth.user_id).await?;

    Ok(HttpResponse::Ok().json(subjects))
}

/// Only the subjects this teacher is enrolled in.
#[utoipa::path(
    get,
    path = "/api/teacher/subjects/enrolled",
    responses(
        (status = 200, description = "Enrolled subjects"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Teacher"
)]
pub async fn enrolled_subjects(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_teacher()?;

    let subjects = roster::enrolled_subjects(pool.get_ref(), auth.user_id).await?;

    Ok(HttpResponse::Ok().json(json!({ "data": subjects })))
}

/// Toggle enrollment in a subject. Returns the resulting state.
#[utoipa::path(
    post,
    path = "/api/teacher/subjects/enroll",
    request_body = EnrollSubjectReq,
    responses(
        (status = 200, description = "Toggled", body = Object, example = json!({"enrolled": true})),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Subject not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Teacher"
)]
pub async fn enroll_subject(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<EnrollSubjectReq>,
) -> actix_web::Result<impl Responder> {
    auth.require_teacher()?;

    let enrolled =
        enrollment::toggle_teacher_subject(pool.get_ref(), auth.user_id, payload.subject_id)
            .await?;

    Ok(HttpResponse::Ok().json(json!({ "enrolled": enrolled })))
}

/// Class roster for a subject on one day, with existing marks and
/// false for every unmarked student.
#[utoipa::path(
    get,
    path = "/api/teacher/subjects/{subject_id}/attendance",
    params(
        ("subject_id" = i64, Path, description = "Subject to take attendance for"),
        ("date" = String, Query, description = "Calendar day, ISO-8601")
    ),
    responses(
        (status = 200, description = "Roster with marks"),
        (status = 400, description = "Missing or invalid date"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not enrolled in subject")
    ),
    security(("bearer_auth" = [])),
    tag = "Teacher"
)]
pub async fn subject_attendance(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    query: web::Query<DateQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_teacher()?;

    let raw = query
        .date
        .as_deref()
        .ok_or(ServiceError::Validation("Date parameter is required"))?;
    let date = normalize_day(raw).ok_or(ServiceError::Validation("Invalid date"))?;

    let subject_id = path.into_inner();
    let students =
        roster::roster_with_marks(pool.get_ref(), auth.user_id, subject_id, date).await?;

    Ok(HttpResponse::Ok().json(json!({ "students": students })))
}

/// Record one day of attendance for a subject. The whole batch is
/// applied in a single transaction; resubmitting overwrites marks.
#[utoipa::path(
    post,
    path = "/api/teacher/attendance",
    request_body = RecordAttendanceReq,
    responses(
        (status = 200, description = "Attendance recorded", body = Object, example = json!({
            "message": "Attendance recorded successfully"
        })),
        (status = 400, description = "Invalid date"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not enrolled in subject")
    ),
    security(("bearer_auth" = [])),
    tag = "Teacher"
)]
pub async fn record_attendance(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<RecordAttendanceReq>,
) -> actix_web::Result<impl Responder> {
    auth.require_teacher()?;

    let date = normalize_day(&payload.date).ok_or(ServiceError::Validation("Invalid date"))?;

    attendance::record_attendance(
        pool.get_ref(),
        auth.user_id,
        payload.subject_id,
        date,
        &payload.attendance,
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Attendance recorded successfully"
    })))
}
