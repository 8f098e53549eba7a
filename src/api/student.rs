use crate::auth::auth::AuthUser;
use crate::service::{attendance, enrollment, roster};
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollCourseReq {
    #[schema(example = 1)]
    pub course_id: i64,
}

/// Per-subject attendance summaries for the signed-in student.
#[utoipa::path(
    get,
    path = "/api/student/attendance",
    responses(
        (status = 200, description = "Per-subject attendance summaries"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Student"
)]
pub async fn attendance_summaries(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_student()?;

    let summaries = attendance::student_summaries(pool.get_ref(), auth.user_id).await?;

    Ok(HttpResponse::Ok().json(summaries))
}

/// Attendance for one subject with the presence percentage.
#[utoipa::path(
    get,
    path = "/api/student/attendance/{subject_id}",
    params(("subject_id" = i64, Path, description = "Subject to summarize")),
    responses(
        (status = 200, description = "Single-subject summary"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Student"
)]
pub async fn subject_attendance(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    auth.require_student()?;

    let subject_id = path.into_inner();
    let summary = attendance::subject_summary(pool.get_ref(), auth.user_id, subject_id).await?;

    Ok(HttpResponse::Ok().json(summary))
}

/// All courses with subjects and the student's enrollment flag.
#[utoipa::path(
    get,
    path = "/api/student/courses",
    responses(
        (status = 200, description = "Course catalogue with enrollment flags"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Student"
)]
pub async fn list_courses(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_student()?;

    let courses = roster::list_courses(pool.get_ref(), auth.user_id).await?;

    Ok(HttpResponse::Ok().json(courses))
}

/// Enroll in (or switch to) a course. Enrolling into the current
/// course is rejected: a student cannot be without a course.
#[utoipa::path(
    post,
    path = "/api/student/courses/enroll",
    request_body = EnrollCourseReq,
    responses(
        (status = 200, description = "Enrolled or switched"),
        (status = 400, description = "Cannot unenroll from the current course"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Student"
)]
pub async fn enroll_course(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<EnrollCourseReq>,
) -> actix_web::Result<impl Responder> {
    auth.require_student()?;

    let outcome = enrollment::enroll_student(pool.get_ref(), auth.user_id, payload.course_id).await?;

    Ok(HttpResponse::Ok().json(outcome))
}

/// The student's own profile with their course.
#[utoipa::path(
    get,
    path = "/api/student/profile",
    responses(
        (status = 200, description = "Student profile"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Student has not enrolled yet")
    ),
    security(("bearer_auth" = [])),
    tag = "Student"
)]
pub async fn profile(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_student()?;

    let profile = roster::student_profile(pool.get_ref(), auth.user_id).await?;

    Ok(HttpResponse::Ok().json(profile))
}
