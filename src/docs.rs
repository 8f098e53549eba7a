use crate::api::student::EnrollCourseReq;
use crate::api::teacher::{DateQuery, EnrollSubjectReq, RecordAttendanceReq};
use crate::model::attendance::AttendanceMark;
use crate::model::course::Course;
use crate::model::student::{Student, StudentBrief};
use crate::model::subject::{Subject, SubjectBrief};
use crate::model::teacher::Teacher;
use crate::models::{LoginReqDto, RegisterReq};
use crate::service::attendance::{AttendanceEntry, SubjectAttendanceSummary, SubjectSummary};
use crate::service::enrollment::EnrollOutcome;
use crate::service::roster::{
    CourseBrief, CourseNameCode, CourseWithSubjects, RosterMark, RosterStudent, StudentProfile,
    SubjectWithCourse, TeacherClass,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus Attendance API",
        version = "1.0.0",
        description = r#"
## Attendance Management System

Role-based attendance management for an academic institution, serving
students and teachers through separate portals.

### Key Features
- **Student portal**
  - Per-subject attendance percentages and history
  - Course enrollment (switch only; a course is mandatory)
- **Teacher portal**
  - Subject enrollment toggle
  - Class and student rosters
  - Daily attendance recording (transactional bulk upsert)

### Security
All portal endpoints are protected with **JWT Bearer authentication**.
Student routes require the student role, teacher routes the teacher role.

Built with **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::student::attendance_summaries,
        crate::api::student::subject_attendance,
        crate::api::student::list_courses,
        crate::api::student::enroll_course,
        crate::api::student::profile,

        crate::api::teacher::classes,
        crate::api::teacher::students,
        crate::api::teacher::subjects,
        crate::api::teacher::enrolled_subjects,
        crate::api::teacher::enroll_subject,
        crate::api::teacher::subject_attendance,
        crate::api::teacher::record_attendance,
    ),
    components(
        schemas(
            RegisterReq,
            LoginReqDto,
            Course,
            Subject,
            SubjectBrief,
            Student,
            StudentBrief,
            Teacher,
            AttendanceMark,
            AttendanceEntry,
            SubjectAttendanceSummary,
            SubjectSummary,
            EnrollOutcome,
            EnrollCourseReq,
            EnrollSubjectReq,
            RecordAttendanceReq,
            DateQuery,
            CourseBrief,
            CourseNameCode,
            CourseWithSubjects,
            SubjectWithCourse,
            TeacherClass,
            RosterStudent,
            RosterMark,
            StudentProfile,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Student", description = "Student portal APIs"),
        (name = "Teacher", description = "Teacher portal APIs"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
