use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub course_id: i64,
}

/// Short form used inside nested responses.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct SubjectBrief {
    pub id: i64,
    pub name: String,
    pub code: String,
}
