use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Student row. Shares its id with the auth user and is created lazily
/// on the first course enrollment.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub enrollment: String,
    pub course_id: i64,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct StudentBrief {
    pub id: i64,
    pub name: String,
    pub enrollment: String,
}
