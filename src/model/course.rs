use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub semester: String,
}
