use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Teacher row. Shares its id with the auth user and is created lazily
/// on the first subject action.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub email: String,
}
