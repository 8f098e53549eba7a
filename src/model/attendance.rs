use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// One boolean mark for a (calendar day, student, subject) key.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct AttendanceMark {
    #[schema(example = "2024-03-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub status: bool,
}
