use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use std::fmt;

/// Error taxonomy for the service layer. `Db` covers storage failures and
/// is logged server-side; callers only see a generic message.
#[derive(Debug)]
pub enum ServiceError {
    NotFound(&'static str),
    Forbidden(&'static str),
    Validation(&'static str),
    Db(sqlx::Error),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::NotFound(msg) => write!(f, "{}", msg),
            ServiceError::Forbidden(msg) => write!(f, "{}", msg),
            ServiceError::Validation(msg) => write!(f, "{}", msg),
            ServiceError::Db(e) => write!(f, "database error: {}", e),
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e)
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::Db(e) => {
                tracing::error!(error = %e, "Storage failure");
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal Server Error"
                }))
            }
            other => HttpResponse::build(self.status_code()).json(json!({
                "error": other.to_string()
            })),
        }
    }
}
