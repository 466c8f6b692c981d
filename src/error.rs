use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub const GEMINI_ERROR_LABEL: &str = "Gemini API error";
pub const LEAD_STORE_ERROR_LABEL: &str = "Internal server error while saving the lead.";
pub const INTERNAL_ERROR_LABEL: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("Gemini API rate limited: {0}")]
    UpstreamRateLimited(String),

    #[error("Gemini API error: {0}")]
    Upstream(String),

    /// Relay failure; the message is already meant for the caller.
    #[error("{0}")]
    Unreachable(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<JsonPayloadError> for AppError {
    fn from(err: JsonPayloadError) -> Self {
        AppError::Validation(format!("Invalid JSON body: {}", err))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::UpstreamRateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Upstream(_)
            | AppError::Unreachable(_)
            | AppError::Database(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(message)
            | AppError::ServiceUnavailable(message)
            | AppError::Unreachable(message) => json!({ "error": message }),
            AppError::UpstreamRateLimited(details) | AppError::Upstream(details) => {
                json!({ "error": GEMINI_ERROR_LABEL, "details": details })
            }
            AppError::Database(e) => {
                json!({ "error": LEAD_STORE_ERROR_LABEL, "details": e.to_string() })
            }
            AppError::Internal(details) => {
                json!({ "error": INTERNAL_ERROR_LABEL, "details": details })
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
