use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Errors surfaced to API callers. None of these are retried internally;
/// each maps directly to a response status and a JSON error body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("upstream API unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("upstream API returned a bad response: {0}")]
    UpstreamBadResponse(String),

    #[error("not found")]
    NotFound,

    #[error("invalid path")]
    InvalidPath,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UpstreamUnavailable(_) | ApiError::UpstreamBadResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidPath => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
