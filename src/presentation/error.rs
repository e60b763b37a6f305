// HTTP error mapping
use crate::domain::error::ConsoleError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
}

impl From<ConsoleError> for ApiError {
    fn from(err: ConsoleError) -> Self {
        let message = err.to_string();
        match err {
            ConsoleError::NotAuthenticated => ApiError::Unauthorized(message),
            ConsoleError::UnknownDevice(_) => ApiError::NotFound(message),
            ConsoleError::InvalidPageSize { .. }
            | ConsoleError::InvalidPageNumber
            | ConsoleError::UnknownSortKey(_)
            | ConsoleError::UnknownStatusFilter(_) => ApiError::BadRequest(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}
