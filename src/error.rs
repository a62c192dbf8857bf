//! # Centralized Error Handling
//!
//! Errors that reach an HTTP response are converted here, so handlers only
//! decide *what* went wrong and never build error bodies themselves.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Central application error type for request handling.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(&'static str),
}

#[derive(Serialize)]
struct ErrorBody {
    message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(ErrorBody { message });
        (status, body).into_response()
    }
}
