//! API error types and response formatting.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use restis_core::{AuthError, Envelope, ParseError};

use crate::response::{empty, respond};

/// Errors that end a request before any command reaches the store.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP method other than GET, POST, PUT or HEAD.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Authentication failed (missing or invalid token).
    #[error("unauthorised")]
    Unauthorized(#[from] AuthError),

    /// The request could not be turned into a command.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::MethodNotAllowed => empty(StatusCode::METHOD_NOT_ALLOWED),
            // Missing and wrong tokens get the same body.
            Self::Unauthorized(_) => respond(
                StatusCode::UNAUTHORIZED,
                &Envelope::failure("Unauthorised"),
            ),
            Self::Parse(err) => respond(StatusCode::BAD_REQUEST, &Envelope::failure(err.to_string())),
        }
    }
}
