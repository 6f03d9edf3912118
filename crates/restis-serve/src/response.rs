//! JSON response encoding.

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use restis_core::Envelope;
use serde::Serialize;

/// Content type of every gateway response.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Serialize `body` as JSON with the given status.
///
/// If serialization fails the client gets a 500 with an error envelope
/// instead. That envelope holds only a string, so encoding it cannot fail
/// in turn.
pub fn respond<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => {
            tracing::debug!(status = status.as_u16(), "response sent");
            json_response(status, bytes)
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize response");
            let fallback = Envelope::failure(format!("something went wrong: {err}"));
            let bytes = serde_json::to_vec(&fallback).unwrap_or_default();
            json_response(StatusCode::INTERNAL_SERVER_ERROR, bytes)
        }
    }
}

/// A response with the JSON content type and no body.
pub fn empty(status: StatusCode) -> Response {
    (status, [(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))]).into_response()
}

fn json_response(status: StatusCode, bytes: Vec<u8>) -> Response {
    (
        status,
        [(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
        bytes,
    )
        .into_response()
}
