//! Command endpoints for the three request encodings.

use axum::body::Bytes;
use axum::extract::{Extension, State};
use axum::http::{StatusCode, Uri};
use axum::response::Response;
use restis_core::{Command, Credential, parse_command, parse_path, parse_pipeline};

use crate::error::ApiError;
use crate::response::respond;
use crate::state::AppState;

/// `/`
///
/// Executes one command given as a JSON array body.
pub async fn single(
    State(state): State<AppState>,
    Extension(credential): Extension<Credential>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let command = parse_command(&body)?;
    execute(&state, &credential, &command).await
}

/// `/pipeline`
///
/// Executes a batch of commands in order and returns one envelope per
/// command. Individual failures do not affect the status code.
pub async fn pipeline(
    State(state): State<AppState>,
    Extension(credential): Extension<Credential>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let items = parse_pipeline(&body)?;
    tracing::debug!(
        user = %credential.username,
        commands = items.len(),
        "executing pipeline"
    );

    let envelopes = state.dispatcher.execute_pipeline(items).await;
    Ok(respond(StatusCode::OK, &envelopes))
}

/// Any other path.
///
/// The command and its arguments come from the path, the body and the
/// query string, in that order.
pub async fn path(
    State(state): State<AppState>,
    Extension(credential): Extension<Credential>,
    uri: Uri,
    body: Bytes,
) -> Result<Response, ApiError> {
    let command = parse_path(uri.path(), uri.query(), &body)?;
    execute(&state, &credential, &command).await
}

async fn execute(
    state: &AppState,
    credential: &Credential,
    command: &Command,
) -> Result<Response, ApiError> {
    tracing::debug!(
        user = %credential.username,
        command = %command.name,
        args = command.args.len(),
        "executing command"
    );

    let (envelope, status) = state.dispatcher.execute(command).await;
    Ok(respond(status, &envelope))
}
