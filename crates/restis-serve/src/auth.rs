//! Bearer token authentication middleware.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use restis_core::{AuthError, Credential, CredentialStore};

use crate::error::ApiError;
use crate::state::AppState;

/// Middleware that requires a valid Bearer token for all requests.
///
/// The token must be provided in the `Authorization` header as:
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// The administrator token is accepted as is. Any other token must have been
/// issued by `ACL RESTTOKEN`. On success the bound [`Credential`] is added to
/// the request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let credential = authenticate(&state.config.api_token, &state.credentials, header)
        .inspect_err(|_| tracing::warn!("unauthorised request"))?;

    request.extensions_mut().insert(credential);
    Ok(next.run(request).await)
}

/// Resolve an `Authorization` header value to a credential.
pub fn authenticate(
    api_token: &str,
    credentials: &CredentialStore,
    header: Option<&str>,
) -> Result<Credential, AuthError> {
    let token = header
        .map(|value| value.strip_prefix("Bearer ").unwrap_or(value))
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidToken)?;

    if token == api_token {
        return Ok(Credential::anonymous());
    }

    credentials.get(token).ok_or(AuthError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(token: &str) -> CredentialStore {
        let store = CredentialStore::new();
        store.insert(token.to_string(), Credential::new("alice", "secret"));
        store
    }

    #[test]
    fn test_admin_token_is_anonymous() {
        let credential = authenticate("admin", &store_with("issued"), Some("Bearer admin")).unwrap();
        assert!(credential.is_anonymous());
    }

    #[test]
    fn test_admin_token_with_empty_store() {
        let credential =
            authenticate("admin", &CredentialStore::new(), Some("Bearer admin")).unwrap();
        assert!(credential.is_anonymous());
    }

    #[test]
    fn test_issued_token_resolves_credential() {
        let credential =
            authenticate("admin", &store_with("issued"), Some("Bearer issued")).unwrap();
        assert_eq!(credential, Credential::new("alice", "secret"));
    }

    #[test]
    fn test_unknown_token_rejected() {
        assert_eq!(
            authenticate("admin", &store_with("issued"), Some("Bearer nope")),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_missing_or_empty_token_rejected() {
        let store = CredentialStore::new();
        assert_eq!(authenticate("admin", &store, None), Err(AuthError::InvalidToken));
        assert_eq!(authenticate("admin", &store, Some("")), Err(AuthError::InvalidToken));
        assert_eq!(
            authenticate("admin", &store, Some("Bearer ")),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_bearer_prefix_is_case_sensitive() {
        // "bearer admin" is not stripped, so the whole value is the token.
        assert_eq!(
            authenticate("admin", &CredentialStore::new(), Some("bearer admin")),
            Err(AuthError::InvalidToken)
        );
    }
}
