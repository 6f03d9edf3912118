//! Command dispatch and REST token issuance.

use std::sync::Arc;

use axum::http::StatusCode;
use restis_core::{
    Command, CommandKind, Credential, CredentialStore, Envelope, ParseError, REST_TOKEN_USAGE,
    Reply, generate_token,
};

use crate::store::Store;

/// Runs canonical commands against the store.
///
/// `ACL RESTTOKEN` is intercepted before dispatch and handled here; every
/// other command is forwarded unchanged.
pub struct Dispatcher {
    store: Arc<dyn Store>,
    credentials: Arc<CredentialStore>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn Store>, credentials: Arc<CredentialStore>) -> Self {
        Self { store, credentials }
    }

    /// Execute one command and pair its envelope with an HTTP status.
    pub async fn execute(&self, command: &Command) -> (Envelope, StatusCode) {
        match command.kind() {
            CommandKind::RestToken { username, password } => {
                self.issue_token(username, password).await
            }
            CommandKind::RestTokenUsage => {
                (Envelope::failure(REST_TOKEN_USAGE), StatusCode::BAD_REQUEST)
            }
            CommandKind::Forward => self.forward(&command.name, &command.args).await,
        }
    }

    /// Execute pipeline items one after another, in order.
    ///
    /// Items that failed to parse keep their error in place. A failing item
    /// does not stop the ones after it.
    pub async fn execute_pipeline(&self, items: Vec<Result<Command, ParseError>>) -> Vec<Envelope> {
        let mut envelopes = Vec::with_capacity(items.len());
        for item in items {
            let envelope = match item {
                Ok(command) => self.execute(&command).await.0,
                Err(err) => Envelope::failure(err.to_string()),
            };
            envelopes.push(envelope);
        }
        envelopes
    }

    async fn forward(&self, name: &str, args: &[String]) -> (Envelope, StatusCode) {
        match self.store.execute(name, args).await {
            Ok(reply) => (Envelope::success(reply), StatusCode::OK),
            Err(err) => {
                tracing::debug!(command = %name, error = %err, "store rejected command");
                (Envelope::failure(err.message()), StatusCode::BAD_REQUEST)
            }
        }
    }

    /// Verify the credential with the store, then mint and register a token.
    async fn issue_token(&self, username: &str, password: &str) -> (Envelope, StatusCode) {
        let auth_args = [username.to_string(), password.to_string()];
        let (envelope, status) = self.forward("AUTH", &auth_args).await;
        if status != StatusCode::OK {
            return (envelope, status);
        }

        let token = match generate_token() {
            Ok(token) => token,
            Err(err) => {
                tracing::error!(error = %err, "failed to generate rest token");
                return (
                    Envelope::failure(err.to_string()),
                    StatusCode::INTERNAL_SERVER_ERROR,
                );
            }
        };

        self.credentials
            .insert(token.clone(), Credential::new(username, password));
        tracing::info!(username = %username, "issued rest token");

        (Envelope::success(Reply::Status(token)), StatusCode::OK)
    }
}
