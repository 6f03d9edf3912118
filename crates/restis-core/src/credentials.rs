//! In-memory mapping from issued REST tokens to store credentials.

use std::collections::HashMap;
use std::fmt;

use parking_lot::Mutex;

/// Store-level username and password bound to an issued token.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The credential granted to the administrator token.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_anonymous(&self) -> bool {
        self.username.is_empty() && self.password.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Tokens issued by `ACL RESTTOKEN`, keyed by token.
///
/// Entries live for the lifetime of the store; there is no expiry or
/// revocation. Every read and write takes the same lock. Writes only happen
/// on token issuance, so contention is negligible.
#[derive(Debug, Default)]
pub struct CredentialStore {
    tokens: Mutex<HashMap<String, Credential>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `token` to `credential`, replacing any previous binding.
    pub fn insert(&self, token: String, credential: Credential) {
        self.tokens.lock().insert(token, credential);
    }

    /// Look up the credential bound to `token`.
    pub fn get(&self, token: &str) -> Option<Credential> {
        self.tokens.lock().get(token).cloned()
    }

    pub fn len(&self) -> usize {
        self.tokens.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.lock().is_empty()
    }
}
