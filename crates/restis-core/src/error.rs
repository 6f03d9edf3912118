//! Error types for command translation and authentication.

use thiserror::Error;

/// A request body or path could not be turned into a command.
///
/// The display strings are sent to clients verbatim, so they follow the
/// `ERR ...` convention of the store's own error replies.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Single-command body is not a JSON array.
    #[error("ERR failed to parse command")]
    Command,

    /// Single-command body, or path, names no command.
    #[error("ERR empty command")]
    EmptyCommand,

    /// Pipeline body is not a JSON array of arrays.
    #[error("ERR failed to parse pipeline request")]
    Pipeline,

    /// Pipeline body contains no commands.
    #[error("ERR empty pipeline request")]
    EmptyPipeline,

    /// One item of a pipeline is an empty array.
    #[error("ERR empty pipeline command")]
    EmptyPipelineCommand,
}

/// Bearer token authentication failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Token missing, empty, or not registered.
    #[error("invalid token")]
    InvalidToken,
}

/// The store rejected a command.
///
/// Carries the store's own error text, which is passed to clients unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    /// Wrap a store error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The store's error text.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A REST token could not be minted.
#[derive(Error, Debug)]
pub enum TokenError {
    /// The operating system's random source failed.
    #[error("failed to read random bytes: {0}")]
    Random(#[from] rand::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages() {
        assert_eq!(ParseError::Command.to_string(), "ERR failed to parse command");
        assert_eq!(ParseError::EmptyCommand.to_string(), "ERR empty command");
        assert_eq!(
            ParseError::Pipeline.to_string(),
            "ERR failed to parse pipeline request"
        );
        assert_eq!(
            ParseError::EmptyPipeline.to_string(),
            "ERR empty pipeline request"
        );
        assert_eq!(
            ParseError::EmptyPipelineCommand.to_string(),
            "ERR empty pipeline command"
        );
    }

    #[test]
    fn test_store_error_is_verbatim() {
        let err = StoreError::new("ERR unknown command 'FOO', with args beginning with: ");
        assert_eq!(
            err.to_string(),
            "ERR unknown command 'FOO', with args beginning with: "
        );
        assert_eq!(err.message(), err.to_string());
    }

    #[test]
    fn test_auth_error_display() {
        assert_eq!(AuthError::InvalidToken.to_string(), "invalid token");
    }
}
