//! Core types for the restis REST gateway.
//!
//! This crate holds everything that does not depend on the HTTP transport or
//! the store connection:
//! - Canonical [`Command`]s and the `ACL RESTTOKEN` classification
//! - Request parsing for the JSON, pipeline and path/query encodings
//! - [`Reply`] and [`Envelope`], the JSON response model
//! - The [`CredentialStore`] and REST token minting
//! - Shared error types

mod command;
mod credentials;
mod error;
pub mod parse;
mod reply;
pub mod token;

pub use command::{Command, CommandKind, REST_TOKEN_USAGE};
pub use credentials::{Credential, CredentialStore};
pub use error::{AuthError, ParseError, StoreError, TokenError};
pub use parse::{parse_command, parse_path, parse_pipeline};
pub use reply::{Envelope, Reply};
pub use token::generate_token;
