//! Restis Serve - a REST gateway for Redis-compatible stores
//!
//! This crate exposes a store's command interface over HTTP, following the
//! request and response shapes of hosted "Redis over REST" services. It lets
//! applications written against such a service run against a local store.
//!
//! # Authentication
//!
//! Every request needs a Bearer token: either the administrator token from
//! the configuration, or a token minted by `ACL RESTTOKEN username password`
//! after the store accepts that username and password.
//!
//! # Architecture
//!
//! - **AppState**: Shared application state (configuration, credentials, dispatcher)
//! - **Auth**: Bearer token middleware for request authentication
//! - **Dispatch**: Command execution and REST token issuance
//! - **Store**: The store capability and its Redis implementation
//! - **Routes**: Single, pipeline and path/query command endpoints

mod auth;
mod dispatch;
mod error;
pub mod response;
mod routes;
mod state;
mod store;

pub use self::auth::{authenticate, require_auth};
pub use self::dispatch::Dispatcher;
pub use self::error::ApiError;
pub use self::routes::{app, router};
pub use self::state::{AppState, Config};
pub use self::store::{RedisStore, Store};
