//! Store abstraction and the Redis-backed implementation.
//!
//! The gateway only needs one capability from the store: execute a named
//! command with string arguments and get back a [`Reply`] or the store's
//! error text. [`RedisStore`] provides it over a single multiplexed
//! connection, so all requests share one socket and are serialized onto it.
//! A pooled implementation can replace it behind the same trait.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{RedisError, Value};
use restis_core::{Reply, StoreError};

/// Executes commands in the store's native command set.
#[async_trait]
pub trait Store: Send + Sync {
    /// Run `name` with `args` and return the store's reply.
    async fn execute(&self, name: &str, args: &[String]) -> Result<Reply, StoreError>;
}

/// A Redis (or Redis-compatible) server reached over one shared connection.
#[derive(Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
}

impl RedisStore {
    /// Connect to the store at `url`.
    pub async fn connect(url: &str) -> Result<Self, RedisError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        tracing::info!(url = %url, "connected to store");
        Ok(Self { conn })
    }
}

#[async_trait]
impl Store for RedisStore {
    async fn execute(&self, name: &str, args: &[String]) -> Result<Reply, StoreError> {
        let mut cmd = redis::cmd(name);
        for arg in args {
            cmd.arg(arg);
        }

        let mut conn = self.conn.clone();
        let value: Value = cmd.query_async(&mut conn).await.map_err(store_error)?;
        Ok(reply_from_value(value))
    }
}

/// Rebuild the store's error line, e.g. `ERR unknown command 'FOO'`.
///
/// The client splits server errors into a code and a detail; clients of the
/// gateway expect them joined back together as the server sent them.
fn store_error(err: RedisError) -> StoreError {
    match (err.code(), err.detail()) {
        (Some(code), Some(detail)) => StoreError::new(format!("{code} {detail}")),
        (Some(code), None) => StoreError::new(code),
        _ => StoreError::new(err.to_string()),
    }
}

fn reply_from_value(value: Value) -> Reply {
    match value {
        Value::Nil => Reply::Nil,
        Value::Int(n) => Reply::Int(n),
        Value::Double(d) => Reply::Double(d),
        Value::Boolean(b) => Reply::Bool(b),
        Value::Okay => Reply::ok(),
        Value::SimpleString(s) => Reply::Status(s),
        Value::BulkString(bytes) => Reply::Bulk(bytes),
        Value::VerbatimString { text, .. } => Reply::Bulk(text.into_bytes()),
        Value::Array(items) | Value::Set(items) => {
            Reply::Array(items.into_iter().map(reply_from_value).collect())
        }
        Value::Map(pairs) => Reply::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (reply_from_value(k), reply_from_value(v)))
                .collect(),
        ),
        Value::Attribute { data, .. } => reply_from_value(*data),
        other => Reply::Status(format!("{other:?}")),
    }
}
