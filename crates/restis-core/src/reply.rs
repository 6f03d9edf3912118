//! Store replies and the response envelope.
//!
//! [`Reply`] is a closed model of whatever the store returns. It is passed
//! through to the client without reinterpretation; only its JSON rendering
//! is defined here. [`Envelope`] wraps one command outcome as
//! `{"result": ...}` or `{"error": ...}`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Serialize, Serializer};

/// A value returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Nil,
    Int(i64),
    Double(f64),
    Bool(bool),
    /// Simple status text such as `OK`.
    Status(String),
    /// Binary-safe string payload.
    Bulk(Vec<u8>),
    Array(Vec<Reply>),
    Map(Vec<(Reply, Reply)>),
}

impl Reply {
    /// The `OK` status reply.
    pub fn ok() -> Self {
        Self::Status("OK".to_string())
    }

    /// String form used when this reply is a map key.
    fn key_string(&self) -> String {
        match self {
            Self::Nil => String::new(),
            Self::Int(n) => n.to_string(),
            Self::Double(d) => d.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Status(s) => s.clone(),
            Self::Bulk(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Self::Array(_) | Self::Map(_) => serde_json::to_string(self).unwrap_or_default(),
        }
    }
}

impl From<&str> for Reply {
    fn from(value: &str) -> Self {
        Self::Bulk(value.as_bytes().to_vec())
    }
}

impl Serialize for Reply {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Nil => serializer.serialize_unit(),
            Self::Int(n) => serializer.serialize_i64(*n),
            // JSON has no representation for inf/NaN
            Self::Double(d) if d.is_finite() => serializer.serialize_f64(*d),
            Self::Double(d) => serializer.collect_str(d),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Status(s) => serializer.serialize_str(s),
            Self::Bulk(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => serializer.serialize_str(text),
                Err(_) => serializer.serialize_str(&STANDARD.encode(bytes)),
            },
            Self::Array(items) => serializer.collect_seq(items),
            Self::Map(pairs) => {
                serializer.collect_map(pairs.iter().map(|(k, v)| (k.key_string(), v)))
            }
        }
    }
}

/// Outcome of one command, as sent to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    Success { result: Reply },
    Failure { error: String },
}

impl Envelope {
    pub fn success(result: Reply) -> Self {
        Self::Success { result }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
