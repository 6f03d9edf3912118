//! Request parsing into canonical commands.
//!
//! Three encodings are accepted:
//!
//! - **Single command**: a JSON array body, `["SET", "k", "v"]`.
//! - **Pipeline**: a JSON array of arrays, `[["SET", "k", "v"], ["GET", "k"]]`.
//! - **Path and query**: `/SET/k/v`, with an optional body appended as one
//!   more argument and query pairs appended as key then value.
//!
//! Arguments are always strings. JSON scalars are converted with
//! [`coerce_arg`]; no other type inference happens.

use percent_encoding::percent_decode_str;
use serde_json::Value;

use crate::command::Command;
use crate::error::ParseError;

/// Query key reserved for transport-level auth. Never forwarded.
pub const RESERVED_QUERY_KEY: &str = "_token";

/// Parse a single-command body: a JSON array of name then arguments.
pub fn parse_command(body: &[u8]) -> Result<Command, ParseError> {
    let items: Vec<Value> = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "command body is not a JSON array");
        ParseError::Command
    })?;

    command_from_values(items).ok_or(ParseError::EmptyCommand)
}

/// Parse a pipeline body: a JSON array of command arrays.
///
/// A malformed or empty outer array fails the whole request. An empty inner
/// array fails only its own slot, so the caller can still run the others
/// and report each result in order.
pub fn parse_pipeline(body: &[u8]) -> Result<Vec<Result<Command, ParseError>>, ParseError> {
    let batches: Vec<Vec<Value>> = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "pipeline body is not a JSON array of arrays");
        ParseError::Pipeline
    })?;

    if batches.is_empty() {
        return Err(ParseError::EmptyPipeline);
    }

    Ok(batches
        .into_iter()
        .map(|items| command_from_values(items).ok_or(ParseError::EmptyPipelineCommand))
        .collect())
}

/// Build a command from a request path, query string and raw body.
///
/// Argument order is path segments, then the body (if non-empty), then
/// query pairs in the order they appear. Empty path segments are skipped.
pub fn parse_path(path: &str, query: Option<&str>, body: &[u8]) -> Result<Command, ParseError> {
    let mut segments = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(decode_component);

    let name = segments.next().ok_or(ParseError::EmptyCommand)?;
    let mut args: Vec<String> = segments.collect();

    if !body.is_empty() {
        args.push(String::from_utf8_lossy(body).into_owned());
    }

    if let Some(query) = query {
        args.extend(query_args(query));
    }

    Ok(Command::new(name, args))
}

/// Convert a JSON value into a command argument.
///
/// Strings pass through, booleans become `1`/`0`, `null` becomes the empty
/// string, and nested arrays or objects are sent as compact JSON. Numbers
/// are written in their shortest form; whole numbers never carry a
/// fractional part, so `1.0` and `1e3` are sent as `1` and `1000`.
pub fn coerce_arg(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => format_number(&n),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => "0".to_string(),
        Value::Null => String::new(),
        nested @ (Value::Array(_) | Value::Object(_)) => nested.to_string(),
    }
}

fn format_number(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }

    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            (f as i64).to_string()
        }
        // f64's Display is the shortest form that round-trips
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

fn command_from_values(items: Vec<Value>) -> Option<Command> {
    let mut items = items.into_iter();
    let name = coerce_arg(items.next()?);
    Some(Command::new(name, items.map(coerce_arg).collect()))
}

fn query_args(query: &str) -> Vec<String> {
    let mut args = Vec::new();

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = match pair.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (pair, None),
        };

        if key == RESERVED_QUERY_KEY {
            continue;
        }

        args.push(decode_component(key));
        if let Some(value) = value {
            args.push(decode_component(value));
        }
    }

    args
}

fn decode_component(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // =========================================================================
    // Single command
    // =========================================================================

    #[test]
    fn test_parse_command_preserves_order() {
        let command = parse_command(br#"["SET", "k", "v", "EX", 100]"#).unwrap();
        assert_eq!(command.name, "SET");
        assert_eq!(command.args, args(&["k", "v", "EX", "100"]));
    }

    #[test]
    fn test_parse_command_name_only() {
        let command = parse_command(br#"["PING"]"#).unwrap();
        assert_eq!(command.name, "PING");
        assert!(command.args.is_empty());
    }

    #[test]
    fn test_parse_command_rejects_object() {
        assert_eq!(parse_command(b"{}"), Err(ParseError::Command));
    }

    #[test]
    fn test_parse_command_rejects_garbage() {
        assert_eq!(parse_command(b"not json"), Err(ParseError::Command));
        assert_eq!(parse_command(b""), Err(ParseError::Command));
    }

    #[test]
    fn test_parse_command_rejects_empty_array() {
        assert_eq!(parse_command(b"[]"), Err(ParseError::EmptyCommand));
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    #[test]
    fn test_parse_pipeline_isolates_empty_items() {
        let items = parse_pipeline(br#"[["SET","k","v"], [], ["GET","k"]]"#).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], Ok(Command::new("SET", args(&["k", "v"]))));
        assert_eq!(items[1], Err(ParseError::EmptyPipelineCommand));
        assert_eq!(items[2], Ok(Command::new("GET", args(&["k"]))));
    }

    #[test]
    fn test_parse_pipeline_rejects_empty_batch() {
        assert_eq!(parse_pipeline(b"[]"), Err(ParseError::EmptyPipeline));
    }

    #[test]
    fn test_parse_pipeline_rejects_flat_array() {
        assert_eq!(parse_pipeline(br#"["GET","k"]"#), Err(ParseError::Pipeline));
        assert_eq!(parse_pipeline(b"{}"), Err(ParseError::Pipeline));
    }

    // =========================================================================
    // Path and query
    // =========================================================================

    #[test]
    fn test_parse_path_segments_body_then_query() {
        let command = parse_path("/SET/foo", Some("bar=1&_token=X"), b"baz").unwrap();
        assert_eq!(command.name, "SET");
        assert_eq!(command.args, args(&["foo", "baz", "bar", "1"]));
    }

    #[test]
    fn test_parse_path_without_body_or_query() {
        let command = parse_path("/GET/k", None, b"").unwrap();
        assert_eq!(command, Command::new("GET", args(&["k"])));
    }

    #[test]
    fn test_parse_path_skips_empty_segments() {
        let command = parse_path("//GET//k/", None, b"").unwrap();
        assert_eq!(command, Command::new("GET", args(&["k"])));
    }

    #[test]
    fn test_parse_path_percent_decodes() {
        let command = parse_path("/SET/a%20key/caf%C3%A9", Some("note=x%26y"), b"").unwrap();
        assert_eq!(command.args, args(&["a key", "café", "note", "x&y"]));
    }

    #[test]
    fn test_parse_path_query_key_without_value() {
        let command = parse_path("/SET/k/v", Some("NX&EX=10"), b"").unwrap();
        assert_eq!(command.args, args(&["k", "v", "NX", "EX", "10"]));
    }

    #[test]
    fn test_parse_path_only_token_query() {
        let command = parse_path("/GET/k", Some("_token=secret"), b"").unwrap();
        assert_eq!(command.args, args(&["k"]));
    }

    #[test]
    fn test_parse_path_requires_a_name() {
        assert_eq!(parse_path("//", None, b""), Err(ParseError::EmptyCommand));
    }

    // =========================================================================
    // Coercion
    // =========================================================================

    #[test]
    fn test_coerce_arg_scalars() {
        assert_eq!(coerce_arg(serde_json::json!("text")), "text");
        assert_eq!(coerce_arg(serde_json::json!(42)), "42");
        assert_eq!(coerce_arg(serde_json::json!(-1.5)), "-1.5");
        assert_eq!(coerce_arg(serde_json::json!(u64::MAX)), "18446744073709551615");
        assert_eq!(coerce_arg(serde_json::json!(true)), "1");
        assert_eq!(coerce_arg(serde_json::json!(false)), "0");
        assert_eq!(coerce_arg(serde_json::json!(null)), "");
    }

    #[test]
    fn test_coerce_arg_whole_floats_are_integers() {
        let command = parse_command(br#"["INCRBYFLOAT", "k", 1.0, 1e3, -2.0, 0.25]"#).unwrap();
        assert_eq!(command.args, args(&["k", "1", "1000", "-2", "0.25"]));
    }

    #[test]
    fn test_coerce_arg_integer_only_command() {
        let command = parse_command(br#"["EXPIRE", "k", 1e2]"#).unwrap();
        assert_eq!(command.args, args(&["k", "100"]));
    }

    #[test]
    fn test_coerce_arg_huge_float_has_no_fraction() {
        assert_eq!(coerce_arg(serde_json::json!(1e21)), "1000000000000000000000");
    }

    #[test]
    fn test_coerce_arg_nested_is_compact_json() {
        assert_eq!(coerce_arg(serde_json::json!({"a": [1, 2]})), r#"{"a":[1,2]}"#);
    }
}
