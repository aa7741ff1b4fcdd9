//! Error types for the connector core.
//!
//! # Design
//! The two halves of the crate follow opposite policies. `RequestError` never
//! leaves the executor: it is rendered into the `{"error": "..."}` result
//! string. `ExtractError` is returned to the caller so that a bad document or
//! a bad key stays visible instead of being folded into a value.

use thiserror::Error;

/// Faults raised while issuing a request or decoding its response.
///
/// Only the `Display` text of these errors reaches the host.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The method is not one of the supported HTTP verbs.
    #[error("unknown method '{0}'")]
    UnknownMethod(String),

    /// The transport failed: bad URL, refused connection, invalid header,
    /// unreadable body.
    #[error("{0}")]
    Transport(#[from] ureq::Error),

    /// A 2xx response whose body is not valid JSON.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors returned by `extract` and `extract_with_path`.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input string is not valid JSON.
    #[error("invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The path expression could not be compiled.
    #[error("invalid path expression: {0}")]
    InvalidPath(#[from] serde_json_path::ParseError),

    #[error("key not found: '{0}'")]
    MissingKey(String),

    /// The attribute used against an array does not parse as an integer.
    #[error("'{0}' is not a valid array index")]
    InvalidIndex(String),

    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    /// The document root is a scalar and cannot be looked into.
    #[error("cannot look up '{attr}' in a JSON {kind}")]
    NotIndexable { attr: String, kind: &'static str },

    /// The result could not be serialized back to text.
    #[error("failed to encode result: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ExtractError {
    /// True for malformed input: bad JSON or a bad path expression.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, ExtractError::Parse(_) | ExtractError::InvalidPath(_))
    }

    /// True when the input parsed but the requested key or index is absent.
    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            ExtractError::MissingKey(_)
                | ExtractError::InvalidIndex(_)
                | ExtractError::IndexOutOfRange { .. }
                | ExtractError::NotIndexable { .. }
        )
    }
}
