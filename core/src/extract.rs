//! Pull values out of JSON-encoded strings.
//!
//! # Design
//! Both functions parse the document afresh on every call and never touch
//! shared state. Unlike the executor they return their errors: a document
//! that does not parse, a path that does not compile or a key that is not
//! there are caller mistakes and are reported as such.

use serde_json::Value;
use serde_json_path::JsonPath;

use crate::encoding;
use crate::error::ExtractError;

/// Look up `attr` in the root of `string` and return the value as text.
///
/// An object root is indexed by key. Any other root is treated as an array
/// and `attr` must be an integer; negative indices count from the end.
/// Strings come back unquoted, other scalars as their JSON text, and
/// objects or arrays as legacy-formatted JSON.
pub fn extract(string: &str, attr: &str) -> Result<String, ExtractError> {
    let document = parse_document(string)?;
    let value = lookup(&document, attr)?;
    scalar_text(value)
}

/// Evaluate the JSONPath `path` against `string` and return every match,
/// in evaluation order, as a JSON array literal.
///
/// No match yields `"[]"`.
pub fn extract_with_path(string: &str, path: &str) -> Result<String, ExtractError> {
    let document = parse_document(string)?;
    let query = JsonPath::parse(path)?;
    let matches: Vec<&Value> = query.query(&document).all();
    encoding::to_legacy_string(&matches).map_err(ExtractError::Encode)
}

fn parse_document(string: &str) -> Result<Value, ExtractError> {
    serde_json::from_str(string).map_err(ExtractError::Parse)
}

fn lookup<'a>(document: &'a Value, attr: &str) -> Result<&'a Value, ExtractError> {
    match document {
        Value::Object(map) => map
            .get(attr)
            .ok_or_else(|| ExtractError::MissingKey(attr.to_string())),
        Value::Array(items) => {
            let index: i64 = attr
                .trim()
                .parse()
                .map_err(|_| ExtractError::InvalidIndex(attr.to_string()))?;
            let len = items.len();
            let position = if index < 0 {
                len.checked_sub(index.unsigned_abs() as usize)
            } else {
                Some(index as usize)
            };
            position
                .and_then(|i| items.get(i))
                .ok_or(ExtractError::IndexOutOfRange { index, len })
        }
        other => Err(ExtractError::NotIndexable {
            attr: attr.to_string(),
            kind: kind_name(other),
        }),
    }
}

fn scalar_text(value: &Value) -> Result<String, ExtractError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Array(_) | Value::Object(_) => {
            encoding::to_legacy_string(value).map_err(ExtractError::Encode)
        }
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
