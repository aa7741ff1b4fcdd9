//! HTTP request and outcome types.
//!
//! # Design
//! A `RequestSpec` carries exactly what the host handed over: the endpoint,
//! the method as typed, the merged headers and the raw body. The method is
//! resolved into an `HttpMethod` only when the request is executed, so an
//! unsupported verb surfaces as a normal outcome rather than a construction
//! error.
//!
//! `ResponseOutcome` is the single place where a result turns into the
//! string the host receives. Every path through the executor ends in one of
//! its three variants.

use std::fmt;

use serde_json::Value;

use crate::encoding;
use crate::headers::HeaderSet;

/// The verbs the executor knows how to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
}

impl HttpMethod {
    /// Look up a verb by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            "head" => Some(HttpMethod::Head),
            "options" => Some(HttpMethod::Options),
            "patch" => Some(HttpMethod::Patch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound request, as described by the host.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub endpoint: String,
    pub method: String,
    pub headers: HeaderSet,
    pub body: Option<String>,
}

impl RequestSpec {
    pub fn new(endpoint: &str, method: &str, headers: HeaderSet, body: Option<&str>) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            method: method.to_string(),
            headers,
            body: body.map(str::to_string),
        }
    }
}

/// The result of executing a `RequestSpec`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseOutcome {
    /// 2xx response with a JSON body.
    Success(Value),
    /// The server answered with a non-2xx status.
    HttpError { status: u16, reason: String },
    /// Anything else: unknown method, network fault, undecodable body.
    TransportError(String),
}

impl ResponseOutcome {
    /// Render the outcome as the string handed back to the host.
    ///
    /// The two error shapes are assembled by hand so their field order and
    /// spacing stay fixed: `{"error": 404, "info": "Not Found"}` and
    /// `{"error": "<message>"}`. Text is escaped as a JSON string.
    pub fn render(&self) -> String {
        match self {
            ResponseOutcome::Success(payload) => match encoding::to_legacy_string(payload) {
                Ok(text) => text,
                Err(e) => render_fault(&e.to_string()),
            },
            ResponseOutcome::HttpError { status, reason } => {
                format!(r#"{{"error": {status}, "info": {}}}"#, quote(reason))
            }
            ResponseOutcome::TransportError(message) => render_fault(message),
        }
    }
}

/// Render a fault message as `{"error": "<message>"}`.
pub fn render_fault(message: &str) -> String {
    format!(r#"{{"error": {}}}"#, quote(message))
}

fn quote(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_lookup_ignores_case() {
        assert_eq!(HttpMethod::from_name("GET"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::from_name("pAtCh"), Some(HttpMethod::Patch));
        assert_eq!(HttpMethod::from_name("options"), Some(HttpMethod::Options));
    }

    #[test]
    fn method_displays_upper_case() {
        assert_eq!(HttpMethod::from_name("delete").unwrap().to_string(), "DELETE");
        assert_eq!(HttpMethod::Options.as_str(), "OPTIONS");
    }

    #[test]
    fn method_lookup_rejects_unknown_verbs() {
        assert_eq!(HttpMethod::from_name("fetch"), None);
        assert_eq!(HttpMethod::from_name(""), None);
        assert_eq!(HttpMethod::from_name("request"), None);
    }

    #[test]
    fn spec_keeps_method_as_given() {
        let spec = RequestSpec::new("http://localhost", "get", HeaderSet::new(), Some("x"));
        assert_eq!(spec.method, "get");
        assert_eq!(spec.body.as_deref(), Some("x"));
        assert!(spec.headers.is_empty());
    }

    #[test]
    fn http_error_renders_fixed_shape() {
        let outcome = ResponseOutcome::HttpError {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(outcome.render(), r#"{"error": 404, "info": "Not Found"}"#);
    }

    #[test]
    fn transport_error_renders_fixed_shape() {
        let outcome = ResponseOutcome::TransportError("unknown method 'fetch'".to_string());
        assert_eq!(outcome.render(), r#"{"error": "unknown method 'fetch'"}"#);
    }

    #[test]
    fn error_text_is_escaped() {
        let outcome = ResponseOutcome::TransportError(r#"bad "quote" \ here"#.to_string());
        let rendered = outcome.render();
        assert_eq!(rendered, r#"{"error": "bad \"quote\" \\ here"}"#);
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["error"], r#"bad "quote" \ here"#);
    }

    #[test]
    fn success_renders_with_legacy_spacing() {
        let outcome = ResponseOutcome::Success(json!({"id": 101, "tags": ["a", "b"]}));
        assert_eq!(outcome.render(), r#"{"id": 101, "tags": ["a", "b"]}"#);
    }
}
