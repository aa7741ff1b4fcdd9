//! Issue one HTTP request and fold every outcome into a string.
//!
//! # Design
//! `RequestExecutor::execute` returns a `ResponseOutcome` and cannot fail:
//! all faults are collected by the inner `try_execute`, which uses `?`
//! freely, and converted to `TransportError` at a single point. `call` and
//! `call2` add the final `render` step for callers that want the host
//! string.
//!
//! The transport agent treats non-2xx statuses as data so that the status
//! and reason reach `ResponseOutcome::HttpError` instead of surfacing as a
//! transport fault. No timeout or retry is configured here.

use tracing::{debug, warn};
use ureq::http::Response;
use ureq::typestate::{WithBody, WithoutBody};
use ureq::{Agent, Body, RequestBuilder};

use crate::error::RequestError;
use crate::headers::{build_headers, HeaderSet, HEADER_SLOTS};
use crate::http::{HttpMethod, RequestSpec, ResponseOutcome};

/// Method used when the host passes an empty method string.
pub const DEFAULT_METHOD: &str = "POST";

/// Blocking, single-attempt request executor.
#[derive(Clone)]
pub struct RequestExecutor {
    agent: Agent,
}

impl Default for RequestExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestExecutor {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Execute `spec` and classify the result.
    pub fn execute(&self, spec: &RequestSpec) -> ResponseOutcome {
        debug!(
            endpoint = %spec.endpoint,
            method = %spec.method,
            headers = spec.headers.len(),
            "issuing request"
        );
        match self.try_execute(spec) {
            Ok(outcome) => {
                if let ResponseOutcome::HttpError { status, .. } = &outcome {
                    debug!(endpoint = %spec.endpoint, status, "non-success status");
                }
                outcome
            }
            Err(e) => {
                warn!(endpoint = %spec.endpoint, error = %e, "request failed");
                ResponseOutcome::TransportError(e.to_string())
            }
        }
    }

    fn try_execute(&self, spec: &RequestSpec) -> Result<ResponseOutcome, RequestError> {
        let method = HttpMethod::from_name(&spec.method)
            .ok_or_else(|| RequestError::UnknownMethod(spec.method.to_lowercase()))?;

        debug!(endpoint = %spec.endpoint, %method, "dispatching");
        let mut response = self.send(method, spec)?;
        let status = response.status();
        if !status.is_success() {
            return Ok(ResponseOutcome::HttpError {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        // No size cap on the payload; invalid UTF-8 fails the JSON decode.
        let bytes = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()?;
        let payload = serde_json::from_slice(&bytes)?;
        Ok(ResponseOutcome::Success(payload))
    }

    /// Dispatch on the verb. Body-less verbs only carry a payload when one
    /// was actually supplied.
    fn send(&self, method: HttpMethod, spec: &RequestSpec) -> Result<Response<Body>, ureq::Error> {
        let url = spec.endpoint.as_str();
        let headers = &spec.headers;
        let body = spec.body.as_deref();
        match method {
            HttpMethod::Get => send_without_body(with_headers(self.agent.get(url), headers), body),
            HttpMethod::Delete => {
                send_without_body(with_headers(self.agent.delete(url), headers), body)
            }
            HttpMethod::Head => send_without_body(with_headers(self.agent.head(url), headers), body),
            HttpMethod::Options => {
                send_without_body(with_headers(self.agent.options(url), headers), body)
            }
            HttpMethod::Post => send_with_body(with_headers(self.agent.post(url), headers), body),
            HttpMethod::Put => send_with_body(with_headers(self.agent.put(url), headers), body),
            HttpMethod::Patch => send_with_body(with_headers(self.agent.patch(url), headers), body),
        }
    }
}

fn with_headers<B>(mut request: RequestBuilder<B>, headers: &HeaderSet) -> RequestBuilder<B> {
    for (key, value) in headers {
        request = request.header(key.as_str(), value.as_str());
    }
    request
}

fn send_without_body(
    request: RequestBuilder<WithoutBody>,
    body: Option<&str>,
) -> Result<Response<Body>, ureq::Error> {
    match body {
        Some(payload) if !payload.is_empty() => {
            request.force_send_body().send(payload.as_bytes())
        }
        _ => request.call(),
    }
}

fn send_with_body(
    request: RequestBuilder<WithBody>,
    body: Option<&str>,
) -> Result<Response<Body>, ureq::Error> {
    match body {
        Some(payload) => request.send(payload.as_bytes()),
        None => request.send_empty(),
    }
}

/// Issue a request with an already merged header map.
///
/// Always returns a string: the re-encoded JSON payload on success, or one
/// of the two error shapes.
pub fn call(endpoint: &str, method: &str, headers: &HeaderSet, body: Option<&str>) -> String {
    let spec = RequestSpec::new(endpoint, method, headers.clone(), body);
    RequestExecutor::new().execute(&spec).render()
}

/// Host-facing entry point: headers arrive as positional `"key: value"`
/// slots and an empty method means `POST`.
pub fn call2(
    endpoint: &str,
    method: &str,
    headers: [Option<&str>; HEADER_SLOTS],
    body: Option<&str>,
) -> String {
    let headers = build_headers(headers);
    let method = if method.is_empty() {
        DEFAULT_METHOD
    } else {
        method
    };
    call(endpoint, method, &headers, body)
}
