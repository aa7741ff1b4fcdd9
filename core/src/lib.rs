//! Core of the REST connector for scalar-only workflow hosts.
//!
//! # Overview
//! Two independent, stateless halves:
//! - the executor (`call`, `call2`) issues one HTTP request and always
//!   returns a string: the re-encoded JSON payload, or
//!   `{"error": <status>, "info": "<reason>"}`, or `{"error": "<message>"}`;
//! - the extractor (`extract`, `extract_with_path`) reads values out of a
//!   JSON-encoded string and returns its errors to the caller.
//!
//! # Design
//! - The host can only pass strings, so headers come in as positional
//!   `"key: value"` slots and are folded into a `HeaderSet`.
//! - Verbs are dispatched through a fixed `HttpMethod` table.
//! - All executor faults collapse into `ResponseOutcome`, which is rendered
//!   in exactly one place.
//! - JSON handed back to the host uses the spacing of `encoding::LegacyFormatter`.

pub mod encoding;
pub mod error;
pub mod executor;
pub mod extract;
pub mod headers;
pub mod http;

pub use error::{ExtractError, RequestError};
pub use executor::{call, call2, RequestExecutor, DEFAULT_METHOD};
pub use extract::{extract, extract_with_path};
pub use headers::{build_headers, split_header_entry, HeaderSet, HEADER_SLOTS};
pub use http::{render_fault, HttpMethod, RequestSpec, ResponseOutcome};
