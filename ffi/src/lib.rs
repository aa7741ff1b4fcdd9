//! C-ABI wrapper around `restconnector-core`.
//!
//! # Overview
//! Exposes the connector to hosts that can only pass and receive scalars:
//! `rc_call2` takes the endpoint, method, five header slots and body as C
//! strings; `rc_extract` and `rc_extract_with_path` take the document and a
//! key or path.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Null inputs mean "absent": a null header slot is skipped, a null method
//!   falls back to `POST`, a null body sends no payload.
//! - `rc_call*` never returns null; a panic is reported as
//!   `{"error": "<message>"}` like any other fault.
//! - The C caller owns all returned pointers and must release them with
//!   `rc_free_string` or `rc_free_result`.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use restconnector_core::{render_fault, HeaderSet};

use types::*;

/// Read an optional C string. Null is `None`; invalid UTF-8 reads as empty.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives the
/// returned slice.
unsafe fn opt_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(ptr) }.to_str().unwrap_or(""))
    }
}

/// Hand a result string to C.
fn into_c_string(text: String) -> *mut c_char {
    CString::new(text)
        .or_else(|_| CString::new(render_fault("result contains a NUL byte")))
        .unwrap_or_default()
        .into_raw()
}

// ---------------------------------------------------------------------------
// Request execution
// ---------------------------------------------------------------------------

/// Issue one HTTP request from scalar inputs.
///
/// `header1`..`header5` are optional `"key: value"` strings merged in order,
/// later slots winning on a repeated key. An empty or null `method` means
/// `POST`. Returns the response JSON re-encoded, or
/// `{"error": <status>, "info": "<reason>"}`, or `{"error": "<message>"}`.
/// The caller must free the returned string with `rc_free_string`.
#[allow(clippy::too_many_arguments)]
#[unsafe(no_mangle)]
pub extern "C" fn rc_call2(
    endpoint: *const c_char,
    method: *const c_char,
    header1: *const c_char,
    header2: *const c_char,
    header3: *const c_char,
    header4: *const c_char,
    header5: *const c_char,
    body: *const c_char,
) -> *mut c_char {
    catch_unwind(|| {
        let endpoint = unsafe { opt_str(endpoint) }.unwrap_or("");
        let method = unsafe { opt_str(method) }.unwrap_or("");
        let headers = unsafe {
            [
                opt_str(header1),
                opt_str(header2),
                opt_str(header3),
                opt_str(header4),
                opt_str(header5),
            ]
        };
        let body = unsafe { opt_str(body) };
        into_c_string(restconnector_core::call2(endpoint, method, headers, body))
    })
    .unwrap_or_else(|_| into_c_string(render_fault("panic in rc_call2")))
}

/// Issue one HTTP request with an explicit header array.
///
/// `headers` points to `headers_len` pairs (may be null when `headers_len`
/// is 0); pairs with a null key or value are skipped. The method is used as
/// given: an empty method is reported as unknown.
/// The caller must free the returned string with `rc_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn rc_call(
    endpoint: *const c_char,
    method: *const c_char,
    headers: *const FfiHeader,
    headers_len: u32,
    body: *const c_char,
) -> *mut c_char {
    catch_unwind(|| {
        let endpoint = unsafe { opt_str(endpoint) }.unwrap_or("");
        let method = unsafe { opt_str(method) }.unwrap_or("");
        let mut header_set = HeaderSet::new();
        if !headers.is_null() && headers_len > 0 {
            let pairs = unsafe { std::slice::from_raw_parts(headers, headers_len as usize) };
            for pair in pairs {
                if let (Some(key), Some(value)) =
                    unsafe { (opt_str(pair.key), opt_str(pair.value)) }
                {
                    header_set.insert(key.to_string(), value.to_string());
                }
            }
        }
        let body = unsafe { opt_str(body) };
        into_c_string(restconnector_core::call(endpoint, method, &header_set, body))
    })
    .unwrap_or_else(|_| into_c_string(render_fault("panic in rc_call")))
}

// ---------------------------------------------------------------------------
// JSON extraction
// ---------------------------------------------------------------------------

/// Extract one value from a JSON document by key or array index.
///
/// Returns a result with `error_code = Ok` and `value` set on success.
/// The caller must free the returned pointer with `rc_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn rc_extract(string: *const c_char, attr: *const c_char) -> *mut FfiExtractResult {
    catch_unwind(|| {
        let Some(string) = (unsafe { opt_str(string) }) else {
            return FfiExtractResult::null_arg("string");
        };
        let Some(attr) = (unsafe { opt_str(attr) }) else {
            return FfiExtractResult::null_arg("attr");
        };
        match restconnector_core::extract(string, attr) {
            Ok(value) => FfiExtractResult::ok(value),
            Err(e) => FfiExtractResult::from_error(&e),
        }
    })
    .unwrap_or_else(|_| FfiExtractResult::panic("panic in rc_extract"))
}

/// Evaluate a JSONPath query and return all matches as a JSON array.
///
/// Returns a result with `error_code = Ok` and `value` set on success.
/// The caller must free the returned pointer with `rc_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn rc_extract_with_path(
    string: *const c_char,
    path: *const c_char,
) -> *mut FfiExtractResult {
    catch_unwind(|| {
        let Some(string) = (unsafe { opt_str(string) }) else {
            return FfiExtractResult::null_arg("string");
        };
        let Some(path) = (unsafe { opt_str(path) }) else {
            return FfiExtractResult::null_arg("path");
        };
        match restconnector_core::extract_with_path(string, path) {
            Ok(value) => FfiExtractResult::ok(value),
            Err(e) => FfiExtractResult::from_error(&e),
        }
    })
    .unwrap_or_else(|_| FfiExtractResult::panic("panic in rc_extract_with_path"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a string returned by `rc_call` or `rc_call2`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn rc_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

/// Free an `FfiExtractResult` and the strings it owns. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn rc_free_result(result: *mut FfiExtractResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.value.is_null() {
            drop(unsafe { CString::from_raw(result.value) });
        }
    });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
