//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! The request side needs no envelope: `rc_call*` always yields a string.
//! The extractor side does, because its failures must stay distinguishable
//! from values. `FfiExtractResult` carries either a value or an error code
//! plus message. Conversion helpers live here to keep `lib.rs` focused on
//! the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use restconnector_core::ExtractError;

/// A caller-owned header pair, used by `rc_call`. The library reads but does
/// not free these strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *const c_char,
    pub value: *const c_char,
}

/// Error codes returned in `FfiExtractResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    /// Invalid JSON or invalid path expression.
    Parse = 1,
    /// Key not present in the object.
    Key = 2,
    /// Index not an integer, out of range, or root not indexable.
    Index = 3,
    /// The value could not be handed back as a C string.
    Encode = 4,
    Panic = 5,
    NullArg = 6,
}

impl From<&ExtractError> for FfiErrorCode {
    fn from(err: &ExtractError) -> Self {
        match err {
            ExtractError::Parse(_) | ExtractError::InvalidPath(_) => FfiErrorCode::Parse,
            ExtractError::MissingKey(_) => FfiErrorCode::Key,
            ExtractError::InvalidIndex(_)
            | ExtractError::IndexOutOfRange { .. }
            | ExtractError::NotIndexable { .. } => FfiErrorCode::Index,
            ExtractError::Encode(_) => FfiErrorCode::Encode,
        }
    }
}

/// Result envelope for `rc_extract` and `rc_extract_with_path`.
///
/// On success `error_code` is `Ok`, `error_message` is null and `value`
/// holds the text. On failure `value` is null and `error_message` describes
/// the problem.
#[repr(C)]
pub struct FfiExtractResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub value: *mut c_char,
}

impl FfiExtractResult {
    pub(crate) fn ok(value: String) -> *mut Self {
        match CString::new(value) {
            Ok(value) => Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut(), value.into_raw()),
            Err(_) => Self::error(FfiErrorCode::Encode, "value contains a NUL byte"),
        }
    }

    pub(crate) fn from_error(err: &ExtractError) -> *mut Self {
        Self::error(err.into(), &err.to_string())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, &format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, msg)
    }

    fn error(code: FfiErrorCode, msg: &str) -> *mut Self {
        let message = CString::new(msg.replace('\0', "")).unwrap_or_default();
        Self::boxed(code, message.into_raw(), std::ptr::null_mut())
    }

    fn boxed(error_code: FfiErrorCode, error_message: *mut c_char, value: *mut c_char) -> *mut Self {
        Box::into_raw(Box::new(FfiExtractResult {
            error_code,
            error_message,
            value,
        }))
    }
}
