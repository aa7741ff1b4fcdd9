//! Folding positional `"key: value"` strings into a header map.
//!
//! The host can only pass scalars, so headers arrive as up to
//! `HEADER_SLOTS` separate strings. Blank or colon-less entries are dropped
//! without error; a later slot overwrites an earlier one with the same key.

use std::collections::BTreeMap;

/// Number of positional header slots exposed to the host.
pub const HEADER_SLOTS: usize = 5;

/// Header key to value. Keys are kept exactly as given.
pub type HeaderSet = BTreeMap<String, String>;

/// Split one `"key: value"` entry at its first colon.
///
/// Returns `None` for an absent, blank or colon-less entry.
pub fn split_header_entry(raw: Option<&str>) -> Option<(String, String)> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (key, value) = trimmed.split_once(':')?;
    Some((key.trim().to_string(), value.trim().to_string()))
}

/// Merge entries in order. Later entries win on key collision.
pub fn build_headers<'a, I>(entries: I) -> HeaderSet
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut headers = HeaderSet::new();
    for (key, value) in entries.into_iter().filter_map(split_header_entry) {
        headers.insert(key, value);
    }
    headers
}
