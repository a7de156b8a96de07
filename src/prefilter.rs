// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Pre-filter gate (§4.3).
//!
//! Cheap containment check that runs before any scorer. Linear scan, no
//! inverted index — corpora up to ~10^5 records don't need a positional
//! index, so a single pass over the haystack string is the whole
//! algorithm.

use crate::types::IndexedRecord;

/// Build the lowercased haystack a record is pre-filtered and meta-scored
/// against: `title + " " + url + " " + meta_description + " " + meta_keywords`.
pub fn haystack(record: &IndexedRecord) -> String {
    let mut buf = String::with_capacity(
        record.title.len() + record.url.len() + 32,
    );
    buf.push_str(&crate::tokenize::normalize(&record.title));
    buf.push(' ');
    buf.push_str(&crate::tokenize::normalize(&record.url));
    if let Some(meta) = &record.meta_description {
        buf.push(' ');
        buf.push_str(&crate::tokenize::normalize(meta));
    }
    if let Some(keywords) = &record.meta_keywords {
        buf.push(' ');
        buf.push_str(&crate::tokenize::normalize(&keywords.join(" ")));
    }
    buf
}

/// True if `record` should be scored at all: its haystack contains at
/// least one original token, or the raw query verbatim. Inclusive by
/// design — must never reject a record that would otherwise pass with
/// `strict_matching` off (§4.3).
pub fn passes_prefilter(haystack: &str, original_tokens: &[String], raw_query: &str) -> bool {
    if !raw_query.trim().is_empty() && haystack.contains(raw_query.trim()) {
        return true;
    }
    original_tokens.iter().any(|t| haystack.contains(t.as_str()))
}
