// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tokenization and normalization (§4.1).
//!
//! Splits free text into lowercase word tokens. Deterministic and pure —
//! no locale tables beyond Unicode case folding, no stemming. Splits on
//! any non-alphanumeric run (not just whitespace), which is what the
//! graduated classifier needs to find word boundaries downstream (§4.2).

use crate::config::is_stopword;

/// Lowercase only. Non-ASCII letters are retained as-is — "café" stays
/// "café", it does not fold to "cafe" (§4.1 edge case).
fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Split text into lowercase word tokens, dropping stopwords and
/// single-character noise. Order is preserved and duplicates are kept —
/// coverage scoring downstream depends on honest repetition counts
/// (§4.1: "do not deduplicate").
pub fn tokenize(text: &str) -> Vec<String> {
    let folded = fold(text);
    folded
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .filter(|part| part.chars().count() >= 2)
        .filter(|part| !is_stopword(part))
        .map(|part| part.to_string())
        .collect()
}

/// Same as [`tokenize`] but keeps stopwords — needed where the full
/// verbatim token stream matters (e.g. `original_tokens` used for literal
/// substring matching still derives from the raw query, not this; but
/// consecutive-match detection over title/url text needs the full token
/// stream of that text, stopwords included, since we're not tokenizing a
/// query there).
pub fn tokenize_keep_stopwords(text: &str) -> Vec<String> {
    let folded = fold(text);
    folded
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .filter(|part| part.chars().count() >= 2)
        .map(|part| part.to_string())
        .collect()
}

/// Lowercase a whole string without splitting, for building the haystacks
/// the classifier scans.
pub fn normalize(text: &str) -> String {
    fold(text)
}

/// Split a normalized url into `(host, path)`, matching `record.host`
/// against the normalized url string so callers can reason about
/// "the path, not the host" separately (§4.4's url scorer, and the
/// split-field check in `intent::coverage_info`). The host is often a
/// verbatim substring of the title's brand name (e.g. "console" in both
/// "Cloud Console" and "console.cloud.google.com") — counting that as a
/// url-side match would make a title/url split look unsplit, so the
/// split-field check uses the path half, not the full url.
pub fn split_host_and_path(url: &str, host: &str) -> (String, String) {
    let host_norm = normalize(host);
    let url_norm = normalize(url);
    if host_norm.is_empty() {
        return (String::new(), url_norm);
    }
    match url_norm.find(host_norm.as_str()) {
        Some(idx) => {
            let rest = &url_norm[idx + host_norm.len()..];
            (host_norm, rest.to_string())
        }
        None => (host_norm, url_norm),
    }
}
