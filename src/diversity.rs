// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Diversity filter (§4.7): collapse records by normalized URL, keeping
//! the highest-scoring survivor per key.
//!
//! Group by a derived key, keep one representative per group — a single
//! linear pass with a map rather than a second sort.

use std::collections::HashMap;

use crate::types::ScoredRecord;

/// `protocol://host + path`, lowercased, trailing slash stripped unless
/// it's the entire path, query and fragment dropped. Falls back to a
/// cruder split on the first `?`/`#` if the URL doesn't parse as
/// `scheme://authority/path`.
pub fn normalize_url(url: &str) -> String {
    let lowered = url.to_lowercase();
    if let Some(scheme_end) = lowered.find("://") {
        let (scheme, rest) = lowered.split_at(scheme_end);
        let rest = &rest[3..];
        let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let authority = &rest[..authority_end];
        let after_authority = &rest[authority_end..];
        let path_end = after_authority.find(['?', '#']).unwrap_or(after_authority.len());
        let mut path = after_authority[..path_end].to_string();
        if path.len() > 1 && path.ends_with('/') {
            path.pop();
        }
        return format!("{scheme}://{authority}{path}");
    }
    fallback_normalize(&lowered)
}

fn fallback_normalize(lowered: &str) -> String {
    let cut = lowered.find(['?', '#']).unwrap_or(lowered.len());
    let mut truncated = lowered[..cut].to_string();
    if truncated.len() > 1 && truncated.ends_with('/') {
        truncated.pop();
    }
    truncated
}

/// Keep, per normalized-URL key, the record with the highest
/// `final_score` (ties broken by higher `last_visit`). Order of the
/// surviving records is otherwise unspecified — the caller sorts
/// afterward (§4.9 step 5 runs before step 6).
pub fn apply_diversity_filter<'a>(records: Vec<ScoredRecord<'a>>) -> Vec<ScoredRecord<'a>> {
    let mut best: HashMap<String, ScoredRecord<'a>> = HashMap::new();
    for record in records {
        let key = normalize_url(&record.record.url);
        match best.get(&key) {
            None => {
                best.insert(key, record);
            }
            Some(existing) => {
                if is_better(&record, existing) {
                    best.insert(key, record);
                }
            }
        }
    }
    best.into_values().collect()
}

fn is_better(candidate: &ScoredRecord, existing: &ScoredRecord) -> bool {
    if candidate.final_score != existing.final_score {
        candidate.final_score > existing.final_score
    } else {
        candidate.record.last_visit > existing.record.last_visit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_query_and_fragment() {
        assert_eq!(normalize_url("https://notion.so/page?pvs=12"), "https://notion.so/page");
        assert_eq!(normalize_url("https://example.com/path#section"), "https://example.com/path");
    }

    #[test]
    fn strips_trailing_slash_unless_sole_path_char() {
        assert_eq!(normalize_url("https://example.com/path/"), "https://example.com/path");
        assert_eq!(normalize_url("https://example.com/"), "https://example.com/");
    }

    #[test]
    fn lowercases_scheme_and_host() {
        assert_eq!(normalize_url("HTTPS://Example.COM/Path"), "https://example.com/path");
    }

    #[test]
    fn malformed_url_falls_back_to_crude_split() {
        assert_eq!(normalize_url("not-a-url?x=1"), "not-a-url");
    }

    #[test]
    fn idempotent_on_already_normalized_url() {
        let once = normalize_url("https://example.com/path?x=1");
        let twice = normalize_url(&once);
        assert_eq!(once, twice);
    }
}
