// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Intent-priority tier assignment and the final sort key (§4.6).
//!
//! Bucket first, score only within a bucket: a four-tier coverage/
//! split-field bucket, then the ordered tiebreaker tuple
//! `(coverage, quality, score, last_visit)`.

use std::cmp::Ordering;

use crate::classify::{classify, graduated_score, MatchClass};
use crate::config::ClassifierWeights;
use crate::tokenize::{normalize, split_host_and_path};
use crate::types::{IndexedRecord, QueryContext};

/// Derived fields needed by both the tier rule and the sort key. Computed
/// once per record right after scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageInfo {
    pub title_url_coverage: f64,
    pub title_url_quality: f64,
    pub split_field: bool,
}

/// `title ∪ url`, concatenated and normalized, used as the field both the
/// tier rule and the boost composer's "combined" step reason about.
fn title_url_text(record: &IndexedRecord) -> String {
    let mut text = normalize(&record.title);
    text.push(' ');
    text.push_str(&normalize(&record.url));
    text
}

pub fn coverage_info(record: &IndexedRecord, original_tokens: &[String], weights: &ClassifierWeights) -> CoverageInfo {
    if original_tokens.is_empty() {
        return CoverageInfo { title_url_coverage: 0.0, title_url_quality: 0.0, split_field: false };
    }
    let title_text = normalize(&record.title);
    let combined = title_url_text(record);

    // Split-field uses the url *path*, not the full url: the host often
    // repeats a title's brand name verbatim ("Cloud Console" / "console.
    // cloud.google.com"), and counting that coincidence as a url-side hit
    // would hide a real title/path split (§4.6 scenario: "console" in
    // title, "zaar-api" in the path).
    let (_, path_text) = split_host_and_path(&record.url, &record.host);

    let present = original_tokens
        .iter()
        .filter(|t| classify(t, &combined) != MatchClass::None)
        .count();
    let coverage = present as f64 / original_tokens.len() as f64;
    let quality = graduated_score(
        &original_tokens.iter().map(String::as_str).collect::<Vec<_>>(),
        &combined,
        weights,
    );

    let only_in_title = original_tokens
        .iter()
        .any(|t| classify(t, &title_text) != MatchClass::None && classify(t, &path_text) == MatchClass::None);
    let only_in_url = original_tokens
        .iter()
        .any(|t| classify(t, &path_text) != MatchClass::None && classify(t, &title_text) == MatchClass::None);

    CoverageInfo { title_url_coverage: coverage, title_url_quality: quality, split_field: only_in_title && only_in_url }
}

/// Four-tier bucket for a scored record (§4.6). Single-token queries
/// always sit in tier 0 — the tier system only distinguishes *which*
/// fields cover the query, and a single token has nothing to split
/// across.
pub fn assign_tier(original_token_count: usize, coverage: &CoverageInfo) -> u8 {
    if original_token_count < 2 {
        return 0;
    }
    if coverage.title_url_coverage >= 1.0 && coverage.split_field {
        3
    } else if coverage.title_url_coverage >= 1.0 {
        2
    } else if coverage.title_url_coverage >= 0.75 {
        1
    } else {
        0
    }
}

/// Sort key tuple for a single record. Descending comparison is done by
/// the caller via [`compare_records`] — f64 has no `Ord`, so the key
/// itself can't be derived with `#[derive(Ord)]`.
pub struct SortKey {
    pub tier: u8,
    pub coverage: f64,
    pub quality: f64,
    pub final_score: f64,
    pub last_visit: u64,
}

/// Descending comparator over `(tier, coverage, quality, final_score,
/// last_visit)`. For single-token queries the caller should have set
/// `tier`/`coverage`/`quality` to 0 uniformly, which collapses this to
/// `(final_score, last_visit)` (§4.6: single-token queries sort by score
/// and recency alone).
pub fn compare_records(a: &SortKey, b: &SortKey) -> Ordering {
    b.tier
        .cmp(&a.tier)
        .then_with(|| b.coverage.partial_cmp(&a.coverage).unwrap_or(Ordering::Equal))
        .then_with(|| b.quality.partial_cmp(&a.quality).unwrap_or(Ordering::Equal))
        .then_with(|| b.final_score.partial_cmp(&a.final_score).unwrap_or(Ordering::Equal))
        .then_with(|| b.last_visit.cmp(&a.last_visit))
}
