// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The public entry point (§4.9): tokenize -> expand -> pre-filter ->
//! score -> boost -> filter -> diversify -> sort -> cap.
//!
//! Single-call, synchronous, compute-bound. No suspension points inside
//! this function (§5) — the record source is fully materialized before
//! scoring starts.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, debug_span, warn};

use crate::boost::{apply_boosts, BoostInputs};
use crate::config::{QueryFlags, RankingConfig};
use crate::diversity::apply_diversity_filter;
use crate::error::SearchError;
use crate::highlight::compute_highlights;
use crate::intent::{assign_tier, coverage_info, compare_records, SortKey};
use crate::prefilter::{haystack, passes_prefilter};
use crate::scoring::{first_non_finite_scorer, score_record, CorpusStats};
use crate::tokenize::tokenize;
use crate::types::{ExpandedToken, IndexedRecord, QueryContext, ScoredRecord, SearchResultEntry};

/// Checked between pipeline phases; never polled mid-phase (§5).
pub trait CancellationSignal {
    fn is_cancelled(&self) -> bool;
}

/// Always-false signal for callers that never cancel.
pub struct NeverCancelled;

impl CancellationSignal for NeverCancelled {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Everything `search` needs beyond the raw query: the record set (fully
/// materialized by the caller — see [`crate::collaborators::RecordSource`]),
/// the expanded tokens, flags, and an optional query embedding.
pub struct SearchRequest<'a> {
    pub raw_query: &'a str,
    pub records: &'a [IndexedRecord],
    pub expanded_tokens: Vec<ExpandedToken>,
    pub flags: QueryFlags,
    pub query_embedding: Option<Vec<f32>>,
    pub max_results: usize,
}

/// Run one ranking call. Returns result entries in final order, owned
/// (detached from the borrowed record set), or a [`SearchError`].
pub fn search(
    request: SearchRequest,
    config: &RankingConfig,
    now_millis: u64,
    cancellation: &dyn CancellationSignal,
) -> Result<Vec<SearchResultEntry>, SearchError> {
    let span = debug_span!("search", query = %request.raw_query);
    let _guard = span.enter();

    let original_tokens = tokenize(request.raw_query);
    if original_tokens.is_empty() && request.expanded_tokens.is_empty() {
        return Err(SearchError::InvalidQuery);
    }

    let context = QueryContext {
        raw_query: request.raw_query.to_lowercase(),
        original_tokens: original_tokens.clone(),
        expanded_tokens: request.expanded_tokens,
        query_embedding: request.query_embedding,
        flags: request.flags,
    };

    let prefiltered = prefilter_records(request.records, &context);
    debug!(count = prefiltered.len(), "post-prefilter");

    if cancellation.is_cancelled() {
        return Err(SearchError::Cancelled);
    }

    let stats = CorpusStats::build(request.records.iter());
    let nan_logged = AtomicBool::new(false);
    let mut scored = score_records(prefiltered, &context, &stats, config, now_millis, &nan_logged);
    debug!(count = scored.len(), "post-scoring");

    if cancellation.is_cancelled() {
        return Err(SearchError::Cancelled);
    }

    scored = apply_strict_filter(scored, &context, config);
    scored = apply_bookmark_floor(scored, &context, config);

    if context.flags.diverse_results {
        scored = apply_diversity_filter(scored);
    }
    debug!(count = scored.len(), "post-diversity");

    sort_scored(&mut scored, original_tokens.len());

    if cancellation.is_cancelled() {
        return Err(SearchError::Cancelled);
    }

    let cap = request.max_results.min(config.max_results);
    scored.truncate(cap);

    Ok(scored.iter().map(SearchResultEntry::from).collect())
}

fn prefilter_records<'a>(records: &'a [IndexedRecord], context: &QueryContext) -> Vec<&'a IndexedRecord> {
    let mut warned_malformed = false;
    records
        .iter()
        .filter(|record| {
            if record.host.is_empty() && !warned_malformed && record.url.find("://").is_none() {
                warn!(url = %record.url, "record has no parseable host, treating host as empty");
                warned_malformed = true;
            }
            // Bookmarks bypass the content gate entirely: §4.9 step 4's floor
            // only matters if a non-matching bookmark survives to be scored at
            // all, and the pre-filter is a cheap *content* gate, not a
            // bookmark-inclusion gate (the `include_bookmarks` flag, applied
            // later, is what actually decides whether bookmarks show up).
            if record.is_bookmark {
                return true;
            }
            let text = haystack(record);
            passes_prefilter(&text, &context.original_tokens, &context.raw_query)
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn score_records<'a>(
    records: Vec<&'a IndexedRecord>,
    context: &QueryContext,
    stats: &CorpusStats,
    config: &RankingConfig,
    now_millis: u64,
    nan_logged: &AtomicBool,
) -> Vec<ScoredRecord<'a>> {
    use rayon::prelude::*;
    records
        .into_par_iter()
        .map(|record| build_scored_record(record, context, stats, config, now_millis, nan_logged))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn score_records<'a>(
    records: Vec<&'a IndexedRecord>,
    context: &QueryContext,
    stats: &CorpusStats,
    config: &RankingConfig,
    now_millis: u64,
    nan_logged: &AtomicBool,
) -> Vec<ScoredRecord<'a>> {
    records
        .into_iter()
        .map(|record| build_scored_record(record, context, stats, config, now_millis, nan_logged))
        .collect()
}

fn build_scored_record<'a>(
    record: &'a IndexedRecord,
    context: &QueryContext,
    stats: &CorpusStats,
    config: &RankingConfig,
    now_millis: u64,
    nan_logged: &AtomicBool,
) -> ScoredRecord<'a> {
    let (breakdown, base_score) = score_record(record, context, stats, config, now_millis);
    if let Some(scorer) = first_non_finite_scorer(&breakdown) {
        if nan_logged.compare_exchange(false, true, Ordering::Relaxed, Ordering::Relaxed).is_ok() {
            debug!(url = %record.url, scorer, "non-finite score clamped to 0");
        }
    }
    let coverage = coverage_info(record, &context.original_tokens, &config.classifier_weights);
    let title_text = crate::tokenize::normalize(&record.title);
    let url_text = crate::tokenize::normalize(&record.url);
    let combined_text = format!("{title_text} {url_text}");

    let has_keyword_match = context
        .original_tokens
        .iter()
        .any(|t| crate::classify::classify(t, &combined_text) != crate::classify::MatchClass::None);
    let raw_query_trimmed = context.raw_query.trim();
    let has_literal_match = !raw_query_trimmed.is_empty()
        && (crate::classify::classify(raw_query_trimmed, &title_text) == crate::classify::MatchClass::Exact
            || crate::classify::classify(raw_query_trimmed, &url_text) == crate::classify::MatchClass::Exact);

    let boost_inputs = BoostInputs {
        split_field: coverage.split_field,
        title_url_coverage: coverage.title_url_coverage,
        only_ai_tokens_hit: context.only_ai_tokens_hit(&combined_text),
    };
    let final_score = crate::scoring::sanitize(apply_boosts(base_score, record, context, &boost_inputs, config));

    let intent_tier = if context.original_tokens.len() < 2 { 0 } else { assign_tier(context.original_tokens.len(), &coverage) };

    ScoredRecord {
        record,
        breakdown,
        base_score,
        final_score,
        intent_tier,
        title_url_coverage: coverage.title_url_coverage,
        title_url_quality: coverage.title_url_quality,
        split_field: coverage.split_field,
        has_keyword_match,
        has_literal_match,
        highlights: compute_highlights(record, &context.original_tokens),
    }
}

fn apply_strict_filter<'a>(
    records: Vec<ScoredRecord<'a>>,
    context: &QueryContext,
    config: &RankingConfig,
) -> Vec<ScoredRecord<'a>> {
    if context.flags.strict_matching {
        records
            .into_iter()
            .filter(|r| r.has_keyword_match || r.has_literal_match)
            .collect()
    } else {
        records
            .into_iter()
            .filter(|r| r.final_score >= config.min_score_threshold || r.record.is_bookmark)
            .collect()
    }
}

fn apply_bookmark_floor<'a>(
    mut records: Vec<ScoredRecord<'a>>,
    context: &QueryContext,
    config: &RankingConfig,
) -> Vec<ScoredRecord<'a>> {
    if !context.flags.include_bookmarks {
        return records.into_iter().filter(|r| !r.record.is_bookmark).collect();
    }
    for record in &mut records {
        if record.record.is_bookmark && record.final_score < config.bookmark_score_floor {
            record.final_score = config.bookmark_score_floor;
        }
    }
    records
}

fn sort_scored(records: &mut [ScoredRecord], original_token_count: usize) {
    records.sort_by(|a, b| {
        let (key_a, key_b) = if original_token_count < 2 {
            (
                SortKey { tier: 0, coverage: 0.0, quality: 0.0, final_score: a.final_score, last_visit: a.record.last_visit },
                SortKey { tier: 0, coverage: 0.0, quality: 0.0, final_score: b.final_score, last_visit: b.record.last_visit },
            )
        } else {
            (
                SortKey { tier: a.intent_tier, coverage: a.title_url_coverage, quality: a.title_url_quality, final_score: a.final_score, last_visit: a.record.last_visit },
                SortKey { tier: b.intent_tier, coverage: b.title_url_coverage, quality: b.title_url_quality, final_score: b.final_score, last_visit: b.record.last_visit },
            )
        };
        compare_records(&key_a, &key_b)
    });
}
