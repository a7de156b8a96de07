// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring: nine independent signals, combined into one weighted base score.
//!
//! A fixed, non-extensible set of pure `(record, context) -> f64`
//! functions, dispatched by name and combined by a manager that also
//! hands back the per-scorer breakdown — adding a tenth scorer is a
//! source change, not a plugin point (§9).

mod scorers;

pub use scorers::*;

use std::collections::HashMap;

use crate::config::RankingConfig;
use crate::types::{IndexedRecord, QueryContext, ScorerBreakdown};

/// Per-search aggregate over the whole corpus, built once before scoring
/// and discarded at call end (§5: "a per-search cache maps host ->
/// domain_familiarity to avoid O(N^2) scans").
pub struct CorpusStats {
    host_counts: HashMap<String, u32>,
    total_count: u64,
}

impl CorpusStats {
    pub fn build<'a>(records: impl Iterator<Item = &'a IndexedRecord>) -> Self {
        let mut host_counts = HashMap::new();
        let mut total_count = 0u64;
        for record in records {
            *host_counts.entry(record.host.clone()).or_insert(0u32) += 1;
            total_count += 1;
        }
        CorpusStats { host_counts, total_count }
    }

    fn familiarity(&self, host: &str) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        let count = self.host_counts.get(host).copied().unwrap_or(0);
        (count as f64 / self.total_count as f64).clamp(0.0, 1.0)
    }
}

/// Run every scorer against `record` under `context`, returning the
/// per-scorer breakdown and the weighted base score (§4.4). `now_millis`
/// is injected so the recency scorer stays pure and testable.
pub fn score_record(
    record: &IndexedRecord,
    context: &QueryContext,
    stats: &CorpusStats,
    config: &RankingConfig,
    now_millis: u64,
) -> (ScorerBreakdown, f64) {
    let weights = &config.scorer_weights;
    let cw = &config.classifier_weights;

    let breakdown = ScorerBreakdown {
        multi_token_match: scorers::multi_token_match(record, context, cw),
        title: scorers::title(record, context, cw),
        recency: scorers::recency(record, now_millis, config.recency_half_life_days),
        cross_dimensional: scorers::cross_dimensional(record, context),
        visit_count: scorers::visit_count(record, config.visit_count_cap),
        url: scorers::url(record, context, cw),
        meta: scorers::meta(record, context, cw),
        domain_familiarity: stats.familiarity(&record.host),
        embedding: scorers::embedding(record, context),
    };

    let embedding_weight = if context.query_embedding.is_some() && record.embedding.is_some() {
        weights.embedding
    } else {
        0.0
    };

    let base = breakdown.multi_token_match * weights.multi_token_match
        + breakdown.title * weights.title
        + breakdown.recency * weights.recency
        + breakdown.cross_dimensional * weights.cross_dimensional
        + breakdown.visit_count * weights.visit_count
        + breakdown.url * weights.url
        + breakdown.meta * weights.meta
        + breakdown.domain_familiarity * weights.domain_familiarity
        + breakdown.embedding * embedding_weight;

    (breakdown, sanitize(base))
}

/// NaN or infinity collapses to 0 (§7: "NaN or infinity in any computed
/// score is treated as 0"). Callers log this once per search at debug
/// level; this function only performs the substitution.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Name of the first scorer in `breakdown` whose value is not finite, or
/// `None` if every scorer produced a finite value. Used by the caller to
/// log the offending scorer once per `search` call (§7) without the pure
/// scoring layer itself doing any I/O.
pub fn first_non_finite_scorer(breakdown: &ScorerBreakdown) -> Option<&'static str> {
    let fields: [(&'static str, f64); 9] = [
        ("multi_token_match", breakdown.multi_token_match),
        ("title", breakdown.title),
        ("recency", breakdown.recency),
        ("cross_dimensional", breakdown.cross_dimensional),
        ("visit_count", breakdown.visit_count),
        ("url", breakdown.url),
        ("meta", breakdown.meta),
        ("domain_familiarity", breakdown.domain_familiarity),
        ("embedding", breakdown.embedding),
    ];
    fields.into_iter().find(|(_, v)| !v.is_finite()).map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(host: &str) -> IndexedRecord {
        IndexedRecord {
            url: format!("https://{host}/"),
            title: String::new(),
            host: host.to_string(),
            meta_description: None,
            meta_keywords: None,
            visit_count: 0,
            last_visit: 0,
            tokens: vec![],
            embedding: None,
            is_bookmark: false,
            bookmark_folders: None,
            bookmark_title: None,
        }
    }

    #[test]
    fn familiarity_is_fraction_of_corpus() {
        let records = vec![record("a.com"), record("a.com"), record("b.com")];
        let stats = CorpusStats::build(records.iter());
        assert!((stats.familiarity("a.com") - 2.0 / 3.0).abs() < 1e-9);
        assert!((stats.familiarity("b.com") - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.familiarity("unseen.com"), 0.0);
    }

    #[test]
    fn empty_corpus_familiarity_is_zero() {
        let stats = CorpusStats::build(std::iter::empty());
        assert_eq!(stats.familiarity("a.com"), 0.0);
    }

    #[test]
    fn sanitize_collapses_non_finite() {
        assert_eq!(sanitize(f64::NAN), 0.0);
        assert_eq!(sanitize(f64::INFINITY), 0.0);
        assert_eq!(sanitize(-f64::INFINITY), 0.0);
        assert_eq!(sanitize(0.5), 0.5);
    }

    #[test]
    fn first_non_finite_scorer_names_the_offender() {
        let mut breakdown = ScorerBreakdown::default();
        breakdown.recency = f64::NAN;
        assert_eq!(first_non_finite_scorer(&breakdown), Some("recency"));
    }

    #[test]
    fn first_non_finite_scorer_is_none_when_all_finite() {
        let breakdown = ScorerBreakdown::default();
        assert_eq!(first_non_finite_scorer(&breakdown), None);
    }
}
