// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Frozen ranking configuration: weights, thresholds, and flags.
//!
//! Rather than scatter these as magic numbers through the scoring code,
//! they're bundled into a single, explicit, immutable-after-construction
//! value with one named field per scorer weight, classifier tier, and
//! boost multiplier.
//!
//! A `RankingConfig` is built once per process (or per test) and passed by
//! shared reference through a `search` call; nothing mutates it mid-call.

/// Per-scorer weights (§4.4).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorerWeights {
    pub multi_token_match: f64,
    pub title: f64,
    pub recency: f64,
    pub cross_dimensional: f64,
    pub visit_count: f64,
    pub url: f64,
    pub meta: f64,
    pub domain_familiarity: f64,
    /// Weight for the embedding scorer. Spec: 0.0 unless both query and
    /// record embeddings are present, in which case 0.4.
    pub embedding: f64,
}

impl Default for ScorerWeights {
    fn default() -> Self {
        ScorerWeights {
            multi_token_match: 0.35,
            title: 0.35,
            recency: 0.20,
            cross_dimensional: 0.15,
            visit_count: 0.15,
            url: 0.12,
            meta: 0.10,
            domain_familiarity: 0.05,
            embedding: 0.40,
        }
    }
}

/// Weights for the four-tier graduated match classification (§4.2).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierWeights {
    pub exact: f64,
    pub prefix: f64,
    pub substring: f64,
    pub none: f64,
}

impl Default for ClassifierWeights {
    fn default() -> Self {
        ClassifierWeights {
            exact: 1.0,
            prefix: 0.75,
            substring: 0.4,
            none: 0.0,
        }
    }
}

/// Multipliers applied by the post-boost composer, in the fixed order
/// specified by §4.5. The struct field order matches application order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostConfig {
    pub literal_match: f64,
    pub title_all_exact: f64,
    pub title_mixed_coefficient: f64,
    pub title_all_prefix_or_substring_coefficient: f64,
    pub title_all_substring: f64,
    pub title_partial_coverage_coefficient: f64,
    pub combined_full_split_field: f64,
    pub combined_full_single_field: f64,
    pub combined_partial_75: f64,
    pub consecutive_token_coefficient: f64,
    pub ai_expansion_only: f64,
}

impl Default for BoostConfig {
    fn default() -> Self {
        BoostConfig {
            literal_match: 1.5,
            title_all_exact: 1.45,
            title_mixed_coefficient: 0.40,
            title_all_prefix_or_substring_coefficient: 0.25,
            title_all_substring: 1.10,
            title_partial_coverage_coefficient: 0.15,
            combined_full_split_field: 1.60,
            combined_full_single_field: 1.40,
            combined_partial_75: 1.15,
            consecutive_token_coefficient: 0.10,
            ai_expansion_only: 1.2,
        }
    }
}

/// Bundles every tunable constant the ranking pipeline reads.
///
/// Construct with [`RankingConfig::default`] for the documented weights and
/// thresholds; override individual tables for experimentation (e.g.
/// benchmarking a different recency half-life) without touching the
/// scoring code.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingConfig {
    pub scorer_weights: ScorerWeights,
    pub classifier_weights: ClassifierWeights,
    pub boosts: BoostConfig,
    /// Half-life, in days, for the exponential recency decay (§4.4).
    pub recency_half_life_days: f64,
    /// Visit count above which the visit-count scorer saturates (§4.4).
    pub visit_count_cap: u32,
    /// Hard cap on returned results regardless of caller request (§6, §9).
    pub max_results: usize,
    /// Minimum `final_score` to retain a record when `strict_matching` is
    /// off (§4.8).
    pub min_score_threshold: f64,
    /// Minimum `final_score` floor applied to bookmarked records (§4.9).
    pub bookmark_score_floor: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        RankingConfig {
            scorer_weights: ScorerWeights::default(),
            classifier_weights: ClassifierWeights::default(),
            boosts: BoostConfig::default(),
            recency_half_life_days: 30.0,
            visit_count_cap: 1000,
            max_results: 100,
            min_score_threshold: 0.05,
            bookmark_score_floor: 0.10,
        }
    }
}

/// Booleans that vary per search call, kept separate from [`RankingConfig`]
/// so callers can flip them per query without cloning the whole config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryFlags {
    pub strict_matching: bool,
    pub diverse_results: bool,
    pub semantic_enabled: bool,
    pub include_bookmarks: bool,
}

/// Stopwords dropped by the tokenizer. Process-wide immutable state — a
/// fixed list rather than something built at index time.
pub const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "of", "to", "in", "on", "for", "is", "at",
    "by", "with", "from", "as", "it", "this", "that", "be", "are", "was",
    "were", "been", "will", "into", "about", "than", "then",
];

#[inline]
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}
