// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The nine scorer functions (§4.4). Each is pure: `(record, context) ->
//! f64`, no shared state, no I/O. Kept as free functions dispatched by
//! name from [`super::score_record`] rather than trait objects — the set
//! is closed, adding a tenth scorer is a source change, not a plugin
//! point (§9).

use crate::classify::{classify, consecutive_match_count, graduated_score, position_of_first_match, MatchClass};
use crate::config::ClassifierWeights;
use crate::tokenize::normalize;
use crate::types::{IndexedRecord, QueryContext};

fn haystack(record: &IndexedRecord) -> String {
    crate::prefilter::haystack(record)
}

fn meta_text(record: &IndexedRecord) -> String {
    let mut buf = String::new();
    if let Some(desc) = &record.meta_description {
        buf.push_str(&normalize(desc));
    }
    if let Some(keywords) = &record.meta_keywords {
        if !buf.is_empty() {
            buf.push(' ');
        }
        buf.push_str(&normalize(&keywords.join(" ")));
    }
    buf
}

/// Mean classifier weight over the tokens that actually matched (NONE
/// excluded from the average), scaled to a max bonus. All matches EXACT
/// saturates the bonus; a mix of EXACT/PREFIX/SUBSTRING scales it down
/// linearly; no matches at all yields 0.
fn composition_bonus(tokens: &[&str], text: &str, weights: &ClassifierWeights, max_bonus: f64) -> f64 {
    let matched: Vec<f64> = tokens
        .iter()
        .map(|t| classify(t, text).weight(weights))
        .filter(|w| *w > 0.0)
        .collect();
    if matched.is_empty() {
        return 0.0;
    }
    let mean = matched.iter().sum::<f64>() / matched.len() as f64;
    mean * max_bonus
}

fn consecutive_bonus(tokens: &[&str], text: &str, max_bonus: f64) -> f64 {
    if tokens.len() < 2 {
        return 0.0;
    }
    let hits = consecutive_match_count(tokens, text) as f64;
    let max_possible = (tokens.len() - 1) as f64;
    (hits / max_possible) * max_bonus
}

/// `0.35` weight. Graduated match over the full haystack, raised to
/// emphasize strong coverage, plus composition and consecutive bonuses.
pub fn multi_token_match(record: &IndexedRecord, context: &QueryContext, weights: &ClassifierWeights) -> f64 {
    let text = haystack(record);
    let tokens = context.expanded_token_strs();
    let g = graduated_score(&tokens, &text, weights);
    let composition = composition_bonus(&tokens, &text, weights, 0.30);
    let consecutive = consecutive_bonus(&tokens, &text, 0.12);
    g.powf(1.3) + composition + consecutive
}

/// `0.35` weight. Blends expanded- and original-token graduated scores
/// over the title, with position, consecutive, composition, and
/// starts-with bonuses. Capped at 1.0 (§4.4).
pub fn title(record: &IndexedRecord, context: &QueryContext, weights: &ClassifierWeights) -> f64 {
    let title_text = normalize(&record.title);
    let expanded = context.expanded_token_strs();
    let original: Vec<&str> = context.original_tokens.iter().map(String::as_str).collect();

    let base = 0.3 * graduated_score(&expanded, &title_text, weights)
        + 0.7 * graduated_score(&original, &title_text, weights);

    let position_bonus = match position_of_first_match(&original, &title_text) {
        Some(pos) if !title_text.is_empty() => 0.15 * (1.0 - pos as f64 / title_text.len() as f64),
        _ => 0.0,
    };

    let consecutive = consecutive_bonus(&original, &title_text, 0.12);
    let composition = composition_bonus(&original, &title_text, weights, 0.30);

    let starts_with = title_text
        .split(|c: char| !c.is_alphanumeric())
        .find(|w| !w.is_empty())
        .map(|first_word| original.iter().any(|t| *t == first_word))
        .unwrap_or(false);
    let starts_with_bonus = if starts_with { 0.08 } else { 0.0 };

    (base + position_bonus + consecutive + composition + starts_with_bonus).min(1.0)
}

/// `0.20` weight. Exponential decay with a 30-day half-life over
/// `now - last_visit`. Future or zero timestamps clamp to age 0.
pub fn recency(record: &IndexedRecord, now_millis: u64, half_life_days: f64) -> f64 {
    if record.last_visit == 0 {
        return 0.0;
    }
    let age_millis = now_millis.saturating_sub(record.last_visit) as f64;
    let age_days = age_millis / 86_400_000.0;
    0.5_f64.powf(age_days / half_life_days)
}

/// `0.15` weight. Fraction of original tokens that appear in at least
/// two of {title, url, meta}.
pub fn cross_dimensional(record: &IndexedRecord, context: &QueryContext) -> f64 {
    let original = &context.original_tokens;
    if original.is_empty() {
        return 0.0;
    }
    let title_text = normalize(&record.title);
    let url_text = normalize(&record.url);
    let meta = meta_text(record);

    let hits = original
        .iter()
        .filter(|t| {
            let fields_hit = [
                classify(t, &title_text) != MatchClass::None,
                classify(t, &url_text) != MatchClass::None,
                !meta.is_empty() && classify(t, &meta) != MatchClass::None,
            ];
            fields_hit.iter().filter(|hit| **hit).count() >= 2
        })
        .count();

    hits as f64 / original.len() as f64
}

/// `0.15` weight. Logarithmic saturation against a visit-count cap.
pub fn visit_count(record: &IndexedRecord, cap: u32) -> f64 {
    let numerator = (1.0 + record.visit_count as f64).log2();
    let denominator = (1.0 + cap as f64).log2();
    if denominator <= 0.0 {
        return 0.0;
    }
    (numerator / denominator).min(1.0)
}

/// `0.12` weight. Path-weighted over host-weighted graduated match.
pub fn url(record: &IndexedRecord, context: &QueryContext, weights: &ClassifierWeights) -> f64 {
    let original: Vec<&str> = context.original_tokens.iter().map(String::as_str).collect();
    let (host, path) = crate::tokenize::split_host_and_path(&record.url, &record.host);
    0.6 * graduated_score(&original, &path, weights) + 0.4 * graduated_score(&original, &host, weights)
}

/// `0.10` weight. Graduated match over meta description and keywords;
/// 0 when no meta present at all (distinct from empty-but-present, which
/// also scores 0 but is a separate logging case upstream, §9).
pub fn meta(record: &IndexedRecord, context: &QueryContext, weights: &ClassifierWeights) -> f64 {
    if record.meta_description.is_none() && record.meta_keywords.is_none() {
        return 0.0;
    }
    let text = meta_text(record);
    let original: Vec<&str> = context.original_tokens.iter().map(String::as_str).collect();
    graduated_score(&original, &text, weights)
}

/// `0.0` or `0.4` weight, applied by the caller based on presence.
/// Cosine similarity clamped to `[0, 1]`; returns 0 when either vector is
/// absent, empty, or zero-length (no direction to compare).
pub fn embedding(record: &IndexedRecord, context: &QueryContext) -> f64 {
    match (&context.query_embedding, &record.embedding) {
        (Some(q), Some(r)) => cosine_similarity(q, r).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QueryFlags;
    use crate::types::ExpandedToken;
    use crate::types::TokenOrigin;

    fn ctx(original: &[&str]) -> QueryContext {
        QueryContext {
            raw_query: original.join(" "),
            original_tokens: original.iter().map(|s| s.to_string()).collect(),
            expanded_tokens: original
                .iter()
                .map(|s| ExpandedToken { token: s.to_string(), origin: TokenOrigin::Original })
                .collect(),
            query_embedding: None,
            flags: QueryFlags::default(),
        }
    }

    fn record(title: &str, url: &str) -> IndexedRecord {
        IndexedRecord {
            url: url.to_string(),
            title: title.to_string(),
            host: String::new(),
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

    const W: ClassifierWeights = ClassifierWeights { exact: 1.0, prefix: 0.75, substring: 0.4, none: 0.0 };

    #[test]
    fn recency_full_score_for_brand_new_visit() {
        let mut r = record("x", "x");
        r.last_visit = 1_000_000;
        assert_eq!(recency(&r, 1_000_000, 30.0), 1.0);
    }

    #[test]
    fn recency_decays_by_half_at_half_life() {
        let mut r = record("x", "x");
        let day_ms = 86_400_000u64;
        r.last_visit = 0;
        // use a nonzero last_visit to avoid the "never visited" early return
        r.last_visit = 1;
        let now = 1 + 30 * day_ms;
        let score = recency(&r, now, 30.0);
        assert!((score - 0.5).abs() < 1e-6);
    }

    #[test]
    fn visit_count_saturates_at_cap() {
        assert!((visit_count(&{
            let mut r = record("x", "x");
            r.visit_count = 1000;
            r
        }, 1000) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn visit_count_zero_visits_scores_zero() {
        assert_eq!(visit_count(&record("x", "x"), 1000), 0.0);
    }

    #[test]
    fn title_scores_higher_for_exact_whole_title_match() {
        let context = ctx(&["rust", "guide"]);
        let exact = title(&record("Rust Guide", "x"), &context, &W);
        let none = title(&record("Unrelated Page", "x"), &context, &W);
        assert!(exact > none);
    }

    #[test]
    fn meta_scores_zero_when_absent() {
        let context = ctx(&["rust"]);
        assert_eq!(meta(&record("x", "x"), &context, &W), 0.0);
    }

    #[test]
    fn cosine_similarity_is_bounded() {
        let a = vec![1.0_f32, 0.0, 0.0];
        let b = vec![1.0_f32, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
        let c = vec![-1.0_f32, 0.0, 0.0];
        assert!(cosine_similarity(&a, &c) <= 0.0);
    }

    #[test]
    fn embedding_scorer_clamps_negative_cosine_to_zero() {
        let mut context = ctx(&["rust"]);
        context.query_embedding = Some(vec![1.0, 0.0]);
        let mut r = record("x", "x");
        r.embedding = Some(vec![-1.0, 0.0]);
        assert_eq!(embedding(&r, &context), 0.0);
    }

    #[test]
    fn url_scorer_rewards_host_and_path_matches() {
        let context = ctx(&["github"]);
        let mut r = record("x", "https://github.com/user/repo");
        r.host = "github.com".to_string();
        assert!(url(&r, &context, &W) > 0.0);
    }
}
