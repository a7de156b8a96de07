// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Post-boost composer (§4.5): five multiplicative adjustments applied to
//! `base_score` in a fixed order. Each step reads the *running* product of
//! every step before it, so order is part of the contract, not an
//! implementation detail.

use crate::classify::{classify, consecutive_match_count, graduated_score, MatchClass};
use crate::config::BoostConfig;
use crate::tokenize::normalize;
use crate::types::{IndexedRecord, QueryContext};

/// Inputs the composer needs beyond the raw record and query context —
/// derived once by the caller so boost logic stays pure arithmetic.
pub struct BoostInputs {
    pub split_field: bool,
    pub title_url_coverage: f64,
    pub only_ai_tokens_hit: bool,
}

pub fn apply_boosts(
    base_score: f64,
    record: &IndexedRecord,
    context: &QueryContext,
    inputs: &BoostInputs,
    config: &crate::config::RankingConfig,
) -> f64 {
    let boosts = &config.boosts;
    let cw = &config.classifier_weights;
    let title_text = normalize(&record.title);
    let original: Vec<&str> = context.original_tokens.iter().map(String::as_str).collect();

    let mut score = base_score;
    score *= literal_match_multiplier(record, context, boosts);
    score *= title_quality_multiplier(&original, &title_text, cw, boosts);
    if original.len() >= 2 {
        score *= combined_multiplier(inputs, boosts);
    }
    score *= consecutive_multiplier(&original, &title_text, boosts);
    if inputs.only_ai_tokens_hit {
        score *= boosts.ai_expansion_only;
    }
    score
}

/// "Contains as a substring" is read as word-bounded containment (the
/// same boundary rule [`classify`] uses for EXACT) rather than raw
/// `str::contains` — otherwise a query like "war" would literal-match
/// "warfare" through pure substring luck. See `DESIGN.md` for the
/// scenario that forced this reading.
fn literal_match_multiplier(record: &IndexedRecord, context: &QueryContext, boosts: &BoostConfig) -> f64 {
    let query = context.raw_query.trim();
    if query.is_empty() {
        return 1.0;
    }
    let title_text = normalize(&record.title);
    let url_text = normalize(&record.url);
    if classify(query, &title_text) == MatchClass::Exact || classify(query, &url_text) == MatchClass::Exact {
        boosts.literal_match
    } else {
        1.0
    }
}

fn title_quality_multiplier(
    original: &[&str],
    title_text: &str,
    cw: &crate::config::ClassifierWeights,
    boosts: &BoostConfig,
) -> f64 {
    if original.is_empty() {
        return 1.0;
    }
    let classes: Vec<MatchClass> = original.iter().map(|t| classify(t, title_text)).collect();
    let matched = classes.iter().filter(|c| **c != MatchClass::None).count();
    let quality = graduated_score(original, title_text, cw);

    if matched == 0 {
        return 1.0;
    }
    if matched == original.len() {
        if classes.iter().all(|c| *c == MatchClass::Exact) {
            return boosts.title_all_exact;
        }
        if classes.iter().all(|c| *c == MatchClass::Substring) {
            return boosts.title_all_substring;
        }
        if classes.iter().all(|c| matches!(c, MatchClass::Prefix | MatchClass::Substring)) {
            return 1.0 + quality * boosts.title_all_prefix_or_substring_coefficient;
        }
        return 1.0 + quality * boosts.title_mixed_coefficient;
    }
    1.0 + quality * boosts.title_partial_coverage_coefficient
}

fn combined_multiplier(inputs: &BoostInputs, boosts: &BoostConfig) -> f64 {
    if inputs.title_url_coverage >= 1.0 {
        if inputs.split_field {
            boosts.combined_full_split_field
        } else {
            boosts.combined_full_single_field
        }
    } else if inputs.title_url_coverage >= 0.75 {
        boosts.combined_partial_75
    } else {
        1.0
    }
}

fn consecutive_multiplier(original: &[&str], title_text: &str, boosts: &BoostConfig) -> f64 {
    if original.len() < 2 {
        return 1.0;
    }
    let hits = consecutive_match_count(original, title_text) as f64;
    let max_possible = (original.len() - 1) as f64;
    1.0 + (hits / max_possible) * boosts.consecutive_token_coefficient
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{QueryFlags, RankingConfig};
    use crate::types::{ExpandedToken, TokenOrigin};

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

    #[test]
    fn literal_match_applies_one_point_five() {
        let config = RankingConfig::default();
        let context = ctx(&["war"]);
        let r = record("war - Google Search", "google.com/search?q=war");
        let inputs = BoostInputs { split_field: false, title_url_coverage: 1.0, only_ai_tokens_hit: false };
        let boosted = apply_boosts(1.0, &r, &context, &inputs, &config);
        // literal match (x1.5) * all-exact title (x1.45) * full-single-field (x1.4) ...
        assert!(boosted > 1.5);
    }

    #[test]
    fn no_match_leaves_score_unboosted_by_title_quality() {
        let config = RankingConfig::default();
        let context = ctx(&["zzz"]);
        let r = record("Totally Unrelated", "example.com");
        let inputs = BoostInputs { split_field: false, title_url_coverage: 0.0, only_ai_tokens_hit: false };
        let boosted = apply_boosts(1.0, &r, &context, &inputs, &config);
        assert!((boosted - 1.0).abs() < 1e-9);
    }

    #[test]
    fn split_field_combined_boost_exceeds_single_field() {
        let config = RankingConfig::default();
        let context = ctx(&["console", "zaar-api"]);
        let r = record("Cloud Console", "console.cloud.google.com/api/zaar-api");
        let split_inputs = BoostInputs { split_field: true, title_url_coverage: 1.0, only_ai_tokens_hit: false };
        let single_inputs = BoostInputs { split_field: false, title_url_coverage: 1.0, only_ai_tokens_hit: false };
        let split_score = apply_boosts(1.0, &r, &context, &split_inputs, &config);
        let single_score = apply_boosts(1.0, &r, &context, &single_inputs, &config);
        assert!(split_score > single_score);
    }
}
