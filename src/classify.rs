// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Match classification and graduated aggregation (§4.2).
//!
//! Four-tier grading instead of binary match/no-match: EXACT > PREFIX >
//! SUBSTRING > NONE, a small closed ordering with weights spaced far
//! enough apart that position bonuses downstream can never invert it.

use crate::config::ClassifierWeights;

/// One token's classification against one text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchClass {
    None,
    Substring,
    Prefix,
    Exact,
}

impl MatchClass {
    pub fn weight(self, weights: &ClassifierWeights) -> f64 {
        match self {
            MatchClass::Exact => weights.exact,
            MatchClass::Prefix => weights.prefix,
            MatchClass::Substring => weights.substring,
            MatchClass::None => weights.none,
        }
    }
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Classify a single occurrence of `token` at byte offset `pos` in `text`.
/// Both boundary characters (or string edges) determine whether this is an
/// exact word, a prefix hit, or a bare substring (§4.2 decision order 2-4).
fn classify_occurrence(text: &str, pos: usize, token_len: usize) -> MatchClass {
    let before_is_boundary = match text[..pos].chars().next_back() {
        None => true,
        Some(c) => !is_word_char(c),
    };
    let after_is_boundary = match text[pos + token_len..].chars().next() {
        None => true,
        Some(c) => !is_word_char(c),
    };

    if before_is_boundary && after_is_boundary {
        MatchClass::Exact
    } else if before_is_boundary {
        MatchClass::Prefix
    } else {
        MatchClass::Substring
    }
}

/// Classify `token` against `text` using the decision order in §4.2:
/// 1. no occurrence -> NONE
/// 2. some occurrence with boundaries on both sides -> EXACT
/// 3. some occurrence preceded by a boundary (start of a word) -> PREFIX
/// 4. otherwise -> SUBSTRING
///
/// When multiple occurrences exist, the *best* classification among them
/// wins — a token embedded mid-word at one spot and whole-word at another
/// should count as a real match.
pub fn classify(token: &str, text: &str) -> MatchClass {
    if token.is_empty() || !text.contains(token) {
        return MatchClass::None;
    }

    let mut best = MatchClass::None;
    let mut search_from = 0;
    while let Some(rel) = text[search_from..].find(token) {
        let pos = search_from + rel;
        let class = classify_occurrence(text, pos, token.len());
        if class > best {
            best = class;
        }
        if best == MatchClass::Exact {
            break;
        }
        search_from = pos + token.len().max(1);
        if search_from >= text.len() {
            break;
        }
    }
    best
}

/// Byte offset of the first occurrence of `token` classified as anything
/// but NONE, or `None` if it never matches.
pub fn first_match_offset(token: &str, text: &str) -> Option<usize> {
    if token.is_empty() {
        return None;
    }
    text.find(token)
}

/// Graduated aggregation: mean of classified weights over `tokens` against
/// `text`. Empty token sequence scores 0 (§4.2).
pub fn graduated_score(tokens: &[&str], text: &str, weights: &ClassifierWeights) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let sum: f64 = tokens.iter().map(|t| classify(t, text).weight(weights)).sum();
    sum / tokens.len() as f64
}

/// Position (character offset) of the first match of any of `tokens`
/// against `text`, used for the position bonus in the title scorer.
pub fn position_of_first_match(tokens: &[&str], text: &str) -> Option<usize> {
    tokens
        .iter()
        .filter_map(|t| first_match_offset(t, text))
        .min()
}

/// Count of adjacent query-token pairs `(t_k, t_k+1)` that occur in `text`
/// with only non-alphanumeric characters between them (§4.2 "ignoring
/// non-alphanumeric runs").
pub fn consecutive_match_count(tokens: &[&str], text: &str) -> usize {
    if tokens.len() < 2 {
        return 0;
    }
    let mut count = 0;
    for pair in tokens.windows(2) {
        if adjacent_in_text(pair[0], pair[1], text) {
            count += 1;
        }
    }
    count
}

fn adjacent_in_text(first: &str, second: &str, text: &str) -> bool {
    if first.is_empty() || second.is_empty() {
        return false;
    }
    let mut search_from = 0;
    while let Some(rel) = text[search_from..].find(first) {
        let start = search_from + rel;
        let after = start + first.len();
        let mut cursor = after;
        let bytes = text.as_bytes();
        while cursor < bytes.len() && !(bytes[cursor] as char).is_alphanumeric() {
            cursor += 1;
        }
        if text[cursor..].starts_with(second) {
            return true;
        }
        search_from = start + first.len().max(1);
        if search_from >= text.len() {
            break;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: ClassifierWeights = ClassifierWeights {
        exact: 1.0,
        prefix: 0.75,
        substring: 0.4,
        none: 0.0,
    };

    #[test]
    fn no_occurrence_is_none() {
        assert_eq!(classify("zzz", "hello world"), MatchClass::None);
    }

    #[test]
    fn whole_word_is_exact() {
        assert_eq!(classify("world", "hello world"), MatchClass::Exact);
        assert_eq!(classify("hello", "hello-world"), MatchClass::Exact);
    }

    #[test]
    fn start_of_word_is_prefix() {
        assert_eq!(classify("wor", "hello world"), MatchClass::Prefix);
    }

    #[test]
    fn mid_word_is_substring() {
        assert_eq!(classify("orl", "hello world"), MatchClass::Substring);
    }

    #[test]
    fn best_occurrence_wins() {
        // "art" is mid-word in "party" but a whole word in "the art"
        assert_eq!(classify("art", "party and the art"), MatchClass::Exact);
    }

    #[test]
    fn empty_token_sequence_scores_zero() {
        assert_eq!(graduated_score(&[], "anything", &W), 0.0);
    }

    #[test]
    fn graduated_mean_of_weights() {
        // "world" exact (1.0), "zzz" none (0.0) => mean 0.5
        let score = graduated_score(&["world", "zzz"], "hello world", &W);
        assert!((score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn classifier_monotonic_under_containment() {
        let text1 = "world";
        let text2 = "hello world wide web";
        assert!(classify("world", text1) <= classify("world", text2));
    }

    #[test]
    fn consecutive_pair_detected_across_separator() {
        assert_eq!(consecutive_match_count(&["zaar-api", "console"], "console zaar-api"), 0);
        assert_eq!(
            consecutive_match_count(&["rust", "guide"], "rust-guide-2024"),
            1
        );
    }

    #[test]
    fn position_of_first_match_picks_minimum() {
        let pos = position_of_first_match(&["world", "hello"], "hello world");
        assert_eq!(pos, Some(0));
    }
}
