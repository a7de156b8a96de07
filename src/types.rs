// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a ranking call.
//!
//! `IndexedRecord` is the engine's only input shape; `QueryContext` is
//! assembled once per call and never mutated; `ScoredRecord` is the
//! intermediate the pipeline threads from scoring through to the final
//! sort (§3).

use serde::{Deserialize, Serialize};

/// A single indexed page record. Immutable input to the engine — the
/// pipeline borrows these for the duration of one `search` call and never
/// writes through the reference.
///
/// Invariant: `url` uniquely identifies a record within a corpus (set
/// semantics on ingest, enforced by the caller, not this crate).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedRecord {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub meta_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub visit_count: u32,
    /// Wall-clock millisecond timestamp of the last visit.
    #[serde(default)]
    pub last_visit: u64,
    /// Pre-tokenized bag of lowercase words, length >= 2 each. A cache
    /// over `title + url + metadata`; re-derivable, never trusted blindly
    /// by scorers that can recompute cheaply from the raw fields.
    #[serde(default)]
    pub tokens: Vec<String>,
    /// Dense embedding vector. All embeddings in a corpus share the same
    /// dimensionality if present at all (caller's invariant to maintain).
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
    #[serde(default)]
    pub is_bookmark: bool,
    /// Folder path from root to leaf, only meaningful when `is_bookmark`.
    #[serde(default)]
    pub bookmark_folders: Option<Vec<String>>,
    #[serde(default)]
    pub bookmark_title: Option<String>,
}

/// Where a query token came from. Used to detect "only AI expansions
/// matched" for the AI-expansion post-boost (§4.5 step 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenOrigin {
    Original,
    Synonym,
    Ai,
}

/// A query token tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedToken {
    pub token: String,
    pub origin: TokenOrigin,
}

/// Read-only context assembled once per search call and threaded through
/// every scorer, booster, and the intent sorter. Nothing in the pipeline
/// mutates this after construction (§9 — no shared mutable state).
#[derive(Debug, Clone)]
pub struct QueryContext {
    /// Verbatim user string, already lowercased for comparisons.
    pub raw_query: String,
    pub original_tokens: Vec<String>,
    pub expanded_tokens: Vec<ExpandedToken>,
    pub query_embedding: Option<Vec<f32>>,
    pub flags: crate::config::QueryFlags,
}

impl QueryContext {
    /// Tokens of any origin, as plain strings, for scorers that don't
    /// care where a token came from (e.g. `multi_token_match`).
    pub fn expanded_token_strs(&self) -> Vec<&str> {
        self.expanded_tokens.iter().map(|t| t.token.as_str()).collect()
    }

    /// True if every classified hit among `expanded_tokens` came from an
    /// AI-origin token — i.e. no original or synonym token matched at
    /// all. Used by the AI-expansion post-boost (§4.5 step 5).
    pub fn only_ai_tokens_hit(&self, haystack: &str) -> bool {
        use crate::classify::{classify, MatchClass};

        let mut any_non_ai_hit = false;
        let mut any_ai_hit = false;
        for t in &self.expanded_tokens {
            if classify(&t.token, haystack) != MatchClass::None {
                match t.origin {
                    TokenOrigin::Ai => any_ai_hit = true,
                    TokenOrigin::Original | TokenOrigin::Synonym => any_non_ai_hit = true,
                }
            }
        }
        any_ai_hit && !any_non_ai_hit
    }
}

/// A matched span for UI highlighting: byte offsets into the *original*
/// (un-lowercased) field string, plus which field it came from (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlightField {
    Title,
    Url,
    MetaDescription,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Highlight {
    pub field: HighlightField,
    pub start: usize,
    pub end: usize,
}

/// Per-scorer breakdown, useful for debugging and for the post-boost
/// composer, which needs several of these values directly (§4.4 last
/// paragraph: "the scorer manager also returns per-scorer values").
#[derive(Debug, Clone, Copy, Default)]
pub struct ScorerBreakdown {
    pub multi_token_match: f64,
    pub title: f64,
    pub recency: f64,
    pub cross_dimensional: f64,
    pub visit_count: f64,
    pub url: f64,
    pub meta: f64,
    pub domain_familiarity: f64,
    pub embedding: f64,
}

/// A scored record: the pipeline's intermediate representation. Borrows
/// the source record rather than cloning it (§3 ownership rule).
#[derive(Debug, Clone)]
pub struct ScoredRecord<'a> {
    pub record: &'a IndexedRecord,
    pub breakdown: ScorerBreakdown,
    pub base_score: f64,
    pub final_score: f64,
    pub intent_tier: u8,
    pub title_url_coverage: f64,
    pub title_url_quality: f64,
    pub split_field: bool,
    pub has_keyword_match: bool,
    pub has_literal_match: bool,
    pub highlights: Vec<Highlight>,
}

/// A single ranked output entry (§6 search call surface). This is what
/// `search` ultimately returns to callers who don't want to hold borrows
/// into the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResultEntry {
    pub url: String,
    pub title: String,
    pub host: String,
    pub score: f64,
    pub tier: u8,
    pub highlights: Vec<Highlight>,
}

impl<'a> From<&ScoredRecord<'a>> for SearchResultEntry {
    fn from(scored: &ScoredRecord<'a>) -> Self {
        SearchResultEntry {
            url: scored.record.url.clone(),
            title: scored.record.title.clone(),
            host: scored.record.host.clone(),
            score: scored.final_score,
            tier: scored.intent_tier,
            highlights: scored.highlights.clone(),
        }
    }
}
