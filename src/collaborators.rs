// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! External interfaces the engine consumes but does not implement (§6).
//!
//! The persistence layer, the expansion model, and the embedding model
//! all live outside this crate's scope. These traits are the seams: any
//! caller wires up concrete implementations (a SQLite-backed history
//! store, an HTTP call to a synonym service, a local embedding model)
//! without the ranking pipeline knowing the difference — small traits
//! kept at the boundary rather than a concrete backend baked into
//! `search`.

use crate::types::{ExpandedToken, IndexedRecord};

/// Yields the current record set for one search call. Implementations
/// may be backed by a database cursor, an in-memory `Vec`, or a test
/// fixture; the engine materializes the iterator exactly once per call
/// and never assumes it can be restarted (§6).
pub trait RecordSource {
    type Iter: Iterator<Item = IndexedRecord>;

    fn iter_all(&self) -> Self::Iter;

    /// Used by the `domain_familiarity` scorer to avoid a second full
    /// scan; should be cheap (a stored counter, not a `count()` call).
    fn total_count(&self) -> u64;
}

/// Expands a raw query into original tokens plus synonyms and, if
/// enabled, AI-suggested tokens. A synchronous contract — async
/// collaborators wrap themselves in a blocking adapter before
/// implementing this trait (§6, §9).
pub trait ExpansionService {
    fn expand(&self, raw_query: &str) -> ExpandedQuery;
}

pub struct ExpandedQuery {
    pub original_tokens: Vec<String>,
    pub synonyms: Vec<String>,
    pub ai_tokens: Vec<String>,
}

impl ExpandedQuery {
    pub fn into_tokens(self) -> Vec<ExpandedToken> {
        use crate::types::TokenOrigin;
        let mut tokens = Vec::with_capacity(
            self.original_tokens.len() + self.synonyms.len() + self.ai_tokens.len(),
        );
        tokens.extend(self.original_tokens.into_iter().map(|token| ExpandedToken { token, origin: TokenOrigin::Original }));
        tokens.extend(self.synonyms.into_iter().map(|token| ExpandedToken { token, origin: TokenOrigin::Synonym }));
        tokens.extend(self.ai_tokens.into_iter().map(|token| ExpandedToken { token, origin: TokenOrigin::Ai }));
        tokens
    }
}

/// Embeds free text into the same vector space as stored record
/// embeddings. Called at most once per search, on the query side only —
/// record embeddings are presumed already computed and stored (§6).
pub trait EmbeddingService {
    fn embed(&self, text: &str) -> Option<Vec<f32>>;
}

/// The no-expansion adapter: every token is tagged `Original`, no
/// synonyms, no AI expansion. Useful for callers that haven't wired up
/// a real expansion service yet, and for tests.
pub struct IdentityExpansion;

impl ExpansionService for IdentityExpansion {
    fn expand(&self, raw_query: &str) -> ExpandedQuery {
        ExpandedQuery {
            original_tokens: crate::tokenize::tokenize(raw_query),
            synonyms: Vec::new(),
            ai_tokens: Vec::new(),
        }
    }
}
