// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Deep Search — a local, multi-signal ranking engine for personal
//! browsing history.
//!
//! Given a free-form query and a corpus of indexed page records, [`search`]
//! returns an ordered list of at most [`config::RankingConfig::max_results`]
//! records that best match the user's intent. Matching is graduated rather
//! than binary: every query token is classified against every text field on
//! a four-tier scale (EXACT/PREFIX/SUBSTRING/NONE), nine independent signals
//! are combined into a weighted base score, a fixed sequence of multiplicative
//! boosts is applied, and an intent-priority tier governs the final sort
//! before a diversity pass collapses near-duplicate URLs.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐   ┌────────────┐   ┌───────────────────┐
//! │ tokenize  │──▶│  classify  │──▶│  scoring (x9)      │
//! │ (§4.1)    │   │  (§4.2)    │   │  (§4.4)            │
//! └───────────┘   └────────────┘   └─────────┬──────────┘
//!                                             ▼
//!                 ┌────────────┐   ┌───────────────────┐
//!                 │  intent    │◀──│  boost (§4.5)      │
//!                 │  (§4.6)    │   └───────────────────┘
//!                 └─────┬──────┘
//!                       ▼
//!                 ┌────────────┐   ┌───────────────────┐
//!                 │ diversity  │──▶│  search (§4.9)     │
//!                 │  (§4.7)    │   │  public entry      │
//!                 └────────────┘   └───────────────────┘
//! ```
//!
//! Each box above is its own module; the section numbers in parentheses
//! track the design document this crate implements (see `DESIGN.md`).
//!
//! # Usage
//!
//! ```
//! use deep_search::{
//!     search, RankingConfig, QueryFlags, SearchRequest, NeverCancelled,
//!     IndexedRecord, ExpansionService, IdentityExpansion,
//! };
//!
//! let records = vec![IndexedRecord {
//!     url: "https://example.com/rust-guide".to_string(),
//!     title: "Rust Guide".to_string(),
//!     host: "example.com".to_string(),
//!     meta_description: None,
//!     meta_keywords: None,
//!     visit_count: 3,
//!     last_visit: 1_700_000_000_000,
//!     tokens: vec![],
//!     embedding: None,
//!     is_bookmark: false,
//!     bookmark_folders: None,
//!     bookmark_title: None,
//! }];
//!
//! let config = RankingConfig::default();
//! let expanded = IdentityExpansion.expand("rust guide").into_tokens();
//! let request = SearchRequest {
//!     raw_query: "rust guide",
//!     records: &records,
//!     expanded_tokens: expanded,
//!     flags: QueryFlags { strict_matching: false, diverse_results: false, semantic_enabled: false, include_bookmarks: true },
//!     query_embedding: None,
//!     max_results: 100,
//! };
//! let results = search(request, &config, 1_700_000_100_000, &NeverCancelled).unwrap();
//! assert_eq!(results[0].url, "https://example.com/rust-guide");
//! ```

pub mod boost;
pub mod classify;
pub mod collaborators;
pub mod config;
pub mod diversity;
pub mod error;
pub mod highlight;
pub mod intent;
pub mod prefilter;
pub mod scoring;
mod search;
pub mod testing;
pub mod tokenize;
pub mod types;

// Re-exports: the crate's public surface (§6, §9).
pub use collaborators::{EmbeddingService, ExpansionService, ExpandedQuery, IdentityExpansion, RecordSource};
pub use config::{BoostConfig, ClassifierWeights, QueryFlags, RankingConfig, ScorerWeights};
pub use error::SearchError;
pub use search::{search, CancellationSignal, NeverCancelled, SearchRequest};
pub use types::{
    ExpandedToken, Highlight, HighlightField, IndexedRecord, QueryContext, ScoredRecord,
    ScorerBreakdown, SearchResultEntry, TokenOrigin,
};
