// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! Always compiled but hidden from documentation. Canonical record and
//! query-context builders so every test module (and the `tests/`
//! integration suite) constructs fixtures the same way instead of each
//! growing its own slightly-different `record()` helper.

#![doc(hidden)]

use crate::config::QueryFlags;
use crate::types::{ExpandedToken, IndexedRecord, QueryContext, TokenOrigin};

/// A minimal record with just a title, URL, and host; every other field
/// is the zero value. Good enough for classifier/scorer/boost tests that
/// don't care about visits, bookmarks, or embeddings.
pub fn make_record(title: &str, url: &str, host: &str) -> IndexedRecord {
    IndexedRecord {
        url: url.to_string(),
        title: title.to_string(),
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

/// [`make_record`] plus visit stats, for recency/visit-count scorer tests.
pub fn make_visited_record(title: &str, url: &str, host: &str, visit_count: u32, last_visit: u64) -> IndexedRecord {
    let mut record = make_record(title, url, host);
    record.visit_count = visit_count;
    record.last_visit = last_visit;
    record
}

/// A `QueryContext` whose `expanded_tokens` are exactly `original`, all
/// tagged [`TokenOrigin::Original`] — the common case for tests that
/// don't exercise synonym/AI expansion.
pub fn make_context(original: &[&str]) -> QueryContext {
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

/// Default flags: everything off, bookmarks included. The common
/// "plain search" baseline most tests start from and flip one field on.
pub fn default_flags() -> QueryFlags {
    QueryFlags { strict_matching: false, diverse_results: false, semantic_enabled: false, include_bookmarks: true }
}
