//! End-to-end acceptance scenarios against the public API (§8). The
//! scoring-internals tests live next to the code they test in `src/`;
//! these exercise the crate the way an external caller would, through
//! `deep_search::search`.

use deep_search::{
    search, ExpansionService, IdentityExpansion, IndexedRecord, NeverCancelled, QueryFlags,
    RankingConfig, SearchRequest,
};

fn record(title: &str, url: &str, host: &str) -> IndexedRecord {
    IndexedRecord {
        url: url.to_string(),
        title: title.to_string(),
        host: host.to_string(),
        meta_description: None,
        meta_keywords: None,
        visit_count: 0,
        last_visit: 1,
        tokens: vec![],
        embedding: None,
        is_bookmark: false,
        bookmark_folders: None,
        bookmark_title: None,
    }
}

fn no_flags() -> QueryFlags {
    QueryFlags { strict_matching: false, diverse_results: false, semantic_enabled: false, include_bookmarks: true }
}

fn run(query: &str, records: &[IndexedRecord], flags: QueryFlags) -> Vec<deep_search::SearchResultEntry> {
    let expanded = IdentityExpansion.expand(query).into_tokens();
    let config = RankingConfig::default();
    let request = SearchRequest {
        raw_query: query,
        records,
        expanded_tokens: expanded,
        flags,
        query_embedding: None,
        max_results: 100,
    };
    search(request, &config, 1_700_000_000_000, &NeverCancelled).unwrap()
}

/// Scenario 1: all tokens in title beats an unrelated record by a wide
/// margin (tier 2 vs. not scored at all, since B is dropped by the
/// pre-filter).
#[test]
fn rar_my_all_title_match_wins() {
    let records = vec![
        record("[RAR-My-All] Issue Navigator", "jira.example.com/RAR-My-All", "jira.example.com"),
        record("Library Overview", "library.example.com", "library.example.com"),
    ];
    let results = run("rar my iss", &records, no_flags());
    assert_eq!(results[0].url, "jira.example.com/RAR-My-All");
}

/// Scenario 2: split-field coverage (tier 3) beats anything a
/// same-field full match (tier 2) could produce.
#[test]
fn split_field_beats_single_field_coverage() {
    let records = vec![
        record("Cloud Console", "console.cloud.google.com/api/zaar-api", "console.cloud.google.com"),
        record("GitHub Dashboard", "github.com/user", "github.com"),
    ];
    let results = run("zaar-api console", &records, no_flags());
    assert_eq!(results[0].url, "console.cloud.google.com/api/zaar-api");
    assert_eq!(results[0].tier, 3);
}

/// Scenario 3: diversity filtering collapses query-string variants of
/// the same normalized URL down to the single best-scoring survivor.
#[test]
fn diversity_collapses_query_string_variants() {
    let mut e = record("Plan", "https://notion.so/page?pvs=12", "notion.so");
    e.last_visit = 5;
    let mut f = record("Plan", "https://notion.so/page?pvs=25", "notion.so");
    f.last_visit = 50;
    let records = vec![e, f];
    let mut flags = no_flags();
    flags.diverse_results = true;
    let results = run("plan", &records, flags);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "https://notion.so/page?pvs=25");
}

/// Scenario 4: a literal substring hit on the raw query outranks a
/// record that only matches via graduated classification.
#[test]
fn literal_query_match_beats_graduated_only_match() {
    let records = vec![
        record("war - Google Search", "https://google.com/search?q=war", "google.com"),
        record("Article about warfare", "example.com/warfare", "example.com"),
    ];
    let results = run("war", &records, no_flags());
    assert_eq!(results[0].url, "https://google.com/search?q=war");
}

/// Scenario 5: full title coverage beats a partial brand-name collision.
#[test]
fn full_title_coverage_beats_brand_collision() {
    let records = vec![
        record("GitHub Pull Requests", "github.com/pulls", "github.com"),
        record("HubSpot CRM", "hubspot.com", "hubspot.com"),
    ];
    let results = run("github pull", &records, no_flags());
    assert_eq!(results[0].url, "github.com/pulls");
}

/// Scenario 6: an empty corpus returns an empty result, not an error.
#[test]
fn empty_corpus_yields_empty_result() {
    let records: Vec<IndexedRecord> = vec![];
    let results = run("anything", &records, no_flags());
    assert!(results.is_empty());
}

/// §6's output contract: highlight spans are byte offsets into the
/// *original* title string, not the normalized/lowercased one.
#[test]
fn highlights_point_into_the_original_title() {
    let records = vec![record("Rust Programming Guide", "example.com/rust", "example.com")];
    let results = run("rust", &records, no_flags());
    let title_span = results[0]
        .highlights
        .iter()
        .find(|h| h.field == deep_search::HighlightField::Title)
        .expect("expected a title highlight for a matching token");
    assert_eq!(&results[0].title[title_span.start..title_span.end], "Rust");
}
