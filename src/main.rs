// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `deep-search`: a development harness for the ranking engine.
//!
//! ```bash
//! # Run a search against a JSON corpus of IndexedRecord values
//! deep-search bench ./corpus.json "rust guide" --diverse
//!
//! # Print corpus statistics without ranking anything
//! deep-search inspect ./corpus.json
//! ```
//!
//! This binary is not part of the library's contract (§6: "none defined
//! by the core — callers are responsible for configuration surfaces").
//! It exists purely so the ranking pipeline can be exercised by hand
//! without writing a caller first.

mod cli;

use std::collections::HashSet;
use std::fs;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use deep_search::{
    search, ExpansionService, HighlightField, IdentityExpansion, IndexedRecord, NeverCancelled,
    QueryFlags, RankingConfig, SearchRequest, SearchResultEntry,
};

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn load_corpus(path: &str) -> Result<Vec<IndexedRecord>, String> {
    let raw = fs::read_to_string(path).map_err(|e| format!("reading {path}: {e}"))?;
    serde_json::from_str(&raw).map_err(|e| format!("parsing {path} as a JSON array of records: {e}"))
}

fn run_bench(corpus: &str, query: &str, strict: bool, diverse: bool, no_bookmarks: bool, limit: usize) -> ExitCode {
    let records = match load_corpus(corpus) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let config = RankingConfig::default();
    let expanded = IdentityExpansion.expand(query).into_tokens();
    let flags = QueryFlags {
        strict_matching: strict,
        diverse_results: diverse,
        semantic_enabled: false,
        include_bookmarks: !no_bookmarks,
    };
    let request = SearchRequest {
        raw_query: query,
        records: &records,
        expanded_tokens: expanded,
        flags,
        query_embedding: None,
        max_results: limit,
    };

    match search(request, &config, now_millis(), &NeverCancelled) {
        Ok(results) => {
            print_row("URL", "SCORE", "TIER", "TITLE");
            print_divider();
            for entry in &results {
                print_row(
                    &truncate(&entry.url, 40),
                    &format!("{:.4}", entry.score),
                    &entry.tier.to_string(),
                    &highlight_excerpt(entry),
                );
            }
            println!();
            println!("{} result(s) for \"{}\"", results.len(), query);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("search failed: {err}");
            ExitCode::FAILURE
        }
    }
}

/// One-line excerpt of `entry.title` with matched spans bracketed, for a
/// quick visual sanity check of what the engine actually matched.
fn highlight_excerpt(entry: &SearchResultEntry) -> String {
    let mut spans: Vec<(usize, usize)> = entry
        .highlights
        .iter()
        .filter(|h| h.field == HighlightField::Title)
        .map(|h| (h.start, h.end))
        .collect();
    if spans.is_empty() {
        return truncate(&entry.title, 36);
    }
    spans.sort_unstable();

    let mut out = String::new();
    let mut cursor = 0;
    for (start, end) in spans {
        if start < cursor {
            continue;
        }
        out.push_str(&entry.title[cursor..start]);
        out.push('[');
        out.push_str(&entry.title[start..end]);
        out.push(']');
        cursor = end;
    }
    out.push_str(&entry.title[cursor..]);
    truncate(&out, 44)
}

fn run_inspect(corpus: &str) -> ExitCode {
    let records = match load_corpus(corpus) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let bookmark_count = records.iter().filter(|r| r.is_bookmark).count();
    let embedded_count = records.iter().filter(|r| r.embedding.is_some()).count();
    let embedding_dim = records.iter().find_map(|r| r.embedding.as_ref().map(Vec::len));
    let distinct_hosts: HashSet<&str> = records.iter().map(|r| r.host.as_str()).collect();

    println!("records:          {}", records.len());
    println!("bookmarked:       {bookmark_count}");
    println!("with embeddings:  {embedded_count}");
    match embedding_dim {
        Some(dim) => println!("embedding dim:    {dim}"),
        None => println!("embedding dim:    n/a"),
    }
    println!("distinct hosts:   {}", distinct_hosts.len());
    ExitCode::SUCCESS
}

fn print_row(url: &str, score: &str, tier: &str, title: &str) {
    println!("{:<42} {:>8} {:>5}  {}", url, score, tier, title);
}

fn print_divider() {
    println!("{}", "-".repeat(78));
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut truncated: String = s.chars().take(max.saturating_sub(1)).collect();
        truncated.push('…');
        truncated
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Bench { corpus, query, strict, diverse, no_bookmarks, limit } => {
            run_bench(&corpus, &query, strict, diverse, no_bookmarks, limit)
        }
        Commands::Inspect { corpus } => run_inspect(&corpus),
    }
}
