//! Benchmarks the full `search` pipeline over synthetic corpora of
//! increasing size, to keep an eye on the pre-filter's effectiveness as
//! the intended corpus ceiling (~10^5 records, §1) is approached.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use deep_search::{
    search, ExpansionService, IdentityExpansion, IndexedRecord, NeverCancelled, QueryFlags,
    RankingConfig, SearchRequest,
};

fn synthetic_corpus(size: usize) -> Vec<IndexedRecord> {
    (0..size)
        .map(|i| {
            let host = format!("host{}.example.com", i % 50);
            IndexedRecord {
                url: format!("https://{host}/page/{i}"),
                title: if i % 7 == 0 {
                    format!("Rust Programming Guide {i}")
                } else {
                    format!("Unrelated Page {i}")
                },
                host,
                meta_description: Some(format!("A page about topic {i}")),
                meta_keywords: Some(vec!["example".to_string(), format!("tag{}", i % 20)]),
                visit_count: (i % 100) as u32,
                last_visit: 1_700_000_000_000 - (i as u64 * 60_000),
                tokens: vec![],
                embedding: None,
                is_bookmark: i % 31 == 0,
                bookmark_folders: None,
                bookmark_title: None,
            }
        })
        .collect()
}

fn bench_search(c: &mut Criterion) {
    let config = RankingConfig::default();
    let mut group = c.benchmark_group("search");

    for size in [100usize, 1_000, 10_000] {
        let records = synthetic_corpus(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| {
                let expanded = IdentityExpansion.expand("rust programming guide").into_tokens();
                let request = SearchRequest {
                    raw_query: "rust programming guide",
                    records: black_box(records),
                    expanded_tokens: expanded,
                    flags: QueryFlags { strict_matching: false, diverse_results: true, semantic_enabled: false, include_bookmarks: true },
                    query_embedding: None,
                    max_results: 100,
                };
                search(request, &config, 1_700_000_000_000, &NeverCancelled).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
