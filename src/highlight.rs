// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Highlight span computation (§6): the only rendering-adjacent contract
//! the engine carries. Byte offsets are reported against the *original*
//! (un-lowercased, un-folded) field string, not the normalized text the
//! classifier and scorers operate over — a caller drawing `<mark>` tags
//! around a title needs offsets into the title it actually displays.

use crate::types::{Highlight, HighlightField, IndexedRecord};

/// One span per distinct original token, per field, first occurrence only
/// — enough for a caller to bold the matched words without drowning a
/// long title or URL in overlapping marks. Tokens that don't occur in a
/// given field simply produce no highlight for that field.
pub fn compute_highlights(record: &IndexedRecord, original_tokens: &[String]) -> Vec<Highlight> {
    let mut highlights = Vec::new();
    let mut seen_tokens: Vec<&str> = Vec::new();

    for token in original_tokens {
        let token = token.as_str();
        if seen_tokens.contains(&token) {
            continue;
        }
        seen_tokens.push(token);

        if let Some((start, end)) = first_case_insensitive_match(&record.title, token) {
            highlights.push(Highlight { field: HighlightField::Title, start, end });
        }
        if let Some((start, end)) = first_case_insensitive_match(&record.url, token) {
            highlights.push(Highlight { field: HighlightField::Url, start, end });
        }
        if let Some(desc) = &record.meta_description {
            if let Some((start, end)) = first_case_insensitive_match(desc, token) {
                highlights.push(Highlight { field: HighlightField::MetaDescription, start, end });
            }
        }
    }

    highlights
}

/// Case-insensitive search for `needle` (already lowercase) in `haystack`,
/// returning the byte range of the first match in `haystack`'s own
/// encoding. Compares char-by-char via `to_lowercase` rather than
/// lowercasing the whole haystack up front, so the returned byte offsets
/// stay valid against the original string even when case-folding would
/// change a character's byte length.
fn first_case_insensitive_match(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    if needle.is_empty() || haystack.is_empty() {
        return None;
    }
    let needle_chars: Vec<char> = needle.chars().collect();
    let hay_chars: Vec<(usize, char)> = haystack.char_indices().collect();
    if needle_chars.len() > hay_chars.len() {
        return None;
    }

    'outer: for start in 0..=hay_chars.len() - needle_chars.len() {
        for (offset, needle_char) in needle_chars.iter().enumerate() {
            let hay_char = hay_chars[start + offset].1;
            if !char_eq_ci(hay_char, *needle_char) {
                continue 'outer;
            }
        }
        let byte_start = hay_chars[start].0;
        let byte_end = hay_chars
            .get(start + needle_chars.len())
            .map(|(idx, _)| *idx)
            .unwrap_or(haystack.len());
        return Some((byte_start, byte_end));
    }
    None
}

fn char_eq_ci(a: char, b: char) -> bool {
    a.to_lowercase().eq(b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IndexedRecord;

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
    fn finds_span_in_title_case_insensitively() {
        let r = record("Rust Programming Guide", "example.com/rust");
        let spans = compute_highlights(&r, &["rust".to_string()]);
        let title_span = spans.iter().find(|h| h.field == HighlightField::Title).unwrap();
        assert_eq!(&r.title[title_span.start..title_span.end], "Rust");
    }

    #[test]
    fn finds_span_in_url() {
        let r = record("A Guide", "example.com/rust-guide");
        let spans = compute_highlights(&r, &["rust".to_string()]);
        let url_span = spans.iter().find(|h| h.field == HighlightField::Url).unwrap();
        assert_eq!(&r.url[url_span.start..url_span.end], "rust");
    }

    #[test]
    fn no_span_for_unmatched_token() {
        let r = record("A Guide", "example.com/guide");
        let spans = compute_highlights(&r, &["zzz".to_string()]);
        assert!(spans.is_empty());
    }

    #[test]
    fn deduplicates_repeated_tokens() {
        let r = record("Rust Rust Guide", "example.com/rust");
        let spans = compute_highlights(&r, &["rust".to_string(), "rust".to_string()]);
        assert_eq!(spans.iter().filter(|h| h.field == HighlightField::Title).count(), 1);
    }

    #[test]
    fn meta_description_span_found() {
        let mut r = record("A Guide", "example.com/guide");
        r.meta_description = Some("Learn Rust fast".to_string());
        let spans = compute_highlights(&r, &["rust".to_string()]);
        assert!(spans.iter().any(|h| h.field == HighlightField::MetaDescription));
    }
}
