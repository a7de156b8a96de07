// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types surfaced by the ranking engine.
//!
//! The set of variants is closed by design (§7): a query is either
//! invalid, cancelled, or the record source failed. Everything else
//! — malformed URLs, missing embeddings, empty corpora, stopword-only
//! queries — degrades to an empty or partial result, never an error.

use std::fmt;

/// Errors `search` can return.
///
/// This list is closed. Adding a variant is a source-level change, not an
/// extension point — mirrors the closed scorer set in [`crate::scoring`].
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The raw query was empty or contained only separator characters.
    #[error("query is empty or contains no searchable tokens")]
    InvalidQuery,

    /// A cancellation signal fired between pipeline phases.
    #[error("search was cancelled")]
    Cancelled,

    /// The record source failed to yield records.
    #[error("record source failed: {0}")]
    SourceError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SearchError {
    /// Wrap an arbitrary collaborator error as a [`SearchError::SourceError`].
    pub fn from_source<E>(cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SearchError::SourceError(Box::new(cause))
    }
}

/// A record source failure with no further structure, for collaborators
/// that only have a message to report.
#[derive(Debug)]
pub struct SourceMessage(pub String);

impl fmt::Display for SourceMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for SourceMessage {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_query_display() {
        assert_eq!(
            SearchError::InvalidQuery.to_string(),
            "query is empty or contains no searchable tokens"
        );
    }

    #[test]
    fn source_error_wraps_cause() {
        let err = SearchError::from_source(SourceMessage("disk fell over".to_string()));
        assert!(err.to_string().contains("disk fell over"));
    }
}
