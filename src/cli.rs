// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Command-line argument definitions for the `deep-search` demo binary
//! (§12). Not part of the library's contract — a development/benchmarking
//! harness only, shipped as a thin CLI alongside the library rather than
//! folded into it.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "deep-search",
    about = "Development harness for the deep-search ranking engine",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one ranking call against a JSON corpus and print the results.
    Bench {
        /// Path to a JSON array of `IndexedRecord` values.
        corpus: String,

        /// The query string.
        query: String,

        /// Drop records with no keyword or literal match.
        #[arg(long)]
        strict: bool,

        /// Collapse near-duplicate URLs, keeping the highest scorer.
        #[arg(long)]
        diverse: bool,

        /// Exclude bookmarked records from the bookmark floor / inclusion.
        #[arg(long)]
        no_bookmarks: bool,

        /// Cap on returned results (still hard-capped at 100 by the engine).
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Print corpus statistics without running a search.
    Inspect {
        /// Path to a JSON array of `IndexedRecord` values.
        corpus: String,
    },
}
