// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/oeis-search)

//! Result ordering, rendering, and status output.
//!
//! Sorting and formatting never filter or reorder beyond the selected key:
//! the hit list arrives fully assembled and every hit is rendered exactly
//! once. Layout flag values match the original tool so saved invocations
//! keep working.

use std::io::{self, Write};

use crate::search::SearchHit;

/// Sort key for the final result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// By identifier (canonical/numeric order).
    #[default]
    Anum,
    /// By description: case-insensitive primary key, original string as
    /// tie-break (so uppercase sorts first).
    Description,
    /// By full term list, element-wise (`Vec<i64>` lexicographic order).
    Terms,
}

/// Sorts hits in place by the given key.
///
/// All three orders end in the unique identifier, so the result is a total
/// order and repeat runs print byte-identical output. Description order
/// compares lowercase keys first and falls back to the original strings:
/// `ABC` sorts before `abc` (`'A' < 'a'`).
pub fn sort_hits(hits: &mut [SearchHit], key: SortKey) {
    match key {
        SortKey::Anum => hits.sort_unstable_by_key(|hit| hit.id),
        SortKey::Description => {
            hits.sort_by_cached_key(|hit| {
                (hit.description.to_lowercase(), hit.description.clone(), hit.id)
            });
        }
        SortKey::Terms => {
            hits.sort_by(|a, b| a.terms.cmp(&b.terms).then(a.id.cmp(&b.id)));
        }
    }
}

/// Output layout for one result. Flag values match the original tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Identifier + description line, terms line, blank line (`m`).
    #[default]
    Multiline,
    /// Single line with identifier, description, and terms (`adt`).
    IdDescriptionTerms,
    /// Single line with identifier and description (`ad`).
    IdDescription,
    /// Single line with identifier and terms (`at`).
    IdTerms,
    /// Identifier only (`a`).
    IdOnly,
}

/// Renders terms as decimal integers joined by `", "`.
#[must_use]
pub fn join_terms(terms: &[i64]) -> String {
    terms
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Writes one hit in the given layout.
///
/// `print_first > 0` caps how many leading terms are rendered; matching
/// upstream always used the full list regardless.
pub fn write_hit(
    out: &mut impl Write,
    hit: &SearchHit,
    format: OutputFormat,
    print_first: usize,
) -> io::Result<()> {
    let shown = if print_first == 0 {
        &hit.terms[..]
    } else {
        &hit.terms[..hit.terms.len().min(print_first)]
    };
    match format {
        OutputFormat::Multiline => writeln!(
            out,
            "{}: {}\n{}\n",
            hit.id,
            hit.description,
            join_terms(shown)
        ),
        OutputFormat::IdDescriptionTerms => writeln!(
            out,
            "{}: {} {}",
            hit.id,
            hit.description,
            join_terms(shown)
        ),
        OutputFormat::IdDescription => writeln!(out, "{}: {}", hit.id, hit.description),
        OutputFormat::IdTerms => writeln!(out, "{}: {}", hit.id, join_terms(shown)),
        OutputFormat::IdOnly => writeln!(out, "{}", hit.id),
    }
}

/// Sink for progress/status lines emitted during a search.
///
/// The pipeline never prints directly; the binary passes a console sink
/// honoring `--quiet`, tests pass a recording or silent one.
pub trait StatusSink {
    /// Reports one status line (possibly empty, for spacing).
    fn status(&mut self, message: &str);
}

/// Console sink: one line per message on stdout, suppressed when quiet.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleStatus {
    /// Suppress all status output.
    pub quiet: bool,
}

impl StatusSink for ConsoleStatus {
    fn status(&mut self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }
}

/// Discarding sink for tests and library embedding.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentStatus;

impl StatusSink for SilentStatus {
    fn status(&mut self, _message: &str) {}
}
