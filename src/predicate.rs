// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/oeis-search)

//! Term predicate engine — decides whether one sequence's terms satisfy a
//! query.
//!
//! A [`TermQuery`] is a conjunction of optional clauses: membership
//! (required / forbidden terms), contiguous-run containment, inclusive
//! value bounds, a monotonicity constraint, distinctness, and bounded
//! subset/superset tests against a looked-up reference sequence. Clauses
//! that are not configured are vacuously true, so one engine replaces the
//! family of near-duplicate per-variant search scripts.
//!
//! Evaluation short-circuits on the first failing clause. Clause order
//! never changes the result, only the cost, so the cheap single-pass scans
//! (bounds, membership, monotonicity, distinctness) run before the
//! contiguous-run search and the subset/superset set tests.
//!
//! All clauses operate on the *term view*: the first `search_first` terms
//! when a leading-terms cap is configured, the full list otherwise. The
//! view is a borrowed slice — the record's term order is never mutated, and
//! callers keep the uncapped list for display and sorting.

use std::collections::HashSet;

/// Monotonicity constraint over consecutive terms.
///
/// Empty and single-element views satisfy every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TermOrder {
    /// No constraint.
    #[default]
    Any,
    /// Every term is `>=` its predecessor.
    NonDescending,
    /// Every term is `>` its predecessor.
    StrictlyAscending,
    /// Every term is `<=` its predecessor.
    NonAscending,
    /// Every term is `<` its predecessor.
    StrictlyDescending,
}

impl TermOrder {
    /// Returns true if `terms` satisfies the constraint.
    #[must_use]
    pub fn holds(self, terms: &[i64]) -> bool {
        match self {
            Self::Any => true,
            Self::NonDescending => terms.windows(2).all(|w| w[1] >= w[0]),
            Self::StrictlyAscending => terms.windows(2).all(|w| w[1] > w[0]),
            Self::NonAscending => terms.windows(2).all(|w| w[1] <= w[0]),
            Self::StrictlyDescending => terms.windows(2).all(|w| w[1] < w[0]),
        }
    }
}

/// Reference term set for the bounded subset/superset predicates.
///
/// Built once per invocation from the full term list of a single looked-up
/// sequence. Order and multiplicity are irrelevant to the containment
/// tests, so only the value set and its maximum (the comparison cutoff)
/// are kept.
#[derive(Debug, Clone)]
pub struct ReferenceSet {
    values: HashSet<i64>,
    max: i64,
}

impl ReferenceSet {
    /// Builds a reference set; `None` for an empty term list.
    #[must_use]
    pub fn from_terms(terms: &[i64]) -> Option<Self> {
        let max = *terms.iter().max()?;
        Some(Self {
            values: terms.iter().copied().collect(),
            max,
        })
    }

    /// Largest value in the set — the cutoff for bounded comparison.
    #[must_use]
    pub const fn max(&self) -> i64 {
        self.max
    }

    /// Returns true if `value` is in the set.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        self.values.contains(&value)
    }

    /// Iterates the distinct values, in no particular order.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.values.iter().copied()
    }
}

/// Returns true if `needle` occurs as a contiguous run inside `haystack`.
///
/// The empty needle matches everything. Only exact, same-direction matches
/// count: no gaps, no reversal.
#[must_use]
pub fn is_slice_of(needle: &[i64], haystack: &[i64]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

/// Returns true if no value in `terms` repeats.
#[must_use]
pub fn all_distinct(terms: &[i64]) -> bool {
    let mut seen = HashSet::with_capacity(terms.len());
    terms.iter().all(|term| seen.insert(*term))
}

/// Bounded subset test: the view's values at or below the reference's
/// maximum must form a non-empty subset of the reference.
///
/// Values above `max(reference)` are beyond anything the reference could
/// constrain and are ignored. A view with *no* value at or below the
/// cutoff is not a meaningful subset and fails.
#[must_use]
pub fn is_bounded_subset(view: &[i64], reference: &ReferenceSet) -> bool {
    let mut any_in_range = false;
    for &term in view {
        if term <= reference.max() {
            if !reference.contains(term) {
                return false;
            }
            any_in_range = true;
        }
    }
    any_in_range
}

/// Bounded superset test — the mirror of [`is_bounded_subset`]: the
/// reference's values at or below the view's maximum must form a non-empty
/// subset of the view's values. An empty view fails.
#[must_use]
pub fn is_bounded_superset(view: &[i64], reference: &ReferenceSet) -> bool {
    let Some(&cutoff) = view.iter().max() else {
        return false;
    };
    let view_values: HashSet<i64> = view.iter().copied().collect();
    let mut any_in_range = false;
    for value in reference.values() {
        if value <= cutoff {
            if !view_values.contains(&value) {
                return false;
            }
            any_in_range = true;
        }
    }
    any_in_range
}

/// The full term-side query: a conjunction of optional clauses.
///
/// `Default` is the match-all query (every clause unset).
#[derive(Debug, Clone, Default)]
pub struct TermQuery {
    /// Terms that must each appear somewhere in the view (order irrelevant).
    pub required: Vec<i64>,
    /// Run that must appear contiguously and in order.
    pub consecutive: Vec<i64>,
    /// Terms that must not appear anywhere in the view.
    pub forbidden: Vec<i64>,
    /// Inclusive lower bound on every term in the view.
    pub lower: Option<i64>,
    /// Inclusive upper bound on every term in the view.
    pub upper: Option<i64>,
    /// Monotonicity constraint.
    pub order: TermOrder,
    /// Require all terms in the view to be distinct.
    pub distinct: bool,
    /// Bounded-subset reference.
    pub subset_of: Option<ReferenceSet>,
    /// Bounded-superset reference.
    pub superset_of: Option<ReferenceSet>,
    /// How many leading terms participate in matching (0 = all).
    pub search_first: usize,
}

impl TermQuery {
    /// Returns the term view: the first `search_first` terms, or the whole
    /// slice when no cap is set.
    #[must_use]
    pub fn view<'a>(&self, terms: &'a [i64]) -> &'a [i64] {
        if self.search_first == 0 {
            terms
        } else {
            &terms[..terms.len().min(self.search_first)]
        }
    }

    /// Evaluates the conjunction against one record's terms.
    ///
    /// An empty view fails any configured bound, subset, or superset
    /// clause (a sequence with no terms in play cannot meaningfully
    /// satisfy them) and vacuously passes everything else.
    #[must_use]
    pub fn matches(&self, terms: &[i64]) -> bool {
        let view = self.view(terms);

        if let Some(lower) = self.lower {
            if view.iter().min().is_none_or(|&m| m < lower) {
                return false;
            }
        }
        if let Some(upper) = self.upper {
            if view.iter().max().is_none_or(|&m| m > upper) {
                return false;
            }
        }
        if !self.required.iter().all(|term| view.contains(term)) {
            return false;
        }
        if self.forbidden.iter().any(|term| view.contains(term)) {
            return false;
        }
        if !self.order.holds(view) {
            return false;
        }
        if self.distinct && !all_distinct(view) {
            return false;
        }
        if !is_slice_of(&self.consecutive, view) {
            return false;
        }
        if let Some(reference) = &self.subset_of {
            if !is_bounded_subset(view, reference) {
                return false;
            }
        }
        if let Some(reference) = &self.superset_of {
            if !is_bounded_superset(view, reference) {
                return false;
            }
        }
        true
    }
}
