//! # `oeis_search` — offline search over OEIS dump files
//!
//! Searches the two flat dump files published by the OEIS — `names`
//! (identifier → description) and `stripped` (identifier → terms) — and
//! prints the sequences matching *every* specified criterion. One
//! configurable engine replaces the family of near-duplicate search
//! scripts: each criterion is an optional clause of a single evaluated
//! conjunction.
//!
//! ## Criteria
//!
//! | Criterion | Side | Description |
//! |-----------|------|-------------|
//! | id range / prefix | names | numeric `[min,max]` or canonical-form prefix |
//! | description substring | names | case-insensitive containment |
//! | required terms | terms | each must appear somewhere, any order |
//! | consecutive run | terms | must appear contiguously, in order |
//! | forbidden terms | terms | none may appear |
//! | lower / upper bound | terms | inclusive bounds on term values |
//! | term order | terms | four monotonicity variants, or any |
//! | distinct | terms | no repeated term values |
//! | subset / superset of | terms | bounded containment vs. a reference sequence |
//! | search-first cap | terms | only the first N terms participate |
//!
//! ## Shape
//!
//! Dump readers are lazy (one record at a time), the pipeline makes one
//! sequential pass per stage, and nothing is retained for records that
//! fail a filter — a full-catalog search runs in memory proportional to
//! the result set. A malformed dump line aborts the run with the offending
//! line echoed; no partial results are produced.

pub mod common;
pub mod dump;
pub mod filter;
pub mod output;
pub mod predicate;
pub mod search;
