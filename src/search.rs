//! Search pipeline: streaming passes over the dumps plus the final join.
//!
//! The pipeline is single-threaded and synchronous: each stage is one
//! sequential pass over a dump, and a record that fails a filter is dropped
//! the moment the decision is made — only matches are retained until
//! output. Stage functions are generic over any `BufRead`-backed reader so
//! the whole pipeline is testable against in-memory sources; [`run_search`]
//! wires them to the files named by the config.
//!
//! Pass structure (mirroring the dump layout — descriptions and terms live
//! in different files):
//!
//! 1. terms pass(es) to resolve subset/superset references, when configured,
//! 2. names pass → identifiers accepted by the [`NameFilter`],
//! 3. terms pass → surviving records with their full term lists,
//! 4. names pass again → descriptions for exactly the survivors,
//! 5. sort.
//!
//! Attaching descriptions in a second pass instead of caching them in pass
//! 1 keeps memory proportional to the result set, not the catalog.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::common::seq_id::SequenceId;
use crate::dump::names::NamesReader;
use crate::dump::terms::TermsReader;
use crate::dump::DumpError;
use crate::filter::NameFilter;
use crate::output::{OutputFormat, SortKey, StatusSink};
use crate::predicate::{ReferenceSet, TermQuery};

/// Everything one invocation needs, pre-validated by the caller.
///
/// The library trusts these values: enumerated choices are already one of
/// the allowed variants and numeric fields are shape-checked by the CLI
/// layer before this struct is built.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Path to the names dump.
    pub name_file: PathBuf,
    /// Path to the terms dump.
    pub term_file: PathBuf,
    /// Description/identifier filter for the first pass.
    pub filter: NameFilter,
    /// Term-side query. Leave `subset_of`/`superset_of` unset here;
    /// [`run_search`] resolves them from the reference identifiers below.
    pub query: TermQuery,
    /// Identifier whose terms bound the subset test.
    pub subset_of: Option<SequenceId>,
    /// Identifier whose terms bound the superset test.
    pub superset_of: Option<SequenceId>,
    /// Result ordering.
    pub sort: SortKey,
    /// Output layout.
    pub format: OutputFormat,
    /// How many leading terms to render (0 = all).
    pub print_first: usize,
}

/// One surviving sequence with its full (uncapped) term list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Catalog identifier.
    pub id: SequenceId,
    /// Description from the names dump.
    pub description: String,
    /// Full term list, in file order.
    pub terms: Vec<i64>,
}

/// Error produced by the pipeline.
#[derive(Debug)]
#[non_exhaustive]
pub enum SearchError {
    /// Reading or parsing a dump failed.
    Dump(DumpError),
    /// Opening a dump file failed.
    Open {
        /// The file that could not be opened.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// A subset/superset reference identifier has no terms record.
    ReferenceNotFound(SequenceId),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dump(e) => write!(f, "{e}"),
            Self::Open { path, source } => {
                write!(f, "cannot open '{}': {source}", path.display())
            }
            Self::ReferenceNotFound(id) => {
                write!(f, "reference sequence {id} has no record in the terms file")
            }
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dump(e) => Some(e),
            Self::Open { source, .. } => Some(source),
            Self::ReferenceNotFound(_) => None,
        }
    }
}

impl From<DumpError> for SearchError {
    fn from(e: DumpError) -> Self {
        Self::Dump(e)
    }
}

/// First pass: identifiers whose name record passes the filter.
pub fn filter_names<R: BufRead>(
    reader: NamesReader<R>,
    filter: &NameFilter,
) -> Result<HashSet<SequenceId>, SearchError> {
    let mut accepted = HashSet::new();
    for record in reader {
        let record = record?;
        if filter.accepts(record.id, &record.description) {
            accepted.insert(record.id);
        }
    }
    Ok(accepted)
}

/// Scans the terms dump for one identifier and materializes its term set.
///
/// Resolves a subset/superset reference before the main pass. A missing
/// identifier is a configuration error, reported once rather than per
/// candidate.
pub fn resolve_reference<R: BufRead>(
    reader: TermsReader<R>,
    id: SequenceId,
) -> Result<ReferenceSet, SearchError> {
    for record in reader {
        let record = record?;
        if record.id == id {
            let terms = record.parse_terms()?;
            return ReferenceSet::from_terms(&terms).ok_or(SearchError::ReferenceNotFound(id));
        }
    }
    Err(SearchError::ReferenceNotFound(id))
}

/// Main pass: records accepted by the name filter whose term view passes
/// the query.
///
/// Returns full term lists keyed by id. On a duplicate id (malformed but
/// tolerated) the last record wins.
pub fn filter_terms<R: BufRead>(
    reader: TermsReader<R>,
    accepted: &HashSet<SequenceId>,
    query: &TermQuery,
) -> Result<BTreeMap<SequenceId, Vec<i64>>, SearchError> {
    let mut matches = BTreeMap::new();
    for record in reader {
        let record = record?;
        if !accepted.contains(&record.id) {
            continue;
        }
        let terms = record.parse_terms()?;
        if query.matches(&terms) {
            matches.insert(record.id, terms);
        }
    }
    Ok(matches)
}

/// Second names pass: attaches descriptions to exactly the survivors.
pub fn attach_descriptions<R: BufRead>(
    reader: NamesReader<R>,
    matches: BTreeMap<SequenceId, Vec<i64>>,
) -> Result<Vec<SearchHit>, SearchError> {
    let mut hits: BTreeMap<SequenceId, SearchHit> = matches
        .into_iter()
        .map(|(id, terms)| {
            (
                id,
                SearchHit {
                    id,
                    description: String::new(),
                    terms,
                },
            )
        })
        .collect();
    for record in reader {
        let record = record?;
        if let Some(hit) = hits.get_mut(&record.id) {
            hit.description = record.description;
        }
    }
    Ok(hits.into_values().collect())
}

/// Runs the whole pipeline against the files named by `config`.
///
/// Progress lines go to `status`; the returned hits are already sorted by
/// the configured key.
pub fn run_search(
    config: &SearchConfig,
    status: &mut dyn StatusSink,
) -> Result<Vec<SearchHit>, SearchError> {
    let mut query = config.query.clone();
    if let Some(id) = config.subset_of {
        status.status(&format!("Resolving reference '{id}'..."));
        query.subset_of = Some(resolve_reference(open_terms(&config.term_file)?, id)?);
    }
    if let Some(id) = config.superset_of {
        status.status(&format!("Resolving reference '{id}'..."));
        query.superset_of = Some(resolve_reference(open_terms(&config.term_file)?, id)?);
    }

    status.status(&format!("Searching '{}'...", config.name_file.display()));
    let accepted = filter_names(open_names(&config.name_file)?, &config.filter)?;

    status.status(&format!("Searching '{}'...", config.term_file.display()));
    let matches = filter_terms(open_terms(&config.term_file)?, &accepted, &query)?;
    drop(accepted);

    status.status(&format!("Found {} sequence(s).", matches.len()));
    status.status("");

    let mut hits = attach_descriptions(open_names(&config.name_file)?, matches)?;
    crate::output::sort_hits(&mut hits, config.sort);
    Ok(hits)
}

fn open_names(path: &Path) -> Result<NamesReader<BufReader<File>>, SearchError> {
    NamesReader::open(path).map_err(|source| SearchError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn open_terms(path: &Path) -> Result<TermsReader<BufReader<File>>, SearchError> {
    TermsReader::open(path).map_err(|source| SearchError::Open {
        path: path.to_path_buf(),
        source,
    })
}
