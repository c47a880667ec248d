// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/oeis-search)

//! Streaming readers for the two offline dump files.
//!
//! The catalog ships as two flat text files: a *names* file mapping each
//! identifier to a free-text description, and a *terms* file mapping each
//! identifier to its known terms. Both use `#` comment lines and one record
//! per line.
//!
//! The readers are lazy — one record is materialized at a time — so a full
//! catalog scan runs in constant memory regardless of dump size. A
//! non-comment line that does not match the expected grammar is a fatal
//! error carrying the offending line verbatim: a malformed dump is
//! untrustworthy as a whole, so no partial results are produced.
//!
//! Each line grammar is an explicit function returning `Option<Record>`
//! (`parse_names_line`, `parse_terms_line`), kept separate from the
//! iteration machinery so the grammar itself is directly testable.

pub mod names;
pub mod terms;

use std::fmt;
use std::io;

use crate::common::seq_id::SequenceId;

/// Which dump file a record or error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpKind {
    /// The id → description file (conventionally `names`).
    Names,
    /// The id → terms file (conventionally `stripped`).
    Terms,
}

impl fmt::Display for DumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Names => write!(f, "names file"),
            Self::Terms => write!(f, "terms file"),
        }
    }
}

/// Error produced while reading a dump file.
#[derive(Debug)]
#[non_exhaustive]
pub enum DumpError {
    /// Underlying I/O failure.
    Io(io::Error),
    /// A non-comment line did not match the file's grammar.
    Syntax {
        /// Which file the line came from.
        kind: DumpKind,
        /// 1-based line number.
        line_number: usize,
        /// The offending line, verbatim (without the trailing newline).
        line: String,
    },
    /// A term was syntactically valid but does not fit in an `i64`.
    TermRange {
        /// The sequence the term belongs to.
        id: SequenceId,
        /// The term text as it appeared in the file.
        term: String,
    },
}

impl fmt::Display for DumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "dump read failed: {e}"),
            Self::Syntax {
                kind,
                line_number,
                line,
            } => write!(f, "syntax error in {kind} at line {line_number}: {line}"),
            Self::TermRange { id, term } => {
                write!(f, "term {term} of {id} does not fit in a 64-bit integer")
            }
        }
    }
}

impl std::error::Error for DumpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Syntax { .. } | Self::TermRange { .. } => None,
        }
    }
}

impl From<io::Error> for DumpError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
