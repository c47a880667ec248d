// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/oeis-search)

//! Reader for the terms dump.
//!
//! Record syntax, one per non-comment line:
//!
//! ```text
//! # comment
//! A000045 ,0,1,1,2,3,5,8,13,21,
//! ```
//!
//! The term body is comma-wrapped and holds at least one optionally
//! negative decimal integer.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{DumpError, DumpKind};
use crate::common::seq_id::SequenceId;

/// One record of the terms file.
///
/// The comma-separated term body is kept as text until
/// [`TermsRecord::parse_terms`] is called: most records are discarded by the
/// identifier filter without their terms ever being needed, and skipping
/// the split for those dominates a full-catalog scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermsRecord {
    /// Catalog identifier.
    pub id: SequenceId,
    raw: String,
}

impl TermsRecord {
    /// Materializes the term list, preserving file order.
    ///
    /// The body shape was validated at read time, so the only possible
    /// failure is a term outside the `i64` range, reported as
    /// [`DumpError::TermRange`].
    pub fn parse_terms(&self) -> Result<Vec<i64>, DumpError> {
        self.raw
            .split(',')
            .map(|token| {
                token.parse::<i64>().map_err(|_| DumpError::TermRange {
                    id: self.id,
                    term: token.to_string(),
                })
            })
            .collect()
    }
}

/// Parses one non-comment terms line.
///
/// Grammar: identifier, single space, then `,t1,t2,...,tN,` with N ≥ 1 and
/// every `tK` an optionally negative run of ASCII digits. Returns `None`
/// when the line does not match.
#[must_use]
pub fn parse_terms_line(line: &str) -> Option<TermsRecord> {
    let (id_text, body) = line.split_once(' ')?;
    let id = id_text.parse().ok()?;
    let body = body.strip_prefix(',')?.strip_suffix(',')?;
    if body.is_empty() || !body.split(',').all(is_integer_token) {
        return None;
    }
    Some(TermsRecord {
        id,
        raw: body.to_string(),
    })
}

/// Returns true for a non-empty, optionally negative run of ASCII digits.
fn is_integer_token(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Streaming reader over a terms dump.
///
/// Yields one [`TermsRecord`] per non-comment line, in file order. A line
/// that fails the grammar yields an `Err` item; callers abort on the first
/// error rather than resynchronizing.
#[derive(Debug)]
pub struct TermsReader<R> {
    reader: R,
    line_number: usize,
    buf: String,
}

impl TermsReader<BufReader<File>> {
    /// Opens a terms dump on disk.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> TermsReader<R> {
    /// Wraps any buffered reader; tests use in-memory cursors.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for TermsReader<R> {
    type Item = Result<TermsRecord, DumpError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_number += 1;
            let line = self.buf.trim_end_matches(['\n', '\r']);
            if line.starts_with('#') {
                continue;
            }
            return Some(parse_terms_line(line).ok_or_else(|| DumpError::Syntax {
                kind: DumpKind::Terms,
                line_number: self.line_number,
                line: line.to_string(),
            }));
        }
    }
}
