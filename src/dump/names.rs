// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/oeis-search)

//! Reader for the names dump.
//!
//! Record syntax, one per non-comment line:
//!
//! ```text
//! # comment
//! A000045 Fibonacci numbers: F(n) = F(n-1) + F(n-2) with F(0) = 0 and F(1) = 1.
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{DumpError, DumpKind};
use crate::common::seq_id::SequenceId;

/// One record of the names file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRecord {
    /// Catalog identifier.
    pub id: SequenceId,
    /// Free-text description, verbatim from the file.
    pub description: String,
}

/// Parses one non-comment names line.
///
/// Grammar: a seven-character identifier, a single space, then a non-empty
/// description running to the end of the line. Returns `None` when the line
/// does not match.
#[must_use]
pub fn parse_names_line(line: &str) -> Option<NameRecord> {
    let (id_text, description) = line.split_once(' ')?;
    let id = id_text.parse().ok()?;
    if description.is_empty() {
        return None;
    }
    Some(NameRecord {
        id,
        description: description.to_string(),
    })
}

/// Streaming reader over a names dump.
///
/// Yields one [`NameRecord`] per non-comment line, in file order. A line
/// that fails the grammar yields an `Err` item; callers abort on the first
/// error rather than resynchronizing.
#[derive(Debug)]
pub struct NamesReader<R> {
    reader: R,
    line_number: usize,
    buf: String,
}

impl NamesReader<BufReader<File>> {
    /// Opens a names dump on disk.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> NamesReader<R> {
    /// Wraps any buffered reader; tests use in-memory cursors.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for NamesReader<R> {
    type Item = Result<NameRecord, DumpError>;

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
            return Some(parse_names_line(line).ok_or_else(|| DumpError::Syntax {
                kind: DumpKind::Names,
                line_number: self.line_number,
                line: line.to_string(),
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_all(input: &str) -> Vec<Result<NameRecord, DumpError>> {
        NamesReader::new(Cursor::new(input)).collect()
    }

    #[test]
    fn test_parse_line_basic() {
        let record = parse_names_line("A000045 Fibonacci numbers").unwrap();
        assert_eq!(record.id.to_string(), "A000045");
        assert_eq!(record.description, "Fibonacci numbers");
    }

    #[test]
    fn test_parse_line_keeps_extra_spaces() {
        // Everything after the first separator space belongs to the description.
        let record = parse_names_line("A000045  doubled space").unwrap();
        assert_eq!(record.description, " doubled space");
    }

    #[test]
    fn test_parse_line_lowercase_id() {
        let record = parse_names_line("a000045 Fibonacci numbers").unwrap();
        assert_eq!(record.id.to_string(), "A000045");
    }

    #[test]
    fn test_parse_line_rejects_bad_shapes() {
        assert!(parse_names_line("").is_none());
        assert!(parse_names_line("A000045").is_none()); // no description
        assert!(parse_names_line("A000045 ").is_none()); // empty description
        assert!(parse_names_line("A00045 short id").is_none());
        assert!(parse_names_line("X000045 wrong family").is_none());
    }

    #[test]
    fn test_reader_skips_comments() {
        let records = read_all("# header\nA000001 First\n# middle\nA000002 Second\n");
        let records: Vec<_> = records.into_iter().map(Result::unwrap).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description, "First");
        assert_eq!(records[1].description, "Second");
    }

    #[test]
    fn test_reader_reports_offending_line() {
        let records = read_all("A000001 ok\nnot a record\n");
        assert!(records[0].is_ok());
        match &records[1] {
            Err(DumpError::Syntax {
                kind,
                line_number,
                line,
            }) => {
                assert_eq!(*kind, DumpKind::Names);
                assert_eq!(*line_number, 2);
                assert_eq!(line, "not a record");
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_reader_counts_comment_lines() {
        // Line numbers refer to the file, comments included.
        let records = read_all("# one\n# two\nbroken\n");
        match &records[0] {
            Err(DumpError::Syntax { line_number, .. }) => assert_eq!(*line_number, 3),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_reader_handles_crlf() {
        let records = read_all("A000001 First\r\nA000002 Second\r\n");
        let records: Vec<_> = records.into_iter().map(Result::unwrap).collect();
        assert_eq!(records[0].description, "First");
        assert_eq!(records[1].description, "Second");
    }

    #[test]
    fn test_reader_empty_input() {
        assert!(read_all("").is_empty());
    }

    #[test]
    fn test_reader_missing_trailing_newline() {
        let records = read_all("A000001 no newline");
        assert_eq!(records[0].as_ref().unwrap().description, "no newline");
    }

    #[test]
    fn test_open_reads_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# OEIS names").unwrap();
        writeln!(file, "A000040 The prime numbers.").unwrap();
        let records: Vec<_> = NamesReader::open(file.path())
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "The prime numbers.");
    }
}
