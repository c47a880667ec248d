// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tom F. (https://github.com/tomtom215/oeis-search)

//! Command-line entry point: argument parsing and validation, then one
//! search run. All range/shape checks happen here — the library trusts the
//! config it receives. Any failure prints a one-line message and exits
//! non-zero.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, ensure, Context, Result};
use clap::{Parser, ValueEnum};

use oeis_search::common::seq_id::{SequenceId, MAX_SEQ_NUMBER};
use oeis_search::filter::{IdConstraint, NameFilter};
use oeis_search::output::{write_hit, ConsoleStatus, OutputFormat, SortKey};
use oeis_search::predicate::{TermOrder, TermQuery};
use oeis_search::search::{run_search, SearchConfig};

/// Search offline dumps of the OEIS for sequences that match all specified
/// criteria.
#[derive(Debug, Parser)]
#[command(name = "oeis-search", version, about)]
struct Cli {
    /// Smallest admissible identifier number.
    #[arg(long, default_value_t = 0)]
    minanum: u32,

    /// Largest admissible identifier number.
    #[arg(long, default_value_t = MAX_SEQ_NUMBER)]
    maxanum: u32,

    /// Identifier prefix such as 'A0004' (alternative to --minanum/--maxanum).
    #[arg(long, conflicts_with_all = ["minanum", "maxanum"])]
    anum_prefix: Option<String>,

    /// Case-insensitive substring the description must contain.
    #[arg(long, default_value = "")]
    descr: String,

    /// Match against only the first N terms (0 = all).
    #[arg(long, default_value_t = 0)]
    searchfirst: usize,

    /// Comma-separated terms that must all appear, in any order.
    #[arg(long, default_value = "")]
    terms: String,

    /// Comma-separated run that must appear contiguously, in order.
    #[arg(long, default_value = "")]
    consec: String,

    /// Comma-separated terms that must not appear.
    #[arg(long, default_value = "")]
    noterms: String,

    /// Inclusive lower bound on term values.
    #[arg(long)]
    lower: Option<i64>,

    /// Inclusive upper bound on term values.
    #[arg(long)]
    upper: Option<i64>,

    /// Required term order.
    #[arg(long, value_enum, default_value_t = TermOrderArg::Y)]
    termorder: TermOrderArg,

    /// Require all matched terms to be distinct.
    #[arg(long)]
    distinct: bool,

    /// Identifier whose terms the candidate must be a bounded subset of.
    #[arg(long)]
    subset_of: Option<SequenceId>,

    /// Identifier whose terms the candidate must be a bounded superset of.
    #[arg(long)]
    superset_of: Option<SequenceId>,

    /// Result order.
    #[arg(long, value_enum, default_value_t = SortArg::A)]
    sort: SortArg,

    /// Output layout.
    #[arg(long, value_enum, default_value_t = FormatArg::M)]
    format: FormatArg,

    /// Print only the first N terms of each result (0 = all).
    #[arg(long, default_value_t = 0)]
    printfirst: usize,

    /// Suppress status output.
    #[arg(long)]
    quiet: bool,

    /// Path to the names dump.
    #[arg(long, default_value = "names")]
    namefile: PathBuf,

    /// Path to the terms dump.
    #[arg(long, default_value = "stripped")]
    termfile: PathBuf,
}

/// `--termorder` choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TermOrderArg {
    /// Any order.
    Y,
    /// Nondescending: each term >= its predecessor.
    A,
    /// Strictly ascending.
    Sa,
    /// Nonascending: each term <= its predecessor.
    D,
    /// Strictly descending.
    Sd,
}

impl From<TermOrderArg> for TermOrder {
    fn from(arg: TermOrderArg) -> Self {
        match arg {
            TermOrderArg::Y => Self::Any,
            TermOrderArg::A => Self::NonDescending,
            TermOrderArg::Sa => Self::StrictlyAscending,
            TermOrderArg::D => Self::NonAscending,
            TermOrderArg::Sd => Self::StrictlyDescending,
        }
    }
}

/// `--sort` choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortArg {
    /// By identifier.
    A,
    /// By description (case-insensitive, uppercase first on ties).
    D,
    /// By term list.
    T,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::A => Self::Anum,
            SortArg::D => Self::Description,
            SortArg::T => Self::Terms,
        }
    }
}

/// `--format` choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Identifier + description line, terms line, blank line.
    M,
    /// Single line: identifier, description, terms.
    Adt,
    /// Single line: identifier, description.
    Ad,
    /// Single line: identifier, terms.
    At,
    /// Identifier only.
    A,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::M => Self::Multiline,
            FormatArg::Adt => Self::IdDescriptionTerms,
            FormatArg::Ad => Self::IdDescription,
            FormatArg::At => Self::IdTerms,
            FormatArg::A => Self::IdOnly,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    ensure!(
        cli.minanum <= MAX_SEQ_NUMBER && cli.maxanum <= MAX_SEQ_NUMBER,
        "identifier numbers cannot exceed {MAX_SEQ_NUMBER}"
    );
    ensure!(
        cli.minanum <= cli.maxanum,
        "value of --maxanum must be greater than or equal to value of --minanum"
    );

    let ids = match cli.anum_prefix {
        Some(prefix) => {
            ensure!(
                is_valid_prefix(&prefix),
                "value of --anum-prefix must be 'A' followed by up to six digits"
            );
            IdConstraint::Prefix(prefix)
        }
        None => IdConstraint::Range {
            min: cli.minanum,
            max: cli.maxanum,
        },
    };

    let query = TermQuery {
        required: parse_int_list(&cli.terms).context("value of --terms argument is not valid")?,
        consecutive: parse_int_list(&cli.consec)
            .context("value of --consec argument is not valid")?,
        forbidden: parse_int_list(&cli.noterms)
            .context("value of --noterms argument is not valid")?,
        lower: cli.lower,
        upper: cli.upper,
        order: cli.termorder.into(),
        distinct: cli.distinct,
        subset_of: None,
        superset_of: None,
        search_first: cli.searchfirst,
    };

    let config = SearchConfig {
        name_file: cli.namefile,
        term_file: cli.termfile,
        filter: NameFilter::new(&cli.descr, ids),
        query,
        subset_of: cli.subset_of,
        superset_of: cli.superset_of,
        sort: cli.sort.into(),
        format: cli.format.into(),
        print_first: cli.printfirst,
    };

    let mut status = ConsoleStatus { quiet: cli.quiet };
    let hits = run_search(&config, &mut status)?;

    let mut out = BufWriter::new(io::stdout().lock());
    for hit in &hits {
        write_hit(&mut out, hit, config.format, config.print_first)?;
    }
    out.flush()?;
    Ok(())
}

/// Parses a comma-separated list of integers; empty input is the empty
/// list. Whitespace is not tolerated, matching the dump grammar.
fn parse_int_list(text: &str) -> Result<Vec<i64>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| anyhow!("'{token}' is not an integer"))
        })
        .collect()
}

/// A prefix is the family letter optionally followed by up to six digits.
fn is_valid_prefix(prefix: &str) -> bool {
    let bytes = prefix.as_bytes();
    match bytes.split_first() {
        Some((first, digits)) => {
            first.eq_ignore_ascii_case(&b'A')
                && digits.len() <= 6
                && digits.iter().all(u8::is_ascii_digit)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_list() {
        assert_eq!(parse_int_list("").unwrap(), Vec::<i64>::new());
        assert_eq!(parse_int_list("1,-2,3").unwrap(), vec![1, -2, 3]);
        assert!(parse_int_list("1, 2").is_err()); // no whitespace tolerated
        assert!(parse_int_list("1,,2").is_err());
        assert!(parse_int_list("x").is_err());
    }

    #[test]
    fn test_is_valid_prefix() {
        assert!(is_valid_prefix("A"));
        assert!(is_valid_prefix("a00"));
        assert!(is_valid_prefix("A000123"));
        assert!(!is_valid_prefix(""));
        assert!(!is_valid_prefix("B12"));
        assert!(!is_valid_prefix("A0001234")); // seven digits
        assert!(!is_valid_prefix("A12x"));
    }

    #[test]
    fn test_cli_parses_defaults() {
        let cli = Cli::parse_from(["oeis-search"]);
        assert_eq!(cli.minanum, 0);
        assert_eq!(cli.maxanum, MAX_SEQ_NUMBER);
        assert_eq!(cli.termorder, TermOrderArg::Y);
        assert_eq!(cli.sort, SortArg::A);
        assert_eq!(cli.format, FormatArg::M);
        assert_eq!(cli.namefile, PathBuf::from("names"));
        assert_eq!(cli.termfile, PathBuf::from("stripped"));
    }

    #[test]
    fn test_cli_parses_full_invocation() {
        let cli = Cli::parse_from([
            "oeis-search",
            "--descr",
            "prime",
            "--terms",
            "2,3",
            "--consec",
            "5,7",
            "--noterms",
            "4",
            "--lower",
            "0",
            "--termorder",
            "sa",
            "--distinct",
            "--subset-of",
            "A000040",
            "--sort",
            "d",
            "--format",
            "adt",
            "--printfirst",
            "10",
            "--quiet",
        ]);
        assert_eq!(cli.termorder, TermOrderArg::Sa);
        assert_eq!(cli.subset_of.unwrap().to_string(), "A000040");
        assert!(cli.distinct);
        assert!(cli.quiet);
    }

    #[test]
    fn test_cli_prefix_conflicts_with_range() {
        let result = Cli::try_parse_from([
            "oeis-search",
            "--anum-prefix",
            "A0001",
            "--minanum",
            "5",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_bad_reference_id() {
        let result = Cli::try_parse_from(["oeis-search", "--subset-of", "A12"]);
        assert!(result.is_err());
    }
}
