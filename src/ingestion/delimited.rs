//! Delimited-text (CSV/TSV-like) ingestion.
//!
//! This is intentionally looser than RFC 4180: every comma or tab is a field separator, there is no
//! quoting or escaping, and header/data lines may mix both separators.

use std::fs;
use std::path::Path;

use crate::error::DeckResult;
use crate::types::{Row, Table};

/// Read a delimited file from disk and parse it with [`parse_delimited_str`].
pub fn ingest_delimited_from_path(path: impl AsRef<Path>) -> DeckResult<Table> {
    let text = fs::read_to_string(path)?;
    Ok(parse_delimited_str(&text))
}

/// Parse delimited text into a [`Table`].
///
/// Rules:
///
/// - Lines are split on `\n` (with an optional preceding `\r`), trimmed, and blank lines dropped.
/// - The first remaining line is the header; header fields are trimmed.
/// - Data fields are kept verbatim (not trimmed).
/// - Rows shorter than the header are padded with `""`; extra fields are ignored.
///
/// Input with no non-blank lines yields an empty table (the "no data" condition), not an error.
pub fn parse_delimited_str(input: &str) -> Table {
    let mut lines = input.lines().map(str::trim).filter(|l| !l.is_empty());

    let Some(header_line) = lines.next() else {
        return Table::default();
    };

    let columns: Vec<String> = split_fields(header_line)
        .map(|h| h.trim().to_owned())
        .collect();

    let rows = lines
        .map(|line| {
            let values: Vec<&str> = split_fields(line).collect();
            Row::from_positional(&columns, &values)
        })
        .collect();

    Table::new(columns, rows)
}

fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split([',', '\t'])
}
