//! CSV ingestion for numeric training data.
//!
//! Supported format:
//! - UTF-8, comma-separated
//! - Optional header row (auto-detected: first row is a header if it contains
//!   any non-numeric, non-empty cell)
//! - Double-quoted fields with embedded commas are handled correctly
//! - Blank lines are skipped
//!
//! Every data row must have the same number of columns. The last column is the
//! target; everything before it is the feature window.

use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvParseError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("row {row}: '{cell}' is not a valid number")]
    InvalidNumber { row: usize, cell: String },
    #[error("row {row}: {actual} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("rows need at least 2 columns (features + target), got {0}")]
    TooFewColumns(usize),
    #[error("CSV contains no data rows")]
    Empty,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reads and parses a CSV file.
pub fn read_rows<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<f64>>, CsvParseError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| CsvParseError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_rows(&text)
}

/// Parses CSV text into equally sized numeric rows.
pub fn parse_rows(text: &str) -> Result<Vec<Vec<f64>>, CsvParseError> {
    let mut lines = text.lines().peekable();

    if let Some(first) = lines.peek() {
        if is_header(first) {
            lines.next();
        }
    }

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (row_idx, line) in lines.enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let cells = parse_csv_row(line);
        let row = parse_floats(&cells, row_idx + 1)?;

        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(CsvParseError::RaggedRow {
                    row: row_idx + 1,
                    expected: first.len(),
                    actual: row.len(),
                });
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(CsvParseError::Empty);
    }
    Ok(rows)
}

/// Splits rows into `(features, targets)` on the last column; each target is a
/// one-element vector, ready for a single-output network.
pub fn split_target(rows: &[Vec<f64>]) -> Result<(Vec<Vec<f64>>, Vec<Vec<f64>>), CsvParseError> {
    let width = rows.first().map(Vec::len).ok_or(CsvParseError::Empty)?;
    if width < 2 {
        return Err(CsvParseError::TooFewColumns(width));
    }
    let features = rows.iter().map(|r| r[..width - 1].to_vec()).collect();
    let targets = rows.iter().map(|r| vec![r[width - 1]]).collect();
    Ok((features, targets))
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Returns `true` if the row looks like a header (any cell non-numeric).
fn is_header(line: &str) -> bool {
    let cells = parse_csv_row(line);
    cells.iter().any(|c| {
        let t = c.trim();
        !t.is_empty() && t.parse::<f64>().is_err()
    })
}

/// Parses a single CSV row, handling double-quoted fields.
fn parse_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn parse_floats(cells: &[String], row: usize) -> Result<Vec<f64>, CsvParseError> {
    cells
        .iter()
        .map(|c| {
            c.trim().parse::<f64>().map_err(|_| CsvParseError::InvalidNumber {
                row,
                cell: c.clone(),
            })
        })
        .collect()
}
