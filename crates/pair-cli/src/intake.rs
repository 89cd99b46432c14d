//! Input intake: upload validation and CSV lexing.
//!
//! The engine takes rows of raw text fields. Everything lexical (delimiters,
//! quoting, blank lines) is handled here.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Largest accepted input, in bytes.
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum IntakeError {
    #[error("input file must be a CSV file: {0}")]
    NotCsv(String),

    #[error("the input is empty, please supply a CSV file with employee records")]
    EmptyFile,

    #[error("input exceeds the size limit of {limit} bytes")]
    TooLarge { limit: u64 },
}

/// Read the whole input, from `path` or stdin, enforcing the upload rules.
pub fn read_input(path: Option<&Path>, max_bytes: u64) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match path {
        Some(path) => {
            check_extension(path)?;
            let file = File::open(path)
                .with_context(|| format!("Failed to open file: {}", path.display()))?;
            file.take(max_bytes.saturating_add(1))
                .read_to_end(&mut buf)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
        }
        None => {
            io::stdin()
                .take(max_bytes.saturating_add(1))
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
        }
    }
    check_size(buf.len() as u64, max_bytes)?;
    debug!(bytes = buf.len(), "read input");
    Ok(buf)
}

/// Only `.csv` files are accepted, in any letter case.
pub fn check_extension(path: &Path) -> std::result::Result<(), IntakeError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        Ok(())
    } else {
        Err(IntakeError::NotCsv(path.display().to_string()))
    }
}

pub fn check_size(size: u64, max_bytes: u64) -> std::result::Result<(), IntakeError> {
    if size == 0 {
        return Err(IntakeError::EmptyFile);
    }
    if size > max_bytes {
        return Err(IntakeError::TooLarge { limit: max_bytes });
    }
    Ok(())
}

/// Split CSV content into rows of trimmed fields.
///
/// No header handling happens here; the engine detects a header row itself.
/// Rows may have differing lengths. Blank rows are skipped. Invalid UTF-8 is
/// replaced with U+FFFD, so a bad field only spoils its own row.
pub fn read_rows(content: &[u8], delimiter: u8) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(delimiter)
        .from_reader(content);

    let mut rows = Vec::new();
    for (index, result) in reader.byte_records().enumerate() {
        let record = result.with_context(|| format!("Failed to parse CSV row {}", index + 1))?;
        if record.iter().all(<[u8]>::is_empty) {
            continue;
        }
        if std::str::from_utf8(record.as_slice()).is_err() {
            debug!(row = index + 1, "replacing invalid UTF-8 in CSV row");
        }
        rows.push(
            record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect(),
        );
    }
    Ok(rows)
}
