//! Delimited-file loading.
//!
//! The first record is the header. Every other cell goes through
//! [`Value::coerce`], so numeric-looking text becomes a number and everything
//! else (including empty cells) stays text.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use log::info;
use thiserror::Error;

use crate::value::{Row, Value};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("malformed delimited data: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected at most {expected} fields, found {found}")]
    RowLength {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("input has no header line")]
    EmptyInput,
}

/// How to split the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Single-byte field separator
    pub delimiter: u8,
    /// Strip surrounding whitespace from cells too; header names are
    /// always trimmed
    pub trim: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            delimiter: b',',
            trim: false,
        }
    }
}

/// Loaded rows plus the header order they were read with.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn has_field(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }
}

/// Load a delimited file from disk.
pub fn load_csv<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let dataset = read_csv(file, options)?;
    info!(
        "loaded {} rows with {} fields from {}",
        dataset.rows.len(),
        dataset.headers.len(),
        path.display()
    );
    Ok(dataset)
}

/// Read delimited data from any reader.
///
/// Rows shorter than the header simply lack the trailing fields; rows
/// longer than the header are rejected.
pub fn read_csv<R: io::Read>(reader: R, options: &LoadOptions) -> Result<Dataset, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(options.delimiter)
        .trim(if options.trim { Trim::All } else { Trim::Headers })
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.is_empty() {
        return Err(LoadError::EmptyInput);
    }

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.len() > headers.len() {
            return Err(LoadError::RowLength {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                expected: headers.len(),
                found: record.len(),
            });
        }
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(name, cell)| (name.clone(), Value::coerce(cell)))
            .collect();
        rows.push(row);
    }

    Ok(Dataset { headers, rows })
}
