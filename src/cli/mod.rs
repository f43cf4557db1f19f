//! CLI support for projql
//!
//! Everything the `projql` binary does besides argument parsing lives here,
//! so the REPL can be driven from tests or embedded in other tools.

mod help;
mod session;

pub use help::help_text;
pub use session::{QueryOutput, Session};

use std::io;

use thiserror::Error;

use crate::{LoadError, SyntaxError};

/// How result rows are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Padded text table with a row count
    #[default]
    Table,
    /// JSON array of objects
    Json,
}

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Syntax(#[from] SyntaxError),

    #[error("{0}")]
    Load(#[from] LoadError),

    /// Fields the query names that the dataset does not have
    #[error("{}", unknown_fields(.0))]
    UnknownFields(Vec<String>),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Delimiter must be a single ASCII character, got '{0}'")]
    InvalidDelimiter(char),
}

fn unknown_fields(names: &[String]) -> String {
    let plural = if names.len() == 1 { "" } else { "s" };
    format!("Unknown field{}: {}", plural, names.join(", "))
}

/// Map a delimiter character to the byte the loader expects.
pub fn delimiter_byte(delimiter: char) -> Result<u8, CliError> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(CliError::InvalidDelimiter(delimiter))
    }
}
