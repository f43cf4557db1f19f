//! One dataset, many queries.

use std::borrow::Cow;
use std::io::{self, BufRead, Write};

use log::debug;

use super::{CliError, OutputFormat, help_text};
use crate::{
    Dataset, Fields, Grammar, Query, Row, execute, parse_query,
    output::{render_table, to_json},
};

/// Result of one successful query.
#[derive(Debug)]
pub struct QueryOutput<'d> {
    pub query: Query,
    /// Column order for rendering
    pub headers: Vec<String>,
    pub rows: Vec<Cow<'d, Row>>,
}

/// Runs queries against a loaded dataset.
///
/// Queries are independent: nothing carries over from one to the next.
pub struct Session<'g> {
    grammar: &'g Grammar,
    dataset: Dataset,
    format: OutputFormat,
    color: bool,
}

impl<'g> Session<'g> {
    pub fn new(grammar: &'g Grammar, dataset: Dataset) -> Self {
        Session {
            grammar,
            dataset,
            format: OutputFormat::default(),
            color: false,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Parse, check field names against the dataset header, then execute.
    pub fn run_query(&self, text: &str) -> Result<QueryOutput<'_>, CliError> {
        let query = parse_query(self.grammar, text)?;
        self.check_fields(&query)?;

        let headers = match &query.fields {
            Fields::Wildcard => self.dataset.headers.clone(),
            Fields::Named(_) => query
                .fields
                .names()
                .iter()
                .fold(Vec::new(), |mut acc: Vec<String>, name| {
                    if !acc.contains(name) {
                        acc.push(name.clone());
                    }
                    acc
                }),
        };
        let rows = execute(&query, &self.dataset.rows);

        Ok(QueryOutput {
            query,
            headers,
            rows,
        })
    }

    fn check_fields(&self, query: &Query) -> Result<(), CliError> {
        let unknown: Vec<String> = query
            .referenced_fields()
            .into_iter()
            .filter(|name| !self.dataset.has_field(name))
            .map(str::to_string)
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(CliError::UnknownFields(unknown))
        }
    }

    /// Format a result the way this session is configured to.
    pub fn render(&self, output: &QueryOutput<'_>) -> Result<String, CliError> {
        match self.format {
            OutputFormat::Table => Ok(render_table(&output.rows, &output.headers, self.color)),
            OutputFormat::Json => {
                let mut json = to_json(&output.rows, true)?;
                json.push('\n');
                Ok(json)
            }
        }
    }

    /// Read queries line by line until `exit`, `quit` or end of input.
    ///
    /// Results go to `out`; bad queries are reported on `err` and the loop
    /// keeps going.
    pub fn repl<R, W, E>(
        &self,
        mut input: R,
        out: &mut W,
        err: &mut E,
        prompt: bool,
    ) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        loop {
            if prompt {
                write!(out, "> ")?;
                out.flush()?;
            }

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            let trimmed = line.trim();
            match trimmed {
                "" => continue,
                "exit" | "quit" => break,
                "help" => {
                    write!(out, "{}", help_text(self.grammar))?;
                    continue;
                }
                "fields" => {
                    writeln!(out, "{}", self.dataset.headers.join(", "))?;
                    continue;
                }
                _ => {}
            }

            match self.run_query(trimmed).and_then(|output| self.render(&output)) {
                Ok(text) => write!(out, "{}", text)?,
                Err(e) => {
                    debug!("rejected {:?}: {}", trimmed, e);
                    writeln!(err, "{}", e)?;
                }
            }
        }
        Ok(())
    }
}
