//! Rendering of result rows.
//!
//! - **Table** via [`render_table()`] - padded columns separated by `|`, with
//!   a trailing row count; optional ANSI colour
//! - **JSON** via [`to_json()`] - an array of objects, field order preserved,
//!   absent fields as `null`
//!
//! # Examples
//!
//! ```
//! use projql::{Row, Value};
//! use projql::output::{render_table, to_json};
//!
//! let rows = vec![Row::from_iter([("name", Value::from("Maria")), ("age", Value::from(30.0))])];
//! let headers = vec!["name".to_string(), "age".to_string()];
//!
//! let table = render_table(&rows, &headers, false);
//! assert!(table.contains(" Maria | 30  "));
//!
//! assert_eq!(to_json(&rows, false).unwrap(), r#"[{"name":"Maria","age":30}]"#);
//! ```

use std::borrow::Borrow;

use crate::value::{Row, Value};

const BLUE: &str = "\x1b[34m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

struct TablePrinter {
    color: bool,
}

impl TablePrinter {
    fn paint(&self, text: &str, code: &str) -> String {
        if self.color {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn line(&self, cells: &[String], widths: &[usize]) -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| {
                let pad = width - cell.chars().count();
                format!(" {}{} ", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("|")
    }

    fn print<R: Borrow<Row>>(&self, rows: &[R], headers: &[String]) -> String {
        let body: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                let row = row.borrow();
                headers.iter().map(|h| row.get(h).to_string()).collect()
            })
            .collect();

        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                body.iter()
                    .map(|cells| cells[i].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        if !headers.is_empty() {
            out.push_str(&self.paint(&self.line(headers, &widths), BLUE));
            out.push('\n');
            for cells in &body {
                out.push_str(&self.line(cells, &widths));
                out.push('\n');
            }
        }

        let count = match rows.len() {
            1 => "1 row found".to_string(),
            n => format!("{} rows found", n),
        };
        let color = if rows.is_empty() { RED } else { GREEN };
        out.push(' ');
        out.push_str(&self.paint(&count, color));
        out.push('\n');
        out
    }
}

/// Render rows as a text table with one column per header.
///
/// Cells for fields a row lacks print as `undefined`.
pub fn render_table<R: Borrow<Row>>(rows: &[R], headers: &[String], color: bool) -> String {
    TablePrinter { color }.print(rows, headers)
}

/// JSON form of one row; insertion order is kept.
pub fn row_to_json(row: &Row) -> serde_json::Value {
    serde_json::Value::Object(
        row.iter()
            .map(|(name, value)| (name.to_string(), value_to_json(value)))
            .collect(),
    )
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Number(n) => number_to_json(*n),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Absent => serde_json::Value::Null,
    }
}

/// Whole numbers print as integers, like the table does; `-0` becomes `0`.
fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        return serde_json::Value::Number((n as i64).into());
    }
    serde_json::Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

/// Render rows as a JSON array of objects.
pub fn to_json<R: Borrow<Row>>(rows: &[R], pretty: bool) -> serde_json::Result<String> {
    let array = serde_json::Value::Array(rows.iter().map(|r| row_to_json(r.borrow())).collect());
    if pretty {
        serde_json::to_string_pretty(&array)
    } else {
        serde_json::to_string(&array)
    }
}
