use std::borrow::Cow;

use log::debug;

use crate::{
    evaluator::{Fields, Query},
    value::Row,
};

/// Run a query over rows: filter, then project.
///
/// Surviving rows keep their input order. With the wildcard the result
/// borrows the input rows untouched; with named fields every surviving row
/// is rebuilt with exactly those fields.
///
/// # Examples
///
/// ```
/// use projql::{execute, parse_query, Grammar, Row, Value};
///
/// let grammar = Grammar::new();
/// let rows = vec![
///     Row::from_iter([("name", Value::from("Alberto")), ("age", Value::from(25.0))]),
///     Row::from_iter([("name", Value::from("Maria")), ("age", Value::from(30.0))]),
/// ];
///
/// let query = parse_query(&grammar, "PROJECT name FILTER age > 26").unwrap();
/// let result = execute(&query, &rows);
///
/// assert_eq!(result.len(), 1);
/// assert_eq!(result[0].get("name"), &Value::from("Maria"));
/// assert!(!result[0].contains("age"));
/// ```
pub fn execute<'r>(query: &Query, rows: &'r [Row]) -> Vec<Cow<'r, Row>> {
    let filtered = rows.iter().filter(|row| query.predicate.matches(row));

    let result: Vec<Cow<'r, Row>> = match &query.fields {
        Fields::Wildcard => filtered.map(Cow::Borrowed).collect(),
        Fields::Named(names) => filtered.map(|row| Cow::Owned(row.project(names))).collect(),
    };

    debug!("`{}` kept {} of {} rows", query, result.len(), rows.len());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::Predicate;
    use crate::value::Value;

    fn rows() -> Vec<Row> {
        vec![
            Row::from_iter([("name", Value::from("Alberto")), ("age", Value::from(25.0))]),
            Row::from_iter([("name", Value::from("Maria")), ("age", Value::from(30.0))]),
        ]
    }

    #[test]
    fn wildcard_borrows_input() {
        let rows = rows();
        let query = Query {
            fields: Fields::Wildcard,
            predicate: Predicate::Always,
        };
        let result = execute(&query, &rows);
        assert_eq!(result.len(), 2);
        for (out, input) in result.iter().zip(&rows) {
            assert!(matches!(out, Cow::Borrowed(r) if std::ptr::eq(*r, input)));
        }
    }

    #[test]
    fn projection_builds_new_rows() {
        let rows = rows();
        let query = Query {
            fields: Fields::Named(vec!["age".to_string(), "name".to_string()]),
            predicate: Predicate::Always,
        };
        let result = execute(&query, &rows);
        assert!(result.iter().all(|r| matches!(r, Cow::Owned(_))));
        assert_eq!(result[0].names().collect::<Vec<_>>(), vec!["age", "name"]);
    }

    #[test]
    fn empty_input() {
        let query = Query {
            fields: Fields::Wildcard,
            predicate: Predicate::Always,
        };
        assert!(execute(&query, &[]).is_empty());
    }
}
