//! Turns a parse tree into an executable [`Query`].
//!
//! Evaluation cannot fail: any tree the parser accepted is evaluable. The
//! `FILTER` clause compiles to a [`Predicate`], a plain value that can be
//! inspected, printed and compared, rather than an opaque closure.

use std::fmt;

use crate::{
    ast::{Comparator, ConditionNode, FieldsNode, QueryNode, ValueNode},
    value::{Row, Value},
};

/// Which fields a query keeps.
#[derive(Debug, Clone, PartialEq)]
pub enum Fields {
    /// `*`: every field of the row, in the row's own order, row left as is
    Wildcard,

    /// Exactly these fields, in this order, as a freshly built row
    Named(Vec<String>),
}

impl Fields {
    /// Named fields; empty for the wildcard.
    pub fn names(&self) -> &[String] {
        match self {
            Fields::Wildcard => &[],
            Fields::Named(names) => names,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Fields::Wildcard)
    }
}

/// Constant on the right-hand side of a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    String(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{}", n),
            Literal::String(s) => write!(f, "`{}`", s),
        }
    }
}

/// One comparison between a row field and a literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub comparator: Comparator,
    pub literal: Literal,
}

impl Condition {
    /// A missing field satisfies no comparator, and neither does a value
    /// whose kind differs from the literal's: a numeric column compared to a
    /// backtick string (or the reverse) is simply false.
    pub fn matches(&self, row: &Row) -> bool {
        let ordering = match (row.get(&self.field), &self.literal) {
            (Value::Absent, _) => return false,
            (Value::Number(value), Literal::Number(literal)) => value.partial_cmp(literal),
            (Value::String(value), Literal::String(literal)) => {
                Some(value.as_str().cmp(literal.as_str()))
            }
            (Value::Number(_), Literal::String(_)) | (Value::String(_), Literal::Number(_)) => {
                None
            }
        };
        self.comparator.accepts(ordering)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.comparator, self.literal)
    }
}

/// Row filter compiled from the optional `FILTER` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// No `FILTER` clause
    Always,
    Compare(Condition),
}

impl Predicate {
    /// Pure and total over any row.
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::Compare(condition) => condition.matches(row),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Always => f.write_str("true"),
            Predicate::Compare(condition) => write!(f, "{}", condition),
        }
    }
}

/// An evaluated query, ready to run against any number of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub fields: Fields,
    pub predicate: Predicate,
}

impl Query {
    /// Every field name the query mentions: projected names first, then the
    /// condition field. Each name appears once.
    pub fn referenced_fields(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let condition_field = match &self.predicate {
            Predicate::Always => None,
            Predicate::Compare(condition) => Some(condition.field.as_str()),
        };
        for name in self.fields.names().iter().map(String::as_str).chain(condition_field) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.fields {
            Fields::Wildcard => f.write_str("PROJECT *")?,
            Fields::Named(names) => write!(f, "PROJECT {}", names.join(", "))?,
        }
        match &self.predicate {
            Predicate::Always => Ok(()),
            Predicate::Compare(condition) => write!(f, " FILTER {}", condition),
        }
    }
}

/// Evaluate a parse tree bottom-up.
pub fn evaluate(node: &QueryNode) -> Query {
    Query {
        fields: eval_fields(&node.fields),
        predicate: node
            .condition
            .as_ref()
            .map(|condition| Predicate::Compare(eval_condition(condition)))
            .unwrap_or(Predicate::Always),
    }
}

fn eval_fields(node: &FieldsNode) -> Fields {
    match node {
        FieldsNode::Wildcard => Fields::Wildcard,
        FieldsNode::List(names) => Fields::Named(names.clone()),
    }
}

fn eval_condition(node: &ConditionNode) -> Condition {
    Condition {
        field: node.field.clone(),
        comparator: node.comparator,
        literal: eval_value(&node.value),
    }
}

fn eval_value(node: &ValueNode) -> Literal {
    match node {
        ValueNode::Number {
            negative,
            magnitude,
        } => {
            // The grammar only lets digits (and one inner '.') through.
            let magnitude: f64 = magnitude.parse().unwrap_or(f64::NAN);
            Literal::Number(if *negative { -magnitude } else { magnitude })
        }
        ValueNode::String(text) => Literal::String(text.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Row {
        Row::from_iter([("name", Value::from("Maria")), ("age", Value::from(30.0))])
    }

    fn condition(field: &str, comparator: Comparator, literal: Literal) -> Condition {
        Condition {
            field: field.to_string(),
            comparator,
            literal,
        }
    }

    #[test]
    fn numeric_comparisons() {
        let row = row();
        let cases = [
            (Comparator::Equal, 30.0, true),
            (Comparator::Equal, 31.0, false),
            (Comparator::GreaterThan, 29.5, true),
            (Comparator::GreaterThan, 30.0, false),
            (Comparator::GreaterEqual, 30.0, true),
            (Comparator::LessThan, 30.0, false),
            (Comparator::LessThan, 100.0, true),
            (Comparator::LessEqual, 30.0, true),
            (Comparator::LessEqual, -1.0, false),
        ];
        for (comparator, n, expected) in cases {
            let c = condition("age", comparator, Literal::Number(n));
            assert_eq!(c.matches(&row), expected, "age {} {}", comparator, n);
        }
    }

    #[test]
    fn string_comparisons_are_lexicographic() {
        let row = row();
        let lit = |s: &str| Literal::String(s.to_string());
        assert!(condition("name", Comparator::Equal, lit("Maria")).matches(&row));
        assert!(!condition("name", Comparator::Equal, lit("maria")).matches(&row));
        assert!(condition("name", Comparator::GreaterThan, lit("Alberto")).matches(&row));
        assert!(condition("name", Comparator::LessThan, lit("Mario")).matches(&row));
        assert!(condition("name", Comparator::LessEqual, lit("Maria")).matches(&row));
    }

    #[test]
    fn kind_mismatch_is_false_for_every_comparator() {
        let row = row();
        for comparator in [
            Comparator::Equal,
            Comparator::GreaterThan,
            Comparator::GreaterEqual,
            Comparator::LessThan,
            Comparator::LessEqual,
        ] {
            let c = condition("age", comparator, Literal::String("30".to_string()));
            assert!(!c.matches(&row));
            let c = condition("name", comparator, Literal::Number(0.0));
            assert!(!c.matches(&row));
        }
    }

    #[test]
    fn nan_satisfies_nothing() {
        let row = Row::from_iter([("x", Value::Number(f64::NAN))]);
        let c = condition("x", Comparator::LessEqual, Literal::Number(1.0));
        assert!(!c.matches(&row));
    }

    #[test]
    fn negative_literal() {
        let node = ValueNode::Number {
            negative: true,
            magnitude: "2.5".to_string(),
        };
        assert_eq!(eval_value(&node), Literal::Number(-2.5));
    }

    #[test]
    fn display_round_trips_the_query_text() {
        let query = Query {
            fields: Fields::Named(vec!["age".to_string()]),
            predicate: Predicate::Compare(condition(
                "name",
                Comparator::Equal,
                Literal::String("Alberto".to_string()),
            )),
        };
        assert_eq!(query.to_string(), "PROJECT age FILTER name = `Alberto`");
    }

    #[test]
    fn referenced_fields_dedup() {
        let query = Query {
            fields: Fields::Named(vec!["age".to_string(), "name".to_string(), "age".to_string()]),
            predicate: Predicate::Compare(condition(
                "age",
                Comparator::GreaterThan,
                Literal::Number(1.0),
            )),
        };
        assert_eq!(query.referenced_fields(), vec!["age", "name"]);
    }
}
