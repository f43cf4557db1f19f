use crate::ast::Comparator;

/// Parse tree for one query, positioned at the `Query` rule.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryNode {
    pub fields: FieldsNode,

    /// The `FILTER` clause, if any
    pub condition: Option<ConditionNode>,
}

/// The `Fields` rule.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldsNode {
    /// `*`
    Wildcard,

    /// Identifiers in source order, duplicates kept as written
    List(Vec<String>),
}

/// The `Condition` rule: exactly one comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionNode {
    pub field: String,
    pub comparator: Comparator,
    pub value: ValueNode,
}

/// The `Value` rule.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueNode {
    /// Digits as written; the leading `-`, if present, is split off
    Number { negative: bool, magnitude: String },

    /// Text between the backticks
    String(String),
}
