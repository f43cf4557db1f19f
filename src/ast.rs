//! # Parse tree
//!
//! The parser produces one node per grammar production:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - The five comparators
//! - **[query]** - `Query`, `Fields`, `Condition` and `Value` nodes
//!
//! ```text
//! PROJECT name, age FILTER age >= 18
//! ```
//!
//! parses to
//!
//! ```text
//! QueryNode {
//!     fields: List(["name", "age"]),
//!     condition: Some(ConditionNode { field: "age", comparator: GreaterEqual,
//!                                     value: Number { negative: false, magnitude: "18" } }),
//! }
//! ```
//!
//! The tree carries no behaviour. [`crate::evaluator`] turns it into an
//! executable [`crate::Query`].
pub mod operators;
pub mod query;
pub mod tokens;

pub use operators::Comparator;
pub use query::{ConditionNode, FieldsNode, QueryNode, ValueNode};
pub use tokens::Token;
