pub mod ast;
pub mod cli;
pub mod evaluator;
pub mod executor;
pub mod grammar;
pub mod lexer;
pub mod loader;
pub mod output;
pub mod parser;
pub mod value;

pub use ast::{Comparator, QueryNode, Token};
pub use evaluator::{Condition, Fields, Literal, Predicate, Query, evaluate};
pub use executor::execute;
pub use grammar::Grammar;
pub use lexer::{LexError, Lexer, Position};
pub use loader::{Dataset, LoadError, LoadOptions, load_csv, read_csv};
pub use output::{render_table, to_json};
pub use parser::{Parser, SyntaxError, parse};
pub use value::{Row, Value};

/// Parse and evaluate query text in one step.
///
/// ```
/// use projql::{parse_query, Grammar};
///
/// let grammar = Grammar::new();
/// let query = parse_query(&grammar, "PROJECT name, age").unwrap();
/// assert_eq!(query.fields.names(), ["name", "age"]);
///
/// let err = parse_query(&grammar, "PROJECT").unwrap_err();
/// assert!(!err.message.is_empty());
/// ```
pub fn parse_query(grammar: &Grammar, text: &str) -> Result<Query, SyntaxError> {
    let node = parse(grammar, text)?;
    let query = evaluate(&node);
    log::debug!("parsed query: {}", query);
    Ok(query)
}
