//! The query grammar, compiled once and shared by reference.
//!
//! ```text
//! Query         ::= "PROJECT" Fields ("FILTER" Condition)?
//! Fields        ::= "*" | FieldList
//! FieldList     ::= Identifier ("," Identifier)*
//! Condition     ::= Identifier Comparator Value
//! Comparator    ::= "=" | ">=" | "<=" | ">" | "<"
//! Value         ::= NumberLiteral | StringLiteral
//! NumberLiteral ::= "-"? Digit+ ("." Digit+)?
//! StringLiteral ::= "`" AnyCharExceptBacktick* "`"
//! Identifier    ::= Letter (Letter | Digit | "_")*
//! ```
//!
//! The syntactic rules live in [`crate::parser`]; this module owns the
//! lexical rules (keywords, comparators and the three token patterns) so the
//! lexer never recompiles a pattern per query.

use regex::Regex;

use crate::ast::Token;

const EBNF: &str = r#"Query         ::= "PROJECT" Fields ("FILTER" Condition)?
Fields        ::= "*" | FieldList
FieldList     ::= Identifier ("," Identifier)*
Condition     ::= Identifier Comparator Value
Comparator    ::= "=" | ">=" | "<=" | ">" | "<"
Value         ::= NumberLiteral | StringLiteral
NumberLiteral ::= "-"? Digit+ ("." Digit+)?
StringLiteral ::= "`" AnyCharExceptBacktick* "`"
Identifier    ::= Letter (Letter | Digit | "_")*"#;

/// Compiled lexical grammar.
///
/// Immutable after [`Grammar::new`]; safe to share across threads.
#[derive(Debug, Clone)]
pub struct Grammar {
    keywords: Vec<(&'static str, Token)>,
    /// Longest spelling first, so `>=` never lexes as `>` followed by `=`.
    comparators: Vec<(&'static str, Token)>,
    identifier: Regex,
    number: Regex,
    string: Regex,
}

impl Grammar {
    pub fn new() -> Self {
        Grammar {
            keywords: vec![("PROJECT", Token::Project), ("FILTER", Token::Filter)],
            comparators: vec![
                (">=", Token::GtEq),
                ("<=", Token::LtEq),
                ("=", Token::Eq),
                (">", Token::Gt),
                ("<", Token::Lt),
            ],
            identifier: compile(r"^\p{L}[\p{L}0-9_]*"),
            number: compile(r"^-?[0-9]+(?:\.[0-9]+)?"),
            string: compile(r"^`([^`]*)`"),
        }
    }

    /// The grammar in EBNF form, for help output.
    pub fn describe(&self) -> &'static str {
        EBNF
    }

    /// Keyword token for an exact, case-sensitive spelling.
    pub fn keyword(&self, word: &str) -> Option<Token> {
        self.keywords
            .iter()
            .find(|(spelling, _)| *spelling == word)
            .map(|(_, token)| token.clone())
    }

    /// Comparator at the start of `input` and its length in bytes.
    pub fn comparator(&self, input: &str) -> Option<(Token, usize)> {
        self.comparators
            .iter()
            .find(|(spelling, _)| input.starts_with(spelling))
            .map(|(spelling, token)| (token.clone(), spelling.len()))
    }

    /// Identifier at the start of `input`.
    pub fn identifier<'i>(&self, input: &'i str) -> Option<&'i str> {
        self.identifier.find(input).map(|m| m.as_str())
    }

    /// Number literal (sign included) at the start of `input`.
    pub fn number<'i>(&self, input: &'i str) -> Option<&'i str> {
        self.number.find(input).map(|m| m.as_str())
    }

    /// String literal at the start of `input`: the verbatim text between the
    /// backticks, and the length of the whole literal in bytes.
    pub fn string<'i>(&self, input: &'i str) -> Option<(&'i str, usize)> {
        let caps = self.string.captures(input)?;
        let whole = caps.get(0)?;
        let body = caps.get(1)?;
        Some((body.as_str(), whole.end()))
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

// The patterns are constants; failing to compile one is a programming error.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid grammar pattern {pattern:?}: {e}"))
}
