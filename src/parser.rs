use std::mem;

use thiserror::Error;

use crate::{
    ast::{Comparator, ConditionNode, FieldsNode, QueryNode, Token, ValueNode},
    grammar::Grammar,
    lexer::{LexError, Lexer, Position},
};

/// Query text that does not match the grammar.
///
/// The message is built from the position where matching stopped and the
/// symbols the grammar would have accepted there.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub position: Position,
    /// Grammar symbols acceptable at `position`, in the order they were tried
    pub expected: Vec<String>,
    /// What was there instead
    pub found: String,
}

impl SyntaxError {
    fn new(source: &str, position: Position, expected: Vec<String>, found: String) -> Self {
        let message = format!(
            "{}\nExpected {}, found {}",
            excerpt(source, position),
            join_alternatives(&expected),
            found
        );
        SyntaxError {
            message,
            position,
            expected,
            found,
        }
    }

    fn from_lex(source: &str, err: LexError) -> Self {
        let position = err.position();
        let (detail, found) = match &err {
            LexError::UnexpectedChar { found, .. } => (
                format!("Unexpected character '{}'", found),
                format!("'{}'", found),
            ),
            LexError::UnterminatedString { .. } => (
                "Unterminated string literal, missing closing '`'".to_string(),
                "unterminated string literal".to_string(),
            ),
        };
        let message = format!("{}\n{}", excerpt(source, position), detail);
        SyntaxError {
            message,
            position,
            expected: Vec::new(),
            found,
        }
    }
}

/// `Line 1, col 9:` followed by the offending line and a caret under the column.
fn excerpt(source: &str, position: Position) -> String {
    let line = source.lines().nth(position.line - 1).unwrap_or("");
    let gutter = format!("> {} | ", position.line);
    format!(
        "{}:\n{}{}\n{}^",
        position,
        gutter,
        line,
        " ".repeat(gutter.len() + position.column - 1)
    )
}

fn join_alternatives(items: &[String]) -> String {
    match items {
        [] => "nothing".to_string(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

/// Recursive-descent matcher for the `Query` rule.
///
/// Every failed token test records what it was looking for; the records
/// since the last consumed token become the `expected` list of the error.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
    current_start: Position,
    expected: Vec<String>,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self, SyntaxError> {
        let source = lexer.source();
        let current_token = lexer
            .next_token()
            .map_err(|e| SyntaxError::from_lex(source, e))?;
        let current_start = lexer.token_start();
        Ok(Parser {
            lexer,
            current_token,
            current_start,
            expected: Vec::new(),
        })
    }

    /// Consume the current token and return it.
    fn advance(&mut self) -> Result<Token, SyntaxError> {
        let source = self.lexer.source();
        let next = self
            .lexer
            .next_token()
            .map_err(|e| SyntaxError::from_lex(source, e))?;
        self.current_start = self.lexer.token_start();
        self.expected.clear();
        Ok(mem::replace(&mut self.current_token, next))
    }

    /// Test the current token's kind, recording it as expected on mismatch.
    fn check(&mut self, token: &Token) -> bool {
        if mem::discriminant(&self.current_token) == mem::discriminant(token) {
            true
        } else {
            self.note_expected(token_kind(token));
            false
        }
    }

    fn note_expected(&mut self, what: String) {
        if !self.expected.contains(&what) {
            self.expected.push(what);
        }
    }

    fn expect(&mut self, expected: Token) -> Result<Token, SyntaxError> {
        if self.check(&expected) {
            self.advance()
        } else {
            Err(self.error())
        }
    }

    fn error(&self) -> SyntaxError {
        SyntaxError::new(
            self.lexer.source(),
            self.current_start,
            self.expected.clone(),
            self.current_token.describe(),
        )
    }

    /// Parse a complete query; trailing input is an error.
    pub fn parse_query(&mut self) -> Result<QueryNode, SyntaxError> {
        self.expect(Token::Project)?;
        let fields = self.parse_fields()?;

        let condition = if self.check(&Token::Filter) {
            self.advance()?;
            Some(self.parse_condition()?)
        } else {
            None
        };

        self.expect(Token::Eof)?;
        Ok(QueryNode { fields, condition })
    }

    fn parse_fields(&mut self) -> Result<FieldsNode, SyntaxError> {
        if self.check(&Token::Star) {
            self.advance()?;
            return Ok(FieldsNode::Wildcard);
        }

        let mut names = vec![self.parse_identifier()?];
        while self.check(&Token::Comma) {
            self.advance()?;
            names.push(self.parse_identifier()?);
        }
        Ok(FieldsNode::List(names))
    }

    fn parse_identifier(&mut self) -> Result<String, SyntaxError> {
        match self.expect(Token::Identifier(String::new()))? {
            Token::Identifier(name) => Ok(name),
            _ => unreachable!("expect() only consumes an identifier here"),
        }
    }

    fn parse_condition(&mut self) -> Result<ConditionNode, SyntaxError> {
        let field = self.parse_identifier()?;
        let comparator = self.parse_comparator()?;
        let value = self.parse_value()?;
        Ok(ConditionNode {
            field,
            comparator,
            value,
        })
    }

    fn parse_comparator(&mut self) -> Result<Comparator, SyntaxError> {
        let comparator = match &self.current_token {
            Token::Eq => Comparator::Equal,
            Token::GtEq => Comparator::GreaterEqual,
            Token::LtEq => Comparator::LessEqual,
            Token::Gt => Comparator::GreaterThan,
            Token::Lt => Comparator::LessThan,
            _ => {
                for token in [Token::Eq, Token::GtEq, Token::LtEq, Token::Gt, Token::Lt] {
                    self.note_expected(token_kind(&token));
                }
                return Err(self.error());
            }
        };
        self.advance()?;
        Ok(comparator)
    }

    fn parse_value(&mut self) -> Result<ValueNode, SyntaxError> {
        if self.check(&Token::Number(String::new())) {
            let Token::Number(text) = self.advance()? else {
                unreachable!("checked for a number literal")
            };
            return Ok(match text.strip_prefix('-') {
                Some(magnitude) => ValueNode::Number {
                    negative: true,
                    magnitude: magnitude.to_string(),
                },
                None => ValueNode::Number {
                    negative: false,
                    magnitude: text,
                },
            });
        }
        if self.check(&Token::String(String::new())) {
            let Token::String(text) = self.advance()? else {
                unreachable!("checked for a string literal")
            };
            return Ok(ValueNode::String(text));
        }
        Err(self.error())
    }
}

/// Name of a token kind, ignoring any payload.
fn token_kind(token: &Token) -> String {
    match token {
        Token::Identifier(_) => "an identifier".to_string(),
        Token::Number(_) => "a number".to_string(),
        Token::String(_) => "a string literal".to_string(),
        other => other.describe(),
    }
}

/// Match `text` against the grammar.
pub fn parse(grammar: &Grammar, text: &str) -> Result<QueryNode, SyntaxError> {
    let lexer = Lexer::new(grammar, text);
    let mut parser = Parser::new(lexer)?;
    parser.parse_query()
}
