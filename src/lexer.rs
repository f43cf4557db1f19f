use std::fmt;

use thiserror::Error;

use crate::{ast::Token, grammar::Grammar};

/// A location in the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Byte offset
    pub offset: usize,
    /// 1-based line
    pub line: usize,
    /// 1-based column, counted in characters
    pub column: usize,
}

impl Position {
    /// Position of byte `offset` inside `source`.
    pub fn locate(source: &str, offset: usize) -> Self {
        let before = &source[..offset.min(source.len())];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        Position {
            offset,
            line,
            column: before[line_start..].chars().count() + 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}, col {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("{position}: unexpected character '{found}'")]
    UnexpectedChar { found: char, position: Position },

    #[error("{position}: unterminated string literal, missing closing '`'")]
    UnterminatedString { position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedChar { position, .. } => *position,
            LexError::UnterminatedString { position } => *position,
        }
    }
}

pub struct Lexer<'a> {
    grammar: &'a Grammar,
    input: &'a str,
    position: usize,
    token_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(grammar: &'a Grammar, input: &'a str) -> Self {
        Lexer {
            grammar,
            input,
            position: 0,
            token_start: 0,
        }
    }

    pub fn source(&self) -> &'a str {
        self.input
    }

    /// Where the most recently returned token starts.
    pub fn token_start(&self) -> Position {
        Position::locate(self.input, self.token_start)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.position += rest.len() - rest.trim_start().len();
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        self.token_start = self.position;

        let rest = self.rest();
        let Some(ch) = rest.chars().next() else {
            return Ok(Token::Eof);
        };

        match ch {
            '*' => {
                self.position += 1;
                Ok(Token::Star)
            }
            ',' => {
                self.position += 1;
                Ok(Token::Comma)
            }
            '`' => match self.grammar.string(rest) {
                Some((body, len)) => {
                    self.position += len;
                    Ok(Token::String(body.to_string()))
                }
                None => Err(LexError::UnterminatedString {
                    position: self.token_start(),
                }),
            },
            _ => {
                if let Some((token, len)) = self.grammar.comparator(rest) {
                    self.position += len;
                    return Ok(token);
                }
                if let Some(number) = self.grammar.number(rest) {
                    self.position += number.len();
                    return Ok(Token::Number(number.to_string()));
                }
                if let Some(word) = self.grammar.identifier(rest) {
                    self.position += word.len();
                    return Ok(self
                        .grammar
                        .keyword(word)
                        .unwrap_or_else(|| Token::Identifier(word.to_string())));
                }
                Err(LexError::UnexpectedChar {
                    found: ch,
                    position: self.token_start(),
                })
            }
        }
    }
}

#[test]
fn test_keywords() {
    let grammar = Grammar::new();
    let mut lexer = Lexer::new(&grammar, "PROJECT FILTER Project");
    assert_eq!(lexer.next_token(), Ok(Token::Project));
    assert_eq!(lexer.next_token(), Ok(Token::Filter));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("Project".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_full_query() {
    let grammar = Grammar::new();
    let mut lexer = Lexer::new(&grammar, "PROJECT name,age FILTER age>=-2.5");
    assert_eq!(lexer.next_token(), Ok(Token::Project));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("name".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Comma));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("age".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Filter));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("age".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::GtEq));
    assert_eq!(lexer.next_token(), Ok(Token::Number("-2.5".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_token_start_tracks_columns() {
    let grammar = Grammar::new();
    let mut lexer = Lexer::new(&grammar, "  PROJECT  *");
    lexer.next_token().unwrap();
    assert_eq!(lexer.token_start().column, 3);
    lexer.next_token().unwrap();
    assert_eq!(lexer.token_start().column, 12);
}
