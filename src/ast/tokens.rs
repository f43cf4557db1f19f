/// Lexical tokens of the query language.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords
    /// `PROJECT`, opens every query
    Project,

    /// `FILTER`, introduces the optional condition
    Filter,

    // Punctuation
    /// Wildcard field selector
    ///
    /// # Examples
    /// ```text
    /// PROJECT *
    /// ```
    Star,

    /// Separator between field names
    Comma,

    // Comparators
    /// `=`
    Eq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,

    // Literals and names
    /// Field name
    ///
    /// Starts with a letter, followed by letters, digits or underscores.
    ///
    /// # Examples
    /// ```text
    /// name
    /// first_name
    /// col2
    /// ```
    Identifier(String),

    /// Number literal, kept as written (sign included) until evaluation
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -3.5
    /// ```
    Number(String),

    /// Text between backticks, verbatim
    ///
    /// # Examples
    /// ```text
    /// `Alberto`
    /// `it's \n not escaped`
    /// ```
    String(String),

    /// End of input
    Eof,
}

impl Token {
    /// How the token is named in syntax error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Project => "\"PROJECT\"".to_string(),
            Token::Filter => "\"FILTER\"".to_string(),
            Token::Star => "\"*\"".to_string(),
            Token::Comma => "\",\"".to_string(),
            Token::Eq => "\"=\"".to_string(),
            Token::Gt => "\">\"".to_string(),
            Token::GtEq => "\">=\"".to_string(),
            Token::Lt => "\"<\"".to_string(),
            Token::LtEq => "\"<=\"".to_string(),
            Token::Identifier(name) => format!("identifier \"{}\"", name),
            Token::Number(n) => format!("number {}", n),
            Token::String(s) => format!("string `{}`", s),
            Token::Eof => "end of input".to_string(),
        }
    }
}
