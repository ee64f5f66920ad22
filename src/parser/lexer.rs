//! Lexer (tokenizer) for BASIC source code
//!
//! Converts raw source text into a stream of [`Token`]s pulled one at a time
//! by the parser via [`Lexer::next_token`]. Line breaks are significant in
//! this dialect (every statement ends with one), so `\n` is a token rather
//! than whitespace. `#` starts a comment running to the end of the line.

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Lexical category of a [`Token`].
///
/// Variants fall into three groups: structural/literal kinds, keywords, and
/// operators. Keyword recognition goes through [`TokenKind::keyword`] so the
/// reserved spellings live in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Structural and literals
    Eof,
    Newline,
    Number,
    Ident,
    StringLiteral,

    // Keywords
    Label,
    Goto,
    Print,
    Input,
    Let,
    If,
    Then,
    EndIf,
    While,
    Repeat,
    EndWhile,

    // Operators
    Eq,       // =
    Plus,     // +
    Minus,    // -
    Asterisk, // *
    Slash,    // /
    EqEq,     // ==
    NotEq,    // !=
    Lt,       // <
    LtEq,     // <=
    Gt,       // >
    GtEq,     // >=
}

impl TokenKind {
    /// Reserved-word lookup: exact spelling in, keyword kind out.
    ///
    /// Keywords are upper-case only; `print` is an ordinary identifier.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "LABEL" => TokenKind::Label,
            "GOTO" => TokenKind::Goto,
            "PRINT" => TokenKind::Print,
            "INPUT" => TokenKind::Input,
            "LET" => TokenKind::Let,
            "IF" => TokenKind::If,
            "THEN" => TokenKind::Then,
            "ENDIF" => TokenKind::EndIf,
            "WHILE" => TokenKind::While,
            "REPEAT" => TokenKind::Repeat,
            "ENDWHILE" => TokenKind::EndWhile,
            _ => return None,
        };
        Some(kind)
    }

    /// True for the six comparison operators accepted in `IF`/`WHILE`
    /// conditions.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            TokenKind::Gt
                | TokenKind::GtEq
                | TokenKind::Lt
                | TokenKind::LtEq
                | TokenKind::EqEq
                | TokenKind::NotEq
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Eof => "end of file",
            TokenKind::Newline => "newline",
            TokenKind::Number => "number",
            TokenKind::Ident => "identifier",
            TokenKind::StringLiteral => "string",
            TokenKind::Label => "'LABEL'",
            TokenKind::Goto => "'GOTO'",
            TokenKind::Print => "'PRINT'",
            TokenKind::Input => "'INPUT'",
            TokenKind::Let => "'LET'",
            TokenKind::If => "'IF'",
            TokenKind::Then => "'THEN'",
            TokenKind::EndIf => "'ENDIF'",
            TokenKind::While => "'WHILE'",
            TokenKind::Repeat => "'REPEAT'",
            TokenKind::EndWhile => "'ENDWHILE'",
            TokenKind::Eq => "'='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Asterisk => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::LtEq => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::GtEq => "'>='",
        };
        f.write_str(name)
    }
}

/// A classified lexeme: the exact source text plus its [`TokenKind`].
///
/// String tokens carry the content between the quotes; the end-of-file token
/// carries empty text. Every token records where it started so errors can
/// report an accurate line and column.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: TokenKind, location: SourceLocation) -> Self {
        Self {
            text: text.into(),
            kind,
            location,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::Newline => write!(f, "newline"),
            TokenKind::Number => write!(f, "number literal {}", self.text),
            TokenKind::Ident => write!(f, "identifier '{}'", self.text),
            TokenKind::StringLiteral => write!(f, "string literal \"{}\"", self.text),
            _ => write!(f, "'{}'", self.text),
        }
    }
}

/// Lexer error type
#[derive(Debug)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// Lexer for BASIC source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Produce the next token, consuming any leading whitespace and comments.
    ///
    /// The cursor only moves forward; multi-character operators are matched
    /// by peeking one character ahead (maximal munch: `>=` wins over `>`).
    /// Once the input is exhausted this keeps returning [`TokenKind::Eof`],
    /// so the parser can prime and drain its lookahead freely.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        self.skip_comment();

        let loc = self.current_location();
        if self.is_at_end() {
            return Ok(Token::new("", TokenKind::Eof, loc));
        }

        let ch = self.advance();
        match ch {
            '\n' => Ok(Token::new("\n", TokenKind::Newline, loc)),
            '+' => Ok(Token::new("+", TokenKind::Plus, loc)),
            '-' => Ok(Token::new("-", TokenKind::Minus, loc)),
            '*' => Ok(Token::new("*", TokenKind::Asterisk, loc)),
            '/' => Ok(Token::new("/", TokenKind::Slash, loc)),
            '=' => {
                if self.peek() == '=' {
                    self.advance();
                    Ok(Token::new("==", TokenKind::EqEq, loc))
                } else {
                    Ok(Token::new("=", TokenKind::Eq, loc))
                }
            }
            '>' => {
                if self.peek() == '=' {
                    self.advance();
                    Ok(Token::new(">=", TokenKind::GtEq, loc))
                } else {
                    Ok(Token::new(">", TokenKind::Gt, loc))
                }
            }
            '<' => {
                if self.peek() == '=' {
                    self.advance();
                    Ok(Token::new("<=", TokenKind::LtEq, loc))
                } else {
                    Ok(Token::new("<", TokenKind::Lt, loc))
                }
            }
            '!' => {
                if self.peek() == '=' {
                    self.advance();
                    Ok(Token::new("!=", TokenKind::NotEq, loc))
                } else {
                    // There is no bare '!' operator in this dialect.
                    Err(LexError {
                        message: "Unknown token: '!'".to_string(),
                        location: loc,
                    })
                }
            }
            '"' => self.string_literal(loc),
            '0'..='9' => self.number_literal(ch, loc),
            c if c.is_alphabetic() => Ok(self.identifier_or_keyword(c, loc)),
            c => Err(LexError {
                message: format!("Unknown token: '{}'", c),
                location: loc,
            }),
        }
    }

    /// Lex a string literal; the opening quote is already consumed.
    ///
    /// The content is later pasted verbatim into a C `printf` format string,
    /// so characters that would change meaning there are rejected outright.
    fn string_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut text = String::new();

        loop {
            match self.peek() {
                '"' => {
                    self.advance();
                    return Ok(Token::new(text, TokenKind::StringLiteral, loc));
                }
                '\0' => {
                    return Err(LexError {
                        message: "Unterminated string literal".to_string(),
                        location: loc,
                    });
                }
                '\r' | '\n' | '\t' | '\\' | '%' => {
                    return Err(LexError {
                        message: "Illegal character in string.".to_string(),
                        location: self.current_location(),
                    });
                }
                _ => text.push(self.advance()),
            }
        }
    }

    /// Lex a number literal; the first digit is already consumed.
    ///
    /// Digits with an optional fractional part. A decimal point must be
    /// followed by at least one digit; there is no sign or exponent form.
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut text = String::new();
        text.push(first_digit);

        while self.peek().is_ascii_digit() {
            text.push(self.advance());
        }

        if self.peek() == '.' {
            text.push(self.advance());
            if !self.peek().is_ascii_digit() {
                return Err(LexError {
                    message: "Illegal character in number.".to_string(),
                    location: self.current_location(),
                });
            }
            while self.peek().is_ascii_digit() {
                text.push(self.advance());
            }
        }

        Ok(Token::new(text, TokenKind::Number, loc))
    }

    /// Lex an identifier or keyword; the leading letter is already consumed.
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut text = String::new();
        text.push(first_char);

        while self.peek().is_alphanumeric() {
            text.push(self.advance());
        }

        let kind = TokenKind::keyword(&text).unwrap_or(TokenKind::Ident);
        Token::new(text, kind, loc)
    }

    /// Skip spaces, tabs, and carriage returns. Line feeds are tokens.
    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), ' ' | '\t' | '\r') {
            self.advance();
        }
    }

    /// Skip a `#` comment through the end of the line, leaving the line feed
    /// for the next token. A comment on the last line ends at end of input.
    fn skip_comment(&mut self) {
        if self.peek() == '#' {
            while self.peek() != '\n' && !self.is_at_end() {
                self.advance();
            }
        }
    }

    /// Peek at the current character without consuming; `'\0'` at end of
    /// input.
    fn peek(&self) -> char {
        self.input.get(self.position).copied().unwrap_or('\0')
    }

    /// Consume and return the current character, tracking line and column.
    fn advance(&mut self) -> char {
        let ch = self.peek();
        if self.position < self.input.len() {
            self.position += 1;
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        ch
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
