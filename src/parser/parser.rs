//! Recursive descent parser and translator
//!
//! One method per grammar rule. There is no AST: every rule emits its C
//! translation into the [`Emitter`] the moment it is recognized, so parsing
//! and code generation are a single pass. The parser pulls tokens from the
//! [`Lexer`] on demand and holds exactly one token of lookahead.
//!
//! Semantic checks run inline: a variable must be assigned (`LET`/`INPUT`)
//! before it is read, and a label may be declared only once. `GOTO` targets
//! are merely recorded during the pass and validated against the declared
//! labels after the whole program has been consumed, which is what makes
//! forward jumps legal.

use crate::emitter::Emitter;
use crate::parser::lexer::{LexError, Lexer, SourceLocation, Token, TokenKind};
use rustc_hash::FxHashSet;
use std::fmt;

/// Parser error type
///
/// The first violation aborts the run; there is no recovery or multi-error
/// reporting.
#[derive(Debug)]
pub enum ParseError {
    /// Tokenization failed while refilling the lookahead.
    Lex(LexError),
    /// The token stream does not match the grammar.
    Syntax {
        message: String,
        location: SourceLocation,
    },
    /// A grammatically valid construct broke a semantic rule.
    Semantic {
        message: String,
        location: SourceLocation,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(err) => err.fmt(f),
            ParseError::Syntax { message, location } => write!(
                f,
                "Syntax error at line {}, column {}: {}",
                location.line, location.column, message
            ),
            ParseError::Semantic { message, location } => write!(
                f,
                "Semantic error at line {}, column {}: {}",
                location.line, location.column, message
            ),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex(err)
    }
}

/// Recursive descent parser for the BASIC dialect
pub struct Parser {
    lexer: Lexer,
    emitter: Emitter,
    current: Token,
    peek: Token,
    /// Variables declared so far, each by its first `LET`/`INPUT` site.
    symbols: FxHashSet<String>,
    labels_declared: FxHashSet<String>,
    /// Every `GOTO` target in source order, with the reference site.
    gotos: Vec<(String, SourceLocation)>,
}

impl Parser {
    /// Build a parser over `source`, priming current and lookahead tokens.
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        let peek = lexer.next_token()?;

        Ok(Self {
            lexer,
            emitter: Emitter::new(),
            current,
            peek,
            symbols: FxHashSet::default(),
            labels_declared: FxHashSet::default(),
            gotos: Vec::new(),
        })
    }

    /// program ::= {newline} {statement} EOF
    ///
    /// Translates the whole program and returns the finished C text. The
    /// parser is consumed: a run is never restartable mid-stream.
    pub fn parse_program(mut self) -> Result<String, ParseError> {
        self.emitter.header_line("#include <stdio.h>");
        self.emitter.header_line("int main(void){");

        // a program may open with blank lines
        while self.check(TokenKind::Newline) {
            self.advance()?;
        }
        while !self.check(TokenKind::Eof) {
            self.statement()?;
        }

        self.emitter.emit_line("return 0;");
        self.emitter.emit_line("}");

        // deferred check: forward references are legal, so GOTO targets can
        // only be validated once the whole program has been consumed
        for (label, location) in &self.gotos {
            if !self.labels_declared.contains(label) {
                return Err(ParseError::Semantic {
                    message: format!("GOTO to undeclared label '{}'", label),
                    location: *location,
                });
            }
        }

        Ok(self.emitter.finish())
    }

    /// statement ::= PRINT | IF | WHILE | LABEL | GOTO | LET | INPUT form,
    /// always terminated by at least one newline.
    fn statement(&mut self) -> Result<(), ParseError> {
        match self.current.kind {
            // PRINT (string | expression)
            TokenKind::Print => {
                self.advance()?;

                if self.check(TokenKind::StringLiteral) {
                    // the literal goes into the printf format verbatim; the
                    // lexer already rejected anything printf would mangle
                    self.emitter
                        .emit_line(&format!("printf(\"{}\\n\");", self.current.text));
                    self.advance()?;
                } else {
                    // numeric output is fixed at two decimal places
                    self.emitter.emit("printf(\"%.2f\\n\", (float)(");
                    self.expression()?;
                    self.emitter.emit_line("));");
                }
            }

            // IF comparison THEN nl {statement} ENDIF
            TokenKind::If => {
                self.advance()?;
                self.emitter.emit("if(");
                self.comparison()?;

                self.match_token(TokenKind::Then)?;
                self.nl()?;
                self.emitter.emit_line("){");

                while !self.check(TokenKind::EndIf) {
                    if self.check(TokenKind::Eof) {
                        return Err(self.expected(TokenKind::EndIf));
                    }
                    self.statement()?;
                }

                self.match_token(TokenKind::EndIf)?;
                self.emitter.emit_line("}");
            }

            // WHILE comparison REPEAT nl {statement} ENDWHILE
            TokenKind::While => {
                self.advance()?;
                self.emitter.emit("while(");
                self.comparison()?;

                self.match_token(TokenKind::Repeat)?;
                self.nl()?;
                self.emitter.emit_line("){");

                while !self.check(TokenKind::EndWhile) {
                    if self.check(TokenKind::Eof) {
                        return Err(self.expected(TokenKind::EndWhile));
                    }
                    self.statement()?;
                }

                self.match_token(TokenKind::EndWhile)?;
                self.emitter.emit_line("}");
            }

            // LABEL ident
            TokenKind::Label => {
                self.advance()?;

                if !self.labels_declared.insert(self.current.text.clone()) {
                    return Err(ParseError::Semantic {
                        message: format!(
                            "Duplicate declaration of label '{}'",
                            self.current.text
                        ),
                        location: self.current.location,
                    });
                }

                self.emitter.emit_line(&format!("{}:", self.current.text));
                self.match_token(TokenKind::Ident)?;
            }

            // GOTO ident
            TokenKind::Goto => {
                self.advance()?;
                self.gotos
                    .push((self.current.text.clone(), self.current.location));
                self.emitter
                    .emit_line(&format!("goto {};", self.current.text));
                self.match_token(TokenKind::Ident)?;
            }

            // LET ident = expression
            TokenKind::Let => {
                self.advance()?;
                self.declare_variable();

                self.emitter.emit(&format!("{} = ", self.current.text));
                self.match_token(TokenKind::Ident)?;
                self.match_token(TokenKind::Eq)?;
                self.expression()?;
                self.emitter.emit_line(";");
            }

            // INPUT ident
            TokenKind::Input => {
                self.advance()?;
                self.declare_variable();

                // a failed scanf zeroes the variable and discards the rest
                // of the input line
                self.emitter
                    .emit_line(&format!("if(0 == scanf(\"%f\", &{})) {{", self.current.text));
                self.emitter
                    .emit_line(&format!("{} = 0;", self.current.text));
                self.emitter.emit_line("scanf(\"%*s\");");
                self.emitter.emit_line("}");
                self.match_token(TokenKind::Ident)?;
            }

            _ => {
                return Err(ParseError::Syntax {
                    message: format!("Invalid statement at {}", self.current),
                    location: self.current.location,
                });
            }
        }

        self.nl()
    }

    /// comparison ::= expression (("==" | "!=" | ">" | ">=" | "<" | "<=") expression)+
    ///
    /// A bare expression is not a valid condition; at least one comparison
    /// operator is required.
    fn comparison(&mut self) -> Result<(), ParseError> {
        self.expression()?;

        if !self.current.kind.is_comparison() {
            return Err(ParseError::Syntax {
                message: format!("Expected comparison operator, found {}", self.current),
                location: self.current.location,
            });
        }
        while self.current.kind.is_comparison() {
            self.emit_current_text();
            self.advance()?;
            self.expression()?;
        }

        Ok(())
    }

    /// expression ::= term {("+" | "-") term}
    fn expression(&mut self) -> Result<(), ParseError> {
        self.term()?;

        while matches!(self.current.kind, TokenKind::Plus | TokenKind::Minus) {
            self.emit_current_text();
            self.advance()?;
            self.term()?;
        }

        Ok(())
    }

    /// term ::= unary {("*" | "/") unary}
    fn term(&mut self) -> Result<(), ParseError> {
        self.unary()?;

        while matches!(self.current.kind, TokenKind::Asterisk | TokenKind::Slash) {
            self.emit_current_text();
            self.advance()?;
            self.unary()?;
        }

        Ok(())
    }

    /// unary ::= ["+" | "-"] primary
    fn unary(&mut self) -> Result<(), ParseError> {
        if matches!(self.current.kind, TokenKind::Plus | TokenKind::Minus) {
            self.emit_current_text();
            self.advance()?;
        }
        self.primary()
    }

    /// primary ::= number | ident
    ///
    /// An identifier must already have been assigned; reading it earlier is
    /// a semantic error at the read site.
    fn primary(&mut self) -> Result<(), ParseError> {
        match self.current.kind {
            TokenKind::Number => {
                self.emit_current_text();
                self.advance()
            }
            TokenKind::Ident => {
                if !self.symbols.contains(&self.current.text) {
                    return Err(ParseError::Semantic {
                        message: format!(
                            "Referencing variable before assignment: '{}'",
                            self.current.text
                        ),
                        location: self.current.location,
                    });
                }
                self.emit_current_text();
                self.advance()
            }
            _ => Err(ParseError::Syntax {
                message: format!("Unexpected token at {}", self.current),
                location: self.current.location,
            }),
        }
    }

    /// nl ::= newline {newline}
    fn nl(&mut self) -> Result<(), ParseError> {
        self.match_token(TokenKind::Newline)?;
        while self.check(TokenKind::Newline) {
            self.advance()?;
        }
        Ok(())
    }

    /// Record the variable named by the current token, emitting its header
    /// declaration the first time the name is seen.
    fn declare_variable(&mut self) {
        if self.symbols.insert(self.current.text.clone()) {
            self.emitter
                .header_line(&format!("float {};", self.current.text));
        }
    }

    /// Copy the current token's lexeme into the body buffer.
    fn emit_current_text(&mut self) {
        self.emitter.emit(&self.current.text);
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Assert the current token's kind and advance past it.
    fn match_token(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if !self.check(kind) {
            return Err(self.expected(kind));
        }
        self.advance()
    }

    fn expected(&self, kind: TokenKind) -> ParseError {
        ParseError::Syntax {
            message: format!("Expected {}, found {}", kind, self.current),
            location: self.current.location,
        }
    }

    /// Shift the lookahead into current and refill it from the lexer.
    fn advance(&mut self) -> Result<(), ParseError> {
        let next = self.lexer.next_token()?;
        self.current = std::mem::replace(&mut self.peek, next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(source: &str) -> Result<String, ParseError> {
        Parser::new(source)?.parse_program()
    }

    #[test]
    fn test_program_wrapper() {
        let output = compile("").unwrap();
        assert!(output.starts_with("#include <stdio.h>\nint main(void){\n"));
        assert!(output.ends_with("return 0;\n}\n"));
    }

    #[test]
    fn test_print_string() {
        let output = compile("PRINT \"hello\"\n").unwrap();
        assert!(output.contains("printf(\"hello\\n\");"));
    }

    #[test]
    fn test_print_expression() {
        let output = compile("PRINT 1+2\n").unwrap();
        assert!(output.contains("printf(\"%.2f\\n\", (float)(1+2));"));
    }

    #[test]
    fn test_let_declares_once() {
        let output = compile("LET x = 1\nLET x = 2\n").unwrap();
        assert_eq!(output.matches("float x;").count(), 1);
        assert!(output.contains("x = 1;"));
        assert!(output.contains("x = 2;"));
    }

    #[test]
    fn test_declarations_in_first_occurrence_order() {
        let output = compile("LET b = 1\nINPUT a\nLET c = 2\n").unwrap();
        let b = output.find("float b;").unwrap();
        let a = output.find("float a;").unwrap();
        let c = output.find("float c;").unwrap();
        assert!(b < a && a < c);
    }

    #[test]
    fn test_input_fallback() {
        let output = compile("INPUT n\n").unwrap();
        assert!(output.contains("if(0 == scanf(\"%f\", &n)) {"));
        assert!(output.contains("n = 0;"));
        assert!(output.contains("scanf(\"%*s\");"));
    }

    #[test]
    fn test_forward_goto_is_legal() {
        let output = compile("GOTO end\nLABEL end\n").unwrap();
        assert!(output.contains("goto end;"));
        assert!(output.contains("end:"));
    }

    #[test]
    fn test_undeclared_goto_fails_after_full_parse() {
        let err = compile("GOTO nowhere\nPRINT \"still parsed\"\n").unwrap_err();
        match err {
            ParseError::Semantic { message, .. } => {
                assert!(message.contains("undeclared label 'nowhere'"))
            }
            other => panic!("expected semantic error, got {}", other),
        }
    }

    #[test]
    fn test_duplicate_label_fails_at_second_occurrence() {
        let err = compile("LABEL spot\nLABEL spot\n").unwrap_err();
        match err {
            ParseError::Semantic { message, location } => {
                assert!(message.contains("Duplicate declaration of label 'spot'"));
                assert_eq!(location.line, 2);
            }
            other => panic!("expected semantic error, got {}", other),
        }
    }

    #[test]
    fn test_use_before_assignment() {
        let err = compile("PRINT x\n").unwrap_err();
        assert!(matches!(err, ParseError::Semantic { .. }));
        assert!(err.to_string().contains("before assignment"));
    }

    #[test]
    fn test_assignment_declares_for_later_reads() {
        let output = compile("LET x = 1\nPRINT x\n").unwrap();
        assert!(output.contains("printf(\"%.2f\\n\", (float)(x));"));
    }

    #[test]
    fn test_bare_expression_is_not_a_comparison() {
        let err = compile("IF 1 THEN\nENDIF\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
        assert!(err.to_string().contains("comparison operator"));
    }

    #[test]
    fn test_invalid_statement() {
        let err = compile("THEN\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
        assert!(err.to_string().contains("Invalid statement"));
    }

    #[test]
    fn test_missing_newline_after_statement() {
        let err = compile("PRINT \"x\"").unwrap_err();
        assert!(err.to_string().contains("Expected newline"));
    }

    #[test]
    fn test_lex_error_propagates() {
        let err = compile("LET x = $\n").unwrap_err();
        assert!(matches!(err, ParseError::Lex(_)));
    }
}
