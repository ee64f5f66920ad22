//! # Introduction
//!
//! tinybc translates a tiny structured BASIC dialect into C in a single
//! pass.  The emitted text is plain C89 suitable for any native toolchain;
//! compiling or running it is the caller's business, as is reading the
//! BASIC source off disk.
//!
//! ## Translation pipeline
//!
//! ```text
//! Source → Lexer → Parser → Emitter → C text
//! ```
//!
//! 1. [`parser::lexer`] — classifies the source into tokens, pulled one at
//!    a time.
//! 2. [`parser::parser`] — recursive descent over the token stream with one
//!    token of lookahead; checks variables-before-use and label rules
//!    inline, and emits C fragments as each construct is recognized.
//! 3. [`emitter`] — accumulates the header (preamble and declarations) and
//!    body (statements) buffers, concatenated once at the end.
//!
//! ## Supported BASIC subset
//!
//! Statements: `PRINT`, `LET`, `INPUT`, `IF/THEN/ENDIF`,
//! `WHILE/REPEAT/ENDWHILE`, `LABEL`, `GOTO`.
//! A single numeric type (C `float`), `#` comments, newline-terminated
//! statements. Forward `GOTO` references are legal; targets are validated
//! at end of program.

pub mod emitter;
pub mod parser;

use crate::parser::parser::{ParseError, Parser};

/// Translate a whole BASIC program into C text.
///
/// Builds a fresh lexer/parser/emitter triple for the run; the first
/// lexical, syntactic, or semantic violation aborts with a [`ParseError`].
pub fn compile(source: &str) -> Result<String, ParseError> {
    Parser::new(source)?.parse_program()
}
