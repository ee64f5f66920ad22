//! BASIC source code frontend
//!
//! This module translates BASIC source text into C text:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parser`]: Recursive descent parsing, inline semantic checks, and
//!   code emission (tokens → C)
//!
//! # Supported dialect
//!
//! A tiny structured BASIC:
//! - Statements: `PRINT`, `LET`, `INPUT`, `IF…THEN…ENDIF`,
//!   `WHILE…REPEAT…ENDWHILE`, `LABEL`, `GOTO`
//! - One numeric type (translated as C `float`), string literals in `PRINT`
//!   only
//! - `#` comments; every statement ends at a line break
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent with one token of lookahead, pulled from
//! the lexer on demand. There is no AST and no separate code generation
//! pass: each grammar rule emits its translation as it is recognized.

pub mod lexer;
pub mod parser;
