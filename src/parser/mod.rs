//! LOLCODE source parser
//!
//! This module transforms LOLCODE source text into an Abstract Syntax Tree (AST):
//! - [`keywords`]: Keyword table (token kind ↔ canonical spelling)
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser struct, token cursor and errors (tokens → AST)
//! - [`ast`]: AST node definitions
//! - [`render`]: Canonical rendering (AST → source text)
//!
//! # Supported Language
//!
//! - Types: `NOOB`, `TROOF`, `NUMBR`, `NUMBAR`, `YARN`; arrays via `O HAI IM`
//! - Statements: declarations, assignments, casts, `VISIBLE`/`GIMMEH`,
//!   `O RLY?`, `WTF?`, loops, functions, `GTFO`, `FOUND YR`
//! - Expressions: literals, identifiers (`SRS`, `'Z`), `MAEK` casts,
//!   function calls, unary/binary/n-ary operators, `IT`
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with single-token dispatch.
//! Identifier-led forms read the identifier once and branch on the token
//! after it.
//! No external parser generator dependencies.

pub mod ast;
mod declarations;
mod expressions;
pub mod keywords;
pub mod lexer;
pub mod parse;
pub mod render;
mod statements;

pub use parse::{parse_source, ParseError, Parser};
