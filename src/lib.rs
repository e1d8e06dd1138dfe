//! # Introduction
//!
//! lolfront is the front end of a LOLCODE interpreter: it turns source text
//! into a validated abstract syntax tree that an evaluator can execute
//! without further checking.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → (evaluator)
//!                                     ↘ Renderer → Source
//! ```
//!
//! 1. [`parser::lexer`] — splits the source into tokens, matching multi-word
//!    keywords such as `IM OUTTA YR` longest first.
//! 2. [`parser::parse`] — recursive descent over the token slice, producing a
//!    [`parser::ast::Program`] or the first [`parser::ParseError`].
//! 3. [`parser::ast`] — the node types; constructors enforce structural
//!    invariants such as paired guard and block lists.
//! 4. [`parser::render`] — prints a tree back as canonical LOLCODE.
//!
//! ## Example
//!
//! ```
//! use lolfront::parser::{ast::Statement, parse_source};
//!
//! let program = parse_source("HAI 1.2\nVISIBLE \"HAI WORLD\"\nKTHXBYE\n", "hai.lol").unwrap();
//! assert!(matches!(program.body.stmts[0], Statement::Print(_)));
//! ```

pub mod parser;
