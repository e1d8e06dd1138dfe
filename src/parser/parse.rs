//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, the token cursor, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, cursor primitives, and coordination
//! - `declarations`: identifiers, types, declarations, function and array definitions
//! - `statements`: statement dispatch and the block-structured statements
//! - `expressions`: casts, constants, function calls, and operators
//!
//! # Token cursor
//!
//! The parser borrows a token slice that must end in [`TokenKind::Eof`] and
//! never advances past it. Three primitives drive every production:
//! [`check`](Parser::check) (peek without consuming),
//! [`accept`](Parser::accept) (consume if present, for optional clauses) and
//! [`expect`](Parser::expect) (consume or fail with a [`ParseError::Syntax`]).
//! Where several productions share a leading identifier, it is parsed once
//! and the token after it picks the production, so the cursor never moves
//! backwards.
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use log::{debug, info, trace};
use std::fmt;

/// What a production was looking for when it failed
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    /// A single token category
    Token(TokenKind),
    /// Any token able to start the named construct
    OneOf {
        what: &'static str,
        kinds: &'static [TokenKind],
    },
}

/// How many alternatives an "expected one of" message spells out
const SHOWN_ALTERNATIVES: usize = 3;

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{}", kind),
            Expected::OneOf { what, kinds } => {
                write!(f, "{}", what)?;
                if kinds.is_empty() {
                    return Ok(());
                }
                let shown: Vec<String> = kinds
                    .iter()
                    .take(SHOWN_ALTERNATIVES)
                    .map(ToString::to_string)
                    .collect();
                write!(f, " (one of {}", shown.join(", "))?;
                if kinds.len() > SHOWN_ALTERNATIVES {
                    write!(f, ", ...")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Parser error type
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The token at `location` cannot continue the current production
    Syntax {
        expected: Expected,
        found: TokenKind,
        text: Option<String>,
        location: SourceLocation,
    },

    /// An AST constructor contract was broken
    InvariantViolation { node: &'static str, message: String },

    /// A loop was closed under a different name than it was opened with
    NameMismatch {
        opened: String,
        closed: String,
        location: SourceLocation,
    },

    /// The lexer rejected the source
    Lex {
        message: String,
        location: SourceLocation,
    },

    /// The token slice did not end with an end-of-stream token
    MissingEndOfStream,
}

impl ParseError {
    pub(crate) fn invariant(node: &'static str, message: String) -> Self {
        ParseError::InvariantViolation { node, message }
    }

    /// Source position of the error, when it has one
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            ParseError::Syntax { location, .. }
            | ParseError::NameMismatch { location, .. }
            | ParseError::Lex { location, .. } => Some(location),
            ParseError::InvariantViolation { .. } | ParseError::MissingEndOfStream => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Syntax {
                expected,
                found,
                text,
                location,
            } => {
                write!(f, "Parse error at {}: expected {}, found ", location, expected)?;
                match (found, text) {
                    (TokenKind::String, Some(text)) => write!(f, "string literal \"{}\"", text),
                    (found, Some(text)) => write!(f, "{} '{}'", found, text),
                    (found, None) => write!(f, "{}", found),
                }
            }
            ParseError::InvariantViolation { node, message } => {
                write!(f, "Invalid {} node: {}", node, message)
            }
            ParseError::NameMismatch {
                opened,
                closed,
                location,
            } => write!(
                f,
                "Parse error at {}: loop '{}' closed as '{}'",
                location, opened, closed
            ),
            ParseError::Lex { message, location } => {
                write!(f, "Lexer error at {}: {}", location, message)
            }
            ParseError::MissingEndOfStream => {
                write!(f, "Token stream is not terminated by end of file")
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex {
            message: err.message,
            location: err.location,
        }
    }
}

/// Recursive descent parser for LOLCODE
pub struct Parser<'t> {
    pub(crate) tokens: &'t [Token],
    pub(crate) position: usize,
}

impl<'t> Parser<'t> {
    /// Create a parser over `tokens`, which must end with an end-of-file token.
    pub fn new(tokens: &'t [Token]) -> Result<Self, ParseError> {
        match tokens.last() {
            Some(last) if last.kind == TokenKind::Eof => {
                info!("Parser created with {} tokens", tokens.len());
                Ok(Self {
                    tokens,
                    position: 0,
                })
            }
            _ => Err(ParseError::MissingEndOfStream),
        }
    }

    /// Parse the entire program: `HAI [version] <block> KTHXBYE`
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        self.expect(TokenKind::Hai)?;
        // The version number is checked for shape only.
        if let Some(version) = self.accept(TokenKind::Float) {
            debug!("program declares version {}", version.text().unwrap_or_default());
        }
        self.expect(TokenKind::Newline)?;

        let body = self.parse_block()?;

        self.expect(TokenKind::Kthxbye)?;
        self.accept(TokenKind::Newline);
        self.expect(TokenKind::Eof)?;

        info!("Parsed program with {} top-level statements", body.len());
        Ok(Program::new(body))
    }

    // ===== Cursor =====

    pub(crate) fn peek(&self) -> &'t Token {
        let tokens = self.tokens;
        &tokens[self.position]
    }

    /// True iff the current token has category `kind`; never advances.
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn check_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.peek().kind)
    }

    /// Consume the current token if it has category `kind`.
    pub(crate) fn accept(&mut self, kind: TokenKind) -> Option<&'t Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consume the current token, failing unless it has category `kind`.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<&'t Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(Expected::Token(kind)))
        }
    }

    pub(crate) fn advance(&mut self) -> &'t Token {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            trace!("consume {} at {}", token, token.location);
            self.position += 1;
        }
        token
    }

    // ===== Errors =====

    pub(crate) fn error_at_current(&self, expected: Expected) -> ParseError {
        let token = self.peek();
        ParseError::Syntax {
            expected,
            found: token.kind,
            text: token.text(),
            location: token.location.clone(),
        }
    }

    /// Syntax error for a dispatch point where none of `kinds` was found
    pub(crate) fn unexpected(&self, what: &'static str, kinds: &'static [TokenKind]) -> ParseError {
        self.error_at_current(Expected::OneOf { what, kinds })
    }
}

/// Lex and parse `source`, recording `file` on every identifier.
pub fn parse_source(source: &str, file: &str) -> Result<Program, ParseError> {
    let mut lexer = Lexer::new(source, file);
    let tokens = lexer.tokenize()?;
    let mut parser = Parser::new(&tokens)?;
    parser.parse_program()
}
