//! Declaration parsing implementation
//!
//! This module handles the name-binding forms of the language and the
//! building blocks they share:
//!
//! - Identifiers: direct names, `SRS <expr>` indirect names, `'Z` slot access
//! - Types: `NOOB`, `TROOF`, `NUMBR`, `NUMBAR`, `YARN`
//! - Variable declarations: `I HAS A x ITZ 5`
//! - Function definitions: `HOW IZ I f YR a AN YR b ... IF U SAY SO`
//! - Alternate array definitions: `O HAI IM arr IM LIEK base ... KTHX`
//!
//! # Grammar
//!
//! ```text
//! identifier  ::= atom ("'Z" atom)*
//! atom        ::= IDENTIFIER | "SRS" expr
//! type        ::= "NOOB" | "TROOF" | "NUMBR" | "NUMBAR" | "YARN"
//! declaration ::= identifier "HAS A" identifier init? NEWLINE
//! init        ::= "ITZ" expr | "ITZ A" type | "ITZ LIEK A" identifier
//! func_def    ::= "HOW IZ" identifier identifier params? NEWLINE block "IF U SAY SO" NEWLINE
//! params      ::= "YR" identifier ("AN YR" identifier)*
//! array_def   ::= "O HAI IM" identifier ("IM LIEK" identifier)? NEWLINE block "KTHX" NEWLINE
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{TokenKind, TokenValue};
use crate::parser::parse::{ParseError, Parser};
use log::debug;

/// Tokens that can begin an identifier
pub(crate) const IDENTIFIER_START: &[TokenKind] = &[TokenKind::Identifier, TokenKind::Srs];

/// Tokens that name a type
pub(crate) const TYPE_START: &[TokenKind] = &[
    TokenKind::Noob,
    TokenKind::Troof,
    TokenKind::Numbr,
    TokenKind::Numbar,
    TokenKind::Yarn,
];

impl<'t> Parser<'t> {
    /// Parse a possibly slot-qualified identifier.
    ///
    /// Each `'Z` makes everything read so far the slot of the next name, so
    /// `a'Z b'Z c` yields `c` whose slot is `b` whose slot is `a`.
    pub(crate) fn parse_identifier(&mut self) -> Result<Identifier, ParseError> {
        let mut ident = self.parse_identifier_atom()?;
        while self.accept(TokenKind::ApostropheZ).is_some() {
            ident = self.parse_identifier_atom()?.in_slot(ident);
        }
        Ok(ident)
    }

    fn parse_identifier_atom(&mut self) -> Result<Identifier, ParseError> {
        let token = self.peek();
        match (token.kind, &token.value) {
            (TokenKind::Identifier, Some(TokenValue::Text(name))) => {
                self.advance();
                Ok(Identifier::direct(name.clone(), token.location.clone()))
            }
            (TokenKind::Srs, _) => {
                self.advance();
                let expr = self.parse_expression()?;
                Ok(Identifier::indirect(expr, token.location.clone()))
            }
            _ => Err(self.unexpected("identifier", IDENTIFIER_START)),
        }
    }

    /// Parse a type keyword
    pub(crate) fn parse_type(&mut self) -> Result<TypeNode, ParseError> {
        let ty = match self.peek().kind {
            TokenKind::Noob => TypeNode::Nil,
            TokenKind::Troof => TypeNode::Boolean,
            TokenKind::Numbr => TypeNode::Integer,
            TokenKind::Numbar => TypeNode::Float,
            TokenKind::Yarn => TypeNode::String,
            _ => return Err(self.unexpected("type", TYPE_START)),
        };
        self.advance();
        Ok(ty)
    }

    /// Parse declaration after its scope: HAS A target [initialization]
    pub(crate) fn parse_declaration(&mut self, scope: Identifier) -> Result<Statement, ParseError> {
        self.expect(TokenKind::HasA)?;
        let target = self.parse_identifier()?;

        let (expr, ty, parent) = if self.accept(TokenKind::Itz).is_some() {
            (Some(self.parse_expression()?), None, None)
        } else if self.accept(TokenKind::ItzA).is_some() {
            (None, Some(self.parse_type()?), None)
        } else if self.accept(TokenKind::ItzLiekA).is_some() {
            (None, None, Some(self.parse_identifier()?))
        } else {
            (None, None, None)
        };

        self.expect(TokenKind::Newline)?;

        Ok(Statement::Declaration(Declaration::new(
            scope, target, expr, ty, parent,
        )?))
    }

    /// Parse function definition: HOW IZ scope name [params] ... IF U SAY SO
    pub(crate) fn parse_function_definition(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::HowIz)?;
        let scope = self.parse_identifier()?;
        let name = self.parse_identifier()?;
        debug!("function definition at {}", name.location);

        let args = self.parse_parameter_list()?;
        self.expect(TokenKind::Newline)?;

        let body = self.parse_block()?;

        self.expect(TokenKind::IfUSaySo)?;
        self.expect(TokenKind::Newline)?;

        Ok(Statement::FuncDef(FuncDef {
            scope,
            name,
            args,
            body,
        }))
    }

    /// Parse parameter list: YR a AN YR b ...
    fn parse_parameter_list(&mut self) -> Result<Vec<Identifier>, ParseError> {
        let mut params = Vec::new();

        if self.accept(TokenKind::Yr).is_none() {
            return Ok(params);
        }

        params.push(self.parse_identifier()?);
        while self.accept(TokenKind::AnYr).is_some() {
            params.push(self.parse_identifier()?);
        }

        Ok(params)
    }

    /// Parse alternate array definition: O HAI IM name [IM LIEK parent] ... KTHX
    pub(crate) fn parse_alt_array_definition(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::OHaiIm)?;
        let name = self.parse_identifier()?;
        debug!("array definition at {}", name.location);

        let parent = if self.accept(TokenKind::ImLiek).is_some() {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        self.expect(TokenKind::Newline)?;

        let body = self.parse_block()?;

        self.expect(TokenKind::Kthx)?;
        self.expect(TokenKind::Newline)?;

        Ok(Statement::AltArrayDef(AltArrayDef { name, body, parent }))
    }
}
