//! Expression parsing implementation
//!
//! LOLCODE expressions are prefix-only, so there is no precedence to climb:
//! the leading token alone picks the production, with one exception.
//! Identifier-led input is either a plain name or a function call
//! (`I IZ f ... MKAY`); the parser reads the identifier once and continues
//! as a call only if `IZ` follows it.
//!
//! # Supported Expressions
//!
//! - Literals: integers, floats, strings, `WIN`/`FAIL`
//! - Identifiers, including `SRS` and `'Z` forms
//! - Casts: `MAEK <expr> A <type>`
//! - Function calls: `<scope> IZ <name> [YR <expr> [AN YR <expr>]*] MKAY`
//! - Unary: `NOT <expr>`
//! - Binary: `SUM OF <expr> [AN] <expr>` and the other eleven binary keywords
//! - N-ary: `ALL OF`, `ANY OF`, `SMOOSH` with two or more operands and `MKAY`
//! - The implicit variable `IT`
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{TokenKind, TokenValue};
use crate::parser::parse::{Expected, ParseError, Parser};

/// Tokens that can begin an expression
pub(crate) const EXPRESSION_START: &[TokenKind] = &[
    TokenKind::Maek,
    TokenKind::Integer,
    TokenKind::Float,
    TokenKind::String,
    TokenKind::Boolean,
    TokenKind::Identifier,
    TokenKind::Srs,
    TokenKind::It,
    TokenKind::Not,
    TokenKind::SumOf,
    TokenKind::DiffOf,
    TokenKind::ProduktOf,
    TokenKind::QuoshuntOf,
    TokenKind::ModOf,
    TokenKind::BiggrOf,
    TokenKind::SmallrOf,
    TokenKind::BothOf,
    TokenKind::EitherOf,
    TokenKind::WonOf,
    TokenKind::BothSaem,
    TokenKind::Diffrint,
    TokenKind::AllOf,
    TokenKind::AnyOf,
    TokenKind::Smoosh,
];

const CONSTANT_START: &[TokenKind] = &[
    TokenKind::Integer,
    TokenKind::Float,
    TokenKind::String,
    TokenKind::Boolean,
];

/// Operator for a binary keyword
fn binary_op(kind: TokenKind) -> Option<OpType> {
    let op = match kind {
        TokenKind::SumOf => OpType::Add,
        TokenKind::DiffOf => OpType::Sub,
        TokenKind::ProduktOf => OpType::Mult,
        TokenKind::QuoshuntOf => OpType::Div,
        TokenKind::ModOf => OpType::Mod,
        TokenKind::BiggrOf => OpType::Max,
        TokenKind::SmallrOf => OpType::Min,
        TokenKind::BothOf => OpType::And,
        TokenKind::EitherOf => OpType::Or,
        TokenKind::WonOf => OpType::Xor,
        TokenKind::BothSaem => OpType::Eq,
        TokenKind::Diffrint => OpType::Neq,
        _ => return None,
    };
    Some(op)
}

/// Operator for an n-ary keyword
fn nary_op(kind: TokenKind) -> Option<OpType> {
    match kind {
        TokenKind::AllOf => Some(OpType::And),
        TokenKind::AnyOf => Some(OpType::Or),
        TokenKind::Smoosh => Some(OpType::Cat),
        _ => None,
    }
}

impl<'t> Parser<'t> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let kind = self.peek().kind;
        match kind {
            TokenKind::Maek => self.parse_cast_expression(),
            TokenKind::Integer | TokenKind::Float | TokenKind::String | TokenKind::Boolean => {
                Ok(Expression::Constant(self.parse_constant()?))
            }
            TokenKind::Identifier | TokenKind::Srs => {
                let ident = self.parse_identifier()?;
                self.parse_identifier_expression(ident)
            }
            TokenKind::It => {
                self.advance();
                Ok(Expression::ImplicitVariable)
            }
            TokenKind::Not => {
                self.advance();
                let operand = self.parse_expression()?;
                Ok(Expression::Op(OpExpr::new(OpType::Not, vec![operand])?))
            }
            _ => {
                if let Some(op) = binary_op(kind) {
                    self.parse_binary_operation(op)
                } else if let Some(op) = nary_op(kind) {
                    self.parse_nary_operation(op)
                } else {
                    Err(self.unexpected("expression", EXPRESSION_START))
                }
            }
        }
    }

    /// Parse a literal constant
    pub(crate) fn parse_constant(&mut self) -> Result<Constant, ParseError> {
        let token = self.peek();
        let constant = match (token.kind, &token.value) {
            (TokenKind::Integer, Some(TokenValue::Integer(n))) => Constant::Integer(*n),
            (TokenKind::Float, Some(TokenValue::Float(x))) => Constant::Float(*x),
            (TokenKind::Boolean, Some(TokenValue::Boolean(b))) => Constant::Boolean(*b),
            (TokenKind::String, Some(TokenValue::Text(s))) => Constant::String(s.clone()),
            _ => return Err(self.unexpected("constant", CONSTANT_START)),
        };
        self.advance();
        Ok(constant)
    }

    /// Parse cast: MAEK expr A type
    fn parse_cast_expression(&mut self) -> Result<Expression, ParseError> {
        self.expect(TokenKind::Maek)?;
        let target = self.parse_expression()?;
        self.expect(TokenKind::A)?;
        let new_type = self.parse_type()?;

        Ok(Expression::Cast(CastExpr {
            target: Box::new(target),
            new_type,
        }))
    }

    /// Finish an expression whose leading identifier is already parsed:
    /// a call if `IZ` follows, otherwise the identifier itself.
    pub(crate) fn parse_identifier_expression(&mut self, ident: Identifier) -> Result<Expression, ParseError> {
        if self.check(TokenKind::Iz) {
            self.parse_function_call(ident)
        } else {
            Ok(Expression::Identifier(ident))
        }
    }

    /// Parse function call after its scope: IZ name [YR expr [AN YR expr]*] MKAY
    fn parse_function_call(&mut self, scope: Identifier) -> Result<Expression, ParseError> {
        self.expect(TokenKind::Iz)?;
        let name = self.parse_identifier()?;

        let mut args = Vec::new();
        if self.accept(TokenKind::Yr).is_some() {
            args.push(self.parse_expression()?);
            while self.accept(TokenKind::AnYr).is_some() {
                args.push(self.parse_expression()?);
            }
        }

        self.expect(TokenKind::Mkay)?;

        Ok(Expression::FuncCall(FuncCall { scope, name, args }))
    }

    /// Parse binary operation: OP expr [AN] expr
    fn parse_binary_operation(&mut self, op: OpType) -> Result<Expression, ParseError> {
        self.advance();
        let left = self.parse_expression()?;
        self.accept(TokenKind::An);
        let right = self.parse_expression()?;

        Ok(Expression::Op(OpExpr::new(op, vec![left, right])?))
    }

    /// Parse n-ary operation: OP expr ([AN] expr)+ MKAY
    ///
    /// The second operand is parsed unconditionally, so a lone operand
    /// before `MKAY` is reported as a missing expression.
    fn parse_nary_operation(&mut self, op: OpType) -> Result<Expression, ParseError> {
        self.advance();
        let mut args = vec![self.parse_expression()?];

        loop {
            self.accept(TokenKind::An);
            args.push(self.parse_expression()?);

            if self.accept(TokenKind::Mkay).is_some() {
                break;
            }
            if !self.check(TokenKind::An) && !self.check_any(EXPRESSION_START) {
                return Err(self.error_at_current(Expected::Token(TokenKind::Mkay)));
            }
        }

        Ok(Expression::Op(OpExpr::new(op, args)?))
    }
}
