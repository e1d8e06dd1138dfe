//! Statement parsing implementation
//!
//! This module handles parsing of all LOLCODE statement types:
//!
//! - Output and input: `VISIBLE`, `GIMMEH`
//! - Identifier-led forms: casts, declarations, assignments, deallocation
//! - Conditionals: `O RLY?` with `MEBBE` and `NO WAI`, `WTF?` with `OMG`
//! - Loops: `IM IN YR ... IM OUTTA YR`
//! - Jumps: `GTFO`, `FOUND YR`
//! - Bare expressions, whose value lands in `IT`
//!
//! # Grammar
//!
//! ```text
//! block     ::= statement*
//! statement ::= print | input | if | switch | break | return | loop
//!             | func_def | array_def | ident_led | expr NEWLINE
//! ident_led ::= identifier ("IS NOW A" type | "HAS A" ... | "R" expr | "R NOOB" | "IZ" ...)? NEWLINE
//! if        ::= "O RLY?" NEWLINE "YA RLY" NEWLINE block
//!               ("MEBBE" expr NEWLINE block)* ("NO WAI" NEWLINE block)? "OIC" NEWLINE
//! switch    ::= "WTF?" NEWLINE ("OMG" expr NEWLINE block)+ ("OMGWTF" NEWLINE block)? "OIC" NEWLINE
//! loop      ::= "IM IN YR" identifier update? guard? NEWLINE block "IM OUTTA YR" identifier NEWLINE
//! update    ::= ("UPPIN" | "NERFIN" | identifier) "YR" identifier
//! guard     ::= ("TIL" | "WILE") expr
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::expressions::EXPRESSION_START;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::render::render_identifier;
use log::debug;

/// Tokens that can begin a statement. Anything else ends the current block.
pub(crate) const STATEMENT_START: &[TokenKind] = &[
    TokenKind::Visible,
    TokenKind::Gimmeh,
    TokenKind::ORly,
    TokenKind::Wtf,
    TokenKind::Gtfo,
    TokenKind::FoundYr,
    TokenKind::ImInYr,
    TokenKind::HowIz,
    TokenKind::OHaiIm,
    // Expression starters, identifiers included
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

impl<'t> Parser<'t> {
    /// Parse statements until a token that cannot start one.
    ///
    /// The terminator is left for the enclosing construct to expect.
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let mut stmts = Vec::new();

        while self.check_any(STATEMENT_START) {
            stmts.push(self.parse_statement()?);
        }

        debug!("block of {} statements ends at {}", stmts.len(), self.peek());
        Ok(Block::new(stmts))
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.peek().kind {
            TokenKind::Visible => self.parse_print_statement(),
            TokenKind::Gimmeh => self.parse_input_statement(),
            TokenKind::ORly => self.parse_if_statement(),
            TokenKind::Wtf => self.parse_switch_statement(),
            TokenKind::Gtfo => {
                self.advance();
                self.expect(TokenKind::Newline)?;
                Ok(Statement::Break)
            }
            TokenKind::FoundYr => self.parse_return_statement(),
            TokenKind::ImInYr => self.parse_loop_statement(),
            TokenKind::HowIz => self.parse_function_definition(),
            TokenKind::OHaiIm => self.parse_alt_array_definition(),
            TokenKind::Identifier | TokenKind::Srs => self.parse_identifier_statement(),
            _ if self.check_any(EXPRESSION_START) => self.parse_expression_statement(),
            _ => Err(self.unexpected("statement", STATEMENT_START)),
        }
    }

    /// Dispatch on the token that follows a leading identifier.
    ///
    /// Cast, declaration, assignment and deallocation all open with an
    /// identifier. It is parsed once and handed to whichever production the
    /// next token selects; anything else, including `IZ`, is a bare
    /// expression.
    fn parse_identifier_statement(&mut self) -> Result<Statement, ParseError> {
        let ident = self.parse_identifier()?;

        match self.peek().kind {
            TokenKind::IsNowA => self.parse_cast_statement(ident),
            TokenKind::HasA => self.parse_declaration(ident),
            TokenKind::R => self.parse_assignment(ident),
            TokenKind::RNoob => self.parse_deallocation(ident),
            _ => {
                let expr = self.parse_identifier_expression(ident)?;
                self.expect(TokenKind::Newline)?;
                Ok(Statement::Expression(expr))
            }
        }
    }

    /// Parse cast statement after its target: IS NOW A type
    fn parse_cast_statement(&mut self, target: Identifier) -> Result<Statement, ParseError> {
        self.expect(TokenKind::IsNowA)?;
        let new_type = self.parse_type()?;
        self.expect(TokenKind::Newline)?;

        Ok(Statement::Cast(CastStmt { target, new_type }))
    }

    /// Parse assignment after its target: R expr
    fn parse_assignment(&mut self, target: Identifier) -> Result<Statement, ParseError> {
        self.expect(TokenKind::R)?;
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Newline)?;

        Ok(Statement::Assignment(AssignmentStmt { target, expr }))
    }

    /// Parse deallocation after its target: R NOOB
    fn parse_deallocation(&mut self, target: Identifier) -> Result<Statement, ParseError> {
        self.expect(TokenKind::RNoob)?;
        self.expect(TokenKind::Newline)?;

        Ok(Statement::Deallocation(Deallocation { target }))
    }

    fn parse_expression_statement(&mut self) -> Result<Statement, ParseError> {
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Newline)?;
        Ok(Statement::Expression(expr))
    }

    /// Parse print statement: VISIBLE expr+ [!]
    fn parse_print_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::Visible)?;

        let mut args = vec![self.parse_expression()?];
        while self.check_any(EXPRESSION_START) {
            args.push(self.parse_expression()?);
        }

        let nonl = self.accept(TokenKind::Bang).is_some();
        self.expect(TokenKind::Newline)?;

        Ok(Statement::Print(PrintStmt::new(args, nonl)?))
    }

    /// Parse input statement: GIMMEH target
    fn parse_input_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::Gimmeh)?;
        let target = self.parse_identifier()?;
        self.expect(TokenKind::Newline)?;

        Ok(Statement::Input(InputStmt { target }))
    }

    /// Parse return statement: FOUND YR expr
    fn parse_return_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::FoundYr)?;
        let value = self.parse_expression()?;
        self.expect(TokenKind::Newline)?;

        Ok(Statement::Return(ReturnStmt { value }))
    }

    /// Parse if statement: O RLY? YA RLY ... [MEBBE ...]* [NO WAI ...] OIC
    fn parse_if_statement(&mut self) -> Result<Statement, ParseError> {
        let open = self.expect(TokenKind::ORly)?;
        debug!("if statement at {}", open.location);
        self.expect(TokenKind::Newline)?;

        self.expect(TokenKind::YaRly)?;
        self.expect(TokenKind::Newline)?;
        let yes = self.parse_block()?;

        let mut guards = Vec::new();
        let mut blocks = Vec::new();
        while self.accept(TokenKind::Mebbe).is_some() {
            guards.push(self.parse_expression()?);
            self.expect(TokenKind::Newline)?;
            blocks.push(self.parse_block()?);
        }

        let no = if self.accept(TokenKind::NoWai).is_some() {
            self.expect(TokenKind::Newline)?;
            Some(self.parse_block()?)
        } else {
            None
        };

        self.expect(TokenKind::Oic)?;
        self.expect(TokenKind::Newline)?;

        Ok(Statement::IfThenElse(IfThenElse::new(yes, guards, blocks, no)?))
    }

    /// Parse switch statement: WTF? (OMG expr ...)+ [OMGWTF ...] OIC
    fn parse_switch_statement(&mut self) -> Result<Statement, ParseError> {
        let open = self.expect(TokenKind::Wtf)?;
        debug!("switch statement at {}", open.location);
        self.expect(TokenKind::Newline)?;

        let mut guards = Vec::new();
        let mut blocks = Vec::new();

        self.expect(TokenKind::Omg)?;
        loop {
            guards.push(self.parse_expression()?);
            self.expect(TokenKind::Newline)?;
            blocks.push(self.parse_block()?);

            if self.accept(TokenKind::Omg).is_none() {
                break;
            }
        }

        let default = if self.accept(TokenKind::OmgWtf).is_some() {
            self.expect(TokenKind::Newline)?;
            Some(self.parse_block()?)
        } else {
            None
        };

        self.expect(TokenKind::Oic)?;
        self.expect(TokenKind::Newline)?;

        Ok(Statement::Switch(Switch::new(guards, blocks, default)?))
    }

    /// Parse loop: IM IN YR name [update YR var] [TIL|WILE expr] ... IM OUTTA YR name
    fn parse_loop_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::ImInYr)?;
        let name = self.parse_identifier()?;
        debug!("loop '{}' at {}", render_identifier(&name), name.location);

        let (var, update) = match self.parse_loop_update()? {
            Some((var, update)) => (Some(var), Some(update)),
            None => (None, None),
        };

        let guard = if self.accept(TokenKind::Til).is_some() {
            Some(LoopGuard {
                expr: self.parse_expression()?,
                until: true,
            })
        } else if self.accept(TokenKind::Wile).is_some() {
            Some(LoopGuard {
                expr: self.parse_expression()?,
                until: false,
            })
        } else {
            None
        };
        self.expect(TokenKind::Newline)?;

        let body = self.parse_block()?;

        self.expect(TokenKind::ImOuttaYr)?;
        let closing = self.parse_identifier()?;
        let (opened, closed) = (render_identifier(&name), render_identifier(&closing));
        if opened != closed {
            return Err(ParseError::NameMismatch {
                opened,
                closed,
                location: closing.location,
            });
        }
        self.expect(TokenKind::Newline)?;

        Ok(Statement::Loop(Loop::new(name, var, update, guard, body)?))
    }

    /// Parse the optional loop update and lower it to an expression over the
    /// loop variable: `UPPIN` adds one, `NERFIN` subtracts one, and any other
    /// name is called as a unary function in scope `I`.
    fn parse_loop_update(&mut self) -> Result<Option<(Identifier, Expression)>, ParseError> {
        let kind = self.peek().kind;
        let op = match kind {
            TokenKind::Uppin => Some(OpType::Add),
            TokenKind::Nerfin => Some(OpType::Sub),
            TokenKind::Identifier | TokenKind::Srs => None,
            _ => return Ok(None),
        };

        let update = match op {
            Some(op) => {
                self.advance();
                self.expect(TokenKind::Yr)?;
                let var = self.parse_identifier()?;
                let step = vec![
                    Expression::Identifier(var.clone()),
                    Expression::Constant(Constant::Integer(1)),
                ];
                (var, Expression::Op(OpExpr::new(op, step)?))
            }
            None => {
                let name = self.parse_identifier()?;
                self.expect(TokenKind::Yr)?;
                let var = self.parse_identifier()?;
                let call = FuncCall {
                    scope: Identifier::direct("I", name.location.clone()),
                    name,
                    args: vec![Expression::Identifier(var.clone())],
                };
                (var, Expression::FuncCall(call))
            }
        };

        Ok(Some(update))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::TokenKind;
    use crate::parser::parse::{parse_source, Expected, ParseError};

    fn wrap(source: &str) -> String {
        format!("HAI 1.2\n{}\nKTHXBYE\n", source)
    }

    fn body(source: &str) -> Vec<Statement> {
        parse_source(&wrap(source), "test.lol").expect("parse failed").body.stmts
    }

    fn parse_err(source: &str) -> ParseError {
        parse_source(&wrap(source), "test.lol").unwrap_err()
    }

    #[test]
    fn test_parse_print_statement() {
        let stmts = body("VISIBLE \"a\" x SUM OF 1 AN 2!");
        match &stmts[0] {
            Statement::Print(print) => {
                assert_eq!(print.args().len(), 3);
                assert!(print.nonl());
            }
            other => panic!("Expected print statement, got {:?}", other),
        }
        assert!(matches!(parse_err("VISIBLE"), ParseError::Syntax { .. }));
    }

    #[test]
    fn test_identifier_led_dispatch() {
        let stmts = body("x IS NOW A NUMBR\nx R 3\nx R NOOB\nI IZ f MKAY\nx");

        assert!(matches!(&stmts[0], Statement::Cast(c) if c.new_type == TypeNode::Integer));
        assert!(matches!(&stmts[1], Statement::Assignment(a) if a.target.name() == Some("x")));
        assert!(matches!(&stmts[2], Statement::Deallocation(d) if d.target.name() == Some("x")));
        assert!(matches!(&stmts[3], Statement::Expression(Expression::FuncCall(_))));
        assert!(matches!(&stmts[4], Statement::Expression(Expression::Identifier(_))));
    }

    #[test]
    fn test_nested_indirect_target_parses_once() {
        let source = format!("{}x R 1", "SRS ".repeat(40));
        let start = std::time::Instant::now();
        let stmts = body(&source);
        assert!(start.elapsed() < std::time::Duration::from_secs(1));

        match &stmts[0] {
            Statement::Assignment(assign) => {
                assert!(matches!(assign.target.kind, IdentifierKind::Indirect(_)));
                assert_eq!(assign.expr, Expression::Constant(Constant::Integer(1)));
            }
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_declaration_with_slot_target() {
        let stmts = body("I HAS A a'Z b");
        match &stmts[0] {
            Statement::Declaration(decl) => {
                assert_eq!(decl.scope().name(), Some("I"));
                assert_eq!(decl.target().name(), Some("b"));
                let slot = decl.target().slot.as_deref().expect("target has a slot");
                assert_eq!(slot.name(), Some("a"));
                assert!(decl.expr().is_none() && decl.ty().is_none());
            }
            other => panic!("Expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_slot_assignment_target() {
        let stmts = body("kitteh'Z legs R 4");
        match &stmts[0] {
            Statement::Assignment(assign) => {
                assert_eq!(assign.target.name(), Some("legs"));
                assert_eq!(assign.target.slot.as_deref().and_then(Identifier::name), Some("kitteh"));
            }
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_if_chain() {
        let stmts = body(
            "BOTH SAEM x AN 1\nO RLY?\nYA RLY\nVISIBLE \"one\"\nMEBBE BOTH SAEM x AN 2\nVISIBLE \"two\"\nMEBBE BOTH SAEM x AN 3\nGTFO\nNO WAI\nVISIBLE \"many\"\nOIC",
        );
        assert!(matches!(&stmts[0], Statement::Expression(Expression::Op(_))));
        match &stmts[1] {
            Statement::IfThenElse(cond) => {
                assert_eq!(cond.yes().len(), 1);
                assert_eq!(cond.guards().len(), 2);
                assert_eq!(cond.guards().len(), cond.blocks().len());
                assert_eq!(cond.blocks()[1].stmts, vec![Statement::Break]);
                assert!(cond.no().is_some());
            }
            other => panic!("Expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_if_reports_end_of_stream() {
        let err = parse_source("HAI 1.2\nO RLY?\nYA RLY\nVISIBLE \"x\"\n", "test.lol").unwrap_err();
        match err {
            ParseError::Syntax {
                expected, found, ..
            } => {
                assert_eq!(expected, Expected::Token(TokenKind::Oic));
                assert_eq!(found, TokenKind::Eof);
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_switch() {
        let stmts = body("WTF?\nOMG 1\nVISIBLE \"one\"\nGTFO\nOMG 2\nOMGWTF\nVISIBLE \"other\"\nOIC");
        match &stmts[0] {
            Statement::Switch(switch) => {
                assert_eq!(switch.guards().len(), 2);
                assert_eq!(switch.blocks().len(), 2);
                assert_eq!(switch.blocks()[0].len(), 2);
                assert!(switch.blocks()[1].is_empty());
                assert_eq!(switch.default().map(Block::len), Some(1));
            }
            other => panic!("Expected switch, got {:?}", other),
        }
        assert!(matches!(parse_err("WTF?\nOIC"), ParseError::Syntax { .. }));
    }

    #[test]
    fn test_parse_loop_with_update_and_guard() {
        let stmts = body("IM IN YR loop UPPIN YR i TIL BOTH SAEM i AN 10\nVISIBLE i\nIM OUTTA YR loop");
        match &stmts[0] {
            Statement::Loop(lp) => {
                assert_eq!(lp.name().name(), Some("loop"));
                assert_eq!(lp.var().and_then(Identifier::name), Some("i"));
                match lp.update() {
                    Some(Expression::Op(op)) => {
                        assert_eq!(op.op(), OpType::Add);
                        assert_eq!(op.args()[1], Expression::Constant(Constant::Integer(1)));
                    }
                    other => panic!("Expected operator update, got {:?}", other),
                }
                let guard = lp.guard().expect("loop has a guard");
                assert!(guard.until);
                assert_eq!(lp.body().len(), 1);
            }
            other => panic!("Expected loop, got {:?}", other),
        }
    }

    #[test]
    fn test_loop_guard_polarity_and_function_update() {
        let stmts = body("IM IN YR loop twice YR n WILE n\nIM OUTTA YR loop\nIM IN YR forever\nGTFO\nIM OUTTA YR forever");
        match &stmts[0] {
            Statement::Loop(lp) => {
                assert!(!lp.guard().expect("loop has a guard").until);
                match lp.update() {
                    Some(Expression::FuncCall(call)) => {
                        assert_eq!(call.scope.name(), Some("I"));
                        assert_eq!(call.name.name(), Some("twice"));
                        assert_eq!(call.args.len(), 1);
                    }
                    other => panic!("Expected call update, got {:?}", other),
                }
            }
            other => panic!("Expected loop, got {:?}", other),
        }
        match &stmts[1] {
            Statement::Loop(lp) => {
                assert!(lp.var().is_none() && lp.update().is_none() && lp.guard().is_none());
            }
            other => panic!("Expected loop, got {:?}", other),
        }
    }

    #[test]
    fn test_loop_name_mismatch() {
        match parse_err("IM IN YR a\nGTFO\nIM OUTTA YR b") {
            ParseError::NameMismatch { opened, closed, .. } => {
                assert_eq!(opened, "a");
                assert_eq!(closed, "b");
            }
            other => panic!("Expected name mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_non_statement_ends_block() {
        let err = parse_err("VISIBLE 1\nOIC");
        assert!(matches!(
            err,
            ParseError::Syntax {
                expected: Expected::Token(TokenKind::Kthxbye),
                found: TokenKind::Oic,
                ..
            }
        ));
    }

    #[test]
    fn test_input_and_return() {
        let stmts = body("GIMMEH name\nFOUND YR IT");
        assert!(matches!(&stmts[0], Statement::Input(i) if i.target.name() == Some("name")));
        assert!(matches!(
            &stmts[1],
            Statement::Return(ReturnStmt {
                value: Expression::ImplicitVariable
            })
        ));
    }
}
