//! Canonical source rendering
//!
//! Turns an AST back into LOLCODE text using the keyword table spelling.
//! The output is one statement per line with four spaces of indentation per
//! block level, and re-parses to an equal tree. Two spellings are
//! normalized along the way: a two-operand `ALL OF`/`ANY OF` prints as
//! `BOTH OF`/`EITHER OF`, and the optional `AN` between operands is always
//! written.
//!
//! [`Constant::Nil`] and [`Constant::Array`] never come out of the parser;
//! they print as `NOOB` and `BUKKIT` for diagnostics only.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;

const INDENT: &str = "    ";

/// Render a whole program, `HAI` through `KTHXBYE`.
pub fn render_program(program: &Program) -> String {
    let mut renderer = Renderer::default();
    renderer.line(&format!("{} 1.2", TokenKind::Hai.keyword()));
    renderer.block(&program.body);
    renderer.line(TokenKind::Kthxbye.keyword());
    renderer.out
}

/// Render an identifier as written: `name`, `SRS <expr>`, or `slot'Z name`.
pub fn render_identifier(ident: &Identifier) -> String {
    let own = match &ident.kind {
        IdentifierKind::Direct(name) => name.clone(),
        IdentifierKind::Indirect(expr) => {
            format!("{} {}", TokenKind::Srs.keyword(), render_expression(expr))
        }
    };

    match &ident.slot {
        Some(slot) => format!("{}{} {}", render_identifier(slot), TokenKind::ApostropheZ.keyword(), own),
        None => own,
    }
}

pub fn render_type(ty: TypeNode) -> &'static str {
    let kind = match ty {
        TypeNode::Nil => TokenKind::Noob,
        TypeNode::Boolean => TokenKind::Troof,
        TypeNode::Integer => TokenKind::Numbr,
        TypeNode::Float => TokenKind::Numbar,
        TypeNode::String => TokenKind::Yarn,
    };
    kind.keyword()
}

pub fn render_constant(constant: &Constant) -> String {
    match constant {
        Constant::Integer(n) => n.to_string(),
        Constant::Float(x) => {
            let text = x.to_string();
            if text.contains('.') {
                text
            } else {
                format!("{}.0", text)
            }
        }
        Constant::Boolean(true) => "WIN".to_string(),
        Constant::Boolean(false) => "FAIL".to_string(),
        Constant::String(s) => format!("\"{}\"", s),
        Constant::Nil => TokenKind::Noob.keyword().to_string(),
        Constant::Array => TokenKind::Bukkit.keyword().to_string(),
    }
}

pub fn render_expression(expr: &Expression) -> String {
    match expr {
        Expression::Cast(cast) => format!(
            "{} {} {} {}",
            TokenKind::Maek.keyword(),
            render_expression(&cast.target),
            TokenKind::A.keyword(),
            render_type(cast.new_type)
        ),
        Expression::Constant(constant) => render_constant(constant),
        Expression::Identifier(ident) => render_identifier(ident),
        Expression::FuncCall(call) => {
            let mut text = format!(
                "{} {} {}",
                render_identifier(&call.scope),
                TokenKind::Iz.keyword(),
                render_identifier(&call.name)
            );
            push_list(&mut text, TokenKind::Yr, TokenKind::AnYr, call.args.iter().map(render_expression));
            text.push(' ');
            text.push_str(TokenKind::Mkay.keyword());
            text
        }
        Expression::Op(op) => render_operation(op),
        Expression::ImplicitVariable => TokenKind::It.keyword().to_string(),
    }
}

fn render_operation(op: &OpExpr) -> String {
    let args = op.args();
    let (keyword, terminated) = match op.op() {
        OpType::Not => (TokenKind::Not, false),
        OpType::Add => (TokenKind::SumOf, false),
        OpType::Sub => (TokenKind::DiffOf, false),
        OpType::Mult => (TokenKind::ProduktOf, false),
        OpType::Div => (TokenKind::QuoshuntOf, false),
        OpType::Mod => (TokenKind::ModOf, false),
        OpType::Max => (TokenKind::BiggrOf, false),
        OpType::Min => (TokenKind::SmallrOf, false),
        OpType::And if args.len() > 2 => (TokenKind::AllOf, true),
        OpType::And => (TokenKind::BothOf, false),
        OpType::Or if args.len() > 2 => (TokenKind::AnyOf, true),
        OpType::Or => (TokenKind::EitherOf, false),
        OpType::Xor => (TokenKind::WonOf, false),
        OpType::Eq => (TokenKind::BothSaem, false),
        OpType::Neq => (TokenKind::Diffrint, false),
        OpType::Cat => (TokenKind::Smoosh, true),
    };

    let operands: Vec<String> = args.iter().map(render_expression).collect();
    let separator = format!(" {} ", TokenKind::An.keyword());
    let mut text = format!("{} {}", keyword.keyword(), operands.join(&separator));
    if terminated {
        text.push(' ');
        text.push_str(TokenKind::Mkay.keyword());
    }
    text
}

/// Append ` YR a AN YR b ...`, or nothing for an empty list.
fn push_list(text: &mut String, first: TokenKind, rest: TokenKind, items: impl Iterator<Item = String>) {
    for (i, item) in items.enumerate() {
        let kind = if i == 0 { first } else { rest };
        text.push(' ');
        text.push_str(kind.keyword());
        text.push(' ');
        text.push_str(&item);
    }
}

#[derive(Default)]
struct Renderer {
    out: String,
    depth: usize,
}

impl Renderer {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Render `block` one level deeper than the current line.
    fn block(&mut self, block: &Block) {
        self.depth += 1;
        for stmt in &block.stmts {
            self.statement(stmt);
        }
        self.depth -= 1;
    }

    fn statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Cast(cast) => self.line(&format!(
                "{} {} {}",
                render_identifier(&cast.target),
                TokenKind::IsNowA.keyword(),
                render_type(cast.new_type)
            )),
            Statement::Print(print) => {
                let args: Vec<String> = print.args().iter().map(render_expression).collect();
                let bang = if print.nonl() { TokenKind::Bang.keyword() } else { "" };
                self.line(&format!("{} {}{}", TokenKind::Visible.keyword(), args.join(" "), bang));
            }
            Statement::Input(input) => self.line(&format!(
                "{} {}",
                TokenKind::Gimmeh.keyword(),
                render_identifier(&input.target)
            )),
            Statement::Assignment(assign) => self.line(&format!(
                "{} {} {}",
                render_identifier(&assign.target),
                TokenKind::R.keyword(),
                render_expression(&assign.expr)
            )),
            Statement::Declaration(decl) => self.declaration(decl),
            Statement::IfThenElse(cond) => {
                self.line(TokenKind::ORly.keyword());
                self.line(TokenKind::YaRly.keyword());
                self.block(cond.yes());
                for (guard, block) in cond.guards().iter().zip(cond.blocks()) {
                    self.line(&format!("{} {}", TokenKind::Mebbe.keyword(), render_expression(guard)));
                    self.block(block);
                }
                if let Some(no) = cond.no() {
                    self.line(TokenKind::NoWai.keyword());
                    self.block(no);
                }
                self.line(TokenKind::Oic.keyword());
            }
            Statement::Switch(switch) => {
                self.line(TokenKind::Wtf.keyword());
                for (guard, block) in switch.guards().iter().zip(switch.blocks()) {
                    self.line(&format!("{} {}", TokenKind::Omg.keyword(), render_expression(guard)));
                    self.block(block);
                }
                if let Some(default) = switch.default() {
                    self.line(TokenKind::OmgWtf.keyword());
                    self.block(default);
                }
                self.line(TokenKind::Oic.keyword());
            }
            Statement::Break => self.line(TokenKind::Gtfo.keyword()),
            Statement::Return(ret) => self.line(&format!(
                "{} {}",
                TokenKind::FoundYr.keyword(),
                render_expression(&ret.value)
            )),
            Statement::Loop(lp) => self.loop_statement(lp),
            Statement::Deallocation(dealloc) => self.line(&format!(
                "{} {}",
                render_identifier(&dealloc.target),
                TokenKind::RNoob.keyword()
            )),
            Statement::FuncDef(def) => {
                let mut header = format!(
                    "{} {} {}",
                    TokenKind::HowIz.keyword(),
                    render_identifier(&def.scope),
                    render_identifier(&def.name)
                );
                push_list(&mut header, TokenKind::Yr, TokenKind::AnYr, def.args.iter().map(render_identifier));
                self.line(&header);
                self.block(&def.body);
                self.line(TokenKind::IfUSaySo.keyword());
            }
            Statement::Expression(expr) => self.line(&render_expression(expr)),
            Statement::AltArrayDef(def) => {
                let mut header = format!("{} {}", TokenKind::OHaiIm.keyword(), render_identifier(&def.name));
                if let Some(parent) = &def.parent {
                    header.push_str(&format!(" {} {}", TokenKind::ImLiek.keyword(), render_identifier(parent)));
                }
                self.line(&header);
                self.block(&def.body);
                self.line(TokenKind::Kthx.keyword());
            }
        }
    }

    fn declaration(&mut self, decl: &Declaration) {
        let mut text = format!(
            "{} {} {}",
            render_identifier(decl.scope()),
            TokenKind::HasA.keyword(),
            render_identifier(decl.target())
        );

        if let Some(expr) = decl.expr() {
            text.push_str(&format!(" {} {}", TokenKind::Itz.keyword(), render_expression(expr)));
        } else if let Some(ty) = decl.ty() {
            text.push_str(&format!(" {} {}", TokenKind::ItzA.keyword(), render_type(ty)));
        } else if let Some(parent) = decl.parent() {
            text.push_str(&format!(" {} {}", TokenKind::ItzLiekA.keyword(), render_identifier(parent)));
        }

        self.line(&text);
    }

    fn loop_statement(&mut self, lp: &Loop) {
        let mut header = format!("{} {}", TokenKind::ImInYr.keyword(), render_identifier(lp.name()));

        if let (Some(var), Some(update)) = (lp.var(), lp.update()) {
            let step = match update {
                Expression::Op(op) if op.op() == OpType::Sub => TokenKind::Nerfin.keyword().to_string(),
                Expression::Op(_) => TokenKind::Uppin.keyword().to_string(),
                Expression::FuncCall(call) => render_identifier(&call.name),
                other => render_expression(other),
            };
            header.push_str(&format!(" {} {} {}", step, TokenKind::Yr.keyword(), render_identifier(var)));
        }

        if let Some(guard) = lp.guard() {
            let keyword = if guard.until { TokenKind::Til } else { TokenKind::Wile };
            header.push_str(&format!(" {} {}", keyword.keyword(), render_expression(&guard.expr)));
        }

        self.line(&header);
        self.block(lp.body());
        self.line(&format!("{} {}", TokenKind::ImOuttaYr.keyword(), render_identifier(lp.name())));
    }
}
