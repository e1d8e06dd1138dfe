// AST (Abstract Syntax Tree) definitions for the LOLCODE front end

use super::parse::ParseError;
use std::fmt;
use std::sync::Arc;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: Arc<str>,
    pub line: usize,
}

impl SourceLocation {
    pub fn new(file: Arc<str>, line: usize) -> Self {
        Self { file, line }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Cast and declaration targets. Arrays are never a `TypeNode`; they are
/// built structurally through [`AltArrayDef`] and declaration inheritance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeNode {
    Nil,     // NOOB
    Boolean, // TROOF
    Integer, // NUMBR
    Float,   // NUMBAR
    String,  // YARN
}

/// Literal values
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Integer(i64),
    Float(f32),
    Boolean(bool),
    String(String),
    Nil,
    Array,
}

/// How an identifier spells its name
#[derive(Debug, Clone, PartialEq)]
pub enum IdentifierKind {
    /// A name written literally
    Direct(String),
    /// `SRS <expr>`: the name is the runtime value of the expression
    Indirect(Box<Expression>),
}

/// A (possibly slot-qualified) name reference.
///
/// `a'Z b` is the identifier `b` with `slot` set to `a`: `b` is looked up
/// inside whatever `a` resolves to. Qualification nests, so `a'Z b'Z c` is
/// `c` in `b` in `a`.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub kind: IdentifierKind,
    pub location: SourceLocation,
    pub slot: Option<Box<Identifier>>,
}

impl Identifier {
    pub fn direct(name: impl Into<String>, location: SourceLocation) -> Self {
        Identifier {
            kind: IdentifierKind::Direct(name.into()),
            location,
            slot: None,
        }
    }

    pub fn indirect(expr: Expression, location: SourceLocation) -> Self {
        Identifier {
            kind: IdentifierKind::Indirect(Box::new(expr)),
            location,
            slot: None,
        }
    }

    /// Qualify this identifier so it resolves inside `scope`.
    pub fn in_slot(mut self, scope: Identifier) -> Self {
        self.slot = Some(Box::new(scope));
        self
    }

    /// The literal name, for direct identifiers
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            IdentifierKind::Direct(name) => Some(name),
            IdentifierKind::Indirect(_) => None,
        }
    }
}

/// Ordered, possibly empty list of expressions
pub type ExprList = Vec<Expression>;

/// Operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpType {
    Add,  // SUM OF
    Sub,  // DIFF OF
    Mult, // PRODUKT OF
    Div,  // QUOSHUNT OF
    Mod,  // MOD OF
    Max,  // BIGGR OF
    Min,  // SMALLR OF
    And,  // BOTH OF, ALL OF
    Or,   // EITHER OF, ANY OF
    Xor,  // WON OF
    Not,  // NOT
    Eq,   // BOTH SAEM
    Neq,  // DIFFRINT
    Cat,  // SMOOSH
}

impl OpType {
    /// Whether `count` operands is a legal argument list for this operator
    pub fn accepts(self, count: usize) -> bool {
        match self {
            OpType::Not => count == 1,
            OpType::And | OpType::Or | OpType::Cat => count >= 2,
            _ => count == 2,
        }
    }
}

/// `MAEK <expr> A <type>`
#[derive(Debug, Clone, PartialEq)]
pub struct CastExpr {
    pub target: Box<Expression>,
    pub new_type: TypeNode,
}

/// `<scope> IZ <name> [YR <expr> [AN YR <expr>]*] MKAY`
#[derive(Debug, Clone, PartialEq)]
pub struct FuncCall {
    pub scope: Identifier,
    pub name: Identifier,
    pub args: ExprList,
}

/// Operator application
#[derive(Debug, Clone, PartialEq)]
pub struct OpExpr {
    op: OpType,
    args: ExprList,
}

impl OpExpr {
    pub fn new(op: OpType, args: ExprList) -> Result<Self, ParseError> {
        if !op.accepts(args.len()) {
            return Err(ParseError::invariant(
                "OpExpr",
                format!("{:?} cannot take {} operand(s)", op, args.len()),
            ));
        }
        Ok(OpExpr { op, args })
    }

    pub fn op(&self) -> OpType {
        self.op
    }

    pub fn args(&self) -> &[Expression] {
        &self.args
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Cast(CastExpr),
    Constant(Constant),
    Identifier(Identifier),
    FuncCall(FuncCall),
    Op(OpExpr),
    /// `IT`
    ImplicitVariable,
}

/// Ordered statement sequence; order is execution order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<Statement>,
}

impl Block {
    pub fn new(stmts: Vec<Statement>) -> Self {
        Block { stmts }
    }

    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

/// `<target> IS NOW A <type>`
#[derive(Debug, Clone, PartialEq)]
pub struct CastStmt {
    pub target: Identifier,
    pub new_type: TypeNode,
}

/// `VISIBLE <expr>+ [!]`; `nonl` is set by the trailing bang
#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    args: ExprList,
    nonl: bool,
}

impl PrintStmt {
    pub fn new(args: ExprList, nonl: bool) -> Result<Self, ParseError> {
        if args.is_empty() {
            return Err(ParseError::invariant("PrintStmt", "nothing to print".to_string()));
        }
        Ok(PrintStmt { args, nonl })
    }

    pub fn args(&self) -> &[Expression] {
        &self.args
    }

    pub fn nonl(&self) -> bool {
        self.nonl
    }
}

/// `GIMMEH <target>`
#[derive(Debug, Clone, PartialEq)]
pub struct InputStmt {
    pub target: Identifier,
}

/// `<target> R <expr>`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStmt {
    pub target: Identifier,
    pub expr: Expression,
}

/// `<scope> HAS A <target> [ITZ <expr> | ITZ A <type> | ITZ LIEK A <parent>]`
///
/// At most one of `expr` and `ty` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    scope: Identifier,
    target: Identifier,
    expr: Option<Expression>,
    ty: Option<TypeNode>,
    parent: Option<Identifier>,
}

impl Declaration {
    pub fn new(
        scope: Identifier,
        target: Identifier,
        expr: Option<Expression>,
        ty: Option<TypeNode>,
        parent: Option<Identifier>,
    ) -> Result<Self, ParseError> {
        if expr.is_some() && ty.is_some() {
            return Err(ParseError::invariant(
                "Declaration",
                "initialized with both an expression and a type".to_string(),
            ));
        }
        Ok(Declaration {
            scope,
            target,
            expr,
            ty,
            parent,
        })
    }

    pub fn scope(&self) -> &Identifier {
        &self.scope
    }

    pub fn target(&self) -> &Identifier {
        &self.target
    }

    pub fn expr(&self) -> Option<&Expression> {
        self.expr.as_ref()
    }

    pub fn ty(&self) -> Option<TypeNode> {
        self.ty
    }

    pub fn parent(&self) -> Option<&Identifier> {
        self.parent.as_ref()
    }
}

/// `O RLY?` with `YA RLY`, `MEBBE` branches and optional `NO WAI`
#[derive(Debug, Clone, PartialEq)]
pub struct IfThenElse {
    yes: Block,
    guards: ExprList,
    blocks: Vec<Block>,
    no: Option<Block>,
}

impl IfThenElse {
    pub fn new(
        yes: Block,
        guards: ExprList,
        blocks: Vec<Block>,
        no: Option<Block>,
    ) -> Result<Self, ParseError> {
        if guards.len() != blocks.len() {
            return Err(ParseError::invariant(
                "IfThenElse",
                format!("{} guards for {} blocks", guards.len(), blocks.len()),
            ));
        }
        Ok(IfThenElse {
            yes,
            guards,
            blocks,
            no,
        })
    }

    pub fn yes(&self) -> &Block {
        &self.yes
    }

    /// `MEBBE` conditions, parallel to [`IfThenElse::blocks`]
    pub fn guards(&self) -> &[Expression] {
        &self.guards
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn no(&self) -> Option<&Block> {
        self.no.as_ref()
    }
}

/// `WTF?` with one or more `OMG` cases and an optional `OMGWTF` default
#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    guards: ExprList,
    blocks: Vec<Block>,
    default: Option<Block>,
}

impl Switch {
    pub fn new(guards: ExprList, blocks: Vec<Block>, default: Option<Block>) -> Result<Self, ParseError> {
        if guards.len() != blocks.len() {
            return Err(ParseError::invariant(
                "Switch",
                format!("{} guards for {} blocks", guards.len(), blocks.len()),
            ));
        }
        if guards.is_empty() {
            return Err(ParseError::invariant("Switch", "no cases".to_string()));
        }
        Ok(Switch {
            guards,
            blocks,
            default,
        })
    }

    pub fn guards(&self) -> &[Expression] {
        &self.guards
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn default(&self) -> Option<&Block> {
        self.default.as_ref()
    }
}

/// `FOUND YR <expr>`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Expression,
}

/// Loop continuation condition; `until` is set for `TIL`, clear for `WILE`
#[derive(Debug, Clone, PartialEq)]
pub struct LoopGuard {
    pub expr: Expression,
    pub until: bool,
}

/// `IM IN YR <name> [<update> YR <var>] [TIL|WILE <expr>] ... IM OUTTA YR <name>`
#[derive(Debug, Clone, PartialEq)]
pub struct Loop {
    name: Identifier,
    var: Option<Identifier>,
    update: Option<Expression>,
    guard: Option<LoopGuard>,
    body: Block,
}

impl Loop {
    pub fn new(
        name: Identifier,
        var: Option<Identifier>,
        update: Option<Expression>,
        guard: Option<LoopGuard>,
        body: Block,
    ) -> Result<Self, ParseError> {
        if var.is_some() != update.is_some() {
            return Err(ParseError::invariant(
                "Loop",
                "update and loop variable must appear together".to_string(),
            ));
        }
        let update_ok = match &update {
            None | Some(Expression::FuncCall(_)) => true,
            Some(Expression::Op(op)) => matches!(op.op(), OpType::Add | OpType::Sub),
            Some(_) => false,
        };
        if !update_ok {
            return Err(ParseError::invariant(
                "Loop",
                "update must be an increment, a decrement or a function call".to_string(),
            ));
        }
        Ok(Loop {
            name,
            var,
            update,
            guard,
            body,
        })
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn var(&self) -> Option<&Identifier> {
        self.var.as_ref()
    }

    pub fn update(&self) -> Option<&Expression> {
        self.update.as_ref()
    }

    pub fn guard(&self) -> Option<&LoopGuard> {
        self.guard.as_ref()
    }

    pub fn body(&self) -> &Block {
        &self.body
    }
}

/// `<target> R NOOB`
#[derive(Debug, Clone, PartialEq)]
pub struct Deallocation {
    pub target: Identifier,
}

/// `HOW IZ <scope> <name> [YR <arg> [AN YR <arg>]*] ... IF U SAY SO`
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef {
    pub scope: Identifier,
    pub name: Identifier,
    pub args: Vec<Identifier>,
    pub body: Block,
}

/// `O HAI IM <name> [IM LIEK <parent>] ... KTHX`
#[derive(Debug, Clone, PartialEq)]
pub struct AltArrayDef {
    pub name: Identifier,
    pub body: Block,
    pub parent: Option<Identifier>,
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Cast(CastStmt),
    Print(PrintStmt),
    Input(InputStmt),
    Assignment(AssignmentStmt),
    Declaration(Declaration),
    IfThenElse(IfThenElse),
    Switch(Switch),
    Break,
    Return(ReturnStmt),
    Loop(Loop),
    Deallocation(Deallocation),
    FuncDef(FuncDef),
    Expression(Expression),
    AltArrayDef(AltArrayDef),
}

/// Top-level program structure
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub body: Block,
}

impl Program {
    pub fn new(body: Block) -> Self {
        Program { body }
    }
}
