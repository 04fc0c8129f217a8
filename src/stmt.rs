//! The statement half of the AST. Mirrors `expr.rs`'s closed-enum-plus-`match` shape.

use std::rc::Rc;

use crate::expr::Expr;
use crate::token::Token;

#[derive(Debug, Clone)]
pub enum Stmt {
    Expression(ExpressionData),
    Print(PrintData),
    Var(VarData),
    Block(BlockData),
    If(IfData),
    While(WhileData),
    Function(FunctionData),
    /// `return`, `break`, and `continue` are all non-local exits threaded through the same
    /// `Flow` value at evaluation time, so they share one AST node distinguished by `keyword`.
    Interrupt(InterruptData),
}

#[derive(Debug, Clone)]
pub struct ExpressionData {
    pub expr: Expr,
}

#[derive(Debug, Clone)]
pub struct PrintData {
    pub expr: Expr,
}

#[derive(Debug, Clone)]
pub struct VarData {
    pub name: Token,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct BlockData {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub struct IfData {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

/// The parser desugars `for` into this, so there is no dedicated `For` node. `increment` is only
/// ever `Some` for a desugared `for`; it runs after the body on every iteration that falls off the
/// end normally or hits a `continue`, so `continue` inside a `for` body still advances the loop.
#[derive(Debug, Clone)]
pub struct WhileData {
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub increment: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct FunctionData {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Rc<Vec<Stmt>>,
}

/// `keyword` is `return`, `break`, or `continue`; `value` is only ever `Some` for `return`.
#[derive(Debug, Clone)]
pub struct InterruptData {
    pub keyword: Token,
    pub value: Option<Expr>,
}

impl Stmt {
    pub fn accept<T>(&self, visitor: &mut dyn StmtVisitor<T>) -> T {
        match self {
            Stmt::Expression(_) => visitor.visit_expression_stmt(self),
            Stmt::Print(_) => visitor.visit_print_stmt(self),
            Stmt::Var(_) => visitor.visit_var_stmt(self),
            Stmt::Block(_) => visitor.visit_block_stmt(self),
            Stmt::If(_) => visitor.visit_if_stmt(self),
            Stmt::While(_) => visitor.visit_while_stmt(self),
            Stmt::Function(_) => visitor.visit_function_stmt(self),
            Stmt::Interrupt(_) => visitor.visit_interrupt_stmt(self),
        }
    }
}

pub trait StmtVisitor<T> {
    fn visit_expression_stmt(&mut self, stmt: &Stmt) -> T;
    fn visit_print_stmt(&mut self, stmt: &Stmt) -> T;
    fn visit_var_stmt(&mut self, stmt: &Stmt) -> T;
    fn visit_block_stmt(&mut self, stmt: &Stmt) -> T;
    fn visit_if_stmt(&mut self, stmt: &Stmt) -> T;
    fn visit_while_stmt(&mut self, stmt: &Stmt) -> T;
    fn visit_function_stmt(&mut self, stmt: &Stmt) -> T;
    fn visit_interrupt_stmt(&mut self, stmt: &Stmt) -> T;
}
