use std::collections::HashMap;
use std::mem;

use crate::diagnostics::Diagnostics;
use crate::expr::{Expr, ExprId, ExprVisitor};
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::{Token, Type};

/// Maps each variable-reference expression to how many scopes out its binding lives, so the
/// evaluator can go straight to the right `Environment` instead of searching outward at every
/// lookup. Keyed by `ExprId` rather than the book's `Expr` pointer identity, since this crate's
/// AST nodes live inside an enum and don't have one.
pub type Locals = HashMap<ExprId, usize>;

#[derive(Clone, Copy, PartialEq, Eq)]
enum FunctionType {
    None,
    Function,
}

/// A pre-execution pass over the AST that resolves every variable reference to a scope distance
/// and flags a handful of statically-detectable mistakes (self-referencing initializers, a
/// `return` outside any function, shadowed redeclarations) before the evaluator ever runs.
pub struct Resolver<'d> {
    diagnostics: &'d mut Diagnostics,
    scopes: Vec<HashMap<String, bool>>,
    locals: Locals,
    current_function: FunctionType,
}

impl<'d> Resolver<'d> {
    pub fn new(diagnostics: &'d mut Diagnostics) -> Self {
        Resolver { diagnostics, scopes: vec![], locals: HashMap::new(), current_function: FunctionType::None }
    }

    /// Consumes the resolver, returning the completed scope-distance table.
    pub fn resolve(mut self, statements: &[Stmt]) -> Locals {
        self.resolve_all(statements);
        self.locals
    }

    fn resolve_all(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        expr.accept(self);
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        stmt.accept(self);
    }

    fn resolve_function(&mut self, params: &[Token], body: &[Stmt], r#type: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, r#type);

        self.begin_scope();
        for param in params {
            self.declare(param);
            self.define(param);
        }
        self.resolve_all(body);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };

        if scope.contains_key(&name.lexeme) {
            self.diagnostics.error_at(
                name,
                &format!("A variable named '{}' is already declared in this scope.", name.lexeme),
            );
        }
        scope.insert(name.lexeme.clone(), false);
    }

    fn define(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };
        scope.insert(name.lexeme.clone(), true);
    }

    fn resolve_local(&mut self, id: ExprId, name: &Token) {
        for (i, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.locals.insert(id, i);
                return;
            }
        }
        // Not found in any lexical scope: the evaluator falls back to the global environment.
    }
}

impl ExprVisitor<()> for Resolver<'_> {
    fn visit_literal_expr(&mut self, _expr: &Expr) {}

    fn visit_grouping_expr(&mut self, expr: &Expr) {
        let Expr::Grouping(data) = expr else { unreachable!() };
        self.resolve_expr(&data.expr);
    }

    fn visit_variable_expr(&mut self, expr: &Expr) {
        let Expr::Variable(data) = expr else { unreachable!() };

        if let Some(scope) = self.scopes.last() {
            if scope.get(&data.name.lexeme) == Some(&false) {
                self.diagnostics.error_at(&data.name, "Cannot read local variable in its own initializer.");
            }
        }

        self.resolve_local(expr.id(), &data.name);
    }

    fn visit_assign_expr(&mut self, expr: &Expr) {
        let Expr::Assign(data) = expr else { unreachable!() };
        self.resolve_expr(&data.value);
        self.resolve_local(expr.id(), &data.name);
    }

    fn visit_unary_expr(&mut self, expr: &Expr) {
        let Expr::Unary(data) = expr else { unreachable!() };
        self.resolve_expr(&data.expr);
    }

    fn visit_postfix_expr(&mut self, expr: &Expr) {
        let Expr::Postfix(data) = expr else { unreachable!() };
        self.resolve_expr(&data.expr);
    }

    fn visit_binary_expr(&mut self, expr: &Expr) {
        let Expr::Binary(data) = expr else { unreachable!() };
        self.resolve_expr(&data.left);
        self.resolve_expr(&data.right);
    }

    fn visit_logical_expr(&mut self, expr: &Expr) {
        let Expr::Logical(data) = expr else { unreachable!() };
        self.resolve_expr(&data.left);
        self.resolve_expr(&data.right);
    }

    fn visit_ternary_expr(&mut self, expr: &Expr) {
        let Expr::Ternary(data) = expr else { unreachable!() };
        self.resolve_expr(&data.condition);
        self.resolve_expr(&data.then_branch);
        self.resolve_expr(&data.else_branch);
    }

    fn visit_call_expr(&mut self, expr: &Expr) {
        let Expr::Call(data) = expr else { unreachable!() };
        self.resolve_expr(&data.callee);
        for argument in &data.arguments {
            self.resolve_expr(argument);
        }
    }

    fn visit_function_expr(&mut self, expr: &Expr) {
        let Expr::Function(data) = expr else { unreachable!() };
        self.resolve_function(&data.params, &data.body, FunctionType::Function);
    }
}

impl StmtVisitor<()> for Resolver<'_> {
    fn visit_expression_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Expression(data) = stmt else { unreachable!() };
        self.resolve_expr(&data.expr);
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Print(data) = stmt else { unreachable!() };
        self.resolve_expr(&data.expr);
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Var(data) = stmt else { unreachable!() };
        self.declare(&data.name);
        if let Some(initializer) = &data.initializer {
            self.resolve_expr(initializer);
        }
        self.define(&data.name);
    }

    fn visit_block_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Block(data) = stmt else { unreachable!() };
        self.begin_scope();
        self.resolve_all(&data.statements);
        self.end_scope();
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) {
        let Stmt::If(data) = stmt else { unreachable!() };
        self.resolve_expr(&data.condition);
        self.resolve_stmt(&data.then_branch);
        if let Some(else_branch) = &data.else_branch {
            self.resolve_stmt(else_branch);
        }
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) {
        let Stmt::While(data) = stmt else { unreachable!() };
        self.resolve_expr(&data.condition);
        self.resolve_stmt(&data.body);
        if let Some(increment) = &data.increment {
            self.resolve_expr(increment);
        }
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Function(data) = stmt else { unreachable!() };
        self.declare(&data.name);
        self.define(&data.name);
        self.resolve_function(&data.params, &data.body, FunctionType::Function);
    }

    fn visit_interrupt_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Interrupt(data) = stmt else { unreachable!() };

        if data.keyword.r#type == Type::Return && self.current_function == FunctionType::None {
            self.diagnostics.error_at(&data.keyword, "Cannot return from top-level code.");
        }

        if let Some(value) = &data.value {
            self.resolve_expr(value);
        }
    }
}
