use std::cell::RefCell;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::diagnostics::Diagnostics;
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::expr::*;
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::resolver::Locals;
use crate::stmt::*;
use crate::token::{Token, Type};

/// What a statement did, threaded back up through `Result::Ok` instead of the book's
/// exception-style `return`/`break`/`continue`. `Flow::Normal` means "keep going"; the other
/// three are non-local exits that a loop or function call intercepts.
#[derive(Debug, Clone)]
pub enum Flow {
    Normal,
    Break,
    Continue,
    Return(Object),
}

/// Walks a resolved AST, evaluating expressions and executing statements against a chain of
/// `Environment`s. One `Evaluator` is built per run (file, REPL submission, or test) and owns its
/// own globals, so concurrent runs never share state.
pub struct Evaluator {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: Locals,
    output: Box<dyn Write>,
}

impl Evaluator {
    pub fn new(locals: Locals, output: Box<dyn Write>) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));
        for native in NativeFunction::globals() {
            globals.borrow_mut().define(native.name, Object::from(native));
        }

        Evaluator { environment: Rc::clone(&globals), globals, locals, output }
    }

    /// Used by the `println` native function so it writes to the same sink as `print` statements.
    pub fn print_line(&mut self, text: &str) {
        let _ = writeln!(self.output, "{text}");
    }

    /// Executes every top-level statement, stopping and reporting on the first runtime error.
    pub fn interpret(&mut self, statements: &[Stmt], diagnostics: &mut Diagnostics) {
        for statement in statements {
            match self.execute(statement) {
                Ok(_) => continue,
                Err(error) => {
                    diagnostics.runtime_error(&error.token, &error.message);
                    return;
                }
            }
        }
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        stmt.accept(self)
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        expr.accept(self)
    }

    /// Runs `statements` in a fresh scope nested under `environment`, restoring the previous
    /// scope afterward whether the block finished normally or unwound via an error or a `Flow`.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> Result<Flow, RuntimeError> {
        let previous = mem::replace(&mut self.environment, environment);

        let mut result = Ok(Flow::Normal);
        for statement in statements {
            match self.execute(statement) {
                Ok(Flow::Normal) => continue,
                other => {
                    result = other;
                    break;
                }
            }
        }

        self.environment = previous;
        result
    }

    fn lookup_variable(&self, id: ExprId, name: &Token) -> Result<Object, RuntimeError> {
        let value = match self.locals.get(&id) {
            Some(distance) => self.environment.borrow().get_at(*distance, name)?,
            None => self.globals.borrow().get(name)?,
        };

        if matches!(value, Object::Uninit) {
            return Err(RuntimeError::new(name.clone(), "Variable used before initialization."));
        }

        Ok(value)
    }

    fn assign_variable(&mut self, id: ExprId, name: &Token, value: Object) -> Result<(), RuntimeError> {
        match self.locals.get(&id) {
            Some(distance) => {
                self.environment.borrow_mut().assign_at(*distance, name, value);
                Ok(())
            }
            None => self.globals.borrow_mut().assign(name, value),
        }
    }

    fn numeric_op(&self, operator: &Token, left: Object, right: Object, f: impl Fn(f64, f64) -> f64) -> Result<Object, RuntimeError> {
        match (left.as_number(), right.as_number()) {
            (Some(l), Some(r)) => Ok(Object::from(f(l, r))),
            _ => Err(RuntimeError::new(operator.clone(), "Operands must be numbers.")),
        }
    }

    /// Shared by `+`/`-`/`*`/`/` and their `+=`/`-=`/`*=`/`/=` counterparts.
    fn arithmetic(&self, operator: &Token, kind: Type, left: Object, right: Object) -> Result<Object, RuntimeError> {
        match kind {
            Type::Plus => match (&left, &right) {
                (Object::Literal(Literal::Number(l)), Object::Literal(Literal::Number(r))) => Ok(Object::from(l + r)),
                _ if left.as_string().is_some() || right.as_string().is_some() => Ok(Object::from(format!("{left}{right}"))),
                _ => Err(RuntimeError::new(operator.clone(), "Operands must be two numbers or two strings.")),
            },
            Type::Minus => self.numeric_op(operator, left, right, |l, r| l - r),
            Type::Star => self.numeric_op(operator, left, right, |l, r| l * r),
            Type::Slash => self.numeric_op(operator, left, right, |l, r| l / r),
            _ => unreachable!("arithmetic() called with a non-arithmetic operator"),
        }
    }

    fn compound_kind(op: Type) -> Type {
        match op {
            Type::PlusEqual => Type::Plus,
            Type::MinusEqual => Type::Minus,
            Type::StarEqual => Type::Star,
            Type::SlashEqual => Type::Slash,
            _ => unreachable!("compound_kind() called with a non-compound-assignment operator"),
        }
    }

    fn call_value(&mut self, callee: Object, paren: &Token, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let arity = match &callee {
            Object::Function(f) => f.arity(),
            Object::NativeFunction(f) => f.arity(),
            _ => return Err(RuntimeError::new(paren.clone(), "Can only call functions.")),
        };

        if arguments.len() != arity {
            return Err(RuntimeError::new(paren.clone(), format!("Expected {arity} arguments but got {}.", arguments.len())));
        }

        match callee {
            Object::Function(f) => f.call(self, arguments),
            Object::NativeFunction(f) => f.call(self, arguments),
            Object::Literal(_) | Object::Uninit => unreachable!(),
        }
    }
}

impl ExprVisitor<Result<Object, RuntimeError>> for Evaluator {
    fn visit_literal_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Literal(data) = expr else { unreachable!() };
        Ok(Object::from(data.value.clone()))
    }

    fn visit_grouping_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Grouping(data) = expr else { unreachable!() };
        self.evaluate(&data.expr)
    }

    fn visit_variable_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Variable(data) = expr else { unreachable!() };
        self.lookup_variable(expr.id(), &data.name)
    }

    fn visit_assign_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Assign(data) = expr else { unreachable!() };

        let rhs = self.evaluate(&data.value)?;
        let value = if data.op.r#type == Type::Equal {
            rhs
        } else {
            let current = self.lookup_variable(expr.id(), &data.name)?;
            self.arithmetic(&data.op, Self::compound_kind(data.op.r#type), current, rhs)?
        };

        self.assign_variable(expr.id(), &data.name, value.clone())?;
        Ok(value)
    }

    fn visit_unary_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Unary(data) = expr else { unreachable!() };

        match data.operator.r#type {
            Type::Minus => {
                let right = self.evaluate(&data.expr)?;
                let n = right
                    .as_number()
                    .ok_or_else(|| RuntimeError::new(data.operator.clone(), "Operand must be a number."))?;
                Ok(Object::from(-n))
            }
            Type::Bang => {
                let right = self.evaluate(&data.expr)?;
                Ok(Object::from(!right.is_truthy()))
            }
            Type::PlusPlus | Type::MinusMinus => {
                let Expr::Variable(var) = data.expr.as_ref() else {
                    unreachable!("parser only allows ++/-- on a variable")
                };
                let current = self.lookup_variable(data.expr.id(), &var.name)?;
                let n = current
                    .as_number()
                    .ok_or_else(|| RuntimeError::new(data.operator.clone(), "Operand must be a number."))?;
                let updated = if data.operator.r#type == Type::PlusPlus { n + 1.0 } else { n - 1.0 };
                let result = Object::from(updated);
                self.assign_variable(data.expr.id(), &var.name, result.clone())?;
                Ok(result)
            }
            _ => unreachable!(),
        }
    }

    fn visit_postfix_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Postfix(data) = expr else { unreachable!() };

        match data.operator.r#type {
            Type::PlusPlus | Type::MinusMinus => {
                let Expr::Variable(var) = data.expr.as_ref() else {
                    unreachable!("parser only allows ++/-- on a variable")
                };
                let current = self.lookup_variable(data.expr.id(), &var.name)?;
                let n = current
                    .as_number()
                    .ok_or_else(|| RuntimeError::new(data.operator.clone(), "Operand must be a number."))?;
                let updated = if data.operator.r#type == Type::PlusPlus { n + 1.0 } else { n - 1.0 };
                self.assign_variable(data.expr.id(), &var.name, Object::from(updated))?;
                Ok(current)
            }
            // `\` appends a trailing newline to a string; anything else is a type error.
            Type::Backslash => {
                let value = self.evaluate(&data.expr)?;
                let s = value
                    .as_string()
                    .ok_or_else(|| RuntimeError::new(data.operator.clone(), "Operand must be a string."))?;
                Ok(Object::from(format!("{s}\n")))
            }
            _ => unreachable!(),
        }
    }

    fn visit_binary_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Binary(data) = expr else { unreachable!() };

        // The comma operator normally just returns its right operand, evaluating the left only
        // for side effects; it shares the Binary node shape instead of getting its own. But if
        // either side is a string, it instead returns the stringified concatenation of both —
        // a source-preserved quirk that lets `print a, b, c;` read like comma-separated output.
        if data.operator.r#type == Type::Comma {
            let left = self.evaluate(&data.left)?;
            let right = self.evaluate(&data.right)?;

            if left.as_string().is_some() || right.as_string().is_some() {
                return Ok(Object::from(format!("{left}{right}")));
            }

            return Ok(right);
        }

        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;

        match data.operator.r#type {
            Type::Plus | Type::Minus | Type::Star | Type::Slash => self.arithmetic(&data.operator, data.operator.r#type, left, right),
            Type::Greater | Type::GreaterEqual | Type::Less | Type::LessEqual => match (left.as_number(), right.as_number()) {
                (Some(l), Some(r)) => Ok(Object::from(match data.operator.r#type {
                    Type::Greater => l > r,
                    Type::GreaterEqual => l >= r,
                    Type::Less => l < r,
                    Type::LessEqual => l <= r,
                    _ => unreachable!(),
                })),
                _ => Err(RuntimeError::new(data.operator.clone(), "Operands must be numbers.")),
            },
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),
            _ => unreachable!(),
        }
    }

    fn visit_logical_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Logical(data) = expr else { unreachable!() };

        let left = self.evaluate(&data.left)?;

        let short_circuits = if data.operator.r#type == Type::Or { left.is_truthy() } else { !left.is_truthy() };
        if short_circuits {
            return Ok(left);
        }

        self.evaluate(&data.right)
    }

    fn visit_ternary_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Ternary(data) = expr else { unreachable!() };

        // Both branches run unconditionally; only which *value* is kept depends on the condition.
        let condition = self.evaluate(&data.condition)?;
        let then_value = self.evaluate(&data.then_branch)?;
        let else_value = self.evaluate(&data.else_branch)?;

        Ok(if condition.is_truthy() { then_value } else { else_value })
    }

    fn visit_call_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Call(data) = expr else { unreachable!() };

        let callee = self.evaluate(&data.callee)?;

        let mut arguments = Vec::with_capacity(data.arguments.len());
        for argument in &data.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        self.call_value(callee, &data.paren, arguments)
    }

    fn visit_function_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Function(data) = expr else { unreachable!() };

        Ok(Object::from(Function {
            name: None,
            params: data.params.clone(),
            body: Rc::clone(&data.body),
            closure: Rc::clone(&self.environment),
        }))
    }
}

impl StmtVisitor<Result<Flow, RuntimeError>> for Evaluator {
    fn visit_expression_stmt(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        let Stmt::Expression(data) = stmt else { unreachable!() };
        self.evaluate(&data.expr)?;
        Ok(Flow::Normal)
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        let Stmt::Print(data) = stmt else { unreachable!() };
        let value = self.evaluate(&data.expr)?;
        self.print_line(&value.to_string());
        Ok(Flow::Normal)
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        let Stmt::Var(data) = stmt else { unreachable!() };

        let value = match &data.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Object::Uninit,
        };

        self.environment.borrow_mut().define(&data.name.lexeme, value);
        Ok(Flow::Normal)
    }

    fn visit_block_stmt(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        let Stmt::Block(data) = stmt else { unreachable!() };
        let scope = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.environment)))));
        self.execute_block(&data.statements, scope)
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        let Stmt::If(data) = stmt else { unreachable!() };

        if self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.then_branch)
        } else if let Some(else_branch) = &data.else_branch {
            self.execute(else_branch)
        } else {
            Ok(Flow::Normal)
        }
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        let Stmt::While(data) = stmt else { unreachable!() };

        while self.evaluate(&data.condition)?.is_truthy() {
            match self.execute(&data.body)? {
                Flow::Normal | Flow::Continue => {
                    if let Some(increment) = &data.increment {
                        self.evaluate(increment)?;
                    }
                }
                Flow::Break => break,
                Flow::Return(value) => return Ok(Flow::Return(value)),
            }
        }

        Ok(Flow::Normal)
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        let Stmt::Function(data) = stmt else { unreachable!() };

        let function = Function {
            name: Some(data.name.clone()),
            params: data.params.clone(),
            body: Rc::clone(&data.body),
            closure: Rc::clone(&self.environment),
        };

        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(function));
        Ok(Flow::Normal)
    }

    fn visit_interrupt_stmt(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        let Stmt::Interrupt(data) = stmt else { unreachable!() };

        match data.keyword.r#type {
            Type::Return => {
                let value = match &data.value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Object::from(Literal::Nil),
                };
                Ok(Flow::Return(value))
            }
            Type::Break => Ok(Flow::Break),
            Type::Continue => Ok(Flow::Continue),
            _ => unreachable!(),
        }
    }
}
