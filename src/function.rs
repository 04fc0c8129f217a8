use std::cell::RefCell;
use std::fmt::{self, Debug, Display};
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::evaluator::{Evaluator, Flow};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::Stmt;
use crate::token::Token;

/// A user-defined closure: a body plus the environment it closed over at definition time.
/// `name` is `None` for an anonymous `fun (...) { ... }` expression.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: Option<Token>,
    pub params: Vec<Token>,
    pub body: Rc<Vec<Stmt>>,
    pub closure: Rc<RefCell<Environment>>,
}

impl Callable for Function {
    fn call(&self, evaluator: &mut Evaluator, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let environment = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.closure)))));

        for (param, arg) in self.params.iter().zip(arguments) {
            environment.borrow_mut().define(&param.lexeme, arg);
        }

        match evaluator.execute_block(&self.body, environment)? {
            Flow::Return(value) => Ok(value),
            _ => Ok(Object::from(Literal::Nil)),
        }
    }

    fn arity(&self) -> usize {
        self.params.len()
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "<fn {}>", name.lexeme),
            None => write!(f, "<fn anonymous>"),
        }
    }
}

/// A function implemented in Rust rather than in the language itself. `function` takes `&self`
/// (rather than being a bare `fn(&mut Evaluator, Vec<Object>)`) so a native like `println` can
/// hand back the `NativeFunction` value it was called through.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub function: fn(&NativeFunction, &mut Evaluator, Vec<Object>) -> Result<Object, RuntimeError>,
}

impl Callable for NativeFunction {
    fn call(&self, evaluator: &mut Evaluator, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        (self.function)(self, evaluator, arguments)
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl NativeFunction {
    /// The functions bound into every interpreter's global scope.
    pub fn globals() -> Vec<NativeFunction> {
        vec![
            NativeFunction {
                name: "clock",
                arity: 0,
                function: |_, _, _| {
                    let now = SystemTime::now()
                        .duration_since(UNIX_EPOCH)
                        .expect("system clock to be set after the unix epoch")
                        .as_secs_f64();
                    Ok(Object::from(now))
                },
            },
            NativeFunction {
                name: "println",
                arity: 1,
                // Prints its argument but returns the callable itself, not the argument — a
                // source-preserved quirk, not a deliberate chaining mechanism.
                function: |this, evaluator, mut arguments| {
                    let value = arguments.remove(0);
                    evaluator.print_line(&value.to_string());
                    Ok(Object::from(this.clone()))
                },
            },
        ]
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}
