use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::evaluator::Evaluator;
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;

/// A runtime value: anything that can live in a variable, be passed as an argument, or be
/// returned from a call. Classes and instances are dropped — this language has no objects in the
/// OOP sense.
#[derive(Debug, Clone)]
pub enum Object {
    Literal(Literal),
    Function(Function),
    NativeFunction(NativeFunction),
    /// Held by a `var` binding with no initializer between its declaration and the first
    /// assignment that reaches it. Distinct from `Literal(Literal::Nil)` so that reading a
    /// declared-but-unassigned variable is a runtime error rather than silently observing `nil`.
    Uninit,
}

impl Object {
    pub fn is_truthy(&self) -> bool {
        match self {
            Object::Literal(literal) => literal.is_truthy(),
            Object::Function(_) | Object::NativeFunction(_) => true,
            Object::Uninit => false,
        }
    }

    pub fn type_str(&self) -> &str {
        match self {
            Object::Literal(literal) => literal.type_str(),
            Object::Function(_) => "function",
            Object::NativeFunction(_) => "native function",
            Object::Uninit => "uninitialized",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Object::Literal(Literal::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Object::Literal(Literal::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Object {
    /// Literals compare structurally; callables compare by identity, not by structural content —
    /// two functions with identical source are still distinct values unless they're the same
    /// closure.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Literal(left), Object::Literal(right)) => left == right,
            (Object::Function(left), Object::Function(right)) => {
                Rc::ptr_eq(&left.closure, &right.closure) && Rc::ptr_eq(&left.body, &right.body)
            }
            (Object::NativeFunction(left), Object::NativeFunction(right)) => {
                left.name == right.name && std::ptr::eq(left.function as *const (), right.function as *const ())
            }
            _ => false,
        }
    }
}

impl From<Literal> for Object {
    fn from(literal: Literal) -> Self {
        Object::Literal(literal)
    }
}

impl From<f64> for Object {
    fn from(number: f64) -> Self {
        Object::Literal(Literal::Number(number))
    }
}

impl From<bool> for Object {
    fn from(boolean: bool) -> Self {
        Object::Literal(Literal::Bool(boolean))
    }
}

impl From<String> for Object {
    fn from(string: String) -> Self {
        Object::Literal(Literal::String(string))
    }
}

impl From<&str> for Object {
    fn from(string: &str) -> Self {
        Object::Literal(Literal::String(string.to_owned()))
    }
}

impl From<Function> for Object {
    fn from(value: Function) -> Self {
        Object::Function(value)
    }
}

impl From<NativeFunction> for Object {
    fn from(value: NativeFunction) -> Self {
        Object::NativeFunction(value)
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Literal(literal) => write!(f, "{literal}"),
            Object::Function(function) => write!(f, "{function}"),
            Object::NativeFunction(function) => write!(f, "{function}"),
            Object::Uninit => write!(f, "uninit"),
        }
    }
}

/// Anything that can be invoked with `(...)`.
pub trait Callable: Debug {
    fn call(&self, evaluator: &mut Evaluator, arguments: Vec<Object>) -> Result<Object, RuntimeError>;

    fn arity(&self) -> usize;
}
