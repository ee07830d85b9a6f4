use super::Environment;
use crate::ast::FunctionDef;
use crate::results::{LangError, Result};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

#[derive(Clone)]
pub enum Value {
    Null,
    Int(i64),
    Function(Rc<Closure>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "an integer",
            Value::Function(_) => "a function",
        }
    }

    pub fn check_int(&self) -> Result<i64> {
        match self {
            Value::Int(v) => Ok(*v),
            _ => Err(LangError::Type {
                message: format!("expected an integer operand, found {}", self),
            }),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_closure(&self) -> Option<&Rc<Closure>> {
        match self {
            Value::Function(c) => Some(c),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Int(v) => write!(f, "{}", v),
            Value::Function(c) => write!(f, "<function {}>", c.def.signature()),
        }
    }
}

// Closures are printed by name only; their environment may contain themselves.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// A function value: its definition plus the environment its calls run in.
#[derive(Debug)]
pub struct Closure {
    pub def: Rc<FunctionDef>,
    /// Starts out as the environment at the point of definition. Every call
    /// binds its arguments on top of this chain and stores the result back,
    /// so parameter frames pile up across calls instead of being discarded.
    accumulated_env: RefCell<Environment>,
}

impl Closure {
    pub fn new(def: Rc<FunctionDef>, env: Environment) -> Self {
        Self {
            def,
            accumulated_env: RefCell::new(env),
        }
    }

    pub fn name(&self) -> &str {
        &self.def.name.name
    }

    pub fn arity(&self) -> usize {
        self.def.arity()
    }

    pub fn env(&self) -> Ref<'_, Environment> {
        self.accumulated_env.borrow()
    }

    /// Layer `args` onto the accumulated environment, in parameter order, and
    /// return the environment the body should run in.
    pub fn bind_args(&self, args: Vec<Value>) -> Environment {
        let mut env = self.accumulated_env.borrow_mut();
        for (param, value) in self.def.params.iter().zip(args) {
            *env = env.define(&param.name, value);
        }
        env.clone()
    }
}
