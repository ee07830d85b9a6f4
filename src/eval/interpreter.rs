use super::{Closure, Environment, Value};
use crate::ast::*;
use crate::results::{LangError, Result};
use log::debug;
use std::fmt;
use std::rc::Rc;

pub const DEFAULT_MAX_DEPTH: usize = 256;

pub struct Interpreter {
    depth: usize,
    max_depth: usize,
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<interpreter depth={}/{}>", self.depth, self.max_depth)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }
}

impl Interpreter {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            depth: 0,
            max_depth,
        }
    }

    /// Evaluate an expression node.
    pub fn evaluate(&mut self, node: &Node, env: &Environment) -> Result<Value> {
        match node {
            Node::Null => Ok(Value::Null),
            Node::Int(v) => Ok(Value::Int(*v)),
            Node::Var(var) => env.get_at(var),
            Node::BinaryOp(..) => self.evaluate_chain(node, env),
            Node::Call(callee, args) => self.call(callee, args, env),
            Node::FunctionDef(def) => Err(LangError::Type {
                message: format!("definition of `{}` used as a value", def.name),
            }),
            Node::VarDef(target, _) => Err(LangError::Type {
                message: format!("definition of `{}` used as a value", target),
            }),
        }
    }

    /// Operator chains nest down their left side, one level per operator, so
    /// walk that spine with a loop and only recurse into right operands.
    fn evaluate_chain(&mut self, node: &Node, env: &Environment) -> Result<Value> {
        let mut spine = vec![];
        let mut leftmost = node;
        while let Node::BinaryOp(op, left, right) = leftmost {
            spine.push((op, right));
            leftmost = &**left;
        }

        let mut acc = self.evaluate(leftmost, env)?;
        for (op, right) in spine.into_iter().rev() {
            let left = acc.check_int()?;
            let right = self.evaluate(right, env)?.check_int()?;
            acc = Value::Int(op.apply(left, right)?);
        }
        Ok(acc)
    }

    /// Run one statement. Binding forms return the extended environment and no
    /// value; everything else leaves the environment alone and returns a value.
    pub fn execute(&mut self, node: &Node, env: Environment) -> Result<(Environment, Option<Value>)> {
        match node {
            Node::VarDef(target, value) => {
                let value = self.evaluate(value, &env)?;
                debug!("define {} = {}", target, value);
                Ok((env.define(&target.name, value), None))
            }
            Node::FunctionDef(def) => {
                // the closure sees the environment before its own name is bound
                let closure = Closure::new(def.clone(), env.clone());
                debug!("define {}", def);
                Ok((env.define(&def.name.name, Value::Function(Rc::new(closure))), None))
            }
            _ => {
                let value = self.evaluate(node, &env)?;
                Ok((env, Some(value)))
            }
        }
    }

    fn call(&mut self, callee: &Variable, args: &[Node], env: &Environment) -> Result<Value> {
        let closure = match env.get_at(callee)? {
            Value::Function(closure) => closure,
            other => {
                return Err(LangError::NotCallable {
                    name: callee.name.clone(),
                    value: other.type_name().to_string(),
                    loc: callee.loc.clone(),
                })
            }
        };

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.evaluate(arg, env)?);
        }

        if values.len() != closure.arity() {
            return Err(LangError::Arity {
                name: callee.name.clone(),
                expected: closure.arity(),
                found: values.len(),
                loc: callee.loc.clone(),
            });
        }

        self.invoke(&closure, values)
    }

    pub fn invoke(&mut self, closure: &Closure, args: Vec<Value>) -> Result<Value> {
        if self.depth >= self.max_depth {
            return Err(LangError::RecursionLimit {
                depth: self.max_depth,
            });
        }
        debug!("call {}{:?}", closure.name(), &args);

        let env = closure.bind_args(args);
        self.depth += 1;
        let result = self.run_body(&closure.def.body, env);
        self.depth -= 1;
        result
    }

    /// A body yields a value for every non-binding statement; the call
    /// evaluates to the last one.
    fn run_body(&mut self, body: &[Node], mut env: Environment) -> Result<Value> {
        let mut last = Value::Null;
        for node in body {
            let (next, value) = self.execute(node, env)?;
            env = next;
            if let Some(value) = value {
                last = value;
            }
        }
        Ok(last)
    }

    /// Lazily evaluate a sequence of top-level nodes.
    pub fn run<I>(self, nodes: I, env: Environment) -> Evaluation<I::IntoIter>
    where
        I: IntoIterator,
        I::Item: std::borrow::Borrow<Node>,
    {
        Evaluation {
            interp: self,
            nodes: nodes.into_iter(),
            env,
            failed: false,
        }
    }
}

/// Pull-based stream of top-level results. Bindings are folded into the
/// running environment silently; the stream ends after the first error.
pub struct Evaluation<I> {
    interp: Interpreter,
    nodes: I,
    env: Environment,
    failed: bool,
}

impl<I> Evaluation<I> {
    /// The running top-level environment.
    pub fn env(&self) -> &Environment {
        &self.env
    }
}

impl<I> Iterator for Evaluation<I>
where
    I: Iterator,
    I::Item: std::borrow::Borrow<Node>,
{
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        use std::borrow::Borrow;
        if self.failed {
            return None;
        }
        for node in self.nodes.by_ref() {
            match self.interp.execute(node.borrow(), self.env.clone()) {
                Ok((env, value)) => {
                    self.env = env;
                    if let Some(value) = value {
                        return Some(Ok(value));
                    }
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}
