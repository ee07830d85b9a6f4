use super::{Node, Variable};
use crate::sexpr::*;
use itertools::Itertools;
use std::fmt;

/// A `def` block as written. The environment it closes over is attached when
/// the definition is evaluated, see [`crate::eval::Closure`].
#[derive(PartialEq, Debug, Clone)]
pub struct FunctionDef {
    pub name: Variable,
    pub params: Vec<Variable>,
    pub body: Vec<Node>,
}

impl FunctionDef {
    pub fn new(name: Variable, params: Vec<Variable>, body: Vec<Node>) -> Self {
        Self { name, params, body }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn signature(&self) -> String {
        format!(
            "{}({})",
            self.name.name,
            self.params.iter().map(|p| p.name.as_str()).join(", ")
        )
    }
}

impl fmt::Display for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signature())
    }
}

impl SExpr for FunctionDef {
    fn sexpr(&self) -> S {
        let mut rest = vec![
            self.name.sexpr(),
            S::List(self.params.iter().map(|p| p.sexpr()).collect()),
        ];
        rest.extend(self.body.iter().map(|n| n.sexpr()));
        S::Cons("def".into(), rest)
    }
}
