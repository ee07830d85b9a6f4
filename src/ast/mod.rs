use crate::lexer::Location;
use crate::sexpr::*;
use std::fmt;
use std::rc::Rc;

mod function;
pub use function::FunctionDef;

mod op;
pub use op::{Operator, Prec};

/// A name in the source, either referenced or bound.
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub loc: Location,
}

impl Variable {
    pub fn new(name: &str, loc: Location) -> Self {
        Self {
            name: name.to_string(),
            loc,
        }
    }
}

// Two variables are the same variable if they have the same name, wherever
// they appear.
impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl From<&str> for Variable {
    fn from(name: &str) -> Self {
        Self::new(name, Location::default())
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl SExpr for Variable {
    fn sexpr(&self) -> S {
        S::Atom(self.name.clone())
    }
}

#[derive(PartialEq, Debug, Clone)]
pub enum Node {
    /// Result of a block that runs out of statements without producing a value.
    Null,
    Int(i64),
    Var(Variable),
    Call(Variable, Vec<Node>),
    FunctionDef(Rc<FunctionDef>),
    BinaryOp(Operator, Box<Node>, Box<Node>),
    VarDef(Variable, Box<Node>),
}

impl Node {
    pub fn binary(op: Operator, left: Node, right: Node) -> Self {
        Node::BinaryOp(op, Box::new(left), Box::new(right))
    }

    pub fn var_def(target: Variable, value: Node) -> Self {
        Node::VarDef(target, Box::new(value))
    }

    /// Binding forms extend the environment and produce no result of their own.
    pub fn is_binding(&self) -> bool {
        matches!(self, Node::VarDef(..) | Node::FunctionDef(_))
    }
}

// Operator chains nest one level per operator and can be arbitrarily long,
// so they are torn down from a work list instead of recursively.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = vec![];
        if let Node::BinaryOp(_, left, right) = self {
            pending.push(std::mem::replace(&mut **left, Node::Null));
            pending.push(std::mem::replace(&mut **right, Node::Null));
        }
        while let Some(mut node) = pending.pop() {
            if let Node::BinaryOp(_, left, right) = &mut node {
                pending.push(std::mem::replace(&mut **left, Node::Null));
                pending.push(std::mem::replace(&mut **right, Node::Null));
            }
        }
    }
}

impl From<Variable> for Node {
    fn from(item: Variable) -> Self {
        Node::Var(item)
    }
}

impl From<FunctionDef> for Node {
    fn from(item: FunctionDef) -> Self {
        Node::FunctionDef(Rc::new(item))
    }
}

impl SExpr for Node {
    fn sexpr(&self) -> S {
        match self {
            Node::Null => S::Null,
            Node::Int(v) => S::Atom(v.to_string()),
            Node::Var(v) => v.sexpr(),
            Node::Call(callee, args) => {
                S::Cons(callee.name.clone(), args.iter().map(|a| a.sexpr()).collect())
            }
            Node::FunctionDef(def) => def.sexpr(),
            Node::BinaryOp(op, left, right) => {
                S::Cons(op.to_string(), vec![left.sexpr(), right.sexpr()])
            }
            Node::VarDef(target, value) => S::Cons("=".into(), vec![target.sexpr(), value.sexpr()]),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sexpr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_equality_is_by_name() {
        let a = Variable::new("a", Location::new(1, 1, 2));
        let b = Variable::new("a", Location::new(3, 5, 6));
        assert_eq!(a, b);
        assert_ne!(a, Variable::from("b"));
    }

    #[test]
    fn sexpr() {
        let node = Node::binary(
            Operator::Plus,
            Node::Int(1),
            Node::binary(Operator::Multiply, Node::Var("x".into()), Node::Int(3)),
        );
        assert_eq!(node.to_string(), "(+ 1 (* x 3))");

        let def: Node = FunctionDef::new(
            "add".into(),
            vec!["a".into(), "b".into()],
            vec![Node::binary(Operator::Plus, Node::Var("a".into()), Node::Var("b".into()))],
        )
        .into();
        assert_eq!(def.to_string(), "(def add (a b) (+ a b))");
        assert!(def.is_binding());

        let call = Node::Call("f".into(), vec![Node::Int(1), Node::Null]);
        assert_eq!(call.to_string(), "(f 1 ())");
        assert!(!call.is_binding());

        let var = Node::var_def("x".into(), Node::Int(2));
        assert_eq!(var.to_string(), "(= x 2)");
    }
}
