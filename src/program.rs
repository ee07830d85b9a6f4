use crate::ast::Node;
use crate::eval::{Environment, Evaluation, Interpreter, Value};
use crate::parser::parse;
use crate::results::Result;
use crate::sexpr::SExpr;
use log::debug;

/// A parsed program. Parsing happens up front, so a syntax error anywhere
/// means nothing runs; evaluation then streams one result per top-level
/// expression.
#[derive(Debug, Clone)]
pub struct Program {
    pub nodes: Vec<Node>,
}

impl Program {
    pub fn parse(source: &str) -> Result<Self> {
        let nodes = parse(source)?;
        debug!("program has {} statements", nodes.len());
        Ok(Self { nodes })
    }

    pub fn results(&self) -> Evaluation<std::slice::Iter<'_, Node>> {
        self.results_with(Interpreter::default())
    }

    pub fn results_with(&self, interp: Interpreter) -> Evaluation<std::slice::Iter<'_, Node>> {
        interp.run(&self.nodes, Environment::default())
    }

    pub fn sexprs(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.sexpr().to_string()).collect()
    }
}

/// Parse and run `source`, collecting every result.
pub fn run(source: &str) -> Result<Vec<Value>> {
    Program::parse(source)?.results().collect()
}
