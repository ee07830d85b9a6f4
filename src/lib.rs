pub mod ast;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod program;
pub mod results;
pub mod sexpr;
pub mod tokens;

pub use program::{run, Program};
