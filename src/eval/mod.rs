mod env;
mod interpreter;
mod value;

pub use env::Environment;
pub use interpreter::{Evaluation, Interpreter, DEFAULT_MAX_DEPTH};
pub use value::{Closure, Value};
