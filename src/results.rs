use crate::ast::Operator;
use crate::lexer::Location;
use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LangError>;

/// Every way a program can fail. All of them are fatal: scanning, parsing and
/// evaluation stop at the first one.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum LangError {
    #[error("syntax error: {message} at {loc}")]
    #[diagnostic(code(indentlang::syntax))]
    Syntax { message: String, loc: Location },

    #[error("indentation error: {message} at {loc}")]
    #[diagnostic(
        code(indentlang::indentation),
        help("block lines must line up with the first line of the block")
    )]
    Indentation { message: String, loc: Location },

    #[error("name error: variable `{name}` not found")]
    #[diagnostic(code(indentlang::name))]
    UnboundVariable { name: String, loc: Location },

    #[error("arity error: `{name}` takes {expected} argument(s) but {found} were given")]
    #[diagnostic(code(indentlang::arity))]
    Arity {
        name: String,
        expected: usize,
        found: usize,
        loc: Location,
    },

    #[error("type error: `{name}` is {value}, not a function")]
    #[diagnostic(code(indentlang::not_callable))]
    NotCallable {
        name: String,
        value: String,
        loc: Location,
    },

    #[error("type error: {message}")]
    #[diagnostic(code(indentlang::type_error))]
    Type { message: String },

    #[error("division by zero")]
    #[diagnostic(code(indentlang::division_by_zero))]
    DivisionByZero,

    #[error("integer overflow in {left} {op} {right}")]
    #[diagnostic(code(indentlang::overflow))]
    Overflow { op: Operator, left: i64, right: i64 },

    #[error("maximum call depth of {depth} exceeded")]
    #[diagnostic(code(indentlang::recursion_limit))]
    RecursionLimit { depth: usize },
}

impl LangError {
    pub fn syntax(message: impl Into<String>, loc: &Location) -> Self {
        Self::Syntax {
            message: message.into(),
            loc: loc.clone(),
        }
    }

    pub fn indentation(message: impl Into<String>, loc: &Location) -> Self {
        Self::Indentation {
            message: message.into(),
            loc: loc.clone(),
        }
    }

    /// Source position of the offending token or name, when there is one.
    pub fn location(&self) -> Option<&Location> {
        use LangError::*;
        let loc = match self {
            Syntax { loc, .. }
            | Indentation { loc, .. }
            | UnboundVariable { loc, .. }
            | Arity { loc, .. }
            | NotCallable { loc, .. } => loc,
            _ => return None,
        };
        if loc.is_eof() && loc.len == 0 {
            None
        } else {
            Some(loc)
        }
    }
}

/// A [`LangError`] together with the program text it came from, so that
/// reports can point at the offending span.
#[derive(Debug)]
pub struct SourceError {
    pub error: LangError,
    src: NamedSource,
}

impl SourceError {
    pub fn new(filename: &str, source: &str, error: LangError) -> Self {
        Self {
            error,
            src: NamedSource::new(filename, source.to_string()),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for SourceError {}

impl Diagnostic for SourceError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.error.code()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.error.help()
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let loc = self.error.location()?;
        let label = LabeledSpan::new(Some("here".into()), loc.offset, loc.len.max(1));
        Some(Box::new(std::iter::once(label)))
    }
}
