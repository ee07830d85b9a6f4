use super::Value;
use crate::ast::Variable;
use crate::results::{LangError, Result};
use log::debug;
use rpds::List;
use std::fmt;

#[derive(Clone)]
struct Frame {
    name: String,
    value: Value,
}

/// Persistent chain of single-binding frames.
///
/// `define` never touches an existing frame: it pushes a new one in front and
/// returns the new head, so environments handed out earlier (to closures, for
/// example) keep seeing exactly what they saw before. Lookups walk from the
/// newest frame to the oldest, so a later binding shadows an earlier one.
#[derive(Clone)]
pub struct Environment {
    frames: List<Frame>,
}

impl Default for Environment {
    fn default() -> Self {
        Self { frames: List::new() }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.frames.iter().map(|frame| (&frame.name, &frame.value)))
            .finish()
    }
}

impl Environment {
    pub fn define(&self, name: &str, value: Value) -> Self {
        Self {
            frames: self.frames.push_front(Frame {
                name: name.to_string(),
                value,
            }),
        }
    }

    pub fn resolve_value(&self, name: &str) -> Option<&Value> {
        self.frames
            .iter()
            .find(|frame| frame.name == name)
            .map(|frame| &frame.value)
    }

    pub fn get_at(&self, var: &Variable) -> Result<Value> {
        match self.resolve_value(&var.name) {
            Some(value) => Ok(value.clone()),
            None => Err(LangError::UnboundVariable {
                name: var.name.clone(),
                loc: var.loc.clone(),
            }),
        }
    }

    /// Number of frames in the chain, shadowed ones included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Bound names, newest first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().map(|frame| frame.name.as_str())
    }

    pub fn debug(&self) {
        self.frames.iter().enumerate().for_each(|(i, frame)| {
            debug!("\t{}: {} = {}", i, frame.name, frame.value);
        })
    }
}
