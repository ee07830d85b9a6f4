use log::trace;
use nom_locate::LocatedSpan;

use crate::tokens::*;

mod lex;
mod location;

pub use lex::{is_operator_char, Raw, OPERATOR_CHARS};
pub use location::Location;

pub type Span<'a> = LocatedSpan<&'a str>;

pub fn span(s: &str) -> Span<'_> {
    Span::new(s)
}

/// Lazy token stream over a complete source string.
///
/// Runs of spaces are only surfaced as [`Tok::Indent`] when they open a line
/// that has something else on it; everywhere else they only advance the
/// column. The stream ends with a single [`Tok::EOF`].
#[derive(Debug)]
pub struct Scanner<'a> {
    rest: Span<'a>,
    col: usize,
    line_start: bool,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            rest: span(source),
            col: 1,
            line_start: false,
            done: false,
        }
    }

    /// Drain a source into a vector, mostly useful for debugging.
    pub fn tokens(source: &'a str) -> Vec<Token> {
        Self::new(source).collect()
    }

    fn blank_rest_of_line(&self) -> bool {
        let rest = self.rest.fragment();
        rest.is_empty() || rest.starts_with('\n') || rest.starts_with("\r\n")
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if self.done {
                return None;
            }
            if self.rest.fragment().is_empty() {
                self.done = true;
                return Some(Token::eof());
            }

            let (rest, (raw, frag)) = match lex::lex_raw(self.rest) {
                Ok(r) => r,
                Err(e) => {
                    // lex_raw always consumes something, so this is only reachable on a
                    // broken combinator; hand the remainder to the parser as garbage.
                    trace!("scan error: {:?}", e);
                    self.done = true;
                    let loc = Location::from_span(&self.rest, self.col);
                    return Some(token(Tok::Invalid(self.rest.fragment().to_string()), loc));
                }
            };
            self.rest = rest;

            let text = *frag.fragment();
            let loc = Location::from_span(&frag, self.col);
            let tok = match raw {
                Raw::Spaces => {
                    if self.line_start && !self.blank_rest_of_line() {
                        Tok::Indent(text.len())
                    } else {
                        self.col = loc.col_end;
                        continue;
                    }
                }
                Raw::Newline => Tok::Newline,
                Raw::Word => Tok::from_word(text),
                Raw::Operator => Tok::from_operator(text),
                Raw::Punc => text
                    .chars()
                    .next()
                    .and_then(Tok::from_punc)
                    .unwrap_or_else(|| Tok::Invalid(text.to_string())),
                Raw::Invalid => Tok::Invalid(text.to_string()),
            };

            self.line_start = tok.is_newline();
            self.col = if self.line_start { 1 } else { loc.col_end };
            trace!("token {:?} {:?}", &tok, &loc);
            return Some(token(tok, loc));
        }
    }
}
