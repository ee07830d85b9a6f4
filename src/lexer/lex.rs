use nom::{
    branch::alt,
    bytes::complete::{tag, take, take_while1},
    character::complete::one_of,
    combinator::{map, recognize},
    error::VerboseError,
    IResult,
};

use super::Span;

pub(crate) type LResult<I, O> = IResult<I, O, VerboseError<I>>;

/// Character classes of the scanner, before any position bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Raw {
    Word,
    Operator,
    Spaces,
    Newline,
    Punc,
    Invalid,
}

pub const OPERATOR_CHARS: &str = "~+-*/=<>%";

pub fn is_operator_char(c: char) -> bool {
    OPERATOR_CHARS.contains(c)
}

fn lex_word(i: Span) -> LResult<Span, (Raw, Span)> {
    map(take_while1(|c: char| c.is_ascii_alphanumeric()), |s| {
        (Raw::Word, s)
    })(i)
}

fn lex_operator(i: Span) -> LResult<Span, (Raw, Span)> {
    map(take_while1(is_operator_char), |s| (Raw::Operator, s))(i)
}

fn lex_space(i: Span) -> LResult<Span, (Raw, Span)> {
    map(take_while1(|c| c == ' '), |s| (Raw::Spaces, s))(i)
}

fn lex_newline(i: Span) -> LResult<Span, (Raw, Span)> {
    map(alt((tag("\n"), tag("\r\n"))), |s| (Raw::Newline, s))(i)
}

fn lex_punc(i: Span) -> LResult<Span, (Raw, Span)> {
    map(recognize(one_of("(),:")), |s| (Raw::Punc, s))(i)
}

fn lex_invalid(i: Span) -> LResult<Span, (Raw, Span)> {
    map(take(1usize), |s| (Raw::Invalid, s))(i)
}

/// Take the next raw run off the input. Never fails on non-empty input:
/// anything unclassified comes back one character at a time as `Invalid`.
pub fn lex_raw(i: Span) -> LResult<Span, (Raw, Span)> {
    alt((
        lex_word,
        lex_operator,
        lex_space,
        lex_newline,
        lex_punc,
        lex_invalid,
    ))(i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::span;

    fn raw_runs(s: &str) -> Vec<(Raw, String)> {
        let mut i = span(s);
        let mut out = vec![];
        while !i.fragment().is_empty() {
            let (rest, (raw, frag)) = lex_raw(i).unwrap();
            out.push((raw, frag.fragment().to_string()));
            i = rest;
        }
        out
    }

    #[test]
    fn runs() {
        use Raw::*;
        assert_eq!(
            raw_runs("ab12 <= (x)"),
            vec![
                (Word, "ab12".into()),
                (Spaces, " ".into()),
                (Operator, "<=".into()),
                (Spaces, " ".into()),
                (Punc, "(".into()),
                (Word, "x".into()),
                (Punc, ")".into()),
            ]
        );
    }

    #[test]
    fn operator_runs_stop_at_other_classes() {
        use Raw::*;
        assert_eq!(
            raw_runs("1+-2"),
            vec![
                (Word, "1".into()),
                (Operator, "+-".into()),
                (Word, "2".into()),
            ]
        );
    }

    #[test]
    fn invalid_characters() {
        use Raw::*;
        assert_eq!(
            raw_runs("\t$\r\n"),
            vec![
                (Invalid, "\t".into()),
                (Invalid, "$".into()),
                (Newline, "\r\n".into()),
            ]
        );
    }
}
