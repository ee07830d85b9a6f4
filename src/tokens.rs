use crate::lexer::Location;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Tok {
    /// Leading spaces of a line, by width.
    Indent(usize),
    Newline,
    Ident(String),
    IntLiteral(i64),
    LParen,
    RParen,
    Comma,
    Colon,

    // Keywords
    Def,
    Return,

    // Operators
    Assign,
    Plus,
    Minus,
    Mul,
    Div,
    /// Any other run of operator characters, `==` or `<=` for example.
    Symbol(String),

    Invalid(String),
    EOF,
}

impl Tok {
    pub fn from_word(s: &str) -> Self {
        match s {
            "def" => Tok::Def,
            "return" => Tok::Return,
            _ if is_ident(s) => Tok::Ident(s.to_string()),
            _ if s.bytes().all(|c| c.is_ascii_digit()) => match s.parse::<i64>() {
                Ok(v) => Tok::IntLiteral(v),
                Err(_) => Tok::Invalid(s.to_string()),
            },
            _ => Tok::Invalid(s.to_string()),
        }
    }

    pub fn from_operator(s: &str) -> Self {
        match s {
            "=" => Tok::Assign,
            "+" => Tok::Plus,
            "-" => Tok::Minus,
            "*" => Tok::Mul,
            "/" => Tok::Div,
            _ => Tok::Symbol(s.to_string()),
        }
    }

    pub fn from_punc(c: char) -> Option<Self> {
        match c {
            '(' => Some(Tok::LParen),
            ')' => Some(Tok::RParen),
            ',' => Some(Tok::Comma),
            ':' => Some(Tok::Colon),
            '\n' => Some(Tok::Newline),
            _ => None,
        }
    }

    pub fn is_newline(&self) -> bool {
        self == &Tok::Newline
    }

    pub fn unlex(&self) -> String {
        use Tok::*;
        match self {
            Indent(n) => " ".repeat(*n),
            Newline => "\n".into(),
            Ident(s) | Symbol(s) | Invalid(s) => s.clone(),
            IntLiteral(v) => v.to_string(),
            LParen => "(".into(),
            RParen => ")".into(),
            Comma => ",".into(),
            Colon => ":".into(),
            Def => "def".into(),
            Return => "return".into(),
            Assign => "=".into(),
            Plus => "+".into(),
            Minus => "-".into(),
            Mul => "*".into(),
            Div => "/".into(),
            EOF => "".into(),
        }
    }
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Newline => write!(f, "newline"),
            Tok::Indent(n) => write!(f, "indentation of {}", n),
            Tok::EOF => write!(f, "end of input"),
            t => write!(f, "`{}`", t.unlex()),
        }
    }
}

/// `[A-Za-z][A-Za-z0-9]*`
pub fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub tok: Tok,
    pub loc: Location,
}

pub fn token(tok: Tok, loc: Location) -> Token {
    Token { tok, loc }
}

impl Token {
    pub fn eof() -> Self {
        token(Tok::EOF, Location::default())
    }
}
