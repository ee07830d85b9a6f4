use crate::results::{LangError, Result};
use crate::tokens::Tok;
use std::fmt;

pub type Prec = u8;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Operator {
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl Operator {
    pub fn from_tok(token: &Tok) -> Option<Operator> {
        match token {
            Tok::Plus => Some(Operator::Plus),
            Tok::Minus => Some(Operator::Minus),
            Tok::Mul => Some(Operator::Multiply),
            Tok::Div => Some(Operator::Divide),
            _ => None,
        }
    }

    pub fn token(&self) -> Tok {
        match self {
            Operator::Plus => Tok::Plus,
            Operator::Minus => Tok::Minus,
            Operator::Multiply => Tok::Mul,
            Operator::Divide => Tok::Div,
        }
    }

    pub fn precedence(&self) -> Prec {
        match self {
            Operator::Plus | Operator::Minus => 20,
            Operator::Multiply | Operator::Divide => 40,
        }
    }

    /// Integer arithmetic. Division floors toward negative infinity.
    pub fn apply(&self, left: i64, right: i64) -> Result<i64> {
        let result = match self {
            Operator::Plus => left.checked_add(right),
            Operator::Minus => left.checked_sub(right),
            Operator::Multiply => left.checked_mul(right),
            Operator::Divide => {
                if right == 0 {
                    return Err(LangError::DivisionByZero);
                }
                floor_div(left, right)
            }
        };
        result.ok_or_else(|| LangError::Overflow {
            op: *self,
            left,
            right,
        })
    }
}

fn floor_div(left: i64, right: i64) -> Option<i64> {
    let q = left.checked_div(right)?;
    if left % right != 0 && ((left < 0) != (right < 0)) {
        q.checked_sub(1)
    } else {
        Some(q)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token().unlex())
    }
}
