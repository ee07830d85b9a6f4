use std::fmt;

#[derive(PartialEq, Debug, Eq, Clone)]
pub enum S {
    Null,
    Atom(String),
    List(Vec<S>),
    Cons(String, Vec<S>),
}

impl fmt::Display for S {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            S::Null => write!(f, "()"),
            S::Atom(i) => write!(f, "{}", i),
            S::List(items) => {
                write!(f, "(")?;
                for (inx, s) in items.iter().enumerate() {
                    if inx > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", s)?;
                }
                write!(f, ")")
            }
            S::Cons(head, rest) => {
                write!(f, "({}", head)?;
                for s in rest {
                    write!(f, " {}", s)?
                }
                write!(f, ")")
            }
        }
    }
}

pub trait SExpr {
    fn sexpr(&self) -> S;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let s = S::Cons(
            "def".into(),
            vec![
                S::Atom("f".into()),
                S::List(vec![S::Atom("a".into()), S::Atom("b".into())]),
                S::Null,
            ],
        );
        assert_eq!(s.to_string(), "(def f (a b) ())");
        assert_eq!(S::List(vec![]).to_string(), "()");
    }
}
