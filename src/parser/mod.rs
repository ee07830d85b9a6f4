use crate::ast::*;
use crate::lexer::{Location, Scanner};
use crate::results::{LangError, Result};
use crate::tokens::*;
use log::debug;

mod pratt;

/// How deep parentheses and call arguments may nest inside one expression.
pub const MAX_NESTING: usize = 200;

/// Recursive descent parser with one token of lookahead.
///
/// Top-level statements come out one at a time as the parser is iterated;
/// after the first error the iterator is exhausted.
pub struct Parser<I: Iterator<Item = Token>> {
    tokens: I,
    token: Token,
    nesting: usize,
    done: bool,
}

impl<'a> Parser<Scanner<'a>> {
    pub fn from_str(source: &'a str) -> Self {
        Self::new(Scanner::new(source))
    }
}

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn new(mut tokens: I) -> Self {
        let token = tokens.next().unwrap_or_else(Token::eof);
        Self {
            tokens,
            token,
            nesting: 0,
            done: false,
        }
    }

    fn peek(&self) -> &Tok {
        &self.token.tok
    }

    fn loc(&self) -> &Location {
        &self.token.loc
    }

    /// Move to the next token, returning the current one.
    fn advance(&mut self) -> Token {
        let next = self.tokens.next().unwrap_or_else(Token::eof);
        std::mem::replace(&mut self.token, next)
    }

    fn expect(&mut self, tok: Tok) -> Result<Token> {
        if self.peek() == &tok {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("expected {}", tok)))
        }
    }

    fn unexpected(&self, message: &str) -> LangError {
        match self.peek() {
            Tok::Indent(_) => LangError::indentation("unexpected indentation", self.loc()),
            Tok::Invalid(s) => LangError::syntax(format!("invalid token `{}`", s), self.loc()),
            t => LangError::syntax(format!("{}, found {}", message, t), self.loc()),
        }
    }

    fn skip_newlines(&mut self) {
        while self.peek().is_newline() {
            self.advance();
        }
    }

    /// A simple statement has to be the only thing on its line.
    fn end_statement(&mut self) -> Result<()> {
        match self.peek() {
            Tok::Newline | Tok::EOF => Ok(()),
            _ => Err(self.unexpected("expected end of line")),
        }
    }

    /// Run `f` one nesting level deeper, failing at the current token once
    /// [`MAX_NESTING`] is reached.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.nesting >= MAX_NESTING {
            return Err(LangError::syntax(
                format!("expression nested more than {} levels deep", MAX_NESTING),
                self.loc(),
            ));
        }
        self.nesting += 1;
        let result = f(self);
        self.nesting -= 1;
        result
    }

    fn parse_ident(&mut self, what: &str) -> Result<Variable> {
        match self.peek() {
            Tok::Ident(name) => {
                let var = Variable::new(name, self.loc().clone());
                self.advance();
                Ok(var)
            }
            t => Err(LangError::syntax(
                format!("{} is not a valid {}", t, what),
                self.loc(),
            )),
        }
    }

    /// `statement := 'def' funcdef | ident '=' expr | expr`
    ///
    /// `indent` is the indentation of the block the statement sits in.
    fn parse_statement(&mut self, indent: usize) -> Result<Node> {
        match self.peek() {
            Tok::Def => self.parse_defun(indent),
            Tok::Ident(_) => {
                let var = self.parse_ident("variable name")?;
                if self.peek() == &Tok::Assign {
                    self.advance();
                    let value = self.parse_expr()?;
                    return Ok(Node::var_def(var, value));
                }
                let operand = self.parse_name_tail(var)?;
                self.parse_opchain(operand, 0)
            }
            _ => self.parse_expr(),
        }
    }

    fn parse_simple_statement(&mut self, indent: usize) -> Result<Node> {
        let node = self.parse_statement(indent)?;
        // a def hands back control at the start of the line after its block
        if !matches!(node, Node::FunctionDef(_)) {
            self.end_statement()?;
        }
        Ok(node)
    }

    /// `expr := operand opchain`
    pub fn parse_expr(&mut self) -> Result<Node> {
        let operand = self.parse_operand()?;
        self.parse_opchain(operand, 0)
    }

    /// `operand := '(' expr ')' | int | ident ( '(' args ')' )?`
    fn parse_operand(&mut self) -> Result<Node> {
        match self.peek() {
            Tok::LParen => self.nested(|p| {
                p.advance();
                let expr = p.parse_expr()?;
                p.expect(Tok::RParen)?;
                Ok(expr)
            }),
            Tok::IntLiteral(v) => {
                let node = Node::Int(*v);
                self.advance();
                Ok(node)
            }
            Tok::Ident(_) => {
                let var = self.parse_ident("variable name")?;
                self.parse_name_tail(var)
            }
            _ => Err(self.unexpected("expected an expression")),
        }
    }

    fn parse_name_tail(&mut self, var: Variable) -> Result<Node> {
        match self.peek() {
            Tok::LParen => {
                let args = self.nested(|p| p.parse_args())?;
                Ok(Node::Call(var, args))
            }
            _ => Ok(Node::Var(var)),
        }
    }

    /// `args := '(' ( expr ( ',' expr )* )? ')'`
    fn parse_args(&mut self) -> Result<Vec<Node>> {
        self.expect(Tok::LParen)?;
        let mut args = vec![];
        if self.peek() == &Tok::RParen {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr()?);
            match self.peek() {
                Tok::Comma => {
                    self.advance();
                }
                Tok::RParen => {
                    self.advance();
                    return Ok(args);
                }
                _ => return Err(self.unexpected("expected `,` or `)` in argument list")),
            }
        }
    }

    /// `funcdef := 'def' ident '(' params ')' ':' NL NL* INDENT body`
    fn parse_defun(&mut self, enclosing: usize) -> Result<Node> {
        self.expect(Tok::Def)?;
        let name = self.parse_ident("function name")?;
        let params = self.parse_params()?;
        self.expect(Tok::Colon)?;
        self.expect(Tok::Newline)?;
        let body = self.parse_block(enclosing)?;
        let def = FunctionDef::new(name, params, body);
        debug!("function {}", &def);
        Ok(def.into())
    }

    fn parse_params(&mut self) -> Result<Vec<Variable>> {
        self.expect(Tok::LParen)?;
        let mut params = vec![];
        if self.peek() == &Tok::RParen {
            self.advance();
            return Ok(params);
        }
        loop {
            params.push(self.parse_ident("parameter name")?);
            match self.peek() {
                Tok::Comma => {
                    self.advance();
                }
                Tok::RParen => {
                    self.advance();
                    return Ok(params);
                }
                _ => return Err(self.unexpected("expected `,` or `)` in parameter list")),
            }
        }
    }

    /// Parse the statements of a block whose header has just been consumed.
    ///
    /// The first line fixes the block's indentation, which may not be less than
    /// `enclosing`. A `return` line ends the block on the spot. Otherwise the
    /// block runs until a line that is less indented, starts without any
    /// indentation, or the input ends.
    fn parse_block(&mut self, enclosing: usize) -> Result<Vec<Node>> {
        self.skip_newlines();
        let indent = match self.peek() {
            Tok::Indent(n) if *n >= enclosing => *n,
            Tok::Indent(_) => {
                return Err(LangError::indentation(
                    "block is indented less than the enclosing block",
                    self.loc(),
                ))
            }
            _ => return Err(LangError::indentation("expected an indented block", self.loc())),
        };

        let mut body = vec![];
        loop {
            // the indentation token
            self.advance();

            if self.peek() == &Tok::Return {
                self.advance();
                let expr = self.parse_expr()?;
                self.end_statement()?;
                body.push(expr);
                break;
            }

            let node = self.parse_simple_statement(indent)?;
            let ends_with_binding = node.is_binding();
            body.push(node);

            self.skip_newlines();
            match self.peek() {
                Tok::Indent(n) if *n == indent => continue,
                Tok::Indent(n) if *n > indent => {
                    return Err(LangError::indentation("unexpected indentation", self.loc()))
                }
                _ => {
                    if ends_with_binding {
                        body.push(Node::Null);
                    }
                    break;
                }
            }
        }
        Ok(body)
    }
}

impl<I: Iterator<Item = Token>> Iterator for Parser<I> {
    type Item = Result<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.skip_newlines();
        if self.peek() == &Tok::EOF {
            self.done = true;
            return None;
        }
        let result = self.parse_simple_statement(0);
        match &result {
            Ok(node) => debug!("statement {}", node),
            Err(_) => self.done = true,
        }
        Some(result)
    }
}

/// Parse a whole program into its top-level statements.
pub fn parse(source: &str) -> Result<Vec<Node>> {
    Parser::from_str(source).collect()
}
