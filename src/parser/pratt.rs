//! Precedence climbing over the binary operators.
use super::Parser;
use crate::ast::{Node, Operator, Prec};
use crate::results::Result;
use crate::tokens::Token;

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Fold the operators following `left` into a left associative tree.
    ///
    /// Operators binding looser than `min_prec` are left for the caller. When
    /// the operator after the right operand binds tighter than the current
    /// one, that operand first absorbs the tighter chain at `prec + 1`.
    pub(super) fn parse_opchain(&mut self, mut left: Node, min_prec: Prec) -> Result<Node> {
        loop {
            let op = match Operator::from_tok(self.peek()) {
                Some(op) if op.precedence() >= min_prec => op,
                _ => return Ok(left),
            };
            self.advance();

            let mut right = self.parse_operand()?;
            if let Some(next) = Operator::from_tok(self.peek()) {
                if op.precedence() < next.precedence() {
                    right = self.parse_opchain(right, op.precedence() + 1)?;
                }
            }
            left = Node::binary(op, left, right);
        }
    }
}
