//! Expression parsing with full operator precedence.
//!
//! Precedence (lowest → highest):
//! 4. `+`, `-` (binary, left-associative)
//! 3. `*`, `/` (left-associative)
//! 2. `^` (right-associative)
//! 1. unary `+`, `-`
//! 0. `( ... )`, number, identifier
//!
//! Unary signs bind tighter than `^`, so `-2 ^ 2` is `(-2) ^ 2`.

use calcex_lexer::token::TokenKind;
use calcex_types::ast::{BinOp, Expr, ExprKind};
use calcex_types::{CalcError, ParenFault, Result, SyntaxFault};

use crate::parser::Parser;

impl<'a> Parser<'a> {
    // ══════════════════════════════════════════════════════════════════════════
    // Precedence Chain
    // ══════════════════════════════════════════════════════════════════════════

    /// `Expr = MulExpr { ("+" | "-") MulExpr }`
    pub(crate) fn parse_expression(&mut self) -> Result<Expr> {
        let mut left = self.parse_mul()?;
        let mut links = 0;
        while let Some(op @ (BinOp::Add | BinOp::Sub)) = self.peek_binary_op() {
            links += 1;
            self.check_chain(links)?;
            self.advance();
            let right = self.parse_mul()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    /// `MulExpr = PowExpr { ("*" | "/") PowExpr }`
    fn parse_mul(&mut self) -> Result<Expr> {
        let mut left = self.parse_pow()?;
        let mut links = 0;
        while let Some(op @ (BinOp::Mul | BinOp::Div)) = self.peek_binary_op() {
            links += 1;
            self.check_chain(links)?;
            self.advance();
            let right = self.parse_pow()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    /// `PowExpr = UnaryExpr [ "^" PowExpr ]`
    fn parse_pow(&mut self) -> Result<Expr> {
        let base = self.parse_unary()?;
        if self.peek_binary_op() != Some(BinOp::Pow) {
            return Ok(base);
        }
        self.advance();
        let exponent = self.nested(|p| p.parse_pow())?;
        Ok(binary(BinOp::Pow, base, exponent))
    }

    /// `UnaryExpr = ("+" | "-") UnaryExpr | Primary`
    fn parse_unary(&mut self) -> Result<Expr> {
        let Some((sign, op)) = self
            .peek()
            .and_then(|t| t.kind.unary_op().map(|op| (t, op)))
        else {
            return self.parse_primary();
        };
        self.advance();
        let operand = self.nested(|p| p.parse_unary())?;
        let span = sign.span.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn peek_binary_op(&self) -> Option<BinOp> {
        self.peek_kind().and_then(TokenKind::binary_op)
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Primary Expressions
    // ══════════════════════════════════════════════════════════════════════════

    fn parse_primary(&mut self) -> Result<Expr> {
        let index = self.pos;
        let Some(token) = self.advance() else {
            return Err(self.error_at(SyntaxFault::UnexpectedEnd, index));
        };
        match &token.kind {
            TokenKind::Number(n) => Ok(Expr::new(ExprKind::Literal(*n), token.span)),
            TokenKind::Identifier(name) => {
                Ok(Expr::new(ExprKind::Variable(name.clone()), token.span))
            }
            TokenKind::LParen => self.parse_block(index),
            _ => Err(self.error_at(SyntaxFault::MissingOperand, index)),
        }
    }

    /// Parse the block opened at `open`, leaving the cursor after its `)`.
    fn parse_block(&mut self, open: usize) -> Result<Expr> {
        let block = match self.blocks.get(open) {
            Some(block) if block.end <= self.end => *block,
            _ => {
                return Err(CalcError::UnbalancedParen {
                    fault: ParenFault::Unclosed,
                    token: open,
                    position: self.token(open).map_or(0, |t| t.span.start),
                })
            }
        };

        let inner = block.inner();
        if inner.is_empty() {
            return Err(self.error_at(SyntaxFault::EmptyParens, inner.end));
        }

        let child = self.nested(|p| p.parse_range(inner.start, inner.end))?;
        self.pos = block.end;

        let open_span = self.token(open).map(|t| t.span);
        let close_span = self.token(block.end - 1).map(|t| t.span);
        let span = match (open_span, close_span) {
            (Some(a), Some(b)) => a.merge(b),
            _ => child.span,
        };
        Ok(Expr::new(ExprKind::Block(Box::new(child)), span))
    }
}

fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}
