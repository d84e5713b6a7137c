//! Core parser infrastructure: token cursor, range handling, depth guard.

use calcex_lexer::token::{Token, TokenKind};
use calcex_types::ast::Expr;
use calcex_types::{CalcError, LimitKind, Limits, Result, SyntaxFault};

use crate::blocks::ParenMap;
use crate::checker::{position_of, syntax_error};

/// The calcex parser.
///
/// Consumes a checked token stream plus its [`ParenMap`] and builds an AST.
/// Parenthesized ranges are parsed recursively: the cursor is confined to
/// `pos..end`, and a `(` jumps straight to its matching `)` via the map.
pub struct Parser<'a> {
    /// The full token stream.
    tokens: &'a [Token],
    /// Matching parentheses, keyed by opening index.
    pub(crate) blocks: &'a ParenMap,
    /// Current index into `tokens`.
    pub(crate) pos: usize,
    /// Exclusive end of the range currently being parsed.
    pub(crate) end: usize,
    /// Current nesting depth (blocks, unary signs, exponents). A lower
    /// bound on the tree depth of the node being parsed.
    depth: u32,
    /// Maximum nesting depth.
    max_depth: u32,
}

/// Parse a token stream in one call.
pub fn parse(tokens: &[Token], blocks: &ParenMap, limits: &Limits) -> Result<Expr> {
    Parser::new(tokens, blocks, limits).parse()
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], blocks: &'a ParenMap, limits: &Limits) -> Self {
        Self {
            tokens,
            blocks,
            pos: 0,
            end: tokens.len(),
            depth: 0,
            max_depth: limits.max_depth,
        }
    }

    /// Parse the whole token stream into a single root expression.
    ///
    /// The finished tree is no taller than `max_depth`, counting every
    /// node, so later passes may recurse over it freely.
    pub fn parse(mut self) -> Result<Expr> {
        let expr = self.parse_range(0, self.tokens.len())?;
        let (height, deepest) = expr.deepest();
        if height > self.max_depth as usize {
            return Err(self.depth_exceeded(height, deepest.span.start));
        }
        Ok(expr)
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Returns the current token without advancing, `None` at the end of
    /// the current range.
    pub(crate) fn peek(&self) -> Option<&'a Token> {
        if self.pos < self.end {
            self.tokens.get(self.pos)
        } else {
            None
        }
    }

    pub(crate) fn peek_kind(&self) -> Option<&'a TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    /// Advance the cursor by one and return the consumed token.
    pub(crate) fn advance(&mut self) -> Option<&'a Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    pub(crate) fn token(&self, index: usize) -> Option<&'a Token> {
        self.tokens.get(index)
    }

    // ── Ranges ────────────────────────────────────────────────────────────────

    /// Parse `start..end` as one complete expression. The cursor ends at
    /// `end`; the enclosing range bound is restored afterwards.
    pub(crate) fn parse_range(&mut self, start: usize, end: usize) -> Result<Expr> {
        let outer_end = self.end;
        self.pos = start;
        self.end = end;

        let expr = self.parse_expression()?;
        if self.pos < self.end {
            return Err(self.error_at(SyntaxFault::TrailingTokens, self.pos));
        }

        self.end = outer_end;
        Ok(expr)
    }

    /// Run `f` one nesting level deeper, failing once `max_depth` is passed.
    pub(crate) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.depth += 1;
        if self.depth > self.max_depth {
            let err = self.depth_exceeded(self.depth as usize, position_of(self.tokens, self.pos));
            self.depth -= 1;
            return Err(err);
        }
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// A left-associative chain with `links` operators puts its first
    /// operand `links` levels below the chain's root. Fails early, at the
    /// operator under the cursor, once that alone passes `max_depth`.
    pub(crate) fn check_chain(&self, links: u32) -> Result<()> {
        let depth = self.depth + links;
        if depth > self.max_depth {
            return Err(self.depth_exceeded(depth as usize, position_of(self.tokens, self.pos)));
        }
        Ok(())
    }

    fn depth_exceeded(&self, actual: usize, position: usize) -> CalcError {
        CalcError::LimitExceeded {
            limit: LimitKind::NestingDepth,
            actual,
            max: self.max_depth as usize,
            position,
        }
    }

    // ── Error Reporting ───────────────────────────────────────────────────────

    pub(crate) fn error_at(&self, fault: SyntaxFault, index: usize) -> CalcError {
        syntax_error(self.tokens, fault, index)
    }
}
