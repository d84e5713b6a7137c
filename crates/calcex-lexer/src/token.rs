//! Token types for the calcex lexer.
//!
//! Defines [`TokenKind`] covering every lexeme of the expression language
//! and [`Token`], which pairs a kind with a source [`Span`].

use calcex_types::ast::{BinOp, UnaryOp};
use calcex_types::Span;
use std::fmt;

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Source location.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Byte offset of the token's first character.
    pub fn position(&self) -> usize {
        self.span.start
    }

    /// The token's source text.
    pub fn lexeme<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.span.start..self.span.end).unwrap_or("")
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

/// Every token kind in the expression language.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Numeric literal (integer or decimal): `42`, `3.14`
    Number(f64),
    /// Variable name: `x`, `rate_2`
    Identifier(String),

    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `^`
    Caret,

    /// `(`
    LParen,
    /// `)`
    RParen,
}

impl TokenKind {
    /// Returns `true` for the five operator symbols.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Self::Plus | Self::Minus | Self::Star | Self::Slash | Self::Caret
        )
    }

    /// Returns `true` for numbers and identifiers.
    pub fn is_operand(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Identifier(_))
    }

    /// Returns `true` for tokens that can end an operand: a number, an
    /// identifier, or a closing parenthesis.
    pub fn ends_operand(&self) -> bool {
        self.is_operand() || matches!(self, Self::RParen)
    }

    /// The binary operator this token denotes, if any.
    pub fn binary_op(&self) -> Option<BinOp> {
        match self {
            Self::Plus => Some(BinOp::Add),
            Self::Minus => Some(BinOp::Sub),
            Self::Star => Some(BinOp::Mul),
            Self::Slash => Some(BinOp::Div),
            Self::Caret => Some(BinOp::Pow),
            _ => None,
        }
    }

    /// The unary sign this token denotes, if any.
    pub fn unary_op(&self) -> Option<UnaryOp> {
        match self {
            Self::Plus => Some(UnaryOp::Plus),
            Self::Minus => Some(UnaryOp::Minus),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Caret => write!(f, "^"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
        }
    }
}
