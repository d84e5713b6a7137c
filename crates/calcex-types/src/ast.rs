//! AST node types for calcex expressions.
//!
//! Every node carries a [`Span`] covering its source text. Children are
//! boxed and exclusively owned; the tree is never mutated after the parser
//! builds it.

use crate::Span;
use std::fmt;

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Number of nodes in the tree rooted here.
    pub fn node_count(&self) -> usize {
        match &self.kind {
            ExprKind::Literal(_) | ExprKind::Variable(_) => 1,
            ExprKind::Block(child) => 1 + child.node_count(),
            ExprKind::Unary { operand, .. } => 1 + operand.node_count(),
            ExprKind::Binary { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        self.deepest().0
    }

    /// The deepest node and its distance from the root; the leftmost one on
    /// ties. Iterative, so it is safe on trees of any height.
    pub fn deepest(&self) -> (usize, &Expr) {
        let mut best = (0, self);
        let mut stack: Vec<(usize, &Expr)> = vec![(0, self)];
        while let Some((depth, expr)) = stack.pop() {
            if depth > best.0 {
                best = (depth, expr);
            }
            match &expr.kind {
                ExprKind::Literal(_) | ExprKind::Variable(_) => {}
                ExprKind::Block(child) | ExprKind::Unary { operand: child, .. } => {
                    stack.push((depth + 1, child.as_ref()));
                }
                ExprKind::Binary { left, right, .. } => {
                    stack.push((depth + 1, right.as_ref()));
                    stack.push((depth + 1, left.as_ref()));
                }
            }
        }
        best
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// `( child )`, transparent to evaluation.
    Block(Box<Expr>),
    /// `-x`, `+x`
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// `a + b`, `a ^ b`, ...
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Numeric literal: `42`, `0.5`
    Literal(f64),
    /// Reference to an unknown: `x`
    Variable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Minus,
}

impl UnaryOp {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Plus => value,
            Self::Minus => -value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    /// IEEE-754 arithmetic; division by zero yields an infinity or NaN.
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Mul => left * right,
            Self::Div => left / right,
            Self::Pow => left.powf(right),
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        };
        f.write_str(sym)
    }
}

/// Prints canonical source: single spaces around binary operators, blocks
/// keep their parentheses.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Block(child) => write!(f, "({child})"),
            ExprKind::Unary { op, operand } => write!(f, "{op}{operand}"),
            ExprKind::Binary { op, left, right } => write!(f, "{left} {op} {right}"),
            ExprKind::Literal(n) => write!(f, "{n}"),
            ExprKind::Variable(name) => f.write_str(name),
        }
    }
}
