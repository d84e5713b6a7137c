//! Compiled evaluator: the AST lowered once into a slot-indexed tree.
//!
//! Lowering resolves every variable to its index in `unknowns` and drops
//! block nodes, so `calc` is a plain recursive dispatch over [`Op`] with no
//! name lookups and no allocation beyond the resolved binding values.

use calcex_types::ast::{BinOp, Expr, ExprKind, UnaryOp};
use calcex_types::{CalcError, Result};

use crate::bindings::{self, Bindings};

/// A node of the lowered evaluation tree.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Op {
    Const(f64),
    /// Index into the resolved binding values.
    Slot(usize),
    Unary(UnaryOp, Box<Op>),
    Binary(BinOp, Box<Op>, Box<Op>),
}

impl Op {
    /// Lower `expr`, mapping each variable to its position in `unknowns`.
    pub(crate) fn lower(expr: &Expr, unknowns: &[String]) -> Result<Op> {
        Ok(match &expr.kind {
            ExprKind::Literal(n) => Op::Const(*n),
            ExprKind::Variable(name) => Op::Slot(
                unknowns
                    .iter()
                    .position(|u| u == name)
                    .ok_or_else(|| CalcError::MissingVariable { name: name.clone() })?,
            ),
            ExprKind::Block(child) => Op::lower(child, unknowns)?,
            ExprKind::Unary { op, operand } => {
                Op::Unary(*op, Box::new(Op::lower(operand, unknowns)?))
            }
            ExprKind::Binary { op, left, right } => Op::Binary(
                *op,
                Box::new(Op::lower(left, unknowns)?),
                Box::new(Op::lower(right, unknowns)?),
            ),
        })
    }

    /// Evaluate against resolved slot values.
    ///
    /// Every slot was produced by [`Op::lower`] against the same `unknowns`
    /// that `slots` was resolved from, so indexing is in bounds.
    pub(crate) fn eval(&self, slots: &[f64]) -> f64 {
        match self {
            Op::Const(n) => *n,
            Op::Slot(i) => slots[*i],
            Op::Unary(op, operand) => op.apply(operand.eval(slots)),
            Op::Binary(op, left, right) => op.apply(left.eval(slots), right.eval(slots)),
        }
    }
}

/// A parsed expression ready to be evaluated against many binding sets.
///
/// Owns its AST, the lowered tree, and the ordered unknown names. It holds
/// no interior mutability, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct CompiledEvaluator {
    ast: Expr,
    program: Op,
    unknowns: Vec<String>,
}

impl CompiledEvaluator {
    /// Lower `ast` against `unknowns`.
    ///
    /// Fails with `MissingVariable` if the tree references a name that is
    /// not in `unknowns`; the lexer's unknown list never allows that.
    pub fn new(ast: Expr, unknowns: Vec<String>) -> Result<Self> {
        let program = Op::lower(&ast, &unknowns)?;
        Ok(Self {
            ast,
            program,
            unknowns,
        })
    }

    /// Evaluate with one set of bindings.
    ///
    /// The binding count must equal `unknowns().len()` and every unknown
    /// must be bound.
    pub fn calc<B: Bindings + ?Sized>(&self, bindings: &B) -> Result<f64> {
        let slots = bindings::resolve(&self.unknowns, bindings)?;
        Ok(self.program.eval(&slots))
    }

    /// Variable names in order of first appearance.
    pub fn unknowns(&self) -> &[String] {
        &self.unknowns
    }

    pub fn ast(&self) -> &Expr {
        &self.ast
    }
}
