//! Direct evaluation: a single walk over the AST, looking variables up by
//! name as they are reached.

use calcex_types::ast::{Expr, ExprKind};
use calcex_types::{CalcError, Result};

use crate::bindings::{self, Bindings};

/// Evaluate `ast` once against `bindings`.
///
/// Bindings are validated against `unknowns` before the walk, with the same
/// arity and missing-variable rules as [`CompiledEvaluator::calc`].
///
/// [`CompiledEvaluator::calc`]: crate::CompiledEvaluator::calc
pub fn evaluate<B: Bindings + ?Sized>(
    ast: &Expr,
    unknowns: &[String],
    bindings: &B,
) -> Result<f64> {
    bindings::check(unknowns, bindings)?;
    walk(ast, bindings)
}

fn walk<B: Bindings + ?Sized>(expr: &Expr, bindings: &B) -> Result<f64> {
    match &expr.kind {
        ExprKind::Literal(n) => Ok(*n),
        ExprKind::Variable(name) => bindings
            .get(name)
            .ok_or_else(|| CalcError::MissingVariable { name: name.clone() }),
        ExprKind::Block(child) => walk(child, bindings),
        ExprKind::Unary { op, operand } => Ok(op.apply(walk(operand, bindings)?)),
        ExprKind::Binary { op, left, right } => {
            let l = walk(left, bindings)?;
            let r = walk(right, bindings)?;
            Ok(op.apply(l, r))
        }
    }
}
