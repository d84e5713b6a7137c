//! calcex: compile and evaluate arithmetic expressions with named variables.
//!
//! ```text
//! source → Lexer → Syntax Checker → Paren Resolver → Parser → AST
//!                                                           ├→ CompiledEvaluator::calc (reusable)
//!                                                           └→ evaluate (one shot)
//! ```
//!
//! ```
//! let eval = calcex::compile("x + y * 2").unwrap();
//! assert_eq!(eval.unknowns(), ["x", "y"]);
//! assert_eq!(eval.calc(&[("x", 1.0), ("y", 3.0)]).unwrap(), 7.0);
//!
//! assert_eq!(calcex::evaluate_once("2 ^ 3 ^ 2", &[] as &[(&str, f64)]).unwrap(), 512.0);
//! ```

use log::debug;

pub use calcex_eval::{Bindings, CompiledEvaluator};
pub use calcex_lexer::{LexResult, Token, TokenKind};
pub use calcex_parser::{ParenBlock, ParenMap};
pub use calcex_types::ast;
pub use calcex_types::{
    CalcError, ErrorCategory, ErrorCode, LimitKind, Limits, ParenFault, Result, Span,
    SyntaxFault, DEFAULT_MAX_DEPTH, DEFAULT_MAX_TOKENS,
};

/// Output of the front end: the AST plus its variable names in order of
/// first appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub ast: ast::Expr,
    pub unknowns: Vec<String>,
}

// ══════════════════════════════════════════════════════════════════════════════
// Front End
// ══════════════════════════════════════════════════════════════════════════════

/// Lex, check, pair parentheses, and parse `expression`.
pub fn front_end(expression: &str, limits: &Limits) -> Result<Parsed> {
    let LexResult { tokens, unknowns } = calcex_lexer::lex(expression)?;
    debug!(
        "lexed {} token(s), {} unknown(s)",
        tokens.len(),
        unknowns.len()
    );
    if tokens.len() > limits.max_tokens {
        return Err(CalcError::LimitExceeded {
            limit: LimitKind::TokenCount,
            actual: tokens.len(),
            max: limits.max_tokens,
            position: tokens.get(limits.max_tokens).map_or(0, Token::position),
        });
    }

    let tokens = calcex_parser::check(&tokens)?;
    let blocks = calcex_parser::parenthesize(tokens)?;
    debug!(
        "resolved {} paren block(s), max level {}",
        blocks.len(),
        blocks.max_level()
    );

    let ast = calcex_parser::parse(tokens, &blocks, limits)?;
    debug!("parsed {} node(s)", ast.node_count());
    Ok(Parsed { ast, unknowns })
}

// ══════════════════════════════════════════════════════════════════════════════
// Compiled Form
// ══════════════════════════════════════════════════════════════════════════════

/// Compile `expression` with default [`Limits`].
pub fn compile(expression: &str) -> Result<CompiledEvaluator> {
    compile_with_limits(expression, &Limits::default())
}

/// Compile `expression` into an evaluator reusable across binding sets.
pub fn compile_with_limits(expression: &str, limits: &Limits) -> Result<CompiledEvaluator> {
    let Parsed { ast, unknowns } = front_end(expression, limits)?;
    let evaluator = CompiledEvaluator::new(ast, unknowns)?;
    debug!("compiled expression with unknowns {:?}", evaluator.unknowns());
    Ok(evaluator)
}

// ══════════════════════════════════════════════════════════════════════════════
// Direct Form
// ══════════════════════════════════════════════════════════════════════════════

/// Parse and evaluate `expression` once with default [`Limits`].
pub fn evaluate_once<B: Bindings + ?Sized>(expression: &str, bindings: &B) -> Result<f64> {
    evaluate_once_with_limits(expression, bindings, &Limits::default())
}

/// Parse and evaluate `expression` once, without building a reusable
/// evaluator.
pub fn evaluate_once_with_limits<B: Bindings + ?Sized>(
    expression: &str,
    bindings: &B,
    limits: &Limits,
) -> Result<f64> {
    let Parsed { ast, unknowns } = front_end(expression, limits)?;
    calcex_eval::evaluate(&ast, &unknowns, bindings)
}
