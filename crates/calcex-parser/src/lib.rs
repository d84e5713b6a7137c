//! calcex parser: validates a token stream, pairs its parentheses, and
//! builds the AST.
//!
//! ```text
//! tokens → check → parenthesize → parse → Expr
//! ```

mod blocks;
mod checker;
mod parse_expr;
mod parser;

pub use blocks::{parenthesize, ParenBlock, ParenMap};
pub use checker::check;
pub use parser::{parse, Parser};
