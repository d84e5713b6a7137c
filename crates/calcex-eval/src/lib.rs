//! calcex evaluators.
//!
//! Two ways to turn a parsed expression into a number:
//!
//! - [`CompiledEvaluator`] lowers the AST once and evaluates it against
//!   any number of binding sets.
//! - [`evaluate`] walks the AST a single time.
//!
//! Both apply the same binding rules and IEEE-754 arithmetic, so they agree
//! on every input.

pub mod bindings;
mod compiled;
mod direct;

pub use bindings::Bindings;
pub use compiled::CompiledEvaluator;
pub use direct::evaluate;
