//! Shared types for calcex.
//!
//! This crate defines the AST node types, source spans, the error type and
//! structural limits used across all pipeline stages.

mod error;
mod limits;
mod span;
pub mod ast;

pub use error::{CalcError, ErrorCategory, ErrorCode, LimitKind, ParenFault, SyntaxFault};
pub use limits::{Limits, DEFAULT_MAX_DEPTH, DEFAULT_MAX_TOKENS};
pub use span::Span;

/// Result type used throughout calcex.
pub type Result<T> = std::result::Result<T, CalcError>;
