use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Lex,
    Syntax,
    Paren,
    Binding,
    Limit,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex => write!(f, "lex"),
            Self::Syntax => write!(f, "syntax"),
            Self::Paren => write!(f, "paren"),
            Self::Binding => write!(f, "binding"),
            Self::Limit => write!(f, "limit"),
        }
    }
}

/// Numeric error code (E100–E599).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Lex errors (E100–E199) ──
    pub const UNEXPECTED_CHARACTER: Self = Self(100);

    // ── Syntax errors (E200–E299) ──
    pub const EMPTY_EXPRESSION: Self = Self(200);
    pub const MISSING_OPERAND: Self = Self(201);
    pub const MISSING_OPERATOR: Self = Self(202);
    pub const DANGLING_OPERATOR: Self = Self(203);
    pub const EMPTY_PARENS: Self = Self(204);
    pub const UNEXPECTED_END: Self = Self(205);
    pub const TRAILING_TOKENS: Self = Self(206);

    // ── Parenthesis errors (E300–E399) ──
    pub const UNMATCHED_CLOSING_PAREN: Self = Self(300);
    pub const UNCLOSED_PAREN: Self = Self(301);

    // ── Binding errors (E400–E499) ──
    pub const WRONG_BINDING_COUNT: Self = Self(400);
    pub const MISSING_VARIABLE: Self = Self(401);

    // ── Limit errors (E500–E599) ──
    pub const NESTING_TOO_DEEP: Self = Self(500);
    pub const TOO_MANY_TOKENS: Self = Self(501);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::Lex,
            200..=299 => ErrorCategory::Syntax,
            300..=399 => ErrorCategory::Paren,
            400..=499 => ErrorCategory::Binding,
            _ => ErrorCategory::Limit,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// What the syntax checker (or the parser) found wrong with a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxFault {
    /// No tokens at all.
    EmptyExpression,
    /// A binary-only operator (`*`, `/`, `^`) or `)` where an operand belongs.
    MissingOperand,
    /// Two operands next to each other, e.g. `2 x` or `(1)(2)`.
    MissingOperator,
    /// An operator right before `)` or at the end of input.
    DanglingOperator,
    /// `()`
    EmptyParens,
    /// Input ends while an operand is still expected.
    UnexpectedEnd,
    /// Tokens left over after a complete expression.
    TrailingTokens,
}

impl SyntaxFault {
    pub fn code(self) -> ErrorCode {
        match self {
            Self::EmptyExpression => ErrorCode::EMPTY_EXPRESSION,
            Self::MissingOperand => ErrorCode::MISSING_OPERAND,
            Self::MissingOperator => ErrorCode::MISSING_OPERATOR,
            Self::DanglingOperator => ErrorCode::DANGLING_OPERATOR,
            Self::EmptyParens => ErrorCode::EMPTY_PARENS,
            Self::UnexpectedEnd => ErrorCode::UNEXPECTED_END,
            Self::TrailingTokens => ErrorCode::TRAILING_TOKENS,
        }
    }
}

impl fmt::Display for SyntaxFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::EmptyExpression => "empty expression",
            Self::MissingOperand => "operator is missing its left operand",
            Self::MissingOperator => "missing operator between operands",
            Self::DanglingOperator => "operator is missing its right operand",
            Self::EmptyParens => "empty parentheses",
            Self::UnexpectedEnd => "unexpected end of expression",
            Self::TrailingTokens => "unexpected token after complete expression",
        };
        f.write_str(text)
    }
}

/// Which side of a parenthesis pair is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParenFault {
    /// `)` with no open `(` to close.
    UnmatchedClose,
    /// `(` still open at end of input.
    Unclosed,
}

impl ParenFault {
    pub fn code(self) -> ErrorCode {
        match self {
            Self::UnmatchedClose => ErrorCode::UNMATCHED_CLOSING_PAREN,
            Self::Unclosed => ErrorCode::UNCLOSED_PAREN,
        }
    }
}

impl fmt::Display for ParenFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmatchedClose => f.write_str("closing ')' has no matching '('"),
            Self::Unclosed => f.write_str("'(' is never closed"),
        }
    }
}

/// A structural limit from [`crate::Limits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitKind {
    NestingDepth,
    TokenCount,
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NestingDepth => f.write_str("nesting depth"),
            Self::TokenCount => f.write_str("token count"),
        }
    }
}

/// Every way a calcex call can fail.
///
/// Errors are terminal for the call that produced them. Positions are byte
/// offsets into the expression text; `token` is an index into the token
/// stream.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalcError {
    #[error("unexpected character '{character}' at position {position}")]
    Lex { character: char, position: usize },

    #[error("syntax error at position {position}: {fault}")]
    Syntax {
        fault: SyntaxFault,
        token: usize,
        position: usize,
    },

    #[error("unbalanced parenthesis at position {position}: {fault}")]
    UnbalancedParen {
        fault: ParenFault,
        token: usize,
        position: usize,
    },

    #[error("expected {expected} variable binding(s), got {got}")]
    Arity { expected: usize, got: usize },

    #[error("no binding supplied for variable '{name}'")]
    MissingVariable { name: String },

    #[error("{limit} limit exceeded at position {position}: {actual} > {max}")]
    LimitExceeded {
        limit: LimitKind,
        actual: usize,
        max: usize,
        position: usize,
    },
}

impl CalcError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Lex { .. } => ErrorCode::UNEXPECTED_CHARACTER,
            Self::Syntax { fault, .. } => fault.code(),
            Self::UnbalancedParen { fault, .. } => fault.code(),
            Self::Arity { .. } => ErrorCode::WRONG_BINDING_COUNT,
            Self::MissingVariable { .. } => ErrorCode::MISSING_VARIABLE,
            Self::LimitExceeded {
                limit: LimitKind::NestingDepth,
                ..
            } => ErrorCode::NESTING_TOO_DEEP,
            Self::LimitExceeded {
                limit: LimitKind::TokenCount,
                ..
            } => ErrorCode::TOO_MANY_TOKENS,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.code().category()
    }

    /// Byte offset in the source the error points at, if it has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Lex { position, .. }
            | Self::Syntax { position, .. }
            | Self::UnbalancedParen { position, .. }
            | Self::LimitExceeded { position, .. } => Some(*position),
            Self::Arity { .. } | Self::MissingVariable { .. } => None,
        }
    }

    /// Index of the offending token, for errors raised after lexing.
    pub fn token_index(&self) -> Option<usize> {
        match self {
            Self::Syntax { token, .. } | Self::UnbalancedParen { token, .. } => Some(*token),
            _ => None,
        }
    }

    /// A short fix hint, when one applies.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Lex { .. } => Some("only numbers, names, + - * / ^ and parentheses are allowed"),
            Self::Syntax { fault, .. } => match fault {
                SyntaxFault::MissingOperator => {
                    Some("insert an operator such as '*' between the operands")
                }
                SyntaxFault::DanglingOperator | SyntaxFault::UnexpectedEnd => {
                    Some("add an operand after the operator")
                }
                SyntaxFault::EmptyParens => Some("put an expression inside the parentheses"),
                _ => None,
            },
            Self::UnbalancedParen {
                fault: ParenFault::Unclosed,
                ..
            } => Some("add a matching ')'"),
            Self::UnbalancedParen {
                fault: ParenFault::UnmatchedClose,
                ..
            } => Some("remove the ')' or add a matching '(' before it"),
            Self::Arity { .. } => Some("supply exactly one value per unknown"),
            Self::MissingVariable { .. } => None,
            Self::LimitExceeded { .. } => None,
        }
    }

    /// Render a caret diagnostic against the expression that produced this
    /// error.
    ///
    /// ```text
    /// error[E202]: syntax error at position 2: missing operator between operands
    ///  | 2 x
    ///  |   ^
    ///  = help: insert an operator such as '*' between the operands
    /// ```
    pub fn render(&self, source: &str) -> String {
        let mut out = format!("error[{}]: {}", self.code(), self);
        if let Some((line, column)) = self.position().and_then(|p| locate(source, p)) {
            out.push_str(&format!("\n | {line}\n | {}^", " ".repeat(column)));
        }
        if let Some(help) = self.suggestion() {
            out.push_str(&format!("\n = help: {help}"));
        }
        out
    }
}

/// Find the source line containing `offset` and the character column of
/// `offset` within it. `None` if the offset is not a char boundary.
fn locate(source: &str, offset: usize) -> Option<(&str, usize)> {
    let before = source.get(..offset)?;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[offset..]
        .find('\n')
        .map_or(source.len(), |i| offset + i);
    let line = source[line_start..line_end].trim_end_matches('\r');
    Some((line, before[line_start..].chars().count()))
}
