use serde::{Deserialize, Serialize};

/// Default maximum nesting depth (parenthesis blocks, unary signs and
/// exponent chains all count).
pub const DEFAULT_MAX_DEPTH: u32 = 128;

/// Default maximum number of tokens in one expression.
pub const DEFAULT_MAX_TOKENS: usize = 4096;

/// Structural limits applied while compiling an expression.
///
/// Missing fields fall back to their defaults when deserialized, so a host
/// can override just one of them:
///
/// ```
/// let limits: calcex_types::Limits = serde_json::from_str(r#"{ "max_depth": 16 }"#).unwrap();
/// assert_eq!(limits.max_depth, 16);
/// assert_eq!(limits.max_tokens, calcex_types::DEFAULT_MAX_TOKENS);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_depth: u32,
    pub max_tokens: usize,
}

impl Limits {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}
