//! calcex lexer: converts expression text into a token stream and the list
//! of variables it references.

pub mod lexer;
pub mod token;

pub use lexer::{lex, LexResult, Lexer};
pub use token::{Token, TokenKind};
