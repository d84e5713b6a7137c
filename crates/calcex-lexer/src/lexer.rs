//! Core calcex lexer: converts expression text to a token stream.
//!
//! Features:
//! - Integer and decimal literals (`42`, `0.25`), parsed as `f64`
//! - Identifiers (`[A-Za-z_][A-Za-z0-9_]*`), collected as unknowns in
//!   first-appearance order without duplicates
//! - The operators `+ - * / ^` and parentheses
//! - ASCII whitespace skipped, including newlines
//! - Fail-fast: the first unrecognized character aborts lexing

use std::collections::BTreeSet;

use calcex_types::{CalcError, Result, Span};

use crate::token::{Token, TokenKind};

/// The calcex lexer.
pub struct Lexer<'src> {
    /// The full source text.
    source: &'src str,
    /// Current byte offset into `source`.
    pos: usize,
    /// Unknowns in first-appearance order.
    unknowns: Vec<String>,
    /// Names already pushed to `unknowns`.
    seen: BTreeSet<String>,
}

/// Result of lexing: tokens + the variables they reference.
#[derive(Debug, Clone, PartialEq)]
pub struct LexResult {
    /// The token stream, in source order.
    pub tokens: Vec<Token>,
    /// Distinct identifier names, in order of first appearance.
    pub unknowns: Vec<String>,
}

/// Lex an expression in one call.
pub fn lex(source: &str) -> Result<LexResult> {
    Lexer::new(source).lex()
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given expression.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            unknowns: Vec::new(),
            seen: BTreeSet::new(),
        }
    }

    /// Lex the entire expression into a token stream.
    pub fn lex(mut self) -> Result<LexResult> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            if let TokenKind::Identifier(name) = &token.kind {
                self.record_unknown(name);
            }
            tokens.push(token);
        }
        Ok(LexResult {
            tokens,
            unknowns: self.unknowns,
        })
    }

    fn record_unknown(&mut self, name: &str) {
        if self.seen.insert(name.to_string()) {
            self.unknowns.push(name.to_string());
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.pos)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_ascii_whitespace()) {
            self.advance();
        }
    }

    /// Error for the character starting at `start`.
    ///
    /// Everything before `start` is ASCII, so `start` is a char boundary.
    fn unexpected(&self, start: usize) -> CalcError {
        let character = self.source[start..]
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        CalcError::Lex {
            character,
            position: start,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Scanning
    // ─────────────────────────────────────────────────────────────

    /// Scan one token. `Ok(None)` at end of input.
    fn next_token(&mut self) -> Result<Option<Token>> {
        self.skip_whitespace();

        let start = self.pos;
        let Some(ch) = self.advance() else {
            return Ok(None);
        };

        let kind = match ch {
            b'0'..=b'9' => self.scan_number(start)?,
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.scan_identifier(start),
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'^' => TokenKind::Caret,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            _ => return Err(self.unexpected(start)),
        };

        Ok(Some(Token::new(kind, self.span_from(start))))
    }

    fn scan_number(&mut self, start: usize) -> Result<TokenKind> {
        // First digit already consumed
        while let Some(b'0'..=b'9') = self.peek() {
            self.advance();
        }

        // A '.' only belongs to the number when a digit follows it
        if self.peek() == Some(b'.') && matches!(self.peek_at(1), Some(b'0'..=b'9')) {
            self.advance();
            while let Some(b'0'..=b'9') = self.peek() {
                self.advance();
            }
        }

        self.source[start..self.pos]
            .parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| self.unexpected(start))
    }

    fn scan_identifier(&mut self, start: usize) -> TokenKind {
        while matches!(self.peek(), Some(ch) if ch.is_ascii_alphanumeric() || ch == b'_') {
            self.advance();
        }
        TokenKind::Identifier(self.source[start..self.pos].to_string())
    }
}
