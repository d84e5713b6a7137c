//! Parenthesis resolution: one pass that pairs every `(` with its `)`.

use calcex_lexer::{Token, TokenKind};
use calcex_types::{CalcError, ParenFault, Result};

use crate::checker::position_of;

/// A matched parenthesis pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParenBlock {
    /// Index of the `(` token.
    pub start: usize,
    /// Index one past the matching `)` token.
    pub end: usize,
    /// Nesting depth, 1 for an outermost pair.
    pub level: u32,
}

impl ParenBlock {
    /// Token indices strictly inside the parentheses.
    pub fn inner(&self) -> std::ops::Range<usize> {
        self.start + 1..self.end - 1
    }

    /// Returns `true` if `other` lies entirely inside this block.
    pub fn contains(&self, other: &ParenBlock) -> bool {
        self.start < other.start && other.end < self.end
    }
}

/// All blocks of one expression, ordered by opening index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParenMap {
    blocks: Vec<ParenBlock>,
}

impl ParenMap {
    /// The block opened by the `(` at token index `start`.
    pub fn get(&self, start: usize) -> Option<&ParenBlock> {
        self.blocks
            .binary_search_by_key(&start, |b| b.start)
            .ok()
            .map(|i| &self.blocks[i])
    }

    pub fn blocks(&self) -> &[ParenBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Deepest nesting level, 0 without parentheses.
    pub fn max_level(&self) -> u32 {
        self.blocks.iter().map(|b| b.level).max().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParenBlock> {
        self.blocks.iter()
    }
}

/// Pair up parentheses.
///
/// A `)` always closes the innermost open `(`. Fails on a `)` that would
/// take the depth below zero, and on a `(` still open at end of input.
pub fn parenthesize(tokens: &[Token]) -> Result<ParenMap> {
    let mut blocks = Vec::new();
    // (opening index, level) of each block not yet closed
    let mut open: Vec<(usize, u32)> = Vec::new();
    let mut level: u32 = 0;

    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LParen => {
                level += 1;
                open.push((i, level));
            }
            TokenKind::RParen => {
                let Some((start, block_level)) = open.pop() else {
                    return Err(paren_error(tokens, ParenFault::UnmatchedClose, i));
                };
                level -= 1;
                log::trace!("paren block {start}..{} at level {block_level}", i + 1);
                blocks.push(ParenBlock {
                    start,
                    end: i + 1,
                    level: block_level,
                });
            }
            _ => {}
        }
    }

    if let Some(&(start, _)) = open.first() {
        return Err(paren_error(tokens, ParenFault::Unclosed, start));
    }

    // Blocks close innermost-first; lookups want opening order
    blocks.sort_unstable_by_key(|b| b.start);
    Ok(ParenMap { blocks })
}

/// Index of the first `)` with no open `(` before it.
pub(crate) fn unmatched_close(tokens: &[Token]) -> Option<usize> {
    let mut depth: usize = 0;
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen if depth == 0 => return Some(i),
            TokenKind::RParen => depth -= 1,
            _ => {}
        }
    }
    None
}

fn paren_error(tokens: &[Token], fault: ParenFault, index: usize) -> CalcError {
    CalcError::UnbalancedParen {
        fault,
        token: index,
        position: position_of(tokens, index),
    }
}
