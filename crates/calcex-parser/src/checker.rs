//! Local syntax checking over the token stream.
//!
//! Every rule here looks at one token and its left neighbour only; nesting
//! depth is the resolver's concern. `+` and `-` are accepted anywhere: after
//! an operand they are binary, otherwise they are a unary sign.
//!
//! A `)` that closes nothing outranks any local fault: when one is present
//! the tokens are passed through so the resolver reports it at its own
//! index.

use calcex_lexer::{Token, TokenKind};
use calcex_types::{CalcError, Result, SyntaxFault};

use crate::blocks::unmatched_close;

/// Validate token adjacency. Returns the tokens unchanged on success.
pub fn check(tokens: &[Token]) -> Result<&[Token]> {
    match first_fault(tokens) {
        Some(_) if unmatched_close(tokens).is_some() => Ok(tokens),
        Some((fault, index)) => Err(syntax_error(tokens, fault, index)),
        None => Ok(tokens),
    }
}

/// The first local fault and the index of the token it is reported at.
fn first_fault(tokens: &[Token]) -> Option<(SyntaxFault, usize)> {
    let Some(last) = tokens.last() else {
        return Some((SyntaxFault::EmptyExpression, 0));
    };

    let mut prev: Option<&TokenKind> = None;
    for (index, token) in tokens.iter().enumerate() {
        if let Some(fault) = fault_after(prev, &token.kind) {
            return Some((fault, index));
        }
        prev = Some(&token.kind);
    }

    let end_fault = if last.kind.is_operator() {
        SyntaxFault::DanglingOperator
    } else if last.kind == TokenKind::LParen {
        SyntaxFault::UnexpectedEnd
    } else {
        return None;
    };
    Some((end_fault, tokens.len() - 1))
}

/// What is wrong with `kind` directly following `prev`, if anything.
fn fault_after(prev: Option<&TokenKind>, kind: &TokenKind) -> Option<SyntaxFault> {
    let after_operand = prev.is_some_and(TokenKind::ends_operand);
    match kind {
        TokenKind::Plus | TokenKind::Minus => None,
        TokenKind::Star | TokenKind::Slash | TokenKind::Caret if !after_operand => {
            Some(SyntaxFault::MissingOperand)
        }
        TokenKind::Star | TokenKind::Slash | TokenKind::Caret => None,
        TokenKind::Number(_) | TokenKind::Identifier(_) | TokenKind::LParen if after_operand => {
            Some(SyntaxFault::MissingOperator)
        }
        TokenKind::Number(_) | TokenKind::Identifier(_) | TokenKind::LParen => None,
        TokenKind::RParen => match prev {
            Some(TokenKind::LParen) => Some(SyntaxFault::EmptyParens),
            Some(p) if p.is_operator() => Some(SyntaxFault::DanglingOperator),
            // A leading ')' is left for the resolver to report as unmatched
            _ => None,
        },
    }
}

/// Build a syntax error for the token at `index`. An index one past the
/// end points just after the last token.
pub(crate) fn syntax_error(tokens: &[Token], fault: SyntaxFault, index: usize) -> CalcError {
    CalcError::Syntax {
        fault,
        token: index,
        position: position_of(tokens, index),
    }
}

pub(crate) fn position_of(tokens: &[Token], index: usize) -> usize {
    match tokens.get(index) {
        Some(token) => token.span.start,
        None => tokens.last().map_or(0, |t| t.span.end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcex_lexer::lex;

    fn check_src(source: &str) -> Result<usize> {
        let tokens = lex(source).unwrap().tokens;
        check(&tokens).map(|t| t.len())
    }

    fn fault(source: &str) -> (SyntaxFault, usize) {
        match check_src(source) {
            Err(CalcError::Syntax { fault, token, .. }) => (fault, token),
            other => panic!("expected syntax error for {source:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_pass_through() {
        assert_eq!(check_src("x + y * 2").unwrap(), 5);
    }

    #[test]
    fn test_empty() {
        assert_eq!(fault("   "), (SyntaxFault::EmptyExpression, 0));
    }

    #[test]
    fn test_unary_positions_accepted() {
        for src in ["-3", "+3", "2 * -3", "(-x)", "2 ^ -1", "- -3", "-(1)"] {
            assert!(check_src(src).is_ok(), "{src} should pass");
        }
    }

    #[test]
    fn test_operator_without_left_operand() {
        assert_eq!(fault("* 2"), (SyntaxFault::MissingOperand, 0));
        assert_eq!(fault("(/ 2)"), (SyntaxFault::MissingOperand, 1));
        assert_eq!(fault("2 + ^ 3"), (SyntaxFault::MissingOperand, 2));
    }

    #[test]
    fn test_leading_close_left_to_resolver() {
        assert!(check_src(")").is_ok());
    }

    #[test]
    fn test_unmatched_close_outranks_local_faults() {
        for src in ["(1))(2)", "1)2", ")1", "2 3)", "1 + )"] {
            assert!(check_src(src).is_ok(), "{src} should be left to the resolver");
        }
    }

    #[test]
    fn test_balanced_input_still_faults() {
        assert_eq!(fault("(1)(2)"), (SyntaxFault::MissingOperator, 3));
        assert_eq!(fault("(1 +)"), (SyntaxFault::DanglingOperator, 3));
    }
}
