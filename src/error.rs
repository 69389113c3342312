//! Error types for both pipeline stages.
//!
//! Every error is terminal: the first one aborts the pass and no partial
//! token sequence or tree is returned alongside it.

use thiserror::Error;

use crate::token::{Token, TokenKind};

/// Failure while scanning raw text. Positions are character offsets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("invalid character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    /// The digit run does not fit in an `i64`.
    #[error("integer literal {literal} at position {position} is out of range")]
    IntegerOverflow { literal: String, position: usize },
}

/// Failure while parsing a token sequence. Positions are token indices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("expected {expected} but found {found} at position {position}")]
    Mismatch {
        expected: TokenKind,
        found: TokenKind,
        position: usize,
    },

    #[error("unexpected token {found} at position {position}")]
    UnexpectedToken { found: TokenKind, position: usize },

    #[error("expected closing parenthesis but found {found} at position {position}")]
    UnclosedParenthesis { found: Token, position: usize },

    #[error("expression nesting is too deep at position {position} (maximum {max} levels)")]
    NestingTooDeep { position: usize, max: usize },
}

/// Either stage's failure, as returned by [`crate::parse_source`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),
}
