mod token;
mod lexer;
mod ast;
mod parser;
mod error;


pub use token::{Operator, Paren, Token, TokenKind};
pub use lexer::{Lexer, tokenize};
pub use ast::{ASTNode, Term};
pub use parser::{MAX_NESTING_DEPTH, Parser, parse};
pub use error::{Error, LexError, ParseError};

use tracing::debug;

/// Scans and parses `source` in one pass, returning the `Program` node.
pub fn parse_source(source: &str) -> Result<ASTNode, Error> {
    let tokens = tokenize(source)?;
    let tree = parse(&tokens)?;
    debug!(tokens = tokens.len(), "parsed source");
    Ok(tree)
}
