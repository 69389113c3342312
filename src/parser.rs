use tracing::{debug, trace};

use crate::ast::ASTNode;
use crate::error::ParseError;
use crate::token::{Paren, Token, TokenKind};

/// Maximum depth of nested parentheses before the parser gives up.
///
/// Each level costs a few stack frames in the recursive descent, so deeply
/// nested input would otherwise overflow the stack.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Recursive-descent parser over a fully scanned token sequence.
///
/// ```text
/// Program    := Statement*
/// Statement  := Assignment
/// Assignment := VARIABLE ASSIGN Expression SEMICOLON
/// Expression := Term (OPERATOR Term)*
/// Term       := INTEGER | VARIABLE | '(' Expression ')'
/// ```
///
/// All operators share one precedence level and fold to the left, so
/// `a + b * c` parses as `(a + b) * c`.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn lookahead(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek(&self) -> Result<&'a Token, ParseError> {
        self.lookahead().ok_or(ParseError::UnexpectedEof)
    }

    /// Takes the current token, checking its kind when one is expected.
    fn consume(&mut self, expected: Option<TokenKind>) -> Result<&'a Token, ParseError> {
        let token = self.peek()?;
        if let Some(expected) = expected {
            if token.kind() != expected {
                return Err(ParseError::Mismatch {
                    expected,
                    found: token.kind(),
                    position: self.pos,
                });
            }
        }
        self.pos += 1;
        Ok(token)
    }

    /// Parses statements until the token sequence is exhausted.
    pub fn parse(&mut self) -> Result<ASTNode, ParseError> {
        let mut statements = Vec::new();
        while self.pos < self.tokens.len() {
            statements.push(self.statement()?);
        }
        debug!(statements = statements.len(), "parsed program");
        Ok(ASTNode::Program { statements })
    }

    fn statement(&mut self) -> Result<ASTNode, ParseError> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<ASTNode, ParseError> {
        trace!(position = self.pos, "assignment");
        let target = match self.peek()? {
            Token::Variable(name) => name,
            token => {
                return Err(ParseError::Mismatch {
                    expected: TokenKind::Variable,
                    found: token.kind(),
                    position: self.pos,
                });
            }
        };
        self.consume(None)?;
        self.consume(Some(TokenKind::Assign))?;
        let expr = self.expr()?;
        self.consume(Some(TokenKind::Semicolon))?;
        Ok(ASTNode::assign(target, expr))
    }

    fn expr(&mut self) -> Result<ASTNode, ParseError> {
        let mut node = self.term()?;

        while let Some(Token::Operator(op)) = self.lookahead() {
            self.consume(Some(TokenKind::Operator))?;
            let right = self.term()?;
            node = ASTNode::binary(*op, node, right);
        }

        Ok(node)
    }

    fn term(&mut self) -> Result<ASTNode, ParseError> {
        trace!(position = self.pos, "term");
        match self.peek()? {
            Token::Integer(value) => {
                self.consume(Some(TokenKind::Integer))?;
                Ok(ASTNode::integer(*value))
            }
            Token::Variable(name) => {
                self.consume(Some(TokenKind::Variable))?;
                Ok(ASTNode::variable(name))
            }
            Token::Parenthesis(Paren::Open) => self.group(),
            token => Err(ParseError::UnexpectedToken {
                found: token.kind(),
                position: self.pos,
            }),
        }
    }

    /// `'(' Expression ')'`. The closing token must be exactly `)`.
    fn group(&mut self) -> Result<ASTNode, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                position: self.pos,
                max: MAX_NESTING_DEPTH,
            });
        }
        self.consume(Some(TokenKind::Parenthesis))?;

        self.depth += 1;
        let node = self.expr();
        self.depth -= 1;
        let node = node?;

        match self.peek()? {
            Token::Parenthesis(Paren::Close) => {
                self.consume(Some(TokenKind::Parenthesis))?;
                Ok(node)
            }
            token => Err(ParseError::UnclosedParenthesis {
                found: token.clone(),
                position: self.pos,
            }),
        }
    }
}

/// Parses a complete token sequence into a `Program` node.
pub fn parse(tokens: &[Token]) -> Result<ASTNode, ParseError> {
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::token::Operator;

    fn parse_str(source: &str) -> Result<ASTNode, ParseError> {
        parse(&tokenize(source).unwrap())
    }

    fn single_expr(source: &str) -> ASTNode {
        match &parse_str(source).unwrap() {
            ASTNode::Program { statements } => {
                assert_eq!(statements.len(), 1);
                match &statements[0] {
                    ASTNode::Assignment { expr, .. } => (**expr).clone(),
                    other => panic!("expected assignment, got {:?}", other),
                }
            }
            other => panic!("expected program, got {:?}", other),
        }
    }

    fn int(value: i64) -> ASTNode {
        ASTNode::integer(value)
    }

    #[test]
    fn test_parse_simple_assignment() {
        assert_eq!(
            parse_str("x = 5;").unwrap(),
            ASTNode::Program {
                statements: vec![ASTNode::assign("x", int(5))],
            }
        );
    }

    #[test]
    fn test_parse_empty_program() {
        assert_eq!(parse(&[]).unwrap(), ASTNode::Program { statements: vec![] });
    }

    #[test]
    fn test_bare_term_has_no_expression_wrapper() {
        assert_eq!(single_expr("x = y;"), ASTNode::variable("y"));
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(
            single_expr("a = 1 - 2 - 3;"),
            ASTNode::binary(
                Operator::Sub,
                ASTNode::binary(Operator::Sub, int(1), int(2)),
                int(3)
            )
        );
    }

    #[test]
    fn test_flat_precedence() {
        assert_eq!(
            single_expr("a = 1 + 2 * 3;"),
            ASTNode::binary(
                Operator::Mul,
                ASTNode::binary(Operator::Add, int(1), int(2)),
                int(3)
            )
        );
    }

    #[test]
    fn test_parentheses_group() {
        assert_eq!(
            single_expr("a = (1 + 2) * 3;"),
            single_expr("a = 1 + 2 * 3;")
        );
        assert_eq!(
            single_expr("a = 1 * (2 + 3);"),
            ASTNode::binary(
                Operator::Mul,
                int(1),
                ASTNode::binary(Operator::Add, int(2), int(3))
            )
        );
    }

    #[test]
    fn test_redundant_parentheses_vanish() {
        assert_eq!(single_expr("a = ((x));"), ASTNode::variable("x"));
    }

    #[test]
    fn test_parse_multiple_statements() {
        let program = parse_str("a = 1; b = a + 2;").unwrap();
        assert_eq!(
            program,
            ASTNode::Program {
                statements: vec![
                    ASTNode::assign("a", int(1)),
                    ASTNode::assign(
                        "b",
                        ASTNode::binary(Operator::Add, ASTNode::variable("a"), int(2))
                    ),
                ],
            }
        );
    }

    #[test]
    fn test_missing_term() {
        assert_eq!(
            parse_str("a = ;").unwrap_err(),
            ParseError::UnexpectedToken {
                found: TokenKind::Semicolon,
                position: 2,
            }
        );
    }

    #[test]
    fn test_missing_semicolon_at_end() {
        assert_eq!(parse_str("a = 1").unwrap_err(), ParseError::UnexpectedEof);
    }

    #[test]
    fn test_dangling_operator() {
        assert_eq!(parse_str("a = 1 +").unwrap_err(), ParseError::UnexpectedEof);
    }

    #[test]
    fn test_missing_operator() {
        assert_eq!(
            parse_str("a = 1 2;").unwrap_err(),
            ParseError::Mismatch {
                expected: TokenKind::Semicolon,
                found: TokenKind::Integer,
                position: 3,
            }
        );
    }

    #[test]
    fn test_statement_must_start_with_variable() {
        assert_eq!(
            parse_str("5 = 1;").unwrap_err(),
            ParseError::Mismatch {
                expected: TokenKind::Variable,
                found: TokenKind::Integer,
                position: 0,
            }
        );
    }

    #[test]
    fn test_statement_starting_with_assign() {
        assert_eq!(
            parse_str("= 1;").unwrap_err(),
            ParseError::Mismatch {
                expected: TokenKind::Variable,
                found: TokenKind::Assign,
                position: 0,
            }
        );
    }

    #[test]
    fn test_second_statement_must_start_with_variable() {
        assert_eq!(
            parse_str("a = 1; (b) = 2;").unwrap_err(),
            ParseError::Mismatch {
                expected: TokenKind::Variable,
                found: TokenKind::Parenthesis,
                position: 4,
            }
        );
    }

    #[test]
    fn test_missing_assign() {
        assert_eq!(
            parse_str("a 1;").unwrap_err(),
            ParseError::Mismatch {
                expected: TokenKind::Assign,
                found: TokenKind::Integer,
                position: 1,
            }
        );
    }

    #[test]
    fn test_open_paren_does_not_close_group() {
        assert_eq!(
            parse_str("a = (1 + 2 (;").unwrap_err(),
            ParseError::UnclosedParenthesis {
                found: Token::Parenthesis(Paren::Open),
                position: 6,
            }
        );
    }

    #[test]
    fn test_unclosed_group_before_semicolon() {
        assert_eq!(
            parse_str("a = (1 + 2;").unwrap_err(),
            ParseError::UnclosedParenthesis {
                found: Token::Semicolon,
                position: 6,
            }
        );
    }

    #[test]
    fn test_unclosed_group_at_end() {
        assert_eq!(parse_str("a = (1").unwrap_err(), ParseError::UnexpectedEof);
    }

    #[test]
    fn test_close_paren_at_term_position() {
        assert_eq!(
            parse_str("a = 1 + );").unwrap_err(),
            ParseError::UnexpectedToken {
                found: TokenKind::Parenthesis,
                position: 4,
            }
        );
    }

    #[test]
    fn test_stray_close_paren_after_expression() {
        assert_eq!(
            parse_str("a = 1);").unwrap_err(),
            ParseError::Mismatch {
                expected: TokenKind::Semicolon,
                found: TokenKind::Parenthesis,
                position: 3,
            }
        );
    }

    #[test]
    fn test_nesting_at_limit() {
        let depth = MAX_NESTING_DEPTH;
        let source = format!("a = {}1{};", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(single_expr(&source), int(1));
    }

    #[test]
    fn test_nesting_too_deep() {
        let depth = MAX_NESTING_DEPTH + 1;
        let source = format!("a = {}1{};", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(
            parse_str(&source).unwrap_err(),
            ParseError::NestingTooDeep {
                position: 2 + MAX_NESTING_DEPTH,
                max: MAX_NESTING_DEPTH,
            }
        );
    }

    #[test]
    fn test_error_aborts_after_valid_statements() {
        assert_eq!(
            parse_str("a = 1; b = ;").unwrap_err(),
            ParseError::UnexpectedToken {
                found: TokenKind::Semicolon,
                position: 6,
            }
        );
    }
}
