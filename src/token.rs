use std::fmt;

/// Arithmetic operator. All four bind equally and fold left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paren {
    Open,
    Close,
}

impl Paren {
    pub fn symbol(self) -> char {
        match self {
            Paren::Open => '(',
            Paren::Close => ')',
        }
    }
}

/// A lexical unit. Equality covers both the kind and the carried value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Variable(String),
    Integer(i64),
    Operator(Operator),
    Assign,
    Semicolon,
    Parenthesis(Paren),
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Variable(_) => TokenKind::Variable,
            Token::Integer(_) => TokenKind::Integer,
            Token::Operator(_) => TokenKind::Operator,
            Token::Assign => TokenKind::Assign,
            Token::Semicolon => TokenKind::Semicolon,
            Token::Parenthesis(_) => TokenKind::Parenthesis,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Variable(name) => write!(f, "Token({}, {})", self.kind(), name),
            Token::Integer(value) => write!(f, "Token({}, {})", self.kind(), value),
            Token::Operator(op) => write!(f, "Token({}, {})", self.kind(), op),
            Token::Assign => write!(f, "Token({}, =)", self.kind()),
            Token::Semicolon => write!(f, "Token({}, ;)", self.kind()),
            Token::Parenthesis(paren) => write!(f, "Token({}, {})", self.kind(), paren.symbol()),
        }
    }
}

/// Value-less tag of a [`Token`], used for expected-kind checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Variable,
    Integer,
    Operator,
    Assign,
    Semicolon,
    Parenthesis,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Variable => "VARIABLE",
            TokenKind::Integer => "INTEGER",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Parenthesis => "PARENTHESIS",
        };
        f.write_str(name)
    }
}
