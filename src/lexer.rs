use tracing::{debug, trace};

use crate::error::LexError;
use crate::token::{Operator, Paren, Token};

pub struct Lexer {
    text: Vec<char>,
    pos: usize,
    current_char: Option<char>,
}

impl Lexer {
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let current_char = chars.first().copied();
        Lexer {
            text: chars,
            pos: 0,
            current_char,
        }
    }

    fn advance(&mut self) {
        self.pos += 1;
        self.current_char = self.text.get(self.pos).copied();
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn integer(&mut self) -> Result<i64, LexError> {
        let start = self.pos;
        let mut result = String::new();
        while let Some(ch) = self.current_char {
            if ch.is_ascii_digit() {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        // Only ASCII digits reach here, so the sole failure mode is overflow.
        result.parse::<i64>().map_err(|_| LexError::IntegerOverflow {
            literal: result.clone(),
            position: start,
        })
    }

    /// Identifiers are runs of letters only; digits and `_` end them.
    fn id(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char {
            if ch.is_alphabetic() {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Scans the next token, or `None` once the input is exhausted.
    pub fn get_next_token(&mut self) -> Result<Option<Token>, LexError> {
        while let Some(ch) = self.current_char {
            if ch.is_whitespace() {
                self.skip_whitespace();
                continue;
            }

            if ch.is_alphabetic() {
                return Ok(Some(Token::Variable(self.id())));
            }

            if ch.is_ascii_digit() {
                return Ok(Some(Token::Integer(self.integer()?)));
            }

            let token = single_char_token(ch).ok_or(LexError::UnexpectedCharacter {
                ch,
                position: self.pos,
            })?;
            self.advance();
            return Ok(Some(token));
        }

        Ok(None)
    }

    /// Scans the whole input. Fails on the first character that starts no token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.get_next_token()? {
            trace!(%token, "scanned");
            tokens.push(token);
        }
        debug!(tokens = tokens.len(), "tokenized input");
        Ok(tokens)
    }
}

fn single_char_token(ch: char) -> Option<Token> {
    let token = match ch {
        '+' => Token::Operator(Operator::Add),
        '-' => Token::Operator(Operator::Sub),
        '*' => Token::Operator(Operator::Mul),
        '/' => Token::Operator(Operator::Div),
        '=' => Token::Assign,
        ';' => Token::Semicolon,
        '(' => Token::Parenthesis(Paren::Open),
        ')' => Token::Parenthesis(Paren::Close),
        _ => return None,
    };
    Some(token)
}

/// Converts source text into its full token sequence.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}
