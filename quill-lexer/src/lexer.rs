// quill-lexer - Lexer for the Quill programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Lexer (tokeniser) for Quill source code.
//!
//! Converts a source string into a flat list of tokens terminated by an
//! `EndOfFile` token. Lexemes are string slices borrowed from the source.

use std::fmt;

use crate::token::{Token, TokenKind, keyword_kind};

/// Lexer error with position information.
#[derive(Debug, Clone)]
pub struct LexError {
    pub message: String,
    pub line: u16,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lex error on line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for LexError {}

/// The lexer converts source code into tokens.
///
/// One pass over the source bytes; `start` marks the beginning of the
/// current lexeme and `current` the scan position. When a token is
/// recognised its lexeme is `source[start..current]`.
pub struct Lexer<'src> {
    source: &'src str,
    tokens: Vec<Token<'src>>,
    start: usize,
    current: usize,
    line: u16,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    /// Tokenise the whole source.
    ///
    /// Returns the token list terminated by an `EndOfFile` token, or the
    /// first error encountered.
    pub fn tokenize(mut self) -> Result<Vec<Token<'src>>, LexError> {
        while !self.is_at_end() {
            self.extract_token()?;
        }
        self.start = self.source.len();
        self.current = self.source.len();
        self.add_token(TokenKind::EndOfFile);
        Ok(self.tokens)
    }

    fn extract_token(&mut self) -> Result<(), LexError> {
        self.start = self.current;
        let c = self.advance();
        match c {
            // Single characters
            b'[' => self.add_token(TokenKind::OpenBracket),
            b']' => self.add_token(TokenKind::CloseBracket),
            b'{' => self.add_token(TokenKind::OpenBrace),
            b'}' => self.add_token(TokenKind::CloseBrace),
            b'(' => self.add_token(TokenKind::OpenParen),
            b')' => self.add_token(TokenKind::CloseParen),
            b';' => self.add_token(TokenKind::EndStatement),
            b'+' => self.add_token(TokenKind::Plus),
            b'-' => self.add_token(TokenKind::Minus),
            b'*' => self.add_token(TokenKind::Multiply),
            b'%' => self.add_token(TokenKind::Modulus),
            b',' => self.add_token(TokenKind::Comma),
            b'.' => self.add_token(TokenKind::Dot),

            // Single- or double-character operators
            b'!' => {
                let kind = if self.match_advance(b'=') {
                    TokenKind::NotEqual
                } else {
                    TokenKind::Not
                };
                self.add_token(kind);
            }
            b'=' => {
                let kind = if self.match_advance(b'=') {
                    TokenKind::IsEqual
                } else {
                    TokenKind::Assign
                };
                self.add_token(kind);
            }
            b'<' => {
                let kind = if self.match_advance(b'=') {
                    TokenKind::LessThanEqual
                } else {
                    TokenKind::LessThan
                };
                self.add_token(kind);
            }
            b'>' => {
                let kind = if self.match_advance(b'=') {
                    TokenKind::GreaterThanEqual
                } else {
                    TokenKind::GreaterThan
                };
                self.add_token(kind);
            }
            b'/' => {
                if self.match_advance(b'/') {
                    self.skip_comment();
                } else {
                    self.add_token(TokenKind::Divide);
                }
            }

            // Whitespace
            b' ' | b'\r' | b'\t' => {}
            b'\n' => self.line += 1,

            // Double or single quotes mark string literals
            b'"' | b'\'' => self.string(c)?,

            _ => {
                if c.is_ascii_digit() {
                    self.number();
                } else if c.is_ascii_alphabetic() || c == b'_' {
                    self.identifier();
                } else {
                    return Err(self.error(format!("Unexpected character '{}'", c as char)));
                }
            }
        }
        Ok(())
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme = &self.source[self.start..self.current];
        self.tokens.push(Token::new(kind, lexeme, self.line));
    }

    fn error(&self, message: String) -> LexError {
        LexError {
            message,
            line: self.line,
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> u8 {
        let c = self.source.as_bytes()[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> u8 {
        if self.is_at_end() {
            b'\0'
        } else {
            self.source.as_bytes()[self.current]
        }
    }

    fn peek_next(&self) -> u8 {
        if self.current + 1 >= self.source.len() {
            b'\0'
        } else {
            self.source.as_bytes()[self.current + 1]
        }
    }

    fn match_advance(&mut self, expected: u8) -> bool {
        if self.is_at_end() || self.peek() != expected {
            return false;
        }
        self.current += 1;
        true
    }

    /// Comments run to the end of the line.
    fn skip_comment(&mut self) {
        while self.peek() != b'\n' && !self.is_at_end() {
            self.advance();
        }
    }

    /// A string literal delimited by the quote character that opened it.
    /// The lexeme excludes the quotes.
    fn string(&mut self, quote: u8) -> Result<(), LexError> {
        while self.peek() != quote && !self.is_at_end() {
            if self.peek() == b'\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            return Err(self.error("Unterminated string".to_string()));
        }

        self.start += 1; // lexeme doesn't include the opening quote
        self.add_token(TokenKind::String);
        self.advance(); // lexeme doesn't include the closing quote
        Ok(())
    }

    /// A numeric literal: digits with an optional single embedded decimal
    /// point.
    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            self.advance(); // eat the decimal point
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }
        self.add_token(TokenKind::Number);
    }

    /// An identifier or keyword: `[A-Za-z_][A-Za-z0-9_]*`.
    fn identifier(&mut self) {
        while self.peek().is_ascii_alphanumeric() || self.peek() == b'_' {
            self.advance();
        }
        let lexeme = &self.source[self.start..self.current];
        self.add_token(keyword_kind(lexeme).unwrap_or(TokenKind::Identifier));
    }
}

// ============================================================================
// Tests
// ============================================================================
