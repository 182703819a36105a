//! Lexer for exprc
//!
//! Converts source code into a stream of tokens. The lexer never aborts:
//! an unrecognized character is recorded as a diagnostic, skipped, and
//! scanning continues with the next character.

use log::warn;

use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Error, Span};

/// The lexer state
pub struct Lexer {
    /// Source code as characters
    source: Vec<char>,
    /// Current position in source
    pos: usize,
    /// Current line (1-based)
    line: usize,
    /// Current column (1-based)
    column: usize,
    /// Location of the token being scanned
    start: Span,
    /// Set once the end-of-input token has been handed out by the iterator
    exhausted: bool,
    /// Lexical errors seen so far
    diagnostics: Vec<Error>,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            start: Span::new(1, 1),
            exhausted: false,
            diagnostics: Vec::new(),
        }
    }

    /// Rewind to the beginning of the source, forgetting earlier diagnostics
    pub fn reset(&mut self) {
        self.pos = 0;
        self.line = 1;
        self.column = 1;
        self.start = Span::new(1, 1);
        self.exhausted = false;
        self.diagnostics.clear();
    }

    /// Lexical errors reported so far
    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    /// Take the lexical errors reported so far
    pub fn take_diagnostics(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Get the current character without advancing
    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    /// Get the character `n` positions ahead without advancing
    fn peek_at(&self, n: usize) -> Option<char> {
        self.source.get(self.pos + n).copied()
    }

    /// Advance to the next character, tracking lines
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn here(&self) -> Span {
        Span::new(self.line, self.column)
    }

    /// Create a token located at the start of the current lexeme
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.start)
    }

    /// Skip whitespace and comments
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                // Line comment
                '/' if self.peek_at(1) == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                // Block comment
                '/' if self.peek_at(1) == Some('*') => {
                    self.advance();
                    self.advance();
                    loop {
                        match (self.peek(), self.peek_at(1)) {
                            (Some('*'), Some('/')) => {
                                self.advance();
                                self.advance();
                                break;
                            }
                            (None, _) => break,
                            _ => {
                                self.advance();
                            }
                        }
                    }
                }
                _ => break,
            }
        }
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let kind = TokenKind::keyword_from_str(&text).unwrap_or(TokenKind::Ident(text));
        self.make_token(kind)
    }

    fn read_digits(&mut self, text: &mut String) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Read a number literal. A float needs digits on both sides of the dot.
    fn read_number(&mut self) -> Option<Token> {
        let mut text = String::new();
        self.read_digits(&mut text);

        let is_float = self.peek() == Some('.')
            && self.peek_at(1).map_or(false, |c| c.is_ascii_digit());

        if is_float {
            text.push('.');
            self.advance();
            self.read_digits(&mut text);
            return match text.parse::<f64>() {
                Ok(value) => Some(self.make_token(TokenKind::FloatLit(value))),
                Err(e) => {
                    self.report_literal(text, e.to_string());
                    None
                }
            };
        }

        match text.parse::<i64>() {
            Ok(value) => Some(self.make_token(TokenKind::IntLit(value))),
            Err(e) => {
                self.report_literal(text, e.to_string());
                None
            }
        }
    }

    /// Read a string literal. No escape processing; newlines are allowed.
    fn read_string(&mut self) -> Option<Token> {
        let close = self.source[self.pos + 1..].iter().position(|&c| c == '"')?;

        self.advance(); // opening quote
        let mut value = String::with_capacity(close);
        for _ in 0..close {
            if let Some(c) = self.advance() {
                value.push(c);
            }
        }
        self.advance(); // closing quote

        Some(self.make_token(TokenKind::StringLit(value)))
    }

    /// Read a character literal: exactly one character between quotes
    fn read_char(&mut self) -> Option<Token> {
        match (self.peek_at(1), self.peek_at(2)) {
            (Some(c), Some('\'')) if c != '\n' => {
                self.advance();
                self.advance();
                self.advance();
                Some(self.make_token(TokenKind::CharLit(c)))
            }
            _ => None,
        }
    }

    fn report_literal(&mut self, text: String, reason: String) {
        warn!("illegal literal '{}' on line {}: {}", text, self.start.line, reason);
        self.diagnostics.push(Error::IllegalLiteral {
            text,
            reason,
            span: self.start,
        });
    }

    /// Record the current character as illegal and skip exactly one character
    fn skip_illegal(&mut self) {
        if let Some(ch) = self.advance() {
            warn!("illegal character '{}' on line {}", ch, self.start.line);
            self.diagnostics.push(Error::IllegalCharacter { ch, span: self.start });
        }
    }

    /// Scan one token, or `None` if the lexeme was rejected
    fn scan(&mut self, c: char) -> Option<Token> {
        if c.is_ascii_alphabetic() || c == '_' {
            return Some(self.read_identifier());
        }

        if c.is_ascii_digit() {
            return self.read_number();
        }

        if c == '"' || c == '\'' {
            let token = if c == '"' { self.read_string() } else { self.read_char() };
            if token.is_none() {
                self.skip_illegal();
            }
            return token;
        }

        let kind = match c {
            '=' => TokenKind::Eq,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            ';' => TokenKind::Semicolon,
            _ => {
                self.skip_illegal();
                return None;
            }
        };

        self.advance();
        Some(self.make_token(kind))
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();
            self.start = self.here();

            let Some(c) = self.peek() else {
                return Token::eof(self.start);
            };

            if let Some(token) = self.scan(c) {
                return token;
            }
        }
    }

    /// Tokenize the entire source and return all tokens, ending with `Eof`
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.exhausted {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.exhausted = true;
        }
        Some(token)
    }
}
