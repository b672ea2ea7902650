use std::str::FromStr;

use cursor::{Cursor, Line};
use errors::{Location, LoxError, LoxErrors, Result};
use itertools::Itertools;

mod token;
use token::Keyword;
pub use token::{Token, TokenData};
use TokenData::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    #[error("Unexpected character: {0}")]
    UnexpectedCharacter(char),
    #[error("Unterminated string.")]
    UnterminatedString,
}

/// Lazy scanner over the source text.
///
/// Lexical errors are yielded as `Err` items and scanning resumes with
/// the next character, so a single pass surfaces every bad character.
/// The stream always ends with exactly one `Eof` token.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    cursor: Cursor<'a>,
    eof_emitted: bool,
}

impl<'a> TokenStream<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { cursor: Cursor::new(source), eof_emitted: false }
    }

    fn error(&self, line: Line, error: ScanError) -> LoxError {
        LoxError { line, location: Location::Unspecified, message: error.to_string() }
    }

    fn consume_if_matches(&mut self, expected: char) -> bool {
        if self.cursor.peek() == Some(expected) {
            self.cursor.next();
            true
        } else {
            false
        }
    }

    fn string(&mut self, start: &Cursor<'a>) -> Result<TokenData<'a>> {
        loop {
            match self.cursor.next() {
                Some('"') => {
                    let lexeme = start.slice_until(&self.cursor);
                    // Strip the surrounding quotes, no escape processing.
                    return Ok(Str(&lexeme[1..lexeme.len() - 1]));
                }
                Some(_) => (),
                None => {
                    return Err(self.error(self.cursor.line(), ScanError::UnterminatedString))
                }
            }
        }
    }

    fn number(&mut self, start: &Cursor<'a>) -> TokenData<'a> {
        while matches!(self.cursor.peek(), Some(d) if d.is_ascii_digit()) {
            self.cursor.next();
        }

        // The dot is only part of the number when a digit follows it,
        // so `1.` scans as a Number followed by a Dot.
        if self.cursor.peek() == Some('.')
            && matches!(self.cursor.peek_next(), Some(d) if d.is_ascii_digit())
        {
            self.cursor.next();
            while matches!(self.cursor.peek(), Some(d) if d.is_ascii_digit()) {
                self.cursor.next();
            }
        }

        // The lexeme is digits with at most one interior dot, which
        // always parses.
        Number(start.slice_until(&self.cursor).parse().unwrap())
    }

    fn identifier(&mut self, start: &Cursor<'a>) -> TokenData<'a> {
        while matches!(self.cursor.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.cursor.next();
        }

        match Keyword::from_str(start.slice_until(&self.cursor)) {
            Ok(keyword) => keyword.into(),
            Err(_) => Identifier,
        }
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let start = self.cursor.clone();
            let Some(c) = self.cursor.next() else {
                if self.eof_emitted {
                    return None;
                }
                self.eof_emitted = true;
                return Some(Ok(Token::new(Eof, (start, self.cursor.clone()))));
            };

            let data = match c {
                '(' => LeftParen,
                ')' => RightParen,
                '{' => LeftBrace,
                '}' => RightBrace,
                ',' => Comma,
                '.' => Dot,
                '-' => Minus,
                '+' => Plus,
                ';' => Semicolon,
                '*' => Star,

                '!' => {
                    if self.consume_if_matches('=') {
                        BangEqual
                    } else {
                        Bang
                    }
                }
                '=' => {
                    if self.consume_if_matches('=') {
                        EqualEqual
                    } else {
                        Equal
                    }
                }
                '<' => {
                    if self.consume_if_matches('=') {
                        LessEqual
                    } else {
                        Less
                    }
                }
                '>' => {
                    if self.consume_if_matches('=') {
                        GreaterEqual
                    } else {
                        Greater
                    }
                }

                '/' => {
                    if self.consume_if_matches('/') {
                        // Comment, runs to the end of the line
                        while !matches!(self.cursor.peek(), Some('\n') | None) {
                            self.cursor.next();
                        }
                        continue;
                    } else {
                        Slash
                    }
                }

                ' ' | '\r' | '\t' | '\n' => continue,

                '"' => match self.string(&start) {
                    Ok(data) => data,
                    Err(e) => return Some(Err(e)),
                },

                d if d.is_ascii_digit() => self.number(&start),

                a if a.is_ascii_alphabetic() || a == '_' => self.identifier(&start),

                c => {
                    return Some(Err(
                        self.error(start.line(), ScanError::UnexpectedCharacter(c))
                    ))
                }
            };

            let token = Token::new(data, (start, self.cursor.clone()));
            log::trace!("Scanned {:?}", token);
            return Some(Ok(token));
        }
    }
}

/// Scans the whole source eagerly, returning every token that could be
/// produced alongside the collected lexical errors.
pub fn scan(source: &str) -> (Vec<Token>, LoxErrors) {
    let (tokens, errors): (Vec<_>, Vec<_>) = TokenStream::new(source).partition_result();
    (tokens, LoxErrors(errors))
}
