mod expr;

use std::{cell::RefCell, iter::Peekable, unreachable};

pub use expr::{Expr, LiteralValue};

use errors::{Location, LoxError, LoxErrors, Result};
use scanner::{Token, TokenData, TokenStream};

use TokenData::*;

#[derive(Debug)]
pub struct ParserError<'a> {
    error: ParserErrorType,
    token: Token<'a>,
}

impl<'a> ParserError<'a> {
    fn new(error: ParserErrorType, token: Token<'a>) -> Self {
        Self { error, token }
    }
}

impl<'a> From<ParserError<'a>> for LoxError {
    fn from(error: ParserError<'a>) -> Self {
        let location = match error.token.data {
            Eof => Location::AtEnd,
            _ => Location::At(error.token.lexeme().to_string()),
        };
        LoxError { line: error.token.line(), location, message: error.error.to_string() }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParserErrorType {
    #[error("Expect ')' after expression.")]
    ExpectedRightParen,
    #[error("Expect expression.")]
    ExpectedExpression,
}

/// Recursive-descent parser over a lazy token stream.
///
/// The cursor only ever advances, one token of lookahead, no
/// backtracking. Scan errors travel through the stream as items and
/// propagate out of whichever production trips over them.
#[derive(Debug)]
pub struct Parser<'a> {
    token_stream: RefCell<Peekable<TokenStream<'a>>>,
}

impl<'a> Parser<'a> {
    pub fn new(token_stream: TokenStream<'a>) -> Self {
        Self { token_stream: RefCell::new(token_stream.peekable()) }
    }

    /// Parses a single expression, or reports the diagnostics that made
    /// one impossible. Lexical errors past the end of the expression
    /// still fail the parse, so callers never mistake a partially bad
    /// source for a clean one.
    pub fn parse(&'a self) -> std::result::Result<Expr<'a>, LoxErrors> {
        match self.expression() {
            Ok(expr) => {
                // Trailing tokens are tolerated, trailing lexical
                // errors are not.
                let trailing = self.drain_scan_errors();
                if !trailing.is_empty() {
                    return Err(LoxErrors(trailing));
                }
                log::debug!("Parsed: {expr}");
                Ok(expr)
            }
            Err(e) => {
                log::trace!("Hit error: {:?}, syncing...", e);
                // Discards to the next statement boundary. With an
                // expression-only grammar there is nothing to resume
                // afterwards, but this is the recovery point once
                // statements exist.
                self.synchronize();
                Err(e.into())
            }
        }
    }

    fn expression(&'a self) -> Result<Expr<'a>> {
        self.equality()
    }

    fn equality(&'a self) -> Result<Expr<'a>> {
        let mut expr = self.comparison()?;

        while let Some(Ok(BangEqual)) | Some(Ok(EqualEqual)) = self.peek() {
            let operator = self.advance()?;
            let right = Box::new(self.comparison()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn comparison(&'a self) -> Result<Expr<'a>> {
        let mut expr = self.term()?;

        while let Some(Ok(Greater))
        | Some(Ok(GreaterEqual))
        | Some(Ok(Less))
        | Some(Ok(LessEqual)) = self.peek()
        {
            let operator = self.advance()?;
            let right = Box::new(self.term()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn term(&'a self) -> Result<Expr<'a>> {
        let mut expr = self.factor()?;

        while let Some(Ok(Plus)) | Some(Ok(Minus)) = self.peek() {
            let operator = self.advance()?;
            let right = Box::new(self.factor()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn factor(&'a self) -> Result<Expr<'a>> {
        let mut expr = self.unary()?;

        while let Some(Ok(Star)) | Some(Ok(Slash)) = self.peek() {
            let operator = self.advance()?;
            let right = Box::new(self.unary()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn unary(&'a self) -> Result<Expr<'a>> {
        if let Some(Ok(Bang)) | Some(Ok(Minus)) = self.peek() {
            let operator = self.advance()?;
            let right = Box::new(self.unary()?);
            return Ok(Expr::Unary { operator, right });
        }
        self.primary()
    }

    fn primary(&'a self) -> Result<Expr<'a>> {
        let token = self.advance()?;
        match token.data {
            False => Ok(Expr::Literal(LiteralValue::Boolean(false))),
            True => Ok(Expr::Literal(LiteralValue::Boolean(true))),
            Nil => Ok(Expr::Literal(LiteralValue::Nil)),
            Str(s) => Ok(Expr::Literal(LiteralValue::Str(s))),
            Number(n) => Ok(Expr::Literal(LiteralValue::Number(n))),
            LeftParen => {
                let expr = self.expression()?;

                self.consume_or_error(RightParen, ParserErrorType::ExpectedRightParen)?;

                Ok(Expr::Grouping(Box::new(expr)))
            }

            _ => Err(ParserError::new(ParserErrorType::ExpectedExpression, token).into()),
        }
    }

    fn consume(&self, token: TokenData) -> Result<std::result::Result<Token, Token>> {
        assert!(!matches!(token, Number(_) | Str(_)));
        match self.peek_token() {
            Some(Ok(t)) if t.data == token => Ok(Ok(self.advance().unwrap())),
            Some(Ok(t)) => Ok(Err(t)),
            Some(Err(err)) => Err(err),
            None => unreachable!("Should have hit Eof"),
        }
    }

    fn consume_or_error(&self, token: TokenData, error_type: ParserErrorType) -> Result<Token> {
        match self.consume(token)? {
            Ok(token) => Ok(token),
            Err(token) => Err(ParserError::new(error_type, token).into()),
        }
    }

    /// Consumes the rest of the stream, keeping only the lexical
    /// errors the scanner hit along the way.
    fn drain_scan_errors(&self) -> Vec<LoxError> {
        let mut stream = self.token_stream.borrow_mut();
        stream.by_ref().filter_map(|token| token.err()).collect()
    }

    /// Discards tokens up to a statement boundary: just past a
    /// semicolon, or just before a keyword that starts a statement.
    fn synchronize(&self) {
        loop {
            match self.peek() {
                Some(Ok(Eof)) | None => return,
                Some(Ok(Class | Fun | Var | For | If | While | Print | Return)) => return,
                Some(Ok(Semicolon)) => {
                    let _ = self.advance();
                    return;
                }
                _ => {
                    let _ = self.advance();
                }
            }
        }
    }
}

// Helpers
impl<'a> Parser<'a> {
    fn peek_token(&self) -> Option<Result<Token<'a>>> {
        self.token_stream.borrow_mut().peek().cloned()
    }

    fn peek(&self) -> Option<Result<TokenData<'a>>> {
        self.peek_token().map(|t| t.map(|t| t.data))
    }

    fn advance(&self) -> Result<Token<'a>> {
        self.token_stream.borrow_mut().next().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use cursor::Line;
    use pretty_assertions::assert_eq;

    use super::*;

    #[ctor::ctor]
    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn parse(source: &str) -> std::result::Result<String, LoxErrors> {
        let parser = Parser::new(TokenStream::new(source));
        parser.parse().map(|expr| expr.to_string())
    }

    #[test]
    fn precedence() {
        // Multiplication binds tighter than addition
        assert_eq!(parse("1 + 2 * 3").unwrap(), "(+ 1 (* 2 3))");
        assert_eq!(parse("1 * 2 + 3").unwrap(), "(+ (* 1 2) 3)");
        assert_eq!(parse("1 < 2 == true").unwrap(), "(== (< 1 2) true)");
    }

    #[test]
    fn left_associativity() {
        assert_eq!(parse("1 - 2 - 3").unwrap(), "(- (- 1 2) 3)");
        assert_eq!(parse("1 / 2 / 3").unwrap(), "(/ (/ 1 2) 3)");
    }

    #[test]
    fn unary_is_right_associative() {
        assert_eq!(parse("!!true").unwrap(), "(! (! true))");
        assert_eq!(parse("--1").unwrap(), "(- (- 1))");
    }

    #[test]
    fn grouping_overrides_precedence() {
        assert_eq!(parse("(1 + 2) * 3").unwrap(), "(* (group (+ 1 2)) 3)");
    }

    #[test]
    fn literals() {
        assert_eq!(parse("nil").unwrap(), "nil");
        assert_eq!(parse("\"hi\"").unwrap(), "hi");
        assert_eq!(parse("1.50").unwrap(), "1.5");
        assert_eq!(parse("false").unwrap(), "false");
    }

    #[test]
    fn prefix_printing() {
        assert_eq!(parse("-123 * (45.67)").unwrap(), "(* (- 123) (group 45.67))");
    }

    #[test]
    fn missing_closing_paren() {
        assert_eq!(
            parse("(1 + 2").unwrap_err(),
            LoxErrors(vec![LoxError {
                line: Line(1),
                location: Location::AtEnd,
                message: ParserErrorType::ExpectedRightParen.to_string(),
            }])
        );
    }

    #[test]
    fn expected_expression() {
        assert_eq!(
            parse("1 + *").unwrap_err(),
            LoxErrors(vec![LoxError {
                line: Line(1),
                location: Location::At("*".to_string()),
                message: ParserErrorType::ExpectedExpression.to_string(),
            }])
        );
    }

    #[test]
    fn trailing_tokens_are_tolerated() {
        assert_eq!(parse("1 2").unwrap(), "1");
    }

    #[test]
    fn scan_error_after_complete_expression() {
        assert_eq!(
            parse("1 @").unwrap_err(),
            LoxErrors(vec![LoxError {
                line: Line(1),
                location: Location::Unspecified,
                message: "Unexpected character: @".to_string(),
            }])
        );
    }

    #[test]
    fn all_trailing_scan_errors_are_collected() {
        assert_eq!(
            parse("1 @ 2 #").unwrap_err(),
            LoxErrors(vec![
                LoxError {
                    line: Line(1),
                    location: Location::Unspecified,
                    message: "Unexpected character: @".to_string(),
                },
                LoxError {
                    line: Line(1),
                    location: Location::Unspecified,
                    message: "Unexpected character: #".to_string(),
                },
            ])
        );
    }

    #[test]
    fn scan_error_propagates() {
        assert_eq!(
            parse("1 + @").unwrap_err(),
            LoxErrors(vec![LoxError {
                line: Line(1),
                location: Location::Unspecified,
                message: "Unexpected character: @".to_string(),
            }])
        );
    }

    #[test]
    fn error_messages_format() {
        assert_eq!(
            parse("(1 + 2").unwrap_err().to_string(),
            "[line 1] Error at end: Expect ')' after expression."
        );
        assert_eq!(
            parse("1 +\n)").unwrap_err().to_string(),
            "[line 2] Error at ')': Expect expression."
        );
    }
}
