use std::ops::{Deref, DerefMut};

use cursor::Line;
use itertools::Itertools;

/// What a diagnostic points at, rendered as the suffix after `Error`.
///
/// Lexical errors carry no token, so they render without a suffix.
#[derive(derive_more::Display, Clone, Debug, PartialEq)]
pub enum Location {
    #[display(fmt = "")]
    Unspecified,
    #[display(fmt = " at end")]
    AtEnd,
    #[display(fmt = " at '{}'", _0)]
    At(String),
}

#[derive(thiserror::Error, Clone, Debug, PartialEq)]
#[error("[line {line}] Error{location}: {message}")]
pub struct LoxError {
    pub line: Line,
    pub location: Location,
    pub message: String,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub struct LoxErrors(pub Vec<LoxError>);

impl From<LoxError> for LoxErrors {
    fn from(e: LoxError) -> Self {
        Self(vec![e])
    }
}

impl Deref for LoxErrors {
    type Target = Vec<LoxError>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for LoxErrors {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl std::fmt::Display for LoxErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().map(|e| e.to_string()).join("\n"))
    }
}

pub type Result<T> = std::result::Result<T, LoxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let error = LoxError {
            line: Line(1),
            location: Location::Unspecified,
            message: "Unexpected character: @".to_string(),
        };
        assert_eq!(error.to_string(), "[line 1] Error: Unexpected character: @");

        let error = LoxError {
            line: Line(3),
            location: Location::At(")".to_string()),
            message: "Expect expression.".to_string(),
        };
        assert_eq!(error.to_string(), "[line 3] Error at ')': Expect expression.");

        let error = LoxError {
            line: Line(2),
            location: Location::AtEnd,
            message: "Expect ')' after expression.".to_string(),
        };
        assert_eq!(error.to_string(), "[line 2] Error at end: Expect ')' after expression.");
    }
}
