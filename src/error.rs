//! Error types for parsing, validation, and condition evaluation

use thiserror::Error;

use crate::lexer::Token;

/// Errors raised while a grammar consumes tokens.
///
/// Lexing itself is total (unmatched characters degrade to [`Token::Other`]),
/// so every malformed input surfaces here, from the parser that first trips
/// over it. Errors propagate to the caller unchanged; no grammar recovers
/// locally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The cursor is at a token no rule of the active grammar can consume.
    #[error("unexpected token {0}")]
    UnexpectedToken(Token),
    /// A specific token was required and something else (or nothing) was found.
    #[error("expected token {0}")]
    ExpectedToken(Token),
    /// Free-form failure, e.g. an unknown relation or a malformed modifier.
    #[error("{0}")]
    Message(String),
    /// A bracketed condition parsed but failed operator/operand validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ParseError {
    pub(crate) fn message(message: impl Into<String>) -> Self {
        ParseError::Message(message.into())
    }
}

/// Contract violations caught by the condition evaluator.
///
/// Raised when a condition that validation would have rejected is evaluated
/// anyway: a bare numeric/size-class/dimension statement used as a boolean, or
/// a comparison applied to a non-leaf condition.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ConditionError {
    pub message: String,
}

impl ConditionError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        ConditionError {
            message: message.into(),
        }
    }
}

/// Operator/operand mismatches found by `Condition::validate`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        ValidationError {
            message: message.into(),
        }
    }
}
