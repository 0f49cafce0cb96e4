use crate::token::Position;

/// A lexing or parsing failure, located at the offending token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
  pub line: usize,
  pub column: usize,
  pub message: String,
}

impl ParseError {
  pub fn new(position: Position, message: impl Into<String>) -> Self {
    Self {
      line: position.line,
      column: position.column,
      message: message.into(),
    }
  }
}

pub type ParseResult<T> = Result<T, ParseError>;
