use std::fmt;

/// Byte offset plus 1-based line and column of a source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
  pub offset: usize,
  pub line: usize,
  pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punct {
  LBrace,
  RBrace,
  LBrack,
  RBrack,
  LParen,
  RParen,
  Colon,
  Comma,
  Dot,
  Ellipsis,
  Question,
  Not,
  Assign,
  Match,
  NotMatch,
  Equal,
  NotEqual,
  Less,
  LessEq,
  Greater,
  GreaterEq,
  And,
  Or,
  LogicalAnd,
  LogicalOr,
  Add,
  Sub,
  Mul,
  Quo,
}

impl Punct {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::LBrace => "{",
      Self::RBrace => "}",
      Self::LBrack => "[",
      Self::RBrack => "]",
      Self::LParen => "(",
      Self::RParen => ")",
      Self::Colon => ":",
      Self::Comma => ",",
      Self::Dot => ".",
      Self::Ellipsis => "...",
      Self::Question => "?",
      Self::Not => "!",
      Self::Assign => "=",
      Self::Match => "=~",
      Self::NotMatch => "!~",
      Self::Equal => "==",
      Self::NotEqual => "!=",
      Self::Less => "<",
      Self::LessEq => "<=",
      Self::Greater => ">",
      Self::GreaterEq => ">=",
      Self::And => "&",
      Self::Or => "|",
      Self::LogicalAnd => "&&",
      Self::LogicalOr => "||",
      Self::Add => "+",
      Self::Sub => "-",
      Self::Mul => "*",
      Self::Quo => "/",
    }
  }
}

impl fmt::Display for Punct {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A string literal with quotes removed and escapes decoded.
///
/// Interpolated strings keep the raw text between the quotes, since their
/// value is only known after evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLit {
  pub value: String,
  /// Text between the delimiters exactly as written.
  pub raw: String,
  pub interpolated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
  Ident(String),
  String(StringLit),
  Number(String),
  Attribute(String),
  Bottom,
  Punct(Punct),
  Eof,
}

impl TokenKind {
  pub fn describe(&self) -> String {
    match self {
      Self::Ident(name) => format!("identifier `{name}`"),
      Self::String(_) => "string literal".to_string(),
      Self::Number(value) => format!("number `{value}`"),
      Self::Attribute(text) => format!("attribute `{text}`"),
      Self::Bottom => "`_|_`".to_string(),
      Self::Punct(punct) => format!("`{punct}`"),
      Self::Eof => "end of file".to_string(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  pub start: Position,
  /// Position of the last character of the token.
  pub end: Position,
}

impl Token {
  pub fn is_punct(&self, punct: Punct) -> bool {
    self.kind == TokenKind::Punct(punct)
  }

  pub fn is_ident(&self, name: &str) -> bool {
    matches!(&self.kind, TokenKind::Ident(ident) if ident == name)
  }
}

/// A single `//` comment line, text stripped of the marker and surrounding space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
  pub text: String,
  pub position: Position,
}
