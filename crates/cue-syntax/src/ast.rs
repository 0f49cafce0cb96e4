use strum::{Display, IntoStaticStr};

use crate::token::Position;

/// A parsed CUE file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct File {
  pub package: Option<String>,
  pub imports: Vec<Import>,
  pub decls: Vec<Decl>,
}

impl File {
  /// Top-level fields in declaration order.
  pub fn fields(&self) -> impl Iterator<Item = &Field> {
    self.decls.iter().filter_map(Decl::as_field)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
  pub alias: Option<String>,
  pub path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
  Field(Field),
  /// A comment group not attached to any declaration.
  Comment(CommentGroup),
  Embed(Expr),
  Ellipsis(Option<Expr>),
  Let { name: String, value: Expr },
  Comprehension(Comprehension),
  Attribute(String),
}

impl Decl {
  pub fn as_field(&self) -> Option<&Field> {
    match self {
      Self::Field(field) => Some(field),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Constraint {
  #[default]
  Regular,
  /// `label?: value`
  Optional,
  /// `label!: value`
  Required,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
  pub label: Label,
  pub constraint: Constraint,
  pub value: Expr,
  pub attributes: Vec<String>,
  /// Comment group ending on the line directly above the field.
  pub doc: Option<CommentGroup>,
  /// Comment on the same line, after the value.
  pub line_comment: Option<CommentGroup>,
  pub position: Position,
}

impl Field {
  pub fn is_optional(&self) -> bool {
    self.constraint == Constraint::Optional
  }

  /// Text of the line comment, falling back to the doc comment.
  pub fn comment_text(&self) -> Option<String> {
    self
      .line_comment
      .as_ref()
      .and_then(CommentGroup::text)
      .or_else(|| self.doc.as_ref().and_then(CommentGroup::text))
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Label {
  Ident(String),
  String(String),
  /// `[expr]: value`
  Pattern(Expr),
  /// `(expr): value`
  Dynamic(Expr),
}

impl Label {
  /// The literal name of the label, if it has one.
  pub fn name(&self) -> Option<&str> {
    match self {
      Self::Ident(name) | Self::String(name) => Some(name),
      Self::Pattern(_) | Self::Dynamic(_) => None,
    }
  }

  /// The definition name without its `#` marker, for `#Name` labels.
  pub fn definition_name(&self) -> Option<&str> {
    match self {
      Self::Ident(name) => name.strip_prefix('#'),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentGroup {
  pub lines: Vec<String>,
  pub position: Position,
}

impl CommentGroup {
  /// Line of the last comment in the group.
  pub fn end_line(&self) -> usize {
    self.position.line + self.lines.len().saturating_sub(1)
  }

  /// The first non-empty comment line, trimmed.
  pub fn text(&self) -> Option<String> {
    self
      .lines
      .iter()
      .map(|line| line.trim())
      .find(|line| !line.is_empty())
      .map(str::to_string)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructLit {
  pub decls: Vec<Decl>,
}

impl StructLit {
  pub fn fields(&self) -> impl Iterator<Item = &Field> {
    self.decls.iter().filter_map(Decl::as_field)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comprehension {
  pub clauses: Vec<Clause>,
  pub body: StructLit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
  For {
    key: Option<String>,
    value: String,
    source: Expr,
  },
  If(Expr),
  Let {
    name: String,
    value: Expr,
  },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
  /// Decoded value and the source text between the quotes.
  String { value: String, raw: String },
  Number(String),
  Bool(bool),
  Null,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListElement {
  Value(Expr),
  /// `...` or `...T`
  Ellipsis(Option<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum UnaryOp {
  #[strum(to_string = "!")]
  Not,
  #[strum(to_string = "-")]
  Neg,
  #[strum(to_string = "+")]
  Pos,
  #[strum(to_string = "*")]
  Default,
  #[strum(to_string = "=~")]
  Match,
  #[strum(to_string = "!~")]
  NotMatch,
  #[strum(to_string = "<")]
  Less,
  #[strum(to_string = "<=")]
  LessEq,
  #[strum(to_string = ">")]
  Greater,
  #[strum(to_string = ">=")]
  GreaterEq,
  #[strum(to_string = "==")]
  Equal,
  #[strum(to_string = "!=")]
  NotEqual,
}

impl UnaryOp {
  pub const fn is_match(self) -> bool {
    matches!(self, Self::Match | Self::NotMatch)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum BinaryOp {
  #[strum(to_string = "|")]
  Disjunction,
  #[strum(to_string = "&")]
  Conjunction,
  #[strum(to_string = "||")]
  Or,
  #[strum(to_string = "&&")]
  And,
  #[strum(to_string = "==")]
  Equal,
  #[strum(to_string = "!=")]
  NotEqual,
  #[strum(to_string = "<")]
  Less,
  #[strum(to_string = "<=")]
  LessEq,
  #[strum(to_string = ">")]
  Greater,
  #[strum(to_string = ">=")]
  GreaterEq,
  #[strum(to_string = "=~")]
  Match,
  #[strum(to_string = "!~")]
  NotMatch,
  #[strum(to_string = "+")]
  Add,
  #[strum(to_string = "-")]
  Sub,
  #[strum(to_string = "*")]
  Mul,
  #[strum(to_string = "/")]
  Quo,
}

impl BinaryOp {
  pub const fn is_match(self) -> bool {
    matches!(self, Self::Match | Self::NotMatch)
  }

  /// Binding strength, higher binds tighter.
  pub const fn precedence(self) -> u8 {
    match self {
      Self::Disjunction => 1,
      Self::Conjunction => 2,
      Self::Or => 3,
      Self::And => 4,
      Self::Equal
      | Self::NotEqual
      | Self::Less
      | Self::LessEq
      | Self::Greater
      | Self::GreaterEq
      | Self::Match
      | Self::NotMatch => 5,
      Self::Add | Self::Sub => 6,
      Self::Mul | Self::Quo => 7,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
  Ident(String),
  Literal(Literal),
  /// String literal containing `\( … )`, kept as raw text.
  Interpolation(String),
  Bottom,
  Unary {
    op: UnaryOp,
    operand: Box<Expr>,
  },
  Binary {
    op: BinaryOp,
    lhs: Box<Expr>,
    rhs: Box<Expr>,
  },
  List(Vec<ListElement>),
  Struct(StructLit),
  Call {
    func: Box<Expr>,
    args: Vec<Expr>,
  },
  Selector {
    operand: Box<Expr>,
    field: String,
  },
  Index {
    operand: Box<Expr>,
    index: Box<Expr>,
  },
  Paren(Box<Expr>),
}

impl Expr {
  /// Short name of the expression's shape, for diagnostics.
  pub fn shape(&self) -> String {
    match self {
      Self::Ident(name) => format!("identifier `{name}`"),
      Self::Literal(Literal::String { .. }) => "string literal".to_string(),
      Self::Literal(Literal::Number(_)) => "number literal".to_string(),
      Self::Literal(Literal::Bool(_)) => "bool literal".to_string(),
      Self::Literal(Literal::Null) => "null".to_string(),
      Self::Interpolation(_) => "interpolated string".to_string(),
      Self::Bottom => "bottom".to_string(),
      Self::Unary { op, .. } => format!("unary `{op}` expression"),
      Self::Binary {
        op: BinaryOp::Disjunction,
        ..
      } => "disjunction".to_string(),
      Self::Binary {
        op: BinaryOp::Conjunction,
        ..
      } => "conjunction".to_string(),
      Self::Binary { op, .. } => format!("binary `{op}` expression"),
      Self::List(_) => "list".to_string(),
      Self::Struct(_) => "struct".to_string(),
      Self::Call { func, .. } => match func.qualified_name() {
        Some(name) => format!("call to `{name}`"),
        None => "call".to_string(),
      },
      Self::Selector { .. } => match self.qualified_name() {
        Some(name) => format!("selector `{name}`"),
        None => "selector".to_string(),
      },
      Self::Index { .. } => "index expression".to_string(),
      Self::Paren(_) => "parenthesized expression".to_string(),
    }
  }

  /// Dotted name of an identifier or selector chain such as `time.Format`.
  pub fn qualified_name(&self) -> Option<String> {
    match self {
      Self::Ident(name) => Some(name.clone()),
      Self::Selector { operand, field } => operand.qualified_name().map(|base| format!("{base}.{field}")),
      _ => None,
    }
  }

  /// The decoded content of a plain (non-interpolated) string literal.
  pub fn as_string_literal(&self) -> Option<&str> {
    match self {
      Self::Literal(Literal::String { value, .. }) => Some(value),
      _ => None,
    }
  }

  /// The undecoded source text of a plain string literal, escapes left as written.
  pub fn as_raw_string_literal(&self) -> Option<&str> {
    match self {
      Self::Literal(Literal::String { raw, .. }) => Some(raw),
      _ => None,
    }
  }
}
