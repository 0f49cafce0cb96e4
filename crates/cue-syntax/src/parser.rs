//! Recursive-descent parser over the lexer's token stream.
//!
//! A newline ends an expression: binary operators and postfix selectors,
//! calls and indexes only continue an expression when they start on the line
//! where the previous token ended.

use std::collections::VecDeque;

use crate::{
  ast::{
    BinaryOp, Clause, CommentGroup, Comprehension, Constraint, Decl, Expr, Field, File, Import, Label, ListElement,
    Literal, StructLit, UnaryOp,
  },
  error::{ParseError, ParseResult},
  lexer::{self, Lexed},
  token::{Comment, Position, Punct, Token, TokenKind},
};

/// Parses a complete CUE file.
pub fn parse_file(source: &str) -> ParseResult<File> {
  Parser::new(lexer::tokenize(source)?).file()
}

/// Parses a single CUE expression. Trailing input is an error.
pub fn parse_expr(source: &str) -> ParseResult<Expr> {
  let mut parser = Parser::new(lexer::tokenize(source)?);
  let expr = parser.expr()?;
  match parser.peek().kind {
    TokenKind::Eof => Ok(expr),
    _ => Err(parser.unexpected("end of expression")),
  }
}

struct Parser {
  tokens: Vec<Token>,
  pos: usize,
  comments: VecDeque<Comment>,
}

impl Parser {
  fn new(lexed: Lexed) -> Self {
    Self {
      tokens: lexed.tokens,
      pos: 0,
      comments: lexed.comments.into(),
    }
  }

  fn peek(&self) -> &Token {
    self.peek_at(0)
  }

  fn peek_at(&self, ahead: usize) -> &Token {
    let last = self.tokens.len() - 1;
    &self.tokens[(self.pos + ahead).min(last)]
  }

  fn bump(&mut self) -> Token {
    let token = self.peek().clone();
    if token.kind != TokenKind::Eof {
      self.pos += 1;
    }
    token
  }

  fn previous(&self) -> Option<&Token> {
    self.pos.checked_sub(1).map(|idx| &self.tokens[idx])
  }

  fn on_same_line(&self) -> bool {
    self
      .previous()
      .is_some_and(|prev| prev.end.line == self.peek().start.line)
  }

  fn eat(&mut self, punct: Punct) -> bool {
    if self.peek().is_punct(punct) {
      self.bump();
      true
    } else {
      false
    }
  }

  fn expect(&mut self, punct: Punct) -> ParseResult<Token> {
    if self.peek().is_punct(punct) {
      Ok(self.bump())
    } else {
      Err(self.unexpected(&format!("`{punct}`")))
    }
  }

  fn expect_ident(&mut self) -> ParseResult<String> {
    match &self.peek().kind {
      TokenKind::Ident(name) => {
        let name = name.clone();
        self.bump();
        Ok(name)
      }
      _ => Err(self.unexpected("identifier")),
    }
  }

  fn expect_keyword(&mut self, keyword: &str) -> ParseResult<()> {
    if self.peek().is_ident(keyword) {
      self.bump();
      Ok(())
    } else {
      Err(self.unexpected(&format!("`{keyword}`")))
    }
  }

  fn unexpected(&self, expected: &str) -> ParseError {
    let token = self.peek();
    ParseError::new(
      token.start,
      format!("expected {expected}, found {}", token.kind.describe()),
    )
  }

  /// True when the token `ahead` positions away makes the current identifier a
  /// field label rather than a keyword.
  fn is_label_marker(&self, ahead: usize) -> bool {
    let token = self.peek_at(ahead);
    token.is_punct(Punct::Colon)
      || ((token.is_punct(Punct::Question) || token.is_punct(Punct::Not))
        && self.peek_at(ahead + 1).is_punct(Punct::Colon))
  }

  fn at_keyword(&self, keyword: &str) -> bool {
    self.peek().is_ident(keyword) && !self.is_label_marker(1)
  }

  // Comments

  /// Removes all pending comments that start before `offset`, grouping
  /// comments on consecutive lines.
  fn comments_before(&mut self, offset: usize) -> Vec<CommentGroup> {
    let mut groups: Vec<CommentGroup> = Vec::new();
    loop {
      match self.comments.front() {
        Some(comment) if comment.position.offset < offset => {}
        _ => break,
      }
      let Some(comment) = self.comments.pop_front() else {
        break;
      };
      match groups.last_mut() {
        Some(group) if group.end_line() + 1 == comment.position.line => group.lines.push(comment.text),
        _ => groups.push(CommentGroup {
          lines: vec![comment.text],
          position: comment.position,
        }),
      }
    }
    groups
  }

  fn discard_comments_before(&mut self, offset: usize) {
    self.comments_before(offset);
  }

  /// Splits the comments before a declaration into free-floating groups and
  /// the doc comment ending on the line directly above it.
  fn leading_comments(&mut self, start: Position) -> (Vec<CommentGroup>, Option<CommentGroup>) {
    let mut groups = self.comments_before(start.offset);
    let ends_above = groups.last().is_some_and(|group| group.end_line() + 1 == start.line);
    let doc = if ends_above { groups.pop() } else { None };
    (groups, doc)
  }

  fn trailing_comment(&mut self) -> Option<CommentGroup> {
    let end = self.previous()?.end;
    self.discard_comments_before(end.offset);
    let next = self.tokens[self.pos..]
      .iter()
      .find(|token| !token.is_punct(Punct::Comma))
      .map(|token| token.start);
    match (self.comments.front(), next) {
      (Some(comment), _) if comment.position.line != end.line => return None,
      (None, _) => return None,
      // another declaration sits between the value and the comment
      (Some(comment), Some(next)) if next.line == end.line && next.offset < comment.position.offset => return None,
      _ => {}
    }
    self.comments.pop_front().map(|comment| CommentGroup {
      lines: vec![comment.text],
      position: comment.position,
    })
  }

  // Declarations

  fn file(mut self) -> ParseResult<File> {
    let mut file = File::default();

    if self.at_keyword("package") {
      let start = self.peek().start.offset;
      self.discard_comments_before(start);
      self.bump();
      file.package = Some(self.expect_ident()?);
      self.eat(Punct::Comma);
    }

    while self.at_keyword("import") {
      let start = self.peek().start.offset;
      self.discard_comments_before(start);
      self.bump();
      if self.eat(Punct::LParen) {
        while !self.peek().is_punct(Punct::RParen) {
          file.imports.push(self.import_spec()?);
          self.eat(Punct::Comma);
        }
        self.bump();
      } else {
        file.imports.push(self.import_spec()?);
      }
      self.eat(Punct::Comma);
    }

    file.decls = self.decls(None)?;
    Ok(file)
  }

  fn import_spec(&mut self) -> ParseResult<Import> {
    let alias = match &self.peek().kind {
      TokenKind::Ident(name) => {
        let name = name.clone();
        self.bump();
        Some(name)
      }
      _ => None,
    };
    match &self.peek().kind {
      TokenKind::String(lit) => {
        let path = lit.value.clone();
        self.bump();
        Ok(Import { alias, path })
      }
      _ => Err(self.unexpected("import path")),
    }
  }

  /// Parses declarations until `closing` (or end of file when `None`). The
  /// closing token itself is left for the caller.
  fn decls(&mut self, closing: Option<Punct>) -> ParseResult<Vec<Decl>> {
    let mut decls = Vec::new();

    loop {
      while self.eat(Punct::Comma) {}

      let token = self.peek().clone();
      let at_close = closing.is_some_and(|punct| token.is_punct(punct));
      if let Some(punct) = closing
        && token.kind == TokenKind::Eof
      {
        return Err(self.unexpected(&format!("`{punct}`")));
      }
      if at_close || token.kind == TokenKind::Eof {
        decls.extend(self.comments_before(token.start.offset).into_iter().map(Decl::Comment));
        return Ok(decls);
      }

      let (floating, doc) = self.leading_comments(token.start);
      decls.extend(floating.into_iter().map(Decl::Comment));

      match self.decl()? {
        Decl::Field(mut field) => {
          field.doc = doc;
          field.line_comment = self.trailing_comment();
          decls.push(Decl::Field(field));
        }
        other => {
          decls.extend(doc.map(Decl::Comment));
          decls.push(other);
        }
      }
    }
  }

  fn decl(&mut self) -> ParseResult<Decl> {
    match &self.peek().kind {
      TokenKind::Punct(Punct::Ellipsis) => {
        self.bump();
        return Ok(Decl::Ellipsis(self.ellipsis_type()?));
      }
      TokenKind::Attribute(text) => {
        let text = text.clone();
        self.bump();
        return Ok(Decl::Attribute(text));
      }
      TokenKind::Ident(keyword) if keyword == "let" && self.peek_at(2).is_punct(Punct::Assign) => {
        self.bump();
        let name = self.expect_ident()?;
        self.expect(Punct::Assign)?;
        let value = self.expr()?;
        return Ok(Decl::Let { name, value });
      }
      TokenKind::Ident(keyword) if (keyword == "for" || keyword == "if") && !self.is_label_marker(1) => {
        return Ok(Decl::Comprehension(self.comprehension()?));
      }
      _ => {}
    }

    if let Some(field) = self.try_field()? {
      return Ok(Decl::Field(field));
    }
    Ok(Decl::Embed(self.expr()?))
  }

  /// Parses `label: value` when the upcoming tokens form a field, otherwise
  /// rewinds and returns `None`.
  fn try_field(&mut self) -> ParseResult<Option<Field>> {
    let checkpoint = self.pos;
    let saved_comments = self.comments.clone();
    let position = self.peek().start;

    let Some(label) = self.label() else {
      self.pos = checkpoint;
      self.comments = saved_comments;
      return Ok(None);
    };

    let constraint = if self.is_label_marker(0) && !self.peek().is_punct(Punct::Colon) {
      let marker = self.bump();
      if marker.is_punct(Punct::Question) {
        Constraint::Optional
      } else {
        Constraint::Required
      }
    } else {
      Constraint::Regular
    };

    if !self.eat(Punct::Colon) {
      self.pos = checkpoint;
      self.comments = saved_comments;
      return Ok(None);
    }

    let value = self.field_value()?;
    let attributes = self.attributes();

    Ok(Some(Field {
      label,
      constraint,
      value,
      attributes,
      doc: None,
      line_comment: None,
      position,
    }))
  }

  fn label(&mut self) -> Option<Label> {
    let token = self.peek().clone();
    match token.kind {
      TokenKind::Ident(name) => {
        self.bump();
        Some(Label::Ident(name))
      }
      TokenKind::String(lit) => {
        self.bump();
        Some(if lit.interpolated {
          Label::Dynamic(Expr::Interpolation(lit.value))
        } else {
          Label::String(lit.value)
        })
      }
      TokenKind::Punct(Punct::LBrack) => {
        self.bump();
        let expr = self.expr().ok()?;
        self.eat(Punct::RBrack).then_some(Label::Pattern(expr))
      }
      TokenKind::Punct(Punct::LParen) => {
        self.bump();
        let expr = self.expr().ok()?;
        self.eat(Punct::RParen).then_some(Label::Dynamic(expr))
      }
      _ => None,
    }
  }

  /// A field value, expanding the `a: b: c` shorthand into nested structs.
  fn field_value(&mut self) -> ParseResult<Expr> {
    if let Some(field) = self.try_field()? {
      return Ok(Expr::Struct(StructLit {
        decls: vec![Decl::Field(field)],
      }));
    }
    self.expr()
  }

  fn attributes(&mut self) -> Vec<String> {
    let mut attributes = Vec::new();
    while self.on_same_line() {
      let TokenKind::Attribute(text) = &self.peek().kind else {
        break;
      };
      attributes.push(text.clone());
      self.bump();
    }
    attributes
  }

  fn ellipsis_type(&mut self) -> ParseResult<Option<Expr>> {
    if self.on_same_line() && can_start_expr(&self.peek().kind) {
      Ok(Some(self.expr()?))
    } else {
      Ok(None)
    }
  }

  fn comprehension(&mut self) -> ParseResult<Comprehension> {
    let mut clauses = Vec::new();
    loop {
      if self.peek().is_ident("for") {
        self.bump();
        let first = self.expect_ident()?;
        let (key, value) = if self.eat(Punct::Comma) {
          (Some(first), self.expect_ident()?)
        } else {
          (None, first)
        };
        self.expect_keyword("in")?;
        let source = self.expr()?;
        clauses.push(Clause::For { key, value, source });
      } else if self.peek().is_ident("if") {
        self.bump();
        clauses.push(Clause::If(self.expr()?));
      } else if self.peek().is_ident("let") {
        self.bump();
        let name = self.expect_ident()?;
        self.expect(Punct::Assign)?;
        let value = self.expr()?;
        clauses.push(Clause::Let { name, value });
      } else {
        break;
      }
    }

    self.expect(Punct::LBrace)?;
    let decls = self.decls(Some(Punct::RBrace))?;
    self.expect(Punct::RBrace)?;
    Ok(Comprehension {
      clauses,
      body: StructLit { decls },
    })
  }

  // Expressions

  fn expr(&mut self) -> ParseResult<Expr> {
    self.binary(1)
  }

  fn binary(&mut self, min_precedence: u8) -> ParseResult<Expr> {
    let mut lhs = self.unary()?;
    while self.on_same_line() {
      let Some(op) = binary_op(&self.peek().kind) else {
        break;
      };
      if op.precedence() < min_precedence {
        break;
      }
      self.bump();
      let rhs = self.binary(op.precedence() + 1)?;
      lhs = Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
      };
    }
    Ok(lhs)
  }

  fn unary(&mut self) -> ParseResult<Expr> {
    if let Some(op) = unary_op(&self.peek().kind) {
      self.bump();
      let operand = self.unary()?;
      return Ok(Expr::Unary {
        op,
        operand: Box::new(operand),
      });
    }
    let primary = self.primary()?;
    self.postfix(primary)
  }

  fn postfix(&mut self, mut expr: Expr) -> ParseResult<Expr> {
    while self.on_same_line() {
      if self.eat(Punct::Dot) {
        let field = match &self.peek().kind {
          TokenKind::Ident(name) => name.clone(),
          TokenKind::String(lit) => lit.value.clone(),
          _ => return Err(self.unexpected("selector")),
        };
        self.bump();
        expr = Expr::Selector {
          operand: Box::new(expr),
          field,
        };
      } else if self.eat(Punct::LParen) {
        let args = self.sequence(Punct::RParen)?;
        expr = Expr::Call {
          func: Box::new(expr),
          args,
        };
      } else if self.eat(Punct::LBrack) {
        let index = self.expr()?;
        let close = self.expect(Punct::RBrack)?;
        self.discard_comments_before(close.start.offset);
        expr = Expr::Index {
          operand: Box::new(expr),
          index: Box::new(index),
        };
      } else {
        break;
      }
    }
    Ok(expr)
  }

  /// Comma or newline separated expressions up to and including `closing`.
  fn sequence(&mut self, closing: Punct) -> ParseResult<Vec<Expr>> {
    let mut items = Vec::new();
    loop {
      while self.eat(Punct::Comma) {}
      if self.peek().is_punct(closing) {
        break;
      }
      if self.peek().kind == TokenKind::Eof {
        return Err(self.unexpected(&format!("`{closing}`")));
      }
      items.push(self.expr()?);
    }
    let close = self.bump();
    self.discard_comments_before(close.start.offset);
    Ok(items)
  }

  fn primary(&mut self) -> ParseResult<Expr> {
    let token = self.peek().clone();
    let expr = match token.kind {
      TokenKind::Ident(name) => {
        self.bump();
        match name.as_str() {
          "true" => Expr::Literal(Literal::Bool(true)),
          "false" => Expr::Literal(Literal::Bool(false)),
          "null" => Expr::Literal(Literal::Null),
          _ => Expr::Ident(name),
        }
      }
      TokenKind::String(lit) => {
        self.bump();
        if lit.interpolated {
          Expr::Interpolation(lit.value)
        } else {
          Expr::Literal(Literal::String {
            value: lit.value,
            raw: lit.raw,
          })
        }
      }
      TokenKind::Number(value) => {
        self.bump();
        Expr::Literal(Literal::Number(value))
      }
      TokenKind::Bottom => {
        self.bump();
        Expr::Bottom
      }
      TokenKind::Punct(Punct::LParen) => {
        self.bump();
        let inner = self.expr()?;
        self.expect(Punct::RParen)?;
        Expr::Paren(Box::new(inner))
      }
      TokenKind::Punct(Punct::LBrack) => {
        self.bump();
        Expr::List(self.list_elements()?)
      }
      TokenKind::Punct(Punct::LBrace) => {
        self.bump();
        let decls = self.decls(Some(Punct::RBrace))?;
        self.expect(Punct::RBrace)?;
        Expr::Struct(StructLit { decls })
      }
      _ => return Err(self.unexpected("expression")),
    };
    Ok(expr)
  }

  fn list_elements(&mut self) -> ParseResult<Vec<ListElement>> {
    let mut elements = Vec::new();
    loop {
      while self.eat(Punct::Comma) {}
      if self.peek().is_punct(Punct::RBrack) {
        break;
      }
      if self.peek().kind == TokenKind::Eof {
        return Err(self.unexpected("`]`"));
      }
      if self.eat(Punct::Ellipsis) {
        elements.push(ListElement::Ellipsis(self.ellipsis_type()?));
      } else {
        elements.push(ListElement::Value(self.expr()?));
      }
    }
    let close = self.bump();
    self.discard_comments_before(close.start.offset);
    Ok(elements)
  }
}

fn can_start_expr(kind: &TokenKind) -> bool {
  match kind {
    TokenKind::Ident(_) | TokenKind::String(_) | TokenKind::Number(_) | TokenKind::Bottom => true,
    TokenKind::Punct(Punct::LBrace | Punct::LBrack | Punct::LParen) => true,
    _ => unary_op(kind).is_some(),
  }
}

fn unary_op(kind: &TokenKind) -> Option<UnaryOp> {
  let TokenKind::Punct(punct) = kind else {
    return None;
  };
  let op = match punct {
    Punct::Not => UnaryOp::Not,
    Punct::Sub => UnaryOp::Neg,
    Punct::Add => UnaryOp::Pos,
    Punct::Mul => UnaryOp::Default,
    Punct::Match => UnaryOp::Match,
    Punct::NotMatch => UnaryOp::NotMatch,
    Punct::Less => UnaryOp::Less,
    Punct::LessEq => UnaryOp::LessEq,
    Punct::Greater => UnaryOp::Greater,
    Punct::GreaterEq => UnaryOp::GreaterEq,
    Punct::Equal => UnaryOp::Equal,
    Punct::NotEqual => UnaryOp::NotEqual,
    _ => return None,
  };
  Some(op)
}

fn binary_op(kind: &TokenKind) -> Option<BinaryOp> {
  let TokenKind::Punct(punct) = kind else {
    return None;
  };
  let op = match punct {
    Punct::Or => BinaryOp::Disjunction,
    Punct::And => BinaryOp::Conjunction,
    Punct::LogicalOr => BinaryOp::Or,
    Punct::LogicalAnd => BinaryOp::And,
    Punct::Equal => BinaryOp::Equal,
    Punct::NotEqual => BinaryOp::NotEqual,
    Punct::Less => BinaryOp::Less,
    Punct::LessEq => BinaryOp::LessEq,
    Punct::Greater => BinaryOp::Greater,
    Punct::GreaterEq => BinaryOp::GreaterEq,
    Punct::Match => BinaryOp::Match,
    Punct::NotMatch => BinaryOp::NotMatch,
    Punct::Add => BinaryOp::Add,
    Punct::Sub => BinaryOp::Sub,
    Punct::Mul => BinaryOp::Mul,
    Punct::Quo => BinaryOp::Quo,
    _ => return None,
  };
  Some(op)
}
