//! Tokenizer for CUE source text.
//!
//! Comments are not part of the token stream. They are collected on the side
//! with their positions so the parser can attach them to declarations.

use nom::{
  IResult,
  branch::alt,
  bytes::complete::{tag, take_till, take_while, take_while1},
  character::complete::{char, digit1, hex_digit1, multispace0, one_of, satisfy},
  combinator::{map, opt, recognize, value},
  sequence::{pair, preceded, tuple},
};

use crate::{
  error::{ParseError, ParseResult},
  strings,
  token::{Comment, Position, Punct, Token, TokenKind},
};

/// Token stream plus the comments found between tokens, both in source order.
#[derive(Debug, Clone, Default)]
pub struct Lexed {
  pub tokens: Vec<Token>,
  pub comments: Vec<Comment>,
}

pub fn tokenize(source: &str) -> ParseResult<Lexed> {
  Lexer::new(source).run()
}

struct Lexer<'a> {
  source: &'a str,
  line_starts: Vec<usize>,
}

impl<'a> Lexer<'a> {
  fn new(source: &'a str) -> Self {
    let line_starts = std::iter::once(0)
      .chain(source.match_indices('\n').map(|(idx, _)| idx + 1))
      .collect();
    Self { source, line_starts }
  }

  fn position(&self, offset: usize) -> Position {
    let line = self.line_starts.partition_point(|&start| start <= offset);
    let line_start = self.line_starts[line - 1];
    let column = self.source[line_start..offset].chars().count() + 1;
    Position { offset, line, column }
  }

  fn offset_of(&self, rest: &str) -> usize {
    self.source.len() - rest.len()
  }

  fn run(self) -> ParseResult<Lexed> {
    let mut lexed = Lexed::default();
    let mut rest = self.source;

    loop {
      rest = skip_whitespace(rest);
      let start = self.offset_of(rest);

      if rest.is_empty() {
        let position = self.position(start);
        lexed.tokens.push(Token {
          kind: TokenKind::Eof,
          start: position,
          end: position,
        });
        return Ok(lexed);
      }

      if let Ok((remaining, text)) = line_comment(rest) {
        lexed.comments.push(Comment {
          text: text.trim().to_string(),
          position: self.position(start),
        });
        rest = remaining;
        continue;
      }

      let (remaining, kind) = self.next_token(rest, start)?;
      let end = self.offset_of(remaining);
      lexed.tokens.push(Token {
        kind,
        start: self.position(start),
        end: self.position(last_char_offset(self.source, start, end)),
      });
      rest = remaining;
    }
  }

  fn next_token(&self, rest: &'a str, start: usize) -> ParseResult<(&'a str, TokenKind)> {
    if strings::starts_string(rest) {
      return strings::scan(rest)
        .map(|(remaining, lit)| (remaining, TokenKind::String(lit)))
        .map_err(|message| ParseError::new(self.position(start), message));
    }

    if rest.starts_with('@') {
      return attribute(rest)
        .map(|(remaining, text)| (remaining, TokenKind::Attribute(text.to_string())))
        .ok_or_else(|| ParseError::new(self.position(start), "unterminated attribute"));
    }

    let parsed: IResult<&str, TokenKind> = alt((
      value(TokenKind::Bottom, tag("_|_")),
      map(number, |n: &str| TokenKind::Number(n.to_string())),
      map(identifier, |ident: &str| TokenKind::Ident(ident.to_string())),
      map(punct, TokenKind::Punct),
    ))(rest);

    parsed.map_err(|_| {
      let found = rest.chars().next().unwrap_or_default();
      ParseError::new(self.position(start), format!("unexpected character {found:?}"))
    })
  }
}

fn last_char_offset(source: &str, start: usize, end: usize) -> usize {
  source[start..end]
    .char_indices()
    .next_back()
    .map_or(start, |(idx, _)| start + idx)
}

fn skip_whitespace(input: &str) -> &str {
  let parsed: IResult<&str, &str> = multispace0(input);
  parsed.map_or(input, |(rest, _)| rest)
}

fn line_comment(input: &str) -> IResult<&str, &str> {
  preceded(tag("//"), take_till(|c| c == '\n'))(input)
}

fn is_ident_start(c: char) -> bool {
  c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
  c.is_alphanumeric() || c == '_' || c == '$'
}

fn identifier_body(input: &str) -> IResult<&str, &str> {
  recognize(pair(satisfy(is_ident_start), take_while(is_ident_continue)))(input)
}

/// Plain identifiers, definitions (`#Name`) and hidden definitions (`_#name`).
fn identifier(input: &str) -> IResult<&str, &str> {
  alt((
    recognize(tuple((opt(char('_')), char('#'), identifier_body))),
    identifier_body,
  ))(input)
}

fn number(input: &str) -> IResult<&str, &str> {
  alt((
    recognize(pair(alt((tag("0x"), tag("0X"))), hex_digit1)),
    recognize(tuple((
      digit1,
      opt(pair(char('.'), digit1)),
      opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
      take_while(|c: char| c.is_ascii_alphabetic()),
    ))),
  ))(input)
}

fn punct(input: &str) -> IResult<&str, Punct> {
  alt((
    alt((
      value(Punct::Ellipsis, tag("...")),
      value(Punct::Match, tag("=~")),
      value(Punct::NotMatch, tag("!~")),
      value(Punct::Equal, tag("==")),
      value(Punct::NotEqual, tag("!=")),
      value(Punct::LessEq, tag("<=")),
      value(Punct::GreaterEq, tag(">=")),
      value(Punct::LogicalAnd, tag("&&")),
      value(Punct::LogicalOr, tag("||")),
    )),
    alt((
      value(Punct::LBrace, char('{')),
      value(Punct::RBrace, char('}')),
      value(Punct::LBrack, char('[')),
      value(Punct::RBrack, char(']')),
      value(Punct::LParen, char('(')),
      value(Punct::RParen, char(')')),
      value(Punct::Colon, char(':')),
      value(Punct::Comma, char(',')),
      value(Punct::Dot, char('.')),
      value(Punct::Question, char('?')),
      value(Punct::Not, char('!')),
      value(Punct::Assign, char('=')),
      value(Punct::Less, char('<')),
      value(Punct::Greater, char('>')),
      value(Punct::And, char('&')),
      value(Punct::Or, char('|')),
      value(Punct::Add, char('+')),
      value(Punct::Sub, char('-')),
      value(Punct::Mul, char('*')),
      value(Punct::Quo, char('/')),
    )),
  ))(input)
}

/// `@name(args)` with balanced parentheses. Returns the full attribute text.
fn attribute(input: &str) -> Option<(&str, &str)> {
  let parsed: IResult<&str, &str> = preceded(char('@'), take_while1(is_ident_continue))(input);
  let (after_name, _) = parsed.ok()?;
  if !after_name.starts_with('(') {
    return None;
  }

  let mut depth = 0usize;
  for (idx, c) in after_name.char_indices() {
    match c {
      '(' => depth += 1,
      ')' => {
        depth -= 1;
        if depth == 0 {
          let consumed = input.len() - after_name.len() + idx + 1;
          return Some((&input[consumed..], &input[..consumed]));
        }
      }
      '\n' => return None,
      _ => {}
    }
  }
  None
}
