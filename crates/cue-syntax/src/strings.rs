//! Scanning and unquoting of CUE string literals.
//!
//! Handles simple (`"…"`, `'…'`), multi-line (`"""…"""`) and raw (`#"…"#`)
//! forms. In a raw literal with `n` leading hashes the escape marker becomes
//! `\` followed by `n` hashes.

use crate::token::StringLit;

pub(crate) fn starts_string(input: &str) -> bool {
  let unhashed = input.trim_start_matches('#');
  unhashed.starts_with('"') || unhashed.starts_with('\'')
}

pub(crate) fn scan(input: &str) -> Result<(&str, StringLit), String> {
  let hashes = input.len() - input.trim_start_matches('#').len();
  let body = &input[hashes..];
  let quote = body.chars().next().ok_or("expected string literal")?;
  let triple: String = std::iter::repeat_n(quote, 3).collect();
  let multiline = body.starts_with(&triple);

  let open_len = if multiline { 3 } else { 1 };
  let closing = format!("{}{}", if multiline { triple.as_str() } else { &body[..1] }, "#".repeat(hashes));
  let escape = format!("\\{}", "#".repeat(hashes));

  let content_start = hashes + open_len;
  let mut scanner = Scanner {
    input,
    pos: content_start,
    closing: &closing,
    escape: &escape,
    multiline,
  };
  let (content, interpolated) = scanner.content()?;
  let rest = &input[scanner.pos..];

  let value = if interpolated {
    content.to_string()
  } else {
    let decoded = unescape(content, &escape)?;
    if multiline { dedent(&decoded)? } else { decoded }
  };

  Ok((
    rest,
    StringLit {
      value,
      raw: content.to_string(),
      interpolated,
    },
  ))
}

struct Scanner<'a> {
  input: &'a str,
  pos: usize,
  closing: &'a str,
  escape: &'a str,
  multiline: bool,
}

impl<'a> Scanner<'a> {
  /// Returns the raw text between the quotes and whether it contains an
  /// interpolation. Leaves `pos` after the closing delimiter.
  fn content(&mut self) -> Result<(&'a str, bool), String> {
    let start = self.pos;
    let mut interpolated = false;

    loop {
      let rest = &self.input[self.pos..];
      if rest.is_empty() {
        return Err("unterminated string literal".to_string());
      }
      if rest.starts_with(self.closing) {
        let content = &self.input[start..self.pos];
        self.pos += self.closing.len();
        return Ok((content, interpolated));
      }
      if rest.starts_with(self.escape) {
        let after = &rest[self.escape.len()..];
        if after.starts_with('(') {
          interpolated = true;
          self.pos += self.escape.len();
          self.skip_interpolation()?;
          continue;
        }
        let escaped_len = after.chars().next().map_or(0, char::len_utf8);
        self.pos += self.escape.len() + escaped_len;
        continue;
      }

      let c = rest.chars().next().unwrap_or_default();
      if c == '\n' && !self.multiline {
        return Err("unterminated string literal".to_string());
      }
      self.pos += c.len_utf8();
    }
  }

  /// Skips a balanced `( … )` group, stepping over nested string literals.
  fn skip_interpolation(&mut self) -> Result<(), String> {
    let mut depth = 0usize;
    loop {
      let rest = &self.input[self.pos..];
      let Some(c) = rest.chars().next() else {
        return Err("unterminated string interpolation".to_string());
      };
      match c {
        '(' => depth += 1,
        ')' => {
          depth -= 1;
          if depth == 0 {
            self.pos += 1;
            return Ok(());
          }
        }
        '"' | '\'' => {
          let (after, _) = scan(rest)?;
          self.pos = self.input.len() - after.len();
          continue;
        }
        _ => {}
      }
      self.pos += c.len_utf8();
    }
  }
}

fn unescape(raw: &str, escape: &str) -> Result<String, String> {
  let mut out = String::with_capacity(raw.len());
  let mut rest = raw;

  while let Some(idx) = rest.find(escape) {
    out.push_str(&rest[..idx]);
    let after = &rest[idx + escape.len()..];
    let mut chars = after.chars();
    let Some(c) = chars.next() else {
      return Err("dangling escape at end of string".to_string());
    };
    let mut consumed = c.len_utf8();
    match c {
      'n' => out.push('\n'),
      't' => out.push('\t'),
      'r' => out.push('\r'),
      'a' => out.push('\u{07}'),
      'b' => out.push('\u{08}'),
      'f' => out.push('\u{0C}'),
      'v' => out.push('\u{0B}'),
      '\\' | '"' | '\'' | '/' => out.push(c),
      'u' | 'U' => {
        let width = if c == 'u' { 4 } else { 8 };
        let hex = after.get(1..=width).ok_or("truncated unicode escape")?;
        let code = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid unicode escape \\{c}{hex}"))?;
        out.push(char::from_u32(code).ok_or_else(|| format!("invalid code point \\{c}{hex}"))?);
        consumed += width;
      }
      '\n' => {}
      other => return Err(format!("unknown escape sequence \\{other}")),
    }
    rest = &after[consumed..];
  }

  out.push_str(rest);
  Ok(out)
}

/// Removes the leading newline, the closing line, and the closing line's
/// indentation from every content line of a multi-line literal.
fn dedent(content: &str) -> Result<String, String> {
  let Some(body) = content.strip_prefix('\n').or_else(|| content.strip_prefix("\r\n")) else {
    return Err("multi-line string must start with a newline".to_string());
  };
  let (lines, indent) = match body.rfind('\n') {
    Some(idx) => (&body[..idx], &body[idx + 1..]),
    None => ("", body),
  };
  if !indent.chars().all(char::is_whitespace) {
    return Err("closing quotes of a multi-line string must be on their own line".to_string());
  }

  Ok(
    lines
      .split('\n')
      .map(|line| line.strip_prefix(indent).unwrap_or(line.trim_start()))
      .collect::<Vec<_>>()
      .join("\n"),
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  fn value_of(input: &str) -> String {
    scan(input).unwrap().1.value
  }

  #[test]
  fn test_simple_string_decodes_escapes() {
    assert_eq!(value_of(r#""^\\d+$""#), r"^\d+$");
    assert_eq!(value_of(r#""say \"hi\"""#), r#"say "hi""#);
    assert_eq!(value_of(r#""café""#), "café");
  }

  #[test]
  fn test_raw_text_is_kept_alongside_value() {
    let (_, lit) = scan(r#""^https?://[^\\s]+$""#).unwrap();
    assert_eq!(lit.value, r"^https?://[^\s]+$");
    assert_eq!(lit.raw, r"^https?://[^\\s]+$");

    let (_, lit) = scan(r##"#"^\d{4}$"#"##).unwrap();
    assert_eq!(lit.raw, lit.value);
  }

  #[test]
  fn test_raw_string_keeps_backslashes() {
    assert_eq!(value_of(r##"#"^\d{4}$"#"##), r"^\d{4}$");
  }

  #[test]
  fn test_scan_returns_remaining_input() {
    let (rest, lit) = scan(r#""abc" | "def""#).unwrap();
    assert_eq!(rest, r#" | "def""#);
    assert_eq!(lit.value, "abc");
    assert!(!lit.interpolated);
  }

  #[test]
  fn test_interpolation_is_flagged() {
    let (rest, lit) = scan(r#""id-\(name + "x")" tail"#).unwrap();
    assert!(lit.interpolated);
    assert_eq!(lit.value, r#"id-\(name + "x")"#);
    assert_eq!(rest, " tail");
  }

  #[test]
  fn test_multiline_string_is_dedented() {
    let input = "\"\"\"\n    first\n      second\n    \"\"\"";
    assert_eq!(value_of(input), "first\n  second");
  }

  #[test]
  fn test_unterminated_string() {
    assert!(scan("\"abc\nmore").is_err());
    assert!(scan("\"abc").is_err());
  }

  #[test]
  fn test_starts_string() {
    assert!(starts_string("\"x\""));
    assert!(starts_string("#\"x\"#"));
    assert!(starts_string("'bytes'"));
    assert!(!starts_string("#Contact"));
  }
}
