use super::{field, parse};
use crate::{
  BinaryOp, Clause, Constraint, Decl, Expr, Label, ListElement, Literal, UnaryOp, parse_expr, parse_file,
};

#[test]
fn test_package_and_imports() {
  let file = parse(
    r#"package schema

import "time"
import (
  "strings"
  foo "example.com/foo"
)

#Name: string
"#,
  );

  assert_eq!(file.package.as_deref(), Some("schema"));
  assert_eq!(file.imports.len(), 3);
  assert_eq!(file.imports[0].path, "time");
  assert_eq!(file.imports[2].alias.as_deref(), Some("foo"));
  assert_eq!(file.imports[2].path, "example.com/foo");
  assert_eq!(file.fields().count(), 1);
}

#[test]
fn test_field_constraints() {
  let file = parse(
    r"#Contact: {
  name: string
  email?: #Email
  id!: string
}",
  );

  let contact = field(&file.decls, "#Contact");
  assert_eq!(contact.label.definition_name(), Some("Contact"));
  let Expr::Struct(body) = &contact.value else {
    panic!("expected struct, got {}", contact.value.shape());
  };

  assert_eq!(field(&body.decls, "name").constraint, Constraint::Regular);
  assert!(field(&body.decls, "email").is_optional());
  assert_eq!(field(&body.decls, "id").constraint, Constraint::Required);
  assert_eq!(field(&body.decls, "email").value, Expr::Ident("#Email".to_string()));
}

#[test]
fn test_shorthand_fields_nest() {
  let file = parse("a: b: c: string");
  let a = field(&file.decls, "a");
  let Expr::Struct(b_struct) = &a.value else {
    panic!("expected struct");
  };
  let b = field(&b_struct.decls, "b");
  let Expr::Struct(c_struct) = &b.value else {
    panic!("expected struct");
  };
  assert_eq!(field(&c_struct.decls, "c").value, Expr::Ident("string".to_string()));
}

#[test]
fn test_unary_match_alias() {
  let file = parse(r#"#Email: =~"^[^@]+@[^@]+$""#);
  let email = field(&file.decls, "#Email");
  let Expr::Unary { op, operand } = &email.value else {
    panic!("expected unary expression");
  };
  assert_eq!(*op, UnaryOp::Match);
  assert_eq!(operand.as_string_literal(), Some("^[^@]+@[^@]+$"));
}

#[test]
fn test_binary_match_and_precedence() {
  let expr = parse_expr(r#"name =~ "^a""#).unwrap();
  assert!(matches!(expr, Expr::Binary { op: BinaryOp::Match, .. }));

  let expr = parse_expr(r#"string & =~"^x" | "y""#).unwrap();
  let Expr::Binary { op, lhs, .. } = expr else {
    panic!("expected binary expression");
  };
  assert_eq!(op, BinaryOp::Disjunction);
  assert!(matches!(*lhs, Expr::Binary { op: BinaryOp::Conjunction, .. }));
}

#[test]
fn test_default_marker_is_unary() {
  let expr = parse_expr(r#"*"a" | "b""#).unwrap();
  let Expr::Binary { lhs, .. } = expr else {
    panic!("expected disjunction");
  };
  assert!(matches!(*lhs, Expr::Unary { op: UnaryOp::Default, .. }));
}

#[test]
fn test_list_ellipsis_forms() {
  assert_eq!(
    parse_expr("[...#Contact]").unwrap(),
    Expr::List(vec![ListElement::Ellipsis(Some(Expr::Ident("#Contact".to_string())))])
  );
  assert_eq!(
    parse_expr("[#Contact, ...]").unwrap(),
    Expr::List(vec![
      ListElement::Value(Expr::Ident("#Contact".to_string())),
      ListElement::Ellipsis(None),
    ])
  );
  assert_eq!(parse_expr("[]").unwrap(), Expr::List(vec![]));
}

#[test]
fn test_call_with_selector() {
  let expr = parse_expr(r#"time.Format("2006-01-02")"#).unwrap();
  let Expr::Call { func, args } = &expr else {
    panic!("expected call");
  };
  assert_eq!(func.qualified_name().as_deref(), Some("time.Format"));
  assert_eq!(
    args,
    &vec![Expr::Literal(Literal::String {
      value: "2006-01-02".to_string(),
      raw: "2006-01-02".to_string(),
    })]
  );
  assert_eq!(expr.shape(), "call to `time.Format`");
}

#[test]
fn test_newline_ends_expression() {
  let file = parse("a: #Foo\n[string]: int\n");
  assert_eq!(file.decls.len(), 2);
  assert_eq!(field(&file.decls, "a").value, Expr::Ident("#Foo".to_string()));
  let Decl::Field(pattern) = &file.decls[1] else {
    panic!("expected field");
  };
  assert_eq!(pattern.label, Label::Pattern(Expr::Ident("string".to_string())));
}

#[test]
fn test_let_and_comprehension() {
  let file = parse("let base = string\nfor k, v in items { (k): v }\n");
  assert!(matches!(&file.decls[0], Decl::Let { name, .. } if name == "base"));
  let Decl::Comprehension(comprehension) = &file.decls[1] else {
    panic!("expected comprehension");
  };
  assert!(matches!(
    &comprehension.clauses[..],
    [Clause::For { key: Some(key), value, .. }] if key == "k" && value == "v"
  ));
  assert_eq!(comprehension.body.decls.len(), 1);
}

#[test]
fn test_field_attributes_and_labels() {
  let file = parse(
    r#"name: string @go(Name)
"display-name": string
"\(prefix)id": string
"#,
  );
  assert_eq!(field(&file.decls, "name").attributes, vec!["@go(Name)".to_string()]);
  assert_eq!(
    field(&file.decls, "display-name").label,
    Label::String("display-name".to_string())
  );
  let Decl::Field(dynamic) = &file.decls[2] else {
    panic!("expected field");
  };
  assert!(matches!(dynamic.label, Label::Dynamic(Expr::Interpolation(_))));
}

#[test]
fn test_embedding_and_ellipsis_decls() {
  let file = parse("#Base\n...\n");
  assert_eq!(file.decls, vec![Decl::Embed(Expr::Ident("#Base".to_string())), Decl::Ellipsis(None)]);
}

#[test]
fn test_unclosed_struct_is_error() {
  let err = parse_file("a: {\n  b: string\n").unwrap_err();
  assert!(err.message.contains("expected `}`"), "{err}");
}

#[test]
fn test_unexpected_token_reports_position() {
  let err = parse_file("a: string\nb: )").unwrap_err();
  assert_eq!(err.line, 2);
  assert_eq!(err.column, 4);
  assert_eq!(err.message, "expected expression, found `)`");
  assert_eq!(err.to_string(), "2:4: expected expression, found `)`");
}

#[test]
fn test_trailing_input_after_expression() {
  assert!(parse_expr("string string").is_err());
}
