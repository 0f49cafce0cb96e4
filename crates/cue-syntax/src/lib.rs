//! Lexer and parser for the subset of CUE used by schema files.
//!
//! The parser keeps `//` comments, attaching them to fields as doc or line
//! comments, or keeping them as free-floating declarations.

pub mod ast;
mod error;
pub mod lexer;
mod parser;
mod strings;
pub mod token;

pub use ast::{
  BinaryOp, Clause, CommentGroup, Comprehension, Constraint, Decl, Expr, Field, File, Import, Label, ListElement,
  Literal, StructLit, UnaryOp,
};
pub use error::{ParseError, ParseResult};
pub use parser::{parse_expr, parse_file};

#[cfg(test)]
mod tests;
