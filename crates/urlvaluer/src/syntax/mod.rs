//! Lexer, parser, and typed AST for the Go declaration subset the
//! generator consumes.

pub mod ast;
pub mod kind;
pub mod lexer;
pub mod parser;

pub use ast::{Decl, FieldDecl, FuncDecl, SourceFile, StructBody, TypeDecl, TypeExpr};
pub use parser::{parse_file, ParseError};
