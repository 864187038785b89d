//! Template syntax: tree, source positions, parser and traversal

pub mod ast;
pub mod parser;
pub mod source;
pub mod visit;

pub use ast::*;
pub use parser::parse;
pub use source::{LineIndex, SourceText};
pub use visit::walk;
