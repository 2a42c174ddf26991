//! tern_parser: recursive descent parser for the tern front-end.
//!
//! Pulls tokens from [`tern_scanner::Scanner`] on demand and builds an
//! arena-allocated [`tern_ast`] tree. Malformed input never aborts a parse:
//! every problem becomes a diagnostic and a placeholder node, and the tree
//! always covers the whole file.

mod options;
mod parser;
pub mod token_table;

pub use options::ParseOptions;
pub use parser::{ParseResult, Parser};
pub use token_table::{attrs, binary_precedence, type_precedence, OperatorPrecedence, TokenAttrs, TokenClass};
