//! tern_ast: syntax kinds, flag sets and the arena-allocated syntax tree.
//!
//! Nodes are plain structs allocated in a `bumpalo` arena; node families are
//! `Copy` enums of references. Trees are read through [`visitor::AstNode`]
//! and parent links are computed on demand with [`parent::ParentMap`].

pub mod node;
pub mod parent;
pub mod syntax_kind;
pub mod types;
pub mod visitor;

pub use node::*;
pub use parent::ParentMap;
pub use syntax_kind::SyntaxKind;
pub use types::*;
pub use visitor::{AstNode, NodeRef, Visitor};
