//! tern_core: text positions, line maps and string interning shared by every
//! stage of the tern front-end.

pub mod intern;
pub mod text;

pub use intern::{InternedString, StringInterner};
pub use text::{LineAndColumn, LineMap, TextPos, TextRange, TextSpan};
