//! tern_scanner: turns source text into tokens on demand.
//!
//! The scanner is a cursor that produces one token per `scan` call and can
//! be rewound through [`ScannerState`]. It knows nothing about the grammar;
//! context-dependent tokens (`>>`, regular expressions, template
//! continuations, JSX text) are produced by the `re_scan_*` methods the
//! parser calls when it knows which reading is wanted.

mod char_codes;
mod scanner;
mod token;
mod trivia;

pub use char_codes::{is_identifier_part, is_identifier_start, is_line_break};
pub use scanner::{Scanner, ScannerState};
pub use token::TokenInfo;
pub use trivia::{doc_comment_tags, leading_comment_ranges, trailing_comment_ranges, TriviaRange};
