//! Snapshot of the scanner's current token.

use std::borrow::Cow;
use tern_ast::syntax_kind::SyntaxKind;
use tern_ast::types::TokenFlags;
use tern_core::text::{TextPos, TextRange};

/// A scanned token, detached from the scanner.
///
/// The scanner itself holds only one token at a time; `TokenInfo` is the
/// owned copy handed to tooling that wants to keep tokens around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo<'a> {
    pub kind: SyntaxKind,
    pub range: TextRange,
    /// Decoded value for literals and identifiers, empty for punctuation.
    pub value: Cow<'a, str>,
    pub flags: TokenFlags,
}

impl<'a> TokenInfo<'a> {
    #[inline]
    pub fn pos(&self) -> TextPos {
        self.range.pos
    }

    #[inline]
    pub fn end(&self) -> TextPos {
        self.range.end
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    pub fn is_unterminated(&self) -> bool {
        self.flags.contains(TokenFlags::UNTERMINATED)
    }

    pub fn has_extended_unicode_escape(&self) -> bool {
        self.flags.contains(TokenFlags::EXTENDED_UNICODE_ESCAPE)
    }
}
