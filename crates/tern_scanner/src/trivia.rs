//! Comment ranges around a position, and doc-comment tag names.

use crate::char_codes::{is_line_break_at, is_white_space_single_line};
use crate::scanner::Scanner;
use tern_ast::syntax_kind::SyntaxKind;
use tern_core::text::{TextPos, TextRange};

/// One comment in the trivia before or after a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriviaRange {
    pub pos: TextPos,
    pub end: TextPos,
    /// `SingleLineCommentTrivia` or `MultiLineCommentTrivia`.
    pub kind: SyntaxKind,
    pub has_trailing_new_line: bool,
}

impl TriviaRange {
    pub fn range(&self) -> TextRange {
        TextRange::new(self.pos, self.end)
    }
}

/// Comments owned by the token that starts after `pos`: those on their own
/// lines, or anything at the very start of the file.
pub fn leading_comment_ranges(text: &str, pos: TextPos) -> Vec<TriviaRange> {
    comment_ranges(text, pos as usize, false)
}

/// Comments on the same line after `pos`, up to the first line break.
pub fn trailing_comment_ranges(text: &str, pos: TextPos) -> Vec<TriviaRange> {
    comment_ranges(text, pos as usize, true)
}

fn comment_ranges(text: &str, mut pos: usize, trailing: bool) -> Vec<TriviaRange> {
    let bytes = text.as_bytes();
    let mut ranges: Vec<TriviaRange> = Vec::new();
    let mut collecting = trailing || pos == 0;

    if pos == 0 && bytes.starts_with(b"#!") {
        pos = memchr::memchr2(b'\n', b'\r', bytes).unwrap_or(bytes.len());
    }

    while pos < bytes.len() {
        if is_line_break_at(bytes, pos) {
            pos += match bytes[pos] {
                b'\r' if bytes.get(pos + 1) == Some(&b'\n') => 2,
                b'\n' | b'\r' => 1,
                _ => 3,
            };
            if trailing {
                break;
            }
            collecting = true;
            if let Some(last) = ranges.last_mut() {
                last.has_trailing_new_line = true;
            }
            continue;
        }

        if bytes[pos] == b'/' && matches!(bytes.get(pos + 1), Some(b'/' | b'*')) {
            let single_line = bytes[pos + 1] == b'/';
            let start = pos;
            pos = if single_line {
                let mut end = pos + 2;
                while end < bytes.len() && !is_line_break_at(bytes, end) {
                    end += 1;
                }
                end
            } else {
                match memchr::memmem::find(&bytes[pos + 2..], b"*/") {
                    Some(offset) => pos + 2 + offset + 2,
                    None => bytes.len(),
                }
            };
            if collecting {
                ranges.push(TriviaRange {
                    pos: start as TextPos,
                    end: pos as TextPos,
                    kind: if single_line {
                        SyntaxKind::SingleLineCommentTrivia
                    } else {
                        SyntaxKind::MultiLineCommentTrivia
                    },
                    has_trailing_new_line: false,
                });
            }
            continue;
        }

        match text[pos..].chars().next() {
            Some(ch) if is_white_space_single_line(ch) => pos += ch.len_utf8(),
            _ => break,
        }
    }

    ranges
}

/// Tag names (`param`, `returns`, ...) in a `/** ... */` comment. A tag is
/// an `@` at the start of a line or after whitespace, immediately followed
/// by a word.
pub fn doc_comment_tags<'a>(scanner: &mut Scanner<'a>, comment: TextRange) -> Vec<&'a str> {
    let text = scanner.text();
    scanner.scan_range(comment.pos, comment.len(), |scanner| {
        let mut tags = Vec::new();
        let mut at_tag_position = true;
        loop {
            let kind = scanner.scan_jsdoc_token();
            match kind {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::AtToken if at_tag_position => {
                    let name_start = scanner.token_end();
                    let next = scanner.scan_jsdoc_token();
                    if (next == SyntaxKind::Identifier || next.is_keyword()) && scanner.token_start() == name_start {
                        tags.push(&text[scanner.token_start() as usize..scanner.token_end() as usize]);
                    }
                    at_tag_position = false;
                }
                SyntaxKind::NewLineTrivia | SyntaxKind::WhitespaceTrivia => at_tag_position = true,
                // Leading `*` on a doc line keeps the line-start position.
                SyntaxKind::AsteriskToken => {}
                _ => at_tag_position = false,
            }
        }
        tags
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_comments_at_file_start() {
        let text = "// a\n/* b */ x";
        let ranges = leading_comment_ranges(text, 0);
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].kind, SyntaxKind::SingleLineCommentTrivia);
        assert!(ranges[0].has_trailing_new_line);
        assert_eq!(ranges[1].range(), TextRange::new(5, 12));
        assert!(!ranges[1].has_trailing_new_line);
    }

    #[test]
    fn test_leading_comments_skip_same_line() {
        // From after `x;` only the comment on the next line leads.
        let text = "x; // trailing\n// leading\ny";
        let ranges = leading_comment_ranges(text, 2);
        assert_eq!(ranges.len(), 1);
        assert_eq!(&text[ranges[0].pos as usize..ranges[0].end as usize], "// leading");
    }

    #[test]
    fn test_trailing_comments_stop_at_line_break() {
        let text = "x; /* a */ // b\n// c";
        let ranges = trailing_comment_ranges(text, 2);
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[1].kind, SyntaxKind::SingleLineCommentTrivia);
    }

    #[test]
    fn test_shebang_is_not_a_comment() {
        let ranges = leading_comment_ranges("#!/usr/bin/env node\n// hi\n", 0);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].pos, 20);
    }

    #[test]
    fn test_doc_comment_tags() {
        let text = "/**\n * Adds.\n * @param a first\n * @returns sum e@mail\n */";
        let mut scanner = Scanner::new(text);
        let tags = doc_comment_tags(&mut scanner, TextRange::new(0, text.len() as TextPos));
        assert_eq!(tags, vec!["param", "returns"]);
    }
}
