//! Byte-offset positions into source text.
//!
//! Every token, node and diagnostic in tern is located by a half-open
//! `[pos, end)` range of UTF-8 byte offsets into the borrowed source.

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// A byte offset into source text.
pub type TextPos = u32;

/// A half-open `[pos, end)` range of byte offsets.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Serialize)]
pub struct TextRange {
    pub pos: TextPos,
    pub end: TextPos,
}

impl TextRange {
    #[inline]
    pub fn new(pos: TextPos, end: TextPos) -> Self {
        debug_assert!(pos <= end, "range start {pos} is past its end {end}");
        Self { pos, end }
    }

    /// A zero-width range at `pos`.
    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self { pos, end: pos }
    }

    #[inline]
    pub fn len(&self) -> TextPos {
        self.end - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.pos && pos < self.end
    }

    /// Whether `other` lies entirely inside this range. An empty range
    /// sitting on either boundary counts as covered.
    #[inline]
    pub fn covers(&self, other: TextRange) -> bool {
        self.pos <= other.pos && other.end <= self.end
    }

    /// The smallest range spanning both.
    pub fn cover(&self, other: TextRange) -> TextRange {
        TextRange::new(self.pos.min(other.pos), self.end.max(other.end))
    }

    #[inline]
    pub fn to_span(&self) -> TextSpan {
        TextSpan::from_bounds(self.pos, self.end)
    }

    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.pos as usize..self.end as usize
    }

    /// Slice `text` by this range.
    #[inline]
    pub fn slice<'t>(&self, text: &'t str) -> &'t str {
        &text[self.to_range()]
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.pos, self.end)
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.pos, self.end)
    }
}

/// A `start` + `length` view of a range, the shape diagnostic renderers
/// expect.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct TextSpan {
    pub start: TextPos,
    pub length: TextPos,
}

impl TextSpan {
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self {
            start,
            length: end - start,
        }
    }

    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl From<TextRange> for TextSpan {
    fn from(range: TextRange) -> Self {
        range.to_span()
    }
}

impl From<TextSpan> for TextRange {
    fn from(span: TextSpan) -> Self {
        TextRange::new(span.start, span.end())
    }
}

/// Zero-based line and byte column.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct LineAndColumn {
    pub line: u32,
    pub column: u32,
}

/// Maps byte offsets to lines. Recognizes `\n`, `\r\n`, `\r`, U+2028 and
/// U+2029 as line terminators.
#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<TextPos>,
}

impl LineMap {
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' => {
                    if bytes.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                    line_starts.push((i + 1) as TextPos);
                }
                b'\n' => line_starts.push((i + 1) as TextPos),
                // U+2028 / U+2029 encode as E2 80 A8 / E2 80 A9.
                0xE2 if bytes.get(i + 1) == Some(&0x80)
                    && matches!(bytes.get(i + 2), Some(0xA8 | 0xA9)) =>
                {
                    i += 2;
                    line_starts.push((i + 1) as TextPos);
                }
                _ => {}
            }
            i += 1;
        }
        Self { line_starts }
    }

    pub fn line_of(&self, pos: TextPos) -> u32 {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line as u32,
            Err(line) => (line - 1) as u32,
        }
    }

    pub fn line_and_column_of(&self, pos: TextPos) -> LineAndColumn {
        let line = self.line_of(pos);
        LineAndColumn {
            line,
            column: pos - self.line_starts[line as usize],
        }
    }

    pub fn line_start(&self, line: u32) -> TextPos {
        self.line_starts[line as usize]
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_range_covers() {
        let outer = TextRange::new(2, 10);
        assert!(outer.covers(TextRange::new(2, 10)));
        assert!(outer.covers(TextRange::empty(10)));
        assert!(!outer.covers(TextRange::new(1, 4)));
        assert!(!outer.covers(TextRange::new(9, 11)));
        assert_eq!(outer.cover(TextRange::new(0, 3)), TextRange::new(0, 10));
    }

    #[test]
    fn test_text_range_slice() {
        let text = "let x = 1;";
        assert_eq!(TextRange::new(4, 5).slice(text), "x");
        assert_eq!(TextRange::new(4, 5).to_span(), TextSpan::new(4, 1));
    }

    #[test]
    fn test_line_map_terminators() {
        let text = "a\nb\r\nc\rd\u{2028}e";
        let map = LineMap::new(text);
        assert_eq!(map.line_count(), 5);
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(2), 1);
        assert_eq!(map.line_of(3), 1);
        assert_eq!(map.line_of(5), 2);
        assert_eq!(map.line_of(7), 3);
        let e = text.find('e').unwrap() as u32;
        assert_eq!(map.line_and_column_of(e), LineAndColumn { line: 4, column: 0 });
    }

    #[test]
    fn test_line_and_column() {
        let map = LineMap::new("line1\nline2\nline3");
        assert_eq!(map.line_of(5), 0);
        assert_eq!(map.line_of(6), 1);
        assert_eq!(map.line_and_column_of(8), LineAndColumn { line: 1, column: 2 });
        assert_eq!(map.line_start(2), 12);
    }
}
