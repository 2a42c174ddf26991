//! Character classes used by the scanner.

use unicode_xid::UnicodeXID;

pub const LINE_SEPARATOR: char = '\u{2028}';
pub const PARAGRAPH_SEPARATOR: char = '\u{2029}';

/// Length of a `<<<<<<<` style merge-conflict marker.
pub const MERGE_CONFLICT_MARKER_LENGTH: usize = 7;

#[inline]
pub fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR)
}

/// Whether `bytes[pos..]` starts with a line terminator, including the
/// three-byte U+2028 and U+2029.
#[inline]
pub fn is_line_break_at(bytes: &[u8], pos: usize) -> bool {
    match bytes.get(pos) {
        Some(b'\n' | b'\r') => true,
        Some(0xE2) => bytes.get(pos + 1) == Some(&0x80) && matches!(bytes.get(pos + 2), Some(0xA8 | 0xA9)),
        _ => false,
    }
}

/// Whether the bytes just before `pos` are a line terminator.
#[inline]
pub fn follows_line_break(bytes: &[u8], pos: usize) -> bool {
    match pos {
        0 => true,
        _ if matches!(bytes[pos - 1], b'\n' | b'\r') => true,
        _ => pos >= 3 && is_line_break_at(bytes, pos - 3),
    }
}

/// Whitespace that does not end a line.
#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{0085}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200B}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

#[inline]
pub fn is_white_space_like(ch: char) -> bool {
    is_white_space_single_line(ch) || is_line_break(ch)
}

#[inline]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[inline]
pub fn is_octal_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'7')
}

#[inline]
pub fn is_binary_digit(b: u8) -> bool {
    matches!(b, b'0' | b'1')
}

#[inline]
pub fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    if ch.is_ascii() {
        ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
    } else {
        ch.is_xid_start()
    }
}

#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    if ch.is_ascii() {
        ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
    } else {
        // ZWNJ and ZWJ are allowed inside identifiers.
        ch.is_xid_continue() || ch == '\u{200C}' || ch == '\u{200D}'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_breaks() {
        let text = "a\u{2028}b\r\n".as_bytes();
        assert!(is_line_break_at(text, 1));
        assert!(!is_line_break_at(text, 0));
        assert!(follows_line_break(text, 4));
        assert!(is_line_break_at(text, 5));
        assert!(follows_line_break(text, 0));
        assert!(!follows_line_break(text, 1));
    }

    #[test]
    fn test_identifier_classes() {
        assert!(is_identifier_start('$'));
        assert!(is_identifier_start('é'));
        assert!(!is_identifier_start('1'));
        assert!(is_identifier_part('1'));
        assert!(is_identifier_part('\u{200D}'));
        assert!(!is_identifier_part('-'));
    }
}
