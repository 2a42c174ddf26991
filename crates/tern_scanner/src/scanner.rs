//! The scanner: a single-token cursor over borrowed source text.
//!
//! `scan` produces the next token; the `re_scan_*` methods reinterpret the
//! current token when the parser knows more about the context than the
//! scanner could. All positions are UTF-8 byte offsets.

use crate::char_codes::*;
use crate::token::TokenInfo;
use std::borrow::Cow;
use tern_ast::syntax_kind::SyntaxKind;
use tern_ast::types::TokenFlags;
use tern_core::text::{TextPos, TextRange};
use tern_diagnostics::{messages, DiagnosticCollection, DiagnosticMessage, DiagnosticSink};

/// Everything needed to put the scanner back where it was.
#[derive(Debug, Clone)]
pub struct ScannerState<'a> {
    pos: usize,
    end: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: Cow<'a, str>,
    token_flags: TokenFlags,
    diagnostics_len: usize,
}

pub struct Scanner<'a> {
    text: &'a str,
    /// Scanning stops here; narrowed by `scan_range`.
    end: usize,
    pos: usize,
    /// Start of the current token including its leading trivia.
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: Cow<'a, str>,
    token_flags: TokenFlags,
    skip_trivia: bool,
    diagnostics: DiagnosticCollection,
}

impl<'a> Scanner<'a> {
    /// A scanner in parser mode (trivia skipped).
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            end: text.len(),
            pos: 0,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: Cow::Borrowed(""),
            token_flags: TokenFlags::NONE,
            skip_trivia: true,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// A scanner that returns whitespace, newline and comment tokens too.
    pub fn with_trivia(text: &'a str) -> Self {
        let mut scanner = Self::new(text);
        scanner.skip_trivia = false;
        scanner
    }

    pub fn set_skip_trivia(&mut self, skip_trivia: bool) {
        self.skip_trivia = skip_trivia;
    }

    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub fn token_start(&self) -> TextPos {
        self.token_start as TextPos
    }

    #[inline]
    pub fn token_end(&self) -> TextPos {
        self.pos as TextPos
    }

    #[inline]
    pub fn full_start(&self) -> TextPos {
        self.full_start as TextPos
    }

    #[inline]
    pub fn token_range(&self) -> TextRange {
        TextRange::new(self.token_start(), self.token_end())
    }

    /// Source text of the current token.
    #[inline]
    pub fn token_text(&self) -> &'a str {
        &self.text[self.token_start..self.pos]
    }

    /// Decoded value of the current token.
    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    pub fn token_value_cow(&self) -> Cow<'a, str> {
        self.token_value.clone()
    }

    #[inline]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    #[inline]
    pub fn is_unterminated(&self) -> bool {
        self.token_flags.contains(TokenFlags::UNTERMINATED)
    }

    #[inline]
    pub fn has_extended_unicode_escape(&self) -> bool {
        self.token_flags.contains(TokenFlags::EXTENDED_UNICODE_ESCAPE)
    }

    /// Whether the current token is an identifier or keyword spelled with a
    /// unicode escape.
    #[inline]
    pub fn has_unicode_escape(&self) -> bool {
        self.token_flags.contains(TokenFlags::UNICODE_ESCAPE)
    }

    pub fn token_info(&self) -> TokenInfo<'a> {
        TokenInfo {
            kind: self.token,
            range: self.token_range(),
            value: self.token_value.clone(),
            flags: self.token_flags,
        }
    }

    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    /// Moves pending lexical diagnostics to `sink`, keeping their order.
    pub fn drain_diagnostics_into(&mut self, sink: &mut DiagnosticCollection) {
        self.diagnostics.drain_into(sink);
    }

    // ========================================================================
    // State
    // ========================================================================

    pub fn save_state(&self) -> ScannerState<'a> {
        ScannerState {
            pos: self.pos,
            end: self.end,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
            diagnostics_len: self.diagnostics.len(),
        }
    }

    /// Restores a saved state, dropping any diagnostic reported since.
    pub fn restore_state(&mut self, state: ScannerState<'a>) {
        self.pos = state.pos;
        self.end = state.end;
        self.full_start = state.full_start;
        self.token_start = state.token_start;
        self.token = state.token;
        self.token_value = state.token_value;
        self.token_flags = state.token_flags;
        self.diagnostics.truncate(state.diagnostics_len);
    }

    /// Runs `f` and then restores the scanner unconditionally.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.save_state();
        let result = f(self);
        self.restore_state(state);
        result
    }

    /// Runs `f` and restores the scanner only if `f` returns `None`.
    pub fn try_scan<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let state = self.save_state();
        let result = f(self);
        if result.is_none() {
            self.restore_state(state);
        }
        result
    }

    /// Scans the unrelated range `[start, start + length)` with `f`, then
    /// puts every piece of scanner state back, including the end bound.
    pub fn scan_range<T>(&mut self, start: TextPos, length: TextPos, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.save_state();
        let start = start as usize;
        self.end = (start + length as usize).min(self.text.len());
        self.reset_to(start as TextPos);
        let result = f(self);
        self.restore_state(state);
        result
    }

    /// Moves the cursor to `pos` and forgets the current token.
    pub fn reset_to(&mut self, pos: TextPos) {
        self.pos = pos as usize;
        self.full_start = self.pos;
        self.token_start = self.pos;
        self.token = SyntaxKind::Unknown;
        self.token_value = Cow::Borrowed("");
        self.token_flags = TokenFlags::NONE;
    }

    // ========================================================================
    // Low-level cursor
    // ========================================================================

    #[inline]
    fn bytes(&self) -> &'a [u8] {
        self.text.as_bytes()
    }

    #[inline]
    fn peek(&self, offset: usize) -> Option<u8> {
        let at = self.pos + offset;
        if at < self.end {
            Some(self.bytes()[at])
        } else {
            None
        }
    }

    #[inline]
    fn char_at(&self, pos: usize) -> Option<char> {
        if pos < self.end {
            self.text[pos..self.end].chars().next()
        } else {
            None
        }
    }

    #[inline]
    fn punct(&mut self, len: usize, kind: SyntaxKind) -> SyntaxKind {
        self.pos += len;
        kind
    }

    fn error(&mut self, message: &'static DiagnosticMessage, pos: usize, end: usize) {
        self.error_with_args(message, pos, end, &[]);
    }

    fn error_with_args(&mut self, message: &'static DiagnosticMessage, pos: usize, end: usize, args: &[&str]) {
        self.diagnostics
            .report(TextRange::new(pos as TextPos, end as TextPos), message, args);
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    /// Scans the next token. In parser mode trivia is skipped and only
    /// remembered through `PRECEDING_LINE_BREAK`; otherwise each trivia run
    /// is its own token.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_flags = TokenFlags::NONE;
        self.token_value = Cow::Borrowed("");

        loop {
            self.token_start = self.pos;
            if self.pos >= self.end {
                self.token = SyntaxKind::EndOfFileToken;
                return self.token;
            }
            match self.scan_trivia() {
                Some(kind) if !self.skip_trivia => {
                    self.token = kind;
                    return kind;
                }
                Some(_) => continue,
                None => break,
            }
        }

        self.token = self.scan_token();
        self.token
    }

    /// Consumes one run of trivia at the cursor, or returns `None`.
    fn scan_trivia(&mut self) -> Option<SyntaxKind> {
        let bytes = self.bytes();
        let b = bytes[self.pos];
        match b {
            b'\n' | b'\r' => {
                self.pos += if b == b'\r' && self.peek(1) == Some(b'\n') { 2 } else { 1 };
                self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                Some(SyntaxKind::NewLineTrivia)
            }
            b'\t' | 0x0B | 0x0C | b' ' => {
                self.skip_white_space();
                Some(SyntaxKind::WhitespaceTrivia)
            }
            b'#' if self.pos == 0 && self.peek(1) == Some(b'!') => {
                self.pos = self.find_line_break(self.pos);
                Some(SyntaxKind::ShebangTrivia)
            }
            b'/' if self.peek(1) == Some(b'/') => {
                self.pos = self.find_line_break(self.pos + 2);
                Some(SyntaxKind::SingleLineCommentTrivia)
            }
            b'/' if self.peek(1) == Some(b'*') => {
                self.scan_multi_line_comment();
                Some(SyntaxKind::MultiLineCommentTrivia)
            }
            b'<' | b'=' | b'>' | b'|' if self.is_conflict_marker_trivia(self.pos) => {
                self.error(&messages::MERGE_CONFLICT_MARKER_ENCOUNTERED, self.pos, self.pos + MERGE_CONFLICT_MARKER_LENGTH);
                self.scan_conflict_marker_trivia();
                self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                Some(SyntaxKind::ConflictMarkerTrivia)
            }
            0x80..=0xFF => {
                let ch = self.char_at(self.pos)?;
                if ch == LINE_SEPARATOR || ch == PARAGRAPH_SEPARATOR {
                    self.pos += ch.len_utf8();
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    Some(SyntaxKind::NewLineTrivia)
                } else if is_white_space_single_line(ch) {
                    self.skip_white_space();
                    Some(SyntaxKind::WhitespaceTrivia)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn skip_white_space(&mut self) {
        while let Some(ch) = self.char_at(self.pos) {
            if !is_white_space_single_line(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    /// Offset of the first line terminator at or after `from`, or the end.
    fn find_line_break(&self, from: usize) -> usize {
        let bytes = &self.bytes()[..self.end];
        let mut at = from;
        while let Some(offset) = memchr::memchr3(b'\n', b'\r', 0xE2, &bytes[at..]) {
            at += offset;
            if is_line_break_at(bytes, at) {
                return at;
            }
            at += 1;
        }
        self.end
    }

    fn scan_multi_line_comment(&mut self) {
        let start = self.pos;
        let bytes = &self.bytes()[..self.end];
        if bytes.get(start + 2) == Some(&b'*') && bytes.get(start + 3) != Some(&b'/') {
            self.token_flags |= TokenFlags::PRECEDING_JSDOC_COMMENT;
        }
        let body_start = start + 2;
        let body_end = match memchr::memmem::find(&bytes[body_start..], b"*/") {
            Some(offset) => {
                self.pos = body_start + offset + 2;
                body_start + offset
            }
            None => {
                self.pos = self.end;
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(&messages::ASTERISK_SLASH_EXPECTED, self.end, self.end);
                self.end
            }
        };
        let body = &bytes[body_start..body_end];
        if memchr::memchr2(b'\n', b'\r', body).is_some()
            || memchr::memmem::find(body, "\u{2028}".as_bytes()).is_some()
            || memchr::memmem::find(body, "\u{2029}".as_bytes()).is_some()
        {
            self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
        }
    }

    /// `<<<<<<<`, `|||||||`, `=======` or `>>>>>>>` at the start of a line.
    fn is_conflict_marker_trivia(&self, pos: usize) -> bool {
        let bytes = &self.bytes()[..self.end];
        if !follows_line_break(bytes, pos) || pos + MERGE_CONFLICT_MARKER_LENGTH >= bytes.len() {
            return false;
        }
        let ch = bytes[pos];
        if bytes[pos..pos + MERGE_CONFLICT_MARKER_LENGTH].iter().any(|&b| b != ch) {
            return false;
        }
        ch == b'=' || bytes[pos + MERGE_CONFLICT_MARKER_LENGTH] == b' '
    }

    fn scan_conflict_marker_trivia(&mut self) {
        let ch = self.bytes()[self.pos];
        if ch == b'<' || ch == b'>' {
            self.pos = self.find_line_break(self.pos);
            return;
        }
        // `|||||||` and `=======` swallow everything up to the next marker
        // that closes their section.
        while self.pos < self.end {
            let current = self.bytes()[self.pos];
            if (current == b'=' || current == b'>') && current != ch && self.is_conflict_marker_trivia(self.pos) {
                break;
            }
            self.pos += 1;
        }
    }

    fn scan_token(&mut self) -> SyntaxKind {
        use SyntaxKind::*;

        let b = self.bytes()[self.pos];
        match b {
            b'(' => self.punct(1, OpenParenToken),
            b')' => self.punct(1, CloseParenToken),
            b'{' => self.punct(1, OpenBraceToken),
            b'}' => self.punct(1, CloseBraceToken),
            b'[' => self.punct(1, OpenBracketToken),
            b']' => self.punct(1, CloseBracketToken),
            b';' => self.punct(1, SemicolonToken),
            b',' => self.punct(1, CommaToken),
            b':' => self.punct(1, ColonToken),
            b'~' => self.punct(1, TildeToken),
            b'@' => self.punct(1, AtToken),
            // `>>`, `>=` and friends come from `re_scan_greater_token`.
            b'>' => self.punct(1, GreaterThanToken),
            b'.' => match (self.peek(1), self.peek(2)) {
                (Some(b'.'), Some(b'.')) => self.punct(3, DotDotDotToken),
                (Some(d), _) if is_digit(d) => self.scan_number(),
                _ => self.punct(1, DotToken),
            },
            b'?' => match (self.peek(1), self.peek(2)) {
                (Some(b'?'), Some(b'=')) => self.punct(3, QuestionQuestionEqualsToken),
                (Some(b'?'), _) => self.punct(2, QuestionQuestionToken),
                (Some(b'.'), next) if !next.map_or(false, is_digit) => self.punct(2, QuestionDotToken),
                _ => self.punct(1, QuestionToken),
            },
            b'<' => match (self.peek(1), self.peek(2)) {
                (Some(b'<'), Some(b'=')) => self.punct(3, LessThanLessThanEqualsToken),
                (Some(b'<'), _) => self.punct(2, LessThanLessThanToken),
                (Some(b'='), _) => self.punct(2, LessThanEqualsToken),
                _ => self.punct(1, LessThanToken),
            },
            b'=' => match (self.peek(1), self.peek(2)) {
                (Some(b'='), Some(b'=')) => self.punct(3, EqualsEqualsEqualsToken),
                (Some(b'='), _) => self.punct(2, EqualsEqualsToken),
                (Some(b'>'), _) => self.punct(2, EqualsGreaterThanToken),
                _ => self.punct(1, EqualsToken),
            },
            b'!' => match (self.peek(1), self.peek(2)) {
                (Some(b'='), Some(b'=')) => self.punct(3, ExclamationEqualsEqualsToken),
                (Some(b'='), _) => self.punct(2, ExclamationEqualsToken),
                _ => self.punct(1, ExclamationToken),
            },
            b'+' => match self.peek(1) {
                Some(b'+') => self.punct(2, PlusPlusToken),
                Some(b'=') => self.punct(2, PlusEqualsToken),
                _ => self.punct(1, PlusToken),
            },
            b'-' => match self.peek(1) {
                Some(b'-') => self.punct(2, MinusMinusToken),
                Some(b'=') => self.punct(2, MinusEqualsToken),
                _ => self.punct(1, MinusToken),
            },
            b'*' => match (self.peek(1), self.peek(2)) {
                (Some(b'*'), Some(b'=')) => self.punct(3, AsteriskAsteriskEqualsToken),
                (Some(b'*'), _) => self.punct(2, AsteriskAsteriskToken),
                (Some(b'='), _) => self.punct(2, AsteriskEqualsToken),
                _ => self.punct(1, AsteriskToken),
            },
            b'/' => match self.peek(1) {
                Some(b'=') => self.punct(2, SlashEqualsToken),
                _ => self.punct(1, SlashToken),
            },
            b'%' => match self.peek(1) {
                Some(b'=') => self.punct(2, PercentEqualsToken),
                _ => self.punct(1, PercentToken),
            },
            b'&' => match (self.peek(1), self.peek(2)) {
                (Some(b'&'), Some(b'=')) => self.punct(3, AmpersandAmpersandEqualsToken),
                (Some(b'&'), _) => self.punct(2, AmpersandAmpersandToken),
                (Some(b'='), _) => self.punct(2, AmpersandEqualsToken),
                _ => self.punct(1, AmpersandToken),
            },
            b'|' => match (self.peek(1), self.peek(2)) {
                (Some(b'|'), Some(b'=')) => self.punct(3, BarBarEqualsToken),
                (Some(b'|'), _) => self.punct(2, BarBarToken),
                (Some(b'='), _) => self.punct(2, BarEqualsToken),
                _ => self.punct(1, BarToken),
            },
            b'^' => match self.peek(1) {
                Some(b'=') => self.punct(2, CaretEqualsToken),
                _ => self.punct(1, CaretToken),
            },
            b'\'' | b'"' => self.scan_string(b),
            // Escape errors are reported when the parser rescans an untagged
            // template.
            b'`' => self.scan_template_and_set_token_value(false),
            b'0'..=b'9' => self.scan_number(),
            b'#' => self.scan_private_identifier(),
            b'\\' => match self.peek_unicode_escape(self.pos) {
                Some((ch, _)) if is_identifier_start(ch) => self.scan_identifier(),
                _ => self.scan_invalid_character(),
            },
            _ => match self.char_at(self.pos) {
                Some(ch) if is_identifier_start(ch) => self.scan_identifier(),
                _ => self.scan_invalid_character(),
            },
        }
    }

    fn scan_invalid_character(&mut self) -> SyntaxKind {
        let start = self.pos;
        let len = self.char_at(start).map_or(1, char::len_utf8);
        self.pos += len;
        self.error(&messages::INVALID_CHARACTER, start, self.pos);
        SyntaxKind::Unknown
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    /// Scans identifier characters from the cursor. Returns `None` when the
    /// identifier was spelled without escapes (its value is a source slice).
    fn scan_identifier_parts(&mut self) -> Option<String> {
        let mut decoded: Option<String> = None;
        let mut chunk_start = self.pos;
        while self.pos < self.end {
            let b = self.bytes()[self.pos];
            if b == b'\\' {
                match self.peek_unicode_escape(self.pos) {
                    Some((ch, len)) if is_identifier_part(ch) => {
                        let out = decoded.get_or_insert_with(String::new);
                        out.push_str(&self.text[chunk_start..self.pos]);
                        out.push(ch);
                        self.pos += len;
                        chunk_start = self.pos;
                        self.token_flags |= TokenFlags::UNICODE_ESCAPE;
                        continue;
                    }
                    _ => break,
                }
            }
            match self.char_at(self.pos) {
                Some(ch) if is_identifier_part(ch) => self.pos += ch.len_utf8(),
                _ => break,
            }
        }
        if let Some(out) = decoded.as_mut() {
            out.push_str(&self.text[chunk_start..self.pos]);
        }
        decoded
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        match self.scan_identifier_parts() {
            None => {
                let text = &self.text[start..self.pos];
                self.token_value = Cow::Borrowed(text);
                keyword_kind(text).unwrap_or(SyntaxKind::Identifier)
            }
            // An escaped keyword is an ordinary identifier.
            Some(decoded) => {
                self.token_value = Cow::Owned(decoded);
                SyntaxKind::Identifier
            }
        }
    }

    fn scan_private_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        let starts_identifier = match self.peek(1) {
            Some(b'\\') => self
                .peek_unicode_escape(self.pos + 1)
                .map_or(false, |(ch, _)| is_identifier_start(ch)),
            Some(_) => self.char_at(self.pos + 1).map_or(false, is_identifier_start),
            None => false,
        };
        if !starts_identifier {
            return self.scan_invalid_character();
        }
        self.pos += 1;
        self.token_value = match self.scan_identifier_parts() {
            None => Cow::Borrowed(&self.text[start..self.pos]),
            Some(decoded) => Cow::Owned(format!("#{decoded}")),
        };
        SyntaxKind::PrivateIdentifier
    }

    /// Decodes a `\uXXXX` or `\u{X...}` escape at `pos` without moving the
    /// cursor. Returns the character and the escape's length in bytes.
    fn peek_unicode_escape(&self, pos: usize) -> Option<(char, usize)> {
        let bytes = &self.bytes()[..self.end];
        if bytes.get(pos) != Some(&b'\\') || bytes.get(pos + 1) != Some(&b'u') {
            return None;
        }
        if bytes.get(pos + 2) == Some(&b'{') {
            let digits_start = pos + 3;
            let digits = bytes[digits_start..].iter().take_while(|b| is_hex_digit(**b)).count();
            if digits == 0 || bytes.get(digits_start + digits) != Some(&b'}') {
                return None;
            }
            let value = u32::from_str_radix(&self.text[digits_start..digits_start + digits], 16).ok()?;
            return char::from_u32(value).map(|ch| (ch, digits + 4));
        }
        let digits = bytes.get(pos + 2..pos + 6)?;
        if !digits.iter().all(|b| is_hex_digit(*b)) {
            return None;
        }
        let value = u32::from_str_radix(&self.text[pos + 2..pos + 6], 16).ok()?;
        char::from_u32(value).map(|ch| (ch, 6))
    }

    // ========================================================================
    // Numbers
    // ========================================================================

    /// Scans digits accepted by `is_digit_fn`, allowing single `_`
    /// separators between digits. Returns whether any digit was seen.
    fn scan_digits(&mut self, is_digit_fn: fn(u8) -> bool) -> bool {
        let mut allow_separator = false;
        let mut previous_was_separator = false;
        let mut any = false;
        while let Some(b) = self.peek(0) {
            if b == b'_' {
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
                if allow_separator {
                    allow_separator = false;
                    previous_was_separator = true;
                } else if previous_was_separator {
                    self.error(&messages::MULTIPLE_CONSECUTIVE_NUMERIC_SEPARATORS_ARE_NOT_PERMITTED, self.pos, self.pos + 1);
                } else {
                    self.error(&messages::NUMERIC_SEPARATORS_ARE_NOT_ALLOWED_HERE, self.pos, self.pos + 1);
                }
                self.pos += 1;
                continue;
            }
            if !is_digit_fn(b) {
                break;
            }
            allow_separator = true;
            previous_was_separator = false;
            any = true;
            self.pos += 1;
        }
        if previous_was_separator {
            self.error(&messages::NUMERIC_SEPARATORS_ARE_NOT_ALLOWED_HERE, self.pos - 1, self.pos);
        }
        any
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;

        if self.peek(0) == Some(b'0') {
            let radix = match self.peek(1) {
                Some(b'x' | b'X') => Some((TokenFlags::HEX_SPECIFIER, is_hex_digit as fn(u8) -> bool)),
                Some(b'b' | b'B') => Some((TokenFlags::BINARY_SPECIFIER, is_binary_digit as fn(u8) -> bool)),
                Some(b'o' | b'O') => Some((TokenFlags::OCTAL_SPECIFIER, is_octal_digit as fn(u8) -> bool)),
                _ => None,
            };
            if let Some((flag, is_digit_fn)) = radix {
                self.pos += 2;
                self.token_flags |= flag;
                if !self.scan_digits(is_digit_fn) {
                    let message = if flag == TokenFlags::HEX_SPECIFIER {
                        &messages::HEXADECIMAL_DIGIT_EXPECTED
                    } else {
                        &messages::DIGIT_EXPECTED
                    };
                    self.error(message, self.pos, self.pos);
                }
                return self.finish_number(start, true);
            }

            if self.peek(1).map_or(false, is_digit) {
                // Legacy `017` octal, or `08`/`09` decimal with a leading zero.
                let digits_end = start
                    + 1
                    + self.bytes()[start + 1..self.end].iter().take_while(|b| is_digit(**b)).count();
                if self.bytes()[start + 1..digits_end].iter().all(|b| is_octal_digit(*b)) {
                    self.pos = digits_end;
                    self.token_flags |= TokenFlags::OCTAL;
                    self.token_value = Cow::Borrowed(&self.text[start..self.pos]);
                    self.check_for_identifier_start_after_number();
                    return SyntaxKind::NumericLiteral;
                }
                self.token_flags |= TokenFlags::CONTAINS_LEADING_ZERO;
            }
        }

        let mut is_integer = true;
        if self.peek(0) != Some(b'.') {
            self.scan_digits(is_digit);
        }
        if self.peek(0) == Some(b'.') {
            is_integer = false;
            self.pos += 1;
            self.scan_digits(is_digit);
        }
        if matches!(self.peek(0), Some(b'e' | b'E')) {
            is_integer = false;
            self.pos += 1;
            self.token_flags |= TokenFlags::SCIENTIFIC;
            if matches!(self.peek(0), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if !self.scan_digits(is_digit) {
                self.error(&messages::DIGIT_EXPECTED, self.pos, self.pos);
            }
        }
        self.finish_number(start, is_integer)
    }

    fn finish_number(&mut self, start: usize, allow_big_int: bool) -> SyntaxKind {
        let kind = if allow_big_int && self.peek(0) == Some(b'n') {
            self.pos += 1;
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };
        self.token_value = Cow::Borrowed(&self.text[start..self.pos]);
        self.check_for_identifier_start_after_number();
        kind
    }

    fn check_for_identifier_start_after_number(&mut self) {
        let Some(ch) = self.char_at(self.pos) else {
            return;
        };
        if !is_identifier_start(ch) {
            return;
        }
        let identifier_start = self.pos;
        let saved_flags = self.token_flags;
        self.scan_identifier_parts();
        self.error(
            &messages::AN_IDENTIFIER_OR_KEYWORD_CANNOT_IMMEDIATELY_FOLLOW_A_NUMERIC_LITERAL,
            identifier_start,
            self.pos,
        );
        // The identifier is scanned again as the next token.
        self.pos = identifier_start;
        self.token_flags = saved_flags;
    }

    // ========================================================================
    // Strings and templates
    // ========================================================================

    fn scan_string(&mut self, quote: u8) -> SyntaxKind {
        self.pos += 1;
        let content_start = self.pos;
        let mut chunk_start = self.pos;
        let mut decoded: Option<String> = None;
        loop {
            let Some(b) = self.peek(0) else {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(&messages::UNTERMINATED_STRING_LITERAL, self.pos, self.pos);
                break;
            };
            if b == quote {
                break;
            }
            if b == b'\\' {
                let mut out = decoded.take().unwrap_or_default();
                out.push_str(&self.text[chunk_start..self.pos]);
                self.scan_escape_sequence(&mut out, EscapeContext::String);
                decoded = Some(out);
                chunk_start = self.pos;
                continue;
            }
            if b == b'\n' || b == b'\r' {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(&messages::UNTERMINATED_STRING_LITERAL, self.pos, self.pos);
                break;
            }
            self.pos += 1;
        }
        self.token_value = match decoded {
            None => Cow::Borrowed(&self.text[content_start..self.pos]),
            Some(mut out) => {
                out.push_str(&self.text[chunk_start..self.pos]);
                Cow::Owned(out)
            }
        };
        if self.peek(0) == Some(quote) {
            self.pos += 1;
        }
        SyntaxKind::StringLiteral
    }

    /// Scans from a `` ` `` or a `}` to the next `${` or closing backtick.
    fn scan_template_and_set_token_value(&mut self, report_invalid_escapes: bool) -> SyntaxKind {
        let started_with_backtick = self.bytes()[self.pos] == b'`';
        self.pos += 1;
        let content_start = self.pos;
        let mut chunk_start = self.pos;
        let mut decoded: Option<String> = None;
        let context = if report_invalid_escapes {
            EscapeContext::Template
        } else {
            EscapeContext::TaggedTemplate
        };

        let (kind, content_end) = loop {
            let Some(b) = self.peek(0) else {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(&messages::UNTERMINATED_TEMPLATE_LITERAL, self.pos, self.pos);
                let kind = if started_with_backtick {
                    SyntaxKind::NoSubstitutionTemplateLiteral
                } else {
                    SyntaxKind::TemplateTail
                };
                break (kind, self.pos);
            };
            match b {
                b'`' => {
                    let kind = if started_with_backtick {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    };
                    self.pos += 1;
                    break (kind, self.pos - 1);
                }
                b'$' if self.peek(1) == Some(b'{') => {
                    let kind = if started_with_backtick {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    };
                    self.pos += 2;
                    break (kind, self.pos - 2);
                }
                b'\\' => {
                    let mut out = decoded.take().unwrap_or_default();
                    out.push_str(&self.text[chunk_start..self.pos]);
                    self.scan_escape_sequence(&mut out, context);
                    decoded = Some(out);
                    chunk_start = self.pos;
                }
                // Template values normalize `\r\n` and `\r` to `\n`.
                b'\r' => {
                    let mut out = decoded.take().unwrap_or_default();
                    out.push_str(&self.text[chunk_start..self.pos]);
                    out.push('\n');
                    self.pos += if self.peek(1) == Some(b'\n') { 2 } else { 1 };
                    decoded = Some(out);
                    chunk_start = self.pos;
                }
                _ => self.pos += 1,
            }
        };

        self.token_value = match decoded {
            None => Cow::Borrowed(&self.text[content_start..content_end]),
            Some(mut out) => {
                out.push_str(&self.text[chunk_start..content_end]);
                Cow::Owned(out)
            }
        };
        kind
    }

    /// Decodes the escape sequence at the cursor (which sits on `\`) into
    /// `out`.
    fn scan_escape_sequence(&mut self, out: &mut String, context: EscapeContext) {
        let start = self.pos;
        self.pos += 1;
        let Some(ch) = self.char_at(self.pos) else {
            self.error(&messages::UNEXPECTED_END_OF_TEXT, self.pos, self.pos);
            return;
        };
        self.pos += ch.len_utf8();
        match ch {
            '0' if !self.peek(0).map_or(false, is_digit) => out.push('\0'),
            '0'..='7' => {
                let first = ch as u32 - '0' as u32;
                let mut value = first;
                // `\0`-`\3` take up to two more digits, `\4`-`\7` one more.
                let max_more = if first <= 3 { 2 } else { 1 };
                for _ in 0..max_more {
                    match self.peek(0) {
                        Some(d) if is_octal_digit(d) => {
                            value = value * 8 + (d - b'0') as u32;
                            self.pos += 1;
                        }
                        _ => break,
                    }
                }
                if context.is_template() {
                    self.token_flags |= TokenFlags::CONTAINS_INVALID_ESCAPE;
                    if context.reports_errors() {
                        let suggestion = format!("\\x{value:02x}");
                        self.error_with_args(
                            &messages::OCTAL_ESCAPE_SEQUENCES_ARE_NOT_ALLOWED_USE_THE_SYNTAX_0,
                            start,
                            self.pos,
                            &[&suggestion],
                        );
                    }
                    out.push_str(&self.text[start..self.pos]);
                } else {
                    out.push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
            }
            '8' | '9' if context.is_template() => {
                self.token_flags |= TokenFlags::CONTAINS_INVALID_ESCAPE;
                out.push_str(&self.text[start..self.pos]);
            }
            'b' => out.push('\u{8}'),
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'v' => out.push('\u{B}'),
            'f' => out.push('\u{C}'),
            'r' => out.push('\r'),
            'x' => match self.scan_exact_hex_digits(2) {
                Some(value) => out.push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)),
                None => {
                    self.token_flags |= TokenFlags::CONTAINS_INVALID_ESCAPE;
                    if context.reports_errors() {
                        self.error(&messages::HEXADECIMAL_DIGIT_EXPECTED, self.pos, self.pos);
                    }
                    out.push_str(&self.text[start..self.pos]);
                }
            },
            'u' if self.peek(0) == Some(b'{') => self.scan_extended_unicode_escape(start, out, context),
            'u' => match self.scan_exact_hex_digits(4) {
                Some(value) => {
                    self.token_flags |= TokenFlags::UNICODE_ESCAPE;
                    self.push_code_unit(value, out);
                }
                None => {
                    self.token_flags |= TokenFlags::CONTAINS_INVALID_ESCAPE;
                    if context.reports_errors() {
                        self.error(&messages::HEXADECIMAL_DIGIT_EXPECTED, self.pos, self.pos);
                    }
                    out.push_str(&self.text[start..self.pos]);
                }
            },
            // Line continuations contribute nothing.
            '\r' => {
                if self.peek(0) == Some(b'\n') {
                    self.pos += 1;
                }
            }
            '\n' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR => {}
            other => out.push(other),
        }
    }

    fn scan_extended_unicode_escape(&mut self, start: usize, out: &mut String, context: EscapeContext) {
        // Cursor is on `{`.
        self.pos += 1;
        let digits_start = self.pos;
        while self.peek(0).map_or(false, is_hex_digit) {
            self.pos += 1;
        }
        let digits = &self.text[digits_start..self.pos];
        let value = u32::from_str_radix(digits, 16).ok();
        let mut valid = true;

        if digits.is_empty() {
            valid = false;
            if context.reports_errors() {
                self.error(&messages::HEXADECIMAL_DIGIT_EXPECTED, self.pos, self.pos);
            }
        } else if value.map_or(true, |v| v > 0x10FFFF) {
            valid = false;
            if context.reports_errors() {
                self.error(
                    &messages::AN_EXTENDED_UNICODE_ESCAPE_VALUE_MUST_BE_BETWEEN_0X0_AND_0X10FFFF_INCLUSIVE,
                    digits_start,
                    self.pos,
                );
            }
        }

        if self.peek(0) == Some(b'}') {
            self.pos += 1;
        } else {
            valid = false;
            if context.reports_errors() {
                self.error(&messages::UNTERMINATED_UNICODE_ESCAPE_SEQUENCE, self.pos, self.pos);
            }
        }

        match value {
            Some(v) if valid => {
                self.token_flags |= TokenFlags::EXTENDED_UNICODE_ESCAPE;
                out.push(char::from_u32(v).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            _ => {
                self.token_flags |= TokenFlags::CONTAINS_INVALID_ESCAPE;
                out.push_str(&self.text[start..self.pos]);
            }
        }
    }

    /// Reads exactly `count` hex digits, leaving the cursor untouched on
    /// failure.
    fn scan_exact_hex_digits(&mut self, count: usize) -> Option<u32> {
        let digits = self.bytes().get(self.pos..self.pos + count)?;
        if self.pos + count > self.end || !digits.iter().all(|b| is_hex_digit(*b)) {
            return None;
        }
        let value = u32::from_str_radix(&self.text[self.pos..self.pos + count], 16).ok()?;
        self.pos += count;
        Some(value)
    }

    /// Pushes a UTF-16 code unit, pairing a high surrogate with a following
    /// `\uDC00`-`\uDFFF` escape.
    fn push_code_unit(&mut self, unit: u32, out: &mut String) {
        if (0xD800..=0xDBFF).contains(&unit) && self.peek(0) == Some(b'\\') && self.peek(1) == Some(b'u') {
            let saved = self.pos;
            self.pos += 2;
            if let Some(low) = self.scan_exact_hex_digits(4) {
                if (0xDC00..=0xDFFF).contains(&low) {
                    let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    out.push(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
                    return;
                }
            }
            self.pos = saved;
        }
        out.push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER));
    }

    // ========================================================================
    // Re-scans
    // ========================================================================

    /// Extends a `>` into `>=`, `>>`, `>>=`, `>>>` or `>>>=`. Only valid
    /// while the current token is `>`.
    pub fn re_scan_greater_token(&mut self) -> SyntaxKind {
        use SyntaxKind::*;

        if self.token != GreaterThanToken {
            return self.token;
        }
        self.token = match (self.peek(0), self.peek(1), self.peek(2)) {
            (Some(b'>'), Some(b'>'), Some(b'=')) => self.punct(3, GreaterThanGreaterThanGreaterThanEqualsToken),
            (Some(b'>'), Some(b'>'), _) => self.punct(2, GreaterThanGreaterThanGreaterThanToken),
            (Some(b'>'), Some(b'='), _) => self.punct(2, GreaterThanGreaterThanEqualsToken),
            (Some(b'>'), _, _) => self.punct(1, GreaterThanGreaterThanToken),
            (Some(b'='), _, _) => self.punct(1, GreaterThanEqualsToken),
            _ => GreaterThanToken,
        };
        tracing::trace!(pos = self.token_start, token = ?self.token, "rescan greater");
        self.token
    }

    /// Reinterprets `/` or `/=` as the start of a regular expression literal.
    pub fn re_scan_slash_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::SlashToken && self.token != SyntaxKind::SlashEqualsToken {
            return self.token;
        }
        let bytes = &self.bytes()[..self.end];
        let mut p = self.token_start + 1;
        let mut in_escape = false;
        let mut in_character_class = false;
        loop {
            if p >= self.end || is_line_break_at(bytes, p) {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(&messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL, self.token_start, p);
                break;
            }
            let b = bytes[p];
            if in_escape {
                in_escape = false;
            } else if b == b'/' && !in_character_class {
                p += 1;
                break;
            } else if b == b'[' {
                in_character_class = true;
            } else if b == b'\\' {
                in_escape = true;
            } else if b == b']' {
                in_character_class = false;
            }
            p += 1;
        }
        // Flags
        while let Some(ch) = self.char_at(p) {
            if !is_identifier_part(ch) {
                break;
            }
            p += ch.len_utf8();
        }
        self.pos = p;
        self.token_value = Cow::Borrowed(&self.text[self.token_start..self.pos]);
        self.token = SyntaxKind::RegularExpressionLiteral;
        tracing::trace!(pos = self.token_start, end = self.pos, "rescan slash as regex");
        self.token
    }

    /// Rescans a template piece with escape errors reported unless the
    /// template is tagged. From `}` this continues the template after a
    /// substitution; from a head or no-substitution literal it rescans the
    /// same token.
    pub fn re_scan_template_token(&mut self, is_tagged_template: bool) -> SyntaxKind {
        if !matches!(
            self.token,
            SyntaxKind::CloseBraceToken | SyntaxKind::TemplateHead | SyntaxKind::NoSubstitutionTemplateLiteral
        ) {
            return self.token;
        }
        self.pos = self.token_start;
        self.token_flags.remove(TokenFlags::TEMPLATE_LITERAL_LIKE_FLAGS | TokenFlags::UNTERMINATED);
        self.token = self.scan_template_and_set_token_value(!is_tagged_template);
        tracing::trace!(pos = self.token_start, token = ?self.token, "rescan template");
        self.token
    }

    // ========================================================================
    // JSX
    // ========================================================================

    /// Scans JSX children content: `<`, `</`, `{`, or a run of text.
    pub fn scan_jsx_token(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_start = self.pos;
        self.token_flags = TokenFlags::NONE;
        self.token_value = Cow::Borrowed("");
        self.token = self.scan_jsx_token_kind();
        self.token
    }

    /// Rescans the current token's full span as JSX children content.
    pub fn re_scan_jsx_token(&mut self) -> SyntaxKind {
        self.pos = self.full_start;
        self.scan_jsx_token()
    }

    fn scan_jsx_token_kind(&mut self) -> SyntaxKind {
        if self.pos >= self.end {
            return SyntaxKind::EndOfFileToken;
        }
        match self.bytes()[self.pos] {
            b'<' if self.peek(1) == Some(b'/') => return self.punct(2, SyntaxKind::LessThanSlashToken),
            b'<' => return self.punct(1, SyntaxKind::LessThanToken),
            b'{' => return self.punct(1, SyntaxKind::OpenBraceToken),
            _ => {}
        }

        // -1: only whitespace so far, and a line break came first.
        let mut first_non_white_space: isize = 0;
        while let Some(ch) = self.char_at(self.pos) {
            if ch == '{' {
                break;
            }
            if ch == '<' {
                if self.is_conflict_marker_trivia(self.pos) {
                    self.error(
                        &messages::MERGE_CONFLICT_MARKER_ENCOUNTERED,
                        self.pos,
                        self.pos + MERGE_CONFLICT_MARKER_LENGTH,
                    );
                    self.scan_conflict_marker_trivia();
                    return SyntaxKind::ConflictMarkerTrivia;
                }
                break;
            }
            if is_line_break(ch) && first_non_white_space == 0 {
                first_non_white_space = -1;
            } else if !is_white_space_like(ch) {
                first_non_white_space = self.pos as isize;
            }
            self.pos += ch.len_utf8();
        }
        self.token_value = Cow::Borrowed(&self.text[self.token_start..self.pos]);
        if first_non_white_space == -1 {
            SyntaxKind::JsxTextAllWhiteSpaces
        } else {
            SyntaxKind::JsxText
        }
    }

    /// Extends an identifier or keyword with `-` and further identifier
    /// parts, as JSX tag and attribute names allow.
    pub fn scan_jsx_identifier(&mut self) -> SyntaxKind {
        if !self.token.is_identifier_or_keyword() {
            return self.token;
        }
        while self.pos < self.end {
            if self.bytes()[self.pos] == b'-' {
                self.pos += 1;
                continue;
            }
            let before = self.pos;
            self.scan_identifier_parts();
            if self.pos == before {
                break;
            }
        }
        let text = &self.text[self.token_start..self.pos];
        self.token_value = Cow::Borrowed(text);
        self.token = keyword_kind(text).unwrap_or(SyntaxKind::Identifier);
        self.token
    }

    /// Scans a JSX attribute value. Quoted values take no escapes and may
    /// span lines.
    pub fn scan_jsx_attribute_value(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        match self.peek(0) {
            Some(quote @ (b'"' | b'\'')) => {
                self.token_start = self.pos;
                self.token_flags = TokenFlags::NONE;
                self.pos += 1;
                let content_start = self.pos;
                match memchr::memchr(quote, &self.bytes()[self.pos..self.end]) {
                    Some(offset) => {
                        self.pos += offset;
                        self.token_value = Cow::Borrowed(&self.text[content_start..self.pos]);
                        self.pos += 1;
                    }
                    None => {
                        self.pos = self.end;
                        self.token_flags |= TokenFlags::UNTERMINATED;
                        self.error(&messages::UNTERMINATED_STRING_LITERAL, self.pos, self.pos);
                        self.token_value = Cow::Borrowed(&self.text[content_start..self.pos]);
                    }
                }
                self.token = SyntaxKind::StringLiteral;
                self.token
            }
            _ => self.scan(),
        }
    }

    // ========================================================================
    // Doc comments
    // ========================================================================

    /// A simplified token for doc-comment content: whitespace runs, line
    /// breaks, `@`, `*`, words (which may contain `-`), and single
    /// characters as `Unknown`.
    pub fn scan_jsdoc_token(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_start = self.pos;
        self.token_flags = TokenFlags::NONE;
        self.token_value = Cow::Borrowed("");
        let Some(ch) = self.char_at(self.pos) else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };
        self.token = match ch {
            '\n' | '\r' => {
                self.pos += if ch == '\r' && self.peek(1) == Some(b'\n') { 2 } else { 1 };
                self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                SyntaxKind::NewLineTrivia
            }
            _ if is_white_space_single_line(ch) => {
                self.skip_white_space();
                SyntaxKind::WhitespaceTrivia
            }
            '@' => self.punct(1, SyntaxKind::AtToken),
            '*' => self.punct(1, SyntaxKind::AsteriskToken),
            _ if is_identifier_start(ch) => {
                while let Some(next) = self.char_at(self.pos) {
                    if !is_identifier_part(next) && next != '-' {
                        break;
                    }
                    self.pos += next.len_utf8();
                }
                let text = &self.text[self.token_start..self.pos];
                self.token_value = Cow::Borrowed(text);
                keyword_kind(text).unwrap_or(SyntaxKind::Identifier)
            }
            _ => {
                self.pos += ch.len_utf8();
                SyntaxKind::Unknown
            }
        };
        self.token
    }
}

/// Escape handling differs between string literals, templates, and tagged
/// templates (which tolerate invalid escapes silently).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EscapeContext {
    String,
    Template,
    TaggedTemplate,
}

impl EscapeContext {
    fn is_template(self) -> bool {
        self != EscapeContext::String
    }

    fn reports_errors(self) -> bool {
        self != EscapeContext::TaggedTemplate
    }
}

/// Keyword lookup with a cheap length and first-letter filter.
fn keyword_kind(text: &str) -> Option<SyntaxKind> {
    let len = text.len();
    if !(2..=11).contains(&len) || !text.as_bytes()[0].is_ascii_lowercase() {
        return None;
    }
    SyntaxKind::from_keyword(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<SyntaxKind> {
        let mut scanner = Scanner::new(text);
        let mut out = Vec::new();
        loop {
            let kind = scanner.scan();
            if kind == SyntaxKind::EndOfFileToken {
                return out;
            }
            out.push(kind);
        }
    }

    #[test]
    fn test_scan_simple_tokens() {
        use SyntaxKind::*;
        assert_eq!(
            kinds("( ) { } [ ] ; , : ~ @"),
            vec![
                OpenParenToken,
                CloseParenToken,
                OpenBraceToken,
                CloseBraceToken,
                OpenBracketToken,
                CloseBracketToken,
                SemicolonToken,
                CommaToken,
                ColonToken,
                TildeToken,
                AtToken,
            ]
        );
    }

    #[test]
    fn test_scan_compound_operators() {
        use SyntaxKind::*;
        assert_eq!(
            kinds("=== !== => ??= ?. ?.5 **= &&= ||= <<= ..."),
            vec![
                EqualsEqualsEqualsToken,
                ExclamationEqualsEqualsToken,
                EqualsGreaterThanToken,
                QuestionQuestionEqualsToken,
                QuestionDotToken,
                QuestionToken,
                NumericLiteral,
                AsteriskAsteriskEqualsToken,
                AmpersandAmpersandEqualsToken,
                BarBarEqualsToken,
                LessThanLessThanEqualsToken,
                DotDotDotToken,
            ]
        );
    }

    #[test]
    fn test_greater_than_is_split() {
        use SyntaxKind::*;
        assert_eq!(kinds(">>= >"), vec![GreaterThanToken, GreaterThanToken, EqualsToken, GreaterThanToken]);
    }

    #[test]
    fn test_re_scan_greater_token() {
        let mut scanner = Scanner::new("a >>>= b");
        scanner.scan();
        assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
        assert_eq!(
            scanner.re_scan_greater_token(),
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
        );
        assert_eq!(scanner.token_range(), TextRange::new(2, 6));
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    }

    #[test]
    fn test_identifier_and_keyword() {
        let mut scanner = Scanner::new("let café = instanceof");
        assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "café");
        assert_eq!(scanner.scan(), SyntaxKind::EqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::InstanceOfKeyword);
    }

    #[test]
    fn test_escaped_keyword_is_identifier() {
        let mut scanner = Scanner::new("\\u0069f \\u{61}b");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "if");
        assert!(scanner.has_unicode_escape());
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "ab");
    }

    #[test]
    fn test_private_identifier() {
        let mut scanner = Scanner::new("#secret # x");
        assert_eq!(scanner.scan(), SyntaxKind::PrivateIdentifier);
        assert_eq!(scanner.token_value(), "#secret");
        assert_eq!(scanner.scan(), SyntaxKind::Unknown);
        assert_eq!(scanner.diagnostics().len(), 1);
    }

    #[test]
    fn test_string_escapes() {
        let mut scanner = Scanner::new(r#"'a\n\x41B\u{1F600}\101' "plain""#);
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value(), "a\nAB\u{1F600}A");
        assert!(scanner.has_extended_unicode_escape());
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value(), "plain");
        assert!(matches!(scanner.token_value_cow(), Cow::Borrowed(_)));
        assert!(scanner.diagnostics().is_empty());
    }

    #[test]
    fn test_surrogate_pair_escape() {
        let mut scanner = Scanner::new(r#""\uD83D\uDE00""#);
        scanner.scan();
        assert_eq!(scanner.token_value(), "\u{1F600}");
    }

    #[test]
    fn test_unterminated_string_stops_at_line_break() {
        let mut scanner = Scanner::new("\"abc\nx");
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert!(scanner.is_unterminated());
        assert_eq!(scanner.token_value(), "abc");
        assert_eq!(scanner.token_end(), 4);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert!(scanner.has_preceding_line_break());
        assert_eq!(scanner.diagnostics().diagnostics()[0].code(), 1002);
    }

    #[test]
    fn test_extended_escape_out_of_range() {
        let mut scanner = Scanner::new(r#""\u{110000}" "\u{41""#);
        scanner.scan();
        assert_eq!(scanner.diagnostics().diagnostics()[0].code(), 1198);
        scanner.scan();
        assert_eq!(scanner.diagnostics().diagnostics()[1].code(), 1199);
    }

    #[test]
    fn test_number_formats() {
        let mut scanner = Scanner::new("42 3.14 .5 1e10 0xff 0b1010 0o777 1_000 017 09 10n");
        let mut values = Vec::new();
        let mut flags = Vec::new();
        while scanner.scan() != SyntaxKind::EndOfFileToken {
            values.push(scanner.token_value().to_string());
            flags.push(scanner.token_flags());
        }
        assert_eq!(
            values,
            vec!["42", "3.14", ".5", "1e10", "0xff", "0b1010", "0o777", "1_000", "017", "09", "10n"]
        );
        assert!(flags[3].contains(TokenFlags::SCIENTIFIC));
        assert!(flags[4].contains(TokenFlags::HEX_SPECIFIER));
        assert!(flags[7].contains(TokenFlags::CONTAINS_SEPARATOR));
        assert!(flags[8].contains(TokenFlags::OCTAL));
        assert!(flags[9].contains(TokenFlags::CONTAINS_LEADING_ZERO));
        assert!(scanner.diagnostics().is_empty());
    }

    #[test]
    fn test_number_diagnostics() {
        let mut scanner = Scanner::new("1__0 0x 1e 3in");
        while scanner.scan() != SyntaxKind::EndOfFileToken {}
        let codes: Vec<u32> = scanner.diagnostics().diagnostics().iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec![6189, 1125, 1124, 1351]);
    }

    #[test]
    fn test_identifier_after_number_is_rescanned() {
        let mut scanner = Scanner::new("3in");
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), "3");
        assert_eq!(scanner.scan(), SyntaxKind::InKeyword);
    }

    #[test]
    fn test_template_tokens() {
        let mut scanner = Scanner::new("`a${b}c${d}e`");
        assert_eq!(scanner.scan(), SyntaxKind::TemplateHead);
        assert_eq!(scanner.token_value(), "a");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.re_scan_template_token(false), SyntaxKind::TemplateMiddle);
        assert_eq!(scanner.token_value(), "c");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.re_scan_template_token(false), SyntaxKind::TemplateTail);
        assert_eq!(scanner.token_value(), "e");
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_template_normalizes_carriage_returns() {
        let mut scanner = Scanner::new("`a\r\nb\rc`");
        assert_eq!(scanner.scan(), SyntaxKind::NoSubstitutionTemplateLiteral);
        assert_eq!(scanner.token_value(), "a\nb\nc");
    }

    #[test]
    fn test_tagged_template_tolerates_invalid_escapes() {
        let mut scanner = Scanner::new(r"`\u{zz}` ");
        assert_eq!(scanner.scan(), SyntaxKind::NoSubstitutionTemplateLiteral);
        assert!(scanner.token_flags().contains(TokenFlags::CONTAINS_INVALID_ESCAPE));
        assert!(scanner.diagnostics().is_empty());
        scanner.re_scan_template_token(false);
        assert!(!scanner.diagnostics().is_empty());
        assert_eq!(scanner.token_text(), r"`\u{zz}`");

        let mut scanner = Scanner::new(r"x}\u{zz}`");
        scanner.scan();
        scanner.scan();
        assert_eq!(scanner.re_scan_template_token(true), SyntaxKind::TemplateTail);
        assert!(scanner.token_flags().contains(TokenFlags::CONTAINS_INVALID_ESCAPE));
        assert!(scanner.diagnostics().is_empty());
    }

    #[test]
    fn test_re_scan_slash_token() {
        let mut scanner = Scanner::new("/[/]\\/a+/gi.x");
        assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
        assert_eq!(scanner.re_scan_slash_token(), SyntaxKind::RegularExpressionLiteral);
        assert_eq!(scanner.token_text(), "/[/]\\/a+/gi");
        assert_eq!(scanner.scan(), SyntaxKind::DotToken);
    }

    #[test]
    fn test_unterminated_regex() {
        let mut scanner = Scanner::new("/abc\n1");
        scanner.scan();
        assert_eq!(scanner.re_scan_slash_token(), SyntaxKind::RegularExpressionLiteral);
        assert!(scanner.is_unterminated());
        assert_eq!(scanner.token_text(), "/abc");
        assert_eq!(scanner.diagnostics().diagnostics()[0].code(), 1161);
    }

    #[test]
    fn test_comments_set_line_break_flag() {
        let mut scanner = Scanner::new("// comment\nlet /* block */ x /*\n*/ y");
        assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
        assert!(scanner.has_preceding_line_break());
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert!(!scanner.has_preceding_line_break());
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert!(scanner.has_preceding_line_break());
    }

    #[test]
    fn test_unterminated_block_comment() {
        let mut scanner = Scanner::new("a /* never closed");
        scanner.scan();
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
        assert_eq!(scanner.diagnostics().diagnostics()[0].code(), 1010);
    }

    #[test]
    fn test_trivia_mode() {
        use SyntaxKind::*;
        let mut scanner = Scanner::with_trivia("#!/bin/sh\na // c\r\n");
        let mut seen = Vec::new();
        while scanner.scan() != EndOfFileToken {
            seen.push(scanner.token());
        }
        assert_eq!(
            seen,
            vec![ShebangTrivia, NewLineTrivia, Identifier, WhitespaceTrivia, SingleLineCommentTrivia, NewLineTrivia]
        );
    }

    #[test]
    fn test_conflict_markers() {
        let text = "<<<<<<< HEAD\na\n=======\nb\n>>>>>>> branch\n";
        let mut scanner = Scanner::new(text);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_text(), "a");
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
        let codes: Vec<u32> = scanner.diagnostics().diagnostics().iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec![1185, 1185, 1185]);
    }

    #[test]
    fn test_invalid_character_continues() {
        let mut scanner = Scanner::new("a ¤ b");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::Unknown);
        assert_eq!(scanner.token_text(), "¤");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.diagnostics().diagnostics()[0].code(), 1127);
    }

    #[test]
    fn test_look_ahead_and_try_scan() {
        let mut scanner = Scanner::new("let x = 1;");
        scanner.scan();
        let next = scanner.look_ahead(|s| s.scan());
        assert_eq!(next, SyntaxKind::Identifier);
        assert_eq!(scanner.token(), SyntaxKind::LetKeyword);

        let failed: Option<()> = scanner.try_scan(|s| {
            s.scan();
            None
        });
        assert!(failed.is_none());
        assert_eq!(scanner.token(), SyntaxKind::LetKeyword);

        let kept = scanner.try_scan(|s| Some(s.scan()));
        assert_eq!(kept, Some(SyntaxKind::Identifier));
        assert_eq!(scanner.token(), SyntaxKind::Identifier);
    }

    #[test]
    fn test_look_ahead_discards_diagnostics() {
        let mut scanner = Scanner::new("a \"open");
        scanner.scan();
        scanner.look_ahead(|s| s.scan());
        assert!(scanner.diagnostics().is_empty());
    }

    #[test]
    fn test_scan_range_restores_end_bound() {
        let mut scanner = Scanner::new("a /** @param x */ b");
        scanner.scan();
        let inner = scanner.scan_range(5, 7, |s| {
            let mut kinds = Vec::new();
            while s.scan() != SyntaxKind::EndOfFileToken {
                kinds.push(s.token());
            }
            kinds
        });
        assert_eq!(inner, vec![SyntaxKind::AtToken, SyntaxKind::Identifier]);
        assert_eq!(scanner.token_text(), "a");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_text(), "b");
    }

    #[test]
    fn test_jsx_tokens() {
        let mut scanner = Scanner::new("text here{x}</div>");
        assert_eq!(scanner.scan_jsx_token(), SyntaxKind::JsxText);
        assert_eq!(scanner.token_value(), "text here");
        assert_eq!(scanner.scan_jsx_token(), SyntaxKind::OpenBraceToken);
        scanner.scan();
        scanner.scan();
        assert_eq!(scanner.scan_jsx_token(), SyntaxKind::LessThanSlashToken);

        let mut scanner = Scanner::new("\n   <");
        assert_eq!(scanner.scan_jsx_token(), SyntaxKind::JsxTextAllWhiteSpaces);
    }

    #[test]
    fn test_jsx_identifier_and_attribute_value() {
        let mut scanner = Scanner::new("data-foo-bar='a\\nb'");
        scanner.scan();
        assert_eq!(scanner.scan_jsx_identifier(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "data-foo-bar");
        assert_eq!(scanner.scan(), SyntaxKind::EqualsToken);
        assert_eq!(scanner.scan_jsx_attribute_value(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value(), "a\\nb");
    }
}
