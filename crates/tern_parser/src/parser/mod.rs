//! The parser: recursive descent over a pull-based scanner.
//!
//! Productions live in the submodules. This module owns what they share:
//! the token cursor, diagnostics, node bookkeeping and the grammar context.

mod declarations;
mod expressions;
mod jsx;
mod list;
mod speculation;
mod statements;
mod types;

use std::borrow::Cow;

use bumpalo::Bump;
use tern_ast::node::*;
use tern_ast::syntax_kind::SyntaxKind;
use tern_ast::types::*;
use tern_core::intern::StringInterner;
use tern_core::text::{TextPos, TextRange};
use tern_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage, DiagnosticSink};
use tern_scanner::Scanner;

use crate::options::ParseOptions;
use crate::token_table::attrs;

use list::ListContext;

/// Maximum recursion depth to prevent stack overflow on deeply nested input.
const MAX_RECURSION_DEPTH: u32 = 200;

/// What a parse produces. The tree borrows the arena passed to
/// [`Parser::new`] and the source text.
#[derive(Debug)]
pub struct ParseResult<'a> {
    pub source_file: &'a SourceFile<'a>,
    /// Lexical and syntactic diagnostics in the order they were reported.
    pub diagnostics: Vec<Diagnostic>,
    pub interner: StringInterner,
}

impl<'a> ParseResult<'a> {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Where a node began: its first token's start and the diagnostics count
/// at that token.
#[derive(Debug, Clone, Copy)]
struct NodeStart {
    pos: TextPos,
    diagnostics: usize,
    /// Id the node's first descendant gets (or got).
    first_node: u32,
    inherits_error: bool,
}

/// The parser produces a `SourceFile` from source text.
pub struct Parser<'a> {
    arena: &'a Bump,
    source: &'a str,
    scanner: Scanner<'a>,
    options: ParseOptions,
    interner: StringInterner,
    diagnostics: DiagnosticCollection,
    context_flags: NodeFlags,
    /// Bit set of the list contexts currently being parsed.
    parsing_contexts: u32,
    node_count: u32,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    recursion_depth: u32,
    speculation_depth: u32,
    /// Diagnostics count just before the current token's lexical errors.
    token_diagnostics_start: usize,
    /// Number of lexical errors reported while scanning the current token.
    token_diagnostics_len: usize,
    /// End of the last consumed token.
    prev_token_end: TextPos,
    /// Position of the most recent placeholder. Enclosing nodes extend
    /// their end to it so they contain it.
    last_missing_pos: TextPos,
    /// Id of the most recently finished node flagged with an error.
    last_error_node: Option<u32>,
    error_before_next_finished_node: bool,
}

impl<'a> Parser<'a> {
    pub fn new(arena: &'a Bump, source: &'a str, options: ParseOptions) -> Self {
        Self::with_interner(arena, source, options, StringInterner::new())
    }

    /// A parser that interns names into an existing (possibly shared)
    /// interner.
    pub fn with_interner(arena: &'a Bump, source: &'a str, options: ParseOptions, interner: StringInterner) -> Self {
        Self {
            arena,
            source,
            scanner: Scanner::new(source),
            options,
            interner,
            diagnostics: DiagnosticCollection::new(),
            context_flags: NodeFlags::NONE,
            parsing_contexts: 0,
            node_count: 0,
            recursion_depth: 0,
            speculation_depth: 0,
            token_diagnostics_start: 0,
            token_diagnostics_len: 0,
            prev_token_end: 0,
            last_missing_pos: 0,
            last_error_node: None,
            error_before_next_finished_node: false,
        }
    }

    pub fn parse_source_file(mut self) -> ParseResult<'a> {
        let _span = tracing::debug_span!("parse_source_file", len = self.source.len()).entered();

        self.next_token();
        let start = self.node_start();
        let statements = self.parse_list(ListContext::SourceElements, Self::parse_statement);

        let eof_start = self.node_start();
        let end_of_file_token = Token {
            data: self.finish_node(SyntaxKind::EndOfFileToken, eof_start),
        };

        let mut data = self.finish_node(SyntaxKind::SourceFile, start);
        data.range = TextRange::new(0, self.source.len() as TextPos);
        data.flags.remove(NodeFlags::THIS_NODE_HAS_ERROR | NodeFlags::THIS_NODE_OR_ANY_SUB_NODES_HAS_ERROR);
        if !self.diagnostics.is_empty() {
            data.flags |= NodeFlags::THIS_NODE_OR_ANY_SUB_NODES_HAS_ERROR;
        }

        let source_file = self.arena.alloc(SourceFile {
            data,
            statements,
            end_of_file_token,
            text: self.source,
            language_variant: self.options.language_variant,
        });

        tracing::debug!(
            nodes = self.node_count,
            diagnostics = self.diagnostics.len(),
            "parsed source file"
        );

        ParseResult {
            source_file,
            diagnostics: self.diagnostics.into_diagnostics(),
            interner: self.interner,
        }
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    fn token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    #[inline]
    fn token_pos(&self) -> TextPos {
        self.scanner.token_start()
    }

    #[inline]
    fn token_value(&self) -> &str {
        self.scanner.token_value()
    }

    #[inline]
    fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.token_end();
        self.scanner.scan();
        self.absorb_token_diagnostics();
        self.token()
    }

    /// Moves the scanner's lexical errors for a freshly scanned token into
    /// the parse diagnostics.
    fn absorb_token_diagnostics(&mut self) {
        self.token_diagnostics_start = self.diagnostics.len();
        self.scanner.drain_diagnostics_into(&mut self.diagnostics);
        self.token_diagnostics_len = self.diagnostics.len() - self.token_diagnostics_start;
    }

    /// Same, for a rescan of the current token.
    fn absorb_rescan_diagnostics(&mut self) {
        let before = self.diagnostics.len();
        self.scanner.drain_diagnostics_into(&mut self.diagnostics);
        if before == self.token_diagnostics_start + self.token_diagnostics_len {
            self.token_diagnostics_len = self.diagnostics.len() - self.token_diagnostics_start;
        }
    }

    fn re_scan_greater_token(&mut self) -> SyntaxKind {
        self.scanner.re_scan_greater_token();
        self.token()
    }

    fn re_scan_slash_token(&mut self) -> SyntaxKind {
        self.scanner.re_scan_slash_token();
        self.absorb_rescan_diagnostics();
        self.token()
    }

    fn re_scan_template_token(&mut self, is_tagged_template: bool) -> SyntaxKind {
        self.scanner.re_scan_template_token(is_tagged_template);
        self.absorb_rescan_diagnostics();
        self.token()
    }

    /// Token text as an arena string: borrowed from the source when no
    /// escapes were decoded.
    fn token_value_in_arena(&self) -> &'a str {
        match self.scanner.token_value_cow() {
            Cow::Borrowed(text) => text,
            Cow::Owned(text) => self.arena.alloc_str(&text),
        }
    }

    fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.token() == kind {
            self.next_token();
            return true;
        }
        self.error_at_current_token(&messages::_0_EXPECTED, &[kind.display_name()]);
        false
    }

    /// Like `parse_expected`, keeping the token as a node. A missing token
    /// becomes a zero-width `MISSING` token.
    fn parse_expected_token(&mut self, kind: SyntaxKind) -> Token {
        if self.token() == kind {
            return self.parse_token_node();
        }
        self.error_at_current_token(&messages::_0_EXPECTED, &[kind.display_name()]);
        Token {
            data: self.missing_node_data(kind),
        }
    }

    /// `parse_expected` with a message other than `'{0}' expected.`.
    fn parse_expected_with_message(&mut self, kind: SyntaxKind, message: &'static DiagnosticMessage) -> bool {
        if self.token() == kind {
            self.next_token();
            return true;
        }
        self.error_at_current_token(message, &[]);
        false
    }

    fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.token() == kind {
            self.next_token();
            true
        } else {
            false
        }
    }

    fn parse_optional_token(&mut self, kind: SyntaxKind) -> Option<Token> {
        if self.token() == kind {
            Some(self.parse_token_node())
        } else {
            None
        }
    }

    /// Consumes the current token as a token node.
    fn parse_token_node(&mut self) -> Token {
        let start = self.node_start();
        let kind = self.token();
        self.next_token();
        Token {
            data: self.finish_node(kind, start),
        }
    }

    fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.has_preceding_line_break()
    }

    fn try_parse_semicolon(&mut self) -> bool {
        if !self.can_parse_semicolon() {
            return false;
        }
        self.parse_optional(SyntaxKind::SemicolonToken);
        true
    }

    fn parse_semicolon(&mut self) -> bool {
        if self.try_parse_semicolon() {
            return true;
        }
        if self.options.allow_omitted_semicolons && self.is_start_of_statement() {
            return true;
        }
        self.parse_expected(SyntaxKind::SemicolonToken)
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    fn error_at_current_token(&mut self, message: &'static DiagnosticMessage, args: &[&str]) {
        let range = self.scanner.token_range();
        self.error_at_range(range, message, args);
    }

    /// Reports unless the previous diagnostic starts at the same position,
    /// so one bad token yields one error.
    fn error_at_range(&mut self, range: TextRange, message: &'static DiagnosticMessage, args: &[&str]) {
        let duplicate = self
            .diagnostics
            .diagnostics()
            .last()
            .is_some_and(|last| last.range.pos == range.pos);
        if !duplicate {
            self.diagnostics.report(range, message, args);
        }
        self.error_before_next_finished_node = true;
    }

    /// Whether a diagnostic was reported since `mark`, ignoring the lexical
    /// errors of the current (not yet consumed) token.
    fn has_error_since(&self, mark: usize) -> bool {
        let token_errors_end = self.token_diagnostics_start + self.token_diagnostics_len;
        mark < self.token_diagnostics_start || self.diagnostics.len() > token_errors_end
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    fn node_start(&self) -> NodeStart {
        NodeStart {
            pos: self.token_pos(),
            diagnostics: self.token_diagnostics_start,
            first_node: self.node_count,
            inherits_error: false,
        }
    }

    /// Start of a node whose first child was parsed before the node itself
    /// was known (binary operands, call targets, ...).
    fn node_start_at(&self, first_child: &NodeData) -> NodeStart {
        NodeStart {
            pos: first_child.pos(),
            diagnostics: self.token_diagnostics_start,
            first_node: first_child.id.0 + 1,
            inherits_error: first_child.contains_error(),
        }
    }

    fn next_node_id(&mut self) -> NodeId {
        let id = NodeId(self.node_count);
        self.node_count += 1;
        id
    }

    /// Closes a node at the end of the last consumed token. A node that
    /// consumed nothing is zero-width at the current token, and enclosing
    /// nodes are stretched to cover it.
    fn finish_node(&mut self, kind: SyntaxKind, start: NodeStart) -> NodeData {
        if self.prev_token_end < start.pos {
            self.last_missing_pos = start.pos;
        }
        let mut end = self.prev_token_end.max(start.pos);
        if self.last_missing_pos > end {
            end = self.last_missing_pos;
        }
        let mut data = NodeData::new(kind, start.pos, end);
        data.id = self.next_node_id();
        data.flags = self.context_flags & NodeFlags::CONTEXT_FLAGS;
        if self.error_before_next_finished_node {
            self.error_before_next_finished_node = false;
            data.flags |= NodeFlags::THIS_NODE_HAS_ERROR | NodeFlags::THIS_NODE_OR_ANY_SUB_NODES_HAS_ERROR;
        }
        let child_has_error = self.last_error_node.is_some_and(|id| id >= start.first_node);
        if start.inherits_error || child_has_error || self.has_error_since(start.diagnostics) {
            data.flags |= NodeFlags::THIS_NODE_OR_ANY_SUB_NODES_HAS_ERROR;
        }
        if data.contains_error() {
            self.last_error_node = Some(data.id.0);
        }
        data
    }

    /// A zero-width placeholder at the current token.
    fn missing_node_data(&mut self, kind: SyntaxKind) -> NodeData {
        let start = self.node_start();
        let mut data = self.finish_node(kind, start);
        data.range = TextRange::empty(start.pos);
        self.last_missing_pos = start.pos;
        self.last_error_node = Some(data.id.0);
        data.flags |=
            NodeFlags::MISSING | NodeFlags::THIS_NODE_HAS_ERROR | NodeFlags::THIS_NODE_OR_ANY_SUB_NODES_HAS_ERROR;
        data
    }

    #[inline]
    fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    fn alloc_slice<T>(&self, items: Vec<T>) -> &'a [T] {
        if items.is_empty() {
            return &[];
        }
        self.arena.alloc_slice_fill_iter(items)
    }

    /// `Some(slice)` for a non-empty list, `None` otherwise.
    fn alloc_optional_slice<T>(&self, items: Vec<T>) -> Option<&'a [T]> {
        if items.is_empty() {
            None
        } else {
            Some(self.alloc_slice(items))
        }
    }

    // ========================================================================
    // Identifiers and literals
    // ========================================================================

    /// Whether the current token can be used as an identifier here.
    fn is_identifier(&self) -> bool {
        match self.token() {
            SyntaxKind::Identifier => true,
            SyntaxKind::YieldKeyword if self.in_yield_context() => false,
            SyntaxKind::AwaitKeyword if self.in_await_context() => false,
            kind => kind.is_identifier_or_contextual_keyword(),
        }
    }

    /// Consumes the current token as an identifier if `is_identifier`;
    /// otherwise reports and returns a missing identifier.
    fn create_identifier(
        &mut self,
        is_identifier: bool,
        message: Option<&'static DiagnosticMessage>,
    ) -> &'a Identifier<'a> {
        if is_identifier {
            let start = self.node_start();
            let kind = self.token();
            let text = self.token_value_in_arena();
            self.next_token();
            let data = self.finish_node(SyntaxKind::Identifier, start);
            return self.alloc(Identifier {
                data,
                name: self.interner.intern(text),
                text,
                original_keyword_kind: (kind != SyntaxKind::Identifier).then_some(kind),
            });
        }

        let default_message = if attrs(self.token()).is_reserved_word() {
            &messages::IDENTIFIER_EXPECTED_0_IS_A_RESERVED_WORD_THAT_CANNOT_BE_USED_HERE
        } else {
            &messages::IDENTIFIER_EXPECTED
        };
        let text = self.scanner.token_text();
        self.error_at_current_token(message.unwrap_or(default_message), &[text]);
        self.create_missing_identifier()
    }

    /// A zero-width identifier with empty text; the caller reports.
    fn create_missing_identifier(&mut self) -> &'a Identifier<'a> {
        let data = self.missing_node_data(SyntaxKind::Identifier);
        self.alloc(Identifier {
            data,
            name: self.interner.intern(""),
            text: "",
            original_keyword_kind: None,
        })
    }

    fn parse_identifier(&mut self) -> &'a Identifier<'a> {
        let is_identifier = self.is_identifier();
        self.create_identifier(is_identifier, None)
    }

    fn parse_identifier_with_message(&mut self, message: &'static DiagnosticMessage) -> &'a Identifier<'a> {
        let is_identifier = self.is_identifier();
        self.create_identifier(is_identifier, Some(message))
    }

    /// Identifier or any keyword, as after `.` or in property names.
    fn parse_identifier_name(&mut self) -> &'a Identifier<'a> {
        let is_identifier = self.token().is_identifier_or_keyword();
        self.create_identifier(is_identifier, None)
    }

    fn parse_private_identifier(&mut self) -> &'a PrivateIdentifier<'a> {
        let start = self.node_start();
        let text = self.token_value_in_arena();
        self.next_token();
        let data = self.finish_node(SyntaxKind::PrivateIdentifier, start);
        self.alloc(PrivateIdentifier {
            data,
            name: self.interner.intern(text),
            text,
        })
    }

    /// Numeric, bigint, string, regex and template literal tokens.
    fn parse_literal_node(&mut self) -> &'a LiteralExpression<'a> {
        let start = self.node_start();
        let kind = self.token();
        let text = self.token_value_in_arena();
        let token_flags = self
            .scanner
            .token_flags()
            .difference(TokenFlags::PRECEDING_LINE_BREAK | TokenFlags::PRECEDING_JSDOC_COMMENT);
        self.next_token();
        let data = self.finish_node(kind, start);
        self.alloc(LiteralExpression { data, text, token_flags })
    }

    // ========================================================================
    // Context
    // ========================================================================

    #[inline]
    fn in_context(&self, flags: NodeFlags) -> bool {
        self.context_flags.intersects(flags)
    }

    #[inline]
    fn in_yield_context(&self) -> bool {
        self.in_context(NodeFlags::YIELD_CONTEXT)
    }

    #[inline]
    fn in_await_context(&self) -> bool {
        self.in_context(NodeFlags::AWAIT_CONTEXT)
    }

    #[inline]
    fn in_disallow_in_context(&self) -> bool {
        self.in_context(NodeFlags::DISALLOW_IN_CONTEXT)
    }

    #[inline]
    fn in_decorator_context(&self) -> bool {
        self.in_context(NodeFlags::DECORATOR_CONTEXT)
    }

    #[inline]
    fn in_disallow_conditional_types_context(&self) -> bool {
        self.in_context(NodeFlags::DISALLOW_CONDITIONAL_TYPES_CONTEXT)
    }

    /// Runs `f` with `flags` turned on or off, restoring the context after.
    fn with_context<T>(&mut self, flags: NodeFlags, enabled: bool, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.context_flags;
        self.context_flags.set(flags, enabled);
        let result = f(self);
        self.context_flags = saved;
        result
    }

    fn allow_in_and<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.with_context(NodeFlags::DISALLOW_IN_CONTEXT, false, f)
    }

    fn disallow_in_and<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.with_context(NodeFlags::DISALLOW_IN_CONTEXT, true, f)
    }

    // ========================================================================
    // Recursion guard
    // ========================================================================

    /// Enters one level of nesting, or reports and refuses once the limit
    /// is reached.
    fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            self.error_at_current_token(&messages::MAXIMUM_NESTING_DEPTH_EXCEEDED, &[]);
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    #[inline]
    fn exit_recursion(&mut self) {
        self.recursion_depth -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_parser<T>(source: &str, f: impl FnOnce(&mut Parser<'_>) -> T) -> T {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, source, ParseOptions::default());
        parser.next_token();
        f(&mut parser)
    }

    #[test]
    fn test_finish_node_covers_consumed_tokens() {
        with_parser("foo  bar", |parser| {
            let start = parser.node_start();
            parser.next_token();
            let data = parser.finish_node(SyntaxKind::ExpressionStatement, start);
            assert_eq!(data.range, TextRange::new(0, 3));
            assert!(!data.contains_error());
            assert_eq!(data.id, NodeId(0));
        });
    }

    #[test]
    fn test_missing_node_is_zero_width() {
        with_parser("a )", |parser| {
            parser.next_token();
            let data = parser.missing_node_data(SyntaxKind::Identifier);
            assert_eq!(data.range, TextRange::empty(2));
            assert!(data.is_missing());
            assert!(data.contains_error());
        });
    }

    #[test]
    fn test_enclosing_node_extends_over_placeholder() {
        with_parser("a =  ;", |parser| {
            let start = parser.node_start();
            parser.next_token();
            parser.next_token();
            let missing = parser.missing_node_data(SyntaxKind::Identifier);
            let data = parser.finish_node(SyntaxKind::BinaryExpression, start);
            assert_eq!(missing.range, TextRange::empty(5));
            assert_eq!(data.range, TextRange::new(0, 5));
        });
    }

    #[test]
    fn test_empty_node_after_trivia_stretches_its_parent() {
        with_parser("try  ", |parser| {
            let start = parser.node_start();
            parser.next_token();
            let inner = parser.node_start();
            let empty = parser.finish_node(SyntaxKind::Block, inner);
            let data = parser.finish_node(SyntaxKind::TryStatement, start);
            assert_eq!(empty.range, TextRange::empty(5));
            assert_eq!(data.range, TextRange::new(0, 5));
        });
    }

    #[test]
    fn test_errors_mark_open_nodes() {
        with_parser("a b", |parser| {
            let outer = parser.node_start();
            let inner = parser.node_start();
            parser.next_token();
            let inner_data = parser.finish_node(SyntaxKind::Identifier, inner);
            parser.parse_expected(SyntaxKind::SemicolonToken);
            let outer_data = parser.finish_node(SyntaxKind::ExpressionStatement, outer);
            assert!(!inner_data.contains_error());
            assert!(outer_data.contains_error());
            assert!(outer_data.flags.contains(NodeFlags::THIS_NODE_HAS_ERROR));
        });
    }

    #[test]
    fn test_lexical_errors_belong_to_their_token() {
        with_parser("x 'open", |parser| {
            let start = parser.node_start();
            parser.next_token();
            // The unterminated string is the current token, not part of `x`.
            let data = parser.finish_node(SyntaxKind::Identifier, start);
            assert!(!data.contains_error());
            let start = parser.node_start();
            parser.next_token();
            let data = parser.finish_node(SyntaxKind::StringLiteral, start);
            assert!(data.contains_error());
        });
    }

    #[test]
    fn test_duplicate_errors_at_same_position_are_dropped() {
        with_parser(")", |parser| {
            parser.parse_expected(SyntaxKind::SemicolonToken);
            parser.parse_expected(SyntaxKind::CommaToken);
            assert_eq!(parser.diagnostics.len(), 1);
        });
    }

    #[test]
    fn test_context_is_restored() {
        with_parser("", |parser| {
            let inside = parser.with_context(NodeFlags::AWAIT_CONTEXT, true, |p| p.in_await_context());
            assert!(inside);
            assert!(!parser.in_await_context());
        });
    }

    #[test]
    fn test_entry_predicates_agree_with_token_table() {
        for &kind in SyntaxKind::TOKENS {
            let Some(text) = kind.text() else { continue };
            let source = format!("{text} x");
            with_parser(&source, |parser| {
                if parser.token() != kind {
                    return;
                }
                let row = attrs(kind);
                let identifier_like = kind.is_identifier_or_contextual_keyword();
                if parser.is_start_of_declaration() {
                    assert!(row.can_start_declaration(), "{kind:?} starts a declaration");
                }
                if parser.is_start_of_operand() {
                    assert!(row.can_start_expression(), "{kind:?} starts an expression");
                }
                if parser.is_start_of_left_hand_side_expression() && kind != SyntaxKind::ImportKeyword {
                    assert!(row.can_start_left_hand_side() || identifier_like, "{kind:?} starts a call target");
                }
                if row.can_start_left_hand_side() {
                    assert!(parser.is_start_of_left_hand_side_expression(), "{kind:?} has a left-hand-side row");
                    assert!(row.can_start_expression(), "{kind:?} is missing its expression row");
                }
            });
        }
    }

    #[test]
    fn test_identifier_rules_follow_context() {
        with_parser("await", |parser| {
            assert!(parser.is_identifier());
            let in_async = parser.with_context(NodeFlags::AWAIT_CONTEXT, true, |p| p.is_identifier());
            assert!(!in_async);
        });
    }
}
