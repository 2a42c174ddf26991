//! Speculative parsing: snapshot the parser, try a production, and either
//! keep what it built or rewind as if it never ran.

use tern_core::text::TextPos;
use tern_scanner::ScannerState;

use super::Parser;

/// Everything needed to rewind the parser to a token boundary.
#[derive(Debug, Clone)]
pub(super) struct SpeculationCheckpoint<'a> {
    scanner: ScannerState<'a>,
    token_pos: TextPos,
    diagnostics: usize,
    token_diagnostics_start: usize,
    token_diagnostics_len: usize,
    prev_token_end: TextPos,
    last_missing_pos: TextPos,
    last_error_node: Option<u32>,
    node_count: u32,
    error_before_next_finished_node: bool,
}

impl<'a> Parser<'a> {
    pub(super) fn checkpoint(&mut self) -> SpeculationCheckpoint<'a> {
        self.speculation_depth += 1;
        SpeculationCheckpoint {
            scanner: self.scanner.save_state(),
            token_pos: self.token_pos(),
            diagnostics: self.diagnostics.len(),
            token_diagnostics_start: self.token_diagnostics_start,
            token_diagnostics_len: self.token_diagnostics_len,
            prev_token_end: self.prev_token_end,
            last_missing_pos: self.last_missing_pos,
            last_error_node: self.last_error_node,
            node_count: self.node_count,
            error_before_next_finished_node: self.error_before_next_finished_node,
        }
    }

    /// Rewinds to `checkpoint`, dropping the tokens, diagnostics and node
    /// ids produced since.
    pub(super) fn rollback(&mut self, checkpoint: SpeculationCheckpoint<'a>) {
        tracing::trace!(
            offset = self.token_pos(),
            to = checkpoint.token_pos,
            depth = self.speculation_depth,
            "speculation.rollback"
        );
        self.scanner.restore_state(checkpoint.scanner);
        self.diagnostics.truncate(checkpoint.diagnostics);
        self.token_diagnostics_start = checkpoint.token_diagnostics_start;
        self.token_diagnostics_len = checkpoint.token_diagnostics_len;
        self.prev_token_end = checkpoint.prev_token_end;
        self.last_missing_pos = checkpoint.last_missing_pos;
        self.last_error_node = checkpoint.last_error_node;
        self.node_count = checkpoint.node_count;
        self.error_before_next_finished_node = checkpoint.error_before_next_finished_node;
        self.speculation_depth -= 1;
    }

    /// Keeps everything parsed since `checkpoint`.
    pub(super) fn commit(&mut self, checkpoint: SpeculationCheckpoint<'a>) {
        tracing::trace!(
            from = checkpoint.token_pos,
            offset = self.token_pos(),
            depth = self.speculation_depth,
            "speculation.commit"
        );
        self.speculation_depth -= 1;
    }

    /// Runs `f` and always rewinds afterwards.
    pub(super) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let checkpoint = self.checkpoint();
        let result = f(self);
        self.rollback(checkpoint);
        result
    }

    /// Runs `f`, keeping its progress only if it returns `Some`.
    pub(super) fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let checkpoint = self.checkpoint();
        match f(self) {
            Some(value) => {
                self.commit(checkpoint);
                Some(value)
            }
            None => {
                self.rollback(checkpoint);
                None
            }
        }
    }

    /// `look_ahead` from the token after the current one.
    pub(super) fn look_ahead_next<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.look_ahead(|p| {
            p.next_token();
            f(p)
        })
    }
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;
    use tern_ast::syntax_kind::SyntaxKind;

    use crate::options::ParseOptions;
    use crate::parser::Parser;

    #[test]
    fn test_look_ahead_rewinds() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "a b c", ParseOptions::default());
        parser.next_token();
        let third = parser.look_ahead(|p| {
            p.next_token();
            p.next_token();
            p.scanner.token_text()
        });
        assert_eq!(third, "c");
        assert_eq!(parser.scanner.token_text(), "a");
        assert_eq!(parser.speculation_depth, 0);
    }

    #[test]
    fn test_rollback_discards_diagnostics_and_node_ids() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "a ) b", ParseOptions::default());
        parser.next_token();
        let before = parser.node_count;
        let parsed: Option<()> = parser.try_parse(|p| {
            p.parse_identifier();
            p.parse_expected(SyntaxKind::SemicolonToken);
            None
        });
        assert!(parsed.is_none());
        assert!(parser.diagnostics.is_empty());
        assert_eq!(parser.node_count, before);
        assert!(!parser.error_before_next_finished_node);
        assert_eq!(parser.token(), SyntaxKind::Identifier);
    }

    #[test]
    fn test_commit_keeps_progress() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "a b", ParseOptions::default());
        parser.next_token();
        let name = parser.try_parse(|p| Some(p.parse_identifier().text));
        assert_eq!(name, Some("a"));
        assert_eq!(parser.scanner.token_text(), "b");
        assert_eq!(parser.node_count, 1);
    }

    #[test]
    fn test_checkpoints_nest() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "a b c d", ParseOptions::default());
        parser.next_token();
        let outer = parser.checkpoint();
        parser.next_token();
        let inner = parser.checkpoint();
        parser.next_token();
        assert_eq!(parser.speculation_depth, 2);
        parser.rollback(inner);
        assert_eq!(parser.scanner.token_text(), "b");
        parser.next_token();
        parser.next_token();
        parser.rollback(outer);
        assert_eq!(parser.scanner.token_text(), "a");
        assert_eq!(parser.speculation_depth, 0);
    }

    #[test]
    fn test_rollback_restores_lexical_errors_of_the_current_token() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "'open", ParseOptions::default());
        parser.next_token();
        assert_eq!(parser.diagnostics.len(), 1);
        parser.look_ahead(|p| p.next_token());
        assert_eq!(parser.diagnostics.len(), 1);
        assert_eq!(parser.token(), SyntaxKind::StringLiteral);
    }
}
