//! Text listings of token streams and syntax trees.

use std::fmt::Write;

use tern_ast::visitor::{walk, NodeRef, Visitor};
use tern_ast::SyntaxKind;
use tern_diagnostics::Diagnostic;
use tern_scanner::Scanner;

/// Every token of `text`, trivia included, one per line:
/// `pos..end Kind "text"`. The texts concatenate back to the input.
pub fn list_tokens(text: &str) -> (String, Vec<Diagnostic>) {
    let mut scanner = Scanner::with_trivia(text);
    let mut out = String::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        let range = scanner.token_range();
        let _ = writeln!(
            out,
            "{:>6}..{:<6} {:?} {:?}",
            range.pos,
            range.end,
            kind,
            range.slice(text)
        );
    }
    let diagnostics = scanner.take_diagnostics().diagnostics().to_vec();
    (out, diagnostics)
}

struct TreePrinter<'t> {
    text: &'t str,
    depth: usize,
    out: String,
}

impl<'a> Visitor<'a> for TreePrinter<'_> {
    fn enter(&mut self, node: NodeRef<'a>) -> bool {
        let range = node.range();
        let _ = write!(
            self.out,
            "{:indent$}{:?} [{}, {})",
            "",
            node.kind(),
            range.pos,
            range.end,
            indent = self.depth * 2
        );
        if node.is_missing() {
            self.out.push_str(" missing");
        } else if node.kind() == SyntaxKind::Identifier || node.kind().is_literal() {
            let _ = write!(self.out, " {:?}", range.slice(self.text));
        }
        if node.contains_error() {
            self.out.push_str(" !");
        }
        self.out.push('\n');
        self.depth += 1;
        true
    }

    fn leave(&mut self, _node: NodeRef<'a>) {
        self.depth -= 1;
    }
}

/// An indented outline of the tree under `root`: kind, range, identifier
/// and literal text, `missing` for placeholders and `!` on subtrees that
/// contain an error.
pub fn dump_tree(root: NodeRef<'_>, text: &str) -> String {
    let mut printer = TreePrinter {
        text,
        depth: 0,
        out: String::new(),
    };
    walk(root, &mut printer);
    printer.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use tern_parser::{ParseOptions, Parser};

    #[test]
    fn test_tokens_reconstruct_input() {
        let text = "let a = 1; // done\n/* x */ b";
        let (listing, diagnostics) = list_tokens(text);
        assert!(diagnostics.is_empty());
        let rebuilt: String = listing
            .lines()
            .map(|line| {
                let quoted = &line[line.find('"').unwrap_or(0)..];
                serde_json::from_str::<String>(quoted).unwrap()
            })
            .collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_dump_marks_placeholders() {
        let arena = Bump::new();
        let text = "let x = ;";
        let result = Parser::new(&arena, text, ParseOptions::default()).parse_source_file();
        let dump = dump_tree(result.source_file, text);
        let first = dump.lines().next().unwrap();
        assert!(first.starts_with("SourceFile [0, 9) !"), "{}", dump);
        assert!(dump.contains("Identifier [4, 5) \"x\""), "{}", dump);
        assert!(dump.contains(" missing"), "{}", dump);
    }
}
