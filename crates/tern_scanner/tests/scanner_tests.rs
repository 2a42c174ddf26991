//! Scanner integration tests.
//!
//! Drives the public scanner API the way the parser and tooling do.

use tern_ast::syntax_kind::SyntaxKind;
use tern_ast::types::TokenFlags;
use tern_scanner::{leading_comment_ranges, Scanner, TokenInfo};

/// Helper: scan all tokens from source and return as (kind, value) pairs.
fn scan_all(source: &str) -> Vec<(SyntaxKind, String)> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        tokens.push((kind, scanner.token_value().to_string()));
    }
    tokens
}

/// Helper: scan all token kinds.
fn scan_kinds(source: &str) -> Vec<SyntaxKind> {
    scan_all(source).into_iter().map(|(k, _)| k).collect()
}

#[test]
fn test_empty_source() {
    assert!(scan_all("").is_empty());
}

#[test]
fn test_whitespace_only() {
    assert!(scan_all("   \n\t  \u{2028}\u{00A0}").is_empty());
}

#[test]
fn test_end_of_file_is_sticky() {
    let mut scanner = Scanner::new("x");
    scanner.scan();
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    assert_eq!(scanner.token_range().pos, 1);
}

#[test]
fn test_trivia_mode_round_trips_source() {
    let source = "#!/usr/bin/env node\n/** doc */\nconst x = `a${1}` + 0x1F; // done\r\n";
    let mut scanner = Scanner::with_trivia(source);
    let mut rebuilt = String::new();
    let mut last_end = 0;
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        // Every byte belongs to exactly one token.
        assert_eq!(scanner.token_start(), last_end);
        rebuilt.push_str(scanner.token_text());
        last_end = scanner.token_end();
        if kind == SyntaxKind::CloseBraceToken {
            scanner.re_scan_template_token(false);
            rebuilt.truncate(rebuilt.len() - 1);
            rebuilt.push_str(scanner.token_text());
            last_end = scanner.token_end();
        }
    }
    assert_eq!(rebuilt, source);
}

#[test]
fn test_operators_scan_longest_match() {
    use SyntaxKind::*;
    assert_eq!(
        scan_kinds("a ??= b?.c ** 2 !== d && e || f"),
        vec![
            Identifier,
            QuestionQuestionEqualsToken,
            Identifier,
            QuestionDotToken,
            Identifier,
            AsteriskAsteriskToken,
            NumericLiteral,
            ExclamationEqualsEqualsToken,
            Identifier,
            AmpersandAmpersandToken,
            Identifier,
            BarBarToken,
            Identifier,
        ]
    );
}

#[test]
fn test_divide_is_not_a_regex() {
    use SyntaxKind::*;
    assert_eq!(scan_kinds("a / b / c"), vec![Identifier, SlashToken, Identifier, SlashToken, Identifier]);
}

#[test]
fn test_regex_after_return() {
    let mut scanner = Scanner::new("return /ab+c/i;");
    assert_eq!(scanner.scan(), SyntaxKind::ReturnKeyword);
    assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
    assert_eq!(scanner.re_scan_slash_token(), SyntaxKind::RegularExpressionLiteral);
    assert_eq!(scanner.token_value(), "/ab+c/i");
    assert_eq!(scanner.scan(), SyntaxKind::SemicolonToken);
}

#[test]
fn test_slash_equals_rescans_as_regex() {
    let mut scanner = Scanner::new("/=x/g");
    assert_eq!(scanner.scan(), SyntaxKind::SlashEqualsToken);
    assert_eq!(scanner.re_scan_slash_token(), SyntaxKind::RegularExpressionLiteral);
    assert_eq!(scanner.token_text(), "/=x/g");
}

#[test]
fn test_keywords_and_contextual_keywords() {
    use SyntaxKind::*;
    assert_eq!(
        scan_kinds("type of satisfies instanceof typeof constructor"),
        vec![TypeKeyword, OfKeyword, SatisfiesKeyword, InstanceOfKeyword, TypeOfKeyword, ConstructorKeyword]
    );
}

#[test]
fn test_string_values_are_decoded() {
    let tokens = scan_all(r#"'it\'s' "tab\there" 'line\
continued'"#);
    assert_eq!(tokens[0].1, "it's");
    assert_eq!(tokens[1].1, "tab\there");
    assert_eq!(tokens[2].1, "linecontinued");
}

#[test]
fn test_legacy_octal_escape_in_string_is_silent() {
    let mut scanner = Scanner::new(r"'\101\7'");
    scanner.scan();
    assert_eq!(scanner.token_value(), "A\u{7}");
    assert!(scanner.diagnostics().is_empty());
}

#[test]
fn test_legacy_octal_escape_in_template_is_reported() {
    let mut scanner = Scanner::new(r"`\101`");
    assert_eq!(scanner.scan(), SyntaxKind::NoSubstitutionTemplateLiteral);
    assert!(scanner.token_flags().contains(TokenFlags::CONTAINS_INVALID_ESCAPE));
    scanner.re_scan_template_token(false);
    let diagnostics = scanner.diagnostics().diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code(), 1487);
    assert_eq!(diagnostics[0].message_text(), "Octal escape sequences are not allowed. Use the syntax '\\x41'.");
}

#[test]
fn test_unterminated_template() {
    let mut scanner = Scanner::new("`abc");
    assert_eq!(scanner.scan(), SyntaxKind::NoSubstitutionTemplateLiteral);
    assert!(scanner.is_unterminated());
    assert_eq!(scanner.diagnostics().diagnostics()[0].code(), 1160);
}

#[test]
fn test_numeric_separator_errors() {
    let mut scanner = Scanner::new("1_ _1 1_000_000");
    while scanner.scan() != SyntaxKind::EndOfFileToken {}
    let codes: Vec<u32> = scanner.diagnostics().diagnostics().iter().map(|d| d.code()).collect();
    // `_1` is an identifier.
    assert_eq!(codes, vec![6188]);
}

#[test]
fn test_big_int_literals() {
    let tokens = scan_all("123n 0xFFn 1.5");
    assert_eq!(tokens[0], (SyntaxKind::BigIntLiteral, "123n".to_string()));
    assert_eq!(tokens[1], (SyntaxKind::BigIntLiteral, "0xFFn".to_string()));
    assert_eq!(tokens[2].0, SyntaxKind::NumericLiteral);
}

#[test]
fn test_token_info_snapshot() {
    let mut scanner = Scanner::new("\n  foo");
    scanner.scan();
    let info: TokenInfo<'_> = scanner.token_info();
    assert_eq!(info.kind, SyntaxKind::Identifier);
    assert_eq!((info.pos(), info.end()), (3, 6));
    assert!(info.has_preceding_line_break());
    assert_eq!(scanner.full_start(), 0);
}

#[test]
fn test_save_and_restore_state() {
    let mut scanner = Scanner::new("a b 'open");
    scanner.scan();
    let state = scanner.save_state();
    scanner.scan();
    scanner.scan();
    assert_eq!(scanner.diagnostics().len(), 1);
    scanner.restore_state(state);
    assert_eq!(scanner.token_text(), "a");
    assert!(scanner.diagnostics().is_empty());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_text(), "b");
}

#[test]
fn test_jsdoc_flag() {
    let mut scanner = Scanner::new("/** doc */ x /**/ y");
    scanner.scan();
    assert!(scanner.token_flags().contains(TokenFlags::PRECEDING_JSDOC_COMMENT));
    scanner.scan();
    assert!(!scanner.token_flags().contains(TokenFlags::PRECEDING_JSDOC_COMMENT));
}

#[test]
fn test_comment_ranges_from_public_api() {
    let text = "/* header */\nlet x;";
    let ranges = leading_comment_ranges(text, 0);
    assert_eq!(ranges.len(), 1);
    assert!(ranges[0].has_trailing_new_line);
}
