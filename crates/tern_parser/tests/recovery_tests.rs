//! Error recovery: malformed input always yields a complete tree, one
//! diagnostic per problem, and error flags on exactly the affected
//! subtrees.

use bumpalo::Bump;
use tern_ast::{AstNode, BindingName, Expression, Statement};
use tern_parser::{ParseOptions, ParseResult, Parser};

fn parse<T>(source: &str, f: impl FnOnce(&ParseResult<'_>) -> T) -> T {
    let arena = Bump::new();
    let result = Parser::new(&arena, source, ParseOptions::default()).parse_source_file();
    assert_eq!(result.source_file.data.range.pos, 0);
    assert_eq!(result.source_file.data.range.end as usize, source.len());
    f(&result)
}

fn codes(result: &ParseResult<'_>) -> Vec<u32> {
    result.diagnostics.iter().map(|d| d.code()).collect()
}

#[test]
fn test_missing_initializer_is_a_placeholder() {
    parse("let x = ;", |result| {
        assert_eq!(codes(result), vec![1109]);
        assert_eq!(result.diagnostics[0].message_text(), "Expression expected.");

        let Some(Statement::Variable(statement)) = result.source_file.statements.first() else {
            panic!("expected variable statement");
        };
        let declaration = &statement.declaration_list.declarations[0];
        assert!(matches!(declaration.name, BindingName::Identifier(id) if id.text == "x"));
        let Some(initializer) = declaration.initializer else {
            panic!("expected a placeholder initializer");
        };
        assert!(initializer.is_missing());
        assert!(initializer.contains_error());
        assert!(declaration.data.contains_error());
        assert!(result.source_file.data.contains_error());
    });
}

#[test]
fn test_error_flag_stays_in_the_broken_statement() {
    parse("let ok = 1;\nlet bad = ;\nlet fine = 2;", |result| {
        let statements = result.source_file.statements;
        assert_eq!(statements.len(), 3);
        assert!(!statements[0].contains_error());
        assert!(statements[1].contains_error());
        assert!(!statements[2].contains_error());
    });
}

#[test]
fn test_missing_operand() {
    parse("a +", |result| {
        assert_eq!(codes(result), vec![1109]);
        let Some(Statement::Expression(statement)) = result.source_file.statements.first() else {
            panic!("expected expression statement");
        };
        let Expression::Binary(binary) = statement.expression else {
            panic!("expected binary");
        };
        assert!(binary.right.is_missing());
    });
}

#[test]
fn test_stray_close_brace_at_top_level() {
    parse("}", |result| {
        assert_eq!(codes(result), vec![1128]);
        assert!(result.source_file.statements.is_empty());
    });
}

#[test]
fn test_unclosed_block() {
    parse("function f() {", |result| {
        assert_eq!(codes(result), vec![1005]);
        assert_eq!(result.diagnostics[0].message_text(), "'}' expected.");
        assert_eq!(result.source_file.statements.len(), 1);
    });
}

#[test]
fn test_lexical_error_is_reported_once() {
    parse("let s = 'abc", |result| {
        assert_eq!(codes(result), vec![1002]);
    });
}

#[test]
fn test_missing_type_after_colon() {
    parse("let x: = 1;", |result| {
        assert_eq!(codes(result), vec![1110]);
    });
}

#[test]
fn test_missing_catch_or_finally() {
    parse("try {}", |result| {
        assert_eq!(codes(result), vec![1472]);
    });
}

#[test]
fn test_keyword_as_identifier_is_reported() {
    parse("let class = 1;", |result| {
        assert!(result.has_errors());
    });
}

#[test]
fn test_misspelled_keyword_is_reported_as_unexpected_identifier() {
    parse("declar function f() {}", |result| {
        assert_eq!(codes(result)[0], 1434);
    });
}

#[test]
fn test_garbage_input_terminates() {
    let inputs = [
        "@@@ ### !!! ) ] }",
        "class { ( [ <",
        "function ( => <T",
        "if (",
        "a ? : ;",
        "x = { a: , b: [ , }",
        "type T = <",
        "for (let of of of) {",
        "<div>",
        "`${",
        "import { from",
        "enum { , }",
    ];
    for input in inputs {
        parse(input, |result| {
            assert!(result.has_errors(), "input: {}", input);
        });
    }
}

#[test]
fn test_deep_nesting_reports_instead_of_overflowing() {
    let handle = std::thread::Builder::new()
        .stack_size(16 * 1024 * 1024)
        .spawn(|| {
            let depth = 5_000;
            let source = format!("{}1{};", "(".repeat(depth), ")".repeat(depth));
            parse(&source, |result| {
                assert!(codes(result).contains(&1000));
            });
        })
        .unwrap();
    handle.join().unwrap();
}
