//! Parser integration tests.
//!
//! Verifies that the parser builds the expected tree shapes from source,
//! through the public API only.

use bumpalo::Bump;
use tern_ast::{Expression, LanguageVariant, Statement, TypeNode};
use tern_parser::{ParseOptions, Parser};

/// Helper: parse with `options` and hand the result to `f`.
fn parse_with<T>(source: &str, options: ParseOptions, f: impl FnOnce(&tern_parser::ParseResult<'_>) -> T) -> T {
    let arena = Bump::new();
    let result = Parser::new(&arena, source, options).parse_source_file();
    f(&result)
}

/// Helper: assert that parsing produces the expected number of top-level
/// statements and no diagnostics.
fn assert_statement_count(source: &str, expected: usize) {
    parse_with(source, ParseOptions::default(), |result| {
        assert!(
            result.diagnostics.is_empty(),
            "source: {}\ndiagnostics: {:?}",
            source,
            result.diagnostics
        );
        assert_eq!(result.source_file.statements.len(), expected, "source: {}", source);
    });
}

fn first_expression<'a>(statements: &[Statement<'a>]) -> Expression<'a> {
    match statements.first() {
        Some(Statement::Expression(statement)) => statement.expression,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

// ============================================================================
// Variable Declarations
// ============================================================================

#[test]
fn test_parse_const_declaration() {
    assert_statement_count("const x = 42;", 1);
}

#[test]
fn test_parse_let_and_var_declarations() {
    assert_statement_count("let y = 'hello'; var z = true;", 2);
}

#[test]
fn test_parse_typed_declaration() {
    assert_statement_count("const x: number = 42;", 1);
}

#[test]
fn test_parse_destructuring_declarations() {
    assert_statement_count("const { a, b: [c, ...d], e = 1 } = obj; let [x, , y] = arr;", 2);
}

#[test]
fn test_parse_using_declarations() {
    assert_statement_count("using res = open(); async function f() { await using h = g(); }", 2);
}

// ============================================================================
// Functions and Classes
// ============================================================================

#[test]
fn test_parse_function_declarations() {
    assert_statement_count("function add(a: number, b: number): number { return a + b; }", 1);
    assert_statement_count("async function fetchData() { return await fetch('url'); }", 1);
    assert_statement_count("function* gen() { yield 1; yield* other(); }", 1);
}

#[test]
fn test_parse_overload_signatures() {
    assert_statement_count("function f(x: string): void; function f(x: number): void; function f(x: any) {}", 3);
}

#[test]
fn test_parse_class_with_members() {
    let source = r#"
        abstract class Shape<T> extends Base<T> implements Drawable {
            private readonly id: number = 0;
            static count = 0;
            #secret?: string;
            [key: string]: unknown;
            constructor(public name: string) { super(); }
            get area(): number { return 0; }
            set area(value: number) {}
            abstract draw(): void;
            static { Shape.count++; }
            ;
        }
    "#;
    parse_with(source, ParseOptions::default(), |result| {
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        let Some(Statement::Class(class)) = result.source_file.statements.first() else {
            panic!("expected class declaration");
        };
        assert_eq!(class.name.map(|n| n.text), Some("Shape"));
        assert_eq!(class.heritage_clauses.len(), 2);
        assert_eq!(class.members.len(), 10);
    });
}

#[test]
fn test_parse_decorated_class() {
    assert_statement_count("@component({ selector: 'x' }) export class Widget { @input() value = 1; }", 1);
}

// ============================================================================
// Interfaces, Type Aliases, Enums, Namespaces
// ============================================================================

#[test]
fn test_parse_interface() {
    assert_statement_count(
        "interface Point extends Base { readonly x: number; y?: number; (a: string): void; new (): Point; [k: string]: any; m<T>(): T; }",
        1,
    );
}

#[test]
fn test_parse_type_aliases() {
    assert_statement_count(
        r#"
        type A = string | number;
        type B<T> = { [K in keyof T]?: T[K] };
        type C<T> = T extends (infer U)[] ? U : never;
        type D = [first: string, second?: number, ...rest: boolean[]];
        type E = `prefix-${string}`;
        type F = typeof import("./mod");
        type G = new (...args: any[]) => object;
        "#,
        7,
    );
}

#[test]
fn test_type_alias_union_shape() {
    parse_with("type T = | A | B & C;", ParseOptions::default(), |result| {
        let Some(Statement::TypeAlias(alias)) = result.source_file.statements.first() else {
            panic!("expected type alias");
        };
        let TypeNode::UnionOrIntersection(union) = alias.type_node else {
            panic!("expected union");
        };
        assert_eq!(union.types.len(), 2);
        assert!(matches!(union.types[1], TypeNode::UnionOrIntersection(_)));
    });
}

#[test]
fn test_parse_enums() {
    assert_statement_count("enum Color { Red, Green = 'g', Blue = 1 << 2, } const enum E { A }", 2);
}

#[test]
fn test_parse_namespaces() {
    assert_statement_count(
        "namespace A.B.C { export const x = 1; } declare module 'pkg' { export function f(): void; } declare global { interface Window {} }",
        3,
    );
}

// ============================================================================
// Imports and Exports
// ============================================================================

#[test]
fn test_parse_imports() {
    assert_statement_count(
        r#"
        import def from "a";
        import * as ns from "b";
        import { x, y as z, type T } from "c";
        import type { U } from "d";
        import "side-effect";
        import fs = require("fs");
        "#,
        6,
    );
}

#[test]
fn test_parse_exports() {
    assert_statement_count(
        r#"
        export { a, b as c };
        export * from "m";
        export * as ns from "m";
        export default function () {}
        export = value;
        export type { T } from "t";
        "#,
        6,
    );
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_parse_control_flow() {
    assert_statement_count(
        r#"
        if (a) b(); else { c(); }
        do { x--; } while (x > 0);
        while (true) break;
        for (let i = 0; i < n; i++) continue;
        for (const k in obj) {}
        for (const v of list) {}
        switch (x) { case 1: f(); break; default: g(); }
        outer: for (;;) { break outer; }
        try { risky(); } catch (e) { throw e; } finally { done(); }
        debugger;
        "#,
        10,
    );
}

#[test]
fn test_for_await_of() {
    assert_statement_count("async function f() { for await (const x of xs) {} }", 1);
}

#[test]
fn test_automatic_semicolon_insertion() {
    assert_statement_count("let a = 1\nlet b = 2\nreturnValue()\n", 3);
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_parse_expressions() {
    assert_statement_count(
        r#"
        a = b ? c : d;
        x ??= y || z && w;
        obj?.prop?.[key]?.(arg)!;
        new Foo<T>(1, ...rest);
        tag`hello ${world}`;
        value as unknown satisfies Shape;
        import.meta.url;
        await import("./lazy");
        ({ a, b: 1, [c]: 2, d() {}, get e() { return 1; }, ...f });
        [1, , 3, ...more];
        (async (x: number): Promise<void> => {})();
        /re+gex/g.test(s);
        "#,
        12,
    );
}

#[test]
fn test_binary_precedence_shape() {
    parse_with("a + b * c - d;", ParseOptions::default(), |result| {
        let Expression::Binary(outer) = first_expression(result.source_file.statements) else {
            panic!("expected binary");
        };
        assert_eq!(outer.operator_token.data.kind, tern_ast::SyntaxKind::MinusToken);
        let Expression::Binary(left) = outer.left else {
            panic!("expected binary");
        };
        assert_eq!(left.operator_token.data.kind, tern_ast::SyntaxKind::PlusToken);
        assert!(matches!(left.right, Expression::Binary(_)));
    });
}

#[test]
fn test_conditional_expression_shape() {
    parse_with("a ? b : c ? d : e;", ParseOptions::default(), |result| {
        let Expression::Conditional(conditional) = first_expression(result.source_file.statements) else {
            panic!("expected conditional");
        };
        assert!(matches!(conditional.when_true, Expression::Identifier(_)));
        assert!(matches!(conditional.when_false, Expression::Conditional(_)));
    });
}

#[test]
fn test_jsx_in_jsx_variant() {
    let options = ParseOptions {
        language_variant: LanguageVariant::Jsx,
        ..ParseOptions::default()
    };
    parse_with(
        r#"const view = <App title="x" {...props}><span>{count}</span><></></App>;"#,
        options,
        |result| {
            assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
            assert_eq!(result.source_file.statements.len(), 1);
        },
    );
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn test_omitted_condition_parens_option() {
    let source = "if x { y(); } while x { z(); }";
    parse_with(source, ParseOptions::default(), |result| assert!(result.has_errors()));
    let loose = ParseOptions {
        allow_omitted_condition_parens: true,
        ..ParseOptions::default()
    };
    parse_with(source, loose, |result| {
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        assert_eq!(result.source_file.statements.len(), 2);
    });
}

#[test]
fn test_omitted_semicolons_option() {
    let source = "a = 1 b = 2";
    parse_with(source, ParseOptions::default(), |result| {
        let codes: Vec<u32> = result.diagnostics.iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec![1005]);
    });
    let loose = ParseOptions {
        allow_omitted_semicolons: true,
        ..ParseOptions::default()
    };
    parse_with(source, loose, |result| {
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        assert_eq!(result.source_file.statements.len(), 2);
    });
}

#[test]
fn test_bare_try_option() {
    let source = "try { f(); }";
    parse_with(source, ParseOptions::default(), |result| {
        let codes: Vec<u32> = result.diagnostics.iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec![1472]);
    });
    let loose = ParseOptions {
        allow_bare_try: true,
        ..ParseOptions::default()
    };
    parse_with(source, loose, |result| assert!(result.diagnostics.is_empty()));
}
