//! Tree shape invariants, checked over well-formed and malformed input:
//!
//! - the root spans the whole source;
//! - children are contained in their parent and never overlap each other;
//! - every node is reachable exactly once and has a unique id;
//! - placeholders are zero-width and flagged as errors.

use bumpalo::Bump;
use tern_ast::visitor::{children, walk, NodeRef, Visitor};
use tern_ast::{AstNode, NodeId, ParentMap};
use tern_parser::{ParseOptions, Parser};

const SOURCES: &[&str] = &[
    "",
    "   \n// only a comment\n",
    "const x = 42;",
    "let x = ;",
    "function f<T extends object = {}>(a: T, ...rest: any[]): a is T { return a ? b : c; }",
    "class C extends B implements I { private x = 1; get y() { return 2; } static { init(); } }",
    "type M<T> = { readonly [K in keyof T]-?: T[K] extends Function ? never : K }[keyof T];",
    "a?.b![c]?.(d)<e>`t${f}`;",
    "for await (const [k, v] of entries) { if (k) continue; else break; }",
    "import x, { y as z } from 'm'; export default class {}",
    "x = (a, b) => ({ a, b }); y = async <T,>(t: T) => await t;",
    "enum E { A = 1, B, C = A | B }",
    "namespace N.M { export declare function f(): void; }",
    "if (a { b(); }",
    "class { ( [ <",
    "function ( => <T",
    "x = { a: , b: [ , }",
    "let a = 1 +\nlet b = ;\n}}}",
    "type T = | ;",
    "a ? : ;",
    "try ",
    "try {} catch ",
    "try {} finally /* tail */",
    "x = function ()  \n",
    "@",
    "x@",
];

const JSX_SOURCES: &[&str] = &[
    "const v = <div className=\"a\" {...p}>hi {name} <b>bold</b></div>;",
    "<><Item key={1} />text</>;",
    "<a:b c-d=\"e\">{/* comment */}</a:b>;",
    "<div><span></div>;",
    "<div>never closed",
    "<a  ",
    "<a /> ;",
];

struct RangeChecker<'a> {
    source: &'a str,
    stack: Vec<NodeRef<'a>>,
    seen: Vec<NodeId>,
}

impl<'a> Visitor<'a> for RangeChecker<'a> {
    fn enter(&mut self, node: NodeRef<'a>) -> bool {
        let range = node.range();
        assert!(range.pos <= range.end, "{:?} has inverted range {:?}", node.kind(), range);
        assert!(
            range.end as usize <= self.source.len(),
            "{:?} ends past the source: {:?}",
            node.kind(),
            range
        );
        if let Some(parent) = self.stack.last() {
            let outer = parent.range();
            assert!(
                outer.pos <= range.pos && range.end <= outer.end,
                "{:?} {:?} escapes parent {:?} {:?} in {:?}",
                node.kind(),
                range,
                parent.kind(),
                outer,
                self.source
            );
        }

        let kids = children(node);
        for pair in kids.windows(2) {
            assert!(
                pair[0].range().end <= pair[1].range().pos,
                "children {:?} {:?} and {:?} {:?} of {:?} overlap in {:?}",
                pair[0].kind(),
                pair[0].range(),
                pair[1].kind(),
                pair[1].range(),
                node.kind(),
                self.source
            );
        }

        if node.is_missing() {
            assert_eq!(range.pos, range.end, "placeholder {:?} has width", node.kind());
            assert!(node.contains_error());
        }
        if node.contains_error() {
            if let Some(parent) = self.stack.last() {
                assert!(parent.contains_error(), "{:?} does not propagate its error flag", node.kind());
            }
        }

        self.seen.push(node.id());
        self.stack.push(node);
        true
    }

    fn leave(&mut self, _node: NodeRef<'a>) {
        self.stack.pop();
    }
}

fn check(source: &str, options: ParseOptions) {
    let arena = Bump::new();
    let result = Parser::new(&arena, source, options).parse_source_file();
    let root = result.source_file;
    assert_eq!(root.data.range.pos, 0);
    assert_eq!(root.data.range.end as usize, source.len());
    assert_eq!(root.data.contains_error(), !result.diagnostics.is_empty());

    let mut checker = RangeChecker {
        source,
        stack: Vec::new(),
        seen: Vec::new(),
    };
    walk(root, &mut checker);

    let total = checker.seen.len();
    checker.seen.sort_by_key(|id| id.0);
    checker.seen.dedup();
    assert_eq!(checker.seen.len(), total, "duplicate node ids in {:?}", source);

    let parents = ParentMap::build(root);
    assert_eq!(parents.len(), total - 1, "every node but the root has a parent");

    for diagnostic in &result.diagnostics {
        assert!(diagnostic.range.end as usize <= source.len(), "{:?}", diagnostic);
    }
}

#[test]
fn test_ranges_nest_without_overlap() {
    for source in SOURCES {
        check(source, ParseOptions::default());
    }
}

#[test]
fn test_jsx_ranges_nest_without_overlap() {
    for source in JSX_SOURCES {
        check(source, ParseOptions::jsx());
    }
}

#[test]
fn test_relaxed_options_keep_invariants() {
    let options = ParseOptions {
        allow_omitted_condition_parens: true,
        allow_omitted_semicolons: true,
        allow_bare_try: true,
        ..ParseOptions::default()
    };
    for source in ["if x { y() } while x {}", "a = 1 b = 2", "try {}", "switch x { case 1: }"] {
        check(source, options);
    }
}

#[test]
fn test_node_ids_are_dense() {
    let arena = Bump::new();
    let result = Parser::new(&arena, "let a = b + c;", ParseOptions::default()).parse_source_file();
    let mut ids = Vec::new();
    struct Ids<'v>(&'v mut Vec<u32>);
    impl<'a> Visitor<'a> for Ids<'_> {
        fn enter(&mut self, node: NodeRef<'a>) -> bool {
            self.0.push(node.id().0);
            true
        }
    }
    walk(result.source_file, &mut Ids(&mut ids));
    ids.sort_unstable();
    let expected: Vec<u32> = (0..ids.len() as u32).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_parse_is_deterministic() {
    let source = "x = a < b > (c); y = <T>(z);";
    let arena_a = Bump::new();
    let arena_b = Bump::new();
    let a = Parser::new(&arena_a, source, ParseOptions::default()).parse_source_file();
    let b = Parser::new(&arena_b, source, ParseOptions::default()).parse_source_file();
    assert_eq!(format!("{:?}", a.diagnostics), format!("{:?}", b.diagnostics));

    let kinds = |root: NodeRef<'_>| {
        struct Kinds(Vec<(tern_ast::SyntaxKind, u32, u32)>);
        impl<'a> Visitor<'a> for Kinds {
            fn enter(&mut self, node: NodeRef<'a>) -> bool {
                let range = node.range();
                self.0.push((node.kind(), range.pos, range.end));
                true
            }
        }
        let mut out = Kinds(Vec::new());
        walk(root, &mut out);
        out.0
    };
    assert_eq!(kinds(a.source_file), kinds(b.source_file));
}
