//! Read-only traversal over the syntax tree.
//!
//! Every node type and every node-family enum implements [`AstNode`], so
//! consumers can walk a tree without matching on each production. Children
//! are reported in source order.

use crate::node::*;
use crate::syntax_kind::SyntaxKind;
use crate::types::NodeId;
use tern_core::text::TextRange;

/// Any node of the tree.
pub trait AstNode<'a> {
    fn data(&self) -> &NodeData;

    /// Calls `f` with every direct child, in source order.
    fn for_each_child(&'a self, f: &mut dyn FnMut(NodeRef<'a>));

    #[inline]
    fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    #[inline]
    fn range(&self) -> TextRange {
        self.data().range
    }

    #[inline]
    fn id(&self) -> NodeId {
        self.data().id
    }

    #[inline]
    fn contains_error(&self) -> bool {
        self.data().contains_error()
    }

    #[inline]
    fn is_missing(&self) -> bool {
        self.data().is_missing()
    }
}

/// A borrowed handle to any node in the arena.
pub type NodeRef<'a> = &'a dyn AstNode<'a>;

impl<'a, T: AstNode<'a> + ?Sized> AstNode<'a> for &'a T {
    #[inline]
    fn data(&self) -> &NodeData {
        (**self).data()
    }

    #[inline]
    fn for_each_child(&'a self, f: &mut dyn FnMut(NodeRef<'a>)) {
        (**self).for_each_child(f)
    }
}

/// Calls `f` with every direct child of `node`.
pub fn for_each_child<'a>(node: NodeRef<'a>, mut f: impl FnMut(NodeRef<'a>)) {
    node.for_each_child(&mut f);
}

/// Collects the direct children of `node`.
pub fn children<'a>(node: NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut out = Vec::new();
    node.for_each_child(&mut |child| out.push(child));
    out
}

/// Pre-order tree visitor. Returning `false` from `enter` skips the node's
/// children; `leave` is still called.
pub trait Visitor<'a> {
    fn enter(&mut self, _node: NodeRef<'a>) -> bool {
        true
    }

    fn leave(&mut self, _node: NodeRef<'a>) {}
}

pub fn walk<'a, V: Visitor<'a> + ?Sized>(node: NodeRef<'a>, visitor: &mut V) {
    if visitor.enter(node) {
        node.for_each_child(&mut |child| walk(child, visitor));
    }
    visitor.leave(node);
}

// ============================================================================
// Implementations
// ============================================================================

macro_rules! visit_field {
    ($this:ident, $f:ident, one $field:ident) => {
        $f(&$this.$field);
    };
    ($this:ident, $f:ident, opt $field:ident) => {
        if let Some(child) = &$this.$field {
            $f(child);
        }
    };
    ($this:ident, $f:ident, list $field:ident) => {
        for child in $this.$field.iter() {
            $f(child);
        }
    };
    ($this:ident, $f:ident, opt_list $field:ident) => {
        if let Some(list) = $this.$field {
            for child in list.iter() {
                $f(child);
            }
        }
    };
}

macro_rules! ast_nodes {
    ($($ty:ident { $($form:ident $field:ident),* $(,)? })*) => {
        $(
            impl<'a> AstNode<'a> for $ty<'a> {
                #[inline]
                fn data(&self) -> &NodeData {
                    &self.data
                }

                #[allow(unused_variables)]
                fn for_each_child(&'a self, f: &mut dyn FnMut(NodeRef<'a>)) {
                    $(visit_field!(self, f, $form $field);)*
                }
            }
        )*
    };
}

macro_rules! ast_enums {
    ($($ty:ident { $($variant:ident),* $(,)? })*) => {
        $(
            impl<'a> AstNode<'a> for $ty<'a> {
                fn data(&self) -> &NodeData {
                    match self {
                        $($ty::$variant(n) => n.data(),)*
                    }
                }

                fn for_each_child(&'a self, f: &mut dyn FnMut(NodeRef<'a>)) {
                    match self {
                        $($ty::$variant(n) => n.for_each_child(f),)*
                    }
                }
            }
        )*
    };
}

impl<'a> AstNode<'a> for Token {
    #[inline]
    fn data(&self) -> &NodeData {
        &self.data
    }

    fn for_each_child(&'a self, _f: &mut dyn FnMut(NodeRef<'a>)) {}
}

ast_nodes! {
    SourceFile { list statements, one end_of_file_token }
    Identifier {}
    PrivateIdentifier {}
    QualifiedName { one left, one right }
    ComputedPropertyName { one expression }
    Decorator { one expression }
    TypeParameterDeclaration { opt_list modifiers, one name, opt constraint, opt default }
    ParameterDeclaration {
        opt_list modifiers, opt dot_dot_dot_token, one name, opt question_token,
        opt type_annotation, opt initializer,
    }
    FunctionDeclaration {
        opt_list modifiers, opt asterisk_token, opt name, opt_list type_parameters,
        list parameters, opt return_type, opt body,
    }
    ArrowFunction {
        opt_list modifiers, opt_list type_parameters, list parameters, opt return_type,
        one equals_greater_than_token, one body,
    }

    LiteralExpression {}
    TemplateExpression { one head, list spans }
    TemplateSpan { one expression, one literal }
    ArrayLiteralExpression { list elements }
    ObjectLiteralExpression { list properties }
    PropertyAssignment { one name, one initializer }
    ShorthandPropertyAssignment { one name, opt object_assignment_initializer }
    SpreadAssignment { one expression }
    PropertyAccessExpression { one expression, opt question_dot_token, one name }
    ElementAccessExpression { one expression, opt question_dot_token, one argument_expression }
    CallExpression {
        one expression, opt question_dot_token, opt_list type_arguments, list arguments,
    }
    NewExpression { one expression, opt_list type_arguments, opt_list arguments }
    TaggedTemplateExpression { one tag, opt_list type_arguments, one template }
    TypeAssertion { one type_node, one expression }
    ParenthesizedExpression { one expression }
    UnaryExpression { one operand }
    BinaryExpression { one left, one operator_token, one right }
    ConditionalExpression {
        one condition, one question_token, one when_true, one colon_token, one when_false,
    }
    YieldExpression { opt asterisk_token, opt expression }
    SpreadElement { one expression }
    AsExpression { one expression, one type_node }
    NonNullExpression { one expression }
    MetaProperty { one name }
    ExpressionWithTypeArguments { one expression, opt_list type_arguments }

    JsxElement { one opening_element, list children, one closing_element }
    JsxOpeningElement { one tag_name, opt_list type_arguments, one attributes }
    JsxClosingElement { one tag_name }
    JsxFragment { one opening_fragment, list children, one closing_fragment }
    JsxAttributes { list properties }
    JsxAttribute { one name, opt initializer }
    JsxSpreadAttribute { one expression }
    JsxExpression { opt dot_dot_dot_token, opt expression }
    JsxText {}
    JsxNamespacedName { one namespace, one name }

    TypeReference { one type_name, opt_list type_arguments }
    FunctionTypeNode { opt_list modifiers, opt_list type_parameters, list parameters, one return_type }
    TypeQuery { one expr_name, opt_list type_arguments }
    TypeLiteral { list members }
    ArrayType { one element_type }
    TupleType { list elements }
    NamedTupleMember { opt dot_dot_dot_token, one name, opt question_token, one type_node }
    WrappedType { one type_node }
    UnionOrIntersectionType { list types }
    ConditionalType { one check_type, one extends_type, one true_type, one false_type }
    InferType { one type_parameter }
    TypeOperator { one type_node }
    IndexedAccessType { one object_type, one index_type }
    MappedType {
        opt readonly_token, one type_parameter, opt name_type, opt question_token, opt type_node,
    }
    LiteralType { one literal }
    TemplateLiteralType { one head, list spans }
    TemplateLiteralTypeSpan { one type_node, one literal }
    TypePredicate { opt asserts_modifier, one parameter_name, opt type_node }
    ImportType { one argument, opt qualifier, opt_list type_arguments }
    PropertySignature { opt_list modifiers, one name, opt question_token, opt type_annotation }
    MethodSignature {
        opt_list modifiers, one name, opt question_token, opt_list type_parameters,
        list parameters, opt return_type,
    }
    SignatureDeclaration { opt_list type_parameters, list parameters, opt return_type }
    IndexSignature { opt_list modifiers, list parameters, opt type_annotation }

    ObjectBindingPattern { list elements }
    ArrayBindingPattern { list elements }
    BindingElement { opt dot_dot_dot_token, opt property_name, one name, opt initializer }

    Block { list statements }
    VariableStatement { opt_list modifiers, one declaration_list }
    VariableDeclarationList { list declarations }
    VariableDeclaration { one name, opt exclamation_token, opt type_annotation, opt initializer }
    ExpressionStatement { one expression }
    IfStatement { one expression, one then_statement, opt else_statement }
    DoStatement { one statement, one expression }
    WhileStatement { one expression, one statement }
    ForStatement { opt initializer, opt condition, opt incrementor, one statement }
    ForInOrOfStatement { opt await_modifier, one initializer, one expression, one statement }
    BreakOrContinueStatement { opt label }
    ReturnStatement { opt expression }
    WithStatement { one expression, one statement }
    SwitchStatement { one expression, one case_block }
    CaseBlock { list clauses }
    CaseOrDefaultClause { opt expression, list statements }
    LabeledStatement { one label, one statement }
    ThrowStatement { one expression }
    TryStatement { one try_block, opt catch_clause, opt finally_block }
    CatchClause { opt variable_declaration, one block }
    MissingDeclaration { opt_list modifiers }

    ClassDeclaration {
        opt_list modifiers, opt name, opt_list type_parameters, list heritage_clauses,
        list members,
    }
    HeritageClause { list types }
    PropertyDeclaration {
        opt_list modifiers, one name, opt postfix_token, opt type_annotation, opt initializer,
    }
    MethodDeclaration {
        opt_list modifiers, opt asterisk_token, one name, opt question_token,
        opt_list type_parameters, list parameters, opt return_type, opt body,
    }
    ConstructorDeclaration { opt_list modifiers, list parameters, opt return_type, opt body }
    AccessorDeclaration {
        opt_list modifiers, one name, opt_list type_parameters, list parameters,
        opt return_type, opt body,
    }
    ClassStaticBlockDeclaration { one body }
    InterfaceDeclaration {
        opt_list modifiers, one name, opt_list type_parameters, list heritage_clauses,
        list members,
    }
    TypeAliasDeclaration { opt_list modifiers, one name, opt_list type_parameters, one type_node }
    EnumDeclaration { opt_list modifiers, one name, list members }
    EnumMember { one name, opt initializer }
    ModuleDeclaration { opt_list modifiers, one name, opt body }
    ModuleBlock { list statements }
    ImportDeclaration { opt_list modifiers, opt import_clause, one module_specifier, opt attributes }
    ImportClause { opt name, opt named_bindings }
    NamespaceBinding { one name }
    NamedSpecifiers { list elements }
    ImportOrExportSpecifier { opt property_name, one name }
    ImportAttributes { list elements }
    ImportAttribute { one name, one value }
    ImportEqualsDeclaration { opt_list modifiers, one name, one module_reference }
    ExternalModuleReference { one expression }
    ExportDeclaration { opt_list modifiers, opt export_clause, opt module_specifier, opt attributes }
    ExportAssignment { opt_list modifiers, one expression }
    NamespaceExportDeclaration { one name }
}

ast_enums! {
    EntityName { Identifier, QualifiedName }
    PropertyName { Identifier, PrivateIdentifier, StringLiteral, NumericLiteral, Computed }
    MemberName { Identifier, PrivateIdentifier }
    BindingName { Identifier, ObjectBindingPattern, ArrayBindingPattern }
    Modifier { Keyword, Decorator }
    ConciseBody { Block, Expression }
    Expression {
        Identifier, PrivateIdentifier, Keyword, Literal, Template, ArrayLiteral, ObjectLiteral,
        PropertyAccess, ElementAccess, Call, New, TaggedTemplate, TypeAssertion, Parenthesized,
        Function, ArrowFunction, Unary, Binary, Conditional, Yield, Spread, Class, Omitted, As,
        NonNull, MetaProperty, JsxElement, JsxSelfClosingElement, JsxFragment, JsxNamespacedName,
    }
    ObjectLiteralElement {
        PropertyAssignment, ShorthandPropertyAssignment, SpreadAssignment, Method, GetAccessor,
        SetAccessor,
    }
    JsxAttributeLike { Attribute, Spread }
    JsxAttributeValue { StringLiteral, Expression, Element }
    JsxChild { Text, Expression, Element, SelfClosingElement, Fragment }
    TypeNode {
        Keyword, Reference, Function, Query, Literal, Array, Tuple, NamedTupleMember,
        TupleElementModifier, UnionOrIntersection, Conditional, Infer, Parenthesized, Operator,
        IndexedAccess, Mapped, LiteralType, TemplateLiteral, Predicate, Import,
    }
    TypePredicateParameter { Identifier, This }
    TypeElement { Property, Method, Signature, Index, GetAccessor, SetAccessor }
    ArrayBindingElement { Binding, Omitted }
    Statement {
        Block, Empty, Variable, Expression, If, Do, While, For, ForInOrOf, BreakOrContinue,
        Return, With, Switch, Labeled, Throw, Try, Debugger, Function, Class, Interface,
        TypeAlias, Enum, Module, Import, ImportEquals, Export, ExportAssignment,
        NamespaceExport, MissingDeclaration,
    }
    ForInitializer { Variables, Expression }
    ClassElement {
        Property, Method, Constructor, GetAccessor, SetAccessor, Index, StaticBlock, Semicolon,
    }
    ModuleName { Identifier, StringLiteral }
    ModuleBody { Block, Namespace }
    NamedBindings { Namespace, Named }
    ModuleExportName { Identifier, StringLiteral }
    ModuleReference { Entity, External }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LanguageVariant, NodeFlags};
    use tern_core::intern::StringInterner;

    fn data(kind: SyntaxKind, pos: u32, end: u32, id: u32) -> NodeData {
        let mut data = NodeData::new(kind, pos, end);
        data.id = NodeId(id);
        data
    }

    #[derive(Default)]
    struct KindCollector {
        entered: Vec<SyntaxKind>,
        left: usize,
    }

    impl<'a> Visitor<'a> for KindCollector {
        fn enter(&mut self, node: NodeRef<'a>) -> bool {
            self.entered.push(node.kind());
            node.kind() != SyntaxKind::BinaryExpression
        }

        fn leave(&mut self, _node: NodeRef<'a>) {
            self.left += 1;
        }
    }

    #[test]
    fn test_walk_in_source_order() {
        // a + b;
        let interner = StringInterner::new();
        let a = Identifier {
            data: data(SyntaxKind::Identifier, 0, 1, 0),
            name: interner.intern("a"),
            text: "a",
            original_keyword_kind: None,
        };
        let b = Identifier {
            data: data(SyntaxKind::Identifier, 4, 5, 2),
            name: interner.intern("b"),
            text: "b",
            original_keyword_kind: None,
        };
        let binary = BinaryExpression {
            data: data(SyntaxKind::BinaryExpression, 0, 5, 3),
            left: Expression::Identifier(&a),
            operator_token: Token {
                data: data(SyntaxKind::PlusToken, 2, 3, 1),
            },
            right: Expression::Identifier(&b),
        };
        let statement = ExpressionStatement {
            data: data(SyntaxKind::ExpressionStatement, 0, 6, 4),
            expression: Expression::Binary(&binary),
        };
        let statements = [Statement::Expression(&statement)];
        let file = SourceFile {
            data: data(SyntaxKind::SourceFile, 0, 6, 6),
            statements: &statements,
            end_of_file_token: Token {
                data: data(SyntaxKind::EndOfFileToken, 6, 6, 5),
            },
            text: "a + b;",
            language_variant: LanguageVariant::Standard,
        };

        let kinds: Vec<_> = children(&binary).iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![SyntaxKind::Identifier, SyntaxKind::PlusToken, SyntaxKind::Identifier]
        );

        let mut collector = KindCollector::default();
        walk(&file, &mut collector);
        assert_eq!(
            collector.entered,
            vec![
                SyntaxKind::SourceFile,
                SyntaxKind::ExpressionStatement,
                SyntaxKind::BinaryExpression,
                SyntaxKind::EndOfFileToken,
            ]
        );
        assert_eq!(collector.left, 4);
        assert_eq!(file.text_of(b.data.range), "b");
    }

    #[test]
    fn test_enum_delegates_to_node() {
        let token = Token {
            data: NodeData {
                flags: NodeFlags::THIS_NODE_OR_ANY_SUB_NODES_HAS_ERROR,
                ..data(SyntaxKind::ThisKeyword, 3, 7, 9)
            },
        };
        let expression = Expression::Keyword(&token);
        let node: NodeRef<'_> = &expression;
        assert_eq!(node.kind(), SyntaxKind::ThisKeyword);
        assert_eq!(node.range(), TextRange::new(3, 7));
        assert_eq!(node.id(), NodeId(9));
        assert!(node.contains_error());
        assert!(children(node).is_empty());
    }
}
