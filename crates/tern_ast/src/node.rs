//! AST node definitions.
//!
//! Nodes live in a `bumpalo` arena owned by the caller and refer to their
//! children through `&'a` references and `&'a [T]` slices. Each node family
//! (`Expression`, `TypeNode`, `Statement`, ...) is a `Copy` enum of
//! references, so a tree can be walked and matched on without cloning.

use crate::syntax_kind::SyntaxKind;
use crate::types::*;
use tern_core::intern::InternedString;
use tern_core::text::{TextPos, TextRange};

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Data every node carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeData {
    pub kind: SyntaxKind,
    pub range: TextRange,
    pub flags: NodeFlags,
    pub modifier_flags: ModifierFlags,
    pub id: NodeId,
}

impl NodeData {
    pub fn new(kind: SyntaxKind, pos: TextPos, end: TextPos) -> Self {
        Self {
            kind,
            range: TextRange::new(pos, end),
            flags: NodeFlags::NONE,
            modifier_flags: ModifierFlags::NONE,
            id: NodeId::INVALID,
        }
    }

    #[inline]
    pub fn pos(&self) -> TextPos {
        self.range.pos
    }

    #[inline]
    pub fn end(&self) -> TextPos {
        self.range.end
    }

    /// Whether a diagnostic was reported anywhere inside this subtree.
    #[inline]
    pub fn contains_error(&self) -> bool {
        self.flags.contains(NodeFlags::THIS_NODE_OR_ANY_SUB_NODES_HAS_ERROR)
    }

    /// Whether this node is a placeholder for something that was missing.
    #[inline]
    pub fn is_missing(&self) -> bool {
        self.flags.contains(NodeFlags::MISSING)
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

// ============================================================================
// Source File
// ============================================================================

#[derive(Debug)]
pub struct SourceFile<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
    pub end_of_file_token: Token,
    pub text: &'a str,
    pub language_variant: LanguageVariant,
}

impl<'a> SourceFile<'a> {
    /// Source text covered by `range`.
    pub fn text_of(&self, range: TextRange) -> &'a str {
        range.slice(self.text)
    }
}

// ============================================================================
// Tokens and names
// ============================================================================

/// A node that is nothing but a token: keywords used as expressions or
/// types, operators, modifiers, `;` class elements.
#[derive(Debug, Clone, Copy)]
pub struct Token {
    pub data: NodeData,
}

impl Token {
    pub fn new(kind: SyntaxKind, pos: TextPos, end: TextPos) -> Self {
        Self {
            data: NodeData::new(kind, pos, end),
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data.kind
    }
}

#[derive(Debug)]
pub struct Identifier<'a> {
    pub data: NodeData,
    /// Interned, escape-decoded name.
    pub name: InternedString,
    /// Escape-decoded name text.
    pub text: &'a str,
    /// Set when the identifier is spelled like a keyword.
    pub original_keyword_kind: Option<SyntaxKind>,
}

#[derive(Debug)]
pub struct PrivateIdentifier<'a> {
    pub data: NodeData,
    pub name: InternedString,
    pub text: &'a str,
}

#[derive(Debug)]
pub struct QualifiedName<'a> {
    pub data: NodeData,
    pub left: EntityName<'a>,
    pub right: &'a Identifier<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum EntityName<'a> {
    Identifier(&'a Identifier<'a>),
    QualifiedName(&'a QualifiedName<'a>),
}

#[derive(Debug)]
pub struct ComputedPropertyName<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum PropertyName<'a> {
    Identifier(&'a Identifier<'a>),
    PrivateIdentifier(&'a PrivateIdentifier<'a>),
    StringLiteral(&'a LiteralExpression<'a>),
    NumericLiteral(&'a LiteralExpression<'a>),
    Computed(&'a ComputedPropertyName<'a>),
}

#[derive(Debug, Clone, Copy)]
pub enum MemberName<'a> {
    Identifier(&'a Identifier<'a>),
    PrivateIdentifier(&'a PrivateIdentifier<'a>),
}

#[derive(Debug, Clone, Copy)]
pub enum BindingName<'a> {
    Identifier(&'a Identifier<'a>),
    ObjectBindingPattern(&'a ObjectBindingPattern<'a>),
    ArrayBindingPattern(&'a ArrayBindingPattern<'a>),
}

// ============================================================================
// Modifiers and signatures
// ============================================================================

#[derive(Debug)]
pub struct Decorator<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum Modifier<'a> {
    Keyword(&'a Token),
    Decorator(&'a Decorator<'a>),
}

pub type Modifiers<'a> = Option<NodeList<'a, Modifier<'a>>>;

#[derive(Debug)]
pub struct TypeParameterDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub name: &'a Identifier<'a>,
    pub constraint: Option<TypeNode<'a>>,
    pub default: Option<TypeNode<'a>>,
}

pub type TypeParameters<'a> = Option<NodeList<'a, TypeParameterDeclaration<'a>>>;
pub type TypeArguments<'a> = Option<NodeList<'a, TypeNode<'a>>>;

#[derive(Debug)]
pub struct ParameterDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub dot_dot_dot_token: Option<Token>,
    pub name: BindingName<'a>,
    pub question_token: Option<Token>,
    pub type_annotation: Option<TypeNode<'a>>,
    pub initializer: Option<Expression<'a>>,
}

/// Function declarations and function expressions (`data.kind` tells
/// which).
#[derive(Debug)]
pub struct FunctionDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub asterisk_token: Option<Token>,
    pub name: Option<&'a Identifier<'a>>,
    pub type_parameters: TypeParameters<'a>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: Option<TypeNode<'a>>,
    pub body: Option<&'a Block<'a>>,
}

#[derive(Debug)]
pub struct ArrowFunction<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub type_parameters: TypeParameters<'a>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: Option<TypeNode<'a>>,
    pub equals_greater_than_token: Token,
    pub body: ConciseBody<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum ConciseBody<'a> {
    Block(&'a Block<'a>),
    Expression(Expression<'a>),
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Expression<'a> {
    Identifier(&'a Identifier<'a>),
    PrivateIdentifier(&'a PrivateIdentifier<'a>),
    /// `this`, `super`, `null`, `true`, `false`, and `import` in `import(...)`.
    Keyword(&'a Token),
    Literal(&'a LiteralExpression<'a>),
    Template(&'a TemplateExpression<'a>),
    ArrayLiteral(&'a ArrayLiteralExpression<'a>),
    ObjectLiteral(&'a ObjectLiteralExpression<'a>),
    PropertyAccess(&'a PropertyAccessExpression<'a>),
    ElementAccess(&'a ElementAccessExpression<'a>),
    Call(&'a CallExpression<'a>),
    New(&'a NewExpression<'a>),
    TaggedTemplate(&'a TaggedTemplateExpression<'a>),
    TypeAssertion(&'a TypeAssertion<'a>),
    Parenthesized(&'a ParenthesizedExpression<'a>),
    Function(&'a FunctionDeclaration<'a>),
    ArrowFunction(&'a ArrowFunction<'a>),
    /// Prefix/postfix operators and `delete`/`typeof`/`void`/`await`.
    Unary(&'a UnaryExpression<'a>),
    Binary(&'a BinaryExpression<'a>),
    Conditional(&'a ConditionalExpression<'a>),
    Yield(&'a YieldExpression<'a>),
    Spread(&'a SpreadElement<'a>),
    Class(&'a ClassDeclaration<'a>),
    Omitted(&'a Token),
    /// `as` and `satisfies`.
    As(&'a AsExpression<'a>),
    NonNull(&'a NonNullExpression<'a>),
    MetaProperty(&'a MetaProperty<'a>),
    JsxElement(&'a JsxElement<'a>),
    JsxSelfClosingElement(&'a JsxOpeningElement<'a>),
    JsxFragment(&'a JsxFragment<'a>),
    JsxNamespacedName(&'a JsxNamespacedName<'a>),
}

/// Numeric, bigint, string, regular expression and template literal tokens.
#[derive(Debug)]
pub struct LiteralExpression<'a> {
    pub data: NodeData,
    /// Cooked value for strings and templates, source text otherwise.
    pub text: &'a str,
    pub token_flags: TokenFlags,
}

#[derive(Debug)]
pub struct TemplateExpression<'a> {
    pub data: NodeData,
    pub head: &'a LiteralExpression<'a>,
    pub spans: NodeList<'a, TemplateSpan<'a>>,
}

#[derive(Debug)]
pub struct TemplateSpan<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    /// `TemplateMiddle` or `TemplateTail`.
    pub literal: &'a LiteralExpression<'a>,
}

#[derive(Debug)]
pub struct ArrayLiteralExpression<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct ObjectLiteralExpression<'a> {
    pub data: NodeData,
    pub properties: NodeList<'a, ObjectLiteralElement<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ObjectLiteralElement<'a> {
    PropertyAssignment(&'a PropertyAssignment<'a>),
    ShorthandPropertyAssignment(&'a ShorthandPropertyAssignment<'a>),
    SpreadAssignment(&'a SpreadAssignment<'a>),
    Method(&'a MethodDeclaration<'a>),
    GetAccessor(&'a AccessorDeclaration<'a>),
    SetAccessor(&'a AccessorDeclaration<'a>),
}

#[derive(Debug)]
pub struct PropertyAssignment<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub initializer: Expression<'a>,
}

#[derive(Debug)]
pub struct ShorthandPropertyAssignment<'a> {
    pub data: NodeData,
    pub name: &'a Identifier<'a>,
    /// `= value` in a destructuring-assignment target `{ a = 1 } = obj`.
    pub object_assignment_initializer: Option<Expression<'a>>,
}

#[derive(Debug)]
pub struct SpreadAssignment<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug)]
pub struct PropertyAccessExpression<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub question_dot_token: Option<Token>,
    pub name: MemberName<'a>,
}

#[derive(Debug)]
pub struct ElementAccessExpression<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub question_dot_token: Option<Token>,
    pub argument_expression: Expression<'a>,
}

#[derive(Debug)]
pub struct CallExpression<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub question_dot_token: Option<Token>,
    pub type_arguments: TypeArguments<'a>,
    pub arguments: NodeList<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct NewExpression<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub type_arguments: TypeArguments<'a>,
    pub arguments: Option<NodeList<'a, Expression<'a>>>,
}

#[derive(Debug)]
pub struct TaggedTemplateExpression<'a> {
    pub data: NodeData,
    pub tag: Expression<'a>,
    pub type_arguments: TypeArguments<'a>,
    pub template: Expression<'a>,
}

/// `<T>expr`.
#[derive(Debug)]
pub struct TypeAssertion<'a> {
    pub data: NodeData,
    pub type_node: TypeNode<'a>,
    pub expression: Expression<'a>,
}

#[derive(Debug)]
pub struct ParenthesizedExpression<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug)]
pub struct UnaryExpression<'a> {
    pub data: NodeData,
    pub operator: SyntaxKind,
    pub operand: Expression<'a>,
}

#[derive(Debug)]
pub struct BinaryExpression<'a> {
    pub data: NodeData,
    pub left: Expression<'a>,
    pub operator_token: Token,
    pub right: Expression<'a>,
}

#[derive(Debug)]
pub struct ConditionalExpression<'a> {
    pub data: NodeData,
    pub condition: Expression<'a>,
    pub question_token: Token,
    pub when_true: Expression<'a>,
    pub colon_token: Token,
    pub when_false: Expression<'a>,
}

#[derive(Debug)]
pub struct YieldExpression<'a> {
    pub data: NodeData,
    pub asterisk_token: Option<Token>,
    pub expression: Option<Expression<'a>>,
}

#[derive(Debug)]
pub struct SpreadElement<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug)]
pub struct AsExpression<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub type_node: TypeNode<'a>,
}

#[derive(Debug)]
pub struct NonNullExpression<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

/// `new.target` and `import.meta`.
#[derive(Debug)]
pub struct MetaProperty<'a> {
    pub data: NodeData,
    pub keyword_token: SyntaxKind,
    pub name: &'a Identifier<'a>,
}

#[derive(Debug)]
pub struct ExpressionWithTypeArguments<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub type_arguments: TypeArguments<'a>,
}

// ============================================================================
// JSX
// ============================================================================

#[derive(Debug)]
pub struct JsxElement<'a> {
    pub data: NodeData,
    pub opening_element: &'a JsxOpeningElement<'a>,
    pub children: NodeList<'a, JsxChild<'a>>,
    pub closing_element: &'a JsxClosingElement<'a>,
}

/// Opening tag of an element, or a whole self-closing element.
#[derive(Debug)]
pub struct JsxOpeningElement<'a> {
    pub data: NodeData,
    pub tag_name: Expression<'a>,
    pub type_arguments: TypeArguments<'a>,
    pub attributes: &'a JsxAttributes<'a>,
}

#[derive(Debug)]
pub struct JsxClosingElement<'a> {
    pub data: NodeData,
    pub tag_name: Expression<'a>,
}

#[derive(Debug)]
pub struct JsxFragment<'a> {
    pub data: NodeData,
    pub opening_fragment: Token,
    pub children: NodeList<'a, JsxChild<'a>>,
    pub closing_fragment: Token,
}

#[derive(Debug)]
pub struct JsxAttributes<'a> {
    pub data: NodeData,
    pub properties: NodeList<'a, JsxAttributeLike<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum JsxAttributeLike<'a> {
    Attribute(&'a JsxAttribute<'a>),
    Spread(&'a JsxSpreadAttribute<'a>),
}

#[derive(Debug)]
pub struct JsxAttribute<'a> {
    pub data: NodeData,
    /// An identifier or a `JsxNamespacedName`.
    pub name: Expression<'a>,
    pub initializer: Option<JsxAttributeValue<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum JsxAttributeValue<'a> {
    StringLiteral(&'a LiteralExpression<'a>),
    Expression(&'a JsxExpression<'a>),
    Element(Expression<'a>),
}

#[derive(Debug)]
pub struct JsxSpreadAttribute<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug)]
pub struct JsxExpression<'a> {
    pub data: NodeData,
    pub dot_dot_dot_token: Option<Token>,
    pub expression: Option<Expression<'a>>,
}

#[derive(Debug)]
pub struct JsxText<'a> {
    pub data: NodeData,
    pub text: &'a str,
    pub contains_only_trivia_white_spaces: bool,
}

#[derive(Debug)]
pub struct JsxNamespacedName<'a> {
    pub data: NodeData,
    pub namespace: &'a Identifier<'a>,
    pub name: &'a Identifier<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum JsxChild<'a> {
    Text(&'a JsxText<'a>),
    Expression(&'a JsxExpression<'a>),
    Element(&'a JsxElement<'a>),
    SelfClosingElement(&'a JsxOpeningElement<'a>),
    Fragment(&'a JsxFragment<'a>),
}

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum TypeNode<'a> {
    /// `any`, `string`, `void`, `never`, ... and `this`.
    Keyword(&'a Token),
    Reference(&'a TypeReference<'a>),
    /// Function and constructor types.
    Function(&'a FunctionTypeNode<'a>),
    Query(&'a TypeQuery<'a>),
    Literal(&'a TypeLiteral<'a>),
    Array(&'a ArrayType<'a>),
    Tuple(&'a TupleType<'a>),
    NamedTupleMember(&'a NamedTupleMember<'a>),
    /// `T?` and `...T` tuple elements.
    TupleElementModifier(&'a WrappedType<'a>),
    /// Unions and intersections.
    UnionOrIntersection(&'a UnionOrIntersectionType<'a>),
    Conditional(&'a ConditionalType<'a>),
    Infer(&'a InferType<'a>),
    Parenthesized(&'a WrappedType<'a>),
    Operator(&'a TypeOperator<'a>),
    IndexedAccess(&'a IndexedAccessType<'a>),
    Mapped(&'a MappedType<'a>),
    LiteralType(&'a LiteralType<'a>),
    TemplateLiteral(&'a TemplateLiteralType<'a>),
    Predicate(&'a TypePredicate<'a>),
    Import(&'a ImportType<'a>),
}

#[derive(Debug)]
pub struct TypeReference<'a> {
    pub data: NodeData,
    pub type_name: EntityName<'a>,
    pub type_arguments: TypeArguments<'a>,
}

#[derive(Debug)]
pub struct FunctionTypeNode<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub type_parameters: TypeParameters<'a>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: TypeNode<'a>,
}

/// `typeof x.y`.
#[derive(Debug)]
pub struct TypeQuery<'a> {
    pub data: NodeData,
    pub expr_name: EntityName<'a>,
    pub type_arguments: TypeArguments<'a>,
}

#[derive(Debug)]
pub struct TypeLiteral<'a> {
    pub data: NodeData,
    pub members: NodeList<'a, TypeElement<'a>>,
}

#[derive(Debug)]
pub struct ArrayType<'a> {
    pub data: NodeData,
    pub element_type: TypeNode<'a>,
}

#[derive(Debug)]
pub struct TupleType<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct NamedTupleMember<'a> {
    pub data: NodeData,
    pub dot_dot_dot_token: Option<Token>,
    pub name: &'a Identifier<'a>,
    pub question_token: Option<Token>,
    pub type_node: TypeNode<'a>,
}

/// A type with a single type child: parenthesized, optional and rest types.
#[derive(Debug)]
pub struct WrappedType<'a> {
    pub data: NodeData,
    pub type_node: TypeNode<'a>,
}

#[derive(Debug)]
pub struct UnionOrIntersectionType<'a> {
    pub data: NodeData,
    pub types: NodeList<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct ConditionalType<'a> {
    pub data: NodeData,
    pub check_type: TypeNode<'a>,
    pub extends_type: TypeNode<'a>,
    pub true_type: TypeNode<'a>,
    pub false_type: TypeNode<'a>,
}

#[derive(Debug)]
pub struct InferType<'a> {
    pub data: NodeData,
    pub type_parameter: &'a TypeParameterDeclaration<'a>,
}

/// `keyof T`, `unique symbol`, `readonly T[]`.
#[derive(Debug)]
pub struct TypeOperator<'a> {
    pub data: NodeData,
    pub operator: SyntaxKind,
    pub type_node: TypeNode<'a>,
}

#[derive(Debug)]
pub struct IndexedAccessType<'a> {
    pub data: NodeData,
    pub object_type: TypeNode<'a>,
    pub index_type: TypeNode<'a>,
}

#[derive(Debug)]
pub struct MappedType<'a> {
    pub data: NodeData,
    /// `readonly`, `+`, or `-`.
    pub readonly_token: Option<Token>,
    pub type_parameter: &'a TypeParameterDeclaration<'a>,
    pub name_type: Option<TypeNode<'a>>,
    /// `?`, `+`, or `-`.
    pub question_token: Option<Token>,
    pub type_node: Option<TypeNode<'a>>,
}

/// String, numeric, bigint, boolean and `null` literal types; `-1` is a
/// prefix-unary literal.
#[derive(Debug)]
pub struct LiteralType<'a> {
    pub data: NodeData,
    pub literal: Expression<'a>,
}

#[derive(Debug)]
pub struct TemplateLiteralType<'a> {
    pub data: NodeData,
    pub head: &'a LiteralExpression<'a>,
    pub spans: NodeList<'a, TemplateLiteralTypeSpan<'a>>,
}

#[derive(Debug)]
pub struct TemplateLiteralTypeSpan<'a> {
    pub data: NodeData,
    pub type_node: TypeNode<'a>,
    pub literal: &'a LiteralExpression<'a>,
}

/// `x is T`, `asserts x`, `asserts x is T`.
#[derive(Debug)]
pub struct TypePredicate<'a> {
    pub data: NodeData,
    pub asserts_modifier: Option<Token>,
    pub parameter_name: TypePredicateParameter<'a>,
    pub type_node: Option<TypeNode<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum TypePredicateParameter<'a> {
    Identifier(&'a Identifier<'a>),
    This(&'a Token),
}

/// `import("mod").A.B<T>` and `typeof import("mod")`.
#[derive(Debug)]
pub struct ImportType<'a> {
    pub data: NodeData,
    pub is_type_of: bool,
    pub argument: TypeNode<'a>,
    pub qualifier: Option<EntityName<'a>>,
    pub type_arguments: TypeArguments<'a>,
}

/// Members of interfaces and type literals.
#[derive(Debug, Clone, Copy)]
pub enum TypeElement<'a> {
    Property(&'a PropertySignature<'a>),
    Method(&'a MethodSignature<'a>),
    /// Call and construct signatures.
    Signature(&'a SignatureDeclaration<'a>),
    Index(&'a IndexSignature<'a>),
    GetAccessor(&'a AccessorDeclaration<'a>),
    SetAccessor(&'a AccessorDeclaration<'a>),
}

#[derive(Debug)]
pub struct PropertySignature<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub name: PropertyName<'a>,
    pub question_token: Option<Token>,
    pub type_annotation: Option<TypeNode<'a>>,
}

#[derive(Debug)]
pub struct MethodSignature<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub name: PropertyName<'a>,
    pub question_token: Option<Token>,
    pub type_parameters: TypeParameters<'a>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: Option<TypeNode<'a>>,
}

#[derive(Debug)]
pub struct SignatureDeclaration<'a> {
    pub data: NodeData,
    pub type_parameters: TypeParameters<'a>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: Option<TypeNode<'a>>,
}

#[derive(Debug)]
pub struct IndexSignature<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub type_annotation: Option<TypeNode<'a>>,
}

// ============================================================================
// Binding patterns
// ============================================================================

#[derive(Debug)]
pub struct ObjectBindingPattern<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, BindingElement<'a>>,
}

#[derive(Debug)]
pub struct ArrayBindingPattern<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, ArrayBindingElement<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ArrayBindingElement<'a> {
    Binding(&'a BindingElement<'a>),
    Omitted(&'a Token),
}

#[derive(Debug)]
pub struct BindingElement<'a> {
    pub data: NodeData,
    pub dot_dot_dot_token: Option<Token>,
    pub property_name: Option<PropertyName<'a>>,
    pub name: BindingName<'a>,
    pub initializer: Option<Expression<'a>>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Statement<'a> {
    Block(&'a Block<'a>),
    Empty(&'a Token),
    Variable(&'a VariableStatement<'a>),
    Expression(&'a ExpressionStatement<'a>),
    If(&'a IfStatement<'a>),
    Do(&'a DoStatement<'a>),
    While(&'a WhileStatement<'a>),
    For(&'a ForStatement<'a>),
    /// `for-in` and `for-of`.
    ForInOrOf(&'a ForInOrOfStatement<'a>),
    /// `break` and `continue`.
    BreakOrContinue(&'a BreakOrContinueStatement<'a>),
    Return(&'a ReturnStatement<'a>),
    With(&'a WithStatement<'a>),
    Switch(&'a SwitchStatement<'a>),
    Labeled(&'a LabeledStatement<'a>),
    Throw(&'a ThrowStatement<'a>),
    Try(&'a TryStatement<'a>),
    Debugger(&'a Token),
    Function(&'a FunctionDeclaration<'a>),
    Class(&'a ClassDeclaration<'a>),
    Interface(&'a InterfaceDeclaration<'a>),
    TypeAlias(&'a TypeAliasDeclaration<'a>),
    Enum(&'a EnumDeclaration<'a>),
    Module(&'a ModuleDeclaration<'a>),
    Import(&'a ImportDeclaration<'a>),
    ImportEquals(&'a ImportEqualsDeclaration<'a>),
    Export(&'a ExportDeclaration<'a>),
    ExportAssignment(&'a ExportAssignment<'a>),
    NamespaceExport(&'a NamespaceExportDeclaration<'a>),
    /// Decorators or modifiers with no declaration after them.
    MissingDeclaration(&'a MissingDeclaration<'a>),
}

#[derive(Debug)]
pub struct Block<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
}

#[derive(Debug)]
pub struct VariableStatement<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub declaration_list: &'a VariableDeclarationList<'a>,
}

/// `data.flags` carries `LET`, `CONST`, `USING` or `AWAIT_USING`.
#[derive(Debug)]
pub struct VariableDeclarationList<'a> {
    pub data: NodeData,
    pub declarations: NodeList<'a, VariableDeclaration<'a>>,
}

#[derive(Debug)]
pub struct VariableDeclaration<'a> {
    pub data: NodeData,
    pub name: BindingName<'a>,
    pub exclamation_token: Option<Token>,
    pub type_annotation: Option<TypeNode<'a>>,
    pub initializer: Option<Expression<'a>>,
}

#[derive(Debug)]
pub struct ExpressionStatement<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug)]
pub struct IfStatement<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub then_statement: Statement<'a>,
    pub else_statement: Option<Statement<'a>>,
}

#[derive(Debug)]
pub struct DoStatement<'a> {
    pub data: NodeData,
    pub statement: Statement<'a>,
    pub expression: Expression<'a>,
}

#[derive(Debug)]
pub struct WhileStatement<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub statement: Statement<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum ForInitializer<'a> {
    Variables(&'a VariableDeclarationList<'a>),
    Expression(Expression<'a>),
}

#[derive(Debug)]
pub struct ForStatement<'a> {
    pub data: NodeData,
    pub initializer: Option<ForInitializer<'a>>,
    pub condition: Option<Expression<'a>>,
    pub incrementor: Option<Expression<'a>>,
    pub statement: Statement<'a>,
}

#[derive(Debug)]
pub struct ForInOrOfStatement<'a> {
    pub data: NodeData,
    pub await_modifier: Option<Token>,
    pub initializer: ForInitializer<'a>,
    pub expression: Expression<'a>,
    pub statement: Statement<'a>,
}

#[derive(Debug)]
pub struct BreakOrContinueStatement<'a> {
    pub data: NodeData,
    pub label: Option<&'a Identifier<'a>>,
}

#[derive(Debug)]
pub struct ReturnStatement<'a> {
    pub data: NodeData,
    pub expression: Option<Expression<'a>>,
}

#[derive(Debug)]
pub struct WithStatement<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub statement: Statement<'a>,
}

#[derive(Debug)]
pub struct SwitchStatement<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub case_block: &'a CaseBlock<'a>,
}

#[derive(Debug)]
pub struct CaseBlock<'a> {
    pub data: NodeData,
    pub clauses: NodeList<'a, CaseOrDefaultClause<'a>>,
}

/// `case x:` (with an expression) or `default:`.
#[derive(Debug)]
pub struct CaseOrDefaultClause<'a> {
    pub data: NodeData,
    pub expression: Option<Expression<'a>>,
    pub statements: NodeList<'a, Statement<'a>>,
}

#[derive(Debug)]
pub struct LabeledStatement<'a> {
    pub data: NodeData,
    pub label: &'a Identifier<'a>,
    pub statement: Statement<'a>,
}

#[derive(Debug)]
pub struct ThrowStatement<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug)]
pub struct TryStatement<'a> {
    pub data: NodeData,
    pub try_block: &'a Block<'a>,
    pub catch_clause: Option<&'a CatchClause<'a>>,
    pub finally_block: Option<&'a Block<'a>>,
}

#[derive(Debug)]
pub struct CatchClause<'a> {
    pub data: NodeData,
    pub variable_declaration: Option<&'a VariableDeclaration<'a>>,
    pub block: &'a Block<'a>,
}

#[derive(Debug)]
pub struct MissingDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
}

// ============================================================================
// Declarations
// ============================================================================

/// Class declarations and class expressions.
#[derive(Debug)]
pub struct ClassDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub name: Option<&'a Identifier<'a>>,
    pub type_parameters: TypeParameters<'a>,
    pub heritage_clauses: NodeList<'a, HeritageClause<'a>>,
    pub members: NodeList<'a, ClassElement<'a>>,
}

#[derive(Debug)]
pub struct HeritageClause<'a> {
    pub data: NodeData,
    /// `extends` or `implements`.
    pub token: SyntaxKind,
    pub types: NodeList<'a, ExpressionWithTypeArguments<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ClassElement<'a> {
    Property(&'a PropertyDeclaration<'a>),
    Method(&'a MethodDeclaration<'a>),
    Constructor(&'a ConstructorDeclaration<'a>),
    GetAccessor(&'a AccessorDeclaration<'a>),
    SetAccessor(&'a AccessorDeclaration<'a>),
    Index(&'a IndexSignature<'a>),
    StaticBlock(&'a ClassStaticBlockDeclaration<'a>),
    Semicolon(&'a Token),
}

#[derive(Debug)]
pub struct PropertyDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub name: PropertyName<'a>,
    /// `?` or `!`.
    pub postfix_token: Option<Token>,
    pub type_annotation: Option<TypeNode<'a>>,
    pub initializer: Option<Expression<'a>>,
}

#[derive(Debug)]
pub struct MethodDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub asterisk_token: Option<Token>,
    pub name: PropertyName<'a>,
    pub question_token: Option<Token>,
    pub type_parameters: TypeParameters<'a>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: Option<TypeNode<'a>>,
    pub body: Option<&'a Block<'a>>,
}

#[derive(Debug)]
pub struct ConstructorDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: Option<TypeNode<'a>>,
    pub body: Option<&'a Block<'a>>,
}

/// `get` and `set` accessors in classes, object literals and type members.
#[derive(Debug)]
pub struct AccessorDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub name: PropertyName<'a>,
    pub type_parameters: TypeParameters<'a>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: Option<TypeNode<'a>>,
    pub body: Option<&'a Block<'a>>,
}

#[derive(Debug)]
pub struct ClassStaticBlockDeclaration<'a> {
    pub data: NodeData,
    pub body: &'a Block<'a>,
}

#[derive(Debug)]
pub struct InterfaceDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub name: &'a Identifier<'a>,
    pub type_parameters: TypeParameters<'a>,
    pub heritage_clauses: NodeList<'a, HeritageClause<'a>>,
    pub members: NodeList<'a, TypeElement<'a>>,
}

#[derive(Debug)]
pub struct TypeAliasDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub name: &'a Identifier<'a>,
    pub type_parameters: TypeParameters<'a>,
    pub type_node: TypeNode<'a>,
}

#[derive(Debug)]
pub struct EnumDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub name: &'a Identifier<'a>,
    pub members: NodeList<'a, EnumMember<'a>>,
}

#[derive(Debug)]
pub struct EnumMember<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub initializer: Option<Expression<'a>>,
}

#[derive(Debug)]
pub struct ModuleDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub name: ModuleName<'a>,
    pub body: Option<ModuleBody<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ModuleName<'a> {
    Identifier(&'a Identifier<'a>),
    StringLiteral(&'a LiteralExpression<'a>),
}

#[derive(Debug, Clone, Copy)]
pub enum ModuleBody<'a> {
    Block(&'a ModuleBlock<'a>),
    /// The inner part of a dotted `namespace A.B.C`.
    Namespace(&'a ModuleDeclaration<'a>),
}

#[derive(Debug)]
pub struct ModuleBlock<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
}

#[derive(Debug)]
pub struct ImportDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub import_clause: Option<&'a ImportClause<'a>>,
    pub module_specifier: Expression<'a>,
    pub attributes: Option<&'a ImportAttributes<'a>>,
}

#[derive(Debug)]
pub struct ImportClause<'a> {
    pub data: NodeData,
    pub is_type_only: bool,
    pub name: Option<&'a Identifier<'a>>,
    pub named_bindings: Option<NamedBindings<'a>>,
}

/// `* as ns` or `{ a, b as c }`, for both imports and exports.
#[derive(Debug, Clone, Copy)]
pub enum NamedBindings<'a> {
    Namespace(&'a NamespaceBinding<'a>),
    Named(&'a NamedSpecifiers<'a>),
}

/// `* as ns` (`NamespaceImport` / `NamespaceExport`).
#[derive(Debug)]
pub struct NamespaceBinding<'a> {
    pub data: NodeData,
    pub name: ModuleExportName<'a>,
}

/// `{ ... }` (`NamedImports` / `NamedExports`).
#[derive(Debug)]
pub struct NamedSpecifiers<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, ImportOrExportSpecifier<'a>>,
}

/// `a`, `a as b`, `type a`, `"str" as b`.
#[derive(Debug)]
pub struct ImportOrExportSpecifier<'a> {
    pub data: NodeData,
    pub is_type_only: bool,
    pub property_name: Option<ModuleExportName<'a>>,
    pub name: ModuleExportName<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum ModuleExportName<'a> {
    Identifier(&'a Identifier<'a>),
    StringLiteral(&'a LiteralExpression<'a>),
}

#[derive(Debug)]
pub struct ImportAttributes<'a> {
    pub data: NodeData,
    /// `with` or `assert`.
    pub token: SyntaxKind,
    pub elements: NodeList<'a, ImportAttribute<'a>>,
}

#[derive(Debug)]
pub struct ImportAttribute<'a> {
    pub data: NodeData,
    pub name: ModuleExportName<'a>,
    pub value: Expression<'a>,
}

#[derive(Debug)]
pub struct ImportEqualsDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub is_type_only: bool,
    pub name: &'a Identifier<'a>,
    pub module_reference: ModuleReference<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum ModuleReference<'a> {
    Entity(EntityName<'a>),
    External(&'a ExternalModuleReference<'a>),
}

/// `require("mod")`.
#[derive(Debug)]
pub struct ExternalModuleReference<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug)]
pub struct ExportDeclaration<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub is_type_only: bool,
    /// `None` for `export * from "mod"`.
    pub export_clause: Option<NamedBindings<'a>>,
    pub module_specifier: Option<Expression<'a>>,
    pub attributes: Option<&'a ImportAttributes<'a>>,
}

/// `export = x` and `export default x`.
#[derive(Debug)]
pub struct ExportAssignment<'a> {
    pub data: NodeData,
    pub modifiers: Modifiers<'a>,
    pub is_export_equals: bool,
    pub expression: Expression<'a>,
}

/// `export as namespace N;`
#[derive(Debug)]
pub struct NamespaceExportDeclaration<'a> {
    pub data: NodeData,
    pub name: &'a Identifier<'a>,
}
