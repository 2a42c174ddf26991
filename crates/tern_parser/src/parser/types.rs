//! Type expressions, climbed with the same precedence tiers as values:
//! `extends` (conditional) < `|` < `&` < prefix operators < `[]`.

use tern_ast::node::*;
use tern_ast::syntax_kind::SyntaxKind;
use tern_ast::types::*;
use tern_diagnostics::{messages, DiagnosticMessage};

use super::declarations::SignatureFlags;
use super::list::ListContext;
use super::{NodeStart, Parser};
use crate::token_table::{attrs, type_precedence, OperatorPrecedence};

impl<'a> Parser<'a> {
    // ========================================================================
    // Entry points
    // ========================================================================

    pub(super) fn parse_type(&mut self) -> TypeNode<'a> {
        if !self.enter_recursion() {
            return self.create_missing_type();
        }
        let type_node = self.with_context(NodeFlags::YIELD_CONTEXT | NodeFlags::AWAIT_CONTEXT, false, |p| {
            if p.is_start_of_function_or_constructor_type() {
                p.parse_function_or_constructor_type()
            } else {
                p.parse_type_operand(OperatorPrecedence::Conditional)
            }
        });
        self.exit_recursion();
        type_node
    }

    /// `: Type`, if present.
    pub(super) fn parse_type_annotation(&mut self) -> Option<TypeNode<'a>> {
        if self.parse_optional(SyntaxKind::ColonToken) {
            Some(self.parse_type())
        } else {
            None
        }
    }

    /// `< Type, ... >`.
    pub(super) fn parse_type_arguments(&mut self) -> NodeList<'a, TypeNode<'a>> {
        let list = self.parse_bracketed_list(
            ListContext::TypeArguments,
            SyntaxKind::LessThanToken,
            SyntaxKind::GreaterThanToken,
            Self::parse_type,
        );
        self.alloc_slice(list.elements)
    }

    fn try_parse_type_arguments(&mut self) -> TypeArguments<'a> {
        if self.token() == SyntaxKind::LessThanToken {
            Some(self.parse_type_arguments())
        } else {
            None
        }
    }

    /// A zero-width type reference standing in for a type that could not be
    /// parsed. The caller has already reported.
    fn create_missing_type(&mut self) -> TypeNode<'a> {
        let start = self.node_start();
        let name = self.create_missing_identifier();
        let mut data = self.finish_node(SyntaxKind::TypeReference, start);
        data.range = name.data.range;
        data.flags |= NodeFlags::MISSING;
        TypeNode::Reference(self.alloc(TypeReference {
            data,
            type_name: EntityName::Identifier(name),
            type_arguments: None,
        }))
    }

    pub(super) fn is_start_of_type(&mut self, in_start_of_parameter: bool) -> bool {
        let token = self.token();
        match token {
            SyntaxKind::FunctionKeyword => !in_start_of_parameter,
            SyntaxKind::MinusToken => {
                !in_start_of_parameter
                    && self.look_ahead_next(|p| {
                        matches!(p.token(), SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral)
                    })
            }
            SyntaxKind::OpenParenToken => {
                !in_start_of_parameter && self.look_ahead(Self::is_start_of_parenthesized_or_function_type)
            }
            _ if token.is_identifier_or_contextual_keyword() => self.is_identifier(),
            _ => attrs(token).can_start_type(),
        }
    }

    fn is_start_of_parenthesized_or_function_type(&mut self) -> bool {
        self.next_token();
        self.token() == SyntaxKind::CloseParenToken || self.is_start_of_parameter() || self.is_start_of_type(false)
    }

    // ========================================================================
    // Precedence climbing
    // ========================================================================

    /// A type whose operators all bind at least as tightly as `min`.
    fn parse_type_operand(&mut self, min: OperatorPrecedence) -> TypeNode<'a> {
        let start = self.node_start();
        let leading = self.token();
        let left = if matches!(leading, SyntaxKind::BarToken | SyntaxKind::AmpersandToken)
            && type_precedence(leading) >= min
        {
            // `| A | B`: a leading operator always makes a union or
            // intersection, even of one member.
            self.next_token();
            let first = self.parse_type_operand(type_precedence(leading).next());
            self.parse_union_or_intersection_rest(start, leading, first)
        } else {
            self.parse_type_operator_or_higher()
        };
        self.parse_type_rest(start, min, left)
    }

    fn parse_type_rest(&mut self, start: NodeStart, min: OperatorPrecedence, mut left: TypeNode<'a>) -> TypeNode<'a> {
        loop {
            let token = self.token();
            let precedence = type_precedence(token);
            if !precedence.is_valid() || precedence < min {
                return left;
            }
            left = match token {
                SyntaxKind::OpenBracketToken => {
                    if self.has_preceding_line_break() {
                        return left;
                    }
                    self.parse_array_or_indexed_access_type(start, left)
                }
                SyntaxKind::BarToken | SyntaxKind::AmpersandToken => {
                    self.parse_union_or_intersection_rest(start, token, left)
                }
                SyntaxKind::ExtendsKeyword => {
                    if self.in_disallow_conditional_types_context() || self.has_preceding_line_break() {
                        return left;
                    }
                    return self.parse_conditional_type(start, left);
                }
                _ => return left,
            };
        }
    }

    /// Collects `op B op C ...` after the first member.
    fn parse_union_or_intersection_rest(
        &mut self,
        start: NodeStart,
        operator: SyntaxKind,
        first: TypeNode<'a>,
    ) -> TypeNode<'a> {
        let operand_precedence = type_precedence(operator).next();
        let mut types = vec![first];
        while self.parse_optional(operator) {
            types.push(self.parse_type_operand(operand_precedence));
        }
        let kind = if operator == SyntaxKind::BarToken {
            SyntaxKind::UnionType
        } else {
            SyntaxKind::IntersectionType
        };
        let types = self.alloc_slice(types);
        let data = self.finish_node(kind, start);
        TypeNode::UnionOrIntersection(self.alloc(UnionOrIntersectionType { data, types }))
    }

    fn parse_array_or_indexed_access_type(&mut self, start: NodeStart, object_type: TypeNode<'a>) -> TypeNode<'a> {
        self.parse_expected(SyntaxKind::OpenBracketToken);
        if self.is_start_of_type(false) {
            let index_type = self.parse_type();
            self.parse_expected(SyntaxKind::CloseBracketToken);
            let data = self.finish_node(SyntaxKind::IndexedAccessType, start);
            TypeNode::IndexedAccess(self.alloc(IndexedAccessType {
                data,
                object_type,
                index_type,
            }))
        } else {
            self.parse_expected(SyntaxKind::CloseBracketToken);
            let data = self.finish_node(SyntaxKind::ArrayType, start);
            TypeNode::Array(self.alloc(ArrayType {
                data,
                element_type: object_type,
            }))
        }
    }

    /// `Check extends Extends ? True : False`. The extends type may not
    /// itself be an unparenthesized conditional.
    fn parse_conditional_type(&mut self, start: NodeStart, check_type: TypeNode<'a>) -> TypeNode<'a> {
        self.parse_expected(SyntaxKind::ExtendsKeyword);
        let extends_type = self.with_context(NodeFlags::DISALLOW_CONDITIONAL_TYPES_CONTEXT, true, Self::parse_type);
        self.parse_expected(SyntaxKind::QuestionToken);
        let true_type = self.with_context(NodeFlags::DISALLOW_CONDITIONAL_TYPES_CONTEXT, false, Self::parse_type);
        self.parse_expected(SyntaxKind::ColonToken);
        let false_type = self.with_context(NodeFlags::DISALLOW_CONDITIONAL_TYPES_CONTEXT, false, Self::parse_type);
        let data = self.finish_node(SyntaxKind::ConditionalType, start);
        TypeNode::Conditional(self.alloc(ConditionalType {
            data,
            check_type,
            extends_type,
            true_type,
            false_type,
        }))
    }

    /// Prefix `keyof`, `unique`, `readonly` and `infer`, or a primary.
    fn parse_type_operator_or_higher(&mut self) -> TypeNode<'a> {
        let start = self.node_start();
        match self.token() {
            operator @ (SyntaxKind::KeyOfKeyword | SyntaxKind::UniqueKeyword | SyntaxKind::ReadonlyKeyword) => {
                self.next_token();
                let type_node = self.parse_type_operand(OperatorPrecedence::Member);
                let data = self.finish_node(SyntaxKind::TypeOperator, start);
                TypeNode::Operator(self.alloc(TypeOperator {
                    data,
                    operator,
                    type_node,
                }))
            }
            SyntaxKind::InferKeyword => self.parse_infer_type(),
            _ => self.with_context(NodeFlags::DISALLOW_CONDITIONAL_TYPES_CONTEXT, false, Self::parse_non_array_type),
        }
    }

    fn parse_infer_type(&mut self) -> TypeNode<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::InferKeyword);
        let parameter_start = self.node_start();
        let name = self.parse_identifier();
        let constraint = self.try_parse(Self::try_parse_constraint_of_infer_type);
        let parameter_data = self.finish_node(SyntaxKind::TypeParameter, parameter_start);
        let type_parameter = self.alloc(TypeParameterDeclaration {
            data: parameter_data,
            modifiers: None,
            name,
            constraint,
            default: None,
        });
        let data = self.finish_node(SyntaxKind::InferType, start);
        TypeNode::Infer(self.alloc(InferType { data, type_parameter }))
    }

    /// `infer U extends C`, unless the `extends` starts a conditional type.
    fn try_parse_constraint_of_infer_type(&mut self) -> Option<TypeNode<'a>> {
        if !self.parse_optional(SyntaxKind::ExtendsKeyword) {
            return None;
        }
        let constraint = self.with_context(NodeFlags::DISALLOW_CONDITIONAL_TYPES_CONTEXT, true, Self::parse_type);
        if self.in_disallow_conditional_types_context() || self.token() != SyntaxKind::QuestionToken {
            Some(constraint)
        } else {
            None
        }
    }

    // ========================================================================
    // Primary types
    // ========================================================================

    fn parse_non_array_type(&mut self) -> TypeNode<'a> {
        match self.token() {
            SyntaxKind::AnyKeyword
            | SyntaxKind::UnknownKeyword
            | SyntaxKind::StringKeyword
            | SyntaxKind::NumberKeyword
            | SyntaxKind::BigIntKeyword
            | SyntaxKind::SymbolKeyword
            | SyntaxKind::BooleanKeyword
            | SyntaxKind::UndefinedKeyword
            | SyntaxKind::NeverKeyword
            | SyntaxKind::ObjectKeyword => match self.try_parse(Self::parse_keyword_and_no_dot) {
                Some(keyword) => keyword,
                None => self.parse_type_reference(),
            },
            SyntaxKind::VoidKeyword => {
                let token = self.parse_token_node();
                TypeNode::Keyword(self.alloc(token))
            }
            SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword => self.parse_literal_type(false),
            SyntaxKind::MinusToken => {
                if self.look_ahead_next(|p| matches!(p.token(), SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral)) {
                    self.parse_literal_type(true)
                } else {
                    self.parse_type_reference()
                }
            }
            SyntaxKind::ThisKeyword => {
                let start = self.node_start();
                self.next_token();
                let data = self.finish_node(SyntaxKind::ThisType, start);
                let this_type = self.alloc(Token { data });
                if self.token() == SyntaxKind::IsKeyword && !self.has_preceding_line_break() {
                    self.next_token();
                    let type_node = Some(self.parse_type());
                    let data = self.finish_node(SyntaxKind::TypePredicate, start);
                    return TypeNode::Predicate(self.alloc(TypePredicate {
                        data,
                        asserts_modifier: None,
                        parameter_name: TypePredicateParameter::This(this_type),
                        type_node,
                    }));
                }
                TypeNode::Keyword(this_type)
            }
            SyntaxKind::TypeOfKeyword => {
                if self.look_ahead_next(|p| p.token() == SyntaxKind::ImportKeyword) {
                    self.parse_import_type()
                } else {
                    self.parse_type_query()
                }
            }
            SyntaxKind::OpenBraceToken => {
                if self.look_ahead(Self::is_start_of_mapped_type) {
                    self.parse_mapped_type()
                } else {
                    self.parse_type_literal()
                }
            }
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_type(),
            SyntaxKind::ImportKeyword => self.parse_import_type(),
            SyntaxKind::AssertsKeyword => {
                if self.look_ahead_next(|p| {
                    p.token().is_identifier_or_keyword() && !p.has_preceding_line_break()
                }) {
                    self.parse_asserts_type_predicate()
                } else {
                    self.parse_type_reference()
                }
            }
            SyntaxKind::TemplateHead => self.parse_template_literal_type(),
            _ => self.parse_type_reference(),
        }
    }

    /// A keyword type, unless a `.` makes it the head of a qualified name.
    fn parse_keyword_and_no_dot(&mut self) -> Option<TypeNode<'a>> {
        let token = self.parse_token_node();
        if self.token() == SyntaxKind::DotToken {
            return None;
        }
        Some(TypeNode::Keyword(self.alloc(token)))
    }

    fn parse_literal_type(&mut self, negative: bool) -> TypeNode<'a> {
        let start = self.node_start();
        let literal = if negative {
            let unary_start = self.node_start();
            self.next_token();
            let operand = Expression::Literal(self.parse_literal_node());
            let data = self.finish_node(SyntaxKind::PrefixUnaryExpression, unary_start);
            Expression::Unary(self.alloc(UnaryExpression {
                data,
                operator: SyntaxKind::MinusToken,
                operand,
            }))
        } else {
            match self.token() {
                SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword | SyntaxKind::NullKeyword => {
                    let token = self.parse_token_node();
                    Expression::Keyword(self.alloc(token))
                }
                _ => Expression::Literal(self.parse_literal_node()),
            }
        };
        let data = self.finish_node(SyntaxKind::LiteralType, start);
        TypeNode::LiteralType(self.alloc(LiteralType { data, literal }))
    }

    fn parse_type_reference(&mut self) -> TypeNode<'a> {
        let start = self.node_start();
        let type_name = self.parse_entity_name(true, Some(&messages::TYPE_EXPECTED));
        let type_arguments = if !self.has_preceding_line_break() {
            self.try_parse_type_arguments()
        } else {
            None
        };
        let data = self.finish_node(SyntaxKind::TypeReference, start);
        TypeNode::Reference(self.alloc(TypeReference {
            data,
            type_name,
            type_arguments,
        }))
    }

    /// `A.B.C`. Keywords are accepted as names when
    /// `allow_reserved_words` is set.
    pub(super) fn parse_entity_name(
        &mut self,
        allow_reserved_words: bool,
        message: Option<&'static DiagnosticMessage>,
    ) -> EntityName<'a> {
        let start = self.node_start();
        let is_identifier = if allow_reserved_words {
            self.token().is_identifier_or_keyword()
        } else {
            self.is_identifier()
        };
        let mut entity = EntityName::Identifier(self.create_identifier(is_identifier, message));
        while self.parse_optional(SyntaxKind::DotToken) {
            let right = self.parse_identifier_after_dot(allow_reserved_words);
            let data = self.finish_node(SyntaxKind::QualifiedName, start);
            entity = EntityName::QualifiedName(self.alloc(QualifiedName {
                data,
                left: entity,
                right,
            }));
        }
        entity
    }

    /// The name after a `.`. A name on the next line followed by another
    /// name on its line is more likely a new statement: report a missing
    /// identifier instead of taking it.
    pub(super) fn parse_identifier_after_dot(&mut self, allow_identifier_names: bool) -> &'a Identifier<'a> {
        if self.has_preceding_line_break()
            && self.token().is_identifier_or_keyword()
            && self.look_ahead_next(|p| p.token().is_identifier_or_keyword() && !p.has_preceding_line_break())
        {
            self.error_at_current_token(&messages::IDENTIFIER_EXPECTED, &[]);
            return self.create_missing_identifier();
        }
        if allow_identifier_names {
            self.parse_identifier_name()
        } else {
            self.parse_identifier()
        }
    }

    fn parse_type_query(&mut self) -> TypeNode<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::TypeOfKeyword);
        let expr_name = self.parse_entity_name(true, None);
        let type_arguments = if !self.has_preceding_line_break() {
            self.try_parse_type_arguments()
        } else {
            None
        };
        let data = self.finish_node(SyntaxKind::TypeQuery, start);
        TypeNode::Query(self.alloc(TypeQuery {
            data,
            expr_name,
            type_arguments,
        }))
    }

    fn parse_import_type(&mut self) -> TypeNode<'a> {
        let start = self.node_start();
        let is_type_of = self.parse_optional(SyntaxKind::TypeOfKeyword);
        self.parse_expected(SyntaxKind::ImportKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let argument = self.parse_type();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let qualifier = if self.parse_optional(SyntaxKind::DotToken) {
            Some(self.parse_entity_name(true, Some(&messages::TYPE_EXPECTED)))
        } else {
            None
        };
        let type_arguments = if !self.has_preceding_line_break() {
            self.try_parse_type_arguments()
        } else {
            None
        };
        let data = self.finish_node(SyntaxKind::ImportType, start);
        TypeNode::Import(self.alloc(ImportType {
            data,
            is_type_of,
            argument,
            qualifier,
            type_arguments,
        }))
    }

    fn parse_parenthesized_type(&mut self) -> TypeNode<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let type_node = self.parse_type();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let data = self.finish_node(SyntaxKind::ParenthesizedType, start);
        TypeNode::Parenthesized(self.alloc(WrappedType { data, type_node }))
    }

    fn parse_template_literal_type(&mut self) -> TypeNode<'a> {
        let start = self.node_start();
        let head = self.parse_template_head(false);
        let mut spans = Vec::new();
        loop {
            let span_start = self.node_start();
            let type_node = self.parse_type();
            let literal = self.parse_literal_of_template_span(false);
            let data = self.finish_node(SyntaxKind::TemplateLiteralTypeSpan, span_start);
            let is_middle = literal.data.kind == SyntaxKind::TemplateMiddle;
            spans.push(TemplateLiteralTypeSpan {
                data,
                type_node,
                literal,
            });
            if !is_middle {
                break;
            }
        }
        let spans = self.alloc_slice(spans);
        let data = self.finish_node(SyntaxKind::TemplateLiteralType, start);
        TypeNode::TemplateLiteral(self.alloc(TemplateLiteralType { data, head, spans }))
    }

    // ========================================================================
    // Predicates
    // ========================================================================

    /// A return type, which may be `x is T` or `asserts x [is T]`.
    pub(super) fn parse_type_or_type_predicate(&mut self) -> TypeNode<'a> {
        let start = self.node_start();
        let parameter = if self.is_identifier() {
            self.try_parse(Self::parse_type_predicate_prefix)
        } else {
            None
        };
        let type_node = self.parse_type();
        match parameter {
            Some(name) => {
                let data = self.finish_node(SyntaxKind::TypePredicate, start);
                TypeNode::Predicate(self.alloc(TypePredicate {
                    data,
                    asserts_modifier: None,
                    parameter_name: TypePredicateParameter::Identifier(name),
                    type_node: Some(type_node),
                }))
            }
            None => type_node,
        }
    }

    fn parse_type_predicate_prefix(&mut self) -> Option<&'a Identifier<'a>> {
        let name = self.parse_identifier();
        if self.token() == SyntaxKind::IsKeyword && !self.has_preceding_line_break() {
            self.next_token();
            Some(name)
        } else {
            None
        }
    }

    fn parse_asserts_type_predicate(&mut self) -> TypeNode<'a> {
        let start = self.node_start();
        let asserts_modifier = Some(self.parse_expected_token(SyntaxKind::AssertsKeyword));
        let parameter_name = if self.token() == SyntaxKind::ThisKeyword {
            let this_start = self.node_start();
            self.next_token();
            let data = self.finish_node(SyntaxKind::ThisType, this_start);
            TypePredicateParameter::This(self.alloc(Token { data }))
        } else {
            TypePredicateParameter::Identifier(self.parse_identifier())
        };
        let type_node = if self.parse_optional(SyntaxKind::IsKeyword) {
            Some(self.parse_type())
        } else {
            None
        };
        let data = self.finish_node(SyntaxKind::TypePredicate, start);
        TypeNode::Predicate(self.alloc(TypePredicate {
            data,
            asserts_modifier,
            parameter_name,
            type_node,
        }))
    }

    // ========================================================================
    // Function and constructor types
    // ========================================================================

    fn is_start_of_function_or_constructor_type(&mut self) -> bool {
        match self.token() {
            SyntaxKind::LessThanToken | SyntaxKind::NewKeyword => true,
            SyntaxKind::OpenParenToken => self.look_ahead(Self::is_unambiguously_start_of_function_type),
            SyntaxKind::AbstractKeyword => self.look_ahead_next(|p| p.token() == SyntaxKind::NewKeyword),
            _ => false,
        }
    }

    fn is_unambiguously_start_of_function_type(&mut self) -> bool {
        self.next_token();
        if matches!(self.token(), SyntaxKind::CloseParenToken | SyntaxKind::DotDotDotToken) {
            // `( )` and `( ...`
            return true;
        }
        if self.skip_parameter_start() {
            if matches!(
                self.token(),
                SyntaxKind::ColonToken | SyntaxKind::CommaToken | SyntaxKind::QuestionToken | SyntaxKind::EqualsToken
            ) {
                return true;
            }
            if self.token() == SyntaxKind::CloseParenToken {
                self.next_token();
                if self.token() == SyntaxKind::EqualsGreaterThanToken {
                    return true;
                }
            }
        }
        false
    }

    fn skip_parameter_start(&mut self) -> bool {
        if attrs(self.token()).is_modifier_keyword() {
            self.parse_modifiers(false, false, false);
        }
        if self.is_identifier() || self.token() == SyntaxKind::ThisKeyword {
            self.next_token();
            return true;
        }
        if matches!(self.token(), SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken) {
            let errors = self.diagnostics.len();
            self.parse_identifier_or_pattern();
            return errors == self.diagnostics.len();
        }
        false
    }

    fn parse_function_or_constructor_type(&mut self) -> TypeNode<'a> {
        let start = self.node_start();
        let modifiers = if self.token() == SyntaxKind::AbstractKeyword {
            let token = self.parse_token_node();
            self.alloc_optional_slice(vec![Modifier::Keyword(self.alloc(token))])
        } else {
            None
        };
        let kind = if self.parse_optional(SyntaxKind::NewKeyword) {
            SyntaxKind::ConstructorType
        } else {
            SyntaxKind::FunctionType
        };
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters(SignatureFlags::TYPE);
        let return_type = match self.parse_return_type(SyntaxKind::EqualsGreaterThanToken, false) {
            Some(return_type) => return_type,
            None => self.create_missing_type(),
        };
        let mut data = self.finish_node(kind, start);
        data.modifier_flags = Self::modifier_flags_of(modifiers);
        TypeNode::Function(self.alloc(FunctionTypeNode {
            data,
            modifiers,
            type_parameters,
            parameters,
            return_type,
        }))
    }

    // ========================================================================
    // Object, mapped and tuple types
    // ========================================================================

    fn parse_type_literal(&mut self) -> TypeNode<'a> {
        let start = self.node_start();
        let members = self.parse_object_type_members();
        let data = self.finish_node(SyntaxKind::TypeLiteral, start);
        TypeNode::Literal(self.alloc(TypeLiteral { data, members }))
    }

    /// `{ members }` of a type literal or interface.
    pub(super) fn parse_object_type_members(&mut self) -> NodeList<'a, TypeElement<'a>> {
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return &[];
        }
        let members = self.parse_list(ListContext::TypeMembers, Self::parse_type_member);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        members
    }

    pub(super) fn is_type_member_start(&mut self) -> bool {
        if matches!(
            self.token(),
            SyntaxKind::OpenParenToken
                | SyntaxKind::LessThanToken
                | SyntaxKind::GetKeyword
                | SyntaxKind::SetKeyword
        ) {
            return true;
        }
        let mut id_token = false;
        while attrs(self.token()).is_modifier_keyword() {
            id_token = true;
            self.next_token();
        }
        if self.token() == SyntaxKind::OpenBracketToken {
            return true;
        }
        if self.is_literal_property_name() {
            id_token = true;
            self.next_token();
        }
        id_token
            && (matches!(
                self.token(),
                SyntaxKind::OpenParenToken
                    | SyntaxKind::LessThanToken
                    | SyntaxKind::QuestionToken
                    | SyntaxKind::ColonToken
                    | SyntaxKind::CommaToken
            ) || self.can_parse_semicolon())
    }

    fn parse_type_member(&mut self) -> TypeElement<'a> {
        let start = self.node_start();
        match self.token() {
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken => {
                return self.parse_signature_member(start, SyntaxKind::CallSignature);
            }
            SyntaxKind::NewKeyword
                if self.look_ahead_next(|p| {
                    matches!(p.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken)
                }) =>
            {
                return self.parse_signature_member(start, SyntaxKind::ConstructSignature);
            }
            _ => {}
        }

        let modifiers = self.parse_modifiers(false, false, false);
        if let Some(kind) = self.parse_accessor_keyword() {
            let accessor = self.parse_accessor_declaration(start, modifiers, kind, SignatureFlags::TYPE);
            return if kind == SyntaxKind::GetAccessor {
                TypeElement::GetAccessor(accessor)
            } else {
                TypeElement::SetAccessor(accessor)
            };
        }
        if self.is_index_signature() {
            return TypeElement::Index(self.parse_index_signature_declaration(start, modifiers));
        }
        self.parse_property_or_method_signature(start, modifiers)
    }

    fn parse_signature_member(&mut self, start: NodeStart, kind: SyntaxKind) -> TypeElement<'a> {
        if kind == SyntaxKind::ConstructSignature {
            self.parse_expected(SyntaxKind::NewKeyword);
        }
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters(SignatureFlags::TYPE);
        let return_type = self.parse_return_type(SyntaxKind::ColonToken, true);
        self.parse_type_member_semicolon();
        let data = self.finish_node(kind, start);
        TypeElement::Signature(self.alloc(SignatureDeclaration {
            data,
            type_parameters,
            parameters,
            return_type,
        }))
    }

    fn parse_property_or_method_signature(&mut self, start: NodeStart, modifiers: Modifiers<'a>) -> TypeElement<'a> {
        let name = self.parse_property_name();
        let question_token = self.parse_optional_token(SyntaxKind::QuestionToken);
        let modifier_flags = Self::modifier_flags_of(modifiers);

        if matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            let type_parameters = self.parse_type_parameters();
            let parameters = self.parse_parameters(SignatureFlags::TYPE);
            let return_type = self.parse_return_type(SyntaxKind::ColonToken, true);
            self.parse_type_member_semicolon();
            let mut data = self.finish_node(SyntaxKind::MethodSignature, start);
            data.modifier_flags = modifier_flags;
            return TypeElement::Method(self.alloc(MethodSignature {
                data,
                modifiers,
                name,
                question_token,
                type_parameters,
                parameters,
                return_type,
            }));
        }

        let type_annotation = self.parse_type_annotation();
        self.parse_type_member_semicolon();
        let mut data = self.finish_node(SyntaxKind::PropertySignature, start);
        data.modifier_flags = modifier_flags;
        TypeElement::Property(self.alloc(PropertySignature {
            data,
            modifiers,
            name,
            question_token,
            type_annotation,
        }))
    }

    /// Type members may be separated by `,` as well as `;`.
    pub(super) fn parse_type_member_semicolon(&mut self) {
        if self.parse_optional(SyntaxKind::CommaToken) {
            return;
        }
        self.parse_semicolon();
    }

    fn is_start_of_mapped_type(&mut self) -> bool {
        self.next_token();
        if matches!(self.token(), SyntaxKind::PlusToken | SyntaxKind::MinusToken) {
            return self.next_token() == SyntaxKind::ReadonlyKeyword;
        }
        if self.token() == SyntaxKind::ReadonlyKeyword {
            self.next_token();
        }
        self.token() == SyntaxKind::OpenBracketToken
            && {
                self.next_token();
                self.is_identifier()
            }
            && self.next_token() == SyntaxKind::InKeyword
    }

    /// `{ readonly [K in T as N]?: V }`, with `+`/`-` modifier prefixes.
    fn parse_mapped_type(&mut self) -> TypeNode<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let readonly_token = if matches!(
            self.token(),
            SyntaxKind::ReadonlyKeyword | SyntaxKind::PlusToken | SyntaxKind::MinusToken
        ) {
            let token = self.parse_token_node();
            if token.kind() != SyntaxKind::ReadonlyKeyword {
                self.parse_expected(SyntaxKind::ReadonlyKeyword);
            }
            Some(token)
        } else {
            None
        };
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let parameter_start = self.node_start();
        let name = self.parse_identifier_name();
        self.parse_expected(SyntaxKind::InKeyword);
        let constraint = Some(self.parse_type());
        let parameter_data = self.finish_node(SyntaxKind::TypeParameter, parameter_start);
        let type_parameter = self.alloc(TypeParameterDeclaration {
            data: parameter_data,
            modifiers: None,
            name,
            constraint,
            default: None,
        });
        let name_type = if self.parse_optional(SyntaxKind::AsKeyword) {
            Some(self.parse_type())
        } else {
            None
        };
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let question_token = if matches!(
            self.token(),
            SyntaxKind::QuestionToken | SyntaxKind::PlusToken | SyntaxKind::MinusToken
        ) {
            let token = self.parse_token_node();
            if token.kind() != SyntaxKind::QuestionToken {
                self.parse_expected(SyntaxKind::QuestionToken);
            }
            Some(token)
        } else {
            None
        };
        let type_node = self.parse_type_annotation();
        self.parse_semicolon();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let data = self.finish_node(SyntaxKind::MappedType, start);
        TypeNode::Mapped(self.alloc(MappedType {
            data,
            readonly_token,
            type_parameter,
            name_type,
            question_token,
            type_node,
        }))
    }

    fn parse_tuple_type(&mut self) -> TypeNode<'a> {
        let start = self.node_start();
        let list = self.parse_bracketed_list(
            ListContext::TupleElementTypes,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::CloseBracketToken,
            Self::parse_tuple_element,
        );
        let elements = self.alloc_slice(list.elements);
        let data = self.finish_node(SyntaxKind::TupleType, start);
        TypeNode::Tuple(self.alloc(TupleType { data, elements }))
    }

    fn parse_tuple_element(&mut self) -> TypeNode<'a> {
        if !self.look_ahead(Self::is_tuple_element_name) {
            return self.parse_tuple_element_type();
        }
        let start = self.node_start();
        let dot_dot_dot_token = self.parse_optional_token(SyntaxKind::DotDotDotToken);
        let name = self.parse_identifier_name();
        let question_token = self.parse_optional_token(SyntaxKind::QuestionToken);
        self.parse_expected(SyntaxKind::ColonToken);
        let type_node = self.parse_tuple_element_type();
        let data = self.finish_node(SyntaxKind::NamedTupleMember, start);
        TypeNode::NamedTupleMember(self.alloc(NamedTupleMember {
            data,
            dot_dot_dot_token,
            name,
            question_token,
            type_node,
        }))
    }

    /// `name:`, `name?:` or `...name:` ahead.
    fn is_tuple_element_name(&mut self) -> bool {
        if self.token() == SyntaxKind::DotDotDotToken {
            self.next_token();
        }
        if !self.token().is_identifier_or_keyword() {
            return false;
        }
        match self.next_token() {
            SyntaxKind::ColonToken => true,
            SyntaxKind::QuestionToken => self.next_token() == SyntaxKind::ColonToken,
            _ => false,
        }
    }

    /// `...T`, `T?` or `T`.
    fn parse_tuple_element_type(&mut self) -> TypeNode<'a> {
        let start = self.node_start();
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let type_node = self.parse_type();
            let data = self.finish_node(SyntaxKind::RestType, start);
            return TypeNode::TupleElementModifier(self.alloc(WrappedType { data, type_node }));
        }
        let type_node = self.parse_type();
        if self.parse_optional(SyntaxKind::QuestionToken) {
            let data = self.finish_node(SyntaxKind::OptionalType, start);
            return TypeNode::TupleElementModifier(self.alloc(WrappedType { data, type_node }));
        }
        type_node
    }
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;
    use tern_ast::node::{EntityName, TypeNode};
    use tern_ast::syntax_kind::SyntaxKind;

    use crate::options::ParseOptions;
    use crate::parser::Parser;

    fn parse_type_text<T>(source: &str, f: impl FnOnce(TypeNode<'_>, usize) -> T) -> T {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, source, ParseOptions::default());
        parser.next_token();
        let type_node = parser.parse_type();
        f(type_node, parser.diagnostics.len())
    }

    #[test]
    fn test_union_binds_looser_than_intersection() {
        parse_type_text("A & B | C", |type_node, errors| {
            assert_eq!(errors, 0);
            let TypeNode::UnionOrIntersection(union) = type_node else {
                panic!("expected union, got {:?}", type_node);
            };
            assert_eq!(union.data.kind, SyntaxKind::UnionType);
            assert_eq!(union.types.len(), 2);
            assert!(matches!(union.types[0], TypeNode::UnionOrIntersection(i) if i.data.kind == SyntaxKind::IntersectionType));
        });
    }

    #[test]
    fn test_leading_bar_makes_single_member_union() {
        parse_type_text("| A", |type_node, errors| {
            assert_eq!(errors, 0);
            let TypeNode::UnionOrIntersection(union) = type_node else {
                panic!("expected union");
            };
            assert_eq!(union.types.len(), 1);
            assert_eq!(union.data.range.pos, 0);
        });
    }

    #[test]
    fn test_array_suffix_binds_tighter_than_keyof() {
        parse_type_text("keyof T[]", |type_node, _| {
            let TypeNode::Operator(operator) = type_node else {
                panic!("expected type operator");
            };
            assert_eq!(operator.operator, SyntaxKind::KeyOfKeyword);
            assert!(matches!(operator.type_node, TypeNode::Array(_)));
        });
    }

    #[test]
    fn test_conditional_type_branches() {
        parse_type_text("T extends string ? A : B", |type_node, errors| {
            assert_eq!(errors, 0);
            let TypeNode::Conditional(conditional) = type_node else {
                panic!("expected conditional type");
            };
            assert!(matches!(conditional.extends_type, TypeNode::Keyword(k) if k.kind() == SyntaxKind::StringKeyword));
        });
    }

    #[test]
    fn test_infer_constraint_is_not_a_conditional() {
        parse_type_text("T extends [infer U extends string] ? U : never", |type_node, errors| {
            assert_eq!(errors, 0);
            let TypeNode::Conditional(conditional) = type_node else {
                panic!("expected conditional type");
            };
            let TypeNode::Tuple(tuple) = conditional.extends_type else {
                panic!("expected tuple");
            };
            let TypeNode::Infer(infer) = tuple.elements[0] else {
                panic!("expected infer type");
            };
            assert!(infer.type_parameter.constraint.is_some());
        });
    }

    #[test]
    fn test_keyword_followed_by_dot_is_a_reference() {
        parse_type_text("string.Foo", |type_node, errors| {
            assert_eq!(errors, 0);
            let TypeNode::Reference(reference) = type_node else {
                panic!("expected type reference");
            };
            assert!(matches!(reference.type_name, EntityName::QualifiedName(_)));
        });
    }

    #[test]
    fn test_function_type_versus_parenthesized() {
        parse_type_text("(a: string) => void", |type_node, errors| {
            assert_eq!(errors, 0);
            assert!(matches!(type_node, TypeNode::Function(f) if f.data.kind == SyntaxKind::FunctionType));
        });
        parse_type_text("(string | number)[]", |type_node, errors| {
            assert_eq!(errors, 0);
            let TypeNode::Array(array) = type_node else {
                panic!("expected array type");
            };
            assert!(matches!(array.element_type, TypeNode::Parenthesized(_)));
        });
    }

    #[test]
    fn test_negative_literal_type() {
        parse_type_text("-1", |type_node, errors| {
            assert_eq!(errors, 0);
            assert!(matches!(type_node, TypeNode::LiteralType(_)));
        });
    }

    #[test]
    fn test_missing_type_reports_type_expected() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, ")", ParseOptions::default());
        parser.next_token();
        let type_node = parser.parse_type();
        let TypeNode::Reference(reference) = type_node else {
            panic!("expected placeholder reference");
        };
        assert!(reference.data.is_missing() || reference.data.contains_error());
        assert_eq!(parser.diagnostics.diagnostics()[0].code(), 1110);
    }
}
