//! Declarations: modifiers and decorators, functions and signatures,
//! classes, interfaces, type aliases, enums, namespaces, imports and
//! exports.

use tern_ast::node::*;
use tern_ast::syntax_kind::SyntaxKind;
use tern_ast::types::*;
use tern_diagnostics::{messages, DiagnosticMessage};

use super::list::ListContext;
use super::{NodeStart, Parser};
use crate::token_table::attrs;

bitflags::bitflags! {
    /// How a signature's parameters and body are parsed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(super) struct SignatureFlags: u8 {
        const NONE  = 0;
        /// Generator: `yield` is an operator.
        const YIELD = 1 << 0;
        /// Async: `await` is an operator.
        const AWAIT = 1 << 1;
        /// A type member: the body is never present.
        const TYPE  = 1 << 2;
    }
}

impl<'a> Parser<'a> {
    // ========================================================================
    // Declaration dispatch
    // ========================================================================

    pub(super) fn is_start_of_declaration(&mut self) -> bool {
        self.look_ahead(Self::is_declaration)
    }

    fn is_declaration(&mut self) -> bool {
        loop {
            let token = self.token();
            if !attrs(token).can_start_declaration() {
                return false;
            }
            match token {
                SyntaxKind::VarKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::EnumKeyword => return true,
                SyntaxKind::UsingKeyword => {
                    return self.look_ahead_next(|p| p.is_identifier() && !p.has_preceding_line_break())
                }
                SyntaxKind::AwaitKeyword => {
                    return self.look_ahead_next(|p| {
                        p.token() == SyntaxKind::UsingKeyword && !p.has_preceding_line_break() && {
                            p.next_token();
                            p.is_identifier() && !p.has_preceding_line_break()
                        }
                    })
                }
                SyntaxKind::InterfaceKeyword | SyntaxKind::TypeKeyword => {
                    self.next_token();
                    return !self.has_preceding_line_break() && self.is_identifier();
                }
                SyntaxKind::ModuleKeyword | SyntaxKind::NamespaceKeyword => {
                    self.next_token();
                    return !self.has_preceding_line_break()
                        && (self.is_identifier() || self.token() == SyntaxKind::StringLiteral);
                }
                SyntaxKind::AbstractKeyword
                | SyntaxKind::AccessorKeyword
                | SyntaxKind::AsyncKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::PublicKeyword
                | SyntaxKind::ReadonlyKeyword => {
                    let previous = self.token();
                    self.next_token();
                    if self.has_preceding_line_break() {
                        return false;
                    }
                    if previous == SyntaxKind::DeclareKeyword && self.token() == SyntaxKind::TypeKeyword {
                        return true;
                    }
                }
                SyntaxKind::GlobalKeyword => {
                    self.next_token();
                    return matches!(
                        self.token(),
                        SyntaxKind::OpenBraceToken | SyntaxKind::Identifier | SyntaxKind::ExportKeyword
                    );
                }
                SyntaxKind::ImportKeyword => {
                    self.next_token();
                    let token = self.token();
                    return matches!(
                        token,
                        SyntaxKind::StringLiteral | SyntaxKind::AsteriskToken | SyntaxKind::OpenBraceToken
                    ) || token.is_identifier_or_keyword();
                }
                SyntaxKind::ExportKeyword => {
                    let mut current = self.next_token();
                    if current == SyntaxKind::TypeKeyword {
                        current = self.look_ahead(|p| p.next_token());
                    }
                    if matches!(
                        current,
                        SyntaxKind::EqualsToken
                            | SyntaxKind::AsteriskToken
                            | SyntaxKind::OpenBraceToken
                            | SyntaxKind::DefaultKeyword
                            | SyntaxKind::AsKeyword
                            | SyntaxKind::AtToken
                    ) {
                        return true;
                    }
                }
                SyntaxKind::StaticKeyword => {
                    self.next_token();
                }
                _ => return false,
            }
        }
    }

    /// Decorators and modifiers, then the declaration they apply to.
    pub(super) fn parse_declaration(&mut self) -> Statement<'a> {
        let start = self.node_start();
        let modifiers = self.parse_modifiers(true, false, false);
        self.parse_declaration_worker(start, modifiers)
    }

    fn parse_declaration_worker(&mut self, start: NodeStart, modifiers: Modifiers<'a>) -> Statement<'a> {
        match self.token() {
            SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::UsingKeyword
            | SyntaxKind::AwaitKeyword => self.parse_variable_statement(start, modifiers),
            SyntaxKind::FunctionKeyword => Statement::Function(self.parse_function_declaration(start, modifiers)),
            SyntaxKind::ClassKeyword => Statement::Class(self.parse_class_declaration(start, modifiers)),
            SyntaxKind::InterfaceKeyword => self.parse_interface_declaration(start, modifiers),
            SyntaxKind::TypeKeyword => self.parse_type_alias_declaration(start, modifiers),
            SyntaxKind::EnumKeyword => self.parse_enum_declaration(start, modifiers),
            SyntaxKind::GlobalKeyword | SyntaxKind::ModuleKeyword | SyntaxKind::NamespaceKeyword => {
                Statement::Module(self.parse_module_declaration(start, modifiers))
            }
            SyntaxKind::ImportKeyword => self.parse_import_declaration_or_import_equals(start, modifiers),
            SyntaxKind::ExportKeyword => {
                self.next_token();
                match self.token() {
                    SyntaxKind::DefaultKeyword | SyntaxKind::EqualsToken => {
                        self.parse_export_assignment(start, modifiers)
                    }
                    SyntaxKind::AsKeyword => self.parse_namespace_export_declaration(start),
                    _ => self.parse_export_declaration(start, modifiers),
                }
            }
            _ => {
                // Modifiers or decorators with nothing to apply them to. The
                // node spans them, so it is not a zero-width placeholder.
                self.error_at_current_token(&messages::DECLARATION_EXPECTED, &[]);
                let mut data = self.finish_node(SyntaxKind::MissingDeclaration, start);
                data.modifier_flags = Self::modifier_flags_of(modifiers);
                Statement::MissingDeclaration(self.alloc(MissingDeclaration { data, modifiers }))
            }
        }
    }

    // ========================================================================
    // Modifiers and decorators
    // ========================================================================

    pub(super) fn modifier_flags_of(modifiers: Modifiers<'a>) -> ModifierFlags {
        modifiers.unwrap_or(&[]).iter().fold(ModifierFlags::NONE, |flags, modifier| {
            flags
                | match modifier {
                    Modifier::Keyword(token) => ModifierFlags::from_modifier_kind(token.kind()),
                    Modifier::Decorator(_) => ModifierFlags::DECORATOR,
                }
        })
    }

    pub(super) fn parse_modifiers(
        &mut self,
        allow_decorators: bool,
        permit_const_as_modifier: bool,
        stop_on_start_of_class_static_block: bool,
    ) -> Modifiers<'a> {
        let mut list = Vec::new();
        let mut has_seen_static = false;
        loop {
            let modifier = if allow_decorators && self.token() == SyntaxKind::AtToken {
                Some(self.parse_decorator())
            } else {
                self.try_parse_modifier(has_seen_static, permit_const_as_modifier, stop_on_start_of_class_static_block)
            };
            match modifier {
                Some(modifier) => {
                    if let Modifier::Keyword(token) = modifier {
                        has_seen_static |= token.kind() == SyntaxKind::StaticKeyword;
                    }
                    list.push(modifier);
                }
                None => break,
            }
        }
        self.alloc_optional_slice(list)
    }

    fn try_parse_modifier(
        &mut self,
        has_seen_static: bool,
        permit_const_as_modifier: bool,
        stop_on_start_of_class_static_block: bool,
    ) -> Option<Modifier<'a>> {
        let start = self.node_start();
        let kind = self.token();

        if kind == SyntaxKind::ConstKeyword && permit_const_as_modifier {
            self.try_parse(|p| p.next_token_is_on_same_line_and_can_follow_modifier().then_some(()))?;
        } else if stop_on_start_of_class_static_block
            && kind == SyntaxKind::StaticKeyword
            && self.look_ahead_next(|p| p.token() == SyntaxKind::OpenBraceToken)
        {
            return None;
        } else if has_seen_static && kind == SyntaxKind::StaticKeyword {
            return None;
        } else {
            if !attrs(kind).is_modifier_keyword() {
                return None;
            }
            self.try_parse(|p| p.next_token_can_follow_modifier().then_some(()))?;
        }

        let data = self.finish_node(kind, start);
        Some(Modifier::Keyword(self.alloc(Token { data })))
    }

    fn next_token_is_on_same_line_and_can_follow_modifier(&mut self) -> bool {
        self.next_token();
        !self.has_preceding_line_break() && attrs(self.token()).can_follow_modifier()
    }

    /// Consumes the modifier, then tells whether what follows makes it one.
    fn next_token_can_follow_modifier(&mut self) -> bool {
        match self.token() {
            SyntaxKind::ConstKeyword => self.next_token() == SyntaxKind::EnumKeyword,
            SyntaxKind::ExportKeyword => {
                self.next_token();
                match self.token() {
                    SyntaxKind::DefaultKeyword => self.look_ahead(Self::next_token_can_follow_default_keyword),
                    SyntaxKind::TypeKeyword => self.look_ahead_next(Self::can_follow_export_modifier),
                    _ => self.can_follow_export_modifier(),
                }
            }
            SyntaxKind::DefaultKeyword => self.next_token_can_follow_default_keyword(),
            SyntaxKind::StaticKeyword => {
                self.next_token();
                attrs(self.token()).can_follow_modifier()
            }
            _ => self.next_token_is_on_same_line_and_can_follow_modifier(),
        }
    }

    fn can_follow_export_modifier(&mut self) -> bool {
        !matches!(
            self.token(),
            SyntaxKind::AsteriskToken | SyntaxKind::AsKeyword | SyntaxKind::OpenBraceToken
        ) && attrs(self.token()).can_follow_modifier()
    }

    fn next_token_can_follow_default_keyword(&mut self) -> bool {
        match self.next_token() {
            SyntaxKind::ClassKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::AtToken => true,
            SyntaxKind::AbstractKeyword => self.look_ahead_next(|p| {
                p.token() == SyntaxKind::ClassKeyword && !p.has_preceding_line_break()
            }),
            SyntaxKind::AsyncKeyword => self.look_ahead_next(|p| {
                p.token() == SyntaxKind::FunctionKeyword && !p.has_preceding_line_break()
            }),
            _ => false,
        }
    }

    fn parse_decorator(&mut self) -> Modifier<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::AtToken);
        let expression = self.with_context(NodeFlags::DECORATOR_CONTEXT, true, |p| {
            p.parse_left_hand_side_expression_or_higher()
        });
        let data = self.finish_node(SyntaxKind::Decorator, start);
        Modifier::Decorator(self.alloc(Decorator { data, expression }))
    }

    // ========================================================================
    // Signatures
    // ========================================================================

    pub(super) fn parse_type_parameters(&mut self) -> TypeParameters<'a> {
        if self.token() != SyntaxKind::LessThanToken {
            return None;
        }
        let list = self.parse_bracketed_list(
            ListContext::TypeParameters,
            SyntaxKind::LessThanToken,
            SyntaxKind::GreaterThanToken,
            Self::parse_type_parameter,
        );
        Some(self.alloc_slice(list.elements))
    }

    pub(super) fn parse_type_parameter(&mut self) -> TypeParameterDeclaration<'a> {
        let start = self.node_start();
        let modifiers = self.parse_modifiers(false, true, false);
        let name = self.parse_identifier();
        let constraint = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            Some(self.parse_type())
        } else {
            None
        };
        let default = if self.parse_optional(SyntaxKind::EqualsToken) {
            Some(self.parse_type())
        } else {
            None
        };
        let mut data = self.finish_node(SyntaxKind::TypeParameter, start);
        data.modifier_flags = Self::modifier_flags_of(modifiers);
        TypeParameterDeclaration {
            data,
            modifiers,
            name,
            constraint,
            default,
        }
    }

    pub(super) fn is_start_of_parameter(&mut self) -> bool {
        attrs(self.token()).can_start_parameter() || self.is_start_of_type(true)
    }

    /// `( parameters )` with `yield`/`await` set for the signature.
    pub(super) fn parse_parameters(&mut self, flags: SignatureFlags) -> NodeList<'a, ParameterDeclaration<'a>> {
        if !self.parse_expected(SyntaxKind::OpenParenToken) {
            return &[];
        }
        let list = self.with_context(NodeFlags::YIELD_CONTEXT, flags.contains(SignatureFlags::YIELD), |p| {
            p.with_context(NodeFlags::AWAIT_CONTEXT, flags.contains(SignatureFlags::AWAIT), |p| {
                p.parse_delimited_list(ListContext::Parameters, Self::parse_parameter)
            })
        });
        if let (Some(comma), Some(last)) = (list.trailing_comma, list.elements.last()) {
            if last.dot_dot_dot_token.is_some() {
                self.error_at_range(comma, &messages::A_REST_PARAMETER_OR_BINDING_PATTERN_MAY_NOT_HAVE_A_TRAILING_COMMA, &[]);
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.alloc_slice(list.elements)
    }

    pub(super) fn parse_parameter(&mut self) -> ParameterDeclaration<'a> {
        let start = self.node_start();
        let modifiers = self.parse_modifiers(true, false, false);

        if self.token() == SyntaxKind::ThisKeyword {
            let name = BindingName::Identifier(self.create_identifier(true, None));
            let type_annotation = self.parse_type_annotation();
            let data = self.finish_node(SyntaxKind::Parameter, start);
            return ParameterDeclaration {
                data,
                modifiers,
                dot_dot_dot_token: None,
                name,
                question_token: None,
                type_annotation,
                initializer: None,
            };
        }

        let dot_dot_dot_token = self.parse_optional_token(SyntaxKind::DotDotDotToken);
        let name = self.parse_identifier_or_pattern();
        if let BindingName::Identifier(identifier) = name {
            // `constructor(public)`: skip the stray modifier.
            if identifier.data.is_missing() && modifiers.is_none() && attrs(self.token()).is_modifier_keyword() {
                self.next_token();
            }
        }
        let question_token = self.parse_optional_token(SyntaxKind::QuestionToken);
        let type_annotation = self.parse_type_annotation();
        let initializer = self.parse_initializer();
        let mut data = self.finish_node(SyntaxKind::Parameter, start);
        data.modifier_flags = Self::modifier_flags_of(modifiers);
        ParameterDeclaration {
            data,
            modifiers,
            dot_dot_dot_token,
            name,
            question_token,
            type_annotation,
            initializer,
        }
    }

    /// `: Type` (or `=> Type` for function types) after a parameter list.
    pub(super) fn parse_return_type(&mut self, return_token: SyntaxKind, is_type: bool) -> Option<TypeNode<'a>> {
        let present = if return_token == SyntaxKind::EqualsGreaterThanToken {
            self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
            true
        } else if self.parse_optional(SyntaxKind::ColonToken) {
            true
        } else if is_type && self.token() == SyntaxKind::EqualsGreaterThanToken {
            self.error_at_current_token(&messages::_0_EXPECTED, &[SyntaxKind::ColonToken.display_name()]);
            self.next_token();
            true
        } else {
            false
        };
        if !present {
            return None;
        }
        Some(self.with_context(
            NodeFlags::DISALLOW_CONDITIONAL_TYPES_CONTEXT,
            false,
            Self::parse_type_or_type_predicate,
        ))
    }

    pub(super) fn parse_function_block(
        &mut self,
        flags: SignatureFlags,
        message: Option<&'static DiagnosticMessage>,
    ) -> &'a Block<'a> {
        self.with_context(NodeFlags::YIELD_CONTEXT, flags.contains(SignatureFlags::YIELD), |p| {
            p.with_context(NodeFlags::AWAIT_CONTEXT, flags.contains(SignatureFlags::AWAIT), |p| {
                p.with_context(NodeFlags::DECORATOR_CONTEXT, false, |p| p.parse_block_with_message(message))
            })
        })
    }

    /// A body, or `;` for overloads and ambient declarations.
    pub(super) fn parse_function_block_or_semicolon(&mut self, flags: SignatureFlags) -> Option<&'a Block<'a>> {
        if self.token() != SyntaxKind::OpenBraceToken {
            if flags.contains(SignatureFlags::TYPE) {
                self.parse_type_member_semicolon();
                return None;
            }
            if self.can_parse_semicolon() {
                self.parse_semicolon();
                return None;
            }
        }
        Some(self.parse_function_block(flags, Some(&messages::OR_EXPECTED)))
    }

    // ========================================================================
    // Functions
    // ========================================================================

    pub(super) fn parse_function_declaration(
        &mut self,
        start: NodeStart,
        modifiers: Modifiers<'a>,
    ) -> &'a FunctionDeclaration<'a> {
        let modifier_flags = Self::modifier_flags_of(modifiers);
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let asterisk_token = self.parse_optional_token(SyntaxKind::AsteriskToken);
        let name = if modifier_flags.contains(ModifierFlags::DEFAULT) && !self.is_identifier() {
            None
        } else {
            Some(self.parse_identifier())
        };
        let flags = Self::signature_flags(asterisk_token.is_some(), modifier_flags);
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters(flags);
        let return_type = self.parse_return_type(SyntaxKind::ColonToken, false);
        let body = self.parse_function_block_or_semicolon(flags);
        let mut data = self.finish_node(SyntaxKind::FunctionDeclaration, start);
        data.modifier_flags = modifier_flags;
        self.alloc(FunctionDeclaration {
            data,
            modifiers,
            asterisk_token,
            name,
            type_parameters,
            parameters,
            return_type,
            body,
        })
    }

    /// `function` in expression position, optionally after `async`.
    pub(super) fn parse_function_expression(&mut self) -> &'a FunctionDeclaration<'a> {
        let start = self.node_start();
        let modifiers = self.with_context(NodeFlags::DECORATOR_CONTEXT, false, |p| {
            p.parse_modifiers(false, false, false)
        });
        let modifier_flags = Self::modifier_flags_of(modifiers);
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let asterisk_token = self.parse_optional_token(SyntaxKind::AsteriskToken);
        let is_generator = asterisk_token.is_some();
        let is_async = modifier_flags.contains(ModifierFlags::ASYNC);
        let name = self.with_context(NodeFlags::YIELD_CONTEXT, is_generator, |p| {
            p.with_context(NodeFlags::AWAIT_CONTEXT, is_async, |p| {
                if p.is_identifier() {
                    Some(p.parse_identifier())
                } else {
                    None
                }
            })
        });
        let flags = Self::signature_flags(is_generator, modifier_flags);
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters(flags);
        let return_type = self.parse_return_type(SyntaxKind::ColonToken, false);
        let body = Some(self.parse_function_block(flags, None));
        let mut data = self.finish_node(SyntaxKind::FunctionExpression, start);
        data.modifier_flags = modifier_flags;
        self.alloc(FunctionDeclaration {
            data,
            modifiers,
            asterisk_token,
            name,
            type_parameters,
            parameters,
            return_type,
            body,
        })
    }

    fn signature_flags(is_generator: bool, modifier_flags: ModifierFlags) -> SignatureFlags {
        let mut flags = SignatureFlags::NONE;
        if is_generator {
            flags |= SignatureFlags::YIELD;
        }
        if modifier_flags.contains(ModifierFlags::ASYNC) {
            flags |= SignatureFlags::AWAIT;
        }
        flags
    }

    // ========================================================================
    // Property names
    // ========================================================================

    pub(super) fn parse_property_name(&mut self) -> PropertyName<'a> {
        match self.token() {
            SyntaxKind::StringLiteral => PropertyName::StringLiteral(self.parse_literal_node()),
            SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                PropertyName::NumericLiteral(self.parse_literal_node())
            }
            SyntaxKind::OpenBracketToken => PropertyName::Computed(self.parse_computed_property_name()),
            SyntaxKind::PrivateIdentifier => PropertyName::PrivateIdentifier(self.parse_private_identifier()),
            _ => PropertyName::Identifier(self.parse_identifier_name()),
        }
    }

    fn parse_computed_property_name(&mut self) -> &'a ComputedPropertyName<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let expression = self.allow_in_and(Self::parse_expression);
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let data = self.finish_node(SyntaxKind::ComputedPropertyName, start);
        self.alloc(ComputedPropertyName { data, expression })
    }

    // ========================================================================
    // Classes
    // ========================================================================

    pub(super) fn parse_class_declaration(
        &mut self,
        start: NodeStart,
        modifiers: Modifiers<'a>,
    ) -> &'a ClassDeclaration<'a> {
        self.parse_class_like(start, modifiers, SyntaxKind::ClassDeclaration)
    }

    pub(super) fn parse_class_expression(&mut self) -> &'a ClassDeclaration<'a> {
        let start = self.node_start();
        self.parse_class_like(start, None, SyntaxKind::ClassExpression)
    }

    fn parse_class_like(
        &mut self,
        start: NodeStart,
        modifiers: Modifiers<'a>,
        kind: SyntaxKind,
    ) -> &'a ClassDeclaration<'a> {
        self.parse_expected(SyntaxKind::ClassKeyword);
        let name = if self.is_identifier() && !self.is_implements_clause() {
            Some(self.parse_identifier())
        } else {
            None
        };
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        let members = if self.parse_expected(SyntaxKind::OpenBraceToken) {
            let members = self.parse_list(ListContext::ClassMembers, Self::parse_class_element);
            self.parse_expected(SyntaxKind::CloseBraceToken);
            members
        } else {
            &[]
        };
        let mut data = self.finish_node(kind, start);
        data.modifier_flags = Self::modifier_flags_of(modifiers);
        self.alloc(ClassDeclaration {
            data,
            modifiers,
            name,
            type_parameters,
            heritage_clauses,
            members,
        })
    }

    fn is_implements_clause(&mut self) -> bool {
        self.token() == SyntaxKind::ImplementsKeyword
            && self.look_ahead_next(|p| p.token().is_identifier_or_keyword())
    }

    pub(super) fn is_heritage_clause_keyword(&self) -> bool {
        matches!(self.token(), SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword)
    }

    fn parse_heritage_clauses(&mut self) -> NodeList<'a, HeritageClause<'a>> {
        if !self.is_heritage_clause_keyword() {
            return &[];
        }
        self.parse_list(ListContext::HeritageClauses, Self::parse_heritage_clause)
    }

    fn parse_heritage_clause(&mut self) -> HeritageClause<'a> {
        let start = self.node_start();
        let token = self.token();
        self.next_token();
        let list = self.parse_delimited_list(
            ListContext::HeritageClauseElement,
            Self::parse_expression_with_type_arguments,
        );
        let types = self.alloc_slice(list.elements);
        let data = self.finish_node(SyntaxKind::HeritageClause, start);
        HeritageClause { data, token, types }
    }

    fn parse_expression_with_type_arguments(&mut self) -> ExpressionWithTypeArguments<'a> {
        let start = self.node_start();
        let expression = self.parse_left_hand_side_expression_or_higher();
        let type_arguments = if self.token() == SyntaxKind::LessThanToken {
            Some(self.parse_type_arguments())
        } else {
            None
        };
        let data = self.finish_node(SyntaxKind::ExpressionWithTypeArguments, start);
        ExpressionWithTypeArguments {
            data,
            expression,
            type_arguments,
        }
    }

    pub(super) fn is_class_member_start(&mut self) -> bool {
        let mut id_token = None;
        if self.token() == SyntaxKind::AtToken {
            return true;
        }
        while attrs(self.token()).is_modifier_keyword() {
            let token = self.token();
            if matches!(
                token,
                SyntaxKind::PublicKeyword
                    | SyntaxKind::PrivateKeyword
                    | SyntaxKind::ProtectedKeyword
                    | SyntaxKind::ReadonlyKeyword
                    | SyntaxKind::StaticKeyword
                    | SyntaxKind::OverrideKeyword
                    | SyntaxKind::AccessorKeyword
            ) {
                return true;
            }
            id_token = Some(token);
            self.next_token();
        }
        if self.token() == SyntaxKind::AsteriskToken {
            return true;
        }
        if self.is_literal_property_name() || self.token() == SyntaxKind::PrivateIdentifier {
            id_token = Some(self.token());
            self.next_token();
        }
        if self.token() == SyntaxKind::OpenBracketToken {
            return true;
        }
        match id_token {
            Some(id) if !id.is_keyword() || matches!(id, SyntaxKind::GetKeyword | SyntaxKind::SetKeyword) => true,
            Some(_) => {
                matches!(
                    self.token(),
                    SyntaxKind::OpenParenToken
                        | SyntaxKind::LessThanToken
                        | SyntaxKind::ExclamationToken
                        | SyntaxKind::ColonToken
                        | SyntaxKind::EqualsToken
                        | SyntaxKind::QuestionToken
                ) || self.can_parse_semicolon()
            }
            None => false,
        }
    }

    fn parse_class_element(&mut self) -> ClassElement<'a> {
        let start = self.node_start();
        if self.token() == SyntaxKind::SemicolonToken {
            self.next_token();
            let data = self.finish_node(SyntaxKind::SemicolonClassElement, start);
            return ClassElement::Semicolon(self.alloc(Token { data }));
        }

        let modifiers = self.parse_modifiers(true, true, true);

        if self.token() == SyntaxKind::StaticKeyword
            && self.look_ahead_next(|p| p.token() == SyntaxKind::OpenBraceToken)
        {
            return self.parse_class_static_block(start);
        }
        if let Some(kind) = self.parse_accessor_keyword() {
            let accessor = self.parse_accessor_declaration(start, modifiers, kind, SignatureFlags::NONE);
            return match kind {
                SyntaxKind::GetAccessor => ClassElement::GetAccessor(accessor),
                _ => ClassElement::SetAccessor(accessor),
            };
        }
        if self.is_constructor_name() {
            return self.parse_constructor_declaration(start, modifiers);
        }
        if self.is_index_signature() {
            return ClassElement::Index(self.parse_index_signature_declaration(start, modifiers));
        }

        let token = self.token();
        if token.is_identifier_or_keyword()
            || matches!(
                token,
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::BigIntLiteral
                    | SyntaxKind::PrivateIdentifier
                    | SyntaxKind::AsteriskToken
                    | SyntaxKind::OpenBracketToken
            )
        {
            return self.parse_property_or_method_declaration(start, modifiers);
        }

        // Modifiers with no member after them: a property with a missing
        // name.
        self.error_at_current_token(&messages::DECLARATION_EXPECTED, &[]);
        let name = PropertyName::Identifier(self.create_missing_identifier());
        ClassElement::Property(self.parse_property_declaration(start, modifiers, name, None))
    }

    /// `get`/`set` used as a modifier rather than a member name.
    pub(super) fn parse_accessor_keyword(&mut self) -> Option<SyntaxKind> {
        let kind = match self.token() {
            SyntaxKind::GetKeyword => SyntaxKind::GetAccessor,
            SyntaxKind::SetKeyword => SyntaxKind::SetAccessor,
            _ => return None,
        };
        self.try_parse(|p| {
            p.next_token();
            attrs(p.token()).can_follow_modifier().then_some(kind)
        })
    }

    fn parse_class_static_block(&mut self, start: NodeStart) -> ClassElement<'a> {
        self.parse_expected(SyntaxKind::StaticKeyword);
        let body = self.with_context(NodeFlags::YIELD_CONTEXT, false, |p| {
            p.with_context(NodeFlags::AWAIT_CONTEXT, true, Self::parse_block)
        });
        let data = self.finish_node(SyntaxKind::ClassStaticBlockDeclaration, start);
        ClassElement::StaticBlock(self.alloc(ClassStaticBlockDeclaration { data, body }))
    }

    fn is_constructor_name(&mut self) -> bool {
        match self.token() {
            SyntaxKind::ConstructorKeyword => {
                self.look_ahead_next(|p| matches!(p.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken))
            }
            SyntaxKind::StringLiteral => {
                self.token_value() == "constructor"
                    && self.look_ahead_next(|p| p.token() == SyntaxKind::OpenParenToken)
            }
            _ => false,
        }
    }

    fn parse_constructor_declaration(&mut self, start: NodeStart, modifiers: Modifiers<'a>) -> ClassElement<'a> {
        self.next_token();
        // Type parameters are not allowed here; parse them to skip them.
        self.parse_type_parameters();
        let parameters = self.parse_parameters(SignatureFlags::NONE);
        let return_type = self.parse_return_type(SyntaxKind::ColonToken, false);
        let body = self.parse_function_block_or_semicolon(SignatureFlags::NONE);
        let mut data = self.finish_node(SyntaxKind::Constructor, start);
        data.modifier_flags = Self::modifier_flags_of(modifiers);
        ClassElement::Constructor(self.alloc(ConstructorDeclaration {
            data,
            modifiers,
            parameters,
            return_type,
            body,
        }))
    }

    pub(super) fn parse_accessor_declaration(
        &mut self,
        start: NodeStart,
        modifiers: Modifiers<'a>,
        kind: SyntaxKind,
        flags: SignatureFlags,
    ) -> &'a AccessorDeclaration<'a> {
        let name = self.parse_property_name();
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters(SignatureFlags::NONE);
        let return_type = self.parse_return_type(SyntaxKind::ColonToken, false);
        let body = self.parse_function_block_or_semicolon(flags);
        let mut data = self.finish_node(kind, start);
        data.modifier_flags = Self::modifier_flags_of(modifiers);
        self.alloc(AccessorDeclaration {
            data,
            modifiers,
            name,
            type_parameters,
            parameters,
            return_type,
            body,
        })
    }

    /// `[` starts an index signature only when what follows reads as a
    /// parameter declaration.
    pub(super) fn is_index_signature(&mut self) -> bool {
        self.token() == SyntaxKind::OpenBracketToken && self.look_ahead(Self::is_unambiguously_index_signature)
    }

    fn is_unambiguously_index_signature(&mut self) -> bool {
        self.next_token();
        if matches!(self.token(), SyntaxKind::DotDotDotToken | SyntaxKind::CloseBracketToken) {
            return true;
        }
        if attrs(self.token()).is_modifier_keyword() {
            self.next_token();
            if self.is_identifier() {
                return true;
            }
        } else if !self.is_identifier() {
            return false;
        } else {
            self.next_token();
        }
        if matches!(self.token(), SyntaxKind::ColonToken | SyntaxKind::CommaToken) {
            return true;
        }
        if self.token() != SyntaxKind::QuestionToken {
            return false;
        }
        self.next_token();
        matches!(
            self.token(),
            SyntaxKind::ColonToken | SyntaxKind::CommaToken | SyntaxKind::CloseBracketToken
        )
    }

    pub(super) fn parse_index_signature_declaration(
        &mut self,
        start: NodeStart,
        modifiers: Modifiers<'a>,
    ) -> &'a IndexSignature<'a> {
        let list = self.parse_bracketed_list(
            ListContext::Parameters,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::CloseBracketToken,
            Self::parse_parameter,
        );
        let parameters = self.alloc_slice(list.elements);
        let type_annotation = self.parse_type_annotation();
        self.parse_type_member_semicolon();
        let mut data = self.finish_node(SyntaxKind::IndexSignature, start);
        data.modifier_flags = Self::modifier_flags_of(modifiers);
        self.alloc(IndexSignature {
            data,
            modifiers,
            parameters,
            type_annotation,
        })
    }

    fn parse_property_or_method_declaration(&mut self, start: NodeStart, modifiers: Modifiers<'a>) -> ClassElement<'a> {
        let asterisk_token = self.parse_optional_token(SyntaxKind::AsteriskToken);
        let name = self.parse_property_name();
        let question_token = self.parse_optional_token(SyntaxKind::QuestionToken);
        if asterisk_token.is_some()
            || matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken)
        {
            return ClassElement::Method(self.parse_method_declaration(
                start,
                modifiers,
                asterisk_token,
                name,
                question_token,
            ));
        }
        ClassElement::Property(self.parse_property_declaration(start, modifiers, name, question_token))
    }

    pub(super) fn parse_method_declaration(
        &mut self,
        start: NodeStart,
        modifiers: Modifiers<'a>,
        asterisk_token: Option<Token>,
        name: PropertyName<'a>,
        question_token: Option<Token>,
    ) -> &'a MethodDeclaration<'a> {
        let modifier_flags = Self::modifier_flags_of(modifiers);
        let flags = Self::signature_flags(asterisk_token.is_some(), modifier_flags);
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters(flags);
        let return_type = self.parse_return_type(SyntaxKind::ColonToken, false);
        let body = self.parse_function_block_or_semicolon(flags);
        let mut data = self.finish_node(SyntaxKind::MethodDeclaration, start);
        data.modifier_flags = modifier_flags;
        self.alloc(MethodDeclaration {
            data,
            modifiers,
            asterisk_token,
            name,
            question_token,
            type_parameters,
            parameters,
            return_type,
            body,
        })
    }

    fn parse_property_declaration(
        &mut self,
        start: NodeStart,
        modifiers: Modifiers<'a>,
        name: PropertyName<'a>,
        question_token: Option<Token>,
    ) -> &'a PropertyDeclaration<'a> {
        let postfix_token = match question_token {
            Some(token) => Some(token),
            None if !self.has_preceding_line_break() => self.parse_optional_token(SyntaxKind::ExclamationToken),
            None => None,
        };
        let type_annotation = self.parse_type_annotation();
        let initializer = self.with_context(
            NodeFlags::YIELD_CONTEXT | NodeFlags::AWAIT_CONTEXT | NodeFlags::DISALLOW_IN_CONTEXT,
            false,
            Self::parse_initializer,
        );
        self.parse_semicolon();
        let mut data = self.finish_node(SyntaxKind::PropertyDeclaration, start);
        data.modifier_flags = Self::modifier_flags_of(modifiers);
        self.alloc(PropertyDeclaration {
            data,
            modifiers,
            name,
            postfix_token,
            type_annotation,
            initializer,
        })
    }

    // ========================================================================
    // Interfaces, type aliases, enums
    // ========================================================================

    fn parse_interface_declaration(&mut self, start: NodeStart, modifiers: Modifiers<'a>) -> Statement<'a> {
        self.parse_expected(SyntaxKind::InterfaceKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        let members = self.parse_object_type_members();
        let mut data = self.finish_node(SyntaxKind::InterfaceDeclaration, start);
        data.modifier_flags = Self::modifier_flags_of(modifiers);
        Statement::Interface(self.alloc(InterfaceDeclaration {
            data,
            modifiers,
            name,
            type_parameters,
            heritage_clauses,
            members,
        }))
    }

    fn parse_type_alias_declaration(&mut self, start: NodeStart, modifiers: Modifiers<'a>) -> Statement<'a> {
        self.parse_expected(SyntaxKind::TypeKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        self.parse_expected(SyntaxKind::EqualsToken);
        let type_node = self.parse_type();
        self.parse_semicolon();
        let mut data = self.finish_node(SyntaxKind::TypeAliasDeclaration, start);
        data.modifier_flags = Self::modifier_flags_of(modifiers);
        Statement::TypeAlias(self.alloc(TypeAliasDeclaration {
            data,
            modifiers,
            name,
            type_parameters,
            type_node,
        }))
    }

    fn parse_enum_declaration(&mut self, start: NodeStart, modifiers: Modifiers<'a>) -> Statement<'a> {
        self.parse_expected(SyntaxKind::EnumKeyword);
        let name = self.parse_identifier();
        let members = if self.parse_expected(SyntaxKind::OpenBraceToken) {
            let list = self.with_context(NodeFlags::YIELD_CONTEXT | NodeFlags::AWAIT_CONTEXT, false, |p| {
                p.parse_delimited_list(ListContext::EnumMembers, Self::parse_enum_member)
            });
            self.parse_expected(SyntaxKind::CloseBraceToken);
            self.alloc_slice(list.elements)
        } else {
            &[]
        };
        let mut data = self.finish_node(SyntaxKind::EnumDeclaration, start);
        data.modifier_flags = Self::modifier_flags_of(modifiers);
        Statement::Enum(self.alloc(EnumDeclaration {
            data,
            modifiers,
            name,
            members,
        }))
    }

    fn parse_enum_member(&mut self) -> EnumMember<'a> {
        let start = self.node_start();
        let name = self.parse_property_name();
        let initializer = self.allow_in_and(Self::parse_initializer);
        let data = self.finish_node(SyntaxKind::EnumMember, start);
        EnumMember { data, name, initializer }
    }

    // ========================================================================
    // Namespaces
    // ========================================================================

    fn parse_module_declaration(&mut self, start: NodeStart, modifiers: Modifiers<'a>) -> &'a ModuleDeclaration<'a> {
        if self.token() == SyntaxKind::GlobalKeyword {
            return self.parse_ambient_module_declaration(start, modifiers);
        }
        let flags = if self.parse_optional(SyntaxKind::NamespaceKeyword) {
            NodeFlags::NAMESPACE
        } else {
            self.parse_expected(SyntaxKind::ModuleKeyword);
            if self.token() == SyntaxKind::StringLiteral {
                return self.parse_ambient_module_declaration(start, modifiers);
            }
            NodeFlags::NONE
        };
        self.parse_namespace_declaration(start, modifiers, flags)
    }

    /// `namespace A.B.C { }`: each dotted segment nests a declaration.
    fn parse_namespace_declaration(
        &mut self,
        start: NodeStart,
        modifiers: Modifiers<'a>,
        flags: NodeFlags,
    ) -> &'a ModuleDeclaration<'a> {
        let name = if flags.contains(NodeFlags::NESTED_NAMESPACE) {
            self.parse_identifier_name()
        } else {
            self.parse_identifier()
        };
        let body = if self.parse_optional(SyntaxKind::DotToken) {
            let inner_start = self.node_start();
            let inner_flags = NodeFlags::NESTED_NAMESPACE | (flags & NodeFlags::NAMESPACE);
            ModuleBody::Namespace(self.parse_namespace_declaration(inner_start, None, inner_flags))
        } else {
            ModuleBody::Block(self.parse_module_block())
        };
        let mut data = self.finish_node(SyntaxKind::ModuleDeclaration, start);
        data.flags |= flags;
        data.modifier_flags = Self::modifier_flags_of(modifiers);
        self.alloc(ModuleDeclaration {
            data,
            modifiers,
            name: ModuleName::Identifier(name),
            body: Some(body),
        })
    }

    /// `declare module "name" { }` and `declare global { }`.
    fn parse_ambient_module_declaration(
        &mut self,
        start: NodeStart,
        modifiers: Modifiers<'a>,
    ) -> &'a ModuleDeclaration<'a> {
        let mut flags = NodeFlags::NONE;
        let name = if self.token() == SyntaxKind::GlobalKeyword {
            flags |= NodeFlags::GLOBAL_AUGMENTATION;
            ModuleName::Identifier(self.parse_identifier())
        } else {
            ModuleName::StringLiteral(self.parse_literal_node())
        };
        let body = if self.token() == SyntaxKind::OpenBraceToken {
            Some(ModuleBody::Block(self.parse_module_block()))
        } else {
            self.parse_semicolon();
            None
        };
        let mut data = self.finish_node(SyntaxKind::ModuleDeclaration, start);
        data.flags |= flags;
        data.modifier_flags = Self::modifier_flags_of(modifiers);
        self.alloc(ModuleDeclaration {
            data,
            modifiers,
            name,
            body,
        })
    }

    fn parse_module_block(&mut self) -> &'a ModuleBlock<'a> {
        let start = self.node_start();
        let statements = if self.parse_expected(SyntaxKind::OpenBraceToken) {
            let statements = self.parse_list(ListContext::BlockStatements, Self::parse_statement);
            self.parse_expected(SyntaxKind::CloseBraceToken);
            statements
        } else {
            &[]
        };
        let data = self.finish_node(SyntaxKind::ModuleBlock, start);
        self.alloc(ModuleBlock { data, statements })
    }

    // ========================================================================
    // Imports
    // ========================================================================

    fn parse_import_declaration_or_import_equals(&mut self, start: NodeStart, modifiers: Modifiers<'a>) -> Statement<'a> {
        self.parse_expected(SyntaxKind::ImportKeyword);
        let clause_start = self.node_start();

        let mut identifier = if self.is_identifier() {
            Some(self.parse_identifier())
        } else {
            None
        };

        let mut is_type_only = false;
        if identifier.is_some_and(|id| id.text == "type")
            && (self.token() != SyntaxKind::FromKeyword
                || (self.is_identifier()
                    && self.look_ahead_next(|p| {
                        matches!(p.token(), SyntaxKind::FromKeyword | SyntaxKind::EqualsToken)
                    })))
            && (self.is_identifier()
                || matches!(self.token(), SyntaxKind::AsteriskToken | SyntaxKind::OpenBraceToken))
        {
            is_type_only = true;
            identifier = if self.is_identifier() {
                Some(self.parse_identifier())
            } else {
                None
            };
        }

        if let Some(name) = identifier {
            if !matches!(self.token(), SyntaxKind::CommaToken | SyntaxKind::FromKeyword) {
                return self.parse_import_equals_declaration(start, modifiers, name, is_type_only);
            }
        }

        let import_clause = if identifier.is_some()
            || matches!(self.token(), SyntaxKind::AsteriskToken | SyntaxKind::OpenBraceToken)
        {
            let clause = self.parse_import_clause(clause_start, identifier, is_type_only);
            self.parse_expected(SyntaxKind::FromKeyword);
            Some(clause)
        } else {
            None
        };
        let module_specifier = self.parse_module_specifier();
        let attributes = self.try_parse_import_attributes();
        self.parse_semicolon();
        let mut data = self.finish_node(SyntaxKind::ImportDeclaration, start);
        data.modifier_flags = Self::modifier_flags_of(modifiers);
        Statement::Import(self.alloc(ImportDeclaration {
            data,
            modifiers,
            import_clause,
            module_specifier,
            attributes,
        }))
    }

    fn parse_import_clause(
        &mut self,
        start: NodeStart,
        name: Option<&'a Identifier<'a>>,
        is_type_only: bool,
    ) -> &'a ImportClause<'a> {
        let named_bindings = if name.is_none() || self.parse_optional(SyntaxKind::CommaToken) {
            Some(if self.token() == SyntaxKind::AsteriskToken {
                self.parse_namespace_import()
            } else {
                NamedBindings::Named(self.parse_named_specifiers(SyntaxKind::NamedImports))
            })
        } else {
            None
        };
        let data = self.finish_node(SyntaxKind::ImportClause, start);
        self.alloc(ImportClause {
            data,
            is_type_only,
            name,
            named_bindings,
        })
    }

    fn parse_namespace_import(&mut self) -> NamedBindings<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::AsteriskToken);
        self.parse_expected(SyntaxKind::AsKeyword);
        let name = ModuleExportName::Identifier(self.parse_identifier());
        let data = self.finish_node(SyntaxKind::NamespaceImport, start);
        NamedBindings::Namespace(self.alloc(NamespaceBinding { data, name }))
    }

    /// `{ a, b as c }` for imports (`NamedImports`) and exports
    /// (`NamedExports`).
    fn parse_named_specifiers(&mut self, kind: SyntaxKind) -> &'a NamedSpecifiers<'a> {
        let start = self.node_start();
        let specifier_kind = if kind == SyntaxKind::NamedImports {
            SyntaxKind::ImportSpecifier
        } else {
            SyntaxKind::ExportSpecifier
        };
        let list = self.parse_bracketed_list(
            ListContext::ImportOrExportSpecifiers,
            SyntaxKind::OpenBraceToken,
            SyntaxKind::CloseBraceToken,
            |p| p.parse_import_or_export_specifier(specifier_kind),
        );
        let elements = self.alloc_slice(list.elements);
        let data = self.finish_node(kind, start);
        self.alloc(NamedSpecifiers { data, elements })
    }

    fn parse_import_or_export_specifier(&mut self, kind: SyntaxKind) -> ImportOrExportSpecifier<'a> {
        let start = self.node_start();
        let mut check_keyword_at = self.keyword_used_as_identifier();
        let mut is_type_only = false;
        let mut property_name = None;
        let mut can_parse_as_keyword = true;
        let mut name = self.parse_module_export_name();

        if matches!(name, ModuleExportName::Identifier(id) if id.text == "type") {
            if self.token() == SyntaxKind::AsKeyword {
                // { type as ...? }
                let first_as = self.parse_identifier_name();
                if self.token() == SyntaxKind::AsKeyword {
                    // { type as as ...? }
                    let second_as = self.parse_identifier_name();
                    if self.token().is_identifier_or_keyword() {
                        // { type as as something }
                        is_type_only = true;
                        property_name = Some(ModuleExportName::Identifier(first_as));
                        check_keyword_at = self.keyword_used_as_identifier();
                        name = self.parse_module_export_name();
                    } else {
                        // { type as as }
                        property_name = Some(name);
                        name = ModuleExportName::Identifier(second_as);
                    }
                    can_parse_as_keyword = false;
                } else if self.token().is_identifier_or_keyword() {
                    // { type as something }
                    property_name = Some(name);
                    can_parse_as_keyword = false;
                    check_keyword_at = self.keyword_used_as_identifier();
                    name = self.parse_module_export_name();
                } else {
                    // { type as }
                    is_type_only = true;
                    name = ModuleExportName::Identifier(first_as);
                }
            } else if self.token().is_identifier_or_keyword() || self.token() == SyntaxKind::StringLiteral {
                // { type something ...? }
                is_type_only = true;
                check_keyword_at = self.keyword_used_as_identifier();
                name = self.parse_module_export_name();
            }
        }

        if can_parse_as_keyword && self.token() == SyntaxKind::AsKeyword {
            property_name = Some(name);
            self.parse_expected(SyntaxKind::AsKeyword);
            check_keyword_at = self.keyword_used_as_identifier();
            name = self.parse_module_export_name();
        }

        // An import binds its local name, which must not be a reserved word.
        if kind == SyntaxKind::ImportSpecifier {
            if let Some(range) = check_keyword_at {
                self.error_at_range(range, &messages::IDENTIFIER_EXPECTED, &[]);
            }
        }

        let data = self.finish_node(kind, start);
        ImportOrExportSpecifier {
            data,
            is_type_only,
            property_name,
            name,
        }
    }

    /// Range of the current token if it is a reserved word.
    fn keyword_used_as_identifier(&self) -> Option<tern_core::text::TextRange> {
        (self.token().is_keyword() && !self.is_identifier()).then(|| self.scanner.token_range())
    }

    fn parse_module_export_name(&mut self) -> ModuleExportName<'a> {
        if self.token() == SyntaxKind::StringLiteral {
            ModuleExportName::StringLiteral(self.parse_literal_node())
        } else {
            ModuleExportName::Identifier(self.parse_identifier_name())
        }
    }

    fn parse_module_specifier(&mut self) -> Expression<'a> {
        if self.token() == SyntaxKind::StringLiteral {
            Expression::Literal(self.parse_literal_node())
        } else {
            self.parse_expression()
        }
    }

    fn try_parse_import_attributes(&mut self) -> Option<&'a ImportAttributes<'a>> {
        if matches!(self.token(), SyntaxKind::WithKeyword | SyntaxKind::AssertKeyword)
            && !self.has_preceding_line_break()
        {
            Some(self.parse_import_attributes())
        } else {
            None
        }
    }

    pub(super) fn parse_import_attributes(&mut self) -> &'a ImportAttributes<'a> {
        let start = self.node_start();
        let token = self.token();
        self.next_token();
        let list = self.parse_bracketed_list(
            ListContext::ImportAttributes,
            SyntaxKind::OpenBraceToken,
            SyntaxKind::CloseBraceToken,
            Self::parse_import_attribute,
        );
        let elements = self.alloc_slice(list.elements);
        let data = self.finish_node(SyntaxKind::ImportAttributes, start);
        self.alloc(ImportAttributes { data, token, elements })
    }

    fn parse_import_attribute(&mut self) -> ImportAttribute<'a> {
        let start = self.node_start();
        let name = self.parse_module_export_name();
        self.parse_expected(SyntaxKind::ColonToken);
        let value = self.parse_assignment_expression_or_higher(true);
        let data = self.finish_node(SyntaxKind::ImportAttribute, start);
        ImportAttribute { data, name, value }
    }

    fn parse_import_equals_declaration(
        &mut self,
        start: NodeStart,
        modifiers: Modifiers<'a>,
        name: &'a Identifier<'a>,
        is_type_only: bool,
    ) -> Statement<'a> {
        self.parse_expected(SyntaxKind::EqualsToken);
        let module_reference = if self.token() == SyntaxKind::RequireKeyword
            && self.look_ahead_next(|p| p.token() == SyntaxKind::OpenParenToken)
        {
            let reference_start = self.node_start();
            self.parse_expected(SyntaxKind::RequireKeyword);
            self.parse_expected(SyntaxKind::OpenParenToken);
            let expression = self.parse_module_specifier();
            self.parse_expected(SyntaxKind::CloseParenToken);
            let data = self.finish_node(SyntaxKind::ExternalModuleReference, reference_start);
            ModuleReference::External(self.alloc(ExternalModuleReference { data, expression }))
        } else {
            ModuleReference::Entity(self.parse_entity_name(false, None))
        };
        self.parse_semicolon();
        let mut data = self.finish_node(SyntaxKind::ImportEqualsDeclaration, start);
        data.modifier_flags = Self::modifier_flags_of(modifiers);
        Statement::ImportEquals(self.alloc(ImportEqualsDeclaration {
            data,
            modifiers,
            is_type_only,
            name,
            module_reference,
        }))
    }

    // ========================================================================
    // Exports
    // ========================================================================

    fn parse_export_assignment(&mut self, start: NodeStart, modifiers: Modifiers<'a>) -> Statement<'a> {
        let is_export_equals = if self.parse_optional(SyntaxKind::EqualsToken) {
            true
        } else {
            self.parse_expected(SyntaxKind::DefaultKeyword);
            false
        };
        let expression = self.with_context(NodeFlags::AWAIT_CONTEXT, true, |p| {
            p.parse_assignment_expression_or_higher(true)
        });
        self.parse_semicolon();
        let mut data = self.finish_node(SyntaxKind::ExportAssignment, start);
        data.modifier_flags = Self::modifier_flags_of(modifiers);
        Statement::ExportAssignment(self.alloc(ExportAssignment {
            data,
            modifiers,
            is_export_equals,
            expression,
        }))
    }

    fn parse_namespace_export_declaration(&mut self, start: NodeStart) -> Statement<'a> {
        self.parse_expected(SyntaxKind::AsKeyword);
        self.parse_expected(SyntaxKind::NamespaceKeyword);
        let name = self.parse_identifier();
        self.parse_semicolon();
        let data = self.finish_node(SyntaxKind::NamespaceExportDeclaration, start);
        Statement::NamespaceExport(self.alloc(NamespaceExportDeclaration { data, name }))
    }

    fn parse_export_declaration(&mut self, start: NodeStart, modifiers: Modifiers<'a>) -> Statement<'a> {
        self.with_context(NodeFlags::AWAIT_CONTEXT, true, |p| p.parse_export_declaration_worker(start, modifiers))
    }

    fn parse_export_declaration_worker(&mut self, start: NodeStart, modifiers: Modifiers<'a>) -> Statement<'a> {
        let is_type_only = self.parse_optional(SyntaxKind::TypeKeyword);
        let namespace_start = self.node_start();
        let mut module_specifier = None;

        let export_clause = if self.parse_optional(SyntaxKind::AsteriskToken) {
            let clause = if self.parse_optional(SyntaxKind::AsKeyword) {
                let name = self.parse_module_export_name();
                let data = self.finish_node(SyntaxKind::NamespaceExport, namespace_start);
                Some(NamedBindings::Namespace(self.alloc(NamespaceBinding { data, name })))
            } else {
                None
            };
            self.parse_expected(SyntaxKind::FromKeyword);
            module_specifier = Some(self.parse_module_specifier());
            clause
        } else {
            let clause = self.parse_named_specifiers(SyntaxKind::NamedExports);
            if self.token() == SyntaxKind::FromKeyword
                || (self.token() == SyntaxKind::StringLiteral && !self.has_preceding_line_break())
            {
                self.parse_expected(SyntaxKind::FromKeyword);
                module_specifier = Some(self.parse_module_specifier());
            }
            Some(NamedBindings::Named(clause))
        };

        let attributes = if module_specifier.is_some() {
            self.try_parse_import_attributes()
        } else {
            None
        };
        self.parse_semicolon();
        let mut data = self.finish_node(SyntaxKind::ExportDeclaration, start);
        data.modifier_flags = Self::modifier_flags_of(modifiers);
        Statement::Export(self.alloc(ExportDeclaration {
            data,
            modifiers,
            is_type_only,
            export_clause,
            module_specifier,
            attributes,
        }))
    }
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;
    use tern_ast::node::{ClassElement, ModuleBody, NamedBindings, Statement};
    use tern_ast::syntax_kind::SyntaxKind;
    use tern_ast::types::{ModifierFlags, NodeFlags};

    use crate::options::ParseOptions;
    use crate::parser::Parser;

    fn parse_statements<T>(source: &str, f: impl FnOnce(&[Statement<'_>], usize) -> T) -> T {
        let arena = Bump::new();
        let result = Parser::new(&arena, source, ParseOptions::default()).parse_source_file();
        f(result.source_file.statements, result.diagnostics.len())
    }

    #[test]
    fn test_class_member_kinds() {
        let source = "class C extends B implements I, J {
            x = 1;
            static y?: number;
            constructor(public a: string) { super(); }
            m<T>(t: T): T { return t; }
            get v() { return 1; }
            set v(value) {}
            [key: string]: any;
            static { init(); }
            ;
        }";
        parse_statements(source, |statements, errors| {
            assert_eq!(errors, 0);
            let class = match statements[0] {
                Statement::Class(class) => class,
                other => panic!("expected class, got {:?}", other),
            };
            let heritage: Vec<(SyntaxKind, usize)> =
                class.heritage_clauses.iter().map(|clause| (clause.token, clause.types.len())).collect();
            assert_eq!(heritage, [(SyntaxKind::ExtendsKeyword, 1), (SyntaxKind::ImplementsKeyword, 2)]);

            let kinds: Vec<&str> = class
                .members
                .iter()
                .map(|member| match member {
                    ClassElement::Property(_) => "property",
                    ClassElement::Method(_) => "method",
                    ClassElement::Constructor(_) => "constructor",
                    ClassElement::GetAccessor(_) => "get",
                    ClassElement::SetAccessor(_) => "set",
                    ClassElement::Index(_) => "index",
                    ClassElement::StaticBlock(_) => "static block",
                    ClassElement::Semicolon(_) => "semicolon",
                })
                .collect();
            assert_eq!(
                kinds,
                [
                    "property",
                    "property",
                    "constructor",
                    "method",
                    "get",
                    "set",
                    "index",
                    "static block",
                    "semicolon"
                ]
            );
            match class.members[1] {
                ClassElement::Property(property) => {
                    assert!(property.data.modifier_flags.contains(ModifierFlags::STATIC));
                    assert!(property.postfix_token.is_some());
                }
                other => panic!("expected property, got {:?}", other),
            }
        });
    }

    #[test]
    fn test_get_and_set_as_member_names() {
        parse_statements("class C { get() {} set = 1; }", |statements, errors| {
            assert_eq!(errors, 0);
            match statements[0] {
                Statement::Class(class) => {
                    assert!(matches!(class.members[0], ClassElement::Method(_)));
                    assert!(matches!(class.members[1], ClassElement::Property(_)));
                }
                other => panic!("expected class, got {:?}", other),
            }
        });
    }

    #[test]
    fn test_function_overloads_have_no_body() {
        let source = "function f(a: string): void; function f(a: any) {}";
        parse_statements(source, |statements, errors| {
            assert_eq!(errors, 0);
            let bodies: Vec<bool> = statements
                .iter()
                .map(|statement| match statement {
                    Statement::Function(function) => function.body.is_some(),
                    other => panic!("expected function, got {:?}", other),
                })
                .collect();
            assert_eq!(bodies, [false, true]);
        });
    }

    #[test]
    fn test_modifier_flags_on_declarations() {
        parse_statements("export default async function () {} declare const enum E { A }", |statements, _| {
            match statements[0] {
                Statement::Function(function) => {
                    let expected = ModifierFlags::EXPORT | ModifierFlags::DEFAULT | ModifierFlags::ASYNC;
                    assert_eq!(function.data.modifier_flags, expected);
                    assert!(function.name.is_none());
                }
                other => panic!("expected function, got {:?}", other),
            }
            match statements[1] {
                Statement::Enum(declaration) => {
                    let expected = ModifierFlags::AMBIENT | ModifierFlags::CONST;
                    assert_eq!(declaration.data.modifier_flags, expected);
                    assert_eq!(declaration.members.len(), 1);
                }
                other => panic!("expected enum, got {:?}", other),
            }
        });
    }

    #[test]
    fn test_dotted_namespace_nests() {
        parse_statements("namespace A.B { export const x = 1; }", |statements, errors| {
            assert_eq!(errors, 0);
            let outer = match statements[0] {
                Statement::Module(module) => module,
                other => panic!("expected namespace, got {:?}", other),
            };
            assert!(outer.data.flags.contains(NodeFlags::NAMESPACE));
            match outer.body {
                Some(ModuleBody::Namespace(inner)) => {
                    assert!(inner.data.flags.contains(NodeFlags::NESTED_NAMESPACE));
                    assert!(matches!(inner.body, Some(ModuleBody::Block(block)) if block.statements.len() == 1));
                }
                other => panic!("expected nested namespace, got {:?}", other),
            }
        });
    }

    #[test]
    fn test_ambient_module_and_global() {
        parse_statements("declare module \"m\"; declare global { }", |statements, errors| {
            assert_eq!(errors, 0);
            match statements[0] {
                Statement::Module(module) => assert!(module.body.is_none()),
                other => panic!("expected module, got {:?}", other),
            }
            match statements[1] {
                Statement::Module(module) => {
                    assert!(module.data.flags.contains(NodeFlags::GLOBAL_AUGMENTATION));
                }
                other => panic!("expected global augmentation, got {:?}", other),
            }
        });
    }

    #[test]
    fn test_import_clause_shapes() {
        let source = "import d, { a, b as c } from \"m\"; import type * as ns from \"n\"; import \"side\";";
        parse_statements(source, |statements, errors| {
            assert_eq!(errors, 0);
            let clauses: Vec<_> = statements
                .iter()
                .map(|statement| match statement {
                    Statement::Import(import) => import.import_clause,
                    other => panic!("expected import, got {:?}", other),
                })
                .collect();

            let first = clauses[0].expect("import clause");
            assert_eq!(first.name.map(|name| name.text), Some("d"));
            assert!(matches!(first.named_bindings, Some(NamedBindings::Named(named)) if named.elements.len() == 2));

            let second = clauses[1].expect("import clause");
            assert!(second.is_type_only);
            assert!(matches!(second.named_bindings, Some(NamedBindings::Namespace(_))));

            assert!(clauses[2].is_none());
        });
    }

    #[test]
    fn test_type_named_import_is_not_type_only() {
        parse_statements("import type from \"m\";", |statements, errors| {
            assert_eq!(errors, 0);
            match statements[0] {
                Statement::Import(import) => {
                    let clause = import.import_clause.expect("import clause");
                    assert!(!clause.is_type_only);
                    assert_eq!(clause.name.map(|name| name.text), Some("type"));
                }
                other => panic!("expected import, got {:?}", other),
            }
        });
    }

    #[test]
    fn test_export_forms() {
        let source = "export * from \"a\"; export { x as y }; export type { T } from \"b\"; export = z;";
        parse_statements(source, |statements, errors| {
            assert_eq!(errors, 0);
            match statements[0] {
                Statement::Export(export) => {
                    assert!(export.export_clause.is_none());
                    assert!(export.module_specifier.is_some());
                }
                other => panic!("expected export *, got {:?}", other),
            }
            match statements[1] {
                Statement::Export(export) => assert!(export.module_specifier.is_none()),
                other => panic!("expected export list, got {:?}", other),
            }
            match statements[2] {
                Statement::Export(export) => assert!(export.is_type_only),
                other => panic!("expected type export, got {:?}", other),
            }
            assert!(matches!(statements[3], Statement::ExportAssignment(_)));
        });
    }

    #[test]
    fn test_dangling_modifier_becomes_missing_declaration() {
        parse_statements("@sealed", |statements, errors| {
            assert_eq!(errors, 1);
            match statements[0] {
                Statement::MissingDeclaration(missing) => {
                    assert!(!missing.data.is_missing());
                    assert!(missing.data.contains_error());
                    assert_eq!(missing.data.range, tern_core::text::TextRange::new(0, 7));
                    assert_eq!(missing.data.modifier_flags, ModifierFlags::DECORATOR);
                }
                other => panic!("expected missing declaration, got {:?}", other),
            }
        });
    }
}
