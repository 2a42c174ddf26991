//! Statements, variable declarations and binding patterns.

use tern_ast::node::*;
use tern_ast::syntax_kind::SyntaxKind;
use tern_ast::types::*;
use tern_ast::visitor::AstNode;
use tern_diagnostics::{messages, DiagnosticMessage};

use super::list::ListContext;
use super::Parser;
use crate::token_table::attrs;

impl<'a> Parser<'a> {
    pub(super) fn is_start_of_statement(&mut self) -> bool {
        let token = self.token();
        if attrs(token).can_start_statement() {
            return true;
        }
        match token {
            SyntaxKind::ImportKeyword => {
                self.is_start_of_declaration()
                    || self.look_ahead_next(|p| {
                        matches!(
                            p.token(),
                            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken | SyntaxKind::DotToken
                        )
                    })
            }
            SyntaxKind::ConstKeyword | SyntaxKind::ExportKeyword => self.is_start_of_declaration(),
            SyntaxKind::AccessorKeyword
            | SyntaxKind::PublicKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::ProtectedKeyword
            | SyntaxKind::StaticKeyword
            | SyntaxKind::ReadonlyKeyword
            | SyntaxKind::AbstractKeyword
            | SyntaxKind::OverrideKeyword => {
                self.is_start_of_declaration()
                    || !self.look_ahead_next(|p| p.token().is_identifier_or_keyword() && !p.has_preceding_line_break())
            }
            _ => self.is_start_of_expression(),
        }
    }

    pub(super) fn parse_statement(&mut self) -> Statement<'a> {
        if !self.enter_recursion() {
            let expression = Expression::Identifier(self.create_missing_identifier());
            return self.finish_expression_statement(expression);
        }
        let statement = self.parse_statement_worker();
        self.exit_recursion();
        statement
    }

    fn parse_statement_worker(&mut self) -> Statement<'a> {
        match self.token() {
            SyntaxKind::SemicolonToken => self.parse_empty_statement(),
            SyntaxKind::OpenBraceToken => Statement::Block(self.parse_block()),
            SyntaxKind::VarKeyword => self.parse_variable_statement(self.node_start(), None),
            SyntaxKind::LetKeyword if self.is_let_declaration() => {
                self.parse_variable_statement(self.node_start(), None)
            }
            SyntaxKind::AwaitKeyword if self.is_await_using_declaration() => {
                self.parse_variable_statement(self.node_start(), None)
            }
            SyntaxKind::UsingKeyword if self.is_using_declaration() => {
                self.parse_variable_statement(self.node_start(), None)
            }
            SyntaxKind::FunctionKeyword => {
                Statement::Function(self.parse_function_declaration(self.node_start(), None))
            }
            SyntaxKind::ClassKeyword => Statement::Class(self.parse_class_declaration(self.node_start(), None)),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ContinueKeyword => self.parse_break_or_continue_statement(SyntaxKind::ContinueStatement),
            SyntaxKind::BreakKeyword => self.parse_break_or_continue_statement(SyntaxKind::BreakStatement),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::WithKeyword => self.parse_with_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            // `catch` and `finally` without `try` still parse as a try
            // statement so the block is not lost.
            SyntaxKind::TryKeyword | SyntaxKind::CatchKeyword | SyntaxKind::FinallyKeyword => {
                self.parse_try_statement()
            }
            SyntaxKind::DebuggerKeyword => self.parse_debugger_statement(),
            SyntaxKind::AtToken => self.parse_declaration(),
            SyntaxKind::AsyncKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::TypeKeyword
            | SyntaxKind::ModuleKeyword
            | SyntaxKind::NamespaceKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::ExportKeyword
            | SyntaxKind::ImportKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::ProtectedKeyword
            | SyntaxKind::PublicKeyword
            | SyntaxKind::AbstractKeyword
            | SyntaxKind::AccessorKeyword
            | SyntaxKind::StaticKeyword
            | SyntaxKind::ReadonlyKeyword
            | SyntaxKind::OverrideKeyword
            | SyntaxKind::GlobalKeyword
                if self.is_start_of_declaration() =>
            {
                self.parse_declaration()
            }
            _ => self.parse_expression_or_labeled_statement(),
        }
    }

    fn parse_empty_statement(&mut self) -> Statement<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::SemicolonToken);
        let data = self.finish_node(SyntaxKind::EmptyStatement, start);
        Statement::Empty(self.alloc(Token { data }))
    }

    fn parse_debugger_statement(&mut self) -> Statement<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::DebuggerKeyword);
        self.parse_semicolon();
        let data = self.finish_node(SyntaxKind::DebuggerStatement, start);
        Statement::Debugger(self.alloc(Token { data }))
    }

    pub(super) fn parse_block(&mut self) -> &'a Block<'a> {
        self.parse_block_with_message(None)
    }

    /// `{ statements }`. A missing `{` is reported with `message` when
    /// given and yields an empty block.
    pub(super) fn parse_block_with_message(&mut self, message: Option<&'static DiagnosticMessage>) -> &'a Block<'a> {
        let start = self.node_start();
        let opened = match message {
            Some(message) => self.parse_expected_with_message(SyntaxKind::OpenBraceToken, message),
            None => self.parse_expected(SyntaxKind::OpenBraceToken),
        };
        let statements = if opened {
            let statements = self.parse_list(ListContext::BlockStatements, Self::parse_statement);
            self.parse_expected(SyntaxKind::CloseBraceToken);
            statements
        } else {
            &[]
        };
        let data = self.finish_node(SyntaxKind::Block, start);
        self.alloc(Block { data, statements })
    }

    /// `( expression )` after `if`, `while` and `switch`.
    fn parse_condition(&mut self) -> Expression<'a> {
        if self.options.allow_omitted_condition_parens && self.token() != SyntaxKind::OpenParenToken {
            return self.allow_in_and(Self::parse_expression);
        }
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.allow_in_and(Self::parse_expression);
        self.parse_expected(SyntaxKind::CloseParenToken);
        expression
    }

    fn parse_if_statement(&mut self) -> Statement<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::IfKeyword);
        let expression = self.parse_condition();
        let then_statement = self.parse_statement();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            Some(self.parse_statement())
        } else {
            None
        };
        let data = self.finish_node(SyntaxKind::IfStatement, start);
        Statement::If(self.alloc(IfStatement {
            data,
            expression,
            then_statement,
            else_statement,
        }))
    }

    fn parse_do_statement(&mut self) -> Statement<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::DoKeyword);
        let statement = self.parse_statement();
        self.parse_expected(SyntaxKind::WhileKeyword);
        let expression = self.parse_condition();
        // `do x; while (y) z;` needs no `;` after the condition.
        self.parse_optional(SyntaxKind::SemicolonToken);
        let data = self.finish_node(SyntaxKind::DoStatement, start);
        Statement::Do(self.alloc(DoStatement {
            data,
            statement,
            expression,
        }))
    }

    fn parse_while_statement(&mut self) -> Statement<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::WhileKeyword);
        let expression = self.parse_condition();
        let statement = self.parse_statement();
        let data = self.finish_node(SyntaxKind::WhileStatement, start);
        Statement::While(self.alloc(WhileStatement {
            data,
            expression,
            statement,
        }))
    }

    fn parse_with_statement(&mut self) -> Statement<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::WithKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.allow_in_and(Self::parse_expression);
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        let data = self.finish_node(SyntaxKind::WithStatement, start);
        Statement::With(self.alloc(WithStatement {
            data,
            expression,
            statement,
        }))
    }

    fn parse_for_statement(&mut self) -> Statement<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::ForKeyword);
        let await_modifier = self.parse_optional_token(SyntaxKind::AwaitKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);

        let initializer = if self.token() == SyntaxKind::SemicolonToken {
            None
        } else if self.is_for_initializer_declaration() {
            Some(ForInitializer::Variables(self.parse_variable_declaration_list(true)))
        } else {
            Some(ForInitializer::Expression(self.disallow_in_and(Self::parse_expression)))
        };

        if let Some(initializer) = initializer {
            let is_of = if await_modifier.is_some() {
                self.parse_expected(SyntaxKind::OfKeyword)
            } else {
                self.parse_optional(SyntaxKind::OfKeyword)
            };
            if is_of || self.parse_optional(SyntaxKind::InKeyword) {
                let expression = if is_of {
                    self.allow_in_and(|p| p.parse_assignment_expression_or_higher(true))
                } else {
                    self.allow_in_and(Self::parse_expression)
                };
                self.parse_expected(SyntaxKind::CloseParenToken);
                let statement = self.parse_statement();
                let kind = if is_of {
                    SyntaxKind::ForOfStatement
                } else {
                    SyntaxKind::ForInStatement
                };
                let data = self.finish_node(kind, start);
                return Statement::ForInOrOf(self.alloc(ForInOrOfStatement {
                    data,
                    await_modifier,
                    initializer,
                    expression,
                    statement,
                }));
            }
        }

        self.parse_expected(SyntaxKind::SemicolonToken);
        let condition = if matches!(self.token(), SyntaxKind::SemicolonToken | SyntaxKind::CloseParenToken) {
            None
        } else {
            Some(self.allow_in_and(Self::parse_expression))
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        let incrementor = if self.token() == SyntaxKind::CloseParenToken {
            None
        } else {
            Some(self.allow_in_and(Self::parse_expression))
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        let data = self.finish_node(SyntaxKind::ForStatement, start);
        Statement::For(self.alloc(ForStatement {
            data,
            initializer,
            condition,
            incrementor,
            statement,
        }))
    }

    fn is_for_initializer_declaration(&mut self) -> bool {
        match self.token() {
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => true,
            SyntaxKind::LetKeyword => self.is_let_declaration(),
            SyntaxKind::UsingKeyword => self.look_ahead_next(|p| {
                p.is_identifier() && p.token() != SyntaxKind::OfKeyword && !p.has_preceding_line_break()
            }),
            SyntaxKind::AwaitKeyword => self.is_await_using_declaration(),
            _ => false,
        }
    }

    fn parse_break_or_continue_statement(&mut self, kind: SyntaxKind) -> Statement<'a> {
        let start = self.node_start();
        self.next_token();
        let label = if self.can_parse_semicolon() {
            None
        } else {
            Some(self.parse_identifier())
        };
        self.parse_semicolon();
        let data = self.finish_node(kind, start);
        Statement::BreakOrContinue(self.alloc(BreakOrContinueStatement { data, label }))
    }

    fn parse_return_statement(&mut self) -> Statement<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::ReturnKeyword);
        let expression = if self.can_parse_semicolon() {
            None
        } else {
            Some(self.allow_in_and(Self::parse_expression))
        };
        self.parse_semicolon();
        let data = self.finish_node(SyntaxKind::ReturnStatement, start);
        Statement::Return(self.alloc(ReturnStatement { data, expression }))
    }

    fn parse_throw_statement(&mut self) -> Statement<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::ThrowKeyword);
        let expression = if self.has_preceding_line_break() {
            self.error_at_current_token(&messages::LINE_BREAK_NOT_PERMITTED_HERE, &[]);
            Expression::Identifier(self.create_missing_identifier())
        } else {
            self.allow_in_and(Self::parse_expression)
        };
        self.parse_semicolon();
        let data = self.finish_node(SyntaxKind::ThrowStatement, start);
        Statement::Throw(self.alloc(ThrowStatement { data, expression }))
    }

    fn parse_switch_statement(&mut self) -> Statement<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::SwitchKeyword);
        let expression = self.parse_condition();

        let block_start = self.node_start();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let clauses = self.parse_list(ListContext::SwitchClauses, Self::parse_case_or_default_clause);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let block_data = self.finish_node(SyntaxKind::CaseBlock, block_start);
        let case_block = self.alloc(CaseBlock {
            data: block_data,
            clauses,
        });

        let data = self.finish_node(SyntaxKind::SwitchStatement, start);
        Statement::Switch(self.alloc(SwitchStatement {
            data,
            expression,
            case_block,
        }))
    }

    fn parse_case_or_default_clause(&mut self) -> CaseOrDefaultClause<'a> {
        let start = self.node_start();
        let (kind, expression) = if self.parse_optional(SyntaxKind::CaseKeyword) {
            (SyntaxKind::CaseClause, Some(self.allow_in_and(Self::parse_expression)))
        } else {
            self.parse_expected(SyntaxKind::DefaultKeyword);
            (SyntaxKind::DefaultClause, None)
        };
        self.parse_expected(SyntaxKind::ColonToken);
        let statements = self.parse_list(ListContext::SwitchClauseStatements, Self::parse_statement);
        let data = self.finish_node(kind, start);
        CaseOrDefaultClause {
            data,
            expression,
            statements,
        }
    }

    fn parse_try_statement(&mut self) -> Statement<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::TryKeyword);
        let try_block = self.parse_block();

        let catch_clause = if self.token() == SyntaxKind::CatchKeyword {
            Some(self.parse_catch_clause())
        } else {
            None
        };

        let finally_block = if self.parse_optional(SyntaxKind::FinallyKeyword) {
            Some(self.parse_block())
        } else if catch_clause.is_none() && !self.options.allow_bare_try {
            self.error_at_current_token(&messages::CATCH_OR_FINALLY_EXPECTED, &[]);
            Some(self.parse_block())
        } else {
            None
        };

        let data = self.finish_node(SyntaxKind::TryStatement, start);
        Statement::Try(self.alloc(TryStatement {
            data,
            try_block,
            catch_clause,
            finally_block,
        }))
    }

    fn parse_catch_clause(&mut self) -> &'a CatchClause<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::CatchKeyword);
        let variable_declaration = if self.parse_optional(SyntaxKind::OpenParenToken) {
            let declaration = self.parse_variable_declaration(false);
            self.parse_expected(SyntaxKind::CloseParenToken);
            Some(self.alloc(declaration))
        } else {
            None
        };
        let block = self.parse_block();
        let data = self.finish_node(SyntaxKind::CatchClause, start);
        self.alloc(CatchClause {
            data,
            variable_declaration,
            block,
        })
    }

    fn parse_expression_or_labeled_statement(&mut self) -> Statement<'a> {
        let start = self.node_start();
        let expression = self.allow_in_and(Self::parse_expression);

        if let Expression::Identifier(label) = expression {
            if !label.data.is_missing() && self.parse_optional(SyntaxKind::ColonToken) {
                let statement = self.parse_statement();
                let data = self.finish_node(SyntaxKind::LabeledStatement, start);
                return Statement::Labeled(self.alloc(LabeledStatement { data, label, statement }));
            }
        }

        if !self.try_parse_semicolon()
            && !(self.options.allow_omitted_semicolons && self.is_start_of_statement())
        {
            self.report_missing_semicolon_after(expression);
        }
        let data = self.finish_node(SyntaxKind::ExpressionStatement, start);
        Statement::Expression(self.alloc(ExpressionStatement { data, expression }))
    }

    /// `foo bar` reads as a misspelled keyword, anything else as a
    /// missing `;`.
    fn report_missing_semicolon_after(&mut self, expression: Expression<'a>) {
        match expression {
            Expression::Identifier(identifier) if !identifier.data.is_missing() => {
                if self.token() != SyntaxKind::Unknown {
                    self.error_at_range(identifier.data.range, &messages::UNEXPECTED_KEYWORD_OR_IDENTIFIER, &[]);
                }
            }
            _ => {
                self.error_at_current_token(&messages::_0_EXPECTED, &[SyntaxKind::SemicolonToken.display_name()]);
            }
        }
    }

    fn finish_expression_statement(&mut self, expression: Expression<'a>) -> Statement<'a> {
        let start = self.node_start_at(expression.data());
        let data = self.finish_node(SyntaxKind::ExpressionStatement, start);
        Statement::Expression(self.alloc(ExpressionStatement { data, expression }))
    }

    // ========================================================================
    // Variable declarations
    // ========================================================================

    fn is_let_declaration(&mut self) -> bool {
        self.look_ahead_next(|p| p.is_binding_identifier_or_pattern())
    }

    fn is_using_declaration(&mut self) -> bool {
        self.look_ahead_next(|p| p.is_identifier() && !p.has_preceding_line_break())
    }

    fn is_await_using_declaration(&mut self) -> bool {
        self.look_ahead_next(|p| {
            if p.token() != SyntaxKind::UsingKeyword || p.has_preceding_line_break() {
                return false;
            }
            p.next_token();
            p.is_identifier() && !p.has_preceding_line_break()
        })
    }

    pub(super) fn is_binding_identifier_or_pattern(&self) -> bool {
        matches!(self.token(), SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken) || self.is_identifier()
    }

    pub(super) fn parse_variable_statement(
        &mut self,
        start: super::NodeStart,
        modifiers: Modifiers<'a>,
    ) -> Statement<'a> {
        let declaration_list = self.parse_variable_declaration_list(false);
        self.parse_semicolon();
        let mut data = self.finish_node(SyntaxKind::VariableStatement, start);
        data.modifier_flags = Self::modifier_flags_of(modifiers);
        Statement::Variable(self.alloc(VariableStatement {
            data,
            modifiers,
            declaration_list,
        }))
    }

    pub(super) fn parse_variable_declaration_list(
        &mut self,
        in_for_statement_initializer: bool,
    ) -> &'a VariableDeclarationList<'a> {
        let start = self.node_start();
        let flags = match self.token() {
            SyntaxKind::LetKeyword => NodeFlags::LET,
            SyntaxKind::ConstKeyword => NodeFlags::CONST,
            SyntaxKind::UsingKeyword => NodeFlags::USING,
            SyntaxKind::AwaitKeyword => {
                self.next_token();
                NodeFlags::AWAIT_USING
            }
            _ => NodeFlags::NONE,
        };
        self.next_token();

        // `for (let of x)` declares nothing.
        let declarations = if self.token() == SyntaxKind::OfKeyword
            && self.look_ahead_next(|p| {
                p.is_identifier() && {
                    p.next_token();
                    p.token() == SyntaxKind::CloseParenToken
                }
            }) {
            &[]
        } else {
            let list = self.with_context(NodeFlags::DISALLOW_IN_CONTEXT, in_for_statement_initializer, |p| {
                p.parse_delimited_list(ListContext::VariableDeclarations, |p| {
                    p.parse_variable_declaration(!in_for_statement_initializer)
                })
            });
            self.alloc_slice(list.elements)
        };

        let mut data = self.finish_node(SyntaxKind::VariableDeclarationList, start);
        data.flags |= flags;
        self.alloc(VariableDeclarationList { data, declarations })
    }

    pub(super) fn parse_variable_declaration(&mut self, allow_exclamation: bool) -> VariableDeclaration<'a> {
        let start = self.node_start();
        let name = self.parse_identifier_or_pattern();
        let exclamation_token = if allow_exclamation
            && matches!(name, BindingName::Identifier(_))
            && self.token() == SyntaxKind::ExclamationToken
            && !self.has_preceding_line_break()
        {
            Some(self.parse_token_node())
        } else {
            None
        };
        let type_annotation = self.parse_type_annotation();
        let initializer = if matches!(self.token(), SyntaxKind::InKeyword | SyntaxKind::OfKeyword) {
            None
        } else {
            self.parse_initializer()
        };
        let data = self.finish_node(SyntaxKind::VariableDeclaration, start);
        VariableDeclaration {
            data,
            name,
            exclamation_token,
            type_annotation,
            initializer,
        }
    }

    /// `= expression`, if present.
    pub(super) fn parse_initializer(&mut self) -> Option<Expression<'a>> {
        if self.parse_optional(SyntaxKind::EqualsToken) {
            Some(self.parse_assignment_expression_or_higher(true))
        } else {
            None
        }
    }

    // ========================================================================
    // Binding patterns
    // ========================================================================

    pub(super) fn parse_identifier_or_pattern(&mut self) -> BindingName<'a> {
        match self.token() {
            SyntaxKind::OpenBracketToken => BindingName::ArrayBindingPattern(self.parse_array_binding_pattern()),
            SyntaxKind::OpenBraceToken => BindingName::ObjectBindingPattern(self.parse_object_binding_pattern()),
            _ => BindingName::Identifier(self.parse_identifier()),
        }
    }

    fn parse_array_binding_pattern(&mut self) -> &'a ArrayBindingPattern<'a> {
        let start = self.node_start();
        let list = self.parse_bracketed_list(
            ListContext::ArrayBindingElements,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::CloseBracketToken,
            Self::parse_array_binding_element,
        );
        if let (Some(comma), Some(ArrayBindingElement::Binding(last))) = (list.trailing_comma, list.elements.last()) {
            if last.dot_dot_dot_token.is_some() {
                self.error_at_range(comma, &messages::A_REST_PARAMETER_OR_BINDING_PATTERN_MAY_NOT_HAVE_A_TRAILING_COMMA, &[]);
            }
        }
        let elements = self.alloc_slice(list.elements);
        let data = self.finish_node(SyntaxKind::ArrayBindingPattern, start);
        self.alloc(ArrayBindingPattern { data, elements })
    }

    fn parse_array_binding_element(&mut self) -> ArrayBindingElement<'a> {
        let start = self.node_start();
        if self.token() == SyntaxKind::CommaToken {
            let data = self.finish_node(SyntaxKind::OmittedExpression, start);
            return ArrayBindingElement::Omitted(self.alloc(Token { data }));
        }
        let dot_dot_dot_token = self.parse_optional_token(SyntaxKind::DotDotDotToken);
        let name = self.parse_identifier_or_pattern();
        let initializer = self.parse_initializer();
        let data = self.finish_node(SyntaxKind::BindingElement, start);
        ArrayBindingElement::Binding(self.alloc(BindingElement {
            data,
            dot_dot_dot_token,
            property_name: None,
            name,
            initializer,
        }))
    }

    fn parse_object_binding_pattern(&mut self) -> &'a ObjectBindingPattern<'a> {
        let start = self.node_start();
        let list = self.parse_bracketed_list(
            ListContext::ObjectBindingElements,
            SyntaxKind::OpenBraceToken,
            SyntaxKind::CloseBraceToken,
            Self::parse_object_binding_element,
        );
        if let (Some(comma), Some(last)) = (list.trailing_comma, list.elements.last()) {
            if last.dot_dot_dot_token.is_some() {
                self.error_at_range(comma, &messages::A_REST_PARAMETER_OR_BINDING_PATTERN_MAY_NOT_HAVE_A_TRAILING_COMMA, &[]);
            }
        }
        let elements = self.alloc_slice(list.elements);
        let data = self.finish_node(SyntaxKind::ObjectBindingPattern, start);
        self.alloc(ObjectBindingPattern { data, elements })
    }

    fn parse_object_binding_element(&mut self) -> BindingElement<'a> {
        let start = self.node_start();
        let dot_dot_dot_token = self.parse_optional_token(SyntaxKind::DotDotDotToken);
        let (property_name, name) = if self.is_identifier() {
            let identifier = self.parse_identifier();
            if self.parse_optional(SyntaxKind::ColonToken) {
                (Some(PropertyName::Identifier(identifier)), self.parse_identifier_or_pattern())
            } else {
                (None, BindingName::Identifier(identifier))
            }
        } else {
            let property_name = self.parse_property_name();
            self.parse_expected(SyntaxKind::ColonToken);
            (Some(property_name), self.parse_identifier_or_pattern())
        };
        let initializer = self.parse_initializer();
        let data = self.finish_node(SyntaxKind::BindingElement, start);
        BindingElement {
            data,
            dot_dot_dot_token,
            property_name,
            name,
            initializer,
        }
    }
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;
    use tern_ast::node::{ForInitializer, Statement};
    use tern_ast::types::{ModifierFlags, NodeFlags};

    use crate::options::ParseOptions;
    use crate::parser::Parser;

    fn parse_statements<T>(source: &str, f: impl FnOnce(&[Statement<'_>], usize) -> T) -> T {
        let arena = Bump::new();
        let result = Parser::new(&arena, source, ParseOptions::default()).parse_source_file();
        f(result.source_file.statements, result.diagnostics.len())
    }

    #[test]
    fn test_for_of_and_for_in() {
        parse_statements("for (const x of y) {} for (k in o) {}", |statements, errors| {
            assert_eq!(errors, 0);
            assert_eq!(statements.len(), 2);
            match statements[0] {
                Statement::ForInOrOf(stmt) => {
                    assert!(stmt.await_modifier.is_none());
                    match stmt.initializer {
                        ForInitializer::Variables(list) => {
                            assert!(list.data.flags.contains(NodeFlags::CONST));
                            assert_eq!(list.declarations.len(), 1);
                        }
                        other => panic!("expected declaration list, got {:?}", other),
                    }
                }
                other => panic!("expected for-of, got {:?}", other),
            }
            match statements[1] {
                Statement::ForInOrOf(stmt) => {
                    assert!(matches!(stmt.initializer, ForInitializer::Expression(_)));
                }
                other => panic!("expected for-in, got {:?}", other),
            }
        });
    }

    #[test]
    fn test_classic_for_with_empty_clauses() {
        parse_statements("for (;;) {}", |statements, errors| {
            assert_eq!(errors, 0);
            match statements[0] {
                Statement::For(stmt) => {
                    assert!(stmt.initializer.is_none());
                    assert!(stmt.condition.is_none());
                    assert!(stmt.incrementor.is_none());
                }
                other => panic!("expected for statement, got {:?}", other),
            }
        });
    }

    #[test]
    fn test_in_is_allowed_inside_for_initializer_parens() {
        parse_statements("for (let i = (a in b) ? 1 : 0; i < 3; i++) {}", |statements, errors| {
            assert_eq!(errors, 0);
            assert!(matches!(statements[0], Statement::For(_)));
        });
    }

    #[test]
    fn test_labeled_statement() {
        parse_statements("outer: while (1) break outer;", |statements, errors| {
            assert_eq!(errors, 0);
            match statements[0] {
                Statement::Labeled(stmt) => {
                    assert_eq!(stmt.label.text, "outer");
                    match stmt.statement {
                        Statement::While(inner) => match inner.statement {
                            Statement::BreakOrContinue(brk) => {
                                assert_eq!(brk.label.map(|l| l.text), Some("outer"));
                            }
                            other => panic!("expected break, got {:?}", other),
                        },
                        other => panic!("expected while, got {:?}", other),
                    }
                }
                other => panic!("expected labeled statement, got {:?}", other),
            }
        });
    }

    #[test]
    fn test_switch_clauses() {
        let source = "switch (x) { case 1: case 2: f(); break; default: g(); }";
        parse_statements(source, |statements, errors| {
            assert_eq!(errors, 0);
            match statements[0] {
                Statement::Switch(stmt) => {
                    let clauses = stmt.case_block.clauses;
                    assert_eq!(clauses.len(), 3);
                    assert!(clauses[0].statements.is_empty());
                    assert_eq!(clauses[1].statements.len(), 2);
                    assert!(clauses[2].expression.is_none());
                }
                other => panic!("expected switch, got {:?}", other),
            }
        });
    }

    #[test]
    fn test_declaration_list_flags() {
        parse_statements("let a = 1, b; const c = 2; var d;", |statements, errors| {
            assert_eq!(errors, 0);
            let flags: Vec<NodeFlags> = statements
                .iter()
                .map(|statement| match statement {
                    Statement::Variable(stmt) => stmt.declaration_list.data.flags & NodeFlags::BLOCK_SCOPED,
                    other => panic!("expected variable statement, got {:?}", other),
                })
                .collect();
            assert_eq!(flags, [NodeFlags::LET, NodeFlags::CONST, NodeFlags::NONE]);
        });
    }

    #[test]
    fn test_exported_variable_carries_modifier_flags() {
        parse_statements("export const x = 1;", |statements, errors| {
            assert_eq!(errors, 0);
            match statements[0] {
                Statement::Variable(stmt) => {
                    assert!(stmt.data.modifier_flags.contains(ModifierFlags::EXPORT));
                }
                other => panic!("expected variable statement, got {:?}", other),
            }
        });
    }

    #[test]
    fn test_try_catch_finally() {
        parse_statements("try { a(); } catch { b(); } finally { c(); }", |statements, errors| {
            assert_eq!(errors, 0);
            match statements[0] {
                Statement::Try(stmt) => {
                    let catch_clause = stmt.catch_clause.expect("catch clause");
                    assert!(catch_clause.variable_declaration.is_none());
                    assert!(stmt.finally_block.is_some());
                }
                other => panic!("expected try statement, got {:?}", other),
            }
        });
    }

    #[test]
    fn test_dangling_else_binds_to_nearest_if() {
        parse_statements("if (a) if (b) x(); else y();", |statements, errors| {
            assert_eq!(errors, 0);
            match statements[0] {
                Statement::If(outer) => {
                    assert!(outer.else_statement.is_none());
                    match outer.then_statement {
                        Statement::If(inner) => assert!(inner.else_statement.is_some()),
                        other => panic!("expected nested if, got {:?}", other),
                    }
                }
                other => panic!("expected if, got {:?}", other),
            }
        });
    }
}
