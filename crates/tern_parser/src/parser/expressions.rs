//! Value expressions.
//!
//! Binary, conditional and assignment operators are folded by one
//! precedence-climbing loop driven by the token table; member access,
//! calls, `!` and tagged templates are the postfix forms of the same
//! table. Arrow functions are recognized up front, speculatively when the
//! first tokens are ambiguous.

use tern_ast::node::*;
use tern_ast::syntax_kind::SyntaxKind;
use tern_ast::types::*;
use tern_diagnostics::messages;

use super::declarations::SignatureFlags;
use super::list::ListContext;
use super::{NodeStart, Parser};
use crate::token_table::{attrs, binary_precedence, OperatorPrecedence};

/// Whether the tokens at `(`, `<` or `async` begin an arrow function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrowLookahead {
    Definitely,
    Possibly,
    Not,
}

impl<'a> Parser<'a> {
    // ========================================================================
    // Entry points
    // ========================================================================

    /// `Expression`: assignment expressions joined by `,`.
    pub(super) fn parse_expression(&mut self) -> Expression<'a> {
        // Decorators end at the first token that is not part of a
        // left-hand-side expression.
        self.with_context(NodeFlags::DECORATOR_CONTEXT, false, Self::parse_comma_expression)
    }

    fn parse_comma_expression(&mut self) -> Expression<'a> {
        let start = self.node_start();
        let mut expression = self.parse_assignment_expression_or_higher(true);
        while self.token() == SyntaxKind::CommaToken {
            let operator_token = self.parse_token_node();
            let right = self.parse_assignment_expression_or_higher(true);
            let data = self.finish_node(SyntaxKind::BinaryExpression, start);
            expression = Expression::Binary(self.alloc(BinaryExpression {
                data,
                left: expression,
                operator_token,
                right,
            }));
        }
        expression
    }

    pub(super) fn parse_assignment_expression_or_higher(&mut self, allow_return_type_in_arrow: bool) -> Expression<'a> {
        if !self.enter_recursion() {
            return self.create_missing_expression();
        }
        let expression = self.parse_assignment_expression_worker(allow_return_type_in_arrow);
        self.exit_recursion();
        expression
    }

    fn parse_assignment_expression_worker(&mut self, allow_return_type_in_arrow: bool) -> Expression<'a> {
        if self.is_yield_expression() {
            return self.parse_yield_expression();
        }
        if let Some(arrow) = self.try_parse_parenthesized_arrow_function(allow_return_type_in_arrow) {
            return arrow;
        }
        if let Some(arrow) = self.try_parse_async_simple_arrow_function(allow_return_type_in_arrow) {
            return arrow;
        }
        if self.is_identifier() && self.look_ahead_next(|p| p.token() == SyntaxKind::EqualsGreaterThanToken) {
            let start = self.node_start();
            let parameter = self.parse_identifier();
            return self.parse_simple_arrow_function(start, None, parameter, allow_return_type_in_arrow);
        }
        self.parse_binary_expression_or_higher(OperatorPrecedence::Assignment, allow_return_type_in_arrow)
    }

    /// A zero-width identifier standing in for an expression that could not
    /// be parsed. The caller has already reported.
    fn create_missing_expression(&mut self) -> Expression<'a> {
        Expression::Identifier(self.create_missing_identifier())
    }

    pub(super) fn is_start_of_expression(&mut self) -> bool {
        if self.is_start_of_operand() {
            return true;
        }
        // A stray binary operator still starts an expression, with an error.
        let precedence = binary_precedence(self.token());
        precedence.is_valid() && precedence > OperatorPrecedence::Comma
    }

    /// The current token can begin a unary operand.
    pub(super) fn is_start_of_operand(&mut self) -> bool {
        self.is_start_of_left_hand_side_expression()
            || attrs(self.token()).can_start_expression()
            || self.is_identifier()
    }

    pub(super) fn is_start_of_left_hand_side_expression(&mut self) -> bool {
        let token = self.token();
        if token == SyntaxKind::ImportKeyword {
            // `import(...)`, `import<T>` and `import.meta`; anything else is
            // an import declaration.
            return self.look_ahead_next(|p| {
                matches!(
                    p.token(),
                    SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken | SyntaxKind::DotToken
                )
            });
        }
        attrs(token).can_start_left_hand_side() || self.is_identifier()
    }

    // ========================================================================
    // Precedence climbing
    // ========================================================================

    /// A unary operand followed by every binary, conditional, assignment,
    /// `as` and `satisfies` operator that binds at least as tightly as
    /// `min`.
    fn parse_binary_expression_or_higher(
        &mut self,
        min: OperatorPrecedence,
        allow_return_type_in_arrow: bool,
    ) -> Expression<'a> {
        let start = self.node_start();
        let left = self.parse_unary_expression_or_higher();
        self.parse_binary_expression_rest(start, min, left, allow_return_type_in_arrow)
    }

    fn parse_binary_expression_rest(
        &mut self,
        start: NodeStart,
        min: OperatorPrecedence,
        mut left: Expression<'a>,
        allow_return_type_in_arrow: bool,
    ) -> Expression<'a> {
        loop {
            let token = if self.token() == SyntaxKind::GreaterThanToken {
                self.re_scan_greater_token()
            } else {
                self.token()
            };
            let precedence = binary_precedence(token);
            if !precedence.is_valid() || precedence < min || precedence == OperatorPrecedence::Comma {
                return left;
            }
            if token == SyntaxKind::InKeyword && self.in_disallow_in_context() {
                return left;
            }

            left = match token {
                SyntaxKind::AsKeyword | SyntaxKind::SatisfiesKeyword => {
                    // `as` on a new line starts an ASI-separated statement.
                    if self.has_preceding_line_break() {
                        return left;
                    }
                    self.next_token();
                    let type_node = self.parse_type();
                    let kind = if token == SyntaxKind::AsKeyword {
                        SyntaxKind::AsExpression
                    } else {
                        SyntaxKind::SatisfiesExpression
                    };
                    let data = self.finish_node(kind, start);
                    Expression::As(self.alloc(AsExpression {
                        data,
                        expression: left,
                        type_node,
                    }))
                }
                SyntaxKind::QuestionToken => self.parse_conditional_expression_rest(start, left, allow_return_type_in_arrow),
                _ if token.is_assignment_operator() => {
                    if !is_left_hand_side_expression(left) {
                        return left;
                    }
                    let operator_token = self.parse_token_node();
                    let right = self.parse_assignment_expression_or_higher(allow_return_type_in_arrow);
                    let data = self.finish_node(SyntaxKind::BinaryExpression, start);
                    Expression::Binary(self.alloc(BinaryExpression {
                        data,
                        left,
                        operator_token,
                        right,
                    }))
                }
                _ => {
                    let operator_token = self.parse_token_node();
                    let right_min = if attrs(token).is_right_associative() {
                        precedence
                    } else {
                        precedence.next()
                    };
                    let right = self.parse_binary_expression_or_higher(right_min, allow_return_type_in_arrow);
                    let data = self.finish_node(SyntaxKind::BinaryExpression, start);
                    Expression::Binary(self.alloc(BinaryExpression {
                        data,
                        left,
                        operator_token,
                        right,
                    }))
                }
            };
        }
    }

    fn parse_conditional_expression_rest(
        &mut self,
        start: NodeStart,
        condition: Expression<'a>,
        allow_return_type_in_arrow: bool,
    ) -> Expression<'a> {
        let question_token = self.parse_token_node();
        let when_true = self.allow_in_and(|p| p.parse_assignment_expression_or_higher(false));
        let colon_present = self.token() == SyntaxKind::ColonToken;
        let colon_token = self.parse_expected_token(SyntaxKind::ColonToken);
        let when_false = if colon_present {
            self.parse_assignment_expression_or_higher(allow_return_type_in_arrow)
        } else {
            self.create_missing_expression()
        };
        let data = self.finish_node(SyntaxKind::ConditionalExpression, start);
        Expression::Conditional(self.alloc(ConditionalExpression {
            data,
            condition,
            question_token,
            when_true,
            colon_token,
            when_false,
        }))
    }

    // ========================================================================
    // Unary and update expressions
    // ========================================================================

    fn parse_unary_expression_or_higher(&mut self) -> Expression<'a> {
        if self.is_update_expression() {
            return self.parse_update_expression();
        }
        self.parse_simple_unary_expression()
    }

    /// Whether the current token starts an update expression rather than
    /// a prefix-operator one.
    fn is_update_expression(&mut self) -> bool {
        match self.token() {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword => false,
            SyntaxKind::AwaitKeyword => !self.is_await_expression(),
            SyntaxKind::LessThanToken => self.options.language_variant == LanguageVariant::Jsx,
            _ => true,
        }
    }

    fn parse_simple_unary_expression(&mut self) -> Expression<'a> {
        if !self.enter_recursion() {
            return self.create_missing_expression();
        }
        let start = self.node_start();
        let operator = self.token();
        let expression = match operator {
            SyntaxKind::PlusToken | SyntaxKind::MinusToken | SyntaxKind::TildeToken | SyntaxKind::ExclamationToken => {
                self.next_token();
                let operand = self.parse_simple_unary_expression();
                self.finish_unary(SyntaxKind::PrefixUnaryExpression, start, operator, operand)
            }
            SyntaxKind::DeleteKeyword | SyntaxKind::TypeOfKeyword | SyntaxKind::VoidKeyword => {
                self.next_token();
                let operand = self.parse_simple_unary_expression();
                let kind = match operator {
                    SyntaxKind::DeleteKeyword => SyntaxKind::DeleteExpression,
                    SyntaxKind::TypeOfKeyword => SyntaxKind::TypeOfExpression,
                    _ => SyntaxKind::VoidExpression,
                };
                self.finish_unary(kind, start, operator, operand)
            }
            SyntaxKind::LessThanToken => self.parse_type_assertion(),
            SyntaxKind::AwaitKeyword if self.is_await_expression() => {
                self.next_token();
                let operand = self.parse_simple_unary_expression();
                self.finish_unary(SyntaxKind::AwaitExpression, start, operator, operand)
            }
            _ => self.parse_update_expression(),
        };
        self.exit_recursion();
        expression
    }

    fn finish_unary(
        &mut self,
        kind: SyntaxKind,
        start: NodeStart,
        operator: SyntaxKind,
        operand: Expression<'a>,
    ) -> Expression<'a> {
        let data = self.finish_node(kind, start);
        Expression::Unary(self.alloc(UnaryExpression { data, operator, operand }))
    }

    /// `await` is an operator inside async bodies, and elsewhere when a
    /// token that can start an operand follows on the same line.
    fn is_await_expression(&mut self) -> bool {
        if self.token() != SyntaxKind::AwaitKeyword {
            return false;
        }
        if self.in_await_context() {
            return true;
        }
        self.look_ahead_next(|p| !p.has_preceding_line_break() && p.is_start_of_operand())
    }

    fn is_identifier_or_keyword_or_literal_on_same_line(&mut self) -> bool {
        !self.has_preceding_line_break()
            && (self.token().is_identifier_or_keyword()
                || matches!(
                    self.token(),
                    SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral | SyntaxKind::StringLiteral
                ))
    }

    /// `<T>expr`.
    fn parse_type_assertion(&mut self) -> Expression<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::LessThanToken);
        let type_node = self.parse_type();
        self.parse_expected(SyntaxKind::GreaterThanToken);
        let expression = self.parse_simple_unary_expression();
        let data = self.finish_node(SyntaxKind::TypeAssertionExpression, start);
        Expression::TypeAssertion(self.alloc(TypeAssertion {
            data,
            type_node,
            expression,
        }))
    }

    fn parse_update_expression(&mut self) -> Expression<'a> {
        let start = self.node_start();
        let operator = self.token();
        if matches!(operator, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken) {
            self.next_token();
            let operand = self.parse_left_hand_side_expression_or_higher();
            return self.finish_unary(SyntaxKind::PrefixUnaryExpression, start, operator, operand);
        }
        if operator == SyntaxKind::LessThanToken && self.options.language_variant == LanguageVariant::Jsx {
            let element = self.parse_jsx_element_or_self_closing_element_or_fragment(true);
            return self.parse_postfix_expression_rest(start, element, true);
        }

        let expression = self.parse_left_hand_side_expression_or_higher();
        let operator = self.token();
        if attrs(operator).postfix_precedence == OperatorPrecedence::Update && !self.has_preceding_line_break() {
            self.next_token();
            return self.finish_unary(SyntaxKind::PostfixUnaryExpression, start, operator, expression);
        }
        expression
    }

    // ========================================================================
    // Left-hand-side expressions and postfix forms
    // ========================================================================

    pub(super) fn parse_left_hand_side_expression_or_higher(&mut self) -> Expression<'a> {
        let start = self.node_start();
        let expression = self.parse_primary_expression();
        self.parse_postfix_expression_rest(start, expression, true)
    }

    /// Member access, element access, `!`, tagged templates and (when
    /// `allow_calls`) calls, applied left to right. Without calls this is
    /// the callee of a `new`, which stops at `(` and `<`.
    fn parse_postfix_expression_rest(
        &mut self,
        start: NodeStart,
        mut expression: Expression<'a>,
        allow_calls: bool,
    ) -> Expression<'a> {
        let mut in_optional_chain = false;
        loop {
            let token = self.token();
            let precedence = attrs(token).postfix_precedence;
            if !precedence.is_valid() || precedence < OperatorPrecedence::Member {
                return expression;
            }

            let question_dot_token = if token == SyntaxKind::QuestionDotToken {
                if !allow_calls {
                    return expression;
                }
                in_optional_chain = true;
                Some(self.parse_token_node())
            } else {
                None
            };
            let chained = question_dot_token.is_some();

            expression = match (self.token(), chained) {
                (SyntaxKind::DotToken, false) => {
                    self.next_token();
                    let name = self.parse_member_name();
                    self.finish_property_access(start, expression, None, name, in_optional_chain)
                }
                (SyntaxKind::OpenBracketToken, _) => {
                    if self.in_decorator_context() && !chained {
                        return expression;
                    }
                    self.parse_element_access(start, expression, question_dot_token, in_optional_chain)
                }
                (SyntaxKind::OpenParenToken, _) if allow_calls => {
                    let arguments = self.parse_argument_list();
                    self.finish_call(start, expression, question_dot_token, None, arguments, in_optional_chain)
                }
                (SyntaxKind::LessThanToken, _) if allow_calls => {
                    match self.try_parse(|p| p.parse_type_arguments_in_expression(true)) {
                        Some(type_arguments) if self.token() == SyntaxKind::OpenParenToken => {
                            let arguments = self.parse_argument_list();
                            self.finish_call(
                                start,
                                expression,
                                question_dot_token,
                                Some(type_arguments),
                                arguments,
                                in_optional_chain,
                            )
                        }
                        Some(type_arguments) => self.parse_tagged_template(start, expression, Some(type_arguments)),
                        None if chained => {
                            let name = self.parse_member_name();
                            self.finish_property_access(start, expression, question_dot_token, name, true)
                        }
                        None => return expression,
                    }
                }
                (SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead, false) => {
                    self.parse_tagged_template(start, expression, None)
                }
                (SyntaxKind::ExclamationToken, false) => {
                    if self.has_preceding_line_break() {
                        return expression;
                    }
                    self.next_token();
                    let data = self.finish_chain_link(SyntaxKind::NonNullExpression, start, in_optional_chain);
                    Expression::NonNull(self.alloc(NonNullExpression { data, expression }))
                }
                (_, true) => {
                    let name = self.parse_member_name();
                    self.finish_property_access(start, expression, question_dot_token, name, true)
                }
                _ => return expression,
            };
        }
    }

    /// Closes one link of a member chain; links after a `?.` are marked as
    /// part of an optional chain.
    fn finish_chain_link(&mut self, kind: SyntaxKind, start: NodeStart, in_optional_chain: bool) -> NodeData {
        let mut data = self.finish_node(kind, start);
        if in_optional_chain {
            data.flags |= NodeFlags::OPTIONAL_CHAIN;
        }
        data
    }

    fn parse_member_name(&mut self) -> MemberName<'a> {
        if self.token() == SyntaxKind::PrivateIdentifier {
            MemberName::PrivateIdentifier(self.parse_private_identifier())
        } else {
            MemberName::Identifier(self.parse_identifier_after_dot(true))
        }
    }

    fn finish_property_access(
        &mut self,
        start: NodeStart,
        expression: Expression<'a>,
        question_dot_token: Option<Token>,
        name: MemberName<'a>,
        in_optional_chain: bool,
    ) -> Expression<'a> {
        let data = self.finish_chain_link(SyntaxKind::PropertyAccessExpression, start, in_optional_chain);
        Expression::PropertyAccess(self.alloc(PropertyAccessExpression {
            data,
            expression,
            question_dot_token,
            name,
        }))
    }

    fn parse_element_access(
        &mut self,
        start: NodeStart,
        expression: Expression<'a>,
        question_dot_token: Option<Token>,
        in_optional_chain: bool,
    ) -> Expression<'a> {
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let argument_expression = if self.token() == SyntaxKind::CloseBracketToken {
            self.error_at_current_token(&messages::EXPRESSION_EXPECTED, &[]);
            self.create_missing_expression()
        } else {
            self.allow_in_and(Self::parse_expression)
        };
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let data = self.finish_chain_link(SyntaxKind::ElementAccessExpression, start, in_optional_chain);
        Expression::ElementAccess(self.alloc(ElementAccessExpression {
            data,
            expression,
            question_dot_token,
            argument_expression,
        }))
    }

    fn finish_call(
        &mut self,
        start: NodeStart,
        expression: Expression<'a>,
        question_dot_token: Option<Token>,
        type_arguments: TypeArguments<'a>,
        arguments: NodeList<'a, Expression<'a>>,
        in_optional_chain: bool,
    ) -> Expression<'a> {
        let data = self.finish_chain_link(SyntaxKind::CallExpression, start, in_optional_chain);
        Expression::Call(self.alloc(CallExpression {
            data,
            expression,
            question_dot_token,
            type_arguments,
            arguments,
        }))
    }

    fn parse_tagged_template(
        &mut self,
        start: NodeStart,
        tag: Expression<'a>,
        type_arguments: TypeArguments<'a>,
    ) -> Expression<'a> {
        let template = if self.token() == SyntaxKind::NoSubstitutionTemplateLiteral {
            Expression::Literal(self.parse_template_literal_token(true))
        } else {
            self.parse_template_expression(true)
        };
        let data = self.finish_node(SyntaxKind::TaggedTemplateExpression, start);
        Expression::TaggedTemplate(self.alloc(TaggedTemplateExpression {
            data,
            tag,
            type_arguments,
            template,
        }))
    }

    /// `f<T>` in expression position. Succeeds only on a clean type
    /// argument list followed, when `require_continuation`, by `(` or a
    /// template; otherwise the `<` is a comparison.
    fn parse_type_arguments_in_expression(&mut self, require_continuation: bool) -> Option<NodeList<'a, TypeNode<'a>>> {
        if self.token() != SyntaxKind::LessThanToken {
            return None;
        }
        let errors = self.diagnostics.len();
        self.next_token();
        let list = self.parse_delimited_list(ListContext::TypeArguments, Self::parse_type);
        if self.token() != SyntaxKind::GreaterThanToken || self.diagnostics.len() > errors {
            return None;
        }
        self.next_token();
        if require_continuation
            && !matches!(
                self.token(),
                SyntaxKind::OpenParenToken | SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead
            )
        {
            return None;
        }
        Some(self.alloc_slice(list.elements))
    }

    fn parse_argument_list(&mut self) -> NodeList<'a, Expression<'a>> {
        let list = self.parse_bracketed_list(
            ListContext::ArgumentExpressions,
            SyntaxKind::OpenParenToken,
            SyntaxKind::CloseParenToken,
            Self::parse_argument_or_array_literal_element,
        );
        self.alloc_slice(list.elements)
    }

    fn parse_argument_or_array_literal_element(&mut self) -> Expression<'a> {
        match self.token() {
            SyntaxKind::DotDotDotToken => self.parse_spread_element(),
            SyntaxKind::CommaToken => {
                let start = self.node_start();
                let data = self.finish_node(SyntaxKind::OmittedExpression, start);
                Expression::Omitted(self.alloc(Token { data }))
            }
            _ => self.allow_in_and(|p| p.parse_assignment_expression_or_higher(true)),
        }
    }

    fn parse_spread_element(&mut self) -> Expression<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::DotDotDotToken);
        let expression = self.allow_in_and(|p| p.parse_assignment_expression_or_higher(true));
        let data = self.finish_node(SyntaxKind::SpreadElement, start);
        Expression::Spread(self.alloc(SpreadElement { data, expression }))
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn parse_primary_expression(&mut self) -> Expression<'a> {
        match self.token() {
            SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral | SyntaxKind::StringLiteral => {
                Expression::Literal(self.parse_literal_node())
            }
            SyntaxKind::NoSubstitutionTemplateLiteral => Expression::Literal(self.parse_template_literal_token(false)),
            SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword => {
                let token = self.parse_token_node();
                Expression::Keyword(self.alloc(token))
            }
            SyntaxKind::ImportKeyword => self.parse_import_call_or_meta_property(),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(),
            SyntaxKind::OpenBracketToken => self.parse_array_literal_expression(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal_expression(),
            SyntaxKind::AsyncKeyword
                if self.look_ahead_next(|p| {
                    p.token() == SyntaxKind::FunctionKeyword && !p.has_preceding_line_break()
                }) =>
            {
                Expression::Function(self.parse_function_expression())
            }
            SyntaxKind::FunctionKeyword => Expression::Function(self.parse_function_expression()),
            SyntaxKind::ClassKeyword => Expression::Class(self.parse_class_expression()),
            SyntaxKind::NewKeyword => self.parse_new_expression_or_new_dot_target(),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                if self.re_scan_slash_token() == SyntaxKind::RegularExpressionLiteral {
                    Expression::Literal(self.parse_literal_node())
                } else {
                    self.parse_identifier_expression()
                }
            }
            SyntaxKind::TemplateHead => self.parse_template_expression(false),
            SyntaxKind::PrivateIdentifier => Expression::PrivateIdentifier(self.parse_private_identifier()),
            _ => self.parse_identifier_expression(),
        }
    }

    fn parse_identifier_expression(&mut self) -> Expression<'a> {
        Expression::Identifier(self.parse_identifier_with_message(&messages::EXPRESSION_EXPECTED))
    }

    /// `import(...)` (as a callee) or `import.meta`.
    fn parse_import_call_or_meta_property(&mut self) -> Expression<'a> {
        let start = self.node_start();
        let keyword = self.parse_token_node();
        if self.parse_optional(SyntaxKind::DotToken) {
            let name = self.parse_identifier_name();
            let data = self.finish_node(SyntaxKind::MetaProperty, start);
            return Expression::MetaProperty(self.alloc(MetaProperty {
                data,
                keyword_token: SyntaxKind::ImportKeyword,
                name,
            }));
        }
        Expression::Keyword(self.alloc(keyword))
    }

    fn parse_parenthesized_expression(&mut self) -> Expression<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.allow_in_and(Self::parse_expression);
        self.parse_expected(SyntaxKind::CloseParenToken);
        let data = self.finish_node(SyntaxKind::ParenthesizedExpression, start);
        Expression::Parenthesized(self.alloc(ParenthesizedExpression { data, expression }))
    }

    fn parse_array_literal_expression(&mut self) -> Expression<'a> {
        let start = self.node_start();
        let list = self.parse_bracketed_list(
            ListContext::ArrayLiteralMembers,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::CloseBracketToken,
            Self::parse_argument_or_array_literal_element,
        );
        let elements = self.alloc_slice(list.elements);
        let data = self.finish_node(SyntaxKind::ArrayLiteralExpression, start);
        Expression::ArrayLiteral(self.alloc(ArrayLiteralExpression { data, elements }))
    }

    fn parse_object_literal_expression(&mut self) -> Expression<'a> {
        let start = self.node_start();
        let list = self.parse_bracketed_list(
            ListContext::ObjectLiteralMembers,
            SyntaxKind::OpenBraceToken,
            SyntaxKind::CloseBraceToken,
            Self::parse_object_literal_element,
        );
        let properties = self.alloc_slice(list.elements);
        let data = self.finish_node(SyntaxKind::ObjectLiteralExpression, start);
        Expression::ObjectLiteral(self.alloc(ObjectLiteralExpression { data, properties }))
    }

    fn parse_object_literal_element(&mut self) -> ObjectLiteralElement<'a> {
        let start = self.node_start();
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let expression = self.allow_in_and(|p| p.parse_assignment_expression_or_higher(true));
            let data = self.finish_node(SyntaxKind::SpreadAssignment, start);
            return ObjectLiteralElement::SpreadAssignment(self.alloc(SpreadAssignment { data, expression }));
        }

        let modifiers = self.parse_modifiers(true, false, false);
        if let Some(kind) = self.parse_accessor_keyword() {
            let accessor = self.parse_accessor_declaration(start, modifiers, kind, SignatureFlags::NONE);
            return if kind == SyntaxKind::GetAccessor {
                ObjectLiteralElement::GetAccessor(accessor)
            } else {
                ObjectLiteralElement::SetAccessor(accessor)
            };
        }

        let asterisk_token = self.parse_optional_token(SyntaxKind::AsteriskToken);
        let token_is_identifier = self.is_identifier();
        let name = self.parse_property_name();
        let question_token = self.parse_optional_token(SyntaxKind::QuestionToken);
        if asterisk_token.is_some() || matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            return ObjectLiteralElement::Method(self.parse_method_declaration(
                start,
                modifiers,
                asterisk_token,
                name,
                question_token,
            ));
        }

        match name {
            PropertyName::Identifier(identifier) if token_is_identifier && self.token() != SyntaxKind::ColonToken => {
                // `{ a }`, or `{ a = 1 }` as a destructuring target.
                let object_assignment_initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                    Some(self.allow_in_and(|p| p.parse_assignment_expression_or_higher(true)))
                } else {
                    None
                };
                let data = self.finish_node(SyntaxKind::ShorthandPropertyAssignment, start);
                ObjectLiteralElement::ShorthandPropertyAssignment(self.alloc(ShorthandPropertyAssignment {
                    data,
                    name: identifier,
                    object_assignment_initializer,
                }))
            }
            _ => {
                self.parse_expected(SyntaxKind::ColonToken);
                let initializer = self.allow_in_and(|p| p.parse_assignment_expression_or_higher(true));
                let data = self.finish_node(SyntaxKind::PropertyAssignment, start);
                ObjectLiteralElement::PropertyAssignment(self.alloc(PropertyAssignment {
                    data,
                    name,
                    initializer,
                }))
            }
        }
    }

    /// `new X<T>(args)`, `new X` or `new.target`.
    fn parse_new_expression_or_new_dot_target(&mut self) -> Expression<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::NewKeyword);
        if self.parse_optional(SyntaxKind::DotToken) {
            let name = self.parse_identifier_name();
            let data = self.finish_node(SyntaxKind::MetaProperty, start);
            return Expression::MetaProperty(self.alloc(MetaProperty {
                data,
                keyword_token: SyntaxKind::NewKeyword,
                name,
            }));
        }

        let callee_start = self.node_start();
        let callee = self.parse_primary_expression();
        let expression = self.parse_postfix_expression_rest(callee_start, callee, false);
        let type_arguments = if self.token() == SyntaxKind::LessThanToken {
            self.try_parse(|p| p.parse_type_arguments_in_expression(false))
        } else {
            None
        };
        let arguments = if self.token() == SyntaxKind::OpenParenToken {
            Some(self.parse_argument_list())
        } else {
            None
        };
        let data = self.finish_node(SyntaxKind::NewExpression, start);
        Expression::New(self.alloc(NewExpression {
            data,
            expression,
            type_arguments,
            arguments,
        }))
    }

    // ========================================================================
    // Templates
    // ========================================================================

    /// A `TemplateHead` or no-substitution template. Invalid escapes are
    /// reported only outside tagged templates.
    fn parse_template_literal_token(&mut self, is_tagged: bool) -> &'a LiteralExpression<'a> {
        if !is_tagged && self.scanner.token_flags().contains(TokenFlags::CONTAINS_INVALID_ESCAPE) {
            self.re_scan_template_token(false);
        }
        self.parse_literal_node()
    }

    pub(super) fn parse_template_head(&mut self, is_tagged: bool) -> &'a LiteralExpression<'a> {
        self.parse_template_literal_token(is_tagged)
    }

    /// The `TemplateMiddle` or `TemplateTail` closing a substitution, or a
    /// missing tail if the substitution is not closed by `}`.
    pub(super) fn parse_literal_of_template_span(&mut self, is_tagged: bool) -> &'a LiteralExpression<'a> {
        if self.token() == SyntaxKind::CloseBraceToken {
            self.re_scan_template_token(is_tagged);
            return self.parse_literal_node();
        }
        self.error_at_current_token(&messages::_0_EXPECTED, &[SyntaxKind::CloseBraceToken.display_name()]);
        let data = self.missing_node_data(SyntaxKind::TemplateTail);
        self.alloc(LiteralExpression {
            data,
            text: "",
            token_flags: TokenFlags::NONE,
        })
    }

    fn parse_template_expression(&mut self, is_tagged: bool) -> Expression<'a> {
        let start = self.node_start();
        let head = self.parse_template_head(is_tagged);
        let mut spans = Vec::new();
        loop {
            let span_start = self.node_start();
            let expression = self.allow_in_and(Self::parse_expression);
            let literal = self.parse_literal_of_template_span(is_tagged);
            let data = self.finish_node(SyntaxKind::TemplateSpan, span_start);
            let is_middle = literal.data.kind == SyntaxKind::TemplateMiddle;
            spans.push(TemplateSpan {
                data,
                expression,
                literal,
            });
            if !is_middle {
                break;
            }
        }
        let spans = self.alloc_slice(spans);
        let data = self.finish_node(SyntaxKind::TemplateExpression, start);
        Expression::Template(self.alloc(TemplateExpression { data, head, spans }))
    }

    // ========================================================================
    // Yield
    // ========================================================================

    fn is_yield_expression(&mut self) -> bool {
        if self.token() != SyntaxKind::YieldKeyword {
            return false;
        }
        if self.in_yield_context() {
            return true;
        }
        // Outside generators `yield x` is still read as a yield, and
        // reported by later stages.
        self.look_ahead_next(Self::is_identifier_or_keyword_or_literal_on_same_line)
    }

    fn parse_yield_expression(&mut self) -> Expression<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::YieldKeyword);
        let (asterisk_token, expression) = if !self.has_preceding_line_break()
            && (self.token() == SyntaxKind::AsteriskToken || self.is_start_of_expression())
        {
            let asterisk_token = self.parse_optional_token(SyntaxKind::AsteriskToken);
            (asterisk_token, Some(self.parse_assignment_expression_or_higher(true)))
        } else {
            (None, None)
        };
        let data = self.finish_node(SyntaxKind::YieldExpression, start);
        Expression::Yield(self.alloc(YieldExpression {
            data,
            asterisk_token,
            expression,
        }))
    }

    // ========================================================================
    // Arrow functions
    // ========================================================================

    /// `(params) => body`, `<T>(params) => body` and their `async` forms.
    fn try_parse_parenthesized_arrow_function(&mut self, allow_return_type_in_arrow: bool) -> Option<Expression<'a>> {
        if !matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken | SyntaxKind::AsyncKeyword
        ) {
            return None;
        }
        match self.look_ahead(Self::is_parenthesized_arrow_function_expression) {
            ArrowLookahead::Not => None,
            ArrowLookahead::Definitely => self.parse_parenthesized_arrow_function(true, true),
            ArrowLookahead::Possibly => {
                self.try_parse(|p| p.parse_parenthesized_arrow_function(false, allow_return_type_in_arrow))
            }
        }
    }

    fn is_parenthesized_arrow_function_expression(&mut self) -> ArrowLookahead {
        if self.token() == SyntaxKind::AsyncKeyword {
            self.next_token();
            if self.has_preceding_line_break()
                || !matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken)
            {
                return ArrowLookahead::Not;
            }
        }

        let first = self.token();
        let second = self.next_token();

        if first == SyntaxKind::OpenParenToken {
            return match second {
                SyntaxKind::CloseParenToken => match self.next_token() {
                    SyntaxKind::EqualsGreaterThanToken | SyntaxKind::ColonToken | SyntaxKind::OpenBraceToken => {
                        ArrowLookahead::Definitely
                    }
                    _ => ArrowLookahead::Not,
                },
                // `([a]) =>` or `({ a }) =>` versus array and object literals.
                SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken => ArrowLookahead::Possibly,
                SyntaxKind::DotDotDotToken => ArrowLookahead::Definitely,
                _ if attrs(second).is_modifier_keyword()
                    && second != SyntaxKind::AsyncKeyword
                    && self.look_ahead_next(|p| p.is_identifier()) =>
                {
                    if self.next_token() == SyntaxKind::AsKeyword {
                        // `(readonly as T)`
                        ArrowLookahead::Not
                    } else {
                        ArrowLookahead::Definitely
                    }
                }
                _ if !self.is_identifier() && second != SyntaxKind::ThisKeyword => ArrowLookahead::Not,
                _ => match self.next_token() {
                    SyntaxKind::ColonToken => ArrowLookahead::Definitely,
                    SyntaxKind::QuestionToken => {
                        self.next_token();
                        if matches!(
                            self.token(),
                            SyntaxKind::ColonToken
                                | SyntaxKind::CommaToken
                                | SyntaxKind::EqualsToken
                                | SyntaxKind::CloseParenToken
                        ) {
                            ArrowLookahead::Definitely
                        } else {
                            ArrowLookahead::Not
                        }
                    }
                    SyntaxKind::CommaToken | SyntaxKind::EqualsToken | SyntaxKind::CloseParenToken => {
                        ArrowLookahead::Possibly
                    }
                    _ => ArrowLookahead::Not,
                },
            };
        }

        // `<` starts type parameters.
        if !self.is_identifier() && second != SyntaxKind::ConstKeyword {
            return ArrowLookahead::Not;
        }
        if self.options.language_variant == LanguageVariant::Jsx {
            // `<T,>` and `<T extends U>` are type parameters; `<T>` opens
            // an element.
            return match self.next_token() {
                SyntaxKind::ExtendsKeyword => {
                    if matches!(
                        self.next_token(),
                        SyntaxKind::EqualsToken | SyntaxKind::GreaterThanToken | SyntaxKind::SlashToken
                    ) {
                        ArrowLookahead::Not
                    } else {
                        ArrowLookahead::Definitely
                    }
                }
                SyntaxKind::CommaToken | SyntaxKind::EqualsToken => ArrowLookahead::Definitely,
                _ => ArrowLookahead::Not,
            };
        }
        ArrowLookahead::Possibly
    }

    /// Parses an arrow function from its modifiers on. Unless
    /// `allow_ambiguity`, bails out with `None` as soon as the input stops
    /// reading as an arrow function so the caller can rewind.
    fn parse_parenthesized_arrow_function(
        &mut self,
        allow_ambiguity: bool,
        allow_return_type_in_arrow: bool,
    ) -> Option<Expression<'a>> {
        let start = self.node_start();
        let errors = self.diagnostics.len();
        let modifiers = self.parse_arrow_modifiers();
        let flags = if modifiers.is_some() {
            SignatureFlags::AWAIT
        } else {
            SignatureFlags::NONE
        };
        let type_parameters = self.parse_type_parameters();
        if !allow_ambiguity && self.token() != SyntaxKind::OpenParenToken {
            return None;
        }
        let parameters = self.parse_parameters(flags);
        if !allow_ambiguity && self.diagnostics.len() > errors {
            return None;
        }

        let has_return_colon = self.token() == SyntaxKind::ColonToken;
        let return_type = self.parse_return_type(SyntaxKind::ColonToken, false);
        if !allow_ambiguity
            && (self.diagnostics.len() > errors
                || self.has_preceding_line_break()
                || !matches!(
                    self.token(),
                    SyntaxKind::EqualsGreaterThanToken | SyntaxKind::OpenBraceToken
                ))
        {
            return None;
        }

        self.check_no_line_break_before_arrow();
        let equals_greater_than_token = self.parse_expected_token(SyntaxKind::EqualsGreaterThanToken);
        let body = self.parse_arrow_function_body(flags, allow_return_type_in_arrow);

        // In `a ? (b): c => d` the `: c` belongs to the conditional unless
        // another `:` follows the arrow.
        if !allow_return_type_in_arrow && has_return_colon && self.token() != SyntaxKind::ColonToken {
            return None;
        }

        Some(self.finish_arrow_function(
            start,
            modifiers,
            type_parameters,
            parameters,
            return_type,
            equals_greater_than_token,
            body,
        ))
    }

    fn parse_arrow_modifiers(&mut self) -> Modifiers<'a> {
        if self.token() != SyntaxKind::AsyncKeyword {
            return None;
        }
        let token = self.parse_token_node();
        self.alloc_optional_slice(vec![Modifier::Keyword(self.alloc(token))])
    }

    /// `async x => ...`.
    fn try_parse_async_simple_arrow_function(&mut self, allow_return_type_in_arrow: bool) -> Option<Expression<'a>> {
        if self.token() != SyntaxKind::AsyncKeyword {
            return None;
        }
        let is_async_arrow = self.look_ahead_next(|p| {
            if p.has_preceding_line_break() || !p.is_identifier() {
                return false;
            }
            p.next_token() == SyntaxKind::EqualsGreaterThanToken
        });
        if !is_async_arrow {
            return None;
        }
        let start = self.node_start();
        let modifiers = self.parse_arrow_modifiers();
        let parameter = self.parse_identifier();
        Some(self.parse_simple_arrow_function(start, modifiers, parameter, allow_return_type_in_arrow))
    }

    /// `x => body`, the single parameter already parsed.
    fn parse_simple_arrow_function(
        &mut self,
        start: NodeStart,
        modifiers: Modifiers<'a>,
        parameter_name: &'a Identifier<'a>,
        allow_return_type_in_arrow: bool,
    ) -> Expression<'a> {
        let parameter_start = self.node_start_at(&parameter_name.data);
        let parameter_data = self.finish_node(SyntaxKind::Parameter, parameter_start);
        let parameters = self.alloc_slice(vec![ParameterDeclaration {
            data: parameter_data,
            modifiers: None,
            dot_dot_dot_token: None,
            name: BindingName::Identifier(parameter_name),
            question_token: None,
            type_annotation: None,
            initializer: None,
        }]);
        let flags = if modifiers.is_some() {
            SignatureFlags::AWAIT
        } else {
            SignatureFlags::NONE
        };
        self.check_no_line_break_before_arrow();
        let equals_greater_than_token = self.parse_expected_token(SyntaxKind::EqualsGreaterThanToken);
        let body = self.parse_arrow_function_body(flags, allow_return_type_in_arrow);
        self.finish_arrow_function(start, modifiers, None, parameters, None, equals_greater_than_token, body)
    }

    /// `=>` must end the line its parameters are on.
    fn check_no_line_break_before_arrow(&mut self) {
        if self.token() == SyntaxKind::EqualsGreaterThanToken && self.has_preceding_line_break() {
            self.error_at_current_token(&messages::LINE_TERMINATOR_NOT_PERMITTED_BEFORE_ARROW, &[]);
        }
    }

    fn parse_arrow_function_body(&mut self, flags: SignatureFlags, allow_return_type_in_arrow: bool) -> ConciseBody<'a> {
        if self.token() == SyntaxKind::OpenBraceToken {
            return ConciseBody::Block(self.parse_function_block(flags, None));
        }
        let expression = self.with_context(NodeFlags::YIELD_CONTEXT, false, |p| {
            p.with_context(NodeFlags::AWAIT_CONTEXT, flags.contains(SignatureFlags::AWAIT), |p| {
                p.parse_assignment_expression_or_higher(allow_return_type_in_arrow)
            })
        });
        ConciseBody::Expression(expression)
    }

    #[allow(clippy::too_many_arguments)]
    fn finish_arrow_function(
        &mut self,
        start: NodeStart,
        modifiers: Modifiers<'a>,
        type_parameters: TypeParameters<'a>,
        parameters: NodeList<'a, ParameterDeclaration<'a>>,
        return_type: Option<TypeNode<'a>>,
        equals_greater_than_token: Token,
        body: ConciseBody<'a>,
    ) -> Expression<'a> {
        let mut data = self.finish_node(SyntaxKind::ArrowFunction, start);
        data.modifier_flags = Self::modifier_flags_of(modifiers);
        Expression::ArrowFunction(self.alloc(ArrowFunction {
            data,
            modifiers,
            type_parameters,
            parameters,
            return_type,
            equals_greater_than_token,
            body,
        }))
    }
}

/// Whether `expression` may be the target of an assignment operator.
fn is_left_hand_side_expression(expression: Expression<'_>) -> bool {
    !matches!(
        expression,
        Expression::Unary(_)
            | Expression::Binary(_)
            | Expression::Conditional(_)
            | Expression::ArrowFunction(_)
            | Expression::Yield(_)
            | Expression::Spread(_)
            | Expression::As(_)
            | Expression::TypeAssertion(_)
            | Expression::Omitted(_)
    )
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;
    use tern_ast::node::{ConciseBody, Expression};
    use tern_ast::syntax_kind::SyntaxKind;
    use tern_ast::types::{LanguageVariant, NodeFlags};

    use crate::options::ParseOptions;
    use crate::parser::Parser;

    fn parse_expression_text<T>(source: &str, f: impl FnOnce(Expression<'_>, usize) -> T) -> T {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, source, ParseOptions::default());
        parser.next_token();
        let expression = parser.parse_expression();
        f(expression, parser.diagnostics.len())
    }

    fn operator(expression: Expression<'_>) -> SyntaxKind {
        match expression {
            Expression::Binary(binary) => binary.operator_token.kind(),
            other => panic!("expected binary expression, got {:?}", other),
        }
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        parse_expression_text("1 + 2 * 3", |expression, errors| {
            assert_eq!(errors, 0);
            assert_eq!(operator(expression), SyntaxKind::PlusToken);
            let Expression::Binary(add) = expression else { unreachable!() };
            assert_eq!(operator(add.right), SyntaxKind::AsteriskToken);
        });
    }

    #[test]
    fn test_exponentiation_is_right_associative() {
        parse_expression_text("2 ** 3 ** 2", |expression, _| {
            let Expression::Binary(outer) = expression else {
                panic!("expected binary");
            };
            assert!(matches!(outer.left, Expression::Literal(_)));
            assert_eq!(operator(outer.right), SyntaxKind::AsteriskAsteriskToken);
        });
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        parse_expression_text("a - b - c", |expression, _| {
            let Expression::Binary(outer) = expression else {
                panic!("expected binary");
            };
            assert_eq!(operator(outer.left), SyntaxKind::MinusToken);
            assert!(matches!(outer.right, Expression::Identifier(_)));
        });
    }

    #[test]
    fn test_assignment_is_right_associative() {
        parse_expression_text("a = b = c", |expression, errors| {
            assert_eq!(errors, 0);
            let Expression::Binary(outer) = expression else {
                panic!("expected binary");
            };
            assert_eq!(operator(outer.right), SyntaxKind::EqualsToken);
        });
    }

    #[test]
    fn test_shift_is_rescanned() {
        parse_expression_text("a >> b", |expression, errors| {
            assert_eq!(errors, 0);
            assert_eq!(operator(expression), SyntaxKind::GreaterThanGreaterThanToken);
        });
    }

    #[test]
    fn test_conditional_nests_in_false_branch() {
        parse_expression_text("a ? b : c ? d : e", |expression, errors| {
            assert_eq!(errors, 0);
            let Expression::Conditional(conditional) = expression else {
                panic!("expected conditional");
            };
            assert!(matches!(conditional.when_false, Expression::Conditional(_)));
        });
    }

    #[test]
    fn test_arrow_versus_parenthesized() {
        parse_expression_text("(x) => x", |expression, errors| {
            assert_eq!(errors, 0);
            let Expression::ArrowFunction(arrow) = expression else {
                panic!("expected arrow function");
            };
            assert_eq!(arrow.parameters.len(), 1);
            assert!(matches!(arrow.body, ConciseBody::Expression(_)));
        });
        parse_expression_text("(x)", |expression, errors| {
            assert_eq!(errors, 0);
            assert!(matches!(expression, Expression::Parenthesized(_)));
        });
    }

    #[test]
    fn test_generic_call_versus_comparison() {
        parse_expression_text("f<T>(x)", |expression, errors| {
            assert_eq!(errors, 0);
            let Expression::Call(call) = expression else {
                panic!("expected call");
            };
            assert_eq!(call.type_arguments.map(<[_]>::len), Some(1));
        });
        parse_expression_text("a < b", |expression, errors| {
            assert_eq!(errors, 0);
            assert_eq!(operator(expression), SyntaxKind::LessThanToken);
        });
    }

    #[test]
    fn test_type_assertion_outside_jsx() {
        parse_expression_text("<T>x", |expression, errors| {
            assert_eq!(errors, 0);
            assert!(matches!(expression, Expression::TypeAssertion(_)));
        });
    }

    #[test]
    fn test_async_arrow_and_async_identifier() {
        parse_expression_text("async (a) => a", |expression, errors| {
            assert_eq!(errors, 0);
            assert!(matches!(expression, Expression::ArrowFunction(a) if a.modifiers.is_some()));
        });
        parse_expression_text("async(a)", |expression, errors| {
            assert_eq!(errors, 0);
            assert!(matches!(expression, Expression::Call(_)));
        });
    }

    #[test]
    fn test_await_outside_async_takes_any_operand_on_the_same_line() {
        let is_await = |expression: Expression<'_>| {
            matches!(expression, Expression::Unary(u) if u.operator == SyntaxKind::AwaitKeyword)
        };
        for source in ["await (x)", "await x", "await -1", "await [a]"] {
            parse_expression_text(source, |expression, errors| {
                assert_eq!(errors, 0, "source: {}", source);
                assert!(is_await(expression), "source: {}", source);
            });
        }
        parse_expression_text("await = 1", |expression, errors| {
            assert_eq!(errors, 0);
            assert_eq!(operator(expression), SyntaxKind::EqualsToken);
        });
        parse_expression_text("await\n(x)", |expression, _| {
            assert!(matches!(expression, Expression::Call(_)));
        });
    }

    #[test]
    fn test_optional_chain_and_non_null() {
        parse_expression_text("a?.b!.c", |expression, errors| {
            assert_eq!(errors, 0);
            let Expression::PropertyAccess(outer) = expression else {
                panic!("expected property access");
            };
            assert!(matches!(outer.expression, Expression::NonNull(_)));
            assert!(outer.data.flags.contains(NodeFlags::OPTIONAL_CHAIN));
        });
    }

    #[test]
    fn test_new_with_and_without_arguments() {
        parse_expression_text("new Foo<T>(1)", |expression, errors| {
            assert_eq!(errors, 0);
            let Expression::New(new) = expression else {
                panic!("expected new");
            };
            assert!(new.type_arguments.is_some());
            assert_eq!(new.arguments.map(<[_]>::len), Some(1));
        });
        parse_expression_text("new Foo", |expression, _| {
            assert!(matches!(expression, Expression::New(n) if n.arguments.is_none()));
        });
    }

    #[test]
    fn test_template_with_substitutions() {
        parse_expression_text("`a${b}c${d}e`", |expression, errors| {
            assert_eq!(errors, 0);
            let Expression::Template(template) = expression else {
                panic!("expected template");
            };
            assert_eq!(template.spans.len(), 2);
            assert_eq!(template.spans[1].literal.data.kind, SyntaxKind::TemplateTail);
        });
    }

    #[test]
    fn test_missing_operand_is_placeholder() {
        parse_expression_text("a +", |expression, errors| {
            assert_eq!(errors, 1);
            let Expression::Binary(binary) = expression else {
                panic!("expected binary");
            };
            assert!(matches!(binary.right, Expression::Identifier(id) if id.data.is_missing()));
            assert!(binary.data.contains_error());
        });
    }

    #[test]
    fn test_jsx_variant_reads_angle_as_element() {
        let arena = Bump::new();
        let options = ParseOptions {
            language_variant: LanguageVariant::Jsx,
            ..ParseOptions::default()
        };
        let mut parser = Parser::new(&arena, "<div />", options);
        parser.next_token();
        let expression = parser.parse_expression();
        assert!(matches!(expression, Expression::JsxSelfClosingElement(_)));
    }
}
