//! The list production shared by every repeated construct.
//!
//! Each list runs under a [`ListContext`]. The set of active contexts
//! decides recovery: an unexpected token that some enclosing list can use
//! ends the inner list; any other unexpected token is skipped.

use bumpalo::collections::Vec as BumpVec;
use tern_ast::syntax_kind::SyntaxKind;
use tern_core::text::TextRange;
use tern_diagnostics::{messages, DiagnosticMessage};

use super::Parser;
use crate::token_table::attrs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ListContext {
    SourceElements,
    BlockStatements,
    SwitchClauses,
    SwitchClauseStatements,
    TypeMembers,
    ClassMembers,
    EnumMembers,
    HeritageClauseElement,
    VariableDeclarations,
    ObjectBindingElements,
    ArrayBindingElements,
    ArgumentExpressions,
    ObjectLiteralMembers,
    JsxAttributes,
    JsxChildren,
    ArrayLiteralMembers,
    Parameters,
    TypeParameters,
    TypeArguments,
    TupleElementTypes,
    HeritageClauses,
    ImportOrExportSpecifiers,
    ImportAttributes,
}

impl ListContext {
    const ALL: [ListContext; 23] = [
        ListContext::SourceElements,
        ListContext::BlockStatements,
        ListContext::SwitchClauses,
        ListContext::SwitchClauseStatements,
        ListContext::TypeMembers,
        ListContext::ClassMembers,
        ListContext::EnumMembers,
        ListContext::HeritageClauseElement,
        ListContext::VariableDeclarations,
        ListContext::ObjectBindingElements,
        ListContext::ArrayBindingElements,
        ListContext::ArgumentExpressions,
        ListContext::ObjectLiteralMembers,
        ListContext::JsxAttributes,
        ListContext::JsxChildren,
        ListContext::ArrayLiteralMembers,
        ListContext::Parameters,
        ListContext::TypeParameters,
        ListContext::TypeArguments,
        ListContext::TupleElementTypes,
        ListContext::HeritageClauses,
        ListContext::ImportOrExportSpecifiers,
        ListContext::ImportAttributes,
    ];

    #[inline]
    const fn bit(self) -> u32 {
        1 << self as u32
    }

    /// Reported at a token that can neither continue nor end the list.
    fn expected_message(self) -> &'static DiagnosticMessage {
        use ListContext::*;
        match self {
            SourceElements | BlockStatements => &messages::DECLARATION_OR_STATEMENT_EXPECTED,
            SwitchClauseStatements => &messages::STATEMENT_EXPECTED,
            SwitchClauses => &messages::CASE_OR_DEFAULT_EXPECTED,
            TypeMembers => &messages::PROPERTY_OR_SIGNATURE_EXPECTED,
            ClassMembers => &messages::UNEXPECTED_TOKEN_A_CONSTRUCTOR_METHOD_ACCESSOR_OR_PROPERTY_WAS_EXPECTED,
            EnumMembers => &messages::ENUM_MEMBER_EXPECTED,
            HeritageClauseElement => &messages::EXPRESSION_EXPECTED,
            VariableDeclarations => &messages::VARIABLE_DECLARATION_EXPECTED,
            ObjectBindingElements => &messages::PROPERTY_DESTRUCTURING_PATTERN_EXPECTED,
            ArrayBindingElements => &messages::ARRAY_ELEMENT_DESTRUCTURING_PATTERN_EXPECTED,
            ArgumentExpressions => &messages::ARGUMENT_EXPRESSION_EXPECTED,
            ObjectLiteralMembers => &messages::PROPERTY_ASSIGNMENT_EXPECTED,
            ArrayLiteralMembers => &messages::EXPRESSION_OR_COMMA_EXPECTED,
            Parameters => &messages::PARAMETER_DECLARATION_EXPECTED,
            TypeParameters => &messages::TYPE_PARAMETER_DECLARATION_EXPECTED,
            TypeArguments => &messages::TYPE_ARGUMENT_EXPECTED,
            TupleElementTypes => &messages::TYPE_EXPECTED,
            HeritageClauses => &messages::UNEXPECTED_TOKEN,
            JsxAttributes | JsxChildren | ImportOrExportSpecifiers | ImportAttributes => {
                &messages::IDENTIFIER_EXPECTED
            }
        }
    }

    fn allows_trailing_comma(self) -> bool {
        !matches!(
            self,
            ListContext::TypeArguments | ListContext::VariableDeclarations | ListContext::HeritageClauseElement
        )
    }
}

/// A comma-separated list before arena allocation.
pub(super) struct DelimitedList<T> {
    pub elements: Vec<T>,
    /// The separator after the last element, if any.
    pub trailing_comma: Option<TextRange>,
}

impl<'a> Parser<'a> {
    fn is_list_element(&mut self, context: ListContext, in_error_recovery: bool) -> bool {
        use ListContext::*;
        let token = self.token();
        match context {
            SourceElements | BlockStatements | SwitchClauseStatements => {
                !(token == SyntaxKind::SemicolonToken && in_error_recovery) && self.is_start_of_statement()
            }
            SwitchClauses => matches!(token, SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword),
            TypeMembers => self.look_ahead(Self::is_type_member_start),
            ClassMembers => {
                self.look_ahead(Self::is_class_member_start)
                    || (token == SyntaxKind::SemicolonToken && !in_error_recovery)
            }
            EnumMembers => token == SyntaxKind::OpenBracketToken || self.is_literal_property_name(),
            ObjectLiteralMembers => match token {
                SyntaxKind::OpenBracketToken | SyntaxKind::AsteriskToken | SyntaxKind::DotDotDotToken => true,
                SyntaxKind::DotToken => in_error_recovery,
                _ => self.is_literal_property_name(),
            },
            ObjectBindingElements => {
                matches!(token, SyntaxKind::OpenBracketToken | SyntaxKind::DotDotDotToken)
                    || self.is_literal_property_name()
            }
            HeritageClauseElement => {
                if self.is_heritage_clause_keyword() {
                    false
                } else if in_error_recovery {
                    self.is_identifier()
                } else {
                    self.is_start_of_left_hand_side_expression()
                }
            }
            VariableDeclarations => self.is_binding_identifier_or_pattern(),
            ArrayBindingElements => {
                matches!(token, SyntaxKind::CommaToken | SyntaxKind::DotDotDotToken)
                    || self.is_binding_identifier_or_pattern()
            }
            TypeParameters => {
                matches!(token, SyntaxKind::InKeyword | SyntaxKind::ConstKeyword) || self.is_identifier()
            }
            ArrayLiteralMembers => {
                matches!(token, SyntaxKind::CommaToken | SyntaxKind::DotToken | SyntaxKind::DotDotDotToken)
                    || self.is_start_of_expression()
            }
            ArgumentExpressions => token == SyntaxKind::DotDotDotToken || self.is_start_of_expression(),
            Parameters => self.is_start_of_parameter(),
            TypeArguments | TupleElementTypes => token == SyntaxKind::CommaToken || self.is_start_of_type(false),
            HeritageClauses => self.is_heritage_clause_keyword(),
            ImportOrExportSpecifiers => {
                if token == SyntaxKind::FromKeyword
                    && self.look_ahead_next(|p| p.token() == SyntaxKind::StringLiteral)
                {
                    return false;
                }
                token == SyntaxKind::StringLiteral || token.is_identifier_or_keyword()
            }
            JsxAttributes => token.is_identifier_or_keyword() || token == SyntaxKind::OpenBraceToken,
            JsxChildren => true,
            ImportAttributes => token == SyntaxKind::StringLiteral || token.is_identifier_or_keyword(),
        }
    }

    fn is_list_terminator(&mut self, context: ListContext) -> bool {
        use ListContext::*;
        let token = self.token();
        if token == SyntaxKind::EndOfFileToken {
            return true;
        }
        match context {
            BlockStatements | SwitchClauses | TypeMembers | ClassMembers | EnumMembers | ObjectLiteralMembers
            | ObjectBindingElements | ImportOrExportSpecifiers | ImportAttributes => {
                token == SyntaxKind::CloseBraceToken
            }
            SwitchClauseStatements => matches!(
                token,
                SyntaxKind::CloseBraceToken | SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword
            ),
            HeritageClauseElement => matches!(
                token,
                SyntaxKind::OpenBraceToken | SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword
            ),
            VariableDeclarations => {
                self.can_parse_semicolon()
                    || matches!(
                        token,
                        SyntaxKind::InKeyword | SyntaxKind::OfKeyword | SyntaxKind::EqualsGreaterThanToken
                    )
            }
            TypeParameters => matches!(
                token,
                SyntaxKind::GreaterThanToken
                    | SyntaxKind::OpenParenToken
                    | SyntaxKind::OpenBraceToken
                    | SyntaxKind::ExtendsKeyword
                    | SyntaxKind::ImplementsKeyword
            ),
            ArgumentExpressions => matches!(token, SyntaxKind::CloseParenToken | SyntaxKind::SemicolonToken),
            ArrayLiteralMembers | TupleElementTypes | ArrayBindingElements => token == SyntaxKind::CloseBracketToken,
            Parameters => matches!(token, SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken),
            // Anything but a comma ends a type argument list.
            TypeArguments => token != SyntaxKind::CommaToken,
            HeritageClauses => matches!(token, SyntaxKind::OpenBraceToken | SyntaxKind::CloseBraceToken),
            JsxAttributes => matches!(token, SyntaxKind::GreaterThanToken | SyntaxKind::SlashToken),
            JsxChildren => token == SyntaxKind::LessThanSlashToken,
            SourceElements => false,
        }
    }

    /// Whether some active list can make use of the current token.
    fn is_in_some_parsing_context(&mut self) -> bool {
        for context in ListContext::ALL {
            if self.parsing_contexts & context.bit() != 0
                && (self.is_list_element(context, true) || self.is_list_terminator(context))
            {
                return true;
            }
        }
        false
    }

    /// Reports the unexpected token, then either ends the list (an enclosing
    /// list wants the token) or skips the token.
    fn abort_parsing_list_or_move_to_next_token(&mut self, context: ListContext) -> bool {
        self.error_at_current_token(context.expected_message(), &[]);
        if self.is_in_some_parsing_context() {
            return true;
        }
        self.next_token();
        false
    }

    fn enter_list(&mut self, context: ListContext) -> u32 {
        let saved = self.parsing_contexts;
        self.parsing_contexts |= context.bit();
        saved
    }

    /// Elements until a terminator, with no separators.
    pub(super) fn parse_list<T>(&mut self, context: ListContext, mut element: impl FnMut(&mut Self) -> T) -> &'a [T] {
        let saved = self.enter_list(context);
        let arena = self.arena;
        let mut list = BumpVec::new_in(arena);

        while !self.is_list_terminator(context) {
            if self.is_list_element(context, false) {
                let start = self.token_pos();
                list.push(element(self));
                // An element that consumed nothing must not stall the loop.
                if self.token_pos() == start && !self.is_list_terminator(context) {
                    self.error_at_current_token(context.expected_message(), &[]);
                    self.next_token();
                }
                continue;
            }
            if self.abort_parsing_list_or_move_to_next_token(context) {
                break;
            }
        }

        self.parsing_contexts = saved;
        list.into_bump_slice()
    }

    /// Comma-separated elements. A missing comma is reported and parsing
    /// goes on; a trailing comma is reported unless the context allows one.
    pub(super) fn parse_delimited_list<T>(
        &mut self,
        context: ListContext,
        mut element: impl FnMut(&mut Self) -> T,
    ) -> DelimitedList<T> {
        let saved = self.enter_list(context);
        let mut elements = Vec::new();
        let mut trailing_comma = None;

        loop {
            if self.is_list_element(context, false) {
                let start = self.token_pos();
                elements.push(element(self));
                trailing_comma = None;
                if self.token() == SyntaxKind::CommaToken {
                    trailing_comma = Some(self.scanner.token_range());
                    self.next_token();
                    continue;
                }
                if self.is_list_terminator(context) {
                    break;
                }
                self.parse_expected(SyntaxKind::CommaToken);
                if context == ListContext::ObjectLiteralMembers
                    && self.token() == SyntaxKind::SemicolonToken
                    && !self.has_preceding_line_break()
                {
                    self.next_token();
                }
                if self.token_pos() == start {
                    self.next_token();
                }
                continue;
            }
            if self.is_list_terminator(context) {
                break;
            }
            if self.abort_parsing_list_or_move_to_next_token(context) {
                break;
            }
        }

        self.parsing_contexts = saved;

        if let Some(comma) = trailing_comma {
            if !context.allows_trailing_comma() {
                self.error_at_range(comma, &messages::TRAILING_COMMA_NOT_ALLOWED, &[]);
            }
        }
        DelimitedList {
            elements,
            trailing_comma,
        }
    }

    /// `open element, element, ... close`. Returns the elements and the
    /// trailing comma, if one was accepted.
    pub(super) fn parse_bracketed_list<T>(
        &mut self,
        context: ListContext,
        open: SyntaxKind,
        close: SyntaxKind,
        element: impl FnMut(&mut Self) -> T,
    ) -> DelimitedList<T> {
        if !self.parse_expected(open) {
            return DelimitedList {
                elements: Vec::new(),
                trailing_comma: None,
            };
        }
        let list = self.parse_delimited_list(context, element);
        self.parse_expected(close);
        list
    }

    /// Identifiers, keywords, string and numeric literals.
    pub(super) fn is_literal_property_name(&self) -> bool {
        let token = self.token();
        attrs(token).can_start_property_name() && token != SyntaxKind::PrivateIdentifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_bits_are_distinct() {
        let mut seen = 0u32;
        for context in ListContext::ALL {
            assert_eq!(seen & context.bit(), 0);
            seen |= context.bit();
        }
    }

    #[test]
    fn test_trailing_comma_policy() {
        assert!(ListContext::ArgumentExpressions.allows_trailing_comma());
        assert!(ListContext::Parameters.allows_trailing_comma());
        assert!(ListContext::TypeParameters.allows_trailing_comma());
        assert!(!ListContext::TypeArguments.allows_trailing_comma());
        assert!(!ListContext::VariableDeclarations.allows_trailing_comma());
    }

    #[test]
    fn test_expected_messages() {
        assert_eq!(ListContext::ArgumentExpressions.expected_message().code, 1135);
        assert_eq!(ListContext::ClassMembers.expected_message().code, 1068);
        assert_eq!(ListContext::SourceElements.expected_message().code, 1128);
    }
}
