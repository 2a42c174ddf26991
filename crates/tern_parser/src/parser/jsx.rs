//! JSX elements, fragments and their children.
//!
//! Between tags the scanner runs in JSX mode (text runs, `{`, `<`, `</`);
//! inside tags it scans ordinary tokens, extended for hyphenated names.

use tern_ast::node::*;
use tern_ast::syntax_kind::SyntaxKind;
use tern_ast::visitor::AstNode;
use tern_diagnostics::messages;

use super::list::ListContext;
use super::Parser;

/// What an opening `<` turned out to start.
enum JsxOpening<'a> {
    Element(&'a JsxOpeningElement<'a>),
    SelfClosing(&'a JsxOpeningElement<'a>),
    Fragment(Token),
}

impl<'a> Parser<'a> {
    // ========================================================================
    // JSX scanning
    // ========================================================================

    /// Advances past the current token, scanning the next one as children
    /// content.
    fn next_jsx_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.token_end();
        self.scanner.scan_jsx_token();
        self.absorb_token_diagnostics();
        self.token()
    }

    /// Rescans the current token as children content after a tag left it
    /// scanned as an ordinary token.
    fn re_scan_jsx_token(&mut self) -> SyntaxKind {
        if !matches!(
            self.token(),
            SyntaxKind::JsxText
                | SyntaxKind::JsxTextAllWhiteSpaces
                | SyntaxKind::ConflictMarkerTrivia
                | SyntaxKind::LessThanToken
                | SyntaxKind::LessThanSlashToken
                | SyntaxKind::OpenBraceToken
        ) {
            self.scanner.re_scan_jsx_token();
            self.absorb_rescan_diagnostics();
        }
        self.token()
    }

    /// Advances past the current `=` and scans an attribute value.
    fn next_jsx_attribute_value(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.token_end();
        self.scanner.scan_jsx_attribute_value();
        self.absorb_token_diagnostics();
        self.token()
    }

    /// Consumes the `>` closing a tag. Inside children the token after it
    /// is children content.
    fn parse_expected_jsx_closing_angle(&mut self, in_expression_context: bool) {
        if self.token() != SyntaxKind::GreaterThanToken {
            self.error_at_current_token(&messages::_0_EXPECTED, &[SyntaxKind::GreaterThanToken.display_name()]);
            return;
        }
        if in_expression_context {
            self.next_token();
        } else {
            self.next_jsx_token();
        }
    }

    // ========================================================================
    // Elements
    // ========================================================================

    /// An element, self-closing element or fragment starting at `<`.
    /// `in_expression_context` is false for a nested child, whose closing
    /// `>` is followed by more children content.
    pub(super) fn parse_jsx_element_or_self_closing_element_or_fragment(
        &mut self,
        in_expression_context: bool,
    ) -> Expression<'a> {
        match self.parse_jsx_element_worker(in_expression_context) {
            JsxChild::Element(element) => Expression::JsxElement(element),
            JsxChild::SelfClosingElement(element) => Expression::JsxSelfClosingElement(element),
            JsxChild::Fragment(fragment) => Expression::JsxFragment(fragment),
            JsxChild::Text(_) | JsxChild::Expression(_) => {
                unreachable!("an opening tag always yields an element or fragment")
            }
        }
    }

    fn parse_jsx_element_worker(&mut self, in_expression_context: bool) -> JsxChild<'a> {
        let start = self.node_start();
        match self.parse_jsx_opening(in_expression_context) {
            JsxOpening::SelfClosing(element) => JsxChild::SelfClosingElement(element),
            JsxOpening::Element(opening_element) => {
                let children = self.parse_jsx_children(Some(opening_element.tag_name));
                let closing_element = self.parse_jsx_closing_element(opening_element, in_expression_context);
                let data = self.finish_node(SyntaxKind::JsxElement, start);
                JsxChild::Element(self.alloc(JsxElement {
                    data,
                    opening_element,
                    children,
                    closing_element,
                }))
            }
            JsxOpening::Fragment(opening_fragment) => {
                let children = self.parse_jsx_children(None);
                let closing_fragment = self.parse_jsx_closing_fragment(in_expression_context);
                let data = self.finish_node(SyntaxKind::JsxFragment, start);
                JsxChild::Fragment(self.alloc(JsxFragment {
                    data,
                    opening_fragment,
                    children,
                    closing_fragment,
                }))
            }
        }
    }

    fn parse_jsx_opening(&mut self, in_expression_context: bool) -> JsxOpening<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::LessThanToken);

        if self.token() == SyntaxKind::GreaterThanToken {
            self.next_jsx_token();
            let data = self.finish_node(SyntaxKind::JsxOpeningFragment, start);
            return JsxOpening::Fragment(Token { data });
        }

        let tag_name = self.parse_jsx_element_name();
        let type_arguments = if self.token() == SyntaxKind::LessThanToken {
            Some(self.parse_type_arguments())
        } else {
            None
        };
        let attributes = self.parse_jsx_attributes();

        if self.token() == SyntaxKind::GreaterThanToken {
            self.next_jsx_token();
            let data = self.finish_node(SyntaxKind::JsxOpeningElement, start);
            return JsxOpening::Element(self.alloc(JsxOpeningElement {
                data,
                tag_name,
                type_arguments,
                attributes,
            }));
        }

        self.parse_expected(SyntaxKind::SlashToken);
        self.parse_expected_jsx_closing_angle(in_expression_context);
        let data = self.finish_node(SyntaxKind::JsxSelfClosingElement, start);
        JsxOpening::SelfClosing(self.alloc(JsxOpeningElement {
            data,
            tag_name,
            type_arguments,
            attributes,
        }))
    }

    /// `div`, `this`, `a.b.c` or `svg:rect`.
    fn parse_jsx_element_name(&mut self) -> Expression<'a> {
        let start = self.node_start();
        let mut expression = if self.token() == SyntaxKind::ThisKeyword {
            let token = self.parse_token_node();
            Expression::Keyword(self.alloc(token))
        } else {
            self.parse_jsx_identifier_or_namespaced_name()
        };
        if matches!(expression, Expression::JsxNamespacedName(_)) {
            return expression;
        }
        while self.parse_optional(SyntaxKind::DotToken) {
            let name = self.parse_identifier_name();
            let data = self.finish_node(SyntaxKind::PropertyAccessExpression, start);
            expression = Expression::PropertyAccess(self.alloc(PropertyAccessExpression {
                data,
                expression,
                question_dot_token: None,
                name: MemberName::Identifier(name),
            }));
        }
        expression
    }

    /// An identifier that may contain `-`.
    fn parse_jsx_identifier(&mut self) -> &'a Identifier<'a> {
        self.scanner.scan_jsx_identifier();
        self.parse_identifier_name()
    }

    fn parse_jsx_identifier_or_namespaced_name(&mut self) -> Expression<'a> {
        let start = self.node_start();
        let namespace = self.parse_jsx_identifier();
        if !self.parse_optional(SyntaxKind::ColonToken) {
            return Expression::Identifier(namespace);
        }
        let name = self.parse_jsx_identifier();
        let data = self.finish_node(SyntaxKind::JsxNamespacedName, start);
        Expression::JsxNamespacedName(self.alloc(JsxNamespacedName { data, namespace, name }))
    }

    fn parse_jsx_attributes(&mut self) -> &'a JsxAttributes<'a> {
        let start = self.node_start();
        let properties = self.parse_list(ListContext::JsxAttributes, Self::parse_jsx_attribute);
        let data = self.finish_node(SyntaxKind::JsxAttributes, start);
        self.alloc(JsxAttributes { data, properties })
    }

    fn parse_jsx_attribute(&mut self) -> JsxAttributeLike<'a> {
        let start = self.node_start();
        if self.parse_optional(SyntaxKind::OpenBraceToken) {
            self.parse_expected(SyntaxKind::DotDotDotToken);
            let expression = self.parse_expression();
            self.parse_expected(SyntaxKind::CloseBraceToken);
            let data = self.finish_node(SyntaxKind::JsxSpreadAttribute, start);
            return JsxAttributeLike::Spread(self.alloc(JsxSpreadAttribute { data, expression }));
        }

        let name = self.parse_jsx_identifier_or_namespaced_name();
        let initializer = if self.token() == SyntaxKind::EqualsToken {
            match self.next_jsx_attribute_value() {
                SyntaxKind::StringLiteral => Some(JsxAttributeValue::StringLiteral(self.parse_literal_node())),
                SyntaxKind::OpenBraceToken => Some(JsxAttributeValue::Expression(self.parse_jsx_expression(true))),
                SyntaxKind::LessThanToken => Some(JsxAttributeValue::Element(
                    self.parse_jsx_element_or_self_closing_element_or_fragment(true),
                )),
                _ => {
                    self.error_at_current_token(&messages::_0_EXPECTED, &[SyntaxKind::OpenBraceToken.display_name()]);
                    None
                }
            }
        } else {
            None
        };
        let data = self.finish_node(SyntaxKind::JsxAttribute, start);
        JsxAttributeLike::Attribute(self.alloc(JsxAttribute { data, name, initializer }))
    }

    /// `{expr}` as an attribute value or child. A child may also be an
    /// empty `{}` or a spread `{...expr}`.
    fn parse_jsx_expression(&mut self, in_expression_context: bool) -> &'a JsxExpression<'a> {
        let start = self.node_start();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let (dot_dot_dot_token, expression) = if self.token() != SyntaxKind::CloseBraceToken {
            let dot_dot_dot_token = if in_expression_context {
                None
            } else {
                self.parse_optional_token(SyntaxKind::DotDotDotToken)
            };
            (dot_dot_dot_token, Some(self.parse_expression()))
        } else {
            (None, None)
        };
        if in_expression_context || self.token() != SyntaxKind::CloseBraceToken {
            self.parse_expected(SyntaxKind::CloseBraceToken);
        } else {
            self.next_jsx_token();
        }
        let data = self.finish_node(SyntaxKind::JsxExpression, start);
        self.alloc(JsxExpression {
            data,
            dot_dot_dot_token,
            expression,
        })
    }

    // ========================================================================
    // Children and closing tags
    // ========================================================================

    /// Children up to the next `</`. An element left open at end of input
    /// is reported at its tag name.
    fn parse_jsx_children(&mut self, open_tag_name: Option<Expression<'a>>) -> NodeList<'a, JsxChild<'a>> {
        let children = self.parse_list(ListContext::JsxChildren, Self::parse_jsx_child);
        if self.token() == SyntaxKind::EndOfFileToken {
            match open_tag_name {
                Some(tag_name) => {
                    let range = tag_name.data().range;
                    let text = range.slice(self.source);
                    self.error_at_range(range, &messages::JSX_ELEMENT_0_HAS_NO_CORRESPONDING_CLOSING_TAG, &[text]);
                }
                None => {
                    self.error_at_current_token(&messages::_0_EXPECTED, &[SyntaxKind::LessThanSlashToken.display_name()]);
                }
            }
        }
        children
    }

    fn parse_jsx_child(&mut self) -> JsxChild<'a> {
        match self.re_scan_jsx_token() {
            SyntaxKind::OpenBraceToken => JsxChild::Expression(self.parse_jsx_expression(false)),
            SyntaxKind::LessThanToken => self.parse_jsx_element_worker(false),
            _ => JsxChild::Text(self.parse_jsx_text()),
        }
    }

    /// A run of text, including conflict markers the scanner stopped at.
    fn parse_jsx_text(&mut self) -> &'a JsxText<'a> {
        let start = self.node_start();
        let contains_only_trivia_white_spaces = self.token() == SyntaxKind::JsxTextAllWhiteSpaces;
        let text = self.token_value_in_arena();
        self.next_jsx_token();
        let data = self.finish_node(SyntaxKind::JsxText, start);
        self.alloc(JsxText {
            data,
            text,
            contains_only_trivia_white_spaces,
        })
    }

    fn parse_jsx_closing_element(
        &mut self,
        opening_element: &'a JsxOpeningElement<'a>,
        in_expression_context: bool,
    ) -> &'a JsxClosingElement<'a> {
        if self.token() == SyntaxKind::EndOfFileToken {
            // Already reported as unclosed.
            let data = self.missing_node_data(SyntaxKind::JsxClosingElement);
            let tag_name = Expression::Identifier(self.create_missing_identifier());
            return self.alloc(JsxClosingElement { data, tag_name });
        }

        let start = self.node_start();
        self.parse_expected(SyntaxKind::LessThanSlashToken);
        let tag_name = self.parse_jsx_element_name();
        if !tag_names_are_equivalent(opening_element.tag_name, tag_name) {
            let expected = opening_element.tag_name.data().range.slice(self.source);
            self.error_at_range(
                tag_name.data().range,
                &messages::EXPECTED_CORRESPONDING_JSX_CLOSING_TAG_FOR_0,
                &[expected],
            );
        }
        self.parse_expected_jsx_closing_angle(in_expression_context);
        let data = self.finish_node(SyntaxKind::JsxClosingElement, start);
        self.alloc(JsxClosingElement { data, tag_name })
    }

    fn parse_jsx_closing_fragment(&mut self, in_expression_context: bool) -> Token {
        if self.token() == SyntaxKind::EndOfFileToken {
            return Token {
                data: self.missing_node_data(SyntaxKind::JsxClosingFragment),
            };
        }
        let start = self.node_start();
        self.parse_expected(SyntaxKind::LessThanSlashToken);
        self.parse_expected_jsx_closing_angle(in_expression_context);
        Token {
            data: self.finish_node(SyntaxKind::JsxClosingFragment, start),
        }
    }
}

fn tag_names_are_equivalent(a: Expression<'_>, b: Expression<'_>) -> bool {
    match (a, b) {
        (Expression::Identifier(a), Expression::Identifier(b)) => a.text == b.text,
        (Expression::Keyword(a), Expression::Keyword(b)) => a.kind() == b.kind(),
        (Expression::JsxNamespacedName(a), Expression::JsxNamespacedName(b)) => {
            a.namespace.text == b.namespace.text && a.name.text == b.name.text
        }
        (Expression::PropertyAccess(a), Expression::PropertyAccess(b)) => match (a.name, b.name) {
            (MemberName::Identifier(x), MemberName::Identifier(y)) => {
                x.text == y.text && tag_names_are_equivalent(a.expression, b.expression)
            }
            _ => false,
        },
        _ => false,
    }
}
