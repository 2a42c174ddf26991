//! tern_diagnostics: diagnostic messages and the sink the scanner and parser
//! report into.
//!
//! A diagnostic is a positioned reference to a static message template plus
//! the arguments that fill its `{0}`, `{1}`, ... placeholders. The message
//! text is only rendered when someone asks for it.

use serde::Serialize;
use std::fmt;
use tern_core::text::TextRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Suggestion => write!(f, "suggestion"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// A message template with a stable numeric code.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// A reported problem: where, which message, and the interpolated arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub range: TextRange,
    pub message: &'static DiagnosticMessage,
    pub args: Vec<String>,
}

impl Diagnostic {
    pub fn new(range: TextRange, message: &'static DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            range,
            message,
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    #[inline]
    pub fn code(&self) -> u32 {
        self.message.code
    }

    #[inline]
    pub fn category(&self) -> DiagnosticCategory {
        self.message.category
    }

    pub fn is_error(&self) -> bool {
        self.category() == DiagnosticCategory::Error
    }

    /// The message template with its arguments substituted.
    pub fn message_text(&self) -> String {
        format_message(self.message.message, self.args.as_slice())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}): {} TS{}: {}",
            self.range.pos,
            self.category(),
            self.code(),
            self.message_text()
        )
    }
}

/// Replace `{0}`, `{1}`, ... in `template` with `args`.
pub fn format_message<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg.as_ref());
    }
    result
}

/// Receiver for diagnostics. Reporting never fails and the reporter never
/// looks at the result.
pub trait DiagnosticSink {
    fn report(&mut self, range: TextRange, message: &'static DiagnosticMessage, args: &[&str]);
}

/// An ordered list of diagnostics.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Drop every diagnostic past the first `len`. Used to discard what an
    /// abandoned speculative parse reported.
    pub fn truncate(&mut self, len: usize) {
        self.diagnostics.truncate(len);
    }

    /// Move all diagnostics out, leaving the collection empty.
    pub fn drain_into(&mut self, other: &mut DiagnosticCollection) {
        other.diagnostics.append(&mut self.diagnostics);
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }

    pub fn sort(&mut self) {
        self.diagnostics.sort_by_key(|d| (d.range.pos, d.range.end));
    }
}

impl DiagnosticSink for DiagnosticCollection {
    fn report(&mut self, range: TextRange, message: &'static DiagnosticMessage, args: &[&str]) {
        self.add(Diagnostic::new(range, message, args));
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, range: TextRange, message: &'static DiagnosticMessage, args: &[&str]) {
        self.push(Diagnostic::new(range, message, args));
    }
}

// ============================================================================
// Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
    }

    // ========================================================================
    // Scanner
    // ========================================================================
    pub static UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, Error, "Unterminated string literal.");
    pub static ASTERISK_SLASH_EXPECTED: DiagnosticMessage = diag!(1010, Error, "'*/' expected.");
    pub static DIGIT_EXPECTED: DiagnosticMessage = diag!(1124, Error, "Digit expected.");
    pub static HEXADECIMAL_DIGIT_EXPECTED: DiagnosticMessage = diag!(1125, Error, "Hexadecimal digit expected.");
    pub static UNEXPECTED_END_OF_TEXT: DiagnosticMessage = diag!(1126, Error, "Unexpected end of text.");
    pub static INVALID_CHARACTER: DiagnosticMessage = diag!(1127, Error, "Invalid character.");
    pub static UNTERMINATED_TEMPLATE_LITERAL: DiagnosticMessage = diag!(1160, Error, "Unterminated template literal.");
    pub static UNTERMINATED_REGULAR_EXPRESSION_LITERAL: DiagnosticMessage = diag!(1161, Error, "Unterminated regular expression literal.");
    pub static MERGE_CONFLICT_MARKER_ENCOUNTERED: DiagnosticMessage = diag!(1185, Error, "Merge conflict marker encountered.");
    pub static AN_EXTENDED_UNICODE_ESCAPE_VALUE_MUST_BE_BETWEEN_0X0_AND_0X10FFFF_INCLUSIVE: DiagnosticMessage = diag!(1198, Error, "An extended Unicode escape value must be between 0x0 and 0x10FFFF inclusive.");
    pub static UNTERMINATED_UNICODE_ESCAPE_SEQUENCE: DiagnosticMessage = diag!(1199, Error, "Unterminated Unicode escape sequence.");
    pub static NUMERIC_SEPARATORS_ARE_NOT_ALLOWED_HERE: DiagnosticMessage = diag!(6188, Error, "Numeric separators are not allowed here.");
    pub static MULTIPLE_CONSECUTIVE_NUMERIC_SEPARATORS_ARE_NOT_PERMITTED: DiagnosticMessage = diag!(6189, Error, "Multiple consecutive numeric separators are not permitted.");
    pub static AN_IDENTIFIER_OR_KEYWORD_CANNOT_IMMEDIATELY_FOLLOW_A_NUMERIC_LITERAL: DiagnosticMessage = diag!(1351, Error, "An identifier or keyword cannot immediately follow a numeric literal.");
    pub static OCTAL_LITERALS_ARE_NOT_ALLOWED_USE_THE_SYNTAX_0: DiagnosticMessage = diag!(1121, Error, "Octal literals are not allowed. Use the syntax '{0}'.");
    pub static OCTAL_ESCAPE_SEQUENCES_ARE_NOT_ALLOWED_USE_THE_SYNTAX_0: DiagnosticMessage = diag!(1487, Error, "Octal escape sequences are not allowed. Use the syntax '{0}'.");

    // ========================================================================
    // Parser
    // ========================================================================
    pub static IDENTIFIER_EXPECTED: DiagnosticMessage = diag!(1003, Error, "Identifier expected.");
    pub static _0_EXPECTED: DiagnosticMessage = diag!(1005, Error, "'{0}' expected.");
    pub static TRAILING_COMMA_NOT_ALLOWED: DiagnosticMessage = diag!(1009, Error, "Trailing comma not allowed.");
    pub static UNEXPECTED_TOKEN: DiagnosticMessage = diag!(1012, Error, "Unexpected token.");
    pub static A_REST_PARAMETER_OR_BINDING_PATTERN_MAY_NOT_HAVE_A_TRAILING_COMMA: DiagnosticMessage = diag!(1013, Error, "A rest parameter or binding pattern may not have a trailing comma.");
    pub static EXPRESSION_EXPECTED: DiagnosticMessage = diag!(1109, Error, "Expression expected.");
    pub static TYPE_EXPECTED: DiagnosticMessage = diag!(1110, Error, "Type expected.");
    pub static DECLARATION_OR_STATEMENT_EXPECTED: DiagnosticMessage = diag!(1128, Error, "Declaration or statement expected.");
    pub static STATEMENT_EXPECTED: DiagnosticMessage = diag!(1129, Error, "Statement expected.");
    pub static CASE_OR_DEFAULT_EXPECTED: DiagnosticMessage = diag!(1130, Error, "'case' or 'default' expected.");
    pub static PROPERTY_OR_SIGNATURE_EXPECTED: DiagnosticMessage = diag!(1131, Error, "Property or signature expected.");
    pub static ENUM_MEMBER_EXPECTED: DiagnosticMessage = diag!(1132, Error, "Enum member expected.");
    pub static VARIABLE_DECLARATION_EXPECTED: DiagnosticMessage = diag!(1134, Error, "Variable declaration expected.");
    pub static ARGUMENT_EXPRESSION_EXPECTED: DiagnosticMessage = diag!(1135, Error, "Argument expression expected.");
    pub static PROPERTY_ASSIGNMENT_EXPECTED: DiagnosticMessage = diag!(1136, Error, "Property assignment expected.");
    pub static EXPRESSION_OR_COMMA_EXPECTED: DiagnosticMessage = diag!(1137, Error, "Expression or comma expected.");
    pub static PARAMETER_DECLARATION_EXPECTED: DiagnosticMessage = diag!(1138, Error, "Parameter declaration expected.");
    pub static TYPE_PARAMETER_DECLARATION_EXPECTED: DiagnosticMessage = diag!(1139, Error, "Type parameter declaration expected.");
    pub static TYPE_ARGUMENT_EXPECTED: DiagnosticMessage = diag!(1140, Error, "Type argument expected.");
    pub static STRING_LITERAL_EXPECTED: DiagnosticMessage = diag!(1141, Error, "String literal expected.");
    pub static PROPERTY_DESTRUCTURING_PATTERN_EXPECTED: DiagnosticMessage = diag!(1180, Error, "Property destructuring pattern expected.");
    pub static ARRAY_ELEMENT_DESTRUCTURING_PATTERN_EXPECTED: DiagnosticMessage = diag!(1181, Error, "Array element destructuring pattern expected.");
    pub static LINE_BREAK_NOT_PERMITTED_HERE: DiagnosticMessage = diag!(1142, Error, "Line break not permitted here.");
    pub static LINE_TERMINATOR_NOT_PERMITTED_BEFORE_ARROW: DiagnosticMessage = diag!(1200, Error, "Line terminator not permitted before arrow.");
    pub static OR_EXPECTED: DiagnosticMessage = diag!(1144, Error, "'{' or ';' expected.");
    pub static DECLARATION_EXPECTED: DiagnosticMessage = diag!(1146, Error, "Declaration expected.");
    pub static UNEXPECTED_TOKEN_A_CONSTRUCTOR_METHOD_ACCESSOR_OR_PROPERTY_WAS_EXPECTED: DiagnosticMessage = diag!(1068, Error, "Unexpected token. A constructor, method, accessor, or property was expected.");
    pub static IDENTIFIER_EXPECTED_0_IS_A_RESERVED_WORD_THAT_CANNOT_BE_USED_HERE: DiagnosticMessage = diag!(1359, Error, "Identifier expected. '{0}' is a reserved word that cannot be used here.");
    pub static UNEXPECTED_KEYWORD_OR_IDENTIFIER: DiagnosticMessage = diag!(1434, Error, "Unexpected keyword or identifier.");
    pub static CATCH_OR_FINALLY_EXPECTED: DiagnosticMessage = diag!(1472, Error, "'catch' or 'finally' expected.");
    pub static JSX_ELEMENT_0_HAS_NO_CORRESPONDING_CLOSING_TAG: DiagnosticMessage = diag!(17008, Error, "JSX element '{0}' has no corresponding closing tag.");
    pub static EXPECTED_CORRESPONDING_JSX_CLOSING_TAG_FOR_0: DiagnosticMessage = diag!(17002, Error, "Expected corresponding JSX closing tag for '{0}'.");
    pub static MAXIMUM_NESTING_DEPTH_EXCEEDED: DiagnosticMessage = diag!(1000, Error, "Maximum nesting depth exceeded.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        assert_eq!(format_message("'{0}' expected.", &[";"]), "';' expected.");
        assert_eq!(format_message("{0} and {1}", &["a", "b"]), "a and b");
        assert_eq!(format_message::<&str>("Expression expected.", &[]), "Expression expected.");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new(TextRange::new(8, 9), &messages::_0_EXPECTED, &[";"]);
        assert_eq!(diag.to_string(), "(8): error TS1005: ';' expected.");
        assert_eq!(diag.code(), 1005);
        assert!(diag.is_error());
    }

    #[test]
    fn test_sink_and_truncate() {
        let mut collection = DiagnosticCollection::new();
        collection.report(TextRange::empty(0), &messages::EXPRESSION_EXPECTED, &[]);
        let mark = collection.len();
        collection.report(TextRange::new(3, 4), &messages::TYPE_EXPECTED, &[]);
        collection.report(TextRange::new(5, 6), &messages::UNEXPECTED_TOKEN, &[]);
        assert_eq!(collection.error_count(), 3);
        collection.truncate(mark);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.diagnostics()[0].code(), 1109);
    }

    #[test]
    fn test_drain_into_preserves_order() {
        let mut scanner_side = DiagnosticCollection::new();
        scanner_side.report(TextRange::new(1, 2), &messages::INVALID_CHARACTER, &[]);
        let mut parser_side = DiagnosticCollection::new();
        parser_side.report(TextRange::new(0, 1), &messages::UNEXPECTED_TOKEN, &[]);
        scanner_side.drain_into(&mut parser_side);
        assert!(scanner_side.is_empty());
        let codes: Vec<u32> = parser_side.diagnostics().iter().map(Diagnostic::code).collect();
        assert_eq!(codes, vec![1012, 1127]);
    }

    #[test]
    fn test_serialize_diagnostic() {
        let diag = Diagnostic::new(TextRange::new(2, 3), &messages::_0_EXPECTED, &[")"]);
        let json = serde_json::to_string(&diag).unwrap();
        assert!(json.contains("\"code\":1005"));
        assert!(json.contains("\"category\":\"error\""));
        assert!(json.contains("\"args\":[\")\"]"));
    }
}
