//! Diagnostic output: `miette` reports for people, JSON for tools.

use std::fmt;

use miette::{GraphicalReportHandler, GraphicalTheme, LabeledSpan, NamedSource, Severity, SourceCode, SourceSpan};
use serde::Serialize;
use tern_core::text::{LineAndColumn, LineMap};
use tern_diagnostics::{Diagnostic, DiagnosticCategory};

/// One diagnostic bound to the file it was reported in, in the shape
/// `miette` renders.
#[derive(Debug)]
struct SourceDiagnostic<'s> {
    message: String,
    code: String,
    severity: Severity,
    span: SourceSpan,
    source: &'s NamedSource<String>,
}

impl fmt::Display for SourceDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SourceDiagnostic<'_> {}

impl miette::Diagnostic for SourceDiagnostic<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(self.source)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(None, self.span))))
    }
}

fn severity_of(category: DiagnosticCategory) -> Severity {
    match category {
        DiagnosticCategory::Error => Severity::Error,
        DiagnosticCategory::Warning => Severity::Warning,
        DiagnosticCategory::Suggestion | DiagnosticCategory::Message => Severity::Advice,
    }
}

/// Renders `diagnostics` as source snippets with the offending range
/// underlined.
pub fn render_diagnostics(name: &str, text: &str, diagnostics: &[Diagnostic], color: bool) -> String {
    let theme = if color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let handler = GraphicalReportHandler::new_themed(theme);
    let source = NamedSource::new(name, text.to_string());

    let mut out = String::new();
    for diagnostic in diagnostics {
        let report = SourceDiagnostic {
            message: diagnostic.message_text(),
            code: format!("TS{}", diagnostic.code()),
            severity: severity_of(diagnostic.category()),
            span: SourceSpan::from(diagnostic.range.to_range()),
            source: &source,
        };
        if handler.render_report(&mut out, &report).is_err() {
            out.push_str(&format!("{}: {}\n", name, diagnostic));
        }
    }
    out
}

/// A diagnostic as written by `--json`.
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    #[serde(flatten)]
    pub diagnostic: Diagnostic,
    pub text: String,
    pub start: LineAndColumn,
    pub end: LineAndColumn,
}

/// All diagnostics of one file, as written by `--json`.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: String,
    pub error_count: usize,
    pub diagnostics: Vec<JsonDiagnostic>,
}

impl FileReport {
    pub fn new(file: String, text: &str, diagnostics: &[Diagnostic]) -> Self {
        let line_map = LineMap::new(text);
        let diagnostics: Vec<JsonDiagnostic> = diagnostics
            .iter()
            .map(|diagnostic| JsonDiagnostic {
                diagnostic: diagnostic.clone(),
                text: diagnostic.message_text(),
                start: line_map.line_and_column_of(diagnostic.range.pos),
                end: line_map.line_and_column_of(diagnostic.range.end),
            })
            .collect();
        Self {
            file,
            error_count: diagnostics.iter().filter(|d| d.diagnostic.is_error()).count(),
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tern_core::text::TextRange;
    use tern_diagnostics::messages;

    #[test]
    fn test_render_includes_code_and_snippet() {
        let text = "let x = ;\n";
        let diagnostics = [Diagnostic::new(TextRange::new(8, 9), &messages::EXPRESSION_EXPECTED, &[])];
        let rendered = render_diagnostics("input.ts", text, &diagnostics, false);
        assert!(rendered.contains("TS1109"), "{}", rendered);
        assert!(rendered.contains("Expression expected."), "{}", rendered);
        assert!(rendered.contains("let x = ;"), "{}", rendered);
    }

    #[test]
    fn test_json_report_positions() {
        let text = "a;\nlet x = ;";
        let diagnostics = [Diagnostic::new(TextRange::new(11, 12), &messages::EXPRESSION_EXPECTED, &[])];
        let report = FileReport::new("input.ts".to_string(), text, &diagnostics);
        assert_eq!(report.error_count, 1);
        assert_eq!(report.diagnostics[0].start, LineAndColumn { line: 1, column: 8 });

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["file"], "input.ts");
        assert_eq!(json["diagnostics"][0]["message"]["code"], 1109);
        assert_eq!(json["diagnostics"][0]["text"], "Expression expected.");
    }
}
