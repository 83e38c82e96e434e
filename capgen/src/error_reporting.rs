// Diagnostic reporting for the synthesis engine.
// Classification failures go to the error channel (the tag is aborted);
// member conflicts go to the warning channel (one member is skipped).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source span the host compiler attached to a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub file_path: Option<String>,
}

impl SourceSpan {
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
            file_path: None,
        }
    }

    pub fn with_file(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }

    pub fn single_point(line: usize, column: usize) -> Self {
        Self::new(line, column, line, column)
    }

    /// Placeholder span for tags created without location information.
    pub fn unknown() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

/// One diagnostic attached to a tag's source location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: String,
    pub severity: Severity,
    pub message: String,
    pub span: SourceSpan,
}

impl Diagnostic {
    pub fn error(code: &str, message: &str, span: SourceSpan) -> Self {
        Self {
            code: code.to_string(),
            severity: Severity::Error,
            message: message.to_string(),
            span,
        }
    }

    pub fn warning(code: &str, message: &str, span: SourceSpan) -> Self {
        Self {
            code: code.to_string(),
            severity: Severity::Warning,
            message: message.to_string(),
            span,
        }
    }
}

/// Collects diagnostics for one synthesis pass. Errors abort the current
/// tag's processing; warnings are non-aborting and raised once per skipped
/// member.
#[derive(Debug, Default, Clone)]
pub struct DiagnosticReporter {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, span: &SourceSpan, message: &str) {
        self.diagnostics
            .push(Diagnostic::error("C001", message, span.clone()));
    }

    pub fn warning(&mut self, span: &SourceSpan, message: &str) {
        self.diagnostics
            .push(Diagnostic::warning("C002", message, span.clone()));
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Plain-text rendering of diagnostics.
#[derive(Debug, Clone)]
pub struct DiagnosticFormatter {
    pub show_location: bool,
}

impl Default for DiagnosticFormatter {
    fn default() -> Self {
        Self {
            show_location: true,
        }
    }
}

impl DiagnosticFormatter {
    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let severity_str = match diagnostic.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };

        let mut output = format!(
            "{}: {}: {}\n",
            severity_str, diagnostic.code, diagnostic.message
        );

        if self.show_location {
            let span = &diagnostic.span;
            if let Some(ref file) = span.file_path {
                output.push_str(&format!(
                    "  --> {}:{}:{}\n",
                    file, span.start_line, span.start_column
                ));
            } else if span.start_line > 0 {
                output.push_str(&format!(
                    "  --> line {}:{}\n",
                    span.start_line, span.start_column
                ));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatter = DiagnosticFormatter::default();
        write!(f, "{}", formatter.format_diagnostic(self))
    }
}
