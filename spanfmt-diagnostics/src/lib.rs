// Diagnostics for spanfmt templates
// Rust-style messages with spans and colors, written to the error channel

use colored::Colorize;
use serde::Serialize;
use std::fmt;

/// Template location (line, byte column, file)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Span {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub length: usize, // Length of the error span in bytes
}

impl Span {
    pub fn new(file: String, line: usize, column: usize, length: usize) -> Self {
        Self {
            file,
            line,
            column,
            length,
        }
    }

    pub fn from_file_and_span(file: &str, source: &str, span: std::ops::Range<usize>) -> Self {
        let start = span.start.min(source.len());
        let before = &source.as_bytes()[..start];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let column = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(before.len() + 1, |pos| before.len() - pos);
        let length = span.end.saturating_sub(span.start).max(1);

        Self {
            file: file.to_string(),
            line,
            column,
            length,
        }
    }

    pub fn unknown() -> Self {
        Self {
            file: "<unknown>".to_string(),
            line: 0,
            column: 0,
            length: 0,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorLevel {
    Error,
    Warning,
    Note,
    Help,
}

impl fmt::Display for ErrorLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorLevel::Error => write!(f, "{}", "error".red().bold()),
            ErrorLevel::Warning => write!(f, "{}", "warning".yellow().bold()),
            ErrorLevel::Note => write!(f, "{}", "note".cyan().bold()),
            ErrorLevel::Help => write!(f, "{}", "help".green().bold()),
        }
    }
}

/// Structured diagnostic message
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub level: ErrorLevel,
    pub code: String, // e.g., "F0001" for an unclosed placeholder
    pub message: String,
    pub span: Span,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

/// Template edit that resolves the diagnostic
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub message: String,
    pub replacement: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(level: ErrorLevel, code: &str, message: String, span: Span) -> Self {
        Self {
            level,
            code: code.to_string(),
            message,
            span,
            notes: Vec::new(),
            help: None,
            suggestion: None,
        }
    }

    pub fn error(code: &str, message: String, span: Span) -> Self {
        Self::new(ErrorLevel::Error, code, message, span)
    }

    pub fn warning(code: &str, message: String, span: Span) -> Self {
        Self::new(ErrorLevel::Warning, code, message, span)
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }

    pub fn with_help(mut self, help: String) -> Self {
        self.help = Some(help);
        self
    }

    pub fn with_suggestion(mut self, message: String, replacement: String, span: Span) -> Self {
        self.suggestion = Some(Suggestion {
            message,
            replacement,
            span,
        });
        self
    }

    /// Format diagnostic in Rust-style
    pub fn format(&self, source: &str) -> String {
        let mut output = self.header();

        // Template snippet with highlight
        if let Some(snippet) = self.get_source_snippet(source) {
            output.push_str(&snippet);
        }

        output.push_str(&self.footer());

        if let Some(suggestion) = &self.suggestion {
            output.push_str(&format!(
                " {} {}\n",
                "help:".green().bold(),
                suggestion.message
            ));
            if let Some(suggested_snippet) = self.get_suggestion_snippet(source) {
                output.push_str(&suggested_snippet);
            }
        }

        output
    }

    // error[F0001]: message
    //  --> template:1:7
    fn header(&self) -> String {
        let mut output = String::new();

        if self.code.is_empty() {
            output.push_str(&format!("{}: {}\n", self.level, self.message.bold()));
        } else {
            output.push_str(&format!(
                "{}[{}]: {}\n",
                self.level,
                self.code,
                self.message.bold()
            ));
        }

        if self.span.line > 0 {
            output.push_str(&format!(" {} {}\n", "-->".cyan().bold(), self.span));
        }

        output
    }

    fn footer(&self) -> String {
        let mut output = String::new();

        for note in &self.notes {
            output.push_str(&format!(" {} {}\n", "=".cyan().bold(), note.cyan()));
        }

        if let Some(help) = &self.help {
            output.push_str(&format!(" {} {}\n", "help:".green().bold(), help));
        }

        output
    }

    /// Extract template line with error highlight
    fn get_source_snippet(&self, source: &str) -> Option<String> {
        let line = source.split('\n').nth(self.span.line.checked_sub(1)?)?;
        let line_num_width = self.span.line.to_string().len().max(2);
        let gutter = " ".repeat(line_num_width + 1);

        let mut snippet = String::new();
        snippet.push_str(&format!(" {}\n", gutter.cyan()));
        snippet.push_str(&format!(
            " {} {} {}\n",
            format!("{:>width$}", self.span.line, width = line_num_width)
                .cyan()
                .bold(),
            "|".cyan().bold(),
            line.escape_debug()
        ));

        // Columns are byte based; escaped characters shift the caret, which
        // only matters for tabs and control bytes before the marker.
        let padding = " ".repeat(self.span.column.saturating_sub(1));
        let underline = "^".repeat(self.span.length.max(1));
        snippet.push_str(&format!(
            " {} {} {}{}\n",
            gutter.cyan(),
            "|".cyan().bold(),
            padding,
            underline.red().bold()
        ));

        Some(snippet)
    }

    /// Get suggestion snippet with replacement
    fn get_suggestion_snippet(&self, source: &str) -> Option<String> {
        let suggestion = self.suggestion.as_ref()?;
        let line = source
            .split('\n')
            .nth(suggestion.span.line.checked_sub(1)?)?;

        let col = suggestion.span.column.checked_sub(1)?;
        let before = line.get(..col)?;
        let after = line.get(col + suggestion.span.length..)?;
        let modified_line = format!("{}{}{}", before, suggestion.replacement, after);

        let line_num_width = suggestion.span.line.to_string().len().max(2);
        let gutter = " ".repeat(line_num_width + 1);

        let mut snippet = String::new();
        snippet.push_str(&format!(
            " {} {} {}\n",
            format!("{:>width$}", suggestion.span.line, width = line_num_width)
                .cyan()
                .bold(),
            "|".cyan().bold(),
            modified_line.escape_debug()
        ));

        // Indicator for added text
        let padding = " ".repeat(col);
        let indicator = "+".repeat(suggestion.replacement.len());
        snippet.push_str(&format!(
            " {} {} {}{}\n",
            gutter.cyan(),
            "|".cyan().bold(),
            padding,
            indicator.green().bold()
        ));

        Some(snippet)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.header(), self.footer())
    }
}

/// Diagnostic collection and reporting engine
#[derive(Debug, Default)]
pub struct DiagnosticEngine {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    diagnostics: &'a [Diagnostic],
    errors: usize,
    warnings: usize,
}

impl DiagnosticEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        match diagnostic.level {
            ErrorLevel::Error => self.error_count += 1,
            ErrorLevel::Warning => self.warning_count += 1,
            _ => {}
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Print all diagnostics to stderr
    pub fn print_all(&self, source: &str) {
        for diag in &self.diagnostics {
            eprintln!("{}", diag.format(source));
        }
    }

    /// Print summary statistics
    pub fn print_summary(&self) {
        if self.error_count > 0 {
            eprintln!(
                "{}: {} error{} emitted",
                "error".red().bold(),
                self.error_count,
                if self.error_count == 1 { "" } else { "s" }
            );
        }

        if self.warning_count > 0 {
            eprintln!(
                "{}: {} warning{} emitted",
                "warning".yellow().bold(),
                self.warning_count,
                if self.warning_count == 1 { "" } else { "s" }
            );
        }
    }

    /// Export diagnostics as JSON for editors and scripts
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&JsonReport {
            diagnostics: &self.diagnostics,
            errors: self.error_count,
            warnings: self.warning_count,
        })
    }
}

/// Error codes for template problems
pub mod error_codes {
    // Template syntax (F0001-F0099)
    pub const UNCLOSED_PLACEHOLDER: &str = "F0001";
    pub const UNMATCHED_CLOSE: &str = "F0002";

    // Arity (F0100-F0199)
    pub const MISSING_ARGUMENT: &str = "F0101";
    pub const SURPLUS_ARGUMENTS: &str = "F0102";

    // Output (F0200-F0299)
    pub const SINK_UNAVAILABLE: &str = "F0201";
}
