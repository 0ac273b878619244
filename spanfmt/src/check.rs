// Template checker
// Validates a template without rendering anything.

use crate::error::FormatError;
use crate::options::{Options, SurplusPolicy};
use spanfmt_diagnostics::{DiagnosticEngine, ErrorLevel};
use spanfmt_lexer::{LexError, Lexer, Piece};

/// Outcome of [`check`]
#[derive(Debug)]
pub struct TemplateReport {
    /// Placeholders found, malformed markers not counted
    pub placeholders: usize,
    /// Byte offsets of the placeholders, in order
    pub offsets: Vec<usize>,
    pub diagnostics: DiagnosticEngine,
}

impl TemplateReport {
    pub fn is_ok(&self) -> bool {
        !self.diagnostics.has_errors()
    }
}

/// Lex the whole template, reporting every malformed marker, and compare the
/// placeholder count with `arguments` when it is known.
pub fn check(
    template: &str,
    file: &str,
    options: Options,
    arguments: Option<usize>,
) -> TemplateReport {
    let mut diagnostics = DiagnosticEngine::new();
    let mut offsets = Vec::new();
    // Everything up to and including this byte belongs to a broken placeholder
    let mut skip_through: Option<usize> = None;

    for item in Lexer::with_dialect(template, options.dialect) {
        let start = match &item {
            Ok(piece) => piece.span.start,
            Err(err) => err.offset(),
        };
        if skip_through.is_some_and(|end| start <= end) {
            continue;
        }
        skip_through = None;

        match item {
            Ok(piece) => {
                if let Piece::Placeholder { .. } = piece.piece {
                    offsets.push(piece.span.start);
                }
            }
            Err(err) => {
                if let LexError::UnclosedPlaceholder { .. } = err {
                    skip_through = closing_brace(template, err.offset());
                }
                let err = FormatError::from(err);
                diagnostics.emit(err.to_diagnostic(file, template));
            }
        }
    }

    let placeholders = offsets.len();

    if let Some(supplied) = arguments {
        if supplied < placeholders {
            for (index, &offset) in offsets.iter().enumerate().skip(supplied) {
                let err = FormatError::MissingArgument { index, offset };
                diagnostics.emit(err.to_diagnostic(file, template));
            }
        } else if supplied > placeholders {
            let err = FormatError::SurplusArguments {
                placeholders,
                supplied,
            };
            let mut diag = err.to_diagnostic(file, template);
            if options.surplus == SurplusPolicy::Ignore {
                diag.level = ErrorLevel::Warning;
                diag.notes.push("surplus arguments are ignored".to_string());
            }
            diagnostics.emit(diag);
        }
    }

    log::debug!(
        "checked {}: {} placeholder(s), {} error(s), {} warning(s)",
        file,
        placeholders,
        diagnostics.error_count(),
        diagnostics.warning_count()
    );

    TemplateReport {
        placeholders,
        offsets,
        diagnostics,
    }
}

// The `}` that ends a placeholder opened at `open`, unless a newline or
// another `{` comes first.
fn closing_brace(template: &str, open: usize) -> Option<usize> {
    let rest = template.as_bytes().get(open + 1..)?;
    let pos = rest
        .iter()
        .position(|&b| matches!(b, b'}' | b'{' | b'\n'))?;
    match rest.get(pos) {
        Some(b'}') => Some(open + 1 + pos),
        _ => None,
    }
}
