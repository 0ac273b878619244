// Formatting errors and their diagnostic form

use spanfmt_diagnostics::{error_codes, Diagnostic, Span};
use spanfmt_lexer::LexError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("placeholder at byte {offset} is never closed")]
    UnclosedPlaceholder { offset: usize },

    #[error("unmatched `}}` at byte {offset}")]
    UnmatchedClose { offset: usize },

    #[error("placeholder {index} at byte {offset} has no argument")]
    MissingArgument { index: usize, offset: usize },

    #[error("{supplied} arguments supplied but the template has {placeholders} placeholders")]
    SurplusArguments { placeholders: usize, supplied: usize },

    #[error("cannot open output `{destination}`: {source}")]
    SinkUnavailable {
        destination: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<LexError> for FormatError {
    fn from(err: LexError) -> Self {
        match err {
            LexError::UnclosedPlaceholder { span } => FormatError::UnclosedPlaceholder {
                offset: span.start,
            },
            LexError::UnmatchedClose { span } => FormatError::UnmatchedClose { offset: span.start },
        }
    }
}

impl FormatError {
    /// Byte offset in the template the error points at, if any
    pub fn offset(&self) -> Option<usize> {
        match self {
            FormatError::UnclosedPlaceholder { offset }
            | FormatError::UnmatchedClose { offset }
            | FormatError::MissingArgument { offset, .. } => Some(*offset),
            FormatError::SurplusArguments { .. } | FormatError::SinkUnavailable { .. } => None,
        }
    }

    pub fn to_diagnostic(&self, file: &str, template: &str) -> Diagnostic {
        let span = match self.offset() {
            Some(offset) => Span::from_file_and_span(file, template, offset..offset + 1),
            None => Span::unknown(),
        };

        match self {
            FormatError::UnclosedPlaceholder { .. } => Diagnostic::error(
                error_codes::UNCLOSED_PLACEHOLDER,
                "placeholder is never closed".to_string(),
                span.clone(),
            )
            .with_note("a placeholder is written `{}` or `{:?}`".to_string())
            .with_suggestion(
                "to print a literal brace, double it".to_string(),
                "{{".to_string(),
                span,
            ),
            FormatError::UnmatchedClose { .. } => Diagnostic::error(
                error_codes::UNMATCHED_CLOSE,
                "unmatched `}` in template".to_string(),
                span.clone(),
            )
            .with_suggestion(
                "to print a literal brace, double it".to_string(),
                "}}".to_string(),
                span,
            ),
            FormatError::MissingArgument { index, .. } => Diagnostic::error(
                error_codes::MISSING_ARGUMENT,
                format!("placeholder {} has no matching argument", index),
                span,
            )
            .with_note(format!(
                "only {} argument{} supplied",
                index,
                if *index == 1 { " was" } else { "s were" }
            )),
            FormatError::SurplusArguments {
                placeholders,
                supplied,
            } => {
                let unused = supplied.saturating_sub(*placeholders);
                Diagnostic::error(
                    error_codes::SURPLUS_ARGUMENTS,
                    format!(
                        "{} argument{} never used",
                        unused,
                        if unused == 1 { " is" } else { "s are" }
                    ),
                    Span::new(file.to_string(), 0, 0, 0),
                )
                .with_note(format!(
                    "the template has {} placeholder{}",
                    placeholders,
                    if *placeholders == 1 { "" } else { "s" }
                ))
            }
            FormatError::SinkUnavailable {
                destination,
                source,
            } => Diagnostic::error(
                error_codes::SINK_UNAVAILABLE,
                format!("cannot open output `{}`", destination),
                span,
            )
            .with_note(source.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lex_error() {
        let err: FormatError = LexError::UnmatchedClose { span: 4..5 }.into();
        assert!(matches!(err, FormatError::UnmatchedClose { offset: 4 }));
        assert_eq!(err.offset(), Some(4));
    }

    #[test]
    fn test_messages() {
        let err = FormatError::MissingArgument {
            index: 2,
            offset: 9,
        };
        assert_eq!(err.to_string(), "placeholder 2 at byte 9 has no argument");

        let err = FormatError::UnmatchedClose { offset: 0 };
        assert_eq!(err.to_string(), "unmatched `}` at byte 0");
    }

    #[test]
    fn test_diagnostic_points_at_marker() {
        let template = "line one\nvalue: {x}";
        let err = FormatError::UnclosedPlaceholder { offset: 16 };
        let diag = err.to_diagnostic("template", template);

        assert_eq!(diag.code, error_codes::UNCLOSED_PLACEHOLDER);
        assert_eq!(diag.span.line, 2);
        assert_eq!(diag.span.column, 8);
        assert!(diag.suggestion.is_some());
    }

    #[test]
    fn test_surplus_diagnostic() {
        let err = FormatError::SurplusArguments {
            placeholders: 1,
            supplied: 3,
        };
        let diag = err.to_diagnostic("t", "{}");
        assert_eq!(diag.message, "2 arguments are never used");
        assert_eq!(diag.notes, vec!["the template has 1 placeholder".to_string()]);
    }
}
