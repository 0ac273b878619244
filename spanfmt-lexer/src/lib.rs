// spanfmt-lexer - Template tokenizer
// Splits a template into literal runs, escapes and placeholders in one pass

use logos::Logos;
use std::ops::Range;

/// Which marker byte introduces a placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// `{}` and `{:?}`, literal braces written as `{{` and `}}`
    #[default]
    Brace,
    /// `%`, literal percent written as `%%`
    Percent,
}

impl Dialect {
    /// The byte that opens a placeholder in this dialect
    pub fn marker(self) -> u8 {
        match self {
            Dialect::Brace => b'{',
            Dialect::Percent => b'%',
        }
    }

    /// Text of the escape sequence for a literal marker
    pub fn escaped_marker(self) -> &'static str {
        match self {
            Dialect::Brace => "{{",
            Dialect::Percent => "%%",
        }
    }
}

/// Tokens of the brace dialect
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum BraceToken {
    #[token("{{")]
    EscapedOpen,
    #[token("}}")]
    EscapedClose,
    #[token("{}")]
    Placeholder,
    #[token("{:?}")]
    DebugPlaceholder,

    // Anything that is not a brace, UTF-8 included
    #[regex(r"[^{}]+")]
    Literal,
}

/// Tokens of the percent dialect
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum PercentToken {
    #[token("%%")]
    Escaped,
    #[token("%")]
    Placeholder,
    #[regex(r"[^%]+")]
    Literal,
}

/// Dialect-independent view of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece {
    /// Bytes copied verbatim
    Literal,
    /// Doubled marker; only its first byte is output
    Escaped,
    /// Binds exactly one argument
    Placeholder { debug: bool },
}

impl From<BraceToken> for Piece {
    fn from(token: BraceToken) -> Self {
        match token {
            BraceToken::EscapedOpen | BraceToken::EscapedClose => Piece::Escaped,
            BraceToken::Placeholder => Piece::Placeholder { debug: false },
            BraceToken::DebugPlaceholder => Piece::Placeholder { debug: true },
            BraceToken::Literal => Piece::Literal,
        }
    }
}

impl From<PercentToken> for Piece {
    fn from(token: PercentToken) -> Self {
        match token {
            PercentToken::Escaped => Piece::Escaped,
            PercentToken::Placeholder => Piece::Placeholder { debug: false },
            PercentToken::Literal => Piece::Literal,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieceSpan {
    pub piece: Piece,
    pub span: Range<usize>,
}

enum Inner<'source> {
    Brace(logos::Lexer<'source, BraceToken>),
    Percent(logos::Lexer<'source, PercentToken>),
}

pub struct Lexer<'source> {
    source: &'source str,
    dialect: Dialect,
    inner: Inner<'source>,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Self::with_dialect(source, Dialect::Brace)
    }

    pub fn with_dialect(source: &'source str, dialect: Dialect) -> Self {
        let inner = match dialect {
            Dialect::Brace => Inner::Brace(BraceToken::lexer(source)),
            Dialect::Percent => Inner::Percent(PercentToken::lexer(source)),
        };

        Self {
            source,
            dialect,
            inner,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn source(&self) -> &'source str {
        self.source
    }

    // An error always starts on the offending marker byte, since literal
    // runs never contain one.
    fn classify(&self, span: Range<usize>) -> LexError {
        let start = span.start;
        let span = start..start + 1;

        match self.source.as_bytes().get(start) {
            Some(b'}') => LexError::UnmatchedClose { span },
            _ => LexError::UnclosedPlaceholder { span },
        }
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Result<PieceSpan, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (token, span) = match &mut self.inner {
            Inner::Brace(lex) => {
                let token = lex.next()?;
                (token.map(Piece::from), lex.span())
            }
            Inner::Percent(lex) => {
                let token = lex.next()?;
                (token.map(Piece::from), lex.span())
            }
        };

        match token {
            Ok(piece) => Some(Ok(PieceSpan { piece, span })),
            Err(_) => Some(Err(self.classify(span))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("placeholder opened at {span:?} is never closed")]
    UnclosedPlaceholder { span: Range<usize> },
    #[error("unmatched `}}` at {span:?}")]
    UnmatchedClose { span: Range<usize> },
}

impl LexError {
    pub fn span(&self) -> Range<usize> {
        match self {
            LexError::UnclosedPlaceholder { span } | LexError::UnmatchedClose { span } => {
                span.clone()
            }
        }
    }

    /// Byte offset of the offending marker
    pub fn offset(&self) -> usize {
        self.span().start
    }
}

/// Count placeholders, stopping at the first malformed marker
pub fn count_placeholders(source: &str, dialect: Dialect) -> Result<usize, LexError> {
    let mut count = 0;
    for item in Lexer::with_dialect(source, dialect) {
        if let Piece::Placeholder { .. } = item?.piece {
            count += 1;
        }
    }
    Ok(count)
}
