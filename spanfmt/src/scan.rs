// Template scanner
// Walks the template once, flushing literal spans and binding one argument per
// placeholder in call order.

use crate::error::FormatError;
use crate::options::{Options, SurplusPolicy};
use crate::render::{Context, Render};
use crate::sink::Sink;
use spanfmt_lexer::{Lexer, Piece};

// A placeholder the scanner has just stepped over
struct Placeholder {
    start: usize,
    debug: bool,
}

/// Scan state for one formatting call
///
/// Feed arguments in order with [`Scanner::feed`], then call
/// [`Scanner::finish`] to flush the rest of the template.
pub struct Scanner<'t, 's> {
    lexer: Lexer<'t>,
    sink: &'s mut dyn Sink,
    options: Options,
    // Pending literal span is template[last_flush..offset]
    last_flush: usize,
    offset: usize,
    bound: usize,
    surplus: usize,
}

impl<'t, 's> Scanner<'t, 's> {
    pub fn new(template: &'t str, sink: &'s mut dyn Sink, options: Options) -> Self {
        Self {
            lexer: Lexer::with_dialect(template, options.dialect),
            sink,
            options,
            last_flush: 0,
            offset: 0,
            bound: 0,
            surplus: 0,
        }
    }

    /// Bytes of the template consumed so far
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Arguments rendered into a placeholder so far
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Bind `arg` to the next placeholder and render it into the sink
    pub fn feed<T: Render + ?Sized>(&mut self, arg: &T) -> Result<(), FormatError> {
        match self.next_placeholder()? {
            Some(placeholder) => {
                let mut cx = Context::new(&mut *self.sink, placeholder.debug);
                arg.render(&mut cx);
                self.bound += 1;
            }
            None => self.surplus += 1,
        }
        Ok(())
    }

    /// Flush the trailing literal span and check arity
    pub fn finish(mut self) -> Result<(), FormatError> {
        // Any placeholder left has no argument
        if let Some(placeholder) = self.next_placeholder()? {
            return Err(FormatError::MissingArgument {
                index: self.bound,
                offset: placeholder.start,
            });
        }
        self.flush();

        if self.surplus > 0 {
            match self.options.surplus {
                SurplusPolicy::Ignore => {
                    log::debug!(
                        "{} surplus argument(s) ignored for template {:?}",
                        self.surplus,
                        self.lexer.source()
                    );
                }
                SurplusPolicy::Reject => {
                    return Err(FormatError::SurplusArguments {
                        placeholders: self.bound,
                        supplied: self.bound + self.surplus,
                    });
                }
            }
        }

        Ok(())
    }

    // Advances past the next placeholder, flushing the literal text before it.
    // None at the end of the template; pending literal text is left for
    // `finish`.
    fn next_placeholder(&mut self) -> Result<Option<Placeholder>, FormatError> {
        while let Some(item) = self.lexer.next() {
            // On a malformed marker the pending span is dropped, not flushed
            let piece = item?;
            let span = piece.span;

            match piece.piece {
                Piece::Literal => self.offset = span.end,
                Piece::Escaped => {
                    // Keep the first marker byte, skip the second. The text up
                    // to the escape is flushed here, so a later malformed
                    // marker only drops what follows the last escape.
                    self.offset = span.start + 1;
                    self.flush();
                    self.skip_to(span.end);
                }
                Piece::Placeholder { debug } => {
                    self.offset = span.start;
                    self.flush();
                    self.skip_to(span.end);
                    log::trace!(
                        "{:?} placeholder {} at {:?}",
                        self.lexer.dialect(),
                        self.bound,
                        span
                    );
                    return Ok(Some(Placeholder {
                        start: span.start,
                        debug,
                    }));
                }
            }
        }
        Ok(None)
    }

    fn flush(&mut self) {
        if self.last_flush < self.offset {
            let source = self.lexer.source();
            self.sink
                .write_bytes(&source.as_bytes()[self.last_flush..self.offset]);
        }
        self.last_flush = self.offset;
    }

    fn skip_to(&mut self, end: usize) {
        self.offset = end;
        self.last_flush = end;
    }
}

/// Scan `template` against a runtime-sized list of arguments
pub fn scan<T: Render>(
    template: &str,
    sink: &mut dyn Sink,
    arguments: &[T],
    options: Options,
) -> Result<(), FormatError> {
    let mut scanner = Scanner::new(template, sink, options);
    for arg in arguments {
        scanner.feed(arg)?;
    }
    scanner.finish()
}
