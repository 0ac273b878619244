// Print orchestration
// Owns the sink for one call, drives the scanner over every argument in order
// and flushes the trailing literal text.

use crate::error::FormatError;
use crate::options::Options;
use crate::render::Render;
use crate::scan::Scanner;
use crate::sink::{IoSink, Sink};

/// A fixed list of arguments, fed to the scanner in call order
///
/// Implemented for `()` and tuples of up to twelve [`Render`] values, so each
/// element keeps its static type and its renderer is chosen at compile time.
pub trait Arguments {
    /// Number of arguments in the list
    const COUNT: usize;

    fn feed_all(&self, scanner: &mut Scanner<'_, '_>) -> Result<(), FormatError>;
}

impl Arguments for () {
    const COUNT: usize = 0;

    fn feed_all(&self, _scanner: &mut Scanner<'_, '_>) -> Result<(), FormatError> {
        Ok(())
    }
}

macro_rules! tuple_arguments {
    ($count:expr => $($name:ident . $idx:tt),+) => {
        impl<$($name: Render),+> Arguments for ($($name,)+) {
            const COUNT: usize = $count;

            fn feed_all(&self, scanner: &mut Scanner<'_, '_>) -> Result<(), FormatError> {
                $(scanner.feed(&self.$idx)?;)+
                Ok(())
            }
        }
    };
}

tuple_arguments!(1 => A.0);
tuple_arguments!(2 => A.0, B.1);
tuple_arguments!(3 => A.0, B.1, C.2);
tuple_arguments!(4 => A.0, B.1, C.2, D.3);
tuple_arguments!(5 => A.0, B.1, C.2, D.3, E.4);
tuple_arguments!(6 => A.0, B.1, C.2, D.3, E.4, F.5);
tuple_arguments!(7 => A.0, B.1, C.2, D.3, E.4, F.5, G.6);
tuple_arguments!(8 => A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7);
tuple_arguments!(9 => A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8);
tuple_arguments!(10 => A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9);
tuple_arguments!(11 => A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9, K.10);
tuple_arguments!(12 => A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9, K.10, L.11);

/// Format into `sink`, returning the first error
pub fn try_write_to<A: Arguments>(
    sink: &mut dyn Sink,
    template: &str,
    args: A,
    options: Options,
) -> Result<(), FormatError> {
    log::trace!("formatting {:?} with {} argument(s)", template, A::COUNT);
    let mut scanner = Scanner::new(template, sink, options);
    args.feed_all(&mut scanner)?;
    scanner.finish()
}

/// Format into `sink`; a template or arity error terminates the calling thread
pub fn write_to<A: Arguments>(sink: &mut dyn Sink, template: &str, args: A) {
    write_to_with(sink, template, args, Options::default());
}

pub fn write_to_with<A: Arguments>(sink: &mut dyn Sink, template: &str, args: A, options: Options) {
    if let Err(err) = try_write_to(sink, template, args, options) {
        fail(&err, template);
    }
}

/// Format to standard output; errors terminate the calling thread
pub fn print<A: Arguments>(template: &str, args: A) {
    let mut out = IoSink::stdout();
    write_to(&mut out, template, args);
    out.flush();
}

/// Format into a new `String`
pub fn format<A: Arguments>(template: &str, args: A) -> Result<String, FormatError> {
    format_with(template, args, Options::default())
}

pub fn format_with<A: Arguments>(
    template: &str,
    args: A,
    options: Options,
) -> Result<String, FormatError> {
    let mut buf = Vec::with_capacity(template.len());
    try_write_to(&mut buf, template, args, options)?;
    // Only C strings can carry bytes that are not UTF-8
    Ok(match String::from_utf8(buf) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// Report `err` on stderr, never on the sink, and terminate the calling thread
#[allow(clippy::panic)]
pub fn fail(err: &FormatError, template: &str) -> ! {
    let diagnostic = err.to_diagnostic("<template>", template);
    let mut stderr = IoSink::stderr();
    stderr.write_bytes(diagnostic.format(template).as_bytes());
    stderr.write_bytes(b"\n");
    stderr.flush();
    panic!("spanfmt: {}", err);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::Recorder;

    #[test]
    fn test_counts() {
        assert_eq!(<() as Arguments>::COUNT, 0);
        assert_eq!(<(u8,) as Arguments>::COUNT, 1);
        assert_eq!(<(u8, &str, char) as Arguments>::COUNT, 3);
    }

    #[test]
    fn test_try_write_to_mixed_types() {
        let mut rec = Recorder::new();
        try_write_to(
            &mut rec,
            "{} is {} and {:?}",
            ("answer", 42u64, 'x'),
            Options::default(),
        )
        .unwrap();
        assert_eq!(rec.text(), "answer is 42 and 'x'");
    }

    #[test]
    fn test_format() {
        assert_eq!(format("it's {}\n", (2021,)).unwrap(), "it's 2021\n");
        assert_eq!(format("it's not {}\n", (-1999,)).unwrap(), "it's not -1999\n");
        assert_eq!(format("plain", ()).unwrap(), "plain");
    }

    #[test]
    fn test_format_reports_errors() {
        let err = format("{} {}", (1,)).unwrap_err();
        assert!(matches!(err, FormatError::MissingArgument { index: 1, .. }));
    }

    #[test]
    fn test_twelve_arguments() {
        let text = format(
            "{}{}{}{}{}{}{}{}{}{}{}{}",
            (0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11),
        )
        .unwrap();
        assert_eq!(text, "01234567891011");
    }

    #[test]
    #[should_panic(expected = "is never closed")]
    fn test_write_to_fails_fast() {
        let mut out = Vec::new();
        write_to(&mut out, "broken {", (1,));
    }

    #[test]
    #[should_panic(expected = "has no argument")]
    fn test_write_to_missing_argument() {
        let mut out = Vec::new();
        write_to(&mut out, "{} {}", ("only one",));
    }

    #[test]
    fn test_write_to_ignores_surplus() {
        let mut out = Vec::new();
        write_to(&mut out, "{}", (1, 2));
        assert_eq!(out, b"1");
    }
}
