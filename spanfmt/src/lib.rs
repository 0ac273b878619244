// spanfmt - Template formatting engine
// Interleaves literal template spans with rendered arguments, written straight
// to a caller-supplied sink.
//
// encode:  decimal integer encoder (stack only)
// render:  `Render` trait and built-in renderers
// scan:    single-pass template scanner
// print:   call orchestration, fail-fast entry points
// check:   template validation without rendering

pub mod check;
pub mod encode;
pub mod error;
pub mod options;
pub mod print;
pub mod render;
pub mod scan;
pub mod sink;

pub use check::{check, TemplateReport};
pub use encode::{encode, IntBuffer};
pub use error::FormatError;
pub use options::{Dialect, Options, SurplusPolicy};
pub use print::{
    fail, format, format_with, print, try_write_to, write_to, write_to_with, Arguments,
};
pub use render::{Context, Render};
pub use scan::{scan, Scanner};
pub use sink::{IoSink, Recorder, Sink};

/// Print to stdout; a malformed template or missing argument panics
///
/// `spanfmt::print!("hello {} nyan\n", "world");`
#[macro_export]
macro_rules! print {
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::print($template, ($(&$arg,)*))
    };
}

/// Print into a sink; a malformed template or missing argument panics
#[macro_export]
macro_rules! print_to {
    ($sink:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::write_to($sink, $template, ($(&$arg,)*))
    };
}

/// Print into a sink, returning `Result<(), FormatError>`
#[macro_export]
macro_rules! try_print_to {
    ($sink:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::try_write_to($sink, $template, ($(&$arg,)*), $crate::Options::default())
    };
}

/// Format into a `String`, returning `Result<String, FormatError>`
#[macro_export]
macro_rules! format {
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::format($template, ($(&$arg,)*))
    };
}
