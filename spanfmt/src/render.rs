// Renderer dispatch
// Each argument type picks its renderer through the `Render` trait at compile
// time; a type without an impl is rejected by the compiler.

use crate::encode::IntBuffer;
use crate::sink::Sink;
use std::ffi::{CStr, CString};

/// State for one placeholder substitution
pub struct Context<'a> {
    sink: &'a mut dyn Sink,
    debug: bool,
}

impl<'a> Context<'a> {
    pub fn new(sink: &'a mut dyn Sink, debug: bool) -> Self {
        Self { sink, debug }
    }

    /// True for `{:?}` placeholders
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if !bytes.is_empty() {
            self.sink.write_bytes(bytes);
        }
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    /// Render a nested value with the same options
    pub fn render<T: Render + ?Sized>(&mut self, value: &T) {
        value.render(self);
    }
}

/// Produces the text form of a value
///
/// Implement this for your own types to pass them as arguments:
///
/// ```
/// use spanfmt::{Context, Render};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Render for Point {
///     fn render(&self, cx: &mut Context<'_>) {
///         cx.write_str("(");
///         cx.render(&self.x);
///         cx.write_str(", ");
///         cx.render(&self.y);
///         cx.write_str(")");
///     }
/// }
///
/// let text = spanfmt::format!("at {}", Point { x: 3, y: -4 }).unwrap();
/// assert_eq!(text, "at (3, -4)");
/// ```
///
/// The method returns nothing on purpose: output goes through the context and
/// there is no byte count to report.
///
/// One argument may reach the sink as several writes. Integers and plain text
/// are a single write, while `{:?}` text is written piece by piece (quote,
/// unescaped run, escape, quote) so the built-in renderers never allocate.
/// A write never mixes argument output with template text.
pub trait Render {
    fn render(&self, cx: &mut Context<'_>);
}

macro_rules! impl_render_integer {
    ($($t:ty),*) => {$(
        impl Render for $t {
            #[inline]
            fn render(&self, cx: &mut Context<'_>) {
                let mut buf = IntBuffer::new();
                cx.write_bytes(buf.format(*self));
            }
        }
    )*};
}

impl_render_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

const HEX: &[u8; 16] = b"0123456789abcdef";

// Writes `bytes` with backslash escapes, in as few spans as possible. Bytes
// >= 0x80 pass through unless `escape_high` is set (text that is not UTF-8).
fn write_escaped(cx: &mut Context<'_>, bytes: &[u8], quote: u8, escape_high: bool) {
    let mut start = 0;

    for (i, &b) in bytes.iter().enumerate() {
        let mut buf = [b'\\', 0, 0, 0];
        let escape: &[u8] = match b {
            b'\\' => b"\\\\",
            b'\n' => b"\\n",
            b'\r' => b"\\r",
            b'\t' => b"\\t",
            b'\0' => b"\\0",
            _ if b == quote => {
                buf[1] = quote;
                &buf[..2]
            }
            0x01..=0x1f | 0x7f => {
                buf[1] = b'x';
                buf[2] = HEX[(b >> 4) as usize];
                buf[3] = HEX[(b & 0xf) as usize];
                &buf[..]
            }
            0x80..=0xff if escape_high => {
                buf[1] = b'x';
                buf[2] = HEX[(b >> 4) as usize];
                buf[3] = HEX[(b & 0xf) as usize];
                &buf[..]
            }
            _ => continue,
        };

        cx.write_bytes(&bytes[start..i]);
        cx.write_bytes(escape);
        start = i + 1;
    }

    cx.write_bytes(&bytes[start..]);
}

fn write_quoted(cx: &mut Context<'_>, bytes: &[u8], quote: u8, escape_high: bool) {
    cx.write_bytes(&[quote]);
    write_escaped(cx, bytes, quote, escape_high);
    cx.write_bytes(&[quote]);
}

impl Render for str {
    fn render(&self, cx: &mut Context<'_>) {
        if cx.is_debug() {
            write_quoted(cx, self.as_bytes(), b'"', false);
        } else {
            cx.write_str(self);
        }
    }
}

impl Render for String {
    fn render(&self, cx: &mut Context<'_>) {
        self.as_str().render(cx);
    }
}

// Nul-terminated text: everything before the terminator
impl Render for CStr {
    fn render(&self, cx: &mut Context<'_>) {
        let bytes = self.to_bytes();
        if cx.is_debug() {
            write_quoted(cx, bytes, b'"', self.to_str().is_err());
        } else {
            cx.write_bytes(bytes);
        }
    }
}

impl Render for CString {
    fn render(&self, cx: &mut Context<'_>) {
        self.as_c_str().render(cx);
    }
}

impl Render for char {
    fn render(&self, cx: &mut Context<'_>) {
        let mut buf = [0u8; 4];
        let encoded = self.encode_utf8(&mut buf);
        if cx.is_debug() {
            write_quoted(cx, encoded.as_bytes(), b'\'', false);
        } else {
            cx.write_str(encoded);
        }
    }
}

impl Render for bool {
    fn render(&self, cx: &mut Context<'_>) {
        cx.write_str(if *self { "true" } else { "false" });
    }
}

impl<T: Render + ?Sized> Render for &T {
    #[inline]
    fn render(&self, cx: &mut Context<'_>) {
        (**self).render(cx);
    }
}

impl<T: Render + ?Sized> Render for &mut T {
    #[inline]
    fn render(&self, cx: &mut Context<'_>) {
        (**self).render(cx);
    }
}

impl<T: Render + ?Sized> Render for Box<T> {
    #[inline]
    fn render(&self, cx: &mut Context<'_>) {
        (**self).render(cx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::Recorder;

    fn render_with<T: Render + ?Sized>(value: &T, debug: bool) -> Recorder {
        let mut rec = Recorder::new();
        let mut cx = Context::new(&mut rec, debug);
        value.render(&mut cx);
        rec
    }

    fn text<T: Render + ?Sized>(value: &T) -> String {
        render_with(value, false).text()
    }

    fn debug<T: Render + ?Sized>(value: &T) -> String {
        render_with(value, true).text()
    }

    #[test]
    fn test_integers() {
        assert_eq!(text(&2021), "2021");
        assert_eq!(text(&-1999i64), "-1999");
        assert_eq!(text(&0usize), "0");
        assert_eq!(debug(&-7i8), "-7");
    }

    #[test]
    fn test_integer_is_one_write() {
        let rec = render_with(&u64::MAX, false);
        assert_eq!(rec.writes().len(), 1);
    }

    #[test]
    fn test_strings() {
        assert_eq!(text("world"), "world");
        assert_eq!(text(&String::from("nyan")), "nyan");
        assert_eq!(text(&"borrowed"), "borrowed");
    }

    #[test]
    fn test_empty_string_writes_nothing() {
        assert!(render_with("", false).writes().is_empty());
    }

    #[test]
    fn test_debug_strings() {
        assert_eq!(debug("world"), "\"world\"");
        assert_eq!(debug("a\"b\\c\nd"), "\"a\\\"b\\\\c\\nd\"");
        assert_eq!(debug("tab\there"), "\"tab\\there\"");
        assert_eq!(debug("bell\x07"), "\"bell\\x07\"");
        assert_eq!(debug("ñ"), "\"ñ\"");
        assert_eq!(debug("it's"), "\"it's\"");
    }

    #[test]
    fn test_debug_string_writes_in_pieces() {
        let rec = render_with("a\nb", true);
        assert_eq!(
            rec.writes(),
            &[
                b"\"".to_vec(),
                b"a".to_vec(),
                b"\\n".to_vec(),
                b"b".to_vec(),
                b"\"".to_vec()
            ]
        );
        assert_eq!(render_with("plain", false).writes().len(), 1);
    }

    #[test]
    fn test_c_strings() {
        let owned = CString::new("nyan~ ").unwrap();
        assert_eq!(text(&owned), "nyan~ ");
        assert_eq!(text(owned.as_c_str()), "nyan~ ");

        let raw = CStr::from_bytes_with_nul(b"caf\xe9\0").unwrap();
        assert_eq!(render_with(raw, false).concat(), b"caf\xe9");
        assert_eq!(debug(raw), "\"caf\\xe9\"");
    }

    #[test]
    fn test_chars_and_bools() {
        assert_eq!(text(&'x'), "x");
        assert_eq!(text(&'✓'), "✓");
        assert_eq!(debug(&'\''), "'\\''");
        assert_eq!(debug(&'"'), "'\"'");
        assert_eq!(text(&true), "true");
        assert_eq!(text(&false), "false");
    }

    #[test]
    fn test_smart_pointers() {
        let boxed: Box<str> = "boxed".into();
        assert_eq!(text(&boxed), "boxed");

        let mut n = 5u32;
        let r = &mut n;
        assert_eq!(text(&r), "5");
    }
}
