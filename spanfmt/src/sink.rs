// Output sinks
// A sink accepts contiguous byte spans; write failures never reach the engine.

use crate::error::FormatError;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Destination for rendered output
pub trait Sink {
    /// Write one contiguous span. There is no status: a sink that can fail
    /// must deal with the failure itself.
    fn write_bytes(&mut self, bytes: &[u8]);
}

impl Sink for Vec<u8> {
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write_bytes(&mut self, bytes: &[u8]) {
        (**self).write_bytes(bytes);
    }
}

/// Fire-and-forget sink over any `io::Write`
///
/// The first failed write is logged; later failures are dropped silently.
pub struct IoSink<W: Write> {
    inner: W,
    failed: bool,
}

impl<W: Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            failed: false,
        }
    }

    /// Whether any write has failed so far
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    pub fn flush(&mut self) {
        if let Err(e) = self.inner.flush() {
            self.note_failure(&e);
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    fn note_failure(&mut self, err: &io::Error) {
        if !self.failed {
            log::warn!("output write failed, further failures are ignored: {}", err);
            self.failed = true;
        }
    }
}

impl IoSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl IoSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl IoSink<File> {
    /// Create (or truncate) a file and use it as the destination
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, FormatError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| FormatError::SinkUnavailable {
            destination: path.display().to_string(),
            source,
        })?;
        log::debug!("opened output file {}", path.display());
        Ok(Self::new(file))
    }
}

impl<W: Write> Sink for IoSink<W> {
    fn write_bytes(&mut self, bytes: &[u8]) {
        if let Err(e) = self.inner.write_all(bytes) {
            self.note_failure(&e);
        }
    }
}

/// Keeps every write as its own span
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Recorder {
    writes: Vec<Vec<u8>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spans in the order they were written
    pub fn writes(&self) -> &[Vec<u8>] {
        &self.writes
    }

    /// All spans joined together
    pub fn concat(&self) -> Vec<u8> {
        self.writes.concat()
    }

    /// Joined output as text, invalid UTF-8 replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.concat()).into_owned()
    }
}

impl Sink for Recorder {
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.writes.push(bytes.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_vec_sink() {
        let mut out = Vec::new();
        out.write_bytes(b"abc");
        out.write_bytes(b"def");
        assert_eq!(out, b"abcdef");
    }

    #[test]
    fn test_io_sink_swallows_errors() {
        let mut sink = IoSink::new(Broken);
        assert!(!sink.has_failed());

        sink.write_bytes(b"lost");
        sink.write_bytes(b"also lost");
        assert!(sink.has_failed());
    }

    #[test]
    fn test_io_sink_over_cursor() {
        let mut sink = IoSink::new(io::Cursor::new(Vec::new()));
        sink.write_bytes(b"it's ");
        sink.write_bytes(b"2021");
        sink.flush();
        assert_eq!(sink.into_inner().into_inner(), b"it's 2021");
    }

    #[test]
    fn test_recorder_keeps_boundaries() {
        let mut rec = Recorder::new();
        rec.write_bytes(b"a");
        rec.write_bytes(b"bc");
        assert_eq!(rec.writes(), &[b"a".to_vec(), b"bc".to_vec()]);
        assert_eq!(rec.text(), "abc");
    }

    #[test]
    fn test_missing_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = IoSink::create(dir.path().join("missing").join("out.txt"))
            .err()
            .unwrap();
        assert!(matches!(err, FormatError::SinkUnavailable { .. }));
    }
}
