//! Output destinations shared between a logger and its handlers

use super::error::Result;
use parking_lot::Mutex;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

/// A shared, writable log destination
///
/// Cloning an `Output` yields another handle to the same writer. Handlers
/// write one whole record per call while holding the lock, so records from
/// concurrent callers never interleave. The logger never closes an output;
/// the underlying writer lives as long as the last handle.
#[derive(Clone)]
pub struct Output {
    writer: Arc<Mutex<dyn Write + Send>>,
    name: &'static str,
}

impl Output {
    /// Wrap any writer
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
            name: "writer",
        }
    }

    /// Share a writer the caller keeps a handle to
    pub fn from_shared<W: Write + Send + 'static>(writer: Arc<Mutex<W>>) -> Self {
        Self {
            writer,
            name: "shared",
        }
    }

    pub fn stdout() -> Self {
        Self {
            writer: Arc::new(Mutex::new(io::stdout())),
            name: "stdout",
        }
    }

    pub fn stderr() -> Self {
        Self {
            writer: Arc::new(Mutex::new(io::stderr())),
            name: "stderr",
        }
    }

    /// Open `path` for appending, creating it if needed
    pub fn file(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Arc::new(Mutex::new(file)),
            name: "file",
        })
    }

    /// Write `bytes` as one unit and flush
    pub fn write_all(&self, bytes: &[u8]) -> Result<()> {
        let mut writer = self.writer.lock();
        writer.write_all(bytes)?;
        writer.flush()?;
        Ok(())
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// Whether both handles point at the same writer
    pub fn ptr_eq(&self, other: &Output) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.writer), Arc::as_ptr(&other.writer))
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output").field("name", &self.name).finish()
    }
}

/// In-memory sink, mostly useful for capturing output in tests
///
/// # Example
///
/// ```
/// use slogr::{Context, Logger, MemoryBuffer, Output};
///
/// let buffer = MemoryBuffer::new();
/// let logger = Logger::new(Output::new(buffer.clone()), None);
/// logger.info(&Context::background(), "captured", &[]);
///
/// assert!(buffer.contents().contains("msg=captured"));
/// ```
#[derive(Clone, Default)]
pub struct MemoryBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl MemoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    pub fn len(&self) -> usize {
        self.bytes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }

    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl Write for MemoryBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Debug for MemoryBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBuffer").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_buffer_shared_between_clones() {
        let buffer = MemoryBuffer::new();
        let output = Output::new(buffer.clone());

        output.write_all(b"one\n").unwrap();
        output.write_all(b"two\n").unwrap();

        assert_eq!(buffer.lines(), ["one", "two"]);
        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_from_shared_keeps_caller_handle() {
        let shared = Arc::new(Mutex::new(Vec::<u8>::new()));
        let output = Output::from_shared(Arc::clone(&shared));

        output.write_all(b"hello").unwrap();
        assert_eq!(shared.lock().as_slice(), b"hello");
    }

    #[test]
    fn test_ptr_eq() {
        let a = Output::new(MemoryBuffer::new());
        let b = a.clone();
        let c = Output::new(MemoryBuffer::new());

        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
    }

    #[test]
    fn test_write_error_is_reported() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let output = Output::new(Broken);
        assert!(output.write_all(b"x").is_err());
    }
}
