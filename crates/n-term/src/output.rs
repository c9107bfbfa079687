// SPDX-License-Identifier: MIT
//
// Output sinks and frame buffering.
//
// Two components work together:
//
//   Sink — any `Write` that may also know the size of the terminal behind
//   it. Tables ask the sink for a width when none is configured; plain
//   writers (files, byte vectors, pipes) answer `None` and layout falls
//   back to 80 columns.
//
//   OutputBuffer — accumulates a whole frame (cursor moves, styled lines,
//   erase sequences) in memory so it reaches the terminal in a single
//   write. A repaint that arrives in pieces is visible as flicker.

use std::fs::File;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::terminal::{self, FALLBACK_COLS, Size};

// ─── Sink ────────────────────────────────────────────────────────────────────

/// A writable destination that can optionally report a terminal size.
pub trait Sink: Write {
    /// Size of the terminal behind this sink, if it is one.
    fn terminal_size(&self) -> Option<Size> {
        None
    }

    /// Usable width in columns, falling back to 80.
    fn width(&self) -> usize {
        usize::from(self.terminal_size().map_or(FALLBACK_COLS, |s| s.cols))
    }
}

impl Sink for io::Stdout {
    fn terminal_size(&self) -> Option<Size> {
        terminal::size_of_fd(terminal::STDOUT_FD)
    }
}

impl Sink for io::Stderr {
    fn terminal_size(&self) -> Option<Size> {
        terminal::size_of_fd(terminal::STDERR_FD)
    }
}

impl Sink for File {
    #[cfg(unix)]
    fn terminal_size(&self) -> Option<Size> {
        use std::os::unix::io::AsRawFd;
        terminal::size_of_fd(self.as_raw_fd())
    }
}

impl Sink for Vec<u8> {}

impl Sink for io::Sink {}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn terminal_size(&self) -> Option<Size> {
        (**self).terminal_size()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn terminal_size(&self) -> Option<Size> {
        (**self).terminal_size()
    }
}

// ─── MemorySink ──────────────────────────────────────────────────────────────

/// A cloneable in-memory sink with an optional fake terminal size.
///
/// Clones share the same buffer, so one clone can be handed to a
/// background renderer while another inspects what was written.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buf: Arc<Mutex<Vec<u8>>>,
    size: Option<Size>,
}

impl MemorySink {
    /// An empty sink that reports no terminal size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty sink that pretends to be a terminal of `size`.
    #[must_use]
    pub fn with_size(size: Size) -> Self {
        Self {
            buf: Arc::default(),
            size: Some(size),
        }
    }

    /// Everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Discard everything written so far.
    pub fn clear(&self) {
        self.buf
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Write for MemorySink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Sink for MemorySink {
    fn terminal_size(&self) -> Option<Size> {
        self.size
    }
}

// ─── OutputBuffer ────────────────────────────────────────────────────────────

/// A byte buffer that accumulates a frame for a single `write()` call.
///
/// Instead of many small writes per repaint (cursor moves, styled
/// lines, erase), everything goes into this buffer first. A single flush
/// at frame end writes it all at once.
///
/// Default capacity: 16 KB — enough for most frames without reallocation.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

const DEFAULT_CAPACITY: usize = 16_384;

impl OutputBuffer {
    /// Create an empty buffer with default capacity (16 KB).
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Number of bytes accumulated.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes (for testing and debugging).
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append a string.
    #[inline]
    pub fn push_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// Clear the buffer for reuse (keeps allocated capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write accumulated output to `w`, flush it, and clear the buffer.
    ///
    /// The buffer is cleared even if the write fails, so a broken sink
    /// never receives a half-stale frame on retry.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to or flushing `w` fails.
    pub fn flush_to(&mut self, w: &mut (impl Write + ?Sized)) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let result = w.write_all(&self.buf).and_then(|()| w.flush());
        self.buf.clear();
        result
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Intentionally a no-op. Real flushing via flush_to().
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
