// SPDX-License-Identifier: MIT
//
// Byte-counting I/O adapters.
//
// Wrap a reader or writer so every byte that passes through advances a
// task. Handy for downloads and copies where the total is a byte count:
//
//     let task = progress.add_task("copy", len);
//     io::copy(&mut task.reader(file), &mut out)?;

use std::io::{self, Read, Write};
use std::sync::Arc;

use crate::task::Task;

/// Advance `task` by a byte count reported by the wrapped stream.
fn advance_by(task: &Task, n: usize) {
    task.advance(u64::try_from(n).unwrap_or(u64::MAX));
}

// ─── Writer ──────────────────────────────────────────────────────────────────

/// A writer that advances a task by every byte written.
#[derive(Debug)]
pub struct ProgressWriter<W> {
    inner: W,
    task: Arc<Task>,
}

impl<W: Write> ProgressWriter<W> {
    #[must_use]
    pub const fn new(inner: W, task: Arc<Task>) -> Self {
        Self { inner, task }
    }

    #[must_use]
    pub const fn task(&self) -> &Arc<Task> {
        &self.task
    }

    /// Unwrap the inner writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for ProgressWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        advance_by(&self.task, n);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

// ─── Reader ──────────────────────────────────────────────────────────────────

/// A reader that advances a task by every byte read.
#[derive(Debug)]
pub struct ProgressReader<R> {
    inner: R,
    task: Arc<Task>,
}

impl<R: Read> ProgressReader<R> {
    #[must_use]
    pub const fn new(inner: R, task: Arc<Task>) -> Self {
        Self { inner, task }
    }

    #[must_use]
    pub const fn task(&self) -> &Arc<Task> {
        &self.task
    }

    /// Unwrap the inner reader.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        advance_by(&self.task, n);
        Ok(n)
    }
}

// ─── Task adapters ───────────────────────────────────────────────────────────

impl Task {
    /// Wrap `inner` so bytes written to it advance this task.
    #[must_use]
    pub fn writer<W: Write>(self: &Arc<Self>, inner: W) -> ProgressWriter<W> {
        ProgressWriter::new(inner, Arc::clone(self))
    }

    /// Wrap `inner` so bytes read from it advance this task.
    #[must_use]
    pub fn reader<R: Read>(self: &Arc<Self>, inner: R) -> ProgressReader<R> {
        ProgressReader::new(inner, Arc::clone(self))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_counts_written_bytes() {
        let task = Arc::new(Task::new("upload", 100));
        let mut w = task.writer(Vec::new());
        w.write_all(b"hello ").unwrap();
        w.write_all(b"world").unwrap();
        w.flush().unwrap();
        assert_eq!(task.completed(), 11);
        assert_eq!(w.into_inner(), b"hello world");
    }

    #[test]
    fn reader_counts_read_bytes() {
        let task = Arc::new(Task::new("download", 5));
        let mut r = task.reader(&b"abcdefgh"[..]);
        let mut out = String::new();
        r.read_to_string(&mut out).unwrap();
        assert_eq!(out, "abcdefgh");
        // Clamped to the total.
        assert_eq!(task.completed(), 5);
        assert!(r.task().is_finished());
    }

    #[test]
    fn copy_through_both_adapters() {
        let src = Arc::new(Task::new("src", 1024));
        let dst = Arc::new(Task::new("dst", 1024));
        let data = vec![7u8; 1024];
        let mut reader = src.reader(data.as_slice());
        let mut writer = dst.writer(Vec::new());
        let copied = io::copy(&mut reader, &mut writer).unwrap();
        assert_eq!(copied, 1024);
        assert!(src.is_finished());
        assert!(dst.is_finished());
    }

    #[test]
    fn failed_writes_do_not_advance() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("broken"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let task = Arc::new(Task::new("t", 10));
        let mut w = task.writer(Broken);
        assert!(w.write(b"abc").is_err());
        assert_eq!(task.completed(), 0);
        assert!(!task.is_started());
    }
}
