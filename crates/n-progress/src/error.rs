// SPDX-License-Identifier: MIT
//
// Errors that end a progress display early.
//
// Both variants wrap the underlying `io::Error` in an `Arc` so the result
// can be handed to every thread blocked in `Progress::wait`.

use std::io;
use std::sync::Arc;

/// Why a progress display could not start or stopped abnormally.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProgressError {
    /// The scheduler thread could not be spawned.
    #[error("failed to spawn progress thread: {0}")]
    Spawn(#[source] Arc<io::Error>),

    /// Writing a frame to the output failed.
    #[error("failed to render task progress: {0}")]
    Render(#[source] Arc<io::Error>),
}

impl ProgressError {
    pub(crate) fn spawn(err: io::Error) -> Self {
        Self::Spawn(Arc::new(err))
    }

    pub(crate) fn render(err: io::Error) -> Self {
        Self::Render(Arc::new(err))
    }

    /// The I/O error behind this failure.
    #[must_use]
    pub fn io_error(&self) -> &io::Error {
        match self {
            Self::Spawn(err) | Self::Render(err) => err,
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_cause() {
        let err = ProgressError::render(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
        assert_eq!(err.to_string(), "failed to render task progress: gone");
        assert_eq!(err.io_error().kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn clones_share_the_cause() {
        let err = ProgressError::spawn(io::Error::other("no threads"));
        let copy = err.clone();
        let (ProgressError::Spawn(a), ProgressError::Spawn(b)) = (&err, &copy) else {
            panic!("expected spawn errors");
        };
        assert!(Arc::ptr_eq(a, b));
        assert!(std::error::Error::source(&copy).is_some());
    }
}
