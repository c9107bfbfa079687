// SPDX-License-Identifier: MIT
//
// Terminal queries — size, TTY detection, and color capability.
//
// Nothing here changes terminal state. A live progress display writes into
// the normal scrollback, so there is no raw mode and no alternate screen,
// only the questions "how wide is this output?" and "should it be colored?".
//
// Safety: This module necessarily uses `unsafe` for ioctl (TIOCGWINSZ) and
// isatty. These are the standard POSIX interfaces for terminal queries.
// Each unsafe block is minimal.
#![allow(unsafe_code)]

use std::env;

/// Width used when the output is not a terminal or cannot be queried.
pub const FALLBACK_COLS: u16 = 80;

/// Height used when the output is not a terminal or cannot be queried.
pub const FALLBACK_ROWS: u16 = 25;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

impl Size {
    /// The size assumed for outputs that are not terminals (80×25).
    pub const FALLBACK: Self = Self {
        cols: FALLBACK_COLS,
        rows: FALLBACK_ROWS,
    };
}

impl Default for Size {
    fn default() -> Self {
        Self::FALLBACK
    }
}

// ─── Queries ────────────────────────────────────────────────────────────────

/// A raw file descriptor on unix, a placeholder elsewhere.
#[cfg(unix)]
pub type RawFd = std::os::unix::io::RawFd;
#[cfg(not(unix))]
pub type RawFd = i32;

/// Standard output's descriptor.
pub const STDOUT_FD: RawFd = 1;

/// Standard error's descriptor.
pub const STDERR_FD: RawFd = 2;

/// Query the size of the terminal behind `fd` via `ioctl(TIOCGWINSZ)`.
///
/// Returns `None` if `fd` is not a terminal or the query fails.
#[cfg(unix)]
#[must_use]
pub fn size_of_fd(fd: RawFd) -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn size_of_fd(_fd: RawFd) -> Option<Size> {
    None
}

/// Query the size of the terminal attached to stdout.
#[must_use]
pub fn get_size() -> Option<Size> {
    size_of_fd(STDOUT_FD)
}

/// Check whether `fd` is connected to a terminal (TTY).
#[cfg(unix)]
#[must_use]
pub fn is_tty(fd: RawFd) -> bool {
    unsafe { libc::isatty(fd) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty(_fd: RawFd) -> bool {
    false
}

/// Decide color support from explicit environment values.
///
/// Split out from [`colors_supported`] so the policy is testable without
/// touching the process environment.
#[must_use]
pub fn colors_supported_with(term: Option<&str>, no_color: Option<&str>, tty: bool) -> bool {
    if no_color.is_some_and(|v| !v.is_empty()) {
        return false;
    }
    if term == Some("dumb") {
        return false;
    }
    tty
}

/// Whether stdout should receive color: it must be a TTY, `TERM` must not
/// be `dumb`, and `NO_COLOR` must be unset or empty.
#[must_use]
pub fn colors_supported() -> bool {
    let term = env::var("TERM").ok();
    let no_color = env::var("NO_COLOR").ok();
    colors_supported_with(term.as_deref(), no_color.as_deref(), is_tty(STDOUT_FD))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
