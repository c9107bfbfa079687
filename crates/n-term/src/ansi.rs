// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state,
// no decisions about when to emit — that's the caller's job. A live
// progress display only needs a handful of commands: hide/show the cursor,
// jump back to the horizontal origin, move up over the previous frame, and
// erase whatever the previous frame left below the new one.
//
// All column positions are 0-indexed in our API and converted to 1-indexed
// for the terminal (ANSI standard uses 1-based coordinates).
//
// All functions return `io::Result` propagated from the underlying writer.
use std::io::{self, Write};

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

/// Move the cursor up by `n` lines (CUU). Does nothing for `n == 0`,
/// since terminals treat `CUU 0` as `CUU 1`.
#[inline]
pub fn cursor_up(w: &mut impl Write, n: usize) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}A")
}

/// Move the cursor to column `col` of the current line (CHA).
///
/// Our columns are 0-indexed; ANSI CHA is 1-indexed.
#[inline]
pub fn cursor_column(w: &mut impl Write, col: u16) -> io::Result<()> {
    write!(w, "\x1b[{}G", u32::from(col) + 1)
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Erase from the cursor to the end of the screen (ED 0).
///
/// Used after a repaint whose frame is shorter than the previous one, so
/// stale lines below the new frame disappear.
#[inline]
pub fn erase_below(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[J")
}

// ─── SGR ─────────────────────────────────────────────────────────────────────

/// The SGR reset sequence as a string, for callers building strings.
pub const RESET: &str = "\x1b[0m";

/// Build a Select Graphic Rendition sequence from pre-joined parameters,
/// e.g. `"1;31"` for bold red. Empty parameters produce an empty string.
#[must_use]
pub fn sgr_string(params: &str) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!("\x1b[{params}m")
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: run an ANSI function and return its output as a string.
    fn emit<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // ── Cursor ──────────────────────────────────────────────────────────

    #[test]
    fn cursor_hide_sequence() {
        assert_eq!(emit(|w| cursor_hide(w)), "\x1b[?25l");
    }

    #[test]
    fn cursor_show_sequence() {
        assert_eq!(emit(|w| cursor_show(w)), "\x1b[?25h");
    }

    #[test]
    fn cursor_up_by_lines() {
        assert_eq!(emit(|w| cursor_up(w, 3)), "\x1b[3A");
    }

    #[test]
    fn cursor_up_zero_is_noop() {
        assert_eq!(emit(|w| cursor_up(w, 0)), "");
    }

    #[test]
    fn cursor_column_origin() {
        assert_eq!(emit(|w| cursor_column(w, 0)), "\x1b[1G");
    }

    #[test]
    fn cursor_column_max() {
        assert_eq!(emit(|w| cursor_column(w, u16::MAX)), "\x1b[65536G");
    }

    // ── Screen ──────────────────────────────────────────────────────────

    #[test]
    fn erase_below_sequence() {
        assert_eq!(emit(|w| erase_below(w)), "\x1b[J");
    }

    // ── SGR ─────────────────────────────────────────────────────────────

    #[test]
    fn reset_sequence() {
        assert_eq!(RESET, "\x1b[0m");
    }

    #[test]
    fn sgr_joined_params() {
        assert_eq!(sgr_string("1;31"), "\x1b[1;31m");
    }

    #[test]
    fn sgr_empty_params_is_empty() {
        assert_eq!(sgr_string(""), "");
    }
}
