// SPDX-License-Identifier: MIT
//
// Display width — how many terminal columns a string really occupies.
//
// Byte length and char count are both wrong for layout: escape sequences
// take zero columns, CJK and most emoji take two, combining marks take
// none. Everything that negotiates widths goes through `display_width`,
// which strips CSI/OSC sequences and then sums grapheme widths.
//
// Multi-line strings measure as their widest line, which is what a table
// cell needs to know.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::ansi;

/// Marker that replaces the last visible glyph of a truncated line.
pub const ELLIPSIS: char = '…';

// ─── Escape scanning ─────────────────────────────────────────────────────────

/// Length in bytes of the escape sequence starting at `s[0]`, if any.
///
/// Recognises CSI (`ESC [ ... final`), OSC (`ESC ] ... BEL | ESC \`), and
/// two-byte `ESC x` sequences. An unterminated sequence runs to the end.
fn escape_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&0x1b) {
        return None;
    }
    match bytes.get(1) {
        Some(b'[') => {
            let end = bytes[2..]
                .iter()
                .position(|b| (0x40..=0x7e).contains(b))
                .map_or(bytes.len(), |p| p + 3);
            Some(end)
        }
        Some(b']') => {
            let mut i = 2;
            while i < bytes.len() {
                match bytes[i] {
                    0x07 => return Some(i + 1),
                    0x1b if bytes.get(i + 1) == Some(&b'\\') => return Some(i + 2),
                    _ => i += 1,
                }
            }
            Some(bytes.len())
        }
        Some(b) if b.is_ascii() => Some(2),
        // Lone ESC or ESC followed by a multi-byte char: drop just the ESC.
        _ => Some(1),
    }
}

/// Split `s` into alternating visible text and escape sequences.
fn segments(s: &str) -> impl Iterator<Item = (bool, &str)> {
    let mut rest = s;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        if let Some(len) = escape_len(rest) {
            let (esc, tail) = rest.split_at(len);
            rest = tail;
            return Some((true, esc));
        }
        let text_end = rest.find('\x1b').unwrap_or(rest.len());
        let (text, tail) = rest.split_at(text_end);
        rest = tail;
        Some((false, text))
    })
}

// ─── Measuring ───────────────────────────────────────────────────────────────

/// Remove all escape sequences from `s`.
#[must_use]
pub fn strip_ansi(s: &str) -> String {
    if !s.contains('\x1b') {
        return s.to_owned();
    }
    segments(s)
        .filter(|(is_escape, _)| !is_escape)
        .map(|(_, text)| text)
        .collect()
}

/// Display width of a single line (no newline handling).
fn line_width(line: &str) -> usize {
    if line.contains('\x1b') {
        segments(line)
            .filter(|(is_escape, _)| !is_escape)
            .map(|(_, text)| text.width())
            .sum()
    } else {
        line.width()
    }
}

/// Display width of `s` in terminal columns. Multi-line strings measure as
/// their widest line.
///
/// ```
/// use n_term::width::display_width;
///
/// assert_eq!(display_width("\x1b[1mbold\x1b[0m"), 4);
/// assert_eq!(display_width("日本"), 4);
/// assert_eq!(display_width("ab\nabcd"), 4);
/// ```
#[must_use]
pub fn display_width(s: &str) -> usize {
    s.split('\n').map(line_width).max().unwrap_or(0)
}

/// Split `s` on newlines. The empty string is a single empty line.
#[must_use]
pub fn split_lines(s: &str) -> Vec<&str> {
    s.split('\n').collect()
}

/// A string of `n` spaces.
#[must_use]
pub fn spaces(n: usize) -> String {
    " ".repeat(n)
}

// ─── Truncation ──────────────────────────────────────────────────────────────

/// Truncate a single line to at most `width` columns.
///
/// Lines that already fit are returned unchanged. Otherwise the visible
/// text is cut so that it plus [`ELLIPSIS`] fits in `width`. Escape
/// sequences before the cut are kept, and a reset is appended if any were
/// kept so styling cannot leak past the cut.
///
/// ```
/// use n_term::width::truncate;
///
/// assert_eq!(truncate("barbaz", 5), "barb…");
/// assert_eq!(truncate("foo", 5), "foo");
/// assert_eq!(truncate("foo", 0), "");
/// ```
#[must_use]
pub fn truncate(line: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if line_width(line) <= width {
        return line.to_owned();
    }

    let budget = width - 1;
    let mut out = String::with_capacity(line.len());
    let mut used = 0;
    let mut styled = false;

    'outer: for (is_escape, part) in segments(line) {
        if is_escape {
            out.push_str(part);
            styled = true;
            continue;
        }
        for grapheme in part.graphemes(true) {
            let w = grapheme.width();
            if used + w > budget {
                break 'outer;
            }
            out.push_str(grapheme);
            used += w;
        }
    }

    // A wide glyph may not fit exactly; fill the gap so the result is
    // exactly `width` columns.
    out.push_str(&spaces(budget - used));
    out.push(ELLIPSIS);
    if styled {
        out.push_str(ansi::RESET);
    }
    out
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Stripping ─────────────────────────────────────────────────────

    #[test]
    fn strip_plain_is_identity() {
        assert_eq!(strip_ansi("hello"), "hello");
    }

    #[test]
    fn strip_sgr() {
        assert_eq!(strip_ansi("\x1b[1;31mred\x1b[0m!"), "red!");
    }

    #[test]
    fn strip_cursor_and_osc() {
        assert_eq!(strip_ansi("\x1b[3Aup\x1b]0;title\x07x"), "upx");
        assert_eq!(strip_ansi("\x1b]8;;http://x\x1b\\link"), "link");
    }

    #[test]
    fn strip_unterminated_csi() {
        assert_eq!(strip_ansi("ok\x1b[12"), "ok");
    }

    // ── Width ─────────────────────────────────────────────────────────

    #[test]
    fn width_ascii() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn width_ignores_escapes() {
        assert_eq!(display_width("\x1b[38;2;1;2;3mrgb\x1b[0m"), 3);
    }

    #[test]
    fn width_wide_glyphs() {
        assert_eq!(display_width("日本語"), 6);
        assert_eq!(display_width("a日b"), 4);
    }

    #[test]
    fn width_multiline_is_widest() {
        assert_eq!(display_width("foo\nbarbaz\nqu"), 6);
    }

    #[test]
    fn width_combining_mark() {
        assert_eq!(display_width("e\u{301}"), 1);
    }

    // ── Lines ─────────────────────────────────────────────────────────

    #[test]
    fn lines_splitting() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b", ""]);
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
        assert_eq!(split_lines(""), vec![""]);
    }

    #[test]
    fn spaces_repeat() {
        assert_eq!(spaces(0), "");
        assert_eq!(spaces(3), "   ");
    }

    // ── Truncation ────────────────────────────────────────────────────

    #[test]
    fn truncate_fits_unchanged() {
        assert_eq!(truncate("abc", 3), "abc");
    }

    #[test]
    fn truncate_replaces_last_glyph() {
        assert_eq!(truncate("foo bar", 5), "foo …");
        assert_eq!(truncate("foo", 2), "f…");
    }

    #[test]
    fn truncate_width_one_is_ellipsis() {
        assert_eq!(truncate("foo", 1), "…");
    }

    #[test]
    fn truncate_wide_glyph_boundary() {
        // "日" is 2 wide; with width 4 the budget is 3, so only one fits.
        let t = truncate("日本語", 4);
        assert_eq!(t, "日 …");
        assert_eq!(display_width(&t), 4);
    }

    #[test]
    fn truncate_keeps_escapes_and_resets() {
        let t = truncate("\x1b[1mbold text\x1b[0m", 5);
        assert_eq!(t, "\x1b[1mbold…\x1b[0m");
        assert_eq!(display_width(&t), 5);
    }
}
