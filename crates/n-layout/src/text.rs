// SPDX-License-Identifier: MIT
//
// Text — aligned, optionally word-wrapped, optionally styled text.
//
// Rendering a `Text` into a width runs four steps, in this order:
//
//   1. word wrap (if enabled), one input line at a time
//   2. align every line to the width (pad left/right/both/between words)
//   3. truncate lines that are still too wide, ending them with `…`
//   4. paint every line with the style
//
// Styling comes last and per line, so a style never spans a newline and
// the table can put borders and padding between styled lines safely.
// Escape sequences already embedded in the text are carried through:
// widths are always measured with them stripped.

use n_term::style::Style;
use n_term::width::{display_width, spaces, split_lines, truncate};

use crate::measure::Measurement;
use crate::renderable::Renderable;

// ─── Alignment ───────────────────────────────────────────────────────────────

/// Horizontal alignment of a line within its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Pad on the right.
    #[default]
    Left,
    /// Pad on the left.
    Right,
    /// Split the padding; the extra space of an odd split goes right.
    Center,
    /// Spread the padding between words; the last gap takes the remainder.
    Justify,
}

/// Align every line of `s` to `width`. Lines that are already at least
/// `width` wide are left alone.
///
/// ```
/// use n_layout::text::{align, Alignment};
///
/// assert_eq!(align("foo", 5, Alignment::Right), "  foo");
/// assert_eq!(align("foo bar baz", 14, Alignment::Justify), "foo  bar   baz");
/// ```
#[must_use]
pub fn align(s: &str, width: usize, alignment: Alignment) -> String {
    split_lines(s)
        .into_iter()
        .map(|line| align_line(line, width, alignment))
        .collect::<Vec<_>>()
        .join("\n")
}

fn align_line(line: &str, width: usize, alignment: Alignment) -> String {
    let padding = width.saturating_sub(display_width(line));
    if padding == 0 {
        return line.to_owned();
    }
    match alignment {
        Alignment::Left => format!("{line}{}", spaces(padding)),
        Alignment::Right => format!("{}{line}", spaces(padding)),
        Alignment::Center => {
            let left = padding / 2;
            format!("{}{line}{}", spaces(left), spaces(padding - left))
        }
        Alignment::Justify => justify(line, padding),
    }
}

/// Distribute `padding` extra spaces over the single-space gaps of `line`.
fn justify(line: &str, padding: usize) -> String {
    if line.is_empty() {
        return spaces(padding);
    }
    let words: Vec<&str> = line.split(' ').collect();
    let gaps = words.len() - 1;
    if gaps == 0 {
        return format!("{line}{}", spaces(padding));
    }

    let per_gap = padding / gaps;
    let mut left = padding;
    let mut out = String::with_capacity(line.len() + padding);
    out.push_str(words[0]);
    for (i, word) in words[1..].iter().enumerate() {
        let extra = if i + 1 == gaps { left } else { per_gap };
        out.push_str(&spaces(extra + 1));
        out.push_str(word);
        left -= extra;
    }
    out
}

// ─── Word wrap ───────────────────────────────────────────────────────────────

/// Greedily wrap the words of every line of `s` to `width` columns.
///
/// Runs of whitespace collapse to single spaces. Existing newlines are
/// kept. Words are never split: a word wider than `width` gets a line of
/// its own and is cut later, at render time.
///
/// ```
/// use n_layout::text::wrap_words;
///
/// assert_eq!(wrap_words("foo bar baz", 7), "foo bar\nbaz");
/// assert_eq!(wrap_words("a\nb c", 10), "a\nb c");
/// ```
#[must_use]
pub fn wrap_words(s: &str, width: usize) -> String {
    split_lines(s)
        .into_iter()
        .map(|line| wrap_line(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_line(line: &str, width: usize) -> String {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(line.len());
    out.push_str(first);
    let mut space_left = width.saturating_sub(display_width(first));

    for word in words {
        let word_width = display_width(word);
        if word_width + 1 > space_left {
            out.push('\n');
            out.push_str(word);
            space_left = width.saturating_sub(word_width);
        } else {
            out.push(' ');
            out.push_str(word);
            space_left -= word_width + 1;
        }
    }
    out
}

// ─── Text ────────────────────────────────────────────────────────────────────

/// A renderable block of text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text {
    /// The content. May contain newlines and escape sequences.
    pub text: String,
    /// Alignment of each line within the render width.
    pub alignment: Alignment,
    /// Style applied to every line after alignment and truncation.
    pub style: Style,
    /// Wrap words to the render width instead of truncating long lines.
    pub word_wrap: bool,
}

impl Text {
    /// Left-aligned, unstyled, unwrapped text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the alignment.
    #[must_use]
    pub const fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the style.
    #[must_use]
    pub const fn styled(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Enable or disable word wrapping.
    #[must_use]
    pub const fn wrapped(mut self, word_wrap: bool) -> Self {
        self.word_wrap = word_wrap;
        self
    }

    fn laid_out(&self, width: usize) -> String {
        if self.word_wrap {
            wrap_words(&self.text, width)
        } else {
            self.text.clone()
        }
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl Renderable for Text {
    /// Both bounds are the widest line (after wrapping, if enabled),
    /// capped at `max_width`.
    fn measure(&self, max_width: usize) -> Measurement {
        let width = display_width(&self.laid_out(max_width)).min(max_width);
        Measurement::exact(width)
    }

    fn render(&self, width: usize) -> String {
        let laid_out = self.laid_out(width);
        split_lines(&laid_out)
            .into_iter()
            .map(|line| {
                let line = truncate(&align_line(line, width, self.alignment), width);
                self.style.paint(&line)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tests::style_lock;

    const LOREM: &str = "Lorem ipsum dolor sit amet, consetetur sadipscing elitr, sed diam nonumy \
        eirmod tempor invidunt ut labore et dolore magna aliquyam erat, sed diam voluptua. At \
        vero eos et accusam et justo duo dolores et ea rebum. Stet clita kasd gubergren, no sea \
        takimata sanctus est Lorem ipsum dolor sit amet.";

    // ── Alignment ─────────────────────────────────────────────────────

    #[test]
    fn align_left_right() {
        assert_eq!(align("foo", 5, Alignment::Left), "foo  ");
        assert_eq!(align("foo\nbarbaz", 7, Alignment::Left), "foo    \nbarbaz ");
        assert_eq!(align("foo", 5, Alignment::Right), "  foo");
        assert_eq!(align("foo\nbarbaz", 7, Alignment::Right), "    foo\n barbaz");
    }

    #[test]
    fn align_never_cuts() {
        for a in [Alignment::Left, Alignment::Right, Alignment::Center] {
            assert_eq!(align("foobarbaz", 5, a), "foobarbaz");
        }
    }

    #[test]
    fn align_center_extra_goes_right() {
        assert_eq!(align("foo", 5, Alignment::Center), " foo ");
        assert_eq!(align("foo", 6, Alignment::Center), " foo  ");
        assert_eq!(align("foo\nbarbaz", 8, Alignment::Center), "  foo   \n barbaz ");
    }

    #[test]
    fn align_justify() {
        let j = |s, w| align(s, w, Alignment::Justify);
        assert_eq!(j("foo bar baz\n", 10), "foo bar baz\n          ");
        assert_eq!(j("foo bar baz\nqux", 10), "foo bar baz\nqux       ");
        assert_eq!(j("foo bar baz", 11), "foo bar baz");
        assert_eq!(j("foo bar baz", 12), "foo bar  baz");
        assert_eq!(j("foo bar baz", 13), "foo  bar  baz");
        assert_eq!(j("foo bar baz", 14), "foo  bar   baz");
        assert_eq!(j("foo bar baz", 15), "foo   bar   baz");
        assert_eq!(
            j("foo barbaz\nbaz qux\nlorem ipsum", 11),
            "foo  barbaz\nbaz     qux\nlorem ipsum"
        );
    }

    #[test]
    fn align_uses_display_width() {
        assert_eq!(align("日本", 6, Alignment::Right), "  日本");
        assert_eq!(align("\x1b[1mab\x1b[0m", 3, Alignment::Left), "\x1b[1mab\x1b[0m ");
    }

    // ── Word wrap ─────────────────────────────────────────────────────

    #[test]
    fn wrap_lorem_at_30() {
        let expected = "Lorem ipsum dolor sit amet,
consetetur sadipscing elitr,
sed diam nonumy eirmod tempor
invidunt ut labore et dolore
magna aliquyam erat, sed diam
voluptua. At vero eos et
accusam et justo duo dolores
et ea rebum. Stet clita kasd
gubergren, no sea takimata
sanctus est Lorem ipsum dolor
sit amet.";
        assert_eq!(wrap_words(LOREM, 30), expected);
    }

    #[test]
    fn wrap_keeps_newlines_and_collapses_spaces() {
        assert_eq!(wrap_words("foo   bar\n\nbaz", 20), "foo bar\n\nbaz");
    }

    #[test]
    fn wrap_long_word_gets_own_line() {
        assert_eq!(wrap_words("a consetetur b", 5), "a\nconsetetur\nb");
    }

    #[test]
    fn wrap_empty() {
        assert_eq!(wrap_words("", 10), "");
        assert_eq!(wrap_words("   ", 10), "");
    }

    // ── Text ──────────────────────────────────────────────────────────

    #[test]
    fn text_render_pads_and_truncates() {
        assert_eq!(Text::new("").render(3), "   ");
        assert_eq!(Text::new("foo").render(3), "foo");
        assert_eq!(Text::new("foobar").render(3), "fo…");
        assert_eq!(Text::new("foobar").render(5), "foob…");
        assert_eq!(Text::new("foobar").render(8), "foobar  ");
    }

    #[test]
    fn text_render_word_wrap_justified() {
        let text = Text::new(LOREM).wrapped(true).aligned(Alignment::Justify);
        let expected = "Lorem ipsum dolor sit    amet,
consetetur  sadipscing  elitr,
sed diam nonumy eirmod  tempor
invidunt ut labore et   dolore
magna aliquyam erat, sed  diam
voluptua.  At  vero  eos    et
accusam et justo duo   dolores
et ea rebum. Stet clita   kasd
gubergren,  no  sea   takimata
sanctus est Lorem ipsum  dolor
sit                      amet.";
        assert_eq!(text.render(30), expected);
    }

    #[test]
    fn text_measure() {
        assert_eq!(Text::new("").measure(10), Measurement::ZERO);
        assert_eq!(Text::new("foo").measure(10), Measurement::exact(3));
        assert_eq!(Text::new("foobar").measure(3), Measurement::exact(3));
        assert_eq!(Text::new("foo\nbarbaz").measure(10), Measurement::exact(6));
    }

    #[test]
    fn text_measure_wrapped_uses_widest_line() {
        let text = Text::new("foo bar bazqux").wrapped(true);
        assert_eq!(text.measure(8), Measurement::exact(7));
    }

    #[test]
    fn text_style_wraps_each_line() {
        let _l = style_lock();
        let _on = n_term::style::enable();
        let text = Text::new("a\nb").styled(Style::bold());
        assert_eq!(text.render(2), "\x1b[1ma \x1b[0m\n\x1b[1mb \x1b[0m");
    }
}
