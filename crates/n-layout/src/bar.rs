// SPDX-License-Identifier: MIT
//
// Bar — a horizontal progress bar that stretches to its column.
//
// A bar is drawn from three segment styles: the completed part, the
// remaining part, and a distinct "finished" style that fills the whole bar
// once it reaches 100%. Each style is a single-column glyph plus an
// optional `Style`; glyphs of any other width would break the arithmetic
// that maps a percentage onto columns, so they are rejected up front.
//
// Bars are elastic: they ask for at least 4 columns and at most everything
// they are offered (or their own cap), which makes them the column that
// absorbs whatever width the rest of a table leaves over.

use n_term::color::Color;
use n_term::style::Style;
use thiserror::Error;
use unicode_width::UnicodeWidthChar;

use crate::measure::Measurement;
use crate::renderable::Renderable;

/// Narrowest width a bar asks for.
pub const MIN_WIDTH: usize = 4;

const DEFAULT_SYMBOL: char = '─';

// ─── BarStyle ────────────────────────────────────────────────────────────────

/// A bar glyph was not exactly one column wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("bar symbol {symbol:?} must be 1 column wide, got {width}")]
pub struct BarStyleError {
    /// The rejected glyph.
    pub symbol: char,
    /// Its display width (0 for control and zero-width characters).
    pub width: usize,
}

/// The glyph and style of one bar segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarStyle {
    symbol: char,
    style: Style,
}

impl BarStyle {
    /// Create a segment style.
    ///
    /// # Errors
    ///
    /// Returns [`BarStyleError`] if `symbol` is not exactly one column wide.
    pub fn try_new(symbol: char, style: Style) -> Result<Self, BarStyleError> {
        let width = symbol.width().unwrap_or(0);
        if width != 1 {
            return Err(BarStyleError { symbol, width });
        }
        Ok(Self { symbol, style })
    }

    /// Create a segment style.
    ///
    /// # Panics
    ///
    /// Panics if `symbol` is not exactly one column wide. Use
    /// [`BarStyle::try_new`] for glyphs that are not known in advance.
    #[must_use]
    pub fn new(symbol: char, style: Style) -> Self {
        match Self::try_new(symbol, style) {
            Ok(s) => s,
            Err(e) => panic!("BarStyle::new: {e}"),
        }
    }

    /// An unstyled segment of `symbol`.
    #[must_use]
    pub fn plain(symbol: char) -> Self {
        Self::new(symbol, Style::new())
    }

    /// The segment glyph.
    #[must_use]
    pub const fn symbol(&self) -> char {
        self.symbol
    }

    /// `width` copies of the glyph, styled. Empty for width 0.
    #[must_use]
    pub fn render(&self, width: usize) -> String {
        if width == 0 {
            return String::new();
        }
        let run: String = std::iter::repeat_n(self.symbol, width).collect();
        self.style.paint(&run)
    }

    /// Default style of the part not yet completed: black `─`.
    #[must_use]
    pub const fn default_remaining() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL,
            style: Style::with_fg(Color::BLACK),
        }
    }

    /// Default style of the completed part: red `─`.
    #[must_use]
    pub const fn default_completed() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL,
            style: Style::with_fg(Color::RED),
        }
    }

    /// Default style of a bar at 100%: green `─`.
    #[must_use]
    pub const fn default_finished() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL,
            style: Style::with_fg(Color::GREEN),
        }
    }
}

// ─── Bar ─────────────────────────────────────────────────────────────────────

/// A progress bar renderable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Completion in percent. Clamped to `0..=100` at render time; NaN
    /// renders as 0.
    pub completed: f64,
    /// Upper bound on the bar's width. `None` takes all offered space.
    pub max_width: Option<usize>,
    /// Style of the part not yet completed.
    pub remaining: BarStyle,
    /// Style of the completed part.
    pub completed_style: BarStyle,
    /// Style of the whole bar once it reaches 100%.
    pub finished: BarStyle,
}

impl Bar {
    /// An uncapped bar at `completed` percent with the default styles.
    #[must_use]
    pub const fn new(completed: f64) -> Self {
        Self {
            completed,
            max_width: None,
            remaining: BarStyle::default_remaining(),
            completed_style: BarStyle::default_completed(),
            finished: BarStyle::default_finished(),
        }
    }

    /// Cap the bar's width.
    #[must_use]
    pub const fn max_width(mut self, max_width: usize) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Replace all three segment styles.
    #[must_use]
    pub const fn styles(mut self, remaining: BarStyle, completed: BarStyle, finished: BarStyle) -> Self {
        self.remaining = remaining;
        self.completed_style = completed;
        self.finished = finished;
        self
    }

    fn percent(&self) -> f64 {
        if self.completed.is_nan() {
            0.0
        } else {
            self.completed.clamp(0.0, 100.0)
        }
    }
}

impl Default for Bar {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Renderable for Bar {
    fn measure(&self, max_width: usize) -> Measurement {
        let maximum = self.max_width.map_or(max_width, |cap| cap.min(max_width));
        Measurement::new(MIN_WIDTH, maximum.max(MIN_WIDTH))
    }

    fn render(&self, width: usize) -> String {
        if width == 0 {
            return String::new();
        }
        let percent = self.percent();
        if percent >= 100.0 {
            return self.finished.render(width);
        }

        // Truncation toward zero is the intended rounding.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let done = ((width as f64) * percent / 100.0) as usize;
        let done = done.min(width);

        let mut out = self.completed_style.render(done);
        out.push_str(&self.remaining.render(width - done));
        out
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::style_lock;

    fn letters(percent: f64) -> Bar {
        Bar::new(percent).styles(
            BarStyle::plain('r'),
            BarStyle::plain('c'),
            BarStyle::plain('f'),
        )
    }

    // ── BarStyle ──────────────────────────────────────────────────────

    #[test]
    fn style_rejects_wide_and_zero_width_glyphs() {
        assert_eq!(
            BarStyle::try_new('日', Style::new()),
            Err(BarStyleError {
                symbol: '日',
                width: 2
            })
        );
        assert!(BarStyle::try_new('\u{301}', Style::new()).is_err());
        assert!(BarStyle::try_new('#', Style::new()).is_ok());
    }

    #[test]
    #[should_panic(expected = "must be 1 column wide")]
    fn style_new_panics_on_wide_glyph() {
        let _ = BarStyle::new('日', Style::new());
    }

    #[test]
    fn style_render_zero_is_empty() {
        assert_eq!(BarStyle::plain('#').render(0), "");
        assert_eq!(BarStyle::plain('#').render(3), "###");
    }

    // ── Rendering ─────────────────────────────────────────────────────

    #[test]
    fn render_splits_by_percent() {
        let bar = letters(50.0);
        assert_eq!(bar.render(4), "ccrr");
        assert_eq!(bar.render(5), "ccrrr");
        assert_eq!(letters(66.6).render(10), "ccccccrrrr");
    }

    #[test]
    fn render_finished_uses_finished_style() {
        assert_eq!(letters(100.0).render(10), "ffffffffff");
        assert_eq!(letters(250.0).render(3), "fff");
    }

    #[test]
    fn render_clamps_low_and_nan() {
        assert_eq!(letters(-5.0).render(3), "rrr");
        assert_eq!(letters(f64::NAN).render(3), "rrr");
    }

    #[test]
    fn render_zero_width_is_empty() {
        assert_eq!(letters(50.0).render(0), "");
    }

    #[test]
    fn default_styles_paint_each_segment() {
        let _l = style_lock();
        let _on = n_term::style::enable();
        assert_eq!(
            Bar::new(50.0).render(2),
            "\x1b[31m─\x1b[0m\x1b[30m─\x1b[0m"
        );
        assert_eq!(Bar::new(100.0).render(1), "\x1b[32m─\x1b[0m");
    }

    // ── Measuring ─────────────────────────────────────────────────────

    #[test]
    fn measure_respects_cap_and_minimum() {
        assert_eq!(Bar::new(0.0).max_width(0).measure(10), Measurement::exact(4));
        assert_eq!(Bar::new(0.0).max_width(5).measure(10), Measurement::new(4, 5));
        assert_eq!(Bar::new(0.0).measure(10), Measurement::new(4, 10));
        assert_eq!(Bar::new(0.0).max_width(20).measure(10), Measurement::new(4, 10));
        assert_eq!(Bar::new(0.0).measure(2), Measurement::exact(4));
    }
}
