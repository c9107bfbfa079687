// SPDX-License-Identifier: MIT
//
// Styles — colors plus text attributes, rendered as one SGR sequence.
//
// A `Style` is a small Copy value: optional foreground, optional background,
// and an attribute bitfield. `Style::paint` is the single styling function
// the layout layer relies on: it wraps a block of text in a start sequence
// and a reset, or returns the text untouched when styling is disabled.
//
// Styling is switched on and off process-wide. The initial value is derived
// lazily from the environment the first time anyone asks (see
// `terminal::colors_supported`), and can be overridden at any time with
// `set_enabled` or the RAII helpers `enable`/`disable`. Every change of the
// flag also clears the markup sequence cache, because cached sequences
// encode the flag's value at the time they were resolved.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::ansi;
use crate::color::Color;
use crate::markup;
use crate::terminal;

// ─── Text Attributes ─────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Text attributes stored as a compact bitfield.
    ///
    /// These map directly to SGR (Select Graphic Rendition) parameters
    /// in the ANSI escape sequence standard. Combine with bitwise OR:
    ///
    /// ```
    /// use n_term::style::Attr;
    ///
    /// let attrs = Attr::BOLD | Attr::ITALIC;
    /// assert!(attrs.contains(Attr::BOLD));
    /// assert!(!attrs.contains(Attr::DIM));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 1 — increased intensity.
        const BOLD          = 1 << 0;
        /// SGR 2 — decreased intensity (faint).
        const DIM           = 1 << 1;
        /// SGR 3 — italic or oblique.
        const ITALIC        = 1 << 2;
        /// SGR 4 — single underline.
        const UNDERLINE     = 1 << 3;
        /// SGR 5 — slow blink.
        const BLINK         = 1 << 4;
        /// SGR 7 — swap foreground and background.
        const INVERSE       = 1 << 5;
        /// SGR 8 — invisible text (not widely supported).
        const HIDDEN        = 1 << 6;
        /// SGR 9 — crossed-out text.
        const STRIKETHROUGH = 1 << 7;
    }
}

impl Attr {
    /// SGR codes in emission order.
    const CODES: [(Self, u8); 8] = [
        (Self::BOLD, 1),
        (Self::DIM, 2),
        (Self::ITALIC, 3),
        (Self::UNDERLINE, 4),
        (Self::BLINK, 5),
        (Self::INVERSE, 7),
        (Self::HIDDEN, 8),
        (Self::STRIKETHROUGH, 9),
    ];

    /// Look up a single attribute by its markup name.
    #[must_use]
    pub fn from_markup_name(name: &str) -> Option<Self> {
        Some(match name {
            "bold" => Self::BOLD,
            "dim" | "faint" => Self::DIM,
            "italic" => Self::ITALIC,
            "underline" => Self::UNDERLINE,
            "blink" => Self::BLINK,
            "reverse" | "inverse" => Self::INVERSE,
            "hidden" | "concealed" => Self::HIDDEN,
            "strike" | "strikethrough" | "crossedout" => Self::STRIKETHROUGH,
            _ => return None,
        })
    }

    fn push_params(self, out: &mut String) {
        for (flag, code) in Self::CODES {
            if self.contains(flag) {
                if !out.is_empty() {
                    out.push(';');
                }
                out.push_str(&code.to_string());
            }
        }
    }
}

// ─── Style ───────────────────────────────────────────────────────────────────

/// Foreground, background, and attributes applied to a block of text.
///
/// ```
/// use n_term::color::Color;
/// use n_term::style::{self, Attr, Style};
///
/// let _on = style::enable();
/// let s = Style::new().fg(Color::RED).attrs(Attr::BOLD);
/// assert_eq!(s.paint("hi"), "\x1b[1;31mhi\x1b[0m");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color, if any.
    pub fg: Option<Color>,
    /// Background color, if any.
    pub bg: Option<Color>,
    /// Text attributes.
    pub attrs: Attr,
}

impl Style {
    /// A style that changes nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: Attr::empty(),
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add attributes on top of the existing ones.
    #[must_use]
    pub const fn attrs(mut self, attrs: Attr) -> Self {
        self.attrs = self.attrs.union(attrs);
        self
    }

    /// Shorthand for `Style::new().attrs(Attr::BOLD)`.
    #[must_use]
    pub const fn bold() -> Self {
        Self::new().attrs(Attr::BOLD)
    }

    /// Shorthand for a style with only a foreground color.
    #[must_use]
    pub const fn with_fg(color: Color) -> Self {
        Self::new().fg(color)
    }

    /// Whether this style would emit no parameters at all.
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_empty()
    }

    /// The joined SGR parameters: attributes, then foreground, then
    /// background (`"1;31;44"`).
    #[must_use]
    pub fn params(&self) -> String {
        let mut out = String::new();
        self.attrs.push_params(&mut out);
        if let Some(fg) = self.fg {
            if !out.is_empty() {
                out.push(';');
            }
            fg.push_fg_params(&mut out);
        }
        if let Some(bg) = self.bg {
            if !out.is_empty() {
                out.push(';');
            }
            bg.push_bg_params(&mut out);
        }
        out
    }

    /// Wrap `text` with this style's start sequence and a reset.
    ///
    /// Returns `text` unchanged if styling is disabled or the style is plain.
    #[must_use]
    pub fn paint(&self, text: &str) -> String {
        if self.is_plain() || !enabled() {
            return text.to_owned();
        }
        let start = ansi::sgr_string(&self.params());
        let mut out = String::with_capacity(start.len() + text.len() + ansi::RESET.len());
        out.push_str(&start);
        out.push_str(text);
        out.push_str(ansi::RESET);
        out
    }
}

// ─── Global toggle ───────────────────────────────────────────────────────────

const UNSET: u8 = 0;
const OFF: u8 = 1;
const ON: u8 = 2;

/// Process-wide styling state. `UNSET` until first queried or overridden.
static STATE: AtomicU8 = AtomicU8::new(UNSET);

const fn encode(enabled: bool) -> u8 {
    if enabled { ON } else { OFF }
}

/// Whether styling is currently enabled.
///
/// The first call resolves the default from the environment: enabled iff
/// stdout is a terminal, `TERM` is not `dumb`, and `NO_COLOR` is unset.
#[must_use]
pub fn enabled() -> bool {
    match STATE.load(Ordering::Acquire) {
        ON => true,
        OFF => false,
        _ => {
            let detected = encode(terminal::colors_supported());
            // A concurrent override wins over detection.
            match STATE.compare_exchange(UNSET, detected, Ordering::AcqRel, Ordering::Acquire) {
                Ok(_) => detected == ON,
                Err(current) => current == ON,
            }
        }
    }
}

/// Force styling on or off. Returns the previous value.
///
/// Clears the markup sequence cache when the value actually changes.
pub fn set_enabled(on: bool) -> bool {
    let previous = enabled();
    STATE.store(encode(on), Ordering::Release);
    if previous != on {
        markup::clear_cache();
    }
    previous
}

/// Restores the previous styling state when dropped.
#[must_use = "the previous styling state is restored when the guard is dropped"]
#[derive(Debug)]
pub struct StyleGuard {
    previous: bool,
}

impl Drop for StyleGuard {
    fn drop(&mut self) {
        set_enabled(self.previous);
    }
}

/// Enable styling until the returned guard is dropped.
pub fn enable() -> StyleGuard {
    StyleGuard {
        previous: set_enabled(true),
    }
}

/// Disable styling until the returned guard is dropped.
pub fn disable() -> StyleGuard {
    StyleGuard {
        previous: set_enabled(false),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
