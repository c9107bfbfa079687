// SPDX-License-Identifier: MIT
//
// Terminal colors and their SGR encodings.
//
// A console toolkit only needs what the terminal can actually display:
// the 16 classic ANSI colors, the 256-color palette, and 24-bit truecolor.
// Everything is stored in one compact `Color` enum and converted to SGR
// parameters on demand. The parameters are returned as text (without the
// `ESC[` prefix and `m` suffix) so a `Style` can join foreground,
// background, and attributes into a single escape sequence.
//
// Palette encoding follows the shortest form the terminal accepts:
//
//   index 0-7    → 30-37 / 40-47
//   index 8-15   → 90-97 / 100-107
//   index 16-255 → 38;5;N / 48;5;N
//   rgb          → 38;2;R;G;B / 48;2;R;G;B

use std::fmt::Write as _;

/// A terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// 24-bit `TrueColor`.
    Rgb(u8, u8, u8),

    /// ANSI 256-color palette index. Indices 0-15 are the classic colors.
    Ansi256(u8),

    /// The terminal's own default color.
    #[default]
    Default,
}

impl Color {
    pub const BLACK: Self = Self::Ansi256(0);
    pub const RED: Self = Self::Ansi256(1);
    pub const GREEN: Self = Self::Ansi256(2);
    pub const YELLOW: Self = Self::Ansi256(3);
    pub const BLUE: Self = Self::Ansi256(4);
    pub const MAGENTA: Self = Self::Ansi256(5);
    pub const CYAN: Self = Self::Ansi256(6);
    pub const WHITE: Self = Self::Ansi256(7);
    pub const BRIGHT_BLACK: Self = Self::Ansi256(8);
    pub const BRIGHT_RED: Self = Self::Ansi256(9);
    pub const BRIGHT_GREEN: Self = Self::Ansi256(10);
    pub const BRIGHT_YELLOW: Self = Self::Ansi256(11);
    pub const BRIGHT_BLUE: Self = Self::Ansi256(12);
    pub const BRIGHT_MAGENTA: Self = Self::Ansi256(13);
    pub const BRIGHT_CYAN: Self = Self::Ansi256(14);
    pub const BRIGHT_WHITE: Self = Self::Ansi256(15);

    /// Build an RGB color from a `0xRRGGBB` value. The top byte is ignored.
    ///
    /// ```
    /// use n_term::color::Color;
    ///
    /// assert_eq!(Color::from_hex(0xff8000), Color::Rgb(255, 128, 0));
    /// ```
    #[must_use]
    pub const fn from_hex(value: u32) -> Self {
        let [_, r, g, b] = value.to_be_bytes();
        Self::Rgb(r, g, b)
    }

    /// Append the foreground SGR parameters for this color to `out`.
    pub fn push_fg_params(self, out: &mut String) {
        self.push_params(out, 30, 90, 38);
    }

    /// Append the background SGR parameters for this color to `out`.
    pub fn push_bg_params(self, out: &mut String) {
        self.push_params(out, 40, 100, 48);
    }

    fn push_params(self, out: &mut String, base: u16, bright_base: u16, extended: u16) {
        // Writing into a String cannot fail.
        let _ = match self {
            Self::Default => write!(out, "{}", base + 9),
            Self::Ansi256(idx) if idx < 8 => write!(out, "{}", base + u16::from(idx)),
            Self::Ansi256(idx) if idx < 16 => write!(out, "{}", bright_base + u16::from(idx - 8)),
            Self::Ansi256(idx) => write!(out, "{extended};5;{idx}"),
            Self::Rgb(r, g, b) => write!(out, "{extended};2;{r};{g};{b}"),
        };
    }

    /// Look up a classic color by its lower-case name (`"red"`,
    /// `"brightblue"`, ...). Used by the markup parser.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let (bright, base) = name
            .strip_prefix("bright")
            .map_or((false, name), |rest| (true, rest));

        let idx = match base {
            "black" => 0,
            "red" => 1,
            "green" => 2,
            "yellow" => 3,
            "blue" => 4,
            "magenta" => 5,
            "cyan" => 6,
            "white" => 7,
            "default" if !bright => return Some(Self::Default),
            _ => return None,
        };

        Some(Self::Ansi256(if bright { idx + 8 } else { idx }))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
