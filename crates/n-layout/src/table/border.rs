// SPDX-License-Identifier: MIT
//
// Table borders: which lines to draw, and with which glyphs.
//
// `BorderMask` selects independent border lines. Vertical bits (LEFT,
// COLUMN, RIGHT) put a glyph plus padding between cells; horizontal bits
// (TOP, ROW, BOTTOM, SECTION) add whole lines between rows. SECTION lines
// separate header rows from what follows and footer rows from what comes
// before them, and use the double-line glyphs by default.
//
// Junction glyphs only appear where a vertical border meets a horizontal
// one, so e.g. `ROW` alone draws plain horizontal rules and `ROW | COLUMN`
// draws `┼` where the rules cross the column separators.

use n_term::style::Style;

bitflags::bitflags! {
    /// Which border lines a table draws. The empty mask draws none.
    ///
    /// ```
    /// use n_layout::BorderMask;
    ///
    /// let mask = BorderMask::ALL ^ BorderMask::ROW;
    /// assert!(mask.contains(BorderMask::TOP | BorderMask::COLUMN));
    /// assert!(!mask.contains(BorderMask::ROW));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct BorderMask: u8 {
        /// Vertical line left of the first column.
        const LEFT    = 1 << 0;
        /// Vertical lines between columns.
        const COLUMN  = 1 << 1;
        /// Vertical line right of the last column.
        const RIGHT   = 1 << 2;
        /// Horizontal line above the first row.
        const TOP     = 1 << 3;
        /// Horizontal lines between body rows.
        const ROW     = 1 << 4;
        /// Horizontal line below the last row.
        const BOTTOM  = 1 << 5;
        /// Lines after header rows and before footer rows.
        const SECTION = 1 << 6;

        /// Every horizontal line.
        const ALL_HORIZONTAL = Self::TOP.bits() | Self::ROW.bits() | Self::BOTTOM.bits() | Self::SECTION.bits();
        /// Every vertical line.
        const ALL_VERTICAL = Self::LEFT.bits() | Self::COLUMN.bits() | Self::RIGHT.bits();
        /// A fully boxed table.
        const ALL = Self::ALL_HORIZONTAL.bits() | Self::ALL_VERTICAL.bits();
    }
}

// ─── Glyphs ──────────────────────────────────────────────────────────────────

/// The role a glyph plays in a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BorderGlyph {
    Horizontal,
    Vertical,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    JunctionTop,
    JunctionBottom,
    JunctionLeft,
    JunctionRight,
    JunctionCenter,
    SectionHorizontal,
    SectionLeft,
    SectionRight,
    SectionCenter,
}

const GLYPH_COUNT: usize = 15;

/// The characters used to draw borders, one per [`BorderGlyph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BorderGlyphs {
    glyphs: [char; GLYPH_COUNT],
}

impl BorderGlyphs {
    /// Single-line box drawing with double-line section separators.
    pub const BOX: Self = Self {
        glyphs: [
            '─', '│', '┌', '┐', '└', '┘', '┬', '┴', '├', '┤', '┼', '═', '╞', '╡', '╪',
        ],
    };

    /// Plain ASCII, for terminals without box-drawing glyphs.
    pub const ASCII: Self = Self {
        glyphs: [
            '-', '|', '+', '+', '+', '+', '+', '+', '+', '+', '+', '=', '+', '+', '+',
        ],
    };

    /// The character for `glyph`.
    #[must_use]
    pub const fn get(&self, glyph: BorderGlyph) -> char {
        self.glyphs[glyph as usize]
    }

    /// Replace the character for `glyph`.
    #[must_use]
    pub const fn with(mut self, glyph: BorderGlyph, ch: char) -> Self {
        self.glyphs[glyph as usize] = ch;
        self
    }
}

impl Default for BorderGlyphs {
    fn default() -> Self {
        Self::BOX
    }
}

// ─── Lines ───────────────────────────────────────────────────────────────────

/// The four glyphs that make up one horizontal border line.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LineGlyphs {
    pub left: BorderGlyph,
    pub junction: BorderGlyph,
    pub right: BorderGlyph,
    pub fill: BorderGlyph,
}

impl LineGlyphs {
    pub const TOP: Self = Self {
        left: BorderGlyph::TopLeft,
        junction: BorderGlyph::JunctionTop,
        right: BorderGlyph::TopRight,
        fill: BorderGlyph::Horizontal,
    };

    pub const ROW: Self = Self {
        left: BorderGlyph::JunctionLeft,
        junction: BorderGlyph::JunctionCenter,
        right: BorderGlyph::JunctionRight,
        fill: BorderGlyph::Horizontal,
    };

    pub const SECTION: Self = Self {
        left: BorderGlyph::SectionLeft,
        junction: BorderGlyph::SectionCenter,
        right: BorderGlyph::SectionRight,
        fill: BorderGlyph::SectionHorizontal,
    };

    pub const BOTTOM: Self = Self {
        left: BorderGlyph::BottomLeft,
        junction: BorderGlyph::JunctionBottom,
        right: BorderGlyph::BottomRight,
        fill: BorderGlyph::Horizontal,
    };
}

/// Extra columns the vertical borders of `mask` add to a row of `columns`
/// cells separated by `padding`.
///
/// LEFT adds a glyph and padding, RIGHT adds padding and a glyph, and every
/// COLUMN separator adds a glyph and a second padding run next to the
/// padding that separates cells anyway.
#[must_use]
pub(crate) fn vertical_extra(mask: BorderMask, columns: usize, padding: usize) -> usize {
    let mut extra = 0;
    if mask.contains(BorderMask::LEFT) {
        extra += 1 + padding;
    }
    if mask.contains(BorderMask::RIGHT) {
        extra += padding + 1;
    }
    if mask.contains(BorderMask::COLUMN) {
        extra += columns.saturating_sub(1) * (padding + 1);
    }
    extra
}

/// Paint a run of border text, skipping empty runs so a zero padding
/// does not emit bare escape sequences.
pub(crate) fn paint_run(out: &mut String, style: Style, run: &str) {
    if !run.is_empty() {
        out.push_str(&style.paint(run));
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_masks() {
        assert_eq!(
            BorderMask::ALL_VERTICAL,
            BorderMask::LEFT | BorderMask::COLUMN | BorderMask::RIGHT
        );
        assert!(BorderMask::ALL.contains(BorderMask::SECTION | BorderMask::LEFT));
        assert!(BorderMask::default().is_empty());
    }

    #[test]
    fn box_glyph_lookup() {
        let g = BorderGlyphs::default();
        assert_eq!(g.get(BorderGlyph::TopLeft), '┌');
        assert_eq!(g.get(BorderGlyph::BottomRight), '┘');
        assert_eq!(g.get(BorderGlyph::SectionCenter), '╪');
    }

    #[test]
    fn glyph_override() {
        let g = BorderGlyphs::BOX.with(BorderGlyph::Vertical, '┃');
        assert_eq!(g.get(BorderGlyph::Vertical), '┃');
        assert_eq!(g.get(BorderGlyph::Horizontal), '─');
    }

    #[test]
    fn vertical_extra_per_bit() {
        assert_eq!(vertical_extra(BorderMask::empty(), 3, 1), 0);
        assert_eq!(vertical_extra(BorderMask::LEFT, 3, 1), 2);
        assert_eq!(vertical_extra(BorderMask::RIGHT, 3, 2), 3);
        assert_eq!(vertical_extra(BorderMask::COLUMN, 3, 1), 4);
        assert_eq!(vertical_extra(BorderMask::ALL, 2, 1), 6);
        assert_eq!(vertical_extra(BorderMask::COLUMN, 0, 1), 0);
    }
}
