// SPDX-License-Identifier: MIT
//
// Table configuration.
//
// A plain struct with public fields and a `Default`, plus chainable
// `with_*` methods for the common case of building it inline. Per-column
// settings are vectors indexed by column; a column without an entry falls
// back to the table-wide value, so `with_column_styles(vec![bold])` styles
// only the first column.

use n_term::style::Style;

use super::border::{BorderGlyphs, BorderMask};
use crate::text::Alignment;

/// Layout and appearance settings for a [`Table`](super::Table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Spaces between adjacent cells (and between cells and vertical
    /// borders). Default 1.
    pub padding: usize,
    /// Spaces before and after every line. Default 0.
    pub margin: usize,
    /// Total width available to the table, margins included. `None` asks
    /// the output sink, falling back to 80 columns.
    pub max_width: Option<usize>,
    /// Which border lines to draw. Default none.
    pub border_mask: BorderMask,
    /// Glyphs used to draw borders.
    pub border_glyphs: BorderGlyphs,
    /// Style applied to every border segment.
    pub border_style: Style,
    /// Alignment of plain cells in columns without an override.
    pub alignment: Alignment,
    /// Per-column alignment overrides.
    pub column_alignments: Vec<Alignment>,
    /// Style of plain cells in columns without an override.
    pub style: Style,
    /// Per-column style overrides.
    pub column_styles: Vec<Style>,
    /// Word wrapping of plain cells in columns without an override.
    pub word_wrap: bool,
    /// Per-column word-wrap overrides.
    pub column_word_wrap: Vec<bool>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            padding: 1,
            margin: 0,
            max_width: None,
            border_mask: BorderMask::empty(),
            border_glyphs: BorderGlyphs::default(),
            border_style: Style::new(),
            alignment: Alignment::Left,
            column_alignments: Vec::new(),
            style: Style::new(),
            column_styles: Vec::new(),
            word_wrap: false,
            column_word_wrap: Vec::new(),
        }
    }
}

impl TableOptions {
    #[must_use]
    pub const fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub const fn with_margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub const fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = Some(max_width);
        self
    }

    #[must_use]
    pub const fn with_border_mask(mut self, mask: BorderMask) -> Self {
        self.border_mask = mask;
        self
    }

    #[must_use]
    pub const fn with_border_glyphs(mut self, glyphs: BorderGlyphs) -> Self {
        self.border_glyphs = glyphs;
        self
    }

    #[must_use]
    pub const fn with_border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    #[must_use]
    pub const fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn with_column_alignments(mut self, alignments: impl Into<Vec<Alignment>>) -> Self {
        self.column_alignments = alignments.into();
        self
    }

    #[must_use]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_column_styles(mut self, styles: impl Into<Vec<Style>>) -> Self {
        self.column_styles = styles.into();
        self
    }

    #[must_use]
    pub const fn with_word_wrap(mut self, word_wrap: bool) -> Self {
        self.word_wrap = word_wrap;
        self
    }

    #[must_use]
    pub fn with_column_word_wrap(mut self, word_wrap: impl Into<Vec<bool>>) -> Self {
        self.column_word_wrap = word_wrap.into();
        self
    }

    /// Effective alignment of column `col`.
    #[must_use]
    pub fn alignment_for(&self, col: usize) -> Alignment {
        self.column_alignments.get(col).copied().unwrap_or(self.alignment)
    }

    /// Effective style of column `col`.
    #[must_use]
    pub fn style_for(&self, col: usize) -> Style {
        self.column_styles.get(col).copied().unwrap_or(self.style)
    }

    /// Effective word wrapping of column `col`.
    #[must_use]
    pub fn word_wrap_for(&self, col: usize) -> bool {
        self.column_word_wrap.get(col).copied().unwrap_or(self.word_wrap)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let o = TableOptions::default();
        assert_eq!(o.padding, 1);
        assert_eq!(o.margin, 0);
        assert_eq!(o.max_width, None);
        assert!(o.border_mask.is_empty());
    }

    #[test]
    fn column_overrides_fall_back_to_table_wide() {
        let o = TableOptions::default()
            .with_alignment(Alignment::Right)
            .with_column_alignments([Alignment::Center])
            .with_column_word_wrap([false, true])
            .with_word_wrap(false)
            .with_column_styles([Style::bold()]);

        assert_eq!(o.alignment_for(0), Alignment::Center);
        assert_eq!(o.alignment_for(5), Alignment::Right);
        assert!(!o.word_wrap_for(0));
        assert!(o.word_wrap_for(1));
        assert!(!o.word_wrap_for(2));
        assert_eq!(o.style_for(0), Style::bold());
        assert!(o.style_for(1).is_plain());
    }
}
