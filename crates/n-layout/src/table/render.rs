// SPDX-License-Identifier: MIT
//
// Frame assembly — turns negotiated widths and rendered cells into lines.
//
// A `Frame` owns the output string and knows the table's margin, padding,
// border mask, glyphs, and border style. The table drives it row by row:
// `row` writes the physical lines of one logical row (as tall as its
// tallest cell), `rule` writes one horizontal border line. Every border
// segment (corner, padding run, column run, junction) is painted on its
// own, so a styled border never swallows cell content.

use n_term::width::{display_width, spaces, truncate};

use super::border::{BorderGlyph, BorderMask, LineGlyphs, paint_run};
use super::options::TableOptions;

pub(crate) struct Frame<'a> {
    out: String,
    options: &'a TableOptions,
    widths: &'a [usize],
    margin: String,
    padding: String,
    lines: usize,
}

impl<'a> Frame<'a> {
    pub(crate) fn new(options: &'a TableOptions, widths: &'a [usize]) -> Self {
        let row_width = 2 * options.margin + widths.iter().sum::<usize>() + 1;
        Self {
            out: String::with_capacity(row_width * 4),
            options,
            widths,
            margin: spaces(options.margin),
            padding: spaces(options.padding),
            lines: 0,
        }
    }

    fn has(&self, mask: BorderMask) -> bool {
        self.options.border_mask.contains(mask)
    }

    fn border(&mut self, run: &str) {
        paint_run(&mut self.out, self.options.border_style, run);
    }

    fn border_glyph(&mut self, glyph: BorderGlyph) {
        let ch = self.options.border_glyphs.get(glyph);
        self.border(ch.encode_utf8(&mut [0; 4]));
    }

    fn border_fill(&mut self, glyph: BorderGlyph, n: usize) {
        let ch = self.options.border_glyphs.get(glyph);
        let run: String = std::iter::repeat_n(ch, n).collect();
        self.border(&run);
    }

    fn end_line(&mut self) {
        self.out.push_str(&self.margin);
        self.out.push('\n');
        self.lines += 1;
    }

    /// Write one logical row. `cells[c]` holds the rendered lines of column
    /// `c`; shorter cells are filled with blank lines.
    pub(crate) fn row(&mut self, cells: &[Vec<String>]) {
        let height = cells.iter().map(Vec::len).max().unwrap_or(0);
        let last = cells.len().saturating_sub(1);

        for line_num in 0..height {
            self.out.push_str(&self.margin);
            if self.has(BorderMask::LEFT) {
                self.border_glyph(BorderGlyph::Vertical);
                self.out.push_str(&self.padding);
            }

            for (col, lines) in cells.iter().enumerate() {
                let width = self.widths[col];
                match lines.get(line_num) {
                    Some(line) => self.out.push_str(&fit(line, width)),
                    None => self.out.push_str(&spaces(width)),
                }

                if col < last {
                    self.out.push_str(&self.padding);
                    if self.has(BorderMask::COLUMN) {
                        self.border_glyph(BorderGlyph::Vertical);
                        self.out.push_str(&self.padding);
                    }
                }
            }

            if self.has(BorderMask::RIGHT) {
                self.out.push_str(&self.padding);
                self.border_glyph(BorderGlyph::Vertical);
            }
            self.end_line();
        }
    }

    /// Write one horizontal border line.
    pub(crate) fn rule(&mut self, glyphs: LineGlyphs) {
        let padding = self.options.padding;
        let last = self.widths.len().saturating_sub(1);

        self.out.push_str(&self.margin);
        if self.has(BorderMask::LEFT) {
            self.border_glyph(glyphs.left);
            self.border_fill(glyphs.fill, padding);
        }

        for col in 0..self.widths.len() {
            self.border_fill(glyphs.fill, self.widths[col]);
            if col < last {
                self.border_fill(glyphs.fill, padding);
                if self.has(BorderMask::COLUMN) {
                    self.border_glyph(glyphs.junction);
                    self.border_fill(glyphs.fill, padding);
                }
            }
        }

        if self.has(BorderMask::RIGHT) {
            self.border_fill(glyphs.fill, padding);
            self.border_glyph(glyphs.right);
        }
        self.end_line();
    }

    /// The finished frame and its line count.
    pub(crate) fn finish(self) -> (String, usize) {
        (self.out, self.lines)
    }
}

/// Make `line` exactly `width` columns: cut with an ellipsis if too wide,
/// pad with spaces if too narrow.
fn fit(line: &str, width: usize) -> String {
    let w = display_width(line);
    if w > width {
        truncate(line, width)
    } else if w < width {
        format!("{line}{}", spaces(width - w))
    } else {
        line.to_owned()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(cells: &[&[&str]]) -> Vec<Vec<String>> {
        cells
            .iter()
            .map(|c| c.iter().map(|s| (*s).to_owned()).collect())
            .collect()
    }

    #[test]
    fn fit_pads_and_cuts() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("abcd", 4), "abcd");
    }

    #[test]
    fn row_fills_short_cells() {
        let options = TableOptions::default();
        let widths = [6, 3];
        let mut frame = Frame::new(&options, &widths);
        frame.row(&lines(&[&["foo", "barbaz"], &["qux"]]));
        assert_eq!(frame.finish(), ("foo    qux\nbarbaz    \n".to_owned(), 2));
    }

    #[test]
    fn rule_with_margin_and_borders() {
        let options = TableOptions::default()
            .with_margin(1)
            .with_border_mask(BorderMask::ALL);
        let widths = [2, 1];
        let mut frame = Frame::new(&options, &widths);
        frame.rule(LineGlyphs::TOP);
        frame.rule(LineGlyphs::SECTION);
        assert_eq!(
            frame.finish().0,
            " ┌────┬───┐ \n ╞════╪═══╡ \n"
        );
    }
}
