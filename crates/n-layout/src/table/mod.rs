// SPDX-License-Identifier: MIT
//
// Table — rows and columns of renderables with negotiated widths.
//
// Rows are stored in insertion order, grouped into three sections that
// must arrive in order: header rows, body rows, footer rows. Columns are
// not stored; they are a view over the rows by cell index, built when the
// table renders.
//
// Rendering a table:
//
//   1. subtract margins, padding, and vertical borders from the width to
//      get the budget
//   2. measure every column at the full budget (component-wise max of its
//      cells' measurements)
//   3. negotiate a width per column (see `layout`)
//   4. render every cell at its column's width and assemble the frame
//      (see `render`)
//
// Plain cells (strings, numbers) become `Text` at render time using the
// column's alignment, style, and word-wrap settings. Cells that are already
// renderable are used as they are and ignore those settings.

pub mod border;
pub mod layout;
pub mod options;
mod render;

use std::fmt;
use std::io;
use std::sync::Arc;

use n_term::output::Sink;
use n_term::width::split_lines;

pub use border::{BorderGlyph, BorderGlyphs, BorderMask};
pub use options::TableOptions;

use crate::bar::Bar;
use crate::measure::Measurement;
use crate::renderable::Renderable;
use crate::text::Text;
use border::LineGlyphs;
use render::Frame;

// ─── Cell ────────────────────────────────────────────────────────────────────

/// The content of one table cell.
pub enum Cell {
    /// Text that takes the column's alignment, style, and word wrap.
    Plain(String),
    /// A renderable used as is.
    Renderable(Box<dyn Renderable>),
}

impl Cell {
    fn as_text(text: &str, col: usize, options: &TableOptions) -> Text {
        Text::new(text)
            .aligned(options.alignment_for(col))
            .styled(options.style_for(col))
            .wrapped(options.word_wrap_for(col))
    }

    fn measure(&self, col: usize, options: &TableOptions, max_width: usize) -> Measurement {
        match self {
            Self::Plain(s) => Self::as_text(s, col, options).measure(max_width),
            Self::Renderable(r) => r.measure(max_width),
        }
    }

    fn render(&self, col: usize, options: &TableOptions, width: usize) -> String {
        match self {
            Self::Plain(s) => Self::as_text(s, col, options).render(width),
            Self::Renderable(r) => r.render(width),
        }
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(s) => f.debug_tuple("Plain").field(s).finish(),
            Self::Renderable(_) => f.write_str("Renderable(..)"),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Plain(s.to_owned())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::Plain(s)
    }
}

impl From<&String> for Cell {
    fn from(s: &String) -> Self {
        Self::Plain(s.clone())
    }
}

macro_rules! plain_cell_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Cell {
                fn from(v: $t) -> Self {
                    Self::Plain(v.to_string())
                }
            }
        )*
    };
}

plain_cell_from!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char);

impl From<Text> for Cell {
    fn from(t: Text) -> Self {
        Self::Renderable(Box::new(t))
    }
}

impl From<Bar> for Cell {
    fn from(b: Bar) -> Self {
        Self::Renderable(Box::new(b))
    }
}

impl From<Box<dyn Renderable>> for Cell {
    fn from(r: Box<dyn Renderable>) -> Self {
        Self::Renderable(r)
    }
}

impl From<Arc<dyn Renderable>> for Cell {
    fn from(r: Arc<dyn Renderable>) -> Self {
        Self::Renderable(Box::new(r))
    }
}

// ─── Rows ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Body,
    Footer,
}

#[derive(Debug)]
struct Row {
    section: Section,
    cells: Vec<Cell>,
}

/// The border line drawn between two adjacent rows, if any.
///
/// Header rows are followed and footer rows preceded by a section line.
/// Where no section line is configured, a row line is used instead.
fn separator(mask: BorderMask, current: Section, next: Section) -> Option<LineGlyphs> {
    let section = current == Section::Header || next == Section::Footer;
    if section && mask.contains(BorderMask::SECTION) {
        Some(LineGlyphs::SECTION)
    } else if mask.contains(BorderMask::ROW) {
        Some(LineGlyphs::ROW)
    } else {
        None
    }
}

// ─── Table ───────────────────────────────────────────────────────────────────

/// A table of cells laid out in aligned columns.
///
/// ```
/// use n_layout::{Table, TableOptions};
///
/// let mut table = Table::new(TableOptions::default().with_padding(2));
/// table.add_row(["foo", "bar"]).add_row(["bazqux", "1"]);
/// assert_eq!(table.render_to_string(80), "foo     bar\nbazqux  1  \n");
/// ```
#[derive(Debug, Default)]
pub struct Table {
    options: TableOptions,
    rows: Vec<Row>,
}

impl Table {
    /// An empty table with `options`.
    #[must_use]
    pub const fn new(options: TableOptions) -> Self {
        Self {
            options,
            rows: Vec::new(),
        }
    }

    /// The table's options.
    #[must_use]
    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Mutable access to the options. Changes apply to the next render.
    pub const fn options_mut(&mut self) -> &mut TableOptions {
        &mut self.options
    }

    /// Number of rows in all sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns, fixed by the first row added.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, |r| r.cells.len())
    }

    /// Append a header row.
    ///
    /// # Panics
    ///
    /// Panics if body or footer rows were already added, or if the cell
    /// count differs from earlier rows.
    pub fn add_header<I>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Cell>,
    {
        self.push(Section::Header, cells)
    }

    /// Append a body row.
    ///
    /// # Panics
    ///
    /// Panics if footer rows were already added, or if the cell count
    /// differs from earlier rows.
    pub fn add_row<I>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Cell>,
    {
        self.push(Section::Body, cells)
    }

    /// Append a footer row.
    ///
    /// # Panics
    ///
    /// Panics if the cell count differs from earlier rows.
    pub fn add_footer<I>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Cell>,
    {
        self.push(Section::Footer, cells)
    }

    fn push<I>(&mut self, section: Section, cells: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Cell>,
    {
        let cells: Vec<Cell> = cells.into_iter().map(Into::into).collect();

        if let Some(first) = self.rows.first() {
            assert!(
                first.cells.len() == cells.len(),
                "expected {} columns, got {}",
                first.cells.len(),
                cells.len()
            );
        }
        let last = self.rows.last().map(|r| r.section);
        match section {
            Section::Header => assert!(
                last.is_none_or(|s| s == Section::Header),
                "header rows must be added before body and footer rows"
            ),
            Section::Body => assert!(
                last != Some(Section::Footer),
                "body rows cannot be added after footer rows"
            ),
            Section::Footer => {}
        }

        self.rows.push(Row { section, cells });
        self
    }

    /// Remove all rows, keeping the options.
    pub fn reset(&mut self) {
        self.rows.clear();
    }

    /// Render the table to `out` and return the number of lines written.
    ///
    /// The width is `options.max_width` if set, otherwise the sink's
    /// terminal width, otherwise 80. An empty table writes nothing.
    ///
    /// # Errors
    ///
    /// Returns any error from writing to or flushing `out`.
    pub fn render<S: Sink + ?Sized>(&self, out: &mut S) -> io::Result<usize> {
        let max_width = self.options.max_width.unwrap_or_else(|| out.width());
        let (frame, lines) = self.build(max_width);
        if lines > 0 {
            out.write_all(frame.as_bytes())?;
            out.flush()?;
        }
        Ok(lines)
    }

    /// Render the table into a string, `max_width` columns wide unless the
    /// options set a width.
    #[must_use]
    pub fn render_to_string(&self, max_width: usize) -> String {
        self.build(self.options.max_width.unwrap_or(max_width)).0
    }

    fn build(&self, max_width: usize) -> (String, usize) {
        let columns = self.column_count();
        if columns == 0 {
            return (String::new(), 0);
        }

        let o = &self.options;
        let fixed = 2 * o.margin
            + o.padding * (columns - 1)
            + border::vertical_extra(o.border_mask, columns, o.padding);
        let budget = max_width.saturating_sub(fixed);

        let measures: Vec<Measurement> = (0..columns)
            .map(|col| {
                self.rows
                    .iter()
                    .map(|row| row.cells[col].measure(col, o, budget))
                    .fold(Measurement::ZERO, Measurement::union)
            })
            .collect();
        let widths = layout::negotiate(&measures, budget);
        tracing::trace!(
            columns,
            budget,
            tier = ?layout::tier(&measures, budget),
            ?widths,
            "negotiated column widths"
        );

        let mask = o.border_mask;
        let mut frame = Frame::new(o, &widths);
        if mask.contains(BorderMask::TOP) {
            frame.rule(LineGlyphs::TOP);
        }

        for (i, row) in self.rows.iter().enumerate() {
            let cells: Vec<Vec<String>> = row
                .cells
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let rendered = cell.render(col, o, widths[col]);
                    split_lines(&rendered).into_iter().map(str::to_owned).collect()
                })
                .collect();
            frame.row(&cells);

            match self.rows.get(i + 1) {
                Some(next) => {
                    if let Some(glyphs) = separator(mask, row.section, next.section) {
                        frame.rule(glyphs);
                    }
                }
                None if mask.contains(BorderMask::BOTTOM) => frame.rule(LineGlyphs::BOTTOM),
                None => {}
            }
        }

        frame.finish()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
