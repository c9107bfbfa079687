// SPDX-License-Identifier: MIT
//
// Columns — how a task turns into the cells of its row.
//
// A `Column` maps a task to a renderable. The list of columns in a
// `ProgressConfig` fixes both the number of cells per row and their order.
// Columns are stateless with respect to the task they render, so one
// instance serves every row.
//
// `TextColumn` covers every textual column (static text or text derived
// from the task), `BarColumn` draws a progress bar. Any closure from
// `&Task` to a boxed renderable is a column too.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use n_layout::{Alignment, Bar, BarStyle, Renderable, Text};
use n_term::color::Color;
use n_term::style::Style;

use crate::task::Task;

/// Renders one cell of a task's row.
pub trait Column: Send + Sync {
    fn render(&self, task: &Task) -> Box<dyn Renderable>;
}

impl<F> Column for F
where
    F: Fn(&Task) -> Box<dyn Renderable> + Send + Sync,
{
    fn render(&self, task: &Task) -> Box<dyn Renderable> {
        self(task)
    }
}

/// The columns a progress display uses unless configured otherwise:
/// description, bar, `completed/total`, and percentage.
#[must_use]
pub fn default_columns() -> Vec<Arc<dyn Column>> {
    let columns: [Arc<dyn Column>; 4] = [
        Arc::new(TextColumn::description()),
        Arc::new(BarColumn::new()),
        Arc::new(TextColumn::progress()),
        Arc::new(TextColumn::percentage()),
    ];
    columns.into()
}

// ─── TextColumn ──────────────────────────────────────────────────────────────

type TextFn = dyn Fn(&Task) -> String + Send + Sync;

#[derive(Clone)]
enum Source {
    Static(String),
    Task(Arc<TextFn>),
}

/// A column of text, either fixed or computed from the task.
#[derive(Clone)]
pub struct TextColumn {
    source: Source,
    alignment: Alignment,
    style: Style,
    word_wrap: bool,
}

impl fmt::Debug for TextColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            Source::Static(text) => text.as_str(),
            Source::Task(_) => "<fn>",
        };
        f.debug_struct("TextColumn")
            .field("source", &source)
            .field("alignment", &self.alignment)
            .field("style", &self.style)
            .field("word_wrap", &self.word_wrap)
            .finish()
    }
}

impl TextColumn {
    /// The same text in every row.
    #[must_use]
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::with_source(Source::Static(text.into()))
    }

    /// Text computed from each task.
    #[must_use]
    pub fn from_fn(f: impl Fn(&Task) -> String + Send + Sync + 'static) -> Self {
        Self::with_source(Source::Task(Arc::new(f)))
    }

    const fn with_source(source: Source) -> Self {
        Self {
            source,
            alignment: Alignment::Left,
            style: Style::new(),
            word_wrap: false,
        }
    }

    #[must_use]
    pub const fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub const fn styled(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub const fn wrapped(mut self, word_wrap: bool) -> Self {
        self.word_wrap = word_wrap;
        self
    }

    /// The unstyled text this column shows for `task`.
    #[must_use]
    pub fn text(&self, task: &Task) -> String {
        match &self.source {
            Source::Static(text) => text.clone(),
            Source::Task(f) => f(task),
        }
    }

    // ─── Catalogue ───────────────────────────────────────────────────────

    /// The task description, bold and right-aligned.
    #[must_use]
    pub fn description() -> Self {
        Self::from_fn(|task| task.description().to_owned())
            .styled(Style::bold())
            .aligned(Alignment::Right)
    }

    /// `completed/total` in cyan, the completed count padded to the width
    /// of the total so the column does not jitter.
    #[must_use]
    pub fn progress() -> Self {
        Self::from_fn(|task| {
            let total = task.total();
            let digits = total.to_string().len();
            format!("{:>digits$}/{total}", task.completed())
        })
        .styled(Style::with_fg(Color::CYAN))
        .aligned(Alignment::Right)
    }

    /// Completion percentage, e.g. ` 42%`.
    #[must_use]
    pub fn percentage() -> Self {
        Self::from_fn(|task| format!("{:3.0}%", task.percent_completed())).aligned(Alignment::Right)
    }

    /// Estimated time remaining in green, `-` while unknown.
    #[must_use]
    pub fn eta() -> Self {
        Self::from_fn(|task| {
            task.estimated()
                .map_or_else(|| "-".to_owned(), |eta| format!("{} ETA", format_duration(eta)))
        })
        .styled(Style::with_fg(Color::GREEN))
        .aligned(Alignment::Right)
    }

    /// Time since the task started.
    #[must_use]
    pub fn elapsed() -> Self {
        Self::from_fn(|task| format_duration(task.elapsed())).aligned(Alignment::Right)
    }
}

impl Column for TextColumn {
    fn render(&self, task: &Task) -> Box<dyn Renderable> {
        Box::new(
            Text::new(self.text(task))
                .aligned(self.alignment)
                .styled(self.style)
                .wrapped(self.word_wrap),
        )
    }
}

// ─── BarColumn ───────────────────────────────────────────────────────────────

/// A progress bar that takes as much width as the other columns leave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarColumn {
    pub max_width: Option<usize>,
    pub remaining: BarStyle,
    pub completed: BarStyle,
    pub finished: BarStyle,
}

impl BarColumn {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_width: None,
            remaining: BarStyle::default_remaining(),
            completed: BarStyle::default_completed(),
            finished: BarStyle::default_finished(),
        }
    }

    /// Cap the bar's width.
    #[must_use]
    pub const fn max_width(mut self, max_width: usize) -> Self {
        self.max_width = Some(max_width);
        self
    }

    fn bar(&self, task: &Task) -> Bar {
        let bar = Bar::new(task.percent_completed()).styles(self.remaining, self.completed, self.finished);
        match self.max_width {
            Some(cap) => bar.max_width(cap),
            None => bar,
        }
    }
}

impl Default for BarColumn {
    fn default() -> Self {
        Self::new()
    }
}

impl Column for BarColumn {
    fn render(&self, task: &Task) -> Box<dyn Renderable> {
        Box::new(self.bar(task))
    }
}

// ─── Durations ───────────────────────────────────────────────────────────────

/// Format a duration in its largest whole unit: `0s`, `12s`, `5m`, `2h`.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if d < Duration::from_secs(1) {
        "0s".to_owned()
    } else if d < Duration::from_secs(60) {
        format!("{secs:.0}s")
    } else if d < Duration::from_secs(3600) {
        format!("{:.0}m", secs / 60.0)
    } else {
        format!("{:.0}h", secs / 3600.0)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
