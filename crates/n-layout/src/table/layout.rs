// SPDX-License-Identifier: MIT
//
// Column-width negotiation.
//
// Every column arrives with a `Measurement` (the component-wise max over
// its cells) and the table has a width budget left after margins, padding,
// and borders. The negotiation picks one of three tiers:
//
//   Comfortable  Σ max ≤ budget
//                Every column gets its maximum.
//
//   Shrink       Σ min ≤ budget < Σ max
//                Columns whose maximum fits the fair share (remaining
//                budget / unresolved columns) get their maximum up front,
//                which can only raise the share for the rest. The others
//                are then resolved left to right with the current fair
//                share, never below their minimum and never so much that a
//                later column could not reach its own minimum.
//
//   Truncate     budget < Σ min
//                Same shape, but columns whose *minimum* fits the share are
//                granted exactly that minimum, and the rest split what
//                remains evenly, left to right. Cells cut below their
//                natural width end in an ellipsis at render time.
//
// All arithmetic is on display widths; the result never sums past the
// budget.

use crate::measure::Measurement;

/// Which tier a negotiation used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Comfortable,
    Shrink,
    Truncate,
}

/// Decide which tier applies to `columns` under `budget`.
#[must_use]
pub fn tier(columns: &[Measurement], budget: usize) -> Tier {
    let total: Measurement = columns.iter().copied().sum();
    if total.maximum() <= budget {
        Tier::Comfortable
    } else if total.minimum() <= budget {
        Tier::Shrink
    } else {
        Tier::Truncate
    }
}

/// Distribute `budget` columns of width across `columns`.
///
/// ```
/// use n_layout::Measurement;
/// use n_layout::table::layout::negotiate;
///
/// let cols = [Measurement::new(3, 10); 3];
/// assert_eq!(negotiate(&cols, 18), vec![6, 6, 6]);
/// ```
#[must_use]
pub fn negotiate(columns: &[Measurement], budget: usize) -> Vec<usize> {
    match tier(columns, budget) {
        Tier::Comfortable => columns.iter().map(Measurement::maximum).collect(),
        Tier::Shrink => shrink(columns, budget),
        Tier::Truncate => truncate(columns, budget),
    }
}

/// Negotiation state shared by the two lossy tiers.
struct Allocation {
    widths: Vec<Option<usize>>,
    remaining: usize,
    unresolved: usize,
}

impl Allocation {
    fn new(columns: usize, budget: usize) -> Self {
        Self {
            widths: vec![None; columns],
            remaining: budget,
            unresolved: columns,
        }
    }

    fn share(&self) -> usize {
        self.remaining.checked_div(self.unresolved).unwrap_or(0)
    }

    fn grant(&mut self, col: usize, width: usize) {
        self.widths[col] = Some(width);
        self.remaining -= width;
        self.unresolved -= 1;
    }

    fn finish(self) -> Vec<usize> {
        self.widths.into_iter().map(Option::unwrap_or_default).collect()
    }
}

fn shrink(columns: &[Measurement], budget: usize) -> Vec<usize> {
    let mut alloc = Allocation::new(columns.len(), budget);
    // Sum of the minimums of unresolved columns. The remaining budget never
    // drops below it.
    let mut reserved: usize = columns.iter().map(Measurement::minimum).sum();

    // Grant small columns their maximum while that frees room for others.
    loop {
        let share = alloc.share();
        let mut granted = false;
        for (i, m) in columns.iter().enumerate() {
            if alloc.widths[i].is_some() || m.maximum() > share {
                continue;
            }
            let others = reserved - m.minimum();
            if alloc.remaining - m.maximum() >= others {
                alloc.grant(i, m.maximum());
                reserved = others;
                granted = true;
            }
        }
        if !granted {
            break;
        }
    }

    for (i, m) in columns.iter().enumerate() {
        if alloc.widths[i].is_some() {
            continue;
        }
        reserved -= m.minimum();
        let width = alloc
            .share()
            .min(alloc.remaining - reserved)
            .max(m.minimum())
            .min(m.maximum())
            .min(alloc.remaining);
        alloc.grant(i, width);
    }

    alloc.finish()
}

fn truncate(columns: &[Measurement], budget: usize) -> Vec<usize> {
    let mut alloc = Allocation::new(columns.len(), budget);

    // Columns that fit at their minimum take only that.
    loop {
        let share = alloc.share();
        let mut granted = false;
        for (i, m) in columns.iter().enumerate() {
            if alloc.widths[i].is_none() && m.minimum() <= share {
                alloc.grant(i, m.minimum());
                granted = true;
            }
        }
        if !granted {
            break;
        }
    }

    for i in 0..columns.len() {
        if alloc.widths[i].is_none() {
            let width = alloc.share();
            alloc.grant(i, width);
        }
    }

    alloc.finish()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
