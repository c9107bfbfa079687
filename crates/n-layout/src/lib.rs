// SPDX-License-Identifier: MIT
//
// n-layout — measured, width-negotiated console layout.
//
// Everything in this crate is a `Renderable`: it can report the range of
// widths it would like (`measure`) and produce a block of text that fits an
// exact width (`render`). `Text` and `Bar` are the leaf renderables; `Table`
// composes them into rows and columns, negotiates a width for every column
// against the available budget, and draws optional box borders.
//
// Nothing here touches the terminal. Tables write their finished frame to
// any `n_term::output::Sink`, asking it for a width when none is configured.

pub mod bar;
pub mod measure;
pub mod renderable;
pub mod table;
pub mod text;

pub use bar::{Bar, BarStyle};
pub use measure::Measurement;
pub use renderable::Renderable;
pub use table::{BorderGlyphs, BorderMask, Cell, Table, TableOptions};
pub use text::{Alignment, Text};

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Mutex, MutexGuard, PoisonError};

    /// Serialises tests that flip the process-wide styling flag.
    static STYLE: Mutex<()> = Mutex::new(());

    pub(crate) fn style_lock() -> MutexGuard<'static, ()> {
        STYLE.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
