// SPDX-License-Identifier: MIT
//
// n-progress — live, multi-task progress display.
//
// A `Progress` owns one background thread that is the only writer to its
// output. Callers register `Task`s and advance them from any thread; every
// advance nudges the scheduler, which also repaints on a fixed tick. Each
// repaint turns every started task into one table row (one cell per
// `Column`), renders the table, and overwrites the previous frame in place.
//
// The display ends when every registered task is finished or when
// `Progress::stop` is called, whichever comes first. Either way the cursor
// is restored and `Progress::wait` returns.

#![allow(clippy::cast_precision_loss)]

pub mod column;
pub mod error;
pub mod io;
pub mod progress;
pub mod task;

pub use column::{BarColumn, Column, TextColumn, default_columns};
pub use error::ProgressError;
pub use io::{ProgressReader, ProgressWriter};
pub use progress::{Progress, ProgressConfig};
pub use task::Task;
