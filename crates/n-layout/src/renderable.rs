// SPDX-License-Identifier: MIT
//
// The Renderable capability.
//
// Anything that can sit in a table cell implements two operations:
//
//   measure(max_width) → the width range it would like, given that it
//                        will never be offered more than `max_width`
//   render(width)      → a block of text, possibly multi-line, whose every
//                        line has a display width of at most `width`
//
// Layout code only ever sees `dyn Renderable`, so callers can drop their
// own widgets into a table next to the built-in `Text` and `Bar`. The trait
// requires `Send + Sync` because progress rows are built on a background
// thread from columns shared with the caller.

use std::sync::Arc;

use crate::measure::Measurement;

/// A value that can measure its width needs and render into a given width.
pub trait Renderable: Send + Sync {
    /// The width range this value wants when at most `max_width` columns
    /// are available.
    fn measure(&self, max_width: usize) -> Measurement;

    /// Render into exactly `width` columns. Lines must not be wider than
    /// `width`; narrower lines are padded by the caller.
    fn render(&self, width: usize) -> String;
}

impl<R: Renderable + ?Sized> Renderable for Box<R> {
    fn measure(&self, max_width: usize) -> Measurement {
        (**self).measure(max_width)
    }

    fn render(&self, width: usize) -> String {
        (**self).render(width)
    }
}

impl<R: Renderable + ?Sized> Renderable for Arc<R> {
    fn measure(&self, max_width: usize) -> Measurement {
        (**self).measure(max_width)
    }

    fn render(&self, width: usize) -> String {
        (**self).render(width)
    }
}

impl<R: Renderable + ?Sized> Renderable for &R {
    fn measure(&self, max_width: usize) -> Measurement {
        (**self).measure(max_width)
    }

    fn render(&self, width: usize) -> String {
        (**self).render(width)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
