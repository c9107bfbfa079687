// SPDX-License-Identifier: MIT
//
// n-term — terminal primitives for n-console.
//
// The bottom layer of the toolkit. It knows how to talk to a terminal and
// nothing about tables or progress: ANSI escape sequences, colors and
// styles, inline style markup, display-width arithmetic that ignores
// escape codes and respects wide glyphs, and the `Sink` abstraction that
// lets a renderer ask the output how wide it is.
//
// Styling is a process-wide switch that defaults to "on iff stdout is a
// color-capable terminal", so everything above this crate can paint
// unconditionally and still produce clean text when piped.

pub mod ansi;
pub mod color;
pub mod markup;
pub mod output;
pub mod style;
pub mod terminal;
pub mod width;
