// SPDX-License-Identifier: MIT
//
// Inline style markup: `"{bold,red}error{reset}: bad input"`.
//
// Blocks are comma-separated attribute names between braces. Every name in
// a block must be known for the block to be replaced; otherwise the block
// is copied through verbatim, braces included. An empty block `{}` is
// literal text. A `{` that appears before the closing `}` restarts the
// search, so `{{bold}` yields `{` followed by the bold sequence.
//
// Resolving a block (lower-casing, splitting, name lookup, SGR assembly) is
// the expensive part, so resolved sequences are memoised in a process-wide
// concurrent map keyed by the styling flag as well as the block. The map is a
// pure cache: it is cleared wholesale whenever styling is toggled, and a
// resolution that straddles a toggle can only leave an entry under the flag
// it read, which lookups under the other flag never see.

use std::sync::LazyLock;

use dashmap::DashMap;

use crate::ansi;
use crate::color::Color;
use crate::style::{self, Attr};

const BLOCK_START: char = '{';
const BLOCK_END: char = '}';

/// (styling enabled, lower-cased raw block) → resolved escape sequence.
static SEQUENCE_CACHE: LazyLock<DashMap<(bool, String), String>> = LazyLock::new(DashMap::new);

/// Drop every cached sequence. Called when styling is toggled.
pub(crate) fn clear_cache() {
    SEQUENCE_CACHE.clear();
}

/// Number of cached sequences (diagnostics and tests).
#[must_use]
pub fn cache_len() -> usize {
    SEQUENCE_CACHE.len()
}

/// Replace every recognised `{attr,...}` block in `s` with its escape
/// sequence. With styling disabled, recognised blocks become empty.
///
/// ```
/// use n_term::{markup, style};
///
/// let _on = style::enable();
/// assert_eq!(markup::expand("{bold}hi{reset}"), "\x1b[1mhi\x1b[0m");
/// assert_eq!(markup::expand("{nope}"), "{nope}");
/// ```
#[must_use]
pub fn expand(s: &str) -> String {
    if s.len() <= 2 || !s.contains(BLOCK_START) {
        return s.to_owned();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    loop {
        let Some(start) = rest.find(BLOCK_START) else {
            out.push_str(rest);
            break;
        };
        out.push_str(&rest[..start]);
        rest = &rest[start + 1..];

        // Inside a block: find its end, restarting on an earlier `{`.
        loop {
            let Some(end) = rest.find(BLOCK_END) else {
                out.push(BLOCK_START);
                out.push_str(rest);
                return out;
            };
            if let Some(next) = rest.find(BLOCK_START).filter(|&n| n < end) {
                out.push(BLOCK_START);
                out.push_str(&rest[..next]);
                rest = &rest[next + 1..];
                continue;
            }

            let raw = &rest[..end];
            rest = &rest[end + 1..];

            match resolve(raw) {
                Some(sequence) => out.push_str(&sequence),
                None => {
                    out.push(BLOCK_START);
                    out.push_str(raw);
                    out.push(BLOCK_END);
                }
            }
            break;
        }
    }

    out
}

/// Resolve a raw block body to its escape sequence, consulting the cache.
fn resolve(raw: &str) -> Option<String> {
    resolve_with(raw, style::enabled())
}

/// Resolve under an explicit styling flag. The flag is read once, so the
/// cached entry always matches the sequence that was built.
fn resolve_with(raw: &str, enabled: bool) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    let key = (enabled, raw.to_lowercase());
    if let Some(hit) = SEQUENCE_CACHE.get(&key) {
        return Some(hit.clone());
    }

    let mut params = String::new();
    for name in key.1.split(',') {
        let name = name.trim();
        let code = param_for(name)?;
        if !params.is_empty() {
            params.push(';');
        }
        params.push_str(&code);
    }

    let sequence = if enabled {
        ansi::sgr_string(&params)
    } else {
        String::new()
    };
    SEQUENCE_CACHE.insert(key, sequence.clone());
    Some(sequence)
}

/// SGR parameter text for a single markup name.
fn param_for(name: &str) -> Option<String> {
    if name == "reset" {
        return Some("0".to_owned());
    }
    if let Some(attr) = Attr::from_markup_name(name) {
        return Some(style::Style::new().attrs(attr).params());
    }
    if let Some(color) = name.strip_prefix("bg").and_then(Color::from_name) {
        let mut out = String::new();
        color.push_bg_params(&mut out);
        return Some(out);
    }
    let mut out = String::new();
    Color::from_name(name)?.push_fg_params(&mut out);
    Some(out)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
