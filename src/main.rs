// SPDX-License-Identifier: MIT
//
// n-console — a demo of styled tables and live progress.
//
// This binary wires the crates together:
//
//   n-term     → ANSI styling, markup, display width, output sinks
//   n-layout   → measured renderables, width negotiation, tables
//   n-progress → tasks and the live progress scheduler
//
// Two subcommands:
//
//   n-console table     print a handful of tables in different styles
//   n-console progress  drive several concurrent tasks to completion
//
// Logs go to stderr so they never interleave with the frames on stdout.
// Set N_CONSOLE_LOG (e.g. `N_CONSOLE_LOG=n_progress=debug`) to see them.

use std::env;
use std::io::{self, Write};
use std::process;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use n_layout::{Alignment, Bar, BorderGlyphs, BorderMask, Cell, Table, TableOptions, Text};
use n_progress::{BarColumn, Column, Progress, ProgressConfig, TextColumn};
use n_term::color::Color;
use n_term::markup;
use n_term::output::Sink;
use n_term::style::Style;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: n-console <table|progress>";

// ─── Tables ─────────────────────────────────────────────────────────────────

/// The tables shown by `n-console table`, each with a caption.
fn demo_tables() -> Vec<(&'static str, Table)> {
    let mut tables = Vec::new();

    let mut plain = Table::new(TableOptions::default().with_padding(2));
    plain
        .add_row(["crate", "role"])
        .add_row(["n-term", "escape codes, styles, widths"])
        .add_row(["n-layout", "renderables and tables"])
        .add_row(["n-progress", "live task display"]);
    tables.push(("plain, padding 2", plain));

    let mut boxed = Table::new(
        TableOptions::default()
            .with_border_mask(BorderMask::ALL ^ BorderMask::ROW)
            .with_border_style(Style::with_fg(Color::BRIGHT_BLACK))
            .with_column_alignments([Alignment::Left, Alignment::Right, Alignment::Center]),
    );
    boxed
        .add_header([
            Text::new("planet").styled(Style::bold()),
            Text::new("moons").styled(Style::bold()),
            Text::new("rings").styled(Style::bold()),
        ])
        .add_row(["Mercury", "0", "no"])
        .add_row(["Jupiter", "95", "yes"])
        .add_row(["Saturn", "146", "yes"])
        .add_footer(["total", "241", ""]);
    tables.push(("boxed with header and footer", boxed));

    let mut ascii = Table::new(
        TableOptions::default()
            .with_border_mask(BorderMask::ALL)
            .with_border_glyphs(BorderGlyphs::ASCII)
            .with_margin(2),
    );
    ascii
        .add_row(["build", "ok"])
        .add_row(["test", "ok"])
        .add_row(["deploy", "pending"]);
    tables.push(("ascii glyphs, margin 2", ascii));

    let mut wrapped = Table::new(
        TableOptions::default()
            .with_border_mask(BorderMask::ALL_VERTICAL | BorderMask::TOP | BorderMask::BOTTOM)
            .with_column_word_wrap([false, true])
            .with_max_width(48),
    );
    wrapped
        .add_row([
            "wrap",
            "Long cells wrap at word boundaries when the column is narrower than the text.",
        ])
        .add_row([
            Cell::from("cut"),
            Text::new("Renderable cells keep their own settings, so this one is cut short.").into(),
        ]);
    tables.push(("48 columns, plain cells in the second column wrap", wrapped));

    let mut bars = Table::new(TableOptions::default().with_max_width(60));
    for (name, percent) in [("fetch", 100.0), ("unpack", 62.5), ("link", 12.0)] {
        bars.add_row([
            Cell::from(Text::new(name).aligned(Alignment::Right)),
            Bar::new(percent).into(),
            format!("{percent:5.1}%").into(),
        ]);
    }
    tables.push(("bars share the leftover width", bars));

    tables
}

fn run_table(out: &mut (impl Sink + ?Sized)) -> io::Result<()> {
    for (caption, table) in demo_tables() {
        writeln!(out, "{}", markup::expand(&format!("{{bold}}{caption}{{reset}}")))?;
        table.render(out)?;
        writeln!(out)?;
    }
    out.flush()
}

// ─── Progress ───────────────────────────────────────────────────────────────

fn progress_config() -> ProgressConfig {
    let columns: Vec<Arc<dyn Column>> = vec![
        Arc::new(TextColumn::description()),
        Arc::new(BarColumn::new().max_width(40)),
        Arc::new(TextColumn::progress()),
        Arc::new(TextColumn::percentage()),
        Arc::new(TextColumn::eta()),
    ];
    ProgressConfig::default()
        .with_tick_interval(Duration::from_millis(100))
        .with_columns(columns)
}

fn run_progress() -> Result<(), n_progress::ProgressError> {
    let progress = Progress::with_config(progress_config(), io::stdout())?;

    let jobs = [("download", 300_u64, 7_u64), ("compile", 120, 25), ("index", 80, 40)];
    let workers: Vec<_> = jobs
        .iter()
        .map(|&(name, total, delay_ms)| {
            let task = progress.add_task(name, total);
            thread::spawn(move || {
                task.start();
                for _ in 0..total {
                    thread::sleep(Duration::from_millis(delay_ms));
                    task.advance(1);
                }
            })
        })
        .collect();

    // Byte-counted copy: every written chunk advances the task.
    let copy = progress.add_task("copy", 64 * 1024);
    let copier = thread::spawn(move || -> io::Result<u64> {
        let mut writer = copy.writer(io::sink());
        let chunk = [0u8; 1024];
        for _ in 0..64 {
            thread::sleep(Duration::from_millis(30));
            writer.write_all(&chunk)?;
        }
        Ok(writer.task().completed())
    });

    progress.wait()?;

    for worker in workers {
        let _ = worker.join();
    }
    match copier.join() {
        Ok(Ok(bytes)) => tracing::debug!(bytes, "copy finished"),
        Ok(Err(err)) => tracing::warn!(error = %err, "copy failed"),
        Err(_) => tracing::warn!("copy thread panicked"),
    }
    Ok(())
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("N_CONSOLE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let result = match args.get(1).map(String::as_str) {
        Some("table") => run_table(&mut io::stdout()).map_err(|e| e.to_string()),
        Some("progress") => run_progress().map_err(|e| e.to_string()),
        _ => {
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("n-console: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
