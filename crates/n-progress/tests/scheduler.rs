// SPDX-License-Identifier: MIT
//
// End-to-end tests of the progress scheduler against an in-memory sink.
//
// Every test disables styling for the whole process (nothing here turns it
// back on), so frames contain only text and cursor control sequences.

use std::io::{self, Write};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use n_layout::{BorderMask, TableOptions};
use n_progress::{Column, Progress, ProgressConfig, ProgressError, Task, TextColumn};
use n_term::output::{MemorySink, Sink};
use n_term::style;

const HIDE: &str = "\x1b[?25l";
const SHOW: &str = "\x1b[?25h";
const ORIGIN: &str = "\x1b[1G";

fn start(config: ProgressConfig) -> (Progress, MemorySink) {
    style::set_enabled(false);
    let sink = MemorySink::new();
    let progress = Progress::with_config(config, sink.clone()).unwrap();
    (progress, sink)
}

fn fast() -> ProgressConfig {
    ProgressConfig::default().with_tick_interval(Duration::from_millis(20))
}

// ── Lifecycle ────────────────────────────────────────────────────────

#[test]
fn finished_task_releases_waiter_without_a_tick() {
    let config = ProgressConfig::default().with_tick_interval(Duration::from_secs(3600));
    let (progress, sink) = start(config);

    let began = Instant::now();
    let task = progress.add_task("copy", 10);
    task.advance(10);
    progress.wait().unwrap();

    assert!(began.elapsed() < Duration::from_secs(30));
    assert!(progress.is_stopped());

    let out = sink.contents();
    assert!(out.starts_with(HIDE), "{out:?}");
    assert!(out.ends_with(&format!("{ORIGIN}{SHOW}")), "{out:?}");
    assert!(out.contains("copy"));
    assert!(out.contains("10/10"));
    assert!(out.contains("100%"));
}

#[test]
fn stop_is_idempotent() {
    let (progress, sink) = start(fast());
    let _task = progress.add_task("never started", 5);

    progress.stop();
    progress.stop();
    progress.wait().unwrap();
    progress.stop();

    assert!(progress.is_stopped());
    let out = sink.contents();
    assert_eq!(out.matches(SHOW).count(), 1);
    assert!(!out.contains("never started"));
}

#[test]
fn tasks_added_after_stop_are_not_shown() {
    let (progress, sink) = start(fast());
    progress.stop();
    progress.wait().unwrap();

    let late = progress.add_task("late", 3);
    late.advance(3);
    assert!(late.is_finished());
    assert!(late.is_attached());
    assert!(!sink.contents().contains("late"));
}

#[test]
fn drop_restores_the_cursor() {
    let sink = {
        let (progress, sink) = start(fast());
        progress.add_task("dropped", 100).advance(1);
        sink
    };
    assert!(sink.contents().ends_with(SHOW));
}

#[test]
fn waiting_from_many_threads() {
    let (progress, _sink) = start(fast());
    let progress = Arc::new(progress);
    let task = progress.add_task("shared", 3);

    let waiters: Vec<_> = (0..4)
        .map(|_| {
            let progress = Arc::clone(&progress);
            thread::spawn(move || progress.wait())
        })
        .collect();

    task.advance(3);
    for w in waiters {
        w.join().unwrap().unwrap();
    }
}

// ── Rows ─────────────────────────────────────────────────────────────

#[test]
fn unstarted_tasks_get_no_row() {
    let (progress, sink) = start(fast());
    let alpha = progress.add_task("alpha", 1);
    let _beta = progress.add_task("beta", 1);

    alpha.advance(1);
    thread::sleep(Duration::from_millis(100));
    progress.stop();
    progress.wait().unwrap();

    let out = sink.contents();
    assert!(out.contains("alpha"));
    assert!(!out.contains("beta"));
}

#[test]
fn later_frames_overwrite_earlier_ones() {
    let (progress, sink) = start(fast());
    let task = progress.add_task("steps", 2);

    task.advance(1);
    thread::sleep(Duration::from_millis(100));
    task.advance(1);
    progress.wait().unwrap();

    let out = sink.contents();
    // One-row frames: every repaint after the first moves up one line.
    assert!(out.contains(&format!("{ORIGIN}\x1b[1A")), "{out:?}");
    assert!(out.contains("1/2"));
    assert!(out.contains("2/2"));
}

#[test]
fn shrinking_frame_erases_leftovers() {
    let columns: Vec<Arc<dyn Column>> = vec![Arc::new(TextColumn::from_fn(|task: &Task| {
        if task.is_finished() {
            "done".to_owned()
        } else {
            "two\nlines".to_owned()
        }
    }))];
    let (progress, sink) = start(fast().with_columns(columns));
    let task = progress.add_task("t", 1);

    task.start();
    thread::sleep(Duration::from_millis(100));
    task.advance(1);
    progress.wait().unwrap();

    let out = sink.contents();
    assert!(out.contains("\x1b[2A"), "{out:?}");
    assert!(out.contains("done\n\x1b[J"), "{out:?}");
}

#[test]
fn custom_columns_render_in_order() {
    let columns: Vec<Arc<dyn Column>> = vec![
        Arc::new(TextColumn::fixed("[")),
        Arc::new(TextColumn::description()),
        Arc::new(TextColumn::fixed("]")),
    ];
    let (progress, sink) = start(fast().with_columns(columns));
    progress.add_task("job", 1).advance(1);
    progress.wait().unwrap();

    assert!(sink.contents().contains("[ job ]\n"));
}

#[test]
fn table_options_shape_the_frame() {
    let columns: Vec<Arc<dyn Column>> = vec![Arc::new(TextColumn::description())];
    let config = fast()
        .with_columns(columns)
        .with_table(TableOptions::default().with_border_mask(BorderMask::ALL).with_max_width(20));
    let (progress, sink) = start(config);
    progress.add_task("boxed", 1).advance(1);
    progress.wait().unwrap();

    let out = sink.contents();
    assert!(out.contains("┌───────┐\n│ boxed │\n└───────┘\n"), "{out:?}");
}

// ── Concurrency ──────────────────────────────────────────────────────

#[test]
fn concurrent_advancers_finish_the_display() {
    let (progress, _sink) = start(fast());
    let task = progress.add_task("parallel", 8 * 250);

    thread::scope(|s| {
        for _ in 0..8 {
            let task = Arc::clone(&task);
            s.spawn(move || {
                for _ in 0..250 {
                    task.advance(1);
                }
            });
        }
    });

    progress.wait().unwrap();
    assert_eq!(task.completed(), 2000);
}

#[test]
fn display_waits_for_every_task() {
    let (progress, _sink) = start(fast());
    let first = progress.add_task("first", 1);
    let second = progress.add_task("second", 1);

    first.advance(1);
    thread::sleep(Duration::from_millis(100));
    assert!(!progress.is_stopped());

    second.advance(1);
    progress.wait().unwrap();
    assert!(progress.is_stopped());
}

// ── Errors ───────────────────────────────────────────────────────────

struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Sink for BrokenSink {}

#[test]
fn write_failure_is_reported_to_waiters() {
    style::set_enabled(false);
    let progress = Progress::with_config(fast(), BrokenSink).unwrap();

    let err = progress.wait().unwrap_err();
    assert!(matches!(err, ProgressError::Render(_)));
    assert_eq!(err.io_error().kind(), io::ErrorKind::BrokenPipe);
    assert!(progress.is_stopped());
}
