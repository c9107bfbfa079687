// SPDX-License-Identifier: MIT
//
// Progress — the scheduler that keeps a live task table on screen.
//
// One background thread owns the output sink, the task list, and the
// height of the last frame. Everything else talks to it over a channel:
//
//   Register(task) ── add_task()       append to the task list
//   Notify         ── Task::advance()  repaint now
//   Stop           ── stop()           leave the loop
//
// Between events the thread blocks in `recv_timeout` until the next tick
// (default once per second), so an idle display repaints at the tick rate
// and costs nothing in between.
//
// # Coalesced notifications
//
// Advancing a task must never wait for the display. A shared `pending`
// flag guards the notify message: an advance only sends one when no notify
// is already queued, and the thread clears the flag before repainting. A
// burst of advances while a repaint is in flight collapses into a single
// follow-up repaint, which still sees the latest counts.
//
// # Repaint
//
// The cursor goes back to column 0 and up over the previous frame, the new
// frame overwrites it line by line, and when the new frame is shorter the
// rest of the screen below it is erased. The whole sequence is buffered and
// reaches the sink in one write. Tasks that have not started yet get no
// row.
//
// When every registered task is finished after a repaint the loop ends on
// its own. On the way out it moves the cursor back to column 0, shows it
// again, and releases everyone blocked in `wait`.

use std::fmt;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use n_layout::{Cell, Table, TableOptions};
use n_term::ansi;
use n_term::output::{OutputBuffer, Sink};
use tracing::{debug, trace, warn};

use crate::column::{Column, default_columns};
use crate::error::ProgressError;
use crate::task::Task;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Progress display settings.
#[derive(Clone)]
pub struct ProgressConfig {
    /// Time between unprompted repaints. Default: 1 second.
    pub tick_interval: Duration,
    /// The cells of each task row, in order.
    pub columns: Vec<Arc<dyn Column>>,
    /// Layout of the task table.
    pub table: TableOptions,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            columns: default_columns(),
            table: TableOptions::default(),
        }
    }
}

impl fmt::Debug for ProgressConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressConfig")
            .field("tick_interval", &self.tick_interval)
            .field("columns", &self.columns.len())
            .field("table", &self.table)
            .finish()
    }
}

impl ProgressConfig {
    #[must_use]
    pub const fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    #[must_use]
    pub fn with_columns(mut self, columns: Vec<Arc<dyn Column>>) -> Self {
        self.columns = columns;
        self
    }

    #[must_use]
    pub fn with_table(mut self, table: TableOptions) -> Self {
        self.table = table;
        self
    }
}

// ─── Events ──────────────────────────────────────────────────────────────────

enum Event {
    Register(Arc<Task>),
    Notify,
    Stop,
}

/// The handle tasks use to ask for a repaint.
#[derive(Debug, Clone)]
pub(crate) struct Notifier {
    tx: Sender<Event>,
    pending: Arc<AtomicBool>,
}

impl Notifier {
    /// Request a repaint unless one is already queued. Never blocks.
    pub(crate) fn notify(&self) {
        if !self.pending.swap(true, Ordering::AcqRel) {
            // The loop may be gone already; nothing left to repaint then.
            let _ = self.tx.send(Event::Notify);
        }
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register(task) => f.debug_tuple("Register").field(&task.description()).finish(),
            Self::Notify => f.write_str("Notify"),
            Self::Stop => f.write_str("Stop"),
        }
    }
}

// ─── Completion ──────────────────────────────────────────────────────────────

/// The loop's final result, published once for every waiter.
#[derive(Default)]
struct Completion {
    result: Mutex<Option<Result<(), ProgressError>>>,
    done: Condvar,
}

impl Completion {
    fn publish(&self, result: Result<(), ProgressError>) {
        let mut slot = self.result.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(result);
        self.done.notify_all();
    }

    fn wait(&self) -> Result<(), ProgressError> {
        let mut slot = self.result.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if let Some(result) = slot.as_ref() {
                return result.clone();
            }
            slot = self.done.wait(slot).unwrap_or_else(PoisonError::into_inner);
        }
    }
}

// ─── Progress ────────────────────────────────────────────────────────────────

/// A live table of task progress, repainted in place.
///
/// # Example
///
/// ```no_run
/// use n_progress::Progress;
///
/// let progress = Progress::new()?;
/// let task = progress.add_task("download", 1024);
/// for _ in 0..1024 {
///     task.advance(1);
/// }
/// progress.wait()?;
/// # Ok::<(), n_progress::ProgressError>(())
/// ```
pub struct Progress {
    tx: Sender<Event>,
    pending: Arc<AtomicBool>,
    stopped: Arc<AtomicBool>,
    completion: Arc<Completion>,
    handle: Option<JoinHandle<()>>,
}

impl Progress {
    /// Start a progress display on stdout with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError::Spawn`] if the scheduler thread cannot be
    /// started.
    pub fn new() -> Result<Self, ProgressError> {
        Self::with_config(ProgressConfig::default(), io::stdout())
    }

    /// Start a progress display writing to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError::Spawn`] if the scheduler thread cannot be
    /// started.
    pub fn with_config(
        config: ProgressConfig,
        sink: impl Sink + Send + 'static,
    ) -> Result<Self, ProgressError> {
        let (tx, rx) = mpsc::channel();
        let pending = Arc::new(AtomicBool::new(false));
        let stopped = Arc::new(AtomicBool::new(false));
        let completion = Arc::new(Completion::default());

        let tick_interval = config.tick_interval;
        let scheduler = Scheduler {
            renderer: Renderer::new(Box::new(sink), config),
            tasks: Vec::new(),
            tick_interval,
            pending: Arc::clone(&pending),
        };
        let stopped_flag = Arc::clone(&stopped);
        let done = Arc::clone(&completion);

        let handle = thread::Builder::new()
            .name("progress".into())
            .spawn(move || scheduler.run(&rx, &stopped_flag, &done))
            .map_err(ProgressError::spawn)?;

        Ok(Self {
            tx,
            pending,
            stopped,
            completion,
            handle: Some(handle),
        })
    }

    /// Create a task and add it to the display.
    ///
    /// The task only gets a row once it is started. If the display has
    /// already stopped, the task is returned but not shown.
    pub fn add_task(&self, description: impl Into<String>, total: u64) -> Arc<Task> {
        let notifier = Notifier {
            tx: self.tx.clone(),
            pending: Arc::clone(&self.pending),
        };
        let task = Arc::new(Task::attached(description, total, notifier));

        if !self.is_stopped() {
            let _ = self.tx.send(Event::Register(Arc::clone(&task)));
        }
        task
    }

    /// Stop the display. Safe to call any number of times; only the first
    /// call has an effect.
    pub fn stop(&self) {
        if self
            .stopped
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            let _ = self.tx.send(Event::Stop);
        }
    }

    /// Whether the display was stopped or finished on its own.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Block until the display ends, either because every task finished
    /// or because it was stopped.
    ///
    /// Add all tasks before waiting: the display ends as soon as every
    /// task registered so far is finished.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError::Render`] if writing to the output failed.
    pub fn wait(&self) -> Result<(), ProgressError> {
        self.completion.wait()
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl fmt::Debug for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Progress")
            .field("stopped", &self.is_stopped())
            .finish_non_exhaustive()
    }
}

// ─── Scheduler ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    Stopped,
    Finished,
    Disconnected,
}

/// State owned by the background thread.
struct Scheduler {
    renderer: Renderer,
    tasks: Vec<Arc<Task>>,
    tick_interval: Duration,
    pending: Arc<AtomicBool>,
}

impl Scheduler {
    fn run(mut self, rx: &Receiver<Event>, stopped: &AtomicBool, completion: &Completion) {
        let result = self
            .renderer
            .begin()
            .and_then(|()| self.event_loop(rx))
            .map_err(ProgressError::render);

        if let Err(err) = self.renderer.end() {
            warn!(error = %err, "failed to restore cursor");
        }
        stopped.store(true, Ordering::Release);

        match &result {
            Ok(exit) => debug!(reason = ?exit, tasks = self.tasks.len(), "progress finished"),
            Err(err) => warn!(error = %err, "progress aborted"),
        }
        completion.publish(result.map(|_| ()));
    }

    fn event_loop(&mut self, rx: &Receiver<Event>) -> io::Result<Exit> {
        let mut next_tick = Instant::now() + self.tick_interval;

        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            match rx.recv_timeout(timeout) {
                Ok(Event::Register(task)) => {
                    trace!(task = task.description(), total = task.total(), "task registered");
                    self.tasks.push(task);
                }
                Ok(Event::Notify) => {
                    self.pending.store(false, Ordering::Release);
                    if self.repaint()? {
                        return Ok(Exit::Finished);
                    }
                }
                Ok(Event::Stop) => return Ok(Exit::Stopped),
                Err(RecvTimeoutError::Timeout) => {
                    next_tick = Instant::now() + self.tick_interval;
                    if self.repaint()? {
                        return Ok(Exit::Finished);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    // Every handle is gone; nobody is left to stop us.
                    return Ok(Exit::Disconnected);
                }
            }
        }
    }

    /// Draw one frame. Returns true once every task is finished.
    fn repaint(&mut self) -> io::Result<bool> {
        if self.tasks.is_empty() {
            return Ok(false);
        }
        self.renderer.draw(&self.tasks)?;
        Ok(self.tasks.iter().all(|task| task.is_finished()))
    }
}

// ─── Renderer ────────────────────────────────────────────────────────────────

/// Turns the task list into frames on the sink.
struct Renderer {
    sink: Box<dyn Sink + Send>,
    columns: Vec<Arc<dyn Column>>,
    table: Table,
    buf: OutputBuffer,
    height: usize,
}

impl Renderer {
    fn new(sink: Box<dyn Sink + Send>, config: ProgressConfig) -> Self {
        Self {
            sink,
            columns: config.columns,
            table: Table::new(config.table),
            buf: OutputBuffer::new(),
            height: 0,
        }
    }

    fn begin(&mut self) -> io::Result<()> {
        ansi::cursor_hide(&mut self.buf)?;
        self.buf.flush_to(&mut *self.sink)
    }

    fn end(&mut self) -> io::Result<()> {
        self.buf.clear();
        ansi::cursor_column(&mut self.buf, 0)?;
        ansi::cursor_show(&mut self.buf)?;
        self.buf.flush_to(&mut *self.sink)
    }

    fn draw(&mut self, tasks: &[Arc<Task>]) -> io::Result<()> {
        self.table.reset();
        for task in tasks.iter().filter(|task| task.is_started()) {
            let row: Vec<Cell> = self.columns.iter().map(|col| col.render(task).into()).collect();
            self.table.add_row(row);
        }

        let width = self
            .table
            .options()
            .max_width
            .unwrap_or_else(|| self.sink.width());
        let frame = self.table.render_to_string(width);
        let height = frame.matches('\n').count();

        ansi::cursor_column(&mut self.buf, 0)?;
        ansi::cursor_up(&mut self.buf, self.height)?;
        self.buf.push_str(&frame);
        if height < self.height {
            ansi::erase_below(&mut self.buf)?;
        }
        self.buf.flush_to(&mut *self.sink)?;

        debug!(rows = self.table.len(), height, "repaint");
        self.height = height;
        Ok(())
    }
}
