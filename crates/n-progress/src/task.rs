// SPDX-License-Identifier: MIT
//
// Task — one unit of tracked progress.
//
// A task counts `completed` parts out of a fixed `total`. Any number of
// threads may advance it at once; the counter and the start time live
// behind one mutex, so every reader sees a consistent snapshot and the
// count never passes the total.
//
// States only move forward:
//
//   unstarted ──advance/start──▶ started ──completed == total──▶ finished
//
// "Finished" is derived from the count, not stored. A task with a total of
// zero is finished as soon as it exists.
//
// Tasks created by a `Progress` carry a notifier; every advance asks the
// scheduler for a repaint. The request is coalesced, so advancing never
// blocks on the display.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::progress::Notifier;

#[derive(Debug, Default)]
struct State {
    completed: u64,
    started_at: Option<Instant>,
}

/// Progress state of a single task.
///
/// ```
/// use n_progress::Task;
///
/// let task = Task::new("download", 200);
/// assert!(!task.is_started());
/// task.advance(150);
/// task.advance(150);
/// assert_eq!(task.completed(), 200);
/// assert!(task.is_finished());
/// assert_eq!(task.percent_completed(), 100.0);
/// ```
#[derive(Debug)]
pub struct Task {
    description: String,
    total: u64,
    state: Mutex<State>,
    notifier: Option<Notifier>,
}

impl Task {
    /// A task that is not attached to any progress display.
    #[must_use]
    pub fn new(description: impl Into<String>, total: u64) -> Self {
        Self {
            description: description.into(),
            total,
            state: Mutex::new(State::default()),
            notifier: None,
        }
    }

    pub(crate) fn attached(description: impl Into<String>, total: u64, notifier: Notifier) -> Self {
        Self {
            notifier: Some(notifier),
            ..Self::new(description, total)
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ─── Mutation ────────────────────────────────────────────────────────

    /// Add `step` completed parts, clamped to the total.
    ///
    /// The first call starts the task, even with a step of zero.
    pub fn advance(&self, step: u64) {
        {
            let mut state = self.state();
            if state.started_at.is_none() {
                state.started_at = Some(Instant::now());
            }
            state.completed = state.completed.saturating_add(step).min(self.total);
        }

        if let Some(notifier) = &self.notifier {
            notifier.notify();
        }
    }

    /// Start the task without completing anything.
    pub fn start(&self) {
        self.advance(0);
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Completed parts, never more than [`total`](Self::total).
    #[must_use]
    pub fn completed(&self) -> u64 {
        self.state().completed
    }

    /// When the task was started, if it was.
    #[must_use]
    pub fn started_at(&self) -> Option<Instant> {
        self.state().started_at
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.state().started_at.is_some()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.completed() >= self.total
    }

    // ─── Derived metrics ─────────────────────────────────────────────────

    /// Completion in percent, `0.0..=100.0`. A task with a total of zero
    /// is 100% complete.
    #[must_use]
    pub fn percent_completed(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.completed() as f64 / self.total as f64 * 100.0
    }

    /// Time since the task started, zero if it has not.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    /// Time between the start of the task and `now`.
    #[must_use]
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        self.started_at()
            .map_or(Duration::ZERO, |start| now.saturating_duration_since(start))
    }

    /// Estimated time until the task finishes.
    ///
    /// Extrapolates linearly from the elapsed time and the completion
    /// ratio. `None` while nothing is completed, since there is no rate to
    /// extrapolate from.
    #[must_use]
    pub fn estimated(&self) -> Option<Duration> {
        self.estimated_at(Instant::now())
    }

    /// [`estimated`](Self::estimated) as seen at `now`.
    #[must_use]
    pub fn estimated_at(&self, now: Instant) -> Option<Duration> {
        let (completed, started_at) = {
            let state = self.state();
            (state.completed, state.started_at)
        };

        if completed >= self.total {
            return Some(Duration::ZERO);
        }
        let start = started_at?;
        if completed == 0 {
            return None;
        }

        let elapsed = now.saturating_duration_since(start).as_nanos();
        let projected = elapsed * u128::from(self.total) / u128::from(completed);
        let remaining = projected.saturating_sub(elapsed);
        Some(Duration::from_nanos(
            u64::try_from(remaining).unwrap_or(u64::MAX),
        ))
    }

    /// Whether this task belongs to a progress display.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.notifier.is_some()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use proptest::prelude::*;

    use super::*;

    // ── State machine ─────────────────────────────────────────────────

    #[test]
    fn new_task_is_unstarted() {
        let task = Task::new("idle", 10);
        assert!(!task.is_started());
        assert!(!task.is_finished());
        assert_eq!(task.completed(), 0);
        assert_eq!(task.elapsed(), Duration::ZERO);
        assert!(!task.is_attached());
    }

    #[test]
    fn start_sets_start_time_once() {
        let task = Task::new("t", 10);
        task.start();
        let first = task.started_at();
        assert!(first.is_some());
        assert_eq!(task.completed(), 0);

        task.advance(3);
        assert_eq!(task.started_at(), first);
    }

    #[test]
    fn advance_clamps_to_total() {
        let task = Task::new("t", 200);
        task.advance(150);
        task.advance(150);
        assert_eq!(task.completed(), 200);
        assert!(task.is_finished());
        assert!((task.percent_completed() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn advance_saturates_on_overflow() {
        let task = Task::new("t", u64::MAX);
        task.advance(u64::MAX - 1);
        task.advance(u64::MAX);
        assert_eq!(task.completed(), u64::MAX);
    }

    #[test]
    fn zero_total_is_finished() {
        let task = Task::new("empty", 0);
        assert!(task.is_finished());
        assert!((task.percent_completed() - 100.0).abs() < f64::EPSILON);
        assert_eq!(task.estimated(), Some(Duration::ZERO));
    }

    #[test]
    fn percent_is_a_fraction_of_total() {
        let task = Task::new("t", 8);
        task.advance(2);
        assert!((task.percent_completed() - 25.0).abs() < f64::EPSILON);
    }

    // ── Time ──────────────────────────────────────────────────────────

    #[test]
    fn elapsed_measures_from_start() {
        let task = Task::new("t", 10);
        task.start();
        let start = task.started_at().unwrap();
        assert_eq!(task.elapsed_at(start + Duration::from_secs(4)), Duration::from_secs(4));
    }

    #[test]
    fn estimate_extrapolates_linearly() {
        let task = Task::new("t", 100);
        task.advance(25);
        let start = task.started_at().unwrap();
        // A quarter done after 10s: 30s to go.
        assert_eq!(
            task.estimated_at(start + Duration::from_secs(10)),
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn estimate_is_unknown_without_progress() {
        let task = Task::new("t", 100);
        assert_eq!(task.estimated(), None);
        task.start();
        assert_eq!(task.estimated(), None);
    }

    #[test]
    fn estimate_is_zero_once_finished() {
        let task = Task::new("t", 5);
        task.advance(5);
        assert_eq!(task.estimated(), Some(Duration::ZERO));
    }

    // ── Concurrency ───────────────────────────────────────────────────

    #[test]
    fn concurrent_advances_sum_up() {
        let task = Arc::new(Task::new("t", 10_000));
        let workers: Vec<_> = (0..8)
            .map(|_| {
                let task = Arc::clone(&task);
                thread::spawn(move || {
                    for _ in 0..1_000 {
                        task.advance(1);
                    }
                })
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }
        assert_eq!(task.completed(), 8_000);
    }

    #[test]
    fn concurrent_overshoot_stops_at_total() {
        let task = Arc::new(Task::new("t", 500));
        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..200 {
                        task.advance(1);
                        assert!(task.completed() <= 500);
                    }
                });
            }
        });
        assert_eq!(task.completed(), 500);
        assert!(task.is_finished());
    }

    // ── Properties ────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn completed_is_clamped_sum(
            total in 0u64..1_000,
            steps in prop::collection::vec(0u64..200, 0..20),
        ) {
            let task = Task::new("p", total);
            for &step in &steps {
                task.advance(step);
                prop_assert!(task.completed() <= total);
            }
            prop_assert_eq!(task.completed(), total.min(steps.iter().sum()));
            prop_assert_eq!(task.is_started(), !steps.is_empty());
        }
    }
}
