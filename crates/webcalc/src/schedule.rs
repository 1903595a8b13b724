//! Fire-and-forget one-shot timers on a manually advanced clock
//!
//! Scheduling never cancels or replaces earlier tasks: every scheduled
//! task fires once its deadline passes, in deadline order (ties keep
//! scheduling order).

use std::time::Duration;

#[derive(Debug, Clone)]
struct Pending<T> {
    due_ms: u64,
    seq: u64,
    task: T,
}

/// Queue of deferred one-shot tasks
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    now_ms: u64,
    next_seq: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue with the clock at zero
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    /// Returns the current clock reading
    #[must_use]
    pub const fn now(&self) -> Duration {
        Duration::from_millis(self.now_ms)
    }

    /// Schedules `task` to fire `delay` from now
    pub fn schedule(&mut self, delay: Duration, task: T) {
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.pending.push(Pending {
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq: self.next_seq,
            task,
        });
        self.next_seq += 1;
    }

    /// Moves the clock forward and returns every task that became due
    pub fn advance(&mut self, by: Duration) -> Vec<T> {
        let by_ms = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.now_ms = self.now_ms.saturating_add(by_ms);

        let now = self.now_ms;
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due_ms <= now);
        self.pending = waiting;

        due.sort_by_key(|p| (p.due_ms, p.seq));
        due.into_iter().map(|p| p.task).collect()
    }

    /// Returns the number of tasks not yet fired
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
