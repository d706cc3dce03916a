//! A single-slot timer for the computer's delayed reply.
//!
//! Nothing runs in the background. The owner asks for a task to be due after
//! some delay, then polls with the current instant. Scheduling again or
//! cancelling invalidates the previous [`TaskHandle`], so a reply that was
//! queued before a reset can be recognised and dropped.

use std::time::{Duration, Instant};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TaskHandle {
    id: u64,
    due: Instant,
}

impl TaskHandle {
    pub fn due(&self) -> Instant {
        self.due
    }

    /// Time left until the task is due, zero once it is.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.due.saturating_duration_since(now)
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    pending: Option<TaskHandle>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever was pending.
    pub fn schedule(&mut self, now: Instant, delay: Duration) -> TaskHandle {
        self.next_id += 1;
        let handle = TaskHandle {
            id: self.next_id,
            due: now + delay,
        };
        self.pending = Some(handle);
        handle
    }

    pub fn cancel(&mut self) -> Option<TaskHandle> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<TaskHandle> {
        self.pending
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending == Some(handle)
    }

    /// Hands back the pending task if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<TaskHandle> {
        match self.pending {
            Some(handle) if handle.due <= now => self.pending.take(),
            _ => None,
        }
    }

    /// Claims `handle` regardless of its due time. Fails for stale handles.
    pub fn take(&mut self, handle: TaskHandle) -> bool {
        if self.is_pending(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(600);

    #[test]
    fn task_is_not_due_early() {
        let now = Instant::now();
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(now, DELAY);

        assert_eq!(scheduler.take_due(now), None);
        assert_eq!(handle.remaining(now), DELAY);
        assert_eq!(scheduler.take_due(now + DELAY), Some(handle));
        assert_eq!(scheduler.pending(), None);
    }

    #[test]
    fn cancel_makes_handle_stale() {
        let now = Instant::now();
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(now, DELAY);

        assert_eq!(scheduler.cancel(), Some(handle));
        assert!(!scheduler.take(handle));
        assert_eq!(scheduler.take_due(now + DELAY * 2), None);
    }

    #[test]
    fn rescheduling_supersedes_old_handle() {
        let now = Instant::now();
        let mut scheduler = Scheduler::new();
        let first = scheduler.schedule(now, DELAY);
        let second = scheduler.schedule(now, DELAY);

        assert_ne!(first, second);
        assert!(!scheduler.is_pending(first));
        assert!(scheduler.take(second));
        assert!(!scheduler.take(second));
    }
}
