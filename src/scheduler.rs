//! One-shot deferred tasks over a virtual millisecond clock.
//!
//! Everything that happens "a little later" on a page (fades, the deferred
//! sidebar close, the navigation itself) is queued here instead of on a
//! wall-clock timer. The host advances the clock by real elapsed time; tests
//! advance it by hand and can ask whether a given task has completed.

use std::collections::HashSet;

/// Identifies a scheduled task.
///
pub type TaskId = u64;

struct Pending<T> {
    id: TaskId,
    due_ms: u64,
    task: T,
}

/// Single-threaded queue of deferred tasks.
///
pub struct Scheduler<T> {
    now_ms: u64,
    next_id: TaskId,
    pending: Vec<Pending<T>>,
    completed: HashSet<TaskId>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Scheduler {
            now_ms: 0,
            next_id: 1,
            pending: vec![],
            completed: HashSet::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Scheduler::default()
    }

    /// Return the current virtual time in milliseconds.
    ///
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Queue `task` to become due `delay_ms` from now.
    ///
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TaskId {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due_ms: self.now_ms + delay_ms,
            task,
        });
        id
    }

    /// Move the clock forward.
    ///
    pub fn advance(&mut self, elapsed_ms: u64) -> &mut Self {
        self.now_ms += elapsed_ms;
        self
    }

    /// Remove and return the earliest task that is due, marking it complete.
    /// Tasks due at the same instant come out in scheduling order.
    ///
    pub fn next_due(&mut self) -> Option<(TaskId, T)> {
        let now = self.now_ms;
        let position = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, pending)| pending.due_ms <= now)
            .min_by_key(|(_, pending)| (pending.due_ms, pending.id))
            .map(|(position, _)| position)?;
        let pending = self.pending.remove(position);
        self.completed.insert(pending.id);
        Some((pending.id, pending.task))
    }

    /// Return how long until the next task is due, if any is queued.
    ///
    pub fn time_until_next(&self) -> Option<u64> {
        self.pending
            .iter()
            .map(|pending| pending.due_ms.saturating_sub(self.now_ms))
            .min()
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|pending| pending.id == id)
    }

    pub fn is_complete(&self, id: TaskId) -> bool {
        self.completed.contains(&id)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Return a reference to every queued task, earliest first.
    ///
    pub fn pending_tasks(&self) -> Vec<&T> {
        let mut pending: Vec<&Pending<T>> = self.pending.iter().collect();
        pending.sort_by_key(|pending| (pending.due_ms, pending.id));
        pending.into_iter().map(|pending| &pending.task).collect()
    }
}
