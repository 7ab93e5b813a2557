//! Cancellable timers on a virtual millisecond clock.
//!
//! Nothing here sleeps: the owner feeds the current time into
//! [`Scheduler::pop_due`] and runs whatever comes back.

use crate::target::TargetId;

/// Milliseconds since the session clock started
pub type Millis = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Once-a-second round countdown
    Countdown,
    /// Spawn-interval tick
    Spawn,
    /// Lifetime expiry for one specific target
    Despawn(TargetId),
}

#[derive(Debug, Clone)]
struct Entry {
    handle: TaskHandle,
    task: Task,
    due: Millis,
    every: Option<Millis>,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_handle: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `task` to fire every `interval` ms, first at `now + interval`
    pub fn every(&mut self, task: Task, interval: Millis, now: Millis) -> TaskHandle {
        self.push(task, now + interval.max(1), Some(interval.max(1)))
    }

    /// Schedules `task` to fire once at `now + delay`
    pub fn once(&mut self, task: Task, delay: Millis, now: Millis) -> TaskHandle {
        self.push(task, now + delay, None)
    }

    fn push(&mut self, task: Task, due: Millis, every: Option<Millis>) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry {
            handle,
            task,
            due,
            every,
        });
        handle
    }

    /// Returns true if the handle was still pending
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Earliest due time among pending tasks
    pub fn next_due(&self) -> Option<Millis> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Takes the earliest task due at or before `now`.
    ///
    /// Ties go to the task scheduled first. Repeating tasks are re-armed one
    /// period later, so a long gap yields one firing per elapsed period.
    pub fn pop_due(&mut self, now: Millis) -> Option<(Task, Millis)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| (e.due, e.handle))
            .map(|(i, _)| i)?;

        let entry = &mut self.entries[idx];
        let fired = (entry.task, entry.due);
        match entry.every {
            Some(period) => entry.due += period,
            None => {
                self.entries.remove(idx);
            }
        }
        Some(fired)
    }
}
