use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    /// Flip back both cards of a mismatched turn.
    HideMismatch { first: CardId, second: CardId },
    /// Refresh the displayed play time.
    TimerTick,
}

/// A deferred engine action, bound to the game generation that scheduled it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub due: Duration,
    pub generation: Generation,
    pub kind: TaskKind,
    seq: u64,
}

/// Deferred tasks ordered by due time, ties broken by scheduling order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scheduler {
    tasks: Vec<Task>,
    next_seq: u64,
}

impl Scheduler {
    pub const fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn schedule(&mut self, due: Duration, generation: Generation, kind: TaskKind) {
        let task = Task {
            due,
            generation,
            kind,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        log::trace!("Scheduled {:?}", task);
        self.tasks.push(task);
    }

    pub fn is_pending(&self, pred: impl Fn(&TaskKind) -> bool) -> bool {
        self.tasks.iter().any(|task| pred(&task.kind))
    }

    /// Drops every task matching `pred`, returning how many were cancelled.
    pub fn cancel(&mut self, pred: impl Fn(&TaskKind) -> bool) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !pred(&task.kind));
        before - self.tasks.len()
    }

    pub fn clear(&mut self) {
        if !self.tasks.is_empty() {
            log::trace!("Cancelled {} pending tasks", self.tasks.len());
        }
        self.tasks.clear();
    }

    /// Earliest due time among pending tasks.
    pub fn next_due(&self) -> Option<Duration> {
        self.tasks.iter().map(|task| task.due).min()
    }

    /// Removes and returns the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<Task> {
        let (index, _) = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due <= now)
            .min_by_key(|(_, task)| (task.due, task.seq))?;
        Some(self.tasks.remove(index))
    }
}

/// First point of the series `due + k * period` (`k >= 1`) strictly after `now`, or `None` once that would pass
/// `Duration::MAX`.
pub fn next_period_after(due: Duration, period: Duration, now: Duration) -> Option<Duration> {
    let period_nanos = period.as_nanos().max(1);
    let behind = now.saturating_sub(due).as_nanos();
    let next = due.as_nanos() + period_nanos * (behind / period_nanos + 1);

    let secs = u64::try_from(next / 1_000_000_000).ok()?;
    let next = Duration::new(secs, (next % 1_000_000_000) as u32);
    (next > now).then_some(next)
}
