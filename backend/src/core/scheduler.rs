//! Timer queue for delayed resumption
//!
//! The demo runs on a single-threaded cooperative loop. Every suspension is a
//! task parked in this queue until its due time. Tasks are plain data carrying
//! the token of the sequence that scheduled them; whoever dispatches a task
//! compares that token against the live one and drops stale tasks on the floor.
//! Nothing is ever removed from the queue early.
//!
//! # Ordering
//!
//! Tasks fire by `(due, sequence)`: earliest due time first, and tasks sharing a
//! due time fire in the order they were scheduled.

use crate::core::time::Millis;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A unit of deferred work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduledTask {
    /// Append the next character of the active typing sequence
    TypeNextChar { typing_token: u64 },

    /// Apply one step of the phase table to a run
    Phase { run_token: u64, step: usize },

    /// Start the next automatic demo cycle
    AutoCycle { loop_token: u64 },
}

impl ScheduledTask {
    /// Short name used in logs and stale-callback events
    pub fn kind(&self) -> &'static str {
        match self {
            ScheduledTask::TypeNextChar { .. } => "type_next_char",
            ScheduledTask::Phase { .. } => "phase",
            ScheduledTask::AutoCycle { .. } => "auto_cycle",
        }
    }

    /// Token of the sequence that owns this task
    pub fn token(&self) -> u64 {
        match self {
            ScheduledTask::TypeNextChar { typing_token } => *typing_token,
            ScheduledTask::Phase { run_token, .. } => *run_token,
            ScheduledTask::AutoCycle { loop_token } => *loop_token,
        }
    }
}

/// Pending tasks keyed by due time and scheduling sequence
///
/// # Example
/// ```
/// use agent_demo_core_rs::core::{ScheduledTask, TimerQueue};
///
/// let mut queue = TimerQueue::new();
/// queue.schedule(500, ScheduledTask::AutoCycle { loop_token: 1 });
/// queue.schedule(100, ScheduledTask::TypeNextChar { typing_token: 1 });
///
/// assert!(queue.pop_due(50).is_none());
/// let (due, task) = queue.pop_due(1_000).unwrap();
/// assert_eq!(due, 100);
/// assert_eq!(task.kind(), "type_next_char");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    entries: BTreeMap<(Millis, u64), ScheduledTask>,
    next_sequence: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park `task` until `due`
    pub fn schedule(&mut self, due: Millis, task: ScheduledTask) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.insert((due, sequence), task);
    }

    /// Remove and return the earliest task due at or before `until`
    pub fn pop_due(&mut self, until: Millis) -> Option<(Millis, ScheduledTask)> {
        let (&(due, _), _) = self.entries.first_key_value()?;
        if due > until {
            return None;
        }
        self.entries
            .pop_first()
            .map(|((due, _), task)| (due, task))
    }

    /// Due time of the earliest pending task
    pub fn next_due(&self) -> Option<Millis> {
        self.entries.keys().next().map(|(due, _)| *due)
    }

    /// Number of pending tasks, stale ones included
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate pending tasks in firing order
    pub fn iter(&self) -> impl Iterator<Item = (Millis, &ScheduledTask)> {
        self.entries.iter().map(|((due, _), task)| (*due, task))
    }

    /// Drop every pending task
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
