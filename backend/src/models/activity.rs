//! Per-run activity state
//!
//! Records are created fresh when a run starts, mutated only by the activity
//! engine, and dropped when the run resets. Nothing here survives across runs
//! except the run token counter.
//!
//! # Critical Invariants
//!
//! 1. **Forward-only status**: thinking → working → completed, never backward
//! 2. **Monotonic progress**: a record's progress never decreases within a run
//! 3. **Result only when completed**: `result` is `Some` iff status is completed

use crate::models::role::{AgentDefinition, DeliveryMetrics, Layer};
use serde::{Deserialize, Serialize};

/// Status of one simulated agent within a run
///
/// Variants are declared in lifecycle order; the derived `Ord` is what keeps
/// transitions forward-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Thinking,
    Working,
    Completed,
}

/// Mutable state of one agent for the duration of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Definition this record was created from
    pub agent: AgentDefinition,
    /// Task label picked for this run
    pub task: String,
    status: ActivityStatus,
    progress: u8,
    result: Option<String>,
}

impl ActivityRecord {
    /// New record in the thinking state with zero progress
    pub fn new(agent: AgentDefinition, task: String) -> Self {
        Self {
            agent,
            task,
            status: ActivityStatus::Thinking,
            progress: 0,
            result: None,
        }
    }

    pub fn status(&self) -> ActivityStatus {
        self.status
    }

    /// Progress percentage in `[0, 100]`
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn layer(&self) -> Layer {
        self.agent.layer
    }

    pub fn is_completed(&self) -> bool {
        self.status == ActivityStatus::Completed
    }

    /// Move to working and raise progress to at least `progress`
    ///
    /// Completed records are left untouched, and progress never drops.
    ///
    /// # Example
    /// ```
    /// use agent_demo_core_rs::models::{ActivityRecord, ActivityStatus, AgentDefinition, Layer};
    ///
    /// let agent = AgentDefinition::new("a", "A", Layer::Core, &["市场研究"]);
    /// let mut record = ActivityRecord::new(agent, "市场研究".to_string());
    ///
    /// record.advance(60);
    /// record.advance(30);
    /// assert_eq!(record.status(), ActivityStatus::Working);
    /// assert_eq!(record.progress(), 60);
    /// ```
    pub fn advance(&mut self, progress: u8) {
        if self.is_completed() {
            return;
        }
        self.status = self.status.max(ActivityStatus::Working);
        self.progress = self.progress.max(progress.min(100));
    }

    /// Finish the record with `result`
    ///
    /// Completing twice keeps the first result; it is chosen once and stored.
    pub fn complete(&mut self, result: String) {
        if self.is_completed() {
            return;
        }
        self.status = ActivityStatus::Completed;
        self.progress = 100;
        self.result = Some(result);
    }
}

/// Discrete phase of the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    #[default]
    Idle,
    Running,
    Completed,
    Delivered,
}

/// Who started a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOrigin {
    Automatic,
    Manual,
}

/// State of the live run, or of the idle gap between runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Token of the most recently started run
    pub token: u64,
    pub phase: RunPhase,
    pub origin: Option<RunOrigin>,
    /// Role captured when the run started
    pub role_id: Option<String>,
    pub query: String,
    pub started_at: u64,
    pub records: Vec<ActivityRecord>,
    /// Captured from the role at start; only exposed once delivered
    #[serde(skip)]
    pub(crate) delivery: Option<DeliveryMetrics>,
}

impl RunState {
    pub fn is_idle(&self) -> bool {
        self.phase == RunPhase::Idle
    }

    /// Delivery metrics, visible only in the delivered phase
    pub fn delivery(&self) -> Option<&DeliveryMetrics> {
        if self.phase == RunPhase::Delivered {
            self.delivery.as_ref()
        } else {
            None
        }
    }

    pub fn record(&self, agent_id: &str) -> Option<&ActivityRecord> {
        self.records.iter().find(|record| record.agent.id == agent_id)
    }

    pub fn records_in(&self, layer: Layer) -> impl Iterator<Item = &ActivityRecord> {
        self.records.iter().filter(move |record| record.layer() == layer)
    }

    /// Return to idle, keeping the token so late callbacks still mismatch
    pub(crate) fn clear(&mut self) {
        self.phase = RunPhase::Idle;
        self.origin = None;
        self.role_id = None;
        self.query.clear();
        self.records.clear();
        self.delivery = None;
    }
}
