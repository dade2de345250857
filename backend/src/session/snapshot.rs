//! Read-only projection handed to the presentation layer

use crate::core::time::Millis;
use crate::models::activity::{ActivityRecord, ActivityStatus, RunPhase};
use crate::models::mode::DemoMode;
use crate::models::role::{DeliveryMetrics, Layer};
use serde::{Deserialize, Serialize};

/// One agent card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordView {
    pub agent_id: String,
    pub label: String,
    pub layer: Layer,
    pub task: String,
    pub status: ActivityStatus,
    pub progress: u8,
    pub result: Option<String>,
}

impl From<&ActivityRecord> for RecordView {
    fn from(record: &ActivityRecord) -> Self {
        Self {
            agent_id: record.agent.id.clone(),
            label: record.agent.label.clone(),
            layer: record.layer(),
            task: record.task.clone(),
            status: record.status(),
            progress: record.progress(),
            result: record.result().map(str::to_string),
        }
    }
}

/// Everything a renderer needs, at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoSnapshot {
    pub time: Millis,
    /// Role currently selected in the UI
    pub role_id: String,
    pub mode: DemoMode,
    pub displayed_input: String,
    /// Whether a typing sequence is still appending characters
    pub typing: bool,
    /// Query of the live run, or the last submitted one
    pub current_query: String,
    pub phase: RunPhase,
    pub run_token: u64,
    /// Role the live run was started with
    pub run_role_id: Option<String>,
    pub records: Vec<RecordView>,
    /// Present only in the delivered phase
    pub delivery: Option<DeliveryMetrics>,
    /// Sample query index the next automatic cycle will use
    pub next_query_index: usize,
}

impl DemoSnapshot {
    pub fn record(&self, agent_id: &str) -> Option<&RecordView> {
        self.records.iter().find(|r| r.agent_id == agent_id)
    }

    pub fn records_in(&self, layer: Layer) -> impl Iterator<Item = &RecordView> {
        self.records.iter().filter(move |r| r.layer == layer)
    }

    pub fn all_completed(&self) -> bool {
        !self.records.is_empty()
            && self
                .records
                .iter()
                .all(|r| r.status == ActivityStatus::Completed)
    }
}
