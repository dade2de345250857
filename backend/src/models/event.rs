//! Event log for replay and auditing
//!
//! Every state change the session makes is recorded with the simulated time
//! it happened at. The log is what proves, after the fact, that a superseded
//! run never touched the records of the run that replaced it.
//!
//! # Event Types
//!
//! - **Session**: role selection, mode changes, automatic cycles
//! - **Typing**: sequence started, finished, cancelled
//! - **Run**: started, phase step applied, completed, delivered, reset
//! - **Guard**: submits ignored, stale callbacks discarded
//!
//! # Example
//!
//! ```rust
//! use agent_demo_core_rs::models::{DemoEvent, EventLog};
//!
//! let mut log = EventLog::new();
//! log.log(DemoEvent::RunReset { time: 4_000, run_token: 1 });
//!
//! assert_eq!(log.events_for_run(1).len(), 1);
//! assert_eq!(log.events_of_type("RunReset").len(), 1);
//! ```

use crate::models::activity::RunOrigin;
use crate::models::mode::DemoMode;
use serde::{Deserialize, Serialize};

/// A recorded state change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DemoEvent {
    RoleSelected {
        time: u64,
        role_id: String,
    },

    ModeChanged {
        time: u64,
        mode: DemoMode,
        /// Inbound event that caused the change
        cause: String,
    },

    /// Automatic loop picked a sample query
    AutoCycleStarted {
        time: u64,
        role_id: String,
        query_index: usize,
        query: String,
    },

    TypingStarted {
        time: u64,
        target: String,
    },

    TypingFinished {
        time: u64,
    },

    /// Typing stopped before reaching its target
    TypingCancelled {
        time: u64,
        typed_chars: usize,
    },

    RunStarted {
        time: u64,
        run_token: u64,
        role_id: String,
        query: String,
        origin: RunOrigin,
        num_agents: usize,
    },

    /// A run started while another was still in flight
    RunSuperseded {
        time: u64,
        run_token: u64,
        by_token: u64,
    },

    PhaseApplied {
        time: u64,
        run_token: u64,
        step: usize,
        action: String,
        /// Records whose status or progress changed
        records_changed: usize,
    },

    RunCompleted {
        time: u64,
        run_token: u64,
    },

    RunDelivered {
        time: u64,
        run_token: u64,
    },

    RunReset {
        time: u64,
        run_token: u64,
    },

    SubmitIgnored {
        time: u64,
        reason: String,
    },

    /// A scheduled task fired after its sequence was superseded
    StaleCallback {
        time: u64,
        kind: String,
        token: u64,
    },
}

impl DemoEvent {
    /// Simulated time the event happened at
    pub fn time(&self) -> u64 {
        match self {
            DemoEvent::RoleSelected { time, .. }
            | DemoEvent::ModeChanged { time, .. }
            | DemoEvent::AutoCycleStarted { time, .. }
            | DemoEvent::TypingStarted { time, .. }
            | DemoEvent::TypingFinished { time }
            | DemoEvent::TypingCancelled { time, .. }
            | DemoEvent::RunStarted { time, .. }
            | DemoEvent::RunSuperseded { time, .. }
            | DemoEvent::PhaseApplied { time, .. }
            | DemoEvent::RunCompleted { time, .. }
            | DemoEvent::RunDelivered { time, .. }
            | DemoEvent::RunReset { time, .. }
            | DemoEvent::SubmitIgnored { time, .. }
            | DemoEvent::StaleCallback { time, .. } => *time,
        }
    }

    /// Variant name, used for filtering
    pub fn event_type(&self) -> &'static str {
        match self {
            DemoEvent::RoleSelected { .. } => "RoleSelected",
            DemoEvent::ModeChanged { .. } => "ModeChanged",
            DemoEvent::AutoCycleStarted { .. } => "AutoCycleStarted",
            DemoEvent::TypingStarted { .. } => "TypingStarted",
            DemoEvent::TypingFinished { .. } => "TypingFinished",
            DemoEvent::TypingCancelled { .. } => "TypingCancelled",
            DemoEvent::RunStarted { .. } => "RunStarted",
            DemoEvent::RunSuperseded { .. } => "RunSuperseded",
            DemoEvent::PhaseApplied { .. } => "PhaseApplied",
            DemoEvent::RunCompleted { .. } => "RunCompleted",
            DemoEvent::RunDelivered { .. } => "RunDelivered",
            DemoEvent::RunReset { .. } => "RunReset",
            DemoEvent::SubmitIgnored { .. } => "SubmitIgnored",
            DemoEvent::StaleCallback { .. } => "StaleCallback",
        }
    }

    /// Run token the event concerns, if any
    ///
    /// Stale phase callbacks report the token they carried.
    pub fn run_token(&self) -> Option<u64> {
        match self {
            DemoEvent::RunStarted { run_token, .. }
            | DemoEvent::RunSuperseded { run_token, .. }
            | DemoEvent::PhaseApplied { run_token, .. }
            | DemoEvent::RunCompleted { run_token, .. }
            | DemoEvent::RunDelivered { run_token, .. }
            | DemoEvent::RunReset { run_token, .. } => Some(*run_token),
            DemoEvent::StaleCallback { kind, token, .. } if kind == "phase" => Some(*token),
            _ => None,
        }
    }

    /// Whether the event mutated run records or run phase
    pub fn mutates_run(&self) -> bool {
        matches!(
            self,
            DemoEvent::RunStarted { .. }
                | DemoEvent::PhaseApplied { .. }
                | DemoEvent::RunCompleted { .. }
                | DemoEvent::RunDelivered { .. }
                | DemoEvent::RunReset { .. }
        )
    }
}

/// Append-only event history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<DemoEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn log(&mut self, event: DemoEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[DemoEvent] {
        &self.events
    }

    /// Events recorded at exactly `time`
    pub fn events_at(&self, time: u64) -> Vec<&DemoEvent> {
        self.events.iter().filter(|e| e.time() == time).collect()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<&DemoEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    pub fn events_for_run(&self, run_token: u64) -> Vec<&DemoEvent> {
        self.events
            .iter()
            .filter(|e| e.run_token() == Some(run_token))
            .collect()
    }

    /// Events recorded after position `index` in the log
    pub fn since(&self, index: usize) -> &[DemoEvent] {
        self.events.get(index..).unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_by_time_and_run() {
        let mut log = EventLog::new();
        log.log(DemoEvent::RunStarted {
            time: 0,
            run_token: 1,
            role_id: "team".to_string(),
            query: "制定一个新产品的市场进入策略".to_string(),
            origin: RunOrigin::Automatic,
            num_agents: 3,
        });
        log.log(DemoEvent::PhaseApplied {
            time: 1_000,
            run_token: 1,
            step: 0,
            action: "advance".to_string(),
            records_changed: 3,
        });
        log.log(DemoEvent::StaleCallback {
            time: 1_000,
            kind: "phase".to_string(),
            token: 0,
        });
        log.log(DemoEvent::StaleCallback {
            time: 1_000,
            kind: "type_next_char".to_string(),
            token: 1,
        });

        assert_eq!(log.events_at(1_000).len(), 3);
        assert_eq!(log.events_for_run(1).len(), 2);
        assert_eq!(log.events_for_run(0).len(), 1);
        assert!(!log.events_for_run(0)[0].mutates_run());
    }

    #[test]
    fn test_since_and_clear() {
        let mut log = EventLog::new();
        log.log(DemoEvent::TypingFinished { time: 10 });
        log.log(DemoEvent::RunReset { time: 20, run_token: 3 });

        assert_eq!(log.since(1).len(), 1);
        assert!(log.since(5).is_empty());

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let event = DemoEvent::SubmitIgnored {
            time: 5,
            reason: "empty".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "SubmitIgnored");
        assert_eq!(json["reason"], "empty");
    }
}
