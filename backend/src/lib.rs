//! Agent Demo Core - Rust Engine
//!
//! Deterministic orchestration engine behind a scripted multi-agent demo:
//! a role is selected, a query is typed out character by character, and a
//! roster of agents visibly thinks, works and completes on a fixed timetable.
//!
//! # Architecture
//!
//! - **core**: Simulated clock and timer queue
//! - **models**: Domain types (Role, ActivityRecord, RunState, Event)
//! - **catalog**: Static role registry
//! - **results**: Canned task outcomes
//! - **typing**: Human-paced typing of a query
//! - **engine**: Phase-table driven activity simulation
//! - **session**: Orchestration context and automatic demo loop
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All time is simulated milliseconds (u64); nothing reads a wall clock
//! 2. All randomness is deterministic (seeded RNG)
//! 3. A scheduled task only mutates state if its sequence token is still live

// Module declarations
pub mod catalog;
pub mod config;
pub mod core;
pub mod engine;
pub mod models;
pub mod results;
pub mod rng;
pub mod session;
pub mod typing;

// Re-exports for convenience
pub use catalog::{CatalogError, RoleCatalog};
pub use config::{AutoCadence, ConfigError, DemoConfig};
pub use core::scheduler::{ScheduledTask, TimerQueue};
pub use core::time::{Millis, SimClock};
pub use engine::{ActivityEngine, PhaseAction, PhaseStep, PhaseTable, StepOutcome};
pub use models::{
    activity::{ActivityRecord, ActivityStatus, RunOrigin, RunPhase, RunState},
    event::{DemoEvent, EventLog},
    mode::DemoMode,
    role::{AgentDefinition, DeliveryMetrics, Layer, Role},
};
pub use results::ResultLookup;
pub use rng::RngManager;
pub use session::{DemoError, DemoSession, DemoSnapshot, RecordView, SubmitOutcome};
pub use typing::TypingSimulator;
