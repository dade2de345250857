//! Domain models for the demo engine

pub mod activity;
pub mod event;
pub mod mode;
pub mod role;

// Re-exports
pub use activity::{ActivityRecord, ActivityStatus, RunOrigin, RunPhase, RunState};
pub use event::{DemoEvent, EventLog};
pub use mode::DemoMode;
pub use role::{AgentDefinition, DeliveryMetrics, Layer, MetricItem, Role};
