//! Time and scheduling primitives for the cooperative event loop

pub mod scheduler;
pub mod time;

pub use scheduler::{ScheduledTask, TimerQueue};
pub use time::{Millis, SimClock};
