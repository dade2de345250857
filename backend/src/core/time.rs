//! Simulated time for the demo engine
//!
//! The engine never reads the wall clock. Time is an integer count of
//! milliseconds ("time units") that only moves forward when the driver
//! advances it. This keeps every run reproducible under test.

use serde::{Deserialize, Serialize};

/// Time in simulated milliseconds since session creation
pub type Millis = u64;

/// Monotonic simulated clock
///
/// # Example
/// ```
/// use agent_demo_core_rs::SimClock;
///
/// let mut clock = SimClock::new();
/// assert_eq!(clock.now(), 0);
///
/// clock.advance_to(1_000);
/// assert_eq!(clock.now(), 1_000);
/// assert_eq!(clock.elapsed_since(250), 750);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimClock {
    /// Milliseconds elapsed since the clock was created
    now: Millis,
}

impl SimClock {
    /// Create a clock positioned at time zero
    pub fn new() -> Self {
        Self { now: 0 }
    }

    /// Current simulated time
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Move the clock forward to `time`
    ///
    /// # Panics
    /// Panics if `time` is earlier than the current time. Timers are always
    /// popped in due order, so a backward move means the scheduler is broken.
    ///
    /// # Example
    /// ```
    /// use agent_demo_core_rs::SimClock;
    ///
    /// let mut clock = SimClock::new();
    /// clock.advance_to(40);
    /// clock.advance_to(40); // staying put is allowed
    /// assert_eq!(clock.now(), 40);
    /// ```
    pub fn advance_to(&mut self, time: Millis) {
        assert!(
            time >= self.now,
            "clock cannot move backward (now {}, requested {})",
            self.now,
            time
        );
        self.now = time;
    }

    /// Move the clock forward by `delta` milliseconds
    pub fn advance_by(&mut self, delta: Millis) {
        self.now = self.now.saturating_add(delta);
    }

    /// Milliseconds between `earlier` and now (zero if `earlier` is in the future)
    pub fn elapsed_since(&self, earlier: Millis) -> Millis {
        self.now.saturating_sub(earlier)
    }
}
