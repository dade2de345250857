//! Automatic demo loop state
//!
//! Holds the demo mode flag, the cyclic index into the current role's sample
//! queries, and the loop token. The session asks it when the next cycle is
//! due; the loop never schedules anything itself.

use crate::config::AutoCadence;
use crate::core::time::Millis;
use crate::models::mode::DemoMode;
use crate::models::role::Role;

#[derive(Debug, Clone)]
pub struct AutoDemoLoop {
    cadence: AutoCadence,
    mode: DemoMode,
    next_index: usize,
    token: u64,
}

impl AutoDemoLoop {
    /// New loop in automatic mode
    pub fn new(cadence: AutoCadence) -> Self {
        Self {
            cadence,
            mode: DemoMode::Automatic,
            next_index: 0,
            token: 1,
        }
    }

    pub fn cadence(&self) -> AutoCadence {
        self.cadence
    }

    pub fn mode(&self) -> DemoMode {
        self.mode
    }

    pub fn is_automatic(&self) -> bool {
        self.mode.is_automatic()
    }

    /// Token that scheduled cycles must carry to fire
    pub fn token(&self) -> u64 {
        self.token
    }

    /// Index of the sample query the next cycle will use
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Whether a cycle carrying `token` may run now
    ///
    /// Checked at fire time, so a switch to manual between scheduling and
    /// firing always wins.
    pub fn accepts(&self, token: u64) -> bool {
        self.is_automatic() && token == self.token
    }

    /// Switch to manual; returns `false` if already manual
    pub fn disable(&mut self) -> bool {
        self.token += 1;
        if self.mode == DemoMode::Manual {
            return false;
        }
        self.mode = DemoMode::Manual;
        true
    }

    /// Switch to automatic; returns `false` if already automatic
    pub fn enable(&mut self) -> bool {
        if self.mode == DemoMode::Automatic {
            return false;
        }
        self.token += 1;
        self.mode = DemoMode::Automatic;
        true
    }

    /// Restart the cycle at the first sample query (role switch)
    pub fn reset_index(&mut self) {
        self.next_index = 0;
    }

    /// Take the next sample query of `role` and advance the cyclic index
    pub fn take_next(&mut self, role: &Role) -> Option<(usize, String)> {
        let len = role.sample_queries.len();
        if len == 0 {
            return None;
        }
        let index = self.next_index % len;
        self.next_index = (index + 1) % len;
        role.sample_query(index).map(|query| (index, query.to_string()))
    }

    /// Due time of the first cycle after automatic mode is (re-)enabled
    ///
    /// With an after-reset cadence and a run still in flight, the run's reset
    /// schedules the cycle instead.
    pub fn first_due(&self, now: Millis, engine_idle: bool) -> Option<Millis> {
        match self.cadence {
            AutoCadence::FixedPeriod(period) => Some(now.saturating_add(period)),
            AutoCadence::AfterReset(delay) if engine_idle => Some(now.saturating_add(delay)),
            AutoCadence::AfterReset(_) => None,
        }
    }

    /// Due time of the cycle following one that just started
    pub fn after_cycle(&self, now: Millis) -> Option<Millis> {
        match self.cadence {
            AutoCadence::FixedPeriod(period) => Some(now.saturating_add(period)),
            AutoCadence::AfterReset(_) => None,
        }
    }

    /// Due time of the cycle following a run reset
    pub fn after_reset(&self, now: Millis) -> Option<Millis> {
        match self.cadence {
            AutoCadence::AfterReset(delay) if self.is_automatic() => Some(now.saturating_add(delay)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RoleCatalog;

    #[test]
    fn test_take_next_cycles() {
        let catalog = RoleCatalog::classic();
        let role = catalog.first().unwrap();
        let mut auto = AutoDemoLoop::new(AutoCadence::FixedPeriod(8_000));

        let indices: Vec<usize> = (0..6)
            .filter_map(|_| auto.take_next(role).map(|(i, _)| i))
            .collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_disable_invalidates_token() {
        let mut auto = AutoDemoLoop::new(AutoCadence::FixedPeriod(8_000));
        let token = auto.token();
        assert!(auto.accepts(token));

        assert!(auto.disable());
        assert!(!auto.accepts(token));
        assert!(!auto.disable());

        assert!(auto.enable());
        assert!(!auto.accepts(token));
        assert!(auto.accepts(auto.token()));
    }

    #[test]
    fn test_after_reset_only_when_automatic() {
        let mut auto = AutoDemoLoop::new(AutoCadence::AfterReset(4_000));
        assert_eq!(auto.after_reset(8_500), Some(12_500));
        assert_eq!(auto.after_cycle(0), None);

        auto.disable();
        assert_eq!(auto.after_reset(8_500), None);
    }

    #[test]
    fn test_due_times_saturate() {
        let auto = AutoDemoLoop::new(AutoCadence::AfterReset(u64::MAX));
        assert_eq!(auto.after_reset(8_500), Some(u64::MAX));

        let periodic = AutoDemoLoop::new(AutoCadence::FixedPeriod(u64::MAX));
        assert_eq!(periodic.after_cycle(1), Some(u64::MAX));
        assert_eq!(periodic.first_due(1, true), Some(u64::MAX));
    }

    #[test]
    fn test_first_due_waits_for_running_run() {
        let auto = AutoDemoLoop::new(AutoCadence::AfterReset(4_000));
        assert_eq!(auto.first_due(100, false), None);
        assert_eq!(auto.first_due(100, true), Some(4_100));

        let periodic = AutoDemoLoop::new(AutoCadence::FixedPeriod(8_000));
        assert_eq!(periodic.first_due(100, false), Some(8_100));
    }
}
