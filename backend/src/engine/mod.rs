//! Activity simulation engine
//!
//! Drives one run at a time through its phase table:
//!
//! ```text
//! start(role, query)        → records created (thinking, 0%), token bumped
//! apply(token, step) × N    → advance / complete / deliver
//! apply(token, reset step)  → records cleared, idle
//! ```
//!
//! # Run token
//!
//! Every start bumps a monotonic token. Scheduled steps carry the token they
//! were scheduled for, and `apply` refuses any step whose token is not the
//! live run's. Starting a new run therefore invalidates every pending step of
//! the old one without touching the timer queue.
//!
//! The engine does not own time. [`ActivityEngine::start`] hands back the
//! offsets to schedule; the session parks them in its timer queue.

pub mod phases;

pub use phases::{PhaseAction, PhaseStep, PhaseTable, PhaseTableError};

use crate::core::time::Millis;
use crate::models::activity::{ActivityRecord, RunOrigin, RunPhase, RunState};
use crate::models::role::Role;
use crate::results::ResultLookup;
use crate::rng::RngManager;
use tracing::{debug, info};

/// Outcome of applying one scheduled step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Token mismatch or run already idle; nothing changed
    Stale,

    /// Records advanced
    Advanced { records_changed: usize },

    /// Every record completed
    Completed,

    /// Delivery metrics exposed
    Delivered,

    /// Run cleared, engine idle
    Reset,
}

impl StepOutcome {
    pub fn is_stale(&self) -> bool {
        matches!(self, StepOutcome::Stale)
    }
}

/// A step the caller must schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingStep {
    pub run_token: u64,
    pub step: usize,
    /// Absolute due time
    pub due: Millis,
}

/// Phase-based state machine over a single [`RunState`]
///
/// # Example
/// ```
/// use agent_demo_core_rs::engine::{ActivityEngine, PhaseTable, StepOutcome};
/// use agent_demo_core_rs::models::{ActivityStatus, RunOrigin, RunPhase};
/// use agent_demo_core_rs::{ResultLookup, RngManager, RoleCatalog};
///
/// let catalog = RoleCatalog::classic();
/// let role = catalog.first().unwrap();
/// let results = ResultLookup::builtin();
/// let mut rng = RngManager::new(12345);
/// let mut engine = ActivityEngine::new(PhaseTable::classic());
///
/// let pending = engine.start(role, "制定一个新产品的市场进入策略", RunOrigin::Manual, 0, &mut rng);
/// assert_eq!(pending.len(), 4);
///
/// for step in &pending {
///     let outcome = engine.apply(step.run_token, step.step, &mut rng, &results);
///     if outcome == StepOutcome::Completed {
///         assert!(engine
///             .state()
///             .records
///             .iter()
///             .all(|r| r.status() == ActivityStatus::Completed && r.result().is_some()));
///     }
/// }
/// assert_eq!(engine.state().phase, RunPhase::Idle);
/// ```
#[derive(Debug, Clone)]
pub struct ActivityEngine {
    phases: PhaseTable,
    state: RunState,
}

impl ActivityEngine {
    pub fn new(phases: PhaseTable) -> Self {
        Self {
            phases,
            state: RunState::default(),
        }
    }

    pub fn phases(&self) -> &PhaseTable {
        &self.phases
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    /// Token of the live (or most recently started) run
    pub fn current_token(&self) -> u64 {
        self.state.token
    }

    /// Start a run of `role` on `query` at time `now`
    ///
    /// Any in-flight run is superseded: its token stops matching, so its
    /// pending steps become no-ops. Each record picks its task label here.
    pub fn start(
        &mut self,
        role: &Role,
        query: &str,
        origin: RunOrigin,
        now: Millis,
        rng: &mut RngManager,
    ) -> Vec<PendingStep> {
        self.state.clear();
        self.state.token += 1;

        let records = role
            .agents
            .iter()
            .map(|agent| {
                let task = rng.pick(&agent.tasks).cloned().unwrap_or_default();
                ActivityRecord::new(agent.clone(), task)
            })
            .collect();

        self.state.phase = RunPhase::Running;
        self.state.origin = Some(origin);
        self.state.role_id = Some(role.id.clone());
        self.state.query = query.to_string();
        self.state.started_at = now;
        self.state.records = records;
        self.state.delivery = Some(role.delivery.clone());

        info!(
            run_token = self.state.token,
            role = %role.id,
            agents = self.state.records.len(),
            ?origin,
            "run started"
        );

        let token = self.state.token;
        self.phases
            .steps()
            .iter()
            .enumerate()
            .map(|(step, phase)| PendingStep {
                run_token: token,
                step,
                due: now.saturating_add(phase.offset),
            })
            .collect()
    }

    /// Apply step `step` of run `run_token`
    ///
    /// Returns [`StepOutcome::Stale`] without touching state when the token is
    /// not the live run's or the run has already reset.
    pub fn apply(
        &mut self,
        run_token: u64,
        step: usize,
        rng: &mut RngManager,
        results: &ResultLookup,
    ) -> StepOutcome {
        if run_token != self.state.token || self.state.is_idle() {
            return StepOutcome::Stale;
        }
        let Some(phase) = self.phases.step(step).copied() else {
            return StepOutcome::Stale;
        };

        debug!(run_token, step, action = phase.action.name(), "applying phase step");

        match phase.action {
            PhaseAction::Advance { layer, progress } => {
                let mut records_changed = 0;
                for record in self
                    .state
                    .records
                    .iter_mut()
                    .filter(|r| layer.map_or(true, |l| r.layer() == l))
                {
                    let before = (record.status(), record.progress());
                    record.advance(progress);
                    if (record.status(), record.progress()) != before {
                        records_changed += 1;
                    }
                }
                StepOutcome::Advanced { records_changed }
            }
            PhaseAction::Complete => {
                let query = self.state.query.clone();
                for record in &mut self.state.records {
                    let result = results.lookup(&record.task, &query, rng);
                    record.complete(result);
                }
                self.state.phase = RunPhase::Completed;
                info!(run_token, "run completed");
                StepOutcome::Completed
            }
            PhaseAction::Deliver => {
                self.state.phase = RunPhase::Delivered;
                StepOutcome::Delivered
            }
            PhaseAction::Reset => {
                self.state.clear();
                info!(run_token, "run reset");
                StepOutcome::Reset
            }
        }
    }
}
