//! Demo session: the orchestration context
//!
//! A [`DemoSession`] owns every piece of mutable demo state (clock, timer
//! queue, RNG, selected role, mode flag, typing sequence, live run, event log)
//! and is the only thing that mutates it. Its lifecycle is explicit:
//!
//! ```text
//! DemoSession::new(config)        create; first automatic cycle due at t=0
//!   select_role / submit_query /
//!   edit_input / enable_auto_demo inbound events
//!   advance_by / advance_to       let simulated time pass, firing due tasks
//!   snapshot                      read-only projection for rendering
//! dispose()                       drop pending work, hand back the event log
//! ```
//!
//! # Cancellation
//!
//! Three independent sequences can have tasks parked in the timer queue: the
//! typing sequence, the live run's phase steps, and the automatic loop. Each
//! has its own monotonic token. Superseding a sequence bumps its token; when a
//! parked task fires with an old token it is logged as a stale callback and
//! does nothing else.

mod auto_loop;
mod snapshot;

pub use auto_loop::AutoDemoLoop;
pub use snapshot::{DemoSnapshot, RecordView};

use crate::catalog::RoleCatalog;
use crate::config::{ConfigError, DemoConfig};
use crate::core::scheduler::{ScheduledTask, TimerQueue};
use crate::core::time::{Millis, SimClock};
use crate::engine::{ActivityEngine, PhaseAction, StepOutcome};
use crate::models::activity::{RunOrigin, RunState};
use crate::models::event::{DemoEvent, EventLog};
use crate::models::mode::DemoMode;
use crate::models::role::Role;
use crate::results::ResultLookup;
use crate::rng::RngManager;
use crate::typing::TypingSimulator;
use thiserror::Error;
use tracing::{debug, info, trace};
use uuid::Uuid;

/// Errors returned by inbound events
#[derive(Debug, Error, PartialEq)]
pub enum DemoError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

/// What a manual submit did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A run started with this token
    Started { run_token: u64 },

    /// Empty or whitespace-only text; nothing changed
    IgnoredEmpty,

    /// A manual run is still in progress; nothing changed
    IgnoredBusy,
}

/// Orchestration context for one demo instance
pub struct DemoSession {
    session_id: Uuid,
    variant: String,
    clock: SimClock,
    timers: TimerQueue,
    rng: RngManager,
    catalog: RoleCatalog,
    results: ResultLookup,
    role_index: usize,
    auto: AutoDemoLoop,
    typing: TypingSimulator,
    engine: ActivityEngine,
    current_query: String,
    event_log: EventLog,
}

impl DemoSession {
    /// Create a session in automatic mode
    ///
    /// The first automatic cycle is due at t=0 and fires on the first call to
    /// [`advance_to`](Self::advance_to) or [`advance_by`](Self::advance_by).
    ///
    /// # Example
    ///
    /// ```rust
    /// use agent_demo_core_rs::{DemoConfig, DemoSession};
    /// use agent_demo_core_rs::models::{DemoMode, RunPhase};
    ///
    /// let mut session = DemoSession::new(DemoConfig::classic().with_seed(7)).unwrap();
    /// session.advance_to(0);
    ///
    /// let snapshot = session.snapshot();
    /// assert_eq!(snapshot.mode, DemoMode::Automatic);
    /// assert_eq!(snapshot.phase, RunPhase::Running);
    /// assert_eq!(snapshot.current_query, "帮我分析一下电动汽车行业的投资机会");
    /// ```
    pub fn new(config: DemoConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let role_index = match &config.initial_role {
            Some(id) => config
                .catalog
                .ids()
                .position(|candidate| candidate == id.as_str())
                .ok_or_else(|| ConfigError::UnknownInitialRole(id.clone()))?,
            None => 0,
        };

        let mut session = Self {
            session_id: Uuid::new_v4(),
            variant: config.variant,
            clock: SimClock::new(),
            timers: TimerQueue::new(),
            rng: RngManager::new(config.rng_seed),
            catalog: config.catalog,
            results: config.results,
            role_index,
            auto: AutoDemoLoop::new(config.cadence),
            typing: TypingSimulator::new(),
            engine: ActivityEngine::new(config.phases),
            current_query: String::new(),
            event_log: EventLog::new(),
        };

        info!(
            session = %session.session_id,
            variant = %session.variant,
            role = %session.current_role().id,
            "demo session created"
        );

        let loop_token = session.auto.token();
        session
            .timers
            .schedule(0, ScheduledTask::AutoCycle { loop_token });

        Ok(session)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    pub fn mode(&self) -> DemoMode {
        self.auto.mode()
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    pub fn current_role(&self) -> &Role {
        &self.catalog.roles()[self.role_index]
    }

    pub fn run_state(&self) -> &RunState {
        self.engine.state()
    }

    pub fn displayed_input(&self) -> &str {
        self.typing.displayed()
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Pending timer tasks, stale ones included
    pub fn pending_tasks(&self) -> impl Iterator<Item = (Millis, &ScheduledTask)> {
        self.timers.iter()
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.timers.next_due()
    }

    /// Read-only projection for rendering
    pub fn snapshot(&self) -> DemoSnapshot {
        let run = self.engine.state();
        DemoSnapshot {
            time: self.clock.now(),
            role_id: self.current_role().id.clone(),
            mode: self.auto.mode(),
            displayed_input: self.typing.displayed().to_string(),
            typing: self.typing.is_active(),
            current_query: self.current_query.clone(),
            phase: run.phase,
            run_token: run.token,
            run_role_id: run.role_id.clone(),
            records: run.records.iter().map(RecordView::from).collect(),
            delivery: run.delivery().cloned(),
            next_query_index: self.auto.next_index(),
        }
    }

    // ========================================================================
    // Inbound Events
    // ========================================================================

    /// Select the role whose roster and sample queries the demo uses
    ///
    /// Restarts the automatic cycle at the role's first sample query and stops
    /// a typing sequence in progress. A run already in flight keeps the role it
    /// started with.
    pub fn select_role(&mut self, role_id: &str) -> Result<(), DemoError> {
        let index = self
            .catalog
            .ids()
            .position(|id| id == role_id)
            .ok_or_else(|| DemoError::UnknownRole(role_id.to_string()))?;

        if index == self.role_index {
            return Ok(());
        }

        self.role_index = index;
        self.auto.reset_index();
        if let Some(typed_chars) = self.typing.cancel() {
            self.typing.overwrite("");
            self.log_event(DemoEvent::TypingCancelled {
                time: self.now(),
                typed_chars,
            });
        }

        info!(role = role_id, "role selected");
        self.log_event(DemoEvent::RoleSelected {
            time: self.now(),
            role_id: role_id.to_string(),
        });
        Ok(())
    }

    /// Manual submit of `text`
    ///
    /// Blank text is ignored outright. While a manually started run is in
    /// progress further submits are ignored; an automatic run in progress is
    /// superseded instead.
    pub fn submit_query(&mut self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            self.log_event(DemoEvent::SubmitIgnored {
                time: self.now(),
                reason: "empty".to_string(),
            });
            return SubmitOutcome::IgnoredEmpty;
        }

        let run = self.engine.state();
        if !run.is_idle() && run.origin == Some(RunOrigin::Manual) {
            debug!(run_token = run.token, "submit ignored, manual run in progress");
            self.log_event(DemoEvent::SubmitIgnored {
                time: self.now(),
                reason: "busy".to_string(),
            });
            return SubmitOutcome::IgnoredBusy;
        }

        self.switch_to_manual("manual_submit");
        self.typing.overwrite(text);
        self.current_query = text.to_string();

        let role = self.current_role().clone();
        let run_token = self.start_run(&role, text, RunOrigin::Manual);
        SubmitOutcome::Started { run_token }
    }

    /// The user changed the input field
    pub fn edit_input(&mut self, text: &str) {
        self.switch_to_manual("edit_input");
        self.typing.overwrite(text);
    }

    /// Turn automatic mode back on
    pub fn enable_auto_demo(&mut self) {
        if !self.auto.enable() {
            return;
        }

        info!("automatic demo enabled");
        self.log_event(DemoEvent::ModeChanged {
            time: self.now(),
            mode: DemoMode::Automatic,
            cause: "enable_auto_demo".to_string(),
        });

        if let Some(due) = self.auto.first_due(self.now(), self.engine.is_idle()) {
            let loop_token = self.auto.token();
            self.timers.schedule(due, ScheduledTask::AutoCycle { loop_token });
        }
    }

    // ========================================================================
    // Time
    // ========================================================================

    /// Let `delta` milliseconds pass
    pub fn advance_by(&mut self, delta: Millis) {
        let target = self.now().saturating_add(delta);
        self.advance_to(target);
    }

    /// Let time pass until `target`, firing every task due on the way
    ///
    /// Tasks scheduled while dispatching are fired too if they fall due before
    /// `target`. Targets in the past are ignored.
    pub fn advance_to(&mut self, target: Millis) {
        if target < self.now() {
            return;
        }
        while let Some((due, task)) = self.timers.pop_due(target) {
            self.clock.advance_to(due.max(self.now()));
            self.dispatch(task);
        }
        self.clock.advance_to(target);
    }

    /// Fire tasks until the engine is idle and nothing is being typed
    ///
    /// Stops at `limit` if that never happens. Returns whether the session
    /// ended up quiescent.
    pub fn run_until_idle(&mut self, limit: Millis) -> bool {
        let now = self.now();
        self.advance_to(now);
        loop {
            if self.engine.is_idle() && !self.typing.is_active() {
                return true;
            }
            match self.timers.next_due() {
                Some(due) if due <= limit => {
                    if let Some((due, task)) = self.timers.pop_due(due) {
                        self.clock.advance_to(due.max(self.now()));
                        self.dispatch(task);
                    }
                }
                _ => {
                    self.advance_to(limit);
                    return self.engine.is_idle() && !self.typing.is_active();
                }
            }
        }
    }

    /// End the session
    ///
    /// Pending tasks are dropped and the event log is handed back.
    pub fn dispose(mut self) -> EventLog {
        let dropped = self.timers.pending();
        self.timers.clear();
        info!(session = %self.session_id, dropped, "demo session disposed");
        self.event_log
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    fn dispatch(&mut self, task: ScheduledTask) {
        match task {
            ScheduledTask::TypeNextChar { typing_token } => self.on_type_next_char(typing_token),
            ScheduledTask::Phase { run_token, step } => self.on_phase(run_token, step),
            ScheduledTask::AutoCycle { loop_token } => self.on_auto_cycle(loop_token),
        }
    }

    fn on_type_next_char(&mut self, typing_token: u64) {
        if typing_token != self.typing.token() || !self.auto.is_automatic() {
            self.log_stale(ScheduledTask::TypeNextChar { typing_token });
            return;
        }

        let Some(typed) = self.typing.type_next(&mut self.rng) else {
            self.log_stale(ScheduledTask::TypeNextChar { typing_token });
            return;
        };

        trace!(ch = %typed.ch, delay = typed.delay_after, "typed");
        if self.typing.is_active() {
            let due = self.now().saturating_add(typed.delay_after);
            self.timers
                .schedule(due, ScheduledTask::TypeNextChar { typing_token });
        } else {
            self.log_event(DemoEvent::TypingFinished { time: self.now() });
        }
    }

    fn on_phase(&mut self, run_token: u64, step: usize) {
        let origin = self.engine.state().origin;
        let outcome = self
            .engine
            .apply(run_token, step, &mut self.rng, &self.results);

        if outcome.is_stale() {
            self.log_stale(ScheduledTask::Phase { run_token, step });
            return;
        }

        let action = self
            .engine
            .phases()
            .step(step)
            .map(|s| s.action)
            .unwrap_or(PhaseAction::Reset);
        let records_changed = match outcome {
            StepOutcome::Advanced { records_changed } => records_changed,
            StepOutcome::Completed => self.engine.state().records.len(),
            _ => 0,
        };
        let time = self.now();
        self.log_event(DemoEvent::PhaseApplied {
            time,
            run_token,
            step,
            action: action.name().to_string(),
            records_changed,
        });

        match outcome {
            StepOutcome::Completed => {
                self.log_event(DemoEvent::RunCompleted { time, run_token });
            }
            StepOutcome::Delivered => {
                self.log_event(DemoEvent::RunDelivered { time, run_token });
            }
            StepOutcome::Reset => {
                self.log_event(DemoEvent::RunReset { time, run_token });
                self.on_run_reset(origin);
            }
            StepOutcome::Advanced { .. } | StepOutcome::Stale => {}
        }
    }

    /// Follow-up of a run reset
    ///
    /// Only a manually submitted run clears the input when it resets. An
    /// automatic run the user interrupted leaves whatever they typed.
    fn on_run_reset(&mut self, origin: Option<RunOrigin>) {
        if self.auto.is_automatic() {
            if let Some(due) = self.auto.after_reset(self.now()) {
                let loop_token = self.auto.token();
                self.timers.schedule(due, ScheduledTask::AutoCycle { loop_token });
            }
        }
        if origin == Some(RunOrigin::Manual) && !self.typing.is_active() {
            self.current_query.clear();
            self.typing.overwrite("");
        }
    }

    fn on_auto_cycle(&mut self, loop_token: u64) {
        if !self.auto.accepts(loop_token) {
            self.log_stale(ScheduledTask::AutoCycle { loop_token });
            return;
        }

        let role = self.current_role().clone();
        let Some((query_index, query)) = self.auto.take_next(&role) else {
            return;
        };

        info!(role = %role.id, query_index, "automatic cycle");
        self.log_event(DemoEvent::AutoCycleStarted {
            time: self.now(),
            role_id: role.id.clone(),
            query_index,
            query: query.clone(),
        });

        self.current_query = query.clone();
        self.begin_typing(&query);
        self.start_run(&role, &query, RunOrigin::Automatic);

        if let Some(due) = self.auto.after_cycle(self.now()) {
            self.timers.schedule(due, ScheduledTask::AutoCycle { loop_token });
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn begin_typing(&mut self, target: &str) {
        if let Some(typed_chars) = self.typing.cancel() {
            self.log_event(DemoEvent::TypingCancelled {
                time: self.now(),
                typed_chars,
            });
        }
        let typing_token = self.typing.start(target);
        self.log_event(DemoEvent::TypingStarted {
            time: self.now(),
            target: target.to_string(),
        });
        self.timers
            .schedule(self.now(), ScheduledTask::TypeNextChar { typing_token });
    }

    fn start_run(&mut self, role: &Role, query: &str, origin: RunOrigin) -> u64 {
        let now = self.now();
        let superseded = (!self.engine.is_idle()).then(|| self.engine.current_token());

        let pending = self.engine.start(role, query, origin, now, &mut self.rng);
        let run_token = self.engine.current_token();

        if let Some(old) = superseded {
            info!(run_token = old, by = run_token, "run superseded");
            self.log_event(DemoEvent::RunSuperseded {
                time: now,
                run_token: old,
                by_token: run_token,
            });
        }

        for step in pending {
            self.timers.schedule(
                step.due,
                ScheduledTask::Phase {
                    run_token: step.run_token,
                    step: step.step,
                },
            );
        }

        self.log_event(DemoEvent::RunStarted {
            time: now,
            run_token,
            role_id: role.id.clone(),
            query: query.to_string(),
            origin,
            num_agents: self.engine.state().records.len(),
        });
        run_token
    }

    fn switch_to_manual(&mut self, cause: &str) {
        if let Some(typed_chars) = self.typing.cancel() {
            self.log_event(DemoEvent::TypingCancelled {
                time: self.now(),
                typed_chars,
            });
        }
        if self.auto.disable() {
            info!(cause, "switched to manual mode");
            self.log_event(DemoEvent::ModeChanged {
                time: self.now(),
                mode: DemoMode::Manual,
                cause: cause.to_string(),
            });
        }
    }

    fn log_stale(&mut self, task: ScheduledTask) {
        trace!(kind = task.kind(), token = task.token(), "stale callback discarded");
        self.log_event(DemoEvent::StaleCallback {
            time: self.now(),
            kind: task.kind().to_string(),
            token: task.token(),
        });
    }

    fn log_event(&mut self, event: DemoEvent) {
        self.event_log.log(event);
    }
}
