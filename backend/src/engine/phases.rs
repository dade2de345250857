//! Phase table: the timeline of a run as data
//!
//! A run is a list of `(offset, action)` steps measured from run start. The
//! engine schedules one timer per step when the run starts and applies the
//! action when the timer fires, provided the run is still the live one.
//!
//! Two presets reproduce the two demo variants:
//!
//! ```text
//! classic (single layer)          role catalog (three layers)
//! 1000  all → working, 20          1000  core → working, 30
//! 2000  all → 60                   2500  professional → 50, core → 60
//! 3000  complete                   4000  core → 90, professional → 70,
//! 4000  reset                            data source → 50
//!                                  5500  complete
//!                                  7000  deliver
//!                                  8500  reset
//! ```

use crate::core::time::Millis;
use crate::models::role::Layer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a step does to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PhaseAction {
    /// Move non-completed records of `layer` (every layer when `None`) to
    /// working and raise their progress to at least `progress`
    Advance {
        #[serde(default)]
        layer: Option<Layer>,
        progress: u8,
    },

    /// Complete every record and assign its result
    Complete,

    /// Expose the role's delivery metrics
    Deliver,

    /// Clear the run and return to idle
    Reset,
}

impl PhaseAction {
    pub fn name(&self) -> &'static str {
        match self {
            PhaseAction::Advance { .. } => "advance",
            PhaseAction::Complete => "complete",
            PhaseAction::Deliver => "deliver",
            PhaseAction::Reset => "reset",
        }
    }
}

/// One timed step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseStep {
    /// Milliseconds after run start
    pub offset: Millis,
    #[serde(flatten)]
    pub action: PhaseAction,
}

impl PhaseStep {
    pub fn advance(offset: Millis, layer: Option<Layer>, progress: u8) -> Self {
        Self {
            offset,
            action: PhaseAction::Advance { layer, progress },
        }
    }

    pub fn at(offset: Millis, action: PhaseAction) -> Self {
        Self { offset, action }
    }
}

/// Structural problems in a phase table
#[derive(Debug, Error, PartialEq)]
pub enum PhaseTableError {
    #[error("Phase table has no steps")]
    Empty,

    #[error("Step {step} at offset {offset} is earlier than the step before it")]
    OffsetsOutOfOrder { step: usize, offset: Millis },

    #[error("Step {step} advances to {progress}%, must be within 1..=100")]
    InvalidProgress { step: usize, progress: u8 },

    #[error("Phase table must contain exactly one complete step, found {0}")]
    CompleteCount(usize),

    #[error("Phase table may contain at most one deliver step, found {0}")]
    DeliverCount(usize),

    #[error("Deliver step {0} comes before the complete step")]
    DeliverBeforeComplete(usize),

    #[error("Phase table must end with its only reset step")]
    ResetNotLast,
}

/// Ordered steps of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhaseTable {
    steps: Vec<PhaseStep>,
}

impl PhaseTable {
    pub fn new(steps: Vec<PhaseStep>) -> Self {
        Self { steps }
    }

    /// Single-layer timeline of the three-agent dashboard
    pub fn classic() -> Self {
        Self::new(vec![
            PhaseStep::advance(1_000, None, 20),
            PhaseStep::advance(2_000, None, 60),
            PhaseStep::at(3_000, PhaseAction::Complete),
            PhaseStep::at(4_000, PhaseAction::Reset),
        ])
    }

    /// Three-layer timeline with a delivery phase
    pub fn role_catalog() -> Self {
        Self::new(vec![
            PhaseStep::advance(1_000, Some(Layer::Core), 30),
            PhaseStep::advance(2_500, Some(Layer::Professional), 50),
            PhaseStep::advance(2_500, Some(Layer::Core), 60),
            PhaseStep::advance(4_000, Some(Layer::Core), 90),
            PhaseStep::advance(4_000, Some(Layer::Professional), 70),
            PhaseStep::advance(4_000, Some(Layer::DataSource), 50),
            PhaseStep::at(5_500, PhaseAction::Complete),
            PhaseStep::at(7_000, PhaseAction::Deliver),
            PhaseStep::at(8_500, PhaseAction::Reset),
        ])
    }

    pub fn steps(&self) -> &[PhaseStep] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&PhaseStep> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Offset of the complete step
    pub fn complete_offset(&self) -> Option<Millis> {
        self.offset_of(PhaseAction::Complete)
    }

    /// Offset of the reset step, i.e. the length of a run
    pub fn reset_offset(&self) -> Option<Millis> {
        self.offset_of(PhaseAction::Reset)
    }

    fn offset_of(&self, action: PhaseAction) -> Option<Millis> {
        self.steps
            .iter()
            .find(|step| step.action == action)
            .map(|step| step.offset)
    }

    /// Check ordering and shape
    ///
    /// # Example
    /// ```
    /// use agent_demo_core_rs::engine::{PhaseAction, PhaseStep, PhaseTable, PhaseTableError};
    ///
    /// assert!(PhaseTable::classic().validate().is_ok());
    ///
    /// let backwards = PhaseTable::new(vec![
    ///     PhaseStep::at(3_000, PhaseAction::Complete),
    ///     PhaseStep::advance(1_000, None, 20),
    ///     PhaseStep::at(4_000, PhaseAction::Reset),
    /// ]);
    /// assert_eq!(
    ///     backwards.validate(),
    ///     Err(PhaseTableError::OffsetsOutOfOrder { step: 1, offset: 1_000 })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), PhaseTableError> {
        if self.steps.is_empty() {
            return Err(PhaseTableError::Empty);
        }

        let mut completes = 0;
        let mut delivers = 0;
        let mut resets = 0;
        let mut previous = 0;

        for (index, step) in self.steps.iter().enumerate() {
            if step.offset < previous {
                return Err(PhaseTableError::OffsetsOutOfOrder {
                    step: index,
                    offset: step.offset,
                });
            }
            previous = step.offset;

            match step.action {
                PhaseAction::Advance { progress, .. } => {
                    if progress == 0 || progress > 100 {
                        return Err(PhaseTableError::InvalidProgress {
                            step: index,
                            progress,
                        });
                    }
                }
                PhaseAction::Complete => completes += 1,
                PhaseAction::Deliver => {
                    if completes == 0 {
                        return Err(PhaseTableError::DeliverBeforeComplete(index));
                    }
                    delivers += 1;
                }
                PhaseAction::Reset => resets += 1,
            }
        }

        if completes != 1 {
            return Err(PhaseTableError::CompleteCount(completes));
        }
        if delivers > 1 {
            return Err(PhaseTableError::DeliverCount(delivers));
        }
        let ends_with_reset = matches!(
            self.steps.last().map(|step| step.action),
            Some(PhaseAction::Reset)
        );
        if resets != 1 || !ends_with_reset {
            return Err(PhaseTableError::ResetNotLast);
        }

        Ok(())
    }
}
