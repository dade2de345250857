//! Session configuration
//!
//! A [`DemoConfig`] bundles everything that distinguishes one demo variant
//! from another: the role catalog, the canned results, the phase table, the
//! automatic loop cadence and the RNG seed. Presets reproduce the two
//! observed variants; anything else can be loaded from JSON.

use crate::catalog::{CatalogError, RoleCatalog};
use crate::core::time::Millis;
use crate::engine::{PhaseTable, PhaseTableError};
use crate::results::ResultLookup;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation error
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid phase table: {0}")]
    Phases(#[from] PhaseTableError),

    #[error("Initial role {0} is not in the catalog")]
    UnknownInitialRole(String),

    #[error("Fixed automatic period must be positive")]
    ZeroPeriod,

    #[error("Fixed automatic period {period} ms is shorter than a run ({run} ms)")]
    PeriodShorterThanRun { period: Millis, run: Millis },
}

/// When the automatic loop starts its next cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "ms", rename_all = "snake_case")]
pub enum AutoCadence {
    /// A new cycle every `ms` after the previous cycle started
    FixedPeriod(Millis),

    /// A new cycle `ms` after the previous run reset
    AfterReset(Millis),
}

/// Complete session configuration
///
/// # Example
/// ```
/// use agent_demo_core_rs::{AutoCadence, DemoConfig};
///
/// let config = DemoConfig::role_catalog();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.cadence, AutoCadence::AfterReset(4_000));
///
/// let json = serde_json::to_string(&config).unwrap();
/// let parsed = DemoConfig::from_json(&json).unwrap();
/// assert_eq!(parsed, config);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Free-form name of the variant, shown by drivers
    pub variant: String,

    pub catalog: RoleCatalog,

    #[serde(default = "ResultLookup::builtin")]
    pub results: ResultLookup,

    pub phases: PhaseTable,

    pub cadence: AutoCadence,

    /// Seed for every random pick in the session
    #[serde(default)]
    pub rng_seed: u64,

    /// Role selected at creation; the first catalog role when `None`
    #[serde(default)]
    pub initial_role: Option<String>,
}

impl DemoConfig {
    /// Three agents, one layer, a cycle every 8000 ms
    pub fn classic() -> Self {
        Self {
            variant: "classic".to_string(),
            catalog: RoleCatalog::classic(),
            results: ResultLookup::builtin(),
            phases: PhaseTable::classic(),
            cadence: AutoCadence::FixedPeriod(8_000),
            rng_seed: 0,
            initial_role: None,
        }
    }

    /// Four roles, three layers, delivery phase, next cycle 4000 ms after reset
    pub fn role_catalog() -> Self {
        Self {
            variant: "role-catalog".to_string(),
            catalog: RoleCatalog::builtin(),
            results: ResultLookup::builtin(),
            phases: PhaseTable::role_catalog(),
            cadence: AutoCadence::AfterReset(4_000),
            rng_seed: 0,
            initial_role: None,
        }
    }

    /// Preset by variant name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "classic" => Some(Self::classic()),
            "role-catalog" | "role_catalog" => Some(Self::role_catalog()),
            _ => None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    pub fn with_initial_role(mut self, role_id: &str) -> Self {
        self.initial_role = Some(role_id.to_string());
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.catalog.validate()?;
        self.phases.validate()?;

        if let Some(role_id) = &self.initial_role {
            if self.catalog.get(role_id).is_none() {
                return Err(ConfigError::UnknownInitialRole(role_id.clone()));
            }
        }

        if let AutoCadence::FixedPeriod(period) = self.cadence {
            if period == 0 {
                return Err(ConfigError::ZeroPeriod);
            }
            // Cycles must not start before the previous run has reset
            let run = self.phases.reset_offset().unwrap_or(0);
            if period < run {
                return Err(ConfigError::PeriodShorterThanRun { period, run });
            }
        }

        Ok(())
    }
}
