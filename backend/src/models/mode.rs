//! Automatic vs manual driving of the demo

use serde::{Deserialize, Serialize};

/// Who drives the demo
///
/// The demo starts automatic. Any edit or manual submit flips it to manual,
/// and only an explicit enable brings it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoMode {
    #[default]
    Automatic,
    Manual,
}

impl DemoMode {
    pub fn is_automatic(&self) -> bool {
        matches!(self, DemoMode::Automatic)
    }
}
