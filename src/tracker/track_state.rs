use serde::{Deserialize, Serialize};

/// Top-level mode of a tracking session. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingMode {
    /// Nothing running; falls back to auto-search unless the operator paused it
    #[default]
    Idle,
    /// Looking for a moving target in the foreground mask
    AutoSearching,
    /// Following an acquired target
    ActiveTracking,
    /// Operator is placing a region by hand
    ManualSelecting,
}

impl TrackingMode {
    pub fn is_tracking(self) -> bool {
        self == TrackingMode::ActiveTracking
    }

    pub fn is_selecting(self) -> bool {
        self == TrackingMode::ManualSelecting
    }
}
