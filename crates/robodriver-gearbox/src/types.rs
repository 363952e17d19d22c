//! Gear selection types

use serde::{Deserialize, Serialize};

pub use robodriver_model::{NEUTRAL_GEAR, REVERSE_GEAR};

pub const FIRST_GEAR: i32 = 1;

/// What the gearbox decided this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ShiftDecision {
    #[default]
    Hold,
    Up,
    Down,
    /// Leaving neutral or reverse for first gear
    Engage,
}

impl ShiftDecision {
    pub fn is_shift(self) -> bool {
        !matches!(self, ShiftDecision::Hold)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearSelection {
    pub gear: i32,
    pub decision: ShiftDecision,
}

impl GearSelection {
    pub fn hold(gear: i32) -> Self {
        Self {
            gear,
            decision: ShiftDecision::Hold,
        }
    }

    pub fn up(from: i32) -> Self {
        Self {
            gear: from.saturating_add(1),
            decision: ShiftDecision::Up,
        }
    }

    pub fn down(from: i32) -> Self {
        Self {
            gear: from.saturating_sub(1).max(FIRST_GEAR),
            decision: ShiftDecision::Down,
        }
    }

    pub fn engage() -> Self {
        Self {
            gear: FIRST_GEAR,
            decision: ShiftDecision::Engage,
        }
    }
}
