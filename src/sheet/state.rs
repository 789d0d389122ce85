//! Sheet state machine states

use serde::{Deserialize, Serialize};

/// State of the sheet
///
/// `Collapsed` and `Expanded` are resting states. `Dragging` and `Settling`
/// are transient: the sheet is following a pointer or animating towards a
/// resting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SheetState {
    #[default]
    Collapsed,
    Dragging,
    Settling,
    Expanded,
}

impl SheetState {
    /// Stable numeric value, matches declaration order
    pub fn value(self) -> u8 {
        match self {
            SheetState::Collapsed => 0,
            SheetState::Dragging => 1,
            SheetState::Settling => 2,
            SheetState::Expanded => 3,
        }
    }

    /// Whether the sheet can rest in this state
    pub fn is_terminal(self) -> bool {
        matches!(self, SheetState::Collapsed | SheetState::Expanded)
    }

    pub fn is_moving(self) -> bool {
        matches!(self, SheetState::Dragging | SheetState::Settling)
    }
}
