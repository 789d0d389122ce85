//! Lightweight snapshot of the sheet for diffing and debug dumps

use serde::Serialize;

use super::state::SheetState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetSnapshot {
    pub state: SheetState,
    /// Current top of the sheet, `None` before the first layout
    pub top: Option<f32>,
    pub height: Option<f32>,
    pub collapsed_offset: f32,
    pub expanded_offset: f32,
    pub parent_height: f32,
    pub inset_top: f32,
    pub inset_bottom: f32,
    pub slide_percentage: f32,
    pub scrim_visible: bool,
    pub settling_target: Option<SheetState>,
}

impl SheetSnapshot {
    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &SheetSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.state != other.state {
            changes.push(format!("state: {:?} → {:?}", self.state, other.state));
        }
        if self.top != other.top {
            changes.push(format!("top: {:?} → {:?}", self.top, other.top));
        }
        if self.collapsed_offset != other.collapsed_offset
            || self.expanded_offset != other.expanded_offset
        {
            changes.push(format!(
                "offsets: [{}, {}] → [{}, {}]",
                self.expanded_offset,
                self.collapsed_offset,
                other.expanded_offset,
                other.collapsed_offset
            ));
        }
        if self.scrim_visible != other.scrim_visible {
            let status = if other.scrim_visible { "shown" } else { "hidden" };
            changes.push(format!("scrim {}", status));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
