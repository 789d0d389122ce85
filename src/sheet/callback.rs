//! Notifications emitted by the sheet controller

use std::sync::mpsc::Sender;

use super::state::SheetState;

/// Events delivered to a [`SheetCallback`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetEvent {
    StateChanged(SheetState),
    /// How far the sheet is open: 0 collapsed, 1 expanded
    SlidePositionChanged(f32),
}

/// Receives state and position updates from the sheet
pub trait SheetCallback {
    fn on_state_changed(&mut self, _state: SheetState) {}

    fn on_slide_position_changed(&mut self, _percentage: f32) {}
}

/// Forward events into a channel; a disconnected receiver is ignored
impl SheetCallback for Sender<SheetEvent> {
    fn on_state_changed(&mut self, state: SheetState) {
        let _ = self.send(SheetEvent::StateChanged(state));
    }

    fn on_slide_position_changed(&mut self, percentage: f32) {
        let _ = self.send(SheetEvent::SlidePositionChanged(percentage));
    }
}
