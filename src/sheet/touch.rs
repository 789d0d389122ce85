//! Pointer events as seen by the sheet controller

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single pointer event in window coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub action: TouchAction,
    pub pointer_id: u32,
    pub x: f32,
    pub y: f32,
    /// Monotonic event time
    pub time: Duration,
}

impl TouchEvent {
    pub fn new(action: TouchAction, pointer_id: u32, x: f32, y: f32, time: Duration) -> Self {
        Self {
            action,
            pointer_id,
            x,
            y,
            time,
        }
    }

    pub fn down(x: f32, y: f32, time: Duration) -> Self {
        Self::new(TouchAction::Down, 0, x, y, time)
    }

    pub fn moved(x: f32, y: f32, time: Duration) -> Self {
        Self::new(TouchAction::Move, 0, x, y, time)
    }

    pub fn up(x: f32, y: f32, time: Duration) -> Self {
        Self::new(TouchAction::Up, 0, x, y, time)
    }

    pub fn cancel(x: f32, y: f32, time: Duration) -> Self {
        Self::new(TouchAction::Cancel, 0, x, y, time)
    }

    #[inline]
    pub fn is_down(&self) -> bool {
        self.action == TouchAction::Down
    }

    /// Up or cancel: the gesture is over
    #[inline]
    pub fn ends_gesture(&self) -> bool {
        matches!(self.action, TouchAction::Up | TouchAction::Cancel)
    }
}

/// Axes a nested scroll may run along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollAxes {
    pub horizontal: bool,
    pub vertical: bool,
}

impl ScrollAxes {
    pub const VERTICAL: ScrollAxes = ScrollAxes {
        horizontal: false,
        vertical: true,
    };
    pub const HORIZONTAL: ScrollAxes = ScrollAxes {
        horizontal: true,
        vertical: false,
    };
}

/// Whether a nested scroll is driven by a finger or by a fling animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollKind {
    Touch,
    NonTouch,
}
