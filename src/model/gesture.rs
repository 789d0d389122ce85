//! Pointer routing state for the demo host
//!
//! The host plays the part of a platform view system: each pointer event is
//! first offered to the sheet's interceptor; events the sheet does not claim
//! go to the list under the press, which turns them into nested scrolling.

use std::time::Duration;

use crate::scene::NodeId;
use crate::sheet::VelocityTracker;

/// Where the events of the current gesture are delivered
#[derive(Debug, Default, Clone)]
pub struct GestureRouting {
    /// The sheet intercepted the gesture; events go to its touch handler
    pub claimed: bool,
    /// List that received the press
    pub list: Option<NodeId>,
    /// The list moved past its touch slop and is scrolling
    pub list_scrolling: bool,
    pub down_y: f32,
    pub last_y: f32,
    pub velocity: VelocityTracker,
}

impl GestureRouting {
    /// Start routing a new gesture pressed at `y`
    pub fn begin(&mut self, y: f32) {
        self.claimed = false;
        self.list = None;
        self.list_scrolling = false;
        self.down_y = y;
        self.last_y = y;
        self.velocity.clear();
    }

    pub fn end(&mut self) {
        self.claimed = false;
        self.list = None;
        self.list_scrolling = false;
    }
}

/// Per-second decay of the fling velocity
const FLING_FRICTION: f32 = 4.0;
/// Flings slower than this (px/s) stop
const FLING_MIN_VELOCITY: f32 = 20.0;

/// Decaying list fling after a release the sheet did not consume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListFling {
    pub target: NodeId,
    /// Scroll velocity, px/s; positive scrolls towards the end
    pub velocity: f32,
}

impl ListFling {
    /// Scroll distance for this frame, or `None` once the fling has died out
    pub fn step(&mut self, dt: Duration) -> Option<f32> {
        if self.velocity.abs() < FLING_MIN_VELOCITY {
            return None;
        }
        let secs = dt.as_secs_f32();
        let distance = self.velocity * secs;
        self.velocity *= (-FLING_FRICTION * secs).exp();
        Some(distance)
    }
}
