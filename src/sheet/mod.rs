//! Expanding bottom sheet
//!
//! The sheet rests either collapsed (showing only its measured content at the
//! bottom of the parent) or expanded (filling the parent down from the
//! expanded offset). In between it is `Dragging` under a pointer or nested
//! scroll, or `Settling` while an animation carries it to a resting state.
//!
//! - [`ExpandingSheet`]: the controller, driven by the host
//! - [`DragHelper`]: pointer capture, touch slop and settle animation
//! - [`SheetCallback`]: state and slide-position notifications

mod behavior;
mod callback;
mod core;
mod drag;
mod options;
mod release;
mod scroller;
mod settle;
mod snapshot;
mod state;
mod touch;
mod velocity;

pub use behavior::{ExpandingSheet, SCRIM_COLOR};
pub use callback::{SheetCallback, SheetEvent};
pub use drag::{
    DragCallback, DragHelper, DragState, MAX_FLING_VELOCITY, MIN_FLING_VELOCITY, TOUCH_SLOP,
};
pub use options::SheetOptions;
pub use release::{resolve_release_target, RELEASE_MIDPOINT};
pub use scroller::Scroller;
pub use settle::{PostedTask, SettleTracker, TaskQueue};
pub use snapshot::SheetSnapshot;
pub use state::SheetState;
pub use touch::{ScrollAxes, ScrollKind, TouchAction, TouchEvent};
pub use velocity::VelocityTracker;
