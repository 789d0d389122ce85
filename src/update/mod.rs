//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod pointer;
mod sheet;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use pointer::{update_pointer, update_wheel};
pub use sheet::update_sheet;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let result = match msg {
        Msg::Pointer(event) => pointer::update_pointer(model, event),
        Msg::Wheel { x, y, dy } => pointer::update_wheel(model, x, y, dy),
        Msg::Sheet(m) => sheet::update_sheet(model, m),
        Msg::App(m) => app::update_app(model, m),
    };

    model.layout_if_needed();
    let reported = model.drain_sheet_events();

    let follow_up = if model.is_animating() {
        Some(Cmd::Animate)
    } else if reported {
        Some(Cmd::Redraw)
    } else {
        None
    };
    match (&result, &follow_up) {
        (Some(cmd), Some(extra)) if cmd == extra => result,
        _ => Cmd::merge(result, follow_up),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after sheet snapshots and logs diffs.
/// Frame ticks and pointer moves are too frequent for the message log.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    use crate::messages::AppMsg;
    use crate::sheet::TouchAction;

    let is_noisy = match &msg {
        Msg::App(AppMsg::Frame(_)) => true,
        Msg::Pointer(event) => event.action == TouchAction::Move,
        _ => false,
    };

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = model.snapshot();

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = model.snapshot();
    if let Some(diff) = before.diff(&after) {
        debug!(target: "sheet", %diff, "state changed");
    }
    check_invariants(&after, &msg_name);

    result
}

/// Log offsets that escaped their range (debug builds only)
#[cfg(debug_assertions)]
fn check_invariants(snapshot: &crate::sheet::SheetSnapshot, context: &str) {
    const EPSILON: f32 = 0.5;

    if snapshot.expanded_offset > snapshot.collapsed_offset + EPSILON {
        tracing::warn!(
            context,
            expanded = snapshot.expanded_offset,
            collapsed = snapshot.collapsed_offset,
            "expanded offset below collapsed offset"
        );
    }
    if let Some(top) = snapshot.top {
        let in_range = top >= snapshot.expanded_offset - EPSILON
            && top <= snapshot.collapsed_offset + EPSILON;
        if !in_range {
            tracing::warn!(
                context,
                top,
                expanded = snapshot.expanded_offset,
                collapsed = snapshot.collapsed_offset,
                "sheet top outside its drag range"
            );
        }
    }
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Sheet::SetState(Expanded)`
/// - `App::Resize(1920, 1080)`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Pointer(event) => format!("Pointer::{:?}", event.action),
        Msg::Wheel { dy, .. } => format!("Wheel({})", dy),
        Msg::Sheet(m) => format!("Sheet::{:?}", m),
        Msg::App(m) => format!("App::{:?}", m),
    }
}
