//! App message handlers (window events, frame loop)

use std::time::Duration;

use crate::commands::Cmd;
use crate::messages::AppMsg;
use crate::model::AppModel;

pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::Resize(width, height) => {
            model.resize(width, height);
            Some(Cmd::Redraw)
        }

        AppMsg::Frame(dt) => {
            #[cfg(feature = "frame-tracing")]
            let _span = tracing::trace_span!("frame", dt_ms = dt.as_secs_f32() * 1000.0).entered();

            model.layout_if_needed();
            let settling = model.sheet.on_animation_frame(&mut model.scene, dt);
            let flinging = step_fling(model, dt);
            if settling || flinging {
                Some(Cmd::Animate)
            } else {
                Some(Cmd::Redraw)
            }
        }

        AppMsg::DumpState => Some(Cmd::DumpState),

        AppMsg::Quit => Some(Cmd::Quit),
    }
}

/// Advance a list fling; returns `true` while it keeps going
fn step_fling(model: &mut AppModel, dt: Duration) -> bool {
    let Some(fling) = model.fling.as_mut() else {
        return false;
    };
    let target = fling.target;
    let scrolled = match fling.step(dt) {
        Some(distance) => model.scene.scroll_by(target, distance),
        None => 0.0,
    };
    // Hitting either end of the list stops the fling
    if scrolled == 0.0 {
        model.fling = None;
        return false;
    }
    true
}
