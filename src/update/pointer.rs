//! Pointer and wheel routing
//!
//! Emulates platform touch dispatch for the sheet: every event is offered to
//! the sheet's interceptor until it claims the gesture. Unclaimed presses on
//! the list become nested scrolling, which the sheet may partly consume.

use tracing::debug;

use crate::commands::Cmd;
use crate::model::{AppModel, ListFling};
use crate::sheet::{
    ScrollAxes, ScrollKind, TouchAction, TouchEvent, MAX_FLING_VELOCITY, MIN_FLING_VELOCITY,
    TOUCH_SLOP,
};

pub fn update_pointer(model: &mut AppModel, event: TouchEvent) -> Option<Cmd> {
    model.layout_if_needed();

    let AppModel {
        scene,
        sheet,
        gesture,
        fling,
        scale_factor,
        ..
    } = model;
    let scale = *scale_factor;

    if event.is_down() {
        *fling = None;
        gesture.begin(event.y);
    }
    gesture.velocity.add_movement(&event);

    if gesture.claimed {
        sheet.touch_event(scene, &event);
    } else if !gesture.list_scrolling && sheet.intercept_touch(scene, &event) {
        debug!(target: "gesture", action = ?event.action, "sheet claimed gesture");
        gesture.claimed = true;
        // The list loses the gesture
        if let Some(list) = gesture.list.take() {
            sheet.on_stop_nested_scroll(scene, list);
        }
        if event.is_down() {
            sheet.touch_event(scene, &event);
        }
    } else {
        match event.action {
            TouchAction::Down => {
                let list = sheet
                    .scroll_child(scene)
                    .filter(|list| scene.is_point_in_node(*list, event.x, event.y));
                if let Some(list) = list {
                    if sheet.on_start_nested_scroll(ScrollAxes::VERTICAL) {
                        gesture.list = Some(list);
                    }
                }
            }
            TouchAction::Move => {
                if let Some(list) = gesture.list {
                    if !gesture.list_scrolling
                        && (gesture.down_y - event.y).abs() > TOUCH_SLOP * scale
                    {
                        gesture.list_scrolling = true;
                    }
                    let dy = gesture.last_y - event.y;
                    if gesture.list_scrolling && dy != 0.0 {
                        let consumed =
                            sheet.on_nested_pre_scroll(scene, list, dy, ScrollKind::Touch);
                        scene.scroll_by(list, dy - consumed);
                    }
                }
            }
            TouchAction::Up | TouchAction::Cancel => {
                if let Some(list) = gesture.list.take() {
                    if gesture.list_scrolling && event.action == TouchAction::Up {
                        let (vx, vy) = gesture
                            .velocity
                            .clamped_velocity(MIN_FLING_VELOCITY * scale, MAX_FLING_VELOCITY * scale);
                        // Finger velocity runs opposite to scroll direction
                        let scroll_velocity = -vy;
                        if scroll_velocity != 0.0
                            && !sheet.on_nested_pre_fling(scene, list, -vx, scroll_velocity)
                        {
                            *fling = Some(ListFling {
                                target: list,
                                velocity: scroll_velocity,
                            });
                        }
                    }
                    sheet.on_stop_nested_scroll(scene, list);
                }
            }
        }
    }

    gesture.last_y = event.y;
    if event.ends_gesture() {
        gesture.end();
    }
    Some(Cmd::Redraw)
}

/// Mouse wheel over the list: one complete nested scroll per notch
pub fn update_wheel(model: &mut AppModel, x: f32, y: f32, dy: f32) -> Option<Cmd> {
    model.layout_if_needed();

    let AppModel {
        scene,
        sheet,
        fling,
        ..
    } = model;

    let list = sheet
        .scroll_child(scene)
        .filter(|list| scene.is_point_in_node(*list, x, y))?;

    *fling = None;
    if sheet.on_start_nested_scroll(ScrollAxes::VERTICAL) {
        let consumed = sheet.on_nested_pre_scroll(scene, list, dy, ScrollKind::Touch);
        scene.scroll_by(list, dy - consumed);
        sheet.on_stop_nested_scroll(scene, list);
    }
    Some(Cmd::Redraw)
}
