//! Tests for pointer drags handled by the sheet itself

mod common;

use std::time::Duration;

use common::*;
use slide_sheet::sheet::{DragState, SheetOptions, SheetState, TouchEvent};

const X: f32 = 200.0;

#[test]
fn test_fast_upward_drag_past_midpoint_expands() {
    let mut h = Harness::new();
    let start = handle_y(COLLAPSED);
    h.drag(X, &[start, start - 80.0, start - 480.0]);

    // 80px were spent on touch slop while claiming the gesture
    assert_eq!(h.top(), COLLAPSED - 400.0);
    assert_eq!(h.sheet.state(), SheetState::Settling);

    h.settle();
    assert_eq!(h.sheet.state(), SheetState::Expanded);
    assert_eq!(h.top(), 0.0);
    assert_eq!(
        h.drain_states(),
        vec![
            SheetState::Dragging,
            SheetState::Settling,
            SheetState::Expanded
        ]
    );
}

#[test]
fn test_short_upward_drag_falls_back() {
    let mut h = Harness::new();
    let start = handle_y(COLLAPSED);
    h.drag(X, &[start, start - 80.0, start - 180.0]);

    assert!(h.top() < COLLAPSED);
    h.settle();
    assert_eq!(h.sheet.state(), SheetState::Collapsed);
    assert_eq!(h.top(), COLLAPSED);
}

#[test]
fn test_downward_drag_collapses_expanded_sheet() {
    let mut h = Harness::new();
    h.set_state(SheetState::Expanded);
    h.settle();
    h.drain();

    let start = handle_y(0.0);
    h.drag(X, &[start, start + 80.0, start + 580.0]);
    assert_eq!(h.top(), 500.0);

    h.settle();
    assert_eq!(h.sheet.state(), SheetState::Collapsed);
    assert_eq!(h.top(), COLLAPSED);
}

#[test]
fn test_drag_is_clamped_to_offsets() {
    let mut h = Harness::with_options(SheetOptions {
        top_offset: 100.0,
        ..Default::default()
    });
    let mut claimed = false;
    let start = handle_y(COLLAPSED);
    let t = Duration::from_millis;

    h.touch(TouchEvent::down(X, start, t(0)), &mut claimed);
    h.touch(TouchEvent::moved(X, start - 40.0, t(10)), &mut claimed);
    assert!(claimed);

    h.touch(TouchEvent::moved(X, -2000.0, t(20)), &mut claimed);
    assert_eq!(h.top(), 100.0);

    h.touch(TouchEvent::moved(X, 5000.0, t(30)), &mut claimed);
    assert_eq!(h.top(), COLLAPSED);
    assert_eq!(h.sheet.state(), SheetState::Dragging);
}

#[test]
fn test_press_without_movement_is_not_claimed() {
    let mut h = Harness::new();
    let mut claimed = false;
    let y = handle_y(COLLAPSED);

    h.touch(TouchEvent::down(X, y, Duration::ZERO), &mut claimed);
    h.touch(TouchEvent::moved(X, y - 3.0, Duration::from_millis(10)), &mut claimed);
    h.touch(TouchEvent::up(X, y - 3.0, Duration::from_millis(20)), &mut claimed);

    assert!(!claimed);
    assert_eq!(h.sheet.state(), SheetState::Collapsed);
    assert_eq!(h.top(), COLLAPSED);
}

#[test]
fn test_not_draggable_ignores_drags() {
    let mut h = Harness::with_options(SheetOptions {
        draggable: false,
        ..Default::default()
    });
    let start = handle_y(COLLAPSED);
    h.drag(X, &[start, start - 80.0, start - 480.0]);

    assert_eq!(h.sheet.state(), SheetState::Collapsed);
    assert_eq!(h.top(), COLLAPSED);
}

#[test]
fn test_press_on_settling_sheet_catches_it() {
    let mut h = Harness::new();
    h.set_state(SheetState::Expanded);
    for _ in 0..3 {
        h.layout_if_needed();
        h.sheet.on_animation_frame(&mut h.scene, FRAME);
    }
    let top = h.top();

    let mut claimed = false;
    h.touch(TouchEvent::down(X, handle_y(top), Duration::ZERO), &mut claimed);

    assert!(claimed);
    assert_eq!(h.sheet.drag_state(), Some(DragState::Dragging));
    assert_eq!(h.sheet.state(), SheetState::Dragging);

    // The interrupted settle does not complete on its own
    h.layout_if_needed();
    assert!(!h.sheet.on_animation_frame(&mut h.scene, FRAME));
    assert_eq!(h.sheet.state(), SheetState::Dragging);
    assert_eq!(h.top(), top);
}

#[test]
fn test_cancel_settles_by_position() {
    let mut h = Harness::new();
    let mut claimed = false;
    let start = handle_y(COLLAPSED);
    let t = Duration::from_millis;

    h.touch(TouchEvent::down(X, start, t(0)), &mut claimed);
    h.touch(TouchEvent::moved(X, start - 40.0, t(10)), &mut claimed);
    h.touch(TouchEvent::moved(X, start - 640.0, t(20)), &mut claimed);
    h.touch(TouchEvent::cancel(X, start - 640.0, t(30)), &mut claimed);

    // 160 / 760 is above the midpoint
    assert_eq!(h.top(), 160.0);
    h.settle();
    assert_eq!(h.sheet.state(), SheetState::Expanded);
}

#[test]
fn test_scrim_press_collapses_expanded_sheet() {
    let mut h = Harness::with_options(SheetOptions {
        use_scrim: true,
        top_offset: 100.0,
        ..Default::default()
    });
    h.set_state(SheetState::Expanded);
    h.settle();
    assert_eq!(h.top(), 100.0);

    let mut claimed = false;
    h.touch(TouchEvent::down(X, 50.0, Duration::ZERO), &mut claimed);
    assert!(claimed);

    h.settle();
    assert_eq!(h.sheet.state(), SheetState::Collapsed);
}

#[test]
fn test_mismatched_content_view_id_claims_everything() {
    let mut h = Harness::new();
    h.sheet.set_content_view_id(Some(99));

    let mut claimed = false;
    h.touch(TouchEvent::down(X, 10.0, Duration::ZERO), &mut claimed);
    assert!(claimed);

    // The sheet node carries view id 7
    let mut h = Harness::new();
    h.sheet.set_content_view_id(Some(7));
    let mut claimed = false;
    h.touch(TouchEvent::down(X, 10.0, Duration::ZERO), &mut claimed);
    assert!(!claimed);
}

#[test]
fn test_drag_outside_list_on_sheet_is_claimed_on_slop() {
    let mut h = Harness::new();
    let mut claimed = false;
    let y = handle_y(COLLAPSED);

    h.touch(TouchEvent::down(X, y, Duration::ZERO), &mut claimed);
    assert!(!claimed);
    h.touch(TouchEvent::moved(X, y - 20.0, Duration::from_millis(10)), &mut claimed);
    assert!(claimed);
}

#[test]
fn test_drag_on_scrolled_list_leaves_expanded_sheet_alone() {
    let mut h = Harness::new();
    h.set_state(SheetState::Expanded);
    h.settle();
    let list = h.list;
    h.scene.scroll_by(list, 300.0);

    let mut claimed = false;
    let start = list_y(0.0);
    let t = Duration::from_millis;
    h.touch(TouchEvent::down(X, start, t(0)), &mut claimed);
    h.touch(TouchEvent::moved(X, start + 80.0, t(10)), &mut claimed);
    h.touch(TouchEvent::moved(X, start + 400.0, t(20)), &mut claimed);
    h.touch(TouchEvent::up(X, start + 400.0, t(30)), &mut claimed);

    assert!(!claimed);
    assert_eq!(h.sheet.state(), SheetState::Expanded);
    assert_eq!(h.top(), 0.0);
}
