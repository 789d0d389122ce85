//! Tests for nested scrolling between the list and the sheet

mod common;

use common::*;
use slide_sheet::sheet::{ScrollAxes, ScrollKind, SheetOptions, SheetState, TouchEvent};

fn pre_scroll(h: &mut Harness, dy: f32) -> f32 {
    let list = h.list;
    h.sheet
        .on_nested_pre_scroll(&mut h.scene, list, dy, ScrollKind::Touch)
}

fn expanded() -> Harness {
    let mut h = Harness::new();
    h.set_state(SheetState::Expanded);
    h.settle();
    h.drain();
    h
}

#[test]
fn test_accepts_only_vertical_scrolls() {
    let mut h = Harness::new();
    assert!(h.sheet.on_start_nested_scroll(ScrollAxes::VERTICAL));
    assert!(!h.sheet.on_start_nested_scroll(ScrollAxes::HORIZONTAL));
}

#[test]
fn test_scrolling_up_drags_collapsed_sheet() {
    let mut h = Harness::new();
    h.sheet.on_start_nested_scroll(ScrollAxes::VERTICAL);

    let consumed = pre_scroll(&mut h, 100.0);

    assert_eq!(consumed, 100.0);
    assert_eq!(h.top(), COLLAPSED - 100.0);
    assert_eq!(h.sheet.state(), SheetState::Dragging);
}

#[test]
fn test_scrolling_up_stops_at_expanded_offset() {
    let mut h = Harness::new();
    h.sheet.on_start_nested_scroll(ScrollAxes::VERTICAL);

    pre_scroll(&mut h, 700.0);
    let consumed = pre_scroll(&mut h, 200.0);

    assert_eq!(consumed, 60.0);
    assert_eq!(h.top(), 0.0);
    assert_eq!(h.sheet.state(), SheetState::Expanded);

    // Fully open: the list scrolls on its own
    assert_eq!(pre_scroll(&mut h, 50.0), 0.0);
    assert_eq!(h.top(), 0.0);
}

#[test]
fn test_scrolling_down_collapses_exactly_at_collapsed_offset() {
    let mut h = expanded();
    h.sheet.on_start_nested_scroll(ScrollAxes::VERTICAL);

    assert_eq!(pre_scroll(&mut h, -100.0), -100.0);
    assert_eq!(h.sheet.state(), SheetState::Dragging);

    let consumed = pre_scroll(&mut h, -(COLLAPSED - 100.0));
    assert_eq!(consumed, -(COLLAPSED - 100.0));
    assert_eq!(h.top(), COLLAPSED);
    assert_eq!(h.sheet.state(), SheetState::Collapsed);

    let list = h.list;
    h.sheet.on_stop_nested_scroll(&mut h.scene, list);
    assert!(!h.sheet.is_settling());
    assert_eq!(
        h.drain_states(),
        vec![SheetState::Dragging, SheetState::Collapsed]
    );
}

#[test]
fn test_scrolled_list_keeps_scrolling_before_sheet_moves() {
    let mut h = expanded();
    let list = h.list;
    h.scene.scroll_by(list, 300.0);

    h.sheet.on_start_nested_scroll(ScrollAxes::VERTICAL);
    assert_eq!(pre_scroll(&mut h, -100.0), 0.0);
    assert_eq!(h.top(), 0.0);
    assert_eq!(h.sheet.state(), SheetState::Expanded);
}

#[test]
fn test_non_touch_scroll_is_ignored() {
    let mut h = Harness::new();
    let list = h.list;
    h.sheet.on_start_nested_scroll(ScrollAxes::VERTICAL);

    let consumed = h
        .sheet
        .on_nested_pre_scroll(&mut h.scene, list, 100.0, ScrollKind::NonTouch);

    assert_eq!(consumed, 0.0);
    assert_eq!(h.top(), COLLAPSED);
}

#[test]
fn test_scroll_from_other_node_is_ignored() {
    let mut h = Harness::new();
    let handle = h.handle;
    h.sheet.on_start_nested_scroll(ScrollAxes::VERTICAL);

    let consumed = h
        .sheet
        .on_nested_pre_scroll(&mut h.scene, handle, 100.0, ScrollKind::Touch);
    assert_eq!(consumed, 0.0);
}

#[test]
fn test_stop_after_upward_scroll_settles_expanded() {
    let mut h = Harness::new();
    let list = h.list;
    h.sheet.on_start_nested_scroll(ScrollAxes::VERTICAL);
    pre_scroll(&mut h, 60.0);

    h.sheet.on_stop_nested_scroll(&mut h.scene, list);
    assert_eq!(h.sheet.state(), SheetState::Settling);

    h.settle();
    assert_eq!(h.sheet.state(), SheetState::Expanded);
    assert_eq!(h.top(), 0.0);
}

#[test]
fn test_stop_after_downward_scroll_settles_collapsed() {
    let mut h = expanded();
    let list = h.list;
    h.sheet.on_start_nested_scroll(ScrollAxes::VERTICAL);
    pre_scroll(&mut h, -60.0);

    h.sheet.on_stop_nested_scroll(&mut h.scene, list);
    h.settle();
    assert_eq!(h.sheet.state(), SheetState::Collapsed);
}

#[test]
fn test_stop_without_scroll_does_nothing() {
    let mut h = Harness::new();
    let list = h.list;
    h.sheet.on_start_nested_scroll(ScrollAxes::VERTICAL);
    h.sheet.on_stop_nested_scroll(&mut h.scene, list);

    assert_eq!(h.sheet.state(), SheetState::Collapsed);
    assert!(!h.sheet.is_settling());
}

#[test]
fn test_nested_scroll_takes_over_settling_sheet() {
    let mut h = Harness::new();
    let list = h.list;
    h.set_state(SheetState::Expanded);
    for _ in 0..3 {
        h.layout_if_needed();
        h.sheet.on_animation_frame(&mut h.scene, FRAME);
    }
    let top = h.top();

    h.sheet.on_start_nested_scroll(ScrollAxes::VERTICAL);
    assert_eq!(pre_scroll(&mut h, -50.0), -50.0);
    assert_eq!(h.top(), top + 50.0);
    assert_eq!(h.sheet.state(), SheetState::Dragging);
    assert!(!h.sheet.is_settling());

    h.sheet.on_stop_nested_scroll(&mut h.scene, list);
    h.settle();
    assert_eq!(h.sheet.state(), SheetState::Collapsed);
    assert_eq!(h.top(), COLLAPSED);
}

#[test]
fn test_not_draggable_only_snaps_at_bounds() {
    let mut h = Harness::with_options(SheetOptions {
        draggable: false,
        ..Default::default()
    });
    h.sheet.on_start_nested_scroll(ScrollAxes::VERTICAL);

    assert_eq!(pre_scroll(&mut h, 100.0), 0.0);
    assert_eq!(h.top(), COLLAPSED);

    assert_eq!(pre_scroll(&mut h, 2000.0), COLLAPSED);
    assert_eq!(h.top(), 0.0);
    assert_eq!(h.sheet.state(), SheetState::Expanded);
}

#[test]
fn test_pre_fling_consumed_until_expanded() {
    let mut h = Harness::new();
    let list = h.list;
    assert!(h.sheet.on_nested_pre_fling(&h.scene, list, 0.0, 3000.0));

    h.set_state(SheetState::Expanded);
    h.settle();
    assert!(!h.sheet.on_nested_pre_fling(&h.scene, list, 0.0, 3000.0));

    let handle = h.handle;
    assert!(!h.sheet.on_nested_pre_fling(&h.scene, handle, 0.0, 3000.0));
}

#[test]
fn test_stop_after_zero_scroll_settles_by_position() {
    let mut h = Harness::new();
    let list = h.list;

    // An upward flick on the list that the sheet only observes
    let mut claimed = false;
    let start = list_y(COLLAPSED);
    let t = std::time::Duration::from_millis;
    h.touch(TouchEvent::down(200.0, start, t(0)), &mut claimed);
    h.touch(TouchEvent::moved(200.0, start - 20.0, t(10)), &mut claimed);
    h.touch(TouchEvent::moved(200.0, start - 40.0, t(20)), &mut claimed);
    assert!(!claimed);

    h.sheet.on_start_nested_scroll(ScrollAxes::VERTICAL);
    pre_scroll(&mut h, COLLAPSED / 2.0);
    pre_scroll(&mut h, 0.0);
    assert_eq!(h.top(), COLLAPSED / 2.0);

    // Exactly at the midpoint with no scroll direction: collapse
    h.sheet.on_stop_nested_scroll(&mut h.scene, list);
    h.settle();
    assert_eq!(h.sheet.state(), SheetState::Collapsed);
    assert_eq!(h.top(), COLLAPSED);
}
