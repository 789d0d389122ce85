//! Tests for the demo's message handling and pointer routing

use std::time::Duration;

use slide_sheet::commands::Cmd;
use slide_sheet::config::SheetConfig;
use slide_sheet::messages::{AppMsg, Msg, SheetMsg};
use slide_sheet::model::AppModel;
use slide_sheet::sheet::{SheetState, TouchEvent};
use slide_sheet::update::update;

const WIDTH: u32 = 420;
const HEIGHT: u32 = 780;
/// Padding, handle, title and three peeking list rows
const SHEET_HEIGHT: f32 = 8.0 + 24.0 + 40.0 + 3.0 * 48.0 + 8.0;
const COLLAPSED: f32 = HEIGHT as f32 - SHEET_HEIGHT;
const X: f32 = 210.0;

fn test_model() -> AppModel {
    let mut model = AppModel::new(SheetConfig::default(), WIDTH, HEIGHT, 1.0).unwrap();
    model.layout();
    model
}

fn top(model: &AppModel) -> f32 {
    model.scene.get(model.nodes.sheet).unwrap().rect.y
}

fn list_scroll(model: &AppModel) -> f32 {
    model.scene.get(model.nodes.list).unwrap().scroll_y()
}

/// Feed frames until nothing is animating; returns the frame count
fn run_frames(model: &mut AppModel) -> usize {
    let mut frames = 0;
    while model.is_animating() {
        update(model, Msg::App(AppMsg::Frame(Duration::from_millis(16))));
        frames += 1;
        assert!(frames < 1000, "animation never finished");
    }
    frames
}

fn pointer_gesture(model: &mut AppModel, ys: &[f32]) {
    let mut t = Duration::ZERO;
    let step = Duration::from_millis(10);
    let (first, rest) = ys.split_first().unwrap();
    update(model, Msg::Pointer(TouchEvent::down(X, *first, t)));
    for y in rest {
        t += step;
        update(model, Msg::Pointer(TouchEvent::moved(X, *y, t)));
    }
    t += step;
    let last = *ys.last().unwrap();
    update(model, Msg::Pointer(TouchEvent::up(X, last, t)));
}

#[test]
fn test_initial_layout() {
    let model = test_model();

    assert_eq!(model.sheet.state(), SheetState::Collapsed);
    assert_eq!(top(&model), COLLAPSED);
    assert_eq!(model.reported_state, Some(SheetState::Collapsed));
    assert!(model.sheet.scrim(&model.scene).is_some());
    assert!(!model.is_animating());
}

#[test]
fn test_set_state_message_animates_to_expanded() {
    let mut model = test_model();

    let cmd = update(
        &mut model,
        Msg::Sheet(SheetMsg::SetState(SheetState::Expanded)),
    );
    assert!(cmd.as_ref().is_some_and(Cmd::wants_frame));

    run_frames(&mut model);
    assert_eq!(model.sheet.state(), SheetState::Expanded);
    assert_eq!(model.reported_state, Some(SheetState::Expanded));
    assert_eq!(top(&model), 0.0);
    assert_eq!(model.slide_percentage, 1.0);
}

#[test]
fn test_transient_state_request_is_ignored() {
    let mut model = test_model();

    let cmd = update(
        &mut model,
        Msg::Sheet(SheetMsg::SetState(SheetState::Settling)),
    );

    assert_eq!(cmd, None);
    assert_eq!(model.sheet.state(), SheetState::Collapsed);
}

#[test]
fn test_dragging_handle_expands_sheet() {
    let mut model = test_model();
    let handle_y = COLLAPSED + 20.0;

    pointer_gesture(&mut model, &[handle_y, handle_y - 80.0, 100.0]);
    assert_eq!(model.sheet.state(), SheetState::Settling);

    run_frames(&mut model);
    assert_eq!(model.sheet.state(), SheetState::Expanded);
    assert_eq!(top(&model), 0.0);
}

#[test]
fn test_list_scroll_drags_sheet_before_list() {
    let mut model = test_model();
    let list_y = COLLAPSED + 150.0;

    pointer_gesture(&mut model, &[list_y, list_y - 10.0, list_y - 300.0]);

    // The sheet consumed the whole scroll and settles open
    assert_eq!(list_scroll(&model), 0.0);
    assert!(top(&model) < COLLAPSED);
    run_frames(&mut model);
    assert_eq!(model.sheet.state(), SheetState::Expanded);
}

#[test]
fn test_list_flings_once_sheet_is_expanded() {
    let mut model = test_model();
    update(
        &mut model,
        Msg::Sheet(SheetMsg::SetState(SheetState::Expanded)),
    );
    run_frames(&mut model);

    pointer_gesture(&mut model, &[600.0, 500.0, 300.0]);

    assert_eq!(top(&model), 0.0);
    assert_eq!(list_scroll(&model), 300.0);
    assert!(model.fling.is_some());

    update(&mut model, Msg::App(AppMsg::Frame(Duration::from_millis(16))));
    assert!(list_scroll(&model) > 300.0);
    run_frames(&mut model);
    assert!(model.fling.is_none());
    assert_eq!(model.sheet.state(), SheetState::Expanded);
}

#[test]
fn test_wheel_over_list_moves_sheet() {
    let mut model = test_model();
    let list_y = COLLAPSED + 150.0;

    update(
        &mut model,
        Msg::Wheel {
            x: X,
            y: list_y,
            dy: 100.0,
        },
    );
    run_frames(&mut model);
    assert_eq!(model.sheet.state(), SheetState::Expanded);

    update(
        &mut model,
        Msg::Wheel {
            x: X,
            y: 400.0,
            dy: -100.0,
        },
    );
    run_frames(&mut model);
    assert_eq!(model.sheet.state(), SheetState::Collapsed);
    assert_eq!(top(&model), COLLAPSED);
}

#[test]
fn test_wheel_outside_list_does_nothing() {
    let mut model = test_model();

    let cmd = update(
        &mut model,
        Msg::Wheel {
            x: X,
            y: 10.0,
            dy: 100.0,
        },
    );

    assert_eq!(cmd, None);
    assert_eq!(top(&model), COLLAPSED);
}

#[test]
fn test_keyboard_lifts_collapsed_sheet() {
    let mut model = test_model();

    update(&mut model, Msg::Sheet(SheetMsg::ToggleKeyboard));
    assert!(model.keyboard_visible);
    assert_eq!(top(&model), COLLAPSED - 260.0);
    assert!(model.status_line().contains("keyboard"));

    update(&mut model, Msg::Sheet(SheetMsg::ToggleKeyboard));
    assert_eq!(top(&model), COLLAPSED);
}

#[test]
fn test_resize_moves_collapsed_sheet() {
    let mut model = test_model();

    update(&mut model, Msg::App(AppMsg::Resize(WIDTH, 600)));

    assert_eq!(model.window_size, (WIDTH, 600));
    assert_eq!(top(&model), 600.0 - SHEET_HEIGHT);
}

#[test]
fn test_app_commands() {
    let mut model = test_model();

    assert_eq!(
        update(&mut model, Msg::App(AppMsg::DumpState)),
        Some(Cmd::DumpState)
    );
    assert_eq!(update(&mut model, Msg::App(AppMsg::Quit)), Some(Cmd::Quit));
    assert!(model.status_line().contains("Collapsed"));
}
