//! Keyboard and mouse input mapping
//!
//! The left mouse button stands in for a single touch pointer; the wheel
//! scrolls the list under the cursor.

use std::time::Duration;

use winit::event::{ElementState, KeyEvent, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

use slide_sheet::messages::{AppMsg, Msg, SheetMsg};
use slide_sheet::sheet::{SheetState, TouchAction, TouchEvent};

/// Pixels scrolled per wheel line (logical)
const WHEEL_LINE_PX: f32 = 40.0;

/// Map a key press to a message
pub fn key_to_msg(event: &KeyEvent) -> Option<Msg> {
    if event.state != ElementState::Pressed || event.repeat {
        return None;
    }
    let PhysicalKey::Code(code) = event.physical_key else {
        return None;
    };
    key_code_to_msg(code)
}

fn key_code_to_msg(code: KeyCode) -> Option<Msg> {
    let msg = match code {
        KeyCode::KeyE => Msg::Sheet(SheetMsg::SetState(SheetState::Expanded)),
        KeyCode::KeyC => Msg::Sheet(SheetMsg::SetState(SheetState::Collapsed)),
        KeyCode::KeyK => Msg::Sheet(SheetMsg::ToggleKeyboard),
        KeyCode::F7 => Msg::App(AppMsg::DumpState),
        KeyCode::Escape => Msg::App(AppMsg::Quit),
        _ => return None,
    };
    Some(msg)
}

/// Pointer message for the mouse at `(x, y)` (physical pixels)
pub fn pointer_msg(action: TouchAction, x: f64, y: f64, time: Duration) -> Msg {
    Msg::Pointer(TouchEvent::new(action, 0, x as f32, y as f32, time))
}

/// Wheel message; positive `dy` scrolls content towards its end
pub fn wheel_msg(delta: &MouseScrollDelta, x: f64, y: f64, scale_factor: f32) -> Option<Msg> {
    let dy = match delta {
        MouseScrollDelta::LineDelta(_, lines) => -lines * WHEEL_LINE_PX * scale_factor,
        MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
    };
    if dy == 0.0 {
        return None;
    }
    Some(Msg::Wheel {
        x: x as f32,
        y: y as f32,
        dy,
    })
}
