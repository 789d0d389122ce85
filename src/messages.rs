//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::time::Duration;

use crate::sheet::{SheetState, TouchEvent};

/// Messages aimed at the sheet itself
#[derive(Debug, Clone, PartialEq)]
pub enum SheetMsg {
    /// Animate to a resting state (E / C keys)
    SetState(SheetState),
    /// Show or hide the simulated on-screen keyboard (K key)
    ToggleKeyboard,
}

/// Window and frame-loop messages
#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    /// Window resized (physical pixels)
    Resize(u32, u32),
    /// One animation frame elapsed
    Frame(Duration),
    /// Write a JSON snapshot of the state (F7)
    DumpState,
    Quit,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Pointer 0 pressed, moved or released (mouse emulates touch)
    Pointer(TouchEvent),
    /// Mouse wheel at a position; positive `dy` scrolls content towards its end
    Wheel { x: f32, y: f32, dy: f32 },
    Sheet(SheetMsg),
    App(AppMsg),
}
