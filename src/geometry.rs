//! Geometry primitives shared by the scene and the sheet controller
//!
//! All values are in physical pixels. Rects are positioned relative to their
//! parent node; use `Scene::absolute_rect` for window coordinates.

use serde::{Deserialize, Serialize};

/// A point in window coordinates (physical pixels)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Same rect moved by (dx, dy)
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Per-edge sizes, used both for padding and for window insets
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    #[serde(default)]
    pub left: f32,
    #[serde(default)]
    pub top: f32,
    #[serde(default)]
    pub right: f32,
    #[serde(default)]
    pub bottom: f32,
}

impl Edges {
    pub const ZERO: Edges = Edges {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Only top and bottom set
    pub fn vertical(top: f32, bottom: f32) -> Self {
        Self {
            top,
            bottom,
            ..Self::ZERO
        }
    }

    /// Per-edge maximum of two edge sets
    pub fn union(&self, other: &Edges) -> Edges {
        Edges {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// Window insets reported by the platform
///
/// System bars (status/navigation) and the on-screen keyboard are reported
/// separately; consumers usually want their union.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowInsets {
    pub system_bars: Edges,
    pub ime: Edges,
}

impl WindowInsets {
    pub fn new(system_bars: Edges, ime: Edges) -> Self {
        Self { system_bars, ime }
    }

    /// Union of system bar and keyboard insets
    pub fn system_bars_and_ime(&self) -> Edges {
        self.system_bars.union(&self.ime)
    }
}
