//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use slide_sheet::geometry::Edges;
use slide_sheet::scene::{Node, NodeId, Scene};
use slide_sheet::sheet::{ExpandingSheet, SheetEvent, SheetOptions, SheetState, TouchEvent};

pub const WIDTH: f32 = 400.0;
pub const HEIGHT: f32 = 1000.0;
pub const APP_BAR: f32 = 56.0;
/// Sheet padding (top and bottom)
pub const PADDING: f32 = 8.0;
pub const HANDLE: f32 = 24.0;
/// Visible list height when collapsed
pub const PEEK: f32 = 200.0;
/// Measured height of the collapsed sheet
pub const SHEET_HEIGHT: f32 = PADDING + HANDLE + PEEK + PADDING;
/// Collapsed top with no insets
pub const COLLAPSED: f32 = HEIGHT - SHEET_HEIGHT;

pub const FRAME: Duration = Duration::from_millis(16);

/// A scene with an app bar, content and a sheet holding a handle and a list,
/// plus an attached controller reporting into a channel
pub struct Harness {
    pub scene: Scene,
    pub sheet: ExpandingSheet,
    pub app_bar: NodeId,
    pub content: NodeId,
    pub sheet_node: NodeId,
    pub handle: NodeId,
    pub list: NodeId,
    pub events: Receiver<SheetEvent>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_options(SheetOptions::default())
    }

    /// Build the scene without running a layout pass
    pub fn detached(options: SheetOptions) -> Self {
        let mut scene = Scene::new(WIDTH, HEIGHT);
        let root = scene.root();
        let app_bar = scene.add_child(root, Node::app_bar(APP_BAR)).unwrap();
        let content = scene
            .add_child(root, Node::new(slide_sheet::scene::NodeKind::Content))
            .unwrap();
        let sheet_node = scene
            .add_child(
                root,
                Node::sheet()
                    .with_padding(Edges::vertical(PADDING, PADDING))
                    .with_view_id(7),
            )
            .unwrap();
        let handle = scene.add_child(sheet_node, Node::leaf(HANDLE)).unwrap();
        let list = scene
            .add_child(sheet_node, Node::scroll_view(2000.0).with_max_height(PEEK))
            .unwrap();

        let (tx, events) = mpsc::channel();
        let mut sheet = ExpandingSheet::from_options(options);
        sheet.set_callback(Some(Box::new(tx)));

        Self {
            scene,
            sheet,
            app_bar,
            content,
            sheet_node,
            handle,
            list,
            events,
        }
    }

    /// Build the scene and run the first layout pass
    pub fn with_options(options: SheetOptions) -> Self {
        let mut harness = Self::detached(options);
        harness.layout();
        harness.drain();
        harness
    }

    /// Layout pass offering the sheet node to the controller, then posted work
    pub fn layout(&mut self) {
        let sheet_node = self.sheet_node;
        let sheet = &mut self.sheet;
        self.scene
            .layout_with(|scene, id| id == sheet_node && sheet.on_layout_child(scene, id));
        self.sheet.run_posted(&mut self.scene);
    }

    pub fn layout_if_needed(&mut self) {
        if self.scene.is_layout_requested() {
            self.layout();
        }
    }

    /// Run frames until the sheet stops moving; returns the frame count
    pub fn settle(&mut self) -> usize {
        let mut frames = 0;
        loop {
            self.layout_if_needed();
            if !self.sheet.on_animation_frame(&mut self.scene, FRAME) && !self.sheet.has_pending_tasks() {
                break;
            }
            frames += 1;
            assert!(frames < 500, "sheet never settled");
        }
        self.layout_if_needed();
        frames
    }

    pub fn set_state(&mut self, state: SheetState) {
        self.sheet.set_state(&mut self.scene, state);
    }

    pub fn top(&self) -> f32 {
        self.scene.get(self.sheet_node).unwrap().rect.y
    }

    pub fn percentage(&self) -> f32 {
        self.sheet.slide_percentage(&self.scene)
    }

    pub fn scrim_visible(&self) -> bool {
        self.sheet
            .scrim(&self.scene)
            .and_then(|id| self.scene.get(id))
            .is_some_and(|n| n.visible)
    }

    /// All events reported since the last drain
    pub fn drain(&mut self) -> Vec<SheetEvent> {
        self.events.try_iter().collect()
    }

    /// Reported state changes since the last drain
    pub fn drain_states(&mut self) -> Vec<SheetState> {
        self.drain()
            .into_iter()
            .filter_map(|e| match e {
                SheetEvent::StateChanged(state) => Some(state),
                SheetEvent::SlidePositionChanged(_) => None,
            })
            .collect()
    }

    /// Deliver an event the way a host view system would: intercept first,
    /// then the touch handler once claimed
    pub fn touch(&mut self, event: TouchEvent, claimed: &mut bool) {
        if *claimed {
            self.sheet.touch_event(&mut self.scene, &event);
        } else if self.sheet.intercept_touch(&mut self.scene, &event) {
            *claimed = true;
            if event.is_down() {
                self.sheet.touch_event(&mut self.scene, &event);
            }
        }
    }

    /// Press at `(x, ys[0])`, move through the remaining points 10ms apart
    /// and release at the last one
    pub fn drag(&mut self, x: f32, ys: &[f32]) {
        let mut claimed = false;
        let mut t = Duration::ZERO;
        let step = Duration::from_millis(10);
        let Some((first, rest)) = ys.split_first() else {
            return;
        };
        self.touch(TouchEvent::down(x, *first, t), &mut claimed);
        let mut last = *first;
        for y in rest {
            t += step;
            self.touch(TouchEvent::moved(x, *y, t), &mut claimed);
            last = *y;
        }
        t += step;
        self.touch(TouchEvent::up(x, last, t), &mut claimed);
    }
}

/// Window y of the middle of the drag handle for a sheet at `top`
pub fn handle_y(top: f32) -> f32 {
    top + PADDING + HANDLE / 2.0
}

/// Window y inside the list for a sheet at `top`
pub fn list_y(top: f32) -> f32 {
    top + PADDING + HANDLE + 50.0
}
