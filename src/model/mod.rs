//! Application model - the complete state of the demo
//!
//! A window-sized scene with an app bar, main content and a sheet holding a
//! drag handle, a title row and a scrollable list. The sheet node is
//! controlled by an [`ExpandingSheet`].

pub mod gesture;

pub use gesture::{GestureRouting, ListFling};

use std::sync::mpsc::{self, Receiver};

use crate::config::{SceneConfig, SheetConfig};
use crate::geometry::{Edges, WindowInsets};
use crate::scene::{Node, NodeId, NodeKind, Scene};
use crate::sheet::{ExpandingSheet, SheetEvent, SheetSnapshot, SheetState};
use crate::theme::Palette;

/// View id carried by the demo's sheet node
pub const SHEET_VIEW_ID: u32 = 1;
/// Height of the simulated on-screen keyboard (logical pixels)
pub const KEYBOARD_HEIGHT: f32 = 260.0;
/// Rows drawn in the main content behind the sheet
const CONTENT_ROWS: usize = 6;
const CONTENT_ROW_HEIGHT: f32 = 72.0;

/// Handles to the nodes of the demo scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoNodes {
    pub app_bar: NodeId,
    pub content: NodeId,
    pub sheet: NodeId,
    pub handle: NodeId,
    pub title: NodeId,
    pub list: NodeId,
}

/// The complete application model
pub struct AppModel {
    pub scene: Scene,
    pub sheet: ExpandingSheet,
    pub nodes: DemoNodes,
    pub palette: Palette,
    pub config: SheetConfig,
    /// Window dimensions (physical pixels)
    pub window_size: (u32, u32),
    pub scale_factor: f32,
    pub insets: WindowInsets,
    pub keyboard_visible: bool,
    pub gesture: GestureRouting,
    pub fling: Option<ListFling>,
    /// Latest position reported through the sheet callback
    pub slide_percentage: f32,
    /// Latest state reported through the sheet callback
    pub reported_state: Option<SheetState>,
    events: Receiver<SheetEvent>,
}

impl AppModel {
    /// Build the demo scene for a window of the given physical size
    pub fn new(
        config: SheetConfig,
        window_width: u32,
        window_height: u32,
        scale_factor: f32,
    ) -> Result<Self, String> {
        let palette = Palette::from_data(&config.colors);
        let mut scene = Scene::new(window_width as f32, window_height as f32);
        let nodes = build_scene(&mut scene, &config.scene, &palette, scale_factor)
            .ok_or_else(|| "Failed to build the demo scene".to_string())?;

        let (tx, events) = mpsc::channel();
        let mut sheet =
            ExpandingSheet::from_options(config.sheet.clone()).with_scale_factor(scale_factor);
        sheet.set_callback(Some(Box::new(tx)));

        let mut model = Self {
            scene,
            sheet,
            nodes,
            palette,
            config,
            window_size: (window_width, window_height),
            scale_factor,
            insets: WindowInsets::default(),
            keyboard_visible: false,
            gesture: GestureRouting::default(),
            fling: None,
            slide_percentage: 0.0,
            reported_state: None,
            events,
        };
        model.drain_sheet_events();
        Ok(model)
    }

    /// Run a layout pass, offering the sheet node to the controller
    pub fn layout(&mut self) {
        let sheet_node = self.nodes.sheet;
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

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
        self.scene.resize(width as f32, height as f32);
    }

    /// Show or hide the simulated keyboard inset
    pub fn set_keyboard_visible(&mut self, visible: bool) {
        self.keyboard_visible = visible;
        self.insets.ime = if visible {
            Edges::vertical(0.0, KEYBOARD_HEIGHT * self.scale_factor)
        } else {
            Edges::ZERO
        };
        self.sheet.apply_window_insets(&mut self.scene, &self.insets);
    }

    /// Pull notifications from the sheet callback channel
    ///
    /// Returns `true` when anything was reported.
    pub fn drain_sheet_events(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.events.try_recv() {
            changed = true;
            match event {
                SheetEvent::StateChanged(state) => {
                    tracing::debug!(target: "sheet", ?state, "state reported");
                    self.reported_state = Some(state);
                }
                SheetEvent::SlidePositionChanged(percentage) => {
                    self.slide_percentage = percentage;
                }
            }
        }
        changed
    }

    /// Whether the frame loop should keep ticking
    pub fn is_animating(&self) -> bool {
        self.sheet.is_settling()
            || self.sheet.has_pending_tasks()
            || self.fling.is_some()
            || self.scene.is_layout_requested()
    }

    pub fn snapshot(&self) -> SheetSnapshot {
        self.sheet.snapshot(&self.scene)
    }

    /// One-line summary for the window title
    pub fn status_line(&self) -> String {
        format!(
            "slide-sheet | {:?} | {:.0}%{}",
            self.sheet.state(),
            self.slide_percentage * 100.0,
            if self.keyboard_visible { " | keyboard" } else { "" }
        )
    }
}

fn build_scene(
    scene: &mut Scene,
    shape: &SceneConfig,
    palette: &Palette,
    scale: f32,
) -> Option<DemoNodes> {
    let root = scene.root();
    if let Some(node) = scene.get_mut(root) {
        node.color = palette.background.to_argb_u32();
    }

    let app_bar = scene.add_child(
        root,
        Node::app_bar(shape.app_bar_height * scale).with_color(palette.app_bar.to_argb_u32()),
    )?;

    let content = scene.add_child(
        root,
        Node::new(NodeKind::Content)
            .with_color(palette.content.to_argb_u32())
            .with_padding(Edges::new(16.0 * scale, 16.0 * scale, 16.0 * scale, 0.0)),
    )?;
    for i in 0..CONTENT_ROWS {
        let color = if i % 2 == 0 {
            palette.list_item_alt
        } else {
            palette.content
        };
        scene.add_child(
            content,
            Node::leaf(CONTENT_ROW_HEIGHT * scale).with_color(color.to_argb_u32()),
        )?;
    }

    let padding = shape.sheet_padding * scale;
    let sheet = scene.add_child(
        root,
        Node::sheet()
            .with_color(palette.sheet.to_argb_u32())
            .with_padding(Edges::vertical(padding, padding))
            .with_view_id(SHEET_VIEW_ID),
    )?;
    let handle = scene.add_child(
        sheet,
        Node::leaf(shape.handle_height * scale).with_color(palette.handle.to_argb_u32()),
    )?;
    let title = scene.add_child(
        sheet,
        Node::leaf(shape.title_height * scale).with_color(palette.title.to_argb_u32()),
    )?;

    let item_height = shape.item_height * scale;
    let list = scene.add_child(
        sheet,
        Node::scroll_view(shape.list_items as f32 * item_height)
            .with_max_height(shape.peek_items as f32 * item_height)
            .with_color(palette.list_item.to_argb_u32()),
    )?;

    Some(DemoNodes {
        app_bar,
        content,
        sheet,
        handle,
        title,
        list,
    })
}
