//! Shared sheet state and the drag policy
//!
//! `SheetCore` holds everything the drag helper callbacks need, so the
//! controller can lend it to the helper while keeping the helper itself.

use tracing::debug;

use super::callback::SheetCallback;
use super::drag::{DragCallback, DragState};
use super::options::SheetOptions;
use super::release::resolve_release_target;
use super::state::SheetState;
use crate::scene::{NodeId, Scene};

pub(crate) struct SheetCore {
    pub state: SheetState,
    pub options: SheetOptions,
    pub collapsed_offset: f32,
    pub expanded_offset: f32,
    pub parent_height: f32,
    pub inset_top: f32,
    pub inset_bottom: f32,
    pub sheet: Option<NodeId>,
    pub scroll_child: Option<NodeId>,
    pub scrim: Option<NodeId>,
    pub touching_scrolling_child: bool,
    pub active_pointer: Option<u32>,
    /// State chosen by the last pointer release, consumed by the controller
    pub release_target: Option<SheetState>,
    pub callback: Option<Box<dyn SheetCallback>>,
}

impl SheetCore {
    pub fn new(options: SheetOptions) -> Self {
        Self {
            state: SheetState::Collapsed,
            options,
            collapsed_offset: 0.0,
            expanded_offset: 0.0,
            parent_height: 0.0,
            inset_top: 0.0,
            inset_bottom: 0.0,
            sheet: None,
            scroll_child: None,
            scrim: None,
            touching_scrolling_child: false,
            active_pointer: None,
            release_target: None,
            callback: None,
        }
    }

    /// The sheet handle, if it still refers to a live node
    pub fn sheet_node(&self, scene: &Scene) -> Option<NodeId> {
        self.sheet.filter(|id| scene.contains(*id))
    }

    pub fn scroll_child_node(&self, scene: &Scene) -> Option<NodeId> {
        self.scroll_child.filter(|id| scene.contains(*id))
    }

    pub fn scrim_node(&self, scene: &Scene) -> Option<NodeId> {
        self.scrim.filter(|id| scene.contains(*id))
    }

    pub fn sheet_top(&self, scene: &Scene) -> Option<f32> {
        self.sheet_node(scene)
            .and_then(|id| scene.get(id))
            .map(|n| n.rect.y)
    }

    pub fn set_internal_state(&mut self, scene: &mut Scene, state: SheetState) {
        if self.state == state {
            return;
        }
        debug!(from = ?self.state, to = ?state, "sheet state changed");
        self.state = state;

        if self.sheet_node(scene).is_some() {
            scene.request_layout();
        }
        if let Some(callback) = self.callback.as_mut() {
            callback.on_state_changed(state);
        }
    }

    /// Resting top offset for a terminal state
    ///
    /// # Panics
    ///
    /// Panics for `Dragging` and `Settling`, which have no resting offset.
    pub fn top_for_state(&self, state: SheetState) -> f32 {
        match state {
            SheetState::Collapsed => self.collapsed_offset,
            SheetState::Expanded => self.expanded_offset,
            other => panic!("Cannot get offset for state {:?}", other),
        }
    }

    /// How far open the sheet is at `top`: 0 collapsed, 1 expanded
    ///
    /// Measured between the two offsets, unlike the release fraction
    /// (`top / collapsed_offset`) which keeps the expanded offset in range.
    pub fn slide_percentage(&self, top: f32) -> f32 {
        let range = self.collapsed_offset - self.expanded_offset;
        if range <= 0.0 {
            return if top < self.collapsed_offset { 1.0 } else { 0.0 };
        }
        ((self.collapsed_offset - top) / range).clamp(0.0, 1.0)
    }

    pub fn clamp_top(&self, top: f32) -> f32 {
        top.max(self.expanded_offset).min(self.collapsed_offset)
    }

    /// Move the sheet by `dy` and report the new position
    pub fn move_sheet(&mut self, scene: &mut Scene, child: NodeId, dy: f32) {
        if dy == 0.0 {
            return;
        }
        scene.offset_top_and_bottom(child, dy);
        if let Some(top) = scene.get(child).map(|n| n.rect.y) {
            self.dispatch_position(scene, child, top);
        }
    }

    /// Resize the sheet to its new top and notify listeners and the scrim
    pub fn dispatch_position(&mut self, scene: &mut Scene, child: NodeId, top: f32) {
        let height = self.parent_height - top + self.inset_bottom;
        scene.set_requested_height(child, height.max(0.0));

        let percentage = self.slide_percentage(top);
        if let Some(callback) = self.callback.as_mut() {
            callback.on_slide_position_changed(percentage);
        }
        self.update_scrim(scene, percentage);
    }

    pub fn update_scrim(&self, scene: &mut Scene, percentage: f32) {
        let Some(scrim) = self.scrim_node(scene) else {
            return;
        };
        if let Some(node) = scene.get_mut(scrim) {
            if percentage == 0.0 {
                node.visible = false;
            } else {
                node.alpha = percentage;
                node.visible = true;
            }
        }
    }
}

impl DragCallback for SheetCore {
    fn try_capture_view(&mut self, scene: &Scene, child: NodeId, pointer_id: u32) -> bool {
        if self.state == SheetState::Dragging {
            return false;
        }
        if self.touching_scrolling_child {
            return false;
        }
        if self.state == SheetState::Expanded && self.active_pointer == Some(pointer_id) {
            let scrolled = self
                .scroll_child_node(scene)
                .and_then(|id| scene.get(id))
                .is_some_and(|n| n.can_scroll_up());
            if scrolled {
                return false;
            }
        }
        self.sheet_node(scene) == Some(child)
    }

    fn on_drag_state_changed(&mut self, scene: &mut Scene, state: DragState) {
        if state == DragState::Dragging && self.options.draggable {
            self.set_internal_state(scene, SheetState::Dragging);
        }
    }

    fn on_view_position_changed(&mut self, scene: &mut Scene, child: NodeId, top: f32, _dy: f32) {
        self.dispatch_position(scene, child, top);
    }

    fn on_view_released(
        &mut self,
        scene: &mut Scene,
        child: NodeId,
        xvel: f32,
        yvel: f32,
    ) -> Option<f32> {
        let top = scene.get(child)?.rect.y;
        let target = resolve_release_target(top, self.collapsed_offset, xvel, yvel);
        debug!(top, xvel, yvel, ?target, "sheet released");
        self.release_target = Some(target);
        Some(self.top_for_state(target))
    }

    fn clamp_view_position_vertical(&self, _child: NodeId, top: f32, _dy: f32) -> f32 {
        self.clamp_top(top)
    }

    fn view_vertical_drag_range(&self, _child: NodeId) -> f32 {
        self.collapsed_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Node;

    fn expanded_core() -> (Scene, SheetCore, NodeId, NodeId) {
        let mut scene = Scene::new(400.0, 800.0);
        let root = scene.root();
        let sheet = scene.add_child(root, Node::sheet()).unwrap();
        let list = scene
            .add_child(sheet, Node::scroll_view(2000.0).with_max_height(200.0))
            .unwrap();

        let mut core = SheetCore::new(SheetOptions::default());
        core.sheet = Some(sheet);
        core.scroll_child = Some(list);
        core.state = SheetState::Expanded;
        core.active_pointer = Some(0);
        (scene, core, sheet, list)
    }

    #[test]
    fn test_capture_refused_while_scroll_child_can_scroll_up() {
        let (mut scene, mut core, sheet, list) = expanded_core();
        assert!(core.try_capture_view(&scene, sheet, 0));

        scene.scroll_by(list, 300.0);
        assert!(!core.try_capture_view(&scene, sheet, 0));

        // Another pointer is not on the scroll child
        assert!(core.try_capture_view(&scene, sheet, 1));
    }

    #[test]
    fn test_capture_refused_while_dragging_or_touching_scroll_child() {
        let (scene, mut core, sheet, list) = expanded_core();
        assert!(!core.try_capture_view(&scene, list, 0));

        core.touching_scrolling_child = true;
        assert!(!core.try_capture_view(&scene, sheet, 0));

        core.touching_scrolling_child = false;
        core.state = SheetState::Dragging;
        assert!(!core.try_capture_view(&scene, sheet, 0));
    }
}
