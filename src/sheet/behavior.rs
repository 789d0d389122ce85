//! The expanding sheet controller
//!
//! `ExpandingSheet` attaches to the sheet node of a [`Scene`] and arbitrates
//! between direct pointer drags, nested scrolling of a list inside the sheet,
//! and programmatic `set_state` calls.
//!
//! # Host contract
//!
//! Everything runs on the UI thread. Per frame the host:
//!
//! 1. feeds pointer events to `intercept_touch`, and to `touch_event` once
//!    `intercept_touch` has claimed the gesture;
//! 2. forwards nested scroll callbacks from the scroll child;
//! 3. runs a layout pass that offers the sheet to `on_layout_child`;
//! 4. calls `run_posted` and then `on_animation_frame` with the frame delta.

use std::time::Duration;

use tracing::{debug, trace};

use super::callback::SheetCallback;
use super::core::SheetCore;
use super::drag::{DragHelper, DragState};
use super::options::SheetOptions;
use super::release::resolve_release_target;
use super::settle::{PostedTask, SettleTracker, TaskQueue};
use super::snapshot::SheetSnapshot;
use super::state::SheetState;
use super::touch::{ScrollAxes, ScrollKind, TouchAction, TouchEvent};
use crate::geometry::{Edges, Rect, WindowInsets};
use crate::scene::{Height, Node, NodeId, NodeKind, Scene};

/// Scrim fill: black at 0x60 alpha
pub const SCRIM_COLOR: u32 = 0x6000_0000;

pub struct ExpandingSheet {
    core: SheetCore,
    helper: Option<DragHelper>,
    tracker: SettleTracker,
    tasks: TaskQueue,
    scale_factor: f32,
    ignore_events: bool,
    last_y: f32,
    last_nested_scroll_dy: f32,
    nested_scrolled: bool,
    initial_padding: Option<Edges>,
    needs_content_offset_update: bool,
}

impl Default for ExpandingSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpandingSheet {
    pub fn new() -> Self {
        Self::from_options(SheetOptions::default())
    }

    pub fn from_options(options: SheetOptions) -> Self {
        Self {
            core: SheetCore::new(options),
            helper: None,
            tracker: SettleTracker::default(),
            tasks: TaskQueue::default(),
            scale_factor: 1.0,
            ignore_events: false,
            last_y: 0.0,
            last_nested_scroll_dy: 0.0,
            nested_scrolled: false,
            initial_padding: None,
            needs_content_offset_update: true,
        }
    }

    /// Scale touch slop and fling velocities for high-DPI displays
    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.set_scale_factor(scale_factor);
        self
    }

    /// Takes effect when the drag helper is recreated on the next layout
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = scale_factor;
        self.helper = None;
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn state(&self) -> SheetState {
        self.core.state
    }

    pub fn options(&self) -> &SheetOptions {
        &self.core.options
    }

    pub fn collapsed_offset(&self) -> f32 {
        self.core.collapsed_offset
    }

    pub fn expanded_offset(&self) -> f32 {
        self.core.expanded_offset
    }

    pub fn parent_height(&self) -> f32 {
        self.core.parent_height
    }

    pub fn inset_top(&self) -> f32 {
        self.core.inset_top
    }

    pub fn inset_bottom(&self) -> f32 {
        self.core.inset_bottom
    }

    /// The attached sheet node, if still alive
    pub fn sheet_node(&self, scene: &Scene) -> Option<NodeId> {
        self.core.sheet_node(scene)
    }

    /// The nested-scrolling descendant found during the last layout
    pub fn scroll_child(&self, scene: &Scene) -> Option<NodeId> {
        self.core.scroll_child_node(scene)
    }

    pub fn scrim(&self, scene: &Scene) -> Option<NodeId> {
        self.core.scrim_node(scene)
    }

    /// Whether a settle continuation is scheduled for the next frame
    pub fn is_settling(&self) -> bool {
        self.tracker.is_posted()
    }

    pub fn has_pending_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }

    pub fn drag_state(&self) -> Option<DragState> {
        self.helper.as_ref().map(|h| h.state())
    }

    /// Resting top offset for `state`
    ///
    /// # Panics
    ///
    /// Panics when `state` is `Dragging` or `Settling`.
    pub fn top_offset_for_state(&self, state: SheetState) -> f32 {
        self.core.top_for_state(state)
    }

    /// Current open fraction of the sheet (0 collapsed, 1 expanded)
    pub fn slide_percentage(&self, scene: &Scene) -> f32 {
        self.core
            .sheet_top(scene)
            .map(|top| self.core.slide_percentage(top))
            .unwrap_or(0.0)
    }

    pub fn snapshot(&self, scene: &Scene) -> SheetSnapshot {
        let rect = self
            .core
            .sheet_node(scene)
            .and_then(|id| scene.get(id))
            .map(|n| n.rect);
        SheetSnapshot {
            state: self.core.state,
            top: rect.map(|r| r.y),
            height: rect.map(|r| r.height),
            collapsed_offset: self.core.collapsed_offset,
            expanded_offset: self.core.expanded_offset,
            parent_height: self.core.parent_height,
            inset_top: self.core.inset_top,
            inset_bottom: self.core.inset_bottom,
            slide_percentage: self.slide_percentage(scene),
            scrim_visible: self
                .core
                .scrim_node(scene)
                .and_then(|id| scene.get(id))
                .is_some_and(|n| n.visible),
            settling_target: self.tracker.is_posted().then(|| self.tracker.target()).flatten(),
        }
    }

    // ------------------------------------------------------------------
    // Options (take effect on the next layout pass)
    // ------------------------------------------------------------------

    pub fn set_draggable(&mut self, draggable: bool) {
        self.core.options.draggable = draggable;
    }

    pub fn set_top_offset(&mut self, top_offset: f32) {
        self.core.options.top_offset = top_offset;
    }

    pub fn set_draw_below_app_bar(&mut self, draw_below_app_bar: bool) {
        self.core.options.draw_below_app_bar = draw_below_app_bar;
    }

    pub fn set_use_scrim(&mut self, use_scrim: bool) {
        self.core.options.use_scrim = use_scrim;
    }

    pub fn set_offset_content_view_bottom(&mut self, offset: bool) {
        self.core.options.offset_content_view_bottom = offset;
        self.needs_content_offset_update = true;
    }

    pub fn set_content_view_id(&mut self, id: Option<u32>) {
        self.core.options.content_view_id = id;
    }

    /// Install a callback; it immediately receives the current state
    pub fn set_callback(&mut self, callback: Option<Box<dyn SheetCallback>>) {
        self.core.callback = callback;
        let state = self.core.state;
        if let Some(callback) = self.core.callback.as_mut() {
            callback.on_state_changed(state);
        }
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Lay out the sheet node; always returns `true` for a child of a live
    /// parent, meaning the default placement must be skipped
    pub fn on_layout_child(&mut self, scene: &mut Scene, child: NodeId) -> bool {
        let Some(parent) = scene.parent_of(child) else {
            return false;
        };
        let Some(parent_rect) = scene.get(parent).map(|n| n.rect) else {
            return false;
        };
        self.core.parent_height = parent_rect.height;

        if self.core.sheet_node(scene) != Some(child) {
            self.attach(scene, child);
        }
        self.ensure_drag_helper(parent);

        let saved_top = scene.get(child).map(|n| n.rect.y).unwrap_or(0.0);
        scene.layout_child(child);

        self.core.expanded_offset = self.calculate_expanded_offset(scene, parent, parent_rect.width);
        if !self.core.state.is_moving() {
            let measured = scene.measure(child, parent_rect.width);
            let collapsed = (self.core.parent_height - measured).max(self.core.expanded_offset);
            if collapsed != self.core.collapsed_offset && self.core.options.offset_content_view_bottom {
                self.needs_content_offset_update = true;
            }
            self.core.collapsed_offset = collapsed;
        }

        if self.needs_content_offset_update {
            self.needs_content_offset_update = false;
            self.update_content_offset(scene, parent, child);
        }

        let created_scrim = self.sync_scrim(scene, parent, child, parent_rect);

        let parent_height = self.core.parent_height;
        let top = match self.core.state {
            SheetState::Collapsed => {
                let top = self.core.collapsed_offset;
                trace!(top, "collapsed placement");
                scene.set_requested_height(child, parent_height - top);
                top
            }
            SheetState::Dragging | SheetState::Settling => {
                trace!(top = saved_top, "moving placement");
                scene.set_requested_height(child, parent_height - saved_top + self.core.inset_bottom);
                saved_top
            }
            SheetState::Expanded => {
                let top = self.core.expanded_offset;
                scene.set_requested_height(child, parent_height - top);
                top
            }
        };
        if let Some(node) = scene.get_mut(child) {
            node.rect.y = top;
        }

        if created_scrim {
            let percentage = self.core.slide_percentage(top);
            self.core.update_scrim(scene, percentage);
        }

        self.core.scroll_child = scene.find_scrolling_child(child);
        true
    }

    fn attach(&mut self, scene: &mut Scene, child: NodeId) {
        debug!(?child, "sheet attached");
        self.core.sheet = Some(child);
        self.core.scroll_child = None;
        self.initial_padding = scene.get(child).map(|n| n.padding);
        if let Some(node) = scene.get_mut(child) {
            node.clickable = true;
        }
        self.apply_inset_padding(scene);
    }

    fn ensure_drag_helper(&mut self, parent: NodeId) {
        let stale = self.helper.as_ref().map_or(true, |h| h.parent() != parent);
        if stale {
            self.helper = Some(DragHelper::new(parent, self.scale_factor));
        }
    }

    fn calculate_expanded_offset(&self, scene: &Scene, parent: NodeId, width: f32) -> f32 {
        let app_bar = if self.core.options.draw_below_app_bar {
            scene
                .find_app_bar(parent)
                .map(|id| scene.measure(id, width))
                .unwrap_or(0.0)
        } else {
            0.0
        };
        app_bar + self.core.options.top_offset + self.core.inset_top
    }

    fn update_content_offset(&mut self, scene: &mut Scene, parent: NodeId, child: NodeId) {
        let app_bar = scene.find_app_bar(parent);
        let scrim = self.core.scrim_node(scene);
        let content = scene
            .children(parent)
            .iter()
            .copied()
            .find(|id| Some(*id) != app_bar && *id != child && Some(*id) != scrim);
        let offset = if self.core.options.offset_content_view_bottom {
            self.core.parent_height - self.core.collapsed_offset
        } else {
            0.0
        };
        if let Some(content) = content {
            if let Some(node) = scene.get_mut(content) {
                node.bottom_margin = offset;
            }
            scene.layout_child(content);
        }
    }

    /// Create or remove the scrim to match the options; returns `true` when
    /// a scrim was created
    fn sync_scrim(&mut self, scene: &mut Scene, parent: NodeId, child: NodeId, parent_rect: Rect) -> bool {
        match (self.core.options.use_scrim, self.core.scrim_node(scene)) {
            (true, None) => {
                let index = scene.index_of_child(parent, child).unwrap_or(0);
                let mut node = Node::new(NodeKind::Scrim).with_color(SCRIM_COLOR);
                node.visible = false;
                node.height = Height::MatchParent;
                node.rect = Rect::new(0.0, 0.0, parent_rect.width, parent_rect.height);
                self.core.scrim = scene.insert_child(parent, index, node);
                self.core.scrim.is_some()
            }
            (false, Some(scrim)) => {
                scene.remove(scrim);
                self.core.scrim = None;
                false
            }
            _ => false,
        }
    }

    /// Forget the sheet node and drag helper
    pub fn on_detached(&mut self) {
        debug!("sheet detached");
        self.core.sheet = None;
        self.core.scroll_child = None;
        self.helper = None;
        self.tracker.clear();
        self.tasks.clear();
    }

    // ------------------------------------------------------------------
    // Window insets
    // ------------------------------------------------------------------

    /// Apply system bar and keyboard insets
    pub fn apply_window_insets(&mut self, scene: &mut Scene, insets: &WindowInsets) {
        let combined = insets.system_bars_and_ime();
        self.core.inset_top = combined.top;
        self.core.inset_bottom = combined.bottom;
        debug!(top = combined.top, bottom = combined.bottom, "window insets applied");
        self.apply_inset_padding(scene);
    }

    fn apply_inset_padding(&mut self, scene: &mut Scene) {
        let Some(child) = self.core.sheet_node(scene) else {
            return;
        };
        let Some(initial) = self.initial_padding else {
            return;
        };
        let collapsed = self.core.state == SheetState::Collapsed;
        let inset_bottom = self.core.inset_bottom;
        if let Some(node) = scene.get_mut(child) {
            node.padding.top = initial.top;
            node.padding.bottom = initial.bottom + inset_bottom;
            if collapsed {
                node.height = Height::WrapContent;
            }
        }
        scene.request_layout();
    }

    // ------------------------------------------------------------------
    // State changes
    // ------------------------------------------------------------------

    /// Move the sheet to `state`, animating when it is already laid out
    ///
    /// # Panics
    ///
    /// Panics when `state` is not `Collapsed` or `Expanded`.
    pub fn set_state(&mut self, scene: &mut Scene, state: SheetState) {
        assert!(
            state.is_terminal(),
            "set_state requires Collapsed or Expanded, got {:?}",
            state
        );
        let Some(child) = self.core.sheet_node(scene) else {
            self.core.set_internal_state(scene, state);
            return;
        };
        if scene.is_layout_requested() || !self.tasks.is_empty() {
            debug!(?state, "deferring settle until after layout");
            self.tasks.post(PostedTask::StartSettling(state));
        } else {
            self.start_settling(scene, child, state);
        }
    }

    /// Run work that was waiting for a layout pass
    pub fn run_posted(&mut self, scene: &mut Scene) {
        for task in self.tasks.drain() {
            match task {
                PostedTask::StartSettling(state) => match self.core.sheet_node(scene) {
                    Some(child) => self.start_settling(scene, child, state),
                    None => self.core.set_internal_state(scene, state),
                },
            }
        }
    }

    /// Advance an in-flight settle by one frame
    ///
    /// Returns `true` while another frame is needed.
    pub fn on_animation_frame(&mut self, scene: &mut Scene, dt: Duration) -> bool {
        if !scene.is_layout_requested() && !self.tasks.is_empty() {
            self.run_posted(scene);
        }
        let Some(target) = self.tracker.take() else {
            return false;
        };
        if self.core.sheet_node(scene).is_none() {
            return false;
        }

        let still_settling = match self.helper.as_mut() {
            Some(helper) => helper.continue_settling(scene, &mut self.core, dt),
            None => false,
        };
        if still_settling {
            self.tracker.continue_settling_to(target);
            return true;
        }
        if self.drag_state() == Some(DragState::Dragging) {
            trace!(?target, "settle interrupted by drag");
            return false;
        }
        self.core.set_internal_state(scene, target);
        false
    }

    fn start_settling(&mut self, scene: &mut Scene, child: NodeId, state: SheetState) {
        let top = self.core.top_for_state(state);
        debug!(?state, top, collapsed = self.core.collapsed_offset, "start settling");

        let settling = match self.helper.as_mut() {
            Some(helper) => helper.smooth_slide_view_to(scene, &mut self.core, child, top),
            None => false,
        };
        self.after_settle_started(scene, state, settling);
    }

    fn after_settle_started(&mut self, scene: &mut Scene, target: SheetState, settling: bool) {
        if settling {
            self.core.set_internal_state(scene, SheetState::Settling);
            self.tracker.continue_settling_to(target);
        } else {
            self.tracker.clear();
            self.core.set_internal_state(scene, target);
        }
    }

    /// Pick up a release decided inside the drag helper
    fn finish_release(&mut self, scene: &mut Scene) {
        let Some(target) = self.core.release_target.take() else {
            return;
        };
        let settling = self.drag_state() == Some(DragState::Settling);
        self.after_settle_started(scene, target, settling);
    }

    // ------------------------------------------------------------------
    // Touch handling
    // ------------------------------------------------------------------

    fn reset_touch_tracking(&mut self) {
        self.core.active_pointer = None;
        self.core.touching_scrolling_child = false;
    }

    fn should_handle_dragging_with_helper(&self) -> bool {
        self.helper.is_some() && (self.core.options.draggable || self.core.state == SheetState::Dragging)
    }

    /// Observe a pointer event before the sheet's children see it
    ///
    /// Returns `true` when the sheet claims the gesture; subsequent events
    /// should go to `touch_event`.
    pub fn intercept_touch(&mut self, scene: &mut Scene, event: &TouchEvent) -> bool {
        let Some(child) = self.core.sheet_node(scene) else {
            return false;
        };
        if let Some(id) = self.core.options.content_view_id {
            if scene.get(child).and_then(|n| n.view_id) != Some(id) {
                return true;
            }
        }

        if event.is_down() {
            self.reset_touch_tracking();
        }

        match event.action {
            TouchAction::Up | TouchAction::Cancel => {
                self.core.touching_scrolling_child = false;
                self.core.active_pointer = None;
                if self.ignore_events {
                    self.ignore_events = false;
                    return false;
                }
            }
            TouchAction::Down => {
                self.last_y = event.y;
                if self.core.state != SheetState::Settling {
                    let over_scroll = self
                        .core
                        .scroll_child_node(scene)
                        .is_some_and(|scroll| scene.is_point_in_node(scroll, event.x, event.y));
                    if over_scroll {
                        self.core.active_pointer = Some(event.pointer_id);
                        self.core.touching_scrolling_child = true;
                    }
                }
                self.ignore_events = self.core.active_pointer.is_none()
                    && !scene.is_point_in_node(child, event.x, event.y);
            }
            TouchAction::Move => {}
        }

        if !self.ignore_events && self.core.options.draggable {
            if let Some(helper) = self.helper.as_mut() {
                if helper.should_intercept_touch_event(scene, &mut self.core, event) {
                    return true;
                }
            }
        }

        // Tapping the scrim collapses an expanded sheet
        if self.core.options.use_scrim
            && self.core.state == SheetState::Expanded
            && event.is_down()
            && event.y <= self.core.expanded_offset
        {
            self.set_state(scene, SheetState::Collapsed);
            return true;
        }

        // The helper only captures the topmost child; claim drags that start
        // on the sheet but outside the scroll child ourselves
        let Some(scroll) = self.core.scroll_child_node(scene) else {
            return false;
        };
        let Some(touch_slop) = self.helper.as_ref().map(|h| h.touch_slop()) else {
            return false;
        };
        event.action == TouchAction::Move
            && !self.ignore_events
            && self.core.state != SheetState::Dragging
            && !scene.is_point_in_node(scroll, event.x, event.y)
            && (self.last_y - event.y).abs() > touch_slop
    }

    /// Handle a pointer event for a gesture the sheet has claimed
    pub fn touch_event(&mut self, scene: &mut Scene, event: &TouchEvent) -> bool {
        let Some(child) = self.core.sheet_node(scene) else {
            return false;
        };
        if self.core.state == SheetState::Dragging && event.is_down() {
            return true;
        }

        if self.should_handle_dragging_with_helper() {
            if let Some(helper) = self.helper.as_mut() {
                helper.process_touch_event(scene, &mut self.core, event);
            }
            self.finish_release(scene);
        }

        if event.is_down() {
            self.reset_touch_tracking();
        }

        if self.should_handle_dragging_with_helper()
            && event.action == TouchAction::Move
            && !self.ignore_events
        {
            if let Some(helper) = self.helper.as_mut() {
                if (self.last_y - event.y).abs() > helper.touch_slop()
                    && helper.captured_view() != Some(child)
                {
                    helper.capture_child_view(scene, &mut self.core, child, event.pointer_id);
                }
            }
        }

        !self.ignore_events
    }

    // ------------------------------------------------------------------
    // Nested scrolling
    // ------------------------------------------------------------------

    /// A descendant is starting to scroll; accept vertical scrolls
    pub fn on_start_nested_scroll(&mut self, axes: ScrollAxes) -> bool {
        self.last_nested_scroll_dy = 0.0;
        self.nested_scrolled = false;
        axes.vertical
    }

    /// Stop an in-flight settle so nested scrolling can take over the sheet
    fn interrupt_settle(&mut self, scene: &mut Scene) {
        if !self.tracker.is_posted() {
            return;
        }
        trace!("settle interrupted by nested scroll");
        self.tracker.clear();
        if let Some(helper) = self.helper.as_mut() {
            helper.stop_settling(scene, &mut self.core);
        }
        self.core.set_internal_state(scene, SheetState::Dragging);
    }

    /// Offer a scroll delta to the sheet before the scroll child consumes it
    ///
    /// Positive `dy` scrolls content towards its end (finger moving up).
    /// Returns the portion of `dy` the sheet consumed.
    pub fn on_nested_pre_scroll(
        &mut self,
        scene: &mut Scene,
        target: NodeId,
        dy: f32,
        kind: ScrollKind,
    ) -> f32 {
        if kind == ScrollKind::NonTouch {
            return 0.0;
        }
        if self.core.scroll_child_node(scene) != Some(target) {
            return 0.0;
        }
        let Some(child) = self.core.sheet_node(scene) else {
            return 0.0;
        };
        self.interrupt_settle(scene);
        let Some(current_top) = self.core.sheet_top(scene) else {
            return 0.0;
        };
        self.last_nested_scroll_dy = dy;
        self.nested_scrolled = true;

        let new_top = current_top - dy;
        let draggable = self.core.options.draggable;
        let mut consumed = 0.0;
        if dy > 0.0 {
            if new_top <= self.core.expanded_offset {
                consumed = current_top - self.core.expanded_offset;
                self.core.move_sheet(scene, child, -consumed);
                self.core.set_internal_state(scene, SheetState::Expanded);
            } else if draggable {
                consumed = dy;
                self.core.move_sheet(scene, child, -dy);
                self.core.set_internal_state(scene, SheetState::Dragging);
            }
        } else if dy < 0.0 {
            let content_at_top = !scene.get(target).is_some_and(|n| n.can_scroll_up());
            if content_at_top {
                if new_top >= self.core.collapsed_offset {
                    consumed = current_top - self.core.collapsed_offset;
                    self.core.move_sheet(scene, child, -consumed);
                    self.core.set_internal_state(scene, SheetState::Collapsed);
                } else if draggable {
                    consumed = dy;
                    self.core.move_sheet(scene, child, -dy);
                    self.core.set_internal_state(scene, SheetState::Dragging);
                }
            }
        }
        consumed
    }

    /// The nested scroll ended; settle a sheet left mid-drag
    pub fn on_stop_nested_scroll(&mut self, scene: &mut Scene, target: NodeId) {
        let nested_scrolled = std::mem::take(&mut self.nested_scrolled);
        if !nested_scrolled || self.core.state != SheetState::Dragging {
            return;
        }
        if self.core.scroll_child_node(scene) != Some(target) {
            return;
        }
        let Some(child) = self.core.sheet_node(scene) else {
            return;
        };
        let Some(top) = self.core.sheet_top(scene) else {
            return;
        };

        let state = if top <= self.core.expanded_offset || self.last_nested_scroll_dy > 0.0 {
            SheetState::Expanded
        } else if self.last_nested_scroll_dy < 0.0 {
            SheetState::Collapsed
        } else {
            resolve_release_target(top, self.core.collapsed_offset, 0.0, 0.0)
        };
        self.start_settling(scene, child, state);
    }

    /// Whether the sheet swallows a fling of `target`
    ///
    /// Flings of the scroll child are consumed unless the sheet is expanded,
    /// so content only flings once the sheet is fully open.
    pub fn on_nested_pre_fling(&self, scene: &Scene, target: NodeId, _vx: f32, _vy: f32) -> bool {
        self.core.scroll_child_node(scene) == Some(target) && self.core.state != SheetState::Expanded
    }
}
