//! Drag helper: touch slop, pointer capture and settle animation
//!
//! A generic utility for dragging one child of a parent node vertically.
//! The owner decides policy through [`DragCallback`]: which node may be
//! captured, how positions are clamped and where a released node should
//! settle. The helper handles the mechanics of following the pointer and
//! animating the settle.

use std::f32::consts::PI;
use std::time::Duration;

use tracing::trace;

use super::scroller::Scroller;
use super::touch::{TouchAction, TouchEvent};
use super::velocity::{clamp_magnitude, VelocityTracker};
use crate::scene::{NodeId, Scene};

/// Default touch slop in logical pixels
pub const TOUCH_SLOP: f32 = 8.0;
/// Velocities below this (px/s, logical) count as no fling
pub const MIN_FLING_VELOCITY: f32 = 50.0;
/// Velocities are capped to this (px/s, logical)
pub const MAX_FLING_VELOCITY: f32 = 8000.0;

const BASE_SETTLE_DURATION_MS: f32 = 256.0;
const MAX_SETTLE_DURATION_MS: f32 = 600.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    /// Not dragging or animating
    Idle,
    /// Following an active pointer
    Dragging,
    /// Animating towards a final position
    Settling,
}

/// Policy hooks consulted by the drag helper
pub trait DragCallback {
    /// Whether `child` may be captured by `pointer_id`
    fn try_capture_view(&mut self, scene: &Scene, child: NodeId, pointer_id: u32) -> bool;

    fn on_drag_state_changed(&mut self, _scene: &mut Scene, _state: DragState) {}

    /// Called after the captured node moved to `top` (parent coordinates)
    fn on_view_position_changed(&mut self, _scene: &mut Scene, _child: NodeId, _top: f32, _dy: f32) {}

    /// The pointer let go of the captured node
    ///
    /// Returns the top offset the node should settle at, or `None` to leave
    /// it where it is.
    fn on_view_released(
        &mut self,
        scene: &mut Scene,
        child: NodeId,
        xvel: f32,
        yvel: f32,
    ) -> Option<f32>;

    /// Clamp a proposed top offset for `child`
    fn clamp_view_position_vertical(&self, child: NodeId, top: f32, dy: f32) -> f32;

    /// Vertical range the child can be dragged through; 0 disables dragging
    fn view_vertical_drag_range(&self, _child: NodeId) -> f32 {
        0.0
    }
}

#[derive(Debug, Clone, Copy)]
struct Motion {
    pointer_id: u32,
    initial_x: f32,
    initial_y: f32,
    last_y: f32,
}

#[derive(Debug)]
pub struct DragHelper {
    parent: NodeId,
    touch_slop: f32,
    min_velocity: f32,
    max_velocity: f32,
    state: DragState,
    captured: Option<NodeId>,
    active_pointer: Option<u32>,
    motion: Option<Motion>,
    velocity: VelocityTracker,
    scroller: Scroller,
}

impl DragHelper {
    /// Create a helper for children of `parent`, scaled by the display factor
    pub fn new(parent: NodeId, scale_factor: f32) -> Self {
        Self {
            parent,
            touch_slop: TOUCH_SLOP * scale_factor,
            min_velocity: MIN_FLING_VELOCITY * scale_factor,
            max_velocity: MAX_FLING_VELOCITY * scale_factor,
            state: DragState::Idle,
            captured: None,
            active_pointer: None,
            motion: None,
            velocity: VelocityTracker::new(),
            scroller: Scroller::new(),
        }
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }

    pub fn touch_slop(&self) -> f32 {
        self.touch_slop
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn captured_view(&self) -> Option<NodeId> {
        self.captured
    }

    /// Forget the current gesture
    pub fn cancel(&mut self) {
        self.active_pointer = None;
        self.motion = None;
        self.velocity.clear();
    }

    /// Halt a settle animation where it is, leaving the node in place
    pub fn stop_settling(&mut self, scene: &mut Scene, cb: &mut impl DragCallback) {
        if self.state != DragState::Settling {
            return;
        }
        self.scroller.abort();
        self.set_drag_state(scene, cb, DragState::Idle);
    }

    /// Capture `child` for dragging by `pointer_id`, bypassing the callback
    pub fn capture_child_view(
        &mut self,
        scene: &mut Scene,
        cb: &mut impl DragCallback,
        child: NodeId,
        pointer_id: u32,
    ) {
        if scene.parent_of(child) != Some(self.parent) {
            return;
        }
        self.captured = Some(child);
        self.active_pointer = Some(pointer_id);
        self.set_drag_state(scene, cb, DragState::Dragging);
    }

    /// Observe an event on its way to the children
    ///
    /// Returns `true` once the helper has started dragging and the parent
    /// should take over the gesture.
    pub fn should_intercept_touch_event(
        &mut self,
        scene: &mut Scene,
        cb: &mut impl DragCallback,
        event: &TouchEvent,
    ) -> bool {
        if event.is_down() {
            self.cancel();
        }
        self.velocity.add_movement(event);

        match event.action {
            TouchAction::Down => {
                self.save_initial_motion(event);
                let to_capture = scene.find_top_child_under(self.parent, event.x, event.y);
                // Catch a settling node mid-flight
                if to_capture.is_some()
                    && to_capture == self.captured
                    && self.state == DragState::Settling
                {
                    self.try_capture_view_for_drag(scene, cb, to_capture, event.pointer_id);
                }
            }
            TouchAction::Move => {
                let Some(motion) = self.motion.filter(|m| m.pointer_id == event.pointer_id) else {
                    return self.state == DragState::Dragging;
                };
                let dx = event.x - motion.initial_x;
                let dy = event.y - motion.initial_y;
                let to_capture =
                    scene.find_top_child_under(self.parent, motion.initial_x, motion.initial_y);
                let past_slop = to_capture.is_some_and(|c| self.check_touch_slop(&*cb, c, dx, dy));

                if past_slop {
                    if let Some(child) = to_capture {
                        // Only capture when the move would actually change the position
                        let old_top = scene.get(child).map(|n| n.rect.y).unwrap_or(0.0);
                        let new_top = cb.clamp_view_position_vertical(child, old_top + dy, dy);
                        let range = cb.view_vertical_drag_range(child);
                        if range == 0.0 || (range > 0.0 && new_top == old_top) {
                            self.save_last_motion(event);
                            return self.state == DragState::Dragging;
                        }
                    }
                }

                if self.state != DragState::Dragging && past_slop {
                    self.try_capture_view_for_drag(scene, cb, to_capture, event.pointer_id);
                }
                self.save_last_motion(event);
            }
            TouchAction::Up | TouchAction::Cancel => self.cancel(),
        }

        self.state == DragState::Dragging
    }

    /// Handle an event the parent has claimed
    pub fn process_touch_event(
        &mut self,
        scene: &mut Scene,
        cb: &mut impl DragCallback,
        event: &TouchEvent,
    ) {
        if event.is_down() {
            self.cancel();
        }
        self.velocity.add_movement(event);

        match event.action {
            TouchAction::Down => {
                self.save_initial_motion(event);
                let to_capture = scene.find_top_child_under(self.parent, event.x, event.y);
                self.try_capture_view_for_drag(scene, cb, to_capture, event.pointer_id);
            }
            TouchAction::Move => {
                if self.state == DragState::Dragging {
                    if self.active_pointer != Some(event.pointer_id) {
                        return;
                    }
                    let last_y = self.motion.map(|m| m.last_y).unwrap_or(event.y);
                    let dy = event.y - last_y;
                    self.drag_by(scene, cb, dy);
                    self.save_last_motion(event);
                } else {
                    let Some(motion) = self.motion.filter(|m| m.pointer_id == event.pointer_id)
                    else {
                        return;
                    };
                    let dx = event.x - motion.initial_x;
                    let dy = event.y - motion.initial_y;
                    let to_capture = scene.find_top_child_under(self.parent, event.x, event.y);
                    let past_slop =
                        to_capture.is_some_and(|c| self.check_touch_slop(&*cb, c, dx, dy));
                    if past_slop {
                        self.try_capture_view_for_drag(scene, cb, to_capture, event.pointer_id);
                    }
                    self.save_last_motion(event);
                }
            }
            TouchAction::Up => {
                if self.state == DragState::Dragging {
                    let (xvel, yvel) = self
                        .velocity
                        .clamped_velocity(self.min_velocity, self.max_velocity);
                    self.dispatch_view_released(scene, cb, xvel, yvel);
                }
                self.cancel();
            }
            TouchAction::Cancel => {
                if self.state == DragState::Dragging {
                    self.dispatch_view_released(scene, cb, 0.0, 0.0);
                }
                self.cancel();
            }
        }
    }

    /// Animate `child` to `final_top` without a pointer involved
    ///
    /// Returns `true` when an animation started; call `continue_settling`
    /// every frame until it returns `false`.
    pub fn smooth_slide_view_to(
        &mut self,
        scene: &mut Scene,
        cb: &mut impl DragCallback,
        child: NodeId,
        final_top: f32,
    ) -> bool {
        self.captured = Some(child);
        self.active_pointer = None;
        let settling = self.force_settle_captured_view_at(scene, cb, final_top, 0.0, 0.0);
        if !settling && self.state == DragState::Idle {
            self.captured = None;
        }
        settling
    }

    /// Advance a settle animation by one frame
    ///
    /// Returns `true` while settling is still in progress.
    pub fn continue_settling(
        &mut self,
        scene: &mut Scene,
        cb: &mut impl DragCallback,
        dt: Duration,
    ) -> bool {
        if self.state != DragState::Settling {
            return false;
        }
        let Some(child) = self.captured.filter(|c| scene.contains(*c)) else {
            self.set_drag_state(scene, cb, DragState::Idle);
            return false;
        };

        let mut keep_going = self.scroller.advance(dt);
        let y = self.scroller.current_y();
        let top = scene.get(child).map(|n| n.rect.y).unwrap_or(y);
        let dy = y - top;
        if dy != 0.0 {
            scene.offset_top_and_bottom(child, dy);
            cb.on_view_position_changed(scene, child, y, dy);
        }
        trace!(top = y, final_top = self.scroller.final_y(), "settle frame");

        if keep_going && self.scroller.is_finished() && y == self.scroller.final_y() {
            keep_going = false;
        }
        if !keep_going {
            self.set_drag_state(scene, cb, DragState::Idle);
        }
        self.state == DragState::Settling
    }

    fn dispatch_view_released(
        &mut self,
        scene: &mut Scene,
        cb: &mut impl DragCallback,
        xvel: f32,
        yvel: f32,
    ) {
        let Some(child) = self.captured else {
            return;
        };
        if let Some(final_top) = cb.on_view_released(scene, child, xvel, yvel) {
            self.force_settle_captured_view_at(scene, cb, final_top, xvel, yvel);
        }

        if self.state == DragState::Dragging {
            self.set_drag_state(scene, cb, DragState::Idle);
        }
    }

    fn force_settle_captured_view_at(
        &mut self,
        scene: &mut Scene,
        cb: &mut impl DragCallback,
        final_top: f32,
        xvel: f32,
        yvel: f32,
    ) -> bool {
        let Some(child) = self.captured else {
            return false;
        };
        let Some(start_top) = scene.get(child).map(|n| n.rect.y) else {
            return false;
        };
        let dy = final_top - start_top;
        if dy == 0.0 {
            self.scroller.abort();
            self.set_drag_state(scene, cb, DragState::Idle);
            return false;
        }

        let parent_width = scene.get(self.parent).map(|n| n.rect.width).unwrap_or(1.0);
        let duration = self.compute_settle_duration(&*cb, child, dy, xvel, yvel, parent_width);
        self.scroller.start(start_top, dy, duration);
        self.set_drag_state(scene, cb, DragState::Settling);
        true
    }

    fn compute_settle_duration(
        &self,
        cb: &impl DragCallback,
        child: NodeId,
        dy: f32,
        _xvel: f32,
        yvel: f32,
        parent_width: f32,
    ) -> Duration {
        let yvel = clamp_magnitude(yvel, self.min_velocity, self.max_velocity);
        let range = cb.view_vertical_drag_range(child);
        let millis = axis_duration_ms(dy, yvel, range, parent_width);
        Duration::from_secs_f32(millis / 1000.0)
    }

    fn drag_by(&mut self, scene: &mut Scene, cb: &mut impl DragCallback, dy: f32) {
        let Some(child) = self.captured.filter(|c| scene.contains(*c)) else {
            return;
        };
        let old_top = scene.get(child).map(|n| n.rect.y).unwrap_or(0.0);
        let new_top = cb.clamp_view_position_vertical(child, old_top + dy, dy);
        let moved = new_top - old_top;
        if moved != 0.0 {
            scene.offset_top_and_bottom(child, moved);
            cb.on_view_position_changed(scene, child, new_top, moved);
        }
    }

    fn try_capture_view_for_drag(
        &mut self,
        scene: &mut Scene,
        cb: &mut impl DragCallback,
        to_capture: Option<NodeId>,
        pointer_id: u32,
    ) -> bool {
        let Some(child) = to_capture else {
            return false;
        };
        if self.captured == Some(child) && self.active_pointer == Some(pointer_id) {
            return true;
        }
        if cb.try_capture_view(scene, child, pointer_id) {
            self.capture_child_view(scene, cb, child, pointer_id);
            return true;
        }
        false
    }

    fn check_touch_slop(&self, cb: &impl DragCallback, child: NodeId, _dx: f32, dy: f32) -> bool {
        cb.view_vertical_drag_range(child) > 0.0 && dy.abs() > self.touch_slop
    }

    fn set_drag_state(&mut self, scene: &mut Scene, cb: &mut impl DragCallback, state: DragState) {
        if self.state == state {
            return;
        }
        self.state = state;
        cb.on_drag_state_changed(scene, state);
        if state == DragState::Idle {
            self.captured = None;
        }
    }

    fn save_initial_motion(&mut self, event: &TouchEvent) {
        self.motion = Some(Motion {
            pointer_id: event.pointer_id,
            initial_x: event.x,
            initial_y: event.y,
            last_y: event.y,
        });
    }

    fn save_last_motion(&mut self, event: &TouchEvent) {
        if let Some(motion) = self.motion.as_mut() {
            if motion.pointer_id == event.pointer_id {
                motion.last_y = event.y;
            }
        }
    }
}

/// Settle duration for one axis, in milliseconds
///
/// With a fling velocity the duration follows the velocity; without one it
/// scales with the fraction of the drag range covered.
fn axis_duration_ms(delta: f32, velocity: f32, motion_range: f32, parent_width: f32) -> f32 {
    if delta == 0.0 {
        return 0.0;
    }
    let width = parent_width.max(1.0);
    let half_width = width / 2.0;
    let distance_ratio = (delta.abs() / width).min(1.0);
    let distance = half_width + half_width * distance_influence(distance_ratio);

    let velocity = velocity.abs();
    let duration = if velocity > 0.0 {
        4.0 * (1000.0 * (distance / velocity).abs()).round()
    } else if motion_range > 0.0 {
        let range = delta.abs() / motion_range;
        (range + 1.0) * BASE_SETTLE_DURATION_MS
    } else {
        BASE_SETTLE_DURATION_MS
    };
    duration.min(MAX_SETTLE_DURATION_MS)
}

/// Dampens the effect of distance on duration
fn distance_influence(f: f32) -> f32 {
    ((f - 0.5) * 0.3 * PI / 2.0).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_without_velocity_scales_with_range() {
        let short = axis_duration_ms(100.0, 0.0, 1000.0, 400.0);
        let long = axis_duration_ms(900.0, 0.0, 1000.0, 400.0);
        assert!(short < long);
        assert!(long <= MAX_SETTLE_DURATION_MS);
        assert!((short - 1.1 * BASE_SETTLE_DURATION_MS).abs() < 0.01);
    }

    #[test]
    fn test_fast_fling_settles_quickly() {
        let slow = axis_duration_ms(500.0, 500.0, 1000.0, 400.0);
        let fast = axis_duration_ms(500.0, 8000.0, 1000.0, 400.0);
        assert!(fast < slow);
        assert_eq!(slow, MAX_SETTLE_DURATION_MS);
    }

    #[test]
    fn test_zero_delta_has_no_duration() {
        assert_eq!(axis_duration_ms(0.0, 1000.0, 1000.0, 400.0), 0.0);
    }
}
