//! Explicit scheduling state for deferred work and settle continuations

use std::collections::VecDeque;

use super::state::SheetState;

/// Work deferred until the pending layout pass has run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostedTask {
    StartSettling(SheetState),
}

/// Tracks an in-flight settle animation across frames
///
/// At most one continuation is pending; posting again while one is pending
/// only retargets it.
#[derive(Debug, Default, Clone)]
pub struct SettleTracker {
    target: Option<SheetState>,
    posted: bool,
}

impl SettleTracker {
    /// Schedule a continuation towards `target` for the next frame
    pub fn continue_settling_to(&mut self, target: SheetState) {
        self.target = Some(target);
        self.posted = true;
    }

    /// Take the pending continuation, if any
    pub fn take(&mut self) -> Option<SheetState> {
        if !self.posted {
            return None;
        }
        self.posted = false;
        self.target
    }

    pub fn is_posted(&self) -> bool {
        self.posted
    }

    pub fn target(&self) -> Option<SheetState> {
        self.target
    }

    pub fn clear(&mut self) {
        self.target = None;
        self.posted = false;
    }
}

/// FIFO of tasks posted to run after layout
#[derive(Debug, Default, Clone)]
pub struct TaskQueue {
    tasks: VecDeque<PostedTask>,
}

impl TaskQueue {
    pub fn post(&mut self, task: PostedTask) {
        self.tasks.push_back(task);
    }

    pub fn drain(&mut self) -> Vec<PostedTask> {
        self.tasks.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}
