//! Time-driven vertical settle animation

use std::time::Duration;

/// Animates a single coordinate from a start value to a final value
///
/// Progress is driven by the frame delta passed to `advance`, so the
/// animation is deterministic under test.
#[derive(Debug, Clone, Default)]
pub struct Scroller {
    start_y: f32,
    final_y: f32,
    current_y: f32,
    duration: Duration,
    elapsed: Duration,
    finished: bool,
}

impl Scroller {
    pub fn new() -> Self {
        Self {
            finished: true,
            ..Default::default()
        }
    }

    pub fn start(&mut self, start_y: f32, dy: f32, duration: Duration) {
        self.start_y = start_y;
        self.final_y = start_y + dy;
        self.current_y = start_y;
        self.duration = duration;
        self.elapsed = Duration::ZERO;
        self.finished = false;
    }

    /// Advance by one frame; returns `true` while the animation is running
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.finished {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration || self.duration.is_zero() {
            self.current_y = self.final_y;
            self.finished = true;
            return true;
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.current_y = self.start_y + (self.final_y - self.start_y) * ease_out_quint(t);
        true
    }

    /// Stop where the animation currently is
    pub fn abort(&mut self) {
        self.current_y = self.final_y;
        self.finished = true;
    }

    pub fn current_y(&self) -> f32 {
        self.current_y
    }

    pub fn final_y(&self) -> f32 {
        self.final_y
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Quintic ease-out: fast start, gentle landing
fn ease_out_quint(t: f32) -> f32 {
    let t = t - 1.0;
    t * t * t * t * t + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaches_final_value_after_duration() {
        let mut scroller = Scroller::new();
        scroller.start(600.0, -600.0, Duration::from_millis(100));
        let mut frames = 0;
        while scroller.advance(Duration::from_millis(16)) {
            frames += 1;
            assert!(scroller.current_y() <= 600.0 && scroller.current_y() >= 0.0);
        }
        assert!(frames >= 6);
        assert_eq!(scroller.current_y(), 0.0);
        assert!(scroller.is_finished());
    }

    #[test]
    fn test_easing_is_monotonic() {
        let mut previous = 0.0;
        for i in 0..=100 {
            let value = ease_out_quint(i as f32 / 100.0);
            assert!(value >= previous);
            previous = value;
        }
        assert_eq!(ease_out_quint(1.0), 1.0);
    }
}
