//! Pointer velocity estimation
//!
//! Keeps a short history of pointer samples and fits a line through the
//! recent ones. Samples older than `HORIZON`, or separated from newer ones by
//! a pause longer than `ASSUME_STOPPED`, are ignored.

use std::collections::VecDeque;
use std::time::Duration;

use super::touch::TouchEvent;

const HISTORY_SIZE: usize = 20;
const HORIZON: Duration = Duration::from_millis(100);
const ASSUME_STOPPED: Duration = Duration::from_millis(40);

#[derive(Debug, Clone, Copy)]
struct Sample {
    time: Duration,
    x: f32,
    y: f32,
}

#[derive(Debug, Default, Clone)]
pub struct VelocityTracker {
    samples: VecDeque<Sample>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Record an event; a press starts a new history
    pub fn add_movement(&mut self, event: &TouchEvent) {
        if event.is_down() {
            self.samples.clear();
        }
        self.samples.push_back(Sample {
            time: event.time,
            x: event.x,
            y: event.y,
        });
        while self.samples.len() > HISTORY_SIZE {
            self.samples.pop_front();
        }
    }

    /// Velocity in pixels per second as (x, y)
    pub fn velocity(&self) -> (f32, f32) {
        let Some(newest) = self.samples.back() else {
            return (0.0, 0.0);
        };

        let mut window: Vec<Sample> = Vec::with_capacity(self.samples.len());
        let mut previous_time = newest.time;
        for sample in self.samples.iter().rev() {
            if newest.time.saturating_sub(sample.time) > HORIZON
                || previous_time.saturating_sub(sample.time) > ASSUME_STOPPED
            {
                break;
            }
            previous_time = sample.time;
            window.push(*sample);
        }

        if window.len() < 2 {
            return (0.0, 0.0);
        }

        let times: Vec<f32> = window
            .iter()
            .map(|s| -(newest.time.saturating_sub(s.time).as_secs_f32()))
            .collect();
        let xs: Vec<f32> = window.iter().map(|s| s.x).collect();
        let ys: Vec<f32> = window.iter().map(|s| s.y).collect();

        (slope(&times, &xs), slope(&times, &ys))
    }

    /// Velocity with magnitudes below `min` zeroed and above `max` capped
    pub fn clamped_velocity(&self, min: f32, max: f32) -> (f32, f32) {
        let (vx, vy) = self.velocity();
        (clamp_magnitude(vx, min, max), clamp_magnitude(vy, min, max))
    }
}

/// Least-squares slope of `values` over `times`
fn slope(times: &[f32], values: &[f32]) -> f32 {
    let n = times.len() as f32;
    let mean_t = times.iter().sum::<f32>() / n;
    let mean_v = values.iter().sum::<f32>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (t, v) in times.iter().zip(values) {
        numerator += (t - mean_t) * (v - mean_v);
        denominator += (t - mean_t) * (t - mean_t);
    }
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

pub(crate) fn clamp_magnitude(value: f32, min: f32, max: f32) -> f32 {
    let magnitude = value.abs();
    if magnitude < min {
        0.0
    } else if magnitude > max {
        max.copysign(value)
    } else {
        value
    }
}
