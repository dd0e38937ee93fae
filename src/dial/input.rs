//! Drag gesture accumulation into whole-minute duration steps

use std::time::Duration;

use tracing::{debug, trace};

use super::angle::{angle_of, delta, Point};
use crate::config::TimerConfig;
use crate::state::{CountdownEngine, TimerEvent};

/// Turns a stream of pointer samples into minute steps on a `CountdownEngine`.
///
/// Rotation is scaled by the dial sensitivity and collected until it reaches
/// the minute threshold; whatever is left over carries into the next sample
/// but not into the next gesture.
#[derive(Debug)]
pub struct DialInputController {
    sensitivity: f64,
    update_threshold: Duration,
    minute_threshold: f64,
    center: Point,
    accumulated_delta: f64,
    previous_angle: Option<f64>,
    last_sample_time: Option<Duration>,
}

impl DialInputController {
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            sensitivity: config.dial_sensitivity,
            update_threshold: config.update_threshold,
            minute_threshold: config.minute_threshold,
            center: config.center,
            accumulated_delta: 0.0,
            previous_angle: None,
            last_sample_time: None,
        }
    }

    pub fn accumulated_delta(&self) -> f64 {
        self.accumulated_delta
    }

    pub fn previous_angle(&self) -> Option<f64> {
        self.previous_angle
    }

    pub fn on_gesture_start(&mut self) {
        trace!("Dial gesture started");
        self.reset();
    }

    /// Feed one pointer sample taken at `now` (time since an arbitrary
    /// fixed epoch). Ignored while the countdown runs or when it arrives
    /// sooner than the update threshold after the last accepted sample.
    pub fn on_gesture_sample(
        &mut self,
        point: Point,
        now: Duration,
        engine: &mut CountdownEngine,
    ) -> Vec<TimerEvent> {
        if engine.is_running() {
            trace!("Dial sample ignored while countdown is running");
            return Vec::new();
        }
        if let Some(last) = self.last_sample_time {
            match now.checked_sub(last) {
                Some(elapsed) if elapsed < self.update_threshold => {
                    trace!("Dial sample debounced");
                    return Vec::new();
                }
                Some(_) => {}
                // The sample clock went backwards; start debouncing from here
                None => debug!("Dial sample clock reset from {:?} to {:?}", last, now),
            }
        }

        let angle = angle_of(point, self.center);
        let mut events = Vec::new();
        if let Some(previous) = self.previous_angle {
            let steps = self.accumulate(delta(previous, angle));
            if steps != 0.0 {
                debug!("Dial step of {} min", steps);
                events = engine.step_minutes(steps);
            }
        }

        self.previous_angle = Some(angle);
        self.last_sample_time = Some(now);
        events
    }

    /// Sub-threshold rotation is dropped with the gesture
    pub fn on_gesture_end(&mut self) {
        if self.accumulated_delta != 0.0 {
            trace!("Discarding {:.3} of unconsumed dial rotation", self.accumulated_delta);
        }
        self.reset();
    }

    /// Add one raw angular delta; returns the whole steps it completed
    fn accumulate(&mut self, degrees: f64) -> f64 {
        self.accumulated_delta += degrees * self.sensitivity;
        if self.accumulated_delta.abs() < self.minute_threshold {
            return 0.0;
        }

        let steps = (self.accumulated_delta / self.minute_threshold).trunc();
        self.accumulated_delta -= steps * self.minute_threshold;
        steps
    }

    fn reset(&mut self) {
        self.previous_angle = None;
        self.accumulated_delta = 0.0;
    }
}
