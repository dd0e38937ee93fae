//! The timer screen: one countdown engine driven by one dial

use std::time::Duration;

use tracing::debug;

use super::{CountdownEngine, TimerEvent, TimerSnapshot, TimerState};
use crate::{
    config::TimerConfig,
    dial::{DialInputController, Point},
};

/// Single-threaded core invoked synchronously by the host event loop.
///
/// Every handler returns the notifications it produced, in order.
#[derive(Debug)]
pub struct TimerScreen {
    engine: CountdownEngine,
    dial: DialInputController,
}

impl TimerScreen {
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            engine: CountdownEngine::new(config.max_minutes, config.tick_interval),
            dial: DialInputController::new(config),
        }
    }

    pub fn engine(&self) -> &CountdownEngine {
        &self.engine
    }

    pub fn state(&self) -> TimerState {
        self.engine.state()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.engine.snapshot()
    }

    pub fn tick_interval(&self) -> Duration {
        self.engine.tick_interval()
    }

    pub fn registered_tick(&self) -> Option<u64> {
        self.engine.registered_tick()
    }

    pub fn on_gesture_start(&mut self) {
        self.dial.on_gesture_start();
        self.engine.begin_adjusting();
    }

    /// A sample without a preceding gesture start still counts as adjusting
    pub fn on_gesture_sample(&mut self, point: Point, now: Duration) -> Vec<TimerEvent> {
        self.engine.begin_adjusting();
        self.dial.on_gesture_sample(point, now, &mut self.engine)
    }

    pub fn on_gesture_end(&mut self) {
        self.dial.on_gesture_end();
        self.engine.end_adjusting();
    }

    /// Start if idle, stop if running
    pub fn on_tap(&mut self) -> Vec<TimerEvent> {
        debug!("Tap while {}", self.engine.state());
        self.engine.toggle()
    }

    /// Host tick callback for the registration `generation`
    pub fn on_tick(&mut self, generation: u64) -> Vec<TimerEvent> {
        self.engine.tick_for(generation)
    }

    pub fn set_duration(&mut self, minutes: f64) -> Vec<TimerEvent> {
        self.engine.set_duration(minutes)
    }
}
