//! Countdown engine: owns the duration and the repeating-tick registration

use std::time::Duration;

use tracing::{debug, info, trace};

use super::{TimerEvent, TimerSnapshot, TimerState};

/// Remaining duration plus the idle/running state machine.
///
/// The engine never sleeps. It hands out a tick generation on `start` and
/// the host loop calls back with it; a callback carrying a generation that
/// has since been cancelled is dropped, so a late tick cannot decrement twice.
#[derive(Debug)]
pub struct CountdownEngine {
    remaining_seconds: f64,
    state: TimerState,
    max_seconds: f64,
    tick_interval: Duration,
    registered_tick: Option<u64>,
    generations: u64,
}

impl CountdownEngine {
    /// Create an idle engine with zero duration
    pub fn new(max_minutes: u32, tick_interval: Duration) -> Self {
        Self {
            remaining_seconds: 0.0,
            state: TimerState::Idle,
            max_seconds: f64::from(max_minutes) * 60.0,
            tick_interval,
            registered_tick: None,
            generations: 0,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn remaining_seconds(&self) -> f64 {
        self.remaining_seconds
    }

    pub fn minutes(&self) -> f64 {
        self.remaining_seconds / 60.0
    }

    pub fn max_minutes(&self) -> f64 {
        self.max_seconds / 60.0
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Generation of the live tick registration, if any
    pub fn registered_tick(&self) -> Option<u64> {
        self.registered_tick
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::new(self.state, self.remaining_seconds)
    }

    /// Begin counting down. Ignored when already running or when there is
    /// nothing to count.
    pub fn start(&mut self) -> Vec<TimerEvent> {
        if self.is_running() {
            debug!("Start ignored, countdown already running");
            return Vec::new();
        }
        if self.remaining_seconds <= 0.0 {
            debug!("Start ignored, duration is zero");
            return Vec::new();
        }

        self.generations += 1;
        self.registered_tick = Some(self.generations);
        self.state = TimerState::Running;
        info!(
            "Countdown started: {:.1}s remaining, tick generation {}",
            self.remaining_seconds, self.generations
        );

        vec![TimerEvent::PlayingChanged { playing: true }]
    }

    /// Advance the countdown by one tick quantum
    pub fn tick(&mut self) -> Vec<TimerEvent> {
        if !self.is_running() {
            trace!("Tick ignored, countdown not running");
            return Vec::new();
        }

        self.remaining_seconds -= self.tick_interval.as_secs_f64();
        if self.remaining_seconds > 0.0 {
            trace!("Tick: {:.1}s remaining", self.remaining_seconds);
            return vec![TimerEvent::DurationChanged { minutes: self.minutes() }];
        }

        self.remaining_seconds = 0.0;
        self.cancel_tick();
        self.state = TimerState::Finished;
        info!("Countdown finished");
        let events = vec![
            TimerEvent::DurationChanged { minutes: 0.0 },
            TimerEvent::Finished,
            TimerEvent::PlayingChanged { playing: false },
        ];
        self.state = TimerState::Idle;
        events
    }

    /// Tick on behalf of a host registration; stale generations are dropped
    pub fn tick_for(&mut self, generation: u64) -> Vec<TimerEvent> {
        if self.registered_tick != Some(generation) {
            debug!("Dropping tick from stale generation {}", generation);
            return Vec::new();
        }
        self.tick()
    }

    /// Halt the countdown, keeping whatever duration is left
    pub fn stop(&mut self) -> Vec<TimerEvent> {
        self.cancel_tick();
        if !self.is_running() {
            return Vec::new();
        }

        self.state = TimerState::Idle;
        info!("Countdown stopped with {:.1}s remaining", self.remaining_seconds);

        let mut events = Vec::with_capacity(2);
        if self.remaining_seconds <= 0.0 {
            self.remaining_seconds = 0.0;
            events.push(TimerEvent::DurationChanged { minutes: 0.0 });
        }
        events.push(TimerEvent::PlayingChanged { playing: false });
        events
    }

    /// Tap surface: start when not running, stop when running
    pub fn toggle(&mut self) -> Vec<TimerEvent> {
        if self.is_running() {
            self.stop()
        } else {
            self.start()
        }
    }

    /// Drop the tick registration. Safe to call any number of times.
    pub fn cancel_tick(&mut self) -> bool {
        match self.registered_tick.take() {
            Some(generation) => {
                debug!("Cancelled tick generation {}", generation);
                true
            }
            None => false,
        }
    }

    /// Set the duration in minutes, clamped to the configured range.
    /// Ignored while running and for non-finite input.
    pub fn set_duration(&mut self, minutes: f64) -> Vec<TimerEvent> {
        if self.is_running() {
            debug!("Set duration ignored while running");
            return Vec::new();
        }
        if !minutes.is_finite() {
            debug!("Set duration ignored for non-finite value");
            return Vec::new();
        }

        self.remaining_seconds = (minutes * 60.0).clamp(0.0, self.max_seconds);
        debug!("Duration set to {:.2} min", self.minutes());
        vec![TimerEvent::DurationChanged { minutes: self.minutes() }]
    }

    /// Apply whole-minute dial steps; pulses only when the value moved
    pub fn step_minutes(&mut self, steps: f64) -> Vec<TimerEvent> {
        let before = self.remaining_seconds;
        let mut events = self.set_duration(self.minutes() + steps);
        if !events.is_empty() && self.remaining_seconds != before {
            events.push(TimerEvent::Pulse);
        }
        events
    }

    /// Mark the start of a dial adjustment when idle
    pub fn begin_adjusting(&mut self) {
        if self.state == TimerState::Idle {
            self.state = TimerState::Adjusting;
        }
    }

    /// Return to idle once a dial adjustment ends
    pub fn end_adjusting(&mut self) {
        if self.state == TimerState::Adjusting {
            self.state = TimerState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> CountdownEngine {
        CountdownEngine::new(60, Duration::from_secs(1))
    }

    fn count_finished(events: &[TimerEvent]) -> usize {
        events.iter().filter(|e| **e == TimerEvent::Finished).count()
    }

    #[test]
    fn start_with_zero_duration_is_noop() {
        let mut engine = engine();
        assert!(engine.start().is_empty());
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.registered_tick(), None);
    }

    #[test]
    fn five_minutes_run_down_to_finished_once() {
        let mut engine = engine();
        engine.set_duration(5.0);
        assert_eq!(engine.start(), vec![TimerEvent::PlayingChanged { playing: true }]);

        let mut finished = 0;
        let mut last = engine.remaining_seconds();
        for _ in 0..300 {
            let events = engine.tick();
            assert!(engine.remaining_seconds() <= last);
            last = engine.remaining_seconds();
            finished += count_finished(&events);
        }

        assert_eq!(engine.remaining_seconds(), 0.0);
        assert_eq!(finished, 1);
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.registered_tick(), None);

        // Further ticks after finishing do nothing
        assert!(engine.tick().is_empty());
        assert_eq!(engine.remaining_seconds(), 0.0);
    }

    #[test]
    fn ticks_reduce_duration_by_quantum() {
        let mut engine = engine();
        engine.set_duration(2.0);
        engine.start();
        for _ in 0..45 {
            engine.tick();
        }
        assert_eq!(engine.remaining_seconds(), 75.0);
        assert!(engine.is_running());
    }

    #[test]
    fn tenth_second_quantum_reaches_zero_at_same_rate() {
        let mut engine = CountdownEngine::new(60, Duration::from_millis(100));
        engine.set_duration(0.1);
        engine.start();
        let mut ticks = 0;
        while engine.is_running() {
            engine.tick();
            ticks += 1;
            assert!(ticks <= 61, "countdown overran");
        }
        assert!((59..=61).contains(&ticks));
        assert_eq!(engine.remaining_seconds(), 0.0);
    }

    #[test]
    fn finishing_tick_emits_zero_finish_and_stop() {
        let mut engine = CountdownEngine::new(60, Duration::from_secs(30));
        engine.set_duration(0.5);
        engine.start();
        assert_eq!(
            engine.tick(),
            vec![
                TimerEvent::DurationChanged { minutes: 0.0 },
                TimerEvent::Finished,
                TimerEvent::PlayingChanged { playing: false },
            ]
        );
    }

    #[test]
    fn stop_keeps_remaining_and_is_idempotent() {
        let mut engine = engine();
        engine.set_duration(3.0);
        engine.start();
        engine.tick();

        assert_eq!(engine.stop(), vec![TimerEvent::PlayingChanged { playing: false }]);
        assert_eq!(engine.remaining_seconds(), 179.0);
        assert_eq!(engine.state(), TimerState::Idle);

        assert!(engine.stop().is_empty());
        assert!(!engine.cancel_tick());
        assert_eq!(engine.remaining_seconds(), 179.0);
    }

    #[test]
    fn stop_when_idle_changes_nothing() {
        let mut engine = engine();
        engine.set_duration(4.0);
        assert!(engine.stop().is_empty());
        assert_eq!(engine.remaining_seconds(), 240.0);
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn stale_generation_ticks_are_dropped() {
        let mut engine = engine();
        engine.set_duration(1.0);
        engine.start();
        let first = engine.registered_tick().unwrap();
        engine.stop();
        engine.start();
        let second = engine.registered_tick().unwrap();
        assert_ne!(first, second);

        assert!(engine.tick_for(first).is_empty());
        assert_eq!(engine.remaining_seconds(), 60.0);
        assert!(!engine.tick_for(second).is_empty());
        assert_eq!(engine.remaining_seconds(), 59.0);
    }

    #[test]
    fn set_duration_ignored_while_running() {
        let mut engine = engine();
        engine.set_duration(10.0);
        engine.start();
        assert!(engine.set_duration(20.0).is_empty());
        assert_eq!(engine.minutes(), 10.0);
    }

    #[test]
    fn set_duration_clamps_and_ignores_nan() {
        let mut engine = engine();
        engine.set_duration(500.0);
        assert_eq!(engine.minutes(), 60.0);
        engine.set_duration(-4.0);
        assert_eq!(engine.minutes(), 0.0);
        engine.set_duration(12.0);
        assert!(engine.set_duration(f64::NAN).is_empty());
        assert_eq!(engine.minutes(), 12.0);
    }

    #[test]
    fn step_pulses_only_when_value_moves() {
        let mut engine = engine();
        assert_eq!(
            engine.step_minutes(2.0),
            vec![TimerEvent::DurationChanged { minutes: 2.0 }, TimerEvent::Pulse]
        );

        engine.set_duration(60.0);
        assert_eq!(
            engine.step_minutes(1.0),
            vec![TimerEvent::DurationChanged { minutes: 60.0 }]
        );
    }

    #[test]
    fn toggle_alternates_start_and_stop() {
        let mut engine = engine();
        engine.set_duration(1.0);
        engine.toggle();
        assert!(engine.is_running());
        engine.toggle();
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn adjusting_never_overlaps_running() {
        let mut engine = engine();
        engine.set_duration(1.0);
        engine.start();
        engine.begin_adjusting();
        assert_eq!(engine.state(), TimerState::Running);
        engine.end_adjusting();
        assert_eq!(engine.state(), TimerState::Running);

        engine.stop();
        engine.begin_adjusting();
        assert_eq!(engine.state(), TimerState::Adjusting);
        engine.end_adjusting();
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn duration_stays_in_bounds_under_mixed_input() {
        let mut engine = CountdownEngine::new(5, Duration::from_secs(7));
        let steps = [3.0, 9.0, -20.0, 4.0, 1.0, -1.0, 100.0];
        for (i, step) in steps.iter().enumerate() {
            engine.step_minutes(*step);
            if i % 2 == 0 {
                engine.toggle();
                engine.tick();
                engine.tick();
            }
            let remaining = engine.remaining_seconds();
            assert!((0.0..=300.0).contains(&remaining), "{} out of bounds", remaining);
        }
    }
}
