//! Headless collaborators that report through tracing

use tracing::{debug, info};

use super::{AnimationAdapter, FeedbackSink};
use crate::state::timer_state::format_remaining;

/// Stands in for the dial animation; logs each whole minute once
#[derive(Debug, Default)]
pub struct LogAnimation {
    shown_minute: Option<u64>,
}

impl AnimationAdapter for LogAnimation {
    fn set_duration(&mut self, minutes: f64) {
        let whole = minutes.max(0.0).floor() as u64;
        if self.shown_minute != Some(whole) {
            self.shown_minute = Some(whole);
            info!("Dial shows {} MIN ({})", whole, format_remaining(minutes * 60.0));
        } else {
            debug!("Dial duration {:.3} min", minutes);
        }
    }

    fn set_playing(&mut self, playing: bool) {
        info!("Dial animation {}", if playing { "playing" } else { "paused" });
    }
}

/// Stands in for haptics and audio
#[derive(Debug, Default)]
pub struct LogFeedback {
    pulses: u64,
}

impl FeedbackSink for LogFeedback {
    fn pulse(&mut self) {
        self.pulses += 1;
        debug!("Haptic pulse #{}", self.pulses);
    }

    fn play_finish_sound(&mut self) {
        info!("Timer finished, playing finish sound");
    }
}
