//! Animation and feedback collaborators
//!
//! The dial graphic, haptics and sounds live outside this crate. They are
//! reached through two narrow traits and fed from `TimerEvent`s.

pub mod logging;

pub use logging::{LogAnimation, LogFeedback};

use crate::state::TimerEvent;

/// Renders the dial face
pub trait AnimationAdapter {
    fn set_duration(&mut self, minutes: f64);
    fn set_playing(&mut self, playing: bool);
}

/// Haptic and audio output
pub trait FeedbackSink {
    /// One whole-minute step on the dial
    fn pulse(&mut self);
    /// The countdown reached zero
    fn play_finish_sound(&mut self);
}

/// Route one notification to the collaborator that handles it
pub fn dispatch(
    event: &TimerEvent,
    animation: &mut dyn AnimationAdapter,
    feedback: &mut dyn FeedbackSink,
) {
    match event {
        TimerEvent::DurationChanged { minutes } => animation.set_duration(*minutes),
        TimerEvent::PlayingChanged { playing } => animation.set_playing(*playing),
        TimerEvent::Pulse => feedback.pulse(),
        TimerEvent::Finished => feedback.play_finish_sound(),
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    /// Collaborator double that remembers every call
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Recorder {
        pub durations: Vec<f64>,
        pub playing: Vec<bool>,
        pub pulses: usize,
        pub finish_sounds: usize,
    }

    impl AnimationAdapter for Recorder {
        fn set_duration(&mut self, minutes: f64) {
            self.durations.push(minutes);
        }

        fn set_playing(&mut self, playing: bool) {
            self.playing.push(playing);
        }
    }

    impl FeedbackSink for Recorder {
        fn pulse(&mut self) {
            self.pulses += 1;
        }

        fn play_finish_sound(&mut self) {
            self.finish_sounds += 1;
        }
    }
}
