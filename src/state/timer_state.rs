//! Timer state, change notifications and the read model served to clients

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of the countdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Duration settable, no tick registered
    #[default]
    Idle,
    /// A drag gesture is changing the duration
    Adjusting,
    /// Tick registered, duration decreasing, dial locked
    Running,
    /// Reached zero; passed through once on the way back to `Idle`
    Finished,
}

impl TimerState {
    /// Check if the countdown is active
    pub fn is_running(&self) -> bool {
        matches!(self, TimerState::Running)
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimerState::Idle => "idle",
            TimerState::Adjusting => "adjusting",
            TimerState::Running => "running",
            TimerState::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Notifications published to the animation and feedback collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    /// New duration in minutes for the dial face
    DurationChanged { minutes: f64 },
    /// The countdown started or stopped
    PlayingChanged { playing: bool },
    /// The dial crossed a whole-minute step
    Pulse,
    /// The countdown reached zero
    Finished,
}

/// Point-in-time view of the timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub playing: bool,
    pub remaining_seconds: f64,
    pub minutes: f64,
    pub display_minutes: u64,
    pub label: String,
}

impl TimerSnapshot {
    /// Build the read model for a state and remaining duration
    pub fn new(state: TimerState, remaining_seconds: f64) -> Self {
        let remaining_seconds = remaining_seconds.max(0.0);
        let minutes = remaining_seconds / 60.0;
        let playing = state.is_running();
        let label = if playing {
            format_remaining(remaining_seconds)
        } else {
            "SETUP TIME".to_string()
        };

        Self {
            state,
            playing,
            remaining_seconds,
            minutes,
            display_minutes: minutes.floor() as u64,
            label,
        }
    }
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        Self::new(TimerState::Idle, 0.0)
    }
}

/// Format seconds as `MM:SS`, rounding partial seconds up
pub fn format_remaining(seconds: f64) -> String {
    let total = seconds.max(0.0).ceil() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
