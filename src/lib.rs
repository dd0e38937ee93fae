//! Circular Timer - a radial-dial countdown timer
//!
//! The core maps rotational drag gestures onto a bounded minute value and
//! runs a tick-driven countdown. A small tokio host feeds it pointer, tap and
//! tick events and forwards its notifications to animation and feedback
//! collaborators.

pub mod config;
pub mod dial;
pub mod state;
pub mod feedback;
pub mod tasks;
pub mod api;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, TimerConfig};
pub use dial::{DialInputController, Point};
pub use state::{AppState, CountdownEngine, TimerEvent, TimerScreen, TimerState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
