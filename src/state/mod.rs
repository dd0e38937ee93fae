//! State management module
//!
//! This module contains the countdown core and the shared host state around it.

pub mod app_state;
pub mod countdown;
pub mod screen;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, StateError};
pub use countdown::CountdownEngine;
pub use screen::TimerScreen;
pub use timer_state::{TimerEvent, TimerSnapshot, TimerState};
