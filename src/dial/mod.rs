//! Dial gesture handling
//!
//! Converts pointer drags around the dial center into whole-minute steps.

pub mod angle;
pub mod input;

// Re-export main types
pub use angle::{angle_of, delta, normalize_degrees, Point};
pub use input::DialInputController;
