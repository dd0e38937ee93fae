//! Background tasks module
//!
//! This module contains the host event loop pieces that run alongside the HTTP server.

pub mod countdown_ticker;
pub mod feedback_dispatch;

// Re-export main functions
pub use countdown_ticker::countdown_ticker_task;
pub use feedback_dispatch::feedback_dispatch_task;
