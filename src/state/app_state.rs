//! Shared host state wrapping the timer screen

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use super::{TimerEvent, TimerScreen, TimerSnapshot};
use crate::{config::TimerConfig, dial::Point};

/// Failures of the host wrapper; the core itself never fails
#[derive(Error, Debug)]
pub enum StateError {
    #[error("Failed to lock timer screen: {0}")]
    Poisoned(String),
}

/// Main application state: the timer screen plus its notification channels
#[derive(Debug)]
pub struct AppState {
    /// The single-threaded core, serialized behind a lock
    screen: Mutex<TimerScreen>,
    pub config: TimerConfig,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for timer notifications
    pub event_tx: broadcast::Sender<TimerEvent>,
    /// Channel for the latest snapshot
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Create a new AppState with an idle timer
    pub fn new(port: u16, host: String, config: TimerConfig) -> Self {
        let (event_tx, _) = broadcast::channel(256);
        let (snapshot_tx, snapshot_rx) = watch::channel(TimerSnapshot::default());

        Self {
            screen: Mutex::new(TimerScreen::new(&config)),
            config,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            event_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Subscribe to timer notifications
    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    fn lock_screen(&self) -> Result<MutexGuard<'_, TimerScreen>, StateError> {
        self.screen
            .lock()
            .map_err(|e| StateError::Poisoned(e.to_string()))
    }

    /// Run a handler against the screen, then publish what it produced
    pub fn update<F>(&self, action: &str, handler: F) -> Result<TimerSnapshot, StateError>
    where
        F: FnOnce(&mut TimerScreen) -> Vec<TimerEvent>,
    {
        let mut screen = self.lock_screen()?;
        let events = handler(&mut *screen);
        let snapshot = screen.snapshot();
        self.publish(&screen, events, snapshot.clone());
        drop(screen);

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(snapshot)
    }

    /// Send notifications in the order the screen produced them. Taking the
    /// guard keeps a concurrent handler from publishing in between.
    fn publish(
        &self,
        _screen: &MutexGuard<'_, TimerScreen>,
        events: Vec<TimerEvent>,
        snapshot: TimerSnapshot,
    ) {
        for event in events {
            // No subscribers is not an error for a headless host
            if self.event_tx.receiver_count() == 0 {
                break;
            }
            if let Err(e) = self.event_tx.send(event) {
                warn!("Failed to send timer event: {}", e);
            }
        }

        self.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }

    /// Handle a tap: start when idle, stop when running
    pub fn tap(&self) -> Result<TimerSnapshot, StateError> {
        let snapshot = self.update("tap", |screen| screen.on_tap())?;
        info!("Tap handled, timer is now {}", snapshot.state);
        Ok(snapshot)
    }

    pub fn gesture_start(&self) -> Result<TimerSnapshot, StateError> {
        self.update("gesture-start", |screen| {
            screen.on_gesture_start();
            Vec::new()
        })
    }

    /// Feed a pointer sample; `timestamp` defaults to time since startup
    pub fn gesture_sample(
        &self,
        point: Point,
        timestamp: Option<Duration>,
    ) -> Result<TimerSnapshot, StateError> {
        let now = timestamp.unwrap_or_else(|| self.start_time.elapsed());
        self.update("gesture-sample", |screen| screen.on_gesture_sample(point, now))
    }

    pub fn gesture_end(&self) -> Result<TimerSnapshot, StateError> {
        self.update("gesture-end", |screen| {
            screen.on_gesture_end();
            Vec::new()
        })
    }

    pub fn set_duration(&self, minutes: f64) -> Result<TimerSnapshot, StateError> {
        self.update("set-duration", |screen| screen.set_duration(minutes))
    }

    /// Deliver one tick for `generation`; returns whether that registration
    /// is still live afterwards
    pub fn tick(&self, generation: u64) -> Result<bool, StateError> {
        let mut screen = self.lock_screen()?;
        let events = screen.on_tick(generation);
        let snapshot = screen.snapshot();
        let live = screen.registered_tick() == Some(generation);
        self.publish(&screen, events, snapshot);
        Ok(live)
    }

    /// Current tick registration and its period
    pub fn tick_registration(&self) -> Result<Option<(u64, Duration)>, StateError> {
        let screen = self.lock_screen()?;
        Ok(screen
            .registered_tick()
            .map(|generation| (generation, screen.tick_interval())))
    }

    /// Get current timer snapshot
    pub fn get_snapshot(&self) -> Result<TimerSnapshot, StateError> {
        self.lock_screen().map(|screen| screen.snapshot())
    }

    /// Record an animation stage notification; the core has no use for it
    pub fn record_stage(&self, stage: i64) {
        info!("Animation reported stage {}", stage);
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(format!("stage-{}", stage));
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
