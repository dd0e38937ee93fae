//! Countdown tick background task

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::broadcast::{self, error::RecvError},
    time::{interval_at, sleep, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use crate::state::{AppState, TimerEvent};

/// Background task that owns the repeating tick while the countdown runs.
///
/// `events` should be subscribed before the first tap can arrive so the
/// start notification is never missed.
pub async fn countdown_ticker_task(state: Arc<AppState>, mut events: broadcast::Receiver<TimerEvent>) {
    info!("Starting countdown ticker task");

    loop {
        match events.recv().await {
            Ok(TimerEvent::PlayingChanged { playing: true }) => {
                run_registration(&state, &mut events).await;
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                // Missed events may include a start; ask the engine directly
                warn!("Ticker lagged behind by {} events, resyncing", skipped);
                run_registration(&state, &mut events).await;
            }
            Err(RecvError::Closed) => {
                info!("Timer event channel closed, stopping ticker");
                break;
            }
        }
    }
}

/// Tick the current registration until it is cancelled or finishes
async fn run_registration(state: &AppState, events: &mut broadcast::Receiver<TimerEvent>) {
    let (generation, period) = match state.tick_registration() {
        Ok(Some(registration)) => registration,
        Ok(None) => {
            debug!("No tick registration to run");
            return;
        }
        Err(e) => {
            error!("Failed to read tick registration: {}", e);
            // Wait a bit before retrying
            sleep(Duration::from_secs(1)).await;
            return;
        }
    };

    debug!("Ticking generation {} every {:?}", generation, period);
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match state.tick(generation) {
                    Ok(true) => {}
                    Ok(false) => {
                        debug!("Tick generation {} ended", generation);
                        break;
                    }
                    Err(e) => {
                        error!("Failed to deliver tick: {}", e);
                        break;
                    }
                }
            }

            received = events.recv() => {
                match received {
                    Ok(TimerEvent::PlayingChanged { playing: false }) => {
                        debug!("Countdown stopped, cancelling tick generation {}", generation);
                        break;
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Ticker lagged behind by {} events", skipped);
                        // A stop could be among them
                        if !matches!(state.tick_registration(), Ok(Some((current, _))) if current == generation) {
                            break;
                        }
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }
}
