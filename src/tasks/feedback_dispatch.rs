//! Forwards timer notifications to the animation and feedback collaborators

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, trace, warn};

use crate::{
    feedback::{dispatch, AnimationAdapter, FeedbackSink},
    state::TimerEvent,
};

/// Background task that drains `events` into the collaborators until the
/// channel closes
pub async fn feedback_dispatch_task<A, F>(
    mut events: broadcast::Receiver<TimerEvent>,
    mut animation: A,
    mut feedback: F,
) where
    A: AnimationAdapter + Send,
    F: FeedbackSink + Send,
{
    info!("Starting feedback dispatch task");

    loop {
        match events.recv().await {
            Ok(event) => {
                trace!("Dispatching {:?}", event);
                dispatch(&event, &mut animation, &mut feedback);
            }
            Err(RecvError::Lagged(skipped)) => {
                // Only cosmetic updates are lost; the next duration change catches up
                warn!("Feedback dispatch skipped {} events", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Timer event channel closed, stopping feedback dispatch");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::feedback::recording::Recorder;

    /// Shares one recorder with the test after the task takes ownership
    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Recorder>>);

    impl AnimationAdapter for Shared {
        fn set_duration(&mut self, minutes: f64) {
            self.0.lock().unwrap().set_duration(minutes);
        }

        fn set_playing(&mut self, playing: bool) {
            self.0.lock().unwrap().set_playing(playing);
        }
    }

    impl FeedbackSink for Shared {
        fn pulse(&mut self) {
            self.0.lock().unwrap().pulse();
        }

        fn play_finish_sound(&mut self) {
            self.0.lock().unwrap().play_finish_sound();
        }
    }

    #[tokio::test]
    async fn drains_events_until_channel_closes() {
        let (tx, rx) = broadcast::channel(16);
        let recorder = Shared::default();
        let task = tokio::spawn(feedback_dispatch_task(rx, recorder.clone(), recorder.clone()));

        tx.send(TimerEvent::DurationChanged { minutes: 3.0 }).unwrap();
        tx.send(TimerEvent::Pulse).unwrap();
        tx.send(TimerEvent::Finished).unwrap();
        drop(tx);
        task.await.unwrap();

        let recorded = recorder.0.lock().unwrap().clone();
        assert_eq!(recorded.durations, vec![3.0]);
        assert_eq!(recorded.pulses, 1);
        assert_eq!(recorded.finish_sounds, 1);
    }
}
