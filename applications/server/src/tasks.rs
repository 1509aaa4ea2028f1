/// Background tasks driving the session manager
use crate::state::SharedPlayer;
use mindful_core::OutputEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Forward output events into the manager until the output is dropped
pub fn spawn_event_pump(
    player: SharedPlayer,
    mut events: mpsc::UnboundedReceiver<OutputEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!("Output event pump started");

        while let Some(event) = events.recv().await {
            let mut manager = player.lock().await;
            if let Err(e) = manager.handle_output_event(event).await {
                tracing::error!("Failed to handle output event: {}", e);
            }
        }

        tracing::info!("Output event channel closed, pump exiting");
    })
}

/// Periodically persist the playing position of the active session
pub fn spawn_progress_checkpoints(player: SharedPlayer, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let mut manager = player.lock().await;
            if !manager.is_playing() {
                continue;
            }

            if let Err(e) = manager.checkpoint_progress().await {
                tracing::warn!("Progress checkpoint failed: {}", e);
            }
        }
    })
}
