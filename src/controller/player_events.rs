//! Audio driver event listener
//!
//! Translates events from the output thread back into store updates, and
//! implements the end-of-track policy: loop replays the same episode, then
//! the playlist advances while there is a next episode, and once it is
//! exhausted the player resets to empty.

use tokio::sync::mpsc::UnboundedReceiver;

use crate::audio::PlayerEvent;

use super::AppController;

impl AppController {
    pub fn start_player_event_listener(&self, mut events: UnboundedReceiver<PlayerEvent>) {
        let controller = self.clone();
        tracing::info!("Starting audio event listener");

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let model = controller.model.lock().await;

                if model.should_quit().await {
                    tracing::debug!("Audio event listener shutting down");
                    break;
                }

                match event {
                    PlayerEvent::Playing { position_secs } => {
                        tracing::trace!(position_secs, "PlayerEvent::Playing");
                        model.update_playback_position(position_secs, true).await;
                        model.set_playing_state(true).await;
                    }
                    PlayerEvent::Paused { position_secs } => {
                        tracing::debug!(position_secs, "PlayerEvent::Paused");
                        model.update_playback_position(position_secs, false).await;
                        model.set_playing_state(false).await;
                    }
                    PlayerEvent::Position { position_secs } => {
                        tracing::trace!(position_secs, "PlayerEvent::Position");
                        let playing = model.is_playing().await;
                        model.update_playback_position(position_secs, playing).await;
                    }
                    PlayerEvent::TrackEnded => {
                        tracing::debug!("PlayerEvent::TrackEnded");
                        drop(model);
                        controller.handle_track_ended().await;
                        continue;
                    }
                    PlayerEvent::Error(message) => {
                        tracing::error!(message, "PlayerEvent::Error");
                        model.set_playing_state(false).await;
                        model.set_error(message).await;
                    }
                }
            }
        });
    }

    async fn handle_track_ended(&self) {
        let model = self.model.lock().await;

        if model.is_looping().await {
            if let Some(episode) = model.current_episode().await {
                tracing::info!(episode_id = %episode.id, "Looping current episode");
                drop(model);
                self.load_current(episode, true).await;
                return;
            }
        }

        if model.has_next().await {
            drop(model);
            self.next_episode().await;
            return;
        }

        tracing::info!("Playlist exhausted, clearing player");
        drop(model);
        self.stop_and_clear().await;
    }
}
