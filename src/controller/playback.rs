//! Playback control methods
//!
//! The store decides *what* plays; this file makes the audio driver follow it.
//! Contract with the driver: a change of current episode reloads the sink and
//! starts it only if the store says we are playing; a play/pause flip never
//! reloads; seeking adjusts position directly without touching the store.

use std::time::Duration;

use crate::model::Episode;

use super::AppController;

/// How far the arrow keys scrub, in seconds
const SEEK_STEP_SECS: i64 = 10;

impl AppController {
    /// Play a single episode on its own (the detail view's play action).
    pub async fn play_episode(&self, episode: Episode) {
        tracing::info!(episode_id = %episode.id, title = %episode.title, "Playing single episode");
        let model = self.model.lock().await;
        model.play_episode(episode.clone()).await;
        drop(model);
        self.load_current(episode, true).await;
    }

    /// Play a whole episode list starting at `index` (the list view's action).
    pub async fn play_list(&self, list: Vec<Episode>, index: usize) {
        let model = self.model.lock().await;
        if !model.play_list(list, index).await {
            // Invalid index is a no-op; the store already logged it
            return;
        }
        let episode = model.current_episode().await;
        drop(model);

        if let Some(episode) = episode {
            tracing::info!(episode_id = %episode.id, index, "Playing episode list");
            self.load_current(episode, true).await;
        }
    }

    pub async fn toggle_playback(&self) {
        let model = self.model.lock().await;
        match model.toggle_play().await {
            Some(true) => {
                tracing::debug!("Resuming playback");
                self.audio.play();
            }
            Some(false) => {
                tracing::debug!("Pausing playback");
                self.audio.pause();
            }
            None => {
                tracing::debug!("Toggle ignored, nothing loaded");
            }
        }
    }

    pub async fn next_episode(&self) {
        let model = self.model.lock().await;
        let next = model.play_next().await;
        let playing = model.is_playing().await;
        drop(model);

        if let Some(episode) = next {
            tracing::info!(episode_id = %episode.id, "Skipping to next episode");
            self.load_current(episode, playing).await;
        }
    }

    pub async fn previous_episode(&self) {
        let model = self.model.lock().await;
        let previous = model.play_previous().await;
        let playing = model.is_playing().await;
        drop(model);

        if let Some(episode) = previous {
            tracing::info!(episode_id = %episode.id, "Skipping to previous episode");
            self.load_current(episode, playing).await;
        }
    }

    pub async fn toggle_shuffle(&self) {
        let shuffling = self.model.lock().await.toggle_shuffle().await;
        tracing::debug!(shuffling, "Shuffle toggled");
    }

    pub async fn toggle_loop(&self) {
        let looping = self.model.lock().await.toggle_loop().await;
        tracing::debug!(looping, "Loop toggled");
    }

    /// Scrub relative to the current position. The store is not involved;
    /// only the sink position and the progress display move.
    pub async fn seek_backward(&self) {
        self.seek_by(-SEEK_STEP_SECS).await;
    }

    pub async fn seek_forward(&self) {
        self.seek_by(SEEK_STEP_SECS).await;
    }

    async fn seek_by(&self, delta_secs: i64) {
        let model = self.model.lock().await;
        let info = model.get_playback_info().await;
        if !info.has_episode {
            return;
        }

        let target = (info.position_secs as i64 + delta_secs)
            .clamp(0, info.duration_secs as i64) as u64;
        model
            .update_playback_position(target as u32, info.is_playing)
            .await;
        drop(model);

        tracing::debug!(target, "Seeking");
        self.audio.seek_to(Duration::from_secs(target));
    }

    /// Stop playback and reset the player bar.
    pub async fn stop_and_clear(&self) {
        self.audio.stop();
        self.model.lock().await.clear_player_state().await;
    }

    /// Download the episode's audio and hand it to the output thread.
    ///
    /// Runs in the background so skipping stays responsive; by the time the
    /// download finishes the user may have moved on, so the bytes are only
    /// loaded if this episode is still the current one.
    pub(crate) async fn load_current(&self, episode: Episode, start: bool) {
        let controller = self.clone();
        tokio::spawn(async move {
            match controller.api.fetch_audio(&episode.url).await {
                Ok(audio) => {
                    let model = controller.model.lock().await;
                    let still_current = model
                        .current_episode()
                        .await
                        .is_some_and(|current| current.id == episode.id);
                    let playing = model.is_playing().await;
                    drop(model);

                    if still_current {
                        controller.audio.load(audio, start && playing);
                    } else {
                        tracing::debug!(episode_id = %episode.id, "Discarding stale audio download");
                    }
                }
                Err(e) => {
                    tracing::error!(episode_id = %episode.id, error = %e, "Audio download failed");
                    let model = controller.model.lock().await;
                    model.set_playing_state(false).await;
                    model.set_error(Self::format_error(&e)).await;
                }
            }
        });
    }
}
