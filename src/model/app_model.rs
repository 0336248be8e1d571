//! Main application model with state management

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use super::content::{ContentState, ContentView};
use super::episode::Episode;
use super::playback::{PlaybackInfo, PlaybackTiming};
use super::player::PlayerState;
use super::types::UiState;

/// Main application model containing all state.
///
/// The player store is the only component with real invariants; everything
/// else here is presentation state. All of it lives behind tokio mutexes so
/// the controller, the audio event listener, and the draw loop see every
/// mutation immediately.
pub struct AppModel {
    player: Arc<Mutex<PlayerState>>,
    timing: Arc<Mutex<PlaybackTiming>>,
    pub ui_state: Arc<Mutex<UiState>>,
    pub content_state: Arc<Mutex<ContentState>>,
    should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            player: Arc::new(Mutex::new(PlayerState::new())),
            timing: Arc::new(Mutex::new(PlaybackTiming::default())),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            content_state: Arc::new(Mutex::new(ContentState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    // ========================================================================
    // Player store
    // ========================================================================

    pub async fn play_episode(&self, episode: Episode) {
        let duration = episode.duration_secs;
        let mut player = self.player.lock().await;
        player.play_episode(episode);
        drop(player);
        self.timing.lock().await.reset(duration, true);
    }

    /// Returns false when the start index is rejected as out of bounds.
    pub async fn play_list(&self, list: Vec<Episode>, index: usize) -> bool {
        let mut player = self.player.lock().await;
        if !player.play_list(list, index) {
            return false;
        }
        let duration = player
            .current_episode()
            .map(|e| e.duration_secs)
            .unwrap_or(0);
        drop(player);
        self.timing.lock().await.reset(duration, true);
        true
    }

    pub async fn toggle_play(&self) -> Option<bool> {
        let playing = self.player.lock().await.toggle_play()?;
        let mut timing = self.timing.lock().await;
        timing.position_secs = timing.current_position_secs();
        timing.is_playing = playing;
        timing.last_update = Instant::now();
        Some(playing)
    }

    pub async fn toggle_loop(&self) -> bool {
        self.player.lock().await.toggle_loop()
    }

    pub async fn toggle_shuffle(&self) -> bool {
        self.player.lock().await.toggle_shuffle()
    }

    pub async fn set_playing_state(&self, playing: bool) {
        self.player.lock().await.set_playing_state(playing);
        let mut timing = self.timing.lock().await;
        timing.position_secs = timing.current_position_secs();
        timing.is_playing = playing;
        timing.last_update = Instant::now();
    }

    pub async fn clear_player_state(&self) {
        self.player.lock().await.clear();
        self.timing.lock().await.reset(0, false);
    }

    /// Advance the store and rebase timing on the new episode.
    /// Returns the episode now selected, if the selection moved.
    pub async fn play_next(&self) -> Option<Episode> {
        let mut player = self.player.lock().await;
        player.play_next()?;
        let episode = player.current_episode().cloned()?;
        let playing = player.is_playing();
        drop(player);
        self.timing.lock().await.reset(episode.duration_secs, playing);
        Some(episode)
    }

    pub async fn play_previous(&self) -> Option<Episode> {
        let mut player = self.player.lock().await;
        player.play_previous()?;
        let episode = player.current_episode().cloned()?;
        let playing = player.is_playing();
        drop(player);
        self.timing.lock().await.reset(episode.duration_secs, playing);
        Some(episode)
    }

    pub async fn has_next(&self) -> bool {
        self.player.lock().await.has_next()
    }

    pub async fn is_looping(&self) -> bool {
        self.player.lock().await.is_looping()
    }

    pub async fn is_playing(&self) -> bool {
        self.player.lock().await.is_playing()
    }

    pub async fn current_episode(&self) -> Option<Episode> {
        self.player.lock().await.current_episode().cloned()
    }

    // ========================================================================
    // Playback timing
    // ========================================================================

    pub async fn update_playback_position(&self, position_secs: u32, is_playing: bool) {
        self.timing
            .lock()
            .await
            .update_position(position_secs, is_playing);
    }

    pub async fn get_playback_info(&self) -> PlaybackInfo {
        let player = self.player.lock().await;
        let timing = self.timing.lock().await;

        match player.current_episode() {
            Some(episode) => PlaybackInfo {
                episode_id: episode.id.clone(),
                title: episode.title.clone(),
                members: episode.members.clone(),
                position_secs: timing.current_position_secs(),
                duration_secs: episode.duration_secs,
                has_episode: true,
                is_playing: player.is_playing(),
                is_looping: player.is_looping(),
                is_shuffling: player.is_shuffling(),
                has_next: player.has_next(),
                has_previous: player.has_previous(),
            },
            None => PlaybackInfo {
                is_looping: player.is_looping(),
                is_shuffling: player.is_shuffling(),
                ..PlaybackInfo::default()
            },
        }
    }

    // ========================================================================
    // Content area
    // ========================================================================

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn set_content_loading(&self, loading: bool) {
        self.content_state.lock().await.is_loading = loading;
    }

    pub async fn set_episode_list(&self, episodes: Vec<Episode>) {
        let mut state = self.content_state.lock().await;
        // A fresh list restarts navigation; the old detail views are stale
        state.navigation_stack.clear();
        state.view = ContentView::EpisodeList {
            episodes,
            selected_index: 0,
        };
        state.is_loading = false;
    }

    pub async fn set_episode_detail(&self, episode: Episode) {
        let mut state = self.content_state.lock().await;
        if !matches!(state.view, ContentView::Empty) {
            let previous_view = state.view.clone();
            state.navigation_stack.push(previous_view);
        }
        state.view = ContentView::EpisodeDetail { episode, scroll: 0 };
        state.is_loading = false;
    }

    pub async fn navigate_back(&self) -> bool {
        let mut state = self.content_state.lock().await;
        if let Some(previous_view) = state.navigation_stack.pop() {
            state.view = previous_view;
            true
        } else {
            false
        }
    }

    pub async fn content_move_up(&self) {
        let mut state = self.content_state.lock().await;
        match &mut state.view {
            ContentView::EpisodeList { selected_index, .. } => {
                if *selected_index > 0 {
                    *selected_index -= 1;
                }
            }
            ContentView::EpisodeDetail { scroll, .. } => {
                *scroll = scroll.saturating_sub(1);
            }
            ContentView::Empty => {}
        }
    }

    pub async fn content_move_down(&self) {
        let mut state = self.content_state.lock().await;
        match &mut state.view {
            ContentView::EpisodeList {
                episodes,
                selected_index,
            } => {
                if *selected_index < episodes.len().saturating_sub(1) {
                    *selected_index += 1;
                }
            }
            ContentView::EpisodeDetail { scroll, .. } => {
                *scroll = scroll.saturating_add(1);
            }
            ContentView::Empty => {}
        }
    }

    /// The episode under the cursor in the list view.
    pub async fn get_selected_episode(&self) -> Option<Episode> {
        let state = self.content_state.lock().await;
        if let ContentView::EpisodeList {
            episodes,
            selected_index,
        } = &state.view
        {
            episodes.get(*selected_index).cloned()
        } else {
            None
        }
    }

    /// The whole list plus cursor position, for starting list playback.
    pub async fn get_episode_list_selection(&self) -> Option<(Vec<Episode>, usize)> {
        let state = self.content_state.lock().await;
        if let ContentView::EpisodeList {
            episodes,
            selected_index,
        } = &state.view
        {
            Some((episodes.clone(), *selected_index))
        } else {
            None
        }
    }

    pub async fn get_detail_episode(&self) -> Option<Episode> {
        let state = self.content_state.lock().await;
        if let ContentView::EpisodeDetail { episode, .. } = &state.view {
            Some(episode.clone())
        } else {
            None
        }
    }

    // ========================================================================
    // UI chrome
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed().as_secs() > 5 {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(id: &str, duration_secs: u32) -> Episode {
        Episode {
            id: id.to_string(),
            title: format!("Episode {}", id),
            members: "Crew".to_string(),
            thumbnail: String::new(),
            url: format!("https://example.com/{}.mp3", id),
            duration_secs,
            duration_as_string: super::super::episode::format_duration(duration_secs),
            published_at: "1 Jan 21".to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn play_then_clear_resets_the_player_bar() {
        let model = AppModel::new();
        model.play_episode(episode("a", 120)).await;

        let info = model.get_playback_info().await;
        assert!(info.has_episode);
        assert_eq!(info.duration_secs, 120);

        model.clear_player_state().await;
        let info = model.get_playback_info().await;
        assert!(!info.has_episode);
        assert_eq!(info.title, "No episode playing");
        assert_eq!(info.duration_secs, 0);
    }

    #[tokio::test]
    async fn play_next_rebases_timing_on_the_new_episode() {
        let model = AppModel::new();
        assert!(
            model
                .play_list(vec![episode("a", 100), episode("b", 200)], 0)
                .await
        );
        model.update_playback_position(50, true).await;

        let next = model.play_next().await.expect("has a next episode");
        assert_eq!(next.id, "b");

        let info = model.get_playback_info().await;
        assert_eq!(info.duration_secs, 200);
        assert!(info.position_secs <= 1);
    }

    #[tokio::test]
    async fn rejected_list_start_leaves_everything_unchanged() {
        let model = AppModel::new();
        model.play_episode(episode("a", 100)).await;

        assert!(!model.play_list(vec![episode("b", 50)], 7).await);
        assert_eq!(model.current_episode().await.map(|e| e.id), Some("a".into()));
    }

    #[tokio::test]
    async fn detail_navigation_pushes_and_pops_the_stack() {
        let model = AppModel::new();
        model.set_episode_list(vec![episode("a", 10), episode("b", 10)]).await;
        model.content_move_down().await;
        model.set_episode_detail(episode("b", 10)).await;

        assert!(model.navigate_back().await);
        let (episodes, selected) = model.get_episode_list_selection().await.unwrap();
        assert_eq!(episodes.len(), 2);
        assert_eq!(selected, 1);
        assert!(!model.navigate_back().await);
    }
}
