//! Player state store: the single source of truth for what is loaded and how it plays
//!
//! Every page of the UI reads and mutates playback through this store. The one
//! invariant that matters: `current_index` is either `None` (nothing loaded) or
//! a valid index into `playlist`. All mutations go through methods that keep
//! that invariant; callers never touch the playlist directly.

use rand::Rng;

use super::episode::Episode;

#[derive(Clone, Debug, Default)]
pub struct PlayerState {
    playlist: Vec<Episode>,
    current_index: Option<usize>,
    is_playing: bool,
    is_looping: bool,
    is_shuffling: bool,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the playlist with a single episode and start playing it.
    pub fn play_episode(&mut self, episode: Episode) {
        self.playlist = vec![episode];
        self.current_index = Some(0);
        self.is_playing = true;
    }

    /// Replace the playlist wholesale and start playing at `index`.
    ///
    /// An out-of-bounds index is rejected and leaves the state untouched.
    pub fn play_list(&mut self, list: Vec<Episode>, index: usize) -> bool {
        if index >= list.len() {
            tracing::warn!(index, len = list.len(), "Rejected playlist start at invalid index");
            return false;
        }
        self.playlist = list;
        self.current_index = Some(index);
        self.is_playing = true;
        true
    }

    /// Flip play/pause. Returns the new playing flag, or `None` when nothing
    /// is loaded (in which case nothing changes).
    pub fn toggle_play(&mut self) -> Option<bool> {
        self.current_index?;
        self.is_playing = !self.is_playing;
        Some(self.is_playing)
    }

    pub fn toggle_loop(&mut self) -> bool {
        self.is_looping = !self.is_looping;
        self.is_looping
    }

    /// Flip shuffle. The playlist is never reordered; shuffle only changes the
    /// selection policy of `play_next` and `play_previous`.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.is_shuffling = !self.is_shuffling;
        self.is_shuffling
    }

    /// Set the playing flag directly, used when the audio driver reports a
    /// state change the user did not request (e.g. natural pause at track end).
    pub fn set_playing_state(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    /// Reset to the initial empty state (playlist exhausted, nothing loaded).
    pub fn clear(&mut self) {
        self.playlist = Vec::new();
        self.current_index = None;
        self.is_playing = false;
    }

    /// Advance to the next episode. Returns the new index when the selection
    /// actually moved.
    ///
    /// Shuffling picks any valid index uniformly; re-picking the current one is
    /// allowed, so the same episode may repeat back to back.
    pub fn play_next(&mut self) -> Option<usize> {
        let index = self.current_index?;

        if self.is_shuffling {
            let next = rand::rng().random_range(0..self.playlist.len());
            self.current_index = Some(next);
            Some(next)
        } else if index + 1 < self.playlist.len() {
            self.current_index = Some(index + 1);
            Some(index + 1)
        } else {
            None
        }
    }

    /// Step back to the previous episode, with the same random policy as
    /// `play_next` while shuffling. Returns the new index when it moved.
    pub fn play_previous(&mut self) -> Option<usize> {
        let index = self.current_index?;

        if self.is_shuffling {
            let previous = rand::rng().random_range(0..self.playlist.len());
            self.current_index = Some(previous);
            Some(previous)
        } else if index > 0 {
            self.current_index = Some(index - 1);
            Some(index - 1)
        } else {
            None
        }
    }

    pub fn has_next(&self) -> bool {
        match self.current_index {
            Some(index) => self.is_shuffling || index + 1 < self.playlist.len(),
            None => false,
        }
    }

    pub fn has_previous(&self) -> bool {
        matches!(self.current_index, Some(index) if index > 0)
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.playlist.get(self.current_index?)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    pub fn playlist_len(&self) -> usize {
        self.playlist.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(id: &str) -> Episode {
        Episode {
            id: id.to_string(),
            title: format!("Episode {}", id),
            members: "Crew".to_string(),
            thumbnail: String::new(),
            url: format!("https://example.com/{}.mp3", id),
            duration_secs: 60,
            duration_as_string: "00:01:00".to_string(),
            published_at: "1 Jan 21".to_string(),
            description: String::new(),
        }
    }

    fn three_episodes() -> Vec<Episode> {
        vec![episode("a"), episode("b"), episode("c")]
    }

    #[test]
    fn play_list_sets_index_and_playing() {
        let list = three_episodes();
        for i in 0..list.len() {
            let mut state = PlayerState::new();
            assert!(state.play_list(list.clone(), i));
            assert_eq!(state.current_index(), Some(i));
            assert!(state.is_playing());
        }
    }

    #[test]
    fn play_list_rejects_out_of_bounds_index() {
        let mut state = PlayerState::new();
        state.play_episode(episode("a"));

        assert!(!state.play_list(three_episodes(), 3));
        assert_eq!(state.current_index(), Some(0));
        assert_eq!(state.playlist_len(), 1);
        assert!(!state.play_list(Vec::new(), 0));
    }

    #[test]
    fn toggle_play_twice_restores_flag() {
        let mut state = PlayerState::new();
        state.play_episode(episode("a"));

        assert_eq!(state.toggle_play(), Some(false));
        assert_eq!(state.toggle_play(), Some(true));
        assert!(state.is_playing());
    }

    #[test]
    fn toggle_play_is_noop_with_nothing_loaded() {
        let mut state = PlayerState::new();
        assert_eq!(state.toggle_play(), None);
        assert!(!state.is_playing());
    }

    #[test]
    fn sequential_walk_stops_at_the_end() {
        let mut state = PlayerState::new();
        assert!(state.play_list(three_episodes(), 0));

        assert_eq!(state.play_next(), Some(1));
        assert_eq!(state.play_next(), Some(2));
        assert!(!state.has_next());
        assert_eq!(state.play_next(), None);
        assert_eq!(state.current_index(), Some(2));
    }

    #[test]
    fn play_previous_stops_at_the_start() {
        let mut state = PlayerState::new();
        assert!(state.play_list(three_episodes(), 1));

        assert_eq!(state.play_previous(), Some(0));
        assert!(!state.has_previous());
        assert_eq!(state.play_previous(), None);
        assert_eq!(state.current_index(), Some(0));
    }

    #[test]
    fn shuffle_keeps_the_index_in_bounds() {
        let mut state = PlayerState::new();
        assert!(state.play_list(three_episodes(), 2));
        state.toggle_shuffle();

        for _ in 0..50 {
            let next = state.play_next().expect("shuffle always picks an index");
            assert!(next < state.playlist_len());
            let previous = state.play_previous().expect("shuffle always picks an index");
            assert!(previous < state.playlist_len());
        }
    }

    #[test]
    fn shuffle_makes_has_next_true_at_the_last_index() {
        let mut state = PlayerState::new();
        assert!(state.play_list(three_episodes(), 2));
        assert!(!state.has_next());

        state.toggle_shuffle();
        assert!(state.has_next());
    }

    #[test]
    fn toggle_shuffle_never_reorders_the_playlist() {
        let mut state = PlayerState::new();
        assert!(state.play_list(three_episodes(), 0));
        state.toggle_shuffle();

        assert_eq!(state.current_episode().map(|e| e.id.as_str()), Some("a"));
        assert_eq!(state.playlist_len(), 3);
    }

    #[test]
    fn clear_resets_to_the_initial_state() {
        let mut state = PlayerState::new();
        state.play_episode(episode("a"));

        state.clear();
        assert_eq!(state.current_index(), None);
        assert_eq!(state.playlist_len(), 0);
        assert!(!state.is_playing());
        assert!(!state.has_next());
        assert!(!state.has_previous());
    }

    #[test]
    fn play_episode_replaces_the_playlist_wholesale() {
        let mut state = PlayerState::new();
        assert!(state.play_list(three_episodes(), 2));

        state.play_episode(episode("d"));
        assert_eq!(state.current_index(), Some(0));
        assert_eq!(state.playlist_len(), 1);
        assert_eq!(state.current_episode().map(|e| e.id.as_str()), Some("d"));
        assert!(state.is_playing());
    }
}
