//! Playback timing and the snapshot the player bar renders

use std::time::Instant;

/// Internal timing state for smooth progress bar updates.
///
/// The audio thread reports positions every few hundred milliseconds; between
/// reports the position is interpolated from the last update instant.
#[derive(Clone)]
pub struct PlaybackTiming {
    pub position_secs: u32,
    pub duration_secs: u32,
    pub is_playing: bool,
    pub last_update: Instant,
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self {
            position_secs: 0,
            duration_secs: 0,
            is_playing: false,
            last_update: Instant::now(),
        }
    }
}

impl PlaybackTiming {
    pub fn current_position_secs(&self) -> u32 {
        if self.is_playing {
            let elapsed = self.last_update.elapsed().as_secs() as u32;
            self.position_secs
                .saturating_add(elapsed)
                .min(self.duration_secs)
        } else {
            self.position_secs.min(self.duration_secs)
        }
    }

    pub fn update_position(&mut self, position_secs: u32, is_playing: bool) {
        self.position_secs = position_secs;
        self.is_playing = is_playing;
        self.last_update = Instant::now();
    }

    /// Rebase on a freshly loaded episode.
    pub fn reset(&mut self, duration_secs: u32, is_playing: bool) {
        self.position_secs = 0;
        self.duration_secs = duration_secs;
        self.is_playing = is_playing;
        self.last_update = Instant::now();
    }
}

/// Complete playback information for rendering the player bar
#[derive(Clone, Debug)]
pub struct PlaybackInfo {
    pub episode_id: String,
    pub title: String,
    pub members: String,
    pub position_secs: u32,
    pub duration_secs: u32,
    pub has_episode: bool,
    pub is_playing: bool,
    pub is_looping: bool,
    pub is_shuffling: bool,
    pub has_next: bool,
    pub has_previous: bool,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            episode_id: String::new(),
            title: "No episode playing".to_string(),
            members: String::new(),
            position_secs: 0,
            duration_secs: 0,
            has_episode: false,
            is_playing: false,
            is_looping: false,
            is_shuffling: false,
            has_next: false,
            has_previous: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn paused_position_does_not_advance() {
        let mut timing = PlaybackTiming::default();
        timing.reset(100, false);
        timing.update_position(42, false);
        timing.last_update = Instant::now() - Duration::from_secs(5);

        assert_eq!(timing.current_position_secs(), 42);
    }

    #[test]
    fn playing_position_interpolates_and_clamps() {
        let mut timing = PlaybackTiming::default();
        timing.reset(10, true);
        timing.update_position(8, true);
        timing.last_update = Instant::now() - Duration::from_secs(60);

        assert_eq!(timing.current_position_secs(), 10);
    }
}
