//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and manages playback operations.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `playback`: Playback control methods
//! - `navigation`: Episode list loading and detail navigation
//! - `player_events`: Audio driver event listener

mod input;
mod navigation;
mod playback;
mod player_events;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::audio::AudioBackend;
use crate::model::{AppModel, EpisodeCache, PodcastClient};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) api: PodcastClient,
    pub(crate) cache: EpisodeCache,
    pub(crate) audio: Arc<AudioBackend>,
}

impl AppController {
    pub fn new(
        model: Arc<Mutex<AppModel>>,
        api: PodcastClient,
        cache: EpisodeCache,
        audio: Arc<AudioBackend>,
    ) -> Self {
        Self {
            model,
            api,
            cache,
            audio,
        }
    }

    pub(crate) fn format_error(error: &anyhow::Error) -> String {
        let error_str = error.to_string().to_lowercase();

        if error_str.contains("not found") || error_str.contains("404") {
            "Episode not found.".to_string()
        } else if error_str.contains("unreachable")
            || error_str.contains("connect")
            || error_str.contains("timed out")
        {
            "Podcast API unreachable. Is the server running?".to_string()
        } else if error_str.contains("decode") {
            "Could not play this episode's audio.".to_string()
        } else {
            format!("Error: {}", error)
        }
    }
}
