//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (UI chrome state)
//! - `episode`: Episode view model, raw API records, and shaping utilities
//! - `player`: Player state store (playlist, current index, playback flags)
//! - `playback`: Playback timing and the player bar snapshot
//! - `content`: Content view data (episode list, episode detail)
//! - `cache`: Episode detail disk cache with a revalidation window
//! - `api_client`: Podcast API client wrapper
//! - `app_model`: Main application model with state management methods

mod api_client;
mod app_model;
mod cache;
mod content;
mod episode;
mod playback;
mod player;
mod types;

// Re-export all public types for convenient access
pub use types::UiState;

pub use episode::{Episode, format_duration};

pub use playback::PlaybackInfo;

pub use content::{ContentState, ContentView};

pub use cache::{EpisodeCache, PREFETCH_COUNT};

pub use api_client::PodcastClient;

pub use app_model::AppModel;
