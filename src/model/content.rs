//! Content view state: episode list and episode detail with back navigation

use super::episode::Episode;

/// Represents the current view in the main content area
#[derive(Clone, Debug, Default)]
pub enum ContentView {
    #[default]
    Empty,
    EpisodeList {
        episodes: Vec<Episode>,
        selected_index: usize,
    },
    EpisodeDetail {
        episode: Episode,
        scroll: u16,
    },
}

/// State for the main content area
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub view: ContentView,
    pub navigation_stack: Vec<ContentView>,
    pub is_loading: bool,
}
