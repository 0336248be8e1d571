//! Core type definitions for the application

use std::time::Instant;

/// UI state outside the content area: error banner and help popup
#[derive(Clone, Default)]
pub struct UiState {
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}
