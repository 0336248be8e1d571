//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::model::ContentView;

use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    model.clear_error().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') => {
                    model.hide_help_popup().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // View-local keys first
        let view = model.get_content_state().await.view;
        match view {
            ContentView::EpisodeList { .. } => match key.code {
                KeyCode::Up => {
                    model.content_move_up().await;
                    return Ok(());
                }
                KeyCode::Down => {
                    model.content_move_down().await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    drop(model);
                    self.open_selected_episode().await;
                    return Ok(());
                }
                // Start playing the list from the cursor
                KeyCode::Char('x') | KeyCode::Char('X') => {
                    if let Some((episodes, index)) = model.get_episode_list_selection().await {
                        drop(model);
                        self.play_list(episodes, index).await;
                    }
                    return Ok(());
                }
                _ => {}
            },
            ContentView::EpisodeDetail { .. } => match key.code {
                KeyCode::Up => {
                    model.content_move_up().await;
                    return Ok(());
                }
                KeyCode::Down => {
                    model.content_move_down().await;
                    return Ok(());
                }
                // Play just this episode
                KeyCode::Enter | KeyCode::Char('x') | KeyCode::Char('X') => {
                    if let Some(episode) = model.get_detail_episode().await {
                        drop(model);
                        self.play_episode(episode).await;
                    }
                    return Ok(());
                }
                KeyCode::Backspace | KeyCode::Esc => {
                    model.navigate_back().await;
                    return Ok(());
                }
                _ => {}
            },
            ContentView::Empty => {}
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            // Play/Pause toggle
            KeyCode::Char(' ') => {
                drop(model);
                self.toggle_playback().await;
            }
            // Next episode
            KeyCode::Char('n') | KeyCode::Char('N') => {
                drop(model);
                self.next_episode().await;
            }
            // Previous episode
            KeyCode::Char('p') | KeyCode::Char('P') => {
                drop(model);
                self.previous_episode().await;
            }
            // Toggle shuffle
            KeyCode::Char('s') | KeyCode::Char('S') => {
                drop(model);
                self.toggle_shuffle().await;
            }
            // Toggle loop
            KeyCode::Char('l') | KeyCode::Char('L') => {
                drop(model);
                self.toggle_loop().await;
            }
            // Scrub
            KeyCode::Left => {
                drop(model);
                self.seek_backward().await;
            }
            KeyCode::Right => {
                drop(model);
                self.seek_forward().await;
            }
            // Refresh the episode list
            KeyCode::Char('r') | KeyCode::Char('R') => {
                drop(model);
                self.load_episodes().await;
            }
            // Show help popup
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }
}
