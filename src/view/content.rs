//! Main content area rendering (episode list and episode detail)

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph, Wrap},
};

use crate::model::{ContentState, ContentView, Episode, PlaybackInfo};

use super::utils::{render_scrollable_list, strip_html, truncate_string};

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    content_state: &ContentState,
    playback: &PlaybackInfo,
) {
    match &content_state.view {
        ContentView::EpisodeList {
            episodes,
            selected_index,
        } => {
            render_episode_list(
                frame,
                area,
                episodes,
                *selected_index,
                content_state.is_loading,
                playback,
            );
        }
        ContentView::EpisodeDetail { episode, scroll } => {
            render_episode_detail(frame, area, episode, *scroll);
        }
        ContentView::Empty => {
            let title = if content_state.is_loading {
                " Episodes (loading...) "
            } else {
                " Episodes "
            };
            let placeholder = Paragraph::new("Press R to load the latest episodes")
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().borders(Borders::ALL).title(title));
            frame.render_widget(placeholder, area);
        }
    }
}

fn render_episode_list(
    frame: &mut Frame,
    area: Rect,
    episodes: &[Episode],
    selected_index: usize,
    is_loading: bool,
    playback: &PlaybackInfo,
) {
    let content_width = area.width.saturating_sub(4) as usize;
    // Fixed columns: playing marker(2), date(9+3), duration(8+3)
    let remaining = content_width.saturating_sub(2 + 12 + 11);
    let title_width = (remaining * 60) / 100;
    let members_width = remaining.saturating_sub(title_width);

    let items: Vec<ListItem> = episodes
        .iter()
        .enumerate()
        .map(|(i, episode)| {
            let is_current = playback.has_episode && episode.id == playback.episode_id;
            let marker = if is_current { "▶ " } else { "  " };

            let text = format!(
                "{}{}   {}   {:>9}   {}",
                marker,
                truncate_string(&episode.title, title_width),
                truncate_string(&episode.members, members_width),
                episode.published_at,
                episode.duration_as_string,
            );

            let style = if i == selected_index {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else if is_current {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let title = if is_loading {
        " Latest episodes (loading...) ".to_string()
    } else {
        format!(" Latest episodes ({}) ", episodes.len())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1));

    render_scrollable_list(frame, area, items, selected_index, block);
}

fn render_episode_detail(frame: &mut Frame, area: Rect, episode: &Episode, scroll: u16) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Episode header
            Constraint::Min(0),    // Description
        ])
        .split(area);

    let header_lines = vec![
        Line::from(Span::styled(
            episode.title.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(episode.members.clone(), Style::default().fg(Color::White)),
            Span::raw("  •  "),
            Span::styled(episode.published_at.clone(), Style::default().fg(Color::Gray)),
            Span::raw("  •  "),
            Span::styled(
                episode.duration_as_string.clone(),
                Style::default().fg(Color::Gray),
            ),
        ]),
    ];

    let header = Paragraph::new(header_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Episode (Esc to go back, Enter to play) ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(header, chunks[0]);

    // API descriptions are HTML and untrusted; render as plain text only
    let description = Paragraph::new(strip_html(&episode.description))
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Description ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(description, chunks[1]);
}
