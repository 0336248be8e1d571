//! Player bar rendering

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
};

use crate::model::{PlaybackInfo, format_duration};

pub fn render_player_bar(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let status_text = if !playback.has_episode {
        " No episode playing".to_string()
    } else if playback.is_playing {
        format!(" ▶ {} | {}", playback.title, playback.members)
    } else {
        format!(" ⏸  {} | {}", playback.title, playback.members)
    };

    let loop_text = if playback.is_looping { "Loop: On" } else { "Loop: Off" };
    let shuffle_text = if playback.is_shuffling {
        "Shuffle: On"
    } else {
        "Shuffle: Off"
    };

    let time_str = format!(
        "{} / {}",
        format_duration(playback.position_secs),
        format_duration(playback.duration_secs)
    );

    let progress_ratio = if playback.duration_secs > 0 {
        (playback.position_secs as f64 / playback.duration_secs as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let inner_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([Constraint::Length(3)])
        .split(area);

    let title = format!("{} ", status_text);
    let transport_text = format!(
        " {} {} ",
        if playback.has_previous { "⏮" } else { " " },
        if playback.has_next { "⏭" } else { " " },
    );
    let controls_info = format!(" {} | {} ", loop_text, shuffle_text);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(transport_text).left_aligned())
                .title_bottom(Line::from(controls_info).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(progress_ratio)
        .label(time_str);

    frame.render_widget(gauge, inner_chunks[0]);
}
