//! Top bar rendering (app title and current date)

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

pub fn render_top_bar(frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // App title + tagline
            Constraint::Length(20), // Current date
        ])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "🎧 podcast-rs",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  The best for you to hear, always",
            Style::default().fg(Color::Gray),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(title, chunks[0]);

    let today = chrono::Local::now().format("%a, %-d %B").to_string();
    let date = Paragraph::new(today)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" Today "));
    frame.render_widget(date, chunks[1]);
}
