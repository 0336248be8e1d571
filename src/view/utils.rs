//! Utility functions for rendering UI components

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::{Block, List, ListItem, ListState},
};

pub fn render_scrollable_list(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem>,
    selected_index: usize,
    block: Block,
) {
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default()); // Highlight handled by item styles

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index));

    frame.render_stateful_widget(list, area, &mut list_state);
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_width)
    } else {
        format!("{:<width$}", s, width = max_width)
    }
}

/// Reduce the API's HTML description to plain text.
///
/// The description is untrusted input; the terminal renders text only, so
/// tags are dropped wholesale and the handful of entities the feed actually
/// uses are decoded. Block-level closers turn into line breaks so paragraphs
/// survive.
pub fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut chars = html.chars();

    while let Some(c) = chars.next() {
        if c != '<' {
            out.push(c);
            continue;
        }

        let mut tag = String::new();
        for t in chars.by_ref() {
            if t == '>' {
                break;
            }
            tag.push(t);
        }

        let name = tag
            .trim_start_matches('/')
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match name.as_str() {
            "p" | "div" | "h1" | "h2" | "h3" | "h4" | "ul" | "ol" => {
                if tag.starts_with('/') && !out.ends_with("\n\n") {
                    out.push('\n');
                    out.push('\n');
                }
            }
            "br" | "li" => {
                if !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }

    let decoded = out
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ");

    decoded.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_keeps_paragraph_breaks() {
        let html = "<p>In this episode, <strong>Diego</strong> talks.</p><p>And more.</p>";
        assert_eq!(
            strip_html(html),
            "In this episode, Diego talks.\n\nAnd more."
        );
    }

    #[test]
    fn decodes_common_entities() {
        assert_eq!(strip_html("Q&amp;A &lt;live&gt;"), "Q&A <live>");
        assert_eq!(strip_html("it&#39;s &quot;fine&quot;"), "it's \"fine\"");
    }

    #[test]
    fn list_items_become_lines() {
        assert_eq!(strip_html("<ul><li>one</li><li>two</li></ul>"), "one\ntwo");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_html("no markup here"), "no markup here");
    }

    #[test]
    fn truncates_long_strings_with_ellipsis() {
        assert_eq!(truncate_string("a very long episode title", 10), "a very ...");
        assert_eq!(truncate_string("short", 10), "short     ");
    }
}
