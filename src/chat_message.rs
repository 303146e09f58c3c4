use crate::models::{Message, Role};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

/// Renders one committed history entry as wrapped, prefixed lines.
pub fn render_message(message: &Message, area: Rect) -> Vec<Line<'static>> {
    let (prefix, style) = match message.role {
        Role::User => ("you ", Style::default().fg(Color::Rgb(255, 223, 128))),
        Role::Assistant => ("ai  ", Style::default().fg(Color::Rgb(144, 238, 144))),
        // History never holds system entries; render dimly if one slips in.
        Role::System => ("sys ", Style::default().fg(Color::DarkGray)),
    };

    render_block(prefix, &message.content, style, area)
}

/// Renders the in-flight partial reply with a trailing cursor marker.
pub fn render_partial(partial: &str, cursor: &str, area: Rect) -> Vec<Line<'static>> {
    let style = Style::default()
        .fg(Color::Rgb(144, 238, 144))
        .add_modifier(Modifier::DIM);
    let text = format!("{partial}{cursor}");
    render_block("ai  ", &text, style, area)
}

fn render_block(prefix: &str, content: &str, style: Style, area: Rect) -> Vec<Line<'static>> {
    let width = (area.width as usize).saturating_sub(prefix.len()).max(8);
    let indent = " ".repeat(prefix.len());
    let mut lines = Vec::new();

    for (para_idx, paragraph) in content.split('\n').enumerate() {
        let wrapped = if paragraph.is_empty() {
            vec![std::borrow::Cow::Borrowed("")]
        } else {
            wrap(paragraph, width)
        };
        for (line_idx, piece) in wrapped.into_iter().enumerate() {
            let lead = if para_idx == 0 && line_idx == 0 {
                Span::styled(prefix.to_string(), style.add_modifier(Modifier::BOLD))
            } else {
                Span::raw(indent.clone())
            };
            lines.push(Line::from(vec![
                lead,
                Span::styled(piece.into_owned(), style),
            ]));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(width: u16) -> Rect {
        Rect::new(0, 0, width, 24)
    }

    #[test]
    fn long_content_wraps_to_area_width() {
        let msg = Message::assistant("word ".repeat(30).trim_end().to_string());
        let lines = render_message(&msg, area(24));
        assert!(lines.len() > 1);
    }

    #[test]
    fn partial_render_carries_cursor_marker() {
        let lines = render_partial("Hel", "▌", area(40));
        let text: String = lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains("Hel▌"));
    }
}
