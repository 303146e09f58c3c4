use crate::app::{App, SettingsField};
use crate::config::Provider;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_settings(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Settings (Esc returns to chat) ")
        .style(Style::default().fg(Color::Gray));
    f.render_widget(block, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(2), // provider
                Constraint::Length(2), // api key
                Constraint::Length(2), // base url
                Constraint::Length(2), // model
                Constraint::Min(4),    // system prompt
                Constraint::Length(2), // clear history
                Constraint::Length(2), // status line
            ]
            .as_ref(),
        )
        .split(size);

    let config = &app.session.config;

    let provider_value = Provider::ALL
        .iter()
        .map(|p| {
            if *p == config.provider {
                format!("[{}]", p.label())
            } else {
                format!(" {} ", p.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    draw_field(
        f,
        chunks[0],
        "Provider (←/→)",
        &provider_value,
        app.settings_focus == SettingsField::Provider,
    );

    let masked = "•".repeat(config.api_key.chars().count());
    draw_field(
        f,
        chunks[1],
        "API key",
        &masked,
        app.settings_focus == SettingsField::ApiKey,
    );

    let url_label = if config.base_url_editable() {
        "Base URL"
    } else {
        "Base URL (preset)"
    };
    draw_field(
        f,
        chunks[2],
        url_label,
        &config.base_url,
        app.settings_focus == SettingsField::BaseUrl,
    );

    draw_field(
        f,
        chunks[3],
        "Model",
        &config.model,
        app.settings_focus == SettingsField::Model,
    );

    draw_prompt_area(
        f,
        chunks[4],
        &config.system_prompt,
        app.settings_focus == SettingsField::SystemPrompt,
    );

    let clear_label = format!(
        "Clear conversation history ({} messages)",
        app.session.history.len()
    );
    draw_field(
        f,
        chunks[5],
        "Enter to clear",
        &clear_label,
        app.settings_focus == SettingsField::ClearHistory,
    );

    app.status.render(f, chunks[6]);
}

fn draw_field(f: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let marker = if focused { "▸ " } else { "  " };
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::styled(marker, label_style),
        Span::styled(format!("{label}: "), label_style),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_prompt_area(f: &mut Frame, area: Rect, prompt: &str, focused: bool) {
    let marker = if focused { "▸ " } else { "  " };
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(marker, label_style),
        Span::styled("System prompt:", label_style),
    ])];
    for text_line in prompt.split('\n') {
        lines.push(Line::from(Span::styled(
            format!("    {text_line}"),
            Style::default().fg(Color::White),
        )));
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
