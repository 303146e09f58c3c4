use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// The kind of inline notice shown in the status line. Warnings cover
/// pre-flight validation (missing key); errors cover dispatch failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Warning(String),
    Error(String),
}

#[derive(Debug, Default)]
pub struct StatusIndicator {
    streaming: bool,
    notice: Option<Notice>,
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        StatusIndicator::default()
    }

    pub fn set_streaming(&mut self, streaming: bool) {
        self.streaming = streaming;
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn update_spinner(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let spinner_frames = ["◐", "◓", "◑", "◒"];
        let spinner = if self.streaming {
            spinner_frames[self.spinner_idx % spinner_frames.len()]
        } else {
            " "
        };

        let (text, color) = match &self.notice {
            Some(Notice::Error(msg)) => (msg.as_str(), Color::Red),
            Some(Notice::Warning(msg)) => (msg.as_str(), Color::Yellow),
            None if self.streaming => ("Streaming...", Color::DarkGray),
            None => ("", Color::DarkGray),
        };

        let status = Line::from(vec![
            Span::styled(spinner, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(text, Style::default().fg(color)),
        ]);

        frame.render_widget(
            Paragraph::new(status),
            Rect {
                x: area.x,
                y: area.y + 1,
                width: area.width,
                height: 1,
            },
        );
    }
}
