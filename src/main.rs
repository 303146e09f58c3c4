use anyhow::Result;
use colloquy::{
    app::{App, AppState},
    chat_view::draw_chat,
    key_handlers::{handle_chat_input, handle_quit_confirm_input, handle_settings_input},
    logging::init_logging,
    settings_view::draw_settings,
};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use std::{io, time::Duration};

#[tokio::main]
async fn main() -> Result<()> {
    let _logger = init_logging()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>) -> Result<()> {
    let mut app = App::new();

    loop {
        terminal.draw(|f| draw(f, &mut app))?;

        if app.state == AppState::Quit {
            return Ok(());
        }

        // One interaction at a time: while a dispatch is in flight, the
        // loop only pulls fragments and redraws. Input resumes when the
        // turn resolves.
        if app.is_streaming() {
            app.step_stream().await;
            continue;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match app.state {
                    AppState::Chat => handle_chat_input(key, &mut app).await,
                    AppState::Settings => handle_settings_input(key, &mut app),
                    AppState::QuitConfirm => handle_quit_confirm_input(key, &mut app),
                    AppState::Quit => {}
                }
            }
        }
    }
}

fn draw(f: &mut Frame, app: &mut App) {
    match app.state {
        AppState::Settings => draw_settings(f, app),
        AppState::QuitConfirm => {
            draw_chat(f, app);
            draw_quit_confirm(f);
        }
        _ => draw_chat(f, app),
    }
}

fn draw_quit_confirm(f: &mut Frame) {
    let size = f.area();
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(3),
            Constraint::Percentage(40),
        ])
        .split(size);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(vertical[1]);
    let area = horizontal[1];

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(Line::from("Quit? (y/n)"))
            .alignment(ratatui::layout::Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Yellow)),
            ),
        area,
    );
}
