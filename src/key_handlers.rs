use crate::app::{App, AppState, SettingsField};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub async fn handle_chat_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::QuitConfirm;
        }
        KeyCode::Tab => {
            app.state = AppState::Settings;
        }
        KeyCode::Enter => {
            app.submit_input().await;
        }
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::Backspace => {
            app.chat_input.pop();
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.state = AppState::QuitConfirm,
                    'u' => app.scroll_up(),
                    'd' => app.scroll_down(),
                    _ => {}
                }
            } else {
                app.chat_input.push(c);
            }
        }
        _ => {}
    }
}

pub fn handle_settings_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc | KeyCode::Tab => {
            app.status.clear_notice();
            app.state = AppState::Chat;
        }
        KeyCode::Down => app.settings_focus = app.settings_focus.next(),
        KeyCode::Up => app.settings_focus = app.settings_focus.prev(),
        KeyCode::Left if app.settings_focus == SettingsField::Provider => {
            let prev = app.session.config.provider.prev();
            app.session.config.set_provider(prev);
        }
        KeyCode::Right if app.settings_focus == SettingsField::Provider => {
            let next = app.session.config.provider.next();
            app.session.config.set_provider(next);
        }
        KeyCode::Enter => match app.settings_focus {
            SettingsField::ClearHistory => app.clear_history(),
            SettingsField::SystemPrompt => app.session.config.system_prompt.push('\n'),
            _ => app.settings_focus = app.settings_focus.next(),
        },
        KeyCode::Backspace => {
            if let Some(field) = focused_text_field(app) {
                field.pop();
            }
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                if c == 'c' {
                    app.state = AppState::QuitConfirm;
                }
            } else if let Some(field) = focused_text_field(app) {
                field.push(c);
            }
        }
        _ => {}
    }
}

/// The mutable string behind the focused field, if it takes typed input.
/// The base URL is only editable for the Custom provider.
fn focused_text_field(app: &mut App) -> Option<&mut String> {
    let config = &mut app.session.config;
    match app.settings_focus {
        SettingsField::ApiKey => Some(&mut config.api_key),
        SettingsField::BaseUrl if config.base_url_editable() => Some(&mut config.base_url),
        SettingsField::Model => Some(&mut config.model),
        SettingsField::SystemPrompt => Some(&mut config.system_prompt),
        _ => None,
    }
}

pub fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.state = AppState::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.state = AppState::Chat;
        }
        _ => {}
    }
}
