use crate::chat::{ActiveTurn, ChatSession, TurnStep};
use crate::config::SessionConfig;
use crate::errors::ColloquyError;
use crate::status_indicator::{Notice, StatusIndicator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Chat,
    Settings,
    QuitConfirm,
    Quit,
}

/// Focusable controls on the settings screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Provider,
    ApiKey,
    BaseUrl,
    Model,
    SystemPrompt,
    ClearHistory,
}

impl SettingsField {
    pub const ALL: [SettingsField; 6] = [
        SettingsField::Provider,
        SettingsField::ApiKey,
        SettingsField::BaseUrl,
        SettingsField::Model,
        SettingsField::SystemPrompt,
        SettingsField::ClearHistory,
    ];

    pub fn next(&self) -> SettingsField {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> SettingsField {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

pub struct App {
    pub state: AppState,
    pub session: ChatSession,
    pub active_turn: Option<ActiveTurn>,
    pub chat_input: String,
    pub chat_scroll: u16,
    pub status: StatusIndicator,
    pub settings_focus: SettingsField,
}

impl App {
    pub fn new() -> App {
        App {
            state: AppState::Chat,
            session: ChatSession::new(SessionConfig::default()),
            active_turn: None,
            chat_input: String::new(),
            chat_scroll: 0,
            status: StatusIndicator::new(),
            settings_focus: SettingsField::Provider,
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.active_turn.is_some()
    }

    pub fn scroll_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1);
    }

    fn scroll_to_bottom(&mut self) {
        // The view clamps; a large value lands on the last line.
        self.chat_scroll = u16::MAX;
    }

    /// Takes the typed input and opens a streaming turn. On a missing
    /// credential the input is kept so the user does not lose their text;
    /// on a dispatch failure the user message is already in history and
    /// the input is consumed.
    pub async fn submit_input(&mut self) {
        let text = self.chat_input.trim().to_string();
        if text.is_empty() || self.is_streaming() {
            return;
        }
        self.status.clear_notice();

        match self.session.begin_turn(&text).await {
            Ok(turn) => {
                self.chat_input.clear();
                self.active_turn = Some(turn);
                self.status.set_streaming(true);
                self.scroll_to_bottom();
            }
            Err(ColloquyError::MissingCredential) => {
                self.status.set_notice(Notice::Warning(
                    "Set an API key in settings (Tab) before chatting".to_string(),
                ));
            }
            Err(ColloquyError::Config(msg)) => {
                self.status.set_notice(Notice::Warning(msg));
            }
            Err(e) => {
                self.chat_input.clear();
                self.status.set_notice(Notice::Error(e.to_string()));
                self.scroll_to_bottom();
            }
        }
    }

    /// Pulls one fragment from the in-flight turn. Called by the event
    /// loop, which redraws between calls; nothing else runs while a turn
    /// is active.
    pub async fn step_stream(&mut self) {
        let Some(turn) = self.active_turn.as_mut() else {
            return;
        };
        match turn.step().await {
            TurnStep::Fragment => {}
            TurnStep::Finished(reply) => {
                self.session.commit_reply(reply);
                self.active_turn = None;
                self.status.set_streaming(false);
            }
            TurnStep::Failed(e) => {
                // Partial output is discarded with the turn.
                self.active_turn = None;
                self.status.set_streaming(false);
                self.status.set_notice(Notice::Error(e.to_string()));
            }
        }
        self.scroll_to_bottom();
    }

    pub fn clear_history(&mut self) {
        self.session.clear_history();
        self.chat_scroll = 0;
        self.status
            .set_notice(Notice::Warning("History cleared".to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_focus_cycles_through_all_fields() {
        let mut field = SettingsField::Provider;
        for _ in 0..SettingsField::ALL.len() {
            field = field.next();
        }
        assert_eq!(field, SettingsField::Provider);
        assert_eq!(SettingsField::Provider.prev(), SettingsField::ClearHistory);
    }

    #[tokio::test]
    async fn submit_without_credential_keeps_input_and_history() {
        let mut app = App::new();
        app.chat_input = "Hi".to_string();
        app.submit_input().await;

        assert_eq!(app.chat_input, "Hi");
        assert!(app.session.history.is_empty());
        assert!(!app.is_streaming());
    }

    #[test]
    fn clear_history_resets_scroll() {
        let mut app = App::new();
        app.session.history.push_user("Hi");
        app.chat_scroll = 5;
        app.clear_history();
        assert!(app.session.history.is_empty());
        assert_eq!(app.chat_scroll, 0);
    }
}
