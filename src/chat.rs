use crate::{
    api::{build_payload, stream_completion, FragmentStream},
    config::SessionConfig,
    conversation::Conversation,
    errors::{ColloquyError, ColloquyResult},
};
use futures::StreamExt;
use log::{info, warn};

/// Session-scoped context tying configuration to the conversation store.
/// Created at session start, destroyed at session end; `clear_history`
/// is the only non-append mutation.
#[derive(Debug, Default)]
pub struct ChatSession {
    pub config: SessionConfig,
    pub history: Conversation,
}

/// Accumulates streamed fragments in arrival order. The partial view
/// feeds the renderer while the stream is live; the final view is what
/// gets committed to history.
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    buffer: String,
}

impl StreamAccumulator {
    pub fn push(&mut self, fragment: &str) {
        self.buffer.push_str(fragment);
    }

    pub fn partial(&self) -> &str {
        &self.buffer
    }

    pub fn into_text(self) -> String {
        self.buffer
    }
}

/// An in-flight dispatch: the fragment stream plus its accumulator.
/// Dropping it discards whatever partial output has arrived.
pub struct ActiveTurn {
    stream: FragmentStream,
    acc: StreamAccumulator,
}

/// Result of pulling one fragment from an active turn.
pub enum TurnStep {
    /// A fragment arrived; the partial buffer grew.
    Fragment,
    /// Stream end: the full concatenated reply, ready to commit.
    Finished(String),
    /// The stream failed; the partial buffer is discarded.
    Failed(ColloquyError),
}

impl ActiveTurn {
    pub(crate) fn from_stream(stream: FragmentStream) -> Self {
        ActiveTurn {
            stream,
            acc: StreamAccumulator::default(),
        }
    }

    pub fn partial(&self) -> &str {
        self.acc.partial()
    }

    /// Pulls the next fragment. Callers loop on this, re-rendering the
    /// partial buffer between steps, until `Finished` or `Failed`.
    pub async fn step(&mut self) -> TurnStep {
        match self.stream.next().await {
            Some(Ok(fragment)) => {
                self.acc.push(&fragment);
                TurnStep::Fragment
            }
            Some(Err(e)) => TurnStep::Failed(e),
            None => TurnStep::Finished(std::mem::take(&mut self.acc).into_text()),
        }
    }
}

impl ChatSession {
    pub fn new(config: SessionConfig) -> Self {
        ChatSession {
            config,
            history: Conversation::new(),
        }
    }

    /// Starts one dispatch cycle for the given user input.
    ///
    /// A missing credential short-circuits before any network call or
    /// history mutation. Otherwise the payload is built from the history
    /// as it stood before this turn, the user message is appended exactly
    /// once, and the streaming call is opened. If opening fails, the user
    /// message stays in history (net +1) and the error is returned.
    pub async fn begin_turn(&mut self, user_text: &str) -> ColloquyResult<ActiveTurn> {
        if let Err(e) = self.config.validate() {
            warn!("refusing to dispatch: {}", e);
            return Err(e);
        }

        let payload = build_payload(
            &self.config.system_prompt,
            self.history.messages(),
            user_text,
        );
        self.history.push_user(user_text);

        let stream = stream_completion(&self.config, &payload).await?;
        Ok(ActiveTurn::from_stream(stream))
    }

    /// Commits the completed reply as one assistant record.
    pub fn commit_reply(&mut self, reply: String) {
        info!("turn complete, {} chars committed", reply.len());
        self.history.push_assistant(reply);
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Drives one full turn to completion, reporting each partial view.
    /// The TUI steps the turn itself so it can redraw between fragments;
    /// this is the same loop in one piece.
    pub async fn submit<F>(&mut self, user_text: &str, mut on_partial: F) -> ColloquyResult<String>
    where
        F: FnMut(&str),
    {
        let mut turn = self.begin_turn(user_text).await?;
        loop {
            match turn.step().await {
                TurnStep::Fragment => on_partial(turn.partial()),
                TurnStep::Finished(reply) => {
                    self.commit_reply(reply.clone());
                    return Ok(reply);
                }
                TurnStep::Failed(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_session(base_url: &str) -> ChatSession {
        let mut config = SessionConfig::default();
        config.api_key = "test-api-key".to_string();
        config.base_url = base_url.to_string();
        ChatSession::new(config)
    }

    fn sse_body(fragments: &[&str]) -> String {
        let mut body = String::new();
        for fragment in fragments {
            body.push_str(&format!(
                "data: {}\n\n",
                json!({"choices": [{"delta": {"content": fragment}}]})
            ));
        }
        body.push_str("data: [DONE]\n\n");
        body
    }

    #[tokio::test]
    async fn successful_turn_appends_user_then_assistant() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(sse_body(&["Hel", "lo!"]), "text/event-stream"),
            )
            .mount(&server)
            .await;

        let mut session = test_session(&server.uri());
        let mut partials = Vec::new();
        let reply = session
            .submit("Hi", |p| partials.push(p.to_string()))
            .await
            .unwrap();

        assert_eq!(reply, "Hello!");
        assert_eq!(partials, vec!["Hel", "Hello!"]);

        let messages = session.history.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "Hi");
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, "Hello!");
    }

    #[tokio::test]
    async fn payload_holds_prior_history_and_new_input_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "messages": [
                    {"role": "system", "content": "You are helpful."},
                    {"role": "user", "content": "Hi"},
                    {"role": "assistant", "content": "Hello!"},
                    {"role": "user", "content": "Again"},
                ]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(sse_body(&["ok"]), "text/event-stream"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut session = test_session(&server.uri());
        session.config.system_prompt = "You are helpful.".to_string();
        session.history.push_user("Hi");
        session.history.push_assistant("Hello!");

        session.submit("Again", |_| {}).await.unwrap();
        assert_eq!(session.history.len(), 4);
    }

    #[tokio::test]
    async fn failed_dispatch_keeps_user_record_only() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let mut session = test_session(&server.uri());
        let err = session.submit("Hi", |_| {}).await.unwrap_err();
        assert!(matches!(err, ColloquyError::Api(_)));

        let messages = session.history.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::User);
    }

    #[tokio::test]
    async fn mid_stream_failure_discards_partial_output() {
        let fragments = futures::stream::iter(vec![
            Ok("par".to_string()),
            Ok("tial".to_string()),
            Err(ColloquyError::api_error("connection reset")),
        ]);
        let mut turn = ActiveTurn::from_stream(Box::pin(fragments));

        assert!(matches!(turn.step().await, TurnStep::Fragment));
        assert!(matches!(turn.step().await, TurnStep::Fragment));
        assert_eq!(turn.partial(), "partial");
        assert!(matches!(turn.step().await, TurnStep::Failed(_)));

        // The caller drops the turn on failure; nothing reaches history.
        let mut session = ChatSession::default();
        session.history.push_user("Hi");
        drop(turn);
        assert_eq!(session.history.len(), 1);
    }

    #[tokio::test]
    async fn missing_credential_makes_no_request_and_no_mutation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut session = test_session(&server.uri());
        session.config.api_key = "   ".to_string();

        let err = session.submit("Hi", |_| {}).await.unwrap_err();
        assert!(err.is_missing_credential());
        assert!(session.history.is_empty());
    }

    #[tokio::test]
    async fn committed_reply_equals_fragment_concatenation() {
        let fragments = ["He", "l", "", "lo", " world", "!"];
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(sse_body(&fragments), "text/event-stream"),
            )
            .mount(&server)
            .await;

        let mut session = test_session(&server.uri());
        let reply = session.submit("Hi", |_| {}).await.unwrap();
        assert_eq!(reply, fragments.concat());
        assert_eq!(session.history.messages()[1].content, "Hello world!");
    }

    #[tokio::test]
    async fn clear_history_resets_session() {
        let mut session = ChatSession::default();
        session.history.push_user("Hi");
        session.history.push_assistant("Hello!");
        session.clear_history();
        assert!(session.history.is_empty());
    }
}
