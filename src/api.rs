use crate::{
    config::SessionConfig,
    constants::CHAT_COMPLETIONS_PATH,
    errors::{ColloquyError, ColloquyResult},
    models::Message,
};
use futures::stream::BoxStream;
use futures::StreamExt;
use log::debug;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

// One client for the whole session; reqwest pools connections per host.
static HTTP_CLIENT: Lazy<Client> = Lazy::new(Client::new);

/// A finite lazy sequence of streamed text fragments.
pub type FragmentStream = BoxStream<'static, ColloquyResult<String>>;

/// Builds the request payload: `[system] ++ history ++ [user]`.
///
/// Pure function of its inputs; the caller owns appending the user
/// message to history so it appears exactly once downstream. The system
/// message is synthesized fresh from the current prompt and never stored.
pub fn build_payload(system_prompt: &str, history: &[Message], user_text: &str) -> Vec<Message> {
    let mut payload = Vec::with_capacity(history.len() + 2);
    payload.push(Message::system(system_prompt));
    payload.extend_from_slice(history);
    payload.push(Message::user(user_text));
    payload
}

/// One incremental chunk of the chat-completions SSE stream.
#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    content: Option<String>,
}

/// Parse an SSE "data:" line, returning None for anything that is not a
/// data payload. "[DONE]" is handled by the caller.
fn parse_sse_data(line: &str) -> Option<&str> {
    line.strip_prefix("data: ").or_else(|| line.strip_prefix("data:"))
}

fn endpoint_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), CHAT_COMPLETIONS_PATH)
}

/// Opens a single streaming chat-completion request and returns the
/// response as a stream of text fragments.
///
/// Auth rejection and other non-2xx statuses surface as `Api` errors
/// before any fragment is produced; transport failures mid-stream end the
/// stream with a `Network` error. No retries, no cancellation.
pub async fn stream_completion(
    config: &SessionConfig,
    messages: &[Message],
) -> ColloquyResult<FragmentStream> {
    let url = endpoint_url(&config.base_url);
    let payload = json!({
        "model": config.model,
        "messages": messages,
        "stream": true,
        "temperature": config.temperature,
    });

    debug!("dispatching {} messages to {}", messages.len(), url);

    let response = HTTP_CLIENT
        .post(&url)
        .bearer_auth(&config.api_key)
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(ColloquyError::api_error(format!(
            "API returned error: {} - {}",
            status, error_text
        )));
    }

    let byte_stream = response.bytes_stream();

    let stream = async_stream::stream! {
        let mut buffer = String::new();
        futures::pin_mut!(byte_stream);

        'recv: while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(ColloquyError::Network(e));
                    break;
                }
            };

            buffer.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(line_end) = buffer.find('\n') {
                let line = buffer[..line_end].trim().to_string();
                buffer.drain(..=line_end);

                if line.is_empty() || line.starts_with(':') {
                    continue;
                }

                let Some(data) = parse_sse_data(&line) else {
                    continue;
                };
                if data.trim() == "[DONE]" {
                    break 'recv;
                }

                match serde_json::from_str::<StreamChunk>(data) {
                    Ok(chunk) => {
                        if let Some(content) = chunk
                            .choices
                            .into_iter()
                            .next()
                            .and_then(|c| c.delta.content)
                        {
                            yield Ok(content);
                        }
                    }
                    // Unparseable chunks are skipped, not fatal.
                    Err(e) => debug!("skipping malformed SSE chunk: {}", e),
                }
            }
        }
    };

    Ok(Box::pin(stream))
}
