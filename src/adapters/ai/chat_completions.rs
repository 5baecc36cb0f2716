//! OpenAI-style chat-completions wire format, shared by Groq and OpenAI.
//!
//! The system prompt, when present, is prepended as a `system` message and
//! history turns keep their `user`/`assistant` roles.

use reqwest::Client;
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::support::{expose, send_json};
use crate::domain::{Completion, ConversationTurn, RelayError, TurnRole};

/// Upper bound on generated tokens for chat-completions providers.
pub const MAX_TOKENS: u32 = 4096;

/// Where and how long to talk to a chat-completions endpoint.
pub struct Endpoint<'a> {
    /// Provider label used in error messages and logs.
    pub provider: &'static str,
    /// Full URL of the `/chat/completions` resource.
    pub url: String,
    pub timeout: Duration,
    pub api_key: &'a Secret<String>,
}

/// Builds the message list: optional system message, then the turns in order.
pub fn build_messages(system_prompt: &str, turns: &[ConversationTurn]) -> Vec<WireMessage> {
    let mut messages = Vec::with_capacity(turns.len() + 1);

    if !system_prompt.trim().is_empty() {
        messages.push(WireMessage {
            role: "system".to_string(),
            content: system_prompt.to_string(),
        });
    }

    for turn in turns {
        messages.push(WireMessage {
            role: match turn.role() {
                TurnRole::User => "user",
                TurnRole::Assistant => "assistant",
            }
            .to_string(),
            content: turn.content().to_string(),
        });
    }

    messages
}

/// Performs one chat-completions call.
pub async fn complete(
    client: &Client,
    endpoint: Endpoint<'_>,
    model: &str,
    messages: Vec<WireMessage>,
    temperature: f32,
) -> Result<Completion, RelayError> {
    let body = ChatCompletionRequest {
        model: model.to_string(),
        messages,
        temperature,
        max_tokens: MAX_TOKENS,
    };

    tracing::debug!(
        provider = endpoint.provider,
        model,
        messages = body.messages.len(),
        "sending chat completion request"
    );

    let request = client
        .post(&endpoint.url)
        .timeout(endpoint.timeout)
        .bearer_auth(expose(endpoint.api_key))
        .json(&body);

    let response: ChatCompletionResponse = send_json(endpoint.provider, request).await?;

    let content = response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| {
            RelayError::transport(format!("No choices in {} response", endpoint.provider))
        })?;

    Ok(Completion::new(content, model))
}

// ----- Wire Types -----

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: WireMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_is_prepended() {
        let turns = vec![ConversationTurn::user("hi")];
        let messages = build_messages("be brief", &turns);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "be brief");
        assert_eq!(messages[1].role, "user");
    }

    #[test]
    fn blank_system_prompt_is_omitted() {
        let turns = vec![
            ConversationTurn::user("hi"),
            ConversationTurn::assistant("hello"),
            ConversationTurn::user("again"),
        ];
        let messages = build_messages("  ", &turns);

        let roles: Vec<_> = messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["user", "assistant", "user"]);
    }
}
