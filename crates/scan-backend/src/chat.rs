//! Chat-completions wire types.
//!
//! All registered providers accept a `{model, messages}` body and answer with
//! a `choices[0].message.content` envelope. Provider modules add their own
//! headers and optional body fields; unwrapping the envelope happens only
//! here.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: Role,
    pub content: &'a str,
}

/// Request body shared by the chat-completions providers.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl<'a> ChatRequest<'a> {
    /// A system + user message pair for `model`, with no optional fields.
    #[must_use]
    pub const fn new(model: &'a str, system: &'a str, user: &'a str) -> Self {
        Self {
            model,
            messages: [
                ChatMessage {
                    role: Role::System,
                    content: system,
                },
                ChatMessage {
                    role: Role::User,
                    content: user,
                },
            ],
            temperature: None,
            stream: None,
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Read a successful response body and unwrap the generated text.
///
/// `timeout` is the bound the request was sent with; it also covers the
/// body read, and elapsing there is reported as [`DispatchError::Timeout`].
pub async fn read_completion(
    resp: reqwest::Response,
    timeout: Duration,
) -> Result<String, DispatchError> {
    let body = resp
        .text()
        .await
        .map_err(|e| DispatchError::from_transport(e, timeout))?;
    parse_completion(&body)
}

/// Extract `choices[0].message.content` from a response body.
///
/// # Errors
///
/// [`DispatchError::MalformedEnvelope`] if the body is not a completion
/// envelope or has no choices; [`DispatchError::EmptyResponse`] if the first
/// choice carries no text.
pub fn parse_completion(body: &str) -> Result<String, DispatchError> {
    let envelope: ChatCompletion =
        serde_json::from_str(body).map_err(|e| DispatchError::MalformedEnvelope(e.to_string()))?;

    let choice = envelope
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| DispatchError::MalformedEnvelope("response has no choices".into()))?;

    match choice.message.content {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(DispatchError::EmptyResponse),
    }
}
