//! Connection settings for one inference provider.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default per-call timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ProviderConfig {
    /// Chat-completions endpoint (full URL, including the path).
    #[serde(default)]
    pub url: String,

    /// Credential sent in the provider's auth header.
    #[serde(default)]
    pub api_key: String,

    /// Model identifier placed in every request body.
    #[serde(default)]
    pub model: String,

    /// Per-call timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Mandatory pause after each successful call, in seconds.
    /// Used for providers that enforce a request rate limit.
    #[serde(default)]
    pub post_call_delay_secs: u64,

    /// Sampling temperature, omitted from the request when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ProviderConfig {
    /// Defaults for the hosted Llama endpoint.
    #[must_use]
    pub fn llama() -> Self {
        Self {
            url: "https://integrate.api.nvidia.com/v1/chat/completions".into(),
            model: "meta/llama-3.1-70b-instruct".into(),
            ..Self::base()
        }
    }

    /// Defaults for the GPT-4o endpoint.
    #[must_use]
    pub fn openai() -> Self {
        Self {
            url: "https://api.openai.com/v1/chat/completions".into(),
            model: "gpt-4o".into(),
            temperature: Some(0.0),
            ..Self::base()
        }
    }

    /// Defaults for the Sarvam endpoint, including its rate-limit pause.
    #[must_use]
    pub fn sarvam() -> Self {
        Self {
            url: "https://api.sarvam.ai/v1/chat/completions".into(),
            model: "sarvam-m".into(),
            post_call_delay_secs: 30,
            ..Self::base()
        }
    }

    fn base() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            model: String::new(),
            timeout_secs: default_timeout_secs(),
            post_call_delay_secs: 0,
            temperature: None,
        }
    }

    /// Check if the endpoint and credential are both present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.api_key.is_empty()
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub const fn post_call_delay(&self) -> Duration {
        Duration::from_secs(self.post_call_delay_secs)
    }
}
