//! Sarvam client.
//!
//! Authenticates with an `api-subscription-key` header instead of a bearer
//! token. The service enforces a request rate limit, so every successful call
//! is followed by a fixed pause before the caller gets the text back. The
//! pause is part of the call: a scheduler slot stays occupied until it ends.

use std::time::Duration;

use scan_config::ProviderConfig;

use crate::{Backend, chat, error::DispatchError, http::send};

const SUBSCRIPTION_KEY_HEADER: &str = "api-subscription-key";

pub struct SarvamClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    post_call_delay: Duration,
}

impl SarvamClient {
    #[must_use]
    pub fn new(http: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            http,
            url: config.url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            post_call_delay: config.post_call_delay(),
        }
    }

    fn request(&self, system: &str, user: &str) -> reqwest::RequestBuilder {
        let body = chat::ChatRequest::new(&self.model, system, user);
        self.http
            .post(&self.url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .json(&body)
    }
}

impl Backend for SarvamClient {
    fn name(&self) -> &'static str {
        "sarvam-m"
    }

    async fn dispatch(
        &self,
        system: &str,
        user: &str,
        timeout: Duration,
    ) -> Result<String, DispatchError> {
        let resp = send(self.request(system, user), timeout).await?;
        let text = chat::read_completion(resp, timeout).await?;

        if !self.post_call_delay.is_zero() {
            tracing::debug!(delay = ?self.post_call_delay, "sarvam: holding slot for rate limit");
            tokio::time::sleep(self.post_call_delay).await;
        }
        Ok(text)
    }
}
