//! GPT-4o client (bearer auth, fixed sampling temperature).

use std::time::Duration;

use scan_config::ProviderConfig;

use crate::{Backend, chat, error::DispatchError, http::send};

pub struct OpenAiClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    temperature: Option<f32>,
}

impl OpenAiClient {
    #[must_use]
    pub fn new(http: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            http,
            url: config.url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    fn request(&self, system: &str, user: &str) -> reqwest::RequestBuilder {
        let body = chat::ChatRequest {
            temperature: self.temperature,
            ..chat::ChatRequest::new(&self.model, system, user)
        };
        self.http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
    }
}

impl Backend for OpenAiClient {
    fn name(&self) -> &'static str {
        "gpt4o"
    }

    async fn dispatch(
        &self,
        system: &str,
        user: &str,
        timeout: Duration,
    ) -> Result<String, DispatchError> {
        let resp = send(self.request(system, user), timeout).await?;
        chat::read_completion(resp, timeout).await
    }
}
