//! Hosted Llama client (bearer auth, non-streaming chat completions).

use std::time::Duration;

use scan_config::ProviderConfig;

use crate::{Backend, chat, error::DispatchError, http::send};

pub struct LlamaClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

impl LlamaClient {
    #[must_use]
    pub fn new(http: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            http,
            url: config.url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    fn request(&self, system: &str, user: &str) -> reqwest::RequestBuilder {
        let body = chat::ChatRequest {
            stream: Some(false),
            ..chat::ChatRequest::new(&self.model, system, user)
        };
        self.http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
    }
}

impl Backend for LlamaClient {
    fn name(&self) -> &'static str {
        "llama"
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
