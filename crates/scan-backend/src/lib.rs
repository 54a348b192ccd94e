//! # scan-backend
//!
//! Inference provider HTTP clients for callscan.
//!
//! Every provider sits behind the [`Backend`] trait: one system message, one
//! user message, one network round trip, and either the generated text or a
//! [`DispatchError`]. Wire differences (auth header, body fields, model id,
//! post-call pauses) stay inside the provider modules:
//! - `llama`: hosted Llama 3.1 70B, bearer auth
//! - `gpt4o`: GPT-4o, bearer auth, temperature 0
//! - `sarvam-m`: Sarvam, `api-subscription-key` header, rate-limit pause
//!
//! [`BackendKind`] is the registry that maps a configured identifier to a
//! [`Provider`].

pub mod chat;
pub mod llama;
pub mod openai;
pub mod sarvam;

mod error;
mod http;

pub use error::{BackendError, DispatchError, FaultKind};
pub use llama::LlamaClient;
pub use openai::OpenAiClient;
pub use sarvam::SarvamClient;

use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use scan_config::{ProviderConfig, ScanConfig};

// ── Contract ───────────────────────────────────────────────────────

/// A text-inference backend.
pub trait Backend: Send + Sync {
    /// Registry identifier of this backend.
    fn name(&self) -> &'static str;

    /// Send one system/user message pair and return the generated text.
    ///
    /// The call is bounded by `timeout`. Any post-call pause the provider
    /// requires is awaited before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] on transport failure, timeout, non-success
    /// status, an unreadable envelope, or an empty generated text.
    fn dispatch(
        &self,
        system: &str,
        user: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<String, DispatchError>> + Send;
}

// ── Registry ───────────────────────────────────────────────────────

/// Identifiers of the registered backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Llama,
    Gpt4o,
    Sarvam,
}

impl BackendKind {
    pub const ALL: [Self; 3] = [Self::Llama, Self::Gpt4o, Self::Sarvam];

    /// Canonical identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Llama => "llama",
            Self::Gpt4o => "gpt4o",
            Self::Sarvam => "sarvam-m",
        }
    }

    /// Configuration section holding this backend's connection settings.
    #[must_use]
    pub const fn section(self) -> &'static str {
        match self {
            Self::Llama => "llama",
            Self::Gpt4o => "openai",
            Self::Sarvam => "sarvam",
        }
    }

    #[must_use]
    pub const fn config(self, config: &ScanConfig) -> &ProviderConfig {
        match self {
            Self::Llama => &config.llama,
            Self::Gpt4o => &config.openai,
            Self::Sarvam => &config.sarvam,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "llama" => Ok(Self::Llama),
            "gpt4o" | "gpt-4o" | "openai" => Ok(Self::Gpt4o),
            "sarvam-m" | "sarvam" => Ok(Self::Sarvam),
            _ => Err(BackendError::UnknownBackend(s.to_string())),
        }
    }
}

// ── Provider ───────────────────────────────────────────────────────

/// A configured backend selected through the registry.
pub enum Provider {
    Llama(LlamaClient),
    OpenAi(OpenAiClient),
    Sarvam(SarvamClient),
}

impl Provider {
    /// Resolve `identifier` and build its client from `config`.
    ///
    /// # Errors
    ///
    /// [`BackendError::UnknownBackend`] for an unregistered identifier,
    /// [`BackendError::NotConfigured`] when its section lacks url or key.
    pub fn from_identifier(identifier: &str, config: &ScanConfig) -> Result<Self, BackendError> {
        Self::build(identifier.parse()?, config)
    }

    /// Build the client for `kind` from `config`.
    ///
    /// # Errors
    ///
    /// [`BackendError::NotConfigured`] when the section lacks url or key,
    /// [`BackendError::Client`] if the HTTP client cannot be built.
    pub fn build(kind: BackendKind, config: &ScanConfig) -> Result<Self, BackendError> {
        let settings = config
            .configured_provider(kind.section())
            .map_err(|_| BackendError::NotConfigured {
                backend: kind.as_str(),
                section: kind.section(),
            })?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("callscan/", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::debug!(backend = %kind, url = %settings.url, model = %settings.model, "backend selected");

        Ok(match kind {
            BackendKind::Llama => Self::Llama(LlamaClient::new(http, settings)),
            BackendKind::Gpt4o => Self::OpenAi(OpenAiClient::new(http, settings)),
            BackendKind::Sarvam => Self::Sarvam(SarvamClient::new(http, settings)),
        })
    }

    #[must_use]
    pub const fn kind(&self) -> BackendKind {
        match self {
            Self::Llama(_) => BackendKind::Llama,
            Self::OpenAi(_) => BackendKind::Gpt4o,
            Self::Sarvam(_) => BackendKind::Sarvam,
        }
    }
}

impl Backend for Provider {
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    async fn dispatch(
        &self,
        system: &str,
        user: &str,
        timeout: Duration,
    ) -> Result<String, DispatchError> {
        match self {
            Self::Llama(client) => client.dispatch(system, user, timeout).await,
            Self::OpenAi(client) => client.dispatch(system, user, timeout).await,
            Self::Sarvam(client) => client.dispatch(system, user, timeout).await,
        }
    }
}
