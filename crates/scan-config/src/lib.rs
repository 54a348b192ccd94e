//! # scan-config
//!
//! Layered configuration loading for callscan using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CALLSCAN_*` prefix, `__` as separator)
//! 2. Legacy provider variables (`LLAMA_URL`, `AZURE_OPENAI_API_KEY`, ...)
//! 3. Project-level `.callscan/config.toml`
//! 4. User-level `~/.config/callscan/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CALLSCAN_LLAMA__API_KEY` -> `llama.api_key`,
//! `CALLSCAN_RUN__CONCURRENCY` -> `run.concurrency`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use scan_config::ScanConfig;
//!
//! let config = ScanConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//!
//! if config.sarvam.is_configured() {
//!     println!("Sarvam endpoint: {}", config.sarvam.url);
//! }
//! ```

mod error;
mod provider;
mod run;

pub use error::ConfigError;
pub use provider::ProviderConfig;
pub use run::RunConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
    value::Uncased,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Variable names used by earlier deployments, and the keys they fill.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("LLAMA_URL", "llama.url"),
    ("LLAMA_API_KEY", "llama.api_key"),
    ("OPENAI_API_URL", "openai.url"),
    ("AZURE_OPENAI_API_KEY", "openai.api_key"),
    ("SARVAM_API_URL", "sarvam.url"),
    ("SARVAM_SUBSCRIPTION_KEY", "sarvam.api_key"),
];

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ScanConfig {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default = "ProviderConfig::llama")]
    pub llama: ProviderConfig,
    #[serde(default = "ProviderConfig::openai")]
    pub openai: ProviderConfig,
    #[serde(default = "ProviderConfig::sarvam")]
    pub sarvam: ProviderConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            run: RunConfig::default(),
            llama: ProviderConfig::llama(),
            openai: ProviderConfig::openai(),
            sarvam: ProviderConfig::sarvam(),
        }
    }
}

impl ScanConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `.env` from the current directory (if present) before building
    /// the figment. This is the typical entry point for the CLI.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".callscan/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Legacy provider variables
        figment = figment.merge(Self::legacy_env());

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("CALLSCAN_").split("__"))
    }

    /// Reject values that would make a batch run meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.run.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "run.concurrency".into(),
                reason: "must be at least 1".into(),
            });
        }
        for (section, provider) in self.providers() {
            if provider.timeout_secs == 0 {
                return Err(ConfigError::InvalidValue {
                    field: format!("{section}.timeout_secs"),
                    reason: "must be at least 1".into(),
                });
            }
        }
        Ok(())
    }

    /// Provider sections by name.
    #[must_use]
    pub fn providers(&self) -> [(&'static str, &ProviderConfig); 3] {
        [
            ("llama", &self.llama),
            ("openai", &self.openai),
            ("sarvam", &self.sarvam),
        ]
    }

    /// Provider section `section`, if its endpoint and credential are set.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotConfigured`] for an unknown section or one missing
    /// its url or api key.
    pub fn configured_provider(&self, section: &str) -> Result<&ProviderConfig, ConfigError> {
        self.providers()
            .into_iter()
            .find(|(name, _)| *name == section)
            .map(|(_, provider)| provider)
            .filter(|provider| provider.is_configured())
            .ok_or_else(|| ConfigError::NotConfigured {
                section: section.to_string(),
            })
    }

    /// Environment provider that maps legacy variable names onto config keys.
    fn legacy_env() -> Env {
        let names: Vec<&str> = LEGACY_ENV.iter().map(|(name, _)| *name).collect();
        Env::raw().only(&names).map(|key| {
            LEGACY_ENV
                .iter()
                .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
                .map_or_else(|| Uncased::from(key.as_str().to_owned()), |(_, path)| Uncased::from(*path))
        })
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("callscan").join("config.toml"))
    }
}
