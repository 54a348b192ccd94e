//! Batch run settings.

use serde::{Deserialize, Serialize};

/// Default backend identifier.
fn default_backend() -> String {
    "llama".into()
}

/// Default number of concurrently evaluated records.
const fn default_concurrency() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RunConfig {
    /// Backend identifier (`llama`, `gpt4o`, `sarvam-m`).
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Maximum number of records evaluated at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Schema file used when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            concurrency: default_concurrency(),
            schema_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = RunConfig::default();
        assert_eq!(config.backend, "llama");
        assert_eq!(config.concurrency, 10);
        assert!(config.schema_path.is_none());
    }
}
