use std::path::{Path, PathBuf};

use anyhow::Context;
use scan_config::ScanConfig;
use scan_core::{Record, Schema};

/// Load `.env`, the layered configuration, and reject unusable values.
pub fn load_config() -> anyhow::Result<ScanConfig> {
    let config = ScanConfig::load_with_dotenv().context("failed to load callscan configuration")?;
    config.validate()?;
    Ok(config)
}

/// Resolve the schema for a command.
///
/// An explicit `--schema` wins over `run.schema_path`; with neither, the
/// built-in call review schema is used.
pub fn load_schema(explicit: Option<&Path>, config: &ScanConfig) -> anyhow::Result<Schema> {
    let path = explicit
        .map(Path::to_path_buf)
        .or_else(|| config.run.schema_path.as_ref().map(PathBuf::from));

    let Some(path) = path else {
        tracing::debug!("no schema file given; using built-in call review schema");
        return Ok(Schema::call_review());
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read schema file at {}", path.display()))?;
    let schema: Schema = toml::from_str(&text)
        .with_context(|| format!("invalid schema file at {}", path.display()))?;

    tracing::debug!(path = %path.display(), criteria = schema.len(), "schema loaded");
    Ok(schema)
}

/// Read one record per line of a JSONL file.
pub fn read_records(path: &Path) -> anyhow::Result<Vec<Record>> {
    let records = serde_jsonlines::json_lines::<Record, _>(path)
        .with_context(|| format!("failed to open records file at {}", path.display()))?
        .enumerate()
        .map(|(line, record)| {
            record.with_context(|| format!("invalid record on line {} of {}", line + 1, path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    tracing::debug!(path = %path.display(), records = records.len(), "records loaded");
    Ok(records)
}
