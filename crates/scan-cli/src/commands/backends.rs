use scan_backend::BackendKind;
use scan_config::ScanConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct BackendRow {
    backend: &'static str,
    section: &'static str,
    model: String,
    configured: bool,
    selected: bool,
    post_call_delay_secs: u64,
}

fn rows(config: &ScanConfig) -> Vec<BackendRow> {
    let selected = config.run.backend.parse::<BackendKind>().ok();
    BackendKind::ALL
        .into_iter()
        .map(|kind| {
            let settings = kind.config(config);
            BackendRow {
                backend: kind.as_str(),
                section: kind.section(),
                model: settings.model.clone(),
                configured: settings.is_configured(),
                selected: selected == Some(kind),
                post_call_delay_secs: settings.post_call_delay_secs,
            }
        })
        .collect()
}

/// Handle `callscan backends`.
pub fn handle(config: &ScanConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    output::output(&rows(config), flags.format)
}
