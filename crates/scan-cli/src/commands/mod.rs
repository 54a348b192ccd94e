use scan_config::ScanConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod backends;
pub mod prompt;
pub mod run;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &ScanConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Run(args) => run::handle(&args, config, flags).await,
        Commands::Prompt(args) => prompt::handle(&args, config, flags),
        Commands::Backends => backends::handle(config, flags),
    }
}
