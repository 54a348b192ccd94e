use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Annotate every record of a JSONL file against the schema
    Run(RunArgs),
    /// Print the prompt the backend receives for a schema
    Prompt(PromptArgs),
    /// List registered backends and whether they are configured
    Backends,
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// JSONL file with one `{"id": ..., "text": ...}` object per line
    #[arg(long, short = 'r')]
    pub records: PathBuf,

    /// Schema file (TOML `[[criteria]]` tables); built-in call review schema if omitted
    #[arg(long, short = 's')]
    pub schema: Option<PathBuf>,

    /// Backend identifier (llama, gpt4o, sarvam-m); overrides run.backend
    #[arg(long, short = 'b')]
    pub backend: Option<String>,

    /// Records evaluated at once; overrides run.concurrency
    #[arg(long, short = 'c')]
    pub concurrency: Option<usize>,
}

#[derive(Debug, Clone, Args)]
pub struct PromptArgs {
    /// Schema file (TOML `[[criteria]]` tables); built-in call review schema if omitted
    #[arg(long, short = 's')]
    pub schema: Option<PathBuf>,
}
