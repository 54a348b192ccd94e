use scan_config::ScanConfig;
use serde::Serialize;

use crate::bootstrap;
use crate::cli::{GlobalFlags, OutputFormat, PromptArgs};
use crate::output;

#[derive(Debug, Serialize)]
struct PromptView<'a> {
    criteria: Vec<&'a str>,
    system: &'a str,
    instructions: &'a str,
}

/// Handle `callscan prompt`.
pub fn handle(args: &PromptArgs, config: &ScanConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = bootstrap::load_schema(args.schema.as_deref(), config)?;
    let prompt = scan_engine::prompt::build(&schema);

    match flags.format {
        OutputFormat::Json | OutputFormat::Raw => output::output(
            &PromptView {
                criteria: schema.names().collect(),
                system: &prompt.system,
                instructions: &prompt.instructions,
            },
            flags.format,
        ),
        // Multi-line messages do not fit a table; print them as sent.
        OutputFormat::Table => {
            println!("{}\n\n{}", prompt.system, prompt.user_message("<transcript>"));
            Ok(())
        }
    }
}
