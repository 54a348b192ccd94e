use std::sync::Arc;

use anyhow::Context;
use scan_backend::Provider;
use scan_config::ScanConfig;
use scan_engine::BatchOptions;

use crate::bootstrap;
use crate::cli::{GlobalFlags, RunArgs};
use crate::output;
use crate::progress::{self, Progress};

/// Resolve batch options: command-line overrides win over `[run]`, and the
/// selected provider's section supplies the per-call timeout.
fn batch_options(args: &RunArgs, config: &ScanConfig, provider: &Provider) -> BatchOptions {
    BatchOptions {
        concurrency_limit: args.concurrency.unwrap_or(config.run.concurrency),
        request_timeout: provider.kind().config(config).timeout(),
    }
}

/// Handle `callscan run`.
pub async fn handle(args: &RunArgs, config: &ScanConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identifier = args.backend.as_deref().unwrap_or(&config.run.backend);
    let provider = Provider::from_identifier(identifier, config)
        .with_context(|| format!("cannot use backend '{identifier}'"))?;

    let schema = bootstrap::load_schema(args.schema.as_deref(), config)?;
    let records = bootstrap::read_records(&args.records)?;
    let options = batch_options(args, config, &provider);

    let total = records.len();
    let bar = Progress::bar(total);

    let result = scan_engine::run(records, &schema, Arc::new(provider), &options, |done, answers| {
        tracing::debug!(
            index = done.index,
            completed = done.completed,
            failed = answers.is_failed(),
            "record finished"
        );
        bar.record_done(done.completed, done.total);
    })
    .await;

    let summary = result.summary();
    let message = format!(
        "{} ({} failed)",
        progress::processed_message(summary.records, total),
        summary.failed
    );
    if summary.failed == 0 {
        bar.finish_ok(&message);
    } else {
        bar.finish_err(&message);
    }

    println!("{}", output::render_results(&result, &schema, flags.format)?);
    Ok(())
}
