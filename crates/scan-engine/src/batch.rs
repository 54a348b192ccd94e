//! Bounded-concurrency batch evaluation.
//!
//! Every record runs as its own task. A semaphore caps how many tasks are past
//! the dispatch step at once; the permit is held until the record's answer set
//! is final, so provider-side pauses count against the limit. Tasks finish in
//! any order and are written back to the slot of their input index. A record
//! that fails, or whose task panics, resolves to an all-`error` answer set
//! without touching its siblings.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use scan_backend::Backend;
use scan_core::{AnswerSet, BatchResult, RawAnswers, Record, RecordResult, Schema};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::extract::extract;
use crate::prompt::{self, Prompt};
use crate::validate::validate;

/// Default number of records evaluated at once.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Default per-call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Maximum number of records in flight. Zero is treated as one.
    pub concurrency_limit: usize,
    /// Timeout applied to each backend call.
    pub request_timeout: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            concurrency_limit: DEFAULT_CONCURRENCY,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Completion notice for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Input index of the record that just finished.
    pub index: usize,
    /// Records finished so far, this one included.
    pub completed: usize,
    /// Records in the batch.
    pub total: usize,
}

/// Evaluate one record: dispatch, extract, validate.
///
/// A [`DispatchError`](scan_backend::DispatchError) yields an all-`error`
/// set. Output the extractor cannot use yields the validator's `no` defaults.
pub async fn evaluate_record<B: Backend>(
    backend: &B,
    prompt: &Prompt,
    schema: &Schema,
    record: &Record,
    timeout: Duration,
) -> AnswerSet {
    let user = prompt.user_message(&record.text);
    tracing::debug!(record = %record.id, backend = backend.name(), "dispatching");

    let reply = match backend.dispatch(&prompt.system, &user, timeout).await {
        Ok(reply) => reply,
        Err(error) => {
            tracing::warn!(
                record = %record.id,
                backend = backend.name(),
                kind = %error.kind(),
                %error,
                "dispatch failed; marking record as error"
            );
            return AnswerSet::all_error(schema);
        }
    };

    let raw = extract(&reply).unwrap_or_else(|| {
        tracing::debug!(record = %record.id, "reply had no answer object; defaulting to no");
        RawAnswers::new()
    });
    validate(&raw, schema)
}

/// Evaluate `records` against `schema` with at most
/// `options.concurrency_limit` records in flight.
///
/// `on_progress` runs once per record, in completion order, with that
/// record's final answers. It runs on the collecting task, so in-flight
/// records keep going while it executes. The result always has one slot per
/// input record, in input order.
pub async fn run<B, F>(
    records: Vec<Record>,
    schema: &Schema,
    backend: Arc<B>,
    options: &BatchOptions,
    mut on_progress: F,
) -> BatchResult
where
    B: Backend + 'static,
    F: FnMut(Progress, &AnswerSet),
{
    let total = records.len();
    let limit = options.concurrency_limit.max(1);
    let timeout = options.request_timeout;

    // Built once and shared read-only by every task.
    let prompt = Arc::new(prompt::build(schema));
    let shared_schema = Arc::new(schema.clone());
    let permits = Arc::new(Semaphore::new(limit));

    tracing::info!(records = total, concurrency = limit, backend = backend.name(), "batch started");

    let ids: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
    let mut tasks = JoinSet::new();
    let mut slot_of_task = HashMap::with_capacity(total);

    for (index, record) in records.into_iter().enumerate() {
        let backend = Arc::clone(&backend);
        let prompt = Arc::clone(&prompt);
        let schema = Arc::clone(&shared_schema);
        let permits = Arc::clone(&permits);

        let handle = tasks.spawn(async move {
            let Ok(_permit) = permits.acquire_owned().await else {
                return AnswerSet::all_error(&schema);
            };
            evaluate_record(backend.as_ref(), &prompt, &schema, &record, timeout).await
        });
        slot_of_task.insert(handle.id(), index);
    }

    let mut slots: Vec<Option<AnswerSet>> = vec![None; total];
    let mut completed = 0;

    while let Some(joined) = tasks.join_next_with_id().await {
        let (task_id, answers) = match joined {
            Ok((task_id, answers)) => (task_id, answers),
            Err(error) => {
                tracing::error!(%error, "record task aborted; marking record as error");
                (error.id(), AnswerSet::all_error(&shared_schema))
            }
        };

        let Some(&index) = slot_of_task.get(&task_id) else {
            tracing::error!(%task_id, "finished task has no slot");
            continue;
        };

        completed += 1;
        on_progress(
            Progress {
                index,
                completed,
                total,
            },
            &answers,
        );
        slots[index] = Some(answers);
    }

    let results: Vec<RecordResult> = ids
        .into_iter()
        .zip(slots)
        .map(|(id, answers)| RecordResult {
            id,
            answers: answers.unwrap_or_else(|| AnswerSet::all_error(&shared_schema)),
        })
        .collect();

    let batch = BatchResult::new(results);
    let summary = batch.summary();
    tracing::info!(
        records = summary.records,
        failed = summary.failed,
        yes = summary.yes,
        no = summary.no,
        "batch finished"
    );
    batch
}
