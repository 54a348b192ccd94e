//! Batch scheduling against a scripted in-process backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use scan_backend::{Backend, DispatchError};
use scan_core::{Answer, AnswerSet, Record, Schema};
use scan_engine::{BatchOptions, Progress, run};
use tokio::time::Instant;

const BOTH_NO: &str = r#"{"Loop":"no","PIN":"no"}"#;

#[derive(Clone, Copy)]
enum Reply {
    Text(&'static str),
    Fail,
    Panic,
}

/// Backend whose behavior is keyed on the transcript text.
struct Scripted {
    replies: HashMap<&'static str, (Duration, Reply)>,
    latency: Duration,
    post_call_delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    systems: Mutex<Vec<String>>,
}

impl Scripted {
    fn new(latency: Duration) -> Self {
        Self {
            replies: HashMap::new(),
            latency,
            post_call_delay: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            systems: Mutex::new(Vec::new()),
        }
    }

    fn reply(mut self, transcript: &'static str, reply: Reply) -> Self {
        self.replies.insert(transcript, (self.latency, reply));
        self
    }

    fn reply_after(mut self, transcript: &'static str, latency: Duration, reply: Reply) -> Self {
        self.replies.insert(transcript, (latency, reply));
        self
    }
}

impl Backend for Scripted {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn dispatch(
        &self,
        system: &str,
        user: &str,
        timeout: Duration,
    ) -> Result<String, DispatchError> {
        self.systems.lock().unwrap().push(system.to_string());
        let transcript = user.rsplit("Transcript: ").next().unwrap_or_default();
        let (latency, reply) = self
            .replies
            .get(transcript)
            .copied()
            .unwrap_or((self.latency, Reply::Text(BOTH_NO)));

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(current, Ordering::SeqCst);
        tokio::time::sleep(latency).await;
        tokio::time::sleep(self.post_call_delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match reply {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::Fail => Err(DispatchError::Timeout(timeout)),
            Reply::Panic => panic!("scripted backend panic"),
        }
    }
}

fn schema() -> Schema {
    Schema::from_pairs([("Loop", "repeats"), ("PIN", "has commas")]).expect("schema")
}

fn records(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| Record::new(format!("call-{i}"), format!("t{i}")))
        .collect()
}

fn answers(loop_: Answer, pin: Answer) -> AnswerSet {
    [("Loop".to_string(), loop_), ("PIN".to_string(), pin)]
        .into_iter()
        .collect()
}

fn options(limit: usize) -> BatchOptions {
    BatchOptions {
        concurrency_limit: limit,
        ..BatchOptions::default()
    }
}

#[tokio::test(start_paused = true)]
async fn never_exceeds_concurrency_limit() {
    let backend = Arc::new(Scripted::new(Duration::from_millis(100)));
    let started = Instant::now();

    let result = run(records(10), &schema(), Arc::clone(&backend), &options(3), |_, _| {}).await;

    assert_eq!(result.len(), 10);
    assert_eq!(backend.peak.load(Ordering::SeqCst), 3);
    // ceil(10 / 3) waves of one call each.
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(400), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(500), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn limit_of_one_serializes_records() {
    let backend = Arc::new(Scripted::new(Duration::from_millis(10)));
    let result = run(records(5), &schema(), Arc::clone(&backend), &options(1), |_, _| {}).await;
    assert_eq!(result.len(), 5);
    assert_eq!(backend.peak.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn zero_limit_is_treated_as_one() {
    let backend = Arc::new(Scripted::new(Duration::from_millis(10)));
    let result = run(records(3), &schema(), Arc::clone(&backend), &options(0), |_, _| {}).await;
    assert_eq!(result.len(), 3);
    assert_eq!(backend.peak.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn post_call_delay_holds_the_slot() {
    let mut scripted = Scripted::new(Duration::from_millis(10));
    scripted.post_call_delay = Duration::from_millis(100);
    let backend = Arc::new(scripted);
    let started = Instant::now();

    run(records(4), &schema(), Arc::clone(&backend), &options(2), |_, _| {}).await;

    // Two waves of (call + pause); a slot freed at dispatch end would take ~120ms.
    assert!(started.elapsed() >= Duration::from_millis(220));
    assert_eq!(backend.peak.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn results_keep_input_order_when_completion_is_reversed() {
    let backend = Scripted::new(Duration::from_millis(10))
        .reply_after("t0", Duration::from_millis(300), Reply::Text(r#"{"Loop":"yes","PIN":"no"}"#))
        .reply_after("t1", Duration::from_millis(200), Reply::Text(r#"{"Loop":"no","PIN":"yes"}"#))
        .reply_after("t2", Duration::from_millis(100), Reply::Text(r#"{"Loop":"yes","PIN":"yes"}"#));

    let mut order = Vec::new();
    let result = run(records(3), &schema(), Arc::new(backend), &options(3), |p, _| {
        order.push(p.index);
    })
    .await;

    assert_eq!(order, vec![2, 1, 0]);
    let ids: Vec<&str> = result.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["call-0", "call-1", "call-2"]);
    assert_eq!(result.get(0).unwrap().answers, answers(Answer::Yes, Answer::No));
    assert_eq!(result.get(1).unwrap().answers, answers(Answer::No, Answer::Yes));
    assert_eq!(result.get(2).unwrap().answers, answers(Answer::Yes, Answer::Yes));
}

#[tokio::test(start_paused = true)]
async fn progress_fires_once_per_record_with_final_answers() {
    let backend = Scripted::new(Duration::from_millis(10))
        .reply("t1", Reply::Fail)
        .reply("t3", Reply::Text(r#"{"Loop":"YES"}"#));

    let mut events: Vec<(Progress, AnswerSet)> = Vec::new();
    let result = run(records(5), &schema(), Arc::new(backend), &options(2), |p, a| {
        events.push((p, a.clone()));
    })
    .await;

    assert_eq!(events.len(), 5);
    let mut indices: Vec<usize> = events.iter().map(|(p, _)| p.index).collect();
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);

    for (n, (progress, answers)) in events.iter().enumerate() {
        assert_eq!(progress.completed, n + 1);
        assert_eq!(progress.total, 5);
        assert_eq!(&result.get(progress.index).unwrap().answers, answers);
    }
}

#[tokio::test(start_paused = true)]
async fn failed_dispatch_is_isolated_to_its_record() {
    let backend = Scripted::new(Duration::from_millis(10))
        .reply("t0", Reply::Text(r#"{"Loop":"yes","PIN":"no"}"#))
        .reply("t2", Reply::Fail)
        .reply("t4", Reply::Text(r#"{"Loop":"no","PIN":"yes"}"#));

    let result = run(records(5), &schema(), Arc::new(backend), &options(2), |_, _| {}).await;

    assert_eq!(result.get(0).unwrap().answers, answers(Answer::Yes, Answer::No));
    assert_eq!(result.get(1).unwrap().answers, answers(Answer::No, Answer::No));
    assert_eq!(result.get(2).unwrap().answers, answers(Answer::Error, Answer::Error));
    assert_eq!(result.get(3).unwrap().answers, answers(Answer::No, Answer::No));
    assert_eq!(result.get(4).unwrap().answers, answers(Answer::No, Answer::Yes));
    assert_eq!(result.summary().failed, 1);
}

#[tokio::test(start_paused = true)]
async fn panicking_record_resolves_to_error() {
    let backend = Scripted::new(Duration::from_millis(10))
        .reply("t1", Reply::Panic)
        .reply("t2", Reply::Text(r#"{"Loop":"yes","PIN":"yes"}"#));

    let mut seen = Vec::new();
    let result = run(records(3), &schema(), Arc::new(backend), &options(1), |p, a| {
        seen.push((p.index, a.is_failed()));
    })
    .await;

    assert_eq!(result.len(), 3);
    assert!(result.get(1).unwrap().answers.is_failed());
    assert_eq!(result.get(2).unwrap().answers, answers(Answer::Yes, Answer::Yes));
    seen.sort_unstable();
    assert_eq!(seen, vec![(0, false), (1, true), (2, false)]);
}

#[tokio::test(start_paused = true)]
async fn unusable_reply_is_no_not_error() {
    let backend = Scripted::new(Duration::from_millis(10))
        .reply("t0", Reply::Text("I could not decide."))
        .reply("t1", Reply::Fail);

    let result = run(records(2), &schema(), Arc::new(backend), &options(2), |_, _| {}).await;

    assert_eq!(result.get(0).unwrap().answers, answers(Answer::No, Answer::No));
    assert_eq!(result.get(1).unwrap().answers, answers(Answer::Error, Answer::Error));
}

#[tokio::test(start_paused = true)]
async fn every_record_receives_the_same_system_message() {
    let backend = Arc::new(Scripted::new(Duration::from_millis(5)));
    run(records(4), &schema(), Arc::clone(&backend), &options(4), |_, _| {}).await;

    let systems = backend.systems.lock().unwrap();
    assert_eq!(systems.len(), 4);
    assert!(systems.iter().all(|s| s == &systems[0]));
    assert!(systems[0].contains("\"Loop\": \"repeats\""));
}
