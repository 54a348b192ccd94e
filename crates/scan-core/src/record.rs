//! Input records and the index-stable batch result.

use serde::{Deserialize, Serialize};

use crate::answer::{Answer, AnswerSet};

/// One transcript to annotate, with its externally supplied identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub text: String,
}

impl Record {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Final answers for one record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordResult {
    pub id: String,
    pub answers: AnswerSet,
}

/// Answers for a whole batch, slot `i` belonging to input record `i`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct BatchResult {
    results: Vec<RecordResult>,
}

/// Aggregate counts over a batch result.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchSummary {
    /// Records in the batch.
    pub records: usize,
    /// Records whose backend call failed.
    pub failed: usize,
    /// Criterion answers that came back `yes`.
    pub yes: usize,
    /// Criterion answers that came back (or defaulted to) `no`.
    pub no: usize,
}

impl BatchResult {
    #[must_use]
    pub const fn new(results: Vec<RecordResult>) -> Self {
        Self { results }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&RecordResult> {
        self.results.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecordResult> {
        self.results.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<RecordResult> {
        self.results
    }

    #[must_use]
    pub fn summary(&self) -> BatchSummary {
        self.results
            .iter()
            .fold(BatchSummary::default(), |mut acc, result| {
                acc.records += 1;
                if result.answers.is_failed() {
                    acc.failed += 1;
                }
                acc.yes += result.answers.count(Answer::Yes);
                acc.no += result.answers.count(Answer::No);
                acc
            })
    }
}

impl<'a> IntoIterator for &'a BatchResult {
    type Item = &'a RecordResult;
    type IntoIter = std::slice::Iter<'a, RecordResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
