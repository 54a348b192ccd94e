//! Normalization of extracted answers against the schema.

use scan_core::{Answer, AnswerSet, RawAnswers, Schema};

/// Produce a schema-complete answer set from whatever the backend returned.
///
/// Walks the schema in order. A key whose value reads as `yes` or `no`
/// (case-insensitive, surrounding whitespace ignored) keeps that judgment;
/// a missing key or any other value becomes `no`, never `yes`. Keys the
/// schema does not name are ignored. Never fails.
#[must_use]
pub fn validate(raw: &RawAnswers, schema: &Schema) -> AnswerSet {
    schema
        .names()
        .map(|name| {
            let answer = raw
                .get(name)
                .and_then(|value| Answer::from_judgment(value))
                .unwrap_or(Answer::No);
            (name.to_string(), answer)
        })
        .collect()
}
