//! # scan-core
//!
//! Core types and error types for callscan.
//!
//! This crate provides the foundational types shared across all callscan crates:
//! - Criteria and the ordered schema that drives a batch run
//! - The fixed answer vocabulary and schema-complete answer sets
//! - Records and the index-stable batch result
//! - Schema validation errors

pub mod answer;
pub mod errors;
pub mod record;
pub mod schema;

pub use answer::{Answer, AnswerSet, RawAnswers};
pub use errors::CoreError;
pub use record::{BatchResult, BatchSummary, Record, RecordResult};
pub use schema::{Criterion, Schema};
