//! # scan-engine
//!
//! Annotation engine for callscan.
//!
//! One record flows through four stages:
//! 1. [`prompt::build`] turns the schema into a system message, once per batch
//! 2. a [`Backend`](scan_backend::Backend) returns free-form text
//! 3. [`extract::extract`] recovers the answer object from that text
//! 4. [`validate::validate`] forces it onto the schema's key set and vocabulary
//!
//! [`batch::run`] drives many records through these stages concurrently.

pub mod batch;
pub mod extract;
pub mod prompt;
pub mod validate;

pub use batch::{BatchOptions, Progress, evaluate_record, run};
pub use extract::extract;
pub use prompt::{Prompt, build};
pub use validate::validate;
