//! Instruction payload generation.
//!
//! The system message lists every criterion as a key of the JSON object the
//! backend must return, with the description standing in for the value. That
//! single block is both the criteria list and the required output shape, so
//! each name and each description appears exactly once, in schema order.

use std::fmt::Write as _;

use scan_core::Schema;

const PREAMBLE: &str = "You are an assistant that reviews call transcripts. \
Read the transcript in the user message and evaluate it against each criterion below. \
Each key is a criterion name and its value describes what to look for.";

const RULES: &str = "Instructions:
- Reply with a single flat JSON object that has exactly the keys above, in the same order.
- Replace each description with \"yes\" or \"no\". No other values are allowed.
- Answer \"no\" when the transcript gives no evidence either way.
- Return ONLY the JSON object: no explanations, no markdown, no code fences.";

const INSTRUCTIONS: &str =
    "Evaluate the following transcript and reply with the JSON object only.";

/// System message plus the user-side instructions for one schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub instructions: String,
}

impl Prompt {
    /// User message for one transcript.
    #[must_use]
    pub fn user_message(&self, transcript: &str) -> String {
        format!("{}\n\nTranscript: {transcript}", self.instructions)
    }
}

/// Build the prompt for `schema`. Pure and deterministic.
#[must_use]
pub fn build(schema: &Schema) -> Prompt {
    let mut system = String::with_capacity(PREAMBLE.len() + RULES.len() + 128 * schema.len());
    system.push_str(PREAMBLE);
    system.push_str("\n\nCriteria:\n{\n");

    let last = schema.len() - 1;
    for (index, criterion) in schema.criteria().iter().enumerate() {
        let separator = if index == last { "" } else { "," };
        // Writing to a String cannot fail.
        let _ = writeln!(
            system,
            "  {}: {}{separator}",
            quoted(&criterion.name),
            quoted(&criterion.description)
        );
    }

    system.push_str("}\n\n");
    system.push_str(RULES);

    Prompt {
        system,
        instructions: INSTRUCTIONS.to_string(),
    }
}

/// JSON string literal for `text`, so quotes and line breaks in criteria keep
/// the block parseable.
fn quoted(text: &str) -> String {
    serde_json::Value::from(text).to_string()
}
