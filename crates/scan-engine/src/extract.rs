//! Tolerant recovery of the answer object from free-form backend output.
//!
//! Backends are told to reply with bare JSON but routinely wrap it in code
//! fences, language tags or explanatory prose. Extraction peels those layers
//! off and parses the first balanced object it can find. Failing to find one
//! is an ordinary outcome, reported as `None`.

use std::sync::LazyLock;

use regex::Regex;
use scan_core::RawAnswers;
use serde_json::Value;

/// A whole reply wrapped in a fenced block, with an optional language tag.
static FENCED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^```[A-Za-z0-9_+-]*[ \t]*\r?\n?(.*?)\s*```").expect("valid fence pattern")
});

/// Stray leading backticks and a leading `json` tag.
static LEADING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^`*\s*(?:json\b)?\s*").expect("valid tag pattern"));

/// First object with balanced braces, allowing one level of nesting.
static OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{[^{}]*(?:\{[^{}]*\}[^{}]*)*\}").expect("valid object pattern")
});

/// Recover a `name -> answer` map from raw backend text.
///
/// String values are kept as-is, numbers and booleans are stringified, and
/// nulls, arrays and nested objects are dropped. Returns `None` when no
/// parseable object is present.
#[must_use]
pub fn extract(raw: &str) -> Option<RawAnswers> {
    let candidate = locate_object(raw);

    let object = match serde_json::from_str::<serde_json::Map<String, Value>>(candidate) {
        Ok(object) => object,
        Err(error) => {
            tracing::debug!(%error, "no parseable answer object in backend output");
            return None;
        }
    };

    Some(
        object
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(text) => Some((key, text)),
                Value::Bool(_) | Value::Number(_) => Some((key, value.to_string())),
                Value::Null | Value::Array(_) | Value::Object(_) => None,
            })
            .collect(),
    )
}

/// Strip fences and tags, then narrow to the first balanced object.
fn locate_object(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(inner) = FENCED.captures(text).and_then(|c| c.get(1)) {
        text = inner.as_str();
    }

    let tag_end = LEADING_TAG.find(text).map_or(0, |m| m.end());
    text = text[tag_end..].trim_end_matches('`').trim();

    OBJECT.find(text).map_or(text, |m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn map(pairs: &[(&str, &str)]) -> RawAnswers {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn fenced_block_with_language_tag() {
        let raw = "```json\n{\"Loop\":\"YES\",\"PIN\":\"no\"}\n```";
        assert_eq!(extract(raw), Some(map(&[("Loop", "YES"), ("PIN", "no")])));
    }

    #[rstest]
    #[case::bare(r#"{"Loop":"yes"}"#)]
    #[case::padded("  \n {\"Loop\":\"yes\"} \n")]
    #[case::fence_without_tag("```\n{\"Loop\":\"yes\"}\n```")]
    #[case::fence_on_one_line("```json {\"Loop\":\"yes\"}```")]
    #[case::stray_backticks("`{\"Loop\":\"yes\"}`")]
    #[case::bare_tag("json\n{\"Loop\":\"yes\"}")]
    #[case::leading_prose("Sure! Here is the analysis:\n{\"Loop\":\"yes\"}\nLet me know if you need more.")]
    #[case::prose_then_fence("Result:\n```json\n{\"Loop\":\"yes\"}\n```")]
    #[case::multiline_object("{\n  \"Loop\": \"yes\"\n}")]
    fn recovers_object_through_noise(#[case] raw: &str) {
        assert_eq!(extract(raw), Some(map(&[("Loop", "yes")])));
    }

    #[test]
    fn first_balanced_object_wins() {
        let raw = r#"draft: {"Loop":"no"} final: {"Loop":"yes"}"#;
        assert_eq!(extract(raw), Some(map(&[("Loop", "no")])));
    }

    #[test]
    fn one_level_of_nesting_is_supported() {
        let raw = r#"{"Loop":"yes","meta":{"confidence":"high"}}"#;
        // The nested object itself is dropped from the raw map.
        assert_eq!(extract(raw), Some(map(&[("Loop", "yes")])));
    }

    #[test]
    fn scalars_are_stringified() {
        let raw = r#"{"Loop":true,"PIN":0,"Date":null,"Name":["yes"]}"#;
        assert_eq!(extract(raw), Some(map(&[("Loop", "true"), ("PIN", "0")])));
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   \n\t ")]
    #[case::prose_only("I could not determine any of the criteria.")]
    #[case::unbalanced_open(r#"{"Loop":"yes""#)]
    #[case::unbalanced_close(r#""Loop":"yes"}}"#)]
    #[case::broken_json(r#"{"Loop": yes}"#)]
    #[case::array(r#"["yes","no"]"#)]
    #[case::unterminated_fence("```json\n{\"Loop\":")]
    #[case::only_backticks("``````")]
    fn unusable_output_is_none(#[case] raw: &str) {
        assert_eq!(extract(raw), None);
    }

    #[test]
    fn braces_inside_prose_do_not_panic() {
        for raw in ["}{", "{{{{", "}}}}", "{a}{b}", "```}```", "json", "`"] {
            let _ = extract(raw);
        }
    }
}
