//! Criteria and the ordered schema that drives prompts and answer validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// One named yes/no question with a natural-language description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Criterion {
    pub name: String,
    pub description: String,
}

impl Criterion {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Ordered, non-empty set of uniquely named criteria.
///
/// Insertion order is preserved and determines both the key order of the
/// generated prompt and the column order of every answer set. A `Schema` can
/// only be obtained through [`Schema::new`] (or deserialization, which goes
/// through it), so holding one means the invariants already hold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "SchemaDef", into = "SchemaDef")]
pub struct Schema {
    criteria: Vec<Criterion>,
}

/// Wire form of a schema file: `[[criteria]]` tables in TOML.
#[derive(Serialize, Deserialize)]
struct SchemaDef {
    criteria: Vec<Criterion>,
}

impl TryFrom<SchemaDef> for Schema {
    type Error = CoreError;

    fn try_from(def: SchemaDef) -> Result<Self, Self::Error> {
        Self::new(def.criteria)
    }
}

impl From<Schema> for SchemaDef {
    fn from(schema: Schema) -> Self {
        Self {
            criteria: schema.criteria,
        }
    }
}

impl Schema {
    /// Build a schema, rejecting empty collections, blank fields and
    /// duplicate names.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] naming the first violated constraint.
    pub fn new(criteria: Vec<Criterion>) -> Result<Self, CoreError> {
        if criteria.is_empty() {
            return Err(CoreError::EmptySchema);
        }

        let mut seen = HashSet::with_capacity(criteria.len());
        for criterion in &criteria {
            if criterion.name.trim().is_empty() {
                return Err(CoreError::InvalidCriterion {
                    name: criterion.name.clone(),
                    reason: "name must not be empty".into(),
                });
            }
            if criterion.description.trim().is_empty() {
                return Err(CoreError::InvalidCriterion {
                    name: criterion.name.clone(),
                    reason: "description must not be empty".into(),
                });
            }
            if !seen.insert(criterion.name.as_str()) {
                return Err(CoreError::DuplicateCriterion(criterion.name.clone()));
            }
        }

        Ok(Self { criteria })
    }

    /// Build a schema from `(name, description)` pairs.
    ///
    /// # Errors
    ///
    /// Same constraints as [`Schema::new`].
    pub fn from_pairs<N, D>(pairs: impl IntoIterator<Item = (N, D)>) -> Result<Self, CoreError>
    where
        N: Into<String>,
        D: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(name, description)| Criterion::new(name, description))
                .collect(),
        )
    }

    /// The built-in call review schema used when no schema file is supplied.
    #[must_use]
    pub fn call_review() -> Self {
        let criteria = CALL_REVIEW
            .iter()
            .map(|(name, description)| Criterion::new(*name, *description))
            .collect();
        Self { criteria }
    }

    #[must_use]
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Criterion names in schema order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.criteria.iter().map(|c| c.name.as_str())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Always false for a constructed schema; provided for clippy's `len_without_is_empty`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

const CALL_REVIEW: &[(&str, &str)] = &[
    (
        "Loop",
        "Identify any instances where the assistant repeats the same message content 3 or more times consecutively, excluding 'No Content' responses. This indicates a potential conversation loop. Return yes if a loop exists.",
    ),
    (
        "OffTopic",
        "Detect when the assistant provides responses that are contextually inappropriate, particularly focusing on cases where variables are mentioned out of context or the conversation drastically deviates from the expected flow. Return yes if the assistant goes off topic, otherwise no.",
    ),
    (
        "Date",
        "Validate that all date variables strictly follow the DD/Mon/YYYY format, where Mon must be a three-letter abbreviation (e.g., 15/Jan/2024). Return yes if any date is not in the given format, no if all are.",
    ),
    (
        "Name",
        "Ensure all names are properly capitalized in Title Case format (e.g., 'John Smith' not 'JOHN SMITH' or 'john smith'). Return yes if any name is not in title case, otherwise no.",
    ),
    (
        "Currency",
        "Verify that all currency amounts use proper Indian number formatting with appropriate comma placement (e.g., 1,00,000 for one lakh, 25,000 for twenty-five thousand). Return yes if any currency amount is not in Indian format, otherwise no.",
    ),
    (
        "PIN",
        "Identify any PIN codes that incorrectly contain commas. PIN codes should be continuous 6-digit numbers without any separators. Return yes if a PIN has commas, otherwise no.",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn preserves_insertion_order() {
        let schema = Schema::from_pairs([("Zeta", "last letter"), ("Alpha", "first letter")])
            .expect("valid schema");
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn rejects_empty_schema() {
        assert_eq!(Schema::new(Vec::new()), Err(CoreError::EmptySchema));
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = Schema::from_pairs([("Loop", "a"), ("PIN", "b"), ("Loop", "c")]).unwrap_err();
        assert_eq!(err, CoreError::DuplicateCriterion("Loop".into()));
    }

    #[test]
    fn rejects_blank_fields() {
        let err = Schema::from_pairs([("  ", "desc")]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidCriterion { .. }));

        let err = Schema::from_pairs([("Loop", "")]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidCriterion { ref name, .. } if name == "Loop"));
    }

    #[test]
    fn call_review_has_six_criteria() {
        let schema = Schema::call_review();
        assert_eq!(
            schema.names().collect::<Vec<_>>(),
            vec!["Loop", "OffTopic", "Date", "Name", "Currency", "PIN"]
        );
        // The built-in set must satisfy its own constructor.
        assert!(Schema::new(schema.criteria().to_vec()).is_ok());
    }

    #[test]
    fn deserialization_validates() {
        let ok: Schema = serde_json::from_str(
            r#"{"criteria":[{"name":"Loop","description":"repeats"}]}"#,
        )
        .expect("valid schema json");
        assert_eq!(ok.len(), 1);

        let dup = serde_json::from_str::<Schema>(
            r#"{"criteria":[{"name":"A","description":"x"},{"name":"A","description":"y"}]}"#,
        );
        assert!(dup.is_err());

        let empty = serde_json::from_str::<Schema>(r#"{"criteria":[]}"#);
        assert!(empty.is_err());
    }
}
