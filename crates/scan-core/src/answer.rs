//! The answer vocabulary and schema-complete answer sets.
//!
//! `yes`/`no` are judgments produced by a backend (or the `no` default applied
//! to unusable content). `error` is reserved for records whose backend call
//! itself failed, so the two failure modes stay observably different.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::schema::Schema;

/// Untyped `criterion name -> answer text` map recovered from backend output.
pub type RawAnswers = HashMap<String, String>;

/// One value of the fixed answer vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
    Error,
}

impl Answer {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Error => "error",
        }
    }

    /// Interpret backend text as a judgment.
    ///
    /// Only `yes` and `no` (case-insensitive, surrounding whitespace ignored)
    /// are judgments; everything else, including the literal `error`, is not.
    #[must_use]
    pub fn from_judgment(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("yes") {
            Some(Self::Yes)
        } else if text.eq_ignore_ascii_case("no") {
            Some(Self::No)
        } else {
            None
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answers for one record, keyed by criterion name in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnswerSet {
    entries: Vec<(String, Answer)>,
}

impl AnswerSet {
    /// Every criterion of `schema` mapped to [`Answer::Error`].
    #[must_use]
    pub fn all_error(schema: &Schema) -> Self {
        schema
            .names()
            .map(|name| (name.to_string(), Answer::Error))
            .collect()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Answer> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, answer)| *answer)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Answer)> {
        self.entries
            .iter()
            .map(|(name, answer)| (name.as_str(), *answer))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of criteria holding `answer`.
    #[must_use]
    pub fn count(&self, answer: Answer) -> usize {
        self.entries.iter().filter(|(_, a)| *a == answer).count()
    }

    /// True when the backend call failed for this record.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        !self.entries.is_empty() && self.count(Answer::Error) == self.entries.len()
    }

    /// Reinterpret this set as raw backend output.
    #[must_use]
    pub fn to_raw(&self) -> RawAnswers {
        self.entries
            .iter()
            .map(|(name, answer)| (name.clone(), answer.as_str().to_string()))
            .collect()
    }
}

impl FromIterator<(String, Answer)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (String, Answer)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for AnswerSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, answer) in &self.entries {
            map.serialize_entry(name, answer)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AnswerSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AnswerSetVisitor;

        impl<'de> Visitor<'de> for AnswerSetVisitor {
            type Value = AnswerSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of criterion names to yes/no/error")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<AnswerSet, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, answer)) = access.next_entry::<String, Answer>()? {
                    entries.push((name, answer));
                }
                Ok(AnswerSet { entries })
            }
        }

        deserializer.deserialize_map(AnswerSetVisitor)
    }
}
