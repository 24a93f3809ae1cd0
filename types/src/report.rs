//! Terminal wizard output.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::AnswerRecord;

/// Immutable snapshot produced at the wizard's terminal step.
///
/// Serializes to a flat string-valued mapping:
/// `{ "category": ..., "sub_goal": ..., <question key>: <answer>, ... }`.
/// There is no mutation API; a new report requires a full wizard restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    category: String,
    sub_goal: String,
    answers: AnswerRecord,
}

impl Report {
    #[must_use]
    pub fn new(category: impl Into<String>, sub_goal: impl Into<String>, answers: AnswerRecord) -> Self {
        Self {
            category: category.into(),
            sub_goal: sub_goal.into(),
            answers,
        }
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn sub_goal(&self) -> &str {
        &self.sub_goal
    }

    #[must_use]
    pub fn answer(&self, key: &str) -> Option<&str> {
        self.answers.get(key)
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + self.answers.len()))?;
        map.serialize_entry("category", &self.category)?;
        map.serialize_entry("sub_goal", &self.sub_goal)?;
        for (key, value) in self.answers.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
