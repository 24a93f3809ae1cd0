//! Question-table configuration for the Herbwise wizard.
//!
//! The wizard is driven entirely by plain immutable data: a category table
//! (each category with its fixed sub-goal list) and an ordered list of
//! personal questions. The tables ship as builtins and can be overridden by
//! a TOML file at `~/.herbwise/questions.toml`.
//!
//! Every constructed config is validated for referential integrity before
//! the engine ever sees it, so a malformed table is a load-time error rather
//! than a runtime indexing bug.

mod builtin;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Question keys the report serializer claims for itself.
const RESERVED_KEYS: &[&str] = &["category", "sub_goal"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read question config at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse question config at {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid question config: {0}")]
    Invalid(String),
}

/// A wizard category and its fixed sub-goal option list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    /// Stable identifier recorded into reports (e.g. `"hair"`).
    pub id: String,
    /// Display label (e.g. `"Hair"`).
    pub label: String,
    pub sub_goals: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Free text, written on every edit, empty permitted.
    Input,
    /// Single select from `options`, with an implicit custom escape.
    Options,
}

/// One entry of the ordered personal-question list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersonalQuestion {
    /// Unique key this question's answer is recorded under.
    pub key: String,
    pub label: String,
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<String>,
}

/// The full immutable table set consumed by the wizard engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionConfig {
    categories: Vec<Category>,
    questions: Vec<PersonalQuestion>,
}

/// Location of the user's override file, if a home directory exists.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".herbwise").join("questions.toml"))
}

impl QuestionConfig {
    /// The embedded default tables.
    #[must_use]
    pub fn builtin() -> Self {
        builtin::tables()
    }

    /// Load the user's override file, falling back to the builtins when no
    /// override exists.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "no question config override, using builtins");
                Ok(Self::builtin())
            }
            None => {
                tracing::debug!("no home directory, using builtin question tables");
                Ok(Self::builtin())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded question config override");
        Ok(config)
    }

    /// Referential-integrity checks run on every loaded config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.is_empty() {
            return Err(ConfigError::Invalid("no categories defined".to_owned()));
        }
        let mut seen_categories = Vec::new();
        for category in &self.categories {
            if category.id.trim().is_empty() {
                return Err(ConfigError::Invalid("category with empty id".to_owned()));
            }
            if seen_categories.contains(&category.id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate category id {:?}",
                    category.id
                )));
            }
            seen_categories.push(category.id.as_str());
            if category.sub_goals.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "category {:?} has no sub-goals",
                    category.id
                )));
            }
            let mut seen_goals = Vec::new();
            for goal in &category.sub_goals {
                if seen_goals.contains(&goal.as_str()) {
                    return Err(ConfigError::Invalid(format!(
                        "category {:?} lists sub-goal {goal:?} twice",
                        category.id
                    )));
                }
                seen_goals.push(goal.as_str());
            }
        }

        let mut seen_keys = Vec::new();
        for question in &self.questions {
            if question.key.trim().is_empty() {
                return Err(ConfigError::Invalid("question with empty key".to_owned()));
            }
            if RESERVED_KEYS.contains(&question.key.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "question key {:?} is reserved",
                    question.key
                )));
            }
            if seen_keys.contains(&question.key.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate question key {:?}",
                    question.key
                )));
            }
            seen_keys.push(question.key.as_str());
            match question.kind {
                QuestionKind::Options if question.options.is_empty() => {
                    return Err(ConfigError::Invalid(format!(
                        "options question {:?} has no options",
                        question.key
                    )));
                }
                QuestionKind::Input if !question.options.is_empty() => {
                    return Err(ConfigError::Invalid(format!(
                        "input question {:?} must not list options",
                        question.key
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Categories in their configured (stable) order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn sub_goals(&self, id: &str) -> Option<&[String]> {
        self.category(id).map(|c| c.sub_goals.as_slice())
    }

    #[must_use]
    pub fn questions(&self) -> &[PersonalQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&PersonalQuestion> {
        self.questions.get(index)
    }
}
