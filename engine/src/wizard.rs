//! The wizard step machine.

use std::sync::Arc;

use thiserror::Error;

use herbwise_config::{Category, PersonalQuestion, QuestionConfig, QuestionKind};
use herbwise_types::{AnswerRecord, Report};

/// Steps before the personal-question block (category, sub-goal).
const LEAD_STEPS: usize = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("not at the category step")]
    NotAtCategory,
    #[error("not at the sub-goal step")]
    NotAtSubGoal,
    #[error("not at a personal question")]
    NotAtQuestion,
    #[error("not at the confirmation step")]
    NotAtConfirm,
    #[error("unknown category {0:?}")]
    UnknownCategory(String),
    #[error("{value:?} is not a sub-goal of {category:?}")]
    UnknownSubGoal { category: String, value: String },
    #[error("{value:?} is not a listed option of {key:?}")]
    UnknownOption { key: String, value: String },
    #[error("question {0:?} takes free text, not a listed option")]
    NotAnOptionsQuestion(String),
    #[error("question {0:?} takes a listed option, not free text")]
    NotAnInputQuestion(String),
}

/// What the wizard is currently showing.
///
/// Views render only the entries this carries, so an out-of-table selection
/// is impossible to produce from a well-behaved surface; the engine still
/// re-validates every recorded value against the configuration.
#[derive(Debug)]
pub enum WizardStep<'a> {
    /// Step 0: pick a category.
    Category { options: &'a [Category] },
    /// Step 1: pick one of the chosen category's sub-goals.
    SubGoal { category: &'a Category },
    /// Steps 2..N+2: one personal question per step.
    Question {
        index: usize,
        question: &'a PersonalQuestion,
    },
    /// Step N+2: confirm and generate the report.
    Confirm,
    /// Terminal: a report exists; only restart leaves this state.
    Done { report: &'a Report },
}

/// Linear-with-branches step sequencer over the question tables.
///
/// Created at wizard start, mutated only through the transition methods,
/// and reset wholesale by [`Self::restart`].
#[derive(Debug)]
pub struct Wizard {
    config: Arc<QuestionConfig>,
    step: usize,
    category: Option<String>,
    sub_goal: Option<String>,
    answers: AnswerRecord,
    report: Option<Report>,
}

impl Wizard {
    #[must_use]
    pub fn new(config: Arc<QuestionConfig>) -> Self {
        tracing::debug!("wizard started");
        Self {
            config,
            step: 0,
            category: None,
            sub_goal: None,
            answers: AnswerRecord::new(),
            report: None,
        }
    }

    /// The view for the current step.
    #[must_use]
    pub fn current_step(&self) -> WizardStep<'_> {
        if let Some(report) = &self.report {
            return WizardStep::Done { report };
        }
        match self.step {
            0 => WizardStep::Category {
                options: self.config.categories(),
            },
            1 => WizardStep::SubGoal {
                category: self.chosen_category(),
            },
            s if s - LEAD_STEPS < self.config.questions().len() => {
                let index = s - LEAD_STEPS;
                WizardStep::Question {
                    index,
                    question: self
                        .config
                        .question(index)
                        .expect("index bounded by questions().len()"),
                }
            }
            _ => WizardStep::Confirm,
        }
    }

    /// One-based progress `(current, total)` for display.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (
            self.step + 1,
            self.config.questions().len() + LEAD_STEPS + 1,
        )
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub fn sub_goal(&self) -> Option<&str> {
        self.sub_goal.as_deref()
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    #[must_use]
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// Record the category and advance to sub-goal selection.
    ///
    /// Choosing a different category than before invalidates any previously
    /// chosen sub-goal.
    pub fn select_category(&mut self, id: &str) -> Result<(), WizardError> {
        if self.step != 0 || self.report.is_some() {
            return Err(WizardError::NotAtCategory);
        }
        if self.config.category(id).is_none() {
            return Err(WizardError::UnknownCategory(id.to_owned()));
        }
        if self.category.as_deref() != Some(id) {
            self.sub_goal = None;
        }
        self.category = Some(id.to_owned());
        self.step = 1;
        tracing::debug!(category = id, "category selected");
        Ok(())
    }

    /// Record the sub-goal and advance to the first personal question.
    pub fn select_sub_goal(&mut self, value: &str) -> Result<(), WizardError> {
        if self.step != 1 || self.report.is_some() {
            return Err(WizardError::NotAtSubGoal);
        }
        let category = self.chosen_category();
        if !category.sub_goals.iter().any(|goal| goal == value) {
            return Err(WizardError::UnknownSubGoal {
                category: category.id.clone(),
                value: value.to_owned(),
            });
        }
        self.sub_goal = Some(value.to_owned());
        self.step = 2;
        Ok(())
    }

    /// Write free text for the current `input` question.
    ///
    /// Called on every edit; does not advance. Empty text is permitted.
    pub fn set_answer(&mut self, text: &str) -> Result<(), WizardError> {
        let question = self.current_question()?;
        if question.kind != QuestionKind::Input {
            return Err(WizardError::NotAnInputQuestion(question.key.clone()));
        }
        let key = question.key.clone();
        self.answers.record(key, text);
        Ok(())
    }

    /// Record a listed option for the current `options` question and advance
    /// in one operation (there is no separate "next" for option selects).
    pub fn select_option(&mut self, option: &str) -> Result<(), WizardError> {
        let question = self.current_question()?;
        if question.kind != QuestionKind::Options {
            return Err(WizardError::NotAnOptionsQuestion(question.key.clone()));
        }
        if !question.options.iter().any(|o| o == option) {
            return Err(WizardError::UnknownOption {
                key: question.key.clone(),
                value: option.to_owned(),
            });
        }
        let key = question.key.clone();
        self.answers.record(key, option);
        self.step += 1;
        Ok(())
    }

    /// Submit custom free text for the current `options` question.
    ///
    /// Non-empty text overwrites any previously selected listed option for
    /// the same key and advances; empty text is a no-op and the step is
    /// unchanged. Returns whether the wizard advanced.
    pub fn submit_custom(&mut self, text: &str) -> Result<bool, WizardError> {
        let question = self.current_question()?;
        if question.kind != QuestionKind::Options {
            return Err(WizardError::NotAnOptionsQuestion(question.key.clone()));
        }
        if text.trim().is_empty() {
            return Ok(false);
        }
        let key = question.key.clone();
        self.answers.record(key, text.trim());
        self.step += 1;
        Ok(true)
    }

    /// Advance one step where an explicit "next" is meaningful: past an
    /// `input` question (unvalidated, empty answers permitted), or past the
    /// category/sub-goal steps when a choice is already recorded. Anywhere
    /// else this is a no-op.
    pub fn next(&mut self) {
        if self.report.is_some() {
            return;
        }
        let advance = match self.current_step() {
            WizardStep::Category { .. } => self.category.is_some(),
            WizardStep::SubGoal { .. } => self.sub_goal.is_some(),
            WizardStep::Question { question, .. } => question.kind == QuestionKind::Input,
            WizardStep::Confirm | WizardStep::Done { .. } => false,
        };
        if advance {
            self.step += 1;
        }
    }

    /// Step backwards, floored at the initial step. Recorded answers are
    /// kept. From the terminal report state this is a no-op.
    pub fn back(&mut self) {
        if self.report.is_some() {
            return;
        }
        self.step = self.step.saturating_sub(1);
    }

    /// Snapshot the accumulated state into an immutable report and enter the
    /// terminal state.
    pub fn generate_report(&mut self) -> Result<&Report, WizardError> {
        if self.report.is_some() {
            return Err(WizardError::NotAtConfirm);
        }
        let (Some(category), Some(sub_goal)) = (&self.category, &self.sub_goal) else {
            return Err(WizardError::NotAtConfirm);
        };
        if self.step != self.config.questions().len() + LEAD_STEPS {
            return Err(WizardError::NotAtConfirm);
        }
        let report = Report::new(category.clone(), sub_goal.clone(), self.answers.clone());
        tracing::debug!(%category, %sub_goal, "report generated");
        Ok(self.report.insert(report))
    }

    /// Discard everything and return to the initial step.
    pub fn restart(&mut self) {
        self.step = 0;
        self.category = None;
        self.sub_goal = None;
        self.answers.clear();
        self.report = None;
        tracing::debug!("wizard restarted");
    }

    fn current_question(&self) -> Result<&PersonalQuestion, WizardError> {
        if self.report.is_some() || self.step < LEAD_STEPS {
            return Err(WizardError::NotAtQuestion);
        }
        self.config
            .question(self.step - LEAD_STEPS)
            .ok_or(WizardError::NotAtQuestion)
    }

    fn chosen_category(&self) -> &Category {
        let id = self
            .category
            .as_deref()
            .expect("category is recorded before advancing past step 0");
        self.config
            .category(id)
            .expect("recorded category ids come from the config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wizard() -> Wizard {
        Wizard::new(Arc::new(QuestionConfig::builtin()))
    }

    /// Drive a fresh wizard to the first personal question.
    fn at_first_question() -> Wizard {
        let mut w = wizard();
        w.select_category("hair").unwrap();
        w.select_sub_goal("Dandruff").unwrap();
        w
    }

    #[test]
    fn initial_state() {
        let w = wizard();
        assert!(matches!(w.current_step(), WizardStep::Category { .. }));
        assert_eq!(w.position().0, 1);
        assert!(w.category().is_none());
        assert!(w.answers().is_empty());
    }

    #[test]
    fn category_must_exist() {
        let mut w = wizard();
        assert_eq!(
            w.select_category("chakras"),
            Err(WizardError::UnknownCategory("chakras".to_owned()))
        );
        assert!(w.select_category("skin").is_ok());
        assert!(matches!(w.current_step(), WizardStep::SubGoal { .. }));
    }

    #[test]
    fn sub_goal_must_belong_to_category() {
        let mut w = wizard();
        w.select_category("hair").unwrap();
        assert!(matches!(
            w.select_sub_goal("Acne"),
            Err(WizardError::UnknownSubGoal { .. })
        ));
        w.select_sub_goal("Dandruff").unwrap();
        assert_eq!(w.sub_goal(), Some("Dandruff"));
    }

    #[test]
    fn changing_category_invalidates_sub_goal() {
        let mut w = at_first_question();
        w.back();
        w.back();
        assert!(matches!(w.current_step(), WizardStep::Category { .. }));
        w.select_category("skin").unwrap();
        assert_eq!(w.sub_goal(), None);
        // Re-selecting the same category keeps it.
        w.back();
        w.select_category("skin").unwrap();
        w.select_sub_goal("Acne").unwrap();
        w.back();
        w.back();
        w.select_category("skin").unwrap();
        assert_eq!(w.sub_goal(), Some("Acne"));
    }

    #[test]
    fn option_select_advances_immediately() {
        let mut w = at_first_question();
        let before = w.position().0;
        w.select_option("18-30").unwrap();
        assert_eq!(w.position().0, before + 1);
        assert_eq!(w.answers().get("age_group"), Some("18-30"));
    }

    #[test]
    fn unlisted_option_is_rejected() {
        let mut w = at_first_question();
        assert!(matches!(
            w.select_option("Ageless"),
            Err(WizardError::UnknownOption { .. })
        ));
    }

    #[test]
    fn empty_custom_submit_is_a_no_op() {
        let mut w = at_first_question();
        let before = w.position().0;
        assert_eq!(w.submit_custom("   "), Ok(false));
        assert_eq!(w.position().0, before);
        assert!(w.answers().is_empty());
    }

    #[test]
    fn custom_text_overrides_listed_option() {
        let mut w = at_first_question();
        w.select_option("18-30").unwrap();
        w.back();
        assert_eq!(w.submit_custom("Prefer not to say"), Ok(true));
        assert_eq!(w.answers().get("age_group"), Some("Prefer not to say"));
        assert_eq!(w.answers().len(), 1);
    }

    #[test]
    fn input_question_allows_empty_and_explicit_next() {
        let mut w = at_first_question();
        // Walk to the first input question (conditions).
        w.select_option("18-30").unwrap();
        w.select_option("Mixed").unwrap();
        w.select_option("7+ hours").unwrap();
        w.select_option("Moderate").unwrap();
        let WizardStep::Question { question, .. } = w.current_step() else {
            panic!("expected a question step");
        };
        assert_eq!(question.key, "conditions");
        assert!(matches!(
            w.select_option("None"),
            Err(WizardError::NotAnOptionsQuestion(_))
        ));
        w.set_answer("").unwrap();
        let before = w.position().0;
        w.next();
        assert_eq!(w.position().0, before + 1);
    }

    #[test]
    fn back_floors_at_step_zero() {
        let mut w = wizard();
        w.back();
        w.back();
        assert_eq!(w.position().0, 1);
        assert!(matches!(w.current_step(), WizardStep::Category { .. }));
    }

    #[test]
    fn back_from_confirm_keeps_recorded_answer() {
        let mut w = at_first_question();
        for _ in 0..4 {
            let WizardStep::Question { question, .. } = w.current_step() else {
                panic!("expected options question");
            };
            let option = question.options[0].clone();
            w.select_option(&option).unwrap();
        }
        w.set_answer("none").unwrap();
        w.next();
        w.set_answer("pollen").unwrap();
        w.next();
        assert!(matches!(w.current_step(), WizardStep::Confirm));
        w.back();
        let WizardStep::Question { question, .. } = w.current_step() else {
            panic!("expected the last question");
        };
        assert_eq!(question.key, "allergies");
        assert_eq!(w.answers().get("allergies"), Some("pollen"));
    }

    #[test]
    fn report_requires_confirm_step() {
        let mut w = at_first_question();
        assert_eq!(w.generate_report().unwrap_err(), WizardError::NotAtConfirm);
    }

    #[test]
    fn full_walkthrough_produces_report() {
        let mut w = at_first_question();
        w.select_option("31-45").unwrap();
        w.select_option("Vegetarian").unwrap();
        w.select_option("5-7 hours").unwrap();
        w.submit_custom("Walks only").unwrap();
        w.set_answer("hypertension").unwrap();
        w.next();
        w.set_answer("none").unwrap();
        w.next();

        let report = w.generate_report().unwrap().clone();
        assert_eq!(report.category(), "hair");
        assert_eq!(report.sub_goal(), "Dandruff");
        let question_count = QuestionConfig::builtin().questions().len();
        assert_eq!(report.answers().len(), question_count);
        assert_eq!(report.answer("exercise"), Some("Walks only"));

        // Terminal: transitions are inert until restart.
        assert!(matches!(w.current_step(), WizardStep::Done { .. }));
        w.back();
        w.next();
        assert!(matches!(w.current_step(), WizardStep::Done { .. }));
        assert_eq!(w.select_category("skin"), Err(WizardError::NotAtCategory));
    }

    #[test]
    fn restart_clears_everything() {
        let mut w = at_first_question();
        w.select_option("18-30").unwrap();
        w.back();
        w.restart();
        assert!(matches!(w.current_step(), WizardStep::Category { .. }));
        assert!(w.category().is_none());
        assert!(w.sub_goal().is_none());
        assert!(w.answers().is_empty());
        assert!(w.report().is_none());
        assert_eq!(w.position().0, 1);
    }
}
