//! Response capture.
//!
//! Holds one respondent's in-progress answer set against an immutable,
//! already-fetched survey. Submission validates locally first; nothing
//! reaches the network when validation fails.

use formpulse_store::models::{AnswerMap, AnswerValue, QuestionType, Survey};
use thiserror::Error;

use crate::validation::{FieldRule, FieldValue, validate_field};

/// The first failing question of an attempted submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Q{position} ({label}): {message}")]
pub struct ValidationFailure {
    /// Identifier of the failing question.
    pub question_id: String,
    /// Label of the failing question.
    pub label: String,
    /// 1-based position of the question in the survey.
    pub position: usize,
    /// Error message.
    pub message: String,
}

/// Validate a complete answer set against a survey's required flags.
///
/// Checks run in question order and stop at the first failure:
/// text/long-text require a non-empty string, single-choice a selected
/// value equal to one of the declared options, multi-choice at least one
/// selection.
pub fn validate_answers(survey: &Survey, answers: &AnswerMap) -> Result<(), ValidationFailure> {
    for (idx, question) in survey.questions.iter().enumerate() {
        if !question.required {
            continue;
        }

        let answer = answers.get(&question.id);
        let failure = |message: &str| ValidationFailure {
            question_id: question.id.clone(),
            label: question.label.clone(),
            position: idx + 1,
            message: message.to_string(),
        };

        match question.kind {
            QuestionType::Text | QuestionType::LongText => {
                let text = match answer {
                    Some(AnswerValue::One(s)) => s.as_str(),
                    _ => "",
                };
                if !validate_field(&FieldValue::Text(text), FieldRule::Required).valid {
                    return Err(failure("An answer is required"));
                }
            }
            QuestionType::SingleChoice => {
                let selected = match answer {
                    Some(AnswerValue::One(s)) => Some(s),
                    _ => None,
                };
                match selected {
                    Some(value) if question.options.contains(value) => {}
                    _ => return Err(failure("Select one of the listed options")),
                }
            }
            QuestionType::MultiChoice => {
                let empty: Vec<String> = Vec::new();
                let selected = match answer {
                    Some(AnswerValue::Many(v)) => v,
                    _ => &empty,
                };
                if !validate_field(&FieldValue::Selection(selected), FieldRule::ChoiceGroupRequired)
                    .valid
                {
                    return Err(failure("Select at least one option"));
                }
            }
        }
    }
    Ok(())
}

/// One respondent's in-progress answers for a fetched survey.
#[derive(Debug, Clone)]
pub struct ResponseCapture {
    survey: Survey,
    answers: AnswerMap,
}

impl ResponseCapture {
    /// Start capturing answers for a survey.
    #[must_use]
    pub const fn new(survey: Survey) -> Self {
        Self {
            survey,
            answers: AnswerMap::new(),
        }
    }

    /// The survey being answered.
    #[must_use]
    pub const fn survey(&self) -> &Survey {
        &self.survey
    }

    /// The answers captured so far.
    #[must_use]
    pub const fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    /// Set the answer for a text or single-choice question.
    pub fn set_answer(&mut self, question_id: &str, value: impl Into<String>) {
        self.answers
            .insert(question_id.to_string(), AnswerValue::One(value.into()));
    }

    /// Toggle one option of a multi-choice question.
    ///
    /// Adds the option if absent, removes it if present; the insertion
    /// order of the remaining options is preserved.
    pub fn toggle_option(&mut self, question_id: &str, option: &str) {
        let entry = self
            .answers
            .entry(question_id.to_string())
            .or_insert_with(|| AnswerValue::Many(Vec::new()));

        // A prior scalar answer for this question is replaced by a list.
        if let AnswerValue::One(_) = entry {
            *entry = AnswerValue::Many(Vec::new());
        }
        if let AnswerValue::Many(selected) = entry {
            if let Some(pos) = selected.iter().position(|o| o == option) {
                selected.remove(pos);
            } else {
                selected.push(option.to_string());
            }
        }
    }

    /// Validate and finish the capture.
    ///
    /// Consumes the capture: after a successful submit there is no
    /// edit-after-submit path. On failure the first failing question is
    /// reported and nothing is persisted.
    pub fn submit(self) -> Result<AnswerMap, ValidationFailure> {
        validate_answers(&self.survey, &self.answers)?;
        Ok(self.answers)
    }
}
