//! Survey authoring draft.
//!
//! The draft is the in-memory model behind the authoring form. Every
//! mutation returns a structurally independent copy, so an in-progress
//! edit can never be observed as partially applied.

use formpulse_common::IdGenerator;
use formpulse_store::models::{NewSurvey, Question, QuestionType, Theme};
use thiserror::Error;

/// Error produced when finishing an invalid draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct DraftError {
    /// The offending field (`title` or a question id).
    pub field: String,
    /// Field-level error message.
    pub message: String,
}

/// A survey being authored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyDraft {
    /// Survey title.
    pub title: String,
    /// Survey description.
    pub description: String,
    /// Ordered question list; never empty.
    pub questions: Vec<Question>,
    /// Color theme.
    pub theme: Theme,
}

impl Default for SurveyDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl SurveyDraft {
    /// A fresh draft: one empty default text question.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            questions: vec![Self::default_question()],
            theme: Theme::default(),
        }
    }

    fn default_question() -> Question {
        Question {
            id: IdGenerator::new().generate(),
            kind: QuestionType::Text,
            label: String::new(),
            options: vec![String::new()],
            required: false,
        }
    }

    /// Set the title.
    #[must_use]
    pub fn set_title(&self, title: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.title = title.into();
        next
    }

    /// Set the description.
    #[must_use]
    pub fn set_description(&self, description: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.description = description.into();
        next
    }

    /// Set the theme.
    #[must_use]
    pub fn set_theme(&self, theme: Theme) -> Self {
        let mut next = self.clone();
        next.theme = theme;
        next
    }

    /// Append a new default question with a fresh identifier.
    #[must_use]
    pub fn add_question(&self) -> Self {
        let mut next = self.clone();
        next.questions.push(Self::default_question());
        next
    }

    /// Remove a question by identifier.
    ///
    /// No-op when it would remove the last remaining question.
    #[must_use]
    pub fn remove_question(&self, id: &str) -> Self {
        if self.questions.len() <= 1 {
            return self.clone();
        }
        let mut next = self.clone();
        next.questions.retain(|q| q.id != id);
        next
    }

    /// Update a question in place via a closure.
    #[must_use]
    pub fn update_question(&self, id: &str, f: impl FnOnce(&mut Question)) -> Self {
        let mut next = self.clone();
        if let Some(question) = next.questions.iter_mut().find(|q| q.id == id) {
            f(question);
        }
        next
    }

    /// Append an empty option to a question.
    #[must_use]
    pub fn add_option(&self, question_id: &str) -> Self {
        self.update_question(question_id, |q| q.options.push(String::new()))
    }

    /// Remove an option from a question by position.
    ///
    /// No-op when it would remove the question's last remaining option.
    #[must_use]
    pub fn remove_option(&self, question_id: &str, index: usize) -> Self {
        self.update_question(question_id, |q| {
            if q.options.len() > 1 && index < q.options.len() {
                q.options.remove(index);
            }
        })
    }

    /// Validate the draft and produce a survey ready for persistence.
    ///
    /// Rejects with a field-level error when the title is empty or any
    /// question label is empty. After a successful finish the caller
    /// resets the draft with [`SurveyDraft::new`].
    pub fn finish(&self, owner_id: impl Into<String>) -> Result<NewSurvey, DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError {
                field: "title".to_string(),
                message: "Title is required".to_string(),
            });
        }
        for question in &self.questions {
            if question.label.trim().is_empty() {
                return Err(DraftError {
                    field: question.id.clone(),
                    message: "Question label is required".to_string(),
                });
            }
        }

        Ok(NewSurvey {
            title: self.title.clone(),
            description: self.description.clone(),
            questions: self.questions.clone(),
            theme: self.theme.clone(),
            owner_id: owner_id.into(),
        })
    }
}
