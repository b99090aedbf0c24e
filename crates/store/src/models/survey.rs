//! Survey and question models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of prompt a question presents to respondents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    /// Single-line free text.
    Text,
    /// Multi-line free text.
    LongText,
    /// Pick exactly one declared option.
    SingleChoice,
    /// Pick any number of declared options.
    MultiChoice,
}

impl QuestionType {
    /// Whether this type is backed by a fixed option list.
    #[must_use]
    pub const fn is_choice(self) -> bool {
        matches!(self, Self::SingleChoice | Self::MultiChoice)
    }
}

/// A single prompt within a survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Immutable identifier assigned at creation and never reused.
    ///
    /// Answers are keyed by this identifier, so reordering questions
    /// after responses exist cannot break the linkage.
    pub id: String,
    /// Question type.
    #[serde(rename = "type")]
    pub kind: QuestionType,
    /// Prompt shown to respondents.
    pub label: String,
    /// Declared options; meaningful only for choice-based types.
    #[serde(default)]
    pub options: Vec<String>,
    /// Whether an answer is mandatory.
    #[serde(default)]
    pub required: bool,
}

/// Survey color theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Primary accent color.
    pub primary: String,
    /// Secondary accent color.
    pub secondary: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: "#3b82f6".to_string(),
            secondary: "#8b5cf6".to_string(),
        }
    }
}

/// A stored survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    /// Store-assigned identifier.
    pub id: String,
    /// Survey title.
    pub title: String,
    /// Optional description.
    pub description: String,
    /// Ordered question list; order determines numbering.
    pub questions: Vec<Question>,
    /// Color theme.
    pub theme: Theme,
    /// Authoring account; empty if authored anonymously.
    pub owner_id: String,
    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Survey {
    /// Find a question by its immutable identifier.
    #[must_use]
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

/// A survey about to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSurvey {
    /// Survey title.
    pub title: String,
    /// Optional description.
    pub description: String,
    /// Ordered question list.
    pub questions: Vec<Question>,
    /// Color theme.
    pub theme: Theme,
    /// Authoring account; empty if authored anonymously.
    pub owner_id: String,
}

/// Serialize a question list into the stored blob form.
pub fn encode_questions(questions: &[Question]) -> serde_json::Result<String> {
    serde_json::to_string(questions)
}

/// Parse the stored question blob.
///
/// Returns an explicit error rather than silently recovering; the
/// repository decides whether to substitute an empty list.
pub fn decode_questions(raw: &str) -> serde_json::Result<Vec<Question>> {
    serde_json::from_str(raw)
}

/// Serialize a theme into the stored blob form.
pub fn encode_theme(theme: &Theme) -> serde_json::Result<String> {
    serde_json::to_string(theme)
}

/// Parse the stored theme blob.
pub fn decode_theme(raw: &str) -> serde_json::Result<Theme> {
    serde_json::from_str(raw)
}
