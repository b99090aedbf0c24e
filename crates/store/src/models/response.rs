//! Response models.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One answer to a single question.
///
/// Text and single-choice questions produce a single string; multi-choice
/// questions produce an ordered sequence of selected options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// A single string answer.
    One(String),
    /// An ordered selection of options.
    Many(Vec<String>),
}

impl AnswerValue {
    /// Whether this answer carries no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(s) => s.is_empty(),
            Self::Many(v) => v.is_empty(),
        }
    }
}

/// Answers keyed by immutable question identifier.
pub type AnswerMap = BTreeMap<String, AnswerValue>;

/// One respondent's complete answer set for a survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    /// Store-assigned identifier.
    pub id: String,
    /// The survey this response belongs to (non-owning reference).
    pub survey_id: String,
    /// Answers keyed by question identifier.
    pub answers: AnswerMap,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}

/// Serialize an answer map into the stored blob form.
pub fn encode_answers(answers: &AnswerMap) -> serde_json::Result<String> {
    serde_json::to_string(answers)
}

/// Parse the stored answer blob.
pub fn decode_answers(raw: &str) -> serde_json::Result<AnswerMap> {
    serde_json::from_str(raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_round_trip() {
        let mut answers = AnswerMap::new();
        answers.insert("q1".to_string(), AnswerValue::One("hello".to_string()));
        answers.insert(
            "q2".to_string(),
            AnswerValue::Many(vec!["X".to_string(), "Y".to_string()]),
        );

        let encoded = encode_answers(&answers).unwrap();
        let decoded = decode_answers(&encoded).unwrap();
        assert_eq!(decoded, answers);
    }

    #[test]
    fn test_untagged_answer_shapes() {
        let decoded = decode_answers(r#"{"q1":"A","q2":["B","C"]}"#).unwrap();
        assert_eq!(decoded["q1"], AnswerValue::One("A".to_string()));
        assert_eq!(
            decoded["q2"],
            AnswerValue::Many(vec!["B".to_string(), "C".to_string()])
        );
    }

    #[test]
    fn test_empty_answers() {
        assert!(AnswerValue::One(String::new()).is_empty());
        assert!(AnswerValue::Many(vec![]).is_empty());
        assert!(!AnswerValue::One("0".to_string()).is_empty());
    }
}
