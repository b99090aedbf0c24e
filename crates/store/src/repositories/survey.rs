//! Survey repository.

use formpulse_common::{AppError, AppResult, IdGenerator};
use serde_json::{Map, Value};

use crate::client::StoreClient;
use crate::documents::Document;
use crate::models::{NewSurvey, Survey, Theme, decode_questions, decode_theme, encode_questions, encode_theme};

/// Survey repository over the backend document store.
#[derive(Debug, Clone)]
pub struct SurveyRepository {
    client: StoreClient,
    collection: String,
    id_gen: IdGenerator,
}

impl SurveyRepository {
    /// Create a new survey repository.
    #[must_use]
    pub const fn new(client: StoreClient, collection: String) -> Self {
        Self {
            client,
            collection,
            id_gen: IdGenerator::new(),
        }
    }

    /// Persist a new survey.
    pub async fn create(&self, survey: &NewSurvey) -> AppResult<Survey> {
        let questions = encode_questions(&survey.questions)
            .map_err(|e| AppError::Internal(format!("Failed to encode questions: {e}")))?;
        let theme = encode_theme(&survey.theme)
            .map_err(|e| AppError::Internal(format!("Failed to encode theme: {e}")))?;

        let mut fields = Map::new();
        fields.insert("title".to_string(), Value::String(survey.title.clone()));
        fields.insert(
            "description".to_string(),
            Value::String(survey.description.clone()),
        );
        fields.insert("questions".to_string(), Value::String(questions));
        fields.insert("theme".to_string(), Value::String(theme));
        fields.insert("userId".to_string(), Value::String(survey.owner_id.clone()));

        let id = self.id_gen.generate();
        let doc = self
            .client
            .create_document(&self.collection, &id, fields)
            .await?;

        Ok(Self::from_document(&doc))
    }

    /// Fetch a survey by ID.
    pub async fn get(&self, id: &str) -> AppResult<Survey> {
        let doc = match self.client.get_document(&self.collection, id).await {
            Ok(doc) => doc,
            Err(AppError::NotFound(_)) => {
                return Err(AppError::SurveyNotFound(id.to_string()));
            }
            Err(e) => return Err(e),
        };
        Ok(Self::from_document(&doc))
    }

    /// List surveys owned by an account.
    ///
    /// The backend offers no server-side query here, so the full
    /// collection is listed and filtered by owner client-side.
    pub async fn list_for_owner(&self, owner_id: &str) -> AppResult<Vec<Survey>> {
        let docs = self.client.list_documents(&self.collection).await?;
        Ok(docs
            .iter()
            .filter(|doc| doc.str_field("userId") == owner_id)
            .map(Self::from_document)
            .collect())
    }

    /// Decode a stored document into a survey.
    ///
    /// Malformed `questions` or `theme` blobs are substituted with the
    /// empty structure / default palette, trading silent data loss for
    /// availability. The parse failure itself is logged.
    fn from_document(doc: &Document) -> Survey {
        let questions = match decode_questions(doc.str_field("questions")) {
            Ok(questions) => questions,
            Err(e) => {
                tracing::warn!(survey_id = %doc.id, error = %e, "Malformed stored questions, treating as empty");
                Vec::new()
            }
        };

        let raw_theme = doc.str_field("theme");
        let theme = if raw_theme.is_empty() {
            Theme::default()
        } else {
            match decode_theme(raw_theme) {
                Ok(theme) => theme,
                Err(e) => {
                    tracing::warn!(survey_id = %doc.id, error = %e, "Malformed stored theme, using default");
                    Theme::default()
                }
            }
        };

        Survey {
            id: doc.id.clone(),
            title: doc.str_field("title").to_string(),
            description: doc.str_field("description").to_string(),
            questions,
            theme,
            owner_id: doc.str_field("userId").to_string(),
            created_at: doc.created_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(fields: Value) -> Document {
        serde_json::from_value(fields).unwrap()
    }

    #[test]
    fn test_from_document_decodes_blobs() {
        let doc = document(json!({
            "$id": "s1",
            "$createdAt": "2025-08-01T10:00:00.000Z",
            "title": "Feedback",
            "description": "Tell us",
            "questions": r#"[{"id":"q1","type":"text","label":"Name","options":[],"required":true}]"#,
            "theme": r##"{"primary":"#111111","secondary":"#222222"}"##,
            "userId": "user_1",
        }));

        let survey = SurveyRepository::from_document(&doc);
        assert_eq!(survey.id, "s1");
        assert_eq!(survey.questions.len(), 1);
        assert_eq!(survey.questions[0].label, "Name");
        assert_eq!(survey.theme.primary, "#111111");
        assert_eq!(survey.owner_id, "user_1");
    }

    #[test]
    fn test_from_document_malformed_questions_become_empty() {
        let doc = document(json!({
            "$id": "s2",
            "$createdAt": "2025-08-01T10:00:00.000Z",
            "title": "Broken",
            "questions": "{{not json",
        }));

        let survey = SurveyRepository::from_document(&doc);
        assert!(survey.questions.is_empty());
        assert_eq!(survey.theme, Theme::default());
    }

    #[test]
    fn test_from_document_missing_fields_are_empty() {
        let doc = document(json!({
            "$id": "s3",
            "$createdAt": "2025-08-01T10:00:00.000Z",
        }));

        let survey = SurveyRepository::from_document(&doc);
        assert_eq!(survey.title, "");
        assert_eq!(survey.description, "");
        assert!(survey.questions.is_empty());
        assert_eq!(survey.owner_id, "");
    }
}
