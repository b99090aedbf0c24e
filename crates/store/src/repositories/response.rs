//! Response repository.

use chrono::{DateTime, Utc};
use formpulse_common::{AppError, AppResult, IdGenerator};
use serde_json::{Map, Value};

use crate::client::StoreClient;
use crate::documents::Document;
use crate::models::{AnswerMap, SurveyResponse, decode_answers, encode_answers};

/// Response repository over the backend document store.
#[derive(Debug, Clone)]
pub struct ResponseRepository {
    client: StoreClient,
    collection: String,
    id_gen: IdGenerator,
}

impl ResponseRepository {
    /// Create a new response repository.
    #[must_use]
    pub const fn new(client: StoreClient, collection: String) -> Self {
        Self {
            client,
            collection,
            id_gen: IdGenerator::new(),
        }
    }

    /// Persist a submitted response.
    ///
    /// No idempotency key is used: two rapid submissions both succeed.
    pub async fn create(&self, survey_id: &str, answers: &AnswerMap) -> AppResult<SurveyResponse> {
        let encoded = encode_answers(answers)
            .map_err(|e| AppError::Internal(format!("Failed to encode answers: {e}")))?;

        let mut fields = Map::new();
        fields.insert("surveyId".to_string(), Value::String(survey_id.to_string()));
        fields.insert("answers".to_string(), Value::String(encoded));
        fields.insert(
            "createdAt".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );

        let id = self.id_gen.generate();
        let doc = self
            .client
            .create_document(&self.collection, &id, fields)
            .await?;

        Ok(Self::from_document(&doc))
    }

    /// List every response for a survey.
    ///
    /// The full collection is listed and filtered by `surveyId`
    /// client-side, matching the backend's flat query surface.
    pub async fn list_for_survey(&self, survey_id: &str) -> AppResult<Vec<SurveyResponse>> {
        let docs = self.client.list_documents(&self.collection).await?;
        Ok(docs
            .iter()
            .filter(|doc| doc.str_field("surveyId") == survey_id)
            .map(Self::from_document)
            .collect())
    }

    /// Decode a stored document into a response.
    ///
    /// A malformed `answers` blob is substituted with the empty map and
    /// logged, keeping the rest of the response set available.
    fn from_document(doc: &Document) -> SurveyResponse {
        let answers = match decode_answers(doc.str_field("answers")) {
            Ok(answers) => answers,
            Err(e) => {
                tracing::warn!(response_id = %doc.id, error = %e, "Malformed stored answers, treating as empty");
                AnswerMap::new()
            }
        };

        // Responses carry their own submission timestamp; the
        // store-assigned one is the fallback for legacy documents.
        let created_at = doc
            .str_field("createdAt")
            .parse::<DateTime<Utc>>()
            .unwrap_or(doc.created_at);

        SurveyResponse {
            id: doc.id.clone(),
            survey_id: doc.str_field("surveyId").to_string(),
            answers,
            created_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::AnswerValue;
    use serde_json::json;

    fn document(fields: Value) -> Document {
        serde_json::from_value(fields).unwrap()
    }

    #[test]
    fn test_from_document_decodes_answers() {
        let doc = document(json!({
            "$id": "r1",
            "$createdAt": "2025-08-02T09:00:00.000Z",
            "surveyId": "s1",
            "answers": r#"{"q1":"yes","q2":["X","Y"]}"#,
            "createdAt": "2025-08-02T09:00:01+00:00",
        }));

        let response = ResponseRepository::from_document(&doc);
        assert_eq!(response.survey_id, "s1");
        assert_eq!(response.answers["q1"], AnswerValue::One("yes".to_string()));
        assert_eq!(
            response.answers["q2"],
            AnswerValue::Many(vec!["X".to_string(), "Y".to_string()])
        );
        assert_eq!(response.created_at.to_rfc3339(), "2025-08-02T09:00:01+00:00");
    }

    #[test]
    fn test_from_document_malformed_answers_become_empty() {
        let doc = document(json!({
            "$id": "r2",
            "$createdAt": "2025-08-02T09:00:00.000Z",
            "surveyId": "s1",
            "answers": "[broken",
        }));

        let response = ResponseRepository::from_document(&doc);
        assert!(response.answers.is_empty());
        // Falls back to the store-assigned timestamp.
        assert_eq!(response.created_at.to_rfc3339(), "2025-08-02T09:00:00+00:00");
    }
}
