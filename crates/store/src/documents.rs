//! Document store operations.
//!
//! The backend exposes a flat document model: every document is a bag of
//! scalar fields plus store-assigned `$id` and `$createdAt` metadata.
//! Nested structures (question lists, answer maps) are JSON-stringified
//! into single string fields by the repositories.

use chrono::{DateTime, Utc};
use formpulse_common::AppResult;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::client::StoreClient;

/// A stored document with its assigned metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Store-assigned unique identifier.
    #[serde(rename = "$id")]
    pub id: String,
    /// Store-assigned creation timestamp.
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    /// Flat document fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Read a string field, treating absence as empty.
    ///
    /// Callers must treat absence of expected fields as a valid, empty
    /// state rather than an error.
    #[must_use]
    pub fn str_field(&self, name: &str) -> &str {
        self.fields.get(name).and_then(Value::as_str).unwrap_or("")
    }
}

/// A page of listed documents.
#[derive(Debug, Deserialize)]
pub struct DocumentList {
    /// Total number of documents in the collection.
    pub total: u64,
    /// The documents themselves.
    pub documents: Vec<Document>,
}

impl StoreClient {
    /// List every document in a collection.
    pub async fn list_documents(&self, collection: &str) -> AppResult<Vec<Document>> {
        let url = self.url(&self.collection_path(collection))?;
        let response = self.get(url).send().await?;
        let list: DocumentList = Self::error_for_status(response).await?.json().await?;
        Ok(list.documents)
    }

    /// Fetch a single document by ID.
    pub async fn get_document(&self, collection: &str, id: &str) -> AppResult<Document> {
        let url = self.url(&format!("{}/{id}", self.collection_path(collection)))?;
        let response = self.get(url).send().await?;
        Ok(Self::error_for_status(response).await?.json().await?)
    }

    /// Create a document with the given ID and fields.
    pub async fn create_document(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> AppResult<Document> {
        let url = self.url(&self.collection_path(collection))?;
        let body = json!({
            "documentId": id,
            "data": fields,
        });
        let response = self.post(url).json(&body).send().await?;
        Ok(Self::error_for_status(response).await?.json().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_document_deserializes_flat_fields() {
        let doc: Document = serde_json::from_value(json!({
            "$id": "doc1",
            "$createdAt": "2025-08-01T10:00:00.000Z",
            "title": "Customer feedback",
            "userId": "user_abc",
        }))
        .unwrap();

        assert_eq!(doc.id, "doc1");
        assert_eq!(doc.str_field("title"), "Customer feedback");
        assert_eq!(doc.str_field("userId"), "user_abc");
        // Missing fields read as empty, not as errors.
        assert_eq!(doc.str_field("description"), "");
    }
}
