//! HTTP client for the backend-as-a-service API.
//!
//! Every persistence and identity operation is a single independent
//! round trip against the backend. There is no retry policy: a failed
//! call surfaces an error and is not reattempted.

use formpulse_common::{AppError, AppResult, BackendConfig};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use url::Url;

/// Header carrying the project identifier on every request.
pub const PROJECT_HEADER: &str = "X-Project-Id";
/// Header carrying the session token on authenticated requests.
pub const SESSION_HEADER: &str = "X-Session-Token";

/// Client for the backend-as-a-service HTTP API.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    endpoint: Url,
    project_id: String,
    database_id: String,
}

/// Error body returned by the backend.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl StoreClient {
    /// Create a new client from backend configuration.
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        // Url::join drops the base's last path segment unless it ends
        // with a slash, so "http://host/v1" would resolve paths against
        // "http://host/".
        let raw = if config.endpoint.ends_with('/') {
            config.endpoint.clone()
        } else {
            format!("{}/", config.endpoint)
        };
        let endpoint = Url::parse(&raw)
            .map_err(|e| AppError::Config(format!("Invalid backend endpoint: {e}")))?;

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
            project_id: config.project_id.clone(),
            database_id: config.database_id.clone(),
        })
    }

    /// Build a full URL for an API path.
    pub(crate) fn url(&self, path: &str) -> AppResult<Url> {
        self.endpoint
            .join(path)
            .map_err(|e| AppError::Internal(format!("Invalid backend path {path}: {e}")))
    }

    /// Path prefix for a document collection.
    pub(crate) fn collection_path(&self, collection: &str) -> String {
        format!(
            "databases/{}/collections/{collection}/documents",
            self.database_id
        )
    }

    /// Start a GET request with project headers applied.
    pub(crate) fn get(&self, url: Url) -> RequestBuilder {
        self.http.get(url).header(PROJECT_HEADER, &self.project_id)
    }

    /// Start a POST request with project headers applied.
    pub(crate) fn post(&self, url: Url) -> RequestBuilder {
        self.http.post(url).header(PROJECT_HEADER, &self.project_id)
    }

    /// Start a DELETE request with project headers applied.
    pub(crate) fn delete(&self, url: Url) -> RequestBuilder {
        self.http
            .delete(url)
            .header(PROJECT_HEADER, &self.project_id)
    }

    /// Map a backend response to an error when the status is not a success.
    pub(crate) async fn error_for_status(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status.to_string(),
        };

        Err(match status {
            StatusCode::UNAUTHORIZED => AppError::Unauthorized,
            StatusCode::NOT_FOUND => AppError::NotFound(message),
            StatusCode::CONFLICT => AppError::Conflict(message),
            s if s.is_client_error() => AppError::BadRequest(message),
            _ => AppError::Transport(message),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(endpoint: &str) -> BackendConfig {
        BackendConfig {
            endpoint: endpoint.to_string(),
            project_id: "p".to_string(),
            database_id: "db".to_string(),
            surveys_collection: "surveys".to_string(),
            responses_collection: "responses".to_string(),
        }
    }

    #[test]
    fn test_endpoint_without_trailing_slash_keeps_last_segment() {
        let client = StoreClient::new(&config("http://localhost:8080/v1")).unwrap();
        let url = client.url("account").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v1/account");
    }

    #[test]
    fn test_collection_path_resolves_under_endpoint() {
        let client = StoreClient::new(&config("http://localhost:8080/v1/")).unwrap();
        let url = client.url(&client.collection_path("surveys")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/v1/databases/db/collections/surveys/documents"
        );
    }
}
