//! Identity and session operations.
//!
//! Accounts and sessions are owned entirely by the backend auth service;
//! this module only forwards calls to its fixed interface.

use formpulse_common::AppResult;
use serde::Deserialize;
use serde_json::json;

use crate::client::{SESSION_HEADER, StoreClient};

/// An account as reported by the auth service.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    /// Account identifier.
    #[serde(rename = "$id")]
    pub id: String,
    /// Account email address.
    pub email: String,
}

/// A session created by the auth service.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    /// Session identifier.
    #[serde(rename = "$id")]
    pub id: String,
    /// Account the session belongs to.
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Secret presented as the bearer token on subsequent requests.
    #[serde(default)]
    pub secret: String,
}

impl StoreClient {
    /// Create a new account.
    pub async fn create_account(&self, id: &str, email: &str, password: &str) -> AppResult<Account> {
        let url = self.url("account")?;
        let body = json!({
            "userId": id,
            "email": email,
            "password": password,
        });
        let response = self.post(url).json(&body).send().await?;
        Ok(Self::error_for_status(response).await?.json().await?)
    }

    /// Create an email/password session.
    pub async fn create_session(&self, email: &str, password: &str) -> AppResult<Session> {
        let url = self.url("account/sessions/email")?;
        let body = json!({
            "email": email,
            "password": password,
        });
        let response = self.post(url).json(&body).send().await?;
        Ok(Self::error_for_status(response).await?.json().await?)
    }

    /// Delete the session identified by the given token.
    pub async fn delete_session(&self, token: &str) -> AppResult<()> {
        let url = self.url("account/sessions/current")?;
        let response = self
            .delete(url)
            .header(SESSION_HEADER, token)
            .send()
            .await?;
        Self::error_for_status(response).await?;
        Ok(())
    }

    /// Resolve the account behind a session token.
    pub async fn get_current_account(&self, token: &str) -> AppResult<Account> {
        let url = self.url("account")?;
        let response = self.get(url).header(SESSION_HEADER, token).send().await?;
        Ok(Self::error_for_status(response).await?.json().await?)
    }
}
