//! Account service.
//!
//! Identity lives entirely in the backend auth service; this service
//! only validates input locally and forwards the calls. Session state is
//! the token held by the caller, nothing is cached here.

use formpulse_common::{AppError, AppResult, IdGenerator};
use formpulse_store::{Account, Session, StoreClient};

use crate::validation::{FieldRule, FieldSpec, FieldValue, validate_step};

/// Account service for signup, login, and session resolution.
#[derive(Debug, Clone)]
pub struct AccountService {
    client: StoreClient,
    id_gen: IdGenerator,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub const fn new(client: StoreClient) -> Self {
        Self {
            client,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new account.
    ///
    /// A duplicate email surfaces as a conflict from the backend; it is
    /// not pre-checked here.
    pub async fn signup(&self, email: &str, password: &str) -> AppResult<Account> {
        Self::check_credentials(email, password)?;
        let id = self.id_gen.generate_account_id();
        self.client.create_account(&id, email, password).await
    }

    /// Create a session for an existing account.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        Self::check_credentials(email, password)?;
        self.client.create_session(email, password).await
    }

    /// Delete the session behind a token.
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        self.client.delete_session(token).await
    }

    /// Resolve the account behind a session token.
    ///
    /// An invalid or expired token surfaces as [`AppError::Unauthorized`]
    /// and the caller treats the session as signed out.
    pub async fn current(&self, token: &str) -> AppResult<Account> {
        self.client.get_current_account(token).await
    }

    /// Validate credentials locally before any network call.
    fn check_credentials(email: &str, password: &str) -> AppResult<()> {
        let errors = validate_step(&[
            FieldSpec {
                name: "email",
                value: FieldValue::Text(email),
                rules: &[FieldRule::Required, FieldRule::Email],
            },
            FieldSpec {
                name: "password",
                value: FieldValue::Text(password),
                rules: &[FieldRule::Required],
            },
        ]);

        match errors.first() {
            Some(error) => Err(AppError::Validation(format!(
                "{}: {}",
                error.field, error.message
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_credentials_rejects_bad_email() {
        let err = AccountService::check_credentials("not-an-email", "secret123");
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_check_credentials_rejects_empty_password() {
        let err = AccountService::check_credentials("a@b.co", "  ");
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_check_credentials_accepts_valid_pair() {
        assert!(AccountService::check_credentials("a@b.co", "secret123").is_ok());
    }
}
