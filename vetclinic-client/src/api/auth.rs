use serde::Serialize;
use serde_json::Value;
use shared::models::{
    AuthResponse, LoginRequest, RegisterRequest, TokenValidation, TokenValidationRequest, User,
};
use tracing::{info, warn};

use super::{ApiClient, Payload};
use crate::{
    error::ApiError,
    storage::{AUTH_TOKEN_KEY, CURRENT_USER_KEY},
};

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";
const VALIDATE_PATH: &str = "/auth/validate";

impl ApiClient {
    /// Signs in with username and password.
    ///
    /// When the backend answers with a token, the token and the user record
    /// are persisted before the response is returned.
    ///
    /// # Errors
    /// Returns the request error unchanged, or [`ApiError::MalformedResponse`]
    /// if the response cannot be decoded or carries a token without a user.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.authenticate(LOGIN_PATH, credentials).await
    }

    /// Creates an account and signs in with it.
    ///
    /// # Errors
    /// Same as [`ApiClient::login`].
    pub async fn register(&self, user: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.authenticate(REGISTER_PATH, user).await
    }

    /// Forgets the stored session. No request is made.
    ///
    /// Both keys are removed even if removing the first one fails.
    ///
    /// # Errors
    /// Returns the first storage failure.
    pub fn logout(&self) -> Result<(), ApiError> {
        let token = self.storage.remove(AUTH_TOKEN_KEY);
        let user = self.storage.remove(CURRENT_USER_KEY);
        token?;
        user?;
        Ok(())
    }

    /// Whether a token is stored. Storage failures count as signed out.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        match self.stored_token() {
            Ok(token) => token.is_some(),
            Err(err) => {
                warn!(error = %err, "could not read stored token");
                false
            }
        }
    }

    /// The stored bearer token; an empty value counts as absent.
    ///
    /// # Errors
    /// Returns [`ApiError::Storage`] if storage cannot be read.
    pub fn stored_token(&self) -> Result<Option<String>, ApiError> {
        Ok(self
            .storage
            .get(AUTH_TOKEN_KEY)?
            .filter(|token| !token.is_empty()))
    }

    /// The stored user record.
    ///
    /// # Errors
    /// Returns [`ApiError::Storage`] if storage cannot be read and
    /// [`ApiError::CorruptSession`] if the record does not decode.
    pub fn current_user(&self) -> Result<Option<User>, ApiError> {
        let Some(raw) = self.storage.get(CURRENT_USER_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| ApiError::CorruptSession(format!("stored user is unreadable: {err}")))
    }

    /// Asks the backend whether the stored token is still valid for `username`.
    ///
    /// Returns `false` without a request when no token is stored.
    ///
    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn validate_token(&self, username: &str) -> Result<bool, ApiError> {
        let Some(token) = self.stored_token()? else {
            return Ok(false);
        };
        let request = TokenValidationRequest {
            token,
            username: username.to_string(),
        };
        let answer: TokenValidation = self.post_as(VALIDATE_PATH, &request).await?;
        Ok(answer.valid)
    }

    async fn authenticate<B: Serialize>(&self, path: &str, body: &B) -> Result<AuthResponse, ApiError> {
        let value = match self.post(path, body).await? {
            Payload::Json(value) => value,
            Payload::Text(_) => {
                return Err(ApiError::malformed(path, "expected a JSON body"));
            }
        };
        let response: AuthResponse = serde_json::from_value(value.clone())
            .map_err(|err| ApiError::malformed(path, err.to_string()))?;

        if let Some(token) = response.token.as_deref().filter(|token| !token.is_empty()) {
            let user = match value.get("user") {
                Some(user) if !user.is_null() => user,
                _ => return Err(ApiError::malformed(path, "token returned without a user")),
            };
            self.persist_session(token, user)?;
            info!(path, "session stored");
        }

        Ok(response)
    }

    /// Stores both keys or neither: a token is never left behind without its
    /// user record.
    fn persist_session(&self, token: &str, user: &Value) -> Result<(), ApiError> {
        self.storage.set(AUTH_TOKEN_KEY, token)?;
        if let Err(err) = self.storage.set(CURRENT_USER_KEY, &user.to_string()) {
            if let Err(cleanup) = self.storage.remove(AUTH_TOKEN_KEY) {
                warn!(error = %cleanup, "failed to roll back stored token");
            }
            return Err(err.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::storage::{MemoryStorage, SessionStorage, StorageError};

    fn client_with(storage: Arc<dyn SessionStorage>) -> ApiClient {
        ApiClient::new("http://localhost:8081/api", storage)
    }

    /// Memory storage that refuses to write the user record.
    #[derive(Debug, Default)]
    struct UserWriteFails {
        inner: MemoryStorage,
    }

    impl SessionStorage for UserWriteFails {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == CURRENT_USER_KEY {
                return Err(StorageError::Poisoned);
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_persist_session_stores_both_keys() {
        let storage = Arc::new(MemoryStorage::new());
        let api = client_with(storage.clone());
        api.persist_session("t", &json!({"firstName": "Ana"})).unwrap();

        assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("t"));
        assert_eq!(
            storage.get(CURRENT_USER_KEY).unwrap().as_deref(),
            Some(r#"{"firstName":"Ana"}"#)
        );
    }

    #[test]
    fn test_persist_session_rolls_back_token_when_user_write_fails() {
        let storage = Arc::new(UserWriteFails::default());
        let api = client_with(storage.clone());

        let err = api
            .persist_session("t", &json!({"firstName": "Ana"}))
            .unwrap_err();

        assert!(matches!(err, ApiError::Storage(StorageError::Poisoned)));
        assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap(), None);
        assert_eq!(storage.get(CURRENT_USER_KEY).unwrap(), None);
        assert!(!api.is_authenticated());
    }

    #[test]
    fn test_stored_token_ignores_empty_value() {
        let storage = Arc::new(MemoryStorage::new());
        let api = client_with(storage.clone());
        assert!(!api.is_authenticated());

        storage.set(AUTH_TOKEN_KEY, "").unwrap();
        assert!(!api.is_authenticated());

        storage.set(AUTH_TOKEN_KEY, "abc123").unwrap();
        assert!(api.is_authenticated());
        assert_eq!(api.stored_token().unwrap().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_current_user_parses_stored_json() {
        let storage = Arc::new(MemoryStorage::new());
        let api = client_with(storage.clone());
        assert_eq!(api.current_user().unwrap(), None);

        storage
            .set(CURRENT_USER_KEY, r#"{"firstName":"Ana","lastName":"Lee","role":"vet"}"#)
            .unwrap();
        let user = api.current_user().unwrap().unwrap();
        assert_eq!(user.display_name(), "Ana Lee");
    }

    #[test]
    fn test_current_user_reports_corruption() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(CURRENT_USER_KEY, "{not json").unwrap();
        let err = client_with(storage).current_user().unwrap_err();
        assert!(matches!(err, ApiError::CorruptSession(_)));
    }

    #[test]
    fn test_logout_clears_both_keys() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(AUTH_TOKEN_KEY, "abc123").unwrap();
        storage.set(CURRENT_USER_KEY, "{}").unwrap();

        let api = client_with(storage.clone());
        api.logout().unwrap();
        api.logout().unwrap();

        assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap(), None);
        assert_eq!(storage.get(CURRENT_USER_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_validate_without_token_skips_request() {
        let api = client_with(Arc::new(MemoryStorage::new()));
        assert!(!api.validate_token("ana").await.unwrap());
    }
}
