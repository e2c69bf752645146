//! Observable session state.
//!
//! [`SessionStore`] wraps an [`ApiClient`] and mirrors the two storage keys in
//! memory. Every change is published through a [`tokio::sync::watch`] channel
//! so front ends can re-render from [`SessionStore::subscribe`].

use shared::models::{AuthResponse, LoginRequest, RegisterRequest, User};
use tokio::sync::{Mutex, watch};
use tracing::{error, info, warn};

use crate::{
    api::ApiClient,
    error::ApiError,
    storage::{AUTH_TOKEN_KEY, CURRENT_USER_KEY},
};

/// In-memory view of the signed-in session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Signed-in account.
    pub user: Option<User>,
    /// Bearer token.
    pub token: Option<String>,
    /// True while a login or registration is in flight.
    pub is_loading: bool,
    /// Message of the last failed login or registration.
    pub error: Option<String>,
}

impl Session {
    /// Signed in when a token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Role of the signed-in user.
    #[must_use]
    pub fn user_role(&self) -> Option<&str> {
        self.user.as_ref().and_then(|user| user.role.as_deref())
    }

    /// `"First Last"`, or an empty string when nobody is signed in.
    #[must_use]
    pub fn user_name(&self) -> String {
        self.user.as_ref().map(User::display_name).unwrap_or_default()
    }
}

/// Session state container shared by every view.
#[derive(Debug)]
pub struct SessionStore {
    api: ApiClient,
    state: watch::Sender<Session>,
    auth_guard: Mutex<()>,
}

impl SessionStore {
    /// Creates an anonymous store. Call [`SessionStore::initialize_auth`] to
    /// pick up a persisted session.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let (state, _) = watch::channel(Session::default());
        Self {
            api,
            state,
            auth_guard: Mutex::new(()),
        }
    }

    /// The gateway used for every request.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Loads the persisted session into memory.
    ///
    /// With both keys present the token and user are restored; with neither
    /// the session stays anonymous. Calling it again with unchanged storage
    /// produces the same state.
    ///
    /// # Errors
    /// * [`ApiError::CorruptSession`] if only one key is present or the user
    ///   record does not decode. Both keys are cleared and the session is
    ///   left anonymous.
    /// * [`ApiError::Storage`] if storage cannot be read.
    pub fn initialize_auth(&self) -> Result<(), ApiError> {
        let storage = self.api.storage();
        let token = storage.get(AUTH_TOKEN_KEY)?.filter(|token| !token.is_empty());
        let user = storage.get(CURRENT_USER_KEY)?;

        match (token, user) {
            (Some(token), Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    self.state.send_modify(|session| {
                        session.token = Some(token);
                        session.user = Some(user);
                    });
                    Ok(())
                }
                Err(err) => self.discard_session(format!("stored user is unreadable: {err}")),
            },
            (None, None) => {
                self.state.send_if_modified(|session| {
                    let changed = session.token.is_some() || session.user.is_some();
                    session.token = None;
                    session.user = None;
                    changed
                });
                Ok(())
            }
            (Some(_), None) => self.discard_session(format!("`{CURRENT_USER_KEY}` is missing")),
            (None, Some(_)) => self.discard_session(format!("`{AUTH_TOKEN_KEY}` is missing")),
        }
    }

    /// Signs in through the gateway and records the outcome.
    ///
    /// # Errors
    /// [`ApiError::Busy`] if another login or registration is in flight;
    /// otherwise the gateway error, whose message is also kept in
    /// [`Session::error`].
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let _guard = self.auth_guard.try_lock().map_err(|_| ApiError::Busy)?;
        let _loading = self.begin();
        let result = self.api.login(credentials).await;
        self.settle("login", result)
    }

    /// Registers through the gateway and records the outcome.
    ///
    /// # Errors
    /// Same as [`SessionStore::login`].
    pub async fn register(&self, user: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let _guard = self.auth_guard.try_lock().map_err(|_| ApiError::Busy)?;
        let _loading = self.begin();
        let result = self.api.register(user).await;
        self.settle("registration", result)
    }

    /// Forgets the session in storage and in memory.
    ///
    /// Waits for an in-flight login or registration to settle first. Storage
    /// failures are logged; the in-memory session is reset regardless.
    pub async fn logout(&self) {
        let _guard = self.auth_guard.lock().await;
        if let Err(err) = self.api.logout() {
            error!(error = %err, "failed to clear stored session");
        }
        self.state.send_modify(|session| {
            session.user = None;
            session.token = None;
            session.error = None;
        });
        info!("signed out");
    }

    /// Drops the last error message.
    pub fn clear_error(&self) {
        self.state.send_if_modified(|session| session.error.take().is_some());
    }

    fn begin(&self) -> LoadingGuard<'_> {
        self.state.send_modify(|session| {
            session.is_loading = true;
            session.error = None;
        });
        LoadingGuard { state: &self.state }
    }

    fn settle(
        &self,
        action: &str,
        result: Result<AuthResponse, ApiError>,
    ) -> Result<AuthResponse, ApiError> {
        match &result {
            Ok(response) => {
                self.state.send_modify(|session| {
                    session.is_loading = false;
                    session.token = response.token.clone().filter(|token| !token.is_empty());
                    session.user = response.user.clone();
                });
                info!(action, "authentication succeeded");
            }
            Err(err) => {
                let message = err.to_string();
                warn!(action, error = %message, "authentication failed");
                self.state.send_modify(|session| {
                    session.is_loading = false;
                    session.error = Some(message);
                });
            }
        }
        result
    }

    fn discard_session(&self, reason: String) -> Result<(), ApiError> {
        warn!(reason = %reason, "discarding inconsistent stored session");
        if let Err(err) = self.api.logout() {
            error!(error = %err, "failed to clear stored session");
        }
        self.state.send_modify(|session| {
            session.token = None;
            session.user = None;
        });
        Err(ApiError::CorruptSession(reason))
    }
}

/// Clears [`Session::is_loading`] when a login or registration ends, including
/// when its future is dropped before settling.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<Session>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state
            .send_if_modified(|session| std::mem::replace(&mut session.is_loading, false));
    }
}
