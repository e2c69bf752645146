use serde::{Deserialize, Serialize};

use super::User;

/// Credentials posted to `/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account name.
    pub username: String,
    /// Plain-text password; only ever sent over the wire.
    pub password: String,
}

/// New account posted to `/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Account name, unique on the backend.
    pub username: String,
    /// Plain-text password.
    pub password: String,
    /// Contact address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Requested role; the backend picks its default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Body returned by `/auth/login` and `/auth/register`.
///
/// Every field is optional: the session store copies whatever the backend
/// sends and treats a missing token as "not signed in".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// Human readable outcome, e.g. `Login successful`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Bearer token for subsequent requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// The authenticated account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Body posted to `/auth/validate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenValidationRequest {
    /// Token to check.
    pub token: String,
    /// Account the token was issued to.
    pub username: String,
}

/// Answer from `/auth/validate`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenValidation {
    /// Whether the backend still accepts the token.
    pub valid: bool,
}
