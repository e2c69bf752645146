use serde::{Deserialize, Serialize};

use super::ExtraFields;

/// The signed-in account as returned by `/auth/login` and `/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Login name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Contact address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Given name.
    pub first_name: String,

    /// Family name.
    pub last_name: String,

    /// Role label assigned by the backend (for example `vet` or `admin`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Fields the backend sent that are not modelled above.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl User {
    /// First and last name joined by a single space.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
