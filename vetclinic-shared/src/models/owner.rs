use serde::{Deserialize, Serialize};

use super::ExtraFields;

/// A pet owner (client of the clinic).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    /// Backend identifier.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Contact address, unique per owner.
    pub email: String,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Postal address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Fields the backend sent that are not modelled above.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Body for creating or updating an owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OwnerData {
    /// Full name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Postal address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}
