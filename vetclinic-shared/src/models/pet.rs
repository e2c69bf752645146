use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{ExtraFields, Owner};

/// A patient of the clinic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// Backend identifier.
    pub id: i64,
    /// Name the pet answers to.
    pub name: String,
    /// Species label, e.g. `dog` or `cat`.
    pub species: String,
    /// Breed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    /// Age in years.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    /// Weight in kilograms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Coat or plumage colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// The owner record embedded by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    /// Last modification time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
    /// Fields the backend sent that are not modelled above.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Reference to an existing owner by id, as the backend expects inside a pet body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OwnerRef {
    /// Owner identifier.
    pub id: i64,
}

/// Body for creating or updating a pet.
///
/// Only `name` is mandatory on the client side; the backend decides what else
/// it requires.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PetData {
    /// Name the pet answers to.
    pub name: String,
    /// Species label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    /// Breed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    /// Age in years.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    /// Weight in kilograms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Coat or plumage colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Owner identifier in flat form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
    /// Owner identifier in the nested form the backend binds to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerRef>,
}

impl PetData {
    /// Pet body naming its owner both as `ownerId` and as a nested `owner` reference.
    pub fn for_owner(name: impl Into<String>, owner_id: i64) -> Self {
        Self {
            name: name.into(),
            owner_id: Some(owner_id),
            owner: Some(OwnerRef { id: owner_id }),
            ..Self::default()
        }
    }
}
