//! Typed records exchanged with the clinic backend.
//!
//! Field names follow the backend's camelCase JSON. Records returned by the
//! backend keep any field they do not model in an `extra` map, so a decoded
//! record serializes back to the JSON it was read from.

pub mod appointment;
pub mod auth;
pub mod errors;
pub mod owner;
pub mod pet;
pub mod user;

pub use appointment::{
    Appointment, AppointmentData, AppointmentStatus, AppointmentStatusUpdate, Treatment,
    Veterinarian,
};
pub use auth::{AuthResponse, LoginRequest, RegisterRequest, TokenValidation, TokenValidationRequest};
pub use errors::ErrorBody;
pub use owner::{Owner, OwnerData};
pub use pet::{OwnerRef, Pet, PetData};
pub use user::User;

/// Map holding the fields of a backend record that are not modelled explicitly.
pub type ExtraFields = serde_json::Map<String, serde_json::Value>;
