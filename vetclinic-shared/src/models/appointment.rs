use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use super::{ExtraFields, Pet};

/// Lifecycle of an appointment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    /// Booked and not yet held.
    Scheduled,
    /// Held.
    Completed,
    /// Called off.
    Cancelled,
}

impl AppointmentStatus {
    /// Wire form used in bodies and in `/appointments/status/{status}`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_uppercase();
        Self::iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| {
                format!("unknown appointment status `{value}` (expected scheduled, completed or cancelled)")
            })
    }
}

/// A veterinarian as embedded in appointment records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Veterinarian {
    /// Backend identifier.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Field of practice, e.g. surgery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    /// Contact address.
    pub email: String,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Fields the backend sent that are not modelled above.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// A treatment recorded during an appointment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    /// Backend identifier.
    pub id: i64,
    /// What was found.
    pub diagnosis: String,
    /// What was done about it.
    pub treatment: String,
    /// Price charged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the treatment was recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    /// Fields the backend sent that are not modelled above.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// A booked visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Backend identifier.
    pub id: i64,
    /// The patient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet: Option<Pet>,
    /// The attending veterinarian.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veterinarian: Option<Veterinarian>,
    /// Local date and time of the visit.
    pub appointment_date_time: NaiveDateTime,
    /// Why the visit was booked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Current lifecycle state.
    pub status: AppointmentStatus,
    /// Treatments recorded so far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatments: Option<Vec<Treatment>>,
    /// Fields the backend sent that are not modelled above.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Body for booking or rescheduling an appointment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentData {
    /// Patient identifier.
    pub pet_id: i64,
    /// Veterinarian identifier.
    pub veterinarian_id: i64,
    /// Local date and time of the visit.
    pub appointment_date_time: NaiveDateTime,
    /// Why the visit is booked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Body for `PUT /appointments/{id}/status`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppointmentStatusUpdate {
    /// New lifecycle state.
    pub status: AppointmentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!(
            "completed".parse::<AppointmentStatus>().unwrap(),
            AppointmentStatus::Completed
        );
        assert_eq!(
            " Cancelled ".parse::<AppointmentStatus>().unwrap(),
            AppointmentStatus::Cancelled
        );
        assert!("postponed".parse::<AppointmentStatus>().is_err());
    }

    #[test]
    fn test_status_roundtrip() {
        for status in AppointmentStatus::iter() {
            assert_eq!(status.to_string().parse::<AppointmentStatus>(), Ok(status));
            assert_eq!(
                serde_json::to_value(status).unwrap(),
                json!(status.as_str())
            );
        }
    }

    #[test]
    fn test_appointment_decoding() {
        let appointment: Appointment = serde_json::from_value(json!({
            "id": 5,
            "pet": {"id": 11, "name": "Rex", "species": "dog"},
            "veterinarian": {"id": 2, "name": "Dr. Petrovic", "email": "vet@clinic.test"},
            "appointmentDateTime": "2024-05-01T10:30:00",
            "reason": "vaccination",
            "status": "SCHEDULED",
            "treatments": [
                {"id": 1, "diagnosis": "healthy", "treatment": "rabies shot", "cost": 35.0}
            ]
        }))
        .unwrap();

        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
        assert_eq!(appointment.pet.as_ref().map(|pet| pet.id), Some(11));
        assert_eq!(appointment.treatments.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_appointment_data_serialization() {
        let data = AppointmentData {
            pet_id: 11,
            veterinarian_id: 2,
            appointment_date_time: "2024-05-01T10:30:00".parse().unwrap(),
            reason: None,
        };
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({"petId": 11, "veterinarianId": 2, "appointmentDateTime": "2024-05-01T10:30:00"})
        );
    }
}
