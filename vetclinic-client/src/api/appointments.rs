use reqwest::Method;
use serde::Serialize;
use shared::models::{Appointment, AppointmentStatus, AppointmentStatusUpdate};

use super::{ApiClient, RequestOptions};
use crate::error::ApiError;

const APPOINTMENTS_PATH: &str = "/appointments";

fn appointment_path(id: i64) -> String {
    format!("{APPOINTMENTS_PATH}/{id}")
}

impl ApiClient {
    /// `GET /appointments`
    ///
    /// # Errors
    /// See [`ApiClient::request`]; a body that is not a list of appointments
    /// is reported as [`ApiError::MalformedResponse`].
    pub async fn appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        self.get_as(APPOINTMENTS_PATH).await
    }

    /// `GET /appointments/{id}`
    ///
    /// # Errors
    /// See [`ApiClient::appointments`].
    pub async fn appointment(&self, id: i64) -> Result<Appointment, ApiError> {
        self.get_as(&appointment_path(id)).await
    }

    /// `GET /appointments/pet/{pet_id}`
    ///
    /// # Errors
    /// See [`ApiClient::appointments`].
    pub async fn appointments_by_pet(&self, pet_id: i64) -> Result<Vec<Appointment>, ApiError> {
        self.get_as(&format!("{APPOINTMENTS_PATH}/pet/{pet_id}")).await
    }

    /// `GET /appointments/veterinarian/{veterinarian_id}`
    ///
    /// # Errors
    /// See [`ApiClient::appointments`].
    pub async fn appointments_by_veterinarian(
        &self,
        veterinarian_id: i64,
    ) -> Result<Vec<Appointment>, ApiError> {
        self.get_as(&format!("{APPOINTMENTS_PATH}/veterinarian/{veterinarian_id}"))
            .await
    }

    /// `GET /appointments/status/{status}`
    ///
    /// # Errors
    /// See [`ApiClient::appointments`].
    pub async fn appointments_by_status(
        &self,
        status: AppointmentStatus,
    ) -> Result<Vec<Appointment>, ApiError> {
        self.get_as(&format!("{APPOINTMENTS_PATH}/status/{status}"))
            .await
    }

    /// `GET /appointments/today`
    ///
    /// # Errors
    /// See [`ApiClient::appointments`].
    pub async fn todays_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        self.get_as(&format!("{APPOINTMENTS_PATH}/today")).await
    }

    /// `POST /appointments`
    ///
    /// # Errors
    /// See [`ApiClient::appointments`].
    pub async fn create_appointment<B: Serialize + ?Sized>(
        &self,
        appointment: &B,
    ) -> Result<Appointment, ApiError> {
        self.post_as(APPOINTMENTS_PATH, appointment).await
    }

    /// `PUT /appointments/{id}`
    ///
    /// # Errors
    /// See [`ApiClient::appointments`].
    pub async fn update_appointment<B: Serialize + ?Sized>(
        &self,
        id: i64,
        appointment: &B,
    ) -> Result<Appointment, ApiError> {
        self.put_as(&appointment_path(id), appointment).await
    }

    /// `PUT /appointments/{id}/status`
    ///
    /// # Errors
    /// See [`ApiClient::appointments`].
    pub async fn update_appointment_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<Appointment, ApiError> {
        let path = format!("{}/status", appointment_path(id));
        self.put_as(&path, &AppointmentStatusUpdate { status }).await
    }

    /// `PUT /appointments/{id}/cancel` (no body).
    ///
    /// # Errors
    /// See [`ApiClient::appointments`].
    pub async fn cancel_appointment(&self, id: i64) -> Result<Appointment, ApiError> {
        let path = format!("{}/cancel", appointment_path(id));
        self.request(&path, RequestOptions::new(Method::PUT))
            .await?
            .decode(&path)
    }

    /// `DELETE /appointments/{id}`
    ///
    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn delete_appointment(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&appointment_path(id)).await.map(|_| ())
    }
}
