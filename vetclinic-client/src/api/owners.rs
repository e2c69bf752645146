use serde::Serialize;
use shared::models::Owner;

use super::ApiClient;
use crate::error::ApiError;

const OWNERS_PATH: &str = "/owners";

fn owner_path(id: i64) -> String {
    format!("{OWNERS_PATH}/{id}")
}

impl ApiClient {
    /// `GET /owners`
    ///
    /// # Errors
    /// See [`ApiClient::request`]; a body that is not a list of owners is
    /// reported as [`ApiError::MalformedResponse`].
    pub async fn owners(&self) -> Result<Vec<Owner>, ApiError> {
        self.get_as(OWNERS_PATH).await
    }

    /// `GET /owners/{id}`
    ///
    /// # Errors
    /// See [`ApiClient::owners`].
    pub async fn owner(&self, id: i64) -> Result<Owner, ApiError> {
        self.get_as(&owner_path(id)).await
    }

    /// `POST /owners`
    ///
    /// # Errors
    /// See [`ApiClient::owners`].
    pub async fn create_owner<B: Serialize + ?Sized>(&self, owner: &B) -> Result<Owner, ApiError> {
        self.post_as(OWNERS_PATH, owner).await
    }

    /// `PUT /owners/{id}`
    ///
    /// # Errors
    /// See [`ApiClient::owners`].
    pub async fn update_owner<B: Serialize + ?Sized>(
        &self,
        id: i64,
        owner: &B,
    ) -> Result<Owner, ApiError> {
        self.put_as(&owner_path(id), owner).await
    }

    /// `DELETE /owners/{id}`
    ///
    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn delete_owner(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&owner_path(id)).await.map(|_| ())
    }
}
