use serde::Serialize;
use shared::models::Pet;

use super::ApiClient;
use crate::error::ApiError;

const PETS_PATH: &str = "/pets";

fn pet_path(id: i64) -> String {
    format!("{PETS_PATH}/{id}")
}

impl ApiClient {
    /// `GET /pets`
    ///
    /// # Errors
    /// See [`ApiClient::request`]; a body that is not a list of pets is
    /// reported as [`ApiError::MalformedResponse`].
    pub async fn pets(&self) -> Result<Vec<Pet>, ApiError> {
        self.get_as(PETS_PATH).await
    }

    /// `GET /pets/{id}`
    ///
    /// # Errors
    /// See [`ApiClient::pets`].
    pub async fn pet(&self, id: i64) -> Result<Pet, ApiError> {
        self.get_as(&pet_path(id)).await
    }

    /// `GET /pets/owner/{owner_id}`
    ///
    /// # Errors
    /// See [`ApiClient::pets`].
    pub async fn pets_by_owner(&self, owner_id: i64) -> Result<Vec<Pet>, ApiError> {
        self.get_as(&format!("{PETS_PATH}/owner/{owner_id}")).await
    }

    /// `GET /pets/species/{species}`; the species is percent-encoded.
    ///
    /// # Errors
    /// See [`ApiClient::pets`].
    pub async fn pets_by_species(&self, species: &str) -> Result<Vec<Pet>, ApiError> {
        let path = format!("{PETS_PATH}/species/{}", urlencoding::encode(species));
        self.get_as(&path).await
    }

    /// `POST /pets`
    ///
    /// # Errors
    /// See [`ApiClient::pets`].
    pub async fn create_pet<B: Serialize + ?Sized>(&self, pet: &B) -> Result<Pet, ApiError> {
        self.post_as(PETS_PATH, pet).await
    }

    /// `PUT /pets/{id}`
    ///
    /// # Errors
    /// See [`ApiClient::pets`].
    pub async fn update_pet<B: Serialize + ?Sized>(&self, id: i64, pet: &B) -> Result<Pet, ApiError> {
        self.put_as(&pet_path(id), pet).await
    }

    /// `DELETE /pets/{id}`
    ///
    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn delete_pet(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&pet_path(id)).await.map(|_| ())
    }
}
