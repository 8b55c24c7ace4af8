//! Record endpoints
//!
//! Every record type shares the same REST shape under its collection path,
//! so these methods are generic over [`Record`].

use crate::BackendClient;
use crate::error::Result;
use sparktest_core::Record;
use tracing::debug;

impl BackendClient {
    // =============================================================================
    // Record Management
    // =============================================================================

    /// List all records of a type
    ///
    /// `GET {collection}`
    pub async fn list_records<T: Record>(&self) -> Result<Vec<T>> {
        let url = self.url(T::KIND.api_path());
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Get a record by ID
    ///
    /// `GET {collection}/{id}`. A 404 is reported as `Ok(None)`.
    pub async fn get_record<T: Record>(&self, id: &str) -> Result<Option<T>> {
        let url = self.record_url::<T>(id);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        self.handle_optional_response(response).await
    }

    /// Create a record
    ///
    /// `POST {collection}`
    ///
    /// # Returns
    /// The record as stored by the backend
    pub async fn create_record<T: Record>(&self, record: &T) -> Result<T> {
        let url = self.url(T::KIND.api_path());
        debug!("POST {} ({})", url, record.id());
        let response = self.client.post(&url).json(record).send().await?;

        self.handle_response(response).await
    }

    /// Replace an existing record
    ///
    /// `PUT {collection}/{id}`
    pub async fn update_record<T: Record>(&self, record: &T) -> Result<T> {
        let url = self.record_url::<T>(record.id());
        debug!("PUT {}", url);
        let response = self.client.put(&url).json(record).send().await?;

        self.handle_response(response).await
    }

    /// Delete a record
    ///
    /// `DELETE {collection}/{id}`. A 404 means the record is already gone and
    /// is not an error.
    pub async fn delete_record<T: Record>(&self, id: &str) -> Result<()> {
        let url = self.record_url::<T>(id);
        debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }

        self.handle_empty_response(response).await
    }

    fn record_url<T: Record>(&self, id: &str) -> String {
        format!("{}/{}", self.url(T::KIND.api_path()), id)
    }
}
