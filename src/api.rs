// REST client for the remote player collection.
//
// Thin wrapper over a shared `reqwest::Client`. Every operation is a single
// request; any non-success status is reported uniformly without reading the
// response body. Retries, timeouts, and cancellation are deliberately absent.

use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use crate::player::PlayerRecord;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Resource segment under the API base path.
const RESOURCE: &str = "futbolista";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiError {
    /// Any non-success HTTP status. 4xx and 5xx are not distinguished and
    /// the response body is not consulted.
    #[error("network response was not ok (status {0})")]
    Status(StatusCode),

    /// Connection, protocol, or body-decode failure from the transport.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
}

// ---------------------------------------------------------------------------
// PlayerApi
// ---------------------------------------------------------------------------

/// Client for the player collection endpoint.
pub struct PlayerApi {
    http: reqwest::Client,
    base_url: String,
}

impl PlayerApi {
    /// Create a client for the given API base URL (e.g.
    /// `http://localhost:8080/api/v1`). A trailing slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        PlayerApi {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, RESOURCE)
    }

    fn record_url(&self, id: u32) -> String {
        format!("{}/{}/{}", self.base_url, RESOURCE, id)
    }

    /// Read the entire collection, in server order.
    pub async fn list(&self) -> Result<Vec<PlayerRecord>, ApiError> {
        let url = self.collection_url();
        debug!(%url, "GET collection");
        let response = self.http.get(&url).send().await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }

    /// Point read of one record.
    pub async fn fetch(&self, id: u32) -> Result<PlayerRecord, ApiError> {
        let url = self.record_url(id);
        debug!(%url, "GET record");
        let response = self.http.get(&url).send().await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }

    /// Create a record. The submitted identifier is ignored by the server;
    /// the returned record carries the server-assigned one.
    pub async fn create(&self, record: &PlayerRecord) -> Result<PlayerRecord, ApiError> {
        let url = self.collection_url();
        debug!(%url, "POST record");
        let response = self.http.post(&url).json(record).send().await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }

    /// Delete one record by identifier. The response body, if any, is
    /// ignored.
    pub async fn delete(&self, id: u32) -> Result<(), ApiError> {
        let url = self.record_url(id);
        debug!(%url, "DELETE record");
        let response = self.http.delete(&url).send().await?;
        check_status(response)?;
        Ok(())
    }
}

/// Map any non-success status to the uniform failure.
fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status(status));
    }
    Ok(response)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
