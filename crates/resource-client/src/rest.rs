//! # REST Implementation
//!
//! [`RestClient`] maps the [`ResourceClient`](crate::client::ResourceClient)
//! contract onto an HTTP/JSON collection:
//!
//! | Operation   | Method | Path                  |
//! |-------------|--------|-----------------------|
//! | `fetch_all` | GET    | `/{collection}`       |
//! | `fetch_one` | GET    | `/{collection}/{id}`  |
//! | `create`    | POST   | `/{collection}`       |
//! | `update`    | PUT    | `/{collection}/{id}`  |
//! | `delete`    | DELETE | `/{collection}/{id}`  |
//!
//! Status mapping: 2xx decodes the body; 404 on `fetch_one` becomes
//! [`ClientError::NotFound`]; any other non-2xx becomes
//! [`ClientError::Remote`]. Errors before a response arrives become
//! [`ClientError::Network`].

use crate::client::ResourceClient;
use crate::error::ClientError;
use crate::resource::RemoteResource;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use tracing::{debug, instrument, warn};

/// HTTP client for one remote collection.
///
/// Cheap to clone; the inner `reqwest::Client` is a shared connection pool.
#[derive(Debug, Clone)]
pub struct RestClient<T: RemoteResource> {
    http: reqwest::Client,
    base_url: String,
    _resource: PhantomData<fn() -> T>,
}

impl<T: RemoteResource> RestClient<T> {
    /// Creates a client rooted at `base_url` (e.g. `http://localhost:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    /// Creates a client with a caller-configured `reqwest::Client` (shared
    /// pools, custom timeouts).
    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            _resource: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, T::COLLECTION)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, T::COLLECTION, id)
    }

    /// Decodes a success body, naming decode failures as such.
    async fn decode<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, ClientError> {
        response
            .json::<R>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Maps a non-success status, optionally treating 404 as `NotFound`.
    fn status_error(status: StatusCode, not_found_is_missing: bool) -> ClientError {
        if not_found_is_missing && status == StatusCode::NOT_FOUND {
            ClientError::NotFound
        } else {
            ClientError::Remote {
                status: status.as_u16(),
            }
        }
    }
}

#[async_trait]
impl<T: RemoteResource> ResourceClient<T> for RestClient<T> {
    #[instrument(skip(self, record), fields(collection = T::COLLECTION))]
    async fn create(&self, record: T::Create) -> Result<T, ClientError> {
        debug!(payload = ?record, "POST");
        let response = self
            .http
            .post(self.collection_url())
            .json(&record)
            .send()
            .await
            .map_err(ClientError::network)?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Create rejected");
            return Err(Self::status_error(status, false));
        }
        Self::decode(response).await
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn fetch_all(&self) -> Result<Vec<T>, ClientError> {
        debug!("GET collection");
        let response = self
            .http
            .get(self.collection_url())
            .send()
            .await
            .map_err(ClientError::network)?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Fetch-all rejected");
            return Err(Self::status_error(status, false));
        }
        Self::decode(response).await
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn fetch_one(&self, id: &str) -> Result<T, ClientError> {
        debug!(%id, "GET");
        let response = self
            .http
            .get(self.item_url(id))
            .send()
            .await
            .map_err(ClientError::network)?;
        let status = response.status();
        if !status.is_success() {
            warn!(%id, %status, "Fetch rejected");
            return Err(Self::status_error(status, true));
        }
        Self::decode(response).await
    }

    #[instrument(skip(self, patch), fields(collection = T::COLLECTION))]
    async fn update(&self, id: &str, patch: T::Patch) -> Result<T, ClientError> {
        debug!(%id, payload = ?patch, "PUT");
        let response = self
            .http
            .put(self.item_url(id))
            .json(&patch)
            .send()
            .await
            .map_err(ClientError::network)?;
        let status = response.status();
        if !status.is_success() {
            warn!(%id, %status, "Update rejected");
            return Err(Self::status_error(status, false));
        }
        Self::decode(response).await
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        debug!(%id, "DELETE");
        let response = self
            .http
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(ClientError::network)?;
        let status = response.status();
        if !status.is_success() {
            warn!(%id, %status, "Delete rejected");
            return Err(Self::status_error(status, false));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Deserialize)]
    struct Note {
        id: String,
    }

    #[derive(Debug, Serialize)]
    struct NoteCreate;

    #[derive(Debug, Serialize)]
    struct NotePatch;

    impl RemoteResource for Note {
        type Create = NoteCreate;
        type Patch = NotePatch;
        const COLLECTION: &'static str = "notes";

        fn id(&self) -> &str {
            &self.id
        }
    }

    #[test]
    fn urls_join_without_double_slash() {
        let client = RestClient::<Note>::new("http://localhost:3000/");
        assert_eq!(client.collection_url(), "http://localhost:3000/notes");
        assert_eq!(client.item_url("7"), "http://localhost:3000/notes/7");
    }

    #[test]
    fn not_found_only_maps_when_asked() {
        let err = RestClient::<Note>::status_error(StatusCode::NOT_FOUND, true);
        assert_eq!(err, ClientError::NotFound);

        let err = RestClient::<Note>::status_error(StatusCode::NOT_FOUND, false);
        assert_eq!(err, ClientError::Remote { status: 404 });

        let err = RestClient::<Note>::status_error(StatusCode::INTERNAL_SERVER_ERROR, true);
        assert_eq!(err, ClientError::Remote { status: 500 });
    }
}
