//! # Generic Client Contract
//!
//! The [`ResourceClient`] trait is the single seam between the editing core
//! and the network. Production code holds an `Arc<dyn ResourceClient<T>>`
//! backed by [`RestClient`](crate::rest::RestClient); tests inject a
//! [`MockClient`](crate::mock::MockClient). Nothing above this trait knows
//! which one it is talking to.

use crate::error::ClientError;
use crate::resource::RemoteResource;
use async_trait::async_trait;

/// Uniform async CRUD over a remote collection of `T`.
///
/// # Contract
/// - One remote call per invocation; no implicit retries.
/// - The caller suspends until the remote responds; no timeout is enforced at
///   this layer.
/// - `update` carries a sparse field set: the remote store merges it into the
///   stored record server-side. The client never merges locally, to avoid
///   divergence from server-side truth.
#[async_trait]
pub trait ResourceClient<T: RemoteResource>: Send + Sync {
    /// Creates a record; returns the stored record, id assigned by the remote.
    async fn create(&self, record: T::Create) -> Result<T, ClientError>;

    /// Fetches the whole collection. Not restartable; call again to re-fetch.
    async fn fetch_all(&self) -> Result<Vec<T>, ClientError>;

    /// Fetches one record by id. A remote 404 maps to [`ClientError::NotFound`].
    async fn fetch_one(&self, id: &str) -> Result<T, ClientError>;

    /// Applies a sparse (or full) field set to the record; returns the merged
    /// record as the remote now stores it.
    async fn update(&self, id: &str, patch: T::Patch) -> Result<T, ClientError>;

    /// Deletes one record by id.
    async fn delete(&self, id: &str) -> Result<(), ClientError>;
}
