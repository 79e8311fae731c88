//! # Resource Client
//!
//! A uniform, async CRUD contract over a remote JSON collection, plus the two
//! implementations the rest of the workspace builds on:
//!
//! - **[`RemoteResource`]**: the trait a domain type implements to describe its
//!   collection (path segment, create payload, partial-update payload).
//! - **[`ResourceClient`]**: the five-operation contract (`create`, `fetch_all`,
//!   `fetch_one`, `update`, `delete`). One remote call per invocation, no
//!   implicit retries, no timeouts at this layer.
//! - **[`RestClient`]**: the production implementation over HTTP/JSON.
//! - **[`mock::MockClient`]**: an expectation-based test double that records
//!   every call it receives.
//!
//! The client carries no business logic. In particular, `update` sends a
//! *sparse* field set and trusts the remote store to merge it into the stored
//! record; the client never merges locally.

pub mod client;
pub mod error;
pub mod mock;
pub mod resource;
pub mod rest;

pub use client::ResourceClient;
pub use error::ClientError;
pub use resource::RemoteResource;
pub use rest::RestClient;
