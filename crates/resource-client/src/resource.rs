//! # RemoteResource Trait
//!
//! The contract a domain type implements to be served by a [`ResourceClient`].
//!
//! # Architecture Note
//! By describing a collection through associated types (`Create`, `Patch`) and
//! a path constant, the client logic is written *once* and reused for any
//! resource. The associated types enforce payload safety: a `Game` client
//! cannot be handed some other resource's create payload, the compiler rejects
//! it.
//!
//! [`ResourceClient`]: crate::client::ResourceClient

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// A record type that lives in a remote JSON collection.
///
/// Implementors describe where the collection lives (`COLLECTION`) and which
/// payloads the remote accepts for creation and partial update. The record
/// itself is what the remote returns on every successful call.
pub trait RemoteResource: DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Payload accepted by `POST /{COLLECTION}`. Always a full record sans id.
    type Create: Serialize + Debug + Send + Sync;

    /// Payload accepted by `PUT /{COLLECTION}/{id}`. May be sparse; absent
    /// fields are left untouched by the remote store's server-side merge.
    type Patch: Serialize + Debug + Send + Sync;

    /// The collection path segment, e.g. `"games"`.
    const COLLECTION: &'static str;

    /// The opaque identifier assigned by the remote store.
    fn id(&self) -> &str;
}
