//! # Record Loader
//!
//! Fetches one record and seeds the [`EditSession`] for it. A load failure is
//! terminal for the session: no session exists, so no partial form is ever
//! rendered from a broken record. The error type is distinct from validation
//! and commit errors so a host can show a blocking error view with a path
//! back to the list.

use crate::editor::EditSession;
use crate::model::Game;
use resource_client::{ClientError, ResourceClient};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Why an edit session could not be opened.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoadError {
    /// The remote reports no record under this id.
    #[error("Game {0} does not exist")]
    NotFound(String),

    /// Any other remote failure.
    #[error("Could not load game: {0}")]
    Remote(ClientError),
}

/// Thin fetch-and-seed layer over the resource client.
pub struct RecordLoader {
    client: Arc<dyn ResourceClient<Game>>,
}

impl RecordLoader {
    pub fn new(client: Arc<dyn ResourceClient<Game>>) -> Self {
        Self { client }
    }

    /// Loads the record and seeds a session from it.
    #[instrument(skip(self))]
    pub async fn load(&self, id: &str) -> Result<EditSession, LoadError> {
        debug!("Loading record");
        match self.client.fetch_one(id).await {
            Ok(game) => Ok(EditSession::seed(&game)),
            Err(ClientError::NotFound) => {
                warn!("Record missing");
                Err(LoadError::NotFound(id.to_string()))
            }
            Err(error) => {
                warn!(%error, "Load failed");
                Err(LoadError::Remote(error))
            }
        }
    }
}
