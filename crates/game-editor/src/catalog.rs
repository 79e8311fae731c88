//! # Game Catalog
//!
//! The flows behind the non-edit pages: list, validated create, find-one, and
//! remove. Confirmation is not this layer's business — removal is a plain
//! operation, and the hosting UI decides whether and how to ask first.

use crate::model::{FieldValues, Game};
use crate::validate::{validate_record, ValidationReport};
use resource_client::{ClientError, ResourceClient};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Errors from catalog flows.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum CatalogError {
    /// The draft failed whole-record validation; no remote call was made.
    /// Carries every field error at once.
    #[error("Validation failed for {} field(s)", .0.len())]
    Invalid(ValidationReport),

    /// The remote call failed.
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Collection-level operations over the remote store.
pub struct GameCatalog {
    client: Arc<dyn ResourceClient<Game>>,
}

impl GameCatalog {
    pub fn new(client: Arc<dyn ResourceClient<Game>>) -> Self {
        Self { client }
    }

    /// Fetches the whole collection.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Game>, CatalogError> {
        let games = self.client.fetch_all().await?;
        debug!(count = games.len(), "Listed games");
        Ok(games)
    }

    /// Validates a draft and, only if every field passes, creates the record.
    #[instrument(skip(self, draft))]
    pub async fn add(&self, draft: &FieldValues) -> Result<Game, CatalogError> {
        let report = validate_record(draft);
        if !report.is_empty() {
            warn!(fields = report.len(), "Create rejected");
            return Err(CatalogError::Invalid(report));
        }
        let create = draft.to_create().map_err(CatalogError::Invalid)?;
        let game = self.client.create(create).await?;
        info!(game_id = %game.id, "Game created");
        Ok(game)
    }

    /// Fetches one record by id.
    #[instrument(skip(self))]
    pub async fn find(&self, id: &str) -> Result<Game, CatalogError> {
        Ok(self.client.fetch_one(id).await?)
    }

    /// Removes one record by id.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<(), CatalogError> {
        self.client.delete(id).await?;
        info!(game_id = %id, "Game removed");
        Ok(())
    }
}
