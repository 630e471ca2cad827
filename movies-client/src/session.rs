use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::catalog::Catalog;
use crate::client::MoviesClientTrait;
use crate::error::MoviesClientError;
use crate::model::{DraftError, Movie, MovieForm, MovieId};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] DraftError),
    #[error("Movie not found.")]
    NotFound(MovieId),
    #[error(transparent)]
    Client(#[from] MoviesClientError),
}

/// A catalog view bound to one API client.
///
/// Every successful mutation is followed by a full reload, so the cache
/// always mirrors what the server returned last. A failed action leaves the
/// cache as it was.
///
/// A mutation that the server accepted is reported as a success even when
/// the reload after it fails; `is_stale` tells the caller that the cache
/// still holds the snapshot from before.
pub struct CatalogSession<C: MoviesClientTrait> {
    client: C,
    catalog: Catalog,
    stale: bool,
}

impl<C> CatalogSession<C>
where
    C: MoviesClientTrait,
{
    pub fn new(client: C) -> Self {
        Self::with_catalog(client, Catalog::new())
    }

    /// Resumes from a snapshot that was loaded earlier.
    pub fn with_catalog(client: C, catalog: Catalog) -> Self {
        Self {
            client,
            catalog,
            stale: false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    /// True when the last fetch failed and the cache predates it.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn search(&self, query: &str) -> Vec<&Movie> {
        self.catalog.search(query)
    }

    pub async fn load(&mut self) -> Result<&Catalog, CatalogError> {
        let movies = self.client.list_movies().await.map_err(|e| {
            error!("Error fetching movies: {}", e);
            self.stale = true;
            CatalogError::from(e)
        })?;

        debug!(count = movies.len(), "movies loaded");
        self.catalog.replace(movies);
        self.stale = false;
        Ok(&self.catalog)
    }

    /// Reload after a mutation. The mutation already happened, so a failure
    /// here is logged by `load` and only marks the cache stale.
    async fn refresh(&mut self) {
        if self.load().await.is_err() {
            warn!("keeping the previous movie list after a failed reload");
        }
    }

    /// Validates the form, posts it, then reloads. Returns the record the
    /// server created.
    pub async fn create(&mut self, form: &MovieForm) -> Result<Movie, CatalogError> {
        let draft = form.validate()?;

        let created = self.client.create_movie(&draft).await.map_err(|e| {
            error!("Error adding movie: {}", e);
            CatalogError::from(e)
        })?;

        info!(id = %created.id, title = %created.title, "movie added");
        self.refresh().await;
        Ok(created)
    }

    /// Replaces the cached record `id` with the validated form, then reloads.
    pub async fn edit(&mut self, id: &MovieId, form: &MovieForm) -> Result<Movie, CatalogError> {
        let current = self
            .catalog
            .find(id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        let updated = current.with_draft(form.validate()?);

        let saved = self.client.update_movie(&updated).await.map_err(|e| {
            error!("Error updating movie: {}", e);
            CatalogError::from(e)
        })?;

        info!(id = %saved.id, "movie updated");
        self.refresh().await;
        Ok(saved)
    }

    /// Deletes `id` once `confirm` agrees. Returns `false` when the user
    /// declined and nothing was sent.
    pub async fn delete(
        &mut self,
        id: &MovieId,
        confirm: impl FnOnce() -> bool,
    ) -> Result<bool, CatalogError> {
        if !confirm() {
            debug!(id = %id, "delete cancelled");
            return Ok(false);
        }

        self.client.delete_movie(id).await.map_err(|e| {
            error!("Error deleting movie: {}", e);
            CatalogError::from(e)
        })?;

        info!(id = %id, "movie deleted");
        self.refresh().await;
        Ok(true)
    }
}
