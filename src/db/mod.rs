//! Movie record store
//!
//! [`MovieStore`] is the persistence seam between the HTTP handlers and the
//! relational database. Two backends implement it:
//!
//! | Backend | URL scheme |
//! |---|---|
//! | [`PgMovieStore`] | `postgres://`, `postgresql://` |
//! | [`SqliteMovieStore`] | `sqlite:` |
//!
//! Both keep a single `movies` table keyed by a never-reused id.

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Movie, NewMovie},
};

pub mod postgres;
pub mod sqlite;

pub use postgres::PgMovieStore;
pub use sqlite::SqliteMovieStore;

/// Persistence operations over movie records
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieStore: Send + Sync {
    /// Inserts a new record and returns it with its assigned id
    async fn insert(&self, movie: NewMovie) -> AppResult<Movie>;

    /// Replaces title and description of an existing record
    ///
    /// Returns `None` if no record has this id.
    async fn update(&self, movie: Movie) -> AppResult<Option<Movie>>;

    /// Inserts when `id` is absent, updates otherwise
    async fn save(&self, id: Option<i64>, movie: NewMovie) -> AppResult<Option<Movie>> {
        match id {
            None => self.insert(movie).await.map(Some),
            Some(id) => self.update(movie.with_id(id)).await,
        }
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Movie>>;

    /// Removes the record if present. Returns `true` if a row was deleted.
    async fn delete_by_id(&self, id: i64) -> AppResult<bool>;

    /// Case-sensitive substring match on title or description, in id order
    async fn search(&self, query: &str, limit: i64) -> AppResult<Vec<Movie>>;

    /// Round-trips a trivial query to check the store is reachable
    async fn ping(&self) -> AppResult<()>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

/// Opens the store matching the scheme of `database_url`
///
/// The `movies` table is created if it does not exist yet.
pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Arc<dyn MovieStore>> {
    let store: Arc<dyn MovieStore> =
        if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
            Arc::new(PgMovieStore::connect(database_url, max_connections).await?)
        } else if database_url.starts_with("sqlite:") {
            Arc::new(SqliteMovieStore::connect(database_url, max_connections).await?)
        } else {
            anyhow::bail!("Unsupported database URL scheme: {}", database_url);
        };

    tracing::info!(backend = store.name(), "Movie store ready");
    Ok(store)
}
