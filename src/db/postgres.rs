use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::MovieStore,
    error::AppResult,
    models::{Movie, NewMovie},
};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS movies (
        id          BIGSERIAL PRIMARY KEY,
        title       TEXT NOT NULL,
        description TEXT NOT NULL
    )
"#;

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Movie store backed by PostgreSQL
#[derive(Clone)]
pub struct PgMovieStore {
    pool: PgPool,
}

impl PgMovieStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects and makes sure the `movies` table exists
    pub async fn connect(database_url: &str, max_connections: u32) -> AppResult<Self> {
        let store = Self::new(create_pool(database_url, max_connections).await?);
        sqlx::query(CREATE_TABLE).execute(&store.pool).await?;
        Ok(store)
    }
}

#[async_trait::async_trait]
impl MovieStore for PgMovieStore {
    async fn insert(&self, movie: NewMovie) -> AppResult<Movie> {
        let movie = sqlx::query_as::<_, Movie>(
            "INSERT INTO movies (title, description) VALUES ($1, $2) \
             RETURNING id, title, description",
        )
        .bind(movie.title)
        .bind(movie.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(movie)
    }

    async fn update(&self, movie: Movie) -> AppResult<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>(
            "UPDATE movies SET title = $1, description = $2 WHERE id = $3 \
             RETURNING id, title, description",
        )
        .bind(movie.title)
        .bind(movie.description)
        .bind(movie.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(movie)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>(
            "SELECT id, title, description FROM movies WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(movie)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, query: &str, limit: i64) -> AppResult<Vec<Movie>> {
        // strpos keeps `%` and `_` literal, unlike LIKE
        let movies = sqlx::query_as::<_, Movie>(
            "SELECT id, title, description FROM movies \
             WHERE strpos(title, $1) > 0 OR strpos(description, $1) > 0 \
             ORDER BY id \
             LIMIT $2",
        )
        .bind(query)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(movies)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
