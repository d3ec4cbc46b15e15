use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::{
    db::MovieStore,
    error::AppResult,
    models::{Movie, NewMovie},
};

// AUTOINCREMENT stops SQLite from handing out the id of a deleted row again
const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS movies (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        title       TEXT NOT NULL,
        description TEXT NOT NULL
    )
"#;

/// Creates a SQLite connection pool
///
/// An in-memory database lives only as long as its connection, so memory
/// URLs get a single connection that is never recycled.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool_options = if database_url.contains(":memory:") || database_url.contains("mode=memory") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections)
    };

    pool_options.connect_with(options).await
}

/// Movie store backed by SQLite, used for local runs and the test suite
#[derive(Clone)]
pub struct SqliteMovieStore {
    pool: SqlitePool,
}

impl SqliteMovieStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connects and makes sure the `movies` table exists
    pub async fn connect(database_url: &str, max_connections: u32) -> AppResult<Self> {
        let store = Self::new(create_pool(database_url, max_connections).await?);
        sqlx::query(CREATE_TABLE).execute(&store.pool).await?;
        Ok(store)
    }

    /// Fresh private in-memory store
    pub async fn in_memory() -> AppResult<Self> {
        Self::connect("sqlite::memory:", 1).await
    }
}

#[async_trait::async_trait]
impl MovieStore for SqliteMovieStore {
    async fn insert(&self, movie: NewMovie) -> AppResult<Movie> {
        let movie = sqlx::query_as::<_, Movie>(
            "INSERT INTO movies (title, description) VALUES (?, ?) \
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
            "UPDATE movies SET title = ?, description = ? WHERE id = ? \
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
            "SELECT id, title, description FROM movies WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(movie)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, query: &str, limit: i64) -> AppResult<Vec<Movie>> {
        // instr is case-sensitive; LIKE folds ASCII case in SQLite
        let movies = sqlx::query_as::<_, Movie>(
            "SELECT id, title, description FROM movies \
             WHERE instr(title, ?) > 0 OR instr(description, ?) > 0 \
             ORDER BY id \
             LIMIT ?",
        )
        .bind(query)
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
        "sqlite"
    }
}
