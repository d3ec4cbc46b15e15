//! Movie catalog service: CRUD and substring search over movie records,
//! exposed as a JSON REST API backed by PostgreSQL or SQLite.

pub mod config;
pub mod db;
pub mod error;
pub mod fixtures;
pub mod middleware;
pub mod models;
pub mod routes;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use routes::{create_router, AppState};
