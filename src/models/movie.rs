use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// A stored movie, as persisted and as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Movie {
    /// Store-assigned identifier, never reused after deletion
    pub id: i64,
    pub title: String,
    pub description: String,
}

/// A movie that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub title: String,
    pub description: String,
}

impl NewMovie {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Attaches an existing id, giving the full record to write back
    pub fn with_id(self, id: i64) -> Movie {
        Movie {
            id,
            title: self.title,
            description: self.description,
        }
    }
}

/// Request body for create and edit
///
/// Both fields are optional on the wire so that a missing field is reported
/// as invalid input rather than as a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoviePayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl MoviePayload {
    /// Checks that both fields are present and non-blank
    ///
    /// NUL characters are refused as well; PostgreSQL `TEXT` cannot store them.
    pub fn validate(self) -> AppResult<NewMovie> {
        let title = required("title", self.title)?;
        let description = required("description", self.description)?;
        Ok(NewMovie { title, description })
    }
}

fn required(field: &str, value: Option<String>) -> AppResult<String> {
    match value {
        Some(v) if v.contains('\0') => Err(AppError::InvalidInput(format!(
            "{} must not contain NUL characters",
            field
        ))),
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(AppError::InvalidInput(format!("{} must not be empty", field))),
        None => Err(AppError::InvalidInput(format!("{} is required", field))),
    }
}

/// Query string of the search endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
    pub size: Option<i64>,
}
