//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub book_id: i32,
    pub title: String,
    pub author: String,
    /// ISBN (must be unique when provided)
    pub isbn: Option<String>,
    pub publication_year: Option<i32>,
    /// Count of physical copies not currently on loan. Never negative.
    pub copies_available: i32,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    /// ISBN (must be unique when provided)
    pub isbn: Option<String>,
    pub publication_year: Option<i32>,
    /// Initial number of copies (default 0)
    #[validate(range(min = 0, message = "Copies must not be negative"))]
    pub copies_available: Option<i32>,
}

/// Update book request. Absent fields keep their current value.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: Option<String>,
    /// ISBN (must be unique when provided)
    pub isbn: Option<String>,
    pub publication_year: Option<i32>,
    #[validate(range(min = 0, message = "Copies must not be negative"))]
    pub copies_available: Option<i32>,
}

/// Book search parameters
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookQuery {
    /// Substring match against the title
    pub title: Option<String>,
}
