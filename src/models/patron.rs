//! Patron model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Patron model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Patron {
    pub patron_id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Email address (must be unique when provided)
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Set once at registration, immutable thereafter
    pub registration_date: NaiveDate,
}

/// Register patron request. The registration date is assigned by the server.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePatron {
    #[validate(length(min = 1, message = "First name must not be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name must not be empty"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Update patron request. Absent fields keep their current value.
/// The registration date cannot be changed.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePatron {
    #[validate(length(min = 1, message = "First name must not be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "Last name must not be empty"))]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Patron search parameters
#[derive(Debug, Deserialize, ToSchema)]
pub struct PatronQuery {
    /// Substring match against first or last name
    pub name: Option<String>,
}
