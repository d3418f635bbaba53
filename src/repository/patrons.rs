//! Patrons repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::patron::{CreatePatron, Patron, UpdatePatron},
};

#[derive(Clone)]
pub struct PatronsRepository {
    pool: Pool<Postgres>,
}

impl PatronsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get patron by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Patron> {
        sqlx::query_as::<_, Patron>("SELECT * FROM patrons WHERE patron_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Patron with id {} not found", id)))
    }

    /// Find patrons whose first or last name contains the given text
    pub async fn find_by_name(&self, name: &str) -> AppResult<Vec<Patron>> {
        let pattern = format!("%{}%", name);
        let patrons = sqlx::query_as::<_, Patron>(
            "SELECT * FROM patrons WHERE first_name LIKE $1 OR last_name LIKE $1 ORDER BY patron_id",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(patrons)
    }

    /// List all patrons
    pub async fn list(&self) -> AppResult<Vec<Patron>> {
        let patrons = sqlx::query_as::<_, Patron>("SELECT * FROM patrons ORDER BY patron_id")
            .fetch_all(&self.pool)
            .await?;

        Ok(patrons)
    }

    /// Check whether an email is already taken, optionally excluding one patron
    pub async fn email_exists(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM patrons WHERE email = $1 AND ($2::int IS NULL OR patron_id != $2))",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Register a new patron. The registration date is set here, once.
    pub async fn create(&self, patron: &CreatePatron) -> AppResult<Patron> {
        let registration_date = Utc::now().date_naive();

        let created = sqlx::query_as::<_, Patron>(
            r#"
            INSERT INTO patrons (first_name, last_name, email, phone, registration_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&patron.first_name)
        .bind(&patron.last_name)
        .bind(&patron.email)
        .bind(&patron.phone)
        .bind(registration_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update a patron by ID. Absent fields keep their current value;
    /// the registration date is never touched.
    pub async fn update(&self, id: i32, patron: &UpdatePatron) -> AppResult<Patron> {
        sqlx::query_as::<_, Patron>(
            r#"
            UPDATE patrons
            SET first_name = COALESCE($1, first_name),
                last_name = COALESCE($2, last_name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone)
            WHERE patron_id = $5
            RETURNING *
            "#,
        )
        .bind(&patron.first_name)
        .bind(&patron.last_name)
        .bind(&patron.email)
        .bind(&patron.phone)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Patron with id {} not found", id)))
    }

    /// Count borrowing records (open or closed) referencing a patron
    pub async fn count_references(&self, id: i32) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM borrowing_records WHERE patron_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Delete a patron by ID, returning whether a row was removed.
    /// Returns false without deleting when any borrowing record, open or
    /// closed, references the patron.
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        if self.count_references(id).await? > 0 {
            return Ok(false);
        }

        let result = sqlx::query("DELETE FROM patrons WHERE patron_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
