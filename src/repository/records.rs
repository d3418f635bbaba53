//! Borrowing records repository: the loan ledger's database operations
//!
//! Borrow and return each touch two rows (the record and the book's copy
//! counter). Both writes run inside one transaction so a partial outcome is
//! never observable, and the copies-available check locks the book row so
//! concurrent borrows of the same book cannot oversell copies.

use chrono::{Duration, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::record::{BorrowingRecord, LOAN_PERIOD_DAYS},
};

#[derive(Clone)]
pub struct RecordsRepository {
    pool: Pool<Postgres>,
}

impl RecordsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get borrowing record by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<BorrowingRecord> {
        sqlx::query_as::<_, BorrowingRecord>(
            "SELECT * FROM borrowing_records WHERE record_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Borrowing record with id {} not found", id)))
    }

    /// Borrow a book: create an open record and decrement the book's
    /// available copies, atomically.
    pub async fn borrow(&self, patron_id: i32, book_id: i32) -> AppResult<BorrowingRecord> {
        let mut tx = self.pool.begin().await?;

        let patron_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM patrons WHERE patron_id = $1)")
                .bind(patron_id)
                .fetch_one(&mut *tx)
                .await?;

        if !patron_exists {
            return Err(AppError::NotFound(format!(
                "Patron with id {} not found",
                patron_id
            )));
        }

        // Row lock serializes the check-and-decrement against concurrent borrows
        let copies_available: Option<i32> = sqlx::query_scalar(
            "SELECT copies_available FROM books WHERE book_id = $1 FOR UPDATE",
        )
        .bind(book_id)
        .fetch_optional(&mut *tx)
        .await?;

        let copies_available = copies_available.ok_or_else(|| {
            AppError::NotFound(format!("Book with id {} not found", book_id))
        })?;

        if copies_available <= 0 {
            return Err(AppError::NoCopiesAvailable(format!(
                "No copies of book {} available for borrowing",
                book_id
            )));
        }

        let borrow_date = Utc::now().date_naive();
        let due_date = borrow_date + Duration::days(LOAN_PERIOD_DAYS);

        let record = sqlx::query_as::<_, BorrowingRecord>(
            r#"
            INSERT INTO borrowing_records (book_id, patron_id, borrow_date, due_date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(patron_id)
        .bind(borrow_date)
        .bind(due_date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE books SET copies_available = copies_available - 1 WHERE book_id = $1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    /// Close a record: set its return date and increment the book's
    /// available copies, atomically.
    pub async fn close(&self, record_id: i32) -> AppResult<BorrowingRecord> {
        let mut tx = self.pool.begin().await?;

        // Lock the record so a duplicate return cannot slip past the guard
        let record: Option<BorrowingRecord> = sqlx::query_as(
            "SELECT * FROM borrowing_records WHERE record_id = $1 FOR UPDATE",
        )
        .bind(record_id)
        .fetch_optional(&mut *tx)
        .await?;

        let record = record.ok_or_else(|| {
            AppError::NotFound(format!("Borrowing record with id {} not found", record_id))
        })?;

        if record.return_date.is_some() {
            return Err(AppError::AlreadyReturned(format!(
                "Borrowing record {} is already returned",
                record_id
            )));
        }

        let return_date = Utc::now().date_naive();

        let closed = sqlx::query_as::<_, BorrowingRecord>(
            "UPDATE borrowing_records SET return_date = $1 WHERE record_id = $2 RETURNING *",
        )
        .bind(return_date)
        .bind(record_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE books SET copies_available = copies_available + 1 WHERE book_id = $1")
            .bind(record.book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(closed)
    }

    /// List all open records (return date not set)
    pub async fn list_active(&self) -> AppResult<Vec<BorrowingRecord>> {
        let records = sqlx::query_as::<_, BorrowingRecord>(
            "SELECT * FROM borrowing_records WHERE return_date IS NULL ORDER BY due_date, record_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// All records for a patron, most recent borrow first
    pub async fn history_for_patron(&self, patron_id: i32) -> AppResult<Vec<BorrowingRecord>> {
        let records = sqlx::query_as::<_, BorrowingRecord>(
            r#"
            SELECT * FROM borrowing_records
            WHERE patron_id = $1
            ORDER BY borrow_date DESC, record_id DESC
            "#,
        )
        .bind(patron_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
