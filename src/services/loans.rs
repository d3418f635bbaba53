//! Loan ledger service
//!
//! Owns the borrowing lifecycle: a record is created open by a borrow,
//! closed exactly once by a return, and carries a status derived at read
//! time from its dates.

use chrono::Utc;

use crate::{
    error::AppResult,
    models::record::{BorrowingRecord, RecordDetails},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow a book for a patron
    pub async fn borrow(&self, patron_id: i32, book_id: i32) -> AppResult<BorrowingRecord> {
        let record = self.repository.records.borrow(patron_id, book_id).await?;
        tracing::info!(
            "Loans: record {} opened (patron {}, book {}), due {}",
            record.record_id,
            patron_id,
            book_id,
            record.due_date
        );
        Ok(record)
    }

    /// Return a borrowed book by record ID
    pub async fn return_record(&self, record_id: i32) -> AppResult<BorrowingRecord> {
        let record = self.repository.records.close(record_id).await?;
        tracing::info!("Loans: record {} closed", record_id);
        Ok(record)
    }

    /// Get one record with its derived status
    pub async fn get_record(&self, record_id: i32) -> AppResult<RecordDetails> {
        let record = self.repository.records.get_by_id(record_id).await?;
        Ok(RecordDetails::derive(record, Utc::now().date_naive()))
    }

    /// List all open loans with derived status
    pub async fn list_active(&self) -> AppResult<Vec<RecordDetails>> {
        let today = Utc::now().date_naive();
        let records = self.repository.records.list_active().await?;

        Ok(records
            .into_iter()
            .map(|r| RecordDetails::derive(r, today))
            .collect())
    }

    /// Full borrowing history for a patron, most recent first
    pub async fn patron_history(&self, patron_id: i32) -> AppResult<Vec<RecordDetails>> {
        // Verify patron exists
        self.repository.patrons.get_by_id(patron_id).await?;

        let today = Utc::now().date_naive();
        let records = self.repository.records.history_for_patron(patron_id).await?;

        Ok(records
            .into_iter()
            .map(|r| RecordDetails::derive(r, today))
            .collect())
    }
}
