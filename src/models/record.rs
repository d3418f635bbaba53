//! Borrowing record model and loan status derivation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Every loan runs for two weeks from the borrow date.
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// Borrowing record from database.
///
/// A record is "open" while `return_date` is null; closing it (setting the
/// return date) is the only transition and is terminal. Records are never
/// deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowingRecord {
    pub record_id: i32,
    pub book_id: i32,
    pub patron_id: i32,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    /// Null while the loan is open
    pub return_date: Option<NaiveDate>,
}

/// Loan status, computed at read time and never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    Active,
    Overdue,
    Returned,
}

impl LoanStatus {
    /// Derive the status of a loan as of `today`.
    ///
    /// A returned loan is `Returned` regardless of dates; an open loan is
    /// `Overdue` strictly after its due date and `Active` otherwise.
    pub fn derive(due_date: NaiveDate, return_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        if return_date.is_some() {
            LoanStatus::Returned
        } else if today > due_date {
            LoanStatus::Overdue
        } else {
            LoanStatus::Active
        }
    }
}

/// Borrowing record augmented with its derived status
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecordDetails {
    pub record: BorrowingRecord,
    pub status: LoanStatus,
    /// Human-readable status; returned loans carry the return date
    pub status_label: String,
    /// Whole days past the due date (overdue loans only)
    pub days_overdue: Option<i64>,
    /// Whole days until the due date (active loans only)
    pub days_remaining: Option<i64>,
}

impl RecordDetails {
    /// Augment a record with its status as of `today`
    pub fn derive(record: BorrowingRecord, today: NaiveDate) -> Self {
        let status = LoanStatus::derive(record.due_date, record.return_date, today);
        let (status_label, days_overdue, days_remaining) = match status {
            LoanStatus::Active => (
                "ACTIVE".to_string(),
                None,
                Some((record.due_date - today).num_days()),
            ),
            LoanStatus::Overdue => (
                "OVERDUE".to_string(),
                Some((today - record.due_date).num_days()),
                None,
            ),
            LoanStatus::Returned => {
                // status is Returned only when return_date is set
                let on = record.return_date.unwrap_or(today);
                (format!("RETURNED on {}", on), None, None)
            }
        };

        Self {
            record,
            status,
            status_label,
            days_overdue,
            days_remaining,
        }
    }
}
