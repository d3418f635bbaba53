//! Data models for Biblio

pub mod book;
pub mod patron;
pub mod record;

// Re-export commonly used types
pub use book::Book;
pub use patron::Patron;
pub use record::{BorrowingRecord, LoanStatus, RecordDetails};
