//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get book by ID
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// List books, filtered by title substring when given
    pub async fn search_books(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        match query.title {
            Some(ref title) => self.repository.books.find_by_title(title).await,
            None => self.repository.books.list().await,
        }
    }

    /// Add a new book to the catalog
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        // ISBN is optional but unique when present
        if let Some(ref isbn) = book.isbn {
            if self.repository.books.isbn_exists(isbn, None).await? {
                return Err(AppError::ConstraintViolation(format!(
                    "A book with ISBN {} already exists",
                    isbn
                )));
            }
        }

        let created = self.repository.books.create(&book).await?;
        tracing::info!("Catalog: created book id={} \"{}\"", created.book_id, created.title);
        Ok(created)
    }

    /// Update an existing book
    pub async fn update_book(&self, id: i32, book: UpdateBook) -> AppResult<Book> {
        if let Some(ref isbn) = book.isbn {
            if self.repository.books.isbn_exists(isbn, Some(id)).await? {
                return Err(AppError::ConstraintViolation(format!(
                    "A book with ISBN {} already exists",
                    isbn
                )));
            }
        }

        self.repository.books.update(id, &book).await
    }

    /// Delete a book. Blocked while any borrowing record references it.
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        // Distinguish a missing book from a referenced one
        self.repository.books.get_by_id(id).await?;

        if !self.repository.books.delete(id).await? {
            return Err(AppError::ReferentialConflict(format!(
                "Book {} is referenced by borrowing records and cannot be deleted",
                id
            )));
        }

        tracing::info!("Catalog: deleted book id={}", id);
        Ok(())
    }
}
