//! Patron directory service

use crate::{
    error::{AppError, AppResult},
    models::patron::{CreatePatron, Patron, PatronQuery, UpdatePatron},
    repository::Repository,
};

#[derive(Clone)]
pub struct PatronsService {
    repository: Repository,
}

impl PatronsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get patron by ID
    pub async fn get_patron(&self, id: i32) -> AppResult<Patron> {
        self.repository.patrons.get_by_id(id).await
    }

    /// List patrons, filtered by name substring when given
    pub async fn search_patrons(&self, query: &PatronQuery) -> AppResult<Vec<Patron>> {
        match query.name {
            Some(ref name) => self.repository.patrons.find_by_name(name).await,
            None => self.repository.patrons.list().await,
        }
    }

    /// Register a new patron
    pub async fn create_patron(&self, patron: CreatePatron) -> AppResult<Patron> {
        // Email is optional but unique when present
        if let Some(ref email) = patron.email {
            if self.repository.patrons.email_exists(email, None).await? {
                return Err(AppError::ConstraintViolation(format!(
                    "A patron with email {} already exists",
                    email
                )));
            }
        }

        let created = self.repository.patrons.create(&patron).await?;
        tracing::info!(
            "Patrons: registered id={} {} {}",
            created.patron_id,
            created.first_name,
            created.last_name
        );
        Ok(created)
    }

    /// Update a patron's name, email or phone
    pub async fn update_patron(&self, id: i32, patron: UpdatePatron) -> AppResult<Patron> {
        if let Some(ref email) = patron.email {
            if self.repository.patrons.email_exists(email, Some(id)).await? {
                return Err(AppError::ConstraintViolation(format!(
                    "A patron with email {} already exists",
                    email
                )));
            }
        }

        self.repository.patrons.update(id, &patron).await
    }

    /// Delete a patron. Blocked while any borrowing record, open or closed,
    /// references them.
    pub async fn delete_patron(&self, id: i32) -> AppResult<()> {
        self.repository.patrons.get_by_id(id).await?;

        if !self.repository.patrons.delete(id).await? {
            return Err(AppError::ReferentialConflict(format!(
                "Patron {} has borrowing records and cannot be deleted",
                id
            )));
        }

        tracing::info!("Patrons: deleted id={}", id);
        Ok(())
    }
}
