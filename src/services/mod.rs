//! Business logic services

pub mod catalog;
pub mod loans;
pub mod patrons;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub patrons: patrons::PatronsService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            patrons: patrons::PatronsService::new(repository.clone()),
            loans: loans::LoansService::new(repository),
        }
    }
}
