//! Port for house persistence.
//!
//! Writes that link a house to professionals are atomic: the adapter resolves
//! every reference inside the same transaction as the house row, and a
//! missing reference rolls the whole write back.

use async_trait::async_trait;

use crate::domain::{House, HouseDraft, HouseId, ProfessionalRef};

use super::define_port_error;

define_port_error! {
    /// Errors raised by house repository adapters.
    pub enum HouseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "house repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "house repository query failed: {message}",
        /// The referenced engineer does not exist.
        MissingEngineer { id: i64 } => "engineer {id} does not exist",
        /// The referenced architect does not exist.
        MissingArchitect { id: i64 } => "architect {id} does not exist",
    }
}

/// Port for reading and writing houses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HouseRepository: Send + Sync {
    /// All houses ordered by id.
    async fn list(&self) -> Result<Vec<House>, HouseRepositoryError>;

    /// House with `id`, if any.
    async fn find_by_id(&self, id: HouseId) -> Result<Option<House>, HouseRepositoryError>;

    /// Houses whose project name equals `project_name` exactly.
    async fn find_by_project_name(
        &self,
        project_name: &str,
    ) -> Result<Vec<House>, HouseRepositoryError>;

    /// Houses linked to `reference`.
    async fn find_by_professional(
        &self,
        reference: ProfessionalRef,
    ) -> Result<Vec<House>, HouseRepositoryError>;

    /// Insert a house and link it, atomically.
    async fn create(&self, draft: &HouseDraft) -> Result<House, HouseRepositoryError>;

    /// Overwrite every field of `house`, atomically.
    ///
    /// Returns `false` when no row with that id exists.
    async fn replace(&self, house: &House) -> Result<bool, HouseRepositoryError>;

    /// Remove a house. Returns `false` when no row with that id exists.
    async fn delete(&self, id: HouseId) -> Result<bool, HouseRepositoryError>;
}
