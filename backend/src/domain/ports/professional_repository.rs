//! Port for engineer and architect persistence.

use async_trait::async_trait;

use crate::domain::{Professional, ProfessionalId, ProfessionalKind, ProfessionalName};

use super::define_port_error;

define_port_error! {
    /// Errors raised by professional repository adapters.
    pub enum ProfessionalRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "professional repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "professional repository query failed: {message}",
        /// A house still references the record, so it cannot be deleted.
        StillReferenced { id: i64 } =>
            "professional {id} is still referenced by a house",
    }
}

/// Port for reading and writing one kind of professional.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfessionalRepository<K: ProfessionalKind>: Send + Sync {
    /// All records ordered by id.
    async fn list(&self) -> Result<Vec<Professional<K>>, ProfessionalRepositoryError>;

    /// Record with `id`, if any.
    async fn find_by_id(
        &self,
        id: ProfessionalId<K>,
    ) -> Result<Option<Professional<K>>, ProfessionalRepositoryError>;

    /// Records whose name equals `name` exactly.
    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<Professional<K>>, ProfessionalRepositoryError>;

    /// Insert a record.
    async fn create(
        &self,
        name: &ProfessionalName,
    ) -> Result<Professional<K>, ProfessionalRepositoryError>;

    /// Overwrite the name. Returns `false` when no row with that id exists.
    async fn update(&self, professional: &Professional<K>)
    -> Result<bool, ProfessionalRepositoryError>;

    /// Remove a record. Returns `false` when no row with that id exists.
    ///
    /// Fails with [`ProfessionalRepositoryError::StillReferenced`] when the
    /// store refuses because a house links to the record.
    async fn delete(&self, id: ProfessionalId<K>) -> Result<bool, ProfessionalRepositoryError>;
}
