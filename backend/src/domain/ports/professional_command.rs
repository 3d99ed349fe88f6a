//! Driving port for engineer and architect writes.

use async_trait::async_trait;

use crate::domain::{Error, Professional, ProfessionalId, ProfessionalKind, ProfessionalName};

/// Write operations over one kind of professional.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfessionalCommand<K: ProfessionalKind>: Send + Sync {
    /// Persist a new record.
    async fn create(&self, name: ProfessionalName) -> Result<Professional<K>, Error>;

    /// Replace the record's fields; `not_found` when absent.
    async fn replace(&self, professional: Professional<K>) -> Result<(), Error>;

    /// Delete the record.
    ///
    /// Fails with `still_referenced` while any house links to it; the record
    /// and its houses are left intact.
    async fn delete(&self, id: ProfessionalId<K>) -> Result<(), Error>;
}
