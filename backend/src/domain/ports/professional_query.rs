//! Driving port for engineer and architect reads.

use async_trait::async_trait;

use crate::domain::{Error, ProfessionalId, ProfessionalKind, ProfessionalProfile};

/// Read operations over one kind of professional.
///
/// Profiles carry the houses currently linked to each record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfessionalQuery<K: ProfessionalKind>: Send + Sync {
    /// Every record with its houses.
    async fn list(&self) -> Result<Vec<ProfessionalProfile<K>>, Error>;

    /// Records whose name matches exactly.
    async fn find_by_name(&self, name: &str) -> Result<Vec<ProfessionalProfile<K>>, Error>;

    /// One record; `not_found` when absent.
    async fn get(&self, id: ProfessionalId<K>) -> Result<ProfessionalProfile<K>, Error>;
}
