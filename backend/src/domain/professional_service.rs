//! Engineer and architect domain service.
//!
//! Back-references are never stored: a profile's house list is computed from
//! the house repository on each read, and deletion consults the same query to
//! refuse removing a record a house still links to.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::house_service::map_house_repository_error;
use crate::domain::ports::{
    HouseRepository, ProfessionalCommand, ProfessionalQuery, ProfessionalRepository,
    ProfessionalRepositoryError,
};
use crate::domain::{
    Error, House, Professional, ProfessionalId, ProfessionalKind, ProfessionalName,
    ProfessionalProfile,
};

fn map_repository_error<K: ProfessionalKind>(error: ProfessionalRepositoryError) -> Error {
    match error {
        ProfessionalRepositoryError::Connection { message } => Error::service_unavailable(
            format!("{} repository unavailable: {message}", K::LABEL),
        ),
        ProfessionalRepositoryError::Query { message } => {
            Error::internal(format!("{} repository error: {message}", K::LABEL))
        }
        ProfessionalRepositoryError::StillReferenced { id } => still_referenced::<K>(id, &[]),
    }
}

fn still_referenced<K: ProfessionalKind>(id: i64, houses: &[i64]) -> Error {
    Error::still_referenced(format!(
        "{} {id} is linked to a house; detach it before deleting",
        K::LABEL
    ))
    .with_details(json!({ "houses": houses }))
}

fn not_found<K: ProfessionalKind>(id: ProfessionalId<K>) -> Error {
    Error::not_found(format!("{} {id} not found", K::LABEL))
}

/// Pair each professional with the houses linking to it.
fn attach_houses<K: ProfessionalKind>(
    professionals: Vec<Professional<K>>,
    houses: &[House],
) -> Vec<ProfessionalProfile<K>> {
    professionals
        .into_iter()
        .map(|professional| {
            let linked = houses
                .iter()
                .filter(|house| K::linked_to(house) == Some(professional.id()))
                .cloned()
                .collect();
            ProfessionalProfile {
                professional,
                houses: linked,
            }
        })
        .collect()
}

/// Service implementing [`ProfessionalQuery`] and [`ProfessionalCommand`]
/// for one kind of professional.
pub struct ProfessionalService<K, P, H> {
    professionals: Arc<P>,
    houses: Arc<H>,
    kind: PhantomData<K>,
}

impl<K, P, H> Clone for ProfessionalService<K, P, H> {
    fn clone(&self) -> Self {
        Self {
            professionals: Arc::clone(&self.professionals),
            houses: Arc::clone(&self.houses),
            kind: PhantomData,
        }
    }
}

impl<K, P, H> ProfessionalService<K, P, H> {
    /// Create a new service over the professional and house repositories.
    pub fn new(professionals: Arc<P>, houses: Arc<H>) -> Self {
        Self {
            professionals,
            houses,
            kind: PhantomData,
        }
    }
}

impl<K, P, H> ProfessionalService<K, P, H>
where
    K: ProfessionalKind,
    P: ProfessionalRepository<K>,
    H: HouseRepository,
{
    async fn require(&self, id: ProfessionalId<K>) -> Result<Professional<K>, Error> {
        self.professionals
            .find_by_id(id)
            .await
            .map_err(map_repository_error::<K>)?
            .ok_or_else(|| not_found(id))
    }

    async fn linked_houses(&self, id: ProfessionalId<K>) -> Result<Vec<House>, Error> {
        self.houses
            .find_by_professional(K::reference(id))
            .await
            .map_err(map_house_repository_error)
    }

    async fn with_houses(
        &self,
        professionals: Vec<Professional<K>>,
    ) -> Result<Vec<ProfessionalProfile<K>>, Error> {
        if professionals.is_empty() {
            return Ok(Vec::new());
        }
        let houses = self
            .houses
            .list()
            .await
            .map_err(map_house_repository_error)?;
        Ok(attach_houses(professionals, &houses))
    }
}

#[async_trait]
impl<K, P, H> ProfessionalQuery<K> for ProfessionalService<K, P, H>
where
    K: ProfessionalKind,
    P: ProfessionalRepository<K>,
    H: HouseRepository,
{
    async fn list(&self) -> Result<Vec<ProfessionalProfile<K>>, Error> {
        let professionals = self
            .professionals
            .list()
            .await
            .map_err(map_repository_error::<K>)?;
        self.with_houses(professionals).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<ProfessionalProfile<K>>, Error> {
        let professionals = self
            .professionals
            .find_by_name(name)
            .await
            .map_err(map_repository_error::<K>)?;
        self.with_houses(professionals).await
    }

    async fn get(&self, id: ProfessionalId<K>) -> Result<ProfessionalProfile<K>, Error> {
        let professional = self.require(id).await?;
        let houses = self.linked_houses(id).await?;
        Ok(ProfessionalProfile {
            professional,
            houses,
        })
    }
}

#[async_trait]
impl<K, P, H> ProfessionalCommand<K> for ProfessionalService<K, P, H>
where
    K: ProfessionalKind,
    P: ProfessionalRepository<K>,
    H: HouseRepository,
{
    async fn create(&self, name: ProfessionalName) -> Result<Professional<K>, Error> {
        let professional = self
            .professionals
            .create(&name)
            .await
            .map_err(map_repository_error::<K>)?;
        info!(kind = K::LABEL, id = %professional.id(), "professional created");
        Ok(professional)
    }

    async fn replace(&self, professional: Professional<K>) -> Result<(), Error> {
        let updated = self
            .professionals
            .update(&professional)
            .await
            .map_err(map_repository_error::<K>)?;
        if !updated {
            return Err(not_found(professional.id()));
        }
        info!(kind = K::LABEL, id = %professional.id(), "professional replaced");
        Ok(())
    }

    async fn delete(&self, id: ProfessionalId<K>) -> Result<(), Error> {
        self.require(id).await?;
        let linked = self.linked_houses(id).await?;
        if !linked.is_empty() {
            let house_ids: Vec<i64> = linked.iter().map(|house| house.id().get()).collect();
            warn!(kind = K::LABEL, %id, houses = ?house_ids, "delete blocked by linked houses");
            return Err(still_referenced::<K>(id.get(), &house_ids));
        }
        let deleted = self
            .professionals
            .delete(id)
            .await
            .map_err(map_repository_error::<K>)?;
        if !deleted {
            return Err(not_found(id));
        }
        info!(kind = K::LABEL, %id, "professional deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "professional_service_tests.rs"]
mod tests;
