//! House domain service.
//!
//! Implements the house driving ports over a [`HouseRepository`]. Link
//! resolution and rollback happen inside the repository's transaction; this
//! service owns existence checks and error translation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{HouseCommand, HouseQuery, HouseRepository, HouseRepositoryError};
use crate::domain::{Error, House, HouseDraft, HouseId};

/// Translate repository failures into domain errors.
///
/// A missing engineer or architect named by the request body is a client
/// error (400) rather than a 404 on the addressed house.
pub(crate) fn map_house_repository_error(error: HouseRepositoryError) -> Error {
    match error {
        HouseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("house repository unavailable: {message}"))
        }
        HouseRepositoryError::Query { message } => {
            Error::internal(format!("house repository error: {message}"))
        }
        HouseRepositoryError::MissingEngineer { id } => missing_link("engineer", "engineerId", id),
        HouseRepositoryError::MissingArchitect { id } => {
            missing_link("architect", "architectId", id)
        }
    }
}

fn missing_link(label: &str, field: &'static str, id: i64) -> Error {
    Error::invalid_request(format!("{label} {id} not found")).with_details(json!({
        "field": field,
        "code": "not_found",
        "id": id,
    }))
}

fn house_not_found(id: HouseId) -> Error {
    Error::not_found(format!("house {id} not found"))
}

/// House service implementing [`HouseQuery`] and [`HouseCommand`].
#[derive(Clone)]
pub struct HouseService<R> {
    houses: Arc<R>,
}

impl<R> HouseService<R> {
    /// Create a new service over the house repository.
    pub fn new(houses: Arc<R>) -> Self {
        Self { houses }
    }
}

impl<R> HouseService<R>
where
    R: HouseRepository,
{
    async fn require(&self, id: HouseId) -> Result<House, Error> {
        self.houses
            .find_by_id(id)
            .await
            .map_err(map_house_repository_error)?
            .ok_or_else(|| house_not_found(id))
    }
}

#[async_trait]
impl<R> HouseQuery for HouseService<R>
where
    R: HouseRepository,
{
    async fn list_houses(&self) -> Result<Vec<House>, Error> {
        self.houses.list().await.map_err(map_house_repository_error)
    }

    async fn find_houses_by_project_name(&self, project_name: &str) -> Result<Vec<House>, Error> {
        self.houses
            .find_by_project_name(project_name)
            .await
            .map_err(map_house_repository_error)
    }

    async fn get_house(&self, id: HouseId) -> Result<House, Error> {
        self.require(id).await
    }
}

#[async_trait]
impl<R> HouseCommand for HouseService<R>
where
    R: HouseRepository,
{
    async fn create_house(&self, draft: HouseDraft) -> Result<House, Error> {
        let house = self
            .houses
            .create(&draft)
            .await
            .map_err(map_house_repository_error)?;
        info!(
            house_id = %house.id(),
            engineer = ?house.engineer().map(|id| id.get()),
            architect = ?house.architect().map(|id| id.get()),
            "house created"
        );
        Ok(house)
    }

    async fn replace_house(&self, id: HouseId, draft: HouseDraft) -> Result<House, Error> {
        self.require(id).await?;
        let house = House::new(id, draft);
        let replaced = self
            .houses
            .replace(&house)
            .await
            .map_err(map_house_repository_error)?;
        if !replaced {
            // Deleted between the lookup and the write.
            return Err(house_not_found(id));
        }
        info!(house_id = %id, "house replaced");
        Ok(house)
    }

    async fn delete_house(&self, id: HouseId) -> Result<(), Error> {
        let house = self.require(id).await?;
        debug!(
            house_id = %id,
            linked = house.engineer().is_some() || house.architect().is_some(),
            "deleting house"
        );
        let deleted = self
            .houses
            .delete(id)
            .await
            .map_err(map_house_repository_error)?;
        if !deleted {
            return Err(house_not_found(id));
        }
        info!(house_id = %id, "house deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "house_service_tests.rs"]
mod tests;
