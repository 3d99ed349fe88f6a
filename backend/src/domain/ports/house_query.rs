//! Driving port for house reads.

use async_trait::async_trait;

use crate::domain::{Error, House, HouseId};

/// Read operations over houses used by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HouseQuery: Send + Sync {
    /// Every house.
    async fn list_houses(&self) -> Result<Vec<House>, Error>;

    /// Houses whose project name matches exactly.
    async fn find_houses_by_project_name(&self, project_name: &str) -> Result<Vec<House>, Error>;

    /// One house; `not_found` when absent.
    async fn get_house(&self, id: HouseId) -> Result<House, Error>;
}
