//! Driving port for house writes.
//!
//! A reference to a missing engineer or architect fails the write with
//! `invalid_request` and leaves the store untouched.

use async_trait::async_trait;

use crate::domain::{Error, House, HouseDraft, HouseId};

/// Write operations over houses used by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HouseCommand: Send + Sync {
    /// Persist and link a new house.
    async fn create_house(&self, draft: HouseDraft) -> Result<House, Error>;

    /// Replace every field of house `id`; omitted links are cleared.
    async fn replace_house(&self, id: HouseId, draft: HouseDraft) -> Result<House, Error>;

    /// Delete house `id`; `not_found` when absent.
    async fn delete_house(&self, id: HouseId) -> Result<(), Error>;
}
