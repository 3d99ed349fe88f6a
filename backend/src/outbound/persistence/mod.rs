//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` and `bb8` pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Existence checks and error policy live in the services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Atomic linking**: house writes resolve their engineer/architect links
//!   inside the same transaction as the house row.
//!
//! # Example
//!
//! ```no_run
//! use builders::outbound::persistence::{DbPool, DieselHouseRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), builders::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/builders")).await?;
//! let houses = DieselHouseRepository::new(pool);
//! # let _ = houses;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_house_repository;
mod diesel_professional_repository;
mod diesel_user_account_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_house_repository::DieselHouseRepository;
pub use diesel_professional_repository::DieselProfessionalRepository;
pub use diesel_user_account_repository::DieselUserAccountRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
