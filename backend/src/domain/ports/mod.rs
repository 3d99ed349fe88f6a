//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hasher, token codec) are implemented by
//! outbound adapters; driving ports (queries, commands, access control) are
//! implemented by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod access_control;
mod credential_hasher;
mod house_command;
mod house_query;
mod house_repository;
mod professional_command;
mod professional_query;
mod professional_repository;
mod token_codec;
mod user_account_repository;

pub use access_control::AccessControl;
#[cfg(test)]
pub use access_control::MockAccessControl;
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHasher, CredentialHasherError};
pub use house_command::HouseCommand;
#[cfg(test)]
pub use house_command::MockHouseCommand;
pub use house_query::HouseQuery;
#[cfg(test)]
pub use house_query::MockHouseQuery;
#[cfg(test)]
pub use house_repository::MockHouseRepository;
pub use house_repository::{HouseRepository, HouseRepositoryError};
#[cfg(test)]
pub use professional_command::MockProfessionalCommand;
pub use professional_command::ProfessionalCommand;
#[cfg(test)]
pub use professional_query::MockProfessionalQuery;
pub use professional_query::ProfessionalQuery;
#[cfg(test)]
pub use professional_repository::MockProfessionalRepository;
pub use professional_repository::{ProfessionalRepository, ProfessionalRepositoryError};
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{TokenCodec, TokenCodecError};
#[cfg(test)]
pub use user_account_repository::MockUserAccountRepository;
pub use user_account_repository::{UserAccountRepository, UserAccountRepositoryError};
