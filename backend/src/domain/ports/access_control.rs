//! Driving port for registration, login and per-request authorization.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials and gate requests without knowing the backing
//! hasher, token format or store.

use async_trait::async_trait;

use crate::domain::{AccessToken, AuthenticatedUser, Error, LoginCredentials, Registration, Role};

/// Authentication and authorization use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessControl: Send + Sync {
    /// Create an account; `conflict` when the login is taken.
    async fn register(&self, registration: Registration) -> Result<(), Error>;

    /// Verify credentials and issue a token; `unauthorized` on any mismatch.
    async fn login(&self, credentials: LoginCredentials) -> Result<AccessToken, Error>;

    /// Verify `token` and check the account's role against `required`.
    ///
    /// Evaluated afresh on every call; nothing is cached between requests.
    async fn authorize(&self, token: &str, required: Role) -> Result<AuthenticatedUser, Error>;
}
