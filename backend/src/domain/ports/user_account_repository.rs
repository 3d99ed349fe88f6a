//! Port for account persistence.

use async_trait::async_trait;

use crate::domain::{Login, UserAccount};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum UserAccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "account repository query failed: {message}",
        /// The login is already taken.
        DuplicateLogin { login: String } => "login {login} already exists",
    }
}

/// Port for reading and inserting accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccountRepository: Send + Sync {
    /// Account with `login`, if any.
    async fn find_by_login(
        &self,
        login: &Login,
    ) -> Result<Option<UserAccount>, UserAccountRepositoryError>;

    /// Insert a new account, failing on a taken login.
    async fn insert(&self, account: &UserAccount) -> Result<(), UserAccountRepositoryError>;
}
