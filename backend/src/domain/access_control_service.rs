//! Registration, login and token authorization.
//!
//! Tokens are stateless: every [`AccessControl::authorize`] call verifies the
//! signature and expiry and re-reads the account, so a role change or a
//! removed account takes effect on the next request.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    AccessControl, CredentialHasher, CredentialHasherError, TokenCodec, TokenCodecError,
    UserAccountRepository, UserAccountRepositoryError,
};
use crate::domain::{
    AccessToken, AuthenticatedUser, Error, Login, LoginCredentials, Registration, Role,
    UserAccount,
};

/// Message for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

fn map_account_error(error: UserAccountRepositoryError) -> Error {
    match error {
        UserAccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        UserAccountRepositoryError::Query { message } => {
            Error::internal(format!("account repository error: {message}"))
        }
        UserAccountRepositoryError::DuplicateLogin { login } => duplicate_login(&login),
    }
}

fn map_hasher_error(error: CredentialHasherError) -> Error {
    Error::internal(error.to_string())
}

fn map_token_error(error: TokenCodecError) -> Error {
    match error {
        TokenCodecError::Signing { message } => {
            Error::internal(format!("token signing failed: {message}"))
        }
        TokenCodecError::Invalid { message } => {
            debug!(reason = %message, "rejected bearer token");
            Error::unauthorized("invalid token")
        }
        TokenCodecError::Expired => Error::unauthorized("token has expired"),
    }
}

fn duplicate_login(login: &str) -> Error {
    Error::conflict(format!("login {login} already exists"))
}

/// Service implementing [`AccessControl`].
#[derive(Clone)]
pub struct AccessControlService<U, C, T> {
    accounts: Arc<U>,
    hasher: Arc<C>,
    tokens: Arc<T>,
}

impl<U, C, T> AccessControlService<U, C, T> {
    /// Create a service over the account store, password hasher and token codec.
    pub fn new(accounts: Arc<U>, hasher: Arc<C>, tokens: Arc<T>) -> Self {
        Self {
            accounts,
            hasher,
            tokens,
        }
    }
}

impl<U, C, T> AccessControlService<U, C, T>
where
    U: UserAccountRepository,
{
    async fn account(&self, login: &Login) -> Result<Option<UserAccount>, Error> {
        self.accounts
            .find_by_login(login)
            .await
            .map_err(map_account_error)
    }
}

#[async_trait]
impl<U, C, T> AccessControl for AccessControlService<U, C, T>
where
    U: UserAccountRepository,
    C: CredentialHasher,
    T: TokenCodec,
{
    async fn register(&self, registration: Registration) -> Result<(), Error> {
        let Registration { credentials, role } = registration;
        let login = credentials.login().clone();
        if self.account(&login).await?.is_some() {
            return Err(duplicate_login(login.as_str()));
        }
        let password_hash = self
            .hasher
            .hash(credentials.password())
            .map_err(map_hasher_error)?;
        let account = UserAccount {
            login,
            password_hash,
            role,
        };
        self.accounts
            .insert(&account)
            .await
            .map_err(map_account_error)?;
        info!(login = %account.login, role = %account.role, "account registered");
        Ok(())
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AccessToken, Error> {
        let Some(account) = self.account(credentials.login()).await? else {
            warn!(login = %credentials.login(), "login for unknown account");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let matches = self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .map_err(map_hasher_error)?;
        if !matches {
            warn!(login = %account.login, "login with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        let token = self
            .tokens
            .issue(&account.login)
            .map_err(map_token_error)?;
        info!(login = %account.login, "token issued");
        Ok(token)
    }

    async fn authorize(&self, token: &str, required: Role) -> Result<AuthenticatedUser, Error> {
        let subject = self.tokens.verify(token).map_err(map_token_error)?;
        let Some(account) = self.account(&subject).await? else {
            return Err(Error::unauthorized("token subject no longer exists"));
        };
        if !account.role.satisfies(required) {
            debug!(login = %account.login, held = %account.role, %required, "role check failed");
            return Err(Error::forbidden(format!("{required} role required")));
        }
        Ok(AuthenticatedUser {
            login: account.login,
            role: account.role,
        })
    }
}

#[cfg(test)]
#[path = "access_control_service_tests.rs"]
mod tests;
